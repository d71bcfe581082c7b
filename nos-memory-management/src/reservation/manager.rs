//! The reservation manager handle (§6): the crate-facing entry point tying
//! the table, lock pool, free queues, and counters together.

extern crate alloc;

use super::collab::PageSource;
use super::lock::ShardLocks;
use super::lru::LruList;
use super::object::ObjectIndex;
use super::stats::{Counters, ReservationStats};
use super::table::ReservationTable;
use alloc::string::String;
use alloc::vec::Vec;
use spin::Mutex;

/// The active/inactive LRU queues and per-object index, all guarded by one
/// lock (§4.3's "free-queue lock"), since every operation that touches one
/// of them typically needs to touch at least one other in the same step.
pub(super) struct FreeQueueState {
    pub(super) active: LruList,
    pub(super) inactive: LruList,
    pub(super) objects: ObjectIndex,
}

impl FreeQueueState {
    pub(super) fn new() -> Self {
        Self {
            active: LruList::new(),
            inactive: LruList::new(),
            objects: ObjectIndex::new(),
        }
    }
}

/// Owns the whole reservation subsystem for one physical address range.
///
/// Generic over the small-page allocator `P` it hands populated/depopulated
/// runs back to; a given kernel image instantiates exactly one
/// `ReservationManager` over its real [`PageSource`], and a test
/// instantiates as many as it likes over
/// [`super::test_support::BumpPageSource`].
pub struct ReservationManager<P: PageSource> {
    pub(super) table: ReservationTable,
    pub(super) locks: ShardLocks,
    pub(super) queues: Mutex<FreeQueueState>,
    pub(super) counters: Counters,
    pub(super) source: P,
}

impl<P: PageSource> ReservationManager<P> {
    /// Builds a manager over an already-sized, already-initialized table
    /// (see [`super::boot::init`] for the usual construction path).
    pub(super) fn from_parts(table: ReservationTable, source: P) -> Self {
        Self {
            table,
            locks: ShardLocks::new(),
            queues: Mutex::new(FreeQueueState::new()),
            counters: Counters::new(),
            source,
        }
    }

    /// Number of real (non-marker) reservation slots.
    pub fn capacity(&self) -> usize {
        self.table.real_len()
    }

    /// Lifetime counters (§expansion: observability).
    pub fn stats(&self) -> ReservationStats {
        self.counters.snapshot()
    }

    /// On-demand count of reservations that are fully populated (§6's
    /// `fullpop_count` debugging aid).
    pub fn fullpop_count(&self) -> usize {
        (0..self.table.real_len() as u32)
            .filter(|&i| {
                let rv = self.locks.lock(&self.table, i);
                rv.is_valid() && !rv.is_marker() && rv.popcnt() as usize == super::NPAGES
            })
            .count()
    }

    /// Formats the active and inactive queues for inspection, in place of
    /// the original's `DB_SHOW_COMMAND`.
    pub fn dump_queues(&self) -> String {
        let queues = self.queues.lock();
        let active = Self::collect(&self.locks, &self.table, queues.active.head());
        let inactive = Self::collect(&self.locks, &self.table, queues.inactive.head());
        let mut out = super::stats::dump_queue("active", &active);
        out.push('\n');
        out.push_str(&super::stats::dump_queue("inactive", &inactive));
        out
    }

    fn collect(locks: &ShardLocks, table: &ReservationTable, head: Option<u32>) -> Vec<u32> {
        let mut out = Vec::new();
        let mut cur = head;
        while let Some(index) = cur {
            if !locks.lock(table, index).is_marker() {
                out.push(index);
            }
            cur = locks.lock(table, index).lru_next;
        }
        out
    }
}
