//! The reservation record itself (data model, §3) and its state flags.

use super::collab::ObjectId;
use super::popmap::{self, PopMap};
use crate::physical::PhysAddr;
use bitflags::bitflags;
use core::sync::atomic::{AtomicU32, AtomicU64, Ordering};

bitflags! {
    /// A reservation's queue membership and marker state.
    ///
    /// `ACTIVE` and `INACTIVE` are mutually exclusive whenever either is
    /// set; `MARKER` is independent and identifies the scan placeholder
    /// rather than a real reservation.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct ReservationFlags: u8 {
        const ACTIVE = 0x01;
        const INACTIVE = 0x02;
        const MARKER = 0x04;
    }
}

impl ReservationFlags {
    const PARTPOP: Self = Self::ACTIVE.union(Self::INACTIVE);

    /// True if exactly one of `ACTIVE`/`INACTIVE` is set.
    pub fn is_partially_populated_queue_member(self) -> bool {
        let partpop = self.intersection(Self::PARTPOP);
        partpop == Self::ACTIVE || partpop == Self::INACTIVE
    }
}

/// One entry of the reservation table.
///
/// Fields are grouped by what protects them, matching §4.3:
///
/// - `pages` is set once at bootstrap and never changes again (invariant 6);
///   it needs no lock to read.
/// - `object_raw`/`pindex_raw`/`seq` form the seqlock-guarded pair described
///   in §4.3: writers bracket updates to `object`/`pindex` with
///   [`Reservation::seq_write_begin`]/[`Reservation::seq_write_end`] while
///   holding the shard lock; readers may snapshot them without any lock via
///   [`Reservation::seq_read`]/[`Reservation::seq_consistent`].
/// - `popmap`, `popcnt`, `actcnt`, and `flags` are protected by the
///   reservation's shard lock. Transitions of `flags`'s `ACTIVE`/`INACTIVE`
///   bits additionally require the free-queue lock to be held, since they
///   move the record between LRU queues.
/// - `obj_prev`/`obj_next` (the per-object reservation list) and
///   `lru_prev`/`lru_next` (the active/inactive LRU) are protected by the
///   free-queue lock.
pub struct Reservation {
    pub(super) pages: Option<PhysAddr>,
    object_raw: AtomicU64,
    pindex_raw: AtomicU64,
    seq: AtomicU32,
    pub(super) popmap: PopMap,
    pub(super) popcnt: u16,
    pub(super) actcnt: u8,
    pub(super) flags: ReservationFlags,
    pub(super) obj_prev: Option<u32>,
    pub(super) obj_next: Option<u32>,
    pub(super) lru_prev: Option<u32>,
    pub(super) lru_next: Option<u32>,
}

impl Reservation {
    /// An invalid ("no physical superpage backs this index") record.
    pub(super) const fn invalid() -> Self {
        Self {
            pages: None,
            object_raw: AtomicU64::new(0),
            pindex_raw: AtomicU64::new(0),
            seq: AtomicU32::new(0),
            popmap: popmap::empty(),
            popcnt: 0,
            actcnt: 0,
            flags: ReservationFlags::empty(),
            obj_prev: None,
            obj_next: None,
            lru_prev: None,
            lru_next: None,
        }
    }

    /// A free, valid record backed by the given first page of a superpage.
    pub(super) const fn free(pages: PhysAddr) -> Self {
        Self {
            pages: Some(pages),
            ..Self::invalid()
        }
    }

    /// The marker record threaded into the active queue (§4.4, §4.9).
    pub(super) const fn marker() -> Self {
        Self {
            flags: ReservationFlags::MARKER.union(ReservationFlags::ACTIVE),
            ..Self::invalid()
        }
    }

    /// True if a physical superpage backs this table entry.
    pub fn is_valid(&self) -> bool {
        self.pages.is_some()
    }

    pub fn is_marker(&self) -> bool {
        self.flags.contains(ReservationFlags::MARKER)
    }

    pub fn pages(&self) -> Option<PhysAddr> {
        self.pages
    }

    pub fn popcnt(&self) -> u16 {
        self.popcnt
    }

    pub fn flags(&self) -> ReservationFlags {
        self.flags
    }

    /// Begins a write to `object`/`pindex`; the counter becomes odd.
    pub(super) fn seq_write_begin(&self) {
        self.seq.fetch_add(1, Ordering::SeqCst);
    }

    /// Ends a write to `object`/`pindex`; the counter becomes even again.
    pub(super) fn seq_write_end(&self) {
        self.seq.fetch_add(1, Ordering::SeqCst);
    }

    /// Sets `object`/`pindex` under the shard lock. Callers must bracket
    /// this with [`Self::seq_write_begin`]/[`Self::seq_write_end`].
    pub(super) fn set_object_locked(&mut self, object: Option<ObjectId>, pindex: u64) {
        match object {
            Some(id) => {
                self.pindex_raw.store(pindex, Ordering::SeqCst);
                self.object_raw.store(id.raw(), Ordering::SeqCst);
            }
            None => self.object_raw.store(0, Ordering::SeqCst),
        }
    }

    /// Reads `object` while the shard lock is held.
    pub(super) fn object_locked(&self) -> Option<ObjectId> {
        ObjectId::from_raw(self.object_raw.load(Ordering::SeqCst))
    }

    /// Reads `pindex` while the shard lock is held.
    pub(super) fn pindex_locked(&self) -> u64 {
        self.pindex_raw.load(Ordering::SeqCst)
    }

    /// Takes a sequence snapshot for a later consistency check, without
    /// acquiring the shard lock.
    pub fn seq_read(&self) -> u32 {
        self.seq.load(Ordering::SeqCst)
    }

    /// True if `snapshot` was taken at a quiescent point (even) and the
    /// counter has not changed since.
    pub fn seq_consistent(&self, snapshot: u32) -> bool {
        snapshot % 2 == 0 && self.seq.load(Ordering::SeqCst) == snapshot
    }

    /// Lock-free read of `object`, for use only alongside a `seq` snapshot
    /// check (see [`Self::seq_consistent`]).
    pub fn object_unsynchronized(&self) -> Option<ObjectId> {
        ObjectId::from_raw(self.object_raw.load(Ordering::SeqCst))
    }

    /// Lock-free read of `pindex`, for use only alongside a `seq` snapshot
    /// check (see [`Self::seq_consistent`]).
    pub fn pindex_unsynchronized(&self) -> u64 {
        self.pindex_raw.load(Ordering::SeqCst)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partpop_flag_helper() {
        assert!(ReservationFlags::ACTIVE.is_partially_populated_queue_member());
        assert!(ReservationFlags::INACTIVE.is_partially_populated_queue_member());
        assert!(!ReservationFlags::empty().is_partially_populated_queue_member());
        assert!(!(ReservationFlags::ACTIVE | ReservationFlags::INACTIVE)
            .is_partially_populated_queue_member());
    }

    #[test]
    fn seq_starts_even_and_toggles() {
        let rv = Reservation::invalid();
        assert_eq!(rv.seq_read() % 2, 0);
        rv.seq_write_begin();
        assert_eq!(rv.seq_read() % 2, 1);
        rv.seq_write_end();
        assert_eq!(rv.seq_read() % 2, 0);
    }
}
