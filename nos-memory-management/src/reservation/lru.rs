//! Active/inactive LRU queues (§4.5, the four-branch update in
//! `vm_reserv_update_lru`'s Rust rendering lives in [`super::populate`]).
//!
//! Each queue is a plain doubly-linked list threaded through `lru_prev`/
//! `lru_next`, with `insert_tail`/`remove`/`iter` as its whole interface;
//! the scan marker is a normal member of the active queue and is never
//! treated specially here (skipping it is the scanner's job, §4.8).

use super::lock::ShardLocks;
use super::table::ReservationTable;

/// A doubly-linked list of reservation-table indices, ordered
/// least-recently-used (`head`) to most-recently-used (`tail`).
#[derive(Default)]
pub struct LruList {
    head: Option<u32>,
    tail: Option<u32>,
}

impl LruList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.head.is_none()
    }

    pub fn head(&self) -> Option<u32> {
        self.head
    }

    pub fn tail(&self) -> Option<u32> {
        self.tail
    }

    /// Appends `index` as the most-recently-used entry.
    pub fn insert_tail(&mut self, locks: &ShardLocks, table: &ReservationTable, index: u32) {
        let old_tail = self.tail;
        {
            let mut rv = locks.lock(table, index);
            rv.lru_prev = old_tail;
            rv.lru_next = None;
        }
        match old_tail {
            Some(tail) => locks.lock(table, tail).lru_next = Some(index),
            None => self.head = Some(index),
        }
        self.tail = Some(index);
    }

    /// Removes `index` from wherever it sits in the list.
    pub fn remove(&mut self, locks: &ShardLocks, table: &ReservationTable, index: u32) {
        let (prev, next) = {
            let rv = locks.lock(table, index);
            (rv.lru_prev, rv.lru_next)
        };
        match prev {
            Some(prev) => locks.lock(table, prev).lru_next = next,
            None => self.head = next,
        }
        match next {
            Some(next) => locks.lock(table, next).lru_prev = prev,
            None => self.tail = prev,
        }
        let mut rv = locks.lock(table, index);
        rv.lru_prev = None;
        rv.lru_next = None;
    }

    /// Inserts `index` immediately after `after`, which must already be a
    /// member of this list. Used by the aging scanner to re-thread its
    /// marker at the point it stopped (§4.8).
    pub fn insert_after(&mut self, locks: &ShardLocks, table: &ReservationTable, after: u32, index: u32) {
        let next = locks.lock(table, after).lru_next;
        {
            let mut rv = locks.lock(table, index);
            rv.lru_prev = Some(after);
            rv.lru_next = next;
        }
        locks.lock(table, after).lru_next = Some(index);
        match next {
            Some(next) => locks.lock(table, next).lru_prev = Some(index),
            None => self.tail = Some(index),
        }
    }

    /// Moves `index` to the tail (most-recently-used) position.
    pub fn touch(&mut self, locks: &ShardLocks, table: &ReservationTable, index: u32) {
        if self.tail == Some(index) {
            return;
        }
        self.remove(locks, table, index);
        self.insert_tail(locks, table, index);
    }

    /// Returns the index that follows `after` in the list, or the head if
    /// `after` is `None`. Used by the aging scanner to resume after its
    /// marker (§4.8).
    pub fn next_after(&self, locks: &ShardLocks, table: &ReservationTable, after: Option<u32>) -> Option<u32> {
        match after {
            Some(index) => locks.lock(table, index).lru_next,
            None => self.head,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::physical::PhysAddr;

    fn table_with(n: usize) -> ReservationTable {
        let mut t = ReservationTable::new(n * super::super::SUPERPAGE_BYTES);
        for i in 0..n as u32 {
            t.mark_valid(i, PhysAddr::new(i as usize * super::super::SUPERPAGE_BYTES));
        }
        t
    }

    #[test]
    fn insert_tail_and_remove_preserve_order() {
        let table = table_with(3);
        let locks = ShardLocks::new();
        let mut lru = LruList::new();
        lru.insert_tail(&locks, &table, 0);
        lru.insert_tail(&locks, &table, 1);
        lru.insert_tail(&locks, &table, 2);
        assert_eq!(lru.head(), Some(0));
        assert_eq!(lru.tail(), Some(2));

        lru.remove(&locks, &table, 1);
        assert_eq!(locks.lock(&table, 0).lru_next, Some(2));
        assert_eq!(locks.lock(&table, 2).lru_prev, Some(0));

        lru.touch(&locks, &table, 0);
        assert_eq!(lru.tail(), Some(0));
        assert_eq!(lru.head(), Some(2));
    }
}
