//! Per-object reservation linkage (§4.4).
//!
//! Every object that owns at least one reservation has exactly one of them
//! recorded as its "head"; the rest are reached by walking `obj_next` from
//! there. The mapping from object to head lives in a side table here rather
//! than inside `VmObject`, since the trait is meant to model only what a
//! real VM object already carries (`object->memq` et al.), not bookkeeping
//! this module invents for itself.

extern crate alloc;

use super::collab::ObjectId;
use super::lock::ShardLocks;
use super::table::ReservationTable;
use alloc::collections::BTreeMap;

/// Maps each object that owns reservations to the index of its first one.
#[derive(Default)]
pub struct ObjectIndex {
    heads: BTreeMap<ObjectId, u32>,
}

impl ObjectIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn head_of(&self, object: ObjectId) -> Option<u32> {
        self.heads.get(&object).copied()
    }

    /// Links `index` into `object`'s reservation list (as the new head),
    /// requiring the caller already hold `index`'s shard lock.
    pub fn insert(
        &mut self,
        locks: &ShardLocks,
        table: &ReservationTable,
        object: ObjectId,
        index: u32,
    ) {
        let old_head = self.heads.insert(object, index);
        let mut rv = locks.lock(table, index);
        rv.obj_prev = None;
        rv.obj_next = old_head;
        drop(rv);
        if let Some(head) = old_head {
            locks.lock(table, head).obj_prev = Some(index);
        }
    }

    /// Unlinks `index` from `object`'s reservation list, requiring the
    /// caller already hold `index`'s shard lock.
    pub fn remove(
        &mut self,
        locks: &ShardLocks,
        table: &ReservationTable,
        object: ObjectId,
        index: u32,
    ) {
        let (prev, next) = {
            let rv = locks.lock(table, index);
            (rv.obj_prev, rv.obj_next)
        };
        match prev {
            Some(prev) => locks.lock(table, prev).obj_next = next,
            None => {
                match next {
                    Some(next) => {
                        self.heads.insert(object, next);
                    }
                    None => {
                        self.heads.remove(&object);
                    }
                }
            }
        }
        if let Some(next) = next {
            locks.lock(table, next).obj_prev = prev;
        }
        let mut rv = locks.lock(table, index);
        rv.obj_prev = None;
        rv.obj_next = None;
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
    fn insert_and_remove_round_trip() {
        let table = table_with(3);
        let locks = ShardLocks::new();
        let mut idx = ObjectIndex::new();
        let obj = ObjectId::new(7);

        idx.insert(&locks, &table, obj, 0);
        idx.insert(&locks, &table, obj, 1);
        idx.insert(&locks, &table, obj, 2);
        assert_eq!(idx.head_of(obj), Some(2));

        idx.remove(&locks, &table, obj, 1);
        assert_eq!(locks.lock(&table, 2).obj_next, Some(0));
        assert_eq!(locks.lock(&table, 0).obj_prev, Some(2));

        idx.remove(&locks, &table, obj, 2);
        assert_eq!(idx.head_of(obj), Some(0));

        idx.remove(&locks, &table, obj, 0);
        assert_eq!(idx.head_of(obj), None);
    }
}
