//! Aging scanner (§4.8): a bounded walk of the active queue that decays
//! `actcnt` and demotes reservations that have gone cold, resuming each
//! call from wherever the marker was left by the previous one.
//!
//! This plays the same role as the page daemon's active-queue scan, but at
//! reservation granularity: a reservation's `actcnt` only ever grows from
//! populate-side activity (§4.5); this is the sole place it decays.

use super::collab::PageSource;
use super::manager::{FreeQueueState, ReservationManager};
use super::record::ReservationFlags;

impl<P: PageSource> ReservationManager<P> {
    /// Walks the active queue starting just past the marker's last
    /// position, decaying each entry's `actcnt` by one and demoting it to
    /// inactive if that empties it out, until `target` reservations have
    /// actually been demoted or the queue runs out (§4.8). Returns the
    /// number demoted.
    ///
    /// `target` bounds demotions, not visits: a long run of warm
    /// reservations that merely cool by one each do not count against it.
    pub fn scan(&self, target: usize) -> usize {
        let mut queues = self.queues.lock();
        let marker = self.table.marker_index();

        let resume_after = self.locks.lock(&self.table, marker).lru_next;
        queues.active.remove(&self.locks, &self.table, marker);

        let mut cursor = resume_after.or_else(|| queues.active.head());
        let mut demoted = 0usize;
        let mut last_index = None;
        let mut visited_since_demotion = 0usize;
        let total_active = count(&self.locks, &self.table, queues.active.head());

        while demoted < target {
            let Some(index) = cursor else { break };
            let (next, went_cold) = self.scan_one(&mut queues, index);
            cursor = next;
            last_index = Some(index);
            if went_cold {
                demoted += 1;
                visited_since_demotion = 0;
            } else {
                visited_since_demotion += 1;
            }
            if cursor.is_none() {
                cursor = queues.active.head();
            }
            if visited_since_demotion > total_active {
                // Made a full lap without demoting anyone else; nothing
                // more to find this call.
                break;
            }
        }

        match last_index {
            Some(after) if queues.active.head().is_some() => {
                queues.active.insert_after(&self.locks, &self.table, after, marker);
            }
            _ => queues.active.insert_tail(&self.locks, &self.table, marker),
        }
        demoted
    }

    /// Decays one reservation's `actcnt`, demoting it to the inactive queue
    /// if it has gone fully cold. Returns its next active-queue neighbour
    /// (as it was before any such move) and whether it was demoted.
    fn scan_one(&self, queues: &mut FreeQueueState, index: u32) -> (Option<u32>, bool) {
        let (next, went_cold) = {
            let mut rv = self.locks.lock(&self.table, index);
            rv.actcnt = rv.actcnt.saturating_sub(1);
            (rv.lru_next, rv.actcnt == 0 && rv.flags.contains(ReservationFlags::ACTIVE))
        };
        if went_cold {
            queues.active.remove(&self.locks, &self.table, index);
            {
                let mut rv = self.locks.lock(&self.table, index);
                rv.flags.remove(ReservationFlags::ACTIVE);
                rv.flags.insert(ReservationFlags::INACTIVE);
            }
            queues.inactive.insert_tail(&self.locks, &self.table, index);
        }
        (next, went_cold)
    }
}

/// Counts the real (non-marker) members reachable from `head`.
fn count(locks: &super::lock::ShardLocks, table: &super::table::ReservationTable, head: Option<u32>) -> usize {
    let mut n = 0usize;
    let mut cur = head;
    while let Some(index) = cur {
        n += 1;
        cur = locks.lock(table, index).lru_next;
    }
    n
}

#[cfg(test)]
mod tests {
    use super::super::boot;
    use super::super::collab::test_support::{BumpPageSource, TestObject};
    use super::*;
    use crate::physical::PhysAddr;
    use crate::reservation::NPAGES;

    fn manager_with(superpages: usize) -> ReservationManager<BumpPageSource> {
        let source = BumpPageSource::new(PhysAddr::new(0), superpages * NPAGES);
        boot::init(source, superpages * NPAGES * crate::physical::PAGE_SIZE).unwrap()
    }

    #[test]
    fn scan_keeps_decaying_until_it_reaches_its_demotion_target() {
        let manager = manager_with(1);
        let object = TestObject::new(20, 4096, false);
        let phys = manager.alloc_page(&object, 0).unwrap();
        object.insert_page(0, phys);
        // A fresh partial reservation joins active with actcnt == ACT_INIT,
        // so demoting it costs two decays even though target asks for one
        // demotion.
        assert_eq!(manager.scan(1), 1);
    }

    #[test]
    fn scan_demotes_a_cold_reservation_to_inactive() {
        let manager = manager_with(1);
        let object = TestObject::new(21, 4096, false);
        let phys = manager.alloc_page(&object, 0).unwrap();
        object.insert_page(0, phys);
        assert_eq!(manager.scan(10), 1);
        assert_eq!(manager.reclaim_inactive(1), 1);
        assert!(manager.is_page_free(phys));
    }

    #[test]
    fn scan_is_idempotent_on_an_empty_active_queue() {
        let manager = manager_with(1);
        assert_eq!(manager.scan(10), 0);
        assert_eq!(manager.scan(10), 0);
    }
}
