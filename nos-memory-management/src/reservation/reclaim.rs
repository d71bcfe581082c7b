//! Break and reclaim (§4.7): dissolving a reservation that still owns
//! populated pages, either one at a time under memory pressure or
//! unconditionally during shutdown/teardown.

use super::collab::{ObjectId, PageSource};
use super::manager::ReservationManager;
use super::popmap;
use super::record::ReservationFlags;
use super::NPAGES;

impl<P: PageSource> ReservationManager<P> {
    /// Forcibly dissolves every reservation still tied to an object,
    /// returning each one's physical run to the page source. Used for
    /// whole-subsystem teardown, where individual `free_page` calls would
    /// be needlessly precise (§4.7, `vm_reserv_break_all`).
    pub fn break_all(&self) -> usize {
        let mut broken = 0usize;
        for index in 0..self.table.real_len() as u32 {
            let has_object = self.locks.lock(&self.table, index).object_locked().is_some();
            if has_object {
                self.break_locked(index, None);
                broken += 1;
            }
        }
        broken
    }

    /// Breaks up to `target` reservations from the inactive queue, the
    /// lowest-priority source of reclaimable memory (§4.7,
    /// `vm_reserv_reclaim_inactive`).
    pub fn reclaim_inactive(&self, target: usize) -> usize {
        let mut done = 0usize;
        while done < target {
            let Some(index) = self.queues.lock().inactive.head() else {
                #[cfg(feature = "log")]
                log::warn!("reclaim_inactive: inactive queue exhausted at {done}/{target}");
                break;
            };
            self.break_locked(index, None);
            self.counters.record_reclaimed();
            done += 1;
        }
        done
    }

    /// Breaks up to `target` reservations, draining the inactive queue
    /// first and falling back to the active queue only if that isn't
    /// enough (§4.7, `vm_reserv_reclaim`).
    pub fn reclaim(&self, target: usize) -> usize {
        let mut done = self.reclaim_inactive(target);
        while done < target {
            let Some(index) = self.queues.lock().active.head() else {
                #[cfg(feature = "log")]
                log::warn!("reclaim: active queue exhausted at {done}/{target}");
                break;
            };
            self.break_locked(index, None);
            self.counters.record_reclaimed();
            done += 1;
        }
        done
    }

    /// Reclaims a contiguous physical run directly from the reservation
    /// pool.
    ///
    /// The original guards this entry point with an unconditional assertion
    /// failure (`MPASS(0)`), implying no caller in that tree ever reaches
    /// it; this rendering keeps the same guard behind an opt-in feature
    /// rather than pretending to a behavior nothing exercises.
    #[cfg(feature = "reclaim_contig")]
    pub fn reclaim_contig(
        &self,
        _npages: usize,
        _low: crate::physical::PhysAddr,
        _high: crate::physical::PhysAddr,
        _align: usize,
        _boundary: usize,
    ) -> Option<crate::physical::PhysAddr> {
        unreachable!("reclaim_contig has no caller in this configuration")
    }

    /// Unconditionally dissolves the reservation at `index`: unlinks it from
    /// its object and queue, then returns only its never-populated pages to
    /// the page source. `keep`, if given, is a bit within the reservation
    /// that must not be handed back — §4.7's `break(R, keep)`, which marks
    /// that bit populated before the zero-run walk so the caller keeps the
    /// page in hand rather than racing the allocator to reuse it.
    ///
    /// A partially-populated reservation being broken still has live pages
    /// backing its object; only the maximal runs of *clear* population bits
    /// are free to hand back (§4.7's `vm_reserv_break`, which walks `popmap`
    /// for zero runs and frees each one with `vm_phys_free_contig` rather
    /// than freeing the reservation as a single block).
    ///
    /// Tries the shard lock without blocking first: the common case is
    /// uncontended, and whichever queue the caller walked to find `index`
    /// may itself still be held (`original_source/sys/vm/vm_reserv.c`'s
    /// `vm_reserv_break_all` does the same try-then-block dance around
    /// `vm_reserv_trylock`).
    fn break_locked(&self, index: u32, keep: Option<usize>) {
        let mut rv = self
            .locks
            .try_lock(&self.table, index)
            .unwrap_or_else(|| self.locks.lock(&self.table, index));
        let Some(object) = rv.object_locked() else {
            return;
        };
        let Some(base) = rv.pages() else {
            return;
        };

        let on_active = rv.flags.contains(ReservationFlags::ACTIVE);
        let on_inactive = rv.flags.contains(ReservationFlags::INACTIVE);
        rv.flags.remove(ReservationFlags::ACTIVE | ReservationFlags::INACTIVE);
        rv.seq_write_begin();
        rv.set_object_locked(None, 0);
        rv.seq_write_end();

        if let Some(keep) = keep {
            popmap::set(&mut rv.popmap, keep);
            rv.popcnt += 1;
        }

        let mut bit = 0usize;
        while bit < NPAGES {
            let Some(run_start) = popmap::next_clear_bit(&rv.popmap, bit, NPAGES) else {
                break;
            };
            let run_end = popmap::next_set_bit(&rv.popmap, run_start, NPAGES).unwrap_or(NPAGES);
            let addr = crate::physical::PhysAddr::new(
                base.as_usize() + run_start * crate::physical::PAGE_SIZE,
            );
            self.source.free_contig(addr, run_end - run_start);
            bit = run_end;
        }
        rv.popmap = popmap::empty();
        rv.popcnt = 0;
        rv.actcnt = 0;
        drop(rv);

        {
            let mut queues = self.queues.lock();
            if on_active {
                queues.active.remove(&self.locks, &self.table, index);
            } else if on_inactive {
                queues.inactive.remove(&self.locks, &self.table, index);
            }
            queues
                .objects
                .remove(&self.locks, &self.table, object, index);
        }
        self.counters.record_broken();
        #[cfg(feature = "log")]
        log::debug!("reservation {index}: broken, unpopulated pages returned");
    }
}

/// Index of `object`'s reservation, if callers need to break a specific one
/// directly rather than reclaiming by queue pressure (used by
/// `Drop`/object-teardown paths that already know which reservation an
/// object owned).
pub fn object_reservation<P: PageSource>(
    manager: &ReservationManager<P>,
    object: ObjectId,
) -> Option<u32> {
    let queues = manager.queues.lock();
    queues.objects.head_of(object)
}

#[cfg(test)]
mod tests {
    use super::super::boot;
    use super::super::collab::test_support::{BumpPageSource, TestObject};
    use super::*;
    use crate::physical::PhysAddr;

    fn manager_with(superpages: usize) -> ReservationManager<BumpPageSource> {
        let source = BumpPageSource::new(PhysAddr::new(0), superpages * NPAGES);
        boot::init(source, superpages * NPAGES * crate::physical::PAGE_SIZE).unwrap()
    }

    #[test]
    fn reclaim_inactive_frees_partial_reservations() {
        let manager = manager_with(2);
        let object = TestObject::new(10, 4096, false);
        let phys = manager.alloc_page(&object, 0).unwrap();
        object.insert_page(0, phys);
        // A freshly populated reservation joins active, warm; reclaim_inactive
        // has nothing to do until a scan demotes it.
        assert_eq!(manager.reclaim_inactive(1), 0);
        manager.scan(1);
        manager.scan(1);
        assert_eq!(manager.reclaim_inactive(1), 1);
        assert!(manager.is_page_free(phys));
        assert_eq!(manager.stats().broken, 1);
    }

    #[test]
    fn reclaim_falls_back_to_active_queue() {
        let manager = manager_with(2);
        let object = TestObject::new(13, 4096, false);
        let phys = manager.alloc_page(&object, 0).unwrap();
        object.insert_page(0, phys);
        assert_eq!(manager.reclaim(1), 1);
        assert!(manager.is_page_free(phys));
    }

    #[test]
    fn breaking_a_partial_reservation_only_frees_unpopulated_pages() {
        let manager = manager_with(1);
        let object = TestObject::new(14, 4096, false);
        let phys = manager.alloc_page(&object, 0).unwrap();
        object.insert_page(0, phys);
        let second = PhysAddr::new(phys.as_usize() + crate::physical::PAGE_SIZE);
        assert!(manager.is_page_free(second));
        assert_eq!(manager.break_all(), 1);
        assert_eq!(manager.stats().broken, 1);
    }

    #[test]
    fn break_all_clears_every_owned_reservation() {
        let manager = manager_with(2);
        let a = TestObject::new(11, 4096, false);
        let b = TestObject::new(12, 4096, false);
        manager.alloc_page(&a, 0);
        manager.alloc_page(&b, 0);
        assert_eq!(manager.break_all(), 2);
        assert_eq!(manager.break_all(), 0);
    }

    #[test]
    fn break_with_keep_retains_one_page_and_leaks_no_other() {
        let manager = manager_with(1);
        let object = TestObject::new(15, 4096, false);
        let phys = manager.alloc_page(&object, 0).unwrap();
        object.insert_page(0, phys);

        manager.break_locked(0, Some(0));

        assert_eq!(manager.stats().broken, 1);
        // The kept page is still not free-list memory: it never went
        // through `free_contig`, so the source's free bitmap still marks
        // it in use even though the reservation itself is gone.
        assert!(!manager.is_page_free(phys));
        let rest = PhysAddr::new(phys.as_usize() + crate::physical::PAGE_SIZE);
        assert!(manager.is_page_free(rest));
        assert_eq!(manager.level(phys), -1);
    }
}
