//! Populate/depopulate and the LRU queue transitions that follow from them
//! (§4.5).
//!
//! Both operations share one LRU update procedure, run after the bit flip:
//! a reservation that just became completely full leaves its queue (and its
//! base page is promoted to a superpage); one that just emptied out is
//! unlinked from its object and its physical run handed back to the page
//! source; one that is newly partial-but-not-active joins (or rejoins) the
//! active queue warm; one that was already active just gets warmer.
//!
//! `LruList`/`ObjectIndex` re-lock whichever index they're asked to touch,
//! so a branch that moves `rv`'s own index between queues must drop `rv`
//! first (`spin::Mutex` is not reentrant) and, if the caller still needs it,
//! re-acquire it afterward — the same drop-then-relock discipline
//! `scan.rs`'s `scan_one` already uses. The free-queue lock itself is taken
//! only for that list-mutation window, not across the whole bit-flip and
//! branch decision, so reservations in unrelated shards are never held up
//! behind one populate/depopulate call (§4.3).

use super::collab::PageSource;
use super::lock::ReservationGuard;
use super::manager::{FreeQueueState, ReservationManager};
use super::popmap;
use super::record::ReservationFlags;
use super::{ACT_INIT, ACT_MAX, NPAGES};
use spin::MutexGuard;

/// Which operation invoked [`update_lru`]; needed only to tell a
/// brand-new reservation's first populate (no hint change) apart from a
/// demotion out of full population (hint must be cleared) — both land on
/// the same "newly partial, not yet ACTIVE" branch.
#[derive(Clone, Copy, PartialEq, Eq)]
enum Step {
    Populate,
    Depopulate,
}

/// Acquires the free-queue lock, preferring an uncontended try-lock (§4.3):
/// by the time this is called `rv`'s shard lock has already been dropped,
/// so blocking here never holds up another shard, but trying first still
/// avoids a pointless context switch in the common, uncontended case.
fn lock_queues<P: PageSource>(manager: &ReservationManager<P>) -> MutexGuard<'_, FreeQueueState> {
    manager.queues.try_lock().unwrap_or_else(|| manager.queues.lock())
}

/// Marks page `bit` of `rv` in use and runs the LRU update procedure.
///
/// `bit` must currently be clear; callers (the allocator front-ends) only
/// ever populate a bit they just handed out. Returns the reservation's
/// guard, freshly re-acquired if the update had to drop it to touch a
/// queue.
pub(super) fn populate<'a, P: PageSource>(
    manager: &'a ReservationManager<P>,
    mut rv: ReservationGuard<'a>,
    bit: usize,
) -> ReservationGuard<'a> {
    debug_assert!(popmap::is_clear(&rv.popmap, bit));
    popmap::set(&mut rv.popmap, bit);
    rv.popcnt += 1;
    #[cfg(feature = "log")]
    log::trace!("reservation {}: populate bit {bit}", rv.index());
    update_lru(manager, rv, Step::Populate)
}

/// Clears page `bit` of `rv` and runs the LRU update procedure.
///
/// `bit` must currently be set. If this empties the reservation, it is
/// unlinked from its object and its physical run is returned to the page
/// source as part of the same procedure. Returns the reservation's guard,
/// freshly re-acquired if the update had to drop it to touch a queue.
pub(super) fn depopulate<'a, P: PageSource>(
    manager: &'a ReservationManager<P>,
    mut rv: ReservationGuard<'a>,
    bit: usize,
) -> ReservationGuard<'a> {
    debug_assert!(popmap::is_set(&rv.popmap, bit));
    popmap::clear(&mut rv.popmap, bit);
    rv.popcnt -= 1;
    #[cfg(feature = "log")]
    log::trace!("reservation {}: depopulate bit {bit}", rv.index());
    update_lru(manager, rv, Step::Depopulate)
}

/// The four-branch decision from §4.5, keyed only on the post-update
/// `popcnt` and current queue membership; populate and depopulate run
/// exactly the same procedure.
///
/// Branches 1-3 move `rv`'s index between queues, which means dropping
/// `rv` before calling into `LruList`/`ObjectIndex` for that same index
/// (they re-lock it internally) and re-acquiring it afterward. Branch 4
/// never touches a queue at all and is the fast path: no drop, no
/// free-queue lock.
fn update_lru<'a, P: PageSource>(
    manager: &'a ReservationManager<P>,
    mut rv: ReservationGuard<'a>,
    step: Step,
) -> ReservationGuard<'a> {
    let index = rv.index();
    let popcnt = rv.popcnt() as usize;

    if popcnt == NPAGES {
        // Branch 1: fully populated. Leaves whichever queue it was on; its
        // base page becomes a superpage. Only `populate` can ever reach
        // this branch (`depopulate`'s precondition is `popcnt > 0` before
        // the decrement, so it can never land back on `N`).
        let on_active = rv.flags.contains(ReservationFlags::ACTIVE);
        let on_inactive = rv.flags.contains(ReservationFlags::INACTIVE);
        debug_assert!(on_active ^ on_inactive);
        rv.flags.remove(ReservationFlags::ACTIVE | ReservationFlags::INACTIVE);
        let base = rv.pages();
        drop(rv);

        {
            let mut queues = lock_queues(manager);
            if on_active {
                queues.active.remove(&manager.locks, &manager.table, index);
            } else {
                queues.inactive.remove(&manager.locks, &manager.table, index);
            }
        }
        if let Some(base) = base {
            manager.source.set_superpage_hint(base, true);
        }
        #[cfg(feature = "log")]
        log::debug!("reservation {index}: promoted to superpage");
        manager.locks.lock(&manager.table, index)
    } else if popcnt == 0 {
        // Branch 2: emptied out. Clears the object, unlinks from its list,
        // and returns the whole run to the page source.
        let Some(object) = rv.object_locked() else {
            return rv;
        };
        let on_active = rv.flags.contains(ReservationFlags::ACTIVE);
        let on_inactive = rv.flags.contains(ReservationFlags::INACTIVE);
        rv.flags.remove(ReservationFlags::ACTIVE | ReservationFlags::INACTIVE);
        rv.actcnt = 0;
        rv.seq_write_begin();
        rv.set_object_locked(None, 0);
        rv.seq_write_end();
        let base = rv.pages().expect("valid record always has pages");
        drop(rv);

        {
            let mut queues = lock_queues(manager);
            if on_active {
                queues.active.remove(&manager.locks, &manager.table, index);
            } else if on_inactive {
                queues.inactive.remove(&manager.locks, &manager.table, index);
            }
            queues.objects.remove(&manager.locks, &manager.table, object, index);
        }
        manager.source.free_pages(base);
        manager.counters.record_freed();
        #[cfg(feature = "log")]
        log::trace!("reservation {index}: emptied, pages returned");
        manager.locks.lock(&manager.table, index)
    } else if !rv.flags.contains(ReservationFlags::ACTIVE) {
        // Branch 3: newly partial, or still partial but coming back from
        // INACTIVE. Either way it rejoins active, warm.
        let was_inactive = rv.flags.contains(ReservationFlags::INACTIVE);
        // Neither ACTIVE nor INACTIVE set and this is a depopulate: the
        // only prior state consistent with the invariants is
        // `popcnt == NPAGES` (branch 1 clears both flags on promotion), so
        // this is the reverse transition demoting the base page back out
        // of superpage status.
        let demoted_from_full = !was_inactive && step == Step::Depopulate;
        let base = rv.pages();
        rv.flags.remove(ReservationFlags::INACTIVE);
        rv.flags.insert(ReservationFlags::ACTIVE);
        rv.actcnt = ACT_INIT;
        drop(rv);

        {
            let mut queues = lock_queues(manager);
            if was_inactive {
                queues.inactive.remove(&manager.locks, &manager.table, index);
            }
            queues.active.insert_tail(&manager.locks, &manager.table, index);
        }
        if demoted_from_full {
            if let Some(base) = base {
                manager.source.set_superpage_hint(base, false);
            }
            #[cfg(feature = "log")]
            log::debug!("reservation {index}: demoted from superpage");
        }
        manager.locks.lock(&manager.table, index)
    } else {
        // Branch 4: already active and still partial. No queue motion, no
        // free-queue lock needed at all.
        rv.actcnt = rv.actcnt.saturating_add(1).min(ACT_MAX);
        rv
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::physical::PhysAddr;
    use crate::reservation::boot;
    use crate::reservation::collab::test_support::BumpPageSource;

    fn manager_with(n: usize) -> ReservationManager<BumpPageSource> {
        let source = BumpPageSource::new(PhysAddr::new(0), n * NPAGES);
        boot::init(source, n * NPAGES * crate::physical::PAGE_SIZE).unwrap()
    }

    #[test]
    fn populate_joins_active_warm_and_leaves_on_fullpop() {
        let manager = manager_with(1);

        let mut rv = manager.locks.lock(&manager.table, 0);
        rv.seq_write_begin();
        rv.set_object_locked(Some(super::super::collab::ObjectId::new(1)), 0);
        rv.seq_write_end();
        let rv = populate(&manager, rv, 0);
        assert!(rv.flags().contains(ReservationFlags::ACTIVE));
        assert_eq!(rv.actcnt, ACT_INIT);
        drop(rv);
        assert_eq!(manager.queues.lock().active.head(), Some(0));

        let mut rv = manager.locks.lock(&manager.table, 0);
        for bit in 1..NPAGES {
            rv = populate(&manager, rv, bit);
        }
        drop(rv);
        let queues = manager.queues.lock();
        assert!(queues.inactive.is_empty());
        assert!(queues.active.is_empty());
    }

    #[test]
    fn promotion_and_demotion_toggle_the_superpage_hint() {
        let manager = manager_with(1);
        let base = {
            {
                let mut rv = manager.locks.lock(&manager.table, 0);
                rv.seq_write_begin();
                rv.set_object_locked(Some(super::super::collab::ObjectId::new(1)), 0);
                rv.seq_write_end();
            }
            let mut rv = manager.locks.lock(&manager.table, 0);
            for bit in 0..NPAGES {
                rv = populate(&manager, rv, bit);
            }
            rv.pages().unwrap()
        };
        assert!(manager.source.superpage_hint(base));

        let rv = manager.locks.lock(&manager.table, 0);
        let rv = depopulate(&manager, rv, 0);
        drop(rv);
        assert!(!manager.source.superpage_hint(base));
    }

    #[test]
    fn depopulating_a_full_reservation_rejoins_active_tail() {
        let manager = manager_with(1);
        {
            let mut rv = manager.locks.lock(&manager.table, 0);
            rv.seq_write_begin();
            rv.set_object_locked(Some(super::super::collab::ObjectId::new(1)), 0);
            rv.seq_write_end();
        }
        let mut rv = manager.locks.lock(&manager.table, 0);
        for bit in 0..NPAGES {
            rv = populate(&manager, rv, bit);
        }
        assert!(manager.queues.lock().active.is_empty());

        let rv = depopulate(&manager, rv, 0);
        assert!(rv.flags().contains(ReservationFlags::ACTIVE));
        drop(rv);
        assert_eq!(manager.queues.lock().active.head(), Some(0));
    }

    #[test]
    fn emptying_a_reservation_clears_its_object() {
        let manager = manager_with(1);
        let object = super::super::collab::ObjectId::new(7);
        {
            let mut rv = manager.locks.lock(&manager.table, 0);
            rv.seq_write_begin();
            rv.set_object_locked(Some(object), 0);
            rv.seq_write_end();
        }
        manager
            .queues
            .lock()
            .objects
            .insert(&manager.locks, &manager.table, object, 0);

        let rv = manager.locks.lock(&manager.table, 0);
        let rv = populate(&manager, rv, 0);
        let rv = depopulate(&manager, rv, 0);
        assert_eq!(rv.object_locked(), None);
        assert!(!rv.flags().contains(ReservationFlags::ACTIVE));
        drop(rv);
        assert_eq!(manager.queues.lock().objects.head_of(object), None);
    }
}
