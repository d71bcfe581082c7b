//! End-to-end scenarios for the superpage reservation manager (S1-S6) and
//! property tests over the public allocator surface.

use nos_memory_management::reservation::test_support::{BumpPageSource, TestObject};
use nos_memory_management::reservation::{self, NPAGES};
use nos_memory_management::{PhysAddr, VmObject, PAGE_SIZE};

fn manager_with(superpages: usize) -> reservation::ReservationManager<BumpPageSource> {
    let source = BumpPageSource::new(PhysAddr::new(0), superpages * NPAGES);
    reservation::init(source, superpages * NPAGES * PAGE_SIZE).unwrap()
}

/// S1: a fresh allocation succeeds, ties up exactly one page, and the
/// reservation backing it is neither full nor free.
#[test]
fn s1_fresh_single_allocation() {
    let manager = manager_with(1);
    let object = TestObject::new(1, NPAGES as u64, false);

    let phys = manager.alloc_page(&object, 0).expect("fresh allocation succeeds");
    object.insert_page(0, phys);

    assert!(!manager.is_page_free(phys));
    assert_eq!(manager.level(phys), 0);
    assert_eq!(manager.level_iffullpop(phys), -1);
    assert_eq!(manager.fullpop_count(), 0);
    assert_eq!(manager.stats().broken, 0);
}

/// S2: filling every slot of a reservation promotes it to a superpage.
#[test]
fn s2_fill_then_promote() {
    let manager = manager_with(1);
    let object = TestObject::new(2, NPAGES as u64, false);

    let mut last = PhysAddr::new(0);
    for pindex in 0..NPAGES as u64 {
        last = manager.alloc_page(&object, pindex).expect("room for every slot");
        object.insert_page(pindex, last);
    }

    assert_eq!(manager.level_iffullpop(last), 0);
    assert_eq!(manager.fullpop_count(), 1);
}

/// S3: freeing one page out of a full reservation demotes it back to
/// partial and the freed page becomes available again.
#[test]
fn s3_free_back_demotes_from_full() {
    let manager = manager_with(1);
    let object = TestObject::new(3, NPAGES as u64, false);

    let mut pages = Vec::new();
    for pindex in 0..NPAGES as u64 {
        let phys = manager.alloc_page(&object, pindex).unwrap();
        object.insert_page(pindex, phys);
        pages.push(phys);
    }
    assert_eq!(manager.fullpop_count(), 1);

    let first = pages[0];
    assert!(manager.free_page(object.id(), first));
    object.remove_page(0);

    assert!(manager.is_page_free(first));
    assert_eq!(manager.fullpop_count(), 0);
    assert_eq!(manager.level_iffullpop(pages[1]), -1);
}

/// S4: a vnode-backed object refuses a reservation that would speculate
/// past its size.
#[test]
fn s4_vnode_tail_refuses_speculative_reservation() {
    let manager = manager_with(1);
    let object = TestObject::new(4, 100, true);

    assert!(manager.alloc_page(&object, 0).is_none());
}

/// S5: reclaiming an inactive, partially-populated reservation returns its
/// pages to the page source and bumps the reclaim counter.
#[test]
fn s5_reclaim_inactive_returns_pages() {
    let manager = manager_with(2);
    let object = TestObject::new(5, NPAGES as u64, false);

    let phys = manager.alloc_page(&object, 0).unwrap();
    object.insert_page(0, phys);

    // Freshly populated reservations start active and warm; nothing is
    // reclaimable until the scanner has cooled it off.
    assert_eq!(manager.reclaim_inactive(1), 0);
    manager.scan(1);
    manager.scan(1);

    assert_eq!(manager.reclaim_inactive(1), 1);
    assert!(manager.is_page_free(phys));
    assert_eq!(manager.stats().reclaimed, 1);
}

/// S6: aging migrates both active reservations to inactive in one scan
/// once their activation counts run out.
#[test]
fn s6_aging_migrates_cold_reservations_to_inactive() {
    let manager = manager_with(2);
    let a = TestObject::new(6, NPAGES as u64, false);
    let b = TestObject::new(7, NPAGES as u64, false);

    let pa = manager.alloc_page(&a, 0).unwrap();
    a.insert_page(0, pa);
    let pb = manager.alloc_page(&b, 0).unwrap();
    b.insert_page(0, pb);

    assert_eq!(manager.scan(2), 2);
    assert_eq!(manager.reclaim_inactive(2), 2);
    assert!(manager.is_page_free(pa));
    assert!(manager.is_page_free(pb));
}

/// `alloc_contig` over a whole reservation's worth of pages produces one
/// fully populated, promoted reservation (spec.md boundary behaviour).
#[test]
fn alloc_contig_whole_reservation_promotes() {
    let manager = manager_with(1);
    let object = TestObject::new(8, NPAGES as u64, false);

    let phys = manager
        .alloc_contig(
            &object,
            0,
            NPAGES,
            PhysAddr::new(0),
            PhysAddr::new(usize::MAX),
            PAGE_SIZE * NPAGES,
            0,
        )
        .expect("a whole-reservation contiguous request succeeds");

    assert_eq!(manager.level_iffullpop(phys), 0);
    assert_eq!(manager.fullpop_count(), 1);
}

/// `rename` moves every reservation an object owns to a new object/offset
/// without disturbing their population.
#[test]
fn rename_transfers_ownership_and_shifts_pindex() {
    let manager = manager_with(1);
    let old_object = TestObject::new(9, NPAGES as u64, false);
    let new_object = TestObject::new(10, NPAGES as u64, false);

    let phys = manager.alloc_page(&old_object, 0).unwrap();
    old_object.insert_page(0, phys);

    assert_eq!(manager.rename(old_object.id(), &new_object, 5), 1);
    assert!(!manager.is_page_free(phys));

    // The reservation is now reachable from the new object at pindex 5.
    new_object.insert_page(5, phys);
    let second = manager.alloc_page(&new_object, 6).unwrap();
    assert_eq!(
        (second.as_usize() - phys.as_usize()) / PAGE_SIZE,
        1
    );
}

#[cfg(test)]
mod properties {
    use super::*;
    use proptest::collection::vec as prop_vec;
    use proptest::prelude::*;
    use std::collections::BTreeMap;

    #[derive(Clone, Copy, Debug)]
    enum Op {
        Alloc(u64),
        Free(u64),
    }

    fn op_strategy() -> impl Strategy<Value = Op> {
        prop_oneof![
            (0..NPAGES as u64).prop_map(Op::Alloc),
            (0..NPAGES as u64).prop_map(Op::Free),
        ]
    }

    proptest! {
        /// Whatever order a sequence of single-page alloc/free calls comes
        /// in, `is_page_free` and `fullpop_count` always agree with a plain
        /// black-box model of which pindices are currently populated
        /// (spec.md §8's round-trip / idempotence properties, exercised
        /// only through the public allocator surface).
        #[test]
        fn populate_model_matches_observed_state(ops in prop_vec(op_strategy(), 1..200)) {
            let manager = manager_with(1);
            let object = TestObject::new(1, NPAGES as u64, false);
            let mut model: BTreeMap<u64, PhysAddr> = BTreeMap::new();

            for op in ops {
                match op {
                    Op::Alloc(pindex) => {
                        if !model.contains_key(&pindex) {
                            if let Some(phys) = manager.alloc_page(&object, pindex) {
                                object.insert_page(pindex, phys);
                                model.insert(pindex, phys);
                            }
                        }
                    }
                    Op::Free(pindex) => {
                        if let Some(phys) = model.remove(&pindex) {
                            prop_assert!(manager.free_page(object.id(), phys));
                            object.remove_page(pindex);
                        }
                    }
                }

                for (_, phys) in model.iter() {
                    prop_assert!(!manager.is_page_free(*phys));
                }
                let expect_full = model.len() == NPAGES;
                prop_assert_eq!(manager.fullpop_count(), if expect_full { 1 } else { 0 });
            }
        }
    }
}
