//! Bootstrap (§4.9): sizes the reservation table to the physical address
//! range, marks every real slot valid, and threads the scan marker into the
//! active queue before anything else can touch the manager.

use super::collab::PageSource;
use super::manager::ReservationManager;
use super::table::ReservationTable;
use super::SUPERPAGE_BYTES;
use crate::physical::PhysAddr;
use nos_api::{Error, Result};

/// Builds a [`ReservationManager`] covering `[0, high_water)` of physical
/// address space, backed by `source` for actual page allocation.
///
/// Every level-0-aligned slot in the range is marked valid up front, the
/// same way `vm_reserv_init` walks `vm_phys_segs` once at boot rather than
/// discovering reservations on demand.
pub fn init<P: PageSource>(source: P, high_water: usize) -> Result<ReservationManager<P>> {
    if high_water == 0 {
        return Err(Error::InvalidArgument("high_water must be non-zero".into()));
    }

    let mut table = ReservationTable::new(high_water);
    for index in 0..table.real_len() as u32 {
        table.mark_valid(index, PhysAddr::new(index as usize * SUPERPAGE_BYTES));
    }

    let manager = ReservationManager::from_parts(table, source);
    let marker = manager.table.marker_index();
    manager
        .queues
        .lock()
        .active
        .insert_tail(&manager.locks, &manager.table, marker);
    Ok(manager)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reservation::collab::test_support::BumpPageSource;
    use crate::reservation::NPAGES;

    #[test]
    fn init_sizes_table_and_seeds_marker() {
        let source = BumpPageSource::new(PhysAddr::new(0), NPAGES * 4);
        let manager = init(source, NPAGES * 4 * crate::physical::PAGE_SIZE).unwrap();
        assert_eq!(manager.capacity(), 4);
    }

    #[test]
    fn init_rejects_empty_range() {
        let source = BumpPageSource::new(PhysAddr::new(0), NPAGES);
        assert!(init(source, 0).is_err());
    }
}
