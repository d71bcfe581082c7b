//! Superpage reservation manager.
//!
//! Speculatively ties fixed-size, superpage-aligned runs of small physical
//! pages ("reservations") to an object's page-fault demand. A reservation
//! that fills completely is promoted to a single hardware superpage; one
//! that stays partially populated is tracked on an LRU so its free slots can
//! be handed back quickly, or broken outright under memory pressure.
//!
//! The design is deliberately single-level ("level 0" in [`ReservationManager::size`]): no NUMA
//! placement, no migration of already-active pages, no coalescing across
//! objects. Everything the manager needs from the rest of the kernel — the
//! small-page allocator and the per-object page index — is expressed as the
//! [`collab::PageSource`] and [`collab::VmObject`] traits so the module can
//! be exercised without a real VM subsystem.

mod alloc;
mod boot;
mod collab;
mod lock;
mod lru;
mod manager;
mod object;
mod popmap;
mod populate;
mod reclaim;
mod record;
mod scan;
mod stats;
mod table;

pub use boot::init;
pub use collab::{ObjectId, PageHandle, PageSource, VmObject};
pub use manager::ReservationManager;
pub use reclaim::object_reservation;
pub use record::ReservationFlags;
pub use stats::ReservationStats;

#[cfg(any(test, feature = "reservation-test-support"))]
pub use collab::test_support;

use crate::physical::{PAGE_SHIFT, PAGE_SIZE};

/// Number of small pages covered by one level-0 reservation.
pub const NPAGES: usize = 512;

/// Number of `u64` words needed to hold one [`NPAGES`]-bit population map.
pub const POPMAP_WORDS: usize = NPAGES.div_ceil(u64::BITS as usize);

/// Maximum value of a reservation's activation count.
pub const ACT_MAX: u8 = 64;

/// Activation count a reservation starts with the moment it becomes a
/// partially-populated-queue member (freshly created, or dropping back out
/// of fully populated): warm enough to survive one aging pass, cold enough
/// that sustained neglect still demotes it.
pub const ACT_INIT: u8 = 2;

/// Number of shard locks in the reservation lock pool.
pub const SHARD_COUNT: usize = 256;

/// Number of bits a physical address is shifted by to obtain the index of
/// the reservation that would contain it.
pub const SUPERPAGE_SHIFT: usize = PAGE_SHIFT + NPAGES.trailing_zeros() as usize;

/// Size in bytes of a level-0 reservation.
pub const SUPERPAGE_BYTES: usize = NPAGES * PAGE_SIZE;

static_assertions::const_assert!(NPAGES.is_power_of_two());
static_assertions::const_assert!(NPAGES % (u64::BITS as usize) == 0);
static_assertions::const_assert!(ACT_MAX > 0);
