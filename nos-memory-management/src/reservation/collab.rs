//! Collaborator interfaces.
//!
//! The reservation manager is deliberately ignorant of how physical pages
//! are actually carved up and how an object stores its page list; both are
//! out of scope for this module (see the crate-level docs). These traits
//! pin down exactly what the manager needs from each collaborator, mirroring
//! how `nos_api::memory::interface` separates "what this crate needs" from
//! "what implements it".

extern crate alloc;

use crate::physical::PhysAddr;
use core::num::NonZeroU64;

/// Identifies the VM object that owns a reservation.
///
/// Backed by a `NonZeroU64` so that the "no object" state can be encoded as
/// a plain `0` in the atomic word used for lock-free `(object, pindex)`
/// reads, without an extra discriminant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ObjectId(NonZeroU64);

impl ObjectId {
    /// Creates an object id from a raw, non-zero identifier.
    ///
    /// # Panics
    /// Panics if `id` is zero; zero is reserved to mean "no object".
    pub fn new(id: u64) -> Self {
        Self(NonZeroU64::new(id).expect("object id must be non-zero"))
    }

    pub(crate) fn raw(self) -> u64 {
        self.0.get()
    }

    pub(crate) fn from_raw(raw: u64) -> Option<Self> {
        NonZeroU64::new(raw).map(Self)
    }
}

/// A page belonging to some object, as seen from outside this module.
///
/// Carries just enough information for the allocator front-ends to locate
/// the reservation a neighbouring page belongs to: its offset within the
/// object and its physical address.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageHandle {
    /// Offset of this page within its object, in pages.
    pub pindex: u64,
    /// Physical address of this page.
    pub phys: PhysAddr,
}

/// The view of a VM object the allocator front-ends need.
///
/// Stands in for the object's page count, its vnode-backing policy (used to
/// forbid speculative tail reservations on files), and its ordered page
/// list (`object.memq`), which supplies the neighbours used to find an
/// existing reservation without a table scan.
pub trait VmObject {
    /// Stable identifier for this object.
    fn id(&self) -> ObjectId;

    /// Size of the object, in pages.
    fn size(&self) -> u64;

    /// True if the object is a vnode (file) or is backed by one.
    ///
    /// Reservations are not allowed to speculate past the end of such an
    /// object, since a short file should not needlessly tie down a whole
    /// superpage's worth of pages.
    fn is_vnode_backed(&self) -> bool;

    /// The first page in the object's page list, if any.
    fn first_page(&self) -> Option<PageHandle>;

    /// The page with the greatest index less than `pindex`, if any
    /// (`vm_page_find_least`'s predecessor, `mpred`).
    fn page_before(&self, pindex: u64) -> Option<PageHandle>;

    /// The page immediately following `pindex` in the object's page list,
    /// if any (`msucc`).
    fn page_after(&self, pindex: u64) -> Option<PageHandle>;
}

/// The small-page allocator this module hands populated/depopulated runs
/// back to.
///
/// All methods operate in units of whole level-0 reservations or explicit
/// page counts; the manager never asks for an allocation smaller than one
/// page or requests an order the allocator doesn't understand.
pub trait PageSource {
    /// Allocates one naturally aligned, [`super::NPAGES`]-page run.
    fn alloc_pages(&self) -> Option<PhysAddr>;

    /// Allocates a contiguous run of `npages` pages in `[low, high)`,
    /// aligned to `align` and not crossing a `boundary`-aligned address.
    fn alloc_contig(
        &self,
        npages: usize,
        low: PhysAddr,
        high: PhysAddr,
        align: usize,
        boundary: usize,
    ) -> Option<PhysAddr>;

    /// Returns a [`super::NPAGES`]-page run to the allocator as one free
    /// block.
    fn free_pages(&self, addr: PhysAddr);

    /// Returns a `npages`-page contiguous run to the allocator.
    fn free_contig(&self, addr: PhysAddr, npages: usize);

    /// Sets or clears the hardware size-hint on the first page of a
    /// reservation, the moment it is promoted to or demoted from a
    /// superpage.
    fn set_superpage_hint(&self, first_page: PhysAddr, is_superpage: bool);
}

/// Minimal collaborator implementations for exercising the manager without
/// a real VM subsystem.
#[cfg(any(test, feature = "reservation-test-support"))]
pub mod test_support {
    use super::*;
    use alloc::collections::BTreeMap;
    use alloc::vec::Vec;
    use spin::Mutex;

    /// A [`PageSource`] backed by a bump pointer plus a free bitmap, in the
    /// same spirit as the bitmap-backed bookkeeping in
    /// `allocator::buddy::OptimizedBuddyAllocator` and `allocator::slab`'s
    /// per-slab `occupancy` word.
    pub struct BumpPageSource {
        inner: Mutex<BumpInner>,
    }

    struct BumpInner {
        base: usize,
        /// One bit per [`crate::physical::PAGE_SIZE`] page; `true` = free.
        free: Vec<bool>,
        hints: BTreeMap<usize, bool>,
    }

    impl BumpPageSource {
        /// Creates a source covering `npages` pages starting at `base`
        /// (which must be aligned to [`super::super::SUPERPAGE_BYTES`]).
        pub fn new(base: PhysAddr, npages: usize) -> Self {
            assert_eq!(base.as_usize() % super::super::SUPERPAGE_BYTES, 0);
            Self {
                inner: Mutex::new(BumpInner {
                    base: base.as_usize(),
                    free: alloc::vec![true; npages],
                    hints: BTreeMap::new(),
                }),
            }
        }

        fn index_of(inner: &BumpInner, addr: PhysAddr) -> usize {
            (addr.as_usize() - inner.base) / crate::physical::PAGE_SIZE
        }

        /// Returns the current superpage-hint for the reservation starting
        /// at `addr`, for assertions in tests.
        pub fn superpage_hint(&self, addr: PhysAddr) -> bool {
            let inner = self.inner.lock();
            *inner.hints.get(&addr.as_usize()).unwrap_or(&false)
        }

        fn find_run(inner: &mut BumpInner, npages: usize, align: usize) -> Option<usize> {
            let mut start = 0;
            while start + npages <= inner.free.len() {
                let addr = inner.base + start * crate::physical::PAGE_SIZE;
                if addr % align != 0 {
                    start += 1;
                    continue;
                }
                if inner.free[start..start + npages].iter().all(|f| *f) {
                    return Some(start);
                }
                start += 1;
            }
            None
        }
    }

    impl PageSource for BumpPageSource {
        fn alloc_pages(&self) -> Option<PhysAddr> {
            let mut inner = self.inner.lock();
            let start = Self::find_run(&mut inner, super::super::NPAGES, super::super::SUPERPAGE_BYTES)?;
            for slot in &mut inner.free[start..start + super::super::NPAGES] {
                *slot = false;
            }
            Some(PhysAddr::new(inner.base + start * crate::physical::PAGE_SIZE))
        }

        fn alloc_contig(
            &self,
            npages: usize,
            low: PhysAddr,
            high: PhysAddr,
            align: usize,
            boundary: usize,
        ) -> Option<PhysAddr> {
            let mut inner = self.inner.lock();
            let start = Self::find_run(&mut inner, npages, align.max(1))?;
            let addr = inner.base + start * crate::physical::PAGE_SIZE;
            let end = addr + npages * crate::physical::PAGE_SIZE;
            if addr < low.as_usize() || end > high.as_usize() {
                return None;
            }
            if boundary > 0 && (addr ^ (end - 1)) & !(boundary - 1) != 0 {
                return None;
            }
            for slot in &mut inner.free[start..start + npages] {
                *slot = false;
            }
            Some(PhysAddr::new(addr))
        }

        fn free_pages(&self, addr: PhysAddr) {
            self.free_contig(addr, super::super::NPAGES);
        }

        fn free_contig(&self, addr: PhysAddr, npages: usize) {
            let mut inner = self.inner.lock();
            let start = Self::index_of(&inner, addr);
            for slot in &mut inner.free[start..start + npages] {
                *slot = true;
            }
        }

        fn set_superpage_hint(&self, first_page: PhysAddr, is_superpage: bool) {
            self.inner.lock().hints.insert(first_page.as_usize(), is_superpage);
        }
    }

    /// A [`VmObject`] with a settable size and vnode flag, and a plain
    /// `BTreeMap` standing in for `object.memq`.
    pub struct TestObject {
        id: ObjectId,
        size: Mutex<u64>,
        vnode: bool,
        pages: Mutex<BTreeMap<u64, PhysAddr>>,
    }

    impl TestObject {
        pub fn new(id: u64, size: u64, vnode: bool) -> Self {
            Self {
                id: ObjectId::new(id),
                size: Mutex::new(size),
                vnode,
                pages: Mutex::new(BTreeMap::new()),
            }
        }

        pub fn set_size(&self, size: u64) {
            *self.size.lock() = size;
        }

        /// Records that `pindex` is now backed by `phys`, as
        /// `vm_reserv_populate` does implicitly by way of `object->memq`.
        pub fn insert_page(&self, pindex: u64, phys: PhysAddr) {
            self.pages.lock().insert(pindex, phys);
        }

        pub fn remove_page(&self, pindex: u64) {
            self.pages.lock().remove(&pindex);
        }

        pub fn page_at(&self, pindex: u64) -> Option<PageHandle> {
            self.pages
                .lock()
                .get(&pindex)
                .map(|phys| PageHandle { pindex, phys: *phys })
        }
    }

    impl VmObject for TestObject {
        fn id(&self) -> ObjectId {
            self.id
        }

        fn size(&self) -> u64 {
            *self.size.lock()
        }

        fn is_vnode_backed(&self) -> bool {
            self.vnode
        }

        fn first_page(&self) -> Option<PageHandle> {
            self.pages
                .lock()
                .iter()
                .next()
                .map(|(pindex, phys)| PageHandle { pindex: *pindex, phys: *phys })
        }

        fn page_before(&self, pindex: u64) -> Option<PageHandle> {
            self.pages
                .lock()
                .range((core::ops::Bound::Unbounded, core::ops::Bound::Excluded(pindex)))
                .next_back()
                .map(|(pindex, phys)| PageHandle { pindex: *pindex, phys: *phys })
        }

        fn page_after(&self, pindex: u64) -> Option<PageHandle> {
            self.pages
                .lock()
                .range((core::ops::Bound::Excluded(pindex), core::ops::Bound::Unbounded))
                .next()
                .map(|(pindex, phys)| PageHandle { pindex: *pindex, phys: *phys })
        }
    }
}
