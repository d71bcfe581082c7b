//! Allocator front-ends (§4.6): `alloc_page` and `alloc_contig` are the only
//! two entry points through which a new page ever gets tied to an object's
//! reservation.
//!
//! Both first look for an existing reservation already anchored near the
//! requested index (via the object's ordered page list, `mpred`/`msucc` in
//! `vm_reserv.c`'s terms) before falling back to carving out a fresh
//! superpage from the collaborator [`PageSource`]. The existing-reservation
//! path is lock-free until the candidate is found, then re-validated under
//! its shard lock with the seqlock snapshot taken first — exactly the retry
//! discipline §4.3 describes for readers of `object`/`pindex`.

use super::collab::{ObjectId, PageSource, VmObject};
use super::manager::ReservationManager;
use super::table::ReservationTable;
use super::{populate, NPAGES};
use crate::physical::PhysAddr;

/// The anchor pindex of the reservation that would cover `pindex`: the
/// greatest multiple of [`NPAGES`] not exceeding it (§4.6's `first = pindex -
/// pindex % NPAGES`). Every reservation's stored pindex is one of these
/// anchors, never an arbitrary offset into the middle of its range.
fn anchor_of(pindex: u64) -> u64 {
    pindex - pindex % NPAGES as u64
}

/// Index within a reservation's population map that `pindex` would occupy,
/// given the reservation's own anchor pindex.
fn bit_of(anchor_pindex: u64, pindex: u64) -> Option<usize> {
    let offset = pindex.checked_sub(anchor_pindex)?;
    if offset < NPAGES as u64 {
        Some(offset as usize)
    } else {
        None
    }
}

/// Checks a contiguous request's feasibility against the *internal* layout
/// of the reservation it would start in, independent of which physical
/// reservation that turns out to be (§4.6): the byte offset `pa` of
/// `offset` within a hypothetical reservation must already satisfy `align`,
/// and the requested span must not cross a `boundary`-aligned address. Both
/// `align` and `boundary` are powers of two; `0` means unconstrained.
fn contig_feasible(offset: usize, npages: usize, align: usize, boundary: usize) -> bool {
    let pa = offset * crate::physical::PAGE_SIZE;
    if align > 1 && pa % align != 0 {
        return false;
    }
    if boundary > 1 {
        let end = pa + npages * crate::physical::PAGE_SIZE;
        if pa / boundary != (end - 1) / boundary {
            return false;
        }
    }
    true
}

/// Finds a reservation index that already covers `pindex` for `object`, by
/// inspecting the object's nearest neighbouring pages, without taking any
/// lock beyond the candidate's own shard lock.
fn find_existing<P: PageSource, O: VmObject>(
    manager: &ReservationManager<P>,
    object: &O,
    pindex: u64,
) -> Option<u32> {
    let neighbour = object
        .page_before(pindex)
        .or_else(|| object.page_after(pindex))?;
    let index = ReservationTable::index_of_phys(neighbour.phys);
    let index = manager.table.checked_index(index)?;

    let rv = manager.table.record_unsynchronized(index);
    if !rv.is_valid() || rv.is_marker() {
        return None;
    }
    let snapshot = rv.seq_read();
    let candidate_object = rv.object_unsynchronized();
    let candidate_pindex = rv.pindex_unsynchronized();
    if !rv.seq_consistent(snapshot) {
        return None;
    }
    if candidate_object != Some(object.id()) {
        return None;
    }
    bit_of(candidate_pindex, pindex)?;
    Some(index)
}

impl<P: PageSource> ReservationManager<P> {
    /// Allocates the page at `pindex` of `object`, populating an existing
    /// reservation if one already covers it, or carving a fresh one from
    /// [`PageSource::alloc_pages`] otherwise (§4.6, `vm_reserv_alloc_page`).
    pub fn alloc_page<O: VmObject>(&self, object: &O, pindex: u64) -> Option<PhysAddr> {
        if let Some(index) = find_existing(self, object, pindex) {
            let rv = self.locks.lock(&self.table, index);
            if rv.is_valid() && !rv.is_marker() && rv.object_locked() == Some(object.id()) {
                if let Some(bit) = bit_of(rv.pindex_locked(), pindex) {
                    if super::popmap::is_clear(&rv.popmap, bit) {
                        let rv = populate::populate(self, rv, bit);
                        return rv.pages().map(|base| phys_at(base, bit));
                    }
                }
            }
        }
        self.alloc_new(object, pindex)
    }

    /// Carves a brand-new reservation out of free physical memory and
    /// populates its first page (§4.6).
    ///
    /// Refuses to create a reservation that would speculate past the end of
    /// a vnode-backed object: such an object's size is the file's size, and
    /// tying down a whole superpage's worth of pages past it would hold
    /// physical memory hostage to a read that will never come (§4.6's
    /// `leftcap`/`rightcap` feasibility check, specialized to level 0).
    fn alloc_new<O: VmObject>(&self, object: &O, pindex: u64) -> Option<PhysAddr> {
        if object.is_vnode_backed() && pindex + NPAGES as u64 > object.size() {
            return None;
        }
        let base = self.source.alloc_pages()?;
        let index = ReservationTable::index_of_phys(base);
        let index = self.table.checked_index(index)?;

        let mut rv = self.locks.lock(&self.table, index);
        debug_assert!(rv.is_valid() && !rv.is_marker() && rv.popcnt() == 0);

        let anchor = anchor_of(pindex);
        rv.seq_write_begin();
        rv.set_object_locked(Some(object.id()), anchor);
        rv.seq_write_end();
        drop(rv);
        self.queues
            .lock()
            .objects
            .insert(&self.locks, &self.table, object.id(), index);

        let bit = bit_of(anchor, pindex).expect("anchor_of always covers pindex");
        let rv = self.locks.lock(&self.table, index);
        populate::populate(self, rv, bit);
        Some(phys_at(base, bit))
    }

    /// Allocates `npages` contiguous pages of `object` starting at
    /// `pindex`, reusing or creating reservations the same way
    /// [`Self::alloc_page`] does for a single page (§4.6,
    /// `vm_reserv_alloc_contig`'s "contiguous path").
    ///
    /// `align`/`boundary` constrain the *physical* address of the returned
    /// run, both required to be powers of two (`0` means unconstrained).
    /// Feasibility against the reservation's internal layout is checked
    /// before anything is allocated: a request whose offset within its
    /// hypothetical reservation isn't `align`-aligned, or whose span would
    /// cross a `boundary` multiple, fails outright rather than falling
    /// back to an untracked allocation.
    pub fn alloc_contig<O: VmObject>(
        &self,
        object: &O,
        pindex: u64,
        npages: usize,
        low: PhysAddr,
        high: PhysAddr,
        align: usize,
        boundary: usize,
    ) -> Option<PhysAddr> {
        if npages == 0 {
            return None;
        }
        let offset = (pindex % NPAGES as u64) as usize;
        if !contig_feasible(offset, npages, align, boundary) {
            return None;
        }
        let anchor = anchor_of(pindex);

        // FOUND: a single existing reservation might already cover the
        // whole range. `npages > N - 1` can never fit inside one
        // reservation alongside at least one occupied slot, so this
        // branch is skipped (not failed outright) in that case.
        if offset + npages <= NPAGES {
            if let Some(result) = self.try_reuse_contig(object, pindex, offset, npages, low, high) {
                return Some(result);
            }
        }

        // MISS: carve a fresh run of `maxpages` (rounded up to whole
        // reservations) and bind it as `maxpages / NPAGES` consecutive
        // reservations.
        let minpages = offset + npages;
        let maxpages = minpages.div_ceil(NPAGES) * NPAGES;
        self.alloc_new_contig(object, anchor, offset, npages, minpages, maxpages, low, high, align, boundary)
    }

    /// The FOUND branch of [`Self::alloc_contig`]: reuse a single existing
    /// reservation already anchored such that it covers the entire
    /// requested range, with every slot in that range still free and the
    /// reservation's physical range satisfying `[low, high)`.
    fn try_reuse_contig<O: VmObject>(
        &self,
        object: &O,
        pindex: u64,
        offset: usize,
        npages: usize,
        low: PhysAddr,
        high: PhysAddr,
    ) -> Option<PhysAddr> {
        let index = find_existing(self, object, pindex)?;
        let mut rv = self.locks.lock(&self.table, index);
        if !rv.is_valid() || rv.is_marker() || rv.object_locked() != Some(object.id()) {
            return None;
        }
        let start_bit = bit_of(rv.pindex_locked(), pindex)?;
        if start_bit + npages > NPAGES {
            return None;
        }
        for bit in start_bit..start_bit + npages {
            if super::popmap::is_set(&rv.popmap, bit) {
                return None;
            }
        }
        let base = rv.pages()?;
        let start_addr = phys_at(base, start_bit);
        let end_addr = start_addr.as_usize() + npages * crate::physical::PAGE_SIZE;
        if start_addr.as_usize() < low.as_usize() || end_addr > high.as_usize() {
            return None;
        }
        for bit in start_bit..start_bit + npages {
            rv = populate::populate(self, rv, bit);
        }
        Some(start_addr)
    }

    /// The miss branch of [`Self::alloc_contig`]: requests a fresh,
    /// `maxpages`-sized run from the page source (or just `minpages` if
    /// the full run would speculate past a vnode-backed object's size),
    /// then carves it into `request_pages / NPAGES` consecutive
    /// reservations bound to `object` starting at `anchor`, populating
    /// only the bits inside the caller's `[offset, offset + npages)`
    /// slice of the whole carved range.
    #[allow(clippy::too_many_arguments)]
    fn alloc_new_contig<O: VmObject>(
        &self,
        object: &O,
        anchor: u64,
        offset: usize,
        npages: usize,
        minpages: usize,
        maxpages: usize,
        low: PhysAddr,
        high: PhysAddr,
        align: usize,
        boundary: usize,
    ) -> Option<PhysAddr> {
        let would_overrun = anchor + maxpages as u64 > object.size();
        let request_pages = if object.is_vnode_backed() && would_overrun {
            minpages
        } else {
            maxpages
        };
        let contig_align = align.max(super::SUPERPAGE_BYTES);
        let contig_boundary = if boundary > super::SUPERPAGE_BYTES { boundary } else { 0 };
        let base = self
            .source
            .alloc_contig(request_pages, low, high, contig_align, contig_boundary)?;
        let base_index = ReservationTable::index_of_phys(base);
        let reservations = request_pages.div_ceil(NPAGES);

        let mut result = None;
        for k in 0..reservations {
            let index = self.table.checked_index(base_index + k as u32)?;
            let res_base = PhysAddr::new(base.as_usize() + k * super::SUPERPAGE_BYTES);
            let res_anchor = anchor + (k * NPAGES) as u64;

            {
                let mut rv = self.locks.lock(&self.table, index);
                debug_assert!(rv.is_valid() && !rv.is_marker() && rv.popcnt() == 0);
                rv.seq_write_begin();
                rv.set_object_locked(Some(object.id()), res_anchor);
                rv.seq_write_end();
            }
            self.queues
                .lock()
                .objects
                .insert(&self.locks, &self.table, object.id(), index);

            let reservation_start = k * NPAGES;
            let slice_start = offset.max(reservation_start).saturating_sub(reservation_start);
            let slice_end = (offset + npages)
                .min(reservation_start + NPAGES)
                .saturating_sub(reservation_start);
            if slice_start < slice_end {
                let mut rv = self.locks.lock(&self.table, index);
                for bit in slice_start..slice_end {
                    rv = populate::populate(self, rv, bit);
                }
                if result.is_none() {
                    result = Some(phys_at(res_base, slice_start));
                }
            }
        }
        result
    }

    /// Frees the page at physical address `addr`, which must currently be
    /// populated in some reservation, returning it to the object-free state
    /// (§4.6's release half, `vm_reserv_free_page`).
    pub fn free_page(&self, object_id: ObjectId, addr: PhysAddr) -> bool {
        let index = ReservationTable::index_of_phys(addr);
        let Some(index) = self.table.checked_index(index) else {
            return false;
        };
        let rv = self.locks.lock(&self.table, index);
        if !rv.is_valid() || rv.is_marker() || rv.object_locked() != Some(object_id) {
            return false;
        }
        let Some(base) = rv.pages() else {
            return false;
        };
        let bit = ((addr.as_usize() - base.as_usize()) / crate::physical::PAGE_SIZE) as usize;
        if super::popmap::is_clear(&rv.popmap, bit) {
            return false;
        }
        // `depopulate` runs the LRU update procedure, which itself clears the
        // object and returns the whole run to the page source once `popcnt`
        // reaches zero (§4.5 branch 2) — nothing left to do here.
        populate::depopulate(self, rv, bit);
        true
    }

    /// Reassigns every reservation currently owned by `old_object` to
    /// `new_object`, shifting each one's stored pindex by `pindex_delta`
    /// (§6, `vm_reserv_rename`; used when an object's page range is
    /// spliced into another object's, e.g. during a collapse).
    pub fn rename<O: VmObject>(&self, old_object: ObjectId, new_object: &O, pindex_delta: i64) -> usize {
        let mut queues = self.queues.lock();
        let mut renamed = 0usize;
        while let Some(index) = queues.objects.head_of(old_object) {
            queues
                .objects
                .remove(&self.locks, &self.table, old_object, index);
            {
                let mut rv = self.locks.lock(&self.table, index);
                let new_pindex = (rv.pindex_locked() as i64 + pindex_delta) as u64;
                rv.seq_write_begin();
                rv.set_object_locked(Some(new_object.id()), new_pindex);
                rv.seq_write_end();
            }
            queues
                .objects
                .insert(&self.locks, &self.table, new_object.id(), index);
            renamed += 1;
        }
        renamed
    }

    /// True if the page at `addr` is currently free (unpopulated, whether
    /// because no reservation backs it or because its reservation hasn't
    /// populated that bit). Used by allocator-adjacent debugging code
    /// (§6's `is_page_free`).
    pub fn is_page_free(&self, addr: PhysAddr) -> bool {
        let index = ReservationTable::index_of_phys(addr);
        let Some(index) = self.table.checked_index(index) else {
            return false;
        };
        let rv = self.locks.lock(&self.table, index);
        if !rv.is_valid() || rv.is_marker() {
            return false;
        }
        let Some(base) = rv.pages() else {
            return false;
        };
        let bit = ((addr.as_usize() - base.as_usize()) / crate::physical::PAGE_SIZE) as usize;
        super::popmap::is_clear(&rv.popmap, bit)
    }

    /// The reservation "level" backing `addr`: `0` if a level-0 reservation
    /// covers it, `-1` if none does (§6's `level`/`level_iffullpop`; there
    /// is only ever one level in this rendering, per the Open Question
    /// resolution recorded for the module).
    pub fn level(&self, addr: PhysAddr) -> i32 {
        let index = ReservationTable::index_of_phys(addr);
        match self.table.checked_index(index) {
            Some(index) if self.locks.lock(&self.table, index).is_valid() => 0,
            _ => -1,
        }
    }

    /// Size in bytes of a reservation at `level`: a superpage at level `0`,
    /// a single page at level `-1` ("no reservation", i.e. the granularity
    /// `level`/`level_iffullpop` fall back to), `None` for anything else.
    pub fn size(level: i32) -> Option<usize> {
        match level {
            0 => Some(super::SUPERPAGE_BYTES),
            -1 => Some(crate::physical::PAGE_SIZE),
            _ => None,
        }
    }

    /// Like [`Self::level`], but only reports a level for a reservation
    /// that is completely populated (a true hardware superpage).
    pub fn level_iffullpop(&self, addr: PhysAddr) -> i32 {
        let index = ReservationTable::index_of_phys(addr);
        match self.table.checked_index(index) {
            Some(index) => {
                let rv = self.locks.lock(&self.table, index);
                if rv.is_valid() && rv.popcnt() as usize == NPAGES {
                    0
                } else {
                    -1
                }
            }
            None => -1,
        }
    }
}

fn phys_at(base: PhysAddr, bit: usize) -> PhysAddr {
    PhysAddr::new(base.as_usize() + bit * crate::physical::PAGE_SIZE)
}

#[cfg(test)]
mod tests {
    use super::*;
    use super::super::boot;
    use super::super::collab::test_support::{BumpPageSource, TestObject};

    fn manager_with(npages: usize) -> ReservationManager<BumpPageSource> {
        let base = PhysAddr::new(0);
        let source = BumpPageSource::new(base, npages * NPAGES);
        boot::init(source, npages * NPAGES * crate::physical::PAGE_SIZE).unwrap()
    }

    #[test]
    fn alloc_then_free_round_trip() {
        let manager = manager_with(2);
        let object = TestObject::new(1, 4096, false);
        let phys = manager.alloc_page(&object, 0).expect("alloc succeeds");
        object.insert_page(0, phys);
        assert!(!manager.is_page_free(phys));
        assert!(manager.free_page(object.id(), phys));
        assert!(manager.is_page_free(phys));
    }

    #[test]
    fn second_page_of_same_object_shares_reservation() {
        let manager = manager_with(2);
        let object = TestObject::new(2, 4096, false);
        let p0 = manager.alloc_page(&object, 0).unwrap();
        object.insert_page(0, p0);
        let p1 = manager.alloc_page(&object, 1).unwrap();
        assert_eq!(
            ReservationTable::index_of_phys(p0),
            ReservationTable::index_of_phys(p1)
        );
    }

    #[test]
    fn vnode_backed_object_cannot_speculate_past_its_size() {
        let manager = manager_with(1);
        let object = TestObject::new(4, 100, true);
        assert!(manager.alloc_page(&object, 0).is_none());
    }

    #[test]
    fn level_reports_fullpop_only_when_complete() {
        let manager = manager_with(1);
        let object = TestObject::new(3, NPAGES as u64, false);
        let mut last = PhysAddr::new(0);
        for pindex in 0..NPAGES as u64 {
            last = manager.alloc_page(&object, pindex).unwrap();
            object.insert_page(pindex, last);
        }
        assert_eq!(manager.level_iffullpop(last), 0);
    }

    #[test]
    fn alloc_contig_whole_reservation_fully_populates_it() {
        let manager = manager_with(1);
        let object = TestObject::new(5, NPAGES as u64, false);
        let phys = manager
            .alloc_contig(
                &object,
                0,
                NPAGES,
                PhysAddr::new(0),
                PhysAddr::new(usize::MAX),
                super::super::SUPERPAGE_BYTES,
                0,
            )
            .expect("whole-reservation contig request succeeds");
        assert_eq!(phys, PhysAddr::new(0));
        assert_eq!(manager.level_iffullpop(phys), 0);
        assert_eq!(manager.fullpop_count(), 1);
    }

    #[test]
    fn alloc_contig_reuses_an_existing_reservation() {
        let manager = manager_with(1);
        let object = TestObject::new(6, NPAGES as u64, false);
        let p0 = manager.alloc_page(&object, 0).unwrap();
        object.insert_page(0, p0);

        let phys = manager
            .alloc_contig(
                &object,
                1,
                4,
                PhysAddr::new(0),
                PhysAddr::new(usize::MAX),
                0,
                0,
            )
            .expect("reuse of the existing reservation succeeds");
        assert_eq!(
            ReservationTable::index_of_phys(phys),
            ReservationTable::index_of_phys(p0)
        );
        assert_eq!(manager.fullpop_count(), 0);
    }

    #[test]
    fn alloc_contig_spans_multiple_reservations_when_crossing_a_boundary() {
        let manager = manager_with(2);
        let object = TestObject::new(7, (NPAGES * 2) as u64, false);
        let phys = manager
            .alloc_contig(
                &object,
                NPAGES as u64 - 1,
                2,
                PhysAddr::new(0),
                PhysAddr::new(usize::MAX),
                0,
                0,
            )
            .expect("contig request spanning two reservations succeeds");
        assert_eq!(
            phys,
            PhysAddr::new((NPAGES - 1) * crate::physical::PAGE_SIZE)
        );
        assert!(!manager.is_page_free(phys));
        let second = PhysAddr::new(NPAGES * crate::physical::PAGE_SIZE);
        assert!(!manager.is_page_free(second));
    }

    #[test]
    fn alloc_contig_vnode_tail_requests_only_minpages() {
        let manager = manager_with(1);
        let object = TestObject::new(8, 10, true);
        let phys = manager
            .alloc_contig(
                &object,
                0,
                4,
                PhysAddr::new(0),
                PhysAddr::new(usize::MAX),
                0,
                0,
            )
            .expect("short vnode-backed contig request still succeeds");
        assert_eq!(phys, PhysAddr::new(0));
        // Only the 4 requested pages were populated, not the whole N-page
        // reservation the miss branch would otherwise have carved.
        assert_eq!(manager.locks.lock(&manager.table, 0).popcnt(), 4);
    }
}
