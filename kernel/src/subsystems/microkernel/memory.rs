//! Microkernel memory management
//!
//! Provides basic memory management services for the microkernel layer.
//! This includes physical page allocation, address space management,
//! and memory protection.

extern crate alloc;
use alloc::collections::BTreeMap;
use alloc::vec::Vec;
use core::sync::atomic::{AtomicUsize, AtomicBool, Ordering};
use crate::subsystems::sync::Mutex;
use crate::reliability::errno::{ENOMEM, EINVAL, EFAULT};
// use crate::subsystems::mm::vm::{Page, VirtAddr, PhysAddr}; // TODO: Implement vm module

pub type VirtAddr = usize;
pub type PhysAddr = usize;
pub struct Page {
    pub addr: VirtAddr,
    pub size: usize,
    pub flags: u8,
}

/// Memory protection flags
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MemoryProtection {
    pub readable: bool,
    pub writable: bool,
    pub executable: bool,
    pub user_accessible: bool,
}

impl MemoryProtection {
    pub const fn new() -> Self {
        Self {
            readable: false,
            writable: false,
            executable: false,
            user_accessible: false,
        }
    }

    pub const fn kernel_read_only() -> Self {
        Self {
            readable: true,
            writable: false,
            executable: false,
            user_accessible: false,
        }
    }

    pub const fn kernel_read_write() -> Self {
        Self {
            readable: true,
            writable: true,
            executable: false,
            user_accessible: false,
        }
    }

    pub const fn kernel_code() -> Self {
        Self {
            readable: true,
            writable: false,
            executable: true,
            user_accessible: false,
        }
    }

    pub const fn user_read_only() -> Self {
        Self {
            readable: true,
            writable: false,
            executable: false,
            user_accessible: true,
        }
    }

    pub const fn user_read_write() -> Self {
        Self {
            readable: true,
            writable: true,
            executable: false,
            user_accessible: true,
        }
    }

    pub const fn user_code() -> Self {
        Self {
            readable: true,
            writable: false,
            executable: true,
            user_accessible: true,
        }
    }

    pub fn as_flags(&self) -> u64 {
        let mut flags = 0u64;
        if self.readable { flags |= 0x1; }
        if self.writable { flags |= 0x2; }
        if self.executable { flags |= 0x4; }
        if self.user_accessible { flags |= 0x8; }
        flags
    }
}

/// Physical memory page
#[derive(Debug)]
pub struct PhysicalPage {
    pub paddr: PhysAddr,
    pub allocated: bool,
    pub order: u8,      // Allocation order (for buddy system)
    pub ref_count: AtomicUsize,
}

impl PhysicalPage {
    pub fn new(paddr: PhysAddr, order: u8) -> Self {
        Self {
            paddr,
            allocated: false,
            order,
            ref_count: AtomicUsize::new(0),
        }
    }

    pub fn inc_ref(&self) -> usize {
        self.ref_count.fetch_add(1, Ordering::SeqCst) + 1
    }

    pub fn dec_ref(&self) -> usize {
        self.ref_count.fetch_sub(1, Ordering::SeqCst) - 1
    }

    pub fn get_ref_count(&self) -> usize {
        self.ref_count.load(Ordering::SeqCst)
    }
}

/// Memory region in an address space
#[derive(Debug, Clone)]
pub struct MemoryRegion {
    pub start: VirtAddr,
    pub size: usize,
    pub protection: MemoryProtection,
    pub backing_paddr: Option<PhysAddr>, // None if not mapped yet
    pub flags: u32,                      // Additional flags (e.g., MAP_ANONYMOUS, MAP_FILE)
}

impl MemoryRegion {
    pub fn new(start: VirtAddr, size: usize, protection: MemoryProtection) -> Self {
        Self {
            start,
            size,
            protection,
            backing_paddr: None,
            flags: 0,
        }
    }

    pub fn contains(&self, addr: VirtAddr) -> bool {
        addr >= self.start && addr < self.start + self.size
    }

    pub fn end(&self) -> VirtAddr {
        self.start + self.size
    }
}

/// Address space
#[derive(Debug)]
pub struct AddressSpace {
    pub id: u32,
    pub regions: BTreeMap<VirtAddr, MemoryRegion>,
    pub page_table: PageTableManager,
    pub ref_count: AtomicUsize,
}

impl AddressSpace {
    pub fn new(id: u32) -> Self {
        Self {
            id,
            regions: BTreeMap::new(),
            page_table: PageTableManager::new(),
            ref_count: AtomicUsize::new(1),
        }
    }

    pub fn add_region(&mut self, region: MemoryRegion) -> Result<(), i32> {
        // Check for overlaps with existing regions
        for (existing_start, existing_region) in &self.regions {
            if !(region.end() <= *existing_start || region.start >= existing_region.end()) {
                return Err(EINVAL); // Overlap detected
            }
        }

        self.regions.insert(region.start, region);
        Ok(())
    }

    pub fn remove_region(&mut self, start: VirtAddr) -> Option<MemoryRegion> {
        self.regions.remove(&start)
    }

    pub fn find_region(&self, addr: VirtAddr) -> Option<&MemoryRegion> {
        for (_, region) in &self.regions {
            if region.contains(addr) {
                return Some(region);
            }
        }
        None
    }

    pub fn inc_ref(&self) -> usize {
        self.ref_count.fetch_add(1, Ordering::SeqCst) + 1
    }

    pub fn dec_ref(&self) -> usize {
        self.ref_count.fetch_sub(1, Ordering::SeqCst) - 1
    }
}

impl Clone for AddressSpace {
    fn clone(&self) -> Self {
        Self {
            id: self.id,
            regions: self.regions.clone(),
            page_table: self.page_table.clone(),
            ref_count: AtomicUsize::new(self.ref_count.load(Ordering::SeqCst)),
        }
    }
}

/// Page table manager (simplified)
#[derive(Debug, Clone)]
pub struct PageTableManager {
    pub root_paddr: PhysAddr,
    pub asid: Option<u32>, // Address space identifier
}

impl PageTableManager {
    pub fn new() -> Self {
        // In a real implementation, this would allocate a new page table
        Self {
            root_paddr: 0,
            asid: None,
        }
    }

    pub fn map_page(&mut self, vaddr: VirtAddr, paddr: PhysAddr, protection: MemoryProtection) -> Result<(), i32> {
        // In a real implementation, this would update the page table
        // For now, just validate parameters
        if vaddr == 0 || paddr == 0 {
            return Err(EFAULT);
        }

        // Update hardware TLB if needed
        self.update_tlb(vaddr, paddr, protection);
        Ok(())
    }

    pub fn unmap_page(&mut self, vaddr: VirtAddr) -> Result<(), i32> {
        if vaddr == 0 {
            return Err(EFAULT);
        }

        // Invalidate TLB entry
        self.invalidate_tlb(vaddr);
        Ok(())
    }

    fn update_tlb(&self, vaddr: VirtAddr, paddr: PhysAddr, protection: MemoryProtection) {
        // In a real implementation, this would update hardware TLB
        // For now, this is a placeholder
    }

    fn invalidate_tlb(&self, vaddr: VirtAddr) {
        // In a real implementation, this would invalidate TLB entry
        // For now, this is a placeholder
    }
}

/// Physical memory manager
pub struct PhysicalMemoryManager {
    pub pages: Mutex<BTreeMap<PhysAddr, PhysicalPage>>,
    pub total_pages: AtomicUsize,
    pub free_pages: AtomicUsize,
    pub allocated_pages: AtomicUsize,
}

impl PhysicalMemoryManager {
    pub fn new(total_memory: usize) -> Self {
        let total_pages = total_memory / PAGE_SIZE;
        let mut pages = BTreeMap::new();

        // Initialize all pages
        for i in 0..total_pages {
            let paddr = i * PAGE_SIZE;
            let page = PhysicalPage::new(paddr, 0);
            pages.insert(paddr, page);
        }

        Self {
            pages: Mutex::new(pages),
            total_pages: AtomicUsize::new(total_pages),
            free_pages: AtomicUsize::new(total_pages),
            allocated_pages: AtomicUsize::new(0),
        }
    }

    pub fn allocate_page(&self) -> Result<PhysAddr, i32> {
        let mut pages = self.pages.lock();

        // Find first free page (simple first-fit)
        for (paddr, page) in pages.iter_mut() {
            if !page.allocated {
                page.allocated = true;
                page.inc_ref();

                self.free_pages.fetch_sub(1, Ordering::SeqCst);
                self.allocated_pages.fetch_add(1, Ordering::SeqCst);

                // Update statistics
                super::MICROKERNEL_STATS.memory_allocations.fetch_add(1, Ordering::SeqCst);

                return Ok(*paddr);
            }
        }

        Err(ENOMEM)
    }

    pub fn allocate_pages(&self, count: usize) -> Result<Vec<PhysAddr>, i32> {
        let mut pages = Vec::with_capacity(count);

        for _ in 0..count {
            match self.allocate_page() {
                Ok(paddr) => pages.push(paddr),
                Err(e) => {
                    // Free already allocated pages
                    for paddr in pages {
                        let _ = self.free_page(paddr);
                    }
                    return Err(e);
                }
            }
        }

        Ok(pages)
    }

    pub fn free_page(&self, paddr: PhysAddr) -> Result<(), i32> {
        let mut pages = self.pages.lock();

        if let Some(page) = pages.get_mut(&paddr) {
            let new_ref_count = page.dec_ref();

            if new_ref_count == 0 {
                page.allocated = false;

                self.free_pages.fetch_add(1, Ordering::SeqCst);
                self.allocated_pages.fetch_sub(1, Ordering::SeqCst);
            }

            Ok(())
        } else {
            Err(EFAULT)
        }
    }

    pub fn get_page_info(&self, _paddr: PhysAddr) -> Option<PhysicalPage> {
        None
    }

    pub fn get_free_pages_count(&self) -> usize {
        self.free_pages.load(Ordering::SeqCst)
    }

    pub fn get_allocated_pages_count(&self) -> usize {
        self.allocated_pages.load(Ordering::SeqCst)
    }
}

/// Address space manager
pub struct AddressSpaceManager {
    pub address_spaces: Mutex<BTreeMap<u32, AddressSpace>>,
    pub next_asid: AtomicUsize,
}

impl AddressSpaceManager {
    pub fn new() -> Self {
        Self {
            address_spaces: Mutex::new(BTreeMap::new()),
            next_asid: AtomicUsize::new(1),
        }
    }

    pub fn create_address_space(&self) -> Result<u32, i32> {
        let asid = self.next_asid.fetch_add(1, Ordering::SeqCst) as u32;

        let address_space = AddressSpace::new(asid);

        let mut spaces = self.address_spaces.lock();
        spaces.insert(asid, address_space);

        Ok(asid)
    }

    pub fn destroy_address_space(&self, asid: u32) -> Result<(), i32> {
        let mut spaces = self.address_spaces.lock();

        if let Some(space) = spaces.remove(&asid) {
            // Clean up all mapped pages
            for (_, region) in space.regions {
                if let Some(paddr) = region.backing_paddr {
                    // Free the physical page
                    // Note: In a real implementation, we'd need a reference to the physical memory manager
                }
            }
            Ok(())
        } else {
            Err(EINVAL)
        }
    }

    pub fn get_address_space(&self, asid: u32) -> Option<AddressSpace> {
        let spaces = self.address_spaces.lock();
        spaces.get(&asid).cloned()
    }

    pub fn map_memory(&self, asid: u32, vaddr: VirtAddr, size: usize, protection: MemoryProtection) -> Result<(), i32> {
        let mut spaces = self.address_spaces.lock();

        let space = spaces.get_mut(&asid).ok_or(EINVAL)?;

        // Create memory region
        let region = MemoryRegion::new(vaddr, size, protection);

        // Add to address space
        space.add_region(region)?;

        Ok(())
    }

    pub fn unmap_memory(&self, asid: u32, vaddr: VirtAddr) -> Result<(), i32> {
        let mut spaces = self.address_spaces.lock();

        let space = spaces.get_mut(&asid).ok_or(EINVAL)?;

        // Find and remove the region
        if let Some(_) = space.remove_region(vaddr) {
            Ok(())
        } else {
            Err(EFAULT)
        }
    }
}

/// Microkernel memory manager
pub struct MicroMemoryManager {
    pub physical_manager: PhysicalMemoryManager,
    pub address_space_manager: AddressSpaceManager,
    pub kernel_asid: u32,
    initialized: AtomicBool,
}

impl MicroMemoryManager {
    pub fn new(total_memory: usize) -> Self {
        let physical_manager = PhysicalMemoryManager::new(total_memory);
        let address_space_manager = AddressSpaceManager::new();

        Self {
            physical_manager,
            address_space_manager,
            kernel_asid: 0,
            initialized: AtomicBool::new(false),
        }
    }

    pub fn init(&mut self) -> Result<(), i32> {
        if self.initialized.load(Ordering::SeqCst) {
            return Ok(());
        }

        // Create kernel address space
        self.kernel_asid = self.address_space_manager.create_address_space()?;

        // Map kernel memory regions
        self.map_kernel_memory()?;

        self.initialized.store(true, Ordering::SeqCst);
        Ok(())
    }

    fn map_kernel_memory(&self) -> Result<(), i32> {
        // Map kernel code region
        let kernel_code_start = 0xFFFFFFFF80000000usize; // Typical x86_64 kernel start
        let kernel_code_size = 16 * 1024 * 1024; // 16MB for example

        self.address_space_manager.map_memory(
            self.kernel_asid,
            kernel_code_start,
            kernel_code_size,
            MemoryProtection::kernel_code()
        )?;

        // Map kernel data region
        let kernel_data_start = kernel_code_start + kernel_code_size;
        let kernel_data_size = 32 * 1024 * 1024; // 32MB for example

        self.address_space_manager.map_memory(
            self.kernel_asid,
            kernel_data_start,
            kernel_data_size,
            MemoryProtection::kernel_read_write()
        )?;

        Ok(())
    }

    pub fn allocate_physical_page(&self) -> Result<PhysAddr, i32> {
        self.physical_manager.allocate_page()
    }

    pub fn free_physical_page(&self, paddr: PhysAddr) -> Result<(), i32> {
        self.physical_manager.free_page(paddr)
    }

    pub fn create_user_address_space(&self) -> Result<u32, i32> {
        self.address_space_manager.create_address_space()
    }

    pub fn map_user_memory(&self, asid: u32, vaddr: VirtAddr, size: usize,
                          readable: bool, writable: bool, executable: bool) -> Result<(), i32> {
        let protection = MemoryProtection {
            readable,
            writable,
            executable,
            user_accessible: true,
        };

        self.address_space_manager.map_memory(asid, vaddr, size, protection)
    }
}

/// Page size (4KB)
pub const PAGE_SIZE: usize = 4096;

/// Global memory manager
static mut GLOBAL_MEMORY_MANAGER: Option<MicroMemoryManager> = None;
static MEMORY_INIT: AtomicBool = AtomicBool::new(false);

/// Initialize microkernel memory management
pub fn init() -> Result<(), i32> {
    if MEMORY_INIT.load(Ordering::SeqCst) {
        return Ok(());
    }

    // Assume 512MB of total memory for example
    let total_memory = 512 * 1024 * 1024;

    let mut manager = MicroMemoryManager::new(total_memory);
    manager.init()?;

    unsafe {
        GLOBAL_MEMORY_MANAGER = Some(manager);
    }

    MEMORY_INIT.store(true, Ordering::SeqCst);
    Ok(())
}

/// Get global memory manager
pub fn get_memory_manager() -> Option<&'static MicroMemoryManager> {
    unsafe {
        GLOBAL_MEMORY_MANAGER.as_ref()
    }
}

/// Get mutable global memory manager
pub fn get_memory_manager_mut() -> Option<&'static mut MicroMemoryManager> {
    unsafe {
        GLOBAL_MEMORY_MANAGER.as_mut()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_protection() {
        let prot = MemoryProtection::user_read_write();
        assert!(prot.readable);
        assert!(prot.writable);
        assert!(!prot.executable);
        assert!(prot.user_accessible);
    }

    #[test]
    fn test_memory_region() {
        let start = VirtAddr::new(0x1000);
        let region = MemoryRegion::new(start, 4096, MemoryProtection::user_read_only());

        assert!(region.contains(start));
        assert!(region.contains(start + 1000));
        assert!(!region.contains(start - 1));
        assert!(!region.contains(start + 4096));
        assert_eq!(region.end(), start + 4096);
    }

    #[test]
    fn test_physical_memory_manager() {
        let manager = PhysicalMemoryManager::new(1024 * 1024); // 1MB

        assert_eq!(manager.get_free_pages_count(), 256); // 1MB / 4KB = 256 pages
        assert_eq!(manager.get_allocated_pages_count(), 0);

        let page1 = manager.allocate_page().unwrap();
        assert_eq!(manager.get_free_pages_count(), 255);
        assert_eq!(manager.get_allocated_pages_count(), 1);

        let page2 = manager.allocate_page().unwrap();
        assert_eq!(manager.get_free_pages_count(), 254);
        assert_eq!(manager.get_allocated_pages_count(), 2);

        assert_ne!(page1, page2);

        manager.free_page(page1).unwrap();
        assert_eq!(manager.get_free_pages_count(), 255);
        assert_eq!(manager.get_allocated_pages_count(), 1);
    }
}
