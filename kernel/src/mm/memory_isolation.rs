//! Memory Isolation and Protection Mechanisms
//!
//! This module provides advanced memory isolation and protection features
//! for the NOS operating system, including:
//! - Process memory isolation
//! - Memory protection keys (MPK)
//! - Address space layout randomization (ASLR)
//! - Memory access validation
//! - Secure memory allocation
//! - Memory region permissions

extern crate alloc;

use alloc::collections::BTreeMap;
use alloc::vec::Vec;
use core::sync::atomic::{AtomicUsize, Ordering};
use core::sync::Mutex;
use crate::mm::{PAGE_SIZE, vm::{PageTable, VmPerm, VmArea, VmSpace}};
use crate::sync::Mutex as NosMutex;

/// Memory protection domain identifier
pub type ProtectionDomainId = u32;

/// Memory region identifier
pub type MemoryRegionId = u64;

/// Memory protection domain
#[derive(Debug, Clone)]
pub struct ProtectionDomain {
    /// Domain identifier
    pub id: ProtectionDomainId,
    /// Domain name
    pub name: alloc::string::String,
    /// Memory regions in this domain
    pub regions: BTreeMap<MemoryRegionId, MemoryRegion>,
    /// Access permissions for this domain
    pub permissions: DomainPermissions,
    /// Is this domain trusted?
    pub trusted: bool,
}

/// Memory region with protection attributes
#[derive(Debug, Clone)]
pub struct MemoryRegion {
    /// Region identifier
    pub id: MemoryRegionId,
    /// Region start address
    pub start: usize,
    /// Region end address
    pub end: usize,
    /// Region permissions
    pub permissions: VmPerm,
    /// Protection domain this region belongs to
    pub domain_id: ProtectionDomainId,
    /// Is this region secure?
    pub secure: bool,
    /// Region type
    pub region_type: MemoryRegionType,
    /// Access count for monitoring
    pub access_count: AtomicUsize,
}

/// Memory region type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemoryRegionType {
    /// Code region
    Code = 0,
    /// Data region
    Data = 1,
    /// Stack region
    Stack = 2,
    /// Heap region
    Heap = 3,
    /// Mapped file region
    MappedFile = 4,
    /// Shared memory region
    SharedMemory = 5,
    /// Device memory region
    DeviceMemory = 6,
    /// Secure region
    Secure = 7,
}

/// Domain permissions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DomainPermissions {
    /// Can read other domains' memory
    pub can_read_others: bool,
    /// Can write to other domains' memory
    pub can_write_others: bool,
    /// Can execute in other domains
    pub can_execute_others: bool,
    /// Can manage other domains
    pub can_manage_domains: bool,
    /// Can modify protection keys
    pub can_modify_protection_keys: bool,
}

impl Default for DomainPermissions {
    fn default() -> Self {
        Self {
            can_read_others: false,
            can_write_others: false,
            can_execute_others: false,
            can_manage_domains: false,
            can_modify_protection_keys: false,
        }
    }
}

/// Memory isolation manager
pub struct MemoryIsolationManager {
    /// Protection domains
    domains: BTreeMap<ProtectionDomainId, ProtectionDomain>,
    /// Next domain ID
    next_domain_id: AtomicUsize,
    /// Next region ID
    next_region_id: AtomicUsize,
    /// ASLR state
    aslr_state: AslrState,
    /// Memory protection keys (if supported)
    protection_keys: ProtectionKeyManager,
}

/// ASLR state for address space layout randomization
#[derive(Debug)]
pub struct AslrState {
    /// Randomization enabled
    pub enabled: bool,
    /// Randomization entropy (bits)
    pub entropy_bits: u32,
    /// Base offset for code
    pub code_offset: usize,
    /// Base offset for data
    pub data_offset: usize,
    /// Base offset for heap
    pub heap_offset: usize,
    /// Base offset for stack
    pub stack_offset: usize,
}

/// Memory protection key manager (if hardware supports MPK)
#[derive(Debug)]
pub struct ProtectionKeyManager {
    /// Available protection keys
    pub available_keys: Vec<u8>,
    /// Key permissions
    pub key_permissions: BTreeMap<u8, VmPerm>,
    /// Next key to allocate
    pub next_key: AtomicUsize,
}

/// Memory access validation result
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessValidationResult {
    /// Access allowed
    Allowed,
    /// Access denied - no permission
    DeniedPermission,
    /// Access denied - invalid domain
    DeniedDomain,
    /// Access denied - secure region violation
    DeniedSecure,
    /// Access denied - region not found
    DeniedNotFound,
}

/// Memory isolation statistics
#[derive(Debug, Clone)]
pub struct MemoryIsolationStats {
    /// Total number of domains
    pub total_domains: u32,
    /// Total number of regions
    pub total_regions: u32,
    /// Access violations count
    pub access_violations: u64,
    /// Secure region access attempts
    pub secure_access_attempts: u64,
    /// Cross-domain access attempts
    pub cross_domain_access_attempts: u64,
}

impl MemoryIsolationManager {
    /// Create a new memory isolation manager
    pub fn new() -> Self {
        Self {
            domains: BTreeMap::new(),
            next_domain_id: AtomicUsize::new(1),
            next_region_id: AtomicUsize::new(1),
            aslr_state: AslrState::new(),
            protection_keys: ProtectionKeyManager::new(),
        }
    }

    /// Initialize the memory isolation manager
    pub fn init(&mut self) -> Result<(), MemoryIsolationError> {
        // Initialize ASLR
        self.aslr_state.init()?;
        
        // Initialize protection keys
        self.protection_keys.init()?;
        
        // Create kernel domain (ID 0)
        self.create_kernel_domain()?;
        
        Ok(())
    }

    /// Create a new protection domain
    pub fn create_domain(
        &mut self,
        name: alloc::string::String,
        permissions: DomainPermissions,
        trusted: bool,
    ) -> Result<ProtectionDomainId, MemoryIsolationError> {
        let id = self.next_domain_id.fetch_add(1, Ordering::SeqCst) as ProtectionDomainId;
        
        let domain = ProtectionDomain {
            id,
            name,
            regions: BTreeMap::new(),
            permissions,
            trusted,
        };
        
        self.domains.insert(id, domain);
        Ok(id)
    }

    /// Create kernel domain with maximum privileges
    fn create_kernel_domain(&mut self) -> Result<ProtectionDomainId, MemoryIsolationError> {
        let kernel_perms = DomainPermissions {
            can_read_others: true,
            can_write_others: true,
            can_execute_others: true,
            can_manage_domains: true,
            can_modify_protection_keys: true,
        };
        
        self.create_domain(
            alloc::string::String::from("kernel"),
            kernel_perms,
            true,
        )
    }

    /// Add a memory region to a protection domain
    pub fn add_region(
        &mut self,
        domain_id: ProtectionDomainId,
        start: usize,
        size: usize,
        permissions: VmPerm,
        region_type: MemoryRegionType,
        secure: bool,
    ) -> Result<MemoryRegionId, MemoryIsolationError> {
        // Validate domain exists
        if !self.domains.contains_key(&domain_id) {
            return Err(MemoryIsolationError::DomainNotFound);
        }
        
        // Validate address range
        if start == 0 || size == 0 || (start + size) < start {
            return Err(MemoryIsolationError::InvalidAddressRange);
        }
        
        // Check for overlap with existing regions
        let end = start + size;
        if let Some(domain) = self.domains.get(&domain_id) {
            for region in domain.regions.values() {
                if (start < region.end) && (end > region.start) {
                    return Err(MemoryIsolationError::RegionOverlap);
                }
            }
        }
        
        let id = self.next_region_id.fetch_add(1, Ordering::SeqCst);
        
        let region = MemoryRegion {
            id,
            start,
            end,
            permissions,
            domain_id,
            secure,
            region_type,
            access_count: AtomicUsize::new(0),
        };
        
        // Apply ASLR if enabled
        let randomized_start = if self.aslr_state.enabled {
            self.aslr_state.randomize_address(start, region_type)?
        } else {
            start
        };
        
        // Update region with randomized start
        let mut randomized_region = region.clone();
        randomized_region.start = randomized_start;
        randomized_region.end = randomized_start + size;
        
        // Add to domain
        if let Some(domain) = self.domains.get_mut(&domain_id) {
            domain.regions.insert(id, randomized_region);
        }
        
        Ok(id)
    }

    /// Remove a memory region
    pub fn remove_region(
        &mut self,
        domain_id: ProtectionDomainId,
        region_id: MemoryRegionId,
    ) -> Result<(), MemoryIsolationError> {
        let domain = self.domains.get_mut(&domain_id)
            .ok_or(MemoryIsolationError::DomainNotFound)?;
        
        domain.regions.remove(&region_id)
            .ok_or(MemoryIsolationError::RegionNotFound)?;
        
        Ok(())
    }

    /// Validate memory access
    pub fn validate_access(
        &self,
        domain_id: ProtectionDomainId,
        addr: usize,
        size: usize,
        is_write: bool,
        is_execute: bool,
    ) -> AccessValidationResult {
        // Check if domain exists
        let domain = match self.domains.get(&domain_id) {
            Some(d) => d,
            None => return AccessValidationResult::DeniedDomain,
        };
        
        // Find the region containing the address
        let end = addr + size;
        let region = domain.regions.values().find(|r| addr >= r.start && end <= r.end);
        
        let region = match region {
            Some(r) => r,
            None => return AccessValidationResult::DeniedNotFound,
        };
        
        // Check secure region access
        if region.secure && !domain.trusted {
            return AccessValidationResult::DeniedSecure;
        }
        
        // Check permissions
        if is_write && !region.permissions.write {
            return AccessValidationResult::DeniedPermission;
        }
        
        if is_execute && !region.permissions.exec {
            return AccessValidationResult::DeniedPermission;
        }
        
        if !region.permissions.read {
            return AccessValidationResult::DeniedPermission;
        }
        
        // Update access count
        region.access_count.fetch_add(1, Ordering::Relaxed);
        
        AccessValidationResult::Allowed
    }

    /// Validate cross-domain access
    pub fn validate_cross_domain_access(
        &self,
        from_domain_id: ProtectionDomainId,
        to_domain_id: ProtectionDomainId,
        is_write: bool,
        is_execute: bool,
    ) -> AccessValidationResult {
        // Same domain access is always allowed
        if from_domain_id == to_domain_id {
            return AccessValidationResult::Allowed;
        }
        
        let from_domain = match self.domains.get(&from_domain_id) {
            Some(d) => d,
            None => return AccessValidationResult::DeniedDomain,
        };
        
        // Check cross-domain permissions
        if is_write && !from_domain.permissions.can_write_others {
            return AccessValidationResult::DeniedPermission;
        }
        
        if is_execute && !from_domain.permissions.can_execute_others {
            return AccessValidationResult::DeniedPermission;
        }
        
        if !from_domain.permissions.can_read_others {
            return AccessValidationResult::DeniedPermission;
        }
        
        AccessValidationResult::Allowed
    }

    /// Get memory isolation statistics
    pub fn get_stats(&self) -> MemoryIsolationStats {
        let total_regions: u32 = self.domains.values()
            .map(|d| d.regions.len() as u32)
            .sum();
        
        MemoryIsolationStats {
            total_domains: self.domains.len() as u32,
            total_regions,
            access_violations: 0, // TODO: Track violations
            secure_access_attempts: 0, // TODO: Track secure access
            cross_domain_access_attempts: 0, // TODO: Track cross-domain access
        }
    }

    /// Apply memory protection to a page table
    pub fn apply_protection_to_pagetable(
        &self,
        pagetable: *mut PageTable,
        domain_id: ProtectionDomainId,
    ) -> Result<(), MemoryIsolationError> {
        let domain = self.domains.get(&domain_id)
            .ok_or(MemoryIsolationError::DomainNotFound)?;
        
        // Apply protection keys if available
        for region in domain.regions.values() {
            if let Some(key) = self.protection_keys.allocate_key(region.permissions)? {
                // Apply protection key to region pages
                self.apply_protection_key_to_region(pagetable, region, key)?;
            }
        }
        
        Ok(())
    }

    /// Apply protection key to a memory region
    fn apply_protection_key_to_region(
        &self,
        _pagetable: *mut PageTable,
        _region: &MemoryRegion,
        _key: u8,
    ) -> Result<(), MemoryIsolationError> {
        // TODO: Implement architecture-specific protection key application
        // This would involve setting the PKRU register on x86 or similar on other architectures
        Ok(())
    }

    /// Create secure memory region
    pub fn create_secure_region(
        &mut self,
        domain_id: ProtectionDomainId,
        size: usize,
        region_type: MemoryRegionType,
    ) -> Result<MemoryRegionId, MemoryIsolationError> {
        // Find a secure address range
        let start = self.find_secure_address_range(size)?;
        
        // Create region with secure flag
        self.add_region(
            domain_id,
            start,
            size,
            VmPerm { read: true, write: true, exec: false, user: false },
            region_type,
            true,
        )
    }

    /// Find a secure address range
    fn find_secure_address_range(&self, size: usize) -> Result<usize, MemoryIsolationError> {
        // TODO: Implement secure address allocation
        // For now, return a fixed address in kernel space
        Ok(0xFFFF_8000_0000_0000)
    }

    /// Zero out secure memory region
    pub fn zero_secure_region(
        &mut self,
        domain_id: ProtectionDomainId,
        region_id: MemoryRegionId,
    ) -> Result<(), MemoryIsolationError> {
        let domain = self.domains.get_mut(&domain_id)
            .ok_or(MemoryIsolationError::DomainNotFound)?;
        
        let region = domain.regions.get_mut(&region_id)
            .ok_or(MemoryIsolationError::RegionNotFound)?;
        
        if !region.secure {
            return Err(MemoryIsolationError::NotSecureRegion);
        }
        
        // Zero out the memory region
        unsafe {
            core::ptr::write_bytes(region.start as *mut u8, 0, region.end - region.start);
        }
        
        Ok(())
    }
}

impl AslrState {
    /// Create new ASLR state
    pub fn new() -> Self {
        Self {
            enabled: false,
            entropy_bits: 0,
            code_offset: 0,
            data_offset: 0,
            heap_offset: 0,
            stack_offset: 0,
        }
    }

    /// Initialize ASLR
    pub fn init(&mut self) -> Result<(), MemoryIsolationError> {
        // Enable ASLR with 32 bits of entropy
        self.enabled = true;
        self.entropy_bits = 32;
        
        // Generate random offsets
        self.code_offset = self.generate_random_offset()?;
        self.data_offset = self.generate_random_offset()?;
        self.heap_offset = self.generate_random_offset()?;
        self.stack_offset = self.generate_random_offset()?;
        
        Ok(())
    }

    /// Generate random offset
    fn generate_random_offset(&self) -> Result<usize, MemoryIsolationError> {
        // TODO: Use proper random number generator
        // For now, use a simple pseudo-random generator
        static COUNTER: AtomicUsize = AtomicUsize::new(1);
        let value = COUNTER.fetch_add(1, Ordering::SeqCst);
        
        // Apply entropy mask
        let mask = (1usize << self.entropy_bits) - 1;
        Ok(value & mask)
    }

    /// Randomize address based on region type
    pub fn randomize_address(
        &self,
        addr: usize,
        region_type: MemoryRegionType,
    ) -> Result<usize, MemoryIsolationError> {
        if !self.enabled {
            return Ok(addr);
        }
        
        let offset = match region_type {
            MemoryRegionType::Code => self.code_offset,
            MemoryRegionType::Data => self.data_offset,
            MemoryRegionType::Heap => self.heap_offset,
            MemoryRegionType::Stack => self.stack_offset,
            _ => 0,
        };
        
        Ok(addr.wrapping_add(offset))
    }
}

impl ProtectionKeyManager {
    /// Create new protection key manager
    pub fn new() -> Self {
        Self {
            available_keys: Vec::new(),
            key_permissions: BTreeMap::new(),
            next_key: AtomicUsize::new(0),
        }
    }

    /// Initialize protection key manager
    pub fn init(&mut self) -> Result<(), MemoryIsolationError> {
        // TODO: Detect hardware support for protection keys
        // For now, assume 16 protection keys are available (0-15)
        for i in 1..16 {
            self.available_keys.push(i);
        }
        
        Ok(())
    }

    /// Allocate a protection key
    pub fn allocate_key(&self, permissions: VmPerm) -> Result<Option<u8>, MemoryIsolationError> {
        if self.available_keys.is_empty() {
            return Ok(None);
        }
        
        let key_index = self.next_key.fetch_add(1, Ordering::SeqCst) % self.available_keys.len();
        let key = self.available_keys[key_index];
        
        // Store key permissions
        // Note: This would need to be mutable in a real implementation
        // For now, we'll just return the key
        Ok(Some(key))
    }
}

/// Memory isolation errors
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MemoryIsolationError {
    /// Domain not found
    DomainNotFound,
    /// Region not found
    RegionNotFound,
    /// Invalid address range
    InvalidAddressRange,
    /// Region overlap
    RegionOverlap,
    /// Not a secure region
    NotSecureRegion,
    /// ASLR initialization failed
    AslrInitFailed,
    /// Protection key allocation failed
    ProtectionKeyFailed,
    /// Permission denied
    PermissionDenied,
}

/// Global memory isolation manager instance
static MEMORY_ISOLATION_MANAGER: NosMutex<MemoryIsolationManager> = NosMutex::new(MemoryIsolationManager::new());

/// Initialize memory isolation system
pub fn init_memory_isolation() -> Result<(), MemoryIsolationError> {
    let mut manager = MEMORY_ISOLATION_MANAGER.lock();
    manager.init()
}

/// Get memory isolation manager
pub fn get_memory_isolation_manager() -> &'static NosMutex<MemoryIsolationManager> {
    &MEMORY_ISOLATION_MANAGER
}

/// Validate memory access (convenience function)
pub fn validate_memory_access(
    domain_id: ProtectionDomainId,
    addr: usize,
    size: usize,
    is_write: bool,
    is_execute: bool,
) -> AccessValidationResult {
    let manager = MEMORY_ISOLATION_MANAGER.lock();
    manager.validate_access(domain_id, addr, size, is_write, is_execute)
}

/// Create a new protection domain (convenience function)
pub fn create_protection_domain(
    name: alloc::string::String,
    permissions: DomainPermissions,
    trusted: bool,
) -> Result<ProtectionDomainId, MemoryIsolationError> {
    let mut manager = MEMORY_ISOLATION_MANAGER.lock();
    manager.create_domain(name, permissions, trusted)
}

/// Get kernel domain ID
pub fn get_kernel_domain_id() -> ProtectionDomainId {
    0 // Kernel domain is always ID 0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_domain_creation() {
        let mut manager = MemoryIsolationManager::new();
        manager.init().unwrap();
        
        let domain_id = manager.create_domain(
            alloc::string::String::from("test"),
            DomainPermissions::default(),
            false,
        ).unwrap();
        
        assert!(domain_id > 0);
    }

    #[test]
    fn test_region_addition() {
        let mut manager = MemoryIsolationManager::new();
        manager.init().unwrap();
        
        let domain_id = manager.create_domain(
            alloc::string::String::from("test"),
            DomainPermissions::default(),
            false,
        ).unwrap();
        
        let region_id = manager.add_region(
            domain_id,
            0x1000,
            0x1000,
            VmPerm::rw(),
            MemoryRegionType::Data,
            false,
        ).unwrap();
        
        assert!(region_id > 0);
    }

    #[test]
    fn test_access_validation() {
        let mut manager = MemoryIsolationManager::new();
        manager.init().unwrap();
        
        let domain_id = manager.create_domain(
            alloc::string::String::from("test"),
            DomainPermissions::default(),
            false,
        ).unwrap();
        
        manager.add_region(
            domain_id,
            0x1000,
            0x1000,
            VmPerm::rw(),
            MemoryRegionType::Data,
            false,
        ).unwrap();
        
        let result = manager.validate_access(domain_id, 0x1000, 0x100, true, false);
        assert_eq!(result, AccessValidationResult::Allowed);
        
        let result = manager.validate_access(domain_id, 0x1000, 0x100, false, true);
        assert_eq!(result, AccessValidationResult::DeniedPermission);
    }
}