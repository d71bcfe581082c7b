// Address Space Layout Randomization (ASLR) implementation
//
// This module provides ASLR capabilities to randomize memory address spaces,
// making it more difficult for attackers to predict memory locations and
// exploit memory corruption vulnerabilities.

extern crate alloc;

use alloc::collections::BTreeMap;
use alloc::sync::Arc;
use alloc::vec::Vec;
use core::sync::atomic::{AtomicU64, Ordering};
use spin::Mutex;

use crate::types::stubs::*;

/// ASLR entropy bits for different memory regions
#[derive(Debug, Clone, Copy)]
pub struct AslrEntropy {
    /// Stack randomization bits (typically 16-24 bits)
    pub stack_bits: u8,
    /// Memory mapping randomization bits (typically 24-32 bits)
    pub mmap_bits: u8,
    /// Heap randomization bits (typically 12-16 bits)
    pub heap_bits: u8,
    /// Executable randomization bits (typically 8-16 bits)
    pub exec_bits: u8,
    /// PIE (Position Independent Executable) randomization bits
    pub pie_bits: u8,
    /// Shared library randomization bits
    pub library_bits: u8,
}

impl Default for AslrEntropy {
    fn default() -> Self {
        Self {
            stack_bits: 24,
            mmap_bits: 28,
            heap_bits: 16,
            exec_bits: 16,
            pie_bits: 16,
            library_bits: 24,
        }
    }
}

/// ASLR configuration
#[derive(Debug, Clone)]
pub struct AslrConfig {
    /// Whether ASLR is enabled
    pub enabled: bool,
    /// Entropy configuration for different memory regions
    pub entropy: AslrEntropy,
    /// Whether to randomize kernel address space (KASLR)
    pub kernel_aslr: bool,
    /// Force PIE for all executables
    pub force_pie: bool,
    /// Randomize shared libraries
    pub randomize_libraries: bool,
    /// Randomize heap (brk)
    pub randomize_heap: bool,
    /// Randomize stack
    pub randomize_stack: bool,
    /// Randomize memory mappings (mmap)
    pub randomize_mmap: bool,
}

impl Default for AslrConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            entropy: AslrEntropy::default(),
            kernel_aslr: true,
            force_pie: true,
            randomize_libraries: true,
            randomize_heap: true,
            randomize_stack: true,
            randomize_mmap: true,
        }
    }
}

/// Memory region information for ASLR
#[derive(Debug, Clone)]
pub struct MemoryRegion {
    /// Base address
    pub base: VirtAddr,
    /// Size of the region
    pub size: usize,
    /// Alignment requirements
    pub alignment: usize,
    /// Randomization bits
    pub randomization_bits: u8,
    /// Region type
    pub region_type: MemoryRegionType,
}

/// Types of memory regions that can be randomized
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MemoryRegionType {
    Stack,
    Heap,
    Executable,
    SharedLibrary,
    MemoryMapping,
    Kernel,
}

/// ASLR statistics
#[derive(Debug, Default, Clone)]
pub struct AslrStats {
    pub events_processed: u64,
    /// Number of processes with ASLR enabled
    pub aslr_processes: u64,
    /// Number of randomized memory regions
    pub randomized_regions: u64,
    /// Number of failed randomizations
    pub failed_randomizations: u64,
    /// Number of re-randomizations (execshield style)
    pub rerandomizations: u64,
    /// Total entropy used (in bits)
    pub total_entropy: u64,
}

/// Address Space Layout Randomization (ASLR) subsystem
pub struct AslrSubsystem {
    /// ASLR configuration
    config: AslrConfig,
    /// Per-process ASLR state
    process_states: BTreeMap<u64, ProcessAslrState>,
    /// Statistics
    stats: Arc<Mutex<AslrStats>>,
    /// Random number generator state
    rng_state: AtomicU64,
}

/// Per-process ASLR state
#[derive(Debug, Clone)]
pub struct ProcessAslrState {
    /// Process ID
    pub pid: u64,
    /// Whether ASLR is enabled for this process
    pub enabled: bool,
    /// Randomized memory regions
    pub regions: Vec<MemoryRegion>,
    /// Original addresses before randomization
    pub original_addresses: BTreeMap<VirtAddr, VirtAddr>,
    /// Randomization seed for this process
    pub seed: u64,
}

impl AslrSubsystem {
    /// Create a new ASLR subsystem
    pub fn new(config: AslrConfig) -> Self {
        Self {
            config,
            process_states: BTreeMap::new(),
            stats: Arc::new(Mutex::new(AslrStats::default())),
            rng_state: AtomicU64::new(0),
        }
    }

    /// Initialize ASLR for a new process
    pub fn init_process(&mut self, process: &Process) -> Result<(), &'static str> {
        if !self.config.enabled {
            return Ok(());
        }

        let pid = process.pid();
        let seed = self.generate_seed();

        let process_state = ProcessAslrState {
            pid,
            enabled: true,
            regions: Vec::new(),
            original_addresses: BTreeMap::new(),
            seed,
        };

        self.process_states.insert(pid, process_state);

        // Update statistics
        {
            let mut stats = self.stats.lock();
            stats.aslr_processes += 1;
        }

        Ok(())
    }

    /// Randomize a memory region
    pub fn randomize_region(
        &mut self,
        pid: u64,
        base: VirtAddr,
        size: usize,
        alignment: usize,
        region_type: MemoryRegionType,
    ) -> Result<VirtAddr, &'static str> {
        if !self.config.enabled {
            return Ok(base);
        }

        // 先检查进程状态，释放借用后再调用其他方法
        let enabled = {
            let process_state = self.process_states.get_mut(&pid)
                .ok_or("Process not found")?;
            process_state.enabled
        };

        if !enabled {
            return Ok(base);
        }

        let randomization_bits = self.get_randomization_bits(region_type);
        let random_offset = self.generate_random_offset(randomization_bits, alignment);
        let randomized_base = crate::types::stubs::VirtAddr::new(base.as_usize() + random_offset);

        // Store region information
        let region = MemoryRegion {
            base: randomized_base,
            size,
            alignment,
            randomization_bits,
            region_type,
        };

        // 重新获取process_state的可变引用
        let process_state = self.process_states.get_mut(&pid)
            .ok_or("Process not found")?;
        process_state.regions.push(region);
        process_state.original_addresses.insert(randomized_base, base);

        // Update statistics
        {
            let mut stats = self.stats.lock();
            stats.randomized_regions += 1;
            stats.total_entropy += randomization_bits as u64;
        }

        Ok(randomized_base)
    }

    /// Get randomization bits for a memory region type
    fn get_randomization_bits(&self, region_type: MemoryRegionType) -> u8 {
        match region_type {
            MemoryRegionType::Stack => self.config.entropy.stack_bits,
            MemoryRegionType::Heap => self.config.entropy.heap_bits,
            MemoryRegionType::Executable => self.config.entropy.exec_bits,
            MemoryRegionType::SharedLibrary => self.config.entropy.library_bits,
            MemoryRegionType::MemoryMapping => self.config.entropy.mmap_bits,
            MemoryRegionType::Kernel => self.config.entropy.pie_bits, // Using PIE bits for kernel
        }
    }

    /// Generate a random offset within the specified entropy range
    fn generate_random_offset(&self, bits: u8, alignment: usize) -> usize {
        if bits == 0 {
            return 0;
        }

        let mask = ((1usize << bits) - 1) & !(alignment - 1);
        let random_value = self.random_number();

        (random_value & mask).max(alignment)
    }

    /// Generate a random number using kernel RNG
    fn random_number(&self) -> usize {
        // Use architecture-specific RNG
        crate::types::stubs::RNG_INSTANCE.get_random()
    }

    /// Generate a random seed for process ASLR
    fn generate_seed(&self) -> u64 {
        let mut seed = self.rng_state.load(Ordering::Relaxed);
        seed = seed.wrapping_add(self.random_number() as u64);
        self.rng_state.store(seed, Ordering::Relaxed);
        seed
    }

    /// Remove ASLR state for a terminated process
    pub fn cleanup_process(&mut self, pid: u64) {
        self.process_states.remove(&pid);
    }

    /// Re-randomize a process (execshield style)
    pub fn rerandomize_process(&mut self, pid: u64) -> Result<(), &'static str> {
        // 先生成种子，避免借用冲突
        let new_seed = self.generate_seed();

        let process_state = self.process_states.get_mut(&pid)
            .ok_or("Process not found")?;

        process_state.seed = new_seed;

        // Clear existing regions and re-randomize
        process_state.regions.clear();
        process_state.original_addresses.clear();

        // Update statistics
        {
            let mut stats = self.stats.lock();
            stats.rerandomizations += 1;
        }

        Ok(())
    }

    /// Get the original (non-randomized) address for a randomized address
    pub fn get_original_address(&self, pid: u64, randomized_addr: VirtAddr) -> Option<VirtAddr> {
        let process_state = self.process_states.get(&pid)?;
        process_state.original_addresses.get(&randomized_addr).copied()
    }

    /// Check if an address is in a randomized region
    pub fn is_randomized_address(&self, pid: u64, addr: VirtAddr) -> bool {
        let process_state = match self.process_states.get(&pid) {
            Some(state) => state,
            None => return false,
        };

        process_state.regions.iter().any(|region| {
            addr.as_usize() >= region.base.as_usize() && addr.as_usize() < (region.base.as_usize() + region.size)
        })
    }

    /// Get memory regions for a process
    pub fn get_process_regions(&self, pid: u64) -> Option<&[MemoryRegion]> {
        let process_state = self.process_states.get(&pid)?;
        Some(&process_state.regions)
    }

    /// Validate address randomization
    pub fn validate_randomization(&self, pid: u64) -> Result<bool, &'static str> {
        let process_state = self.process_states.get(&pid)
            .ok_or("Process not found")?;

        if !process_state.enabled {
            return Ok(false);
        }

        // Check if regions have sufficient entropy
        for region in &process_state.regions {
            if region.randomization_bits < 8 {
                return Ok(false);
            }
        }

        Ok(true)
    }

    /// Get ASLR configuration
    pub fn config(&self) -> &AslrConfig {
        &self.config
    }

    /// Update ASLR configuration
    pub fn update_config(&mut self, config: AslrConfig) {
        self.config = config;
    }

    /// Get ASLR statistics
    pub fn get_stats(&self) -> AslrStats {
        self.stats.lock().clone()
    }

    /// Reset ASLR statistics
    pub fn reset_stats(&self) {
        *self.stats.lock() = AslrStats::default();
    }
}

/// High-level ASLR interface functions

/// Initialize ASLR for a process
pub fn init_process_aslr(process: &Process) -> Result<(), &'static str> {
    let mut guard = crate::security::ASLR.lock();
    if let Some(ref mut aslr) = *guard {
        aslr.init_process(process)
    } else {
        Ok(())
    }
}

/// Randomize a memory region
pub fn randomize_memory_region(
    pid: u64,
    base: VirtAddr,
    size: usize,
    alignment: usize,
    region_type: MemoryRegionType,
) -> Result<VirtAddr, &'static str> {
    let mut guard = crate::security::ASLR.lock();
    if let Some(ref mut aslr) = *guard {
        aslr.randomize_region(pid, base, size, alignment, region_type)
    } else {
        Ok(base)
    }
}

/// Check if ASLR is enabled
pub fn is_aslr_enabled() -> bool {
    let guard = crate::security::ASLR.lock();
    guard.as_ref().map(|s| s.config().enabled).unwrap_or(false)
}

/// Get ASLR configuration
pub fn get_aslr_config() -> AslrConfig {
    let guard = crate::security::ASLR.lock();
    guard.as_ref().map(|s| s.config().clone()).unwrap_or_else(AslrConfig::default)
}

/// Update ASLR configuration
pub fn update_aslr_config(config: AslrConfig) -> Result<(), &'static str> {
    *crate::security::ASLR.lock() = Some(AslrSubsystem::new(config));
    Ok(())
}

/// Get ASLR statistics
pub fn get_aslr_statistics() -> AslrStats {
    let guard = crate::security::ASLR.lock();
    guard.as_ref().map(|s| s.get_stats()).unwrap_or_default()
}

/// Validate process ASLR
pub fn validate_process_aslr(pid: u64) -> Result<bool, &'static str> {
    let guard = crate::security::ASLR.lock();
    if let Some(ref s) = *guard {
        s.validate_randomization(pid)
    } else {
        Ok(false)
    }
}

/// Check if address is randomized
pub fn is_address_randomized(pid: u64, addr: VirtAddr) -> bool {
    let guard = crate::security::ASLR.lock();
    guard.as_ref().map(|s| s.is_randomized_address(pid, addr)).unwrap_or(false)
}

/// Re-randomize process
pub fn rerandomize_process(pid: u64) -> Result<(), &'static str> {
    let mut guard = crate::security::ASLR.lock();
    if let Some(ref mut s) = *guard {
        s.rerandomize_process(pid)
    } else {
        Ok(())
    }
}

/// Initialize ASLR subsystem
pub fn initialize_aslr() -> Result<(), i32> {
    *crate::security::ASLR.lock() = Some(AslrSubsystem::new(AslrConfig::default()));
    Ok(())
}

/// Cleanup ASLR subsystem
pub fn cleanup_aslr() {
    // Placeholder: In a real implementation, this would clean up ASLR resources
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aslr_config_default() {
        let config = AslrConfig::default();
        assert!(config.enabled);
        assert!(config.kernel_aslr);
        assert!(config.force_pie);
        assert_eq!(config.entropy.stack_bits, 24);
        assert_eq!(config.entropy.mmap_bits, 28);
    }

    #[test]
    fn test_memory_region_creation() {
        let region = MemoryRegion {
            base: VirtAddr::new(0x1000),
            size: 4096,
            alignment: 4096,
            randomization_bits: 16,
            region_type: MemoryRegionType::Stack,
        };

        assert_eq!(region.base.as_usize(), 0x1000);
        assert_eq!(region.size, 4096);
        assert_eq!(region.region_type, MemoryRegionType::Stack);
    }

    #[test]
    fn test_process_aslr_state() {
        let state = ProcessAslrState {
            pid: 1234,
            enabled: true,
            regions: Vec::new(),
            original_addresses: BTreeMap::new(),
            seed: 0x1234567890ABCDEF,
        };

        assert_eq!(state.pid, 1234);
        assert!(state.enabled);
        assert_eq!(state.regions.len(), 0);
    }

    #[test]
    fn test_aslr_subsystem_creation() {
        let config = AslrConfig::default();
        let subsystem = AslrSubsystem::new(config);

        assert!(subsystem.config().enabled);
        let stats = subsystem.get_stats();
        assert_eq!(stats.aslr_processes, 0);
        assert_eq!(stats.randomized_regions, 0);
    }

    #[test]
    fn test_randomization_bits_selection() {
        let config = AslrConfig::default();
        let subsystem = AslrSubsystem::new(config);

        let stack_bits = subsystem.get_randomization_bits(MemoryRegionType::Stack);
        assert_eq!(stack_bits, 24);

        let heap_bits = subsystem.get_randomization_bits(MemoryRegionType::Heap);
        assert_eq!(heap_bits, 16);
    }
}
