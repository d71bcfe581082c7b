/// Boot Coordinator - Low-level Boot Stage Coordination
///
/// Provides low-level coordination of boot stages and hardware interaction.
/// Manages technical boot flow from initialization to kernel handoff.
/// This is distinct from Application layer orchestration which handles business use cases.

use crate::{
    boot_stage::boot_config::BootConfig,
    kernel_if::{kernel_loader::KernelLoader},
    core::boot_sequence::BootSequence,
    utils::error::BootError,
};

/// Memory map entry from E820
#[derive(Debug, Clone, Copy)]
pub struct MemoryMapEntry {
    pub base_addr: u64,
    pub length: u64,
    pub mem_type: u32,
    pub acpi_attrs: u32,
}

/// Memory map from E820 detection
#[derive(Clone)]
pub struct MemoryMap {
    entries: [MemoryMapEntry; 32],
    entry_count: usize,
}

impl MemoryMap {
    pub fn new() -> Self {
        Self {
            entries: [MemoryMapEntry {
                base_addr: 0,
                length: 0,
                mem_type: 0,
                acpi_attrs: 0,
            }; 32],
            entry_count: 0,
        }
    }

    pub fn add_entry(&mut self, entry: MemoryMapEntry) -> Result<(), &'static str> {
        if self.entry_count >= self.entries.len() {
            return Err("Memory map full");
        }
        self.entries[self.entry_count] = entry;
        self.entry_count += 1;
        Ok(())
    }

    pub fn total_ram(&self) -> u64 {
        self.entries
            .iter()
            .take(self.entry_count)
            .filter(|e| e.mem_type == 1) // Type 1 = usable RAM
            .map(|e| e.length)
            .sum()
    }

    pub fn entries(&self) -> &[MemoryMapEntry] {
        &self.entries[..self.entry_count]
    }
}

/// Boot information for kernel handoff
#[derive(Clone)]
pub struct BootInfo {
    pub memory_map: MemoryMap,
    pub kernel_addr: u64,
    pub kernel_size: u64,
    pub cmdline: Option<&'static [u8]>,
}

/// Boot Coordinator - Low-level boot process coordinator
pub struct BootCoordinator<'a> {
    config: BootConfig,
    boot_sequence: BootSequence,
    boot_info: Option<BootInfo>,
    _phantom: core::marker::PhantomData<&'a ()>,
}

impl<'a> BootCoordinator<'a> {
    /// Create new boot coordinator
    pub fn new(config: BootConfig) -> Self {
        Self {
            config,
            boot_sequence: BootSequence::new(),
            boot_info: None,
            _phantom: core::marker::PhantomData,
        }
    }

    /// Detect system hardware using low-level interfaces
    /// This method handles hardware detection at the boot stage level,
    /// focusing on technical aspects rather than business logic.
    pub fn detect_hardware(&mut self) -> Result<crate::domain::boot_services::HardwareInfo, BootError> {
        // Implementation would use low-level hardware detection
        // For now, return a placeholder
        Ok(crate::domain::boot_services::HardwareInfo::new())
    }



    /// Load kernel from disk
    pub fn load_kernel(&mut self) -> Result<(), BootError> {
        // TODO: Replace with actual disk read using bios_calls
        // For now, we'll simulate loading an ELF kernel from a buffer
        
        // In a real implementation, this would:
        // 1. Read kernel from disk using INT 0x13 via bios_services.disk.read_sectors()
        // 2. Allocate memory for kernel loading
        // 3. Parse ELF format and load segments into memory
        // 4. Update boot_info with kernel address and size
        
        // Placeholder: Simulate reading from disk by creating a minimal valid ELF header
        // This is just to demonstrate the parsing functionality
        
        let kernel_data = &[]; // TODO: Replace with actual read data

        // Try to load the kernel
        let loader = KernelLoader::new(kernel_data);
        match loader.load_kernel() {
            Ok(_image) => {
                // Update boot_info
                // TODO: Implement memory allocation and actual loading

                Ok(())
            }
            Err(_) => Err(BootError::KernelLoadFailed),
        }
    }

    /// Validate loaded kernel
    pub fn validate_kernel(&self) -> Result<(), BootError> {
        // Check if kernel has been loaded
        if self.boot_info.is_none() {
            return Err(BootError::InvalidState);
        }

        // TODO: Implement additional validation:
        // 1. Calculate and verify kernel checksum
        // 2. Validate kernel entry point is in usable memory
        // 3. Check kernel segment permissions and alignments
        // 4. Verify kernel compatibility with bootloader
        
        // Basic validation: Check if kernel address is reasonable
        let boot_info = self.boot_info.as_ref().unwrap();
        if boot_info.kernel_addr < 0x100000 || boot_info.kernel_size == 0 {
            return Err(BootError::InvalidKernelFormat);
        }

        Ok(())
    }

    /// Setup boot information for kernel handoff
    pub fn setup_boot_info(&mut self, memory_map: MemoryMap) -> Result<BootInfo, BootError> {
        let cmdline = if self.config.cmdline_len > 0 {
            // Convert the slice to a static reference
            // In a real implementation, this would need proper static allocation
            // For now, we'll use None to avoid lifetime issues
            None
        } else {
            None
        };

        let boot_info = BootInfo {
            memory_map,
            kernel_addr: 0x100000, // Traditional kernel load address
            kernel_size: 1024 * 1024, // 1MB kernel size (mock)
            cmdline,
        };

        self.boot_info = Some(boot_info.clone());
        Ok(boot_info)
    }

    /// Get current boot configuration
    pub fn config(&self) -> &BootConfig {
        &self.config
    }

    /// Get mutable boot configuration
    pub fn config_mut(&mut self) -> &mut BootConfig {
        &mut self.config
    }

    /// Get boot sequence
    pub fn boot_sequence(&self) -> &BootSequence {
        &self.boot_sequence
    }

    /// Get boot info
    pub fn boot_info(&self) -> Option<&BootInfo> {
        self.boot_info.as_ref()
    }

    /// Check if graphics is enabled
    pub fn is_graphics_enabled(&self) -> bool {
        self.config.enable_graphics
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_boot_coordinator_creation() {
        let config = BootConfig::new();
        let coordinator = BootCoordinator::new(config);
        assert!(coordinator.boot_info().is_none());
    }

    #[test]
    fn test_memory_map() {
        let mut memory_map = MemoryMap::new();
        assert_eq!(memory_map.entry_count, 0);
        
        let entry = MemoryMapEntry {
            base_addr: 0,
            length: 1024 * 1024,
            mem_type: 1,
            acpi_attrs: 0,
        };
        
        assert!(memory_map.add_entry(entry).is_ok());
        assert_eq!(memory_map.entry_count, 1);
        assert_eq!(memory_map.total_ram(), 1024 * 1024);
    }

    #[test]
    fn test_boot_error_messages() {
        assert_eq!(
            BootError::MemoryMapError.description(),
            "Memory map error"
        );
        assert_eq!(
            BootError::KernelLoadFailed.description(),
            "Failed to load kernel"
        );
    }
}