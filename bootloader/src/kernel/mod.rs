//! Kernel loading and boot preparation
//!
//! This module handles loading the NOS kernel from various sources,
//! validating it, and preparing it for execution.

use crate::arch::BootParameters;
use crate::error::{BootError, Result};
use crate::memory::BootMemoryManager;
use crate::protocol::{BootInfo, KernelImage, MemoryMap};
use core::ptr;

/// Kernel image formats supported
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KernelFormat {
    ELF64,
    Raw,
    Unknown,
}

/// Kernel loader
pub struct KernelLoader {
    memory_manager: *mut BootMemoryManager,
    kernel_image: Option<KernelImage>,
}

impl KernelLoader {
    /// Create a new kernel loader
    pub fn new(memory_manager: &mut BootMemoryManager) -> Self {
        Self {
            memory_manager: memory_manager,
            kernel_image: None,
        }
    }

    /// Load kernel from data
    pub fn load_from_data(&mut self, data: Vec<u8>) -> Result<KernelImage> {
        if data.is_empty() {
            return Err(BootError::KernelNotFound);
        }

        // Detect kernel format
        let format = self.detect_kernel_format(&data);

        match format {
            KernelFormat::ELF64 => self.load_elf64_kernel(data),
            KernelFormat::Raw => self.load_raw_kernel(data),
            KernelFormat::Unknown => Err(BootError::InvalidKernelFormat),
        }
    }

    /// Load kernel from file path
    pub fn load_from_file(&mut self, path: &str) -> Result<KernelImage> {
        // In a real implementation, this would use the boot protocol to load the file
        // For now, return an error indicating this needs implementation
        Err(BootError::FeatureNotEnabled("File loading"))
    }

    /// Detect kernel format from magic bytes
    fn detect_kernel_format(&self, data: &[u8]) -> KernelFormat {
        if data.len() < 16 {
            return KernelFormat::Unknown;
        }

        // Check for ELF magic
        if data[0] == 0x7F && data[1] == b'E' && data[2] == b'L' && data[3] == b'F' {
            // Check for 64-bit ELF
            if data[4] == 2 {
                return KernelFormat::ELF64;
            }
        }

        // Could add other format detections here
        KernelFormat::Unknown
    }

    /// Load ELF64 kernel
    fn load_elf64_kernel(&mut self, data: Vec<u8>) -> Result<KernelImage> {
        if data.len() < core::mem::size_of::<elf64::ElfHeader>() {
            return Err(BootError::InvalidKernelFormat);
        }

        let header = unsafe { &*(data.as_ptr() as *const elf64::ElfHeader) };

        // Validate ELF header
        if !self.validate_elf64_header(header)? {
            return Err(BootError::InvalidKernelFormat);
        }

        // Calculate required memory size
        let total_size = self.calculate_elf64_memory_requirements(header, &data)?;

        // Allocate memory for the kernel
        let load_address = unsafe { (*self.memory_manager).allocate_kernel_space(total_size)? };

        // Load ELF segments
        let entry_point = self.load_elf64_segments(header, &data, load_address)?;

        // Create kernel image
        let kernel_image = KernelImage {
            load_address,
            entry_point,
            size: total_size,
            data,
        };

        // Validate the loaded kernel
        kernel_image.validate()?;

        self.kernel_image = Some(kernel_image.clone());
        Ok(kernel_image)
    }

    /// Load raw kernel image
    fn load_raw_kernel(&mut self, data: Vec<u8>) -> Result<KernelImage> {
        let size = data.len();

        // Allocate memory for the kernel
        let load_address = unsafe { (*self.memory_manager).allocate_kernel_space(size)? };

        // Copy kernel data to allocated memory
        unsafe {
            ptr::copy_nonoverlapping(data.as_ptr(), load_address as *mut u8, size);
        }

        // For raw kernels, assume entry point is at the beginning
        let entry_point = load_address;

        let kernel_image = KernelImage {
            load_address,
            entry_point,
            size,
            data,
        };

        // Validate the loaded kernel
        kernel_image.validate()?;

        self.kernel_image = Some(kernel_image.clone());
        Ok(kernel_image)
    }

    /// Validate ELF64 header
    fn validate_elf64_header(&self, header: &elf64::ElfHeader) -> Result<bool> {
        // Check magic number
        if header.magic != [0x7F, b'E', b'L', b'F'] {
            return Ok(false);
        }

        // Check class (64-bit)
        if header.class != 2 {
            return Ok(false);
        }

        // Check data encoding (little endian)
        if header.data != 1 {
            return Ok(false);
        }

        // Check version
        if header.version != 1 {
            return Ok(false);
        }

        // Check file type (executable)
        if header.file_type != 2 {
            return Ok(false);
        }

        // Check machine type based on current architecture
        #[cfg(target_arch = "x86_64")]
        if header.machine != 62 { // EM_X86_64
            return Ok(false);
        }

        #[cfg(target_arch = "aarch64")]
        if header.machine != 183 { // EM_AARCH64
            return Ok(false);
        }

        #[cfg(target_arch = "riscv64")]
        if header.machine != 243 { // EM_RISCV
            return Ok(false);
        }

        Ok(true)
    }

    /// Calculate memory requirements for ELF64
    fn calculate_elf64_memory_requirements(&self, header: &elf64::ElfHeader, data: &[u8]) -> Result<usize> {
        let program_header_offset = header.program_header_offset as usize;
        let program_header_count = header.program_header_count as usize;
        let program_header_size = header.program_header_size as usize;

        if program_header_count == 0 {
            return Err(BootError::InvalidKernelFormat);
        }

        let mut lowest_addr = usize::MAX;
        let mut highest_addr = 0;

        for i in 0..program_header_count {
            let phdr_offset = program_header_offset + i * program_header_size;

            if phdr_offset + core::mem::size_of::<elf64::ProgramHeader>() > data.len() {
                return Err(BootError::InvalidKernelFormat);
            }

            let phdr = unsafe {
                &*(data.as_ptr().add(phdr_offset) as *const elf64::ProgramHeader)
            };

            // Only consider loadable segments
            if phdr.segment_type == 1 { // PT_LOAD
                let segment_start = phdr.virtual_address as usize;
                let segment_end = segment_start + phdr.memory_size as usize;

                lowest_addr = lowest_addr.min(segment_start);
                highest_addr = highest_addr.max(segment_end);
            }
        }

        if lowest_addr == usize::MAX {
            return Err(BootError::InvalidKernelFormat);
        }

        Ok(highest_addr - lowest_addr)
    }

    /// Load ELF64 segments
    fn load_elf64_segments(&self, header: &elf64::ElfHeader, data: &[u8], load_address: usize) -> Result<usize> {
        let program_header_offset = header.program_header_offset as usize;
        let program_header_count = header.program_header_count as usize;
        let program_header_size = header.program_header_size as usize;

        let mut entry_point = header.entry_point as usize;

        for i in 0..program_header_count {
            let phdr_offset = program_header_offset + i * program_header_size;

            let phdr = unsafe {
                &*(data.as_ptr().add(phdr_offset) as *const elf64::ProgramHeader)
            };

            // Load loadable segments
            if phdr.segment_type == 1 { // PT_LOAD
                let segment_dest = load_address + (phdr.virtual_address as usize);
                let segment_file_offset = phdr.offset as usize;
                let segment_file_size = phdr.file_size as usize;
                let segment_memory_size = phdr.memory_size as usize;

                if segment_file_offset + segment_file_size > data.len() {
                    return Err(BootError::InvalidKernelFormat);
                }

                // Copy segment data
                unsafe {
                    ptr::copy_nonoverlapping(
                        data.as_ptr().add(segment_file_offset),
                        segment_dest as *mut u8,
                        segment_file_size,
                    );

                    // Zero-fill remaining memory if memory_size > file_size
                    if segment_memory_size > segment_file_size {
                        ptr::write_bytes(
                            segment_dest.add(segment_file_size) as *mut u8,
                            0,
                            segment_memory_size - segment_file_size,
                        );
                    }
                }
            }
        }

        // Adjust entry point relative to load address
        if entry_point != 0 {
            // Find the lowest virtual address in the ELF
            let mut lowest_vaddr = usize::MAX;
            for i in 0..program_header_count {
                let phdr_offset = program_header_offset + i * program_header_size;
                let phdr = unsafe {
                    &*(data.as_ptr().add(phdr_offset) as *const elf64::ProgramHeader)
                };

                if phdr.segment_type == 1 && phdr.virtual_address != 0 {
                    lowest_vaddr = lowest_vaddr.min(phdr.virtual_address as usize);
                }
            }

            if lowest_vaddr != usize::MAX {
                entry_point = load_address + (entry_point - lowest_vaddr);
            }
        }

        Ok(entry_point)
    }

    /// Get the currently loaded kernel image
    pub fn get_kernel_image(&self) -> Option<&KernelImage> {
        self.kernel_image.as_ref()
    }
}

/// Boot parameters preparation
pub struct BootParameters {
    boot_info: BootInfo,
    kernel_image: KernelImage,
}

impl BootParameters {
    /// Create new boot parameters
    pub fn new(boot_info: &BootInfo, kernel_image: &KernelImage) -> crate::arch::BootParameters {
        let mut params = crate::arch::BootParameters::new(boot_info, kernel_image);

        // Set up memory map information
        // In a real implementation, we'd convert the bootloader's memory map
        // to the format expected by the kernel
        // For now, leave these as 0 and they'll be filled in by architecture code

        params
    }

    /// Get the boot parameters structure
    pub fn into_struct(self) -> crate::arch::BootParameters {
        let BootParameters { boot_info, kernel_image } = self;

        let mut params = crate::arch::BootParameters::new(&boot_info, &kernel_image);

        // Additional setup could be done here
        params
    }
}

/// ELF64 structure definitions (simplified)
pub mod elf64 {
    #[repr(C)]
    #[derive(Debug)]
    pub struct ElfHeader {
        pub magic: [u8; 4],
        pub class: u8,
        pub data: u8,
        pub version: u8,
        pub os_abi: u8,
        pub abi_version: u8,
        pub padding: [u8; 7],
        pub file_type: u16,
        pub machine: u16,
        pub version2: u32,
        pub entry_point: u64,
        pub program_header_offset: u64,
        pub section_header_offset: u64,
        pub flags: u32,
        pub header_size: u16,
        pub program_header_size: u16,
        pub program_header_count: u16,
        pub section_header_size: u16,
        pub section_header_count: u16,
        pub section_header_string_index: u16,
    }

    #[repr(C)]
    #[derive(Debug)]
    pub struct ProgramHeader {
        pub segment_type: u32,
        pub flags: u32,
        pub file_offset: u64,
        pub virtual_address: u64,
        pub physical_address: u64,
        pub file_size: u64,
        pub memory_size: u64,
        pub alignment: u64,
    }

    #[repr(C)]
    #[derive(Debug)]
    pub struct SectionHeader {
        pub name_offset: u32,
        pub section_type: u32,
        pub flags: u64,
        pub virtual_address: u64,
        pub file_offset: u64,
        pub size: u64,
        pub link: u32,
        pub info: u32,
        pub address_alignment: u64,
        pub entry_size: u64,
    }
}

/// Kernel validation utilities
pub mod validation {
    use crate::error::{BootError, Result};
    use crate::protocol::KernelImage;

    /// Validate kernel image
    pub fn validate_kernel_image(image: &KernelImage) -> Result<()> {
        if image.data.is_empty() {
            return Err(BootError::KernelNotFound);
        }

        if image.entry_point == 0 {
            return Err(BootError::InvalidKernelFormat);
        }

        if image.entry_point < image.load_address {
            return Err(BootError::InvalidKernelFormat);
        }

        if image.entry_point >= image.load_address + image.size {
            return Err(BootError::InvalidKernelFormat);
        }

        // Additional validation could be added here:
        // - Check for valid instruction patterns at entry point
        // - Validate ELF structure if applicable
        // - Check for required kernel symbols

        Ok(())
    }

    /// Check if kernel is compatible with current architecture
    pub fn check_architecture_compatibility(image: &KernelImage) -> Result<()> {
        #[cfg(target_arch = "x86_64")]
        {
            // Check for x86_64 specific requirements
            // This could involve checking ELF machine type, etc.
        }

        #[cfg(target_arch = "aarch64")]
        {
            // Check for AArch64 specific requirements
        }

        #[cfg(target_arch = "riscv64")]
        {
            // Check for RISC-V specific requirements
        }

        Ok(())
    }
}