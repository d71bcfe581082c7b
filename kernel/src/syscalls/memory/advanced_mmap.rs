//! Advanced Memory Mapping Implementation
//!
//! This module provides advanced memory mapping functionality including:
//! - Memory advice (madvise)
//! - Memory locking (mlock/munlock)
//! - Page residency information (mincore)
//! - Remapped file pages (remap_file_pages)

use crate::syscalls::common::{SyscallError, SyscallResult};

/// Advanced memory mapping implementation placeholder
pub struct AdvancedMmap;

impl AdvancedMmap {
    /// Create a new advanced mmap instance
    pub fn new() -> Self {
        Self
    }
}

impl Default for AdvancedMmap {
    fn default() -> Self {
        Self::new()
    }
}

/// System call for madvise - give advice about use of memory
/// 
/// Arguments: [addr, length, advice]
/// Returns: 0 on success, error on failure
pub fn sys_madvise(args: &[u64]) -> SyscallResult {
    if args.len() < 3 {
        return Err(SyscallError::InvalidArgument);
    }
    
    let _addr = args[0] as usize;
    let _length = args[1] as usize;
    let _advice = args[2] as i32;
    
    // TODO: Implement actual madvise functionality
    crate::println!("[madvise] Placeholder implementation");
    Ok(0)
}

/// System call for mlock - lock memory in RAM
/// 
/// Arguments: [addr, length]
/// Returns: 0 on success, error on failure
pub fn sys_mlock(args: &[u64]) -> SyscallResult {
    if args.len() < 2 {
        return Err(SyscallError::InvalidArgument);
    }
    
    let _addr = args[0] as usize;
    let _length = args[1] as usize;
    
    // TODO: Implement actual mlock functionality
    crate::println!("[mlock] Placeholder implementation");
    Ok(0)
}

/// System call for munlock - unlock memory
/// 
/// Arguments: [addr, length]
/// Returns: 0 on success, error on failure
pub fn sys_munlock(args: &[u64]) -> SyscallResult {
    if args.len() < 2 {
        return Err(SyscallError::InvalidArgument);
    }
    
    let _addr = args[0] as usize;
    let _length = args[1] as usize;
    
    // TODO: Implement actual munlock functionality
    crate::println!("[munlock] Placeholder implementation");
    Ok(0)
}

/// System call for mlockall - lock all memory
/// 
/// Arguments: [flags]
/// Returns: 0 on success, error on failure
pub fn sys_mlockall(args: &[u64]) -> SyscallResult {
    if args.len() < 1 {
        return Err(SyscallError::InvalidArgument);
    }
    
    let _flags = args[0] as i32;
    
    // TODO: Implement actual mlockall functionality
    crate::println!("[mlockall] Placeholder implementation");
    Ok(0)
}

/// System call for munlockall - unlock all memory
/// 
/// Arguments: []
/// Returns: 0 on success, error on failure
pub fn sys_munlockall(_args: &[u64]) -> SyscallResult {
    // TODO: Implement actual munlockall functionality
    crate::println!("[munlockall] Placeholder implementation");
    Ok(0)
}

/// System call for mincore - determine page residency
/// 
/// Arguments: [addr, length, vec]
/// Returns: 0 on success, error on failure
pub fn sys_mincore(args: &[u64]) -> SyscallResult {
    if args.len() < 3 {
        return Err(SyscallError::InvalidArgument);
    }
    
    let _addr = args[0] as usize;
    let _length = args[1] as usize;
    let _vec = args[2] as usize;
    
    // TODO: Implement actual mincore functionality
    crate::println!("[mincore] Placeholder implementation");
    Ok(0)
}

/// System call for remap_file_pages - remap file pages
/// 
/// Arguments: [addr, size, prot, pgoff, flags]
/// Returns: 0 on success, error on failure
pub fn sys_remap_file_pages(args: &[u64]) -> SyscallResult {
    if args.len() < 5 {
        return Err(SyscallError::InvalidArgument);
    }
    
    let _addr = args[0] as usize;
    let _size = args[1] as usize;
    let _prot = args[2] as i32;
    let _pgoff = args[3] as u64;
    let _flags = args[4] as i32;
    
    // TODO: Implement actual remap_file_pages functionality
    crate::println!("[remap_file_pages] Placeholder implementation");
    Ok(0)
}

/// Advanced mmap implementation
/// 
/// Arguments: [addr, length, prot, flags, fd, offset]
/// Returns: mapped address on success, error on failure
pub fn sys_mmap_advanced(args: &[u64]) -> SyscallResult {
    if args.len() < 6 {
        return Err(SyscallError::InvalidArgument);
    }
    
    let _addr = args[0] as usize;
    let _length = args[1] as usize;
    let _prot = args[2] as i32;
    let _flags = args[3] as i32;
    let _fd = args[4] as i32;
    let _offset = args[5] as u64;
    
    // TODO: Implement actual advanced mmap functionality
    crate::println!("[mmap_advanced] Placeholder implementation");
    Ok(0)
}

/// Initialize the advanced memory mapping subsystem
pub fn init() -> Result<(), crate::error_handling::unified::KernelError> {
    crate::println!("[advanced_mmap] Initializing advanced memory mapping subsystem");
    Ok(())
}