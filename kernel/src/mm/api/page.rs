//! mm模块页面管理公共接口
//! 
//! 提供页面级别的内存管理功能

use super::{AllocError, PhysicalError, PhysicalPage};

/// Get page size
/// 
/// # Return
/// * `usize` - System page size
pub fn get_page_size() -> usize {
    // Default x86_64 page size
    4096
}

/// Allocate pages
/// 
/// # Contract
/// * Allocated pages must be continuous
/// * Must track allocated pages
/// * Handle out of memory situation
/// * Support page reclaim mechanism
pub fn allocate_pages(count: usize) -> Result<*mut [u8], AllocError> {
    // TODO: Implement this function
    Err(AllocError::OutOfMemory)
}

/// Free pages
/// 
/// # Contract
/// * Can only free previously allocated pages
/// * Must update allocation status
/// * Support batch free
/// * Handle double free
pub fn free_pages(pages: *mut [u8], count: usize) -> Result<(), AllocError> {
    // TODO: Implement this function
    Ok(())
}

/// Allocate physical pages
/// 
/// # Contract
/// * Allocated pages must be continuous
/// * Must track allocated pages
/// * Handle out of memory situation
/// * Support page reclaim mechanism
pub fn allocate_physical_pages(count: usize) -> Result<PhysicalPage, PhysicalError> {
    // TODO: Implement this function
    Err(PhysicalError::OutOfMemory)
}

/// Free physical pages
/// 
/// # Contract
/// * Can only free previously allocated pages
/// * Must update allocation status
/// * Support batch free
/// * Handle double free
pub fn free_physical_pages(page: PhysicalPage) -> Result<(), PhysicalError> {
    // TODO: Implement this function
    Ok(())
}