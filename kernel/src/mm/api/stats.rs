//! mm模块内存统计公共接口
//! 
//! 提供内存使用统计和监控功能

use super::{MemoryStats, AllocatorStats, PhysicalMemoryStats};

/// Get memory usage statistics
/// 
/// # Return
/// * `MemoryStats` - Memory statistics information
pub fn get_memory_stats() -> MemoryStats {
    // TODO: Implement this function
    MemoryStats::default()
}

/// Get allocator statistics
/// 
/// # Return
/// * `AllocatorStats` - Allocator statistics information
pub fn get_allocator_stats() -> AllocatorStats {
    // TODO: Implement this function
    AllocatorStats::default()
}

/// Get physical memory statistics
pub fn get_physical_memory_stats() -> PhysicalMemoryStats {
    // TODO: Implement this function
    PhysicalMemoryStats::default()
}

/// Reset statistics information
pub fn reset_stats() {
    // TODO: Implement this function
}