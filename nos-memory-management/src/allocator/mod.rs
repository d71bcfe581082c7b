//! Memory allocator module
//!
//! This module contains various memory allocator implementations.

pub mod buddy;
pub mod slab;
pub mod mempool;
pub mod tiered;

use nos_api::Result;

/// Initialize memory allocator
pub fn initialize() -> Result<()> {
    // Initialize memory allocator
    // In a real implementation, we would initialize the global allocator here
    Ok(())
}

/// Shutdown memory allocator
pub fn shutdown() -> Result<()> {
    // Shutdown memory allocator
    Ok(())
}
