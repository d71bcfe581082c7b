//! Synchronization primitives module

use nos_api::Result;

/// Initialize synchronization primitives
pub fn initialize() -> Result<()> {
    // Initialize synchronization primitives
    Ok(())
}

/// Shutdown synchronization primitives
pub fn shutdown() -> Result<()> {
    // Shutdown synchronization primitives
    Ok(())
}

/// Simple spinlock implementation
pub struct SpinLock {
    locked: bool,
}

impl SpinLock {
    /// Create a new spinlock
    pub const fn new() -> Self {
        Self { locked: false }
    }
    
    /// Acquire the lock
    pub fn lock(&self) {
        // Simple spinlock implementation
        while self.locked {
            // Spin
        }
    }
    
    /// Release the lock
    pub fn unlock(&self) {
        // Release the lock
    }
}