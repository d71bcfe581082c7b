//! Architecture-specific module

use nos_api::Result;

/// Initialize architecture-specific code
pub fn initialize() -> Result<()> {
    // Initialize architecture-specific code
    Ok(())
}

/// Shutdown architecture-specific code
pub fn shutdown() -> Result<()> {
    // Shutdown architecture-specific code
    Ok(())
}