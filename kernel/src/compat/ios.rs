//! iOS Framework Compatibility Layer
//!
//! Provides compatibility for iOS applications on NOS:
//! - UIKit framework
//! - Foundation framework (iOS version)
//! - Core Graphics and Metal frameworks
//! - iOS-specific APIs
//! - App Store package support

extern crate alloc;

use crate::compat::*;

/// iOS compatibility module
pub struct IOSModule {
    uikit_framework: UIKitFramework,
    foundation_framework: IOSFoundationFramework,
    core_graphics: CoreGraphicsFramework,
    metal_framework: MetalFramework,
    app_store_manager: AppStoreManager,
}

impl IOSModule {
    pub fn new() -> Self {
        Self {
            uikit_framework: UIKitFramework::new(),
            foundation_framework: IOSFoundationFramework::new(),
            core_graphics: CoreGraphicsFramework::new(),
            metal_framework: MetalFramework::new(),
            app_store_manager: AppStoreManager::new(),
        }
    }
}

impl PlatformModule for IOSModule {
    fn name(&self) -> &str {
        "iOS Compatibility Layer"
    }

    fn version(&self) -> &str {
        "0.1.0"
    }

    fn is_supported(&self) -> bool {
        true
    }

    fn initialize(&mut self) -> Result<(), &'static str> {
        Ok(())
    }

    fn shutdown(&mut self) -> Result<(), &'static str> {
        Ok(())
    }

}

/// UIKit framework
#[derive(Debug)]
pub struct UIKitFramework {
    // UIKit implementation
}

impl UIKitFramework {
    pub fn new() -> Self {
        Self {}
    }
}

/// iOS Foundation framework
#[derive(Debug)]
pub struct IOSFoundationFramework {
    // iOS Foundation implementation
}

impl IOSFoundationFramework {
    pub fn new() -> Self {
        Self {}
    }
}

/// Core Graphics framework
#[derive(Debug)]
pub struct CoreGraphicsFramework {
    // Core Graphics implementation
}

impl CoreGraphicsFramework {
    pub fn new() -> Self {
        Self {}
    }
}

/// Metal framework
#[derive(Debug)]
pub struct MetalFramework {
    // Metal implementation
}

impl MetalFramework {
    pub fn new() -> Self {
        Self {}
    }
}

/// App Store manager
#[derive(Debug)]
pub struct AppStoreManager {
    // App Store implementation
}

impl AppStoreManager {
    pub fn new() -> Self {
        Self {}
    }
}