//! Android Runtime Compatibility Layer
//!
//! Provides compatibility for Android applications on NOS:
//! - Bionic C library compatibility
//! - Dalvik/ART runtime
//! - Android framework APIs
//! - APK package support
//! - Android manifest processing

extern crate alloc;

use crate::compat::*;

/// Android compatibility module
pub struct AndroidModule {
    bionic_runtime: BionicRuntime,
    dalvik_vm: DalvikRuntime,
    android_framework: AndroidFramework,
    apk_manager: ApkManager,
}

impl AndroidModule {
    pub fn new() -> Self {
        Self {
            bionic_runtime: BionicRuntime::new(),
            dalvik_vm: DalvikRuntime::new(),
            android_framework: AndroidFramework::new(),
            apk_manager: ApkManager::new(),
        }
    }
}

impl PlatformModule for AndroidModule {
    fn name(&self) -> &str {
        "Android Compatibility Layer"
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

/// Bionic runtime (Android C library)
#[derive(Debug)]
pub struct BionicRuntime {
    // Bionic implementation
}

impl BionicRuntime {
    pub fn new() -> Self {
        Self {}
    }
}

/// Dalvik/ART runtime
#[derive(Debug)]
pub struct DalvikRuntime {
    // Dalvik/ART implementation
}

impl DalvikRuntime {
    pub fn new() -> Self {
        Self {}
    }
}

/// Android framework compatibility
#[derive(Debug)]
pub struct AndroidFramework {
    // Android framework implementation
}

impl AndroidFramework {
    pub fn new() -> Self {
        Self {}
    }
}

/// APK manager
#[derive(Debug)]
pub struct ApkManager {
    // APK implementation
}

impl ApkManager {
    pub fn new() -> Self {
        Self {}
    }
}