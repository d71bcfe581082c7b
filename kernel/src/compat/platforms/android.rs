//! Android Runtime Compatibility Layer
//!
//! Provides compatibility for Android applications on NOS:
//! - Bionic C library compatibility
//! - Dalvik/ART runtime
//! - Android framework APIs
//! - APK package support
//! - Android manifest processing

extern crate alloc;

use alloc::vec;
use alloc::string::ToString;
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
    fn platform(&self) -> TargetPlatform {
        TargetPlatform::Android
    }

    fn is_compatible(&self, info: &BinaryInfo) -> bool {
        matches!(info.platform, TargetPlatform::Android) &&
        (matches!(info.format, BinaryFormat::Apk) || matches!(info.format, BinaryFormat::Elf))
    }

    fn load_binary(&mut self, info: BinaryInfo) -> Result<LoadedBinary> {
        // Handle APK vs native binaries
        let memory_regions = if info.format == BinaryFormat::Apk {
            vec![
                MemoryRegion {
                    virtual_addr: 0x50000000,
                    physical_addr: None,
                    size: info.size,
                    permissions: MemoryPermissions::readonly(),
                    region_type: MemoryRegionType::MappedFile,
                },
            ]
        } else {
            vec![
                MemoryRegion {
                    virtual_addr: 0x400000,
                    physical_addr: None,
                    size: info.size,
                    permissions: MemoryPermissions::read_exec(),
                    region_type: MemoryRegionType::Code,
                },
            ]
        };

        let entry_point = info.entry_point;
        let format = info.format;
        Ok(LoadedBinary {
            info,
            memory_regions,
            entry_point: if format == BinaryFormat::Apk { 0 } else { 0x400000 + entry_point },
            platform_context: PlatformContext {
                platform: TargetPlatform::Android,
                data: PlatformData::Android(AndroidContext::default()),
            },
        })
    }

    fn create_context(&self, info: &BinaryInfo) -> Result<PlatformContext> {
        // Use info for validation/logging
        let _binary_arch = &info.architecture; // Use info to get binary architecture for validation
        Ok(PlatformContext {
            platform: TargetPlatform::Android,
            data: PlatformData::Android(AndroidContext {
                api_level: Some(30), // Android 11
                permissions: vec![
                    "android.permission.INTERNET".to_string(),
                    "android.permission.WRITE_EXTERNAL_STORAGE".to_string(),
                ],
                native_libs: vec![
                    "libnative-lib.so".to_string(),
                ],
            }),
        })
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