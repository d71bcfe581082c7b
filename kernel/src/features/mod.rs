//! Kernel Features Control
//!
//! This module provides centralized control over kernel features
//! and feature combinations.

extern crate alloc;

use alloc::string::String;
use alloc::vec::Vec;

/// Initialize features subsystem
pub fn init() -> crate::error::UnifiedResult<()> {
    crate::log_info!("Features subsystem initialized");
    Ok(())
}

/// Shutdown features subsystem
pub fn shutdown() -> crate::error::UnifiedResult<()> {
    crate::log_info!("Features subsystem shutdown");
    Ok(())
}

/// Kernel feature flags
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KernelFeatures {
    /// Enable kernel tests
    pub kernel_tests: bool,
    /// Enable bare-metal boot
    pub baremetal: bool,
    /// Enable system calls
    pub syscalls: bool,
    /// Enable networking
    pub networking: bool,
    /// Enable security features
    pub security: bool,
    /// Enable cloud-native features
    pub cloud_native: bool,
    /// Enable monitoring
    pub monitoring: bool,
    /// Enable formal verification
    pub formal_verification: bool,
    /// Enable web engine
    pub web_engine: bool,
}

impl KernelFeatures {
    /// Create a new feature set with default values
    pub const fn new() -> Self {
        Self {
            kernel_tests: cfg!(feature = "kernel_tests"),
            baremetal: cfg!(feature = "baremetal"),
            syscalls: cfg!(feature = "syscalls"),
            networking: cfg!(feature = "networking"),
            security: cfg!(feature = "security"),
            cloud_native: cfg!(feature = "cloud_native"),
            monitoring: cfg!(feature = "monitoring"),
            formal_verification: cfg!(feature = "formal_verification"),
            web_engine: cfg!(feature = "web_engine"),
        }
    }
    
    /// Create a minimal feature set
    pub const fn minimal() -> Self {
        Self {
            kernel_tests: false,
            baremetal: true,
            syscalls: true,
            networking: false,
            security: false,
            cloud_native: false,
            monitoring: false,
            formal_verification: false,
            web_engine: false,
        }
    }
    
    /// Create a standard feature set
    pub const fn standard() -> Self {
        Self {
            kernel_tests: false,
            baremetal: false,
            syscalls: true,
            networking: true,
            security: true,
            cloud_native: false,
            monitoring: true,
            formal_verification: false,
            web_engine: false,
        }
    }
    
    /// Create a full feature set
    pub const fn full() -> Self {
        Self {
            kernel_tests: true,
            baremetal: false,
            syscalls: true,
            networking: true,
            security: true,
            cloud_native: true,
            monitoring: true,
            formal_verification: true,
            web_engine: true,
        }
    }
    
    /// Check if a specific feature is enabled
    pub fn is_enabled(&self, feature: Feature) -> bool {
        match feature {
            Feature::KernelTests => self.kernel_tests,
            Feature::Baremetal => self.baremetal,
            Feature::Syscalls => self.syscalls,
            Feature::Networking => self.networking,
            Feature::Security => self.security,
            Feature::CloudNative => self.cloud_native,
            Feature::Monitoring => self.monitoring,
            Feature::FormalVerification => self.formal_verification,
            Feature::WebEngine => self.web_engine,
        }
    }
    
    /// Enable a specific feature
    pub fn enable(&mut self, feature: Feature) {
        match feature {
            Feature::KernelTests => self.kernel_tests = true,
            Feature::Baremetal => self.baremetal = true,
            Feature::Syscalls => self.syscalls = true,
            Feature::Networking => self.networking = true,
            Feature::Security => self.security = true,
            Feature::CloudNative => self.cloud_native = true,
            Feature::Monitoring => self.monitoring = true,
            Feature::FormalVerification => self.formal_verification = true,
            Feature::WebEngine => self.web_engine = true,
        }
    }
    
    /// Disable a specific feature
    pub fn disable(&mut self, feature: Feature) {
        match feature {
            Feature::KernelTests => self.kernel_tests = false,
            Feature::Baremetal => self.baremetal = false,
            Feature::Syscalls => self.syscalls = false,
            Feature::Networking => self.networking = false,
            Feature::Security => self.security = false,
            Feature::CloudNative => self.cloud_native = false,
            Feature::Monitoring => self.monitoring = false,
            Feature::FormalVerification => self.formal_verification = false,
            Feature::WebEngine => self.web_engine = false,
        }
    }
    
    /// Get a list of enabled features
    pub fn enabled_features(&self) -> Vec<Feature> {
        let mut features = Vec::new();
        
        if self.kernel_tests {
            features.push(Feature::KernelTests);
        }
        if self.baremetal {
            features.push(Feature::Baremetal);
        }
        if self.syscalls {
            features.push(Feature::Syscalls);
        }
        if self.networking {
            features.push(Feature::Networking);
        }
        if self.security {
            features.push(Feature::Security);
        }
        if self.cloud_native {
            features.push(Feature::CloudNative);
        }
        if self.monitoring {
            features.push(Feature::Monitoring);
        }
        if self.formal_verification {
            features.push(Feature::FormalVerification);
        }
        if self.web_engine {
            features.push(Feature::WebEngine);
        }
        
        features
    }
    
    /// Check if this feature set is valid
    pub fn is_valid(&self) -> bool {
        // Check for invalid feature combinations
        if self.cloud_native && !self.syscalls {
            return false; // Cloud-native features require syscalls
        }
        if self.web_engine && !self.networking {
            return false; // Web engine requires networking
        }
        if self.formal_verification && !self.kernel_tests {
            return false; // Formal verification requires kernel tests
        }
        
        true
    }
    
    /// Get the memory footprint of this feature set
    pub fn memory_footprint(&self) -> usize {
        let mut footprint = 0;
        
        if self.kernel_tests {
            footprint += 1024 * 1024; // 1MB for tests
        }
        if self.baremetal {
            footprint += 512 * 1024; // 512KB for bare-metal support
        }
        if self.syscalls {
            footprint += 2 * 1024 * 1024; // 2MB for syscalls
        }
        if self.networking {
            footprint += 4 * 1024 * 1024; // 4MB for networking
        }
        if self.security {
            footprint += 2 * 1024 * 1024; // 2MB for security
        }
        if self.cloud_native {
            footprint += 3 * 1024 * 1024; // 3MB for cloud-native
        }
        if self.monitoring {
            footprint += 1 * 1024 * 1024; // 1MB for monitoring
        }
        if self.formal_verification {
            footprint += 5 * 1024 * 1024; // 5MB for formal verification
        }
        if self.web_engine {
            footprint += 6 * 1024 * 1024; // 6MB for web engine
        }
        
        footprint
    }
}

/// Individual kernel feature
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Feature {
    /// Kernel tests
    KernelTests,
    /// Bare-metal boot
    Baremetal,
    /// System calls
    Syscalls,
    /// Networking
    Networking,
    /// Security features
    Security,
    /// Cloud-native features
    CloudNative,
    /// Monitoring and profiling
    Monitoring,
    /// Formal verification
    FormalVerification,
    /// Web engine
    WebEngine,
}

impl Feature {
    /// Get the name of the feature
    pub fn name(&self) -> &'static str {
        match self {
            Feature::KernelTests => "kernel_tests",
            Feature::Baremetal => "baremetal",
            Feature::Syscalls => "syscalls",
            Feature::Networking => "networking",
            Feature::Security => "security",
            Feature::CloudNative => "cloud_native",
            Feature::Monitoring => "monitoring",
            Feature::FormalVerification => "formal_verification",
            Feature::WebEngine => "web_engine",
        }
    }
    
    /// Get the description of the feature
    pub fn description(&self) -> &'static str {
        match self {
            Feature::KernelTests => "Kernel test framework and test cases",
            Feature::Baremetal => "Bare-metal boot support (no bootloader)",
            Feature::Syscalls => "System call interface and dispatch mechanism",
            Feature::Networking => "Network stack and socket interface",
            Feature::Security => "Security mechanisms (ASLR, SMAP/SMEP, ACL, Capabilities)",
            Feature::CloudNative => "Cloud-native features and container support",
            Feature::Monitoring => "Performance monitoring and profiling",
            Feature::FormalVerification => "Formal verification and static analysis",
            Feature::WebEngine => "Web engine and browser support",
        }
    }
    
    /// Get the dependencies of the feature
    pub fn dependencies(&self) -> Vec<Feature> {
        match self {
            Feature::KernelTests => Vec::new(),
            Feature::Baremetal => Vec::new(),
            Feature::Syscalls => Vec::new(),
            Feature::Networking => Vec::new(),
            Feature::Security => Vec::new(),
            Feature::CloudNative => vec![Feature::Syscalls],
            Feature::Monitoring => Vec::new(),
            Feature::FormalVerification => vec![Feature::KernelTests],
            Feature::WebEngine => vec![Feature::Networking],
        }
    }
    
    /// Check if this feature conflicts with another feature
    pub fn conflicts_with(&self, other: &Feature) -> bool {
        match (self, other) {
            // No direct conflicts currently defined
            _ => false,
        }
    }
}

/// Feature configuration
#[derive(Debug, Clone)]
pub struct FeatureConfig {
    /// Feature set
    pub features: KernelFeatures,
    /// Configuration name
    pub name: String,
    /// Configuration description
    pub description: String,
}

impl FeatureConfig {
    /// Create a new feature configuration
    pub fn new(name: &str, description: &str, features: KernelFeatures) -> Self {
        Self {
            features,
            name: name.to_string(),
            description: description.to_string(),
        }
    }
    
    /// Get predefined configurations
    pub fn predefined() -> Vec<FeatureConfig> {
        vec![
            FeatureConfig::new(
                "minimal",
                "Minimal kernel with only essential features",
                KernelFeatures::minimal(),
            ),
            FeatureConfig::new(
                "standard",
                "Standard kernel with common features",
                KernelFeatures::standard(),
            ),
            FeatureConfig::new(
                "full",
                "Full kernel with all features enabled",
                KernelFeatures::full(),
            ),
            FeatureConfig::new(
                "server",
                "Server-oriented kernel with networking and security",
                KernelFeatures {
                    kernel_tests: false,
                    baremetal: false,
                    syscalls: true,
                    networking: true,
                    security: true,
                    cloud_native: false,
                    monitoring: true,
                    formal_verification: false,
                    web_engine: false,
                },
            ),
            FeatureConfig::new(
                "embedded",
                "Embedded kernel with minimal footprint",
                KernelFeatures {
                    kernel_tests: false,
                    baremetal: true,
                    syscalls: true,
                    networking: false,
                    security: false,
                    cloud_native: false,
                    monitoring: false,
                    formal_verification: false,
                    web_engine: false,
                },
            ),
            FeatureConfig::new(
                "cloud",
                "Cloud-native kernel with container support",
                KernelFeatures {
                    kernel_tests: false,
                    baremetal: false,
                    syscalls: true,
                    networking: true,
                    security: true,
                    cloud_native: true,
                    monitoring: true,
                    formal_verification: false,
                    web_engine: false,
                },
            ),
        ]
    }
}

/// Global feature configuration
static mut CURRENT_FEATURES: KernelFeatures = KernelFeatures::new();
static FEATURES_INIT: core::sync::atomic::AtomicBool = core::sync::atomic::AtomicBool::new(false);

/// Get the current feature configuration
pub fn get_current_features() -> &'static KernelFeatures {
    unsafe {
        if !FEATURES_INIT.load(core::sync::atomic::Ordering::Acquire) {
            CURRENT_FEATURES = KernelFeatures::new();
            FEATURES_INIT.store(true, core::sync::atomic::Ordering::Release);
        }
        &CURRENT_FEATURES
    }
}

/// Set the current feature configuration
pub fn set_features(features: KernelFeatures) -> crate::error::UnifiedResult<()> {
    if !features.is_valid() {
        return Err(crate::error::UnifiedError::InvalidArgument);
    }
    
    unsafe {
        CURRENT_FEATURES = features;
        FEATURES_INIT.store(true, core::sync::atomic::Ordering::Release);
    }
    
    crate::log_info!("Kernel features updated: {:?}", features);
    Ok(())
}

/// Check if a specific feature is enabled
pub fn is_feature_enabled(feature: Feature) -> bool {
    get_current_features().is_enabled(feature)
}

/// Load features from configuration
pub fn load_from_config(config: &FeatureConfig) -> crate::error::UnifiedResult<()> {
    set_features(config.features.clone())?;
    crate::log_info!("Loaded feature configuration: {}", config.name);
    Ok(())
}