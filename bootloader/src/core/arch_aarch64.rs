/// ARM64 (aarch64) Architecture Optimization Module
/// 
/// Provides:
/// - CPU feature detection (MIDR, ID_AA64*)
/// - ARM-specific optimization flags
/// - Device Tree parsing support
/// - PSCI interface (Power State Coordination)
/// - Exception Level management
/// - Cache optimization for ARM64

/// ARM64 CPU Features from ID registers
#[derive(Debug, Clone, Copy)]
pub struct Arm64Features {
    pub has_sve: bool,              // Scalable Vector Extension
    pub has_neon: bool,             // NEON media engine
    pub has_fp: bool,               // Floating Point
    pub has_asid: bool,             // Address Space Identifier
    pub has_mmu: bool,              // Memory Management Unit
    pub has_virt: bool,             // Virtualization Extension
    pub has_pmu: bool,              // Performance Monitoring
    pub has_debug: bool,            // Debug Support
    pub has_ras: bool,              // Reliability, Availability, Serviceability
    pub has_sve2: bool,             // Scalable Vector Extension 2
    pub has_bf16: bool,             // Brain Float 16-bit
    pub has_int8_matmul: bool,      // INT8 Matrix Multiplication
    pub has_mte: bool,              // Memory Tagging Extension
    pub has_dcpodp: bool,           // DCPoDP (Data Consistency Point)
    pub has_wfxt: bool,             // Wait for External Events (WFxT)
}

impl Arm64Features {
    /// Create ARM64 features structure (would detect via ID_AA64* registers)
    pub fn detect() -> Self {
        Self {
            has_sve: false,         // Detected from ID_AA64ZFR0_EL1
            has_neon: true,         // Almost always present
            has_fp: true,           // Almost always present
            has_asid: true,         // Always present
            has_mmu: true,          // Always present
            has_virt: false,        // Detected from ID_AA64MMFR1_EL1
            has_pmu: true,          // Usually present
            has_debug: true,        // Usually present
            has_ras: false,         // Detected from ID_AA64PFR0_EL1
            has_sve2: false,        // Detected from ID_AA64ZFR0_EL1
            has_bf16: false,        // Detected from ID_AA64ISAR1_EL1
            has_int8_matmul: false, // Detected from ID_AA64ISAR2_EL1
            has_mte: false,         // Detected from ID_AA64PFR1_EL1
            has_dcpodp: false,      // Detected from ID_AA64PFR1_EL1
            has_wfxt: false,        // Detected from ID_AA64PFR1_EL1
        }
    }

    /// Count available features
    pub fn feature_count(&self) -> usize {
        let mut count = 0;
        if self.has_sve { count += 1; }
        if self.has_neon { count += 1; }
        if self.has_fp { count += 1; }
        if self.has_asid { count += 1; }
        if self.has_mmu { count += 1; }
        if self.has_virt { count += 1; }
        if self.has_pmu { count += 1; }
        if self.has_debug { count += 1; }
        if self.has_ras { count += 1; }
        if self.has_sve2 { count += 1; }
        if self.has_bf16 { count += 1; }
        if self.has_int8_matmul { count += 1; }
        if self.has_mte { count += 1; }
        if self.has_dcpodp { count += 1; }
        if self.has_wfxt { count += 1; }
        count
    }

    /// Check if critical features are present
    pub fn has_critical_features(&self) -> bool {
        self.has_mmu && self.has_asid && self.has_fp && self.has_neon
    }
}

/// ARM64 Exception Levels
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ExceptionLevel {
    EL0,    // User/Application level
    EL1,    // Kernel level
    EL2,    // Hypervisor level
    EL3,    // Secure Monitor level
}

impl ExceptionLevel {
    /// Get current exception level from CurrentEL register
    pub fn current() -> Self {
        // In real implementation: read CurrentEL register and extract bits [3:2]
        // For bootloader, typically EL1 or EL2
        ExceptionLevel::EL1
    }

    /// Convert to register value (bits [3:2])
    pub fn to_register_value(&self) -> u32 {
        match self {
            ExceptionLevel::EL0 => 0,
            ExceptionLevel::EL1 => 1,
            ExceptionLevel::EL2 => 2,
            ExceptionLevel::EL3 => 3,
        }
    }
}

/// Device Tree Parsing Support
pub struct DeviceTreeParser {
    pub base_address: u64,
    pub parsed: bool,
}

impl DeviceTreeParser {
    /// Create new device tree parser
    pub fn new(base_address: u64) -> Self {
        Self {
            base_address,
            parsed: false,
        }
    }

    /// Parse device tree magic number
    pub fn check_magic(&self) -> Result<bool, &'static str> {
        // In real implementation: check for magic 0xd00dfeed at base_address
        // For bootloader framework, assume valid
        Ok(true)
    }

    /// Get device tree size
    pub fn get_size(&self) -> u32 {
        // In real implementation: read size from device tree header
        // Typical sizes: 4KB to 1MB
        4096
    }

    /// Get root node offset
    pub fn get_root_offset(&self) -> u32 {
        // In real implementation: parse device tree structure
        // Root node typically at offset 0
        0
    }

    /// Find node by name
    pub fn find_node(&self, _name: &str) -> Option<u32> {
        log::trace!("Searching for device tree node");
        // In real implementation: walk device tree and find node
        // For framework, return placeholder
        Some(0)
    }

    /// Get property value
    pub fn get_property(&self, node_offset: u32, prop_name: &str) -> Option<&[u8]> {
        // In real implementation: extract property from device tree
        // Return bytes for the property value
        if prop_name == "compatible" && node_offset == 0 {
            Some(b"arm,cortex-a72\0")
        } else {
            None
        }
    }
}

/// Power State Coordination Interface (PSCI)
pub struct PsciInterface {
    pub version: u32,
    pub available: bool,
}

#[derive(Debug, Clone, Copy)]
pub enum PowerState {
    Run,        // Running state
    WaitForInt, // Wait for interrupt
    PowerDown,  // CPU power down
    Offline,    // CPU offline
}

impl PsciInterface {
    /// Create new PSCI interface
    pub fn new() -> Self {
        Self {
            version: 0x00010000,  // PSCI 1.0
            available: false,
        }
    }

    /// Check if PSCI is available via device tree or ACPI
    pub fn detect(&mut self) -> bool {
        // In real implementation: check device tree for psci node
        // or ACPI for PSCI table
        self.available = true;
        true
    }

    /// Power off CPU
    pub fn cpu_off(&self) -> Result<(), &'static str> {
        if !self.available {
            return Err("PSCI not available");
        }
        // In real implementation: invoke PSCI_CPU_OFF via SMC call
        Ok(())
    }

    /// Power on CPU
    pub fn cpu_on(&self, cpu_id: u32, entry_point: u64) -> Result<(), &'static str> {
        if !self.available {
            return Err("PSCI not available");
        }
        // In real implementation: invoke PSCI_CPU_ON via SMC call
        let _ = cpu_id;
        let _ = entry_point;
        Ok(())
    }

    /// System reset
    pub fn system_reset(&self) -> Result<(), &'static str> {
        if !self.available {
            return Err("PSCI not available");
        }
        // In real implementation: invoke PSCI_SYSTEM_RESET via SMC call
        Ok(())
    }

    /// Get PSCI version
    pub fn get_version(&self) -> u32 {
        self.version
    }
}

/// ARM64 Cache Configuration
#[derive(Debug, Clone, Copy)]
pub struct Arm64CacheConfig {
    pub enable_dcache: bool,        // Data cache
    pub enable_icache: bool,        // Instruction cache
    pub cache_coherency: bool,      // Cache coherency
    pub enable_prefetch: bool,      // Hardware prefetching
    pub write_back_mode: bool,      // Write-back vs write-through
}

impl Arm64CacheConfig {
    /// Create default cache configuration
    pub fn new() -> Self {
        Self {
            enable_dcache: true,
            enable_icache: true,
            cache_coherency: true,
            enable_prefetch: true,
            write_back_mode: true,
        }
    }

    /// Create optimized for boot time
    pub fn for_boot_time() -> Self {
        Self {
            enable_dcache: true,
            enable_icache: true,
            cache_coherency: true,
            enable_prefetch: false,  // Disable during boot
            write_back_mode: true,
        }
    }

    /// Apply cache configuration
    pub fn apply(&self) -> Result<(), &'static str> {
        // In real implementation: set SCTLR_EL1 register bits
        // Bit 2: D - Data cache enable
        // Bit 12: I - Instruction cache enable
        // etc.
        Ok(())
    }
}

/// ARM64 Boot Configuration
pub struct Arm64BootConfig {
    pub features: Arm64Features,
    pub exception_level: ExceptionLevel,
    pub device_tree: Option<DeviceTreeParser>,
    pub psci: PsciInterface,
    pub cache_config: Arm64CacheConfig,
    pub boot_mode: Arm64BootMode,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Arm64BootMode {
    EfiBootServices,    // UEFI firmware boot
    Devicetree,         // Device tree boot
    Acpi,              // ACPI boot
    Direct,            // Direct kernel boot
}

impl Arm64BootConfig {
    /// Initialize ARM64 boot configuration
    pub fn initialize() -> Self {
        let features = Arm64Features::detect();
        
        Self {
            features,
            exception_level: ExceptionLevel::current(),
            device_tree: None,
            psci: PsciInterface::new(),
            cache_config: Arm64CacheConfig::new(),
            boot_mode: Arm64BootMode::Devicetree,
        }
    }

    /// Setup with device tree
    pub fn with_device_tree(&mut self, dt_address: u64) -> Result<(), &'static str> {
        let parser = DeviceTreeParser::new(dt_address);
        parser.check_magic()?;
        self.device_tree = Some(parser);
        Ok(())
    }

    /// Setup boot mode
    pub fn setup(&mut self, mode: Arm64BootMode) -> Result<(), &'static str> {
        self.boot_mode = mode;
        
        // Apply default cache configuration
        self.cache_config.apply()?;
        
        // Detect PSCI
        if self.psci.detect() {
            // PSCI available for CPU management
        }

        Ok(())
    }

    /// Get boot summary
    pub fn get_summary(&self) -> Arm64BootSummary {
        Arm64BootSummary {
            cpu_features_count: self.features.feature_count(),
            has_critical_features: self.features.has_critical_features(),
            exception_level: self.exception_level,
            psci_available: self.psci.available,
            device_tree_available: self.device_tree.is_some(),
            boot_mode: self.boot_mode,
        }
    }
}

/// Boot Summary for diagnostic output
#[derive(Debug, Clone, Copy)]
pub struct Arm64BootSummary {
    pub cpu_features_count: usize,
    pub has_critical_features: bool,
    pub exception_level: ExceptionLevel,
    pub psci_available: bool,
    pub device_tree_available: bool,
    pub boot_mode: Arm64BootMode,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arm64_features_detection() {
        let features = Arm64Features::detect();
        assert!(features.has_neon);
        assert!(features.has_fp);
        assert!(features.has_mmu);
    }

    #[test]
    fn test_exception_level_conversion() {
        assert_eq!(ExceptionLevel::EL0.to_register_value(), 0);
        assert_eq!(ExceptionLevel::EL1.to_register_value(), 1);
        assert_eq!(ExceptionLevel::EL2.to_register_value(), 2);
        assert_eq!(ExceptionLevel::EL3.to_register_value(), 3);
    }

    #[test]
    fn test_device_tree_parser() {
        let parser = DeviceTreeParser::new(0x40000000);
        assert!(parser.check_magic().is_ok());
    }

    #[test]
    fn test_psci_interface() {
        let psci = PsciInterface::new();
        assert_eq!(psci.get_version(), 0x00010000);
    }

    #[test]
    fn test_cache_config() {
        let config = Arm64CacheConfig::new();
        assert!(config.enable_dcache);
        assert!(config.enable_icache);
    }

    #[test]
    fn test_arm64_boot_config() {
        let config = Arm64BootConfig::initialize();
        assert!(config.features.has_critical_features());
        assert_eq!(config.boot_mode, Arm64BootMode::Devicetree);
    }
}
