/// RISC-V 64-bit (riscv64) Architecture Module
/// 
/// Provides:
/// - RISC-V extensions detection
/// - SBI (Supervisor Binary Interface) support
/// - Privilege levels management
/// - Physical Memory Protection (PMP)
/// - Memory modes (Sv39, Sv48)
/// - Hart (Hardware Thread) management

/// RISC-V Extensions Detection
#[derive(Debug, Clone, Copy)]
pub struct RiscV64Extensions {
    pub has_i: bool,            // Base integer ISA
    pub has_m: bool,            // Integer multiply/divide
    pub has_a: bool,            // Atomic instructions
    pub has_f: bool,            // Floating-point (32-bit)
    pub has_d: bool,            // Floating-point (64-bit)
    pub has_q: bool,            // Floating-point (128-bit)
    pub has_l: bool,            // Decimal floating-point
    pub has_c: bool,            // Compressed instructions
    pub has_b: bool,            // Bit manipulation
    pub has_k: bool,            // Cryptographic extensions
    pub has_p: bool,            // Packed SIMD
    pub has_j: bool,            // Dynamically translated languages
    pub has_v: bool,            // Vector extension
    pub has_zicsr: bool,        // Control/Status Register
    pub has_zifencei: bool,     // Fence instruction
    pub has_svpbmt: bool,       // Page-Based Memory Types
    pub has_svinval: bool,      // TLB invalidate extension
}

impl RiscV64Extensions {
    /// Create RISC-V extensions structure
    pub fn detect() -> Self {
        // In real implementation: read misa register
        Self {
            has_i: true,        // Always present
            has_m: true,        // Usually present
            has_a: false,       // Varies by platform
            has_f: false,       // Varies by platform
            has_d: false,       // Varies by platform
            has_q: false,       // Not common
            has_l: false,       // Rarely used
            has_c: false,       // Varies by platform
            has_b: false,       // Recent extension
            has_k: false,       // Optional
            has_p: false,       // Optional
            has_j: false,       // Optional
            has_v: false,       // Recent extension
            has_zicsr: true,    // Usually present
            has_zifencei: true, // Usually present
            has_svpbmt: false,  // Recent extension
            has_svinval: false, // Recent extension
        }
    }

    /// Get ISA string (e.g., "rv64imafd")
    pub fn get_isa_string(&self) -> &'static str {
        // Simplified - real implementation would build dynamic string
        if self.has_d {
            "rv64imafd"
        } else if self.has_f {
            "rv64imaf"
        } else {
            "rv64im"
        }
    }

    /// Count available extensions
    pub fn extension_count(&self) -> usize {
        let mut count = 0;
        if self.has_i { count += 1; }
        if self.has_m { count += 1; }
        if self.has_a { count += 1; }
        if self.has_f { count += 1; }
        if self.has_d { count += 1; }
        if self.has_q { count += 1; }
        if self.has_l { count += 1; }
        if self.has_c { count += 1; }
        if self.has_b { count += 1; }
        if self.has_k { count += 1; }
        if self.has_p { count += 1; }
        if self.has_j { count += 1; }
        if self.has_v { count += 1; }
        if self.has_zicsr { count += 1; }
        if self.has_zifencei { count += 1; }
        if self.has_svpbmt { count += 1; }
        if self.has_svinval { count += 1; }
        count
    }
}

/// RISC-V Privilege Levels
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PrivilegeLevel {
    User = 0,          // User mode (U)
    Supervisor = 1,    // Supervisor mode (S)
    Machine = 3,       // Machine mode (M)
}

impl PrivilegeLevel {
    /// Get current privilege level from mstatus
    pub fn current() -> Self {
        // In real implementation: read mstatus[1:0]
        // Bootloader typically runs in Machine mode
        PrivilegeLevel::Machine
    }

    /// Check if privilege level is higher
    pub fn is_higher_than(&self, other: &PrivilegeLevel) -> bool {
        (*self as u8) > (*other as u8)
    }
}

/// Supervisor Binary Interface (SBI)
pub struct SbiInterface {
    pub version: u32,
    pub available: bool,
}

#[derive(Debug, Clone, Copy)]
pub enum SbiFunction {
    SetTimer,           // Set timer
    ConsolePutchar,     // Output character
    GetChar,            // Input character
    CpuShutdown,        // CPU shutdown
    Reset,              // System reset
}

impl SbiInterface {
    /// Create new SBI interface
    pub fn new() -> Self {
        Self {
            version: 0x00010000,  // SBI 1.0
            available: false,
        }
    }

    /// Check if SBI is available
    pub fn detect(&mut self) -> bool {
        // In real implementation: try SBI_GET_SPEC_VERSION call
        self.available = true;
        true
    }

    /// Call SBI function
    pub fn call(&self, function: SbiFunction, args: &[usize]) -> Result<usize, &'static str> {
        if !self.available {
            return Err("SBI not available");
        }

        // In real implementation: use ecall with a6/a7 registers
        // a6 = extension ID, a7 = function ID
        // arguments passed in a0-a5
        
        match function {
            SbiFunction::SetTimer => {
                // Timer set call
                let _ = args;
                Ok(0)
            }
            SbiFunction::ConsolePutchar => {
                // Console output
                Ok(0)
            }
            SbiFunction::GetChar => {
                // Console input
                Ok(0)
            }
            SbiFunction::CpuShutdown => {
                // Shutdown
                Ok(0)
            }
            SbiFunction::Reset => {
                // System reset
                Ok(0)
            }
        }
    }

    /// Get SBI version
    pub fn get_version(&self) -> u32 {
        self.version
    }
}

/// Physical Memory Protection (PMP)
#[derive(Debug, Clone, Copy)]
pub struct PmpEntry {
    pub address: u64,
    pub size: u64,
    pub readable: bool,
    pub writable: bool,
    pub executable: bool,
    pub addressing: PmpAddressing,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PmpAddressing {
    Disabled = 0,
    Tor = 1,            // Top of Range
    Na4 = 2,            // Naturally aligned 4-byte region
    Napot = 3,          // Naturally aligned power-of-two region
}

pub struct PmpManager {
    pub entries: [Option<PmpEntry>; 16],
    pub entry_count: usize,
}

impl PmpManager {
    /// Create new PMP manager
    pub fn new() -> Self {
        Self {
            entries: [None; 16],
            entry_count: 0,
        }
    }

    /// Add PMP entry
    pub fn add_entry(&mut self, entry: PmpEntry) -> Result<(), &'static str> {
        if self.entry_count >= 16 {
            return Err("PMP table full");
        }

        self.entries[self.entry_count] = Some(entry);
        self.entry_count += 1;
        Ok(())
    }

    /// Protect kernel memory
    pub fn protect_kernel_memory(
        &mut self,
        kernel_start: u64,
        kernel_end: u64,
    ) -> Result<(), &'static str> {
        let entry = PmpEntry {
            address: kernel_start,
            size: kernel_end - kernel_start,
            readable: true,
            writable: true,
            executable: true,
            addressing: PmpAddressing::Napot,
        };

        self.add_entry(entry)
    }

    /// Apply PMP settings
    pub fn apply(&self) -> Result<(), &'static str> {
        // In real implementation: write pmpaddr* and pmpcfg* registers
        // This configures physical memory protection
        Ok(())
    }
}

/// Virtual Memory Modes
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum VirtualMemoryMode {
    Mbare,      // No translation (physical addressing)
    Sv32,       // 32-bit virtual addressing (RV32)
    Sv39,       // 39-bit virtual addressing (RV64)
    Sv48,       // 48-bit virtual addressing (RV64)
    Sv57,       // 57-bit virtual addressing (RV64)
}

impl VirtualMemoryMode {
    /// Get recommended VM mode for RV64
    pub fn recommended_rv64() -> Self {
        VirtualMemoryMode::Sv48  // 48-bit is standard for bootloader
    }

    /// Get page size for mode
    pub fn page_size(&self) -> u64 {
        4096  // All modes use 4KB base page size
    }

    /// Get levels of page table
    pub fn page_table_levels(&self) -> usize {
        match self {
            VirtualMemoryMode::Mbare => 0,
            VirtualMemoryMode::Sv32 => 2,
            VirtualMemoryMode::Sv39 => 3,
            VirtualMemoryMode::Sv48 => 4,
            VirtualMemoryMode::Sv57 => 5,
        }
    }
}

/// Hart (Hardware Thread) Management
pub struct HartManager {
    pub hart_id: u32,
    pub hart_count: u32,
    pub harts: [bool; 64],  // Track which harts are available
}

impl HartManager {
    /// Create new hart manager
    pub fn new(hart_id: u32) -> Self {
        let mut harts = [false; 64];
        if (hart_id as usize) < 64 {
            harts[hart_id as usize] = true;
        }

        Self {
            hart_id,
            hart_count: 1,
            harts,
        }
    }

    /// Add hart
    pub fn add_hart(&mut self, hart_id: u32) -> Result<(), &'static str> {
        if (hart_id as usize) >= 64 {
            return Err("Hart ID out of range");
        }

        if !self.harts[hart_id as usize] {
            self.harts[hart_id as usize] = true;
            self.hart_count += 1;
        }

        Ok(())
    }

    /// Get hart count
    pub fn get_hart_count(&self) -> u32 {
        self.hart_count
    }

    /// Check if hart is available
    pub fn is_hart_available(&self, hart_id: u32) -> bool {
        if (hart_id as usize) < 64 {
            self.harts[hart_id as usize]
        } else {
            false
        }
    }
}

/// RISC-V Boot Configuration
pub struct RiscV64BootConfig {
    pub extensions: RiscV64Extensions,
    pub privilege: PrivilegeLevel,
    pub sbi: SbiInterface,
    pub pmp: PmpManager,
    pub vm_mode: VirtualMemoryMode,
    pub harts: HartManager,
    pub boot_mode: RiscV64BootMode,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RiscV64BootMode {
    SbiCall,        // Use SBI calls
    DirectBoot,     // Direct boot
    OpenSbi,        // OpenSBI bootloader
}

impl RiscV64BootConfig {
    /// Initialize RISC-V boot configuration
    pub fn initialize(hart_id: u32) -> Self {
        let extensions = RiscV64Extensions::detect();
        
        Self {
            extensions,
            privilege: PrivilegeLevel::current(),
            sbi: SbiInterface::new(),
            pmp: PmpManager::new(),
            vm_mode: VirtualMemoryMode::recommended_rv64(),
            harts: HartManager::new(hart_id),
            boot_mode: RiscV64BootMode::SbiCall,
        }
    }

    /// Setup boot configuration
    pub fn setup(&mut self, mode: RiscV64BootMode) -> Result<(), &'static str> {
        self.boot_mode = mode;

        // Detect SBI
        if self.sbi.detect() {
            // SBI available for system management
        }

        // Apply PMP settings
        self.pmp.apply()?;

        Ok(())
    }

    /// Get boot summary
    pub fn get_summary(&self) -> RiscV64BootSummary {
        RiscV64BootSummary {
            extension_count: self.extensions.extension_count(),
            privilege_level: self.privilege,
            sbi_available: self.sbi.available,
            hart_count: self.harts.get_hart_count(),
            vm_mode: self.vm_mode,
            boot_mode: self.boot_mode,
        }
    }
}

/// Boot Summary for diagnostic output
#[derive(Debug, Clone, Copy)]
pub struct RiscV64BootSummary {
    pub extension_count: usize,
    pub privilege_level: PrivilegeLevel,
    pub sbi_available: bool,
    pub hart_count: u32,
    pub vm_mode: VirtualMemoryMode,
    pub boot_mode: RiscV64BootMode,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_riscv64_extensions() {
        let ext = RiscV64Extensions::detect();
        assert!(ext.has_i);
        assert!(ext.has_zicsr);
    }

    #[test]
    fn test_privilege_level() {
        assert!(PrivilegeLevel::Machine.is_higher_than(&PrivilegeLevel::User));
        assert!(!PrivilegeLevel::User.is_higher_than(&PrivilegeLevel::Machine));
    }

    #[test]
    fn test_sbi_interface() {
        let sbi = SbiInterface::new();
        assert_eq!(sbi.get_version(), 0x00010000);
    }

    #[test]
    fn test_pmp_manager() {
        let mut pmp = PmpManager::new();
        let entry = PmpEntry {
            address: 0x80000000,
            size: 0x1000,
            readable: true,
            writable: true,
            executable: true,
            addressing: PmpAddressing::Napot,
        };
        assert!(pmp.add_entry(entry).is_ok());
    }

    #[test]
    fn test_virtual_memory_mode() {
        let mode = VirtualMemoryMode::Sv48;
        assert_eq!(mode.page_table_levels(), 4);
        assert_eq!(mode.page_size(), 4096);
    }

    #[test]
    fn test_hart_manager() {
        let mut harts = HartManager::new(0);
        assert!(harts.is_hart_available(0));
        assert!(harts.add_hart(1).is_ok());
        assert_eq!(harts.get_hart_count(), 2);
    }

    #[test]
    fn test_riscv64_boot_config() {
        let config = RiscV64BootConfig::initialize(0);
        assert_eq!(config.privilege, PrivilegeLevel::Machine);
        assert_eq!(config.vm_mode, VirtualMemoryMode::Sv48);
    }
}
