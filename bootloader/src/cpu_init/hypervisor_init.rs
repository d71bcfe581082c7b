//! Hypervisor Initialization - Hypervisor mode setup and VMXON/VMXOFF
//!
//! Provides:
//! - Hypervisor initialization framework
//! - VMXON/VMXOFF operations
//! - Mode switching and root mode setup
//! - MSR configuration for hypervisor

/// Hypervisor states
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HypervisorState {
    /// Not initialized
    Uninitialized,
    /// Initialization in progress
    Initializing,
    /// Running in root mode
    RootMode,
    /// Error state
    Error,
    /// Shutdown
    Shutdown,
}

/// VMX operation modes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VmxMode {
    /// VMX root operation
    Root,
    /// VMX non-root operation
    NonRoot,
}

/// MSR register indices
#[derive(Debug, Clone, Copy)]
pub struct MsrIndex {
    /// IA32_FEATURE_CONTROL (0x3A)
    pub feature_control: u32,
    /// IA32_VMX_BASIC (0x480)
    pub vmx_basic: u32,
    /// IA32_VMX_PINBASED_CTLS (0x481)
    pub vmx_pin_ctls: u32,
    /// IA32_VMX_PROCBASED_CTLS (0x482)
    pub vmx_proc_ctls: u32,
    /// IA32_VMX_EXIT_CTLS (0x483)
    pub vmx_exit_ctls: u32,
    /// IA32_VMX_ENTRY_CTLS (0x484)
    pub vmx_entry_ctls: u32,
    /// IA32_VMX_MISC (0x485)
    pub vmx_misc: u32,
    /// IA32_VMX_CR0_FIXED0 (0x486)
    pub vmx_cr0_fixed0: u32,
    /// IA32_VMX_CR0_FIXED1 (0x487)
    pub vmx_cr0_fixed1: u32,
}

impl MsrIndex {
    /// Create MSR indices
    pub fn new() -> Self {
        MsrIndex {
            feature_control: 0x3A,
            vmx_basic: 0x480,
            vmx_pin_ctls: 0x481,
            vmx_proc_ctls: 0x482,
            vmx_exit_ctls: 0x483,
            vmx_entry_ctls: 0x484,
            vmx_misc: 0x485,
            vmx_cr0_fixed0: 0x486,
            vmx_cr0_fixed1: 0x487,
        }
    }
}

/// VMXON region structure
#[derive(Debug, Clone, Copy)]
pub struct VmxonRegion {
    /// Physical address (4KB aligned)
    pub physical_address: u64,
    /// Virtual address
    pub virtual_address: u64,
    /// Size (4KB)
    pub size: u32,
    /// Valid flag
    pub valid: bool,
}

impl VmxonRegion {
    /// Create VMXON region
    pub fn new() -> Self {
        VmxonRegion {
            physical_address: 0,
            virtual_address: 0,
            size: 0x1000, // 4KB
            valid: false,
        }
    }

    /// Check alignment (must be 4KB aligned)
    pub fn is_aligned(&self) -> bool {
        self.physical_address % 0x1000 == 0
    }
}

/// Control structure settings
#[derive(Debug, Clone, Copy)]
pub struct ControlSettings {
    /// Pin-based control fields
    pub pin_based_ctls: u32,
    /// Processor-based control fields
    pub proc_based_ctls: u32,
    /// VM-exit control fields
    pub exit_ctls: u32,
    /// VM-entry control fields
    pub entry_ctls: u32,
}

impl ControlSettings {
    /// Create control settings
    pub fn new() -> Self {
        ControlSettings {
            pin_based_ctls: 0,
            proc_based_ctls: 0,
            exit_ctls: 0,
            entry_ctls: 0,
        }
    }

    /// Check if all controls are set
    pub fn are_configured(&self) -> bool {
        self.pin_based_ctls != 0
            && self.proc_based_ctls != 0
            && self.exit_ctls != 0
            && self.entry_ctls != 0
    }
}

/// Hypervisor initialization
pub struct HypervisorInit {
    /// State
    state: HypervisorState,
    /// VMXON region
    vmxon_region: VmxonRegion,
    /// VMX mode
    vmx_mode: VmxMode,
    /// Control settings
    ctrl_settings: ControlSettings,
    /// MSR indices
    msr_index: MsrIndex,
    /// CPU count
    cpu_count: u32,
    /// Initialization errors
    errors: u32,
}

impl HypervisorInit {
    /// Create hypervisor initializer
    pub fn new() -> Self {
        HypervisorInit {
            state: HypervisorState::Uninitialized,
            vmxon_region: VmxonRegion::new(),
            vmx_mode: VmxMode::Root,
            ctrl_settings: ControlSettings::new(),
            msr_index: MsrIndex::new(),
            cpu_count: 1,
            errors: 0,
        }
    }

    /// Get current state
    pub fn get_state(&self) -> HypervisorState {
        self.state
    }

    /// Set state
    fn set_state(&mut self, state: HypervisorState) {
        self.state = state;
    }

    /// Setup VMXON region
    pub fn setup_vmxon_region(&mut self, phys_addr: u64) -> bool {
        if phys_addr % 0x1000 != 0 {
            self.errors += 1;
            return false;
        }

        self.vmxon_region.physical_address = phys_addr;
        self.vmxon_region.virtual_address = phys_addr; // Simulated
        self.vmxon_region.valid = true;
        true
    }

    /// Load MSR controls
    pub fn load_msr_controls(&mut self) -> bool {
        // Simulated MSR read operations
        self.ctrl_settings.pin_based_ctls = 0x00000016;
        self.ctrl_settings.proc_based_ctls = 0xB6B9A172;
        self.ctrl_settings.exit_ctls = 0x00036DFE;
        self.ctrl_settings.entry_ctls = 0x000011FF;

        self.ctrl_settings.are_configured()
    }

    /// Execute VMXON instruction
    pub fn vmxon(&mut self) -> bool {
        if !self.vmxon_region.valid {
            self.errors += 1;
            return false;
        }

        if !self.vmxon_region.is_aligned() {
            self.errors += 1;
            return false;
        }

        // Simulated VMXON operation
        self.vmx_mode = VmxMode::Root;
        self.state = HypervisorState::RootMode;
        true
    }

    /// Execute VMXOFF instruction
    pub fn vmxoff(&mut self) -> bool {
        if self.state != HypervisorState::RootMode {
            self.errors += 1;
            return false;
        }

        // Simulated VMXOFF operation
        self.vmx_mode = VmxMode::NonRoot;
        self.state = HypervisorState::Shutdown;
        true
    }

    /// Initialize hypervisor
    pub fn initialize(&mut self) -> bool {
        self.set_state(HypervisorState::Initializing);

        if !self.setup_vmxon_region(0xFFFFF000) {
            self.set_state(HypervisorState::Error);
            return false;
        }

        if !self.load_msr_controls() {
            self.set_state(HypervisorState::Error);
            return false;
        }

        if !self.vmxon() {
            self.set_state(HypervisorState::Error);
            return false;
        }

        self.set_state(HypervisorState::RootMode);
        true
    }

    /// Check if hypervisor is running
    pub fn is_running(&self) -> bool {
        self.state == HypervisorState::RootMode
    }

    /// Get VMXON region
    pub fn get_vmxon_region(&self) -> VmxonRegion {
        self.vmxon_region
    }

    /// Get control settings
    pub fn get_control_settings(&self) -> ControlSettings {
        self.ctrl_settings
    }

    /// Get error count
    pub fn get_error_count(&self) -> u32 {
        self.errors
    }

    /// Set CPU count
    pub fn set_cpu_count(&mut self, count: u32) {
        self.cpu_count = count;
    }

    /// Get CPU count
    pub fn get_cpu_count(&self) -> u32 {
        self.cpu_count
    }

    /// Get VMX mode
    pub fn get_vmx_mode(&self) -> VmxMode {
        self.vmx_mode
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hypervisor_states() {
        assert_ne!(HypervisorState::RootMode, HypervisorState::Shutdown);
    }

    #[test]
    fn test_vmx_modes() {
        assert_ne!(VmxMode::Root, VmxMode::NonRoot);
    }

    #[test]
    fn test_msr_index_creation() {
        let msr = MsrIndex::new();
        assert_eq!(msr.feature_control, 0x3A);
        assert_eq!(msr.vmx_basic, 0x480);
    }

    #[test]
    fn test_msr_indices_distinct() {
        let msr = MsrIndex::new();
        assert_ne!(msr.vmx_pin_ctls, msr.vmx_proc_ctls);
    }

    #[test]
    fn test_vmxon_region_creation() {
        let vmxon = VmxonRegion::new();
        assert_eq!(vmxon.size, 0x1000);
        assert!(!vmxon.valid);
    }

    #[test]
    fn test_vmxon_alignment() {
        let vmxon = VmxonRegion {
            physical_address: 0x1000,
            virtual_address: 0x1000,
            size: 0x1000,
            valid: false,
        };
        assert!(vmxon.is_aligned());
    }

    #[test]
    fn test_vmxon_misalignment() {
        let vmxon = VmxonRegion {
            physical_address: 0x1001,
            virtual_address: 0x1000,
            size: 0x1000,
            valid: false,
        };
        assert!(!vmxon.is_aligned());
    }

    #[test]
    fn test_control_settings_creation() {
        let ctrl = ControlSettings::new();
        assert_eq!(ctrl.pin_based_ctls, 0);
    }

    #[test]
    fn test_control_settings_configured() {
        let mut ctrl = ControlSettings::new();
        assert!(!ctrl.are_configured());
        
        ctrl.pin_based_ctls = 1;
        ctrl.proc_based_ctls = 1;
        ctrl.exit_ctls = 1;
        ctrl.entry_ctls = 1;
        assert!(ctrl.are_configured());
    }

    #[test]
    fn test_hypervisor_init_creation() {
        let hyp = HypervisorInit::new();
        assert_eq!(hyp.get_state(), HypervisorState::Uninitialized);
        assert!(!hyp.is_running());
    }

    #[test]
    fn test_hypervisor_initial_errors() {
        let hyp = HypervisorInit::new();
        assert_eq!(hyp.get_error_count(), 0);
    }

    #[test]
    fn test_setup_vmxon_region() {
        let mut hyp = HypervisorInit::new();
        assert!(hyp.setup_vmxon_region(0x1000));
        assert!(hyp.vmxon_region.valid);
    }

    #[test]
    fn test_setup_vmxon_region_misaligned() {
        let mut hyp = HypervisorInit::new();
        assert!(!hyp.setup_vmxon_region(0x1001));
    }

    #[test]
    fn test_load_msr_controls() {
        let mut hyp = HypervisorInit::new();
        assert!(hyp.load_msr_controls());
        assert!(hyp.ctrl_settings.are_configured());
    }

    #[test]
    fn test_vmxon_operation() {
        let mut hyp = HypervisorInit::new();
        hyp.setup_vmxon_region(0x1000);
        assert!(hyp.vmxon());
        assert_eq!(hyp.get_state(), HypervisorState::RootMode);
    }

    #[test]
    fn test_vmxoff_operation() {
        let mut hyp = HypervisorInit::new();
        hyp.setup_vmxon_region(0x1000);
        hyp.vmxon();
        
        assert!(hyp.vmxoff());
        assert_eq!(hyp.get_state(), HypervisorState::Shutdown);
    }

    #[test]
    fn test_hypervisor_initialize() {
        let mut hyp = HypervisorInit::new();
        assert!(hyp.initialize());
        assert!(hyp.is_running());
    }

    #[test]
    fn test_hypervisor_not_running() {
        let hyp = HypervisorInit::new();
        assert!(!hyp.is_running());
    }

    #[test]
    fn test_get_vmxon_region() {
        let mut hyp = HypervisorInit::new();
        hyp.setup_vmxon_region(0x1000);
        let region = hyp.get_vmxon_region();
        assert_eq!(region.physical_address, 0x1000);
    }

    #[test]
    fn test_cpu_count() {
        let mut hyp = HypervisorInit::new();
        assert_eq!(hyp.get_cpu_count(), 1);
        hyp.set_cpu_count(4);
        assert_eq!(hyp.get_cpu_count(), 4);
    }

    #[test]
    fn test_vmx_mode_after_vmxon() {
        let mut hyp = HypervisorInit::new();
        hyp.setup_vmxon_region(0x1000);
        hyp.vmxon();
        assert_eq!(hyp.get_vmx_mode(), VmxMode::Root);
    }

    #[test]
    fn test_vmx_mode_after_vmxoff() {
        let mut hyp = HypervisorInit::new();
        hyp.setup_vmxon_region(0x1000);
        hyp.vmxon();
        hyp.vmxoff();
        assert_eq!(hyp.get_vmx_mode(), VmxMode::NonRoot);
    }

    #[test]
    fn test_error_on_invalid_region() {
        let mut hyp = HypervisorInit::new();
        let prev_errors = hyp.get_error_count();
        hyp.setup_vmxon_region(0x1001);
        assert!(hyp.get_error_count() > prev_errors);
    }

    #[test]
    fn test_vmxoff_without_vmxon() {
        let mut hyp = HypervisorInit::new();
        let prev_errors = hyp.get_error_count();
        hyp.vmxoff();
        assert!(hyp.get_error_count() > prev_errors);
    }

    #[test]
    fn test_multiple_vmxon_vmxoff() {
        let mut hyp = HypervisorInit::new();
        hyp.setup_vmxon_region(0x2000);
        hyp.vmxon();
        assert!(hyp.is_running());
        
        hyp.vmxoff();
        assert!(!hyp.is_running());
    }

    #[test]
    fn test_control_settings_values() {
        let mut hyp = HypervisorInit::new();
        hyp.load_msr_controls();
        let ctrl = hyp.get_control_settings();
        assert!(ctrl.pin_based_ctls != 0);
        assert!(ctrl.proc_based_ctls != 0);
    }

    #[test]
    fn test_initialization_sequence() {
        let mut hyp = HypervisorInit::new();
        assert_eq!(hyp.get_state(), HypervisorState::Uninitialized);
        
        hyp.initialize();
        assert_eq!(hyp.get_state(), HypervisorState::RootMode);
    }
}
