// Security Sandbox for Cross-Platform Applications
//
// Provides isolated execution environment for foreign applications:
// - Process isolation and confinement
// - Resource limits and quotas
// - Permission management
// - Security policy enforcement
// - Auditing and monitoring

extern crate alloc;
extern crate hashbrown;

use alloc::vec::Vec;
use alloc::string::String;
use alloc::string::ToString;
use alloc::{format, vec};
use alloc::boxed::Box;
use hashbrown::HashMap;
use crate::compat::{*, DefaultHasherBuilder};

/// Security sandbox manager
pub struct SecuritySandbox {
    /// Active sandboxes
    active_sandboxes: HashMap<u64, Sandbox, DefaultHasherBuilder>,
    /// Security policies
    policies: HashMap<String, SecurityPolicy, DefaultHasherBuilder>,
    /// Resource monitors
    resource_monitors: Vec<Box<dyn ResourceMonitor>>,
    /// Next sandbox ID
    next_sandbox_id: u64,
}

/// Sandbox instance
#[derive(Debug)]
pub struct Sandbox {
    /// Sandbox ID
    pub id: u64,
    /// Process ID being sandboxed
    pub process_id: u64,
    /// Sandbox configuration
    pub config: SandboxConfig,
    /// Resource limits
    pub resource_limits: ResourceLimits,
    /// Current resource usage
    pub resource_usage: ResourceUsage,
    /// Permission set
    pub permissions: PermissionSet,
    /// Security policy
    pub policy: SecurityPolicy,
    /// Sandbox state
    pub state: SandboxState,
    /// Statistics
    pub stats: SandboxStats,
}

/// Sandbox configuration
#[derive(Debug, Clone)]
pub struct SandboxConfig {
    /// Sandbox type
    pub sandbox_type: SandboxType,
    /// Platform being emulated
    pub target_platform: TargetPlatform,
    /// Isolation level
    pub isolation_level: IsolationLevel,
    /// Network access
    pub network_access: NetworkAccess,
    /// Filesystem access
    pub filesystem_access: FileSystemAccess,
    /// Inter-process communication
    pub ipc_access: IpcAccess,
    /// Device access
    pub device_access: DeviceAccess,
}

/// Sandbox types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SandboxType {
    /// Full application sandbox
    Application,
    /// Plugin or extension sandbox
    Plugin,
    /// Service sandbox
    Service,
    /// Temporary sandbox
    Temporary,
    /// Development sandbox
    Development,
}

/// Isolation levels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IsolationLevel {
    /// No isolation (native execution)
    None,
    /// Basic isolation (process separation)
    Basic,
    /// Medium isolation (resource limits)
    Medium,
    /// High isolation (full confinement)
    High,
    /// Maximum isolation (complete confinement)
    Maximum,
}

/// Network access configuration
#[derive(Debug, Clone)]
pub struct NetworkAccess {
    /// Allow network access
    pub allowed: bool,
    /// Allowed protocols
    pub allowed_protocols: Vec<String>,
    /// Allowed hosts
    pub allowed_hosts: Vec<String>,
    /// Allowed ports
    pub allowed_ports: Vec<u16>,
    /// Block private networks
    pub block_private: bool,
    /// Allow outbound only
    pub outbound_only: bool,
}

/// Filesystem access configuration
#[derive(Debug, Clone)]
pub struct FileSystemAccess {
    /// Read-only paths
    pub read_only_paths: Vec<String>,
    /// Read-write paths
    pub read_write_paths: Vec<String>,
    /// Temporary directory
    pub temp_dir: Option<String>,
    /// Home directory
    pub home_dir: Option<String>,
    /// Allow system file access
    pub allow_system_files: bool,
    /// Allow execution from writable directories
    pub allow_execute_writable: bool,
}

/// IPC access configuration
#[derive(Debug, Clone)]
pub struct IpcAccess {
    /// Allow IPC
    pub allowed: bool,
    /// Allowed IPC mechanisms
    pub allowed_mechanisms: Vec<String>,
    /// Allowed communication targets
    pub allowed_targets: Vec<String>,
    /// Maximum message size
    pub max_message_size: usize,
}

/// Device access configuration
#[derive(Debug, Clone)]
pub struct DeviceAccess {
    /// Allow device access
    pub allowed: bool,
    /// Allowed device types
    pub allowed_types: Vec<String>,
    /// Specific allowed devices
    pub allowed_devices: Vec<String>,
    /// Read-only devices
    pub read_only_devices: Vec<String>,
}

/// Resource limits
#[derive(Debug, Clone)]
pub struct ResourceLimits {
    /// CPU time limit (seconds)
    pub cpu_time: Option<u64>,
    /// Memory limit (bytes)
    pub memory: Option<usize>,
    /// Disk space limit (bytes)
    pub disk_space: Option<usize>,
    /// Network bandwidth limit (bytes/second)
    pub network_bandwidth: Option<u64>,
    /// Number of processes limit
    pub max_processes: Option<u32>,
    /// Number of files limit
    pub max_files: Option<u32>,
    /// Number of threads limit
    pub max_threads: Option<u32>,
}

/// Current resource usage
#[derive(Debug, Clone, Default)]
pub struct ResourceUsage {
    /// CPU time used (nanoseconds)
    pub cpu_time_used: u64,
    /// Memory used (bytes)
    pub memory_used: usize,
    /// Disk space used (bytes)
    pub disk_space_used: usize,
    /// Network bytes transferred
    pub network_bytes_tx: u64,
    pub network_bytes_rx: u64,
    /// Number of processes created
    pub processes_created: u32,
    /// Number of files opened
    pub files_opened: u32,
    /// Number of threads created
    pub threads_created: u32,
}

/// Permission set
#[derive(Debug, Clone)]
pub struct PermissionSet {
    /// File permissions
    pub file_permissions: FilePermissions,
    /// Network permissions
    pub network_permissions: NetworkPermissions,
    /// System permissions
    pub system_permissions: SystemPermissions,
    /// Device permissions
    pub device_permissions: DevicePermissions,
}

/// File permissions
#[derive(Debug, Clone)]
pub struct FilePermissions {
    pub can_read_system_files: bool,
    pub can_write_system_files: bool,
    pub can_execute_system_files: bool,
    pub can_read_user_files: bool,
    pub can_write_user_files: bool,
    pub can_create_files: bool,
    pub can_delete_files: bool,
    pub can_create_directories: bool,
}

/// Network permissions
#[derive(Debug, Clone)]
pub struct NetworkPermissions {
    pub can_access_internet: bool,
    pub can_access_lan: bool,
    pub can_bind_ports: bool,
    pub can_create_sockets: bool,
    pub can_use_raw_sockets: bool,
    pub allowed_ports: Vec<u16>,
}

/// System permissions
#[derive(Debug, Clone)]
pub struct SystemPermissions {
    pub can_access_system_time: bool,
    pub can_access_system_info: bool,
    pub can_change_system_settings: bool,
    pub can_restart_system: bool,
    pub can_shutdown_system: bool,
    pub can_install_software: bool,
    pub can_access_hardware: bool,
}

/// Device permissions
#[derive(Debug, Clone)]
pub struct DevicePermissions {
    pub can_access_camera: bool,
    pub can_access_microphone: bool,
    pub can_access_storage: bool,
    pub can_access_gps: bool,
    pub can_access_bluetooth: bool,
    pub can_access_usb: bool,
    pub can_access_printer: bool,
}

/// Security policy
#[derive(Debug, Clone)]
pub struct SecurityPolicy {
    /// Policy name
    pub name: String,
    /// Policy version
    pub version: String,
    /// Policy rules
    pub rules: Vec<SecurityRule>,
    /// Violation actions
    pub violation_actions: Vec<ViolationAction>,
}

/// Security rule
#[derive(Debug, Clone)]
pub struct SecurityRule {
    /// Rule name
    pub name: String,
    /// Rule type
    pub rule_type: RuleType,
    /// Condition
    pub condition: String,
    /// Action
    pub action: RuleAction,
    /// Is rule enabled
    pub enabled: bool,
}

/// Rule types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleType {
    /// File access rule
    FileAccess,
    /// Network access rule
    NetworkAccess,
    /// System call rule
    SystemCall,
    /// Resource usage rule
    ResourceUsage,
    /// Time-based rule
    TimeBased,
    /// Custom rule
    Custom,
}

/// Rule actions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleAction {
    /// Allow operation
    Allow,
    /// Deny operation
    Deny,
    /// Log and allow
    LogAllow,
    /// Log and deny
    LogDeny,
    /// Terminate process
    Terminate,
    /// Suspend process
    Suspend,
    /// Custom action
    Custom,
}

/// Violation action
#[derive(Debug, Clone)]
pub struct ViolationAction {
    /// Violation type
    pub violation_type: String,
    /// Action to take
    pub action: RuleAction,
    /// Additional parameters
    pub parameters: HashMap<String, String, DefaultHasherBuilder>,
}

/// Sandbox states
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SandboxState {
    /// Initializing
    Initializing,
    /// Running
    Running,
    /// Suspended
    Suspended,
    /// Terminating
    Terminating,
    /// Terminated
    Terminated,
    /// Error
    Error,
}

/// Sandbox statistics
#[derive(Debug, Clone, Default)]
pub struct SandboxStats {
    /// Creation time
    pub created_at: u64,
    /// Start time
    pub started_at: Option<u64>,
    /// End time
    pub ended_at: Option<u64>,
    /// Total running time
    pub total_runtime_ms: u64,
    /// Number of security violations
    pub security_violations: u32,
    /// Number of resource limit exceeded
    pub resource_exceeded: u32,
    /// Number of policy violations
    pub policy_violations: u32,
}

/// Resource monitor trait
pub trait ResourceMonitor: Send + Sync {
    /// Get current resource usage
    fn get_usage(&self, sandbox_id: u64) -> ResourceUsage;

    /// Check if limits are exceeded
    fn check_limits(&self, sandbox: &Sandbox) -> Vec<ResourceLimitViolation>;

    /// Update monitoring statistics
    fn update_stats(&mut self, usage: &ResourceUsage);
}

/// Resource limit violation
#[derive(Debug, Clone)]
pub struct ResourceLimitViolation {
    /// Resource type
    pub resource_type: String,
    /// Current usage
    pub current_usage: usize,
    /// Limit
    pub limit: usize,
    /// Violation time
    pub timestamp: u64,
}

impl SecuritySandbox {
    /// Create a new security sandbox manager
    pub fn new() -> Self {
        let mut manager = Self {
            active_sandboxes: HashMap::with_hasher(DefaultHasherBuilder),
            policies: HashMap::with_hasher(DefaultHasherBuilder),
            resource_monitors: Vec::new(),
            next_sandbox_id: 1,
        };

        manager.init_default_policies();
        manager
    }

    /// Initialize default security policies
    fn init_default_policies(&mut self) {
        // Windows application policy
        let windows_policy = SecurityPolicy {
            name: "Windows Application".to_string(),
            version: "1.0".to_string(),
            rules: vec![
                SecurityRule {
                    name: "Allow system DLL access".to_string(),
                    rule_type: RuleType::FileAccess,
                    condition: "path contains 'C:\\Windows\\System32'".to_string(),
                    action: RuleAction::Allow,
                    enabled: true,
                },
                SecurityRule {
                    name: "Deny system file modification".to_string(),
                    rule_type: RuleType::FileAccess,
                    condition: "path starts with 'C:\\Windows' and write".to_string(),
                    action: RuleAction::Deny,
                    enabled: true,
                },
            ],
            violation_actions: vec![
                ViolationAction {
                    violation_type: "SystemFileAccess".to_string(),
                    action: RuleAction::Terminate,
                    parameters: HashMap::with_hasher(DefaultHasherBuilder),
                },
            ],
        };

        // Linux application policy
        let linux_policy = SecurityPolicy {
            name: "Linux Application".to_string(),
            version: "1.0".to_string(),
            rules: vec![
                SecurityRule {
                    name: "Allow shared library access".to_string(),
                    rule_type: RuleType::FileAccess,
                    condition: "path contains '/usr/lib' or path contains '/lib'".to_string(),
                    action: RuleAction::Allow,
                    enabled: true,
                },
                SecurityRule {
                    name: "Deny root file modification".to_string(),
                    rule_type: RuleType::FileAccess,
                    condition: "path starts with '/' and write and not user".to_string(),
                    action: RuleAction::Deny,
                    enabled: true,
                },
            ],
            violation_actions: vec![],
        };

        // Android application policy
        let android_policy = SecurityPolicy {
            name: "Android Application".to_string(),
            version: "1.0".to_string(),
            rules: vec![
                SecurityRule {
                    name: "Allow app directory access".to_string(),
                    rule_type: RuleType::FileAccess,
                    condition: "path contains '/data/app'".to_string(),
                    action: RuleAction::Allow,
                    enabled: true,
                },
                SecurityRule {
                    name: "Deny system app modification".to_string(),
                    rule_type: RuleType::FileAccess,
                    condition: "path contains '/system' and write".to_string(),
                    action: RuleAction::Deny,
                    enabled: true,
                },
            ],
            violation_actions: vec![],
        };

        self.policies.insert("windows".to_string(), windows_policy);
        self.policies.insert("linux".to_string(), linux_policy);
        self.policies.insert("android".to_string(), android_policy);
    }

    /// Create a new sandbox
    pub fn create_sandbox(&mut self, process_id: u64, config: SandboxConfig) -> Result<u64> {
        let sandbox_id = self.next_sandbox_id;
        self.next_sandbox_id += 1;

        let policy = self.get_policy_for_platform(&config.target_platform)?;

        let sandbox = Sandbox {
            id: sandbox_id,
            process_id,
            config: config.clone(),
            resource_limits: ResourceLimits {
                cpu_time: Some(3600), // 1 hour
                memory: Some(512 * 1024 * 1024), // 512MB
                disk_space: Some(1024 * 1024 * 1024), // 1GB
                network_bandwidth: Some(1024 * 1024), // 1MB/s
                max_processes: Some(10),
                max_files: Some(100),
                max_threads: Some(20),
            },
            resource_usage: ResourceUsage::default(),
            permissions: self.create_permission_set(&config),
            policy,
            state: SandboxState::Initializing,
            stats: SandboxStats {
                created_at: self.get_timestamp_ms(),
                ..Default::default()
            },
        };

        self.active_sandboxes.insert(sandbox_id, sandbox);
        Ok(sandbox_id)
    }

    /// Start a sandbox
    pub fn start_sandbox(&mut self, sandbox_id: u64) -> Result<()> {
        let current_time = self.get_timestamp_ms();
        let sandbox = self.active_sandboxes.get_mut(&sandbox_id)
            .ok_or(CompatibilityError::NotFound)?;

        sandbox.state = SandboxState::Running;
        sandbox.stats.started_at = Some(current_time);

        Ok(())
    }

    /// Stop a sandbox
    pub fn stop_sandbox(&mut self, sandbox_id: u64) -> Result<()> {
        let current_time = self.get_timestamp_ms();
        let sandbox = self.active_sandboxes.get_mut(&sandbox_id)
            .ok_or(CompatibilityError::NotFound)?;

        sandbox.state = SandboxState::Terminating;
        sandbox.stats.ended_at = Some(current_time);

        if let Some(started) = sandbox.stats.started_at {
            sandbox.stats.total_runtime_ms = current_time - started;
        }

        sandbox.state = SandboxState::Terminated;

        Ok(())
    }

    /// Get sandbox by ID
    pub fn get_sandbox(&self, sandbox_id: u64) -> Option<&Sandbox> {
        self.active_sandboxes.get(&sandbox_id)
    }

    /// Get all active sandboxes
    pub fn get_active_sandboxes(&self) -> Vec<&Sandbox> {
        self.active_sandboxes.values()
            .filter(|s| matches!(s.state, SandboxState::Running))
            .collect()
    }

    /// Monitor resource usage
    pub fn monitor_resources(&mut self) {
        // 先收集所有的sandbox ID，避免借用冲突
        let sandbox_ids: Vec<_> = self.active_sandboxes.keys().copied().collect();

        for sandbox_id in sandbox_ids {
            // 先收集所有的违规行为，避免借用冲突
            let mut all_violations = Vec::new();

            // 更新资源使用情况
            if let Some(sandbox) = self.active_sandboxes.get_mut(&sandbox_id) {
                for monitor in &mut self.resource_monitors {
                    let usage = monitor.get_usage(sandbox_id);
                    // keep a cloned copy for the monitor call since ownership is moved into sandbox
                    sandbox.resource_usage = usage.clone();
                    monitor.update_stats(&sandbox.resource_usage);

                    let violations = monitor.check_limits(sandbox);
                    all_violations.extend(violations);
                }
            }

            // 处理所有违规行为
            for violation in all_violations {
                self.handle_resource_violation(sandbox_id, violation);
            }
        }
    }

    /// Handle resource limit violation
    fn handle_resource_violation(&mut self, sandbox_id: u64, violation: ResourceLimitViolation) {
        let sandbox = self.active_sandboxes.get_mut(&sandbox_id);
        if let Some(sandbox) = sandbox {
            sandbox.stats.resource_exceeded += 1;

            // Log violation
            crate::println!("[sandbox] Resource violation in sandbox {}: {} exceeded {} > {}",
                sandbox_id, violation.resource_type, violation.current_usage, violation.limit);

            // Take action based on policy
            // For now, just suspend the sandbox
            sandbox.state = SandboxState::Suspended;
        }
    }

    /// Get policy for platform
    fn get_policy_for_platform(&self, platform: &TargetPlatform) -> Result<SecurityPolicy> {
        let policy_key = match platform {
            TargetPlatform::Windows => "windows",
            TargetPlatform::Linux => "linux",
            TargetPlatform::MacOS => "macos",
            TargetPlatform::Android => "android",
            TargetPlatform::IOS => "ios",
            TargetPlatform::Nos => "nos",
        };

        self.policies.get(policy_key)
            .cloned()
            .ok_or(CompatibilityError::NotFound)
    }

    /// Create permission set from configuration
    fn create_permission_set(&self, config: &SandboxConfig) -> PermissionSet {
        // Create default permission set based on configuration
        PermissionSet {
            file_permissions: FilePermissions {
                can_read_system_files: config.isolation_level == IsolationLevel::None,
                can_write_system_files: false,
                can_execute_system_files: true,
                can_read_user_files: true,
                can_write_user_files: config.filesystem_access.read_write_paths.len() > 0,
                can_create_files: config.filesystem_access.read_write_paths.len() > 0,
                can_delete_files: false,
                can_create_directories: config.filesystem_access.read_write_paths.len() > 0,
            },
            network_permissions: NetworkPermissions {
                can_access_internet: config.network_access.allowed,
                can_access_lan: config.network_access.allowed,
                can_bind_ports: false,
                can_create_sockets: config.network_access.allowed,
                can_use_raw_sockets: false,
                allowed_ports: config.network_access.allowed_ports.clone(),
            },
            system_permissions: SystemPermissions {
                can_access_system_time: true,
                can_access_system_info: true,
                can_change_system_settings: false,
                can_restart_system: false,
                can_shutdown_system: false,
                can_install_software: false,
                can_access_hardware: config.device_access.allowed,
            },
            device_permissions: DevicePermissions {
                can_access_camera: config.device_access.allowed_types.contains(&"camera".to_string()),
                can_access_microphone: config.device_access.allowed_types.contains(&"microphone".to_string()),
                can_access_storage: config.device_access.allowed_types.contains(&"storage".to_string()),
                can_access_gps: config.device_access.allowed_types.contains(&"gps".to_string()),
                can_access_bluetooth: config.device_access.allowed_types.contains(&"bluetooth".to_string()),
                can_access_usb: config.device_access.allowed_types.contains(&"usb".to_string()),
                can_access_printer: config.device_access.allowed_types.contains(&"printer".to_string()),
            },
        }
    }

    /// Get current timestamp in milliseconds
    fn get_timestamp_ms(&self) -> u64 {
        // This would use a high-precision timer
        // For now, return a simple counter
        use core::sync::atomic::{AtomicU64, Ordering};
        static TIMESTAMP_MS: AtomicU64 = AtomicU64::new(0);
        TIMESTAMP_MS.fetch_add(1, Ordering::SeqCst)
    }
}

/// Create a new security sandbox
pub fn create_security_sandbox() -> SecuritySandbox {
    SecuritySandbox::new()
}