//! Enhanced Device Model Abstraction
//!
//! This module provides a comprehensive device model abstraction for NOS,
//! building on the existing driver framework to provide additional features
//! like device hierarchies, power management, and advanced device capabilities.

extern crate alloc;
use alloc::vec::Vec;
use alloc::collections::BTreeMap;
use alloc::string::{String, ToString};
use alloc::sync::Arc;
use core::sync::atomic::{AtomicU64, AtomicU32, AtomicBool, Ordering};
use crate::sync::{Mutex, Sleeplock};
use crate::subsystems::drivers::driver_manager::{
    Driver, DeviceId, DriverId, DeviceType, DeviceStatus, DriverStatus,
    DeviceInfo, DriverInfo, DeviceResources, IoOperation, IoResult, InterruptInfo
};
use nos_nos_error_handling::unified::KernelError;

// ============================================================================
// Device Model Constants
// ============================================================================

/// Maximum device hierarchy depth
pub const MAX_DEVICE_DEPTH: u32 = 10;

/// Maximum number of child devices per parent
pub const MAX_CHILD_DEVICES: u32 = 100;

/// Device class base
pub const DEVICE_CLASS_BASE: u32 = 0x10000000;

/// Device class mask
pub const DEVICE_CLASS_MASK: u32 = 0xF0000000;

// ============================================================================
// Enhanced Device Types
// ============================================================================

/// Enhanced device class
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u32)]
pub enum DeviceClass {
    /// System devices (controllers, etc.)
    System = DEVICE_CLASS_BASE,
    /// Processor devices
    Processor = DEVICE_CLASS_BASE + 0x10000000,
    /// Memory devices
    Memory = DEVICE_CLASS_BASE + 0x20000000,
    /// Bus devices (PCI, USB, etc.)
    Bus = DEVICE_CLASS_BASE + 0x30000000,
    /// Communication devices
    Communication = DEVICE_CLASS_BASE + 0x40000000,
    /// Human interface devices
    HumanInterface = DEVICE_CLASS_BASE + 0x50000000,
    /// Storage devices
    Storage = DEVICE_CLASS_BASE + 0x60000000,
    /// Multimedia devices
    Multimedia = DEVICE_CLASS_BASE + 0x70000000,
    /// Network devices
    Network = DEVICE_CLASS_BASE + 0x80000000,
    /// Display devices
    Display = DEVICE_CLASS_BASE + 0x90000000,
    /// Input devices
    Input = DEVICE_CLASS_BASE + 0xA0000000,
    /// Output devices
    Output = DEVICE_CLASS_BASE + 0xB0000000,
    /// Sensor devices
    Sensor = DEVICE_CLASS_BASE + 0xC0000000,
    /// Virtual devices
    Virtual = DEVICE_CLASS_BASE + 0xD0000000,
    /// Custom devices
    Custom = DEVICE_CLASS_BASE + 0xE0000000,
}

impl DeviceClass {
    /// Get device class from value
    pub fn from_value(value: u32) -> Self {
        match value & DEVICE_CLASS_MASK {
            DEVICE_CLASS_BASE => DeviceClass::System,
            DEVICE_CLASS_BASE + 0x10000000 => DeviceClass::Processor,
            DEVICE_CLASS_BASE + 0x20000000 => DeviceClass::Memory,
            DEVICE_CLASS_BASE + 0x30000000 => DeviceClass::Bus,
            DEVICE_CLASS_BASE + 0x40000000 => DeviceClass::Communication,
            DEVICE_CLASS_BASE + 0x50000000 => DeviceClass::HumanInterface,
            DEVICE_CLASS_BASE + 0x60000000 => DeviceClass::Storage,
            DEVICE_CLASS_BASE + 0x70000000 => DeviceClass::Multimedia,
            DEVICE_CLASS_BASE + 0x80000000 => DeviceClass::Network,
            DEVICE_CLASS_BASE + 0x90000000 => DeviceClass::Display,
            DEVICE_CLASS_BASE + 0xA0000000 => DeviceClass::Input,
            DEVICE_CLASS_BASE + 0xB0000000 => DeviceClass::Output,
            DEVICE_CLASS_BASE + 0xC0000000 => DeviceClass::Sensor,
            DEVICE_CLASS_BASE + 0xD0000000 => DeviceClass::Virtual,
            DEVICE_CLASS_BASE + 0xE0000000 => DeviceClass::Custom,
            _ => DeviceClass::System,
        }
    }

    /// Get class name
    pub fn name(&self) -> &'static str {
        match self {
            DeviceClass::System => "system",
            DeviceClass::Processor => "processor",
            DeviceClass::Memory => "memory",
            DeviceClass::Bus => "bus",
            DeviceClass::Communication => "communication",
            DeviceClass::HumanInterface => "human_interface",
            DeviceClass::Storage => "storage",
            DeviceClass::Multimedia => "multimedia",
            DeviceClass::Network => "network",
            DeviceClass::Display => "display",
            DeviceClass::Input => "input",
            DeviceClass::Output => "output",
            DeviceClass::Sensor => "sensor",
            DeviceClass::Virtual => "virtual",
            DeviceClass::Custom => "custom",
        }
    }
}

/// Device power state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u32)]
pub enum DevicePowerState {
    /// Device is in an unknown power state
    Unknown = 0,
    /// Device is fully powered on
    On = 1,
    /// Device is in a low power state
    LowPower = 2,
    /// Device is in standby mode
    Standby = 3,
    /// Device is in sleep mode
    Sleep = 4,
    /// Device is in deep sleep mode
    DeepSleep = 5,
    /// Device is powered off
    Off = 6,
}

/// Device capability flags
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeviceCapabilities {
    /// Device supports hot-plug
    pub hotplug: bool,
    /// Device supports power management
    pub power_management: bool,
    /// Device supports interrupts
    pub interrupts: bool,
    /// Device supports DMA
    pub dma: bool,
    /// Device supports memory mapping
    pub memory_mapping: bool,
    /// Device supports streaming
    pub streaming: bool,
    /// Device supports asynchronous I/O
    pub async_io: bool,
    /// Device is removable
    pub removable: bool,
    /// Device supports encryption
    pub encryption: bool,
    /// Device supports compression
    pub compression: bool,
    /// Device supports caching
    pub caching: bool,
    /// Device supports throttling
    pub throttling: bool,
    /// Reserved flags
    pub reserved: u32,
}

impl Default for DeviceCapabilities {
    fn default() -> Self {
        Self {
            hotplug: false,
            power_management: false,
            interrupts: true,
            dma: false,
            memory_mapping: false,
            streaming: false,
            async_io: false,
            removable: false,
            encryption: false,
            compression: false,
            caching: false,
            throttling: false,
            reserved: 0,
        }
    }
}

/// Device performance metrics
#[derive(Debug, Clone, Default)]
pub struct DevicePerformanceMetrics {
    /// I/O operations per second
    pub io_ops_per_second: f64,
    /// Average I/O latency in microseconds
    pub avg_io_latency_us: f64,
    /// Throughput in bytes per second
    pub throughput_bps: u64,
    /// Error rate as percentage
    pub error_rate_percent: f64,
    /// CPU utilization percentage
    pub cpu_utilization_percent: f64,
    /// Memory utilization percentage
    pub memory_utilization_percent: f64,
    /// Power consumption in milliwatts
    pub power_consumption_mw: u32,
    /// Temperature in Celsius
    pub temperature_celsius: f32,
    /// Uptime in seconds
    pub uptime_seconds: u64,
    /// Last updated timestamp
    pub last_updated_timestamp: u64,
}

// ============================================================================
// Enhanced Device Model
// ============================================================================

/// Enhanced device information
#[derive(Debug, Clone)]
pub struct EnhancedDeviceInfo {
    /// Base device information
    pub base_info: DeviceInfo,
    /// Device class
    pub device_class: DeviceClass,
    /// Parent device ID (0 for root devices)
    pub parent_id: DeviceId,
    /// Child device IDs
    pub child_ids: Vec<DeviceId>,
    /// Device depth in hierarchy
    pub depth: u32,
    /// Device power state
    pub power_state: DevicePowerState,
    /// Device capabilities
    pub capabilities: DeviceCapabilities,
    /// Device performance metrics
    pub performance_metrics: DevicePerformanceMetrics,
    /// Device firmware version
    pub firmware_version: String,
    /// Device hardware revision
    pub hardware_revision: String,
    /// Device serial number
    pub serial_number: String,
    /// Device UUID
    pub uuid: String,
    /// Device location in system
    pub location: String,
    /// Device alias names
    pub aliases: Vec<String>,
    /// Device tags
    pub tags: Vec<String>,
    /// Device creation timestamp
    pub creation_timestamp: u64,
    /// Device last modified timestamp
    pub last_modified_timestamp: u64,
}

impl Default for EnhancedDeviceInfo {
    fn default() -> Self {
        Self {
            base_info: DeviceInfo {
                id: 0,
                name: "".to_string(),
                device_type: DeviceType::Custom("".to_string()),
                status: DeviceStatus::Uninitialized,
                driver_id: 0,
                path: "".to_string(),
                version: "".to_string(),
                vendor: "".to_string(),
                model: "".to_string(),
                serial_number: "".to_string(),
                resources: DeviceResources::default(),
                capabilities: Vec::new(),
                attributes: BTreeMap::new(),
            },
            device_class: DeviceClass::System,
            parent_id: 0,
            child_ids: Vec::new(),
            depth: 0,
            power_state: DevicePowerState::Unknown,
            capabilities: DeviceCapabilities::default(),
            performance_metrics: DevicePerformanceMetrics::default(),
            firmware_version: "".to_string(),
            hardware_revision: "".to_string(),
            serial_number: "".to_string(),
            uuid: "".to_string(),
            location: "".to_string(),
            aliases: Vec::new(),
            tags: Vec::new(),
            creation_timestamp: 0,
            last_modified_timestamp: 0,
        }
    }
}

/// Device hierarchy node
#[derive(Debug, Clone)]
pub struct DeviceHierarchyNode {
    /// Device information
    pub device_info: EnhancedDeviceInfo,
    /// Parent node reference
    pub parent: Option<DeviceId>,
    /// Child node references
    pub children: Vec<DeviceId>,
    /// Node depth in hierarchy
    pub depth: u32,
}

/// Device model statistics
#[derive(Debug, Default, Clone)]
pub struct DeviceModelStats {
    /// Total number of devices
    pub total_devices: u32,
    /// Number of devices by class
    pub devices_by_class: BTreeMap<DeviceClass, u32>,
    /// Number of devices by power state
    pub devices_by_power_state: BTreeMap<DevicePowerState, u32>,
    /// Number of devices by status
    pub devices_by_status: BTreeMap<DeviceStatus, u32>,
    /// Average hierarchy depth
    pub avg_hierarchy_depth: f32,
    /// Maximum hierarchy depth
    pub max_hierarchy_depth: u32,
    /// Number of hot-plug events
    pub hotplug_events: u64,
    /// Number of power state changes
    pub power_state_changes: u64,
    /// Number of performance updates
    pub performance_updates: u64,
}

// ============================================================================
// Enhanced Device Model Interface
// ============================================================================

/// Enhanced device model interface
pub trait DeviceModel {
    /// Initialize the device model
    fn initialize(&mut self) -> Result<(), KernelError>;
    
    /// Register a device in the model
    fn register_device(&mut self, device_info: EnhancedDeviceInfo) -> Result<DeviceId, KernelError>;
    
    /// Unregister a device from the model
    fn unregister_device(&mut self, device_id: DeviceId) -> Result<(), KernelError>;
    
    /// Get device information
    fn get_device_info(&self, device_id: DeviceId) -> Result<EnhancedDeviceInfo, KernelError>;
    
    /// Update device information
    fn update_device_info(&mut self, device_id: DeviceId, device_info: EnhancedDeviceInfo) -> Result<(), KernelError>;
    
    /// Get device hierarchy
    fn get_device_hierarchy(&self) -> Result<BTreeMap<DeviceId, DeviceHierarchyNode>, KernelError>;
    
    /// Get child devices of a parent
    fn get_child_devices(&self, parent_id: DeviceId) -> Result<Vec<DeviceId>, KernelError>;
    
    /// Get parent device of a child
    fn get_parent_device(&self, child_id: DeviceId) -> Result<Option<DeviceId>, KernelError>;
    
    /// Find devices by class
    fn find_devices_by_class(&self, device_class: DeviceClass) -> Result<Vec<DeviceId>, KernelError>;
    
    /// Find devices by type
    fn find_devices_by_type(&self, device_type: DeviceType) -> Result<Vec<DeviceId>, KernelError>;
    
    /// Find devices by capability
    fn find_devices_by_capability(&self, capability: fn(&DeviceCapabilities) -> bool) -> Result<Vec<DeviceId>, KernelError>;
    
    /// Find devices by power state
    fn find_devices_by_power_state(&self, power_state: DevicePowerState) -> Result<Vec<DeviceId>, KernelError>;
    
    /// Set device power state
    fn set_device_power_state(&mut self, device_id: DeviceId, power_state: DevicePowerState) -> Result<(), KernelError>;
    
    /// Get device power state
    fn get_device_power_state(&self, device_id: DeviceId) -> Result<DevicePowerState, KernelError>;
    
    /// Update device performance metrics
    fn update_device_performance_metrics(&mut self, device_id: DeviceId, metrics: DevicePerformanceMetrics) -> Result<(), KernelError>;
    
    /// Get device performance metrics
    fn get_device_performance_metrics(&self, device_id: DeviceId) -> Result<DevicePerformanceMetrics, KernelError>;
    
    /// Get device model statistics
    fn get_stats(&self) -> DeviceModelStats;
    
    /// Reset device model statistics
    fn reset_stats(&mut self);
    
    /// Validate device hierarchy
    fn validate_hierarchy(&self) -> Result<(), KernelError>;
    
    /// Optimize device hierarchy
    fn optimize_hierarchy(&mut self) -> Result<(), KernelError>;
}

// ============================================================================
// Enhanced Device Model Implementation
// ============================================================================

/// Enhanced device model implementation
pub struct EnhancedDeviceModel {
    /// Device registry
    devices: Mutex<BTreeMap<DeviceId, EnhancedDeviceInfo>>,
    /// Device hierarchy
    hierarchy: Mutex<BTreeMap<DeviceId, DeviceHierarchyNode>>,
    /// Next device ID
    next_device_id: AtomicU32,
    /// Device model statistics
    stats: Mutex<DeviceModelStats>,
    /// Model initialized flag
    initialized: AtomicBool,
}

impl EnhancedDeviceModel {
    /// Create a new enhanced device model
    pub fn new() -> Self {
        Self {
            devices: Mutex::new(BTreeMap::new()),
            hierarchy: Mutex::new(BTreeMap::new()),
            next_device_id: AtomicU32::new(1),
            stats: Mutex::new(DeviceModelStats::default()),
            initialized: AtomicBool::new(false),
        }
    }
}

impl DeviceModel for EnhancedDeviceModel {
    fn initialize(&mut self) -> Result<(), KernelError> {
        if self.initialized.load(Ordering::SeqCst) {
            return Ok(());
        }
        
        // Initialize device registry
        {
            let mut devices = self.devices.lock();
            devices.clear();
        }
        
        // Initialize device hierarchy
        {
            let mut hierarchy = self.hierarchy.lock();
            hierarchy.clear();
        }
        
        // Reset statistics
        {
            let mut stats = self.stats.lock();
            *stats = DeviceModelStats::default();
        }
        
        self.initialized.store(true, Ordering::SeqCst);
        
        crate::println!("device_model: enhanced device model initialized");
        Ok(())
    }
    
    fn register_device(&mut self, device_info: EnhancedDeviceInfo) -> Result<DeviceId, KernelError> {
        if !self.initialized.load(Ordering::SeqCst) {
            return Err(KernelError::InvalidState);
        }
        
        // Generate device ID
        let device_id = self.next_device_id.fetch_add(1, Ordering::SeqCst);
        
        // Validate device hierarchy
        if device_info.depth > MAX_DEVICE_DEPTH {
            return Err(KernelError::InvalidArgument);
        }
        
        // Check parent device exists (if not root)
        if device_info.parent_id != 0 {
            let devices = self.devices.lock();
            if !devices.contains_key(&device_info.parent_id) {
                return Err(KernelError::NotFound);
            }
        }
        
        // Clone and update device info with new ID
        let mut new_device_info = device_info.clone();
        new_device_info.base_info.id = device_id;
        new_device_info.creation_timestamp = self.get_current_time();
        new_device_info.last_modified_timestamp = new_device_info.creation_timestamp;
        
        // Add to device registry
        {
            let mut devices = self.devices.lock();
            devices.insert(device_id, new_device_info.clone());
        }
        
        // Add to hierarchy
        {
            let mut hierarchy = self.hierarchy.lock();
            let node = DeviceHierarchyNode {
                device_info: new_device_info.clone(),
                parent: if device_info.parent_id == 0 { None } else { Some(device_info.parent_id) },
                children: Vec::new(),
                depth: device_info.depth,
            };
            hierarchy.insert(device_id, node);
            
            // Update parent's children list
            if device_info.parent_id != 0 {
                if let Some(parent_node) = hierarchy.get_mut(&device_info.parent_id) {
                    parent_node.children.push(device_id);
                }
            }
        }
        
        // Update statistics
        {
            let mut stats = self.stats.lock();
            stats.total_devices += 1;
            
            // Update devices by class
            *stats.devices_by_class.entry(new_device_info.device_class).or_insert(0) += 1;
            
            // Update devices by power state
            *stats.devices_by_power_state.entry(new_device_info.power_state).or_insert(0) += 1;
            
            // Update devices by status
            *stats.devices_by_status.entry(new_device_info.base_info.status).or_insert(0) += 1;
            
            // Update max hierarchy depth
            if new_device_info.depth > stats.max_hierarchy_depth {
                stats.max_hierarchy_depth = new_device_info.depth;
            }
            
            // Update average hierarchy depth
            let total_depth = stats.total_devices as f32 * stats.avg_hierarchy_depth + new_device_info.depth as f32;
            stats.avg_hierarchy_depth = total_depth / stats.total_devices as f32;
        }
        
        crate::println!("device_model: registered device {} ({})", device_id, new_device_info.base_info.name);
        Ok(device_id)
    }
    
    fn unregister_device(&mut self, device_id: DeviceId) -> Result<(), KernelError> {
        if !self.initialized.load(Ordering::SeqCst) {
            return Err(KernelError::InvalidState);
        }
        
        // Get device info before removal
        let device_info = {
            let devices = self.devices.lock();
            devices.get(&device_id).cloned()
                .ok_or(KernelError::NotFound)?
        };
        
        // Check if device has children
        {
            let hierarchy = self.hierarchy.lock();
            if let Some(node) = hierarchy.get(&device_id) {
                if !node.children.is_empty() {
                    return Err(KernelError::InvalidState); // Cannot remove device with children
                }
            }
        }
        
        // Remove from device registry
        {
            let mut devices = self.devices.lock();
            devices.remove(&device_id);
        }
        
        // Remove from hierarchy
        {
            let mut hierarchy = self.hierarchy.lock();
            
            // Remove from parent's children list
            if let Some(node) = hierarchy.get(&device_id) {
                if let Some(parent_id) = node.parent {
                    if let Some(parent_node) = hierarchy.get_mut(&parent_id) {
                        parent_node.children.retain(|&id| id != device_id);
                    }
                }
            }
            
            hierarchy.remove(&device_id);
        }
        
        // Update statistics
        {
            let mut stats = self.stats.lock();
            stats.total_devices = stats.total_devices.saturating_sub(1);
            
            // Update devices by class
            if let Some(count) = stats.devices_by_class.get_mut(&device_info.device_class) {
                *count = count.saturating_sub(1);
                if *count == 0 {
                    stats.devices_by_class.remove(&device_info.device_class);
                }
            }
            
            // Update devices by power state
            if let Some(count) = stats.devices_by_power_state.get_mut(&device_info.power_state) {
                *count = count.saturating_sub(1);
                if *count == 0 {
                    stats.devices_by_power_state.remove(&device_info.power_state);
                }
            }
            
            // Update devices by status
            if let Some(count) = stats.devices_by_status.get_mut(&device_info.base_info.status) {
                *count = count.saturating_sub(1);
                if *count == 0 {
                    stats.devices_by_status.remove(&device_info.base_info.status);
                }
            }
            
            // Recalculate average hierarchy depth
            if stats.total_devices > 0 {
                let mut total_depth = 0.0;
                let hierarchy = self.hierarchy.lock();
                for node in hierarchy.values() {
                    total_depth += node.depth as f32;
                }
                stats.avg_hierarchy_depth = total_depth / stats.total_devices as f32;
            } else {
                stats.avg_hierarchy_depth = 0.0;
                stats.max_hierarchy_depth = 0;
            }
        }
        
        crate::println!("device_model: unregistered device {} ({})", device_id, device_info.base_info.name);
        Ok(())
    }
    
    fn get_device_info(&self, device_id: DeviceId) -> Result<EnhancedDeviceInfo, KernelError> {
        if !self.initialized.load(Ordering::SeqCst) {
            return Err(KernelError::InvalidState);
        }
        
        let devices = self.devices.lock();
        devices.get(&device_id).cloned()
            .ok_or(KernelError::NotFound)
    }
    
    fn update_device_info(&mut self, device_id: DeviceId, device_info: EnhancedDeviceInfo) -> Result<(), KernelError> {
        if !self.initialized.load(Ordering::SeqCst) {
            return Err(KernelError::InvalidState);
        }
        
        // Check if device exists
        {
            let devices = self.devices.lock();
            if !devices.contains_key(&device_id) {
                return Err(KernelError::NotFound);
            }
        }
        
        // Update device info
        let mut updated_info = device_info;
        updated_info.base_info.id = device_id;
        updated_info.last_modified_timestamp = self.get_current_time();
        
        {
            let mut devices = self.devices.lock();
            devices.insert(device_id, updated_info.clone());
        }
        
        // Update hierarchy
        {
            let mut hierarchy = self.hierarchy.lock();
            if let Some(node) = hierarchy.get_mut(&device_id) {
                node.device_info = updated_info.clone();
            }
        }
        
        Ok(())
    }
    
    fn get_device_hierarchy(&self) -> Result<BTreeMap<DeviceId, DeviceHierarchyNode>, KernelError> {
        if !self.initialized.load(Ordering::SeqCst) {
            return Err(KernelError::InvalidState);
        }
        
        let hierarchy = self.hierarchy.lock();
        Ok(hierarchy.clone())
    }
    
    fn get_child_devices(&self, parent_id: DeviceId) -> Result<Vec<DeviceId>, KernelError> {
        if !self.initialized.load(Ordering::SeqCst) {
            return Err(KernelError::InvalidState);
        }
        
        let hierarchy = self.hierarchy.lock();
        if let Some(node) = hierarchy.get(&parent_id) {
            Ok(node.children.clone())
        } else {
            Err(KernelError::NotFound)
        }
    }
    
    fn get_parent_device(&self, child_id: DeviceId) -> Result<Option<DeviceId>, KernelError> {
        if !self.initialized.load(Ordering::SeqCst) {
            return Err(KernelError::InvalidState);
        }
        
        let hierarchy = self.hierarchy.lock();
        if let Some(node) = hierarchy.get(&child_id) {
            Ok(node.parent)
        } else {
            Err(KernelError::NotFound)
        }
    }
    
    fn find_devices_by_class(&self, device_class: DeviceClass) -> Result<Vec<DeviceId>, KernelError> {
        if !self.initialized.load(Ordering::SeqCst) {
            return Err(KernelError::InvalidState);
        }
        
        let devices = self.devices.lock();
        let mut result = Vec::new();
        
        for (id, info) in devices.iter() {
            if info.device_class == device_class {
                result.push(*id);
            }
        }
        
        Ok(result)
    }
    
    fn find_devices_by_type(&self, device_type: DeviceType) -> Result<Vec<DeviceId>, KernelError> {
        if !self.initialized.load(Ordering::SeqCst) {
            return Err(KernelError::InvalidState);
        }
        
        let devices = self.devices.lock();
        let mut result = Vec::new();
        
        for (id, info) in devices.iter() {
            if info.base_info.device_type == device_type {
                result.push(*id);
            }
        }
        
        Ok(result)
    }
    
    fn find_devices_by_capability(&self, capability: fn(&DeviceCapabilities) -> bool) -> Result<Vec<DeviceId>, KernelError> {
        if !self.initialized.load(Ordering::SeqCst) {
            return Err(KernelError::InvalidState);
        }
        
        let devices = self.devices.lock();
        let mut result = Vec::new();
        
        for (id, info) in devices.iter() {
            if capability(&info.capabilities) {
                result.push(*id);
            }
        }
        
        Ok(result)
    }
    
    fn find_devices_by_power_state(&self, power_state: DevicePowerState) -> Result<Vec<DeviceId>, KernelError> {
        if !self.initialized.load(Ordering::SeqCst) {
            return Err(KernelError::InvalidState);
        }
        
        let devices = self.devices.lock();
        let mut result = Vec::new();
        
        for (id, info) in devices.iter() {
            if info.power_state == power_state {
                result.push(*id);
            }
        }
        
        Ok(result)
    }
    
    fn set_device_power_state(&mut self, device_id: DeviceId, power_state: DevicePowerState) -> Result<(), KernelError> {
        if !self.initialized.load(Ordering::SeqCst) {
            return Err(KernelError::InvalidState);
        }
        
        // Get current device info
        let mut device_info = {
            let mut devices = self.devices.lock();
            let info = devices.get_mut(&device_id).ok_or(KernelError::NotFound)?;
            let old_power_state = info.power_state;
            info.power_state = power_state;
            info.clone()
        };
        
        // Update hierarchy
        {
            let mut hierarchy = self.hierarchy.lock();
            if let Some(node) = hierarchy.get_mut(&device_id) {
                node.device_info.power_state = power_state;
            }
        }
        
        // Update statistics
        {
            let mut stats = self.stats.lock();
            
            // Update devices by power state
            if let Some(count) = stats.devices_by_power_state.get_mut(&device_info.power_state) {
                *count = count.saturating_sub(1);
                if *count == 0 {
                    stats.devices_by_power_state.remove(&device_info.power_state);
                }
            }
            
            *stats.devices_by_power_state.entry(power_state).or_insert(0) += 1;
            
            stats.power_state_changes += 1;
        }
        
        crate::println!("device_model: set device {} power state to {:?}", device_id, power_state);
        Ok(())
    }
    
    fn get_device_power_state(&self, device_id: DeviceId) -> Result<DevicePowerState, KernelError> {
        if !self.initialized.load(Ordering::SeqCst) {
            return Err(KernelError::InvalidState);
        }
        
        let devices = self.devices.lock();
        let info = devices.get(&device_id).ok_or(KernelError::NotFound)?;
        Ok(info.power_state)
    }
    
    fn update_device_performance_metrics(&mut self, device_id: DeviceId, metrics: DevicePerformanceMetrics) -> Result<(), KernelError> {
        if !self.initialized.load(Ordering::SeqCst) {
            return Err(KernelError::InvalidState);
        }
        
        // Update device info
        {
            let mut devices = self.devices.lock();
            let info = devices.get_mut(&device_id).ok_or(KernelError::NotFound)?;
            info.performance_metrics = metrics.clone();
        }
        
        // Update hierarchy
        {
            let mut hierarchy = self.hierarchy.lock();
            if let Some(node) = hierarchy.get_mut(&device_id) {
                node.device_info.performance_metrics = metrics;
            }
        }
        
        // Update statistics
        {
            let mut stats = self.stats.lock();
            stats.performance_updates += 1;
        }
        
        Ok(())
    }
    
    fn get_device_performance_metrics(&self, device_id: DeviceId) -> Result<DevicePerformanceMetrics, KernelError> {
        if !self.initialized.load(Ordering::SeqCst) {
            return Err(KernelError::InvalidState);
        }
        
        let devices = self.devices.lock();
        let info = devices.get(&device_id).ok_or(KernelError::NotFound)?;
        Ok(info.performance_metrics.clone())
    }
    
    fn get_stats(&self) -> DeviceModelStats {
        self.stats.lock().clone()
    }
    
    fn reset_stats(&mut self) {
        let mut stats = self.stats.lock();
        *stats = DeviceModelStats::default();
    }
    
    fn validate_hierarchy(&self) -> Result<(), KernelError> {
        if !self.initialized.load(Ordering::SeqCst) {
            return Err(KernelError::InvalidState);
        }
        
        let hierarchy = self.hierarchy.lock();
        
        // Check for cycles
        let mut visited = BTreeMap::new();
        let mut recursion_stack = BTreeMap::new();
        
        for (device_id, _) in hierarchy.iter() {
            if !visited.contains_key(device_id) {
                if self.has_cycle(*device_id, &hierarchy, &mut visited, &mut recursion_stack)? {
                    return Err(KernelError::InvalidState); // Cycle detected
                }
            }
        }
        
        // Check for orphaned devices
        for (device_id, node) in hierarchy.iter() {
            if node.parent.is_none() && *device_id != 0 {
                // This is a root device (no parent), which is valid
                continue;
            }
            
            if let Some(parent_id) = node.parent {
                if !hierarchy.contains_key(&parent_id) {
                    return Err(KernelError::InvalidState); // Parent not found
                }
            }
        }
        
        // Check depth limits
        for (_, node) in hierarchy.iter() {
            if node.depth > MAX_DEVICE_DEPTH {
                return Err(KernelError::InvalidState); // Depth exceeded
            }
        }
        
        Ok(())
    }
    
    fn optimize_hierarchy(&mut self) -> Result<(), KernelError> {
        if !self.initialized.load(Ordering::SeqCst) {
            return Err(KernelError::InvalidState);
        }
        
        // In a real implementation, this would optimize the device hierarchy
        // by reorganizing devices for better performance
        
        crate::println!("device_model: hierarchy optimization completed");
        Ok(())
    }
}

impl EnhancedDeviceModel {
    /// Check for cycles in device hierarchy
    fn has_cycle(
        &self,
        device_id: DeviceId,
        hierarchy: &BTreeMap<DeviceId, DeviceHierarchyNode>,
        visited: &mut BTreeMap<DeviceId, bool>,
        recursion_stack: &mut BTreeMap<DeviceId, bool>,
    ) -> Result<bool, KernelError> {
        visited.insert(device_id, true);
        recursion_stack.insert(device_id, true);
        
        if let Some(node) = hierarchy.get(&device_id) {
            for &child_id in &node.children {
                if !visited.contains_key(&child_id) {
                    if self.has_cycle(child_id, hierarchy, visited, recursion_stack)? {
                        return Ok(true);
                    }
                } else if *recursion_stack.get(&child_id).unwrap_or(&false) {
                    return Ok(true); // Cycle detected
                }
            }
        }
        
        recursion_stack.insert(device_id, false);
        Ok(false)
    }
    
    /// Get current time in milliseconds
    fn get_current_time(&self) -> u64 {
        // In a real implementation, this would get the current time
        // from the system clock
        0
    }
}

impl Default for EnhancedDeviceModel {
    fn default() -> Self {
        Self::new()
    }
}

/// Global enhanced device model instance
static mut ENHANCED_DEVICE_MODEL: Option<EnhancedDeviceModel> = None;

/// Initialize enhanced device model
pub fn init() -> Result<(), KernelError> {
    unsafe {
        let mut model = EnhancedDeviceModel::new();
        model.initialize()?;
        ENHANCED_DEVICE_MODEL = Some(model);
    }
    Ok(())
}

/// Get enhanced device model instance
pub fn get_enhanced_device_model() -> Option<&'static mut EnhancedDeviceModel> {
    unsafe { ENHANCED_DEVICE_MODEL.as_mut() }
}