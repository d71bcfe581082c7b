//! Device Discovery and Enumeration
//!
//! This module provides comprehensive device discovery and enumeration capabilities for NOS,
//! supporting various bus types (PCI, USB, etc.) and automatic device detection.

extern crate alloc;
use alloc::vec::Vec;
use alloc::collections::BTreeMap;
use alloc::string::{String, ToString};
use alloc::sync::Arc;
use core::sync::atomic::{AtomicU64, AtomicU32, AtomicBool, Ordering};
use crate::subsystems::sync::{Mutex, Sleeplock};
use crate::subsystems::drivers::driver_manager::{
    DeviceId, DriverId, DeviceType, DeviceStatus, DeviceInfo, DeviceResources
};
use crate::subsystems::drivers::device_model::{
    DeviceModel, EnhancedDeviceInfo, DeviceClass, DevicePowerState, DeviceCapabilities,
    EnhancedDeviceModel, get_enhanced_device_model
};
use nos_nos_error_handling::unified::KernelError;

// ============================================================================
// Device Discovery Constants
// ============================================================================

/// Default discovery interval in seconds
pub const DEFAULT_DISCOVERY_INTERVAL: u64 = 30;

/// Maximum number of discovery retries
pub const MAX_DISCOVERY_RETRIES: u32 = 3;

/// Discovery timeout in milliseconds
pub const DISCOVERY_TIMEOUT_MS: u64 = 5000;

/// PCI configuration space size
pub const PCI_CONFIG_SPACE_SIZE: usize = 256;

/// USB device descriptor size
pub const USB_DEVICE_DESC_SIZE: usize = 18;

// ============================================================================
// Bus Types
// ============================================================================

/// Bus types for device discovery
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u32)]
pub enum BusType {
    /// PCI bus
    Pci = 1,
    /// USB bus
    Usb = 2,
    /// ISA bus
    Isa = 3,
    /// ACPI bus
    Acpi = 4,
    /// Platform bus
    Platform = 5,
    /// I2C bus
    I2c = 6,
    /// SPI bus
    Spi = 7,
    /// Virtual bus
    Virtual = 8,
    /// Custom bus
    Custom = 9,
}

impl BusType {
    /// Get bus name
    pub fn name(&self) -> &'static str {
        match self {
            BusType::Pci => "pci",
            BusType::Usb => "usb",
            BusType::Isa => "isa",
            BusType::Acpi => "acpi",
            BusType::Platform => "platform",
            BusType::I2c => "i2c",
            BusType::Spi => "spi",
            BusType::Virtual => "virtual",
            BusType::Custom => "custom",
        }
    }
}

// ============================================================================
// Device Identification
// ============================================================================

/// PCI device identification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(C)]
pub struct PciDeviceId {
    /// Vendor ID
    pub vendor_id: u16,
    /// Device ID
    pub device_id: u16,
    /// Class code
    pub class_code: u8,
    /// Subclass
    pub subclass: u8,
    /// Programming interface
    pub prog_if: u8,
    /// Revision ID
    pub revision_id: u8,
}

impl Default for PciDeviceId {
    fn default() -> Self {
        Self {
            vendor_id: 0,
            device_id: 0,
            class_code: 0,
            subclass: 0,
            prog_if: 0,
            revision_id: 0,
        }
    }
}

/// USB device identification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(C)]
pub struct UsbDeviceId {
    /// Vendor ID
    pub vendor_id: u16,
    /// Product ID
    pub product_id: u16,
    /// Device class
    pub device_class: u8,
    /// Device subclass
    pub device_subclass: u8,
    /// Device protocol
    pub device_protocol: u8,
    /// Device version
    pub device_version: u8,
}

impl Default for UsbDeviceId {
    fn default() -> Self {
        Self {
            vendor_id: 0,
            product_id: 0,
            device_class: 0,
            device_subclass: 0,
            device_protocol: 0,
            device_version: 0,
        }
    }
}

/// ACPI device identification
#[derive(Debug, Clone)]
pub struct AcpiDeviceId {
    /// Hardware ID
    pub hid: String,
    /// Unique ID
    pub uid: String,
    /// Compatible IDs
    pub compatible_ids: Vec<String>,
    /// ACPI address
    pub address: u64,
}

impl Default for AcpiDeviceId {
    fn default() -> Self {
        Self {
            hid: String::new(),
            uid: String::new(),
            compatible_ids: Vec::new(),
            address: 0,
        }
    }
}

/// Platform device identification
#[derive(Debug, Clone)]
pub struct PlatformDeviceId {
    /// Device name
    pub name: String,
    /// Device ID
    pub id: u32,
    /// Compatible strings
    pub compatible: Vec<String>,
    /// Device resources
    pub resources: DeviceResources,
}

impl Default for PlatformDeviceId {
    fn default() -> Self {
        Self {
            name: String::new(),
            id: 0,
            compatible: Vec::new(),
            resources: DeviceResources::default(),
        }
    }
}

/// Device identification
#[derive(Debug, Clone)]
pub enum DeviceIdentification {
    /// PCI device
    Pci(PciDeviceId),
    /// USB device
    Usb(UsbDeviceId),
    /// ACPI device
    Acpi(AcpiDeviceId),
    /// Platform device
    Platform(PlatformDeviceId),
    /// Custom identification
    Custom(BTreeMap<String, Vec<u8>>),
}

// ============================================================================
// Discovery Events
// ============================================================================

/// Discovery event types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u32)]
pub enum DiscoveryEventType {
    /// Device discovered
    DeviceDiscovered = 1,
    /// Device removed
    DeviceRemoved = 2,
    /// Device changed
    DeviceChanged = 3,
    /// Discovery started
    DiscoveryStarted = 4,
    /// Discovery completed
    DiscoveryCompleted = 5,
    /// Discovery error
    DiscoveryError = 6,
}

/// Discovery event
#[derive(Debug, Clone)]
pub struct DiscoveryEvent {
    /// Event type
    pub event_type: DiscoveryEventType,
    /// Timestamp
    pub timestamp: u64,
    /// Device ID (if applicable)
    pub device_id: Option<DeviceId>,
    /// Bus type
    pub bus_type: BusType,
    /// Device identification (if applicable)
    pub device_identification: Option<DeviceIdentification>,
    /// Event data
    pub data: Vec<u8>,
}

// ============================================================================
// Discovery Statistics
// ============================================================================

/// Discovery statistics
#[derive(Debug, Default, Clone)]
pub struct DiscoveryStats {
    /// Total number of discoveries
    pub total_discoveries: u64,
    /// Successful discoveries
    pub successful_discoveries: u64,
    /// Failed discoveries
    pub failed_discoveries: u64,
    /// Devices discovered by bus type
    pub devices_by_bus_type: BTreeMap<BusType, u32>,
    /// Total discovery time in milliseconds
    pub total_discovery_time_ms: u64,
    /// Average discovery time in milliseconds
    pub avg_discovery_time_ms: u64,
    /// Last discovery timestamp
    pub last_discovery_timestamp: u64,
    /// Number of hot-plug events
    pub hotplug_events: u64,
}

// ============================================================================
// Bus Discovery Interface
// ============================================================================

/// Bus discovery interface
pub trait BusDiscovery {
    /// Get bus type
    fn get_bus_type(&self) -> BusType;
    
    /// Initialize bus discovery
    fn initialize(&mut self) -> Result<(), KernelError>;
    
    /// Cleanup bus discovery
    fn cleanup(&mut self) -> Result<(), KernelError>;
    
    /// Discover devices on this bus
    fn discover_devices(&mut self) -> Result<Vec<DeviceIdentification>, KernelError>;
    
    /// Check if device is present
    fn is_device_present(&self, device_id: &DeviceIdentification) -> Result<bool, KernelError>;
    
    /// Get device information
    fn get_device_info(&self, device_id: &DeviceIdentification) -> Result<DeviceInfo, KernelError>;
    
    /// Enable/disable hot-plug detection
    fn set_hotplug_detection(&mut self, enabled: bool) -> Result<(), KernelError>;
    
    /// Get bus statistics
    fn get_bus_stats(&self) -> BTreeMap<String, u64>;
}

// ============================================================================
// Device Discovery Manager
// ============================================================================

/// Device discovery manager
pub struct DeviceDiscoveryManager {
    /// Bus discovery implementations
    bus_discoveries: Mutex<BTreeMap<BusType, Box<dyn BusDiscovery>>>,
    /// Device model
    device_model: Option<&'static mut EnhancedDeviceModel>,
    /// Discovery events
    discovery_events: Mutex<Vec<DiscoveryEvent>>,
    /// Discovery statistics
    stats: Mutex<DiscoveryStats>,
    /// Discovery interval in seconds
    discovery_interval: AtomicU64,
    /// Auto discovery enabled
    auto_discovery_enabled: AtomicBool,
    /// Hot-plug detection enabled
    hotplug_detection_enabled: AtomicBool,
    /// Discovery in progress
    discovery_in_progress: AtomicBool,
    /// Last discovery time
    last_discovery_time: AtomicU64,
    /// Next event ID
    next_event_id: AtomicU32,
}

impl DeviceDiscoveryManager {
    /// Create a new device discovery manager
    pub fn new() -> Self {
        Self {
            bus_discoveries: Mutex::new(BTreeMap::new()),
            device_model: None,
            discovery_events: Mutex::new(Vec::new()),
            stats: Mutex::new(DiscoveryStats::default()),
            discovery_interval: AtomicU64::new(DEFAULT_DISCOVERY_INTERVAL),
            auto_discovery_enabled: AtomicBool::new(true),
            hotplug_detection_enabled: AtomicBool::new(true),
            discovery_in_progress: AtomicBool::new(false),
            last_discovery_time: AtomicU64::new(0),
            next_event_id: AtomicU32::new(1),
        }
    }

    /// Initialize the discovery manager
    pub fn initialize(&mut self) -> Result<(), KernelError> {
        // Get device model
        self.device_model = get_enhanced_device_model();
        if self.device_model.is_none() {
            return Err(KernelError::InvalidState);
        }

        // Initialize all bus discoveries
        {
            let mut bus_discoveries = self.bus_discoveries.lock();
            for (_, discovery) in bus_discoveries.iter_mut() {
                discovery.initialize()?;
            }
        }

        // Enable hot-plug detection if configured
        if self.hotplug_detection_enabled.load(Ordering::SeqCst) {
            self.enable_hotplug_detection()?;
        }

        crate::println!("discovery: device discovery manager initialized");
        Ok(())
    }

    /// Register a bus discovery implementation
    pub fn register_bus_discovery(&mut self, bus_type: BusType, discovery: Box<dyn BusDiscovery>) -> Result<(), KernelError> {
        // Initialize the discovery
        let mut discovery = discovery;
        discovery.initialize()?;

        // Add to bus discoveries
        {
            let mut bus_discoveries = self.bus_discoveries.lock();
            bus_discoveries.insert(bus_type, discovery);
        }

        crate::println!("discovery: registered {} bus discovery", bus_type.name());
        Ok(())
    }

    /// Unregister a bus discovery implementation
    pub fn unregister_bus_discovery(&mut self, bus_type: BusType) -> Result<(), KernelError> {
        // Remove from bus discoveries
        let discovery = {
            let mut bus_discoveries = self.bus_discoveries.lock();
            bus_discoveries.remove(&bus_type)
        };

        // Cleanup the discovery
        if let Some(mut discovery) = discovery {
            discovery.cleanup()?;
        }

        crate::println!("discovery: unregistered {} bus discovery", bus_type.name());
        Ok(())
    }

    /// Discover all devices
    pub fn discover_all_devices(&mut self) -> Result<Vec<DeviceId>, KernelError> {
        if self.discovery_in_progress.load(Ordering::SeqCst) {
            return Err(KernelError::Busy);
        }

        self.discovery_in_progress.store(true, Ordering::SeqCst);
        let start_time = self.get_current_time();

        // Log discovery started event
        self.log_discovery_event(DiscoveryEventType::DiscoveryStarted, None, BusType::Pci, None, Vec::new())?;

        // Update statistics
        {
            let mut stats = self.stats.lock();
            stats.total_discoveries += 1;
            stats.last_discovery_timestamp = start_time;
        }

        let mut discovered_devices = Vec::new();
        let mut successful_discoveries = 0;
        let mut failed_discoveries = 0;

        // Discover devices on each bus
        {
            let mut bus_discoveries = self.bus_discoveries.lock();
            for (bus_type, discovery) in bus_discoveries.iter_mut() {
                match discovery.discover_devices() {
                    Ok(device_ids) => {
                        for device_id in device_ids {
                            match self.process_discovered_device(*bus_type, device_id) {
                                Ok(device_id) => {
                                    discovered_devices.push(device_id);
                                    successful_discoveries += 1;
                                }
                                Err(_) => {
                                    failed_discoveries += 1;
                                }
                            }
                        }
                    }
                    Err(_) => {
                        failed_discoveries += 1;
                    }
                }
            }
        }

        // Update statistics
        let discovery_time = self.get_current_time() - start_time;
        {
            let mut stats = self.stats.lock();
            stats.successful_discoveries += successful_discoveries as u64;
            stats.failed_discoveries += failed_discoveries as u64;
            stats.total_discovery_time_ms += discovery_time;
            
            if stats.total_discoveries > 0 {
                stats.avg_discovery_time_ms = stats.total_discovery_time_ms / stats.total_discoveries;
            }
        }

        // Log discovery completed event
        self.log_discovery_event(DiscoveryEventType::DiscoveryCompleted, None, BusType::Pci, None, Vec::new())?;

        self.last_discovery_time.store(start_time, Ordering::SeqCst);
        self.discovery_in_progress.store(false, Ordering::SeqCst);

        crate::println!("discovery: discovered {} devices in {}ms", discovered_devices.len(), discovery_time);
        Ok(discovered_devices)
    }

    /// Discover devices on a specific bus
    pub fn discover_devices_on_bus(&mut self, bus_type: BusType) -> Result<Vec<DeviceId>, KernelError> {
        if self.discovery_in_progress.load(Ordering::SeqCst) {
            return Err(KernelError::Busy);
        }

        self.discovery_in_progress.store(true, Ordering::SeqCst);
        let start_time = self.get_current_time();

        let mut discovered_devices = Vec::new();

        // Discover devices on the specified bus
        {
            let mut bus_discoveries = self.bus_discoveries.lock();
            if let Some(discovery) = bus_discoveries.get_mut(&bus_type) {
                match discovery.discover_devices() {
                    Ok(device_ids) => {
                        for device_id in device_ids {
                            match self.process_discovered_device(bus_type, device_id) {
                                Ok(device_id) => {
                                    discovered_devices.push(device_id);
                                }
                                Err(_) => {
                                    // Log error but continue with other devices
                                }
                            }
                        }
                    }
                    Err(e) => {
                        crate::println!("discovery: failed to discover {} devices: {:?}", bus_type.name(), e);
                    }
                }
            }
        }

        let discovery_time = self.get_current_time() - start_time;
        self.discovery_in_progress.store(false, Ordering::SeqCst);

        crate::println!("discovery: discovered {} {} devices in {}ms", discovered_devices.len(), bus_type.name(), discovery_time);
        Ok(discovered_devices)
    }

    /// Enable/disable auto discovery
    pub fn set_auto_discovery(&self, enabled: bool) {
        self.auto_discovery_enabled.store(enabled, Ordering::SeqCst);
    }

    /// Check if auto discovery is enabled
    pub fn is_auto_discovery_enabled(&self) -> bool {
        self.auto_discovery_enabled.load(Ordering::SeqCst)
    }

    /// Set discovery interval
    pub fn set_discovery_interval(&self, interval_seconds: u64) {
        self.discovery_interval.store(interval_seconds, Ordering::SeqCst);
    }

    /// Get discovery interval
    pub fn get_discovery_interval(&self) -> u64 {
        self.discovery_interval.load(Ordering::SeqCst)
    }

    /// Enable/disable hot-plug detection
    pub fn enable_hotplug_detection(&self) -> Result<(), KernelError> {
        self.hotplug_detection_enabled.store(true, Ordering::SeqCst);

        // Enable hot-plug detection for all buses
        {
            let mut bus_discoveries = self.bus_discoveries.lock();
            for (_, discovery) in bus_discoveries.iter_mut() {
                discovery.set_hotplug_detection(true)?;
            }
        }

        crate::println!("discovery: hot-plug detection enabled");
        Ok(())
    }

    /// Disable hot-plug detection
    pub fn disable_hotplug_detection(&self) -> Result<(), KernelError> {
        self.hotplug_detection_enabled.store(false, Ordering::SeqCst);

        // Disable hot-plug detection for all buses
        {
            let mut bus_discoveries = self.bus_discoveries.lock();
            for (_, discovery) in bus_discoveries.iter_mut() {
                discovery.set_hotplug_detection(false)?;
            }
        }

        crate::println!("discovery: hot-plug detection disabled");
        Ok(())
    }

    /// Check if hot-plug detection is enabled
    pub fn is_hotplug_detection_enabled(&self) -> bool {
        self.hotplug_detection_enabled.load(Ordering::SeqCst)
    }

    /// Get discovery statistics
    pub fn get_stats(&self) -> DiscoveryStats {
        self.stats.lock().clone()
    }

    /// Reset discovery statistics
    pub fn reset_stats(&self) {
        let mut stats = self.stats.lock();
        *stats = DiscoveryStats::default();
    }

    /// Get discovery events
    pub fn get_discovery_events(&self) -> Vec<DiscoveryEvent> {
        self.discovery_events.lock().clone()
    }

    /// Clear discovery events
    pub fn clear_discovery_events(&self) {
        let mut events = self.discovery_events.lock();
        events.clear();
    }

    /// Periodic maintenance task
    pub fn periodic_maintenance(&mut self) -> Result<(), KernelError> {
        // Check if we need to run auto discovery
        if self.auto_discovery_enabled.load(Ordering::SeqCst) {
            let current_time = self.get_current_time();
            let last_discovery = self.last_discovery_time.load(Ordering::SeqCst);
            let interval = self.discovery_interval.load(Ordering::SeqCst) * 1000; // Convert to milliseconds

            if current_time - last_discovery >= interval {
                self.discover_all_devices()?;
            }
        }

        Ok(())
    }

    /// Process a discovered device
    fn process_discovered_device(&mut self, bus_type: BusType, device_id: DeviceIdentification) -> Result<DeviceId, KernelError> {
        // Get device info from bus discovery
        let device_info = {
            let bus_discoveries = self.bus_discoveries.lock();
            if let Some(discovery) = bus_discoveries.get(&bus_type) {
                discovery.get_device_info(&device_id)?
            } else {
                return Err(KernelError::NotFound);
            }
        };

        // Convert to enhanced device info
        let enhanced_device_info = self.convert_to_enhanced_device_info(device_info, bus_type, device_id)?;

        // Register with device model
        if let Some(ref mut device_model) = self.device_model {
            let device_id = device_model.register_device(enhanced_device_info)?;

            // Log device discovered event
            self.log_discovery_event(
                DiscoveryEventType::DeviceDiscovered,
                Some(device_id),
                bus_type,
                Some(device_id),
                Vec::new()
            )?;

            // Update statistics
            {
                let mut stats = self.stats.lock();
                *stats.devices_by_bus_type.entry(bus_type).or_insert(0) += 1;
            }

            Ok(device_id)
        } else {
            Err(KernelError::InvalidState)
        }
    }

    /// Convert device info to enhanced device info
    fn convert_to_enhanced_device_info(
        &self,
        device_info: DeviceInfo,
        bus_type: BusType,
        device_identification: DeviceIdentification,
    ) -> Result<EnhancedDeviceInfo, KernelError> {
        // Determine device class based on identification
        let device_class = self.determine_device_class(&device_identification);

        // Determine device capabilities
        let capabilities = self.determine_device_capabilities(&device_identification);

        // Create enhanced device info
        let mut enhanced_info = EnhancedDeviceInfo::default();
        enhanced_info.base_info = device_info;
        enhanced_info.device_class = device_class;
        enhanced_info.capabilities = capabilities;
        enhanced_info.parent_id = 0; // Root device by default
        enhanced_info.depth = 0;
        enhanced_info.power_state = DevicePowerState::Unknown;

        // Set additional identification info
        match device_identification {
            DeviceIdentification::Pci(pci_id) => {
                enhanced_info.base_info.name = format!("pci-{:04x}:{:04x}", pci_id.vendor_id, pci_id.device_id);
                enhanced_info.base_info.vendor = format!("{:04x}", pci_id.vendor_id);
                enhanced_info.base_info.model = format!("{:04x}", pci_id.device_id);
            }
            DeviceIdentification::Usb(usb_id) => {
                enhanced_info.base_info.name = format!("usb-{:04x}:{:04x}", usb_id.vendor_id, usb_id.product_id);
                enhanced_info.base_info.vendor = format!("{:04x}", usb_id.vendor_id);
                enhanced_info.base_info.model = format!("{:04x}", usb_id.product_id);
            }
            DeviceIdentification::Acpi(acpi_id) => {
                enhanced_info.base_info.name = acpi_id.hid.clone();
                enhanced_info.base_info.vendor = "ACPI".to_string();
                enhanced_info.base_info.model = acpi_id.uid.clone();
            }
            DeviceIdentification::Platform(platform_id) => {
                enhanced_info.base_info.name = platform_id.name.clone();
                enhanced_info.base_info.vendor = "Platform".to_string();
                enhanced_info.base_info.model = format!("{}", platform_id.id);
            }
            DeviceIdentification::Custom(_) => {
                enhanced_info.base_info.name = "custom".to_string();
                enhanced_info.base_info.vendor = "Custom".to_string();
                enhanced_info.base_info.model = "Unknown".to_string();
            }
        }

        Ok(enhanced_info)
    }

    /// Determine device class based on identification
    fn determine_device_class(&self, device_identification: &DeviceIdentification) -> DeviceClass {
        match device_identification {
            DeviceIdentification::Pci(pci_id) => {
                match pci_id.class_code {
                    0x01 => DeviceClass::Storage,
                    0x02 => DeviceClass::Network,
                    0x03 => DeviceClass::Display,
                    0x04 => DeviceClass::Multimedia,
                    0x06 => DeviceClass::Bus,
                    0x0C => DeviceClass::Communication,
                    _ => DeviceClass::System,
                }
            }
            DeviceIdentification::Usb(usb_id) => {
                match usb_id.device_class {
                    0x01 => DeviceClass::Audio,
                    0x02 => DeviceClass::Communication,
                    0x03 => DeviceClass::HumanInterface,
                    0x08 => DeviceClass::Storage,
                    0x09 => DeviceClass::Hub,
                    0x0A => DeviceClass::Communication,
                    0x0B => DeviceClass::SmartCard,
                    0x0D => DeviceClass::ContentSecurity,
                    0x10 => DeviceClass::Audio,
                    0x11 => DeviceClass::Video,
                    0xDC => DeviceClass::Diagnostic,
                    0xE0 => DeviceClass::Wireless,
                    0xEF => DeviceClass::Miscellaneous,
                    0xFE => DeviceClass::ApplicationSpecific,
                    0xFF => DeviceClass::VendorSpecific,
                    _ => DeviceClass::Custom,
                }
            }
            DeviceIdentification::Acpi(_) => DeviceClass::System,
            DeviceIdentification::Platform(_) => DeviceClass::Platform,
            DeviceIdentification::Custom(_) => DeviceClass::Custom,
        }
    }

    /// Determine device capabilities based on identification
    fn determine_device_capabilities(&self, device_identification: &DeviceIdentification) -> DeviceCapabilities {
        let mut capabilities = DeviceCapabilities::default();

        match device_identification {
            DeviceIdentification::Pci(_) => {
                capabilities.interrupts = true;
                capabilities.dma = true;
                capabilities.memory_mapping = true;
                capabilities.power_management = true;
            }
            DeviceIdentification::Usb(_) => {
                capabilities.interrupts = true;
                capabilities.hotplug = true;
                capabilities.power_management = true;
            }
            DeviceIdentification::Acpi(_) => {
                capabilities.power_management = true;
            }
            DeviceIdentification::Platform(_) => {
                capabilities.interrupts = true;
            }
            DeviceIdentification::Custom(_) => {
                // Default capabilities
            }
        }

        capabilities
    }

    /// Log a discovery event
    fn log_discovery_event(
        &self,
        event_type: DiscoveryEventType,
        device_id: Option<DeviceId>,
        bus_type: BusType,
        device_identification: Option<DeviceIdentification>,
        data: Vec<u8>,
    ) -> Result<(), KernelError> {
        let event = DiscoveryEvent {
            event_type,
            timestamp: self.get_current_time(),
            device_id,
            bus_type,
            device_identification,
            data,
        };

        let mut events = self.discovery_events.lock();
        events.push(event);

        // Keep event list bounded
        if events.len() > 1000 {
            events.remove(0);
        }

        Ok(())
    }

    /// Get current time in milliseconds
    fn get_current_time(&self) -> u64 {
        // In a real implementation, this would get the current time
        // from the system clock
        0
    }
}

impl Default for DeviceDiscoveryManager {
    fn default() -> Self {
        Self::new()
    }
}

/// Global device discovery manager instance
static mut DEVICE_DISCOVERY_MANAGER: Option<DeviceDiscoveryManager> = None;

/// Initialize device discovery manager
pub fn init() -> Result<(), KernelError> {
    unsafe {
        let mut manager = DeviceDiscoveryManager::new();
        manager.initialize()?;
        DEVICE_DISCOVERY_MANAGER = Some(manager);
    }
    Ok(())
}

/// Get device discovery manager instance
pub fn get_device_discovery_manager() -> Option<&'static mut DeviceDiscoveryManager> {
    unsafe { DEVICE_DISCOVERY_MANAGER.as_mut() }
}