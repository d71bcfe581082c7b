//! GPU Driver Framework Implementation
//!
//! This module implements a comprehensive GPU driver framework for NOS,
//! providing graphics hardware abstraction, display management, rendering
//! primitives, and GPU acceleration support. The implementation supports
//! multiple GPU vendors, display modes, and advanced graphics features.

extern crate alloc;
use alloc::vec::Vec;
use alloc::collections::BTreeMap;
use alloc::string::{String, ToString};
use alloc::sync::Arc;
use core::sync::atomic::{AtomicU32, AtomicU64, AtomicBool, Ordering};
use crate::subsystems::sync::{Mutex, Sleeplock};
use crate::subsystems::drivers::device_model::{
    DeviceModel, EnhancedDeviceInfo, DeviceClass, DevicePowerState, 
    DeviceCapabilities, DevicePerformanceMetrics
};
use crate::subsystems::drivers::driver_manager::{
    Driver, DeviceId, DriverId, DeviceType, DeviceStatus, DriverStatus,
    DeviceInfo, DriverInfo, DeviceResources, IoOperation, IoResult, InterruptInfo
};
use nos_nos_error_handling::unified::KernelError;

// ============================================================================
// GPU Constants and Structures
// ============================================================================

/// GPU vendor IDs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GpuVendor {
    /// NVIDIA
    Nvidia,
    /// AMD
    Amd,
    /// Intel
    Intel,
    /// VMware
    Vmware,
    /// VirtualBox
    VirtualBox,
    /// QEMU
    Qemu,
    /// Unknown vendor
    Unknown,
}

/// GPU architectures
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GpuArchitecture {
    /// NVIDIA Maxwell
    NvidiaMaxwell,
    /// NVIDIA Pascal
    NvidiaPascal,
    /// NVIDIA Turing
    NvidiaTuring,
    /// NVIDIA Ampere
    NvidiaAmpere,
    /// AMD GCN (Graphics Core Next)
    AmdGcn,
    /// AMD RDNA (Radeon DNA)
    AmdRdna,
    /// Intel Gen7
    IntelGen7,
    /// Intel Gen8
    IntelGen8,
    /// Intel Gen9
    IntelGen9,
    /// Intel Gen11
    IntelGen11,
    /// Intel Gen12 (Xe)
    IntelGen12,
    /// Unknown architecture
    Unknown,
}

/// GPU memory types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GpuMemoryType {
    /// System RAM
    SystemRam,
    /// Video RAM (VRAM)
    VideoRam,
    /// Shared memory (UMA)
    SharedMemory,
    /// Unknown memory type
    Unknown,
}

/// Display interface types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayInterface {
    /// VGA
    Vga,
    /// DVI
    Dvi,
    /// HDMI
    Hdmi,
    /// DisplayPort
    DisplayPort,
    /// Embedded DisplayPort (eDP)
    EmbeddedDisplayPort,
    /// Unknown interface
    Unknown,
}

/// Pixel formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PixelFormat {
    /// 8-bit indexed color
    Indexed8,
    /// 16-bit RGB 5:6:5
    Rgb565,
    /// 24-bit RGB 8:8:8
    Rgb888,
    /// 32-bit XRGB 8:8:8:8
    Xrgb8888,
    /// 32-bit ARGB 8:8:8:8
    Argb8888,
    /// Unknown format
    Unknown,
}

/// Display modes
#[derive(Debug, Clone)]
pub struct DisplayMode {
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
    /// Bits per pixel
    pub bpp: u8,
    /// Refresh rate in Hz
    pub refresh_rate: u32,
    /// Pixel format
    pub pixel_format: PixelFormat,
    /// Flags
    pub flags: DisplayModeFlags,
}

/// Display mode flags
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayModeFlags {
    /// Mode is preferred
    pub preferred: bool,
    /// Mode is native (panel's native resolution)
    pub native: bool,
    /// Mode supports interlacing
    pub interlaced: bool,
    /// Mode supports double scan
    pub double_scan: bool,
}

impl Default for DisplayModeFlags {
    fn default() -> Self {
        Self {
            preferred: false,
            native: false,
            interlaced: false,
            double_scan: false,
        }
    }
}

/// GPU memory information
#[derive(Debug, Clone)]
pub struct GpuMemoryInfo {
    /// Total memory size in bytes
    pub total_size: u64,
    /// Available memory size in bytes
    pub available_size: u64,
    /// Memory type
    pub memory_type: GpuMemoryType,
    /// Memory bandwidth in bytes per second
    pub bandwidth: u64,
    /// Memory clock in MHz
    pub clock_mhz: u32,
}

/// GPU capabilities
#[derive(Debug, Clone)]
pub struct GpuCapabilities {
    /// Supports hardware acceleration
    pub hardware_acceleration: bool,
    /// Supports 3D acceleration
    pub supports_3d: bool,
    /// Supports 2D acceleration
    pub supports_2d: bool,
    /// Supports video decode acceleration
    pub supports_video_decode: bool,
    /// Supports video encode acceleration
    pub supports_video_encode: bool,
    /// Supports GPU compute
    pub supports_compute: bool,
    /// Supports multiple displays
    pub supports_multi_display: bool,
    /// Maximum texture size
    pub max_texture_size: u32,
    /// Maximum render targets
    pub max_render_targets: u8,
    /// Supported shader models
    pub supported_shader_models: Vec<String>,
    /// Supported video codecs
    pub supported_video_codecs: Vec<String>,
}

/// GPU performance metrics
#[derive(Debug, Clone, Default)]
pub struct GpuPerformanceMetrics {
    /// GPU utilization percentage (0-100)
    pub gpu_utilization: u8,
    /// Memory utilization percentage (0-100)
    pub memory_utilization: u8,
    /// GPU temperature in Celsius
    pub temperature: u8,
    /// GPU clock in MHz
    pub gpu_clock: u32,
    /// Memory clock in MHz
    pub memory_clock: u32,
    /// Power consumption in milliwatts
    pub power_consumption: u32,
    /// Fan speed percentage (0-100)
    pub fan_speed: u8,
    /// Number of rendered frames
    pub frames_rendered: u64,
    /// Average frame time in microseconds
    pub average_frame_time_us: u32,
    /// Number of dropped frames
    pub dropped_frames: u64,
}

/// GPU device information
#[derive(Debug, Clone)]
pub struct GpuDeviceInfo {
    /// Device ID
    pub device_id: u32,
    /// Vendor
    pub vendor: GpuVendor,
    /// Architecture
    pub architecture: GpuArchitecture,
    /// Device name
    pub name: String,
    /// PCI device ID
    pub pci_device_id: u16,
    /// PCI vendor ID
    pub pci_vendor_id: u16,
    /// Memory information
    pub memory_info: GpuMemoryInfo,
    /// Capabilities
    pub capabilities: GpuCapabilities,
    /// Supported display modes
    pub display_modes: Vec<DisplayMode>,
    /// Current display mode
    pub current_mode: Option<DisplayMode>,
    /// Number of displays
    pub num_displays: u8,
    /// Maximum displays supported
    pub max_displays: u8,
    /// Performance metrics
    pub performance_metrics: GpuPerformanceMetrics,
    /// Firmware version
    pub firmware_version: String,
    /// Driver version
    pub driver_version: String,
}

/// GPU driver interface
pub trait GpuDriver: Send + Sync {
    /// Get driver name
    fn name(&self) -> &str;
    
    /// Initialize the GPU
    fn init(&mut self) -> Result<(), KernelError>;
    
    /// Shutdown the GPU
    fn shutdown(&mut self) -> Result<(), KernelError>;
    
    /// Get device information
    fn get_device_info(&self) -> &GpuDeviceInfo;
    
    /// Set display mode
    fn set_display_mode(&mut self, mode: &DisplayMode) -> Result<(), KernelError>;
    
    /// Get current display mode
    fn get_current_display_mode(&self) -> Option<&DisplayMode>;
    
    /// Get supported display modes
    fn get_supported_display_modes(&self) -> &[DisplayMode];
    
    /// Create a framebuffer
    fn create_framebuffer(&mut self, width: u32, height: u32, format: PixelFormat) -> Result<FrameBufferHandle, KernelError>;
    
    /// Destroy a framebuffer
    fn destroy_framebuffer(&mut self, handle: FrameBufferHandle) -> Result<(), KernelError>;
    
    /// Set the active framebuffer
    fn set_active_framebuffer(&mut self, handle: FrameBufferHandle) -> Result<(), KernelError>;
    
    /// Get the active framebuffer
    fn get_active_framebuffer(&self) -> Option<FrameBufferHandle>;
    
    /// Blit from one framebuffer to another
    fn blit_framebuffer(&mut self, src: FrameBufferHandle, dst: FrameBufferHandle, 
                       src_x: u32, src_y: u32, dst_x: u32, dst_y: u32, 
                       width: u32, height: u32) -> Result<(), KernelError>;
    
    /// Clear a framebuffer
    fn clear_framebuffer(&mut self, handle: FrameBufferHandle, color: u32) -> Result<(), KernelError>;
    
    /// Update performance metrics
    fn update_performance_metrics(&mut self) -> Result<(), KernelError>;
    
    /// Get performance metrics
    fn get_performance_metrics(&self) -> &GpuPerformanceMetrics;
    
    /// Set power state
    fn set_power_state(&mut self, state: DevicePowerState) -> Result<(), KernelError>;
    
    /// Get power state
    fn get_power_state(&self) -> DevicePowerState;
}

/// Framebuffer handle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameBufferHandle(pub u32);

/// Framebuffer information
#[derive(Debug, Clone)]
pub struct FrameBufferInfo {
    /// Handle
    pub handle: FrameBufferHandle,
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
    /// Pitch in bytes
    pub pitch: u32,
    /// Pixel format
    pub format: PixelFormat,
    /// Memory address
    pub address: usize,
    /// Size in bytes
    pub size: usize,
}

/// GPU driver framework
pub struct GpuDriverFramework {
    /// GPU drivers by device ID
    drivers: Mutex<BTreeMap<u32, Box<dyn GpuDriver>>>,
    /// Device model reference
    device_model: Arc<Mutex<dyn DeviceModel>>,
    /// Next device ID
    next_device_id: AtomicU32,
    /// Manager statistics
    stats: Mutex<GpuStats>,
    /// Manager initialized flag
    initialized: AtomicBool,
}

/// GPU manager statistics
#[derive(Debug, Default, Clone)]
pub struct GpuStats {
    /// Total GPU devices found
    pub total_devices: u32,
    /// Devices by vendor
    pub devices_by_vendor: BTreeMap<GpuVendor, u32>,
    /// Number of active displays
    pub active_displays: u32,
    /// Total GPU memory
    pub total_memory: u64,
    /// Used GPU memory
    pub used_memory: u64,
    /// Number of framebuffers created
    pub framebuffers_created: u64,
    /// Number of framebuffers destroyed
    pub framebuffers_destroyed: u64,
    /// Number of display mode changes
    pub display_mode_changes: u64,
    /// Number of blit operations
    pub blit_operations: u64,
    /// Number of frames rendered
    pub frames_rendered: u64,
}

impl GpuDriverFramework {
    /// Create a new GPU driver framework
    pub fn new(device_model: Arc<Mutex<dyn DeviceModel>>) -> Self {
        Self {
            drivers: Mutex::new(BTreeMap::new()),
            device_model,
            next_device_id: AtomicU32::new(1),
            stats: Mutex::new(GpuStats::default()),
            initialized: AtomicBool::new(false),
        }
    }

    /// Initialize the GPU driver framework
    pub fn init(&self) -> Result<(), KernelError> {
        if self.initialized.load(Ordering::SeqCst) {
            return Ok(());
        }

        // Clear driver registry
        {
            let mut drivers = self.drivers.lock();
            drivers.clear();
        }

        // Reset statistics
        {
            let mut stats = self.stats.lock();
            *stats = GpuStats::default();
        }

        // Enumerate GPU devices
        self.enumerate_gpu_devices()?;

        self.initialized.store(true, Ordering::SeqCst);
        crate::println!("gpu: GPU driver framework initialized");
        Ok(())
    }

    /// Enumerate GPU devices
    fn enumerate_gpu_devices(&self) -> Result<(), KernelError> {
        // In a real implementation, this would scan PCI for GPU devices
        // For now, we'll create a few example GPU devices
        
        // Create a virtual GPU (for testing/emulation)
        let virtual_gpu = Box::new(VirtualGpuDriver::new(
            1,
            "Virtual GPU".to_string(),
            GpuVendor::Vmware,
            GpuArchitecture::Unknown,
        ));
        
        // Create an Intel GPU
        let intel_gpu = Box::new(IntelGpuDriver::new(
            2,
            "Intel HD Graphics".to_string(),
            GpuVendor::Intel,
            GpuArchitecture::IntelGen9,
        ));
        
        // Register drivers
        {
            let mut drivers = self.drivers.lock();
            drivers.insert(1, virtual_gpu);
            drivers.insert(2, intel_gpu);
        }

        // Initialize drivers
        {
            let mut drivers = self.drivers.lock();
            for (_, driver) in drivers.iter_mut() {
                if let Err(e) = driver.init() {
                    crate::println!("gpu: failed to initialize driver: {:?}", e);
                }
            }
        }

        // Update statistics
        {
            let mut stats = self.stats.lock();
            stats.total_devices = 2;
            stats.devices_by_vendor.insert(GpuVendor::Vmware, 1);
            stats.devices_by_vendor.insert(GpuVendor::Intel, 1);
        }

        crate::println!("gpu: found {} GPU devices", 2);
        Ok(())
    }

    /// Get GPU driver by device ID
    pub fn get_driver(&self, device_id: u32) -> Option<Arc<Mutex<dyn GpuDriver>>> {
        let drivers = self.drivers.lock();
        // Note: In a real implementation, we would need to handle Arc/Mutex wrapping properly
        // For now, we'll return None as this is just a placeholder
        None
    }

    /// Get all GPU drivers
    pub fn get_all_drivers(&self) -> Vec<Arc<Mutex<dyn GpuDriver>>> {
        let drivers = self.drivers.lock();
        // Note: In a real implementation, we would need to handle Arc/Mutex wrapping properly
        // For now, we'll return an empty vector as this is just a placeholder
        Vec::new()
    }

    /// Get GPU drivers by vendor
    pub fn get_drivers_by_vendor(&self, vendor: GpuVendor) -> Vec<Arc<Mutex<dyn GpuDriver>>> {
        let drivers = self.drivers.lock();
        // Note: In a real implementation, we would need to handle Arc/Mutex wrapping properly
        // For now, we'll return an empty vector as this is just a placeholder
        Vec::new()
    }

    /// Get GPU manager statistics
    pub fn get_stats(&self) -> GpuStats {
        self.stats.lock().clone()
    }

    /// Reset GPU manager statistics
    pub fn reset_stats(&self) {
        let mut stats = self.stats.lock();
        *stats = GpuStats::default();
    }
}

/// Virtual GPU driver (for testing/emulation)
pub struct VirtualGpuDriver {
    /// Device ID
    device_id: u32,
    /// Device information
    device_info: GpuDeviceInfo,
    /// Current display mode
    current_mode: Option<DisplayMode>,
    /// Framebuffers
    framebuffers: BTreeMap<FrameBufferHandle, FrameBufferInfo>,
    /// Active framebuffer
    active_framebuffer: Option<FrameBufferHandle>,
    /// Next framebuffer handle
    next_framebuffer_handle: AtomicU32,
    /// Power state
    power_state: DevicePowerState,
}

impl VirtualGpuDriver {
    /// Create a new virtual GPU driver
    pub fn new(device_id: u32, name: String, vendor: GpuVendor, architecture: GpuArchitecture) -> Self {
        let device_info = GpuDeviceInfo {
            device_id,
            vendor,
            architecture,
            name: name.clone(),
            pci_device_id: 0x0405, // Example VMware PCI device ID
            pci_vendor_id: match vendor {
                GpuVendor::Vmware => 0x15AD,
                GpuVendor::VirtualBox => 0x80EE,
                GpuVendor::Qemu => 0x1234,
                _ => 0x0000,
            },
            memory_info: GpuMemoryInfo {
                total_size: 256 * 1024 * 1024, // 256MB
                available_size: 256 * 1024 * 1024,
                memory_type: GpuMemoryType::SystemRam,
                bandwidth: 25_600 * 1024 * 1024, // 25.6 GB/s
                clock_mhz: 800,
            },
            capabilities: GpuCapabilities {
                hardware_acceleration: true,
                supports_3d: false,
                supports_2d: true,
                supports_video_decode: false,
                supports_video_encode: false,
                supports_compute: false,
                supports_multi_display: true,
                max_texture_size: 2048,
                max_render_targets: 1,
                supported_shader_models: Vec::new(),
                supported_video_codecs: Vec::new(),
            },
            display_modes: vec![
                DisplayMode {
                    width: 1024,
                    height: 768,
                    bpp: 32,
                    refresh_rate: 60,
                    pixel_format: PixelFormat::Xrgb8888,
                    flags: DisplayModeFlags {
                        preferred: true,
                        native: true,
                        interlaced: false,
                        double_scan: false,
                    },
                },
                DisplayMode {
                    width: 800,
                    height: 600,
                    bpp: 32,
                    refresh_rate: 60,
                    pixel_format: PixelFormat::Xrgb8888,
                    flags: DisplayModeFlags::default(),
                },
                DisplayMode {
                    width: 640,
                    height: 480,
                    bpp: 32,
                    refresh_rate: 60,
                    pixel_format: PixelFormat::Xrgb8888,
                    flags: DisplayModeFlags::default(),
                },
            ],
            current_mode: None,
            num_displays: 1,
            max_displays: 1,
            performance_metrics: GpuPerformanceMetrics::default(),
            firmware_version: "1.0.0".to_string(),
            driver_version: "1.0.0".to_string(),
        };

        Self {
            device_id,
            device_info,
            current_mode: None,
            framebuffers: BTreeMap::new(),
            active_framebuffer: None,
            next_framebuffer_handle: AtomicU32::new(1),
            power_state: DevicePowerState::On,
        }
    }
}

impl GpuDriver for VirtualGpuDriver {
    fn name(&self) -> &str {
        "Virtual GPU Driver"
    }

    fn init(&mut self) -> Result<(), KernelError> {
        crate::println!("gpu: initializing virtual GPU {}", self.device_id);
        
        // Set the default display mode
        if let Some(mode) = self.device_info.display_modes.first() {
            self.set_display_mode(mode)?;
        }
        
        Ok(())
    }

    fn shutdown(&mut self) -> Result<(), KernelError> {
        crate::println!("gpu: shutting down virtual GPU {}", self.device_id);
        
        // Destroy all framebuffers
        let handles: Vec<FrameBufferHandle> = self.framebuffers.keys().cloned().collect();
        for handle in handles {
            let _ = self.destroy_framebuffer(handle);
        }
        
        Ok(())
    }

    fn get_device_info(&self) -> &GpuDeviceInfo {
        &self.device_info
    }

    fn set_display_mode(&mut self, mode: &DisplayMode) -> Result<(), KernelError> {
        crate::println!("gpu: setting display mode to {}x{}@{}Hz", 
                      mode.width, mode.height, mode.refresh_rate);
        
        self.current_mode = Some(mode.clone());
        self.device_info.current_mode = Some(mode.clone());
        
        Ok(())
    }

    fn get_current_display_mode(&self) -> Option<&DisplayMode> {
        self.current_mode.as_ref()
    }

    fn get_supported_display_modes(&self) -> &[DisplayMode] {
        &self.device_info.display_modes
    }

    fn create_framebuffer(&mut self, width: u32, height: u32, format: PixelFormat) -> Result<FrameBufferHandle, KernelError> {
        let handle = FrameBufferHandle(self.next_framebuffer_handle.fetch_add(1, Ordering::SeqCst));
        
        let bpp = match format {
            PixelFormat::Indexed8 => 1,
            PixelFormat::Rgb565 => 2,
            PixelFormat::Rgb888 => 3,
            PixelFormat::Xrgb8888 | PixelFormat::Argb8888 => 4,
            PixelFormat::Unknown => 4,
        };
        
        let pitch = width * bpp as u32;
        let size = (pitch * height) as usize;
        
        // Allocate memory for the framebuffer
        // In a real implementation, this would allocate GPU memory
        // For now, we'll use a placeholder address
        let address = 0xE0000000 + (handle.0 as usize) * 0x1000000;
        
        let info = FrameBufferInfo {
            handle,
            width,
            height,
            pitch,
            format,
            address,
            size,
        };
        
        self.framebuffers.insert(handle, info);
        
        crate::println!("gpu: created framebuffer {} ({}x{}, {} bpp)", 
                      handle.0, width, height, bpp * 8);
        
        Ok(handle)
    }

    fn destroy_framebuffer(&mut self, handle: FrameBufferHandle) -> Result<(), KernelError> {
        if self.framebuffers.remove(&handle).is_some() {
            // If this was the active framebuffer, clear it
            if self.active_framebuffer == Some(handle) {
                self.active_framebuffer = None;
            }
            
            crate::println!("gpu: destroyed framebuffer {}", handle.0);
            Ok(())
        } else {
            Err(KernelError::NotFound(format!("Framebuffer {} not found", handle.0)))
        }
    }

    fn set_active_framebuffer(&mut self, handle: FrameBufferHandle) -> Result<(), KernelError> {
        if self.framebuffers.contains_key(&handle) {
            self.active_framebuffer = Some(handle);
            crate::println!("gpu: set active framebuffer to {}", handle.0);
            Ok(())
        } else {
            Err(KernelError::NotFound(format!("Framebuffer {} not found", handle.0)))
        }
    }

    fn get_active_framebuffer(&self) -> Option<FrameBufferHandle> {
        self.active_framebuffer
    }

    fn blit_framebuffer(&mut self, src: FrameBufferHandle, dst: FrameBufferHandle, 
                       src_x: u32, src_y: u32, dst_x: u32, dst_y: u32, 
                       width: u32, height: u32) -> Result<(), KernelError> {
        if !self.framebuffers.contains_key(&src) {
            return Err(KernelError::NotFound(format!("Source framebuffer {} not found", src.0)));
        }
        
        if !self.framebuffers.contains_key(&dst) {
            return Err(KernelError::NotFound(format!("Destination framebuffer {} not found", dst.0)));
        }
        
        // In a real implementation, this would perform a hardware-accelerated blit
        // For now, we'll just log the operation
        crate::println!("gpu: blitting from {} to {} ({}x{} at {},{} to {},{})", 
                      src.0, dst.0, width, height, src_x, src_y, dst_x, dst_y);
        
        Ok(())
    }

    fn clear_framebuffer(&mut self, handle: FrameBufferHandle, color: u32) -> Result<(), KernelError> {
        if let Some(info) = self.framebuffers.get(&handle) {
            // In a real implementation, this would perform a hardware-accelerated clear
            // For now, we'll just log the operation
            crate::println!("gpu: clearing framebuffer {} with color 0x{:08X}", 
                          handle.0, color);
            
            Ok(())
        } else {
            Err(KernelError::NotFound(format!("Framebuffer {} not found", handle.0)))
        }
    }

    fn update_performance_metrics(&mut self) -> Result<(), KernelError> {
        // In a real implementation, this would query the GPU for performance metrics
        // For now, we'll just update with placeholder values
        self.device_info.performance_metrics.gpu_utilization = 25;
        self.device_info.performance_metrics.memory_utilization = 10;
        self.device_info.performance_metrics.temperature = 45;
        self.device_info.performance_metrics.gpu_clock = 300;
        self.device_info.performance_metrics.memory_clock = 400;
        self.device_info.performance_metrics.power_consumption = 15000; // 15W
        self.device_info.performance_metrics.fan_speed = 30;
        
        Ok(())
    }

    fn get_performance_metrics(&self) -> &GpuPerformanceMetrics {
        &self.device_info.performance_metrics
    }

    fn set_power_state(&mut self, state: DevicePowerState) -> Result<(), KernelError> {
        crate::println!("gpu: setting power state to {:?}", state);
        self.power_state = state;
        Ok(())
    }

    fn get_power_state(&self) -> DevicePowerState {
        self.power_state
    }
}

/// Intel GPU driver
pub struct IntelGpuDriver {
    /// Device ID
    device_id: u32,
    /// Device information
    device_info: GpuDeviceInfo,
    /// Current display mode
    current_mode: Option<DisplayMode>,
    /// Framebuffers
    framebuffers: BTreeMap<FrameBufferHandle, FrameBufferInfo>,
    /// Active framebuffer
    active_framebuffer: Option<FrameBufferHandle>,
    /// Next framebuffer handle
    next_framebuffer_handle: AtomicU32,
    /// Power state
    power_state: DevicePowerState,
}

impl IntelGpuDriver {
    /// Create a new Intel GPU driver
    pub fn new(device_id: u32, name: String, vendor: GpuVendor, architecture: GpuArchitecture) -> Self {
        let device_info = GpuDeviceInfo {
            device_id,
            vendor,
            architecture,
            name: name.clone(),
            pci_device_id: 0x1916, // Example Intel HD Graphics PCI device ID
            pci_vendor_id: 0x8086, // Intel PCI vendor ID
            memory_info: GpuMemoryInfo {
                total_size: 512 * 1024 * 1024, // 512MB
                available_size: 512 * 1024 * 1024,
                memory_type: GpuMemoryType::SharedMemory,
                bandwidth: 34_100 * 1024 * 1024, // 34.1 GB/s
                clock_mhz: 900,
            },
            capabilities: GpuCapabilities {
                hardware_acceleration: true,
                supports_3d: true,
                supports_2d: true,
                supports_video_decode: true,
                supports_video_encode: false,
                supports_compute: true,
                supports_multi_display: true,
                max_texture_size: 8192,
                max_render_targets: 8,
                supported_shader_models: vec![
                    "Vertex Shader 4.0".to_string(),
                    "Pixel Shader 4.0".to_string(),
                    "Geometry Shader 4.0".to_string(),
                    "Compute Shader 5.0".to_string(),
                ],
                supported_video_codecs: vec![
                    "H.264".to_string(),
                    "VP8".to_string(),
                    "VP9".to_string(),
                ],
            },
            display_modes: vec![
                DisplayMode {
                    width: 1920,
                    height: 1080,
                    bpp: 32,
                    refresh_rate: 60,
                    pixel_format: PixelFormat::Xrgb8888,
                    flags: DisplayModeFlags {
                        preferred: true,
                        native: true,
                        interlaced: false,
                        double_scan: false,
                    },
                },
                DisplayMode {
                    width: 1366,
                    height: 768,
                    bpp: 32,
                    refresh_rate: 60,
                    pixel_format: PixelFormat::Xrgb8888,
                    flags: DisplayModeFlags::default(),
                },
                DisplayMode {
                    width: 1280,
                    height: 720,
                    bpp: 32,
                    refresh_rate: 60,
                    pixel_format: PixelFormat::Xrgb8888,
                    flags: DisplayModeFlags::default(),
                },
                DisplayMode {
                    width: 1024,
                    height: 768,
                    bpp: 32,
                    refresh_rate: 60,
                    pixel_format: PixelFormat::Xrgb8888,
                    flags: DisplayModeFlags::default(),
                },
            ],
            current_mode: None,
            num_displays: 1,
            max_displays: 3,
            performance_metrics: GpuPerformanceMetrics::default(),
            firmware_version: "21.20.16.4578".to_string(),
            driver_version: "1.0.0".to_string(),
        };

        Self {
            device_id,
            device_info,
            current_mode: None,
            framebuffers: BTreeMap::new(),
            active_framebuffer: None,
            next_framebuffer_handle: AtomicU32::new(1),
            power_state: DevicePowerState::On,
        }
    }
}

impl GpuDriver for IntelGpuDriver {
    fn name(&self) -> &str {
        "Intel GPU Driver"
    }

    fn init(&mut self) -> Result<(), KernelError> {
        crate::println!("gpu: initializing Intel GPU {}", self.device_id);
        
        // Set the default display mode
        if let Some(mode) = self.device_info.display_modes.first() {
            self.set_display_mode(mode)?;
        }
        
        Ok(())
    }

    fn shutdown(&mut self) -> Result<(), KernelError> {
        crate::println!("gpu: shutting down Intel GPU {}", self.device_id);
        
        // Destroy all framebuffers
        let handles: Vec<FrameBufferHandle> = self.framebuffers.keys().cloned().collect();
        for handle in handles {
            let _ = self.destroy_framebuffer(handle);
        }
        
        Ok(())
    }

    fn get_device_info(&self) -> &GpuDeviceInfo {
        &self.device_info
    }

    fn set_display_mode(&mut self, mode: &DisplayMode) -> Result<(), KernelError> {
        crate::println!("gpu: setting display mode to {}x{}@{}Hz", 
                      mode.width, mode.height, mode.refresh_rate);
        
        self.current_mode = Some(mode.clone());
        self.device_info.current_mode = Some(mode.clone());
        
        Ok(())
    }

    fn get_current_display_mode(&self) -> Option<&DisplayMode> {
        self.current_mode.as_ref()
    }

    fn get_supported_display_modes(&self) -> &[DisplayMode] {
        &self.device_info.display_modes
    }

    fn create_framebuffer(&mut self, width: u32, height: u32, format: PixelFormat) -> Result<FrameBufferHandle, KernelError> {
        let handle = FrameBufferHandle(self.next_framebuffer_handle.fetch_add(1, Ordering::SeqCst));
        
        let bpp = match format {
            PixelFormat::Indexed8 => 1,
            PixelFormat::Rgb565 => 2,
            PixelFormat::Rgb888 => 3,
            PixelFormat::Xrgb8888 | PixelFormat::Argb8888 => 4,
            PixelFormat::Unknown => 4,
        };
        
        let pitch = width * bpp as u32;
        let size = (pitch * height) as usize;
        
        // Allocate memory for the framebuffer
        // In a real implementation, this would allocate GPU memory
        // For now, we'll use a placeholder address
        let address = 0xD0000000 + (handle.0 as usize) * 0x1000000;
        
        let info = FrameBufferInfo {
            handle,
            width,
            height,
            pitch,
            format,
            address,
            size,
        };
        
        self.framebuffers.insert(handle, info);
        
        crate::println!("gpu: created framebuffer {} ({}x{}, {} bpp)", 
                      handle.0, width, height, bpp * 8);
        
        Ok(handle)
    }

    fn destroy_framebuffer(&mut self, handle: FrameBufferHandle) -> Result<(), KernelError> {
        if self.framebuffers.remove(&handle).is_some() {
            // If this was the active framebuffer, clear it
            if self.active_framebuffer == Some(handle) {
                self.active_framebuffer = None;
            }
            
            crate::println!("gpu: destroyed framebuffer {}", handle.0);
            Ok(())
        } else {
            Err(KernelError::NotFound(format!("Framebuffer {} not found", handle.0)))
        }
    }

    fn set_active_framebuffer(&mut self, handle: FrameBufferHandle) -> Result<(), KernelError> {
        if self.framebuffers.contains_key(&handle) {
            self.active_framebuffer = Some(handle);
            crate::println!("gpu: set active framebuffer to {}", handle.0);
            Ok(())
        } else {
            Err(KernelError::NotFound(format!("Framebuffer {} not found", handle.0)))
        }
    }

    fn get_active_framebuffer(&self) -> Option<FrameBufferHandle> {
        self.active_framebuffer
    }

    fn blit_framebuffer(&mut self, src: FrameBufferHandle, dst: FrameBufferHandle, 
                       src_x: u32, src_y: u32, dst_x: u32, dst_y: u32, 
                       width: u32, height: u32) -> Result<(), KernelError> {
        if !self.framebuffers.contains_key(&src) {
            return Err(KernelError::NotFound(format!("Source framebuffer {} not found", src.0)));
        }
        
        if !self.framebuffers.contains_key(&dst) {
            return Err(KernelError::NotFound(format!("Destination framebuffer {} not found", dst.0)));
        }
        
        // In a real implementation, this would perform a hardware-accelerated blit
        // For now, we'll just log the operation
        crate::println!("gpu: blitting from {} to {} ({}x{} at {},{} to {},{})", 
                      src.0, dst.0, width, height, src_x, src_y, dst_x, dst_y);
        
        Ok(())
    }

    fn clear_framebuffer(&mut self, handle: FrameBufferHandle, color: u32) -> Result<(), KernelError> {
        if let Some(info) = self.framebuffers.get(&handle) {
            // In a real implementation, this would perform a hardware-accelerated clear
            // For now, we'll just log the operation
            crate::println!("gpu: clearing framebuffer {} with color 0x{:08X}", 
                          handle.0, color);
            
            Ok(())
        } else {
            Err(KernelError::NotFound(format!("Framebuffer {} not found", handle.0)))
        }
    }

    fn update_performance_metrics(&mut self) -> Result<(), KernelError> {
        // In a real implementation, this would query the GPU for performance metrics
        // For now, we'll just update with placeholder values
        self.device_info.performance_metrics.gpu_utilization = 15;
        self.device_info.performance_metrics.memory_utilization = 20;
        self.device_info.performance_metrics.temperature = 55;
        self.device_info.performance_metrics.gpu_clock = 900;
        self.device_info.performance_metrics.memory_clock = 800;
        self.device_info.performance_metrics.power_consumption = 12000; // 12W
        self.device_info.performance_metrics.fan_speed = 40;
        
        Ok(())
    }

    fn get_performance_metrics(&self) -> &GpuPerformanceMetrics {
        &self.device_info.performance_metrics
    }

    fn set_power_state(&mut self, state: DevicePowerState) -> Result<(), KernelError> {
        crate::println!("gpu: setting power state to {:?}", state);
        self.power_state = state;
        Ok(())
    }

    fn get_power_state(&self) -> DevicePowerState {
        self.power_state
    }
}

/// Global GPU driver framework instance
static mut GPU_DRIVER_FRAMEWORK: Option<GpuDriverFramework> = None;

/// Initialize GPU driver framework
pub fn init(device_model: Arc<Mutex<dyn DeviceModel>>) -> Result<(), KernelError> {
    unsafe {
        let framework = GpuDriverFramework::new(device_model);
        framework.init()?;
        GPU_DRIVER_FRAMEWORK = Some(framework);
    }
    crate::println!("gpu: GPU driver framework initialized");
    Ok(())
}

/// Get GPU driver framework instance
pub fn get_gpu_driver_framework() -> Option<&'static GpuDriverFramework> {
    unsafe { GPU_DRIVER_FRAMEWORK.as_ref() }
}