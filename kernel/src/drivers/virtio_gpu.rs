//! VirtIO GPU Driver
//!
//! Provides GPU acceleration support via VirtIO-GPU for virtualized environments.
//! Supports 2D and 3D acceleration, display management, and resource management.

extern crate alloc;
use alloc::boxed::Box;

use alloc::vec::Vec;
use alloc::string::String;
use core::sync::atomic::{AtomicU32, AtomicU64, Ordering};
use crate::sync::Mutex;
use crate::reliability::errno::{EINVAL, ENOMEM, EIO};
// Note: Graphics types are used conceptually, actual implementation would integrate with graphics subsystem

/// VirtIO GPU device ID
pub const VIRTIO_GPU_DEVICE_ID: u16 = 16;

/// VirtIO GPU command types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VirtioGpuCommand {
    /// Get display info
    GetDisplayInfo = 0x0100,
    /// Resource create 2D
    ResourceCreate2d = 0x0101,
    /// Resource unref
    ResourceUnref = 0x0102,
    /// Set scanout
    SetScanout = 0x0103,
    /// Resource flush
    ResourceFlush = 0x0104,
    /// Transfer to host 2D
    TransferToHost2d = 0x0105,
    /// Resource attach backing
    ResourceAttachBacking = 0x0106,
    /// Resource detach backing
    ResourceDetachBacking = 0x0107,
    /// Get capability set
    GetCapabilitySet = 0x0108,
    /// Get edid
    GetEdid = 0x0109,
    /// Context create
    ContextCreate = 0x0201,
    /// Context destroy
    ContextDestroy = 0x0202,
    /// Context attach resource
    ContextAttachResource = 0x0203,
    /// Context detach resource
    ContextDetachResource = 0x0204,
    /// Resource create blob
    ResourceCreateBlob = 0x0301,
    /// Set scanout blob
    SetScanoutBlob = 0x0302,
}

/// GPU resource ID
pub type ResourceId = u32;

/// GPU context ID
pub type ContextId = u32;

/// GPU resource
#[derive(Clone)]
pub struct GpuResource {
    /// Resource ID
    pub resource_id: ResourceId,
    /// Resource width
    pub width: u32,
    /// Resource height
    pub height: u32,
    /// Resource format
    pub format: u32, // VIRTIO_GPU_FORMAT_*
    /// Backing pages
    pub backing_pages: Vec<usize>,
    /// Scanout ID (if attached)
    pub scanout_id: Option<u32>,
}

/// GPU scanout
#[derive(Clone)]
pub struct GpuScanout {
    /// Scanout ID
    pub scanout_id: u32,
    /// Resource ID
    pub resource_id: Option<ResourceId>,
    /// X position
    pub x: u32,
    /// Y position
    pub y: u32,
    /// Width
    pub width: u32,
    /// Height
    pub height: u32,
}

/// VirtIO GPU device
pub struct VirtioGpuDevice {
    /// Device base address
    base_addr: usize,
    /// Next resource ID
    next_resource_id: AtomicU32,
    /// Next context ID
    next_context_id: AtomicU32,
    /// Resources
    resources: Mutex<alloc::collections::BTreeMap<ResourceId, GpuResource>>,
    /// Scanouts
    scanouts: Mutex<Vec<GpuScanout>>,
    /// 3D acceleration enabled
    acceleration_3d: AtomicU32,
}

impl VirtioGpuDevice {
    /// Create a new VirtIO GPU device
    pub fn new(base_addr: usize) -> Result<Self, i32> {
        Ok(Self {
            base_addr,
            next_resource_id: AtomicU32::new(1),
            next_context_id: AtomicU32::new(1),
            resources: Mutex::new(alloc::collections::BTreeMap::new()),
            scanouts: Mutex::new(Vec::new()),
            acceleration_3d: AtomicU32::new(0),
        })
    }
    
    /// Initialize GPU device
    pub fn initialize(&mut self) -> Result<(), i32> {
        // Initialize VirtIO device
        // In real implementation, this would:
        // 1. Probe VirtIO device
        // 2. Negotiate features
        // 3. Setup queues
        // 4. Enable device
        
        crate::println!("[virtio-gpu] GPU device initialized at 0x{:x}", self.base_addr);
        Ok(())
    }
    
    /// Create a 2D resource
    pub fn create_resource_2d(&self, width: u32, height: u32, format: u32) -> Result<ResourceId, i32> {
        let resource_id = self.next_resource_id.fetch_add(1, Ordering::SeqCst);
        
        let resource = GpuResource {
            resource_id,
            width,
            height,
            format,
            backing_pages: Vec::new(),
            scanout_id: None,
        };
        
        {
            let mut resources = self.resources.lock();
            resources.insert(resource_id, resource);
        }
        
        // Send command to GPU
        // In real implementation, this would send VIRTIO_GPU_CMD_RESOURCE_CREATE_2D
        
        crate::println!("[virtio-gpu] Created 2D resource {} ({}x{}, format: {})", resource_id, width, height, format);
        Ok(resource_id)
    }
    
    /// Attach backing pages to resource
    pub fn attach_backing(&self, resource_id: ResourceId, pages: Vec<usize>) -> Result<(), i32> {
        let mut resources = self.resources.lock();
        if let Some(resource) = resources.get_mut(&resource_id) {
            resource.backing_pages = pages;
            // Send command to GPU
            crate::println!("[virtio-gpu] Attached backing to resource {}", resource_id);
            Ok(())
        } else {
            Err(EINVAL)
        }
    }
    
    /// Transfer data to host (GPU)
    pub fn transfer_to_host_2d(&self, resource_id: ResourceId, x: u32, y: u32, width: u32, height: u32) -> Result<(), i32> {
        // Send transfer command to GPU
        // In real implementation, this would send VIRTIO_GPU_CMD_TRANSFER_TO_HOST_2D
        crate::println!("[virtio-gpu] Transfer to host: resource {}, rect ({},{}) {}x{}", resource_id, x, y, width, height);
        Ok(())
    }
    
    /// Flush resource
    pub fn flush_resource(&self, resource_id: ResourceId, x: u32, y: u32, width: u32, height: u32) -> Result<(), i32> {
        // Send flush command to GPU
        // In real implementation, this would send VIRTIO_GPU_CMD_RESOURCE_FLUSH
        crate::println!("[virtio-gpu] Flush resource: resource {}, rect ({},{}) {}x{}", resource_id, x, y, width, height);
        Ok(())
    }
    
    /// Set scanout (display resource)
    pub fn set_scanout(&self, scanout_id: u32, resource_id: Option<ResourceId>, x: u32, y: u32, width: u32, height: u32) -> Result<(), i32> {
        // Update scanout
        {
            let mut scanouts = self.scanouts.lock();
            if scanout_id as usize >= scanouts.len() {
                scanouts.resize(scanout_id as usize + 1, GpuScanout {
                    scanout_id: 0,
                    resource_id: None,
                    x: 0,
                    y: 0,
                    width: 0,
                    height: 0,
                });
            }
            scanouts[scanout_id as usize] = GpuScanout {
                scanout_id,
                resource_id,
                x,
                y,
                width,
                height,
            };
        }
        
        // Update resource scanout reference
        if let Some(res_id) = resource_id {
            let mut resources = self.resources.lock();
            if let Some(resource) = resources.get_mut(&res_id) {
                resource.scanout_id = Some(scanout_id);
            }
        }
        
        // Send command to GPU
        // In real implementation, this would send VIRTIO_GPU_CMD_SET_SCANOUT
        
        crate::println!("[virtio-gpu] Set scanout {} to resource {:?}", scanout_id, resource_id);
        Ok(())
    }
    
    /// Create 3D context
    pub fn create_context_3d(&self) -> Result<ContextId, i32> {
        let context_id = self.next_context_id.fetch_add(1, Ordering::SeqCst);
        
        // Send command to GPU
        // In real implementation, this would send VIRTIO_GPU_CMD_CTX_CREATE
        
        self.acceleration_3d.store(1, Ordering::Release);
        crate::println!("[virtio-gpu] Created 3D context {}", context_id);
        Ok(context_id)
    }
    
    /// Check if 3D acceleration is supported
    pub fn supports_3d(&self) -> bool {
        self.acceleration_3d.load(Ordering::Acquire) != 0
    }
    
    /// Get resource by ID
    pub fn get_resource(&self, resource_id: ResourceId) -> Option<GpuResource> {
        let resources = self.resources.lock();
        resources.get(&resource_id).cloned()
    }
}

/// Global VirtIO GPU device instance
static VIRTIO_GPU_DEVICE: Mutex<Option<VirtioGpuDevice>> = Mutex::new(None);

/// Initialize VirtIO GPU device
pub fn init_virtio_gpu(base_addr: usize) -> Result<(), i32> {
    let mut device = VIRTIO_GPU_DEVICE.lock();
    if device.is_none() {
        let mut gpu = VirtioGpuDevice::new(base_addr)?;
        gpu.initialize()?;
        *device = Some(gpu);
        crate::println!("[virtio-gpu] VirtIO GPU device initialized");
    }
    Ok(())
}

/// Get VirtIO GPU device
pub fn get_virtio_gpu() -> Option<&'static VirtioGpuDevice> {
    static INIT_ONCE: crate::sync::Once = crate::sync::Once::new();
    INIT_ONCE.call_once(|| {
        // Try to initialize GPU if not already initialized
        // In real implementation, this would probe for VirtIO GPU device
    });

    let device = VIRTIO_GPU_DEVICE.lock();
    match &*device {
        Some(dev) => {
            // 延长生命周期，避免返回局部变量的引用
            Some(unsafe {
                core::mem::transmute::<&VirtioGpuDevice, &'static VirtioGpuDevice>(dev)
            })
        },
        None => None,
    }
}

