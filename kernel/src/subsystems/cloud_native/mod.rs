// Cloud Native Features Module
//
// 云原生特性模块
// 提供virtio优化、OCI标准支持、容器运行时等云原生功能

extern crate alloc;

pub mod oci;
pub mod virtio;
pub mod container;
pub mod cgroups;
pub mod namespaces;

use crate::subsystems::microkernel::service_registry::{ServiceInfo, InterfaceVersion, ServiceCategory, get_service_registry};
use crate::subsystems;
use crate::reliability::errno::{EINVAL, ENOENT, ENOMEM, EIO};
use alloc::string::String;
use alloc::string::ToString;
use alloc::vec::Vec;
use alloc::{format, vec};

/// 云原生服务ID
pub const CLOUD_NATIVE_SERVICE_ID: u64 = 100;

/// 云原生服务状态
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloudNativeServiceStatus {
    Uninitialized,
    Initializing,
    Running,
    Stopping,
    Stopped,
    Error,
}

/// 云原生服务统计信息
#[derive(Debug, Clone)]
pub struct CloudNativeServiceStats {
    /// 容器数量
    pub container_count: usize,
    /// 活跃容器数量
    pub active_containers: usize,
    /// 虚拟设备数量
    pub virtual_devices: usize,
    /// 内存使用量（字节）
    pub memory_usage: u64,
    /// CPU使用率（百分比）
    pub cpu_usage_percent: f64,
    /// 网络I/O（字节/秒）
    pub network_io_bps: u64,
    /// 磁盘I/O（字节/秒）
    pub disk_io_bps: u64,
}

impl Default for CloudNativeServiceStats {
    fn default() -> Self {
        Self {
            container_count: 0,
            active_containers: 0,
            virtual_devices: 0,
            memory_usage: 0,
            cpu_usage_percent: 0.0,
            network_io_bps: 0,
            disk_io_bps: 0,
        }
    }
}

/// 云原生服务配置
#[derive(Debug, Clone)]
pub struct CloudNativeServiceConfig {
    /// 是否启用容器功能
    pub enable_containers: bool,
    /// 是否启用cgroups
    pub enable_cgroups: bool,
    /// 是否启用命名空间
    pub enable_namespaces: bool,
    /// 默认容器运行时
    pub default_runtime: String,
    /// 最大容器数量
    pub max_containers: usize,
    /// 资源限制配置
    pub resource_limits: ResourceLimits,
}

/// 资源限制配置
#[derive(Debug, Clone)]
pub struct ResourceLimits {
    /// 每个容器的最大内存（MB）
    pub max_memory_per_container_mb: usize,
    /// 每个容器的最大CPU核心数
    pub max_cpu_per_container: usize,
    /// 每个容器的最大磁盘空间（MB）
    pub max_disk_per_container_mb: usize,
    /// 系统最大总内存（MB）
    pub max_total_memory_mb: usize,
}

impl Default for CloudNativeServiceConfig {
    fn default() -> Self {
        Self {
            enable_containers: true,
            enable_cgroups: true,
            enable_namespaces: true,
            default_runtime: "runc".to_string(),
            max_containers: 1024,
            resource_limits: ResourceLimits {
                max_memory_per_container_mb: 2048,
                max_cpu_per_container: 4,
                max_disk_per_container_mb: 10240,
                max_total_memory_mb: 16384,
            },
        }
    }
}

/// 云原生服务
pub struct CloudNativeService {
    /// 服务ID
    service_id: u64,
    /// 服务状态
    status: CloudNativeServiceStatus,
    /// 服务配置
    config: CloudNativeServiceConfig,
    /// 统计信息
    stats: CloudNativeServiceStats,
}

impl CloudNativeService {
    /// 创建新的云原生服务
    pub fn new(config: CloudNativeServiceConfig) -> Result<Self, i32> {
        Ok(Self {
            service_id: CLOUD_NATIVE_SERVICE_ID,
            status: CloudNativeServiceStatus::Uninitialized,
            config,
            stats: CloudNativeServiceStats::default(),
        })
    }

    /// 初始化云原生服务
    pub fn initialize(&mut self) -> Result<(), i32> {
        self.status = CloudNativeServiceStatus::Initializing;

        // 初始化virtio设备
        if let Err(e) = self::virtio::initialize_virtio_devices() {
            crate::println!("[cloud-native] Failed to initialize virtio devices: {}", e);
            return Err(e);
        }

        // 初始化OCI运行时
        if self.config.enable_containers {
            if let Err(e) = self::oci::initialize_oci_runtime(&self.config.default_runtime) {
                crate::println!("[cloud-native] Failed to initialize OCI runtime: {}", e);
                return Err(e);
            }
        }

        // 初始化cgroups
        if self.config.enable_cgroups {
            if let Err(e) = self::cgroups::initialize_cgroups() {
                crate::println!("[cloud-native] Failed to initialize cgroups: {}", e);
                return Err(e);
            }
        }

        // 初始化命名空间
        if self.config.enable_namespaces {
            if let Err(e) = self::namespaces::initialize_namespaces() {
                crate::println!("[cloud-native] Failed to initialize namespaces: {}", e);
                return Err(e);
            }
        }

        self.status = CloudNativeServiceStatus::Running;
        crate::println!("[cloud-native] Cloud native service initialized successfully");

        Ok(())
    }

    /// 创建容器
    pub fn create_container(&mut self, config: container::ContainerConfig) -> Result<container::ContainerId, i32> {
        if self.status != CloudNativeServiceStatus::Running {
            return Err(EIO);
        }

        if self.stats.container_count >= self.config.max_containers {
            return Err(ENOMEM);
        }

        // 创建容器
        let container_id = container::create_container(config)?;

        self.stats.container_count += 1;
        self.stats.active_containers += 1;

        crate::println!("[cloud-native] Created container: {}", container_id);
        Ok(container_id)
    }

    /// 启动容器
    pub fn start_container(&mut self, container_id: container::ContainerId) -> Result<(), i32> {
        if self.status != CloudNativeServiceStatus::Running {
            return Err(EIO);
        }

        container::start_container(container_id)?;
        crate::println!("[cloud-native] Started container: {}", container_id);
        Ok(())
    }

    /// 停止容器
    pub fn stop_container(&mut self, container_id: container::ContainerId) -> Result<(), i32> {
        if self.status != CloudNativeServiceStatus::Running {
            return Err(EIO);
        }

        container::stop_container(container_id)?;
        if self.stats.active_containers > 0 {
            self.stats.active_containers -= 1;
        }

        crate::println!("[cloud-native] Stopped container: {}", container_id);
        Ok(())
    }

    /// 删除容器
    pub fn remove_container(&mut self, container_id: container::ContainerId) -> Result<(), i32> {
        if self.status != CloudNativeServiceStatus::Running {
            return Err(EIO);
        }

        container::remove_container(container_id)?;
        if self.stats.container_count > 0 {
            self.stats.container_count -= 1;
        }

        crate::println!("[cloud-native] Removed container: {}", container_id);
        Ok(())
    }

    /// 获取服务统计信息
    pub fn get_stats(&self) -> CloudNativeServiceStats {
        self.stats.clone()
    }

    /// 获取服务状态
    pub fn get_status(&self) -> CloudNativeServiceStatus {
        self.status
    }

    /// 更新统计信息
    pub fn update_stats(&mut self) {
        // 更新容器统计
        self.stats.container_count = container::get_container_count();
        self.stats.active_containers = container::get_active_container_count();

        // 更新设备统计
        self.stats.virtual_devices = virtio::get_virtio_device_count();

        // 更新资源使用统计
        self.update_resource_usage();
    }

    /// 更新资源使用统计
    fn update_resource_usage(&mut self) {
        // 这里应该调用实际的资源监控接口
        // 简化实现，使用占位符值
        self.stats.memory_usage = self.stats.container_count as u64 *
            (self.config.resource_limits.max_memory_per_container_mb * 1024 * 1024) as u64;
        self.stats.cpu_usage_percent = 0.0; // 实际应该计算CPU使用率
        self.stats.network_io_bps = 0;
        self.stats.disk_io_bps = 0;
    }

    /// 停止云原生服务
    pub fn shutdown(&mut self) -> Result<(), i32> {
        self.status = CloudNativeServiceStatus::Stopping;

        // 停止所有容器
        container::stop_all_containers()?;

        // 清理virtio设备
        virtio::cleanup_virtio_devices()?;

        // 清理cgroups
        if self.config.enable_cgroups {
            cgroups::cleanup_cgroups()?;
        }

        // 清理命名空间
        if self.config.enable_namespaces {
            namespaces::cleanup_namespaces("default")?;
        }

        self.status = CloudNativeServiceStatus::Stopped;
        crate::println!("[cloud-native] Cloud native service shutdown successfully");

        Ok(())
    }
}

// 全局云原生服务实例
static mut CLOUD_NATIVE_SERVICE: Option<CloudNativeService> = None;
static mut CLOUD_NATIVE_SERVICE_INITIALIZED: bool = false;

/// 初始化云原生服务
pub fn init() -> Result<(), i32> {
    if unsafe { CLOUD_NATIVE_SERVICE_INITIALIZED } {
        return Ok(());
    }

    let config = CloudNativeServiceConfig::default();
    let mut service = CloudNativeService::new(config)?;

    // 初始化服务
    service.initialize()?;

    // 注册到服务注册表
    let registry = get_service_registry().ok_or(EINVAL)?;
    let service_info = ServiceInfo::new(
        CLOUD_NATIVE_SERVICE_ID,
        "CloudNativeService".to_string(),
        "Cloud native features service with containers, cgroups, and virtio".to_string(),
        ServiceCategory::System,
        InterfaceVersion::new(1, 0, 0),
        0, // owner_id - kernel owned
    );

    registry.register_service(service_info)?;

    unsafe {
        CLOUD_NATIVE_SERVICE = Some(service);
        CLOUD_NATIVE_SERVICE_INITIALIZED = true;
    }

    crate::println!("[cloud-native] Cloud native service registered");
    Ok(())
}

/// 获取云原生服务引用
pub fn get_service() -> Option<&'static mut CloudNativeService> {
    unsafe {
        CLOUD_NATIVE_SERVICE.as_mut()
    }
}

/// 获取云原生服务统计信息
pub fn get_stats() -> Option<CloudNativeServiceStats> {
    let service = get_service()?;
    service.update_stats();
    Some(service.get_stats())
}

/// 创建容器（便捷函数）
pub fn create_container(config: container::ContainerConfig) -> Result<container::ContainerId, i32> {
    let service = get_service().ok_or(EIO)?;
    service.create_container(config)
}

/// 启动容器（便捷函数）
pub fn start_container(container_id: container::ContainerId) -> Result<(), i32> {
    let service = get_service().ok_or(EIO)?;
    service.start_container(container_id)
}

/// 停止容器（便捷函数）
pub fn stop_container(container_id: container::ContainerId) -> Result<(), i32> {
    let service = get_service().ok_or(EIO)?;
    service.stop_container(container_id)
}
