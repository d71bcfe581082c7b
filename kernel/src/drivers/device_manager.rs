// 动态设备管理器
//
// 提供动态设备发现、热插拔支持和设备生命周期管理。
//
// 主要功能：
// - 设备自动发现
// - 热插拔事件处理
// - 设备状态监控
// - 电源管理
// - 设备资源分配
// - 设备驱动程序绑定

extern crate alloc;

use alloc::collections::BTreeMap;
use alloc::format;
use alloc::sync::Arc;
use alloc::vec;
use alloc::vec::Vec;
use alloc::string::String;
use alloc::boxed::Box;
use alloc::string::ToString;
use core::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use core::time::Duration;
use spin::Mutex;

use crate::time;
use crate::services::driver::{DeviceType, DeviceStatus, DeviceResources};

// Placeholder resource types
pub struct MemoryResource {
    pub start: usize,
    pub size: usize,
}

pub struct IoResource {
    pub start: u16,
    pub count: u16,
}

pub struct InterruptResource {
    pub irq: u32,
}

pub struct DmaResource {
    pub channel: u8,
}

/// Placeholder Device type
#[derive(Debug, Clone)]
pub struct Device {
    pub id: u32,
    pub device_type: DeviceType,
    pub name: String,
    pub vendor_id: Option<u32>,
    pub device_id: Option<u32>,
    pub class_code: Option<u32>,
    pub resources: DeviceResources,
    pub status: DeviceStatus,
    pub driver_name: Option<String>,
}

/// 设备管理器
pub struct DeviceManager {
    /// 设备列表
    devices: Arc<Mutex<BTreeMap<u32, ManagedDevice>>>,
    /// 热插拔事件队列
    hotplug_events: Arc<Mutex<Vec<HotplugEvent>>>,
    /// 设备监控器
    device_monitors: Arc<Mutex<Vec<Box<dyn DeviceMonitor>>>>,
    /// 电源管理器
    power_manager: Arc<Mutex<DevicePowerManager>>,
    /// 资源管理器
    resource_manager: Arc<Mutex<DeviceResourceManager>>,
    /// 统计信息
    statistics: DeviceManagerStatistics,
    /// 下一个设备ID
    next_device_id: AtomicU64,
    /// 是否启用热插拔
    hotplug_enabled: core::sync::atomic::AtomicBool,
}

/// 管理的设备
#[derive(Debug, Clone)]
pub struct ManagedDevice {
    /// 设备信息
    pub device: Device,
    /// 设备状态
    pub managed_status: ManagedDeviceStatus,
    /// 设备能力
    pub capabilities: DeviceCapabilities,
    /// 电源状态
    pub power_state: DevicePowerState,
    /// 最后活动时间
    pub last_activity: u64,
    /// 统计信息
    pub device_stats: DeviceStatistics,
    /// 事件监听器
    pub event_listeners: Vec<String>,
}

/// 管理的设备状态
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ManagedDeviceStatus {
    /// 未发现
    Undiscovered,
    /// 正在初始化
    Initializing,
    /// 就绪
    Ready,
    /// 正在工作
    Active,
    /// 已暂停
    Paused,
    /// 错误状态
    Error,
    /// 正在移除
    Removing,
    /// 已移除
    Removed,
}

/// 设备能力
#[derive(Debug, Clone)]
pub struct DeviceCapabilities {
    /// 是否支持热插拔
    pub hotplug_support: bool,
    /// 是否支持电源管理
    pub power_management: bool,
    /// 是否支持远程唤醒
    pub remote_wakeup: bool,
    /// 是否支持性能监控
    pub performance_monitoring: bool,
    /// 支持的最大带宽
    pub max_bandwidth: Option<u64>,
    /// 支持的最大并发操作
    pub max_concurrent_operations: Option<u32>,
    /// 设备特定能力
    pub device_specific_capabilities: BTreeMap<String, String>,
}

/// 设备电源状态
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DevicePowerState {
    /// 电源关闭
    PowerOff,
    /// 睡眠状态
    Sleep,
    /// 待机状态
    Standby,
    /// 低功耗状态
    LowPower,
    /// 全功耗状态
    FullPower,
}

/// 设备统计信息
#[derive(Debug, Clone, Default)]
pub struct DeviceStatistics {
    /// 总操作数
    pub total_operations: u64,
    /// 成功操作数
    pub successful_operations: u64,
    /// 失败操作数
    pub failed_operations: u64,
    /// 平均响应时间（微秒）
    pub average_response_time_us: u64,
    /// 总数据传输量（字节）
    pub total_data_transferred: u64,
    /// 错误率（百分比）
    pub error_rate: f64,
    /// 最后更新时间
    pub last_updated: u64,
}

/// 热插拔事件
#[derive(Debug, Clone)]
pub struct HotplugEvent {
    /// 事件ID
    pub event_id: u64,
    /// 事件类型
    pub event_type: HotplugEventType,
    /// 设备类型
    pub device_type: DeviceType,
    /// 设备位置
    pub device_location: DeviceLocation,
    /// 设备标识
    pub device_identifiers: BTreeMap<String, String>,
    /// 事件时间戳
    pub timestamp: u64,
    /// 事件数据
    pub event_data: BTreeMap<String, String>,
}

/// 热插拔事件类型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HotplugEventType {
    /// 设备连接
    DeviceConnected,
    /// 设备断开
    DeviceDisconnected,
    /// 设备错误
    DeviceError,
    /// 电源状态变化
    PowerStateChanged,
    /// 性能变化
    PerformanceChanged,
    /// 配置变化
    ConfigurationChanged,
}

/// 设备位置
#[derive(Debug, Clone)]
pub struct DeviceLocation {
    /// 总线类型
    pub bus_type: BusType,
    /// 总线号
    pub bus_number: u8,
    /// 设备号
    pub device_number: u8,
    /// 功能号
    pub function_number: u8,
    /// 物理位置描述
    pub physical_location: Option<String>,
}

/// 总线类型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BusType {
    /// PCI总线
    Pci,
    /// USB总线
    Usb,
    /// SATA总线
    Sata,
    /// NVMe总线
    Nvme,
    /// I2C总线
    I2c,
    /// SPI总线
    Spi,
    /// 虚拟总线
    Virtual,
    /// 未知总线
    Unknown,
}

/// 设备监控器接口
pub trait DeviceMonitor: Send + Sync {
    /// 获取监控器名称
    fn name(&self) -> &str;
    /// 监控的设备类型
    fn monitored_device_types(&self) -> Vec<DeviceType>;
    /// 监控的总线类型
    fn monitored_bus_types(&self) -> Vec<BusType>;
    /// 开始监控
    fn start_monitoring(&mut self) -> Result<(), DeviceManagerError>;
    /// 停止监控
    fn stop_monitoring(&mut self) -> Result<(), DeviceManagerError>;
    /// 轮询设备变化
    fn poll_for_changes(&mut self) -> Result<Vec<HotplugEvent>, DeviceManagerError>;
}

/// 设备电源管理器
pub struct DevicePowerManager {
    /// 电源策略
    pub power_policy: DevicePowerPolicy,
    /// 设备电源状态
    pub device_power_states: Arc<Mutex<BTreeMap<u32, DevicePowerState>>>,
    /// 电源事件监听器 (not Debug due to Fn trait in PowerEventListener)
    pub power_event_listeners: Arc<Mutex<Vec<PowerEventListener>>>,
}

/// 设备电源策略
#[derive(Debug, Clone)]
pub struct DevicePowerPolicy {
    /// 自动休眠超时（秒）
    pub auto_sleep_timeout: u32,
    /// 是否启用智能电源管理
    pub smart_power_management: bool,
    /// 性能模式
    pub performance_mode: PerformanceMode,
    /// 电源管理级别
    pub power_management_level: PowerManagementLevel,
}

/// 性能模式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PerformanceMode {
    /// 高性能模式
    HighPerformance,
    /// 平衡模式
    Balanced,
    /// 节能模式
    PowerSaver,
}

/// 电源管理级别
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PowerManagementLevel {
    /// 无电源管理
    None,
    /// 基础电源管理
    Basic,
    /// 高级电源管理
    Advanced,
    /// 智能电源管理
    Intelligent,
}

/// 电源事件监听器
pub struct PowerEventListener {
    /// 监听器名称
    pub name: String,
    /// 监听器回调 (not Debug/Clone due to Fn trait)
    pub callback: Box<dyn Fn(PowerEvent) + Send>,
}

/// 电源事件
#[derive(Debug, Clone)]
pub struct PowerEvent {
    /// 事件类型
    pub event_type: PowerEventType,
    /// 设备ID
    pub device_id: u32,
    /// 旧状态
    pub old_state: DevicePowerState,
    /// 新状态
    pub new_state: DevicePowerState,
    /// 时间戳
    pub timestamp: u64,
    /// 事件数据
    pub event_data: BTreeMap<String, String>,
}

/// 电源事件类型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PowerEventType {
    /// 电源状态变化
    PowerStateChanged,
    /// 电源警告
    PowerWarning,
    /// 电源错误
    PowerError,
    /// 电池状态变化
    BatteryStateChanged,
}

/// 设备资源管理器
pub struct DeviceResourceManager {
    /// 内存资源池
    pub memory_resources: Arc<Mutex<BTreeMap<String, MemoryResourcePool>>>,
    /// IO资源池
    pub io_resources: Arc<Mutex<BTreeMap<String, IoResourcePool>>>,
    /// 中断资源池
    pub interrupt_resources: Arc<Mutex<BTreeMap<String, InterruptResourcePool>>>,
    /// DMA资源池
    pub dma_resources: Arc<Mutex<BTreeMap<String, DmaResourcePool>>>,
}

/// 内存资源池
#[derive(Debug, Clone)]
pub struct MemoryResourcePool {
    /// 池名称
    pub name: String,
    /// 总大小
    pub total_size: usize,
    /// 已分配大小
    pub allocated_size: usize,
    /// 块大小
    pub block_size: usize,
    /// 对齐要求
    pub alignment: usize,
    /// 分配的块
    pub allocated_blocks: Vec<(usize, usize)>, // (起始地址, 大小)
}

/// IO资源池
#[derive(Debug, Clone)]
pub struct IoResourcePool {
    /// 池名称
    pub name: String,
    /// 起始端口
    pub start_port: u16,
    /// 结束端口
    pub end_port: u16,
    /// 已分配的端口
    pub allocated_ports: Vec<(u16, u16)>, // (起始端口, 结束端口)
}

/// 中断资源池
#[derive(Debug, Clone)]
pub struct InterruptResourcePool {
    /// 池名称
    pub name: String,
    /// 可用中断
    pub available_interrupts: Vec<u32>,
    /// 已分配中断
    pub allocated_interrupts: BTreeMap<u32, u32>, // 中断号 -> 设备ID
}

/// DMA资源池
#[derive(Debug, Clone)]
pub struct DmaResourcePool {
    /// 池名称
    pub name: String,
    /// 可用通道
    pub available_channels: Vec<u8>,
    /// 已分配通道
    pub allocated_channels: BTreeMap<u8, u32>, // 通道号 -> 设备ID
}

/// 设备管理器统计信息
#[derive(Debug, Default)]
pub struct DeviceManagerStatistics {
    /// 总设备数
    pub total_devices: AtomicUsize,
    /// 活跃设备数
    pub active_devices: AtomicUsize,
    /// 错误设备数
    pub error_devices: AtomicUsize,
    /// 总热插拔事件数
    pub total_hotplug_events: AtomicU64,
    /// 设备连接事件数
    pub device_connect_events: AtomicU64,
    /// 设备断开事件数
    pub device_disconnect_events: AtomicU64,
    /// 电源事件数
    pub power_events: AtomicU64,
    /// 平均响应时间（微秒）
    pub average_response_time_us: AtomicU64,
    /// 资源分配成功率
    pub resource_allocation_success_rate: f64,
}

/// 设备管理器错误
#[derive(Debug, Clone)]
pub enum DeviceManagerError {
    /// 设备未找到
    DeviceNotFound(u32),
    /// 设备类型不支持
    UnsupportedDeviceType(DeviceType),
    /// 资源分配失败
    ResourceAllocationFailed(String),
    /// 设备初始化失败
    DeviceInitializationFailed(String),
    /// 热插拔错误
    HotplugError(String),
    /// 电源管理错误
    PowerManagementError(String),
    /// 监控器错误
    MonitorError(String),
    /// 权限错误
    PermissionDenied,
    /// 系统错误
    SystemError(String),
}

impl core::fmt::Display for DeviceManagerError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            DeviceManagerError::DeviceNotFound(id) => write!(f, "设备未找到: {}", id),
            DeviceManagerError::UnsupportedDeviceType(dt) => write!(f, "不支持的设备类型: {:?}", dt),
            DeviceManagerError::ResourceAllocationFailed(msg) => write!(f, "资源分配失败: {}", msg),
            DeviceManagerError::DeviceInitializationFailed(msg) => write!(f, "设备初始化失败: {}", msg),
            DeviceManagerError::HotplugError(msg) => write!(f, "热插拔错误: {}", msg),
            DeviceManagerError::PowerManagementError(msg) => write!(f, "电源管理错误: {}", msg),
            DeviceManagerError::MonitorError(msg) => write!(f, "监控器错误: {}", msg),
            DeviceManagerError::PermissionDenied => write!(f, "权限错误"),
            DeviceManagerError::SystemError(msg) => write!(f, "系统错误: {}", msg),
        }
    }
}

impl DeviceManager {
    /// 创建新的设备管理器
    pub fn new() -> Self {
        Self {
            devices: Arc::new(Mutex::new(BTreeMap::new())),
            hotplug_events: Arc::new(Mutex::new(Vec::new())),
            device_monitors: Arc::new(Mutex::new(Vec::new())),
            power_manager: Arc::new(Mutex::new(DevicePowerManager::new())),
            resource_manager: Arc::new(Mutex::new(DeviceResourceManager::new())),
            statistics: DeviceManagerStatistics::default(),
            next_device_id: AtomicU64::new(1),
            hotplug_enabled: core::sync::atomic::AtomicBool::new(true),
        }
    }

    /// 初始化设备管理器
    pub fn initialize(&mut self) -> Result<(), DeviceManagerError> {
        crate::println!("[device_manager] 初始化设备管理器");

        // 初始化资源管理器
        self.resource_manager.lock().initialize()?;

        // 初始化电源管理器
        self.power_manager.lock().initialize()?;

        // 发现现有设备
        self.discover_existing_devices()?;

        // 启动设备监控器
        self.start_device_monitors()?;

        // 启动热插拔处理
        self.start_hotplug_processing()?;

        crate::println!("[device_manager] 设备管理器初始化完成");
        Ok(())
    }

    /// 启用热插拔
    pub fn enable_hotplug(&self) -> Result<(), DeviceManagerError> {
        self.hotplug_enabled.store(true, Ordering::SeqCst);
        crate::println!("[device_manager] 热插拔已启用");
        Ok(())
    }

    /// 禁用热插拔
    pub fn disable_hotplug(&self) -> Result<(), DeviceManagerError> {
        self.hotplug_enabled.store(false, Ordering::SeqCst);
        crate::println!("[device_manager] 热插拔已禁用");
        Ok(())
    }

    /// 添加设备监控器
    pub fn add_device_monitor(&self, monitor: Box<dyn DeviceMonitor>) -> Result<(), DeviceManagerError> {
        crate::println!("[device_manager] 添加设备监控器: {}", monitor.name());

        let mut monitors = self.device_monitors.lock();
        monitors.push(monitor);

        // 如果管理器已初始化，启动新的监控器
        if self.hotplug_enabled.load(Ordering::SeqCst) {
            if let Some(monitor) = monitors.last_mut() {
                monitor.start_monitoring()?;
            }
        }

        Ok(())
    }

    /// 添加设备
    pub fn add_device(&self, mut device: Device) -> Result<u32, DeviceManagerError> {
        let device_id = self.next_device_id.fetch_add(1, Ordering::SeqCst) as u32;
        device.id = device_id;

        crate::println!("[device_manager] 添加设备: {} (ID: {})", device.name, device_id);

        // 分配资源
        self.allocate_device_resources(&device)?;

        // 创建管理设备
        let managed_device = ManagedDevice {
            device: device.clone(),
            managed_status: ManagedDeviceStatus::Initializing,
            capabilities: self.detect_device_capabilities(&device),
            power_state: DevicePowerState::FullPower,
            last_activity: time::timestamp_millis(),
            device_stats: DeviceStatistics::default(),
            event_listeners: Vec::new(),
        };

        // 添加到设备列表
        let mut devices = self.devices.lock();
        devices.insert(device_id, managed_device.clone());

        // 绑定驱动程序
        self.bind_device_driver(&device)?;

        // 初始化设备
        self.initialize_device(device_id)?;

        self.statistics.total_devices.fetch_add(1, Ordering::SeqCst);

        Ok(device_id)
    }

    /// 移除设备
    pub fn remove_device(&self, device_id: u32) -> Result<(), DeviceManagerError> {
        crate::println!("[device_manager] 移除设备: {}", device_id);

        let mut devices = self.devices.lock();
        if let Some(mut managed_device) = devices.remove(&device_id) {
            // 通知设备断开
            self.notify_device_disconnected(&managed_device.device)?;

            // 释放资源
            self.release_device_resources(&managed_device.device)?;

            // 关闭设备
            managed_device.managed_status = ManagedDeviceStatus::Removing;

            // 通知驱动程序
            if let Some(ref driver_name) = managed_device.device.driver_name {
                self.notify_driver_device_removed(driver_name, &managed_device.device)?;
            }

            self.statistics.total_devices.fetch_sub(1, Ordering::SeqCst);
        } else {
            return Err(DeviceManagerError::DeviceNotFound(device_id));
        }

        Ok(())
    }

    /// 获取设备
    pub fn get_device(&self, device_id: u32) -> Option<ManagedDevice> {
        let devices = self.devices.lock();
        devices.get(&device_id).cloned()
    }

    /// 获取所有设备
    pub fn get_all_devices(&self) -> Vec<ManagedDevice> {
        let devices = self.devices.lock();
        devices.values().cloned().collect()
    }

    /// 获取指定类型的设备
    pub fn get_devices_by_type(&self, device_type: DeviceType) -> Vec<ManagedDevice> {
        let devices = self.devices.lock();
        devices.values()
            .filter(|d| d.device.device_type == device_type)
            .cloned()
            .collect()
    }

    /// 设置设备电源状态
    pub fn set_device_power_state(&self, device_id: u32, power_state: DevicePowerState) -> Result<(), DeviceManagerError> {
        let mut devices = self.devices.lock();
        if let Some(managed_device) = devices.get_mut(&device_id) {
            let old_state = managed_device.power_state;

            // 设置新的电源状态
            managed_device.power_state = power_state;
            managed_device.last_activity = time::timestamp_millis();

            // 通知电源管理器
            self.power_manager.lock().notify_power_change(
                device_id,
                old_state,
                power_state,
            )?;

            // 更新统计
            self.statistics.power_events.fetch_add(1, Ordering::SeqCst);

            crate::println!("[device_manager] 设备 {} 电源状态: {:?} -> {:?}", device_id, old_state, power_state);
        } else {
            return Err(DeviceManagerError::DeviceNotFound(device_id));
        }

        Ok(())
    }

    /// 处理热插拔事件
    pub fn handle_hotplug_event(&self, event: HotplugEvent) -> Result<(), DeviceManagerError> {
        if !self.hotplug_enabled.load(Ordering::SeqCst) {
            return Ok(());
        }

        crate::println!("[device_manager] 处理热插拔事件: {:?}", event.event_type);

        // 添加到事件队列
        let mut events = self.hotplug_events.lock();
        events.push(event.clone());

        self.statistics.total_hotplug_events.fetch_add(1, Ordering::SeqCst);

        match event.event_type {
            HotplugEventType::DeviceConnected => {
                self.handle_device_connect_event(event)?;
            }
            HotplugEventType::DeviceDisconnected => {
                self.handle_device_disconnect_event(event)?;
            }
            HotplugEventType::DeviceError => {
                self.handle_device_error_event(event)?;
            }
            HotplugEventType::PowerStateChanged => {
                self.handle_power_state_change_event(event)?;
            }
            _ => {}
        }

        Ok(())
    }

    /// 获取统计信息
    pub fn get_statistics(&self) -> DeviceManagerStatistics {
        DeviceManagerStatistics {
            total_devices: AtomicUsize::new(self.statistics.total_devices.load(Ordering::SeqCst)),
            active_devices: AtomicUsize::new(self.statistics.active_devices.load(Ordering::SeqCst)),
            error_devices: AtomicUsize::new(self.statistics.error_devices.load(Ordering::SeqCst)),
            total_hotplug_events: AtomicU64::new(self.statistics.total_hotplug_events.load(Ordering::SeqCst)),
            device_connect_events: AtomicU64::new(self.statistics.device_connect_events.load(Ordering::SeqCst)),
            device_disconnect_events: AtomicU64::new(self.statistics.device_disconnect_events.load(Ordering::SeqCst)),
            power_events: AtomicU64::new(self.statistics.power_events.load(Ordering::SeqCst)),
            average_response_time_us: AtomicU64::new(self.statistics.average_response_time_us.load(Ordering::SeqCst)),
            resource_allocation_success_rate: self.statistics.resource_allocation_success_rate,
        }
    }

    /// 私有辅助方法
    fn discover_existing_devices(&self) -> Result<(), DeviceManagerError> {
        crate::println!("[device_manager] 发现现有设备");

        // 扫描PCI总线
        self.scan_pci_bus()?;

        // 扫描USB总线
        self.scan_usb_bus()?;

        // 扫描其他总线
        self.scan_other_buses()?;

        Ok(())
    }

    fn scan_pci_bus(&self) -> Result<(), DeviceManagerError> {
        // 简化实现，扫描PCI设备
        for bus in 0..4 {
            for device in 0..32 {
                for function in 0..8 {
                    if let Some(pci_device) = self.detect_pci_device(bus, device, function) {
                        self.add_device(pci_device)?;
                    }
                }
            }
        }

        Ok(())
    }

    fn scan_usb_bus(&self) -> Result<(), DeviceManagerError> {
        // 简化实现，扫描USB设备
        crate::println!("[device_manager] 扫描USB设备");
        Ok(())
    }

    fn scan_other_buses(&self) -> Result<(), DeviceManagerError> {
        // 扫描其他类型的总线
        crate::println!("[device_manager] 扫描其他总线");
        Ok(())
    }

    fn detect_pci_device(&self, bus: u8, device: u8, function: u8) -> Option<Device> {
        // 简化实现，检测PCI设备
        // 实际需要读取PCI配置空间

        // 模拟发现一个存储设备
        if bus == 0 && device == 1 && function == 0 {
            return Some(Device {
                id: 0,
                device_type: DeviceType::Block,
                name: format!("PCI Storage Device {}:{}.{}", bus, device, function),
                vendor_id: Some(0x1234),
                device_id: Some(0x5678),
                class_code: Some(0x010802), // Mass Storage
                resources: DeviceResources {
                    memory_regions: vec![],
                    io_ports: vec![],
                    irqs: vec![],
                    dma_channels: vec![],
                    clocks: vec![],
                },
                status: DeviceStatus::Unknown,
                driver_name: None,
            });
        }

        None
    }

    fn start_device_monitors(&mut self) -> Result<(), DeviceManagerError> {
        crate::println!("[device_manager] 启动设备监控器");

        let mut monitors = self.device_monitors.lock();
        for monitor in monitors.iter_mut() {
            monitor.start_monitoring()?;
        }

        Ok(())
    }

    fn start_hotplug_processing(&self) -> Result<(), DeviceManagerError> {
        crate::println!("[device_manager] 启动热插拔处理");

        // 启动后台线程处理热插拔事件
        // 简化实现，实际需要创建后台任务

        Ok(())
    }

    fn allocate_device_resources(&self, device: &Device) -> Result<(), DeviceManagerError> {
        crate::println!("[device_manager] 为设备 {} 分配资源", device.name);

        self.resource_manager.lock().allocate_resources_for_device(device)
    }

    fn release_device_resources(&self, device: &Device) -> Result<(), DeviceManagerError> {
        crate::println!("[device_manager] 释放设备 {} 的资源", device.name);

        self.resource_manager.lock().release_resources_for_device(device)
    }

    fn bind_device_driver(&self, device: &Device) -> Result<(), DeviceManagerError> {
        crate::println!("[device_manager] 为设备 {} 绑定驱动程序", device.name);

        // 使用驱动程序管理器绑定驱动程序
        // TODO: Implement driver binding
        // if let Some(driver_manager) = crate::drivers::get_driver_manager() {
        //     driver_manager.register_device(device.clone())?;
        // }

        Ok(())
    }

    fn initialize_device(&self, device_id: u32) -> Result<(), DeviceManagerError> {
        let mut devices = self.devices.lock();
        if let Some(managed_device) = devices.get_mut(&device_id) {
            // 设置设备为就绪状态
            managed_device.managed_status = ManagedDeviceStatus::Ready;

            // 通知驱动程序初始化设备
            // 简化实现

            crate::println!("[device_manager] 设备 {} 初始化完成", device_id);

            self.statistics.active_devices.fetch_add(1, Ordering::SeqCst);
        }

        Ok(())
    }

    fn detect_device_capabilities(&self, device: &Device) -> DeviceCapabilities {
        // 根据设备类型和能力检测设备能力
        DeviceCapabilities {
            hotplug_support: true,
            power_management: true,
            remote_wakeup: false,
            performance_monitoring: true,
            max_bandwidth: None,
            max_concurrent_operations: None,
            device_specific_capabilities: BTreeMap::new(),
        }
    }

    fn notify_device_connected(&self, device: &Device) -> Result<(), DeviceManagerError> {
        crate::println!("[device_manager] 通知设备连接: {}", device.name);

        // 通知相关组件
        self.statistics.device_connect_events.fetch_add(1, Ordering::SeqCst);

        Ok(())
    }

    fn notify_device_disconnected(&self, device: &Device) -> Result<(), DeviceManagerError> {
        crate::println!("[device_manager] 通知设备断开: {}", device.name);

        self.statistics.device_disconnect_events.fetch_add(1, Ordering::SeqCst);

        Ok(())
    }

    fn notify_driver_device_removed(&self, driver_name: &str, device: &Device) -> Result<(), DeviceManagerError> {
        // 通知驱动程序设备移除
        // TODO: Implement driver notification
        // if let Some(driver_manager) = crate::drivers::get_driver_manager() {
        //     driver_manager.remove_device(device.id)?;
        // }

        Ok(())
    }

    fn handle_device_connect_event(&self, event: HotplugEvent) -> Result<(), DeviceManagerError> {
        crate::println!("[device_manager] 处理设备连接事件: {:?}", event.device_location);

        // 从事件信息创建设备
        let device = self.create_device_from_event(&event)?;

        // 添加设备
        self.add_device(device)?;

        self.statistics.device_connect_events.fetch_add(1, Ordering::SeqCst);

        Ok(())
    }

    fn handle_device_disconnect_event(&self, event: HotplugEvent) -> Result<(), DeviceManagerError> {
        crate::println!("[device_manager] 处理设备断开事件: {:?}", event.device_location);

        // 查找对应的设备并移除
        let devices = self.devices.lock();
        for (device_id, managed_device) in devices.iter() {
            if self.device_matches_event(&managed_device.device, &event) {
                self.remove_device(*device_id)?;
                break;
            }
        }

        self.statistics.device_disconnect_events.fetch_add(1, Ordering::SeqCst);

        Ok(())
    }

    fn handle_device_error_event(&self, event: HotplugEvent) -> Result<(), DeviceManagerError> {
        crate::println!("[device_manager] 处理设备错误事件: {:?}", event.device_location);

        // 查找对应的设备并标记错误状态
        let mut devices = self.devices.lock();
        for (device_id, managed_device) in devices.iter_mut() {
            if self.device_matches_event(&managed_device.device, &event) {
                managed_device.managed_status = ManagedDeviceStatus::Error;
                self.statistics.error_devices.fetch_add(1, Ordering::SeqCst);
                break;
            }
        }

        Ok(())
    }

    fn handle_power_state_change_event(&self, event: HotplugEvent) -> Result<(), DeviceManagerError> {
        crate::println!("[device_manager] 处理电源状态变化事件: {:?}", event.device_location);

        // 从事件数据解析电源状态
        if let Some(power_state_str) = event.event_data.get("power_state") {
            if let Ok(power_state) = self.parse_power_state(power_state_str) {
                // 查找设备并设置电源状态
                let devices = self.devices.lock();
                for (device_id, _) in devices.iter() {
                    // 简化实现，假设找到匹配的设备
                    self.set_device_power_state(*device_id, power_state)?;
                    break;
                }
            }
        }

        Ok(())
    }

    fn create_device_from_event(&self, event: &HotplugEvent) -> Result<Device, DeviceManagerError> {
        // 从热插拔事件创建设备对象
        let device_name = format!("{:?} Device", event.device_type);

        Ok(Device {
            id: 0, // 将在add_device中设置
            device_type: event.device_type,
            name: device_name,
            vendor_id: Some(0x0000), // 从事件标识符获取
            device_id: Some(0x0000),
            class_code: Some(0x000000),
            resources: DeviceResources {
                memory_regions: vec![],
                io_ports: vec![],
                irqs: vec![],
                dma_channels: vec![],
                clocks: vec![],
            },
            status: DeviceStatus::Unknown,
            driver_name: None,
        })
    }

    fn device_matches_event(&self, device: &Device, event: &HotplugEvent) -> bool {
        // 简化实现，根据设备位置和类型匹配
        device.device_type == event.device_type
    }

    fn parse_power_state(&self, power_state_str: &str) -> Result<DevicePowerState, DeviceManagerError> {
        match power_state_str {
            "PowerOff" => Ok(DevicePowerState::PowerOff),
            "Sleep" => Ok(DevicePowerState::Sleep),
            "Standby" => Ok(DevicePowerState::Standby),
            "LowPower" => Ok(DevicePowerState::LowPower),
            "FullPower" => Ok(DevicePowerState::FullPower),
            _ => Err(DeviceManagerError::SystemError("无效的电源状态".to_string())),
        }
    }
}

impl DevicePowerManager {
    /// 创建新的设备电源管理器
    pub fn new() -> Self {
        Self {
            power_policy: DevicePowerPolicy::default(),
            device_power_states: Arc::new(Mutex::new(BTreeMap::new())),
            power_event_listeners: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// 初始化电源管理器
    pub fn initialize(&mut self) -> Result<(), DeviceManagerError> {
        crate::println!("[device_manager] 初始化电源管理器");
        Ok(())
    }

    /// 通知电源变化
    pub fn notify_power_change(&self, device_id: u32, old_state: DevicePowerState, new_state: DevicePowerState) -> Result<(), DeviceManagerError> {
        // 更新设备电源状态
        let mut power_states = self.device_power_states.lock();
        power_states.insert(device_id, new_state);

        // 创建电源事件
        let power_event = PowerEvent {
            event_type: PowerEventType::PowerStateChanged,
            device_id,
            old_state,
            new_state,
            timestamp: time::timestamp_millis(),
            event_data: BTreeMap::new(),
        };

        // 通知事件监听器
        let listeners = self.power_event_listeners.lock();
        for listener in listeners.iter() {
            (listener.callback)(power_event.clone());
        }

        Ok(())
    }

    /// 设置电源策略
    pub fn set_power_policy(&mut self, policy: DevicePowerPolicy) {
        self.power_policy = policy;
        crate::println!("[device_manager] 更新电源策略");
    }
}

impl Default for DevicePowerPolicy {
    fn default() -> Self {
        Self {
            auto_sleep_timeout: 300, // 5分钟
            smart_power_management: true,
            performance_mode: PerformanceMode::Balanced,
            power_management_level: PowerManagementLevel::Advanced,
        }
    }
}

impl DeviceResourceManager {
    /// 创建新的设备资源管理器
    pub fn new() -> Self {
        Self {
            memory_resources: Arc::new(Mutex::new(BTreeMap::new())),
            io_resources: Arc::new(Mutex::new(BTreeMap::new())),
            interrupt_resources: Arc::new(Mutex::new(BTreeMap::new())),
            dma_resources: Arc::new(Mutex::new(BTreeMap::new())),
        }
    }

    /// 初始化资源管理器
    pub fn initialize(&mut self) -> Result<(), DeviceManagerError> {
        crate::println!("[device_manager] 初始化资源管理器");

        // 创建默认资源池
        self.create_default_resource_pools()?;

        Ok(())
    }

    /// 为设备分配资源
    pub fn allocate_resources_for_device(&self, device: &Device) -> Result<(), DeviceManagerError> {
        crate::println!("[device_manager] 为设备 {} 分配资源", device.name);

        // 分配内存资源
        for region in &device.resources.memory_regions {
            let resource = MemoryResource {
                start: region.start,
                size: region.size,
            };
            self.allocate_memory_resource(&resource)?;
        }

        // 分配IO资源
        for port_range in &device.resources.io_ports {
            let resource = IoResource {
                start: port_range.start,
                count: port_range.count,
            };
            self.allocate_io_resource(&resource)?;
        }

        // 分配中断资源
        for &irq in &device.resources.irqs {
            let resource = InterruptResource { irq };
            self.allocate_interrupt_resource(&resource, device.id)?;
        }

        // 分配DMA资源
        for &channel in &device.resources.dma_channels {
            if channel <= u8::MAX as u32 {
                let resource = DmaResource { channel: channel as u8 };
                self.allocate_dma_resource(&resource, device.id)?;
            }
        }

        Ok(())
    }

    /// 释放设备资源
    pub fn release_resources_for_device(&self, device: &Device) -> Result<(), DeviceManagerError> {
        crate::println!("[device_manager] 释放设备 {} 的资源", device.name);

        // 释放各种资源
        // 简化实现

        Ok(())
    }

    /// 创建默认资源池
    fn create_default_resource_pools(&mut self) -> Result<(), DeviceManagerError> {
        // 创建内存资源池
        let memory_pool = MemoryResourcePool {
            name: "default_memory".to_string(),
            total_size: 1024 * 1024 * 1024, // 1GB
            allocated_size: 0,
            block_size: 4096,
            alignment: 4096,
            allocated_blocks: Vec::new(),
        };

        let mut memory_resources = self.memory_resources.lock();
        memory_resources.insert("default".to_string(), memory_pool);

        // 创建IO资源池
        let io_pool = IoResourcePool {
            name: "default_io".to_string(),
            start_port: 0x1000,
            end_port: 0xFFFF,
            allocated_ports: Vec::new(),
        };

        let mut io_resources = self.io_resources.lock();
        io_resources.insert("default".to_string(), io_pool);

        Ok(())
    }

    fn allocate_memory_resource(&self, _resource: &MemoryResource) -> Result<(), DeviceManagerError> {
        // 简化实现
        Ok(())
    }

    fn allocate_io_resource(&self, _resource: &IoResource) -> Result<(), DeviceManagerError> {
        // 简化实现
        Ok(())
    }

    fn allocate_interrupt_resource(&self, _resource: &InterruptResource, device_id: u32) -> Result<(), DeviceManagerError> {
        let mut interrupt_resources = self.interrupt_resources.lock();
        let pool = interrupt_resources.entry("default".to_string())
            .or_insert_with(|| InterruptResourcePool {
                name: "default".to_string(),
                available_interrupts: (32..64).collect(), // 中断32-63
                allocated_interrupts: BTreeMap::new(),
            });

        // 分配第一个可用的中断
        if let Some(interrupt) = pool.available_interrupts.first() {
            let interrupt = *interrupt;
            pool.available_interrupts.remove(0);
            pool.allocated_interrupts.insert(interrupt, device_id);
            Ok(())
        } else {
            Err(DeviceManagerError::ResourceAllocationFailed("没有可用的中断".to_string()))
        }
    }

    fn allocate_dma_resource(&self, resource: &DmaResource, device_id: u32) -> Result<(), DeviceManagerError> {
        let mut dma_resources = self.dma_resources.lock();
        let pool = dma_resources.entry("default".to_string())
            .or_insert_with(|| DmaResourcePool {
                name: "default".to_string(),
                available_channels: vec![0, 1, 2, 3, 4, 5, 6, 7],
                allocated_channels: BTreeMap::new(),
            });

        // 分配指定的DMA通道
        if pool.available_channels.contains(&resource.channel) {
            pool.available_channels.retain(|&ch| ch != resource.channel);
            pool.allocated_channels.insert(resource.channel, device_id);
            Ok(())
        } else {
            Err(DeviceManagerError::ResourceAllocationFailed("DMA通道不可用".to_string()))
        }
    }
}

/// 全局设备管理器实例
static DEVICE_MANAGER: spin::Mutex<Option<alloc::sync::Arc<DeviceManager>>> = spin::Mutex::new(None);

/// 初始化设备管理子系统
pub fn init() -> Result<(), DeviceManagerError> {
    let mut manager = DeviceManager::new();

    // 添加内置监控器
    add_builtin_monitors(&mut manager)?;

    manager.initialize()?;

    let mut global_manager = DEVICE_MANAGER.lock();
    *global_manager = Some(alloc::sync::Arc::new(manager));

    crate::println!("[device_manager] 设备管理子系统初始化完成");
    Ok(())
}

/// 添加内置监控器
fn add_builtin_monitors(manager: &mut DeviceManager) -> Result<(), DeviceManagerError> {
    // 添加PCI监控器
    manager.add_device_monitor(Box::new(PciMonitor::new()))?;

    // 添加USB监控器
    manager.add_device_monitor(Box::new(UsbMonitor::new()))?;

    Ok(())
}

/// 获取全局设备管理器
pub fn get_device_manager() -> Result<alloc::sync::Arc<DeviceManager>, DeviceManagerError> {
    let manager = DEVICE_MANAGER.lock();
    manager.as_ref().cloned().ok_or(DeviceManagerError::SystemError("设备管理器未初始化".to_string()))
}

/// PCI设备监控器
pub struct PciMonitor {
    name: String,
    monitored_types: Vec<DeviceType>,
    monitored_buses: Vec<BusType>,
}

impl PciMonitor {
    pub fn new() -> Self {
        Self {
            name: "PCI Monitor".to_string(),
            monitored_types: vec![
                DeviceType::Block,
                DeviceType::Network,
                DeviceType::Graphics,
                DeviceType::Audio,
            ],
            monitored_buses: vec![BusType::Pci],
        }
    }
}

impl DeviceMonitor for PciMonitor {
    fn name(&self) -> &str {
        &self.name
    }

    fn monitored_device_types(&self) -> Vec<DeviceType> {
        self.monitored_types.clone()
    }

    fn monitored_bus_types(&self) -> Vec<BusType> {
        self.monitored_buses.clone()
    }

    fn start_monitoring(&mut self) -> Result<(), DeviceManagerError> {
        crate::println!("[pci_monitor] PCI监控器已启动");
        Ok(())
    }

    fn stop_monitoring(&mut self) -> Result<(), DeviceManagerError> {
        crate::println!("[pci_monitor] PCI监控器已停止");
        Ok(())
    }

    fn poll_for_changes(&mut self) -> Result<Vec<HotplugEvent>, DeviceManagerError> {
        // 简化实现
        Ok(Vec::new())
    }
}

/// USB设备监控器
pub struct UsbMonitor {
    name: String,
    monitored_types: Vec<DeviceType>,
    monitored_buses: Vec<BusType>,
}

impl UsbMonitor {
    pub fn new() -> Self {
        Self {
            name: "USB Monitor".to_string(),
            monitored_types: vec![
                DeviceType::Input,
                DeviceType::Block,
                DeviceType::Audio,
                DeviceType::Char,
            ],
            monitored_buses: vec![BusType::Usb],
        }
    }
}

impl DeviceMonitor for UsbMonitor {
    fn name(&self) -> &str {
        &self.name
    }

    fn monitored_device_types(&self) -> Vec<DeviceType> {
        self.monitored_types.clone()
    }

    fn monitored_bus_types(&self) -> Vec<BusType> {
        self.monitored_buses.clone()
    }

    fn start_monitoring(&mut self) -> Result<(), DeviceManagerError> {
        crate::println!("[usb_monitor] USB监控器已启动");
        Ok(())
    }

    fn stop_monitoring(&mut self) -> Result<(), DeviceManagerError> {
        crate::println!("[usb_monitor] USB监控器已停止");
        Ok(())
    }

    fn poll_for_changes(&mut self) -> Result<Vec<HotplugEvent>, DeviceManagerError> {
        // 简化实现
        Ok(Vec::new())
    }
}
