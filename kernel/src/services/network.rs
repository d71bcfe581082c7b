// Network Service
//
// 网络管理服务
// 提供TCP/IP协议栈、网络设备管理和网络配置功能

extern crate alloc;
use crate::microkernel::ipc::MessageQueue;
use core::sync::atomic::AtomicU32;

use crate::types::stubs::{Message, MessageType, send_message, receive_message,
                          AF_INET, AF_INET6, AF_UNIX, SOCK_STREAM, SOCK_DGRAM, SOCK_RAW, get_service_registry};
use crate::microkernel::service_registry::{ServiceId, ServiceInfo, InterfaceVersion, ServiceCategory};
use crate::reliability::errno::{EINVAL, ENOENT, EEXIST, ENOMEM, EIO};
use alloc::collections::BTreeMap;
use alloc::sync::Arc;
use alloc::vec::Vec;
use alloc::vec;
use alloc::format;
use alloc::string::String;
use alloc::string::ToString;
use spin::Mutex;
use core::sync::atomic::{AtomicU64, AtomicUsize, Ordering};

/// 网络协议类型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NetworkProtocol {
    IP,     // Internet Protocol
    TCP,    // Transmission Control Protocol
    UDP,    // User Datagram Protocol
    ICMP,   // Internet Control Message Protocol
    ICMPv6, // ICMP for IPv6
    ARP,    // Address Resolution Protocol
    IPv4,   // Internet Protocol version 4
    IPv6,   // Internet Protocol version 6
}

/// 网络接口状态
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InterfaceStatus {
    Down,   // 接口关闭
    Up,     // 接口启动
    Testing,// 接口测试中
}

/// 网络接口类型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InterfaceType {
    Ethernet,   // 以太网
    Loopback,   // 回环接口
    Wireless,   // 无线网络
    Tunnel,     // 隧道接口
    Virtual,    // 虚拟接口
}

/// 网络接口信息
#[derive(Debug)]
pub struct NetworkInterface {
    /// 接口名称
    pub name: String,
    /// 接口索引
    pub index: u32,
    /// 接口类型
    pub interface_type: InterfaceType,
    /// 接口状态
    pub status: InterfaceStatus,
    /// MAC地址
    pub mac_address: [u8; 6],
    /// IPv4地址
    pub ipv4_address: Option<u32>,
    /// IPv6地址
    pub ipv6_address: Option<[u8; 16]>,
    /// 子网掩码
    pub netmask: Option<u32>,
    /// 网关地址
    pub gateway: Option<u32>,
    /// MTU (Maximum Transmission Unit)
    pub mtu: u32,
    /// 发送包计数
    pub tx_packets: AtomicU64,
    /// 接收包计数
    pub rx_packets: AtomicU64,
    /// 发送字节计数
    pub tx_bytes: AtomicU64,
    /// 接收字节计数
    pub rx_bytes: AtomicU64,
    /// 错误包计数
    pub tx_errors: AtomicU64,
    pub rx_errors: AtomicU64,
}

impl NetworkInterface {
    /// 创建新的网络接口
    pub fn new(name: String, index: u32, interface_type: InterfaceType) -> Self {
        Self {
            name,
            index,
            interface_type,
            status: InterfaceStatus::Down,
            mac_address: [0; 6],
            ipv4_address: None,
            ipv6_address: None,
            netmask: None,
            gateway: None,
            mtu: 1500, // 默认以太网MTU
            tx_packets: AtomicU64::new(0),
            rx_packets: AtomicU64::new(0),
            tx_bytes: AtomicU64::new(0),
            rx_bytes: AtomicU64::new(0),
            tx_errors: AtomicU64::new(0),
            rx_errors: AtomicU64::new(0),
        }
    }

    /// 设置IPv4地址
    pub fn set_ipv4_address(&mut self, address: u32, netmask: u32) {
        self.ipv4_address = Some(address);
        self.netmask = Some(netmask);
    }

    /// 设置MAC地址
    pub fn set_mac_address(&mut self, mac: [u8; 6]) {
        self.mac_address = mac;
    }

    /// 启动接口
    pub fn bring_up(&mut self) {
        self.status = InterfaceStatus::Up;
    }

    /// 关闭接口
    pub fn bring_down(&mut self) {
        self.status = InterfaceStatus::Down;
    }

    /// 更新统计信息
    pub fn update_tx_stats(&self, bytes: u64, packets: u64, errors: u64) {
        self.tx_bytes.fetch_add(bytes, Ordering::Relaxed);
        self.tx_packets.fetch_add(packets, Ordering::Relaxed);
        if errors > 0 {
            self.tx_errors.fetch_add(errors, Ordering::Relaxed);
        }
    }

    /// 更新接收统计信息
    pub fn update_rx_stats(&self, bytes: u64, packets: u64, errors: u64) {
        self.rx_bytes.fetch_add(bytes, Ordering::Relaxed);
        self.rx_packets.fetch_add(packets, Ordering::Relaxed);
        if errors > 0 {
            self.rx_errors.fetch_add(errors, Ordering::Relaxed);
        }
    }

    /// 获取网络统计信息
    pub fn get_stats(&self) -> NetworkInterfaceStats {
        NetworkInterfaceStats {
            tx_packets: self.tx_packets.load(Ordering::Relaxed),
            rx_packets: self.rx_packets.load(Ordering::Relaxed),
            tx_bytes: self.tx_bytes.load(Ordering::Relaxed),
            rx_bytes: self.rx_bytes.load(Ordering::Relaxed),
            tx_errors: self.tx_errors.load(Ordering::Relaxed),
            rx_errors: self.rx_errors.load(Ordering::Relaxed),
        }
    }
}

/// 网络接口统计信息
#[derive(Debug)]
pub struct NetworkInterfaceStats {
    pub tx_packets: u64,
    pub rx_packets: u64,
    pub tx_bytes: u64,
    pub rx_bytes: u64,
    pub tx_errors: u64,
    pub rx_errors: u64,
}

/// Socket信息
#[derive(Debug)]
pub struct SocketInfo {
    /// Socket ID
    pub socket_id: u32,
    /// Socket类型 (SOCK_STREAM, SOCK_DGRAM, SOCK_RAW)
    pub socket_type: i32,
    /// 协议族 (AF_INET, AF_INET6, AF_UNIX)
    pub protocol_family: i32,
    /// 协议号
    pub protocol: i32,
    /// 本地地址
    pub local_address: SocketAddress,
    /// 远程地址
    pub remote_address: Option<SocketAddress>,
    /// Socket状态
    pub state: SocketState,
    /// 所属进程ID
    pub process_id: u32,
    /// 接收缓冲区大小
    pub rx_buffer_size: u32,
    /// 发送缓冲区大小
    pub tx_buffer_size: u32,
    /// 接收队列长度
    pub rx_queue_len: AtomicUsize,
    /// 发送队列长度
    pub tx_queue_len: AtomicUsize,
}

impl Clone for SocketInfo {
    fn clone(&self) -> Self {
        Self {
            socket_id: self.socket_id,
            socket_type: self.socket_type,
            protocol_family: self.protocol_family,
            protocol: self.protocol,
            local_address: self.local_address.clone(),
            remote_address: self.remote_address.clone(),
            state: self.state.clone(),
            process_id: self.process_id,
            rx_buffer_size: self.rx_buffer_size,
            tx_buffer_size: self.tx_buffer_size,
            rx_queue_len: AtomicUsize::new(self.rx_queue_len.load(Ordering::SeqCst)),
            tx_queue_len: AtomicUsize::new(self.tx_queue_len.load(Ordering::SeqCst)),
        }
    }
}

/// Socket状态
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SocketState {
    Closed,     // 关闭状态
    Listen,     // 监听状态
    SynSent,    // SYN已发送
    SynReceived,// SYN已接收
    Established,// 已建立连接
    FinWait1,   // FIN等待1
    FinWait2,   // FIN等待2
    CloseWait,  // 关闭等待
    Closing,    // 关闭中
    LastAck,    // 最后ACK
    TimeWait,   // 时间等待
}

/// Socket地址
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SocketAddress {
    /// 地址类型
    pub family: i32,
    /// IPv4地址
    pub ipv4: Option<u32>,
    /// IPv6地址
    pub ipv6: Option<[u8; 16]>,
    /// 端口号
    pub port: u16,
}

impl SocketAddress {
    /// 创建IPv4地址
    pub fn new_ipv4(address: u32, port: u16) -> Self {
        Self {
            family: AF_INET,
            ipv4: Some(address),
            ipv6: None,
            port,
        }
    }

    /// 创建IPv6地址
    pub fn new_ipv6(address: [u8; 16], port: u16) -> Self {
        Self {
            family: AF_INET6,
            ipv4: None,
            ipv6: Some(address),
            port,
        }
    }

    /// 创建Unix域套接字地址
    pub fn new_unix() -> Self {
        Self {
            family: AF_UNIX,
            ipv4: None,
            ipv6: None,
            port: 0,
        }
    }
}

/// 网络统计信息
#[derive(Debug)]
pub struct NetworkStats {
    /// 总发送包数
    pub total_tx_packets: AtomicU64,
    /// 总接收包数
    pub total_rx_packets: AtomicU64,
    /// 总发送字节数
    pub total_tx_bytes: AtomicU64,
    /// 总接收字节数
    pub total_rx_bytes: AtomicU64,
    /// 总错误数
    pub total_errors: AtomicU64,
    /// 丢弃包数
    pub dropped_packets: AtomicU64,
    /// 活跃连接数
    pub active_connections: AtomicUsize,
    /// 创建的Socket总数
    pub total_sockets_created: AtomicU64,
    /// 关闭的Socket总数
    pub total_sockets_closed: AtomicU64,
}

impl NetworkStats {
    /// 创建新的网络统计信息
    pub const fn new() -> Self {
        Self {
            total_tx_packets: AtomicU64::new(0),
            total_rx_packets: AtomicU64::new(0),
            total_tx_bytes: AtomicU64::new(0),
            total_rx_bytes: AtomicU64::new(0),
            total_errors: AtomicU64::new(0),
            dropped_packets: AtomicU64::new(0),
            active_connections: AtomicUsize::new(0),
            total_sockets_created: AtomicU64::new(0),
            total_sockets_closed: AtomicU64::new(0),
        }
    }

    /// 获取统计快照
    pub fn get_snapshot(&self) -> NetworkStatsSnapshot {
        NetworkStatsSnapshot {
            total_tx_packets: self.total_tx_packets.load(Ordering::Relaxed),
            total_rx_packets: self.total_rx_packets.load(Ordering::Relaxed),
            total_tx_bytes: self.total_tx_bytes.load(Ordering::Relaxed),
            total_rx_bytes: self.total_rx_bytes.load(Ordering::Relaxed),
            total_errors: self.total_errors.load(Ordering::Relaxed),
            dropped_packets: self.dropped_packets.load(Ordering::Relaxed),
            active_connections: self.active_connections.load(Ordering::Relaxed),
            total_sockets_created: self.total_sockets_created.load(Ordering::Relaxed),
            total_sockets_closed: self.total_sockets_closed.load(Ordering::Relaxed),
        }
    }
}

/// 网络统计信息快照
#[derive(Debug, Clone)]
pub struct NetworkStatsSnapshot {
    pub total_tx_packets: u64,
    pub total_rx_packets: u64,
    pub total_tx_bytes: u64,
    pub total_rx_bytes: u64,
    pub total_errors: u64,
    pub dropped_packets: u64,
    pub active_connections: usize,
    pub total_sockets_created: u64,
    pub total_sockets_closed: u64,
}

/// 网络配置
#[derive(Debug, Clone)]
pub struct NetworkConfig {
    /// 默认网关
    pub default_gateway: Option<u32>,
    /// DNS服务器列表
    pub dns_servers: Vec<u32>,
    /// 搜索域
    pub search_domains: Vec<String>,
    /// 主机名
    pub hostname: String,
    /// 域名
    pub domain_name: String,
    /// NTP服务器
    pub ntp_server: Option<u32>,
    /// DHCP启用
    pub dhcp_enabled: bool,
}

impl NetworkConfig {
    /// 创建默认网络配置
    pub fn default() -> Self {
        Self {
            default_gateway: None,
            dns_servers: vec![0x08080808], // 8.8.8.8
            search_domains: Vec::new(),
            hostname: "localhost".to_string(),
            domain_name: "local".to_string(),
            ntp_server: None,
            dhcp_enabled: true,
        }
    }
}

/// 网络服务
pub struct NetworkService {
    /// 服务ID
    service_id: ServiceId,
    /// 消息队列
    message_queue: Arc<Mutex<MessageQueue>>,
    /// 网络接口
    interfaces: Arc<Mutex<BTreeMap<u32, NetworkInterface>>>,
    /// Sockets
    sockets: Arc<Mutex<BTreeMap<u32, SocketInfo>>>,
    /// 网络统计信息
    stats: Arc<Mutex<NetworkStats>>,
    /// 网络配置
    config: Arc<Mutex<NetworkConfig>>,
    /// Socket ID生成器
    next_socket_id: AtomicU32,
    /// 接口索引生成器
    next_interface_index: AtomicU32,
}

impl NetworkService {
    /// 创建新的网络服务
    pub fn new() -> Result<Self, &'static str> {
        let service_id = 2; // 固定ID用于网络服务
        let message_queue = Arc::new(Mutex::new(MessageQueue::new(service_id, service_id, 1024, 4096)));

        let mut service = Self {
            service_id,
            message_queue,
            interfaces: Arc::new(Mutex::new(BTreeMap::new())),
            sockets: Arc::new(Mutex::new(BTreeMap::new())),
            stats: Arc::new(Mutex::new(NetworkStats::new())),
            config: Arc::new(Mutex::new(NetworkConfig::default())),
            next_socket_id: AtomicU32::new(1000),
            next_interface_index: AtomicU32::new(1),
        };

        // 初始化回环接口
        service.initialize_loopback_interface();

        Ok(service)
    }

    /// 初始化回环接口
    fn initialize_loopback_interface(&mut self) {
        let loopback_interface = NetworkInterface::new(
            "lo".to_string(),
            0, // 回环接口索引为0
            InterfaceType::Loopback,
        );

        // 设置回环接口地址 (127.0.0.1)
        let mut interface = loopback_interface;
        interface.set_ipv4_address(0x7F000001, 0xFF000000); // 127.0.0.1/8
        interface.set_mac_address([0, 0, 0, 0, 0, 1]);
        interface.bring_up();

        self.interfaces.lock().insert(0, interface);
        crate::println!("[network] Loopback interface initialized");
    }

    /// 获取服务ID
    pub fn get_service_id(&self) -> ServiceId {
        self.service_id
    }
}

/// 网络服务管理器
pub struct NetworkManager {
    /// 网络服务实例
    service: Arc<NetworkService>,
    /// 是否已初始化
    initialized: bool,
}

impl NetworkManager {
    /// 创建新的网络管理器
    pub fn new() -> Result<Self, &'static str> {
        let service = Arc::new(NetworkService::new()?);

        Ok(Self {
            service,
            initialized: false,
        })
    }

    /// 初始化网络服务
    pub fn initialize(&mut self) -> Result<(), &'static str> {
        if self.initialized {
            return Ok(());
        }

        // 注册到服务注册表
        let registry = get_service_registry()
            .ok_or("Service registry not initialized")?;
        let service_info = ServiceInfo::new(
            self.service.get_service_id(),
            "NetworkService".to_string(),
            "Network management and TCP/IP protocol stack service".to_string(),
            ServiceCategory::Network,
            InterfaceVersion::new(1, 0, 0),
            0, // owner_id - kernel owned
        );

        registry.register_service(service_info).map_err(|_| "Failed to register service")?;

        self.initialized = true;
        crate::println!("[network] Network service initialized");
        Ok(())
    }

    /// 获取网络服务引用
    pub fn get_service(&self) -> Arc<NetworkService> {
        self.service.clone()
    }
}

// 全局网络管理器实例
static mut NETWORK_MANAGER: Option<NetworkManager> = None;
static NETWORK_MANAGER_INIT: core::sync::atomic::AtomicBool = core::sync::atomic::AtomicBool::new(false);

/// 初始化网络服务
pub fn init() -> Result<(), &'static str> {
    if NETWORK_MANAGER_INIT.load(core::sync::atomic::Ordering::Relaxed) {
        return Ok(());
    }

    unsafe {
        let mut manager = NetworkManager::new()?;
        manager.initialize()?;
        NETWORK_MANAGER = Some(manager);
    }

    NETWORK_MANAGER_INIT.store(true, core::sync::atomic::Ordering::Relaxed);
    Ok(())
}

/// 兼容性接口 - 保持与现有代码的兼容性
/// Open a network socket
pub fn net_socket(domain: u32, socket_type: u32, protocol: u32) -> Option<usize> {
    // TODO: Implement socket creation
    None
}

/// Bind a socket to an address
pub fn net_bind(socket: usize, addr: *const u8, addr_len: usize) -> bool {
    // TODO: Implement socket bind
    false
}

/// Listen for incoming connections
pub fn net_listen(socket: usize, backlog: usize) -> bool {
    // TODO: Implement socket listen
    false
}

/// Accept incoming connection
pub fn net_accept(socket: usize, addr: *mut u8, addr_len: *mut usize) -> Option<usize> {
    // TODO: Implement socket accept
    None
}

/// Connect to a remote address
pub fn net_connect(socket: usize, addr: *const u8, addr_len: usize) -> bool {
    // TODO: Implement socket connect
    false
}

/// Send data over socket
pub fn net_send(socket: usize, buf: *const u8, len: usize, flags: u32) -> Option<usize> {
    // TODO: Implement socket send
    None
}

/// Receive data from socket
pub fn net_recv(socket: usize, buf: *mut u8, len: usize, flags: u32) -> Option<usize> {
    // TODO: Implement socket recv
    None
}

/// Close a socket
pub fn net_close(socket: usize) -> bool {
    // TODO: Implement socket close
    false
}
