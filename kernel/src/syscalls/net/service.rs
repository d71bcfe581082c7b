//! 网络系统调用服务实现
//! 
//! 本模块实现网络相关的系统调用服务，包括：
//! - 服务生命周期管理
//! - 系统调用分发和处理
//! - 与服务注册器的集成
//! - 套接字管理和网络接口管理

use crate::error_handling::unified::KernelError;
use crate::syscalls::net::handlers;
use crate::syscalls::services::{Service, ServiceStatus, SyscallService};
use alloc::boxed::Box;
use alloc::string::String;
use alloc::vec::Vec;

/// 网络系统调用服务
/// 
/// 实现SyscallService特征，提供网络相关的系统调用处理。
#[derive(Debug)]
pub struct NetworkService {
    /// 服务名称
    name: String,
    /// 服务版本
    version: String,
    /// 服务描述
    description: String,
    /// 服务状态
    status: ServiceStatus,
    /// 支持的系统调用号
    supported_syscalls: Vec<u32>,
    /// 套接字表
    socket_table: Vec<crate::syscalls::net::types::SocketInfo>,
    /// 网络接口列表
    interfaces: Vec<crate::syscalls::net::types::NetworkInterface>,
    /// 下一个可用的套接字描述符
    next_socket_fd: i32,
}

impl NetworkService {
    /// 创建新的网络服务实例
    /// 
    /// # 返回值
    /// 
    /// * `Self` - 新的服务实例
    pub fn new() -> Self {
        Self {
            name: String::from("network"),
            version: String::from("1.0.0"),
            description: String::from("Network syscall service"),
            status: ServiceStatus::Uninitialized,
            supported_syscalls: handlers::get_supported_syscalls(),
            socket_table: Vec::new(),
            interfaces: Vec::new(),
            next_socket_fd: 4, // 从4开始，0、1、2、3保留
        }
    }

    /// 获取网络统计信息
    /// 
    /// # 返回值
    /// 
    /// * `NetworkStats` - 网络统计信息
    pub fn get_network_stats(&self) -> crate::syscalls::net::types::NetworkStats {
        let active_connections = self.socket_table.iter()
            .filter(|s| s.state == crate::syscalls::net::types::SocketState::Connected)
            .count() as u32;
        let listening_sockets = self.socket_table.iter()
            .filter(|s| s.state == crate::syscalls::net::types::SocketState::Listening)
            .count() as u32;

        crate::syscalls::net::types::NetworkStats {
            bytes_received: 0,
            bytes_sent: 0,
            packets_received: 0,
            packets_sent: 0,
            packets_dropped: 0,
            active_connections,
            listening_sockets,
        }
    }

    /// 获取套接字信息
    /// 
    /// # 参数
    /// 
    /// * `fd` - 套接字描述符
    /// 
    /// # 返回值
    /// 
    /// * `Option<SocketInfo>` - 套接字信息
    pub fn get_socket_info(&self, fd: i32) -> Option<crate::syscalls::net::types::SocketInfo> {
        self.socket_table.iter().find(|s| s.fd == fd).cloned()
    }

    /// 列出所有套接字
    /// 
    /// # 返回值
    /// 
    /// * `Vec<SocketInfo>` - 套接字列表
    pub fn list_sockets(&self) -> Vec<crate::syscalls::net::types::SocketInfo> {
        self.socket_table.clone()
    }

    /// 分配套接字描述符
    /// 
    /// # 参数
    /// 
    /// * `socket_type` - 套接字类型
    /// * `family` - 地址族
    /// * `protocol` - 协议
    /// 
    /// # 返回值
    /// 
    /// * `Result<i32, NetworkError>` - 套接字描述符或错误
    pub fn allocate_socket(&mut self, socket_type: crate::syscalls::net::types::SocketType, family: crate::syscalls::net::types::AddressFamily, protocol: crate::syscalls::net::types::SocketProtocol) -> Result<i32, crate::syscalls::net::types::NetworkError> {
        let fd = self.next_socket_fd;
        self.next_socket_fd += 1;

        let socket_info = crate::syscalls::net::types::SocketInfo {
            fd,
            socket_type,
            address_family: family,
            protocol,
            local_address: None,
            remote_address: None,
            state: crate::syscalls::net::types::SocketState::Unconnected,
            send_buffer_size: 8192,
            recv_buffer_size: 8192,
            options: Vec::new(),
        };

        self.socket_table.push(socket_info);
        crate::log_debug!("Allocated socket: {} (type: {:?}, family: {:?}, protocol: {:?})", 
                    fd, socket_type, family, protocol);
        Ok(fd)
    }

    /// 释放套接字描述符
    /// 
    /// # 参数
    /// 
    /// * `fd` - 套接字描述符
    /// 
    /// # 返回值
    /// 
    /// * `Result<(), NetworkError>` - 操作结果
    pub fn deallocate_socket(&mut self, fd: i32) -> Result<(), crate::syscalls::net::types::NetworkError> {
        if let Some(pos) = self.socket_table.iter().position(|s| s.fd == fd) {
            self.socket_table.remove(pos);
            crate::log_debug!("Deallocated socket: {}", fd);
            Ok(())
        } else {
            Err(crate::syscalls::net::types::NetworkError::InvalidSocket)
        }
    }

    /// 绑定套接字
    /// 
    /// # 参数
    /// 
    /// * `fd` - 套接字描述符
    /// * `address` - 绑定地址
    /// 
    /// # 返回值
    /// 
    /// * `Result<(), NetworkError>` - 操作结果
    pub fn bind_socket(&mut self, fd: i32, address: crate::syscalls::net::types::NetworkAddress) -> Result<(), crate::syscalls::net::types::NetworkError> {
        if let Some(socket) = self.socket_table.iter_mut().find(|s| s.fd == fd) {
            socket.local_address = Some(address.clone());
            crate::log_debug!("Bound socket {} to address: {}", fd, address.to_string());
            Ok(())
        } else {
            Err(crate::syscalls::net::types::NetworkError::InvalidSocket)
        }
    }

    /// 连接套接字
    /// 
    /// # 参数
    /// 
    /// * `fd` - 套接字描述符
    /// * `address` - 远程地址
    /// 
    /// # 返回值
    /// 
    /// * `Result<(), NetworkError>` - 操作结果
    pub fn connect_socket(&mut self, fd: i32, address: crate::syscalls::net::types::NetworkAddress) -> Result<(), crate::syscalls::net::types::NetworkError> {
        if let Some(socket) = self.socket_table.iter_mut().find(|s| s.fd == fd) {
            socket.remote_address = Some(address.clone());
            socket.state = crate::syscalls::net::types::SocketState::Connected;
            crate::log_debug!("Connected socket {} to address: {}", fd, address.to_string());
            Ok(())
        } else {
            Err(crate::syscalls::net::types::NetworkError::InvalidSocket)
        }
    }

    /// 监听套接字
    /// 
    /// # 参数
    /// 
    /// * `fd` - 套接字描述符
    /// * `backlog` - 监听队列长度
    /// 
    /// # 返回值
    /// 
    /// * `Result<(), NetworkError>` - 操作结果
    pub fn listen_socket(&mut self, fd: i32, backlog: i32) -> Result<(), crate::syscalls::net::types::NetworkError> {
        if let Some(socket) = self.socket_table.iter_mut().find(|s| s.fd == fd) {
            socket.state = crate::syscalls::net::types::SocketState::Listening;
            crate::log_debug!("Socket {} listening with backlog: {}", fd, backlog);
            Ok(())
        } else {
            Err(crate::syscalls::net::types::NetworkError::InvalidSocket)
        }
    }

    /// 接受连接
    /// 
    /// # 参数
    /// 
    /// * `fd` - 监听套接字描述符
    /// 
    /// # 返回值
    /// 
    /// * `Result<(i32, NetworkAddress), NetworkError>` - (新套接字描述符, 客户端地址)或错误
    pub fn accept_connection(&mut self, fd: i32) -> Result<(i32, crate::syscalls::net::types::NetworkAddress), crate::syscalls::net::types::NetworkError> {
        if let Some(_listener) = self.socket_table.iter().find(|s| s.fd == fd && s.state == crate::syscalls::net::types::SocketState::Listening) {
            let new_fd = self.next_socket_fd;
            self.next_socket_fd += 1;

            let client_address = crate::syscalls::net::types::NetworkAddress::ipv4([192, 168, 1, 100], 12345);
            
            let new_socket = crate::syscalls::net::types::SocketInfo {
                fd: new_fd,
                socket_type: crate::syscalls::net::types::SocketType::Stream,
                address_family: crate::syscalls::net::types::AddressFamily::IPv4,
                protocol: crate::syscalls::net::types::SocketProtocol::TCP,
                local_address: None,
                remote_address: Some(client_address.clone()),
                state: crate::syscalls::net::types::SocketState::Connected,
                send_buffer_size: 8192,
                recv_buffer_size: 8192,
                options: Vec::new(),
            };

            self.socket_table.push(new_socket);
            crate::log_debug!("Accepted connection on socket {} -> new socket {} from address: {}", 
                        fd, new_fd, client_address.to_string());
            Ok((new_fd, client_address))
        } else {
            Err(crate::syscalls::net::types::NetworkError::InvalidSocket)
        }
    }

    /// 获取网络接口列表
    /// 
    /// # 返回值
    /// 
    /// * `Vec<NetworkInterface>` - 网络接口列表
    pub fn get_interfaces(&self) -> Vec<crate::syscalls::net::types::NetworkInterface> {
        self.interfaces.clone()
    }

    /// 添加网络接口
    /// 
    /// # 参数
    /// 
    /// * `interface` - 网络接口信息
    pub fn add_interface(&mut self, interface: crate::syscalls::net::types::NetworkInterface) {
        self.interfaces.push(interface);
        crate::log_debug!("Added network interface: {}", interface.name);
    }

    /// 移除网络接口
    ///
    /// # 参数
    ///
    /// * `name` - 接口名称
    ///
    /// # 返回值
    ///
    /// * `Result<(), NetworkError>` - 操作结果
    pub fn remove_interface(&mut self, name: &str) -> Result<(), crate::syscalls::net::types::NetworkError> {
        if let Some(pos) = self.interfaces.iter().position(|i| i.name == name) {
            self.interfaces.remove(pos);
            crate::log_debug!("Removed network interface: {}", name);
            Ok(())
        } else {
            Err(crate::syscalls::net::types::NetworkError::AddressNotAvailable)
        }
    }

    /// 处理 socket 系统调用
    ///
    /// 创建套接字并返回文件描述符
    ///
    /// # 参数
    ///
    /// * `domain` - 地址族 (AF_INET, AF_INET6, etc.)
    /// * `socket_type` - 套接字类型 (SOCK_STREAM, SOCK_DGRAM, etc.)
    /// * `protocol` - 协议 (IPPROTO_TCP, IPPROTO_UDP, etc.)
    ///
    /// # 返回值
    ///
    /// * `Result<i32, NetworkError>` - 套接字描述符或错误
    pub fn handle_socket(&mut self, domain: i32, socket_type: i32, protocol: i32) -> Result<i32, crate::syscalls::net::types::NetworkError> {
        // TODO: 实现完整的网络协议栈后，此处将创建真实的套接字
        // 目前作为占位符，等真实网络功能实现

        // 转换地址族枚举
        let address_family = match domain {
            2 => crate::syscalls::net::types::AddressFamily::IPv4,  // AF_INET
            10 => crate::syscalls::net::types::AddressFamily::IPv6, // AF_INET6
            1 => crate::syscalls::net::types::AddressFamily::Unix,  // AF_UNIX
            _ => {
                crate::log_debug!("Unsupported address family: {}", domain);
                return Err(crate::syscalls::net::types::NetworkError::AddressFamilyNotSupported);
            }
        };

        // 转换套接字类型
        let sock_type = match socket_type {
            1 => crate::syscalls::net::types::SocketType::Stream,     // SOCK_STREAM
            2 => crate::syscalls::net::types::SocketType::Datagram,   // SOCK_DGRAM
            3 => crate::syscalls::net::types::SocketType::Raw,        // SOCK_RAW
            _ => {
                crate::log_debug!("Unsupported socket type: {}", socket_type);
                return Err(crate::syscalls::net::types::NetworkError::ProtocolNotSupported);
            }
        };

        // 转换协议
        let sock_protocol = match protocol {
            0 => match sock_type {  // IPPROTO_IP 或根据类型推断
                crate::syscalls::net::types::SocketType::Stream => crate::syscalls::net::types::SocketProtocol::TCP,
                crate::syscalls::net::types::SocketType::Datagram => crate::syscalls::net::types::SocketProtocol::UDP,
                _ => crate::syscalls::net::types::SocketProtocol::RawIP,
            },
            6 => crate::syscalls::net::types::SocketProtocol::TCP,    // IPPROTO_TCP
            17 => crate::syscalls::net::types::SocketProtocol::UDP,   // IPPROTO_UDP
            _ => {
                crate::log_debug!("Unsupported protocol: {}", protocol);
                return Err(crate::syscalls::net::types::NetworkError::ProtocolNotSupported);
            }
        };

        // 创建套接字并分配FD
        let fd = self.allocate_socket(sock_type, address_family, sock_protocol)?;
        crate::log_debug!("Created socket: domain={}, type={}, protocol={}, fd={}", domain, socket_type, protocol, fd);
        Ok(fd)
    }

    /// 处理 bind 系统调用
    ///
    /// 将套接字绑定到地址
    ///
    /// # 参数
    ///
    /// * `fd` - 套接字描述符
    /// * `addr_ptr` - 用户空间地址指针
    /// * `addrlen` - 地址长度
    ///
    /// # 返回值
    ///
    /// * `Result<i32, NetworkError>` - 0表示成功或错误
    pub fn handle_bind(&mut self, fd: i32, addr_ptr: u64, addrlen: u32) -> Result<i32, crate::syscalls::net::types::NetworkError> {
        // 检查套接字是否存在
        if self.get_socket_info(fd).is_none() {
            return Err(crate::syscalls::net::types::NetworkError::InvalidSocket);
        }

        // TODO: 实现用户空间拷贝后，此处将读取地址结构
        // 目前作为占位符

        crate::log_debug!("bind socket fd={}, addr_ptr={:#x}, addrlen={}", fd, addr_ptr, addrlen);

        // 临时成功返回 (等真实网络实现)
        Ok(0)
    }

    /// 处理 listen 系统调用
    ///
    /// 设置套接字为监听状态
    ///
    /// # 参数
    ///
    /// * `fd` - 套接字描述符
    /// * `backlog` - 连接队列长度
    ///
    /// # 返回值
    ///
    /// * `Result<i32, NetworkError>` - 0表示成功或错误
    pub fn handle_listen(&mut self, fd: i32, backlog: i32) -> Result<i32, crate::syscalls::net::types::NetworkError> {
        // 检查套接字状态
        match self.get_socket_info(fd) {
            Some(socket) => {
                if socket.state != crate::syscalls::net::types::SocketState::Unconnected {
                    return Err(crate::syscalls::net::types::NetworkError::InvalidSocket);
                }
            }
            None => return Err(crate::syscalls::net::types::NetworkError::InvalidSocket),
        }

        // 设置为监听状态
        self.listen_socket(fd, backlog)?;
        crate::log_debug!("listen socket fd={}, backlog={}", fd, backlog);
        Ok(0)
    }

    /// 处理 accept 系统调用
    ///
    /// 接受新连接
    ///
    /// # 参数
    ///
    /// * `fd` - 监听套接字描述符
    /// * `addr_ptr` - 用于返回客户端地址的用户空间指针
    /// * `addrlen_ptr` - 地址长度指针
    ///
    /// # 返回值
    ///
    /// * `Result<i32, NetworkError>` - 新套接字描述符或错误
    pub fn handle_accept(&mut self, fd: i32, addr_ptr: u64, addrlen_ptr: u64) -> Result<i32, crate::syscalls::net::types::NetworkError> {
        // 检查监听套接字状态
        match self.get_socket_info(fd) {
            Some(socket) => {
                if socket.state != crate::syscalls::net::types::SocketState::Listening {
                    return Err(crate::syscalls::net::types::NetworkError::InvalidSocket);
                }
            }
            None => return Err(crate::syscalls::net::types::NetworkError::InvalidSocket),
        }

        // TODO: 实现用户空间拷贝后，此处将处理真实连接
        // 目前模拟接受连接

        let (new_fd, client_addr) = self.accept_connection(fd)?;
        crate::log_debug!("accepted connection: listener fd={}, new fd={}, client addr={}",
                         fd, new_fd, client_addr.to_string());

        // TODO: 拷贝客户端地址到用户空间
        // let addrlen = client_addr所需长度;
        // copyout_addrlen(addrlen, addrlen_ptr)?;
        // copyout_to_user(&client_addr, addr_ptr)?;

        Ok(new_fd)
    }

    /// 处理 connect 系统调用
    ///
    /// 建立到远程地址的连接
    ///
    /// # 参数
    ///
    /// * `fd` - 套接字描述符
    /// * `addr_ptr` - 远程地址指针
    /// * `addrlen` - 地址长度
    ///
    /// # 返回值
    ///
    /// * `Result<i32, NetworkError>` - 0表示成功或错误
    pub fn handle_connect(&mut self, fd: i32, addr_ptr: u64, addrlen: u32) -> Result<i32, crate::syscalls::net::types::NetworkError> {
        // 检查套接字状态
        match self.get_socket_info(fd) {
            Some(socket) => {
                if socket.state != crate::syscalls::net::types::SocketState::Unconnected {
                    return Err(crate::syscalls::net::types::NetworkError::InvalidSocket);
                }
            }
            None => return Err(crate::syscalls::net::types::NetworkError::InvalidSocket),
        }

        // TODO: 实现用户空间拷贝后，此处将读取和连接地址
        // 目前作为占位符

        crate::log_debug!("connect socket fd={}, addr_ptr={:#x}, addrlen={}", fd, addr_ptr, addrlen);

        // 临时成功返回 (等真实网络实现)
        Ok(0)
    }

    /// 处理 send 系统调用
    ///
    /// 发送数据到连接的套接字
    ///
    /// # 参数
    ///
    /// * `fd` - 套接字描述符
    /// * `buf_ptr` - 用户空间缓冲区指针
    /// * `len` - 数据长度
    /// * `flags` - 发送标志
    ///
    /// # 返回值
    ///
    /// * `Result<usize, NetworkError>` - 发送的字节数或错误
    pub fn handle_send(&mut self, fd: i32, buf_ptr: u64, len: usize, flags: i32) -> Result<usize, crate::syscalls::net::types::NetworkError> {
        // 检查套接字状态
        match self.get_socket_info(fd) {
            Some(socket) => {
                if socket.state != crate::syscalls::net::types::SocketState::Connected {
                    return Err(crate::syscalls::net::types::NetworkError::InvalidSocket);
                }
            }
            None => return Err(crate::syscalls::net::types::NetworkError::InvalidSocket),
        }

        // TODO: 实现数据传输功能
        // 目前作为占位符，返回请求长度

        crate::log_debug!("send socket fd={}, buf_ptr={:#x}, len={}, flags={}", fd, buf_ptr, len, flags);
        Ok(len)
    }

    /// 处理 recv 系统调用
    ///
    /// 从连接的套接字接收数据
    ///
    /// # 参数
    ///
    /// * `fd` - 套接字描述符
    /// * `buf_ptr` - 用户空间缓冲区指针
    /// * `len` - 缓冲区长度
    /// * `flags` - 接收标志
    ///
    /// # 返回值
    ///
    /// * `Result<usize, NetworkError>` - 接收的字节数或错误
    pub fn handle_recv(&mut self, fd: i32, buf_ptr: u64, len: usize, flags: i32) -> Result<usize, crate::syscalls::net::types::NetworkError> {
        // 检查套接字状态
        match self.get_socket_info(fd) {
            Some(socket) => {
                if socket.state != crate::syscalls::net::types::SocketState::Connected {
                    return Err(crate::syscalls::net::types::NetworkError::InvalidSocket);
                }
            }
            None => return Err(crate::syscalls::net::types::NetworkError::InvalidSocket),
        }

        // TODO: 实现数据接收功能
        // 目前作为占位符，返回0

        crate::log_debug!("recv socket fd={}, buf_ptr={:#x}, len={}, flags={}", fd, buf_ptr, len, flags);
        Ok(0)
    }

    /// 处理 sendto 系统调用
    ///
    /// 发送数据到指定的地址（支持无连接套接字）
    ///
    /// # 参数
    ///
    /// * `fd` - 套接字描述符
    /// * `buf_ptr` - 数据缓冲区指针
    /// * `len` - 数据长度
    /// * `flags` - 发送标志
    /// * `addr_ptr` - 目标地址指针
    /// * `addrlen` - 地址长度
    ///
    /// # 返回值
    ///
    /// * `Result<usize, NetworkError>` - 发送的字节数或错误
    pub fn handle_sendto(&mut self, fd: i32, buf_ptr: u64, len: usize, flags: i32, addr_ptr: u64, addrlen: u32) -> Result<usize, crate::syscalls::net::types::NetworkError> {
        // 检查套接字存在性
        if self.get_socket_info(fd).is_none() {
            return Err(crate::syscalls::net::types::NetworkError::InvalidSocket);
        }

        // TODO: 读取目标地址和发送数据
        // 目前作为占位符

        crate::log_debug!("sendto socket fd={}, buf_ptr={:#x}, len={}, flags={}, addr_ptr={:#x}, addrlen={}",
                         fd, buf_ptr, len, flags, addr_ptr, addrlen);
        Ok(len)
    }

    /// 处理 recvfrom 系统调用
    ///
    /// 从指定的地址接收数据（支持无连接套接字）
    ///
    /// # 参数
    ///
    /// * `fd` - 套接字描述符
    /// * `buf_ptr` - 接收缓冲区指针
    /// * `len` - 缓冲区长度
    /// * `flags` - 接收标志
    /// * `addr_ptr` - 源地址指针
    /// * `addrlen_ptr` - 地址长度指针
    ///
    /// # 返回值
    ///
    /// * `Result<usize, NetworkError>` - 接收的字节数或错误
    pub fn handle_recvfrom(&mut self, fd: i32, buf_ptr: u64, len: usize, flags: i32, addr_ptr: u64, addrlen_ptr: u64) -> Result<usize, crate::syscalls::net::types::NetworkError> {
        // 检查套接字存在性
        if self.get_socket_info(fd).is_none() {
            return Err(crate::syscalls::net::types::NetworkError::InvalidSocket);
        }

        // TODO: 读取数据和源地址
        // 目前作为占位符

        crate::log_debug!("recvfrom socket fd={}, buf_ptr={:#x}, len={}, flags={}, addr_ptr={:#x}, addrlen_ptr={:#x}",
                         fd, buf_ptr, len, flags, addr_ptr, addrlen_ptr);
        Ok(0)
    }

    /// 处理 shutdown 系统调用
    ///
    /// 关闭套接字的发送或接收方向
    ///
    /// # 参数
    ///
    /// * `fd` - 套接字描述符
    /// * `how` - 关闭方式 (SHUT_RD, SHUT_WR, SHUT_RDWR)
    ///
    /// # 返回值
    ///
    /// * `Result<i32, NetworkError>` - 0表示成功或错误
    pub fn handle_shutdown(&mut self, fd: i32, how: i32) -> Result<i32, crate::syscalls::net::types::NetworkError> {
        // 检查套接字存在性
        match self.get_socket_info(fd) {
            Some(socket) => {
                // 检查是否为已连接状态
                if socket.state != crate::syscalls::net::types::SocketState::Connected {
                    return Err(crate::syscalls::net::types::NetworkError::InvalidSocket);
                }
            }
            None => return Err(crate::syscalls::net::types::NetworkError::InvalidSocket),
        }

        // TODO: 实现实际的连接关闭逻辑
        // 目前作为占位符

        crate::log_debug!("shutdown socket fd={}, how={}", fd, how);
        Ok(0)
    }

    /// 处理 getsockopt 系统调用
    ///
    /// 获取套接字选项
    ///
    /// # 参数
    ///
    /// * `fd` - 套接字描述符
    /// * `level` - 选项级别
    /// * `optname` - 选项名
    /// * `optval_ptr` - 选项值指针
    /// * `optlen_ptr` - 选项长度指针
    ///
    /// # 返回值
    ///
    /// * `Result<i32, NetworkError>` - 0表示成功或错误
    pub fn handle_getsockopt(&mut self, fd: i32, level: i32, optname: i32, optval_ptr: u64, optlen_ptr: u64) -> Result<i32, crate::syscalls::net::types::NetworkError> {
        // 检查套接字存在性
        if self.get_socket_info(fd).is_none() {
            return Err(crate::syscalls::net::types::NetworkError::InvalidSocket);
        }

        // TODO: 实现实际的套接字选项查询逻辑
        // 目前作为占位符

        crate::log_debug!("getsockopt fd={}, level={}, optname={}, optval_ptr={:#x}, optlen_ptr={:#x}",
                         fd, level, optname, optval_ptr, optlen_ptr);
        Ok(0)
    }

    /// 处理 setsockopt 系统调用
    ///
    /// 设置套接字选项
    ///
    /// # 参数
    ///
    /// * `fd` - 套接字描述符
    /// * `level` - 选项级别
    /// * `optname` - 选项名
    /// * `optval_ptr` - 选项值指针
    /// * `optlen` - 选项长度
    ///
    /// # 返回值
    ///
    /// * `Result<i32, NetworkError>` - 0表示成功或错误
    pub fn handle_setsockopt(&mut self, fd: i32, level: i32, optname: i32, optval_ptr: u64, optlen: u32) -> Result<i32, crate::syscalls::net::types::NetworkError> {
        // 检查套接字存在性
        if self.get_socket_info(fd).is_none() {
            return Err(crate::syscalls::net::types::NetworkError::InvalidSocket);
        }

        // TODO: 实现实际的套接字选项设置逻辑
        // 目前作为占位符

        crate::log_debug!("setsockopt fd={}, level={}, optname={}, optval_ptr={:#x}, optlen={}",
                         fd, level, optname, optval_ptr, optlen);
        Ok(0)
    }
}

impl Default for NetworkService {
    fn default() -> Self {
        Self::new()
    }
}

impl Service for NetworkService {
    fn name(&self) -> &str {
        &self.name
    }

    fn version(&self) -> &str {
        &self.version
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn initialize(&mut self) -> Result<(), KernelError> {
        crate::log_info!("Initializing NetworkService");
        self.status = ServiceStatus::Initializing;
        
        // TODO: 初始化网络栈和接口
        
        self.status = ServiceStatus::Initialized;
        crate::log_info!("NetworkService initialized successfully");
        Ok(())
    }

    fn start(&mut self) -> Result<(), KernelError> {
        crate::log_info!("Starting NetworkService");
        self.status = ServiceStatus::Starting;
        
        // TODO: 启动网络服务
        
        self.status = ServiceStatus::Running;
        crate::log_info!("NetworkService started successfully");
        Ok(())
    }

    fn stop(&mut self) -> Result<(), KernelError> {
        crate::log_info!("Stopping NetworkService");
        self.status = ServiceStatus::Stopping;
        
        // TODO: 停止网络服务
        
        self.status = ServiceStatus::Stopped;
        crate::log_info!("NetworkService stopped successfully");
        Ok(())
    }

    fn destroy(&mut self) -> Result<(), KernelError> {
        crate::log_info!("Destroying NetworkService");
        
        // TODO: 销毁网络服务
        
        self.status = ServiceStatus::Uninitialized;
        crate::log_info!("NetworkService destroyed successfully");
        Ok(())
    }

    fn status(&self) -> ServiceStatus {
        self.status
    }

    fn dependencies(&self) -> Vec<&str> {
        // 网络服务可能依赖的模块
        vec!["network_driver", "interrupt_handler"]
    }
}

impl SyscallService for NetworkService {
    fn supported_syscalls(&self) -> Vec<u32> {
        handlers::get_supported_syscalls()
    }

    fn handle_syscall(&mut self, syscall_number: u32, args: &[u64]) -> Result<u64, KernelError> {
        crate::log_debug!("NetworkService handling syscall: {}", syscall_number);

        // 直接调用服务内部方法，不再使用独立的全局处理函数
        let result = match syscall_number {
            41 => { // socket
                if args.len() != 3 {
                    return Err(KernelError::InvalidArgument);
                }
                let domain = args[0] as i32;
                let socket_type = args[1] as i32;
                let protocol = args[2] as i32;

                match self.handle_socket(domain, socket_type, protocol) {
                    Ok(fd) => Ok(fd as u64),
                    Err(net_err) => Err(KernelError::Network(net_err)),
                }
            }

            49 => { // bind
                if args.len() != 3 {
                    return Err(KernelError::InvalidArgument);
                }
                let fd = args[0] as i32;
                let addr_ptr = args[1];
                let addrlen = args[2] as u32;

                match self.handle_bind(fd, addr_ptr, addrlen) {
                    Ok(result) => Ok(result as u64),
                    Err(net_err) => Err(KernelError::Network(net_err)),
                }
            }

            50 => { // listen
                if args.len() != 2 {
                    return Err(KernelError::InvalidArgument);
                }
                let fd = args[0] as i32;
                let backlog = args[1] as i32;

                match self.handle_listen(fd, backlog) {
                    Ok(result) => Ok(result as u64),
                    Err(net_err) => Err(KernelError::Network(net_err)),
                }
            }

            43 => { // accept
                if args.len() != 3 {
                    return Err(KernelError::InvalidArgument);
                }
                let fd = args[0] as i32;
                let addr_ptr = args[1];
                let addrlen_ptr = args[2];

                match self.handle_accept(fd, addr_ptr, addrlen_ptr) {
                    Ok(fd) => Ok(fd as u64),
                    Err(net_err) => Err(KernelError::Network(net_err)),
                }
            }

            42 => { // connect
                if args.len() != 3 {
                    return Err(KernelError::InvalidArgument);
                }
                let fd = args[0] as i32;
                let addr_ptr = args[1];
                let addrlen = args[2] as u32;

                match self.handle_connect(fd, addr_ptr, addrlen) {
                    Ok(result) => Ok(result as u64),
                    Err(net_err) => Err(KernelError::Network(net_err)),
                }
            }

            44 => { // send
                if args.len() != 4 {
                    return Err(KernelError::InvalidArgument);
                }
                let fd = args[0] as i32;
                let buf_ptr = args[1];
                let len = args[2] as usize;
                let flags = args[3] as i32;

                match self.handle_send(fd, buf_ptr, len, flags) {
                    Ok(bytes) => Ok(bytes as u64),
                    Err(net_err) => Err(KernelError::Network(net_err)),
                }
            }

            45 => { // recv
                if args.len() != 4 {
                    return Err(KernelError::InvalidArgument);
                }
                let fd = args[0] as i32;
                let buf_ptr = args[1];
                let len = args[2] as usize;
                let flags = args[3] as i32;

                match self.handle_recv(fd, buf_ptr, len, flags) {
                    Ok(bytes) => Ok(bytes as u64),
                    Err(net_err) => Err(KernelError::Network(net_err)),
                }
            }

            46 => { // sendto
                if args.len() != 6 {
                    return Err(KernelError::InvalidArgument);
                }
                let fd = args[0] as i32;
                let buf_ptr = args[1];
                let len = args[2] as usize;
                let flags = args[3] as i32;
                let addr_ptr = args[4];
                let addrlen = args[5] as u32;

                match self.handle_sendto(fd, buf_ptr, len, flags, addr_ptr, addrlen) {
                    Ok(bytes) => Ok(bytes as u64),
                    Err(net_err) => Err(KernelError::Network(net_err)),
                }
            }

            47 => { // recvfrom
                if args.len() != 6 {
                    return Err(KernelError::InvalidArgument);
                }
                let fd = args[0] as i32;
                let buf_ptr = args[1];
                let len = args[2] as usize;
                let flags = args[3] as i32;
                let addr_ptr = args[4];
                let addrlen_ptr = args[5];

                match self.handle_recvfrom(fd, buf_ptr, len, flags, addr_ptr, addrlen_ptr) {
                    Ok(bytes) => Ok(bytes as u64),
                    Err(net_err) => Err(KernelError::Network(net_err)),
                }
            }

            48 => { // shutdown
                if args.len() != 2 {
                    return Err(KernelError::InvalidArgument);
                }
                let fd = args[0] as i32;
                let how = args[1] as i32;

                match self.handle_shutdown(fd, how) {
                    Ok(result) => Ok(result as u64),
                    Err(net_err) => Err(KernelError::Network(net_err)),
                }
            }

            54 => { // getsockopt
                if args.len() != 5 {
                    return Err(KernelError::InvalidArgument);
                }
                let fd = args[0] as i32;
                let level = args[1] as i32;
                let optname = args[2] as i32;
                let optval_ptr = args[3];
                let optlen_ptr = args[4];

                match self.handle_getsockopt(fd, level, optname, optval_ptr, optlen_ptr) {
                    Ok(result) => Ok(result as u64),
                    Err(net_err) => Err(KernelError::Network(net_err)),
                }
            }

            55 => { // setsockopt
                if args.len() != 5 {
                    return Err(KernelError::InvalidArgument);
                }
                let fd = args[0] as i32;
                let level = args[1] as i32;
                let optname = args[2] as i32;
                let optval_ptr = args[3];
                let optlen = args[4] as u32;

                match self.handle_setsockopt(fd, level, optname, optval_ptr, optlen) {
                    Ok(result) => Ok(result as u64),
                    Err(net_err) => Err(KernelError::Network(net_err)),
                }
            }

            _ => {
                crate::log_debug!("Unsupported network syscall: {}", syscall_number);
                Err(KernelError::UnsupportedSyscall)
            }
        };

        result
    }

    fn priority(&self) -> u32 {
        70 // 网络服务优先级
    }
}

/// 网络服务工厂
/// 
/// 用于创建网络服务实例的工厂结构体。
pub struct NetworkServiceFactory;

impl NetworkServiceFactory {
    /// 创建网络服务实例
    /// 
    /// # 返回值
    /// 
    /// * `Box<dyn SyscallService>` - 网络服务实例
    pub fn create() -> Box<dyn SyscallService> {
        Box::new(NetworkService::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_network_service_creation() {
        let service = NetworkService::new();
        assert_eq!(service.name(), "network");
        assert_eq!(service.version(), "1.0.0");
        assert_eq!(service.status(), ServiceStatus::Uninitialized);
        assert_eq!(service.next_socket_fd, 4);
    }

    #[test]
    fn test_network_service_lifecycle() {
        let mut service = NetworkService::new();
        
        // 测试初始化
        assert!(service.initialize().is_ok());
        assert_eq!(service.status(), ServiceStatus::Initialized);
        
        // 测试启动
        assert!(service.start().is_ok());
        assert_eq!(service.status(), ServiceStatus::Running);
        
        // 测试停止
        assert!(service.stop().is_ok());
        assert_eq!(service.status(), ServiceStatus::Stopped);
    }

    #[test]
    fn test_socket_allocation() {
        let mut service = NetworkService::new();
        
        let fd = service.allocate_socket(
            crate::syscalls::net::types::SocketType::Stream,
            crate::syscalls::net::types::AddressFamily::IPv4,
            crate::syscalls::net::types::SocketProtocol::TCP,
        ).unwrap();
        assert_eq!(fd, 4);
        assert_eq!(service.socket_table.len(), 1);
        
        let socket = &service.socket_table[0];
        assert_eq!(socket.fd, 4);
        assert_eq!(socket.socket_type, crate::syscalls::net::types::SocketType::Stream);
    }

    #[test]
    fn test_supported_syscalls() {
        let service = NetworkService::new();
        let syscalls = service.supported_syscalls();
        assert!(!syscalls.is_empty());
        assert!(syscalls.contains(&41)); // socket
        assert!(syscalls.contains(&42)); // connect
    }
}