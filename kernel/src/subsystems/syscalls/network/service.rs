//! Network System Call Service Implementation
//!
//! This module provides the network service that manages all network-related
//! system calls through the new modular service architecture.

use nos_nos_error_handling::unified::KernelError;
use super::socket;
use super::interface;
use super::options;
use crate::syscalls::services::{BaseService, ServiceStatus, SyscallService};
use alloc::boxed::Box;
use alloc::string::{String, ToString};
use alloc::vec::Vec;

/// Network system call service
///
/// Implements SyscallService trait to provide network operations handling
/// in the new modular service architecture.
#[derive(Debug)]
pub struct NetworkService {
    /// Service name
    name: String,
    /// Service version
    version: String,
    /// Service description
    description: String,
    /// Current service status
    status: ServiceStatus,
    /// Supported syscall numbers
    supported_syscalls: Vec<u32>,
    /// Network statistics
    stats: NetworkStats,
}

impl NetworkService {
    /// Create a new network service instance
    pub fn new() -> Self {
        Self {
            name: String::from("network"),
            version: String::from("1.0.0"),
            description: String::from("Network syscall service for managing socket operations"),
            status: ServiceStatus::Uninitialized,
            supported_syscalls: socket::get_supported_syscalls(),
            stats: NetworkStats::default(),
        }
    }

    /// Get network statistics
    pub fn get_stats(&self) -> &NetworkStats {
        &self.stats
    }

    /// Update statistics for an operation
    fn update_stats(&mut self, operation: NetworkOperation) {
        match operation {
            NetworkOperation::Socket => {
                self.stats.socket_calls += 1;
            }
            NetworkOperation::Bind => {
                self.stats.bind_calls += 1;
            }
            NetworkOperation::Listen => {
                self.stats.listen_calls += 1;
            }
            NetworkOperation::Accept => {
                self.stats.accept_calls += 1;
            }
            NetworkOperation::Connect => {
                self.stats.connect_calls += 1;
            }
            NetworkOperation::Send => {
                self.stats.send_calls += 1;
            }
            NetworkOperation::Recv => {
                self.stats.recv_calls += 1;
            }
            NetworkOperation::SendTo => {
                self.stats.sendto_calls += 1;
            }
            NetworkOperation::RecvFrom => {
                self.stats.recvfrom_calls += 1;
            }
            NetworkOperation::Shutdown => {
                self.stats.shutdown_calls += 1;
            }
            NetworkOperation::GetSockName => {
                self.stats.getsockname_calls += 1;
            }
            NetworkOperation::GetPeerName => {
                self.stats.getpeername_calls += 1;
            }
            NetworkOperation::SetSockOpt => {
                self.stats.setsockopt_calls += 1;
            }
            NetworkOperation::GetSockOpt => {
                self.stats.getsockopt_calls += 1;
            }
            _ => self.stats.other_calls += 1,
        }
        self.stats.total_calls += 1;
    }

    /// Reset network statistics
    pub fn reset_stats(&mut self) {
        self.stats = NetworkStats::default();
    }

    /// Allocate a new socket
    pub fn allocate_socket(&mut self, domain: u32, socket_type: u32, protocol: u32) -> Result<i32, KernelError> {
        crate::log_debug!("Allocating socket: domain={}, type={}, protocol={}", domain, socket_type, protocol);
        
        // Update statistics
        self.update_stats(NetworkOperation::Socket);
        
        // TODO: Implement actual socket allocation
        Ok(3) // Temporary socket fd
    }

    /// Bind a socket to an address
    pub fn bind_socket(&mut self, sockfd: i32, addr: &[u8]) -> Result<(), KernelError> {
        crate::log_debug!("Binding socket {} to address", sockfd);
        
        // Update statistics
        self.update_stats(NetworkOperation::Bind);
        
        // TODO: Implement actual socket binding
        Ok(())
    }

    /// Connect a socket to a remote address
    pub fn connect_socket(&mut self, sockfd: i32, addr: &[u8]) -> Result<(), KernelError> {
        crate::log_debug!("Connecting socket {} to remote address", sockfd);
        
        // Update statistics
        self.update_stats(NetworkOperation::Connect);
        
        // TODO: Implement actual socket connection
        Ok(())
    }

    /// Listen for connections on a socket
    pub fn listen_socket(&mut self, sockfd: i32, backlog: i32) -> Result<(), KernelError> {
        crate::log_debug!("Listening on socket {} with backlog {}", sockfd, backlog);
        
        // Update statistics
        self.update_stats(NetworkOperation::Listen);
        
        // TODO: Implement actual socket listening
        Ok(())
    }

    /// Accept a connection on a socket
    pub fn accept_socket(&mut self, sockfd: i32) -> Result<i32, KernelError> {
        crate::log_debug!("Accepting connection on socket {}", sockfd);
        
        // Update statistics
        self.update_stats(NetworkOperation::Accept);
        
        // TODO: Implement actual socket accept
        Ok(4) // Temporary new socket fd
    }

    /// Send data on a socket
    pub fn send_data(&mut self, sockfd: i32, buf: &[u8]) -> Result<usize, KernelError> {
        crate::log_debug!("Sending {} bytes on socket {}", buf.len(), sockfd);
        
        // Update statistics
        self.update_stats(NetworkOperation::Send);
        
        // TODO: Implement actual data sending
        Ok(buf.len()) // Temporary return
    }

    /// Receive data from a socket
    pub fn recv_data(&mut self, sockfd: i32, buf: &mut [u8]) -> Result<usize, KernelError> {
        crate::log_debug!("Receiving data on socket {} into buffer of size {}", sockfd, buf.len());
        
        // Update statistics
        self.update_stats(NetworkOperation::Recv);
        
        // TODO: Implement actual data receiving
        Ok(0) // Temporary return
    }
}

impl Default for NetworkService {
    fn default() -> Self {
        Self::new()
    }
}

impl BaseService for NetworkService {
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
        
        // TODO: Initialize network stack
        
        self.status = ServiceStatus::Initialized;
        crate::log_info!("NetworkService initialized successfully");
        Ok(())
    }

    fn start(&mut self) -> Result<(), KernelError> {
        crate::log_info!("Starting NetworkService");
        self.status = ServiceStatus::Starting;
        
        // TODO: Start network interfaces
        
        self.status = ServiceStatus::Running;
        crate::log_info!("NetworkService started successfully");
        Ok(())
    }

    fn stop(&mut self) -> Result<(), KernelError> {
        crate::log_info!("Stopping NetworkService");
        self.status = ServiceStatus::Stopping;
        
        // TODO: Stop network interfaces
        
        self.status = ServiceStatus::Stopped;
        crate::log_info!("NetworkService stopped successfully");
        Ok(())
    }

    fn destroy(&mut self) -> Result<(), KernelError> {
        crate::log_info!("Destroying NetworkService");
        
        // Perform final cleanup
        self.reset_stats();
        
        self.status = ServiceStatus::Uninitialized;
        crate::log_info!("NetworkService destroyed successfully");
        Ok(())
    }

    fn status(&self) -> ServiceStatus {
        self.status
    }

    fn dependencies(&self) -> Vec<&str> {
        vec!["process", "memory"]
    }

    fn as_any_mut(&mut self) -> &mut dyn core::any::Any {
        self
    }
}

impl SyscallService for NetworkService {
    fn supported_syscalls(&self) -> Vec<u32> {
        self.supported_syscalls.clone()
    }

    fn handle_syscall(&mut self, syscall_number: u32, args: &[u64]) -> Result<u64, KernelError> {
        crate::log_debug!("Handling network syscall: {} with {} args", syscall_number, args.len());
        
        // Update statistics
        let operation = match syscall_number {
            0x8000 => NetworkOperation::Socket,
            0x8001 => NetworkOperation::Bind,
            0x8002 => NetworkOperation::Listen,
            0x8003 => NetworkOperation::Accept,
            0x8004 => NetworkOperation::Connect,
            0x8005 => NetworkOperation::Send,
            0x8006 => NetworkOperation::Recv,
            0x8007 => NetworkOperation::SendTo,
            0x8008 => NetworkOperation::RecvFrom,
            0x8009 => NetworkOperation::Shutdown,
            0x800A => NetworkOperation::GetSockName,
            0x800B => NetworkOperation::GetPeerName,
            0x800C => NetworkOperation::SetSockOpt,
            0x800D => NetworkOperation::GetSockOpt,
            _ => NetworkOperation::Other,
        };
        self.update_stats(operation);
        
        // Dispatch to appropriate handler
        match syscall_number {
            0x8000 => { // socket
                let domain = args.get(0).copied().unwrap_or(0) as u32;
                let socket_type = args.get(1).copied().unwrap_or(0) as u32;
                let protocol = args.get(2).copied().unwrap_or(0) as u32;
                let fd = self.allocate_socket(domain, socket_type, protocol)?;
                Ok(fd as u64)
            }
            0x8001 => { // bind
                let sockfd = args.get(0).copied().unwrap_or(0) as i32;
                let addr_ptr = args.get(1).copied().unwrap_or(0) as *const u8;
                let addr_len = args.get(2).copied().unwrap_or(0) as usize;
                
                // TODO: Safely read address from user space
                let addr = unsafe { core::slice::from_raw_parts(addr_ptr, addr_len) };
                self.bind_socket(sockfd, addr)?;
                Ok(0)
            }
            0x8004 => { // connect
                let sockfd = args.get(0).copied().unwrap_or(0) as i32;
                let addr_ptr = args.get(1).copied().unwrap_or(0) as *const u8;
                let addr_len = args.get(2).copied().unwrap_or(0) as usize;
                
                // TODO: Safely read address from user space
                let addr = unsafe { core::slice::from_raw_parts(addr_ptr, addr_len) };
                self.connect_socket(sockfd, addr)?;
                Ok(0)
            }
            0x8002 => { // listen
                let sockfd = args.get(0).copied().unwrap_or(0) as i32;
                let backlog = args.get(1).copied().unwrap_or(0) as i32;
                self.listen_socket(sockfd, backlog)?;
                Ok(0)
            }
            0x8003 => { // accept
                let sockfd = args.get(0).copied().unwrap_or(0) as i32;
                let new_fd = self.accept_socket(sockfd)?;
                Ok(new_fd as u64)
            }
            0x8005 => { // send
                let sockfd = args.get(0).copied().unwrap_or(0) as i32;
                let buf_ptr = args.get(1).copied().unwrap_or(0) as *const u8;
                let len = args.get(2).copied().unwrap_or(0) as usize;
                
                // TODO: Safely read data from user space
                let buf = unsafe { core::slice::from_raw_parts(buf_ptr, len) };
                let sent = self.send_data(sockfd, buf)?;
                Ok(sent as u64)
            }
            0x8006 => { // recv
                let sockfd = args.get(0).copied().unwrap_or(0) as i32;
                let buf_ptr = args.get(1).copied().unwrap_or(0) as *mut u8;
                let len = args.get(2).copied().unwrap_or(0) as usize;
                
                // TODO: Safely write data to user space
                let buf = unsafe { core::slice::from_raw_parts_mut(buf_ptr, len) };
                let received = self.recv_data(sockfd, buf)?;
                Ok(received as u64)
            }
            _ => {
                crate::log_warn!("Unsupported network syscall: {}", syscall_number);
                Err(KernelError::Syscall(crate::syscalls::types::SyscallError::ENOSYS))
            }
        }
    }

    fn priority(&self) -> u32 {
        30 // Network operations are moderately critical
    }
}

/// Network operation types for statistics
#[derive(Debug, Clone, Copy)]
pub enum NetworkOperation {
    Socket,
    Bind,
    Listen,
    Accept,
    Connect,
    Send,
    Recv,
    SendTo,
    RecvFrom,
    Shutdown,
    GetSockName,
    GetPeerName,
    SetSockOpt,
    GetSockOpt,
    Other,
}

/// Network operation counters for statistics
#[derive(Debug, Clone, Default)]
pub struct NetworkStats {
    /// Total number of network syscalls handled
    pub total_calls: u64,
    /// Number of socket calls
    pub socket_calls: u64,
    /// Number of bind calls
    pub bind_calls: u64,
    /// Number of listen calls
    pub listen_calls: u64,
    /// Number of accept calls
    pub accept_calls: u64,
    /// Number of connect calls
    pub connect_calls: u64,
    /// Number of send calls
    pub send_calls: u64,
    /// Number of recv calls
    pub recv_calls: u64,
    /// Number of sendto calls
    pub sendto_calls: u64,
    /// Number of recvfrom calls
    pub recvfrom_calls: u64,
    /// Number of shutdown calls
    pub shutdown_calls: u64,
    /// Number of getsockname calls
    pub getsockname_calls: u64,
    /// Number of getpeername calls
    pub getpeername_calls: u64,
    /// Number of setsockopt calls
    pub setsockopt_calls: u64,
    /// Number of getsockopt calls
    pub getsockopt_calls: u64,
    /// Number of other calls
    pub other_calls: u64,
}

/// Network service factory
///
/// Factory for creating network service instances
pub struct NetworkServiceFactory;

impl NetworkServiceFactory {
    /// Create a new network service instance
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
        assert!(!service.supported_syscalls().is_empty());
    }

    #[test]
    fn test_network_service_lifecycle() {
        let mut service = NetworkService::new();

        // Test initialization
        assert!(service.initialize().is_ok());
        assert_eq!(service.status(), ServiceStatus::Initialized);

        // Test startup
        assert!(service.start().is_ok());
        assert_eq!(service.status(), ServiceStatus::Running);

        // Test shutdown
        assert!(service.stop().is_ok());
        assert_eq!(service.status(), ServiceStatus::Stopped);
    }

    #[test]
    fn test_socket_operations() {
        let mut service = NetworkService::new();
        
        // Test socket allocation
        let fd = service.allocate_socket(2, 1, 0).unwrap();
        assert!(fd > 0);
        
        // Test socket binding
        let addr = [127, 0, 0, 1, 0x35, 0x00]; // 127.0.0.1:53
        assert!(service.bind_socket(fd, &addr).is_ok());
        
        // Test socket listening
        assert!(service.listen_socket(fd, 10).is_ok());
        
        // Test data sending
        let data = b"Hello, world!";
        let sent = service.send_data(fd, data).unwrap();
        assert_eq!(sent, data.len());
        
        // Test data receiving
        let mut buf = [0u8; 64];
        let received = service.recv_data(fd, &mut buf).unwrap();
        assert_eq!(received, 0); // Temporary return
    }
}