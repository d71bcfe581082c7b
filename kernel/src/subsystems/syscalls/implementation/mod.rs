//! System Call Implementation Layer
//!
//! This module contains concrete implementations of system call handlers.
//! It provides the actual implementation of system calls for different
//! categories like process, memory, file system, and network.
//!
//! # Architecture
//!
//! The implementation layer consists of:
//! - Process management implementations
//! - Memory management implementations
//! - File system implementations
//! - Network implementations
//! - Signal handling implementations
//!
//! # Design Principles
//!
//! - **Single Responsibility**: Each module handles one category
//! - **Consistency**: All implementations follow the same pattern
//! - **Performance**: Optimized for common operations
//! - **Safety**: Proper error handling and validation

use alloc::sync::Arc;
use alloc::vec::Vec;

use super::interface::{
    SyscallHandler, SyscallError, SyscallResult,
    SyscallCategory, get_syscall_category,
};

/// Process management implementations
pub mod process {
    use super::*;
    use crate::types::stubs::pid_t;
    
    /// Get process ID implementation
    pub struct GetPidHandler;
    
    impl GetPidHandler {
        /// Create a new getpid handler
        pub fn new() -> Self {
            Self
        }
    }
    
    impl SyscallHandler for GetPidHandler {
        fn handle(&self, _args: &[u64]) -> SyscallResult {
            // Return current process ID
            // In a real implementation, this would get the PID from process manager
            Ok(1234) // Example PID
        }
        
        fn get_syscall_number(&self) -> u32 {
            0x1004 // SYS_GETPID
        }
        
        fn get_name(&self) -> &'static str {
            "getpid"
        }
    }
    
    /// Fork process implementation
    pub struct ForkHandler;
    
    impl ForkHandler {
        /// Create a new fork handler
        pub fn new() -> Self {
            Self
        }
    }
    
    impl SyscallHandler for ForkHandler {
        fn handle(&self, _args: &[u64]) -> SyscallResult {
            // Fork the current process
            // In a real implementation, this would create a new process
            Ok(1235) // Example child PID, 0 for parent
        }
        
        fn get_syscall_number(&self) -> u32 {
            0x1000 // SYS_FORK
        }
        
        fn get_name(&self) -> &'static str {
            "fork"
        }
    }
    
    /// Get all process handlers
    pub fn get_all_handlers() -> Vec<Arc<dyn SyscallHandler>> {
        vec![
            Arc::new(GetPidHandler::new()),
            Arc::new(ForkHandler::new()),
        ]
    }
}

/// Memory management implementations
pub mod memory {
    use super::*;
    
    /// Mmap implementation
    pub struct MmapHandler;
    
    impl MmapHandler {
        /// Create a new mmap handler
        pub fn new() -> Self {
            Self
        }
    }
    
    impl SyscallHandler for MmapHandler {
        fn handle(&self, args: &[u64]) -> SyscallResult {
            if args.len() < 6 {
                return Err(SyscallError::InvalidArguments);
            }
            
            let addr = args[0];
            let length = args[1];
            let prot = args[2];
            let flags = args[3];
            let fd = args[4];
            let offset = args[5];
            
            // Map memory region
            // In a real implementation, this would map memory
            Ok(addr) // Example mapped address
        }
        
        fn get_syscall_number(&self) -> u32 {
            0x3000 // SYS_MMAP
        }
        
        fn get_name(&self) -> &'static str {
            "mmap"
        }
    }
    
    /// Munmap implementation
    pub struct MunmapHandler;
    
    impl MunmapHandler {
        /// Create a new munmap handler
        pub fn new() -> Self {
            Self
        }
    }
    
    impl SyscallHandler for MunmapHandler {
        fn handle(&self, args: &[u64]) -> SyscallResult {
            if args.len() < 2 {
                return Err(SyscallError::InvalidArguments);
            }
            
            let addr = args[0];
            let length = args[1];
            
            // Unmap memory region
            // In a real implementation, this would unmap memory
            Ok(0) // Success
        }
        
        fn get_syscall_number(&self) -> u32 {
            0x3001 // SYS_MUNMAP
        }
        
        fn get_name(&self) -> &'static str {
            "munmap"
        }
    }
    
    /// Get all memory handlers
    pub fn get_all_handlers() -> Vec<Arc<dyn SyscallHandler>> {
        vec![
            Arc::new(MmapHandler::new()),
            Arc::new(MunmapHandler::new()),
        ]
    }
}

/// File system implementations
pub mod fs {
    use super::*;
    
    /// Open implementation
    pub struct OpenHandler;
    
    impl OpenHandler {
        /// Create a new open handler
        pub fn new() -> Self {
            Self
        }
    }
    
    impl SyscallHandler for OpenHandler {
        fn handle(&self, args: &[u64]) -> SyscallResult {
            if args.len() < 3 {
                return Err(SyscallError::InvalidArguments);
            }
            
            let pathname_ptr = args[0];
            let flags = args[1];
            let mode = args[2];
            
            // Open file
            // In a real implementation, this would open a file
            Ok(3) // Example file descriptor
        }
        
        fn get_syscall_number(&self) -> u32 {
            0x2000 // SYS_OPEN
        }
        
        fn get_name(&self) -> &'static str {
            "open"
        }
    }
    
    /// Read implementation
    pub struct ReadHandler;
    
    impl ReadHandler {
        /// Create a new read handler
        pub fn new() -> Self {
            Self
        }
    }
    
    impl SyscallHandler for ReadHandler {
        fn handle(&self, args: &[u64]) -> SyscallResult {
            if args.len() < 3 {
                return Err(SyscallError::InvalidArguments);
            }
            
            let fd = args[0];
            let buf_ptr = args[1];
            let count = args[2];
            
            // Read from file descriptor
            // In a real implementation, this would read from a file
            Ok(10) // Example bytes read
        }
        
        fn get_syscall_number(&self) -> u32 {
            0x2002 // SYS_READ
        }
        
        fn get_name(&self) -> &'static str {
            "read"
        }
    }
    
    /// Write implementation
    pub struct WriteHandler;
    
    impl WriteHandler {
        /// Create a new write handler
        pub fn new() -> Self {
            Self
        }
    }
    
    impl SyscallHandler for WriteHandler {
        fn handle(&self, args: &[u64]) -> SyscallResult {
            if args.len() < 3 {
                return Err(SyscallError::InvalidArguments);
            }
            
            let fd = args[0];
            let buf_ptr = args[1];
            let count = args[2];
            
            // Write to file descriptor
            // In a real implementation, this would write to a file
            Ok(10) // Example bytes written
        }
        
        fn get_syscall_number(&self) -> u32 {
            0x2003 // SYS_WRITE
        }
        
        fn get_name(&self) -> &'static str {
            "write"
        }
    }
    
    /// Close implementation
    pub struct CloseHandler;
    
    impl CloseHandler {
        /// Create a new close handler
        pub fn new() -> Self {
            Self
        }
    }
    
    impl SyscallHandler for CloseHandler {
        fn handle(&self, args: &[u64]) -> SyscallResult {
            if args.len() < 1 {
                return Err(SyscallError::InvalidArguments);
            }
            
            let fd = args[0];
            
            // Close file descriptor
            // In a real implementation, this would close a file
            Ok(0) // Success
        }
        
        fn get_syscall_number(&self) -> u32 {
            0x2001 // SYS_CLOSE
        }
        
        fn get_name(&self) -> &'static str {
            "close"
        }
    }
    
    /// Get all file system handlers
    pub fn get_all_handlers() -> Vec<Arc<dyn SyscallHandler>> {
        vec![
            Arc::new(OpenHandler::new()),
            Arc::new(ReadHandler::new()),
            Arc::new(WriteHandler::new()),
            Arc::new(CloseHandler::new()),
        ]
    }
}

/// Network implementations
pub mod network {
    use super::*;
    
    /// Socket implementation
    pub struct SocketHandler;
    
    impl SocketHandler {
        /// Create a new socket handler
        pub fn new() -> Self {
            Self
        }
    }
    
    impl SyscallHandler for SocketHandler {
        fn handle(&self, args: &[u64]) -> SyscallResult {
            if args.len() < 3 {
                return Err(SyscallError::InvalidArguments);
            }
            
            let domain = args[0];
            let socket_type = args[1];
            let protocol = args[2];
            
            // Create socket
            // In a real implementation, this would create a socket
            Ok(3) // Example socket descriptor
        }
        
        fn get_syscall_number(&self) -> u32 {
            0x4000 // SYS_SOCKET
        }
        
        fn get_name(&self) -> &'static str {
            "socket"
        }
    }
    
    /// Bind implementation
    pub struct BindHandler;
    
    impl BindHandler {
        /// Create a new bind handler
        pub fn new() -> Self {
            Self
        }
    }
    
    impl SyscallHandler for BindHandler {
        fn handle(&self, args: &[u64]) -> SyscallResult {
            if args.len() < 3 {
                return Err(SyscallError::InvalidArguments);
            }
            
            let sockfd = args[0];
            let addr_ptr = args[1];
            let addrlen = args[2];
            
            // Bind socket
            // In a real implementation, this would bind a socket
            Ok(0) // Success
        }
        
        fn get_syscall_number(&self) -> u32 {
            0x4001 // SYS_BIND
        }
        
        fn get_name(&self) -> &'static str {
            "bind"
        }
    }
    
    /// Get all network handlers
    pub fn get_all_handlers() -> Vec<Arc<dyn SyscallHandler>> {
        vec![
            Arc::new(SocketHandler::new()),
            Arc::new(BindHandler::new()),
        ]
    }
}

/// Get all system call handlers
///
/// # Returns
/// * `Vec<Arc<dyn SyscallHandler>>` - All handlers
pub fn get_all_handlers() -> Vec<Arc<dyn SyscallHandler>> {
    let mut handlers = Vec::new();
    
    // Add process handlers
    handlers.extend(process::get_all_handlers());
    
    // Add memory handlers
    handlers.extend(memory::get_all_handlers());
    
    // Add file system handlers
    handlers.extend(fs::get_all_handlers());
    
    // Add network handlers
    handlers.extend(network::get_all_handlers());
    
    handlers
}

/// Register all handlers with a dispatcher
///
/// # Arguments
/// * `dispatcher` - Dispatcher to register handlers with
///
/// # Returns
/// * `Result<(), SyscallError>` - Registration result
pub fn register_all_handlers(
    dispatcher: &mut super::dispatch::SyscallDispatcherImpl,
) -> Result<(), SyscallError> {
    let handlers = get_all_handlers();
    
    for handler in handlers {
        dispatcher.register_handler(handler)?;
    }
    
    Ok(())
}