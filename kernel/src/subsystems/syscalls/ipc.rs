//! IPC System Call Module
//!
//! This module provides IPC-related system call services, including:
//! - Message queues
//! - Semaphores
//! - Shared memory
//! - Pipes
//!
//! The module adopts a layered architecture design, integrating with the system call dispatcher
//! through service interfaces.

use alloc::boxed::Box;
use alloc::string::{String, ToString};
use alloc::vec::Vec;
use alloc::collections::BTreeMap;
use crate::syscalls::services::SyscallService;
use crate::syscalls::common::SyscallError;
use crate::subsystems::ipc::mqueue;
use crate::subsystems::ipc::mqueue::{MqAttr, MqNotify, MqOpenFlags, MqNotifyType};
use crate::subsystems::time::{Timespec, get_current_time};
use core::ptr;
use core::slice;

/// IPC System Call Service
///
/// Provides IPC-related system call services.
pub struct IpcService {
    /// Message queue registry
    message_queues: alloc::collections::BTreeMap<u32, MessageQueue>,
    /// Semaphore registry
    semaphores: alloc::collections::BTreeMap<u32, Semaphore>,
    /// Shared memory registry
    shared_memory: alloc::collections::BTreeMap<u32, SharedMemory>,
    /// Next available ID for IPC resources
    next_id: u32,
}

/// Placeholder for other IPC resources
struct MessageQueue {
    // Placeholder implementation
}

/// Placeholder for semaphores
struct Semaphore {
    // Placeholder implementation
}

/// Placeholder for shared memory
struct SharedMemory {
    // Placeholder implementation
}

impl IpcService {
    /// Create a new IPC service instance
    pub fn new() -> Self {
        Self {
            message_queues: BTreeMap::new(),
            semaphores: BTreeMap::new(),
            shared_memory: BTreeMap::new(),
            next_id: 1,
        }
    }
    
    /// Open a message queue
    fn mq_open(&self, args: &[u64]) -> Result<u64, SyscallError> {
        if args.len() < 4 {
            return Err(SyscallError::InvalidArgument);
        }

        let name_ptr = args[0] as *const u8;
        let flags = args[1] as u32;
        let mode = args[2] as u32;
        let attr_ptr = args[3] as *const MqAttr;

        // Validate name pointer
        if name_ptr.is_null() {
            return Err(SyscallError::InvalidArgument);
        }

        // Read and validate name
        let name = match self.read_cstr(name_ptr) {
            Ok(name) => name,
            Err(_) => return Err(SyscallError::InvalidArgument),
        };

        // Validate name format (must start with '/')
        if !name.starts_with('/') {
            return Err(SyscallError::InvalidArgument);
        }

        // Read attributes if provided
        let attr = if !attr_ptr.is_null() {
            Some(unsafe { ptr::read(attr_ptr) })
        } else {
            None
        };

        // Convert flags
        let mq_flags = match MqOpenFlags::from_bits(flags) {
            Some(flags) => flags,
            None => return Err(SyscallError::InvalidArgument),
        };

        // Open message queue
        match mqueue::mq_open(&name, mq_flags, mode, attr.as_ref()) {
            Ok(mqd) => Ok(mqd as u64),
            Err(_) => Err(SyscallError::InvalidArgument),
        }
    }
    
    /// Close a message queue
    fn mq_close(&self, args: &[u64]) -> Result<u64, SyscallError> {
        if args.len() < 1 {
            return Err(SyscallError::InvalidArgument);
        }

        let mqd = args[0] as i32;

        match mqueue::mq_close(mqd) {
            Ok(()) => Ok(0),
            Err(_) => Err(SyscallError::InvalidArgument),
        }
    }
    
    /// Get message queue attributes
    fn mq_getattr(&self, args: &[u64]) -> Result<u64, SyscallError> {
        if args.len() < 2 {
            return Err(SyscallError::InvalidArgument);
        }

        let mqd = args[0] as i32;
        let attr_ptr = args[1] as *mut MqAttr;

        // Validate attributes pointer
        if attr_ptr.is_null() {
            return Err(SyscallError::InvalidArgument);
        }

        match mqueue::mq_getattr(mqd) {
            Ok(attr) => {
                unsafe { ptr::write(attr_ptr, attr); }
                Ok(0)
            },
            Err(_) => Err(SyscallError::InvalidArgument),
        }
    }
    
    /// Set message queue attributes
    fn mq_setattr(&self, args: &[u64]) -> Result<u64, SyscallError> {
        if args.len() < 3 {
            return Err(SyscallError::InvalidArgument);
        }

        let mqd = args[0] as i32;
        let new_attr_ptr = args[1] as *const MqAttr;
        let old_attr_ptr = args[2] as *mut MqAttr;

        // Validate new attributes pointer
        if new_attr_ptr.is_null() {
            return Err(SyscallError::InvalidArgument);
        }

        let new_attr = unsafe { ptr::read(new_attr_ptr) };

        match mqueue::mq_setattr(mqd, &new_attr) {
            Ok(old_attr) => {
                if !old_attr_ptr.is_null() {
                    unsafe { ptr::write(old_attr_ptr, old_attr); }
                }
                Ok(0)
            },
            Err(_) => Err(SyscallError::InvalidArgument),
        }
    }
    
    /// Send a message to a queue with timeout
    fn mq_timedsend(&self, args: &[u64]) -> Result<u64, SyscallError> {
        if args.len() < 5 {
            return Err(SyscallError::InvalidArgument);
        }

        let mqd = args[0] as i32;
        let msg_ptr = args[1] as *const u8;
        let msg_len = args[2] as usize;
        let msg_prio = args[3] as u32;
        let timeout_ptr = args[4] as *const Timespec;

        // Validate message pointer
        if msg_ptr.is_null() || msg_len == 0 {
            return Err(SyscallError::InvalidArgument);
        }

        // Read message
        let msg = unsafe { slice::from_raw_parts(msg_ptr, msg_len) }.to_vec();

        // Read timeout if provided
        let timeout = if !timeout_ptr.is_null() {
            Some(unsafe { ptr::read(timeout_ptr) })
        } else {
            None
        };

        match mqueue::mq_timedsend(mqd, &msg, msg_prio, timeout.as_ref()) {
            Ok(()) => Ok(0),
            Err(_) => Err(SyscallError::InvalidArgument),
        }
    }
    
    /// Receive a message from a queue with timeout
    fn mq_timedreceive(&self, args: &[u64]) -> Result<u64, SyscallError> {
        if args.len() < 5 {
            return Err(SyscallError::InvalidArgument);
        }

        let mqd = args[0] as i32;
        let msg_ptr = args[1] as *mut u8;
        let msg_len = args[2] as usize;
        let msg_prio_ptr = args[3] as *mut u32;
        let timeout_ptr = args[4] as *const Timespec;

        // Validate message buffer pointer
        if msg_ptr.is_null() || msg_len == 0 {
            return Err(SyscallError::InvalidArgument);
        }

        // Read timeout if provided
        let timeout = if !timeout_ptr.is_null() {
            Some(unsafe { ptr::read(timeout_ptr) })
        } else {
            None
        };

        match mqueue::mq_timedreceive(mqd, msg_len, timeout.as_ref()) {
            Ok((msg, prio)) => {
                // Copy message to user buffer
                let copy_len = core::cmp::min(msg.len(), msg_len);
                unsafe {
                    ptr::copy_nonoverlapping(msg.as_ptr(), msg_ptr, copy_len);
                }
                
                // Set priority if requested
                if !msg_prio_ptr.is_null() {
                    unsafe { ptr::write(msg_prio_ptr, prio); }
                }
                
                Ok(copy_len as u64)
            },
            Err(_) => Err(SyscallError::InvalidArgument),
        }
    }
    
    /// Register for notification when a message arrives
    fn mq_notify(&self, args: &[u64]) -> Result<u64, SyscallError> {
        if args.len() < 2 {
            return Err(SyscallError::InvalidArgument);
        }

        let mqd = args[0] as i32;
        let notify_ptr = args[1] as *const MqNotify;

        // Read notification if provided
        let notify = if !notify_ptr.is_null() {
            Some(unsafe { ptr::read(notify_ptr) })
        } else {
            None
        };

        match mqueue::mq_notify(mqd, notify.as_ref()) {
            Ok(()) => Ok(0),
            Err(_) => Err(SyscallError::InvalidArgument),
        }
    }
    
    /// Get and set message queue attributes
    fn mq_getsetattr(&self, args: &[u64]) -> Result<u64, SyscallError> {
        if args.len() < 3 {
            return Err(SyscallError::InvalidArgument);
        }

        let mqd = args[0] as i32;
        let new_attr_ptr = args[1] as *const MqAttr;
        let old_attr_ptr = args[2] as *mut MqAttr;

        // Read new attributes if provided
        let new_attr = if !new_attr_ptr.is_null() {
            Some(unsafe { ptr::read(new_attr_ptr) })
        } else {
            None
        };

        match mqueue::mq_getsetattr(mqd, new_attr.as_ref()) {
            Ok(old_attr) => {
                if !old_attr_ptr.is_null() {
                    unsafe { ptr::write(old_attr_ptr, old_attr); }
                }
                Ok(0)
            },
            Err(_) => Err(SyscallError::InvalidArgument),
        }
    }
    
    /// Helper method to read C-style strings from user space
    fn read_cstr(&self, ptr: *const u8) -> Result<String, ()> {
        if ptr.is_null() {
            return Err(());
        }

        let mut buf = Vec::new();
        let mut offset = 0;
        
        loop {
            let byte = unsafe { ptr.add(offset).read() };
            
            if byte == 0 {
                break;
            }
            
            buf.push(byte);
            offset += 1;
            
            // Prevent infinite loops
            if offset > 256 {
                return Err(());
            }
        }
        
        String::from_utf8(buf).map_err(|_| ())
    }
}

impl SyscallService for IpcService {
    fn name(&self) -> &str {
        "ipc"
    }

    fn handle(&self, syscall_id: u32, args: &[u64]) -> Result<u64, SyscallError> {
        match syscall_id {
            // Message queue system calls
            101 => self.mq_open(args),
            102 => self.mq_close(args),
            103 => self.mq_getattr(args),
            104 => self.mq_setattr(args),
            105 => self.mq_timedsend(args),
            106 => self.mq_timedreceive(args),
            107 => self.mq_notify(args),
            108 => self.mq_getsetattr(args),
            
            // TODO: Implement other IPC system calls
            _ => Err(SyscallError::InvalidSyscall),
        }
    }
}

/// Create IPC syscall service instance
///
/// Creates and returns an instance of the IPC syscall service.
///
/// # Returns
///
/// * `Box<dyn SyscallService>` - IPC syscall service instance
pub fn create_ipc_service() -> Box<dyn SyscallService> {
    Box::new(IpcService::new())
}

/// Module initialization function
///
/// Initializes the IPC module and registers necessary syscall handlers.
///
/// # Returns
///
/// * `Result<(), nos_nos_error_handling::unified::KernelError>` - Initialization result
pub fn initialize_ipc_module() -> Result<(), nos_nos_error_handling::unified::KernelError> {
    crate::println!("[ipc] Initializing IPC module");
    
    // Initialize message queue system
    crate::subsystems::ipc::mqueue::init();
    
    Ok(())
}

// IPC module metadata
pub const MODULE_NAME: &str = "ipc";
pub const MODULE_VERSION: &str = "1.0.0";