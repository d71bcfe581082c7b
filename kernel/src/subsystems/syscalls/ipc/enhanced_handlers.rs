//! Enhanced IPC System Call Handlers
//!
//! This module contains system call handlers for enhanced IPC operations.

use super::types::*;
use nos_nos_error_handling::unified::KernelError;
use alloc::string::ToString;
use crate::subsystems::ipc::enhanced_ipc::{
    create_message_queue, send_message, receive_message,
    create_shared_memory, attach_shared_memory, detach_shared_memory, delete_shared_memory,
    create_semaphore, semaphore_wait, semaphore_signal,
    create_mutex, mutex_lock, mutex_unlock,
    create_condition, condition_wait, condition_signal, condition_broadcast,
    create_event, event_wait, event_trigger,
    create_rpc_endpoint, register_rpc_procedure, make_rpc_call, complete_rpc_call, get_rpc_result,
    EnhancedIpcMessage, IpcError, MSG_PRIORITY_NORMAL, MSG_FLAG_NONBLOCK,
    SHM_PERM_READ, SHM_PERM_WRITE,
};

/// Handle enhanced_msgq_create system call - create enhanced message queue
pub fn handle_enhanced_msgq_create(args: &[u64]) -> Result<u64, KernelError> {
    if args.len() != 1 {
        return Err(KernelError::InvalidArgument);
    }

    let max_size = args[0] as usize;
    
    match create_message_queue(max_size) {
        Ok(queue_id) => Ok(queue_id as u64),
        Err(_) => Err(KernelError::IoError),
    }
}

/// Handle enhanced_msgq_send system call - send message to enhanced queue
pub fn handle_enhanced_msgq_send(args: &[u64]) -> Result<u64, KernelError> {
    if args.len() != 4 {
        return Err(KernelError::InvalidArgument);
    }

    let queue_id = args[0] as u32;
    let dst_pid = args[1] as u32;
    let msg_type = args[2] as u32;
    let data_ptr = args[3] as *const u8;
    
    // Get current process ID
    let src_pid = crate::process::myproc().map_or(0, |p| p.pid);
    
    // Read message data from user space
    // In a real implementation, we would need to read the data from user space
    // For now, we'll use a placeholder
    let data = vec![0u8; 64]; // Placeholder
    
    // Create message
    let msg = EnhancedIpcMessage::new(
        src_pid,
        dst_pid,
        msg_type,
        MSG_PRIORITY_NORMAL,
        MSG_FLAG_NONBLOCK,
        &data,
    );
    
    match send_message(queue_id, msg) {
        Ok(()) => Ok(0),
        Err(_) => Err(KernelError::IoError),
    }
}

/// Handle enhanced_msgq_recv system call - receive message from enhanced queue
pub fn handle_enhanced_msgq_recv(args: &[u64]) -> Result<u64, KernelError> {
    if args.len() != 3 {
        return Err(KernelError::InvalidArgument);
    }

    let queue_id = args[0] as u32;
    let timeout = args[1] as u32;
    let msg_ptr = args[2] as *mut u8;
    
    match receive_message(queue_id, Some(timeout)) {
        Ok(msg) => {
            // In a real implementation, we would write the message to user space
            // For now, we'll just return the message ID
            Ok(msg.msg_id)
        }
        Err(_) => Err(KernelError::IoError),
    }
}

/// Handle enhanced_shm_create system call - create enhanced shared memory
pub fn handle_enhanced_shm_create(args: &[u64]) -> Result<u64, KernelError> {
    if args.len() != 2 {
        return Err(KernelError::InvalidArgument);
    }

    let size = args[0] as usize;
    let permissions = args[1] as u32;
    
    // Get current process ID
    let pid = crate::process::myproc().map_or(0, |p| p.pid);
    
    match create_shared_memory(size, pid, permissions) {
        Ok(shm_id) => Ok(shm_id as u64),
        Err(_) => Err(KernelError::IoError),
    }
}

/// Handle enhanced_shm_attach system call - attach to enhanced shared memory
pub fn handle_enhanced_shm_attach(args: &[u64]) -> Result<u64, KernelError> {
    if args.len() != 1 {
        return Err(KernelError::InvalidArgument);
    }

    let shm_id = args[0] as u32;
    
    // Get current process ID
    let pid = crate::process::myproc().map_or(0, |p| p.pid);
    
    match attach_shared_memory(shm_id, pid) {
        Ok(addr) => Ok(addr as u64),
        Err(_) => Err(KernelError::IoError),
    }
}

/// Handle enhanced_shm_detach system call - detach from enhanced shared memory
pub fn handle_enhanced_shm_detach(args: &[u64]) -> Result<u64, KernelError> {
    if args.len() != 1 {
        return Err(KernelError::InvalidArgument);
    }

    let shm_id = args[0] as u32;
    
    // Get current process ID
    let pid = crate::process::myproc().map_or(0, |p| p.pid);
    
    match detach_shared_memory(shm_id, pid) {
        Ok(()) => Ok(0),
        Err(_) => Err(KernelError::IoError),
    }
}

/// Handle enhanced_shm_delete system call - delete enhanced shared memory
pub fn handle_enhanced_shm_delete(args: &[u64]) -> Result<u64, KernelError> {
    if args.len() != 1 {
        return Err(KernelError::InvalidArgument);
    }

    let shm_id = args[0] as u32;
    
    // Get current process ID
    let pid = crate::process::myproc().map_or(0, |p| p.pid);
    
    match delete_shared_memory(shm_id, pid) {
        Ok(()) => Ok(0),
        Err(_) => Err(KernelError::IoError),
    }
}

/// Handle enhanced_sem_create system call - create enhanced semaphore
pub fn handle_enhanced_sem_create(args: &[u64]) -> Result<u64, KernelError> {
    if args.len() != 2 {
        return Err(KernelError::InvalidArgument);
    }

    let initial_value = args[0] as u32;
    let max_value = args[1] as u32;
    
    match create_semaphore(initial_value, max_value) {
        Ok(sem_id) => Ok(sem_id as u64),
        Err(_) => Err(KernelError::IoError),
    }
}

/// Handle enhanced_sem_wait system call - wait on enhanced semaphore
pub fn handle_enhanced_sem_wait(args: &[u64]) -> Result<u64, KernelError> {
    if args.len() != 2 {
        return Err(KernelError::InvalidArgument);
    }

    let sem_id = args[0] as u32;
    let timeout = args[1] as u32;
    
    match semaphore_wait(sem_id, Some(timeout)) {
        Ok(()) => Ok(0),
        Err(_) => Err(KernelError::IoError),
    }
}

/// Handle enhanced_sem_signal system call - signal enhanced semaphore
pub fn handle_enhanced_sem_signal(args: &[u64]) -> Result<u64, KernelError> {
    if args.len() != 1 {
        return Err(KernelError::InvalidArgument);
    }

    let sem_id = args[0] as u32;
    
    match semaphore_signal(sem_id) {
        Ok(()) => Ok(0),
        Err(_) => Err(KernelError::IoError),
    }
}

/// Handle enhanced_mutex_create system call - create enhanced mutex
pub fn handle_enhanced_mutex_create(args: &[u64]) -> Result<u64, KernelError> {
    if args.len() != 0 {
        return Err(KernelError::InvalidArgument);
    }
    
    match create_mutex() {
        Ok(mutex_id) => Ok(mutex_id as u64),
        Err(_) => Err(KernelError::IoError),
    }
}

/// Handle enhanced_mutex_lock system call - lock enhanced mutex
pub fn handle_enhanced_mutex_lock(args: &[u64]) -> Result<u64, KernelError> {
    if args.len() != 2 {
        return Err(KernelError::InvalidArgument);
    }

    let mutex_id = args[0] as u32;
    let timeout = args[1] as u32;
    
    match mutex_lock(mutex_id, Some(timeout)) {
        Ok(()) => Ok(0),
        Err(_) => Err(KernelError::IoError),
    }
}

/// Handle enhanced_mutex_unlock system call - unlock enhanced mutex
pub fn handle_enhanced_mutex_unlock(args: &[u64]) -> Result<u64, KernelError> {
    if args.len() != 1 {
        return Err(KernelError::InvalidArgument);
    }

    let mutex_id = args[0] as u32;
    
    match mutex_unlock(mutex_id) {
        Ok(()) => Ok(0),
        Err(_) => Err(KernelError::IoError),
    }
}

/// Handle enhanced_cond_create system call - create enhanced condition variable
pub fn handle_enhanced_cond_create(args: &[u64]) -> Result<u64, KernelError> {
    if args.len() != 1 {
        return Err(KernelError::InvalidArgument);
    }

    let mutex_id = args[0] as u32;
    let mutex_id_opt = if mutex_id == 0 { None } else { Some(mutex_id) };
    
    match create_condition(mutex_id_opt) {
        Ok(cond_id) => Ok(cond_id as u64),
        Err(_) => Err(KernelError::IoError),
    }
}

/// Handle enhanced_cond_wait system call - wait on enhanced condition variable
pub fn handle_enhanced_cond_wait(args: &[u64]) -> Result<u64, KernelError> {
    if args.len() != 2 {
        return Err(KernelError::InvalidArgument);
    }

    let cond_id = args[0] as u32;
    let timeout = args[1] as u32;
    
    match condition_wait(cond_id, Some(timeout)) {
        Ok(()) => Ok(0),
        Err(_) => Err(KernelError::IoError),
    }
}

/// Handle enhanced_cond_signal system call - signal enhanced condition variable
pub fn handle_enhanced_cond_signal(args: &[u64]) -> Result<u64, KernelError> {
    if args.len() != 1 {
        return Err(KernelError::InvalidArgument);
    }

    let cond_id = args[0] as u32;
    
    match condition_signal(cond_id) {
        Ok(()) => Ok(0),
        Err(_) => Err(KernelError::IoError),
    }
}

/// Handle enhanced_cond_broadcast system call - broadcast enhanced condition variable
pub fn handle_enhanced_cond_broadcast(args: &[u64]) -> Result<u64, KernelError> {
    if args.len() != 1 {
        return Err(KernelError::InvalidArgument);
    }

    let cond_id = args[0] as u32;
    
    match condition_broadcast(cond_id) {
        Ok(()) => Ok(0),
        Err(_) => Err(KernelError::IoError),
    }
}

/// Handle enhanced_event_create system call - create enhanced event
pub fn handle_enhanced_event_create(args: &[u64]) -> Result<u64, KernelError> {
    if args.len() != 2 {
        return Err(KernelError::InvalidArgument);
    }

    let event_type = args[0] as u32;
    let data_ptr = args[1] as *const u8;
    
    // Get current process ID
    let pid = crate::process::myproc().map_or(0, |p| p.pid);
    
    // Read event data from user space
    // In a real implementation, we would need to read the data from user space
    // For now, we'll use a placeholder
    let data = vec![0u8; 64]; // Placeholder
    
    match create_event(event_type, pid, &data) {
        Ok(event_id) => Ok(event_id as u64),
        Err(_) => Err(KernelError::IoError),
    }
}

/// Handle enhanced_event_wait system call - wait for enhanced event
pub fn handle_enhanced_event_wait(args: &[u64]) -> Result<u64, KernelError> {
    if args.len() != 2 {
        return Err(KernelError::InvalidArgument);
    }

    let event_id = args[0] as u32;
    let timeout = args[1] as u32;
    
    match event_wait(event_id, Some(timeout)) {
        Ok(()) => Ok(0),
        Err(_) => Err(KernelError::IoError),
    }
}

/// Handle enhanced_event_trigger system call - trigger enhanced event
pub fn handle_enhanced_event_trigger(args: &[u64]) -> Result<u64, KernelError> {
    if args.len() != 1 {
        return Err(KernelError::InvalidArgument);
    }

    let event_id = args[0] as u32;
    
    match event_trigger(event_id) {
        Ok(()) => Ok(0),
        Err(_) => Err(KernelError::IoError),
    }
}

/// Handle enhanced_rpc_create_endpoint system call - create RPC endpoint
pub fn handle_enhanced_rpc_create_endpoint(args: &[u64]) -> Result<u64, KernelError> {
    if args.len() != 1 {
        return Err(KernelError::InvalidArgument);
    }

    let name_ptr = args[0] as *const u8;
    
    // Read endpoint name from user space
    // In a real implementation, we would need to read the name from user space
    // For now, we'll use a placeholder
    let name = "rpc_endpoint".to_string();
    
    // Get current process ID
    let pid = crate::process::myproc().map_or(0, |p| p.pid);
    
    match create_rpc_endpoint(name, pid) {
        Ok(endpoint_id) => Ok(endpoint_id as u64),
        Err(_) => Err(KernelError::IoError),
    }
}

/// Handle enhanced_rpc_call system call - make RPC call
pub fn handle_enhanced_rpc_call(args: &[u64]) -> Result<u64, KernelError> {
    if args.len() != 4 {
        return Err(KernelError::InvalidArgument);
    }

    let endpoint_id = args[0] as u32;
    let proc_name_ptr = args[1] as *const u8;
    let args_ptr = args[2] as *const u8;
    let timeout = args[3] as u32;
    
    // Read procedure name and arguments from user space
    // In a real implementation, we would need to read these from user space
    // For now, we'll use placeholders
    let proc_name = "rpc_procedure";
    let args_data = vec![0u8; 64]; // Placeholder
    
    match make_rpc_call(endpoint_id, proc_name, &args_data, Some(timeout)) {
        Ok(call_id) => Ok(call_id),
        Err(_) => Err(KernelError::IoError),
    }
}

/// Handle enhanced_rpc_complete system call - complete RPC call
pub fn handle_enhanced_rpc_complete(args: &[u64]) -> Result<u64, KernelError> {
    if args.len() != 3 {
        return Err(KernelError::InvalidArgument);
    }

    let endpoint_id = args[0] as u32;
    let call_id = args[1] as u64;
    let response_ptr = args[2] as *const u8;
    
    // Read response data from user space
    // In a real implementation, we would need to read the data from user space
    // For now, we'll use a placeholder
    let response_data = vec![0u8; 64]; // Placeholder
    
    match complete_rpc_call(endpoint_id, call_id, &response_data) {
        Ok(()) => Ok(0),
        Err(_) => Err(KernelError::IoError),
    }
}

/// Handle enhanced_rpc_get_result system call - get RPC call result
pub fn handle_enhanced_rpc_get_result(args: &[u64]) -> Result<u64, KernelError> {
    if args.len() != 2 {
        return Err(KernelError::InvalidArgument);
    }

    let endpoint_id = args[0] as u32;
    let call_id = args[1] as u64;
    
    match get_rpc_result(endpoint_id, call_id) {
        Ok(_result) => {
            // In a real implementation, we would write the result to user space
            // For now, we'll just return success
            Ok(0)
        }
        Err(_) => Err(KernelError::IoError),
    }
}