//! Advanced Thread System Calls
//!
//! This module implements system calls for advanced POSIX thread features:
//! - pthread_attr_setschedpolicy() - Set thread scheduling policy attribute
//! - pthread_attr_getschedpolicy() - Get thread scheduling policy attribute
//! - pthread_attr_setschedparam() - Set thread scheduling parameter attribute
//! - pthread_attr_getschedparam() - Get thread scheduling parameter attribute
//! - pthread_attr_setinheritsched() - Set thread scheduling inheritance attribute
//! - pthread_attr_getinheritsched() - Get thread scheduling inheritance attribute
//! - pthread_setschedparam() - Set thread scheduling parameters
//! - pthread_getschedparam() - Get thread scheduling parameters
//! - pthread_getcpuclockid() - Get thread CPU clock ID
//! - pthread_barrier_init() - Initialize barrier
//! - pthread_barrier_wait() - Wait at barrier
//! - pthread_barrier_destroy() - Destroy barrier
//! - pthread_spin_init() - Initialize spinlock
//! - pthread_spin_lock() - Acquire spinlock
//! - pthread_spin_unlock() - Release spinlock
//! - pthread_spin_destroy() - Destroy spinlock

use crate::posix::advanced_thread::*;
use crate::posix::{ClockId, Pid};
use crate::posix::realtime::SchedParam;
use crate::syscalls::common::{SyscallError, SyscallResult};
use crate::process::myproc;

/// System call dispatch for advanced thread operations
pub fn dispatch(syscall_num: u32, args: &[u64]) -> SyscallResult {
    match syscall_num {
        0x8000 => sys_pthread_attr_setschedpolicy(args),
        0x8001 => sys_pthread_attr_getschedpolicy(args),
        0x8002 => sys_pthread_attr_setschedparam(args),
        0x8003 => sys_pthread_attr_getschedparam(args),
        0x8004 => sys_pthread_attr_setinheritsched(args),
        0x8005 => sys_pthread_attr_getinheritsched(args),
        0x8006 => sys_pthread_setschedparam(args),
        0x8007 => sys_pthread_getschedparam(args),
        0x8008 => sys_pthread_getcpuclockid(args),
        0x8009 => sys_pthread_barrier_init(args),
        0x800A => sys_pthread_barrier_wait(args),
        0x800B => sys_pthread_barrier_destroy(args),
        0x800C => sys_pthread_spin_init(args),
        0x800D => sys_pthread_spin_lock(args),
        0x800E => sys_pthread_spin_unlock(args),
        0x800F => sys_pthread_spin_destroy(args),
        _ => Err(SyscallError::InvalidSyscall),
    }
}

/// pthread_attr_setschedpolicy system call
/// 
/// Arguments:
/// 0: attr_ptr - Pointer to thread attributes
/// 1: policy - Scheduling policy
/// 
/// Returns: 0 on success, negative errno on failure
fn sys_pthread_attr_setschedpolicy(args: &[u64]) -> SyscallResult {
    if args.len() < 2 {
        return Err(SyscallError::InvalidArgument);
    }

    let attr_ptr = args[0] as usize;
    let policy = args[1] as i32;

    // Get current process
    let pid = match myproc() {
        Some(p) => p,
        None => return Err(SyscallError::NotFound),
    };

    let pagetable = {
        let proc_table = crate::process::manager::PROC_TABLE.lock();
        let proc = match proc_table.find_ref(pid) {
            Some(p) => p,
            None => return Err(SyscallError::NotFound),
        };
        proc.pagetable
    };

    if pagetable.is_null() {
        return Err(SyscallError::BadAddress);
    }

    // Read thread attributes from user space
    let mut attr = if attr_ptr != 0 {
        let mut attr_data = [0u8; core::mem::size_of::<ThreadAttr>()];
        
        unsafe {
            match crate::subsystems::mm::vm::copyin(pagetable, attr_data.as_mut_ptr(), attr_ptr, attr_data.len()) {
                Ok(_) => {},
                Err(_) => return Err(SyscallError::BadAddress),
            }
        }

        unsafe { core::mem::transmute::<[u8; 168], ThreadAttr>(attr_data) }
    } else {
        ThreadAttr::new()
    };

    // Set scheduling policy
    match pthread_attr_setschedpolicy(&mut attr, policy) {
        Ok(()) => {
            // Write back attributes if needed
            if attr_ptr != 0 {
                let attr_data = unsafe { core::mem::transmute::<ThreadAttr, [u8; 168]>(attr) };
                
                unsafe {
                    match crate::subsystems::mm::vm::copyout(pagetable, attr_ptr, attr_data.as_ptr(), attr_data.len()) {
                        Ok(_) => {},
                        Err(_) => return Err(SyscallError::BadAddress),
                    }
                }
            }
            
            Ok(0)
        }
        Err(ThreadError::InvalidPolicy) => Err(SyscallError::InvalidArgument),
        Err(ThreadError::InvalidPriority) => Err(SyscallError::InvalidArgument),
        Err(ThreadError::InvalidStackSize) => Err(SyscallError::InvalidArgument),
        Err(ThreadError::InvalidDetachState) => Err(SyscallError::InvalidArgument),
        Err(ThreadError::InvalidInherit) => Err(SyscallError::InvalidArgument),
        Err(ThreadError::InvalidAffinity) => Err(SyscallError::InvalidArgument),
        Err(ThreadError::NotSupported) => Err(SyscallError::NotSupported),
    }
}

/// pthread_attr_getschedpolicy system call
/// 
/// Arguments:
/// 0: attr_ptr - Pointer to thread attributes
/// 1: policy_ptr - Pointer to store scheduling policy
/// 
/// Returns: 0 on success, negative errno on failure
fn sys_pthread_attr_getschedpolicy(args: &[u64]) -> SyscallResult {
    if args.len() < 2 {
        return Err(SyscallError::InvalidArgument);
    }

    let attr_ptr = args[0] as usize;
    let policy_ptr = args[1] as usize;

    // Get current process
    let pid = match myproc() {
        Some(p) => p,
        None => return Err(SyscallError::NotFound),
    };

    let pagetable = {
        let proc_table = crate::process::manager::PROC_TABLE.lock();
        let proc = match proc_table.find_ref(pid) {
            Some(p) => p,
            None => return Err(SyscallError::NotFound),
        };
        proc.pagetable
    };

    if pagetable.is_null() {
        return Err(SyscallError::BadAddress);
    }

    // Read thread attributes from user space
    let attr = if attr_ptr != 0 {
        let mut attr_data = [0u8; core::mem::size_of::<ThreadAttr>()];
        
        unsafe {
            match crate::subsystems::mm::vm::copyin(pagetable, attr_data.as_mut_ptr(), attr_ptr, attr_data.len()) {
                Ok(_) => {},
                Err(_) => return Err(SyscallError::BadAddress),
            }
        }

        unsafe { core::mem::transmute::<[u8; 168], ThreadAttr>(attr_data) }
    } else {
        return Err(SyscallError::BadAddress);
    };

    // Get scheduling policy
    let policy = pthread_attr_getschedpolicy(&attr);

    // Copy policy back to user space
    if policy_ptr != 0 {
        unsafe {
            match crate::subsystems::mm::vm::copyout(pagetable, policy_ptr, &policy as *const i32 as *const u8, core::mem::size_of::<i32>()) {
                Ok(_) => {},
                Err(_) => return Err(SyscallError::BadAddress),
            }
        }
    }

    Ok(0)
}

/// pthread_attr_setschedparam system call
/// 
/// Arguments:
/// 0: attr_ptr - Pointer to thread attributes
/// 1: param_ptr - Pointer to scheduling parameters
/// 
/// Returns: 0 on success, negative errno on failure
fn sys_pthread_attr_setschedparam(args: &[u64]) -> SyscallResult {
    if args.len() < 2 {
        return Err(SyscallError::InvalidArgument);
    }

    let attr_ptr = args[0] as usize;
    let param_ptr = args[1] as usize;

    // Get current process
    let pid = match myproc() {
        Some(p) => p,
        None => return Err(SyscallError::NotFound),
    };

    let pagetable = {
        let proc_table = crate::process::manager::PROC_TABLE.lock();
        let proc = match proc_table.find_ref(pid) {
            Some(p) => p,
            None => return Err(SyscallError::NotFound),
        };
        proc.pagetable
    };

    if pagetable.is_null() {
        return Err(SyscallError::BadAddress);
    }

    // Read thread attributes from user space
    let mut attr = if attr_ptr != 0 {
        let mut attr_data = [0u8; core::mem::size_of::<ThreadAttr>()];
        
        unsafe {
            match crate::subsystems::mm::vm::copyin(pagetable, attr_data.as_mut_ptr(), attr_ptr, attr_data.len()) {
                Ok(_) => {},
                Err(_) => return Err(SyscallError::BadAddress),
            }
        }

        unsafe { core::mem::transmute::<[u8; 168], ThreadAttr>(attr_data) }
    } else {
        ThreadAttr::new()
    };

    // Read scheduling parameters from user space
    let param = if param_ptr != 0 {
        let mut param_data = [0u8; core::mem::size_of::<SchedParam>()];
        
        unsafe {
            match crate::subsystems::mm::vm::copyin(pagetable, param_data.as_mut_ptr(), param_ptr, param_data.len()) {
                Ok(_) => {},
                Err(_) => return Err(SyscallError::BadAddress),
            }
        }

        unsafe { core::mem::transmute::<[u8; 4], SchedParam>(param_data) }
    } else {
        return Err(SyscallError::BadAddress);
    };

    // Set scheduling parameters
    match pthread_attr_setschedparam(&mut attr, param) {
        Ok(()) => {
            // Write back attributes if needed
            if attr_ptr != 0 {
                let attr_data = unsafe { core::mem::transmute::<ThreadAttr, [u8; 168]>(attr) };
                
                unsafe {
                    match crate::subsystems::mm::vm::copyout(pagetable, attr_ptr, attr_data.as_ptr(), attr_data.len()) {
                        Ok(_) => {},
                        Err(_) => return Err(SyscallError::BadAddress),
                    }
                }
            }
            
            Ok(0)
        }
        Err(ThreadError::InvalidPolicy) => Err(SyscallError::InvalidArgument),
        Err(ThreadError::InvalidPriority) => Err(SyscallError::InvalidArgument),
        Err(ThreadError::InvalidStackSize) => Err(SyscallError::InvalidArgument),
        Err(ThreadError::InvalidDetachState) => Err(SyscallError::InvalidArgument),
        Err(ThreadError::InvalidInherit) => Err(SyscallError::InvalidArgument),
        Err(ThreadError::InvalidAffinity) => Err(SyscallError::InvalidArgument),
        Err(ThreadError::NotSupported) => Err(SyscallError::NotSupported),
    }
}

/// pthread_attr_getschedparam system call
/// 
/// Arguments:
/// 0: attr_ptr - Pointer to thread attributes
/// 1: param_ptr - Pointer to store scheduling parameters
/// 
/// Returns: 0 on success, negative errno on failure
fn sys_pthread_attr_getschedparam(args: &[u64]) -> SyscallResult {
    if args.len() < 2 {
        return Err(SyscallError::InvalidArgument);
    }

    let attr_ptr = args[0] as usize;
    let param_ptr = args[1] as usize;

    // Get current process
    let pid = match myproc() {
        Some(p) => p,
        None => return Err(SyscallError::NotFound),
    };

    let pagetable = {
        let proc_table = crate::process::manager::PROC_TABLE.lock();
        let proc = match proc_table.find_ref(pid) {
            Some(p) => p,
            None => return Err(SyscallError::NotFound),
        };
        proc.pagetable
    };

    if pagetable.is_null() {
        return Err(SyscallError::BadAddress);
    }

    // Read thread attributes from user space
    let attr = if attr_ptr != 0 {
        let mut attr_data = [0u8; core::mem::size_of::<ThreadAttr>()];
        
        unsafe {
            match crate::subsystems::mm::vm::copyin(pagetable, attr_data.as_mut_ptr(), attr_ptr, attr_data.len()) {
                Ok(_) => {},
                Err(_) => return Err(SyscallError::BadAddress),
            }
        }

        unsafe { core::mem::transmute::<[u8; 168], ThreadAttr>(attr_data) }
    } else {
        return Err(SyscallError::BadAddress);
    };

    // Get scheduling parameters
    let param = pthread_attr_getschedparam(&attr);

    // Copy parameters back to user space
    if param_ptr != 0 {
        let param_data = unsafe { core::mem::transmute::<SchedParam, [u8; 4]>(param) };
        
        unsafe {
            match crate::subsystems::mm::vm::copyout(pagetable, param_ptr, param_data.as_ptr(), param_data.len()) {
                Ok(_) => {},
                Err(_) => return Err(SyscallError::BadAddress),
            }
        }
    }

    Ok(0)
}

/// pthread_attr_setinheritsched system call
/// 
/// Arguments:
/// 0: attr_ptr - Pointer to thread attributes
/// 1: inherit - Scheduling inheritance
/// 
/// Returns: 0 on success, negative errno on failure
fn sys_pthread_attr_setinheritsched(args: &[u64]) -> SyscallResult {
    if args.len() < 2 {
        return Err(SyscallError::InvalidArgument);
    }

    let attr_ptr = args[0] as usize;
    let inherit = args[1] as i32;

    // Get current process
    let pid = match myproc() {
        Some(p) => p,
        None => return Err(SyscallError::NotFound),
    };

    let pagetable = {
        let proc_table = crate::process::manager::PROC_TABLE.lock();
        let proc = match proc_table.find_ref(pid) {
            Some(p) => p,
            None => return Err(SyscallError::NotFound),
        };
        proc.pagetable
    };

    if pagetable.is_null() {
        return Err(SyscallError::BadAddress);
    }

    // Read thread attributes from user space
    let mut attr = if attr_ptr != 0 {
        let mut attr_data = [0u8; core::mem::size_of::<ThreadAttr>()];
        
        unsafe {
            match crate::subsystems::mm::vm::copyin(pagetable, attr_data.as_mut_ptr(), attr_ptr, attr_data.len()) {
                Ok(_) => {},
                Err(_) => return Err(SyscallError::BadAddress),
            }
        }

        unsafe { core::mem::transmute::<[u8; 168], ThreadAttr>(attr_data) }
    } else {
        ThreadAttr::new()
    };

    // Set scheduling inheritance
    match pthread_attr_setinheritsched(&mut attr, inherit) {
        Ok(()) => {
            // Write back attributes if needed
            if attr_ptr != 0 {
                let attr_data = unsafe { core::mem::transmute::<ThreadAttr, [u8; 168]>(attr) };
                
                unsafe {
                    match crate::subsystems::mm::vm::copyout(pagetable, attr_ptr, attr_data.as_ptr(), attr_data.len()) {
                        Ok(_) => {},
                        Err(_) => return Err(SyscallError::BadAddress),
                    }
                }
            }
            
            Ok(0)
        }
        Err(ThreadError::InvalidInherit) => Err(SyscallError::InvalidArgument),
        Err(ThreadError::InvalidPolicy) => Err(SyscallError::InvalidArgument),
        Err(ThreadError::InvalidPriority) => Err(SyscallError::InvalidArgument),
        Err(ThreadError::InvalidStackSize) => Err(SyscallError::InvalidArgument),
        Err(ThreadError::InvalidDetachState) => Err(SyscallError::InvalidArgument),
        Err(ThreadError::InvalidAffinity) => Err(SyscallError::InvalidArgument),
        Err(ThreadError::NotSupported) => Err(SyscallError::NotSupported),
    }
}

/// pthread_attr_getinheritsched system call
/// 
/// Arguments:
/// 0: attr_ptr - Pointer to thread attributes
/// 1: inherit_ptr - Pointer to store scheduling inheritance
/// 
/// Returns: 0 on success, negative errno on failure
fn sys_pthread_attr_getinheritsched(args: &[u64]) -> SyscallResult {
    if args.len() < 2 {
        return Err(SyscallError::InvalidArgument);
    }

    let attr_ptr = args[0] as usize;
    let inherit_ptr = args[1] as usize;

    // Get current process
    let pid = match myproc() {
        Some(p) => p,
        None => return Err(SyscallError::NotFound),
    };

    let pagetable = {
        let proc_table = crate::process::manager::PROC_TABLE.lock();
        let proc = match proc_table.find_ref(pid) {
            Some(p) => p,
            None => return Err(SyscallError::NotFound),
        };
        proc.pagetable
    };

    if pagetable.is_null() {
        return Err(SyscallError::BadAddress);
    }

    // Read thread attributes from user space
    let attr = if attr_ptr != 0 {
        let mut attr_data = [0u8; core::mem::size_of::<ThreadAttr>()];
        
        unsafe {
            match crate::subsystems::mm::vm::copyin(pagetable, attr_data.as_mut_ptr(), attr_ptr, attr_data.len()) {
                Ok(_) => {},
                Err(_) => return Err(SyscallError::BadAddress),
            }
        }

        unsafe { core::mem::transmute::<[u8; 168], ThreadAttr>(attr_data) }
    } else {
        return Err(SyscallError::BadAddress);
    };

    // Get scheduling inheritance
    let inherit = pthread_attr_getinheritsched(&attr);

    // Copy inheritance back to user space
    if inherit_ptr != 0 {
        unsafe {
            match crate::subsystems::mm::vm::copyout(pagetable, inherit_ptr, &inherit as *const i32 as *const u8, core::mem::size_of::<i32>()) {
                Ok(_) => {},
                Err(_) => return Err(SyscallError::BadAddress),
            }
        }
    }

    Ok(0)
}

/// pthread_setschedparam system call
/// 
/// Arguments:
/// 0: thread_id - Thread ID
/// 1: param_ptr - Pointer to scheduling parameters
/// 
/// Returns: 0 on success, negative errno on failure
fn sys_pthread_setschedparam(args: &[u64]) -> SyscallResult {
    if args.len() < 2 {
        return Err(SyscallError::InvalidArgument);
    }

    let thread_id = args[0] as Pid;
    let param_ptr = args[1] as usize;

    // Read scheduling parameters from user space
    let param = if param_ptr != 0 {
        let mut param_data = [0u8; core::mem::size_of::<SchedParam>()];
        
        let pid = match myproc() {
            Some(p) => p,
            None => return Err(SyscallError::NotFound),
        };

        let pagetable = {
            let proc_table = crate::process::manager::PROC_TABLE.lock();
            let proc = match proc_table.find_ref(pid) {
                Some(p) => p,
                None => return Err(SyscallError::NotFound),
            };
            proc.pagetable
        };

        if pagetable.is_null() {
            return Err(SyscallError::BadAddress);
        }

        unsafe {
            match crate::subsystems::mm::vm::copyin(pagetable, param_data.as_mut_ptr(), param_ptr, param_data.len()) {
                Ok(_) => {},
                Err(_) => return Err(SyscallError::BadAddress),
            }
        }

        unsafe { core::mem::transmute::<[u8; 4], SchedParam>(param_data) }
    } else {
        return Err(SyscallError::BadAddress);
    };

    // Set thread scheduling parameters
    match pthread_setschedparam(thread_id, param) {
        Ok(()) => Ok(0),
        Err(ThreadError::ThreadNotFound) => Err(SyscallError::BadAddress),
        Err(ThreadError::InvalidPolicy) => Err(SyscallError::InvalidArgument),
        Err(ThreadError::InvalidPriority) => Err(SyscallError::InvalidArgument),
        Err(ThreadError::InvalidStackSize) => Err(SyscallError::InvalidArgument),
        Err(ThreadError::InvalidDetachState) => Err(SyscallError::InvalidArgument),
        Err(ThreadError::InvalidInherit) => Err(SyscallError::InvalidArgument),
        Err(ThreadError::InvalidAffinity) => Err(SyscallError::InvalidArgument),
        Err(ThreadError::NotSupported) => Err(SyscallError::NotSupported),
    }
}

/// pthread_getschedparam system call
/// 
/// Arguments:
/// 0: thread_id - Thread ID
/// 1: param_ptr - Pointer to store scheduling parameters
/// 
/// Returns: 0 on success, negative errno on failure
fn sys_pthread_getschedparam(args: &[u64]) -> SyscallResult {
    if args.len() < 2 {
        return Err(SyscallError::InvalidArgument);
    }

    let thread_id = args[0] as Pid;
    let param_ptr = args[1] as usize;

    // Get thread scheduling parameters
    match pthread_getschedparam(thread_id) {
        Ok(param) => {
            // Copy parameters back to user space
            if param_ptr != 0 {
                let pid = match myproc() {
                    Some(p) => p,
                    None => return Err(SyscallError::NotFound),
                };

                let pagetable = {
                    let proc_table = crate::process::manager::PROC_TABLE.lock();
                    let proc = match proc_table.find_ref(pid) {
                        Some(p) => p,
                        None => return Err(SyscallError::NotFound),
                    };
                    proc.pagetable
                };

                if pagetable.is_null() {
                    return Err(SyscallError::BadAddress);
                }

                let param_data = unsafe { core::mem::transmute::<SchedParam, [u8; 4]>(param) };
                
                unsafe {
                    match crate::subsystems::mm::vm::copyout(pagetable, param_ptr, param_data.as_ptr(), param_data.len()) {
                        Ok(_) => {},
                        Err(_) => return Err(SyscallError::BadAddress),
                    }
                }
            }
            
            Ok(0)
        }
        Err(ThreadError::ThreadNotFound) => Err(SyscallError::BadAddress),
    }
}

/// pthread_getcpuclockid system call
/// 
/// Arguments:
/// 0: thread_id - Thread ID
/// 1: clock_id - Clock ID
/// 2: clock_id_ptr - Pointer to store clock ID
/// 
/// Returns: 0 on success, negative errno on failure
fn sys_pthread_getcpuclockid(args: &[u64]) -> SyscallResult {
    if args.len() < 3 {
        return Err(SyscallError::InvalidArgument);
    }

    let thread_id = args[0] as Pid;
    let clock_id = args[1] as ClockId;
    let clock_id_ptr = args[2] as usize;

    // Get thread CPU clock ID
    match pthread_getcpuclockid(thread_id, clock_id) {
        Ok(return_clock_id) => {
            // Copy clock ID back to user space
            if clock_id_ptr != 0 {
                let pid = match myproc() {
                    Some(p) => p,
                    None => return Err(SyscallError::NotFound),
                };

                let pagetable = {
                    let proc_table = crate::process::manager::PROC_TABLE.lock();
                    let proc = match proc_table.find_ref(pid) {
                        Some(p) => p,
                        None => return Err(SyscallError::NotFound),
                    };
                    proc.pagetable
                };

                if pagetable.is_null() {
                    return Err(SyscallError::BadAddress);
                }

                unsafe {
                    match crate::subsystems::mm::vm::copyout(pagetable, clock_id_ptr, &return_clock_id as *const ClockId as *const u8, core::mem::size_of::<ClockId>()) {
                        Ok(_) => {},
                        Err(_) => return Err(SyscallError::BadAddress),
                    }
                }
            }
            
            Ok(0)
        }
        Err(ThreadError::ThreadNotFound) => Err(SyscallError::BadAddress),
        Err(ThreadError::NotSupported) => Err(SyscallError::NotSupported),
    }
}

/// pthread_barrier_init system call
/// 
/// Arguments:
/// 0: barrier_ptr - Pointer to barrier
/// 1: count - Number of threads required
/// 
/// Returns: 0 on success, negative errno on failure
fn sys_pthread_barrier_init(args: &[u64]) -> SyscallResult {
    if args.len() < 2 {
        return Err(SyscallError::InvalidArgument);
    }

    let barrier_ptr = args[0] as usize;
    let count = args[1] as usize;

    // Get current thread ID
    let thread_id = match crate::process::thread::current_thread() {
        Some(tid) => tid as Pid,
        None => return Err(SyscallError::NotFound),
    };

    // Create barrier
    let barrier = match Barrier::new(count) {
        Ok(barrier) => barrier,
        Err(ThreadError::InvalidBarrierCount) => return Err(SyscallError::InvalidArgument),
    };

    // Register barrier
    let mut registry = THREAD_REGISTRY.lock();
    match registry.create_barrier(thread_id as Pid, count) {
        Ok(()) => {
            // Copy barrier handle back to user space
            if barrier_ptr != 0 {
                let pid = match myproc() {
                    Some(p) => p,
                    None => return Err(SyscallError::NotFound),
                };

                let pagetable = {
                    let proc_table = crate::process::manager::PROC_TABLE.lock();
                    let proc = match proc_table.find_ref(pid) {
                        Some(p) => p,
                        None => return Err(SyscallError::NotFound),
                    };
                    proc.pagetable
                };

                if pagetable.is_null() {
                    return Err(SyscallError::BadAddress);
                }

                let barrier_handle = &barrier as *const Barrier as *const u8;
                
                unsafe {
                    match crate::subsystems::mm::vm::copyout(pagetable, barrier_ptr, barrier_handle, core::mem::size_of::<usize>()) {
                        Ok(_) => {},
                        Err(_) => return Err(SyscallError::BadAddress),
                    }
                }
            }
            
            Ok(0)
        }
        Err(ThreadError::BarrierInUse) => Err(SyscallError::WouldBlock),
        Err(ThreadError::ThreadNotFound) => Err(SyscallError::BadAddress),
    }
}

/// pthread_barrier_wait system call
/// 
/// Arguments:
/// 0: barrier_ptr - Pointer to barrier
/// 
/// Returns: 0 on success, negative errno on failure
fn sys_pthread_barrier_wait(args: &[u64]) -> SyscallResult {
    if args.len() < 1 {
        return Err(SyscallError::InvalidArgument);
    }

    let barrier_ptr = args[0] as usize;

    // Get current thread ID
    let thread_id = match crate::process::thread::current_thread() {
        Some(tid) => tid as Pid,
        None => return Err(SyscallError::NotFound),
    };

    // Get barrier from registry
    let registry = THREAD_REGISTRY.lock();
    let barrier = match registry.get_barrier(thread_id as Pid) {
        Some(barrier) => barrier,
        None => return Err(SyscallError::BadAddress),
    };

    // Wait at barrier
    match barrier.wait() {
        Ok(()) => Ok(0),
        Err(ThreadError::InvalidBarrierCount) => Err(SyscallError::InvalidArgument),
    }
}

/// pthread_barrier_destroy system call
/// 
/// Arguments:
/// 0: barrier_ptr - Pointer to barrier
/// 
/// Returns: 0 on success, negative errno on failure
fn sys_pthread_barrier_destroy(args: &[u64]) -> SyscallResult {
    if args.len() < 1 {
        return Err(SyscallError::InvalidArgument);
    }

    let barrier_ptr = args[0] as usize;

    // Get current thread ID
    let thread_id = match crate::process::thread::current_thread() {
        Some(tid) => tid as Pid,
        None => return Err(SyscallError::NotFound),
    };

    // Remove barrier from registry
    let mut registry = THREAD_REGISTRY.lock();
    match registry.remove_barrier(thread_id as Pid) {
        Ok(_) => Ok(0),
        Err(ThreadError::ThreadNotFound) => Err(SyscallError::BadAddress),
        Err(ThreadError::BarrierInUse) => Err(SyscallError::WouldBlock),
    }
}

/// pthread_spin_init system call
/// 
/// Arguments:
/// 0: spin_ptr - Pointer to spinlock
/// 
/// Returns: 0 on success, negative errno on failure
fn sys_pthread_spin_init(args: &[u64]) -> SyscallResult {
    if args.len() < 1 {
        return Err(SyscallError::InvalidArgument);
    }

    let spin_ptr = args[0] as usize;

    // Get current thread ID
    let thread_id = match crate::process::thread::current_thread() {
        Some(tid) => tid as Pid,
        None => return Err(SyscallError::NotFound),
    };

    // Create spinlock
    let spinlock = Spinlock::new();

    // Register spinlock
    let mut registry = THREAD_REGISTRY.lock();
    match registry.create_spinlock(thread_id as Pid) {
        Ok(()) => {
            // Copy spinlock handle back to user space
            if spin_ptr != 0 {
                let pid = match myproc() {
                    Some(p) => p,
                    None => return Err(SyscallError::NotFound),
                };

                let pagetable = {
                    let proc_table = crate::process::manager::PROC_TABLE.lock();
                    let proc = match proc_table.find_ref(pid) {
                        Some(p) => p,
                        None => return Err(SyscallError::NotFound),
                    };
                    proc.pagetable
                };

                if pagetable.is_null() {
                    return Err(SyscallError::BadAddress);
                }

                let spinlock_handle = &spinlock as *const Spinlock as *const u8;
                
                unsafe {
                    match crate::subsystems::mm::vm::copyout(pagetable, spin_ptr, spinlock_handle, core::mem::size_of::<usize>()) {
                        Ok(_) => {},
                        Err(_) => return Err(SyscallError::BadAddress),
                    }
                }
            }
            
            Ok(0)
        }
        Err(ThreadError::ThreadNotFound) => Err(SyscallError::BadAddress),
    }
}

/// pthread_spin_lock system call
/// 
/// Arguments:
/// 0: spin_ptr - Pointer to spinlock
/// 
/// Returns: 0 on success, negative errno on failure
fn sys_pthread_spin_lock(args: &[u64]) -> SyscallResult {
    if args.len() < 1 {
        return Err(SyscallError::InvalidArgument);
    }

    let spin_ptr = args[0] as usize;

    // Get current thread ID
    let thread_id = match crate::process::thread::current_thread() {
        Some(tid) => tid as Pid,
        None => return Err(SyscallError::NotFound),
    };

    // Get spinlock from registry
    let registry = THREAD_REGISTRY.lock();
    let spinlock = match registry.get_spinlock(thread_id as Pid) {
        Some(spinlock) => spinlock,
        None => return Err(SyscallError::BadAddress),
    };

    // Acquire spinlock
    spinlock.lock();
    Ok(0)
}

/// pthread_spin_unlock system call
/// 
/// Arguments:
/// 0: spin_ptr - Pointer to spinlock
/// 
/// Returns: 0 on success, negative errno on failure
fn sys_pthread_spin_unlock(args: &[u64]) -> SyscallResult {
    if args.len() < 1 {
        return Err(SyscallError::InvalidArgument);
    }

    let spin_ptr = args[0] as usize;

    // Get current thread ID
    let thread_id = match crate::process::thread::current_thread() {
        Some(tid) => tid as Pid,
        None => return Err(SyscallError::NotFound),
    };

    // Get spinlock from registry
    let registry = THREAD_REGISTRY.lock();
    let spinlock = match registry.get_spinlock(thread_id as Pid) {
        Some(spinlock) => spinlock,
        None => return Err(SyscallError::BadAddress),
    };

    // Release spinlock
    spinlock.unlock();
    Ok(0)
}

/// pthread_spin_destroy system call
/// 
/// Arguments:
/// 0: spin_ptr - Pointer to spinlock
/// 
/// Returns: 0 on success, negative errno on failure
fn sys_pthread_spin_destroy(args: &[u64]) -> SyscallResult {
    if args.len() < 1 {
        return Err(SyscallError::InvalidArgument);
    }

    let spin_ptr = args[0] as usize;

    // Get current thread ID
    let thread_id = match crate::process::thread::current_thread() {
        Some(tid) => tid as Pid,
        None => return Err(SyscallError::NotFound),
    };

    // Remove spinlock from registry
    let mut registry = THREAD_REGISTRY.lock();
    match registry.remove_spinlock(thread_id as Pid) {
        Ok(_) => Ok(0),
        Err(ThreadError::ThreadNotFound) => Err(SyscallError::BadAddress),
    }
}

/// Initialize advanced thread system calls
pub fn init_advanced_thread_syscalls() {
    crate::println!("[syscall] Initializing advanced thread system calls");
    
    // Initialize advanced thread features
    init_advanced_thread();
    
    crate::println!("[syscall] Advanced thread system calls initialized");
    crate::println!("[syscall]   pthread_attr_setschedpolicy - Set thread scheduling policy");
    crate::println!("[syscall]   pthread_attr_getschedpolicy - Get thread scheduling policy");
    crate::println!("[syscall]   pthread_attr_setschedparam - Set thread scheduling params");
    crate::println!("[syscall]   pthread_attr_getschedparam - Get thread scheduling params");
    crate::println!("[syscall]   pthread_attr_setinheritsched - Set scheduling inheritance");
    crate::println!("[syscall]   pthread_attr_getinheritsched - Get scheduling inheritance");
    crate::println!("[syscall]   pthread_setschedparam - Set thread scheduling params");
    crate::println!("[syscall]   pthread_getschedparam - Get thread scheduling params");
    crate::println!("[syscall]   pthread_getcpuclockid - Get thread CPU clock ID");
    crate::println!("[syscall]   pthread_barrier_init - Initialize barrier");
    crate::println!("[syscall]   pthread_barrier_wait - Wait at barrier");
    crate::println!("[syscall]   pthread_barrier_destroy - Destroy barrier");
    crate::println!("[syscall]   pthread_spin_init - Initialize spinlock");
    crate::println!("[syscall]   pthread_spin_lock - Acquire spinlock");
    crate::println!("[syscall]   pthread_spin_unlock - Release spinlock");
    crate::println!("[syscall]   pthread_spin_destroy - Destroy spinlock");
}

/// Get advanced thread system call statistics
pub fn get_advanced_thread_stats() -> AdvancedThreadStats {
    let registry = THREAD_REGISTRY.lock();
    let registry_stats = registry.get_stats();
    
    AdvancedThreadStats {
        total_threads: registry_stats.total_threads,
        total_barriers: registry_stats.total_barriers,
        total_spinlocks: registry_stats.total_spinlocks,
        total_clocks: registry_stats.total_clocks,
        next_thread_id: registry_stats.next_thread_id,
    }
}

/// Advanced thread system call statistics
#[derive(Debug, Clone)]
pub struct AdvancedThreadStats {
    /// Total number of threads
    pub total_threads: usize,
    /// Total number of barriers
    pub total_barriers: usize,
    /// Total number of spinlocks
    pub total_spinlocks: usize,
    /// Total number of CPU clocks
    pub total_clocks: usize,
    /// Next thread ID to be allocated
    pub next_thread_id: Pid,
}