//! 信号系统调用处理函数
//! 
//! 本模块包含信号相关系统调用的具体实现逻辑，包括：
//! - 信号发送和处理
//! - 信号掩码操作
//! - 信号处理程序管理
//! - 信号集操作

use crate::error_handling::unified::KernelError;
use crate::syscalls::signal::types::*;
use alloc::vec::Vec;

/// kill系统调用处理函数
/// 
/// 发送信号到进程。
/// 
/// # 参数
/// 
/// * `args` - 系统调用参数：[pid, sig]
/// 
/// # 返回值
/// 
/// * `Ok(u64)` - 0表示成功
/// * `Err(KernelError)` - 系统调用执行失败
pub fn handle_kill(args: &[u64]) -> Result<u64, KernelError> {
    if args.len() != 2 {
        // println removed for no_std compatibility
    }

    let pid = args[0] as i32;
    let sig = args[1] as i32;

    // TODO: 实现kill逻辑
    // println removed for no_std compatibility
    
    // 临时返回值
    Ok(0)
}

/// raise系统调用处理函数
/// 
/// 向当前进程发送信号。
/// 
/// # 参数
/// 
/// * `args` - 系统调用参数：[sig]
/// 
/// # 返回值
/// 
/// * `Ok(u64)` - 0表示成功
/// * `Err(KernelError)` - 系统调用执行失败
pub fn handle_raise(args: &[u64]) -> Result<u64, KernelError> {
    if args.len() != 1 {
        // println removed for no_std compatibility
    }

    let sig = args[0] as i32;

    // TODO: 实现raise逻辑
    // println removed for no_std compatibility
    
    // 临时返回值
    Ok(0)
}

/// sigaction系统调用处理函数
/// 
/// 设置信号处理程序。
/// 
/// # 参数
/// 
/// * `args` - 系统调用参数：[signum, act_ptr, oldact_ptr]
/// 
/// # 返回值
/// 
/// * `Ok(u64)` - 0表示成功
/// * `Err(KernelError)` - 系统调用执行失败
pub fn handle_sigaction(args: &[u64]) -> Result<u64, KernelError> {
    if args.len() != 3 {
        // println removed for no_std compatibility
    }

    let signum = args[0] as i32;
    let act_ptr = args[1];
    let oldact_ptr = args[2];

    // TODO: 实现sigaction逻辑
                signum, act_ptr, oldact_ptr);
    
    // 临时返回值
    Ok(0)
}

/// sigprocmask系统调用处理函数
/// 
/// 设置信号掩码。
/// 
/// # 参数
/// 
/// * `args` - 系统调用参数：[how, set_ptr, oldset_ptr]
/// 
/// # 返回值
/// 
/// * `Ok(u64)` - 旧的信号掩码
/// * `Err(KernelError)` - 系统调用执行失败
pub fn handle_sigprocmask(args: &[u64]) -> Result<u64, KernelError> {
    if args.len() != 3 {
        // println removed for no_std compatibility
    }

    let how = args[0] as i32;
    let set_ptr = args[1];
    let oldset_ptr = args[2];

    // TODO: 实现sigprocmask逻辑
                how, set_ptr, oldset_ptr);
    
    // 临时返回值
    Ok(0)
}

/// sigpending系统调用处理函数
/// 
/// 获取挂起的信号。
/// 
/// # 参数
/// 
/// * `args` - 系统调用参数：[set_ptr]
/// 
/// # 返回值
/// 
/// * `Ok(u64)` - 挂起的信号数
/// * `Err(KernelError)` - 系统调用执行失败
pub fn handle_sigpending(args: &[u64]) -> Result<u64, KernelError> {
    if args.len() != 1 {
        // println removed for no_std compatibility
    }

    let set_ptr = args[0];

    // TODO: 实现sigpending逻辑
    // println removed for no_std compatibility
    
    // 临时返回值
    Ok(0)
}

/// sigsuspend系统调用处理函数
/// 
/// 挂起进程直到信号到达。
/// 
/// # 参数
/// 
/// * `args` - 系统调用参数：[mask_ptr]
/// 
/// # 返回值
/// 
/// * `Ok(u64)` - 0表示成功
/// * `Err(KernelError)` - 系统调用执行失败
pub fn handle_sigsuspend(args: &[u64]) -> Result<u64, KernelError> {
    if args.len() != 1 {
        // println removed for no_std compatibility
    }

    let mask_ptr = args[0];

    // TODO: 实现sigsuspend逻辑
    // println removed for no_std compatibility
    
    // 临时返回值
    Ok(0)
}

/// sigwait系统调用处理函数
/// 
/// 等待信号。
/// 
/// # 参数
/// 
/// * `args` - 系统调用参数：[set_ptr, info_ptr]
/// 
/// # 返回值
/// 
/// * `Ok(u64)` - 信号编号
/// * `Err(KernelError)` - 系统调用执行失败
pub fn handle_sigwait(args: &[u64]) -> Result<u64, KernelError> {
    if args.len() != 2 {
        // println removed for no_std compatibility
    }

    let set_ptr = args[0];
    let info_ptr = args[1];

    // TODO: 实现sigwait逻辑
    // println removed for no_std compatibility
    
    // 临时返回值
    Ok(0)
}

/// sigwaitinfo系统调用处理函数
/// 
/// 等待信号并获取信息。
/// 
/// # 参数
/// 
/// * `args` - 系统调用参数：[set_ptr, info_ptr]
/// 
/// # 返回值
/// 
/// * `Ok(u64)` - 信号编号
/// * `Err(KernelError)` - 系统调用执行失败
pub fn handle_sigwaitinfo(args: &[u64]) -> Result<u64, KernelError> {
    if args.len() != 2 {
        // println removed for no_std compatibility
    }

    let set_ptr = args[0];
    let info_ptr = args[1];

    // TODO: 实现sigwaitinfo逻辑
    // println removed for no_std compatibility
    
    // 临时返回值
    Ok(0)
}

/// sigtimedwait系统调用处理函数
/// 
/// 等待信号（有超时）。
/// 
/// # 参数
/// 
/// * `args` - 系统调用参数：[set_ptr, info_ptr, timeout_ptr]
/// 
/// # 返回值
/// 
/// * `Ok(u64)` - 信号编号
/// * `Err(KernelError)` - 系统调用执行失败
pub fn handle_sigtimedwait(args: &[u64]) -> Result<u64, KernelError> {
    if args.len() != 3 {
        // println removed for no_std compatibility
    }

    let set_ptr = args[0];
    let info_ptr = args[1];
    let timeout_ptr = args[2];

    // TODO: 实现sigtimedwait逻辑
                set_ptr, info_ptr, timeout_ptr);
    
    // 临时返回值
    Ok(0)
}

/// signal系统调用处理函数
/// 
/// 信号处理（非标准）。
/// 
/// # 参数
/// 
/// * `args` - 系统调用参数：[pid, sig, info_ptr]
/// 
/// # 返回值
/// 
/// * `Ok(u64)` - 0表示成功
/// * `Err(KernelError)` - 系统调用执行失败
pub fn handle_signal(args: &[u64]) -> Result<u64, KernelError> {
    if args.len() != 3 {
        // println removed for no_std compatibility
    }

    let pid = args[0] as i32;
    let sig = args[1] as i32;
    let info_ptr = args[2];

    // TODO: 实现signal逻辑
    // println removed for no_std compatibility
    
    // 临时返回值
    Ok(0)
}

/// pause系统调用处理函数
/// 
/// 挂起进程直到信号到达。
/// 
/// # 参数
/// 
/// * `args` - 系统调用参数（通常为空）
/// 
/// # 返回值
/// 
/// * `Ok(u64)` - 0表示成功
/// * `Err(KernelError)` - 系统调用执行失败
pub fn handle_pause(args: &[u64]) -> Result<u64, KernelError> {
    if !args.is_empty() {
        // println removed for no_std compatibility
    }

    // TODO: 实现pause逻辑
    // println removed for no_std compatibility
    
    // 临时返回值
    Ok(0)
}

/// 获取信号系统调用号映射
/// 
/// 返回信号模块支持的系统调用号列表。
/// 
/// # 返回值
/// 
/// * `Vec<u32>` - 系统调用号列表
pub fn get_supported_syscalls() -> Vec<u32> {
    vec![
        // Linux系统调用号（x86_64）
        62,  // kill
        48,  // raise
        13,  // rt_sigaction
        14,  // rt_sigprocmask
        127, // rt_sigpending
        130, // rt_sigsuspend
        137, // rt_sigwait
        178, // rt_sigwaitinfo
        72,  // rt_sigtimedwait
        74,  // rt_signal
        34,  // pause
    ]
}

/// 系统调用分发函数
/// 
/// 根据系统调用号分发到相应的处理函数。
/// 
/// # 参数
/// 
/// * `syscall_number` - 系统调用号
/// * `args` - 系统调用参数
/// 
/// # 返回值
/// 
/// * `Ok(u64)` - 系统调用执行结果
/// * `Err(KernelError)` - 系统调用执行失败
pub fn dispatch_syscall(syscall_number: u32, args: &[u64]) -> Result<u64, KernelError> {
    match syscall_number {
        62 => handle_kill(args),
        48 => handle_raise(args),
        13 => handle_sigaction(args),
        14 => handle_sigprocmask(args),
        127 => handle_sigpending(args),
        130 => handle_sigsuspend(args),
        137 => handle_sigwait(args),
        178 => handle_sigwaitinfo(args),
        72 => handle_sigtimedwait(args),
        74 => handle_signal(args),
        34 => handle_pause(args),
        _ => Err(KernelError::UnsupportedSyscall),
    }
}