//! IPC系统调用处理函数
//! 
//! 本模块包含进程间通信相关系统调用的具体实现逻辑，包括：
//! - 管道和命名管道操作
//! - 共享内存操作
//! - 消息队列操作
//! - 信号量操作

use crate::error_handling::unified::KernelError;
// use crate::syscalls::ipc::types::*;
use alloc::vec::Vec;

/// pipe系统调用处理函数
/// 
/// 创建管道。
/// 
/// # 参数
/// 
/// * `args` - 系统调用参数：[pipefd_ptr, flags]
/// 
/// # 返回值
/// 
/// * `Ok(u64)` - 0表示成功
/// * `Err(KernelError)` - 系统调用执行失败
pub fn handle_pipe(args: &[u64]) -> Result<u64, KernelError> {
    if args.len() != 2 {
        // println removed for no_std compatibility
    }

    let pipefd_ptr = args[0];
    let flags = args[1] as i32;

    // TODO: 实现pipe逻辑
    // println removed for no_std compatibility
    
    // 临时返回值
    Ok(0)
}

/// mkfifo系统调用处理函数
/// 
/// 创建命名管道。
/// 
/// # 参数
/// 
/// * `args` - 系统调用参数：[pathname_ptr, mode]
/// 
/// # 返回值
/// 
/// * `Ok(u64)` - 0表示成功
/// * `Err(KernelError)` - 系统调用执行失败
pub fn handle_mkfifo(args: &[u64]) -> Result<u64, KernelError> {
    if args.len() != 2 {
        // println removed for no_std compatibility
    }

    let pathname_ptr = args[0];
    let mode = args[1] as u32;

    // TODO: 实现mkfifo逻辑
    // println removed for no_std compatibility
    
    // 临时返回值
    Ok(0)
}

/// shmget系统调用处理函数
/// 
/// 获取共享内存标识符。
/// 
/// # 参数
/// 
/// * `args` - 系统调用参数：[key, size, shmflg]
/// 
/// # 返回值
/// 
/// * `Ok(u64)` - 共享内存ID
/// * `Err(KernelError)` - 系统调用执行失败
pub fn handle_shmget(args: &[u64]) -> Result<u64, KernelError> {
    if args.len() != 3 {
        // println removed for no_std compatibility
    }

    let key = args[0] as i32;
    let size = args[1] as usize;
    let shmflg = args[2] as i32;

    // TODO: 实现shmget逻辑
    // println removed for no_std compatibility
    
    // 临时返回值
    Ok(1001) // 临时共享内存ID
}

/// shmat系统调用处理函数
/// 
/// 附加共享内存。
/// 
/// # 参数
/// 
/// * `args` - 系统调用参数：[shmid, shmaddr, shmflg]
/// 
/// # 返回值
/// 
/// * `Ok(u64)` - 附加的地址
/// * `Err(KernelError)` - 系统调用执行失败
pub fn handle_shmat(args: &[u64]) -> Result<u64, KernelError> {
    if args.len() != 3 {
        // println removed for no_std compatibility
    }

    let shmid = args[0] as i32;
    let shmaddr = args[1];
    let shmflg = args[2] as i32;

    // TODO: 实现shmat逻辑
    // println removed for no_std compatibility
    
    // 临时返回值
    Ok(0x60000000) // 临时共享内存地址
}

/// shmdt系统调用处理函数
/// 
/// 分离共享内存。
/// 
/// # 参数
/// 
/// * `args` - 系统调用参数：[shmaddr]
/// 
/// # 返回值
/// 
/// * `Ok(u64)` - 0表示成功
/// * `Err(KernelError)` - 系统调用执行失败
pub fn handle_shmdt(args: &[u64]) -> Result<u64, KernelError> {
    if args.len() != 1 {
        // println removed for no_std compatibility
    }

    let shmaddr = args[0];

    // TODO: 实现shmdt逻辑
    // println removed for no_std compatibility
    
    // 临时返回值
    Ok(0)
}

/// shmctl系统调用处理函数
/// 
/// 控制共享内存。
/// 
/// # 参数
/// 
/// * `args` - 系统调用参数：[shmid, cmd, buf_ptr]
/// 
/// # 返回值
/// 
/// * `Ok(u64)` - 操作结果
/// * `Err(KernelError)` - 系统调用执行失败
pub fn handle_shmctl(args: &[u64]) -> Result<u64, KernelError> {
    if args.len() != 3 {
        // println removed for no_std compatibility
    }

    let shmid = args[0] as i32;
    let cmd = args[1] as i32;
    let buf_ptr = args[2];

    // TODO: 实现shmctl逻辑
    // println removed for no_std compatibility
    
    // 临时返回值
    Ok(0)
}

/// msgget系统调用处理函数
/// 
/// 获取消息队列标识符。
/// 
/// # 参数
/// 
/// * `args` - 系统调用参数：[key, msgflg]
/// 
/// # 返回值
/// 
/// * `Ok(u64)` - 消息队列ID
/// * `Err(KernelError)` - 系统调用执行失败
pub fn handle_msgget(args: &[u64]) -> Result<u64, KernelError> {
    if args.len() != 2 {
        // println removed for no_std compatibility
    }

    let key = args[0] as i32;
    let msgflg = args[1] as i32;

    // TODO: 实现msgget逻辑
    // println removed for no_std compatibility
    
    // 临时返回值
    Ok(2001) // 临时消息队列ID
}

/// msgsnd系统调用处理函数
/// 
/// 发送消息到队列。
/// 
/// # 参数
/// 
/// * `args` - 系统调用参数：[msqid, msgp_ptr, msgsz, msgflg]
/// 
/// # 返回值
/// 
/// * `Ok(u64)` - 0表示成功
/// * `Err(KernelError)` - 系统调用执行失败
pub fn handle_msgsnd(args: &[u64]) -> Result<u64, KernelError> {
    if args.len() != 4 {
        // println removed for no_std compatibility
    }

    let msqid = args[0] as i32;
    let msgp_ptr = args[1];
    let msgsz = args[2] as usize;
    let msgflg = args[3] as i32;

    // TODO: 实现msgsnd逻辑
    // println removed for no_std compatibility
    
    // 临时返回值
    Ok(0)
}

/// msgrcv系统调用处理函数
/// 
/// 从队列接收消息。
/// 
/// # 参数
/// 
/// * `args` - 系统调用参数：[msqid, msgp_ptr, msgsz, msgtyp, msgflg]
/// 
/// # 返回值
/// 
/// * `Ok(u64)` - 接收的字节数
/// * `Err(KernelError)` - 系统调用执行失败
pub fn handle_msgrcv(args: &[u64]) -> Result<u64, KernelError> {
    if args.len() != 5 {
        // println removed for no_std compatibility
    }

    let msqid = args[0] as i32;
    let msgp_ptr = args[1];
    let msgsz = args[2] as usize;
    let msgtyp = args[3] as i64;
    let msgflg = args[4] as i32;

    // TODO: 实现msgrcv逻辑
    // println removed for no_std compatibility
    
    // 临时返回值
    Ok(0)
}

/// msgctl系统调用处理函数
/// 
/// 控制消息队列。
/// 
/// # 参数
/// 
/// * `args` - 系统调用参数：[msqid, cmd, buf_ptr]
/// 
/// # 返回值
/// 
/// * `Ok(u64)` - 操作结果
/// * `Err(KernelError)` - 系统调用执行失败
pub fn handle_msgctl(args: &[u64]) -> Result<u64, KernelError> {
    if args.len() != 3 {
        // println removed for no_std compatibility
    }

    let msqid = args[0] as i32;
    let cmd = args[1] as i32;
    let buf_ptr = args[2];

    // TODO: 实现msgctl逻辑
    // println removed for no_std compatibility
    
    // 临时返回值
    Ok(0)
}

/// semget系统调用处理函数
/// 
/// 获取信号量集标识符。
/// 
/// # 参数
/// 
/// * `args` - 系统调用参数：[key, nsems, semflg]
/// 
/// # 返回值
/// 
/// * `Ok(u64)` - 信号量集ID
/// * `Err(KernelError)` - 系统调用执行失败
pub fn handle_semget(args: &[u64]) -> Result<u64, KernelError> {
    if args.len() != 3 {
        // println removed for no_std compatibility
    }

    let key = args[0] as i32;
    let nsems = args[1] as i32;
    let semflg = args[2] as i32;

    // TODO: 实现semget逻辑
    // println removed for no_std compatibility
    
    // 临时返回值
    Ok(3001) // 临时信号量集ID
}

/// semop系统调用处理函数
/// 
/// 信号量操作。
/// 
/// # 参数
/// 
/// * `args` - 系统调用参数：[semid, sops_ptr, nsops]
/// 
/// # 返回值
/// 
/// * `Ok(u64)` - 操作结果
/// * `Err(KernelError)` - 系统调用执行失败
pub fn handle_semop(args: &[u64]) -> Result<u64, KernelError> {
    if args.len() != 3 {
        // println removed for no_std compatibility
    }

    let semid = args[0] as i32;
    let sops_ptr = args[1];
    let nsops = args[2] as usize;

    // TODO: 实现semop逻辑
    // println removed for no_std compatibility
    
    // 临时返回值
    Ok(0)
}

/// semctl系统调用处理函数
/// 
/// 控制信号量。
/// 
/// # 参数
/// 
/// * `args` - 系统调用参数：[semid, semnum, cmd, arg]
/// 
/// # 返回值
/// 
/// * `Ok(u64)` - 操作结果
/// * `Err(KernelError)` - 系统调用执行失败
pub fn handle_semctl(args: &[u64]) -> Result<u64, KernelError> {
    if args.len() != 4 {
        // println removed for no_std compatibility
    }

    let semid = args[0] as i32;
    let semnum = args[1] as i32;
    let cmd = args[2] as i32;
    let arg = args[3];

    // TODO: 实现semctl逻辑
    // println removed for no_std compatibility
    
    // 临时返回值
    Ok(0)
}

/// 获取IPC系统调用号映射
/// 
/// 返回IPC模块支持的系统调用号列表。
/// 
/// # 返回值
/// 
/// * `Vec<u32>` - 系统调用号列表
pub fn get_supported_syscalls() -> Vec<u32> {
    vec![
        // Linux系统调用号（x86_64）
        22,  // pipe
        33,  // mkfifo
        29,  // shmget
        30,  // shmat
        67,  // shmdt
        31,  // shmctl
        68,  // msgget
        69,  // msgsnd
        70,  // msgrcv
        71,  // msgctl
        64,  // semget
        65,  // semop
        66,  // semctl
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
        22 => handle_pipe(args),
        33 => handle_mkfifo(args),
        29 => handle_shmget(args),
        30 => handle_shmat(args),
        67 => handle_shmdt(args),
        31 => handle_shmctl(args),
        68 => handle_msgget(args),
        69 => handle_msgsnd(args),
        70 => handle_msgrcv(args),
        71 => handle_msgctl(args),
        64 => handle_semget(args),
        65 => handle_semop(args),
        66 => handle_semctl(args),
        _ => Err(KernelError::UnsupportedSyscall),
    }
}