//! 文件系统系统调用处理函数
//! 
//! 本模块包含文件系统相关系统调用的具体实现逻辑，包括：
//! - 文件和目录操作
//! - 文件描述符管理
//! - 文件权限和属性操作
//! - 虚拟文件系统接口调用

use crate::error_handling::unified::KernelError;
use crate::syscalls::fs::types::*;
use alloc::vec::Vec;

/// open系统调用处理函数
/// 
/// 打开或创建文件。
/// 
/// # 参数
/// 
/// * `args` - 系统调用参数：[pathname_ptr, flags, mode]
/// 
/// # 返回值
/// 
/// * `Ok(u64)` - 文件描述符
/// * `Err(KernelError)` - 系统调用执行失败
pub fn handle_open(args: &[u64]) -> Result<u64, KernelError> {
    if args.len() != 3 {
        // println removed for no_std compatibility
    }

    let pathname_ptr = args[0];
    let flags = args[1] as i32;
    let mode = args[2] as u32;

    // TODO: 实现open逻辑
                pathname_ptr, flags, mode);
    
    // 临时返回值
    Ok(3) // 临时文件描述符
}

/// close系统调用处理函数
/// 
/// 关闭文件描述符。
/// 
/// # 参数
/// 
/// * `args` - 系统调用参数：[fd]
/// 
/// # 返回值
/// 
/// * `Ok(u64)` - 0表示成功
/// * `Err(KernelError)` - 系统调用执行失败
pub fn handle_close(args: &[u64]) -> Result<u64, KernelError> {
    if args.len() != 1 {
        // println removed for no_std compatibility
    }

    let fd = args[0] as i32;

    // TODO: 实现close逻辑
    // println removed for no_std compatibility
    
    // 临时返回值
    Ok(0)
}

/// read系统调用处理函数
/// 
/// 从文件描述符读取数据。
/// 
/// # 参数
/// 
/// * `args` - 系统调用参数：[fd, buf_ptr, count]
/// 
/// # 返回值
/// 
/// * `Ok(u64)` - 读取的字节数
/// * `Err(KernelError)` - 系统调用执行失败
pub fn handle_read(args: &[u64]) -> Result<u64, KernelError> {
    if args.len() != 3 {
        // println removed for no_std compatibility
    }

    let fd = args[0] as i32;
    let buf_ptr = args[1];
    let count = args[2] as usize;

    // TODO: 实现read逻辑
                fd, buf_ptr, count);
    
    // 临时返回值
    Ok(0)
}

/// write系统调用处理函数
/// 
/// 向文件描述符写入数据。
/// 
/// # 参数
/// 
/// * `args` - 系统调用参数：[fd, buf_ptr, count]
/// 
/// # 返回值
/// 
/// * `Ok(u64)` - 写入的字节数
/// * `Err(KernelError)` - 系统调用执行失败
pub fn handle_write(args: &[u64]) -> Result<u64, KernelError> {
    if args.len() != 3 {
        // println removed for no_std compatibility
    }

    let fd = args[0] as i32;
    let buf_ptr = args[1];
    let count = args[2] as usize;

    // TODO: 实现write逻辑
                fd, buf_ptr, count);
    
    // 临时返回值
    Ok(0)
}

/// lseek系统调用处理函数
/// 
/// 重新定位文件读写位置。
/// 
/// # 参数
/// 
/// * `args` - 系统调用参数：[fd, offset, whence]
/// 
/// # 返回值
/// 
/// * `Ok(u64)` - 新的文件位置
/// * `Err(KernelError)` - 系统调用执行失败
pub fn handle_lseek(args: &[u64]) -> Result<u64, KernelError> {
    if args.len() != 3 {
        // println removed for no_std compatibility
    }

    let fd = args[0] as i32;
    let offset = args[1] as i64;
    let whence = args[2] as i32;

    // TODO: 实现lseek逻辑
                fd, offset, whence);
    
    // 临时返回值
    Ok(0)
}

/// stat系统调用处理函数
/// 
/// 获取文件状态信息。
/// 
/// # 参数
/// 
/// * `args` - 系统调用参数：[pathname_ptr, statbuf_ptr]
/// 
/// # 返回值
/// 
/// * `Ok(u64)` - 0表示成功
/// * `Err(KernelError)` - 系统调用执行失败
pub fn handle_stat(args: &[u64]) -> Result<u64, KernelError> {
    if args.len() != 2 {
        // println removed for no_std compatibility
    }

    let pathname_ptr = args[0];
    let statbuf_ptr = args[1];

    // TODO: 实现stat逻辑
                pathname_ptr, statbuf_ptr);
    
    // 临时返回值
    Ok(0)
}

/// fstat系统调用处理函数
/// 
/// 获取文件描述符状态信息。
/// 
/// # 参数
/// 
/// * `args` - 系统调用参数：[fd, statbuf_ptr]
/// 
/// # 返回值
/// 
/// * `Ok(u64)` - 0表示成功
/// * `Err(KernelError)` - 系统调用执行失败
pub fn handle_fstat(args: &[u64]) -> Result<u64, KernelError> {
    if args.len() != 2 {
        // println removed for no_std compatibility
    }

    let fd = args[0] as i32;
    let statbuf_ptr = args[1];

    // TODO: 实现fstat逻辑
    // println removed for no_std compatibility
    
    // 临时返回值
    Ok(0)
}

/// mkdir系统调用处理函数
/// 
/// 创建目录。
/// 
/// # 参数
/// 
/// * `args` - 系统调用参数：[pathname_ptr, mode]
/// 
/// # 返回值
/// 
/// * `Ok(u64)` - 0表示成功
/// * `Err(KernelError)` - 系统调用执行失败
pub fn handle_mkdir(args: &[u64]) -> Result<u64, KernelError> {
    if args.len() != 2 {
        // println removed for no_std compatibility
    }

    let pathname_ptr = args[0];
    let mode = args[1] as u32;

    // TODO: 实现mkdir逻辑
    // println removed for no_std compatibility
    
    // 临时返回值
    Ok(0)
}

/// rmdir系统调用处理函数
/// 
/// 删除目录。
/// 
/// # 参数
/// 
/// * `args` - 系统调用参数：[pathname_ptr]
/// 
/// # 返回值
/// 
/// * `Ok(u64)` - 0表示成功
/// * `Err(KernelError)` - 系统调用执行失败
pub fn handle_rmdir(args: &[u64]) -> Result<u64, KernelError> {
    if args.len() != 1 {
        // println removed for no_std compatibility
    }

    let pathname_ptr = args[0];

    // TODO: 实现rmdir逻辑
    // println removed for no_std compatibility
    
    // 临时返回值
    Ok(0)
}

/// unlink系统调用处理函数
/// 
/// 删除文件链接。
/// 
/// # 参数
/// 
/// * `args` - 系统调用参数：[pathname_ptr]
/// 
/// # 返回值
/// 
/// * `Ok(u64)` - 0表示成功
/// * `Err(KernelError)` - 系统调用执行失败
pub fn handle_unlink(args: &[u64]) -> Result<u64, KernelError> {
    if args.len() != 1 {
        // println removed for no_std compatibility
    }

    let pathname_ptr = args[0];

    // TODO: 实现unlink逻辑
    // println removed for no_std compatibility
    
    // 临时返回值
    Ok(0)
}

/// getdents系统调用处理函数
/// 
/// 获取目录条目。
/// 
/// # 参数
/// 
/// * `args` - 系统调用参数：[fd, dirp_ptr, count]
/// 
/// # 返回值
/// 
/// * `Ok(u64)` - 读取的字节数
/// * `Err(KernelError)` - 系统调用执行失败
pub fn handle_getdents(args: &[u64]) -> Result<u64, KernelError> {
    if args.len() != 3 {
        // println removed for no_std compatibility
    }

    let fd = args[0] as i32;
    let dirp_ptr = args[1];
    let count = args[2] as usize;

    // TODO: 实现getdents逻辑
                fd, dirp_ptr, count);
    
    // 临时返回值
    Ok(0)
}

/// chmod系统调用处理函数
/// 
/// 修改文件权限。
/// 
/// # 参数
/// 
/// * `args` - 系统调用参数：[pathname_ptr, mode]
/// 
/// # 返回值
/// 
/// * `Ok(u64)` - 0表示成功
/// * `Err(KernelError)` - 系统调用执行失败
pub fn handle_chmod(args: &[u64]) -> Result<u64, KernelError> {
    if args.len() != 2 {
        // println removed for no_std compatibility
    }

    let pathname_ptr = args[0];
    let mode = args[1] as u32;

    // TODO: 实现chmod逻辑
    // println removed for no_std compatibility
    
    // 临时返回值
    Ok(0)
}

/// 获取文件系统系统调用号映射
/// 
/// 返回文件系统模块支持的系统调用号列表。
/// 
/// # 返回值
/// 
/// * `Vec<u32>` - 系统调用号列表
pub fn get_supported_syscalls() -> Vec<u32> {
    vec![
        // Linux系统调用号（x86_64）
        2,   // open
        3,   // close
        0,   // read
        1,   // write
        8,   // lseek
        4,   // stat
        5,   // fstat
        83,  // mkdir
        84,  // rmdir
        87,  // unlink
        78,  // getdents
        90,  // chmod
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
        2 => handle_open(args),
        3 => handle_close(args),
        0 => handle_read(args),
        1 => handle_write(args),
        8 => handle_lseek(args),
        4 => handle_stat(args),
        5 => handle_fstat(args),
        83 => handle_mkdir(args),
        84 => handle_rmdir(args),
        87 => handle_unlink(args),
        78 => handle_getdents(args),
        90 => handle_chmod(args),
        _ => Err(KernelError::UnsupportedSyscall),
    }
}