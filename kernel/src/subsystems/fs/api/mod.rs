//! Public API for the fs module.
//!
//! This module contains all the public interfaces and types for the fs
//! module. Internal implementation details are hidden.

extern crate alloc;

pub mod error;
pub mod types;
pub mod traits;

// Re-export the main API types and traits for convenience
pub use error::FsError;
pub use types::{
    FileHandle, DirEntry, DirEntryType, FileAttr, 
    PathComponent, PathComponentType
};
pub use traits::{
    FileOperations, DirectoryOperations, PathOperations
};

/// 文件系统操作接口
/// 
/// 提供基本的文件系统操作，如打开、读取、写入、关闭文件等
pub mod file_ops {
    use super::*;
    
    /// 打开文件
    /// 
    /// # 参数
    /// * `path` - 文件路径
    /// * `flags` - 打开标志
    /// * `mode` - 文件权限
    /// 
    /// # 返回值
    /// * `Result<FileHandle, FsError>` - 文件句柄或错误
    /// 
    /// # 契约
    /// * 验证路径有效性
    /// * 检查权限
    /// * 分配文件句柄
    /// * 更新进程文件描述符表
    pub fn open(path: &str, flags: u32, mode: u32) -> Result<FileHandle, FsError> {
        // Forward to the internal implementation
        match crate::fs::file_open(path, flags, mode) {
            Ok(fd) => Ok(FileHandle(fd as u32)),
            Err(_) => Err(FsError::PathNotFound),
        }
    }
    
    /// 读取文件
    /// 
    /// # 参数
    /// * `handle` - 文件句柄
    /// * `buffer` - 读取缓冲区
    /// * `offset` - 读取偏移
    /// * `count` - 读取字节数
    /// 
    /// # 返回值
    /// * `Result<usize, FsError>` - 实际读取字节数或错误
    /// 
    /// # 契约
    /// * 验证文件句柄有效性
    /// * 检查读取权限
    /// * 处理文件偏移
    /// * 更新文件访问时间
    pub fn read(handle: FileHandle, buffer: &mut [u8], offset: u64, count: usize) -> Result<usize, FsError> {
        // This is a simplified implementation. In a real system, we would:
        // 1. Check file handle validity
        // 2. Check read permissions
        // 3. Handle the offset
        // 4. Read from the file
        // 5. Update access time
        
        let fd = handle.0 as usize;
        // For now, use the existing file_read function
        let result = crate::fs::file_read(fd, buffer);
        if result < 0 {
            Err(FsError::IoError)
        } else {
            Ok(result as usize)
        }
    }
    
    /// 写入文件
    /// 
    /// # 参数
    /// * `handle` - 文件句柄
    /// * `buffer` - 写入缓冲区
    /// * `offset` - 写入偏移
    /// * `count` - 写入字节数
    /// 
    /// # 返回值
    /// * `Result<usize, FsError>` - 实际写入字节数或错误
    /// 
    /// # 契约
    /// * 验证文件句柄有效性
    /// * 检查写入权限
    /// * 处理文件偏移
    /// * 更新文件修改时间
    pub fn write(handle: FileHandle, buffer: &[u8], offset: u64, count: usize) -> Result<usize, FsError> {
        // This is a simplified implementation. In a real system, we would:
        // 1. Check file handle validity
        // 2. Check write permissions
        // 3. Handle the offset
        // 4. Write to the file
        // 5. Update modification time
        
        let fd = handle.0 as usize;
        // For now, use the existing file_write function
        let result = crate::fs::file_write(fd, buffer);
        if result < 0 {
            Err(FsError::IoError)
        } else {
            Ok(result as usize)
        }
    }
    
    /// 关闭文件
    /// 
    /// # 参数
    /// * `handle` - 文件句柄
    /// 
    /// # 返回值
    /// * `Result<(), FsError>` - 操作结果或错误
    /// 
    /// # 契约
    /// * 验证文件句柄有效性
    /// * 刷新缓冲区
    /// * 释放文件句柄
    /// * 更新进程文件描述符表
    pub fn close(handle: FileHandle) -> Result<(), FsError> {
        let fd = handle.0 as usize;
        crate::fs::file_close(fd);
        Ok(())
    }
}

/// 目录操作接口
/// 
/// 提供目录相关的操作，如创建、删除、读取目录等
pub mod dir_ops {
    use super::*;
    
    /// 创建目录
    /// 
    /// # 参数
    /// * `path` - 目录路径
    /// * `mode` - 目录权限
    /// 
    /// # 返回值
    /// * `Result<(), FsError>` - 操作结果或错误
    /// 
    /// # 契约
    /// * 验证路径有效性
    /// * 检查父目录权限
    /// * 创建目录条目
    /// * 更新父目录修改时间
    pub fn mkdir(path: &str, mode: u32) -> Result<(), FsError> {
        // Forward to internal implementation
        unimplemented!("mkdir not implemented")
    }
    
    /// 删除目录
    /// 
    /// # 参数
    /// * `path` - 目录路径
    /// 
    /// # 返回值
    /// * `Result<(), FsError>` - 操作结果或错误
    /// 
    /// # 契约
    /// * 验证路径有效性
    /// * 检查目录是否为空
    /// * 删除目录条目
    /// * 更新父目录修改时间
    pub fn rmdir(path: &str) -> Result<(), FsError> {
        // Forward to internal implementation
        unimplemented!("rmdir not implemented")
    }
    
    /// 读取目录
    /// 
    /// # 参数
    /// * `path` - 目录路径
    /// 
    /// # 返回值
    /// * `Result<Vec<DirEntry>, FsError>` - 目录条目列表或错误
    /// 
    /// # 契约
    /// * 验证路径有效性
    /// * 检查读取权限
    /// * 返回目录条目列表
    pub fn readdir(path: &str) -> Result<alloc::vec::Vec<DirEntry>, FsError> {
        // Forward to internal implementation
        unimplemented!("readdir not implemented")
    }
}

/// 文件属性操作接口
/// 
/// 提供文件属性查询和修改功能
pub mod attr_ops {
    use super::*;
    
    /// 获取文件属性
    /// 
    /// # 参数
    /// * `path` - 文件路径
    /// 
    /// # 返回值
    /// * `Result<FileAttr, FsError>` - 文件属性或错误
    /// 
    /// # 契约
    /// * 验证路径有效性
    /// * 检查读取权限
    /// * 返回标准POSIX文件属性
    pub fn stat(path: &str) -> Result<FileAttr, FsError> {
        // Forward to internal implementation
        unimplemented!("stat not implemented")
    }
    
    /// 设置文件权限
    /// 
    /// # 参数
    /// * `path` - 文件路径
    /// * `mode` - 文件权限
    /// 
    /// # 返回值
    /// * `Result<(), FsError>` - 操作结果或错误
    /// 
    /// # 契约
    /// * 验证路径有效性
    /// * 检查所有者权限
    /// * 更新文件权限
    pub fn chmod(path: &str, mode: u32) -> Result<(), FsError> {
        // Forward to internal implementation
        unimplemented!("chmod not implemented")
    }
    
    /// 设置文件所有者
    /// 
    /// # 参数
    /// * `path` - 文件路径
    /// * `uid` - 用户ID
    /// * `gid` - 组ID
    /// 
    /// # 返回值
    /// * `Result<(), FsError>` - 操作结果或错误
    /// 
    /// # 契约
    /// * 验证路径有效性
    /// * 检查所有者权限
    /// * 更新文件所有者
    pub fn chown(path: &str, uid: u32, gid: u32) -> Result<(), FsError> {
        // Forward to internal implementation
        unimplemented!("chown not implemented")
    }
}

/// 路径操作接口
/// 
/// 提供路径处理和转换功能
pub mod path_ops {
    use super::*;
    
    /// 获取当前工作目录
    /// 
    /// # 返回值
    /// * `Result<String, FsError>` - 当前工作目录路径或错误
    /// 
    /// # 契约
    /// * 返回绝对路径
    /// * 不暴露系统内部路径结构
    pub fn getcwd() -> Result<alloc::string::String, FsError> {
        // Forward to internal implementation
        unimplemented!("getcwd not implemented")
    }
    
    /// 更改当前工作目录
    /// 
    /// # 参数
    /// * `path` - 新工作目录路径
    /// 
    /// # 返回值
    /// * `Result<(), FsError>` - 操作结果或错误
    /// 
    /// # 契约
    /// * 验证路径有效性
    /// * 检查目录存在性
    /// * 更新进程工作目录
    pub fn chdir(path: &str) -> Result<(), FsError> {
        // Forward to internal implementation
        unimplemented!("chdir not implemented")
    }
    
    /// 规范化路径
    /// 
    /// # 参数
    /// * `path` - 待规范化的路径
    /// 
    /// # 返回值
    /// * `Result<String, FsError>` - 规范化后的路径或错误
    /// 
    /// # 契约
    /// * 处理相对路径
    /// * 解析符号链接
    /// * 消除冗余分隔符
    /// * 验证最终路径有效性
    pub fn normalize_path(path: &str) -> Result<alloc::string::String, FsError> {
        // Forward to internal implementation
        unimplemented!("normalize_path not implemented")
    }
}