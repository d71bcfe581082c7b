//! 文件系统系统调用服务实现
//! 
//! 本模块实现文件系统相关的系统调用服务，包括：
//! - 服务生命周期管理
//! - 系统调用分发和处理
//! - 与服务注册器的集成
//! - 虚拟文件系统管理

use crate::error_handling::unified::KernelError;
use crate::syscalls::fs::handlers;
use crate::syscalls::services::{Service, ServiceStatus, SyscallService};
use alloc::string::String;
use alloc::vec::Vec;

/// 文件系统系统调用服务
/// 
/// 实现SyscallService特征，提供文件系统相关的系统调用处理。
pub struct FileSystemService {
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
    /// 文件描述符表
    fd_table: Vec<crate::syscalls::fs::types::FileDescriptor>,
    /// 下一个可用的文件描述符
    next_fd: i32,
}

impl FileSystemService {
    /// 创建新的文件系统服务实例
    /// 
    /// # 返回值
    /// 
    /// * `Self` - 新的服务实例
    pub fn new() -> Self {
        Self {
            name: .to_string()("filesystem"),
            version: .to_string()("1.0.0"),
            description: .to_string()("File system syscall service"),
            status: ServiceStatus::Uninitialized,
            supported_syscalls: handlers::get_supported_syscalls(),
            fd_table: Vec::new(),
            next_fd: 3, // 从3开始，0、1、2保留给标准输入输出
        }
    }

    /// 获取文件系统统计信息
    /// 
    /// # 参数
    /// 
    /// * `path` - 文件系统路径
    /// 
    /// # 返回值
    /// 
    /// * `Result<FsStats, KernelError>` - 文件系统统计信息或错误
    pub fn get_fs_stats(&self, path: &str) -> Result<crate::syscalls::fs::types::FsStats, KernelError> {
        // TODO: 实现实际的文件系统统计信息收集
        // println removed for no_std compatibility
        Ok(crate::syscalls::fs::types::FsStats {
            fs_type: .to_string()("ext4"),
            total_blocks: 0,
            free_blocks: 0,
            used_blocks: 0,
            total_inodes: 0,
            free_inodes: 0,
            block_size: 4096,
            inode_size: 256,
        })
    }

    /// 获取文件信息
    /// 
    /// # 参数
    /// 
    /// * `path` - 文件路径
    /// 
    /// # 返回值
    /// 
    /// * `Result<Option<FileStatus>, KernelError>` - 文件状态信息或错误
    pub fn get_file_info(&self, path: &str) -> Result<Option<crate::syscalls::fs::types::FileStatus>, KernelError> {
        // TODO: 实现实际的文件信息查询
        // println removed for no_std compatibility
        Ok(None)
    }

    /// 列出目录内容
    /// 
    /// # 参数
    /// 
    /// * `path` - 目录路径
    /// 
    /// # 返回值
    /// 
    /// * `Result<Vec<DirEntry>, KernelError>` - 目录条目列表或错误
    pub fn list_directory(&self, path: &str) -> Result<Vec<crate::syscalls::fs::types::DirEntry>, KernelError> {
        // TODO: 实现实际的目录列表获取
        // println removed for no_std compatibility
        Ok(Vec::new())
    }

    /// 分配文件描述符
    /// 
    /// # 参数
    /// 
    /// * `path` - 文件路径
    /// * `mode` - 打开模式
    /// * `file_type` - 文件类型
    /// 
    /// # 返回值
    /// 
    /// * `Result<i32, KernelError>` - 文件描述符或错误
    pub fn allocate_fd(&mut self, path: String, mode: crate::syscalls::fs::types::OpenMode, file_type: crate::syscalls::fs::types::FileType) -> Result<i32, KernelError> {
        let fd = self.next_fd;
        self.next_fd += 1;

        let file_desc = crate::syscalls::fs::types::FileDescriptor {
            fd,
            path,
            file_type,
            open_mode: mode,
            offset: 0,
            permissions: crate::syscalls::fs::types::FilePermissions::default(),
            non_blocking: false,
            append_mode: matches!(mode, crate::syscalls::fs::types::OpenMode::Append),
        };

        // println removed for no_std compatibility
        // println removed for no_std compatibility
        Ok(fd)
    }

    /// 释放文件描述符
    /// 
    /// # 参数
    /// 
    /// * `fd` - 文件描述符
    /// 
    /// # 返回值
    /// 
    /// * `Result<(), KernelError>` - 操作结果
    pub fn deallocate_fd(&mut self, fd: i32) -> Result<(), KernelError> {
        if let Some(pos) = self.fd_table.iter().position(|desc| desc.fd == fd) {
            // println removed for no_std compatibility
            // println removed for no_std compatibility
            Ok(())
        } else {
            Err(KernelError::InvalidArgument)
        }
    }

    /// 获取文件描述符信息
    /// 
    /// # 参数
    /// 
    /// * `fd` - 文件描述符
    /// 
    /// # 返回值
    /// 
    /// * `Result<Option<&FileDescriptor>, KernelError>` - 文件描述符信息或错误
    pub fn get_fd_info(&self, fd: i32) -> Result<Option<&crate::syscalls::fs::types::FileDescriptor>, KernelError> {
        Ok(self.fd_table.iter().find(|desc| desc.fd == fd))
    }

    /// 创建文件
    /// 
    /// # 参数
    /// 
    /// * `params` - 文件操作参数
    /// 
    /// # 返回值
    /// 
    /// * `Result<i32, KernelError>` - 文件描述符或错误
    pub fn create_file(&mut self, params: crate::syscalls::fs::types::FileOperationParams) -> Result<i32, KernelError> {
        // TODO: 实现实际的文件创建
        // println removed for no_std compatibility
        self.allocate_fd(params.path, params.mode, crate::syscalls::fs::types::FileType::RegularFile)
    }

    /// 删除文件
    /// 
    /// # 参数
    /// 
    /// * `path` - 文件路径
    /// 
    /// # 返回值
    /// 
    /// * `Result<(), KernelError>` - 操作结果
    pub fn delete_file(&mut self, path: &str) -> Result<(), KernelError> {
        // TODO: 实现实际的文件删除
        // println removed for no_std compatibility
        Ok(())
    }

    /// 创建目录
    /// 
    /// # 参数
    /// 
    /// * `path` - 目录路径
    /// * `permissions` - 目录权限
    /// 
    /// # 返回值
    /// 
    /// * `Result<(), KernelError>` - 操作结果
    pub fn create_directory(&mut self, path: &str, permissions: crate::syscalls::fs::types::FilePermissions) -> Result<(), KernelError> {
        // TODO: 实现实际的目录创建
        // println removed for no_std compatibility
        Ok(())
    }

    /// 删除目录
    /// 
    /// # 参数
    /// 
    /// * `path` - 目录路径
    /// 
    /// # 返回值
    /// 
    /// * `Result<(), KernelError>` - 操作结果
    pub fn delete_directory(&mut self, path: &str) -> Result<(), KernelError> {
        // TODO: 实现实际的目录删除
        // println removed for no_std compatibility
        Ok(())
    }
}

impl Default for FileSystemService {
    fn default() -> Self {
        Self::new()
    }
}

impl Service for FileSystemService {
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
        crate::log_info!("Initializing FileSystemService");
        self.status = ServiceStatus::Initializing;
        
        // TODO: 初始化虚拟文件系统
        
        self.status = ServiceStatus::Initialized;
        crate::log_info!("FileSystemService initialized successfully");
        Ok(())
    }

    fn start(&mut self) -> Result<(), KernelError> {
        crate::log_info!("Starting FileSystemService");
        self.status = ServiceStatus::Starting;
        
        // TODO: 启动虚拟文件系统
        
        self.status = ServiceStatus::Running;
        crate::log_info!("FileSystemService started successfully");
        Ok(())
    }

    fn stop(&mut self) -> Result<(), KernelError> {
        crate::log_info!("Stopping FileSystemService");
        self.status = ServiceStatus::Stopping;
        
        // TODO: 停止虚拟文件系统
        
        self.status = ServiceStatus::Stopped;
        crate::log_info!("FileSystemService stopped successfully");
        Ok(())
    }

    fn destroy(&mut self) -> Result<(), KernelError> {
        crate::log_info!("Destroying FileSystemService");
        
        // TODO: 销毁虚拟文件系统
        
        self.status = ServiceStatus::Uninitialized;
        crate::log_info!("FileSystemService destroyed successfully");
        Ok(())
    }

    fn status(&self) -> ServiceStatus {
        self.status
    }

    fn dependencies(&self) -> Vec<&str> {
        // 文件系统服务可能依赖的模块
        vec!["memory", "block_device"]
    }
}

impl SyscallService for FileSystemService {
    fn supported_syscalls(&self) -> Vec<u32> {
        self.supported_syscalls.clone()
    }

    fn handle_syscall(&mut self, syscall_number: u32, args: &[u64]) -> Result<u64, KernelError> {
        // println removed for no_std compatibility
        
        // 分发到具体的处理函数
        handlers::dispatch_syscall(syscall_number, args)
    }

    fn priority(&self) -> u32 {
        60 // 文件系统服务优先级
    }
}

/// 文件系统服务工厂
/// 
/// 用于创建文件系统服务实例的工厂结构体。
pub struct FileSystemServiceFactory;

impl FileSystemServiceFactory {
    /// 创建文件系统服务实例
    /// 
    /// # 返回值
    /// 
    /// * `Box<dyn SyscallService>` - 文件系统服务实例
    pub fn create() -> Box<dyn SyscallService> {
        Box::new(FileSystemService::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fs_service_creation() {
        // println removed for no_std compatibility
        assert_eq!(service.name(), "filesystem");
        assert_eq!(service.version(), "1.0.0");
        assert_eq!(service.status(), ServiceStatus::Uninitialized);
        assert_eq!(service.next_fd, 3);
    }

    #[test]
    fn test_fs_service_lifecycle() {
        // println removed for no_std compatibility
        
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
    fn test_fd_allocation() {
        // println removed for no_std compatibility
        
        // 测试文件描述符分配
        let fd1 = service.allocate_fd(
            .to_string()("/test1.txt"),
            crate::syscalls::fs::types::OpenMode::ReadWrite,
            crate::syscalls::fs::types::FileType::RegularFile,
        // println removed for no_std compatibility
        assert_eq!(fd1, 3);
        
        let fd2 = service.allocate_fd(
            .to_string()("/test2.txt"),
            crate::syscalls::fs::types::OpenMode::ReadWrite,
            crate::syscalls::fs::types::FileType::RegularFile,
        // println removed for no_std compatibility
        assert_eq!(fd2, 4);
        
        // 测试文件描述符释放
        assert!(service.deallocate_fd(fd1).is_ok());
        assert!(service.get_fd_info(fd1).unwrap().is_none());
        assert!(service.get_fd_info(fd2).unwrap().is_some());
    }

    #[test]
    fn test_supported_syscalls() {
        // println removed for no_std compatibility
        // println removed for no_std compatibility
        assert!(!syscalls.is_empty());
        assert!(syscalls.contains(&2)); // open
        assert!(syscalls.contains(&3)); // close
    }
}