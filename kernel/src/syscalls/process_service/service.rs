//! 进程系统调用服务实现
//! 
//! 本模块实现进程相关的系统调用服务，包括：
//! - 服务生命周期管理
//! - 系统调用分发和处理
//! - 与服务注册器的集成
//! - 进程状态管理

use crate::error_handling::unified::KernelError;
use crate::syscalls::process::handlers;
use crate::syscalls::services::{Service, ServiceStatus, SyscallService};
use alloc::string::String;
use alloc::vec::Vec;

/// 进程系统调用服务
/// 
/// 实现SyscallService特征，提供进程相关的系统调用处理。
pub struct ProcessService {
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
}

impl ProcessService {
    /// 创建新的进程服务实例
    /// 
    /// # 返回值
    /// 
    /// * `Self` - 新的服务实例
    pub fn new() -> Self {
        Self {
            name: .to_string()("process"),
            version: .to_string()("1.0.0"),
            description: .to_string()("Process management syscall service"),
            status: ServiceStatus::Uninitialized,
            supported_syscalls: handlers::get_supported_syscalls(),
        }
    }

    /// 获取服务统计信息
    /// 
    /// # 返回值
    /// 
    /// * `ProcessStats` - 进程统计信息
    pub fn get_process_stats(&self) -> crate::syscalls::process::types::ProcessStats {
        // TODO: 实现实际的统计信息收集
        crate::syscalls::process::types::ProcessStats {
            total_processes: 0,
            running_processes: 0,
            blocked_processes: 0,
            zombie_processes: 0,
            load_average: 0.0,
        }
    }

    /// 获取进程信息
    /// 
    /// # 参数
    /// 
    /// * `pid` - 进程ID
    /// 
    /// # 返回值
    /// 
    /// * `Result<Option<ProcessInfo>, KernelError>` - 进程信息或错误
    pub fn get_process_info(&self, pid: u32) -> Result<Option<crate::syscalls::process::types::ProcessInfo>, KernelError> {
        // TODO: 实现实际的进程信息查询
        // println removed for no_std compatibility
        Ok(None)
    }

    /// 列出所有进程
    /// 
    /// # 返回值
    /// 
    /// * `Result<Vec<ProcessInfo>, KernelError>` - 进程列表或错误
    pub fn list_processes(&self) -> Result<Vec<crate::syscalls::process::types::ProcessInfo>, KernelError> {
        // TODO: 实现实际的进程列表获取
        // println removed for no_std compatibility
        Ok(Vec::new())
    }

    /// 创建新进程
    /// 
    /// # 参数
    /// 
    /// * `params` - 进程创建参数
    /// 
    /// # 返回值
    /// 
    /// * `Result<u32, KernelError>` - 新进程ID或错误
    pub fn create_process(&mut self, params: crate::syscalls::process::types::ProcessCreateParams) -> Result<u32, KernelError> {
        // TODO: 实现实际的进程创建
        // println removed for no_std compatibility
        Ok(1001) // 临时PID
    }

    /// 终止进程
    /// 
    /// # 参数
    /// 
    /// * `pid` - 进程ID
    /// * `signal` - 终止信号
    /// 
    /// # 返回值
    /// 
    /// * `Result<(), KernelError>` - 操作结果
    pub fn terminate_process(&mut self, pid: u32, signal: i32) -> Result<(), KernelError> {
        // TODO: 实现实际的进程终止
        // println removed for no_std compatibility
        Ok(())
    }

    /// 等待进程
    /// 
    /// # 参数
    /// 
    /// * `pid` - 进程ID
    /// * `options` - 等待选项
    /// 
    /// # 返回值
    /// 
    /// * `Result<(u32, i32), KernelError>` - (进程ID, 退出码)或错误
    pub fn wait_process(&mut self, pid: i32, options: i32) -> Result<(u32, i32), KernelError> {
        // TODO: 实现实际的进程等待
        // println removed for no_std compatibility
        Ok((0, 0))
    }

    /// 设置进程优先级
    /// 
    /// # 参数
    /// 
    /// * `pid` - 进程ID
    /// * `priority` - 新优先级
    /// 
    /// # 返回值
    /// 
    /// * `Result<(), KernelError>` - 操作结果
    pub fn set_process_priority(&mut self, pid: u32, priority: crate::syscalls::process::types::ProcessPriority) -> Result<(), KernelError> {
        // TODO: 实现实际的优先级设置
        // println removed for no_std compatibility
        Ok(())
    }
}

impl Default for ProcessService {
    fn default() -> Self {
        Self::new()
    }
}

impl Service for ProcessService {
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
        crate::log_info!("Initializing ProcessService");
        self.status = ServiceStatus::Initializing;
        
        // TODO: 初始化进程管理器
        
        self.status = ServiceStatus::Initialized;
        crate::log_info!("ProcessService initialized successfully");
        Ok(())
    }

    fn start(&mut self) -> Result<(), KernelError> {
        crate::log_info!("Starting ProcessService");
        self.status = ServiceStatus::Starting;
        
        // TODO: 启动进程管理器
        
        self.status = ServiceStatus::Running;
        crate::log_info!("ProcessService started successfully");
        Ok(())
    }

    fn stop(&mut self) -> Result<(), KernelError> {
        crate::log_info!("Stopping ProcessService");
        self.status = ServiceStatus::Stopping;
        
        // TODO: 停止进程管理器
        
        self.status = ServiceStatus::Stopped;
        crate::log_info!("ProcessService stopped successfully");
        Ok(())
    }

    fn destroy(&mut self) -> Result<(), KernelError> {
        crate::log_info!("Destroying ProcessService");
        
        // TODO: 销毁进程管理器
        
        self.status = ServiceStatus::Uninitialized;
        crate::log_info!("ProcessService destroyed successfully");
        Ok(())
    }

    fn status(&self) -> ServiceStatus {
        self.status
    }

    fn dependencies(&self) -> Vec<&str> {
        // 进程服务可能依赖的模块
        vec!["memory", "scheduler"]
    }
}

impl SyscallService for ProcessService {
    fn supported_syscalls(&self) -> Vec<u32> {
        self.supported_syscalls.clone()
    }

    fn handle_syscall(&mut self, syscall_number: u32, args: &[u64]) -> Result<u64, KernelError> {
        // println removed for no_std compatibility
        
        // 分发到具体的处理函数
        handlers::dispatch_syscall(syscall_number, args)
    }

    fn priority(&self) -> u32 {
        50 // 进程服务优先级
    }
}

/// 进程服务工厂
/// 
/// 用于创建进程服务实例的工厂结构体。
pub struct ProcessServiceFactory;

impl ProcessServiceFactory {
    /// 创建进程服务实例
    /// 
    /// # 返回值
    /// 
    /// * `Box<dyn SyscallService>` - 进程服务实例
    pub fn create() -> Box<dyn SyscallService> {
        Box::new(ProcessService::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_process_service_creation() {
        // println removed for no_std compatibility
        assert_eq!(service.name(), "process");
        assert_eq!(service.version(), "1.0.0");
        assert_eq!(service.status(), ServiceStatus::Uninitialized);
    }

    #[test]
    fn test_process_service_lifecycle() {
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
    fn test_supported_syscalls() {
        // println removed for no_std compatibility
        // println removed for no_std compatibility
        assert!(!syscalls.is_empty());
        assert!(syscalls.contains(&57)); // fork
        assert!(syscalls.contains(&39)); // getpid
    }
}