//! 信号系统调用服务实现
//! 
//! 本模块实现信号相关的系统调用服务，包括：
//! - 服务生命周期管理
//! - 系统调用分发和处理
//! - 与服务注册器的集成
//! - 信号处理程序管理

use nos_nos_error_handling::unified::{Error, KernelError};
use crate::syscalls::signal::handlers;
use crate::syscalls::services::{Service, ServiceStatus, SyscallService};
use alloc::string::String;
use alloc::vec::Vec;

/// 信号系统调用服务
/// 
/// 实现SyscallService特征，提供信号相关的系统调用处理。
pub struct SignalService {
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
    /// 信号处理程序表
    signal_handlers: Vec<crate::syscalls::signal::types::SignalHandler>,
    /// 当前信号掩码
    current_mask: crate::syscalls::signal::types::SignalMask,
    /// 挂起的信号队列
    pending_signals: Vec<crate::syscalls::signal::types::SignalContext>,
    /// 信号统计
    signal_stats: crate::syscalls::signal::types::SignalStats,
}

impl SignalService {
    /// 创建新的信号服务实例
    /// 
    /// # 返回值
    /// 
    /// * `Self` - 新的服务实例
    pub fn new() -> Self {
        Self {
            name: String::from("signal"),
            version: String::from("1.0.0"),
            description: String::from("Signal syscall service"),
            status: ServiceStatus::Uninitialized,
            supported_syscalls: handlers::get_supported_syscalls(),
            signal_handlers: Vec::new(),
            current_mask: crate::syscalls::signal::types::SignalMask::new(),
            pending_signals: Vec::new(),
            signal_stats: crate::syscalls::signal::types::SignalStats {
                signals_sent: 0,
                signals_received: 0,
                blocked_signals: 0,
                handled_signals: 0,
                ignored_signals: 0,
                pending_signals: 0,
                realtime_signals: 0,
            },
        }
    }

    /// 获取信号统计信息
    /// 
    /// # 返回值
    /// 
    /// * `SignalStats` - 信号统计信息
    pub fn get_signal_stats(&self) -> crate::syscalls::signal::types::SignalStats {
        self.signal_stats.clone()
    }

    /// 获取信号处理程序
    /// 
    /// # 参数
    /// 
    /// * `signal` - 信号类型
    /// 
    /// # 返回值
    /// 
    /// * `Option<SignalHandler>` - 信号处理程序信息
    pub fn get_signal_handler(&self, signal: crate::syscalls::signal::types::SignalType) -> Option<crate::syscalls::signal::types::SignalHandler> {
        self.signal_handlers.iter().find(|h| h.signal_type == signal).cloned()
    }

    /// 列出所有信号处理程序
    /// 
    /// # 返回值
    /// 
    /// * `Vec<SignalHandler>` - 信号处理程序列表
    pub fn list_signal_handlers(&self) -> Vec<crate::syscalls::signal::types::SignalHandler> {
        self.signal_handlers.clone()
    }

    /// 注册信号处理程序
    /// 
    /// # 参数
    /// 
    /// * `signal` - 信号类型
    /// * `handler` - 信号处理程序信息
    /// 
    /// # 返回值
    /// 
    /// * `Result<(), SignalError>` - 操作结果
    pub fn register_signal_handler(&mut self, signal: crate::syscalls::signal::types::SignalType, handler: crate::syscalls::signal::types::SignalHandler) -> Result<(), crate::syscalls::signal::types::SignalError> {
        // 检查是否已存在处理程序
        if self.signal_handlers.iter().any(|h| h.signal_type == signal) {
            return Err(crate::syscalls::signal::types::SignalError::SignalExists);
        }

        let new_handler = crate::syscalls::signal::types::SignalHandler {
            signal_type: signal,
            handler_type: handler.handler_type,
            handler_address: handler.handler_address,
            handler_flags: handler.handler_flags,
            creator_pid: handler.creator_pid,
        };

        self.signal_handlers.push(new_handler);
        crate::log_debug!("Registered signal handler for signal: {:?}", signal);
        Ok(())
    }

    /// 注销信号处理程序
    /// 
    /// # 参数
    /// 
    /// * `signal` - 信号类型
    /// 
    /// # 返回值
    /// 
    /// * `Result<(), SignalError>` - 操作结果
    pub fn unregister_signal_handler(&mut self, signal: crate::syscalls::signal::types::SignalType) -> Result<(), crate::syscalls::signal::types::SignalError> {
        if let Some(pos) = self.signal_handlers.iter().position(|h| h.signal_type == signal) {
            self.signal_handlers.remove(pos);
            crate::log_debug!("Unregistered signal handler for signal: {:?}", signal);
            Ok(())
        } else {
            Err(crate::syscalls::signal::types::SignalError::InvalidSignal)
        }
    }

    /// 设置信号掩码
    /// 
    /// # 参数
    /// 
    /// * `mask` - 新的信号掩码
    /// 
    /// # 返回值
    /// 
    /// * `Result<(), SignalError>` - 操作结果
    pub fn set_signal_mask(&mut self, mask: crate::syscalls::signal::types::SignalMask) -> Result<(), crate::syscalls::signal::types::SignalError> {
        self.current_mask = mask;
        crate::log_debug!("Set signal mask: {:064b}", mask.mask);
        Ok(())
    }

    /// 获取当前信号掩码
    /// 
    /// # 返回值
    /// 
    /// * `SignalMask` - 当前信号掩码
    pub fn get_current_signal_mask(&self) -> crate::syscalls::signal::types::SignalMask {
        self.current_mask
    }

    /// 发送信号
    /// 
    /// # 参数
    /// 
    /// * `params` - 信号操作参数
    /// 
    /// # 返回值
    /// 
    /// * `Result<(), SignalError>` - 操作结果
    pub fn send_signal(&mut self, params: crate::syscalls::signal::types::SignalOperationParams) -> Result<(), crate::syscalls::signal::types::SignalError> {
        // TODO: 实现实际的信号发送
        crate::log_debug!("Sending signal to process {}: {:?}", params.target_pid, params.signal_type);
        
        // 更新统计
        self.signal_stats.signals_sent += 1;
        
        Ok(())
    }

    /// 等待信号
    /// 
    /// # 参数
    /// 
    /// * `mask` - 可选的信号掩码
    /// 
    /// # 返回值
    /// 
    /// * `Result<SignalContext, SignalError>` - 信号上下文或错误
    pub fn wait_for_signal(&mut self, mask: Option<crate::syscalls::signal::types::SignalMask>) -> Result<crate::syscalls::signal::types::SignalContext, crate::syscalls::signal::types::SignalError> {
        // TODO: 实现实际的信号等待
        crate::log_debug!("Waiting for signal with mask: {:?}", mask);
        
        // 更新统计
        self.signal_stats.handled_signals += 1;
        
        // 临时返回值
        Ok(crate::syscalls::signal::types::SignalContext {
            sender_pid: 0,
            sender_uid: 0,
            signal_value: 0,
            signal_code: 0,
            timestamp: 0,
            data_ptr: 0,
            context_flags: 0,
        })
    }

    /// 添加挂起的信号
    /// 
    /// # 参数
    /// 
    /// * `context` - 信号上下文
    pub fn add_pending_signal(&mut self, context: crate::syscalls::signal::types::SignalContext) {
        self.pending_signals.push(context);
        self.signal_stats.pending_signals += 1;
        crate::log_debug!("Added pending signal from process {}", context.sender_pid);
    }

    /// 处理挂起的信号
    /// 
    /// # 返回值
    /// 
    /// * `Vec<SignalContext>` - 处理的信号列表
    pub fn process_pending_signals(&mut self) -> Vec<crate::syscalls::signal::types::SignalContext> {
        let mut processed = Vec::new();
        
        for context in self.pending_signals.drain(..) {
            // TODO: 实现实际的信号处理
            crate::log_debug!("Processing pending signal: {:?}", context);
            processed.push(context);
            
            // 更新统计
            self.signal_stats.handled_signals += 1;
            self.signal_stats.pending_signals -= 1;
        }
        
        processed
    }

    /// 清除挂起的信号
    /// 
    /// # 参数
    /// 
    /// * `signal` - 可选的信号类型
    pub fn clear_pending_signals(&mut self, signal: Option<crate::syscalls::signal::types::SignalType>) -> Result<(), crate::syscalls::signal::types::SignalError> {
        if let Some(sig_type) = signal {
            let initial_count = self.pending_signals.len();
            self.pending_signals.retain(|ctx| {
                if let Ok(ctx_sig_type) = crate::syscalls::signal::types::SignalType::from_number(ctx.signal_code) {
                    ctx_sig_type != sig_type
                } else {
                    true
                }
            });
            
            let cleared_count = initial_count - self.pending_signals.len();
            crate::log_debug!("Cleared {} pending signals of type {:?}", cleared_count, sig_type);
            self.signal_stats.pending_signals -= cleared_count as u32;
        } else {
            // 清除所有挂起的信号
            let cleared_count = self.pending_signals.len();
            self.pending_signals.clear();
            crate::log_debug!("Cleared all {} pending signals", cleared_count);
            self.signal_stats.pending_signals = 0;
        }
        
        Ok(())
    }

    /// 获取挂起的信号数量
    /// 
    /// # 返回值
    /// 
    /// * `u32` - 挂起的信号数量
    pub fn get_pending_signal_count(&self) -> u32 {
        self.pending_signals.len() as u32
    }
}

impl Default for SignalService {
    fn default() -> Self {
        Self::new()
    }
}

impl Service for SignalService {
    fn name(&self) -> &str {
        &self.name
    }

    fn version(&self) -> &str {
        &self.version
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn initialize(&mut self) -> Result<()> {
        crate::log_info!("Initializing SignalService");
        self.status = ServiceStatus::Initializing;
        
        // TODO: 初始化信号管理器
        
        self.status = ServiceStatus::Initialized;
        crate::log_info!("SignalService initialized successfully");
        Ok(())
    }

    fn start(&mut self) -> Result<()> {
        crate::log_info!("Starting SignalService");
        self.status = ServiceStatus::Starting;
        
        // TODO: 启动信号管理器
        
        self.status = ServiceStatus::Running;
        crate::log_info!("SignalService started successfully");
        Ok(())
    }

    fn stop(&mut self) -> Result<()> {
        crate::log_info!("Stopping SignalService");
        self.status = ServiceStatus::Stopping;
        
        // TODO: 停止信号管理器
        
        self.status = ServiceStatus::Stopped;
        crate::log_info!("SignalService stopped successfully");
        Ok(())
    }

    fn destroy(&mut self) -> Result<()> {
        crate::log_info!("Destroying SignalService");
        
        // TODO: 销毁信号管理器
        
        self.status = ServiceStatus::Uninitialized;
        crate::log_info!("SignalService destroyed successfully");
        Ok(())
    }

    fn status(&self) -> ServiceStatus {
        self.status
    }

    fn dependencies(&self) -> Vec<&str> {
        // 信号服务可能依赖的模块
        vec!["process_manager", "scheduler"]
    }

    fn as_any_mut(&mut self) -> &mut dyn core::any::Any {
        self
    }
}

impl SyscallService for SignalService {
    fn supported_syscalls(&self) -> Vec<u32> {
        self.supported_syscalls.clone()
    }

    fn handle_syscall(&mut self, syscall_number: u32, args: &[u64]) -> Result<u64> {
        crate::log_debug!("SignalService handling syscall: {}", syscall_number);
        
        // 分发到具体的处理函数
        handlers::dispatch_syscall(syscall_number, args)
    }

    fn priority(&self) -> u32 {
        90 // 信号服务优先级
    }
}

/// 信号服务工厂
/// 
/// 用于创建信号服务实例的工厂结构体。
pub struct SignalServiceFactory;

impl SignalServiceFactory {
    /// 创建信号服务实例
    /// 
    /// # 返回值
    /// 
    /// * `Box<dyn SyscallService>` - 信号服务实例
    pub fn create() -> Box<dyn SyscallService> {
        Box::new(SignalService::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signal_service_creation() {
        let service = SignalService::new();
        assert_eq!(service.name(), "signal");
        assert_eq!(service.version(), "1.0.0");
        assert_eq!(service.status(), ServiceStatus::Uninitialized);
        assert_eq!(service.pending_signals.len(), 0);
    }

    #[test]
    fn test_signal_service_lifecycle() {
        let mut service = SignalService::new();
        
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
    fn test_signal_handler_registration() {
        let mut service = SignalService::new();
        
        let handler = crate::syscalls::signal::types::SignalHandler {
            signal_type: crate::syscalls::signal::types::SignalType::Standard(crate::syscalls::signal::types::StandardSignal::SIGTERM),
            handler_type: crate::syscalls::signal::types::SignalHandlerType::Catch,
            handler_address: 0x12345678,
            handler_flags: 0,
            creator_pid: 1000,
        };
        
        // 测试注册处理程序
        assert!(service.register_signal_handler(
            crate::syscalls::signal::types::SignalType::Standard(crate::syscalls::signal::types::StandardSignal::SIGTERM),
            handler.clone()
        ).is_ok());
        assert_eq!(service.signal_handlers.len(), 1);
        
        // 测试获取处理程序
        let retrieved = service.get_signal_handler(
            crate::syscalls::signal::types::SignalType::Standard(crate::syscalls::signal::types::StandardSignal::SIGTERM)
        ).unwrap();
        assert_eq!(retrieved.signal_type, handler.signal_type);
        
        // 测试重复注册
        assert!(service.register_signal_handler(
            crate::syscalls::signal::types::SignalType::Standard(crate::syscalls::signal::types::StandardSignal::SIGTERM),
            handler
        ).is_err());
    }

    #[test]
    fn test_signal_mask_operations() {
        let mut service = SignalService::new();
        
        let signal = crate::syscalls::signal::types::SignalType::Standard(crate::syscalls::signal::types::StandardSignal::SIGINT);
        
        // 测试设置掩码
        let mut mask = crate::syscalls::signal::types::SignalMask::new();
        assert!(mask.add_signal(signal));
        assert!(service.set_signal_mask(mask.clone()).is_ok());
        
        // 测试检查阻塞状态
        assert!(service.get_current_signal_mask().is_blocked(signal));
        
        // 测试移除信号
        assert!(mask.remove_signal(signal));
        assert!(service.set_signal_mask(mask).is_ok());
        assert!(!service.get_current_signal_mask().is_blocked(signal));
    }

    #[test]
    fn test_supported_syscalls() {
        let service = SignalService::new();
        let syscalls = service.supported_syscalls();
        assert!(!syscalls.is_empty());
        assert!(syscalls.contains(&62)); // kill
        assert!(syscalls.contains(&34)); // pause
    }
}