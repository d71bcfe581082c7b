//! 进程管理系统调用模块
//!
//! 本模块提供进程管理相关的系统调用处理。

use nos_api::{Result, interfaces::SyscallHandler};
use alloc::sync::Arc;

/// 进程管理系统调用处理器
pub struct ProcessSyscallHandler {
    // 实际实现中这里会有具体字段
}

impl ProcessSyscallHandler {
    /// 创建新的进程管理系统调用处理器
    pub fn new() -> Self {
        Self {}
    }
}

impl SyscallHandler for ProcessSyscallHandler {
    fn handle(&self, args: &[usize]) -> isize {
        // 占位符实现
        match args.get(0) {
            Some(&0) => self.sys_fork(args),
            Some(&1) => self.sys_exec(args),
            Some(&2) => self.sys_exit(args),
            Some(&3) => self.sys_wait(args),
            Some(&4) => self.sys_kill(args),
            Some(&5) => self.sys_getpid(args),
            _ => -1,
        }
    }
    
    fn name(&self) -> &str {
        "process_syscall_handler"
    }
    
    fn syscall_number(&self) -> usize {
        200 // 进程管理系统调用范围
    }
}

impl ProcessSyscallHandler {
    /// 创建子进程
    fn sys_fork(&self, _args: &[usize]) -> isize {
        // 占位符实现
        0
    }
    
    /// 执行程序
    fn sys_exec(&self, _args: &[usize]) -> isize {
        // 占位符实现
        0
    }
    
    /// 退出进程
    fn sys_exit(&self, _args: &[usize]) -> isize {
        // 占位符实现
        0
    }
    
    /// 等待子进程
    fn sys_wait(&self, _args: &[usize]) -> isize {
        // 占位符实现
        0
    }
    
    /// 终止进程
    fn sys_kill(&self, _args: &[usize]) -> isize {
        // 占位符实现
        0
    }
    
    /// 获取进程ID
    fn sys_getpid(&self, _args: &[usize]) -> isize {
        // 占位符实现
        0
    }
}

/// 创建进程管理系统调用处理器
pub fn create_process_handler() -> Arc<dyn SyscallHandler> {
    Arc::new(ProcessSyscallHandler::new())
}