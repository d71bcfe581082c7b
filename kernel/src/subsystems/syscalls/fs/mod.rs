//! 文件系统系统调用模块
//!
//! 本模块提供文件系统相关的系统调用处理。

use nos_api::{Result, interfaces::SyscallHandler};
use alloc::sync::Arc;

pub mod handlers;
pub mod journaling_handlers;
pub mod service;
pub mod types;
pub mod dispatch;

/// 文件系统系统调用处理器
pub struct FsSyscallHandler {
    // 实际实现中这里会有具体字段
}

impl FsSyscallHandler {
    /// 创建新的文件系统系统调用处理器
    pub fn new() -> Self {
        Self {}
    }
}

impl SyscallHandler for FsSyscallHandler {
    fn handle(&self, args: &[usize]) -> isize {
        // 占位符实现
        match args.get(0) {
            Some(&0) => self.sys_open(args),
            Some(&1) => self.sys_close(args),
            Some(&2) => self.sys_read(args),
            Some(&3) => self.sys_write(args),
            Some(&4) => self.sys_lseek(args),
            Some(&5) => self.sys_stat(args),
            // Journaling system calls
            Some(&10) => self.sys_journal_begin(args),
            Some(&11) => self.sys_journal_commit(args),
            Some(&12) => self.sys_journal_abort(args),
            Some(&13) => self.sys_journal_enable(args),
            Some(&14) => self.sys_journal_status(args),
            Some(&15) => self.sys_journal_stats(args),
            Some(&16) => self.sys_journal_checkpoint(args),
            Some(&17) => self.sys_journal_recovery_status(args),
            _ => -1,
        }
    }
    
    fn name(&self) -> &str {
        "fs_syscall_handler"
    }
    
    fn syscall_number(&self) -> usize {
        100 // 文件系统系统调用范围
    }
}

impl FsSyscallHandler {
    /// 打开文件
    fn sys_open(&self, _args: &[usize]) -> isize {
        // 占位符实现
        0
    }
    
    /// 关闭文件
    fn sys_close(&self, _args: &[usize]) -> isize {
        // 占位符实现
        0
    }
    
    /// 读取文件
    fn sys_read(&self, _args: &[usize]) -> isize {
        // 占位符实现
        0
    }
    
    /// 写入文件
    fn sys_write(&self, _args: &[usize]) -> isize {
        // 占位符实现
        0
    }
    
    /// 文件定位
    fn sys_lseek(&self, _args: &[usize]) -> isize {
        // 占位符实现
        0
    }
    
    /// 获取文件状态
    fn sys_stat(&self, _args: &[usize]) -> isize {
        // 占位符实现
        0
    }
    
    /// 开始日志事务
    fn sys_journal_begin(&self, _args: &[usize]) -> isize {
        // 占位符实现
        0
    }
    
    /// 提交日志事务
    fn sys_journal_commit(&self, _args: &[usize]) -> isize {
        // 占位符实现
        0
    }
    
    /// 中止日志事务
    fn sys_journal_abort(&self, _args: &[usize]) -> isize {
        // 占位符实现
        0
    }
    
    /// 启用/禁用日志记录
    fn sys_journal_enable(&self, _args: &[usize]) -> isize {
        // 占位符实现
        0
    }
    
    /// 获取日志状态
    fn sys_journal_status(&self, _args: &[usize]) -> isize {
        // 占位符实现
        0
    }
    
    /// 获取日志统计信息
    fn sys_journal_stats(&self, _args: &[usize]) -> isize {
        // 占位符实现
        0
    }
    
    /// 日志检查点
    fn sys_journal_checkpoint(&self, _args: &[usize]) -> isize {
        // 占位符实现
        0
    }
    
    /// 获取恢复状态
    fn sys_journal_recovery_status(&self, _args: &[usize]) -> isize {
        // 占位符实现
        0
    }
}

/// 创建文件系统系统调用处理器
pub fn create_fs_handler() -> Arc<dyn SyscallHandler> {
    Arc::new(FsSyscallHandler::new())
}