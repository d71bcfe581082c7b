//! IPC系统调用模块
//!
//! 本模块提供IPC相关的系统调用处理。

use nos_api::{Result, interfaces::SyscallHandler};
use alloc::sync::Arc;

pub mod enhanced_handlers;

/// IPC系统调用处理器
pub struct IpcSyscallHandler {
    // 实际实现中这里会有具体字段
}

impl IpcSyscallHandler {
    /// 创建新的IPC系统调用处理器
    pub fn new() -> Self {
        Self {}
    }
}

impl SyscallHandler for IpcSyscallHandler {
    fn handle(&self, args: &[usize]) -> isize {
        // 占位符实现
        match args.get(0) {
            Some(&0) => self.sys_pipe(args),
            Some(&1) => self.sys_msgget(args),
            Some(&2) => self.sys_msgsnd(args),
            Some(&3) => self.sys_msgrcv(args),
            Some(&4) => self.sys_semget(args),
            Some(&5) => self.sys_semop(args),
            Some(&6) => self.sys_shmget(args),
            Some(&7) => self.sys_shmat(args),
            // Enhanced IPC system calls
            Some(&10) => self.sys_enhanced_msgq_create(args),
            Some(&11) => self.sys_enhanced_msgq_send(args),
            Some(&12) => self.sys_enhanced_msgq_recv(args),
            Some(&13) => self.sys_enhanced_shm_create(args),
            Some(&14) => self.sys_enhanced_shm_attach(args),
            Some(&15) => self.sys_enhanced_shm_detach(args),
            Some(&16) => self.sys_enhanced_shm_delete(args),
            Some(&17) => self.sys_enhanced_sem_create(args),
            Some(&18) => self.sys_enhanced_sem_wait(args),
            Some(&19) => self.sys_enhanced_sem_signal(args),
            Some(&20) => self.sys_enhanced_mutex_create(args),
            Some(&21) => self.sys_enhanced_mutex_lock(args),
            Some(&22) => self.sys_enhanced_mutex_unlock(args),
            Some(&23) => self.sys_enhanced_cond_create(args),
            Some(&24) => self.sys_enhanced_cond_wait(args),
            Some(&25) => self.sys_enhanced_cond_signal(args),
            Some(&26) => self.sys_enhanced_cond_broadcast(args),
            Some(&27) => self.sys_enhanced_event_create(args),
            Some(&28) => self.sys_enhanced_event_wait(args),
            Some(&29) => self.sys_enhanced_event_trigger(args),
            Some(&30) => self.sys_enhanced_rpc_create_endpoint(args),
            Some(&31) => self.sys_enhanced_rpc_call(args),
            Some(&32) => self.sys_enhanced_rpc_complete(args),
            Some(&33) => self.sys_enhanced_rpc_get_result(args),
            _ => -1,
        }
    }
    
    fn name(&self) -> &str {
        "ipc_syscall_handler"
    }
    
    fn syscall_number(&self) -> usize {
        400 // IPC系统调用范围
    }
}

impl IpcSyscallHandler {
    /// 创建管道
    fn sys_pipe(&self, _args: &[usize]) -> isize {
        // 占位符实现
        0
    }
    
    /// 获取消息队列
    fn sys_msgget(&self, _args: &[usize]) -> isize {
        // 占位符实现
        0
    }
    
    /// 发送消息
    fn sys_msgsnd(&self, _args: &[usize]) -> isize {
        // 占位符实现
        0
    }
    
    /// 接收消息
    fn sys_msgrcv(&self, _args: &[usize]) -> isize {
        // 占位符实现
        0
    }
    
    /// 获取信号量
    fn sys_semget(&self, _args: &[usize]) -> isize {
        // 占位符实现
        0
    }
    
    /// 信号量操作
    fn sys_semop(&self, _args: &[usize]) -> isize {
        // 占位符实现
        0
    }
    
    /// 获取共享内存
    fn sys_shmget(&self, _args: &[usize]) -> isize {
        // 占位符实现
        0
    }
    
    /// 附加共享内存
    fn sys_shmat(&self, _args: &[usize]) -> isize {
        // 占位符实现
        0
    }
    
    /// 创建增强消息队列
    fn sys_enhanced_msgq_create(&self, args: &[usize]) -> isize {
        match enhanced_handlers::handle_enhanced_msgq_create(&args.iter().map(|&x| x as u64).collect::<Vec<_>>()) {
            Ok(result) => result as isize,
            Err(_) => -1,
        }
    }
    
    /// 发送增强消息
    fn sys_enhanced_msgq_send(&self, args: &[usize]) -> isize {
        match enhanced_handlers::handle_enhanced_msgq_send(&args.iter().map(|&x| x as u64).collect::<Vec<_>>()) {
            Ok(result) => result as isize,
            Err(_) => -1,
        }
    }
    
    /// 接收增强消息
    fn sys_enhanced_msgq_recv(&self, args: &[usize]) -> isize {
        match enhanced_handlers::handle_enhanced_msgq_recv(&args.iter().map(|&x| x as u64).collect::<Vec<_>>()) {
            Ok(result) => result as isize,
            Err(_) => -1,
        }
    }
    
    /// 创建增强共享内存
    fn sys_enhanced_shm_create(&self, args: &[usize]) -> isize {
        match enhanced_handlers::handle_enhanced_shm_create(&args.iter().map(|&x| x as u64).collect::<Vec<_>>()) {
            Ok(result) => result as isize,
            Err(_) => -1,
        }
    }
    
    /// 附加增强共享内存
    fn sys_enhanced_shm_attach(&self, args: &[usize]) -> isize {
        match enhanced_handlers::handle_enhanced_shm_attach(&args.iter().map(|&x| x as u64).collect::<Vec<_>>()) {
            Ok(result) => result as isize,
            Err(_) => -1,
        }
    }
    
    /// 分离增强共享内存
    fn sys_enhanced_shm_detach(&self, args: &[usize]) -> isize {
        match enhanced_handlers::handle_enhanced_shm_detach(&args.iter().map(|&x| x as u64).collect::<Vec<_>>()) {
            Ok(result) => result as isize,
            Err(_) => -1,
        }
    }
    
    /// 删除增强共享内存
    fn sys_enhanced_shm_delete(&self, args: &[usize]) -> isize {
        match enhanced_handlers::handle_enhanced_shm_delete(&args.iter().map(|&x| x as u64).collect::<Vec<_>>()) {
            Ok(result) => result as isize,
            Err(_) => -1,
        }
    }
    
    /// 创建增强信号量
    fn sys_enhanced_sem_create(&self, args: &[usize]) -> isize {
        match enhanced_handlers::handle_enhanced_sem_create(&args.iter().map(|&x| x as u64).collect::<Vec<_>>()) {
            Ok(result) => result as isize,
            Err(_) => -1,
        }
    }
    
    /// 等待增强信号量
    fn sys_enhanced_sem_wait(&self, args: &[usize]) -> isize {
        match enhanced_handlers::handle_enhanced_sem_wait(&args.iter().map(|&x| x as u64).collect::<Vec<_>>()) {
            Ok(result) => result as isize,
            Err(_) => -1,
        }
    }
    
    /// 信号增强信号量
    fn sys_enhanced_sem_signal(&self, args: &[usize]) -> isize {
        match enhanced_handlers::handle_enhanced_sem_signal(&args.iter().map(|&x| x as u64).collect::<Vec<_>>()) {
            Ok(result) => result as isize,
            Err(_) => -1,
        }
    }
    
    /// 创建增强互斥锁
    fn sys_enhanced_mutex_create(&self, args: &[usize]) -> isize {
        match enhanced_handlers::handle_enhanced_mutex_create(&args.iter().map(|&x| x as u64).collect::<Vec<_>>()) {
            Ok(result) => result as isize,
            Err(_) => -1,
        }
    }
    
    /// 锁定增强互斥锁
    fn sys_enhanced_mutex_lock(&self, args: &[usize]) -> isize {
        match enhanced_handlers::handle_enhanced_mutex_lock(&args.iter().map(|&x| x as u64).collect::<Vec<_>>()) {
            Ok(result) => result as isize,
            Err(_) => -1,
        }
    }
    
    /// 解锁增强互斥锁
    fn sys_enhanced_mutex_unlock(&self, args: &[usize]) -> isize {
        match enhanced_handlers::handle_enhanced_mutex_unlock(&args.iter().map(|&x| x as u64).collect::<Vec<_>>()) {
            Ok(result) => result as isize,
            Err(_) => -1,
        }
    }
    
    /// 创建增强条件变量
    fn sys_enhanced_cond_create(&self, args: &[usize]) -> isize {
        match enhanced_handlers::handle_enhanced_cond_create(&args.iter().map(|&x| x as u64).collect::<Vec<_>>()) {
            Ok(result) => result as isize,
            Err(_) => -1,
        }
    }
    
    /// 等待增强条件变量
    fn sys_enhanced_cond_wait(&self, args: &[usize]) -> isize {
        match enhanced_handlers::handle_enhanced_cond_wait(&args.iter().map(|&x| x as u64).collect::<Vec<_>>()) {
            Ok(result) => result as isize,
            Err(_) => -1,
        }
    }
    
    /// 信号增强条件变量
    fn sys_enhanced_cond_signal(&self, args: &[usize]) -> isize {
        match enhanced_handlers::handle_enhanced_cond_signal(&args.iter().map(|&x| x as u64).collect::<Vec<_>>()) {
            Ok(result) => result as isize,
            Err(_) => -1,
        }
    }
    
    /// 广播增强条件变量
    fn sys_enhanced_cond_broadcast(&self, args: &[usize]) -> isize {
        match enhanced_handlers::handle_enhanced_cond_broadcast(&args.iter().map(|&x| x as u64).collect::<Vec<_>>()) {
            Ok(result) => result as isize,
            Err(_) => -1,
        }
    }
    
    /// 创建增强事件
    fn sys_enhanced_event_create(&self, args: &[usize]) -> isize {
        match enhanced_handlers::handle_enhanced_event_create(&args.iter().map(|&x| x as u64).collect::<Vec<_>>()) {
            Ok(result) => result as isize,
            Err(_) => -1,
        }
    }
    
    /// 等待增强事件
    fn sys_enhanced_event_wait(&self, args: &[usize]) -> isize {
        match enhanced_handlers::handle_enhanced_event_wait(&args.iter().map(|&x| x as u64).collect::<Vec<_>>()) {
            Ok(result) => result as isize,
            Err(_) => -1,
        }
    }
    
    /// 触发增强事件
    fn sys_enhanced_event_trigger(&self, args: &[usize]) -> isize {
        match enhanced_handlers::handle_enhanced_event_trigger(&args.iter().map(|&x| x as u64).collect::<Vec<_>>()) {
            Ok(result) => result as isize,
            Err(_) => -1,
        }
    }
    
    /// 创建RPC端点
    fn sys_enhanced_rpc_create_endpoint(&self, args: &[usize]) -> isize {
        match enhanced_handlers::handle_enhanced_rpc_create_endpoint(&args.iter().map(|&x| x as u64).collect::<Vec<_>>()) {
            Ok(result) => result as isize,
            Err(_) => -1,
        }
    }
    
    /// 进行RPC调用
    fn sys_enhanced_rpc_call(&self, args: &[usize]) -> isize {
        match enhanced_handlers::handle_enhanced_rpc_call(&args.iter().map(|&x| x as u64).collect::<Vec<_>>()) {
            Ok(result) => result as isize,
            Err(_) => -1,
        }
    }
    
    /// 完成RPC调用
    fn sys_enhanced_rpc_complete(&self, args: &[usize]) -> isize {
        match enhanced_handlers::handle_enhanced_rpc_complete(&args.iter().map(|&x| x as u64).collect::<Vec<_>>()) {
            Ok(result) => result as isize,
            Err(_) => -1,
        }
    }
    
    /// 获取RPC调用结果
    fn sys_enhanced_rpc_get_result(&self, args: &[usize]) -> isize {
        match enhanced_handlers::handle_enhanced_rpc_get_result(&args.iter().map(|&x| x as u64).collect::<Vec<_>>()) {
            Ok(result) => result as isize,
            Err(_) => -1,
        }
    }
}

/// 创建IPC系统调用处理器
pub fn create_ipc_handler() -> Arc<dyn SyscallHandler> {
    Arc::new(IpcSyscallHandler::new())
}