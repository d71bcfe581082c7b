//! 优化服务实现
//!
//! 本模块提供系统优化服务，包括：
//! - 性能优化服务
//! - 调度器优化服务
//! - 零拷贝I/O优化服务
//! - 综合优化管理服务

use crate::syscalls::services::traits::*;
use crate::syscalls::services::registry::ServiceType;
use crate::syscalls::common::{SyscallError, SyscallResult};
use crate::syscalls::performance_optimized::{PerformanceOptimizer, get_global_performance_optimizer};
use crate::syscalls::scheduler_optimized::{OptimizedScheduler, get_global_optimized_scheduler};
use crate::syscalls::zero_copy_optimized::{ZeroCopyManager, get_global_zero_copy_manager};
use alloc::boxed::Box;
use alloc::string::{String, ToString};
use alloc::sync::Arc;
use spin::Mutex;

/// 性能优化服务
pub struct PerformanceOptimizationService {
    name: String,
    status: ServiceStatus,
    optimizer: Arc<Mutex<Option<PerformanceOptimizer>>>,
}

impl PerformanceOptimizationService {
    pub fn new() -> Self {
        Self {
            name: "performance_optimization".to_string(),
            status: ServiceStatus::Stopped,
            optimizer: unsafe { Arc::new(Mutex::new(None)) },
        }
    }
}

impl Service for PerformanceOptimizationService {
    fn name(&self) -> &str {
        &self.name
    }
    
    fn service_type(&self) -> ServiceType {
        ServiceType::Core
    }
    
    fn status(&self) -> ServiceStatus {
        self.status
    }
    
    fn start(&mut self) -> Result<(), ServiceError> {
        crate::println!("[service] Starting performance optimization service");
        
        // 初始化性能优化器
        let mut optimizer = PerformanceOptimizer::new();
        optimizer.initialize();
        
        // 存储到全局实例
        let global_optimizer = get_global_performance_optimizer();
        let mut guard = global_optimizer.lock();
        *guard = Some(optimizer);
        
        self.status = ServiceStatus::Running;
        Ok(())
    }
    
    fn stop(&mut self) -> Result<(), ServiceError> {
        crate::println!("[service] Stopping performance optimization service");
        self.status = ServiceStatus::Stopped;
        Ok(())
    }
    
    fn restart(&mut self) -> Result<(), ServiceError> {
        self.stop()?;
        self.start()
    }
    
    fn health_check(&self) -> Result<ServiceHealth, ServiceError> {
        let global_optimizer = get_global_performance_optimizer();
        let guard = global_optimizer.lock();
        
        if guard.is_some() {
            Ok(ServiceHealth::Healthy)
        } else {
            Ok(ServiceHealth::Degraded)
        }
    }
}

impl SyscallService for PerformanceOptimizationService {
    fn handle_syscall(&mut self, syscall_num: u32, args: &[u64]) -> Result<u64, ServiceError> {
        let global_optimizer = get_global_performance_optimizer();
        let mut guard = global_optimizer.lock();
        
        if let Some(ref mut optimizer) = *guard {
            match optimizer.dispatch(syscall_num, args) {
                Ok(result) => Ok(result),
                Err(error) => Err(ServiceError::SyscallFailed(error)),
            }
        } else {
            Err(ServiceError::NotInitialized)
        }
    }
    
    fn get_supported_syscalls(&self) -> Vec<u32> {
        vec![
            0x2000, // open
            0x2001, // close
            0x2002, // read
            0x2003, // write
            0x2004, // lseek
            0x2005, // fstat
            0x1000, // fork
            0x1001, // execve
            0x1002, // waitpid
            0x1003, // exit
            0x1004, // getpid
            0x1005, // getppid
            0x3000, // brk
            0x3001, // mmap
            0x3002, // munmap
            0x5000, // kill
            0x5001, // raise
            0x5002, // sigaction
            0x5003, // sigprocmask
            0x5004, // sigpending
            0x5005, // sigsuspend
            0x5006, // sigwait
        ]
    }
}

/// 调度器优化服务
pub struct SchedulerOptimizationService {
    name: String,
    status: ServiceStatus,
    scheduler: Arc<Mutex<Option<OptimizedScheduler>>>,
}

impl SchedulerOptimizationService {
    pub fn new() -> Self {
        Self {
            name: "scheduler_optimization".to_string(),
            status: ServiceStatus::Stopped,
            scheduler: unsafe { Arc::new(Mutex::new(None)) },
        }
    }
}

impl Service for SchedulerOptimizationService {
    fn name(&self) -> &str {
        &self.name
    }
    
    fn service_type(&self) -> ServiceType {
        ServiceType::Core
    }
    
    fn status(&self) -> ServiceStatus {
        self.status
    }
    
    fn start(&mut self) -> Result<(), ServiceError> {
        crate::println!("[service] Starting scheduler optimization service");
        
        // 初始化优化调度器
        let scheduler = OptimizedScheduler::new(4); // 假设4个CPU
        
        // 存储到全局实例
        let global_scheduler = get_global_optimized_scheduler();
        let mut guard = global_scheduler.lock();
        *guard = Some(scheduler);
        
        self.status = ServiceStatus::Running;
        Ok(())
    }
    
    fn stop(&mut self) -> Result<(), ServiceError> {
        crate::println!("[service] Stopping scheduler optimization service");
        self.status = ServiceStatus::Stopped;
        Ok(())
    }
    
    fn restart(&mut self) -> Result<(), ServiceError> {
        self.stop()?;
        self.start()
    }
    
    fn health_check(&self) -> Result<ServiceHealth, ServiceError> {
        let global_scheduler = get_global_optimized_scheduler();
        let guard = global_scheduler.lock();
        
        if guard.is_some() {
            Ok(ServiceHealth::Healthy)
        } else {
            Ok(ServiceHealth::Degraded)
        }
    }
}

impl SyscallService for SchedulerOptimizationService {
    fn handle_syscall(&mut self, syscall_num: u32, args: &[u64]) -> Result<u64, ServiceError> {
        let global_scheduler = get_global_optimized_scheduler();
        let mut guard = global_scheduler.lock();
        
        if let Some(ref mut scheduler) = *guard {
            match scheduler.dispatch_optimized(syscall_num, args) {
                Ok(result) => Ok(result),
                Err(error) => Err(ServiceError::SyscallFailed(error)),
            }
        } else {
            Err(ServiceError::NotInitialized)
        }
    }
    
    fn get_supported_syscalls(&self) -> Vec<u32> {
        vec![
            0xE010, // sched_yield_fast
            0xE011, // sched_enqueue_hint
        ]
    }
}

/// 零拷贝I/O优化服务
pub struct ZeroCopyOptimizationService {
    name: String,
    status: ServiceStatus,
    manager: Arc<Mutex<Option<ZeroCopyManager>>>,
}

impl ZeroCopyOptimizationService {
    pub fn new() -> Self {
        Self {
            name: "zero_copy_optimization".to_string(),
            status: ServiceStatus::Stopped,
            manager: unsafe { Arc::new(Mutex::new(None)) },
        }
    }
}

impl Service for ZeroCopyOptimizationService {
    fn name(&self) -> &str {
        &self.name
    }
    
    fn service_type(&self) -> ServiceType {
        ServiceType::Core
    }
    
    fn status(&self) -> ServiceStatus {
        self.status
    }
    
    fn start(&mut self) -> Result<(), ServiceError> {
        crate::println!("[service] Starting zero-copy optimization service");
        
        // 初始化零拷贝管理器
        let manager = ZeroCopyManager::new();
        
        // 存储到全局实例
        let global_manager = get_global_zero_copy_manager();
        let mut guard = global_manager.lock();
        *guard = Some(manager);
        
        self.status = ServiceStatus::Running;
        Ok(())
    }
    
    fn stop(&mut self) -> Result<(), ServiceError> {
        crate::println!("[service] Stopping zero-copy optimization service");
        self.status = ServiceStatus::Stopped;
        Ok(())
    }
    
    fn restart(&mut self) -> Result<(), ServiceError> {
        self.stop()?;
        self.start()
    }
    
    fn health_check(&self) -> Result<ServiceHealth, ServiceError> {
        let global_manager = get_global_zero_copy_manager();
        let guard = global_manager.lock();
        
        if guard.is_some() {
            Ok(ServiceHealth::Healthy)
        } else {
            Ok(ServiceHealth::Degraded)
        }
    }
}

impl SyscallService for ZeroCopyOptimizationService {
    fn handle_syscall(&mut self, syscall_num: u32, args: &[u64]) -> Result<u64, ServiceError> {
        let global_manager = get_global_zero_copy_manager();
        let mut guard = global_manager.lock();
        
        if let Some(ref mut manager) = *guard {
            match manager.dispatch_optimized(syscall_num, args) {
                Ok(result) => Ok(result),
                Err(error) => Err(ServiceError::SyscallFailed(error)),
            }
        } else {
            Err(ServiceError::NotInitialized)
        }
    }
    
    fn get_supported_syscalls(&self) -> Vec<u32> {
        vec![
            0x9000, // sendfile
            0x9001, // splice
            0x9002, // tee
            0x9003, // vmsplice
            0x9004, // copy_file_range
            0x9005, // sendfile64
            0x9006, // io_uring_setup
            0x9007, // io_uring_enter
            0x9008, // io_uring_register
        ]
    }
}

/// 综合优化管理服务
pub struct OptimizationManagerService {
    name: String,
    status: ServiceStatus,
    performance_service: Option<Box<PerformanceOptimizationService>>,
    scheduler_service: Option<Box<SchedulerOptimizationService>>,
    zerocopy_service: Option<Box<ZeroCopyOptimizationService>>,
}

impl OptimizationManagerService {
    pub fn new() -> Self {
        Self {
            name: "optimization_manager".to_string(),
            status: ServiceStatus::Stopped,
            performance_service: None,
            scheduler_service: None,
            zerocopy_service: None,
        }
    }
    
    pub fn get_performance_report(&self) -> Option<OptimizationReport> {
        use crate::syscalls::performance_optimized::get_performance_report;
        use crate::syscalls::scheduler_optimized::get_scheduler_performance_report;
        use crate::syscalls::zero_copy_optimized::get_zero_copy_performance_report;
        
        let performance_report = get_performance_report();
        let scheduler_report = get_scheduler_performance_report();
        let zerocopy_report = get_zero_copy_performance_report();
        
        if performance_report.is_some() || scheduler_report.is_some() || zerocopy_report.is_some() {
            Some(OptimizationReport {
                timestamp: crate::time::get_time_ns(),
                performance_report,
                scheduler_report,
                zerocopy_report,
            })
        } else {
            None
        }
    }
}

impl Service for OptimizationManagerService {
    fn name(&self) -> &str {
        &self.name
    }
    
    fn service_type(&self) -> ServiceType {
        ServiceType::Core
    }
    
    fn status(&self) -> ServiceStatus {
        self.status
    }
    
    fn start(&mut self) -> Result<(), ServiceError> {
        crate::println!("[service] Starting optimization manager service");
        
        // 创建并启动子服务
        let mut perf_service = Box::new(PerformanceOptimizationService::new());
        let mut sched_service = Box::new(SchedulerOptimizationService::new());
        let mut zerocopy_service = Box::new(ZeroCopyOptimizationService::new());
        
        perf_service.start()?;
        sched_service.start()?;
        zerocopy_service.start()?;
        
        self.performance_service = Some(perf_service);
        self.scheduler_service = Some(sched_service);
        self.zerocopy_service = Some(zerocopy_service);
        
        self.status = ServiceStatus::Running;
        Ok(())
    }
    
    fn stop(&mut self) -> Result<(), ServiceError> {
        crate::println!("[service] Stopping optimization manager service");
        
        // 停止子服务
        if let Some(ref mut service) = self.performance_service {
            service.stop()?;
        }
        if let Some(ref mut service) = self.scheduler_service {
            service.stop()?;
        }
        if let Some(ref mut service) = self.zerocopy_service {
            service.stop()?;
        }
        
        self.status = ServiceStatus::Stopped;
        Ok(())
    }
    
    fn restart(&mut self) -> Result<(), ServiceError> {
        self.stop()?;
        self.start()
    }
    
    fn health_check(&self) -> Result<ServiceHealth, ServiceError> {
        let mut healthy_count = 0;
        let mut total_count = 0;
        
        if let Some(ref service) = self.performance_service {
            total_count += 1;
            if service.health_check()? == ServiceHealth::Healthy {
                healthy_count += 1;
            }
        }
        
        if let Some(ref service) = self.scheduler_service {
            total_count += 1;
            if service.health_check()? == ServiceHealth::Healthy {
                healthy_count += 1;
            }
        }
        
        if let Some(ref service) = self.zerocopy_service {
            total_count += 1;
            if service.health_check()? == ServiceHealth::Healthy {
                healthy_count += 1;
            }
        }
        
        if healthy_count == total_count {
            Ok(ServiceHealth::Healthy)
        } else if healthy_count > 0 {
            Ok(ServiceHealth::Degraded)
        } else {
            Ok(ServiceHealth::Unhealthy)
        }
    }
}

/// 优化报告
#[derive(Debug, Clone)]
pub struct OptimizationReport {
    pub timestamp: u64,
    pub performance_report: Option<crate::syscalls::performance_optimized::PerformanceReport>,
    pub scheduler_report: Option<crate::syscalls::scheduler_optimized::SchedulerPerformanceReport>,
    pub zerocopy_report: Option<crate::syscalls::zero_copy_optimized::ZeroCopyPerformanceReport>,
}

/// 服务工厂实现
pub struct OptimizationServiceFactory;

impl ServiceFactory for OptimizationServiceFactory {
    fn create_performance_service(&self) -> Box<dyn Service> {
        Box::new(PerformanceOptimizationService::new())
    }
    
    fn create_scheduler_service(&self) -> Box<dyn Service> {
        Box::new(SchedulerOptimizationService::new())
    }
    
    fn create_zerocopy_service(&self) -> Box<dyn Service> {
        Box::new(ZeroCopyOptimizationService::new())
    }
    
    fn create_manager_service(&self) -> Box<dyn Service> {
        Box::new(OptimizationManagerService::new())
    }
}