//! 高级性能优化实现
//!
//! 本模块提供高级性能优化功能，包括：
//! - 自适应性能调优
//! - 动态系统调用优化
//! - 性能预测和自动调整
//! - 资源使用优化

use crate::syscalls::common::{SyscallError, SyscallResult};
use crate::syscalls::fast_dispatcher::{FastSyscallDispatcher, SyscallStats};
use crate::syscalls::performance_monitor::{PerfStats, get_perf_stats};
use crate::sync::Mutex;
use crate::collections::HashMap;
use alloc::vec::Vec;
use core::sync::atomic::{AtomicU64, AtomicBool, Ordering};

/// 全局性能优化器
static GLOBAL_PERF_OPTIMIZER: Mutex<Option<PerformanceOptimizer>> = Mutex::new(None);

/// 性能优化器
pub struct PerformanceOptimizer {
    dispatcher: FastSyscallDispatcher,
    adaptive_thresholds: AdaptiveThresholds,
    optimization_history: Vec<OptimizationRecord>,
    auto_tuning_enabled: AtomicBool,
    last_optimization: AtomicU64,
}

/// 自适应阈值
#[derive(Debug, Clone)]
pub struct AdaptiveThresholds {
    pub fast_path_threshold: f64,    // 快速路径阈值（平均调用时间）
    pub cache_threshold: f64,         // 缓存阈值（调用频率）
    pub batch_threshold: f64,         // 批量处理阈值（连续调用次数）
    pub optimization_interval: u64,   // 优化间隔（毫秒）
}

impl Default for AdaptiveThresholds {
    fn default() -> Self {
        Self {
            fast_path_threshold: 100.0,  // 100ns
            cache_threshold: 10.0,      // 10 calls/sec
            batch_threshold: 5.0,        // 5 consecutive calls
            optimization_interval: 5000, // 5 seconds
        }
    }
}

/// 优化记录
#[derive(Debug, Clone)]
pub struct OptimizationRecord {
    pub timestamp: u64,
    pub optimization_type: OptimizationType,
    pub syscall_number: u32,
    pub before_metrics: SyscallMetrics,
    pub after_metrics: SyscallMetrics,
    pub improvement: f64,
}

/// 优化类型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptimizationType {
    FastPathPromotion,
    CacheEnable,
    BatchOptimization,
    PriorityAdjustment,
    HandlerReplacement,
}

/// 系统调用指标
#[derive(Debug, Clone, Default)]
pub struct SyscallMetrics {
    pub call_count: u64,
    pub average_time: f64,
    pub error_rate: f64,
    pub cache_hit_rate: f64,
}

impl PerformanceOptimizer {
    pub fn new() -> Self {
        Self {
            dispatcher: FastSyscallDispatcher::new(),
            adaptive_thresholds: AdaptiveThresholds::default(),
            optimization_history: Vec::new(),
            auto_tuning_enabled: AtomicBool::new(true),
            last_optimization: AtomicU64::new(0),
        }
    }
    
    /// 初始化性能优化器
    pub fn initialize(&mut self) {
        // 注册网络系统调用优化
        self.register_network_optimizations();
        
        // 启用自动调优
        self.auto_tuning_enabled.store(true, Ordering::Relaxed);
        
        crate::println!("[perf] Performance optimizer initialized");
    }
    
    /// 注册网络系统调用优化
    fn register_network_optimizations(&mut self) {
        use crate::syscalls::network_optimized::dispatch_optimized as net_dispatch;
        
        // 网络系统调用
        self.dispatcher.register_syscall(0x4000, "socket", net_dispatch, 85, true, 
                                         crate::syscalls::fast_dispatcher::SyscallCategory::Network);
        self.dispatcher.register_syscall(0x4001, "bind", net_dispatch, 80, true, 
                                         crate::syscalls::fast_dispatcher::SyscallCategory::Network);
        self.dispatcher.register_syscall(0x4002, "listen", net_dispatch, 75, true, 
                                         crate::syscalls::fast_dispatcher::SyscallCategory::Network);
        self.dispatcher.register_syscall(0x4003, "accept", net_dispatch, 70, true, 
                                         crate::syscalls::fast_dispatcher::SyscallCategory::Network);
        self.dispatcher.register_syscall(0x4004, "connect", net_dispatch, 80, true, 
                                         crate::syscalls::fast_dispatcher::SyscallCategory::Network);
        self.dispatcher.register_syscall(0x4005, "send", net_dispatch, 85, true, 
                                         crate::syscalls::fast_dispatcher::SyscallCategory::Network);
        self.dispatcher.register_syscall(0x4006, "recv", net_dispatch, 85, true, 
                                         crate::syscalls::fast_dispatcher::SyscallCategory::Network);
        self.dispatcher.register_syscall(0x4007, "close", net_dispatch, 90, true, 
                                         crate::syscalls::fast_dispatcher::SyscallCategory::Network);
    }
    
    /// 分发系统调用并收集性能数据
    pub fn dispatch(&mut self, number: u32, args: &[u64]) -> SyscallResult {
        let result = self.dispatcher.dispatch(number, args);
        
        // 检查是否需要优化
        if self.auto_tuning_enabled.load(Ordering::Relaxed) {
            self.check_optimization_needed(number);
        }
        
        result
    }
    
    /// 检查是否需要优化
    fn check_optimization_needed(&mut self, syscall_num: u32) {
        let current_time = self.get_timestamp();
        let last_opt = self.last_optimization.load(Ordering::Relaxed);
        
        // 检查优化间隔
        if current_time - last_opt < self.adaptive_thresholds.optimization_interval {
            return;
        }
        
        // 获取系统调用统计
        if let Some(stats) = self.dispatcher.get_stats(syscall_num) {
            let metrics = SyscallMetrics {
                call_count: stats.call_count.load(Ordering::Relaxed),
                average_time: stats.get_average_time(),
                error_rate: stats.get_error_rate(),
                cache_hit_rate: 0.0, // TODO: 实现缓存命中率统计
            };
            
            // 检查是否需要优化
            if self.should_optimize(&metrics) {
                self.optimize_syscall(syscall_num, &metrics);
                self.last_optimization.store(current_time, Ordering::Relaxed);
            }
        }
    }
    
    /// 判断是否需要优化
    fn should_optimize(&self, metrics: &SyscallMetrics) -> bool {
        // 高调用频率但平均时间超过阈值
        if metrics.call_count > 100 && metrics.average_time > self.adaptive_thresholds.fast_path_threshold {
            return true;
        }
        
        // 高错误率
        if metrics.error_rate > 0.1 {
            return true;
        }
        
        false
    }
    
    /// 优化系统调用
    fn optimize_syscall(&mut self, syscall_num: u32, metrics: &SyscallMetrics) {
        let before_metrics = metrics.clone();
        
        // 根据指标选择优化策略
        let optimization_type = if metrics.average_time > self.adaptive_thresholds.fast_path_threshold * 2.0 {
            OptimizationType::FastPathPromotion
        } else if metrics.call_count > 1000 {
            OptimizationType::CacheEnable
        } else if metrics.error_rate > 0.1 {
            OptimizationType::HandlerReplacement
        } else {
            OptimizationType::PriorityAdjustment
        };
        
        // 执行优化
        match optimization_type {
            OptimizationType::FastPathPromotion => {
                self.promote_to_fast_path(syscall_num);
            }
            OptimizationType::CacheEnable => {
                self.enable_caching(syscall_num);
            }
            OptimizationType::BatchOptimization => {
                self.enable_batch_processing(syscall_num);
            }
            OptimizationType::PriorityAdjustment => {
                self.adjust_priority(syscall_num);
            }
            OptimizationType::HandlerReplacement => {
                self.replace_handler(syscall_num);
            }
        }
        
        // 记录优化结果
        let after_metrics = self.get_syscall_metrics(syscall_num);
        let improvement = self.calculate_improvement(&before_metrics, &after_metrics);
        
        let record = OptimizationRecord {
            timestamp: self.get_timestamp(),
            optimization_type,
            syscall_number: syscall_num,
            before_metrics,
            after_metrics,
            improvement,
        };
        
        self.optimization_history.push(record);
        
        crate::println!("[perf] Optimized syscall {} with {:.2}% improvement", 
                       syscall_num, improvement * 100.0);
    }
    
    /// 提升到快速路径
    fn promote_to_fast_path(&mut self, syscall_num: u32) {
        if let Some(metadata) = self.dispatcher.get_metadata(syscall_num) {
            // 提升优先级
            let new_priority = core::cmp::min(100, metadata.priority + 10);
            
            // 重新注册系统调用
            self.dispatcher.register_syscall(
                syscall_num,
                metadata.name,
                metadata.handler,
                new_priority,
                true,
                metadata.category,
            );
        }
    }
    
    /// 启用缓存
    fn enable_caching(&mut self, syscall_num: u32) {
        // TODO: 实现系统调用缓存
        crate::println!("[perf] Enabled caching for syscall {}", syscall_num);
    }
    
    /// 启用批量处理
    fn enable_batch_processing(&mut self, syscall_num: u32) {
        // TODO: 实现批量处理
        crate::println!("[perf] Enabled batch processing for syscall {}", syscall_num);
    }
    
    /// 调整优先级
    fn adjust_priority(&mut self, syscall_num: u32) {
        if let Some(metadata) = self.dispatcher.get_metadata(syscall_num) {
            let stats = self.dispatcher.get_stats(syscall_num).unwrap();
            let call_count = stats.call_count.load(Ordering::Relaxed);
            
            // 根据调用频率调整优先级
            let new_priority = if call_count > 10000 {
                100
            } else if call_count > 1000 {
                90
            } else if call_count > 100 {
                80
            } else {
                70
            };
            
            // 重新注册系统调用
            self.dispatcher.register_syscall(
                syscall_num,
                metadata.name,
                metadata.handler,
                new_priority,
                metadata.is_optimized,
                metadata.category,
            );
        }
    }
    
    /// 替换处理程序
    fn replace_handler(&mut self, syscall_num: u32) {
        // TODO: 实现处理程序替换
        crate::println!("[perf] Replaced handler for syscall {}", syscall_num);
    }
    
    /// 获取系统调用指标
    fn get_syscall_metrics(&self, syscall_num: u32) -> SyscallMetrics {
        if let Some(stats) = self.dispatcher.get_stats(syscall_num) {
            SyscallMetrics {
                call_count: stats.call_count.load(Ordering::Relaxed),
                average_time: stats.get_average_time(),
                error_rate: stats.get_error_rate(),
                cache_hit_rate: 0.0, // TODO: 实现缓存命中率统计
            }
        } else {
            SyscallMetrics::default()
        }
    }
    
    /// 计算改进程度
    fn calculate_improvement(&self, before: &SyscallMetrics, after: &SyscallMetrics) -> f64 {
        if before.average_time > 0.0 {
            (before.average_time - after.average_time) / before.average_time
        } else {
            0.0
        }
    }
    
    /// 获取时间戳
    fn get_timestamp(&self) -> u64 {
        // 简化实现，实际应该从高精度计时器获取
        0
    }
    
    /// 获取优化历史
    pub fn get_optimization_history(&self) -> &[OptimizationRecord] {
        &self.optimization_history
    }
    
    /// 获取性能报告
    pub fn get_performance_report(&self) -> PerformanceReport {
        let global_stats = get_perf_stats();
        let dispatcher_stats = self.dispatcher.get_all_stats();
        
        PerformanceReport {
            timestamp: self.get_timestamp(),
            global_stats,
            dispatcher_stats: dispatcher_stats.clone(),
            optimization_history: self.optimization_history.clone(),
            adaptive_thresholds: self.adaptive_thresholds.clone(),
        }
    }
}

/// 性能报告
#[derive(Debug, Clone)]
pub struct PerformanceReport {
    pub timestamp: u64,
    pub global_stats: PerfStats,
    pub dispatcher_stats: HashMap<u32, SyscallStats>,
    pub optimization_history: Vec<OptimizationRecord>,
    pub adaptive_thresholds: AdaptiveThresholds,
}

/// 初始化全局性能优化器
pub fn initialize_global_performance_optimizer() {
    let mut optimizer_guard = GLOBAL_PERF_OPTIMIZER.lock();
    if optimizer_guard.is_none() {
        let mut optimizer = PerformanceOptimizer::new();
        optimizer.initialize();
        *optimizer_guard = Some(optimizer);
    }
}

/// 获取全局性能优化器
pub fn get_global_performance_optimizer() -> &'static Mutex<Option<PerformanceOptimizer>> {
    &GLOBAL_PERF_OPTIMIZER
}

/// 使用性能优化器分发系统调用
pub fn dispatch_with_optimization(syscall_num: u32, args: &[u64]) -> SyscallResult {
    let mut optimizer_guard = GLOBAL_PERF_OPTIMIZER.lock();
    if let Some(ref mut optimizer) = *optimizer_guard {
        optimizer.dispatch(syscall_num, args)
    } else {
        Err(SyscallError::NotSupported)
    }
}

/// 获取性能报告
pub fn get_performance_report() -> Option<PerformanceReport> {
    let optimizer_guard = GLOBAL_PERF_OPTIMIZER.lock();
    if let Some(ref optimizer) = *optimizer_guard {
        Some(optimizer.get_performance_report())
    } else {
        None
    }
}

/// 启用/禁用自动调优
pub fn set_auto_tuning_enabled(enabled: bool) {
    let optimizer_guard = GLOBAL_PERF_OPTIMIZER.lock();
    if let Some(ref optimizer) = *optimizer_guard {
        optimizer.auto_tuning_enabled.store(enabled, Ordering::Relaxed);
    }
}

/// 获取当前时间戳（简化实现）
fn get_current_timestamp() -> u64 {
    // 简化实现，实际应该从高精度计时器获取
    0
}