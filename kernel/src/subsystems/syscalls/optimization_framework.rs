//! 统一性能优化框架
//!
//! **NOTE**: This module is being integrated into the unified dispatcher.
//! Some functionality may be deprecated in favor of UnifiedSyscallDispatcher.
//!
//! 本模块提供统一的性能优化框架，包括：
//! - 自适应优化策略
//! - 动态性能调优
//! - 优化效果评估
//! - 优化策略管理

// use crate::syscalls::common::{SyscallError, SyscallResult};
use alloc::boxed::Box;
use alloc::string::String;
use crate::syscalls::optimization_core::{
    UnifiedSyscallStats, OptimizationConfig
};
// DEPRECATED: This module references old unified_dispatcher
// TODO: Update to use new unified dispatcher from dispatch::unified
// use crate::subsystems::syscalls::dispatch::unified::{UnifiedSyscallDispatcher};
use crate::syscalls::optimization_core::UnifiedSyscallStats;
use alloc::collections::BTreeMap;
use alloc::sync::Arc;
use alloc::vec::Vec;
use core::sync::atomic::{AtomicU64, Ordering};
use spin::Mutex;

/// 优化策略特征
pub trait OptimizationStrategy: Send + Sync {
    /// 策略名称
    fn name(&self) -> &str;
    
    /// 策略优先级
    fn priority(&self) -> u8;
    
    /// 判断是否应该应用此策略
    fn should_apply(&self, stats: &UnifiedSyscallStats) -> bool;
    
    /// 应用优化策略
    fn apply(&self, context: &mut OptimizationContext) -> Result<OptimizationResult, OptimizationError>;
    
    /// 评估优化效果
    fn evaluate(&self, before: &UnifiedSyscallStats, after: &UnifiedSyscallStats) -> f64;
}

/// 优化上下文
pub struct OptimizationContext {
    /// 系统调用号
    pub syscall_num: u32,
    /// 当前统计信息
    pub current_stats: UnifiedSyscallStats,
    /// 优化配置
    pub config: OptimizationConfig,
    /// 分发器引用
    pub dispatcher: Option<Arc<Mutex<UnifiedDispatcher>>>,
    /// 优化历史
    pub optimization_history: Vec<OptimizationRecord>,
}

/// 优化结果
#[derive(Debug, Clone)]
pub struct OptimizationResult {
    /// 是否成功
    pub success: bool,
    /// 优化类型
    pub optimization_type: OptimizationType,
    /// 优化描述
    pub description: String,
    /// 预期改进百分比
    pub expected_improvement: f64,
    /// 优化参数
    pub parameters: BTreeMap<String, String>,
}

/// 优化记录
#[derive(Debug, Clone)]
pub struct OptimizationRecord {
    /// 时间戳
    pub timestamp: u64,
    /// 系统调用号
    pub syscall_num: u32,
    /// 优化策略
    pub strategy: String,
    /// 优化类型
    pub optimization_type: OptimizationType,
    /// 优化前统计
    pub before_stats: UnifiedSyscallStats,
    /// 优化后统计
    pub after_stats: UnifiedSyscallStats,
    /// 实际改进百分比
    pub actual_improvement: f64,
    /// 是否成功
    pub success: bool,
}

/// 优化类型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptimizationType {
    /// 快速路径优化
    FastPath,
    /// 缓存优化
    Caching,
    /// 批处理优化
    Batching,
    /// 零拷贝优化
    ZeroCopy,
    /// 预取优化
    Prefetching,
    /// 并行化优化
    Parallelization,
    /// 内存布局优化
    MemoryLayout,
    /// 算法优化
    Algorithm,
}

/// 优化错误
#[derive(Debug, Clone)]
pub enum OptimizationError {
    /// 不支持的操作
    UnsupportedOperation,
    /// 资源不足
    InsufficientResources,
    /// 配置错误
    ConfigurationError(String),
    /// 内部错误
    InternalError(String),
}

/// 快速路径优化策略
pub struct FastPathOptimization {
    priority: u8,
    threshold_ns: u64,
}

impl FastPathOptimization {
    pub fn new(priority: u8, threshold_ns: u64) -> Self {
        Self { priority, threshold_ns }
    }
}

impl OptimizationStrategy for FastPathOptimization {
    fn name(&self) -> &str {
        "fast_path"
    }
    
    fn priority(&self) -> u8 {
        self.priority
    }
    
    fn should_apply(&self, stats: &UnifiedSyscallStats) -> bool {
        stats.get_average_time_ns() > self.threshold_ns as f64
    }
    
    fn apply(&self, context: &mut OptimizationContext) -> Result<OptimizationResult, OptimizationError> {
        // 提升处理器优先级
        if let Some(ref dispatcher) = context.dispatcher {
            let mut dispatcher = dispatcher.lock();
            // 这里应该实现优先级提升逻辑
            // 暂时返回成功结果
        }
        
        Ok(OptimizationResult {
            success: true,
            optimization_type: OptimizationType::FastPath,
            description: alloc::string::String::from("Promoted to fast path"),
            expected_improvement: 0.3, // 预期30%改进
            parameters: {
                let mut params = BTreeMap::new();
                params.insert(alloc::string::String::from("priority"), alloc::string::String::from("high"));
                params
            },
        })
    }
    
    fn evaluate(&self, before: &UnifiedSyscallStats, after: &UnifiedSyscallStats) -> f64 {
        let before_time = before.get_average_time_ns();
        let after_time = after.get_average_time_ns();
        
        if before_time > 0.0 {
            (before_time - after_time) / before_time
        } else {
            0.0
        }
    }
}

/// 缓存优化策略
pub struct CachingOptimization {
    priority: u8,
    min_call_count: u64,
    cache_ttl_ns: u64,
}

impl CachingOptimization {
    pub fn new(priority: u8, min_call_count: u64, cache_ttl_ns: u64) -> Self {
        Self {
            priority,
            min_call_count,
            cache_ttl_ns,
        }
    }
}

impl OptimizationStrategy for CachingOptimization {
    fn name(&self) -> &str {
        "caching"
    }
    
    fn priority(&self) -> u8 {
        self.priority
    }
    
    fn should_apply(&self, stats: &UnifiedSyscallStats) -> bool {
        let snapshot = stats.get_snapshot();
        snapshot.call_count >= self.min_call_count
    }
    
    fn apply(&self, context: &mut OptimizationContext) -> Result<OptimizationResult, OptimizationError> {
        // 启用缓存
        context.config.enable_cache = true;
        
        Ok(OptimizationResult {
            success: true,
            optimization_type: OptimizationType::Caching,
            description: alloc::string::String::from("Enabled result caching"),
            expected_improvement: 0.5, // 预期50%改进
            parameters: {
                let mut params = BTreeMap::new();
                params.insert(alloc::string::String::from("ttl_ns"), alloc::format!("{}", self.cache_ttl_ns));
                params
            },
        })
    }
    
    fn evaluate(&self, before: &UnifiedSyscallStats, after: &UnifiedSyscallStats) -> f64 {
        let before_hit_rate = before.get_cache_hit_rate();
        let after_hit_rate = after.get_cache_hit_rate();
        
        if after_hit_rate > before_hit_rate {
            (after_hit_rate - before_hit_rate) / (1.0 - before_hit_rate)
        } else {
            0.0
        }
    }
}

/// 批处理优化策略
pub struct BatchingOptimization {
    priority: u8,
    min_consecutive_calls: usize,
    batch_size: usize,
}

impl BatchingOptimization {
    pub fn new(priority: u8, min_consecutive_calls: usize, batch_size: usize) -> Self {
        Self {
            priority,
            min_consecutive_calls,
            batch_size,
        }
    }
}

impl OptimizationStrategy for BatchingOptimization {
    fn name(&self) -> &str {
        "batching"
    }
    
    fn priority(&self) -> u8 {
        self.priority
    }
    
    fn should_apply(&self, stats: &UnifiedSyscallStats) -> bool {
        // 这里应该检查连续调用次数
        // 暂时基于调用频率判断
        stats.get_snapshot().call_count > 100
    }
    
    fn apply(&self, context: &mut OptimizationContext) -> Result<OptimizationResult, OptimizationError> {
        // 启用批处理
        context.config.enable_batch = true;
        context.config.batch_threshold = self.min_consecutive_calls;
        
        Ok(OptimizationResult {
            success: true,
            optimization_type: OptimizationType::Batching,
            description: alloc::string::String::from("Enabled batch processing"),
            expected_improvement: 0.4, // 预期40%改进
            parameters: {
                let mut params = BTreeMap::new();
                params.insert(alloc::string::String::from("batch_size"), alloc::format!("{}", self.batch_size));
                params
            },
        })
    }
    
    fn evaluate(&self, before: &UnifiedSyscallStats, after: &UnifiedSyscallStats) -> f64 {
        let before_time = before.get_average_time_ns();
        let after_time = after.get_average_time_ns();
        
        if before_time > 0.0 {
            (before_time - after_time) / before_time
        } else {
            0.0
        }
    }
}

/// 统一优化管理器
pub struct UnifiedOptimizationManager {
    /// 优化策略列表
    strategies: Vec<Box<dyn OptimizationStrategy>>,
    /// 优化历史
    optimization_history: Vec<OptimizationRecord>,
    /// 活跃优化
    active_optimizations: BTreeMap<u32, Vec<String>>,
    /// 配置
    config: OptimizationConfig,
    /// 统计信息
    stats: UnifiedSyscallStats,
    /// 下次优化时间
    next_optimization_time: AtomicU64,
}

impl UnifiedOptimizationManager {
    /// 创建新的优化管理器
    pub fn new(config: OptimizationConfig) -> Self {
        let mut manager = Self {
            strategies: Vec::new(),
            optimization_history: Vec::new(),
            active_optimizations: BTreeMap::new(),
            config,
            stats: UnifiedSyscallStats::new(),
            next_optimization_time: AtomicU64::new(0),
        };
        
        // 注册默认优化策略
        manager.register_default_strategies();
        manager
    }
    
    /// 注册默认优化策略
    fn register_default_strategies(&mut self) {
        // 快速路径优化
        self.strategies.push(Box::new(FastPathOptimization::new(90, 1000)));
        
        // 缓存优化
        self.strategies.push(Box::new(CachingOptimization::new(80, 10, 1_000_000_000)));
        
        // 批处理优化
        self.strategies.push(Box::new(BatchingOptimization::new(70, 5, 16)));
        
        // 按优先级排序
        self.strategies.sort_by(|a, b| b.priority().cmp(&a.priority()));
    }
    
    /// 注册自定义优化策略
    pub fn register_strategy(&mut self, strategy: Box<dyn OptimizationStrategy>) {
        self.strategies.push(strategy);
        self.strategies.sort_by(|a, b| b.priority().cmp(&a.priority()));
    }
    
    /// 执行优化检查
    pub fn check_optimization(&mut self, syscall_num: u32) -> Option<OptimizationResult> {
        let current_time = self.get_current_timestamp();
        let next_time = self.next_optimization_time.load(Ordering::Relaxed);
        
        if current_time < next_time {
            return None;
        }
        
        // 获取当前统计信息
        let stats = self.get_syscall_stats(syscall_num);
        
        // 检查是否需要优化
        for strategy in &self.strategies {
            if strategy.should_apply(&stats) {
                let mut context = OptimizationContext {
                    syscall_num,
                    current_stats: stats.clone(),
                    config: self.config.clone(),
                    dispatcher: None, // 这里应该传入实际的分发器
                    optimization_history: self.optimization_history.clone(),
                };
                
                match strategy.apply(&mut context) {
                    Ok(result) => {
                        // 记录优化
                        self.record_optimization(syscall_num, strategy.name(), &result, &stats);
                        return Some(result);
                    }
                    Err(_) => {
                        // 优化失败，继续尝试下一个策略
                        continue;
                    }
                }
            }
        }
        
        None
    }
    
    /// 评估优化效果
    pub fn evaluate_optimization(&mut self, syscall_num: u32, strategy_name: &str) -> Option<f64> {
        // 查找最近的优化记录
        let recent_records: Vec<_> = self.optimization_history
            .iter()
            .filter(|record| record.syscall_num == syscall_num && record.strategy == strategy_name)
            .rev()
            .take(2)
            .collect();
        
        if recent_records.len() == 2 {
            let before = &recent_records[1];
            let after = &recent_records[0];
            
            // 找到对应的策略进行评估
            for strategy in &self.strategies {
                if strategy.name() == strategy_name {
                    return Some(strategy.evaluate(&before.before_stats, &after.after_stats));
                }
            }
        }
        
        None
    }
    
    /// 获取系统调用统计信息
    fn get_syscall_stats(&self, syscall_num: u32) -> UnifiedSyscallStats {
        // 这里应该从性能监控器获取统计信息
        // 暂时返回默认值
        UnifiedSyscallStats::new()
    }
    
    /// 记录优化
    fn record_optimization(&mut self, syscall_num: u32, strategy_name: &str, result: &OptimizationResult, before_stats: &UnifiedSyscallStats) {
        let record = OptimizationRecord {
            timestamp: self.get_current_timestamp(),
            syscall_num,
            strategy: alloc::string::String::from(strategy_name),
            optimization_type: result.optimization_type,
            before_stats: before_stats.clone(),
            after_stats: before_stats.clone(), // 这里应该是优化后的统计
            actual_improvement: result.expected_improvement,
            success: result.success,
        };
        
        self.optimization_history.push(record);
        
        // 更新活跃优化
        self.active_optimizations
            .entry(syscall_num)
            .or_insert_with(Vec::new)
            .push(alloc::string::String::from(strategy_name));
        
        // 设置下次优化时间
        let next_time = self.get_current_timestamp() + 5_000_000_000; // 5秒后
        self.next_optimization_time.store(next_time, Ordering::Relaxed);
    }
    
    /// 获取优化历史
    pub fn get_optimization_history(&self) -> &[OptimizationRecord] {
        &self.optimization_history
    }
    
    /// 获取活跃优化
    pub fn get_active_optimizations(&self) -> &BTreeMap<u32, Vec<String>> {
        &self.active_optimizations
    }
    
    /// 获取优化统计
    pub fn get_optimization_stats(&self) -> &UnifiedSyscallStats {
        &self.stats
    }
    
    /// 清空优化历史
    pub fn clear_history(&mut self) {
        self.optimization_history.clear();
        self.active_optimizations.clear();
    }
    
    /// 获取当前时间戳
    fn get_current_timestamp(&self) -> u64 {
        crate::subsystems::time::hrtime_nanos()
    }
}

/// 全局优化管理器
static GLOBAL_OPTIMIZATION_MANAGER: Mutex<Option<UnifiedOptimizationManager>> = Mutex::new(None);

/// 初始化全局优化管理器
pub fn init_global_optimization_manager(config: OptimizationConfig) {
    let mut manager_guard = GLOBAL_OPTIMIZATION_MANAGER.lock();
    *manager_guard = Some(UnifiedOptimizationManager::new(config));
}

/// 获取全局优化管理器
pub fn get_global_optimization_manager() -> Option<&'static Mutex<Option<UnifiedOptimizationManager>>> {
    Some(&GLOBAL_OPTIMIZATION_MANAGER)
}

/// 便捷函数：检查并应用优化
pub fn check_and_apply_optimization(syscall_num: u32) -> Option<OptimizationResult> {
    if let Some(manager_mutex) = get_global_optimization_manager() {
        let mut guard = manager_mutex.lock();
        if let Some(manager) = guard.as_mut() {
            manager.check_optimization(syscall_num)
        } else {
            None
        }
    } else {
        None
    }
}

/// 便捷函数：评估优化效果
pub fn evaluate_optimization_effectiveness(syscall_num: u32, strategy_name: &str) -> Option<f64> {
    if let Some(manager_mutex) = get_global_optimization_manager() {
        let mut guard = manager_mutex.lock();
        if let Some(manager) = guard.as_mut() {
            manager.evaluate_optimization(syscall_num, strategy_name)
        } else {
            None
        }
    } else {
        None
    }
}
