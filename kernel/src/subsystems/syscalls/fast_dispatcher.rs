//! 高效系统调用架构重构
//!
//! 本模块提供高性能的系统调用架构，包括：
//! - 快速系统调用分发
//! - 动态系统调用注册
//! - 系统调用缓存
//! - 批量系统调用处理

use crate::syscalls::common::{SyscallError, SyscallResult};
use nos_perf::monitoring::{record_syscall_performance, get_perf_stats};
use nos_perf::core::{UnifiedSyscallStats, SyscallStatsSnapshot};
// TODO: Re-enable these imports when optimization modules are refactored
// use crate::syscalls::file_io_optimized::dispatch_optimized as file_io_dispatch;
// use crate::syscalls::process_optimized::dispatch_optimized as process_dispatch;
// use crate::syscalls::memory_optimized::dispatch_optimized as memory_dispatch;
// use crate::syscalls::signal_optimized::dispatch_optimized as signal_dispatch;
use crate::sync::Mutex;
use crate::collections::HashMap;
use alloc::vec::Vec;
use core::sync::atomic::{AtomicU64, Ordering};

/// 系统调用处理函数类型
pub type SyscallHandler = fn(u32, &[u64]) -> SyscallResult;

/// 系统调用元数据
#[derive(Debug, Clone)]
pub struct SyscallMetadata {
    pub number: u32,
    pub name: &'static str,
    pub handler: SyscallHandler,
    pub priority: u8,
    pub is_optimized: bool,
    pub category: SyscallCategory,
}

/// 系统调用类别
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyscallCategory {
    Process,
    FileIO,
    Memory,
    Signal,
    Network,
    Time,
    FileSystem,
    Thread,
    Security,
    ZeroCopyIO,
    Epoll,
    GLib,
    AIO,
    MessageQueue,
    RealTimeScheduling,
}

/// 系统调用统计
#[derive(Debug, Default)]
pub struct SyscallStats {
    pub call_count: AtomicU64,
    pub total_time: AtomicU64,
    pub error_count: AtomicU64,
}

impl SyscallStats {
    pub const fn new() -> Self {
        Self {
            call_count: AtomicU64::new(0),
            total_time: AtomicU64::new(0),
            error_count: AtomicU64::new(0),
        }
    }
    
    pub fn record_call(&self, duration: u64, success: bool) {
        self.call_count.fetch_add(1, Ordering::Relaxed);
        self.total_time.fetch_add(duration, Ordering::Relaxed);
        if !success {
            self.error_count.fetch_add(1, Ordering::Relaxed);
        }
    }
    
    pub fn get_average_time(&self) -> f64 {
        let count = self.call_count.load(Ordering::Relaxed);
        let total = self.total_time.load(Ordering::Relaxed);
        
        if count == 0 {
            0.0
        } else {
            total as f64 / count as f64
        }
    }
    
    pub fn get_error_rate(&self) -> f64 {
        let total = self.call_count.load(Ordering::Relaxed);
        let errors = self.error_count.load(Ordering::Relaxed);
        
        if total == 0 {
            0.0
        } else {
            errors as f64 / total as f64
        }
    }
}

/// 高效系统调用分发器
pub struct FastSyscallDispatcher {
    handlers: HashMap<u32, SyscallMetadata>,
    stats: HashMap<u32, SyscallStats>,
    fast_path_handlers: [Option<SyscallHandler>; 256], // 快速路径处理程序
    batch_handlers: HashMap<u32, BatchSyscallHandler>, // 批量处理程序
}

/// 批量系统调用处理函数类型
pub type BatchSyscallHandler = fn(&[BatchSyscallRequest]) -> Vec<BatchSyscallResponse>;

/// 批量系统调用请求
#[derive(Debug, Clone)]
pub struct BatchSyscallRequest {
    pub number: u32,
    pub args: Vec<u64>,
    pub id: u64,
}

/// 批量系统调用响应
#[derive(Debug, Clone)]
pub struct BatchSyscallResponse {
    pub id: u64,
    pub result: SyscallResult,
    pub duration: u64,
}

impl FastSyscallDispatcher {
    pub fn new() -> Self {
        let mut dispatcher = Self {
            handlers: HashMap::new(),
            stats: HashMap::new(),
            fast_path_handlers: [None; 256],
            batch_handlers: HashMap::new(),
        };
        
        // 注册常用系统调用
        dispatcher.register_common_syscalls();
        
        dispatcher
    }
    
    /// 注册常用系统调用
    fn register_common_syscalls(&mut self) {
        // TODO: Re-enable optimized dispatcher registration when optimization modules are refactored
        // For now, using standard dispatcher for all syscalls
        // This is a temporary measure to unblock compilation
    }
    
    /// 注册系统调用
    pub fn register_syscall(
        &mut self,
        number: u32,
        name: &'static str,
        handler: SyscallHandler,
        priority: u8,
        is_optimized: bool,
        category: SyscallCategory,
    ) {
        let metadata = SyscallMetadata {
            number,
            name,
            handler,
            priority,
            is_optimized,
            category,
        };
        
        self.handlers.insert(number, metadata);
        
        // 如果是高优先级系统调用，添加到快速路径
        if priority >= 80 {
            let index = (number % 256) as usize;
            self.fast_path_handlers[index] = Some(handler);
        }
        
        // 初始化统计信息
        self.stats.insert(number, SyscallStats::new());
    }
    
    /// 注册批量系统调用处理程序
    pub fn register_batch_handler(&mut self, number: u32, handler: BatchSyscallHandler) {
        self.batch_handlers.insert(number, handler);
    }
    
    /// 分发系统调用
    pub fn dispatch(&mut self, number: u32, args: &[u64]) -> SyscallResult {
        let start_time = self.get_timestamp();
        
        // 尝试快速路径
        let fast_path_index = (number % 256) as usize;
        let result = if let Some(handler) = self.fast_path_handlers[fast_path_index] {
            // 快速路径
            handler(number, args)
        } else if let Some(metadata) = self.handlers.get(&number) {
            // 常规路径
            (metadata.handler)(number, args)
        } else {
            // 系统调用不存在
            Err(SyscallError::NotSupported)
        };
        
        let end_time = self.get_timestamp();
        let duration = end_time - start_time;
        
        // 记录统计信息
        if let Some(stats) = self.stats.get_mut(&number) {
            stats.record_call(duration, result.is_ok());
        }
        
        // 记录到nos-perf监控系统
        record_syscall_performance(duration);
        
        result
    }
    
    /// 批量分发系统调用
    pub fn dispatch_batch(&mut self, requests: &[BatchSyscallRequest]) -> Vec<BatchSyscallResponse> {
        let mut responses = Vec::with_capacity(requests.len());
        
        for request in requests {
            let start_time = self.get_timestamp();
            let result = self.dispatch(request.number, &request.args);
            let end_time = self.get_timestamp();
            let duration = end_time - start_time;
            
            responses.push(BatchSyscallResponse {
                id: request.id,
                result,
                duration,
            });
        }
        
        responses
    }
    
    /// 获取系统调用统计信息
    pub fn get_stats(&self, number: u32) -> Option<&SyscallStats> {
        self.stats.get(&number)
    }
    
    /// 获取所有系统调用统计信息
    pub fn get_all_stats(&self) -> &HashMap<u32, SyscallStats> {
        &self.stats
    }
    
    /// 获取系统调用元数据
    pub fn get_metadata(&self, number: u32) -> Option<&SyscallMetadata> {
        self.handlers.get(&number)
    }
    
    /// 获取所有系统调用元数据
    pub fn get_all_metadata(&self) -> &HashMap<u32, SyscallMetadata> {
        &self.handlers
    }
    
    /// 获取时间戳（简化实现）
    fn get_timestamp(&self) -> u64 {
        // 简化实现，实际应该从高精度计时器获取
        0
    }
}

/// 系统调用缓存
pub struct SyscallCache {
    entries: HashMap<u64, CachedSyscallResult>,
    max_entries: usize,
    hits: AtomicU64,
    misses: AtomicU64,
}

/// 缓存的系统调用结果
#[derive(Debug, Clone)]
pub struct CachedSyscallResult {
    pub result: SyscallResult,
    pub timestamp: u64,
    pub ttl: u64,
}

impl SyscallCache {
    pub fn new(max_entries: usize) -> Self {
        Self {
            entries: HashMap::new(),
            max_entries,
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }
    
    /// 获取缓存结果
    pub fn get(&mut self, key: u64) -> Option<&CachedSyscallResult> {
        let current_time = self.get_timestamp();
        
        if let Some(entry) = self.entries.get(&key) {
            if current_time - entry.timestamp < entry.ttl {
                self.hits.fetch_add(1, Ordering::Relaxed);
                return Some(entry);
            } else {
                // 缓存过期，移除
                self.entries.remove(&key);
            }
        }
        
        self.misses.fetch_add(1, Ordering::Relaxed);
        None
    }
    
    /// 设置缓存结果
    pub fn set(&mut self, key: u64, result: SyscallResult, ttl: u64) {
        if self.entries.len() >= self.max_entries {
            // 简单的LRU：移除第一个元素
            if let Some(first_key) = self.entries.keys().next().cloned() {
                self.entries.remove(&first_key);
            }
        }
        
        let current_time = self.get_timestamp();
        let cached_result = CachedSyscallResult {
            result,
            timestamp: current_time,
            ttl,
        };
        
        self.entries.insert(key, cached_result);
    }
    
    /// 获取缓存命中率
    pub fn get_hit_rate(&self) -> f64 {
        let hits = self.hits.load(Ordering::Relaxed);
        let misses = self.misses.load(Ordering::Relaxed);
        let total = hits + misses;
        
        if total == 0 {
            0.0
        } else {
            hits as f64 / total as f64
        }
    }
    
    /// 清空缓存
    pub fn clear(&mut self) {
        self.entries.clear();
        self.hits.store(0, Ordering::Relaxed);
        self.misses.store(0, Ordering::Relaxed);
    }
    
    /// 获取时间戳（简化实现）
    fn get_timestamp(&self) -> u64 {
        // 简化实现，实际应该从高精度计时器获取
        0
    }
}

/// 全局系统调用分发器
static GLOBAL_DISPATCHER: Mutex<Option<FastSyscallDispatcher>> = Mutex::new(None);

/// 全局系统调用缓存
static GLOBAL_CACHE: Mutex<Option<SyscallCache>> = Mutex::new(None);

/// 初始化高效系统调用架构
pub fn initialize_fast_syscall_architecture() {
    let mut dispatcher_guard = GLOBAL_DISPATCHER.lock();
    if dispatcher_guard.is_some() {
        return; // 已经初始化
    }
    
    let mut dispatcher = FastSyscallDispatcher::new();
    
    // 注册批量处理程序
    dispatcher.register_batch_handler(0xF000, batch_syscall_handler);
    
    *dispatcher_guard = Some(dispatcher);
    
    // 初始化缓存
    let mut cache_guard = GLOBAL_CACHE.lock();
    *cache_guard = Some(SyscallCache::new(1024)); // 最多缓存1024个结果
    
    crate::println!("[syscall] Fast syscall architecture initialized");
}

/// 高效系统调用分发
pub fn fast_dispatch(number: u32, args: &[u64]) -> SyscallResult {
    let mut dispatcher_guard = GLOBAL_DISPATCHER.lock();
    let dispatcher = match dispatcher_guard.as_mut() {
        Some(d) => d,
        None => {
            // 如果未初始化，使用默认分发器
            drop(dispatcher_guard);
            initialize_fast_syscall_architecture();
            dispatcher_guard = GLOBAL_DISPATCHER.lock();
            dispatcher_guard.as_mut().unwrap()
        }
    };
    
    // 检查缓存
    let cache_key = calculate_cache_key(number, args);
    let mut cache_guard = GLOBAL_CACHE.lock();
    let cache = cache_guard.as_mut().unwrap();
    
    if let Some(cached_result) = cache.get(cache_key) {
        return cached_result.result.clone();
    }
    
    // 缓存未命中，分发系统调用
    let result = dispatcher.dispatch(number, args);
    
    // 缓存结果（仅对纯函数和快速系统调用）
    if should_cache_syscall(number) {
        cache.set(cache_key, result.clone(), 1000); // TTL为1000时间单位
    }
    
    result
}

/// 批量系统调用处理
pub fn batch_syscall_dispatch(requests: &[BatchSyscallRequest]) -> Vec<BatchSyscallResponse> {
    let mut dispatcher_guard = GLOBAL_DISPATCHER.lock();
    let dispatcher = match dispatcher_guard.as_mut() {
        Some(d) => d,
        None => {
            // 如果未初始化，使用默认分发器
            drop(dispatcher_guard);
            initialize_fast_syscall_architecture();
            dispatcher_guard = GLOBAL_DISPATCHER.lock();
            dispatcher_guard.as_mut().unwrap()
        }
    };
    
    dispatcher.dispatch_batch(requests)
}

/// 批量系统调用处理函数
fn batch_syscall_handler(requests: &[BatchSyscallRequest]) -> Vec<BatchSyscallResponse> {
    let mut responses = Vec::with_capacity(requests.len());
    
    for request in requests {
        let start_time = get_timestamp();
        let result = fast_dispatch(request.number, &request.args);
        let end_time = get_timestamp();
        let duration = end_time - start_time;
        
        responses.push(BatchSyscallResponse {
            id: request.id,
            result,
            duration,
        });
    }
    
    responses
}

/// 计算缓存键
fn calculate_cache_key(number: u32, args: &[u64]) -> u64 {
    // 简单的哈希实现
    let mut key = number as u64;
    
    for (i, &arg) in args.iter().enumerate() {
        key ^= arg.rotate_left(i * 8);
    }
    
    key
}

/// 判断是否应该缓存系统调用
fn should_cache_syscall(number: u32) -> bool {
    // 只缓存纯函数和快速系统调用
    match number {
        0x1004 | 0x1005 => true, // getpid, getppid
        _ => false,
    }
}

/// 获取时间戳（简化实现）
fn get_timestamp() -> u64 {
    // 简化实现，实际应该从高精度计时器获取
    0
}

/// 获取系统调用统计信息
pub fn get_syscall_stats(number: u32) -> Option<SyscallStats> {
    let dispatcher_guard = GLOBAL_DISPATCHER.lock();
    if let Some(dispatcher) = dispatcher_guard.as_ref() {
        dispatcher.get_stats(number).cloned()
    } else {
        None
    }
}

/// 获取所有系统调用统计信息
pub fn get_all_syscall_stats() -> HashMap<u32, SyscallStats> {
    let dispatcher_guard = GLOBAL_DISPATCHER.lock();
    if let Some(dispatcher) = dispatcher_guard.as_ref() {
        dispatcher.get_all_stats().clone()
    } else {
        HashMap::new()
    }
}

/// 获取缓存统计信息
pub fn get_cache_stats() -> (f64, usize) {
    let cache_guard = GLOBAL_CACHE.lock();
    if let Some(cache) = cache_guard.as_ref() {
        (cache.get_hit_rate(), cache.entries.len())
    } else {
        (0.0, 0)
    }
}