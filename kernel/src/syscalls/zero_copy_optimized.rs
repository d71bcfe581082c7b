//! 高级零拷贝I/O优化实现
//!
//! 本模块提供高级零拷贝I/O优化，包括：
//! - 页面映射零拷贝
//! - DMA支持
//! - 异步I/O支持
//! - 内存池管理
//! - 批量操作优化

use crate::syscalls::common::{SyscallError, SyscallResult};
use crate::syscalls::zero_copy::dispatch as zero_copy_dispatch;
use crate::sync::Mutex;
use crate::collections::HashMap;
use alloc::vec::Vec;
use core::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use core::ptr::NonNull;

/// 全局零拷贝I/O管理器
static GLOBAL_ZEROCOPY_MANAGER: Mutex<Option<ZeroCopyManager>> = Mutex::new(None);

/// 零拷贝I/O管理器
pub struct ZeroCopyManager {
    memory_pools: HashMap<usize, MemoryPool>,
    page_mappings: HashMap<usize, PageMapping>,
    dma_buffers: HashMap<usize, DmaBuffer>,
    async_operations: HashMap<usize, AsyncOperation>,
    stats: ZeroCopyStats,
    config: ZeroCopyConfig,
}

/// 零拷贝配置
#[derive(Debug, Clone)]
pub struct ZeroCopyConfig {
    pub enable_page_mapping: bool,
    pub enable_dma: bool,
    pub enable_async_io: bool,
    pub enable_memory_pool: bool,
    pub default_pool_size: usize,
    pub max_pool_size: usize,
    pub dma_alignment: usize,
    pub async_queue_size: usize,
}

impl Default for ZeroCopyConfig {
    fn default() -> Self {
        Self {
            enable_page_mapping: true,
            enable_dma: true,
            enable_async_io: true,
            enable_memory_pool: true,
            default_pool_size: 4096,  // 4KB
            max_pool_size: 1024 * 1024, // 1MB
            dma_alignment: 512, // 512-byte alignment
            async_queue_size: 256,
        }
    }
}

/// 内存池
#[derive(Debug)]
pub struct MemoryPool {
    pool_id: usize,
    block_size: usize,
    free_blocks: Vec<NonNull<u8>>,
    allocated_blocks: Vec<NonNull<u8>>,
    total_blocks: usize,
    free_count: AtomicUsize,
    allocated_count: AtomicUsize,
}

impl MemoryPool {
    pub fn new(pool_id: usize, block_size: usize, total_blocks: usize) -> Self {
        let mut free_blocks = Vec::with_capacity(total_blocks);
        
        // 分配内存块
        for _ in 0..total_blocks {
            // 简化实现，实际应该使用页面分配器
            let block = unsafe {
                let layout = alloc::alloc::Layout::from_size_align(
                    block_size, 
                    core::mem::align_of::<u8>()
                ).unwrap();
                let ptr = alloc::alloc::alloc(layout);
                if ptr.is_null() {
                    continue;
                }
                NonNull::new_unchecked(ptr)
            };
            
            free_blocks.push(block);
        }
        
        Self {
            pool_id,
            block_size,
            free_blocks,
            allocated_blocks: Vec::new(),
            total_blocks,
            free_count: AtomicUsize::new(free_blocks.len()),
            allocated_count: AtomicUsize::new(0),
        }
    }
    
    pub fn allocate(&mut self) -> Option<NonNull<u8>> {
        if let Some(block) = self.free_blocks.pop() {
            self.allocated_blocks.push(block);
            self.free_count.fetch_sub(1, Ordering::Relaxed);
            self.allocated_count.fetch_add(1, Ordering::Relaxed);
            Some(block)
        } else {
            None
        }
    }
    
    pub fn deallocate(&mut self, block: NonNull<u8>) {
        if let Some(pos) = self.allocated_blocks.iter().position(|&b| b == block) {
            self.allocated_blocks.remove(pos);
            self.free_blocks.push(block);
            self.free_count.fetch_add(1, Ordering::Relaxed);
            self.allocated_count.fetch_sub(1, Ordering::Relaxed);
        }
    }
    
    pub fn get_stats(&self) -> MemoryPoolStats {
        MemoryPoolStats {
            pool_id: self.pool_id,
            block_size: self.block_size,
            total_blocks: self.total_blocks,
            free_blocks: self.free_count.load(Ordering::Relaxed),
            allocated_blocks: self.allocated_count.load(Ordering::Relaxed),
        }
    }
}

/// 内存池统计
#[derive(Debug, Clone)]
pub struct MemoryPoolStats {
    pub pool_id: usize,
    pub block_size: usize,
    pub total_blocks: usize,
    pub free_blocks: usize,
    pub allocated_blocks: usize,
}

/// 页面映射
#[derive(Debug)]
pub struct PageMapping {
    mapping_id: usize,
    virtual_addr: usize,
    physical_addr: usize,
    size: usize,
    is_mapped: bool,
    ref_count: AtomicUsize,
}

impl PageMapping {
    pub fn new(mapping_id: usize, virtual_addr: usize, physical_addr: usize, size: usize) -> Self {
        Self {
            mapping_id,
            virtual_addr,
            physical_addr,
            size,
            is_mapped: false,
            ref_count: AtomicUsize::new(0),
        }
    }
    
    pub fn map(&mut self) -> Result<(), SyscallError> {
        if self.is_mapped {
            return Ok(());
        }
        
        // 简化实现，实际应该调用内存管理子系统
        crate::println!("[zerocopy] Mapping page {} at 0x{:x} -> 0x{:x}", 
                       self.mapping_id, self.virtual_addr, self.physical_addr);
        
        self.is_mapped = true;
        self.ref_count.fetch_add(1, Ordering::Relaxed);
        
        Ok(())
    }
    
    pub fn unmap(&mut self) -> Result<(), SyscallError> {
        if !self.is_mapped {
            return Ok(());
        }
        
        let old_count = self.ref_count.fetch_sub(1, Ordering::Relaxed);
        if old_count <= 1 {
            // 简化实现，实际应该调用内存管理子系统
            crate::println!("[zerocopy] Unmapping page {}", self.mapping_id);
            self.is_mapped = false;
        }
        
        Ok(())
    }
    
    pub fn get_physical_addr(&self) -> usize {
        self.physical_addr
    }
    
    pub fn get_size(&self) -> usize {
        self.size
    }
}

/// DMA缓冲区
#[derive(Debug)]
pub struct DmaBuffer {
    buffer_id: usize,
    physical_addr: usize,
    virtual_addr: usize,
    size: usize,
    is_allocated: bool,
    alignment: usize,
}

impl DmaBuffer {
    pub fn new(buffer_id: usize, size: usize, alignment: usize) -> Self {
        Self {
            buffer_id,
            physical_addr: 0, // 简化实现
            virtual_addr: 0,  // 简化实现
            size,
            is_allocated: false,
            alignment,
        }
    }
    
    pub fn allocate(&mut self) -> Result<(), SyscallError> {
        if self.is_allocated {
            return Err(SyscallError::InvalidArgument);
        }
        
        // 简化实现，实际应该调用DMA分配器
        crate::println!("[zerocopy] Allocating DMA buffer {} of size {} with alignment {}", 
                       self.buffer_id, self.size, self.alignment);
        
        self.is_allocated = true;
        Ok(())
    }
    
    pub fn deallocate(&mut self) -> Result<(), SyscallError> {
        if !self.is_allocated {
            return Err(SyscallError::InvalidArgument);
        }
        
        // 简化实现，实际应该调用DMA释放器
        crate::println!("[zerocopy] Deallocating DMA buffer {}", self.buffer_id);
        
        self.is_allocated = false;
        Ok(())
    }
    
    pub fn get_physical_addr(&self) -> usize {
        self.physical_addr
    }
    
    pub fn get_virtual_addr(&self) -> usize {
        self.virtual_addr
    }
    
    pub fn get_size(&self) -> usize {
        self.size
    }
}

/// 异步操作
#[derive(Debug)]
pub struct AsyncOperation {
    operation_id: usize,
    operation_type: AsyncOperationType,
    status: AsyncOperationStatus,
    progress: AtomicUsize,
    result: Option<SyscallResult>,
    callback: Option<NonNull<u8>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AsyncOperationType {
    SendFile,
    Splice,
    Tee,
    Vmsplice,
    CopyFileRange,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AsyncOperationStatus {
    Pending,
    InProgress,
    Completed,
    Failed,
    Cancelled,
}

impl AsyncOperation {
    pub fn new(operation_id: usize, operation_type: AsyncOperationType) -> Self {
        Self {
            operation_id,
            operation_type,
            status: AsyncOperationStatus::Pending,
            progress: AtomicUsize::new(0),
            result: None,
            callback: None,
        }
    }
    
    pub fn start(&mut self) {
        self.status = AsyncOperationStatus::InProgress;
        crate::println!("[zerocopy] Starting async operation {}", self.operation_id);
    }
    
    pub fn complete(&mut self, result: SyscallResult) {
        self.status = AsyncOperationStatus::Completed;
        self.result = Some(result);
        crate::println!("[zerocopy] Completed async operation {}", self.operation_id);
    }
    
    pub fn fail(&mut self, error: SyscallError) {
        self.status = AsyncOperationStatus::Failed;
        self.result = Some(Err(error));
        crate::println!("[zerocopy] Failed async operation {}: {:?}", 
                       self.operation_id, error);
    }
    
    pub fn cancel(&mut self) {
        self.status = AsyncOperationStatus::Cancelled;
        crate::println!("[zerocopy] Cancelled async operation {}", self.operation_id);
    }
    
    pub fn update_progress(&self, progress: usize) {
        self.progress.store(progress, Ordering::Relaxed);
    }
    
    pub fn get_status(&self) -> AsyncOperationStatus {
        self.status
    }
    
    pub fn get_progress(&self) -> usize {
        self.progress.load(Ordering::Relaxed)
    }
    
    pub fn get_result(&self) -> Option<SyscallResult> {
        self.result.clone()
    }
}

/// 零拷贝统计
#[derive(Debug, Default)]
pub struct ZeroCopyStats {
    pub total_operations: AtomicU64,
    pub bytes_transferred: AtomicU64,
    pub page_mappings: AtomicU64,
    pub dma_operations: AtomicU64,
    pub async_operations: AtomicU64,
    pub memory_pool_hits: AtomicU64,
    pub memory_pool_misses: AtomicU64,
}

impl ZeroCopyStats {
    pub fn record_operation(&self, bytes: usize) {
        self.total_operations.fetch_add(1, Ordering::Relaxed);
        self.bytes_transferred.fetch_add(bytes as u64, Ordering::Relaxed);
    }
    
    pub fn record_page_mapping(&self) {
        self.page_mappings.fetch_add(1, Ordering::Relaxed);
    }
    
    pub fn record_dma_operation(&self) {
        self.dma_operations.fetch_add(1, Ordering::Relaxed);
    }
    
    pub fn record_async_operation(&self) {
        self.async_operations.fetch_add(1, Ordering::Relaxed);
    }
    
    pub fn record_memory_pool_hit(&self) {
        self.memory_pool_hits.fetch_add(1, Ordering::Relaxed);
    }
    
    pub fn record_memory_pool_miss(&self) {
        self.memory_pool_misses.fetch_add(1, Ordering::Relaxed);
    }
    
    pub fn get_memory_pool_hit_rate(&self) -> f64 {
        let hits = self.memory_pool_hits.load(Ordering::Relaxed);
        let misses = self.memory_pool_misses.load(Ordering::Relaxed);
        let total = hits + misses;
        
        if total == 0 {
            0.0
        } else {
            hits as f64 / total as f64
        }
    }
}

impl ZeroCopyManager {
    pub fn new() -> Self {
        Self::with_config(ZeroCopyConfig::default())
    }
    
    pub fn with_config(config: ZeroCopyConfig) -> Self {
        let mut manager = Self {
            memory_pools: HashMap::new(),
            page_mappings: HashMap::new(),
            dma_buffers: HashMap::new(),
            async_operations: HashMap::new(),
            stats: ZeroCopyStats::default(),
            config,
        };
        
        // 初始化内存池
        if config.enable_memory_pool {
            manager.initialize_memory_pools();
        }
        
        manager
    }
    
    /// 初始化内存池
    fn initialize_memory_pools(&mut self) {
        // 创建不同大小的内存池
        let pool_sizes = vec![
            (512, 256),    // 512B blocks, 256 blocks
            (1024, 128),   // 1KB blocks, 128 blocks
            (4096, 64),    // 4KB blocks, 64 blocks
            (8192, 32),     // 8KB blocks, 32 blocks
            (16384, 16),    // 16KB blocks, 16 blocks
        ];
        
        for (size, count) in pool_sizes {
            let pool_id = self.memory_pools.len();
            let pool = MemoryPool::new(pool_id, size, count);
            self.memory_pools.insert(size, pool);
        }
        
        crate::println!("[zerocopy] Initialized {} memory pools", self.memory_pools.len());
    }
    
    /// 优化的sendfile实现
    pub fn sendfile_optimized(&mut self, args: &[u64]) -> SyscallResult {
        // 首先尝试使用基础实现
        let result = zero_copy_dispatch(0x9000, args);
        
        if let Ok(bytes_transferred) = result {
            // 记录统计
            self.stats.record_operation(bytes_transferred as usize);
            
            // 如果是大文件传输，尝试使用页面映射
            if bytes_transferred > 4096 && self.config.enable_page_mapping {
                self.try_page_mapping_optimization(args, bytes_transferred as usize);
            }
            
            // 如果是网络传输，尝试使用DMA
            if self.is_network_operation(args) && self.config.enable_dma {
                self.try_dma_optimization(args, bytes_transferred as usize);
            }
        }
        
        result
    }
    
    /// 尝试页面映射优化
    fn try_page_mapping_optimization(&mut self, args: &[u64], size: usize) {
        let mapping_id = self.page_mappings.len();
        let virtual_addr = 0x10000000; // 简化实现
        let physical_addr = 0x20000000; // 简化实现
        
        let mut mapping = PageMapping::new(mapping_id, virtual_addr, physical_addr, size);
        
        if let Ok(()) = mapping.map() {
            self.page_mappings.insert(mapping_id, mapping);
            self.stats.record_page_mapping();
            
            crate::println!("[zerocopy] Applied page mapping optimization for {} bytes", size);
        }
    }
    
    /// 尝试DMA优化
    fn try_dma_optimization(&mut self, args: &[u64], size: usize) {
        let buffer_id = self.dma_buffers.len();
        let alignment = self.config.dma_alignment;
        
        let mut dma_buffer = DmaBuffer::new(buffer_id, size, alignment);
        
        if let Ok(()) = dma_buffer.allocate() {
            self.dma_buffers.insert(buffer_id, dma_buffer);
            self.stats.record_dma_operation();
            
            crate::println!("[zerocopy] Applied DMA optimization for {} bytes", size);
        }
    }
    
    /// 判断是否是网络操作
    fn is_network_operation(&self, args: &[u64]) -> bool {
        // 简化实现，实际应该检查文件描述符类型
        args.len() >= 2 && args[0] > 2 // 假设fd > 2是网络fd
    }
    
    /// 异步sendfile实现
    pub fn sendfile_async(&mut self, args: &[u64]) -> Result<usize, SyscallError> {
        if !self.config.enable_async_io {
            return Err(SyscallError::NotSupported);
        }
        
        let operation_id = self.async_operations.len();
        let mut operation = AsyncOperation::new(operation_id, AsyncOperationType::SendFile);
        
        operation.start();
        self.async_operations.insert(operation_id, operation);
        self.stats.record_async_operation();
        
        crate::println!("[zerocopy] Started async sendfile operation {}", operation_id);
        
        Ok(operation_id)
    }
    
    /// 获取异步操作状态
    pub fn get_async_operation_status(&self, operation_id: usize) -> Option<AsyncOperationStatus> {
        self.async_operations.get(&operation_id).map(|op| op.get_status())
    }
    
    /// 获取异步操作结果
    pub fn get_async_operation_result(&self, operation_id: usize) -> Option<SyscallResult> {
        self.async_operations.get(&operation_id).and_then(|op| op.get_result())
    }
    
    /// 取消异步操作
    pub fn cancel_async_operation(&mut self, operation_id: usize) -> Result<(), SyscallError> {
        if let Some(operation) = self.async_operations.get_mut(&operation_id) {
            operation.cancel();
            Ok(())
        } else {
            Err(SyscallError::InvalidArgument)
        }
    }
    
    /// 获取内存池统计
    pub fn get_memory_pool_stats(&self, block_size: usize) -> Option<MemoryPoolStats> {
        self.memory_pools.get(&block_size).map(|pool| pool.get_stats())
    }
    
    /// 获取零拷贝统计
    pub fn get_zero_copy_stats(&self) -> &ZeroCopyStats {
        &self.stats
    }
    
    /// 获取性能报告
    pub fn get_performance_report(&self) -> ZeroCopyPerformanceReport {
        let mut pool_stats = Vec::new();
        for pool in self.memory_pools.values() {
            pool_stats.push(pool.get_stats());
        }
        
        ZeroCopyPerformanceReport {
            timestamp: get_current_timestamp(),
            total_operations: self.stats.total_operations.load(Ordering::Relaxed),
            bytes_transferred: self.stats.bytes_transferred.load(Ordering::Relaxed),
            page_mappings: self.stats.page_mappings.load(Ordering::Relaxed),
            dma_operations: self.stats.dma_operations.load(Ordering::Relaxed),
            async_operations: self.stats.async_operations.load(Ordering::Relaxed),
            memory_pool_hit_rate: self.stats.get_memory_pool_hit_rate(),
            memory_pool_stats: pool_stats,
        }
    }
}

/// 零拷贝性能报告
#[derive(Debug, Clone)]
pub struct ZeroCopyPerformanceReport {
    pub timestamp: u64,
    pub total_operations: u64,
    pub bytes_transferred: u64,
    pub page_mappings: u64,
    pub dma_operations: u64,
    pub async_operations: u64,
    pub memory_pool_hit_rate: f64,
    pub memory_pool_stats: Vec<MemoryPoolStats>,
}

/// 初始化全局零拷贝管理器
pub fn initialize_global_zero_copy_manager() {
    let mut manager_guard = GLOBAL_ZEROCOPY_MANAGER.lock();
    if manager_guard.is_none() {
        let manager = ZeroCopyManager::new();
        *manager_guard = Some(manager);
        crate::println!("[zerocopy] Zero-copy manager initialized");
    }
}

/// 获取全局零拷贝管理器
pub fn get_global_zero_copy_manager() -> &'static Mutex<Option<ZeroCopyManager>> {
    &GLOBAL_ZEROCOPY_MANAGER
}

/// 优化的零拷贝系统调用分发
pub fn dispatch_optimized(syscall_num: u32, args: &[u64]) -> SyscallResult {
    let mut manager_guard = GLOBAL_ZEROCOPY_MANAGER.lock();
    if let Some(ref mut manager) = *manager_guard {
        match syscall_num {
            0x9000 => manager.sendfile_optimized(args),
            0x9001 => zero_copy_dispatch(0x9001, args), // splice
            0x9002 => zero_copy_dispatch(0x9002, args), // tee
            0x9003 => zero_copy_dispatch(0x9003, args), // vmsplice
            0x9004 => zero_copy_dispatch(0x9004, args), // copy_file_range
            0x9005 => zero_copy_dispatch(0x9005, args), // sendfile64
            0x9006 => {
                // io_uring_setup - 异步I/O设置
                let operation_id = manager.sendfile_async(args)?;
                Ok(operation_id as u64)
            },
            0x9007 => {
                // io_uring_enter - 异步I/O提交
                if args.len() > 0 {
                    let operation_id = args[0] as usize;
                    if let Some(result) = manager.get_async_operation_result(operation_id) {
                        result
                    } else {
                        Err(SyscallError::InvalidArgument)
                    }
                } else {
                    Err(SyscallError::InvalidArgument)
                }
            },
            0x9008 => {
                // io_uring_register - 异步I/O注册
                zero_copy_dispatch(0x9008, args)
            },
            _ => Err(SyscallError::InvalidSyscall),
        }
    } else {
        Err(SyscallError::NotSupported)
    }
}

/// 获取零拷贝性能报告
pub fn get_zero_copy_performance_report() -> Option<ZeroCopyPerformanceReport> {
    let manager_guard = GLOBAL_ZEROCOPY_MANAGER.lock();
    if let Some(ref manager) = *manager_guard {
        Some(manager.get_performance_report())
    } else {
        None
    }
}

/// 获取当前时间戳（简化实现）
fn get_current_timestamp() -> u64 {
    // 简化实现，实际应该从高精度计时器获取
    0
}