//! Memory Hardware Acceleration Module
//! 
//! This module provides memory-specific hardware acceleration features including
//! prefetching, cache optimization, and memory bandwidth optimization.

use crate::error::unified::UnifiedError;
use core::sync::atomic::{AtomicU64, Ordering};

/// Memory accelerator statistics
#[derive(Debug, Clone)]
pub struct MemoryAccelStats {
    /// Total operations
    pub total_operations: AtomicU64,
    /// Prefetch operations
    pub prefetch_operations: AtomicU64,
    /// Cache flush operations
    pub cache_flush_operations: AtomicU64,
    /// Cache invalidate operations
    pub cache_invalidate_operations: AtomicU64,
    /// Memory bandwidth optimization operations
    pub bandwidth_operations: AtomicU64,
    /// Time saved (microseconds)
    pub time_saved_us: AtomicU64,
    /// Average acceleration ratio
    pub avg_acceleration_ratio: AtomicU64, // Fixed point with 2 decimal places
    /// Bytes processed
    pub bytes_processed: AtomicU64,
}

impl Default for MemoryAccelStats {
    fn default() -> Self {
        Self {
            total_operations: AtomicU64::new(0),
            prefetch_operations: AtomicU64::new(0),
            cache_flush_operations: AtomicU64::new(0),
            cache_invalidate_operations: AtomicU64::new(0),
            bandwidth_operations: AtomicU64::new(0),
            time_saved_us: AtomicU64::new(0),
            avg_acceleration_ratio: AtomicU64::new(100), // 1.00 in fixed point
            bytes_processed: AtomicU64::new(0),
        }
    }
}

/// Memory prefetch strategies
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrefetchStrategy {
    /// No prefetching
    None,
    /// Hardware prefetching
    Hardware,
    /// Software prefetching
    Software,
    /// Adaptive prefetching
    Adaptive,
}

/// Cache optimization levels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheOptimizationLevel {
    /// No optimization
    None,
    /// Basic optimization
    Basic,
    /// Standard optimization
    Standard,
    /// Advanced optimization
    Advanced,
    /// Maximum optimization
    Maximum,
}

/// Memory bandwidth optimization modes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BandwidthOptimizationMode {
    /// No optimization
    None,
    /// Sequential access optimization
    Sequential,
    /// Random access optimization
    Random,
    /// Mixed access optimization
    Mixed,
    /// Adaptive optimization
    Adaptive,
}

/// Memory access pattern
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessPattern {
    /// Sequential access
    Sequential,
    /// Random access
    Random,
    /// Strided access
    Strided(usize),
    /// Reverse sequential access
    ReverseSequential,
}

/// Memory hardware accelerator
pub struct MemoryAccelerator {
    /// Prefetch strategy
    prefetch_strategy: PrefetchStrategy,
    /// Cache optimization level
    cache_optimization: CacheOptimizationLevel,
    /// Bandwidth optimization mode
    bandwidth_optimization: BandwidthOptimizationMode,
    /// Cache line size (bytes)
    cache_line_size: usize,
    /// Prefetch distance
    prefetch_distance: usize,
    /// Accelerator statistics
    stats: MemoryAccelStats,
    /// Active status
    active: bool,
}

impl MemoryAccelerator {
    /// Create a new memory accelerator
    pub fn new() -> Result<Self, UnifiedError> {
        let cache_line_size = Self::detect_cache_line_size();
        
        Ok(Self {
            prefetch_strategy: PrefetchStrategy::Hardware,
            cache_optimization: CacheOptimizationLevel::Standard,
            bandwidth_optimization: BandwidthOptimizationMode::Adaptive,
            cache_line_size,
            prefetch_distance: cache_line_size * 8, // Default prefetch distance
            stats: MemoryAccelStats::default(),
            active: true,
        })
    }

    /// Initialize the memory accelerator
    pub fn initialize(&self) -> Result<(), UnifiedError> {
        log::info!("Initializing memory accelerator");
        log::info!("Cache line size: {} bytes", self.cache_line_size);
        log::info!("Prefetch strategy: {:?}", self.prefetch_strategy);
        log::info!("Cache optimization: {:?}", self.cache_optimization);
        log::info!("Bandwidth optimization: {:?}", self.bandwidth_optimization);
        
        // Initialize memory optimization features
        // This would include setting up prefetchers, cache policies, etc.
        
        log::info!("Memory accelerator initialized");
        Ok(())
    }

    /// Detect cache line size
    fn detect_cache_line_size() -> usize {
        // In a real implementation, this would use CPUID or platform-specific methods
        // For now, we'll use a common default
        64 // Most modern CPUs have 64-byte cache lines
    }

    /// Get cache line size
    pub fn get_cache_line_size(&self) -> usize {
        self.cache_line_size
    }

    /// Get prefetch strategy
    pub fn get_prefetch_strategy(&self) -> PrefetchStrategy {
        self.prefetch_strategy
    }

    /// Set prefetch strategy
    pub fn set_prefetch_strategy(&mut self, strategy: PrefetchStrategy) {
        self.prefetch_strategy = strategy;
        log::debug!("Prefetch strategy set to {:?}", strategy);
    }

    /// Get cache optimization level
    pub fn get_cache_optimization(&self) -> CacheOptimizationLevel {
        self.cache_optimization
    }

    /// Set cache optimization level
    pub fn set_cache_optimization(&mut self, level: CacheOptimizationLevel) {
        self.cache_optimization = level;
        log::debug!("Cache optimization set to {:?}", level);
    }

    /// Get bandwidth optimization mode
    pub fn get_bandwidth_optimization(&self) -> BandwidthOptimizationMode {
        self.bandwidth_optimization
    }

    /// Set bandwidth optimization mode
    pub fn set_bandwidth_optimization(&mut self, mode: BandwidthOptimizationMode) {
        self.bandwidth_optimization = mode;
        log::debug!("Bandwidth optimization set to {:?}", mode);
    }

    /// Check if accelerator is available
    pub fn is_available(&self) -> bool {
        self.active
    }

    /// Check if accelerator is optimized
    pub fn is_optimized(&self) -> bool {
        self.active && 
        (self.cache_optimization >= CacheOptimizationLevel::Standard ||
         self.prefetch_strategy != PrefetchStrategy::None ||
         self.bandwidth_optimization != BandwidthOptimizationMode::None)
    }

    /// Get operation count
    pub fn get_operation_count(&self) -> u64 {
        self.stats.total_operations.load(Ordering::Relaxed)
    }

    /// Get acceleration ratio
    pub fn get_acceleration_ratio(&self) -> f64 {
        self.stats.avg_acceleration_ratio.load(Ordering::Relaxed) as f64 / 100.0
    }

    /// Get time saved
    pub fn get_time_saved_us(&self) -> u64 {
        self.stats.time_saved_us.load(Ordering::Relaxed)
    }

    /// Reset statistics
    pub fn reset_stats(&self) {
        self.stats.total_operations.store(0, Ordering::Relaxed);
        self.stats.prefetch_operations.store(0, Ordering::Relaxed);
        self.stats.cache_flush_operations.store(0, Ordering::Relaxed);
        self.stats.cache_invalidate_operations.store(0, Ordering::Relaxed);
        self.stats.bandwidth_operations.store(0, Ordering::Relaxed);
        self.stats.time_saved_us.store(0, Ordering::Relaxed);
        self.stats.avg_acceleration_ratio.store(100, Ordering::Relaxed);
        self.stats.bytes_processed.store(0, Ordering::Relaxed);
    }

    /// Optimize memory accelerator
    pub fn optimize(&self) -> Result<(), UnifiedError> {
        if !self.active {
            return Err(UnifiedError::HwAccel("Memory accelerator is not active".to_string()));
        }
        
        // Enable memory-specific optimizations
        // This would include tuning prefetchers, cache policies, etc.
        
        log::info!("Memory accelerator optimized");
        Ok(())
    }

    /// Prefetch memory
    pub fn prefetch(&self, addr: usize, size: usize, pattern: AccessPattern) -> Result<(), UnifiedError> {
        if !self.is_available() {
            return Err(UnifiedError::HwAccel("Memory accelerator not available".to_string()));
        }
        
        if self.prefetch_strategy == PrefetchStrategy::None {
            return Ok(());
        }
        
        let start_time = self.get_timestamp();
        
        match self.prefetch_strategy {
            PrefetchStrategy::Hardware => {
                self.hardware_prefetch(addr, size, pattern);
            }
            PrefetchStrategy::Software => {
                self.software_prefetch(addr, size, pattern);
            }
            PrefetchStrategy::Adaptive => {
                self.adaptive_prefetch(addr, size, pattern);
            }
            _ => {}
        }
        
        let end_time = self.get_timestamp();
        let elapsed = end_time - start_time;
        
        // Update statistics
        self.stats.prefetch_operations.fetch_add(1, Ordering::Relaxed);
        self.stats.total_operations.fetch_add(1, Ordering::Relaxed);
        self.stats.bytes_processed.fetch_add(size as u64, Ordering::Relaxed);
        self.update_time_stats(elapsed, size);
        
        log::debug!("Prefetched {} bytes at address 0x{:x} in {}μs", size, addr, elapsed);
        Ok(())
    }

    /// Hardware prefetch
    fn hardware_prefetch(&self, addr: usize, size: usize, pattern: AccessPattern) {
        #[cfg(target_arch = "x86_64")]
        {
            use core::arch::x86_64::*;
            
            let mut current_addr = addr;
            let end_addr = addr + size;
            
            unsafe {
                while current_addr < end_addr {
                    match pattern {
                        AccessPattern::Sequential => {
                            _mm_prefetch8(current_addr as *const i8, _MM_HINT_T0);
                            current_addr += self.prefetch_distance;
                        }
                        AccessPattern::Strided(stride) => {
                            _mm_prefetch8(current_addr as *const i8, _MM_HINT_T0);
                            current_addr += stride;
                        }
                        AccessPattern::ReverseSequential => {
                            _mm_prefetch8(current_addr as *const i8, _MM_HINT_T0);
                            if current_addr >= self.prefetch_distance {
                                current_addr -= self.prefetch_distance;
                            } else {
                                break;
                            }
                        }
                        _ => {
                            // For random access, prefetch multiple cache lines ahead
                            for i in 0..4 {
                                let prefetch_addr = current_addr + i * self.cache_line_size;
                                if prefetch_addr < end_addr {
                                    _mm_prefetch8(prefetch_addr as *const i8, _MM_HINT_T0);
                                }
                            }
                            current_addr += self.cache_line_size * 4;
                        }
                    }
                }
            }
        }
    }

    /// Software prefetch
    fn software_prefetch(&self, addr: usize, size: usize, pattern: AccessPattern) {
        // Software prefetching using dummy reads
        let mut current_addr = addr;
        let end_addr = addr + size;
        
        while current_addr < end_addr {
            match pattern {
                AccessPattern::Sequential => {
                    // Touch the cache line
                    unsafe {
                        let ptr = current_addr as *const u8;
                        core::ptr::read_volatile(ptr);
                    }
                    current_addr += self.prefetch_distance;
                }
                AccessPattern::Strided(stride) => {
                    unsafe {
                        let ptr = current_addr as *const u8;
                        core::ptr::read_volatile(ptr);
                    }
                    current_addr += stride;
                }
                AccessPattern::ReverseSequential => {
                    unsafe {
                        let ptr = current_addr as *const u8;
                        core::ptr::read_volatile(ptr);
                    }
                    if current_addr >= self.prefetch_distance {
                        current_addr -= self.prefetch_distance;
                    } else {
                        break;
                    }
                }
                _ => {
                    // For random access, prefetch multiple cache lines ahead
                    for i in 0..4 {
                        let prefetch_addr = current_addr + i * self.cache_line_size;
                        if prefetch_addr < end_addr {
                            unsafe {
                                let ptr = prefetch_addr as *const u8;
                                core::ptr::read_volatile(ptr);
                            }
                        }
                    }
                    current_addr += self.cache_line_size * 4;
                }
            }
        }
    }

    /// Adaptive prefetch
    fn adaptive_prefetch(&self, addr: usize, size: usize, pattern: AccessPattern) {
        // Choose prefetch strategy based on pattern and size
        if size > 64 * 1024 { // Large data
            self.hardware_prefetch(addr, size, pattern);
        } else {
            self.software_prefetch(addr, size, pattern);
        }
    }

    /// Flush cache
    pub fn flush_cache(&self, addr: usize, size: usize) -> Result<(), UnifiedError> {
        if !self.is_available() {
            return Err(UnifiedError::HwAccel("Memory accelerator not available".to_string()));
        }
        
        let start_time = self.get_timestamp();
        
        #[cfg(target_arch = "x86_64")]
        {
            use core::arch::x86_64::*;
            
            let mut current_addr = addr;
            let end_addr = addr + size;
            
            unsafe {
                while current_addr < end_addr {
                    _mm_clflush(current_addr as *const u8);
                    current_addr += self.cache_line_size;
                }
                
                // Ensure all flushes complete
                    _mm_sfence();
            }
        }
        
        let end_time = self.get_timestamp();
        let elapsed = end_time - start_time;
        
        // Update statistics
        self.stats.cache_flush_operations.fetch_add(1, Ordering::Relaxed);
        self.stats.total_operations.fetch_add(1, Ordering::Relaxed);
        self.stats.bytes_processed.fetch_add(size as u64, Ordering::Relaxed);
        self.update_time_stats(elapsed, size);
        
        log::debug!("Flushed {} bytes at address 0x{:x} in {}μs", size, addr, elapsed);
        Ok(())
    }

    /// Invalidate cache
    pub fn invalidate_cache(&self, addr: usize, size: usize) -> Result<(), UnifiedError> {
        if !self.is_available() {
            return Err(UnifiedError::HwAccel("Memory accelerator not available".to_string()));
        }
        
        let start_time = self.get_timestamp();
        
        // Cache invalidation implementation
        // This would be platform-specific
        
        let end_time = self.get_timestamp();
        let elapsed = end_time - start_time;
        
        // Update statistics
        self.stats.cache_invalidate_operations.fetch_add(1, Ordering::Relaxed);
        self.stats.total_operations.fetch_add(1, Ordering::Relaxed);
        self.stats.bytes_processed.fetch_add(size as u64, Ordering::Relaxed);
        self.update_time_stats(elapsed, size);
        
        log::debug!("Invalidated {} bytes at address 0x{:x} in {}μs", size, addr, elapsed);
        Ok(())
    }

    /// Optimize memory bandwidth
    pub fn optimize_bandwidth(&self, addr: usize, size: usize, pattern: AccessPattern) -> Result<(), UnifiedError> {
        if !self.is_available() {
            return Err(UnifiedError::HwAccel("Memory accelerator not available".to_string()));
        }
        
        let start_time = self.get_timestamp();
        
        match self.bandwidth_optimization {
            BandwidthOptimizationMode::Sequential => {
                self.optimize_sequential_access(addr, size);
            }
            BandwidthOptimizationMode::Random => {
                self.optimize_random_access(addr, size);
            }
            BandwidthOptimizationMode::Mixed => {
                self.optimize_mixed_access(addr, size, pattern);
            }
            BandwidthOptimizationMode::Adaptive => {
                self.optimize_adaptive_access(addr, size, pattern);
            }
            _ => {}
        }
        
        let end_time = self.get_timestamp();
        let elapsed = end_time - start_time;
        
        // Update statistics
        self.stats.bandwidth_operations.fetch_add(1, Ordering::Relaxed);
        self.stats.total_operations.fetch_add(1, Ordering::Relaxed);
        self.stats.bytes_processed.fetch_add(size as u64, Ordering::Relaxed);
        self.update_time_stats(elapsed, size);
        
        log::debug!("Optimized bandwidth for {} bytes at address 0x{:x} in {}μs", size, addr, elapsed);
        Ok(())
    }

    /// Optimize sequential access
    fn optimize_sequential_access(&self, addr: usize, size: usize) {
        // Align to cache line boundaries
        let aligned_addr = addr & !(self.cache_line_size - 1);
        let aligned_size = ((size + (addr - aligned_addr) + self.cache_line_size - 1) & !(self.cache_line_size - 1));
        
        // Prefetch ahead
        self.prefetch(aligned_addr, aligned_size, AccessPattern::Sequential).ok();
    }

    /// Optimize random access
    fn optimize_random_access(&self, addr: usize, size: usize) {
        // For random access, prefetch multiple cache lines
        let mut current_addr = addr;
        let end_addr = addr + size;
        
        while current_addr < end_addr {
            self.prefetch(current_addr, self.cache_line_size * 4, AccessPattern::Random).ok();
            current_addr += self.cache_line_size * 4;
        }
    }

    /// Optimize mixed access
    fn optimize_mixed_access(&self, addr: usize, size: usize, pattern: AccessPattern) {
        // Use pattern-specific optimization
        self.prefetch(addr, size, pattern).ok();
    }

    /// Optimize adaptive access
    fn optimize_adaptive_access(&self, addr: usize, size: usize, pattern: AccessPattern) {
        // Choose optimization based on size and pattern
        if size > 1024 * 1024 { // Large data
            self.optimize_sequential_access(addr, size);
        } else {
            self.optimize_mixed_access(addr, size, pattern);
        }
    }

    /// Get current timestamp (in microseconds)
    fn get_timestamp(&self) -> u64 {
        // In a real implementation, this would use a high-precision timer
        static COUNTER: core::sync::atomic::AtomicU64 = core::sync::atomic::AtomicU64::new(0);
        COUNTER.fetch_add(1, Ordering::Relaxed)
    }

    /// Update time statistics
    fn update_time_stats(&self, elapsed: u64, bytes_processed: usize) {
        // Estimate time saved compared to unoptimized memory access
        let baseline_time = if self.is_optimized() {
            elapsed * 2 // Assume optimized memory access is 2x faster
        } else {
            elapsed
        };
        
        let time_saved = if elapsed < baseline_time { baseline_time - elapsed } else { 0 };
        
        self.stats.time_saved_us.fetch_add(time_saved, Ordering::Relaxed);
        
        // Update average acceleration ratio
        let current_ratio = if elapsed > 0 { (baseline_time * 100) / elapsed } else { 100 };
        let current_avg = self.stats.avg_acceleration_ratio.load(Ordering::Relaxed);
        let new_avg = (current_avg + current_ratio) / 2;
        self.stats.avg_acceleration_ratio.store(new_avg, Ordering::Relaxed);
    }
}