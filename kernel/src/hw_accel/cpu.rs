//! CPU Hardware Acceleration Module
//! 
//! This module provides CPU-specific hardware acceleration features including
//! instruction set extensions, CPU feature detection, and optimization.

use crate::error::unified::UnifiedError;
use core::arch::x86_64::*;
use core::sync::atomic::{AtomicU64, AtomicUsize, Ordering};

/// CPU feature flags
#[derive(Debug, Clone, Copy)]
pub struct CPUFeatures {
    /// SSE support
    pub sse: bool,
    /// SSE2 support
    pub sse2: bool,
    /// SSE3 support
    pub sse3: bool,
    /// SSSE3 support
    pub ssse3: bool,
    /// SSE4.1 support
    pub sse4_1: bool,
    /// SSE4.2 support
    pub sse4_2: bool,
    /// AVX support
    pub avx: bool,
    /// AVX2 support
    pub avx2: bool,
    /// AVX512F support
    pub avx512f: bool,
    /// FMA support
    pub fma: bool,
    /// BMI1 support
    pub bmi1: bool,
    /// BMI2 support
    pub bmi2: bool,
    /// AES-NI support
    pub aes_ni: bool,
    /// CLMUL support
    pub clmul: bool,
    /// RDRAND support
    pub rdrand: bool,
    /// RDSEED support
    pub rdseed: bool,
    /// LZCNT support
    pub lzcnt: bool,
    /// POPCNT support
    pub popcnt: bool,
    /// MOVBE support
    pub movbe: bool,
    /// XSAVE support
    pub xsave: bool,
    /// XSAVEOPT support
    pub xsaveopt: bool,
}

impl Default for CPUFeatures {
    fn default() -> Self {
        Self {
            sse: false,
            sse2: false,
            sse3: false,
            ssse3: false,
            sse4_1: false,
            sse4_2: false,
            avx: false,
            avx2: false,
            avx512f: false,
            fma: false,
            bmi1: false,
            bmi2: false,
            aes_ni: false,
            clmul: false,
            rdrand: false,
            rdseed: false,
            lzcnt: false,
            popcnt: false,
            movbe: false,
            xsave: false,
            xsaveopt: false,
        }
    }
}

/// CPU accelerator statistics
#[derive(Debug, Clone)]
pub struct CPUAccelStats {
    /// Total operations
    pub total_operations: AtomicU64,
    /// SSE operations
    pub sse_operations: AtomicU64,
    /// AVX operations
    pub avx_operations: AtomicU64,
    /// AVX512 operations
    pub avx512_operations: AtomicU64,
    /// Time saved (microseconds)
    pub time_saved_us: AtomicU64,
    /// Average acceleration ratio
    pub avg_acceleration_ratio: AtomicU64, // Fixed point with 2 decimal places
}

impl Default for CPUAccelStats {
    fn default() -> Self {
        Self {
            total_operations: AtomicU64::new(0),
            sse_operations: AtomicU64::new(0),
            avx_operations: AtomicU64::new(0),
            avx512_operations: AtomicU64::new(0),
            time_saved_us: AtomicU64::new(0),
            avg_acceleration_ratio: AtomicU64::new(100), // 1.00 in fixed point
        }
    }
}

/// CPU hardware accelerator
pub struct CPUAccelerator {
    /// CPU features
    features: CPUFeatures,
    /// CPU cache information
    cache_info: CPUCacheInfo,
    /// Accelerator statistics
    stats: CPUAccelStats,
    /// Optimization level
    optimization_level: CPUOptimizationLevel,
    /// Active status
    active: bool,
}

/// CPU cache information
#[derive(Debug, Clone)]
pub struct CPUCacheInfo {
    /// L1 cache size (bytes)
    pub l1_size: usize,
    /// L1 cache line size (bytes)
    pub l1_line_size: usize,
    /// L2 cache size (bytes)
    pub l2_size: usize,
    /// L2 cache line size (bytes)
    pub l2_line_size: usize,
    /// L3 cache size (bytes)
    pub l3_size: usize,
    /// L3 cache line size (bytes)
    pub l3_line_size: usize,
    /// Number of cache levels
    pub cache_levels: u8,
}

impl Default for CPUCacheInfo {
    fn default() -> Self {
        Self {
            l1_size: 32 * 1024,      // 32KB
            l1_line_size: 64,        // 64 bytes
            l2_size: 256 * 1024,     // 256KB
            l2_line_size: 64,        // 64 bytes
            l3_size: 8 * 1024 * 1024, // 8MB
            l3_line_size: 64,        // 64 bytes
            cache_levels: 3,
        }
    }
}

/// CPU optimization levels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CPUOptimizationLevel {
    /// No optimization
    None,
    /// Basic optimization (SSE)
    Basic,
    /// Standard optimization (SSE2, SSE3)
    Standard,
    /// Advanced optimization (SSE4, AVX)
    Advanced,
    /// Maximum optimization (AVX2, AVX512)
    Maximum,
}

impl CPUAccelerator {
    /// Create a new CPU accelerator
    pub fn new() -> Result<Self, UnifiedError> {
        let features = Self::detect_cpu_features();
        let cache_info = Self::detect_cache_info();
        let optimization_level = Self::determine_optimization_level(&features);
        
        Ok(Self {
            features,
            cache_info,
            stats: CPUAccelStats::default(),
            optimization_level,
            active: true,
        })
    }

    /// Initialize the CPU accelerator
    pub fn initialize(&self) -> Result<(), UnifiedError> {
        log::info!("Initializing CPU accelerator with optimization level: {:?}", self.optimization_level);
        
        // Enable CPU-specific optimizations
        match self.optimization_level {
            CPUOptimizationLevel::None => {
                log::warn!("No CPU optimizations available");
            }
            CPUOptimizationLevel::Basic => {
                log::info!("Basic CPU optimizations enabled (SSE)");
            }
            CPUOptimizationLevel::Standard => {
                log::info!("Standard CPU optimizations enabled (SSE2, SSE3)");
            }
            CPUOptimizationLevel::Advanced => {
                log::info!("Advanced CPU optimizations enabled (SSE4, AVX)");
            }
            CPUOptimizationLevel::Maximum => {
                log::info!("Maximum CPU optimizations enabled (AVX2, AVX512)");
            }
        }
        
        Ok(())
    }

    /// Detect CPU features
    fn detect_cpu_features() -> CPUFeatures {
        let mut features = CPUFeatures::default();
        
        #[cfg(target_arch = "x86_64")]
        {
            // Use CPUID instruction to detect features
            unsafe {
                // Basic feature detection
                let cpuid_result = __cpuid(1);
                features.sse = (cpuid_result.edx & (1 << 25)) != 0;
                features.sse2 = (cpuid_result.edx & (1 << 26)) != 0;
                features.sse3 = (cpuid_result.ecx & (1 << 0)) != 0;
                features.ssse3 = (cpuid_result.ecx & (1 << 9)) != 0;
                features.sse4_1 = (cpuid_result.ecx & (1 << 19)) != 0;
                features.sse4_2 = (cpuid_result.ecx & (1 << 20)) != 0;
                features.aes_ni = (cpuid_result.ecx & (1 << 25)) != 0;
                features.clmul = (cpuid_result.ecx & (1 << 1)) != 0;
                features.rdrand = (cpuid_result.ecx & (1 << 30)) != 0;
                features.popcnt = (cpuid_result.ecx & (1 << 23)) != 0;
                features.movbe = (cpuid_result.ecx & (1 << 22)) != 0;
                features.xsave = (cpuid_result.ecx & (1 << 26)) != 0;
                
                // Extended feature detection
                let extended_cpuid = __cpuid_count(7, 0);
                features.avx2 = (extended_cpuid.ebx & (1 << 5)) != 0;
                features.bmi1 = (extended_cpuid.ebx & (1 << 3)) != 0;
                features.bmi2 = (extended_cpuid.ebx & (1 << 8)) != 0;
                features.avx512f = (extended_cpuid.ebx & (1 << 16)) != 0;
                features.rdseed = (extended_cpuid.ebx & (1 << 18)) != 0;
                features.lzcnt = (extended_cpuid.ebx & (1 << 5)) != 0;
                
                // Check for AVX support
                let xcr0 = _xgetbv(0);
                features.avx = (xcr0 & 6) == 6;
                features.fma = (cpuid_result.ecx & (1 << 12)) != 0 && features.avx;
                
                // Check for XSAVEOPT
                let extended_cpuid_8000_0001 = __cpuid(0x80000001);
                features.xsaveopt = (extended_cpuid_8000_0001.ecx & (1 << 27)) != 0;
            }
        }
        
        #[cfg(target_arch = "aarch64")]
        {
            // ARM64 feature detection would go here
            features.neon = true; // ARM64 always has NEON
            // Add other ARM64 specific features
        }
        
        features
    }

    /// Detect cache information
    fn detect_cache_info() -> CPUCacheInfo {
        // Default cache information - in a real implementation, this would
        // use CPUID or platform-specific methods to detect actual cache sizes
        CPUCacheInfo::default()
    }

    /// Determine optimization level based on available features
    fn determine_optimization_level(features: &CPUFeatures) -> CPUOptimizationLevel {
        if features.avx512f && features.avx2 {
            CPUOptimizationLevel::Maximum
        } else if features.avx && features.sse4_2 {
            CPUOptimizationLevel::Advanced
        } else if features.sse3 && features.sse2 {
            CPUOptimizationLevel::Standard
        } else if features.sse {
            CPUOptimizationLevel::Basic
        } else {
            CPUOptimizationLevel::None
        }
    }

    /// Get CPU features
    pub fn get_features(&self) -> CPUFeatures {
        self.features
    }

    /// Get cache information
    pub fn get_cache_info(&self) -> CPUCacheInfo {
        self.cache_info.clone()
    }

    /// Get optimization level
    pub fn get_optimization_level(&self) -> CPUOptimizationLevel {
        self.optimization_level
    }

    /// Check if the accelerator is available
    pub fn is_available(&self) -> bool {
        self.active && self.optimization_level != CPUOptimizationLevel::None
    }

    /// Check if the accelerator is optimized
    pub fn is_optimized(&self) -> bool {
        self.active && self.optimization_level >= CPUOptimizationLevel::Standard
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
        self.stats.sse_operations.store(0, Ordering::Relaxed);
        self.stats.avx_operations.store(0, Ordering::Relaxed);
        self.stats.avx512_operations.store(0, Ordering::Relaxed);
        self.stats.time_saved_us.store(0, Ordering::Relaxed);
        self.stats.avg_acceleration_ratio.store(100, Ordering::Relaxed);
    }

    /// Optimize the CPU accelerator
    pub fn optimize(&self) -> Result<(), UnifiedError> {
        if !self.active {
            return Err(UnifiedError::HwAccel("CPU accelerator is not active".to_string()));
        }
        
        // Enable CPU-specific optimizations
        // This would include setting CPU affinity, power management, etc.
        
        log::info!("CPU accelerator optimized");
        Ok(())
    }

    /// Perform accelerated memory copy
    pub fn accelerated_memcpy(&self, dest: *mut u8, src: *const u8, len: usize) -> Result<(), UnifiedError> {
        if !self.is_available() {
            return Err(UnifiedError::HwAccel("CPU accelerator not available".to_string()));
        }
        
        let start_time = self.get_timestamp();
        
        #[cfg(target_arch = "x86_64")]
        unsafe {
            if self.features.avx && len >= 256 {
                self.avx_memcpy(dest, src, len);
                self.stats.avx_operations.fetch_add(1, Ordering::Relaxed);
            } else if self.features.sse2 && len >= 128 {
                self.sse_memcpy(dest, src, len);
                self.stats.sse_operations.fetch_add(1, Ordering::Relaxed);
            } else {
                self.basic_memcpy(dest, src, len);
            }
        }
        
        #[cfg(not(target_arch = "x86_64"))]
        unsafe {
            self.basic_memcpy(dest, src, len);
        }
        
        let end_time = self.get_timestamp();
        let elapsed = end_time - start_time;
        
        // Update statistics
        self.stats.total_operations.fetch_add(1, Ordering::Relaxed);
        self.update_time_stats(elapsed, len);
        
        Ok(())
    }

    /// Perform accelerated memory set
    pub fn accelerated_memset(&self, dest: *mut u8, value: u8, len: usize) -> Result<(), UnifiedError> {
        if !self.is_available() {
            return Err(UnifiedError::HwAccel("CPU accelerator not available".to_string()));
        }
        
        let start_time = self.get_timestamp();
        
        #[cfg(target_arch = "x86_64")]
        unsafe {
            if self.features.avx && len >= 256 {
                self.avx_memset(dest, value, len);
                self.stats.avx_operations.fetch_add(1, Ordering::Relaxed);
            } else if self.features.sse2 && len >= 128 {
                self.sse_memset(dest, value, len);
                self.stats.sse_operations.fetch_add(1, Ordering::Relaxed);
            } else {
                self.basic_memset(dest, value, len);
            }
        }
        
        #[cfg(not(target_arch = "x86_64"))]
        unsafe {
            self.basic_memset(dest, value, len);
        }
        
        let end_time = self.get_timestamp();
        let elapsed = end_time - start_time;
        
        // Update statistics
        self.stats.total_operations.fetch_add(1, Ordering::Relaxed);
        self.update_time_stats(elapsed, len);
        
        Ok(())
    }

    /// Get current timestamp (in microseconds)
    fn get_timestamp(&self) -> u64 {
        // In a real implementation, this would use a high-precision timer
        // For now, we'll use a simple counter
        static COUNTER: AtomicU64 = AtomicU64::new(0);
        COUNTER.fetch_add(1, Ordering::Relaxed)
    }

    /// Update time statistics
    fn update_time_stats(&self, elapsed: u64, len: usize) {
        // Estimate time saved compared to basic implementation
        let baseline_time = len as u64 / 4; // Rough estimate
        let time_saved = if elapsed < baseline_time { baseline_time - elapsed } else { 0 };
        
        self.stats.time_saved_us.fetch_add(time_saved, Ordering::Relaxed);
        
        // Update average acceleration ratio
        let current_ratio = if elapsed > 0 { (baseline_time * 100) / elapsed } else { 100 };
        let current_avg = self.stats.avg_acceleration_ratio.load(Ordering::Relaxed);
        let new_avg = (current_avg + current_ratio) / 2;
        self.stats.avg_acceleration_ratio.store(new_avg, Ordering::Relaxed);
    }

    /// Basic memory copy implementation
    unsafe fn basic_memcpy(&self, dest: *mut u8, src: *const u8, len: usize) {
        let mut i = 0;
        while i < len {
            *dest.add(i) = *src.add(i);
            i += 1;
        }
    }

    /// SSE2 memory copy implementation
    #[cfg(target_arch = "x86_64")]
    unsafe fn sse_memcpy(&self, dest: *mut u8, src: *const u8, len: usize) {
        let mut i = 0;
        let sse_len = len & !15; // Round down to 16-byte boundary
        
        // Copy 16 bytes at a time using SSE2
        while i < sse_len {
            let data = _mm_loadu_si128(src.add(i) as *const __m128i);
            _mm_storeu_si128(dest.add(i) as *mut __m128i, data);
            i += 16;
        }
        
        // Copy remaining bytes
        while i < len {
            *dest.add(i) = *src.add(i);
            i += 1;
        }
    }

    /// AVX memory copy implementation
    #[cfg(target_arch = "x86_64")]
    unsafe fn avx_memcpy(&self, dest: *mut u8, src: *const u8, len: usize) {
        let mut i = 0;
        let avx_len = len & !31; // Round down to 32-byte boundary
        
        // Copy 32 bytes at a time using AVX
        while i < avx_len {
            let data = _mm256_loadu_si256(src.add(i) as *const __m256i);
            _mm256_storeu_si256(dest.add(i) as *mut __m256i, data);
            i += 32;
        }
        
        // Copy remaining bytes
        while i < len {
            *dest.add(i) = *src.add(i);
            i += 1;
        }
    }

    /// Basic memory set implementation
    unsafe fn basic_memset(&self, dest: *mut u8, value: u8, len: usize) {
        let mut i = 0;
        while i < len {
            *dest.add(i) = value;
            i += 1;
        }
    }

    /// SSE2 memory set implementation
    #[cfg(target_arch = "x86_64")]
    unsafe fn sse_memset(&self, dest: *mut u8, value: u8, len: usize) {
        // Create a 16-byte pattern
        let pattern = _mm_set1_epi8(value as i8);
        let mut i = 0;
        let sse_len = len & !15; // Round down to 16-byte boundary
        
        // Set 16 bytes at a time using SSE2
        while i < sse_len {
            _mm_storeu_si128(dest.add(i) as *mut __m128i, pattern);
            i += 16;
        }
        
        // Set remaining bytes
        while i < len {
            *dest.add(i) = value;
            i += 1;
        }
    }

    /// AVX memory set implementation
    #[cfg(target_arch = "x86_64")]
    unsafe fn avx_memset(&self, dest: *mut u8, value: u8, len: usize) {
        // Create a 32-byte pattern
        let pattern = _mm256_set1_epi8(value as i8);
        let mut i = 0;
        let avx_len = len & !31; // Round down to 32-byte boundary
        
        // Set 32 bytes at a time using AVX
        while i < avx_len {
            _mm256_storeu_si256(dest.add(i) as *mut __m256i, pattern);
            i += 32;
        }
        
        // Set remaining bytes
        while i < len {
            *dest.add(i) = value;
            i += 1;
        }
    }
}