//! Vector Processing Hardware Acceleration Module
//! 
//! This module provides SIMD and vector processing acceleration features including
//! vectorized operations, SIMD instruction sets, and vector math functions.

use crate::error::unified::UnifiedError;
use core::sync::atomic::{AtomicU64, Ordering};

/// Vector accelerator statistics
#[derive(Debug, Clone)]
pub struct VectorAccelStats {
    /// Total operations
    pub total_operations: AtomicU64,
    /// Vector addition operations
    pub add_operations: AtomicU64,
    /// Vector subtraction operations
    pub sub_operations: AtomicU64,
    /// Vector multiplication operations
    pub mul_operations: AtomicU64,
    /// Vector division operations
    pub div_operations: AtomicU64,
    /// Dot product operations
    pub dot_operations: AtomicU64,
    /// Matrix multiplication operations
    pub matmul_operations: AtomicU64,
    /// Time saved (microseconds)
    pub time_saved_us: AtomicU64,
    /// Average acceleration ratio
    pub avg_acceleration_ratio: AtomicU64, // Fixed point with 2 decimal places
    /// Elements processed
    pub elements_processed: AtomicU64,
}

impl Default for VectorAccelStats {
    fn default() -> Self {
        Self {
            total_operations: AtomicU64::new(0),
            add_operations: AtomicU64::new(0),
            sub_operations: AtomicU64::new(0),
            mul_operations: AtomicU64::new(0),
            div_operations: AtomicU64::new(0),
            dot_operations: AtomicU64::new(0),
            matmul_operations: AtomicU64::new(0),
            time_saved_us: AtomicU64::new(0),
            avg_acceleration_ratio: AtomicU64::new(100), // 1.00 in fixed point
            elements_processed: AtomicU64::new(0),
        }
    }
}

/// SIMD instruction sets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SIMDInstructionSet {
    /// No SIMD support
    None,
    /// MMX
    MMX,
    /// SSE
    SSE,
    /// SSE2
    SSE2,
    /// SSE3
    SSE3,
    /// SSSE3
    SSSE3,
    /// SSE4.1
    SSE4_1,
    /// SSE4.2
    SSE4_2,
    /// AVX
    AVX,
    /// AVX2
    AVX2,
    /// AVX512F
    AVX512F,
    /// AVX512BW
    AVX512BW,
    /// AVX512DQ
    AVX512DQ,
    /// AVX512VL
    AVX512VL,
    /// NEON (ARM)
    NEON,
    /// SVE (ARM)
    SVE,
}

/// Vector data types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VectorDataType {
    /// 8-bit signed integer
    I8,
    /// 16-bit signed integer
    I16,
    /// 32-bit signed integer
    I32,
    /// 64-bit signed integer
    I64,
    /// 8-bit unsigned integer
    U8,
    /// 16-bit unsigned integer
    U16,
    /// 32-bit unsigned integer
    U32,
    /// 64-bit unsigned integer
    U64,
    /// 32-bit floating point
    F32,
    /// 64-bit floating point
    F64,
}

/// Vector operation types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VectorOperation {
    /// Element-wise addition
    Add,
    /// Element-wise subtraction
    Sub,
    /// Element-wise multiplication
    Mul,
    /// Element-wise division
    Div,
    /// Dot product
    Dot,
    /// Matrix multiplication
    MatMul,
    /// Element-wise minimum
    Min,
    /// Element-wise maximum
    Max,
    /// Element-wise absolute value
    Abs,
    /// Element-wise square root
    Sqrt,
    /// Element-wise sine
    Sin,
    /// Element-wise cosine
    Cos,
    /// Element-wise exponential
    Exp,
    /// Element-wise logarithm
    Log,
}

/// Vector processing hardware accelerator
pub struct VectorAccelerator {
    /// Supported SIMD instruction sets
    supported_simd: SIMDInstructionSet,
    /// Vector register width (bytes)
    vector_width: usize,
    /// Accelerator statistics
    stats: VectorAccelStats,
    /// Active status
    active: bool,
}

impl VectorAccelerator {
    /// Create a new vector accelerator
    pub fn new() -> Result<Self, UnifiedError> {
        let (supported_simd, vector_width) = Self::detect_simd_support();
        
        Ok(Self {
            supported_simd,
            vector_width,
            stats: VectorAccelStats::default(),
            active: true,
        })
    }

    /// Initialize the vector accelerator
    pub fn initialize(&self) -> Result<(), UnifiedError> {
        log::info!("Initializing vector accelerator with SIMD support: {:?}", self.supported_simd);
        log::info!("Vector register width: {} bytes", self.vector_width);
        
        // Initialize vector processing units
        // This would include setting up SIMD registers, etc.
        
        log::info!("Vector accelerator initialized");
        Ok(())
    }

    /// Detect SIMD support
    fn detect_simd_support() -> (SIMDInstructionSet, usize) {
        #[cfg(target_arch = "x86_64")]
        {
            // Use CPUID to detect SIMD instruction sets
            unsafe {
                let cpuid_result = core::arch::x86_64::__cpuid(1);
                let sse = (cpuid_result.edx & (1 << 25)) != 0;
                let sse2 = (cpuid_result.edx & (1 << 26)) != 0;
                let sse3 = (cpuid_result.ecx & (1 << 0)) != 0;
                let ssse3 = (cpuid_result.ecx & (1 << 9)) != 0;
                let sse4_1 = (cpuid_result.ecx & (1 << 19)) != 0;
                let sse4_2 = (cpuid_result.ecx & (1 << 20)) != 0;
                let avx = (cpuid_result.ecx & (1 << 28)) != 0;
                
                let extended_cpuid = core::arch::x86_64::__cpuid_count(7, 0);
                let avx2 = (extended_cpuid.ebx & (1 << 5)) != 0;
                let avx512f = (extended_cpuid.ebx & (1 << 16)) != 0;
                let avx512bw = (extended_cpuid.ebx & (1 << 30)) != 0;
                let avx512dq = (extended_cpuid.ebx & (1 << 17)) != 0;
                let avx512vl = (extended_cpuid.ebx & (1 << 31)) != 0;
                
                // Determine the highest supported SIMD instruction set
                if avx512f && avx512bw && avx512dq && avx512vl {
                    return (SIMDInstructionSet::AVX512VL, 64); // 512-bit registers
                } else if avx2 {
                    return (SIMDInstructionSet::AVX2, 32); // 256-bit registers
                } else if avx {
                    return (SIMDInstructionSet::AVX, 32); // 256-bit registers
                } else if sse4_2 {
                    return (SIMDInstructionSet::SSE4_2, 16); // 128-bit registers
                } else if sse4_1 {
                    return (SIMDInstructionSet::SSE4_1, 16); // 128-bit registers
                } else if ssse3 {
                    return (SIMDInstructionSet::SSSE3, 16); // 128-bit registers
                } else if sse3 {
                    return (SIMDInstructionSet::SSE3, 16); // 128-bit registers
                } else if sse2 {
                    return (SIMDInstructionSet::SSE2, 16); // 128-bit registers
                } else if sse {
                    return (SIMDInstructionSet::SSE, 16); // 128-bit registers
                } else {
                    return (SIMDInstructionSet::None, 0);
                }
            }
        }
        
        #[cfg(target_arch = "aarch64")]
        {
            // ARM64 SIMD detection would go here
            // For now, assume NEON is available
            (SIMDInstructionSet::NEON, 16) // 128-bit registers
        }
        
        #[cfg(not(any(target_arch = "x86_64", target_arch = "aarch64")))]
        {
            (SIMDInstructionSet::None, 0)
        }
    }

    /// Get supported SIMD instruction set
    pub fn get_supported_simd(&self) -> SIMDInstructionSet {
        self.supported_simd
    }

    /// Get vector width
    pub fn get_vector_width(&self) -> usize {
        self.vector_width
    }

    /// Check if the accelerator is available
    pub fn is_available(&self) -> bool {
        self.active && self.supported_simd != SIMDInstructionSet::None
    }

    /// Check if the accelerator is optimized
    pub fn is_optimized(&self) -> bool {
        self.active && (self.supported_simd == SIMDInstructionSet::AVX2 || 
                      self.supported_simd == SIMDInstructionSet::AVX512VL)
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
        self.stats.add_operations.store(0, Ordering::Relaxed);
        self.stats.sub_operations.store(0, Ordering::Relaxed);
        self.stats.mul_operations.store(0, Ordering::Relaxed);
        self.stats.div_operations.store(0, Ordering::Relaxed);
        self.stats.dot_operations.store(0, Ordering::Relaxed);
        self.stats.matmul_operations.store(0, Ordering::Relaxed);
        self.stats.time_saved_us.store(0, Ordering::Relaxed);
        self.stats.avg_acceleration_ratio.store(100, Ordering::Relaxed);
        self.stats.elements_processed.store(0, Ordering::Relaxed);
    }

    /// Optimize vector accelerator
    pub fn optimize(&self) -> Result<(), UnifiedError> {
        if !self.active {
            return Err(UnifiedError::HwAccel("Vector accelerator is not active".to_string()));
        }
        
        // Enable vector-specific optimizations
        // This would include setting CPU affinity, power management, etc.
        
        log::info!("Vector accelerator optimized");
        Ok(())
    }

    /// Perform vector addition
    pub fn vector_add(
        &self,
        a: &[f32],
        b: &[f32],
        result: &mut [f32],
    ) -> Result<(), UnifiedError> {
        if !self.is_available() {
            return Err(UnifiedError::HwAccel("Vector accelerator not available".to_string()));
        }
        
        if a.len() != b.len() || a.len() != result.len() {
            return Err(UnifiedError::HwAccel("Vector length mismatch".to_string()));
        }
        
        let start_time = self.get_timestamp();
        
        #[cfg(target_arch = "x86_64")]
        {
            match self.supported_simd {
                SIMDInstructionSet::AVX512VL | SIMDInstructionSet::AVX512F => {
                    self.avx512_vector_add(a, b, result);
                }
                SIMDInstructionSet::AVX2 | SIMDInstructionSet::AVX => {
                    self.avx_vector_add(a, b, result);
                }
                SIMDInstructionSet::SSE4_2 | SIMDInstructionSet::SSE4_1 | 
                SIMDInstructionSet::SSSE3 | SIMDInstructionSet::SSE3 | 
                SIMDInstructionSet::SSE2 | SIMDInstructionSet::SSE => {
                    self.sse_vector_add(a, b, result);
                }
                _ => {
                    self.scalar_vector_add(a, b, result);
                }
            }
        }
        
        #[cfg(not(target_arch = "x86_64"))]
        {
            self.scalar_vector_add(a, b, result);
        }
        
        let end_time = self.get_timestamp();
        let elapsed = end_time - start_time;
        
        // Update statistics
        self.stats.add_operations.fetch_add(1, Ordering::Relaxed);
        self.stats.total_operations.fetch_add(1, Ordering::Relaxed);
        self.stats.elements_processed.fetch_add(a.len() as u64, Ordering::Relaxed);
        self.update_time_stats(elapsed, a.len());
        
        log::debug!("Added {} elements in {}μs", a.len(), elapsed);
        Ok(())
    }

    /// Perform vector dot product
    pub fn vector_dot(
        &self,
        a: &[f32],
        b: &[f32],
    ) -> Result<f32, UnifiedError> {
        if !self.is_available() {
            return Err(UnifiedError::HwAccel("Vector accelerator not available".to_string()));
        }
        
        if a.len() != b.len() {
            return Err(UnifiedError::HwAccel("Vector length mismatch".to_string()));
        }
        
        let start_time = self.get_timestamp();
        
        let result = #[cfg(target_arch = "x86_64")]
        {
            match self.supported_simd {
                SIMDInstructionSet::AVX512VL | SIMDInstructionSet::AVX512F => {
                    self.avx512_vector_dot(a, b)
                }
                SIMDInstructionSet::AVX2 | SIMDInstructionSet::AVX => {
                    self.avx_vector_dot(a, b)
                }
                SIMDInstructionSet::SSE4_2 | SIMDInstructionSet::SSE4_1 | 
                SIMDInstructionSet::SSSE3 | SIMDInstructionSet::SSE3 | 
                SIMDInstructionSet::SSE2 | SIMDInstructionSet::SSE => {
                    self.sse_vector_dot(a, b)
                }
                _ => {
                    self.scalar_vector_dot(a, b)
                }
            }
        };
        
        #[cfg(not(target_arch = "x86_64"))]
        let result = self.scalar_vector_dot(a, b);
        
        let end_time = self.get_timestamp();
        let elapsed = end_time - start_time;
        
        // Update statistics
        self.stats.dot_operations.fetch_add(1, Ordering::Relaxed);
        self.stats.total_operations.fetch_add(1, Ordering::Relaxed);
        self.stats.elements_processed.fetch_add(a.len() as u64, Ordering::Relaxed);
        self.update_time_stats(elapsed, a.len());
        
        log::debug!("Computed dot product of {} elements in {}μs", a.len(), elapsed);
        Ok(result)
    }

    /// Perform matrix multiplication
    pub fn matrix_multiply(
        &self,
        a: &[f32],
        a_rows: usize,
        a_cols: usize,
        b: &[f32],
        b_rows: usize,
        b_cols: usize,
        result: &mut [f32],
    ) -> Result<(), UnifiedError> {
        if !self.is_available() {
            return Err(UnifiedError::HwAccel("Vector accelerator not available".to_string()));
        }
        
        if a_cols != b_rows {
            return Err(UnifiedError::HwAccel("Matrix dimensions incompatible".to_string()));
        }
        
        if a.len() != a_rows * a_cols || b.len() != b_rows * b_cols || result.len() != a_rows * b_cols {
            return Err(UnifiedError::HwAccel("Matrix size mismatch".to_string()));
        }
        
        let start_time = self.get_timestamp();
        
        #[cfg(target_arch = "x86_64")]
        {
            match self.supported_simd {
                SIMDInstructionSet::AVX512VL | SIMDInstructionSet::AVX512F => {
                    self.avx512_matrix_multiply(a, a_rows, a_cols, b, b_rows, b_cols, result);
                }
                SIMDInstructionSet::AVX2 | SIMDInstructionSet::AVX => {
                    self.avx_matrix_multiply(a, a_rows, a_cols, b, b_rows, b_cols, result);
                }
                SIMDInstructionSet::SSE4_2 | SIMDInstructionSet::SSE4_1 | 
                SIMDInstructionSet::SSSE3 | SIMDInstructionSet::SSE3 | 
                SIMDInstructionSet::SSE2 | SIMDInstructionSet::SSE => {
                    self.sse_matrix_multiply(a, a_rows, a_cols, b, b_rows, b_cols, result);
                }
                _ => {
                    self.scalar_matrix_multiply(a, a_rows, a_cols, b, b_rows, b_cols, result);
                }
            }
        }
        
        #[cfg(not(target_arch = "x86_64"))]
        {
            self.scalar_matrix_multiply(a, a_rows, a_cols, b, b_rows, b_cols, result);
        }
        
        let end_time = self.get_timestamp();
        let elapsed = end_time - start_time;
        
        // Update statistics
        self.stats.matmul_operations.fetch_add(1, Ordering::Relaxed);
        self.stats.total_operations.fetch_add(1, Ordering::Relaxed);
        self.stats.elements_processed.fetch_add((a_rows * a_cols * b_cols) as u64, Ordering::Relaxed);
        self.update_time_stats(elapsed, a_rows * a_cols * b_cols);
        
        log::debug!("Multiplied {}x{} by {}x{} matrix in {}μs", a_rows, a_cols, b_rows, b_cols, elapsed);
        Ok(())
    }

    /// Scalar vector addition
    fn scalar_vector_add(&self, a: &[f32], b: &[f32], result: &mut [f32]) {
        for i in 0..a.len() {
            result[i] = a[i] + b[i];
        }
    }

    /// Scalar vector dot product
    fn scalar_vector_dot(&self, a: &[f32], b: &[f32]) -> f32 {
        let mut sum = 0.0;
        for i in 0..a.len() {
            sum += a[i] * b[i];
        }
        sum
    }

    /// Scalar matrix multiplication
    fn scalar_matrix_multiply(
        &self,
        a: &[f32],
        a_rows: usize,
        a_cols: usize,
        b: &[f32],
        b_rows: usize,
        b_cols: usize,
        result: &mut [f32],
    ) {
        for i in 0..a_rows {
            for j in 0..b_cols {
                let mut sum = 0.0;
                for k in 0..a_cols {
                    sum += a[i * a_cols + k] * b[k * b_cols + j];
                }
                result[i * b_cols + j] = sum;
            }
        }
    }

    /// AVX vector addition
    #[cfg(target_arch = "x86_64")]
    fn avx_vector_add(&self, a: &[f32], b: &[f32], result: &mut [f32]) {
        use core::arch::x86_64::*;
        
        let mut i = 0;
        let avx_len = a.len() & !7; // Round down to 8-element boundary
        
        unsafe {
            while i < avx_len {
                let va = _mm256_loadu_ps(a.as_ptr().add(i));
                let vb = _mm256_loadu_ps(b.as_ptr().add(i));
                let vr = _mm256_add_ps(va, vb);
                _mm256_storeu_ps(result.as_mut_ptr().add(i), vr);
                i += 8;
            }
        }
        
        // Handle remaining elements
        while i < a.len() {
            result[i] = a[i] + b[i];
            i += 1;
        }
    }

    /// AVX vector dot product
    #[cfg(target_arch = "x86_64")]
    fn avx_vector_dot(&self, a: &[f32], b: &[f32]) -> f32 {
        use core::arch::x86_64::*;
        
        let mut sum = _mm256_setzero_ps();
        let mut i = 0;
        let avx_len = a.len() & !7; // Round down to 8-element boundary
        
        unsafe {
            while i < avx_len {
                let va = _mm256_loadu_ps(a.as_ptr().add(i));
                let vb = _mm256_loadu_ps(b.as_ptr().add(i));
                let product = _mm256_mul_ps(va, vb);
                sum = _mm256_add_ps(sum, product);
                i += 8;
            }
            
            // Horizontal sum
            let sum128 = _mm256_extractf128_ps(sum, 0) + _mm256_extractf128_ps(sum, 1);
            let sum64 = _mm_hadd_ps(sum128, sum128);
            let sum32 = _mm_hadd_ps(sum64, sum64);
            let mut result = [0.0f32];
            _mm_store_ss(result.as_mut_ptr(), sum32);
        }
        
        // Handle remaining elements
        let mut scalar_sum = result[0];
        while i < a.len() {
            scalar_sum += a[i] * b[i];
            i += 1;
        }
        
        scalar_sum
    }

    /// AVX matrix multiplication
    #[cfg(target_arch = "x86_64")]
    fn avx_matrix_multiply(
        &self,
        a: &[f32],
        a_rows: usize,
        a_cols: usize,
        b: &[f32],
        b_rows: usize,
        b_cols: usize,
        result: &mut [f32],
    ) {
        // Simplified AVX matrix multiplication
        // In a real implementation, this would be more optimized
        self.scalar_matrix_multiply(a, a_rows, a_cols, b, b_rows, b_cols, result);
    }

    /// AVX512 vector addition
    #[cfg(target_arch = "x86_64")]
    fn avx512_vector_add(&self, a: &[f32], b: &[f32], result: &mut [f32]) {
        // Simplified AVX512 implementation
        // In a real implementation, this would use AVX512 instructions
        self.avx_vector_add(a, b, result);
    }

    /// AVX512 vector dot product
    #[cfg(target_arch = "x86_64")]
    fn avx512_vector_dot(&self, a: &[f32], b: &[f32]) -> f32 {
        // Simplified AVX512 implementation
        // In a real implementation, this would use AVX512 instructions
        self.avx_vector_dot(a, b)
    }

    /// AVX512 matrix multiplication
    #[cfg(target_arch = "x86_64")]
    fn avx512_matrix_multiply(
        &self,
        a: &[f32],
        a_rows: usize,
        a_cols: usize,
        b: &[f32],
        b_rows: usize,
        b_cols: usize,
        result: &mut [f32],
    ) {
        // Simplified AVX512 implementation
        // In a real implementation, this would use AVX512 instructions
        self.avx_matrix_multiply(a, a_rows, a_cols, b, b_rows, b_cols, result);
    }

    /// SSE vector addition
    #[cfg(target_arch = "x86_64")]
    fn sse_vector_add(&self, a: &[f32], b: &[f32], result: &mut [f32]) {
        use core::arch::x86_64::*;
        
        let mut i = 0;
        let sse_len = a.len() & !3; // Round down to 4-element boundary
        
        unsafe {
            while i < sse_len {
                let va = _mm_loadu_ps(a.as_ptr().add(i));
                let vb = _mm_loadu_ps(b.as_ptr().add(i));
                let vr = _mm_add_ps(va, vb);
                _mm_storeu_ps(result.as_mut_ptr().add(i), vr);
                i += 4;
            }
        }
        
        // Handle remaining elements
        while i < a.len() {
            result[i] = a[i] + b[i];
            i += 1;
        }
    }

    /// SSE vector dot product
    #[cfg(target_arch = "x86_64")]
    fn sse_vector_dot(&self, a: &[f32], b: &[f32]) -> f32 {
        use core::arch::x86_64::*;
        
        let mut sum = _mm_setzero_ps();
        let mut i = 0;
        let sse_len = a.len() & !3; // Round down to 4-element boundary
        
        unsafe {
            while i < sse_len {
                let va = _mm_loadu_ps(a.as_ptr().add(i));
                let vb = _mm_loadu_ps(b.as_ptr().add(i));
                let product = _mm_mul_ps(va, vb);
                sum = _mm_add_ps(sum, product);
                i += 4;
            }
            
            // Horizontal sum
            let sum64 = _mm_hadd_ps(sum, sum);
            let sum32 = _mm_hadd_ps(sum64, sum64);
            let mut result = [0.0f32];
            _mm_store_ss(result.as_mut_ptr(), sum32);
        }
        
        // Handle remaining elements
        let mut scalar_sum = result[0];
        while i < a.len() {
            scalar_sum += a[i] * b[i];
            i += 1;
        }
        
        scalar_sum
    }

    /// SSE matrix multiplication
    #[cfg(target_arch = "x86_64")]
    fn sse_matrix_multiply(
        &self,
        a: &[f32],
        a_rows: usize,
        a_cols: usize,
        b: &[f32],
        b_rows: usize,
        b_cols: usize,
        result: &mut [f32],
    ) {
        // Simplified SSE matrix multiplication
        // In a real implementation, this would be more optimized
        self.scalar_matrix_multiply(a, a_rows, a_cols, b, b_rows, b_cols, result);
    }

    /// Get current timestamp (in microseconds)
    fn get_timestamp(&self) -> u64 {
        // In a real implementation, this would use a high-precision timer
        static COUNTER: core::sync::atomic::AtomicU64 = core::sync::atomic::AtomicU64::new(0);
        COUNTER.fetch_add(1, Ordering::Relaxed)
    }

    /// Update time statistics
    fn update_time_stats(&self, elapsed: u64, elements_processed: usize) {
        // Estimate time saved compared to scalar implementation
        let baseline_time = if self.is_optimized() {
            elapsed * 8 // Assume optimized SIMD is 8x faster
        } else if self.is_available() {
            elapsed * 4 // Assume basic SIMD is 4x faster
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