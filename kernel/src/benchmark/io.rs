//! I/O performance benchmarks
//!
//! Measures file I/O and zero-copy performance.

extern crate alloc;

use alloc::vec::Vec;
use crate::time::hrtime_nanos;

/// I/O benchmark results
#[derive(Debug, Clone)]
pub struct IoBenchmarkResult {
    /// Benchmark name
    pub name: &'static str,
    /// I/O size (bytes)
    pub io_size: usize,
    /// Number of operations
    pub num_operations: usize,
    /// Total time (nanoseconds)
    pub total_time_ns: u64,
    /// Average latency (nanoseconds)
    pub avg_latency_ns: u64,
    /// Throughput (MB/s)
    pub throughput_mb_per_sec: f64,
}

/// Benchmark file I/O
pub fn benchmark_file_io(size: usize, count: usize) -> IoBenchmarkResult {
    let start_time = hrtime_nanos();
    
    // Simulate file I/O operations
    // In real implementation, this would use actual file system
    let mut total_bytes = 0usize;
    for _ in 0..count {
        // Simulate read/write
        let buffer = alloc::vec![0u8; size];
        total_bytes += buffer.len();
    }
    
    let end_time = hrtime_nanos();
    let total_time = end_time - start_time;
    let avg_latency = total_time / count as u64;
    let throughput = (total_bytes as f64 * 1_000_000_000.0) / total_time as f64 / (1024.0 * 1024.0);
    
    IoBenchmarkResult {
        name: "file_io",
        io_size: size,
        num_operations: count,
        total_time_ns: total_time,
        avg_latency_ns: avg_latency,
        throughput_mb_per_sec: throughput,
    }
}

/// Benchmark zero-copy I/O
pub fn benchmark_zero_copy_io(size: usize, count: usize) -> IoBenchmarkResult {
    let start_time = hrtime_nanos();
    
    // Simulate zero-copy operations
    // In real implementation, this would use sendfile/splice
    let mut total_bytes = 0usize;
    for _ in 0..count {
        // Simulate zero-copy transfer
        let buffer = alloc::vec![0u8; size];
        total_bytes += buffer.len();
    }
    
    let end_time = hrtime_nanos();
    let total_time = end_time - start_time;
    let avg_latency = total_time / count as u64;
    let throughput = (total_bytes as f64 * 1_000_000_000.0) / total_time as f64 / (1024.0 * 1024.0);
    
    IoBenchmarkResult {
        name: "zero_copy_io",
        io_size: size,
        num_operations: count,
        total_time_ns: total_time,
        avg_latency_ns: avg_latency,
        throughput_mb_per_sec: throughput,
    }
}

/// Run all I/O benchmarks
pub fn run_all_io_benchmarks() {
    crate::println!("[benchmark] Running I/O benchmarks...");
    
    // File I/O benchmark
    let file_result = benchmark_file_io(4096, 1000);
    crate::println!("[benchmark] File I/O (4KB, 1000x):");
    crate::println!("  Average latency: {} ns", file_result.avg_latency_ns);
    crate::println!("  Throughput: {:.2} MB/s", file_result.throughput_mb_per_sec);
    
    // Zero-copy I/O benchmark
    let zc_result = benchmark_zero_copy_io(4096, 1000);
    crate::println!("[benchmark] Zero-copy I/O (4KB, 1000x):");
    crate::println!("  Average latency: {} ns", zc_result.avg_latency_ns);
    crate::println!("  Throughput: {:.2} MB/s", zc_result.throughput_mb_per_sec);
    
    crate::println!("[benchmark] I/O benchmarks completed");
}

