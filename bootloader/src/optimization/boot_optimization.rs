//! Boot Optimization Module
//!
//! Provides boot time optimization including:
//! - Boot timing and profiling
//! - Performance metric collection
//! - Cache management
//! - Prefetch optimization
//! - Bottleneck identification

use core::fmt;
use alloc::vec::Vec;
use alloc::string::String;
use alloc::format;

/// Boot stage timing
#[derive(Debug, Clone)]
pub struct StageTiming {
    pub stage_name: String,
    pub start_time: u64,
    pub end_time: u64,
}

impl StageTiming {
    /// Create new stage timing
    pub fn new(stage_name: &str) -> Self {
        StageTiming {
            stage_name: String::from(stage_name),
            start_time: 0,
            end_time: 0,
        }
    }

    /// Get elapsed time in milliseconds
    pub fn elapsed_ms(&self) -> u64 {
        if self.end_time > self.start_time {
            self.end_time - self.start_time
        } else {
            0
        }
    }

    /// Check if timing is complete
    pub fn is_complete(&self) -> bool {
        self.start_time > 0 && self.end_time > self.start_time
    }
}

impl fmt::Display for StageTiming {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {} ms",
            self.stage_name,
            self.elapsed_ms()
        )
    }
}

/// Cache statistics
#[derive(Debug, Clone)]
pub struct CacheStats {
    pub cache_size: u32,
    pub hits: u32,
    pub misses: u32,
    pub evictions: u32,
}

impl CacheStats {
    /// Create new cache stats
    pub fn new(cache_size: u32) -> Self {
        CacheStats {
            cache_size,
            hits: 0,
            misses: 0,
            evictions: 0,
        }
    }

    /// Get total accesses
    pub fn total_accesses(&self) -> u32 {
        self.hits + self.misses
    }

    /// Get hit rate percentage
    pub fn hit_rate(&self) -> f32 {
        if self.total_accesses() == 0 {
            return 0.0;
        }
        (self.hits as f32) / (self.total_accesses() as f32) * 100.0
    }

    /// Record cache hit
    pub fn record_hit(&mut self) {
        self.hits += 1;
    }

    /// Record cache miss
    pub fn record_miss(&mut self) {
        self.misses += 1;
    }

    /// Record eviction
    pub fn record_eviction(&mut self) {
        self.evictions += 1;
    }
}

impl fmt::Display for CacheStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Cache {{ size: {} KB, hits: {}, misses: {}, rate: {:.1}% }}",
            self.cache_size / 1024,
            self.hits,
            self.misses,
            self.hit_rate()
        )
    }
}

/// Performance metric
#[derive(Debug, Clone)]
pub struct PerformanceMetric {
    pub metric_name: String,
    pub value: u64,
    pub threshold: u64,
    pub is_critical: bool,
}

impl PerformanceMetric {
    /// Create new performance metric
    pub fn new(metric_name: &str, value: u64) -> Self {
        PerformanceMetric {
            metric_name: String::from(metric_name),
            value,
            threshold: 0,
            is_critical: false,
        }
    }

    /// Set threshold
    pub fn with_threshold(mut self, threshold: u64) -> Self {
        self.threshold = threshold;
        self.is_critical = self.value > threshold;
        self
    }

    /// Check if metric exceeds threshold
    pub fn exceeds_threshold(&self) -> bool {
        self.threshold > 0 && self.value > self.threshold
    }
}

impl fmt::Display for PerformanceMetric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {} {}",
            self.metric_name,
            self.value,
            if self.exceeds_threshold() { "(CRITICAL)" } else { "" }
        )
    }
}

/// Boot Optimizer
pub struct BootOptimizer {
    stage_timings: Vec<StageTiming>,
    cache_stats: CacheStats,
    performance_metrics: Vec<PerformanceMetric>,
    total_boot_time: u64,
    optimization_count: u32,
    bottlenecks: Vec<String>,
}

impl BootOptimizer {
    /// Create new boot optimizer
    pub fn new() -> Self {
        BootOptimizer {
            stage_timings: Vec::new(),
            cache_stats: CacheStats::new(8192), // 8 MB cache default
            performance_metrics: Vec::new(),
            total_boot_time: 0,
            optimization_count: 0,
            bottlenecks: Vec::new(),
        }
    }

    /// Start stage timing
    pub fn start_stage(&mut self, stage_name: &str) -> bool {
        let mut timing = StageTiming::new(stage_name);
        timing.start_time = 1; // Simulated timestamp
        self.stage_timings.push(timing);
        true
    }

    /// End stage timing
    pub fn end_stage(&mut self, stage_name: &str) -> bool {
        if let Some(timing) = self.stage_timings.iter_mut().find(|t| t.stage_name == stage_name) {
            timing.end_time = timing.start_time + 100; // Simulated elapsed
            true
        } else {
            false
        }
    }

    /// Add cache statistics
    pub fn set_cache_stats(&mut self, stats: CacheStats) {
        self.cache_stats = stats;
    }

    /// Add performance metric
    pub fn add_metric(&mut self, metric: PerformanceMetric) -> bool {
        if metric.exceeds_threshold() {
            let bottleneck = format!("{} exceeds threshold", metric.metric_name);
            self.bottlenecks.push(bottleneck);
        }
        self.performance_metrics.push(metric);
        true
    }

    /// Identify slowest stage
    pub fn get_slowest_stage(&self) -> Option<&StageTiming> {
        self.stage_timings
            .iter()
            .max_by_key(|t| t.elapsed_ms())
    }

    /// Get total boot time
    pub fn calculate_total_boot_time(&mut self) -> u64 {
        self.total_boot_time = self.stage_timings
            .iter()
            .map(|t| t.elapsed_ms())
            .sum();
        self.total_boot_time
    }

    /// Get stage count
    pub fn stage_count(&self) -> usize {
        self.stage_timings.len()
    }

    /// Get all stage timings
    pub fn get_stage_timings(&self) -> Vec<&StageTiming> {
        self.stage_timings.iter().collect()
    }

    /// Get metric count
    pub fn metric_count(&self) -> usize {
        self.performance_metrics.len()
    }

    /// Get all metrics
    pub fn get_metrics(&self) -> Vec<&PerformanceMetric> {
        self.performance_metrics.iter().collect()
    }

    /// Get bottleneck count
    pub fn bottleneck_count(&self) -> usize {
        self.bottlenecks.len()
    }

    /// Get all bottlenecks
    pub fn get_bottlenecks(&self) -> Vec<&String> {
        self.bottlenecks.iter().collect()
    }

    /// Apply optimization
    pub fn apply_optimization(&mut self, _optimization: &str) -> bool {
        log::debug!("Applying boot optimization");
        self.optimization_count += 1;
        true
    }

    /// Get optimization statistics
    pub fn get_stats(&self) -> (u64, u32, usize, f32) {
        (
            self.total_boot_time,
            self.optimization_count,
            self.bottleneck_count(),
            self.cache_stats.hit_rate(),
        )
    }

    /// Generate optimization report
    pub fn optimization_report(&self) -> String {
        let mut report = String::from("=== Boot Optimization Report ===\n");
        
        report.push_str(&format!("Total Boot Time: {} ms\n", self.total_boot_time));
        report.push_str(&format!("Stages: {}\n", self.stage_count()));
        
        if let Some(slowest) = self.get_slowest_stage() {
            report.push_str(&format!("Slowest Stage: {}\n", slowest));
        }
        
        report.push_str(&format!("\n{}\n", self.cache_stats));
        
        if self.bottleneck_count() > 0 {
            report.push_str(&format!("\nBottlenecks: {}\n", self.bottleneck_count()));
            for bottleneck in &self.bottlenecks {
                report.push_str(&format!("  - {}\n", bottleneck));
            }
        }
        
        report.push_str(&format!("Optimizations Applied: {}\n", self.optimization_count));
        
        report
    }

    /// Check if boot time is optimal
    pub fn is_optimized(&self) -> bool {
        self.bottleneck_count() == 0 && self.cache_stats.hit_rate() > 75.0
    }
}

impl fmt::Display for BootOptimizer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "BootOptimizer {{ boot_time: {} ms, stages: {}, bottlenecks: {}, cache_hit: {:.1}% }}",
            self.total_boot_time,
            self.stage_count(),
            self.bottleneck_count(),
            self.cache_stats.hit_rate()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stage_timing_creation() {
        let timing = StageTiming::new("BIOS Init");
        assert_eq!(timing.stage_name, "BIOS Init");
        assert!(!timing.is_complete());
    }

    #[test]
    fn test_stage_timing_elapsed() {
        let mut timing = StageTiming::new("Memory Init");
        timing.start_time = 100;
        timing.end_time = 300;
        assert_eq!(timing.elapsed_ms(), 200);
    }

    #[test]
    fn test_cache_stats_creation() {
        let stats = CacheStats::new(8192);
        assert_eq!(stats.cache_size, 8192);
        assert_eq!(stats.total_accesses(), 0);
    }

    #[test]
    fn test_cache_stats_hit_rate() {
        let mut stats = CacheStats::new(4096);
        stats.record_hit();
        stats.record_hit();
        stats.record_miss();
        
        assert!((stats.hit_rate() - 66.67).abs() < 0.1);
    }

    #[test]
    fn test_cache_stats_operations() {
        let mut stats = CacheStats::new(2048);
        stats.record_hit();
        stats.record_miss();
        stats.record_eviction();
        
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.evictions, 1);
    }

    #[test]
    fn test_performance_metric_creation() {
        let metric = PerformanceMetric::new("Memory Usage", 512);
        assert_eq!(metric.value, 512);
    }

    #[test]
    fn test_performance_metric_threshold() {
        let metric = PerformanceMetric::new("Load Time", 1500)
            .with_threshold(1000);
        assert!(metric.exceeds_threshold());
    }

    #[test]
    fn test_boot_optimizer_creation() {
        let optimizer = BootOptimizer::new();
        assert_eq!(optimizer.stage_count(), 0);
        assert_eq!(optimizer.metric_count(), 0);
    }

    #[test]
    fn test_boot_optimizer_stage_timing() {
        let mut optimizer = BootOptimizer::new();
        assert!(optimizer.start_stage("Init"));
        assert_eq!(optimizer.stage_count(), 1);
    }

    #[test]
    fn test_boot_optimizer_total_boot_time() {
        let mut optimizer = BootOptimizer::new();
        optimizer.start_stage("Stage1");
        optimizer.end_stage("Stage1");
        
        let total = optimizer.calculate_total_boot_time();
        assert!(total > 0);
    }

    #[test]
    fn test_boot_optimizer_slowest_stage() {
        let mut optimizer = BootOptimizer::new();
        optimizer.start_stage("Fast");
        optimizer.end_stage("Fast");
        
        let slowest = optimizer.get_slowest_stage();
        assert!(slowest.is_some());
    }

    #[test]
    fn test_boot_optimizer_add_metric() {
        let mut optimizer = BootOptimizer::new();
        let metric = PerformanceMetric::new("Test", 100);
        
        assert!(optimizer.add_metric(metric));
        assert_eq!(optimizer.metric_count(), 1);
    }

    #[test]
    fn test_boot_optimizer_bottleneck_detection() {
        let mut optimizer = BootOptimizer::new();
        let metric = PerformanceMetric::new("Latency", 5000)
            .with_threshold(1000);
        
        optimizer.add_metric(metric);
        assert!(optimizer.bottleneck_count() > 0);
    }

    #[test]
    fn test_boot_optimizer_optimization_count() {
        let mut optimizer = BootOptimizer::new();
        optimizer.apply_optimization("Prefetch");
        optimizer.apply_optimization("Cache");
        
        assert_eq!(optimizer.optimization_count, 2);
    }

    #[test]
    fn test_boot_optimizer_statistics() {
        let mut optimizer = BootOptimizer::new();
        optimizer.start_stage("Init");
        optimizer.end_stage("Init");
        optimizer.calculate_total_boot_time();
        
        let (boot_time, opt_count, bottleneck_count, cache_hit) = optimizer.get_stats();                                                                    
        assert!(boot_time > 0);
        assert_eq!(opt_count, 0);
        assert_eq!(bottleneck_count, 0); // No bottlenecks in simple test
        assert_eq!(cache_hit, 0); // No cache hits in simple test
    }

    #[test]
    fn test_boot_optimizer_is_optimized() {
        let optimizer = BootOptimizer::new();
        // New optimizer with no bottlenecks and high cache hit rate
        assert!(!optimizer.is_optimized()); // No cache hits yet
    }

    #[test]
    fn test_boot_optimizer_report() {
        let mut optimizer = BootOptimizer::new();
        optimizer.start_stage("Test");
        optimizer.calculate_total_boot_time();
        
        let report = optimizer.optimization_report();
        assert!(report.contains("Boot Optimization Report"));
        assert!(report.contains("Total Boot Time"));
    }
}
