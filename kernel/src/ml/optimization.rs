//! Optimization Engine for Machine Learning
//! 
//! This module provides optimization capabilities for various kernel components,
//! including parameter tuning, resource allocation, and performance optimization.

use crate::error::unified::UnifiedError;
use crate::ml::mod::{OptimizationTarget, OptimizationResult, MLRecommendation, RecommendationPriority};
use alloc::collections::BTreeMap;
use alloc::vec::Vec;
use alloc::string::String;
use core::sync::atomic::{AtomicU64, AtomicUsize, Ordering};

/// Optimization engine for machine learning
pub struct OptimizationEngine {
    optimizations: Mutex<BTreeMap<u64, OptimizationHistory>>,
    next_optimization_id: AtomicU64,
    stats: Mutex<OptimizationEngineStats>,
    active: bool,
}

impl OptimizationEngine {
    /// Create a new optimization engine
    pub fn new() -> Result<Self, UnifiedError> {
        Ok(Self {
            optimizations: Mutex::new(BTreeMap::new()),
            next_optimization_id: AtomicU64::new(1),
            stats: Mutex::new(OptimizationEngineStats::default()),
            active: false,
        })
    }

    /// Initialize the optimization engine
    pub fn initialize(&mut self) -> Result<(), UnifiedError> {
        if self.active {
            return Err(UnifiedError::already_initialized("Optimization engine already active"));
        }

        self.active = true;
        Ok(())
    }

    /// Shutdown the optimization engine
    pub fn shutdown(&mut self) -> Result<(), UnifiedError> {
        if !self.active {
            return Err(UnifiedError::not_initialized("Optimization engine not active"));
        }

        self.active = false;
        Ok(())
    }

    /// Get optimization engine status
    pub fn get_status(&self) -> crate::ml::mod::OptimizationEngineStatus {
        let stats = self.stats.lock();
        crate::ml::mod::OptimizationEngineStatus {
            active: self.active,
            optimizations_count: stats.optimizations_performed,
            success_rate: if stats.optimizations_performed > 0 {
                stats.successful_optimizations as f64 / stats.optimizations_performed as f64
            } else {
                0.0
            },
        }
    }

    /// Optimize system parameters
    pub fn optimize(&self, optimization_target: OptimizationTarget) -> Result<OptimizationResult, UnifiedError> {
        if !self.active {
            return Err(UnifiedError::not_initialized("Optimization engine not active"));
        }

        let optimization_id = self.next_optimization_id.fetch_add(1, Ordering::SeqCst);
        
        // In a real implementation, this would actually perform optimization
        let result = self.mock_optimize(&optimization_target);

        // Record optimization history
        let history = OptimizationHistory {
            optimization_id,
            target: optimization_target.clone(),
            result: result.clone(),
            timestamp: self.get_current_timestamp(),
        };

        let mut optimizations = self.optimizations.lock();
        optimizations.insert(optimization_id, history);

        let mut stats = self.stats.lock();
        stats.optimizations_performed += 1;
        if result.expected_improvement > 0.0 {
            stats.successful_optimizations += 1;
        }

        Ok(result)
    }

    /// Get optimization history
    pub fn get_optimization_history(&self) -> Result<Vec<OptimizationHistory>, UnifiedError> {
        if !self.active {
            return Err(UnifiedError::not_initialized("Optimization engine not active"));
        }

        let optimizations = self.optimizations.lock();
        Ok(optimizations.values().cloned().collect())
    }

    /// Get optimization details
    pub fn get_optimization_details(&self, optimization_id: u64) -> Result<OptimizationHistory, UnifiedError> {
        if !self.active {
            return Err(UnifiedError::not_initialized("Optimization engine not active"));
        }

        let optimizations = self.optimizations.lock();
        let optimization = optimizations.get(&optimization_id)
            .ok_or_else(|| UnifiedError::not_found("Optimization not found"))?;

        Ok(optimization.clone())
    }

    /// Mock optimization function
    fn mock_optimize(&self, target: &OptimizationTarget) -> OptimizationResult {
        let mut parameters = BTreeMap::new();
        let expected_improvement;
        let confidence;

        match target {
            OptimizationTarget::Performance => {
                parameters.insert("cpu_boost".to_string(), 1.2);
                parameters.insert("memory_prefetch".to_string(), 0.8);
                parameters.insert("cache_optimization".to_string(), 0.9);
                expected_improvement = 0.15; // 15% improvement
                confidence = 0.85;
            }
            OptimizationTarget::MemoryUsage => {
                parameters.insert("compression_ratio".to_string(), 0.7);
                parameters.insert("gc_frequency".to_string(), 0.5);
                parameters.insert("pool_size".to_string(), 0.8);
                expected_improvement = 0.25; // 25% improvement
                confidence = 0.75;
            }
            OptimizationTarget::PowerConsumption => {
                parameters.insert("cpu_frequency".to_string(), 0.8);
                parameters.insert("idle_states".to_string(), 0.9);
                parameters.insert("device_power".to_string(), 0.7);
                expected_improvement = 0.20; // 20% improvement
                confidence = 0.80;
            }
            OptimizationTarget::Latency => {
                parameters.insert("interrupt_coalescing".to_string(), 0.8);
                parameters.insert("batch_size".to_string(), 0.6);
                parameters.insert("priority_boost".to_string(), 0.7);
                expected_improvement = 0.30; // 30% improvement
                confidence = 0.70;
            }
            OptimizationTarget::Throughput => {
                parameters.insert("parallelism".to_string(), 1.5);
                parameters.insert("buffer_size".to_string(), 1.2);
                parameters.insert("batch_processing".to_string(), 0.9);
                expected_improvement = 0.40; // 40% improvement
                confidence = 0.65;
            }
            OptimizationTarget::Custom(name) => {
                parameters.insert("custom_param_1".to_string(), 0.8);
                parameters.insert("custom_param_2".to_string(), 1.1);
                expected_improvement = 0.10; // 10% improvement
                confidence = 0.60;
            }
        }

        OptimizationResult {
            target: target.clone(),
            parameters,
            expected_improvement,
            confidence,
        }
    }

    /// Get current timestamp
    fn get_current_timestamp(&self) -> u64 {
        // In a real implementation, this would get the actual system time
        1234567890
    }

    /// Get optimization engine recommendations
    pub fn get_recommendations(&self) -> Vec<MLRecommendation> {
        let mut recommendations = Vec::new();
        let stats = self.stats.lock();

        if stats.optimizations_performed == 0 {
            recommendations.push(MLRecommendation {
                category: "Optimization".to_string(),
                priority: RecommendationPriority::High,
                title: "Perform system optimization".to_string(),
                description: "Consider running optimization to improve system performance".to_string(),
                expected_impact: 0.8,
            });
        }

        if stats.optimizations_performed > 10 && stats.successful_optimizations as f64 / stats.optimizations_performed as f64 < 0.5 {
            recommendations.push(MLRecommendation {
                category: "Optimization".to_string(),
                priority: RecommendationPriority::Medium,
                title: "Review optimization strategy".to_string(),
                description: "Many optimizations are failing. Consider reviewing the optimization strategy".to_string(),
                expected_impact: 0.5,
            });
        }

        recommendations
    }

    /// Reset optimization engine statistics
    pub fn reset_stats(&self) {
        let mut stats = self.stats.lock();
        *stats = OptimizationEngineStats::default();
    }

    /// Optimize optimization engine
    pub fn optimize(&self) -> Result<(), UnifiedError> {
        if !self.active {
            return Err(UnifiedError::not_initialized("Optimization engine not active"));
        }

        // In a real implementation, this would optimize the optimization engine
        Ok(())
    }
}

/// Optimization history
#[derive(Debug, Clone)]
pub struct OptimizationHistory {
    pub optimization_id: u64,
    pub target: OptimizationTarget,
    pub result: OptimizationResult,
    pub timestamp: u64,
}

/// Optimization engine statistics
#[derive(Debug, Clone, Default)]
pub struct OptimizationEngineStats {
    pub optimizations_performed: u64,
    pub successful_optimizations: u64,
}