//! Adaptive Tuner for Machine Learning
//! 
//! This module provides adaptive tuning capabilities for various kernel components,
//! including dynamic parameter adjustment, self-tuning algorithms, and
//! performance-based adaptation.

use crate::error::unified::UnifiedError;
use crate::ml::mod::{TuningTarget, TuningResult, MLRecommendation, RecommendationPriority};
use alloc::collections::BTreeMap;
use alloc::vec::Vec;
use alloc::string::String;
use core::sync::atomic::{AtomicU64, AtomicUsize, Ordering};

/// Adaptive tuner for machine learning
pub struct AdaptiveTuner {
    tunings: Mutex<BTreeMap<u64, TuningHistory>>,
    tuning_profiles: Mutex<BTreeMap<String, TuningProfile>>,
    next_tuning_id: AtomicU64,
    stats: Mutex<AdaptiveTunerStats>,
    active: bool,
}

impl AdaptiveTuner {
    /// Create a new adaptive tuner
    pub fn new() -> Result<Self, UnifiedError> {
        Ok(Self {
            tunings: Mutex::new(BTreeMap::new()),
            tuning_profiles: Mutex::new(BTreeMap::new()),
            next_tuning_id: AtomicU64::new(1),
            stats: Mutex::new(AdaptiveTunerStats::default()),
            active: false,
        })
    }

    /// Initialize the adaptive tuner
    pub fn initialize(&mut self) -> Result<(), UnifiedError> {
        if self.active {
            return Err(UnifiedError::already_initialized("Adaptive tuner already active"));
        }

        // Initialize default tuning profiles
        let mut profiles = self.tuning_profiles.lock();
        profiles.insert("performance".to_string(), TuningProfile::new("performance"));
        profiles.insert("power".to_string(), TuningProfile::new("power"));
        profiles.insert("balanced".to_string(), TuningProfile::new("balanced"));

        self.active = true;
        Ok(())
    }

    /// Shutdown the adaptive tuner
    pub fn shutdown(&mut self) -> Result<(), UnifiedError> {
        if !self.active {
            return Err(UnifiedError::not_initialized("Adaptive tuner not active"));
        }

        self.active = false;
        Ok(())
    }

    /// Get adaptive tuner status
    pub fn get_status(&self) -> crate::ml::mod::AdaptiveTunerStatus {
        let stats = self.stats.lock();
        crate::ml::mod::AdaptiveTunerStatus {
            active: self.active,
            tunings_performed: stats.tunings_performed,
            adaptation_rate: if stats.tunings_performed > 0 {
                stats.successful_tunings as f64 / stats.tunings_performed as f64
            } else {
                0.0
            },
        }
    }

    /// Adaptively tune system parameters
    pub fn tune(&self, tuning_target: TuningTarget) -> Result<TuningResult, UnifiedError> {
        if !self.active {
            return Err(UnifiedError::not_initialized("Adaptive tuner not active"));
        }

        let tuning_id = self.next_tuning_id.fetch_add(1, Ordering::SeqCst);
        
        // In a real implementation, this would actually perform adaptive tuning
        let result = self.mock_adaptive_tune(&tuning_target);

        // Record tuning history
        let history = TuningHistory {
            tuning_id,
            target: tuning_target.clone(),
            result: result.clone(),
            timestamp: self.get_current_timestamp(),
        };

        let mut tunings = self.tunings.lock();
        tunings.insert(tuning_id, history);

        let mut stats = self.stats.lock();
        stats.tunings_performed += 1;
        if result.expected_improvement > 0.0 {
            stats.successful_tunings += 1;
        }

        Ok(result)
    }

    /// Get tuning history
    pub fn get_tuning_history(&self) -> Result<Vec<TuningHistory>, UnifiedError> {
        if !self.active {
            return Err(UnifiedError::not_initialized("Adaptive tuner not active"));
        }

        let tunings = self.tunings.lock();
        Ok(tunings.values().cloned().collect())
    }

    /// Get tuning details
    pub fn get_tuning_details(&self, tuning_id: u64) -> Result<TuningHistory, UnifiedError> {
        if !self.active {
            return Err(UnifiedError::not_initialized("Adaptive tuner not active"));
        }

        let tunings = self.tunings.lock();
        let tuning = tunings.get(&tuning_id)
            .ok_or_else(|| UnifiedError::not_found("Tuning not found"))?;

        Ok(tuning.clone())
    }

    /// Create a tuning profile
    pub fn create_tuning_profile(&self, name: &str, parameters: BTreeMap<String, f64>) -> Result<(), UnifiedError> {
        if !self.active {
            return Err(UnifiedError::not_initialized("Adaptive tuner not active"));
        }

        let mut profile = TuningProfile::new(name);
        profile.parameters = parameters;

        let mut profiles = self.tuning_profiles.lock();
        profiles.insert(name.to_string(), profile);

        Ok(())
    }

    /// Get tuning profile
    pub fn get_tuning_profile(&self, name: &str) -> Result<TuningProfile, UnifiedError> {
        if !self.active {
            return Err(UnifiedError::not_initialized("Adaptive tuner not active"));
        }

        let profiles = self.tuning_profiles.lock();
        let profile = profiles.get(name)
            .ok_or_else(|| UnifiedError::not_found("Tuning profile not found"))?;

        Ok(profile.clone())
    }

    /// Apply tuning profile
    pub fn apply_tuning_profile(&self, name: &str) -> Result<TuningResult, UnifiedError> {
        if !self.active {
            return Err(UnifiedError::not_initialized("Adaptive tuner not active"));
        }

        let profiles = self.tuning_profiles.lock();
        let profile = profiles.get(name)
            .ok_or_else(|| UnifiedError::not_found("Tuning profile not found"))?;

        // Create a tuning result from the profile
        let result = TuningResult {
            target: TuningTarget::Custom(name.to_string()),
            parameters: profile.parameters.clone(),
            expected_improvement: 0.15, // Mock improvement
            adaptation_rate: 0.8, // Mock adaptation rate
        };

        Ok(result)
    }

    /// Mock adaptive tuning function
    fn mock_adaptive_tune(&self, target: &TuningTarget) -> TuningResult {
        let mut parameters = BTreeMap::new();
        let expected_improvement;
        let adaptation_rate;

        match target {
            TuningTarget::Scheduler => {
                parameters.insert("time_slice".to_string(), 10.0);
                parameters.insert("priority_levels".to_string(), 8.0);
                parameters.insert("preempt_threshold".to_string(), 0.7);
                expected_improvement = 0.12; // 12% improvement
                adaptation_rate = 0.85;
            }
            TuningTarget::MemoryAllocator => {
                parameters.insert("cache_size".to_string(), 64.0);
                parameters.insert("allocation_strategy".to_string(), 0.8);
                parameters.insert("gc_threshold".to_string(), 0.6);
                expected_improvement = 0.18; // 18% improvement
                adaptation_rate = 0.75;
            }
            TuningTarget::NetworkStack => {
                parameters.insert("buffer_size".to_string(), 1024.0);
                parameters.insert("congestion_control".to_string(), 0.9);
                parameters.insert("tcp_window".to_string(), 64.0);
                expected_improvement = 0.20; // 20% improvement
                adaptation_rate = 0.80;
            }
            TuningTarget::FileSystem => {
                parameters.insert("cache_size".to_string(), 128.0);
                parameters.insert("read_ahead".to_string(), 8.0);
                parameters.insert("write_back".to_string(), 0.7);
                expected_improvement = 0.15; // 15% improvement
                adaptation_rate = 0.70;
            }
            TuningTarget::Custom(name) => {
                parameters.insert("custom_param_1".to_string(), 0.8);
                parameters.insert("custom_param_2".to_string(), 1.2);
                expected_improvement = 0.10; // 10% improvement
                adaptation_rate = 0.65;
            }
        }

        TuningResult {
            target: target.clone(),
            parameters,
            expected_improvement,
            adaptation_rate,
        }
    }

    /// Get current timestamp
    fn get_current_timestamp(&self) -> u64 {
        // In a real implementation, this would get the actual system time
        1234567890
    }

    /// Get adaptive tuner recommendations
    pub fn get_recommendations(&self) -> Vec<MLRecommendation> {
        let mut recommendations = Vec::new();
        let stats = self.stats.lock();

        if stats.tunings_performed == 0 {
            recommendations.push(MLRecommendation {
                category: "Adaptive Tuning".to_string(),
                priority: RecommendationPriority::High,
                title: "Enable adaptive tuning".to_string(),
                description: "Consider enabling adaptive tuning to automatically optimize system parameters".to_string(),
                expected_impact: 0.8,
            });
        }

        if stats.tunings_performed > 10 && stats.successful_tunings as f64 / stats.tunings_performed as f64 < 0.6 {
            recommendations.push(MLRecommendation {
                category: "Adaptive Tuning".to_string(),
                priority: RecommendationPriority::Medium,
                title: "Review tuning strategy".to_string(),
                description: "Many tunings are failing. Consider reviewing the adaptive tuning strategy".to_string(),
                expected_impact: 0.5,
            });
        }

        recommendations
    }

    /// Reset adaptive tuner statistics
    pub fn reset_stats(&self) {
        let mut stats = self.stats.lock();
        *stats = AdaptiveTunerStats::default();
    }

    /// Optimize adaptive tuner
    pub fn optimize(&self) -> Result<(), UnifiedError> {
        if !self.active {
            return Err(UnifiedError::not_initialized("Adaptive tuner not active"));
        }

        // In a real implementation, this would optimize the adaptive tuner
        Ok(())
    }
}

/// Tuning history
#[derive(Debug, Clone)]
pub struct TuningHistory {
    pub tuning_id: u64,
    pub target: TuningTarget,
    pub result: TuningResult,
    pub timestamp: u64,
}

/// Tuning profile
#[derive(Debug, Clone)]
pub struct TuningProfile {
    pub name: String,
    pub parameters: BTreeMap<String, f64>,
    pub created_at: u64,
}

impl TuningProfile {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            parameters: BTreeMap::new(),
            created_at: 1234567890, // Mock timestamp
        }
    }
}

/// Adaptive tuner statistics
#[derive(Debug, Clone, Default)]
pub struct AdaptiveTunerStats {
    pub tunings_performed: u64,
    pub successful_tunings: u64,
}