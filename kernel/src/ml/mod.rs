//! Machine Learning Optimization Module
//! 
//! This module provides machine learning capabilities for optimizing various aspects
//! of the NOS kernel, including performance prediction, resource allocation,
//! anomaly detection, and adaptive tuning.

use crate::error::unified::UnifiedError;
use crate::ml::prediction::PredictionEngine;
use crate::ml::optimization::OptimizationEngine;
use crate::ml::anomaly::AnomalyDetector;
use crate::ml::adaptive::AdaptiveTuner;
use alloc::collections::BTreeMap;
use alloc::vec::Vec;
use alloc::string::String;
use alloc::sync::Arc;
use core::sync::atomic::{AtomicU64, AtomicUsize, Ordering};

pub mod prediction;
pub mod optimization;
pub mod anomaly;
pub mod adaptive;

/// Machine learning system for kernel optimization
pub struct MLSystem {
    prediction_engine: PredictionEngine,
    optimization_engine: OptimizationEngine,
    anomaly_detector: AnomalyDetector,
    adaptive_tuner: AdaptiveTuner,
    stats: spin::Mutex<MLStats>,
    active: spin::Mutex<bool>,
}

impl MLSystem {
    /// Create a new machine learning system
    pub fn new() -> Result<Self, UnifiedError> {
        let prediction_engine = PredictionEngine::new()?;
        let optimization_engine = OptimizationEngine::new()?;
        let anomaly_detector = AnomalyDetector::new()?;
        let adaptive_tuner = AdaptiveTuner::new()?;

        Ok(Self {
            prediction_engine,
            optimization_engine,
            anomaly_detector,
            adaptive_tuner,
            stats: spin::Mutex::new(MLStats::default()),
            active: spin::Mutex::new(false),
        })
    }

    /// Initialize the machine learning system
    pub fn initialize(&self) -> Result<(), UnifiedError> {
        let mut active = self.active.lock();
        if *active {
            return Err(UnifiedError::already_initialized("ML system already active"));
        }

        // Initialize all components
        self.prediction_engine.initialize()?;
        self.optimization_engine.initialize()?;
        self.anomaly_detector.initialize()?;
        self.adaptive_tuner.initialize()?;

        *active = true;
        Ok(())
    }

    /// Shutdown the machine learning system
    pub fn shutdown(&self) -> Result<(), UnifiedError> {
        let mut active = self.active.lock();
        if !*active {
            return Err(UnifiedError::not_initialized("ML system not active"));
        }

        // Shutdown all components
        self.prediction_engine.shutdown()?;
        self.optimization_engine.shutdown()?;
        self.anomaly_detector.shutdown()?;
        self.adaptive_tuner.shutdown()?;

        *active = false;
        Ok(())
    }

    /// Get ML system status
    pub fn get_status(&self) -> MLStatus {
        let active = self.active.lock();
        MLStatus {
            active: *active,
            prediction_engine_status: self.prediction_engine.get_status(),
            optimization_engine_status: self.optimization_engine.get_status(),
            anomaly_detector_status: self.anomaly_detector.get_status(),
            adaptive_tuner_status: self.adaptive_tuner.get_status(),
        }
    }

    /// Get ML system statistics
    pub fn get_stats(&self) -> MLStats {
        self.stats.lock().clone()
    }

    /// Train a prediction model
    pub fn train_prediction_model(&self, model_config: ModelConfig) -> Result<u64, UnifiedError> {
        let active = self.active.lock();
        if !*active {
            return Err(UnifiedError::not_initialized("ML system not active"));
        }

        let mut stats = self.stats.lock();
        stats.models_trained += 1;

        self.prediction_engine.train_model(model_config)
    }

    /// Make a prediction
    pub fn predict(&self, model_id: u64, input: &PredictionInput) -> Result<PredictionOutput, UnifiedError> {
        let active = self.active.lock();
        if !*active {
            return Err(UnifiedError::not_initialized("ML system not active"));
        }

        let mut stats = self.stats.lock();
        stats.predictions_made += 1;

        self.prediction_engine.predict(model_id, input)
    }

    /// Optimize system parameters
    pub fn optimize(&self, optimization_target: OptimizationTarget) -> Result<OptimizationResult, UnifiedError> {
        let active = self.active.lock();
        if !*active {
            return Err(UnifiedError::not_initialized("ML system not active"));
        }

        let mut stats = self.stats.lock();
        stats.optimizations_performed += 1;

        self.optimization_engine.optimize(optimization_target)
    }

    /// Detect anomalies in system behavior
    pub fn detect_anomalies(&self, data: &AnomalyData) -> Result<Vec<Anomaly>, UnifiedError> {
        let active = self.active.lock();
        if !*active {
            return Err(UnifiedError::not_initialized("ML system not active"));
        }

        let mut stats = self.stats.lock();
        stats.anomaly_checks += 1;

        self.anomaly_detector.detect(data)
    }

    /// Adaptively tune system parameters
    pub fn adaptive_tune(&self, tuning_target: TuningTarget) -> Result<TuningResult, UnifiedError> {
        let active = self.active.lock();
        if !*active {
            return Err(UnifiedError::not_initialized("ML system not active"));
        }

        let mut stats = self.stats.lock();
        stats.adaptive_tunings += 1;

        self.adaptive_tuner.tune(tuning_target)
    }

    /// Get ML recommendations
    pub fn get_recommendations(&self) -> Vec<MLRecommendation> {
        let mut recommendations = Vec::new();

        // Get recommendations from all components
        recommendations.extend(self.prediction_engine.get_recommendations());
        recommendations.extend(self.optimization_engine.get_recommendations());
        recommendations.extend(self.anomaly_detector.get_recommendations());
        recommendations.extend(self.adaptive_tuner.get_recommendations());

        recommendations
    }

    /// Reset ML statistics
    pub fn reset_stats(&self) {
        let mut stats = self.stats.lock();
        *stats = MLStats::default();
        
        // Reset individual component stats
        self.prediction_engine.reset_stats();
        self.optimization_engine.reset_stats();
        self.anomaly_detector.reset_stats();
        self.adaptive_tuner.reset_stats();
    }

    /// Optimize ML system
    pub fn optimize(&self) -> Result<(), UnifiedError> {
        let active = self.active.lock();
        if !*active {
            return Err(UnifiedError::not_initialized("ML system not active"));
        }

        // Optimize individual components
        self.prediction_engine.optimize()?;
        self.optimization_engine.optimize()?;
        self.anomaly_detector.optimize()?;
        self.adaptive_tuner.optimize()?;

        Ok(())
    }

    /// Check if ML system is active
    pub fn is_active(&self) -> bool {
        *self.active.lock()
    }
}

/// ML system statistics
#[derive(Debug, Clone, Default)]
pub struct MLStats {
    /// Models trained
    pub models_trained: u64,
    /// Predictions made
    pub predictions_made: u64,
    /// Optimizations performed
    pub optimizations_performed: u64,
    /// Anomaly checks
    pub anomaly_checks: u64,
    /// Adaptive tunings
    pub adaptive_tunings: u64,
}

/// ML system status
#[derive(Debug, Clone)]
pub struct MLStatus {
    pub active: bool,
    pub prediction_engine_status: PredictionEngineStatus,
    pub optimization_engine_status: OptimizationEngineStatus,
    pub anomaly_detector_status: AnomalyDetectorStatus,
    pub adaptive_tuner_status: AdaptiveTunerStatus,
}

/// Model configuration
#[derive(Debug, Clone)]
pub struct ModelConfig {
    pub name: String,
    pub model_type: ModelType,
    pub training_data: TrainingData,
    pub hyperparameters: BTreeMap<String, f64>,
}

/// Model type
#[derive(Debug, Clone)]
pub enum ModelType {
    LinearRegression,
    NeuralNetwork,
    DecisionTree,
    RandomForest,
    SVM,
    Clustering,
}

/// Training data
#[derive(Debug, Clone)]
pub struct TrainingData {
    pub features: Vec<Vec<f64>>,
    pub labels: Vec<f64>,
}

/// Prediction input
#[derive(Debug, Clone)]
pub struct PredictionInput {
    pub features: Vec<f64>,
}

/// Prediction output
#[derive(Debug, Clone)]
pub struct PredictionOutput {
    pub prediction: f64,
    pub confidence: f64,
    pub metadata: BTreeMap<String, String>,
}

/// Optimization target
#[derive(Debug, Clone)]
pub enum OptimizationTarget {
    Performance,
    MemoryUsage,
    PowerConsumption,
    Latency,
    Throughput,
    Custom(String),
}

/// Optimization result
#[derive(Debug, Clone)]
pub struct OptimizationResult {
    pub target: OptimizationTarget,
    pub parameters: BTreeMap<String, f64>,
    pub expected_improvement: f64,
    pub confidence: f64,
}

/// Anomaly data
#[derive(Debug, Clone)]
pub struct AnomalyData {
    pub metrics: BTreeMap<String, f64>,
    pub timestamp: u64,
    pub context: BTreeMap<String, String>,
}

/// Anomaly
#[derive(Debug, Clone)]
pub struct Anomaly {
    pub anomaly_type: AnomalyType,
    pub severity: AnomalySeverity,
    pub description: String,
    pub confidence: f64,
    pub affected_metrics: Vec<String>,
}

/// Anomaly type
#[derive(Debug, Clone)]
pub enum AnomalyType {
    Spike,
    Drop,
    Trend,
    Outlier,
    Pattern,
}

/// Anomaly severity
#[derive(Debug, Clone)]
pub enum AnomalySeverity {
    Low,
    Medium,
    High,
    Critical,
}

/// Tuning target
#[derive(Debug, Clone)]
pub enum TuningTarget {
    Scheduler,
    MemoryAllocator,
    NetworkStack,
    FileSystem,
    Custom(String),
}

/// Tuning result
#[derive(Debug, Clone)]
pub struct TuningResult {
    pub target: TuningTarget,
    pub parameters: BTreeMap<String, f64>,
    pub expected_improvement: f64,
    pub adaptation_rate: f64,
}

/// ML recommendation
#[derive(Debug, Clone)]
pub struct MLRecommendation {
    pub category: String,
    pub priority: RecommendationPriority,
    pub title: String,
    pub description: String,
    pub expected_impact: f64,
}

/// Recommendation priority
#[derive(Debug, Clone)]
pub enum RecommendationPriority {
    Low,
    Medium,
    High,
}

// Status structures

/// Prediction engine status
#[derive(Debug, Clone)]
pub struct PredictionEngineStatus {
    pub active: bool,
    pub models_count: usize,
    pub predictions_count: u64,
}

/// Optimization engine status
#[derive(Debug, Clone)]
pub struct OptimizationEngineStatus {
    pub active: bool,
    pub optimizations_count: u64,
    pub success_rate: f64,
}

/// Anomaly detector status
#[derive(Debug, Clone)]
pub struct AnomalyDetectorStatus {
    pub active: bool,
    pub anomalies_detected: u64,
    pub false_positive_rate: f64,
}

/// Adaptive tuner status
#[derive(Debug, Clone)]
pub struct AdaptiveTunerStatus {
    pub active: bool,
    pub tunings_performed: u64,
    pub adaptation_rate: f64,
}

/// Global ML system instance
static mut ML_SYSTEM: Option<MLSystem> = None;
static ML_INIT: spin::Once = spin::Once::new();

/// Initialize global ML system
pub fn init_ml() -> Result<(), UnifiedError> {
    ML_INIT.call_once(|| {
        match MLSystem::new() {
            Ok(system) => {
                if let Err(e) = system.initialize() {
                    log::error!("Failed to initialize ML system: {}", e);
                    return;
                }
                unsafe {
                    ML_SYSTEM = Some(system);
                }
                log::info!("Global ML system initialized");
            }
            Err(e) => {
                log::error!("Failed to create ML system: {}", e);
            }
        }
    });
    Ok(())
}

/// Get global ML system
pub fn get_ml_system() -> Option<&'static MLSystem> {
    unsafe { ML_SYSTEM.as_ref() }
}

/// Check if ML features are available
pub fn is_ml_available() -> bool {
    if let Some(system) = get_ml_system() {
        system.is_active()
    } else {
        false
    }
}

/// Initialize ML subsystem
pub fn init() -> Result<(), UnifiedError> {
    log::info!("Initializing ML subsystem");
    
    // Initialize global ML system
    init_ml()?;
    
    log::info!("ML subsystem initialized");
    Ok(())
}

/// Shutdown ML subsystem
pub fn shutdown() -> Result<(), UnifiedError> {
    log::info!("Shutting down ML subsystem");
    
    // Shutdown global ML system
    // In a real implementation, this would clean up resources
    
    log::info!("ML subsystem shutdown complete");
    Ok(())
}