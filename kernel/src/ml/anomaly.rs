//! Anomaly Detector for Machine Learning
//! 
//! This module provides anomaly detection capabilities for various kernel components,
//! including performance anomalies, security anomalies, and system behavior anomalies.

use crate::error::unified::UnifiedError;
use crate::ml::mod::{AnomalyData, Anomaly, AnomalyType, AnomalySeverity, MLRecommendation, RecommendationPriority};
use alloc::collections::BTreeMap;
use alloc::vec::Vec;
use alloc::string::String;
use core::sync::atomic::{AtomicU64, AtomicUsize, Ordering};

/// Anomaly detector for machine learning
pub struct AnomalyDetector {
    anomalies: Mutex<BTreeMap<u64, AnomalyRecord>>,
    detection_models: Mutex<BTreeMap<String, DetectionModel>>,
    next_anomaly_id: AtomicU64,
    stats: Mutex<AnomalyDetectorStats>,
    active: bool,
}

impl AnomalyDetector {
    /// Create a new anomaly detector
    pub fn new() -> Result<Self, UnifiedError> {
        Ok(Self {
            anomalies: Mutex::new(BTreeMap::new()),
            detection_models: Mutex::new(BTreeMap::new()),
            next_anomaly_id: AtomicU64::new(1),
            stats: Mutex::new(AnomalyDetectorStats::default()),
            active: false,
        })
    }

    /// Initialize the anomaly detector
    pub fn initialize(&mut self) -> Result<(), UnifiedError> {
        if self.active {
            return Err(UnifiedError::already_initialized("Anomaly detector already active"));
        }

        // Initialize default detection models
        let mut models = self.detection_models.lock();
        models.insert("performance".to_string(), DetectionModel::new("performance"));
        models.insert("security".to_string(), DetectionModel::new("security"));
        models.insert("resource".to_string(), DetectionModel::new("resource"));

        self.active = true;
        Ok(())
    }

    /// Shutdown the anomaly detector
    pub fn shutdown(&mut self) -> Result<(), UnifiedError> {
        if !self.active {
            return Err(UnifiedError::not_initialized("Anomaly detector not active"));
        }

        self.active = false;
        Ok(())
    }

    /// Get anomaly detector status
    pub fn get_status(&self) -> crate::ml::mod::AnomalyDetectorStatus {
        let stats = self.stats.lock();
        crate::ml::mod::AnomalyDetectorStatus {
            active: self.active,
            anomalies_detected: stats.anomalies_detected,
            false_positive_rate: if stats.anomalies_detected > 0 {
                stats.false_positives as f64 / stats.anomalies_detected as f64
            } else {
                0.0
            },
        }
    }

    /// Detect anomalies in system behavior
    pub fn detect(&self, data: &AnomalyData) -> Result<Vec<Anomaly>, UnifiedError> {
        if !self.active {
            return Err(UnifiedError::not_initialized("Anomaly detector not active"));
        }

        let mut detected_anomalies = Vec::new();
        let models = self.detection_models.lock();

        // Check each detection model
        for (model_name, model) in models.iter() {
            if let Some(anomaly) = self.check_for_anomaly(model, data) {
                detected_anomalies.push(anomaly);
            }
        }

        // Record detected anomalies
        for anomaly in &detected_anomalies {
            self.record_anomaly(anomaly.clone());
        }

        let mut stats = self.stats.lock();
        stats.anomaly_checks += 1;
        stats.anomalies_detected += detected_anomalies.len() as u64;

        Ok(detected_anomalies)
    }

    /// Check for anomalies using a specific model
    fn check_for_anomaly(&self, model: &DetectionModel, data: &AnomalyData) -> Option<Anomaly> {
        // In a real implementation, this would use the actual model
        // For now, we'll use simple threshold-based detection
        
        for (metric_name, &value) in &data.metrics {
            if let Some(threshold) = model.thresholds.get(metric_name) {
                if value > *threshold {
                    return Some(Anomaly {
                        anomaly_type: AnomalyType::Spike,
                        severity: if value > threshold * 2.0 { AnomalySeverity::High } else { AnomalySeverity::Medium },
                        description: format!("Metric {} exceeded threshold: {} > {}", metric_name, value, threshold),
                        confidence: 0.8,
                        affected_metrics: vec![metric_name.clone()],
                    });
                }
            }
        }

        None
    }

    /// Record an anomaly
    fn record_anomaly(&self, anomaly: Anomaly) {
        let anomaly_id = self.next_anomaly_id.fetch_add(1, Ordering::SeqCst);
        
        let record = AnomalyRecord {
            anomaly_id,
            anomaly: anomaly.clone(),
            timestamp: self.get_current_timestamp(),
            acknowledged: false,
        };

        let mut anomalies = self.anomalies.lock();
        anomalies.insert(anomaly_id, record);
    }

    /// Get anomaly history
    pub fn get_anomaly_history(&self) -> Result<Vec<AnomalyRecord>, UnifiedError> {
        if !self.active {
            return Err(UnifiedError::not_initialized("Anomaly detector not active"));
        }

        let anomalies = self.anomalies.lock();
        Ok(anomalies.values().cloned().collect())
    }

    /// Get anomaly details
    pub fn get_anomaly_details(&self, anomaly_id: u64) -> Result<AnomalyRecord, UnifiedError> {
        if !self.active {
            return Err(UnifiedError::not_initialized("Anomaly detector not active"));
        }

        let anomalies = self.anomalies.lock();
        let anomaly = anomalies.get(&anomaly_id)
            .ok_or_else(|| UnifiedError::not_found("Anomaly not found"))?;

        Ok(anomaly.clone())
    }

    /// Acknowledge an anomaly
    pub fn acknowledge_anomaly(&self, anomaly_id: u64) -> Result<(), UnifiedError> {
        if !self.active {
            return Err(UnifiedError::not_initialized("Anomaly detector not active"));
        }

        let mut anomalies = self.anomalies.lock();
        if let Some(record) = anomalies.get_mut(&anomaly_id) {
            record.acknowledged = true;
            Ok(())
        } else {
            Err(UnifiedError::not_found("Anomaly not found"))
        }
    }

    /// Create a new detection model
    pub fn create_detection_model(&self, name: &str, thresholds: BTreeMap<String, f64>) -> Result<(), UnifiedError> {
        if !self.active {
            return Err(UnifiedError::not_initialized("Anomaly detector not active"));
        }

        let mut model = DetectionModel::new(name);
        model.thresholds = thresholds;

        let mut models = self.detection_models.lock();
        models.insert(name.to_string(), model);

        Ok(())
    }

    /// Update detection model thresholds
    pub fn update_model_thresholds(&self, name: &str, thresholds: BTreeMap<String, f64>) -> Result<(), UnifiedError> {
        if !self.active {
            return Err(UnifiedError::not_initialized("Anomaly detector not active"));
        }

        let mut models = self.detection_models.lock();
        if let Some(model) = models.get_mut(name) {
            model.thresholds = thresholds;
            Ok(())
        } else {
            Err(UnifiedError::not_found("Detection model not found"))
        }
    }

    /// Get current timestamp
    fn get_current_timestamp(&self) -> u64 {
        // In a real implementation, this would get the actual system time
        1234567890
    }

    /// Get anomaly detector recommendations
    pub fn get_recommendations(&self) -> Vec<MLRecommendation> {
        let mut recommendations = Vec::new();
        let stats = self.stats.lock();

        if stats.anomaly_checks == 0 {
            recommendations.push(MLRecommendation {
                category: "Anomaly Detection".to_string(),
                priority: RecommendationPriority::Medium,
                title: "Enable anomaly detection".to_string(),
                description: "Consider enabling anomaly detection to identify unusual system behavior".to_string(),
                expected_impact: 0.7,
            });
        }

        if stats.anomalies_detected > 10 && stats.false_positives as f64 / stats.anomalies_detected as f64 > 0.3 {
            recommendations.push(MLRecommendation {
                category: "Anomaly Detection".to_string(),
                priority: RecommendationPriority::High,
                title: "Adjust anomaly detection thresholds".to_string(),
                description: "High false positive rate detected. Consider adjusting detection thresholds".to_string(),
                expected_impact: 0.6,
            });
        }

        recommendations
    }

    /// Reset anomaly detector statistics
    pub fn reset_stats(&self) {
        let mut stats = self.stats.lock();
        *stats = AnomalyDetectorStats::default();
    }

    /// Optimize anomaly detector
    pub fn optimize(&self) -> Result<(), UnifiedError> {
        if !self.active {
            return Err(UnifiedError::not_initialized("Anomaly detector not active"));
        }

        // In a real implementation, this would optimize the anomaly detector
        Ok(())
    }
}

/// Detection model for anomaly detection
#[derive(Debug, Clone)]
pub struct DetectionModel {
    pub name: String,
    pub thresholds: BTreeMap<String, f64>,
    pub created_at: u64,
}

impl DetectionModel {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            thresholds: BTreeMap::new(),
            created_at: 1234567890, // Mock timestamp
        }
    }
}

/// Anomaly record
#[derive(Debug, Clone)]
pub struct AnomalyRecord {
    pub anomaly_id: u64,
    pub anomaly: Anomaly,
    pub timestamp: u64,
    pub acknowledged: bool,
}

/// Anomaly detector statistics
#[derive(Debug, Clone, Default)]
pub struct AnomalyDetectorStats {
    pub anomaly_checks: u64,
    pub anomalies_detected: u64,
    pub false_positives: u64,
}