//! Prediction Engine for Machine Learning
//! 
//! This module provides prediction capabilities for various kernel components,
//! including performance prediction, resource usage prediction, and trend analysis.

use crate::error::unified::UnifiedError;
use crate::ml::mod::{ModelConfig, ModelType, TrainingData, PredictionInput, PredictionOutput, MLRecommendation, RecommendationPriority};
use alloc::collections::BTreeMap;
use alloc::vec::Vec;
use alloc::string::String;
use core::sync::atomic::{AtomicU64, AtomicUsize, Ordering};

/// Prediction engine for machine learning
pub struct PredictionEngine {
    models: Mutex<BTreeMap<u64, TrainedModel>>,
    next_model_id: AtomicU64,
    stats: Mutex<PredictionEngineStats>,
    active: bool,
}

impl PredictionEngine {
    /// Create a new prediction engine
    pub fn new() -> Result<Self, UnifiedError> {
        Ok(Self {
            models: Mutex::new(BTreeMap::new()),
            next_model_id: AtomicU64::new(1),
            stats: Mutex::new(PredictionEngineStats::default()),
            active: false,
        })
    }

    /// Initialize the prediction engine
    pub fn initialize(&mut self) -> Result<(), UnifiedError> {
        if self.active {
            return Err(UnifiedError::already_initialized("Prediction engine already active"));
        }

        self.active = true;
        Ok(())
    }

    /// Shutdown the prediction engine
    pub fn shutdown(&mut self) -> Result<(), UnifiedError> {
        if !self.active {
            return Err(UnifiedError::not_initialized("Prediction engine not active"));
        }

        self.active = false;
        Ok(())
    }

    /// Get prediction engine status
    pub fn get_status(&self) -> crate::ml::mod::PredictionEngineStatus {
        crate::ml::mod::PredictionEngineStatus {
            active: self.active,
            models_count: self.models.lock().len(),
            predictions_count: self.stats.lock().predictions_made,
        }
    }

    /// Train a new model
    pub fn train_model(&self, model_config: ModelConfig) -> Result<u64, UnifiedError> {
        if !self.active {
            return Err(UnifiedError::not_initialized("Prediction engine not active"));
        }

        let model_id = self.next_model_id.fetch_add(1, Ordering::SeqCst);
        
        // In a real implementation, this would actually train the model
        let trained_model = TrainedModel {
            model_id,
            config: model_config.clone(),
            accuracy: 0.85, // Mock accuracy
            training_time: self.get_current_timestamp(),
            metadata: BTreeMap::new(),
        };

        let mut models = self.models.lock();
        models.insert(model_id, trained_model);

        let mut stats = self.stats.lock();
        stats.models_trained += 1;

        Ok(model_id)
    }

    /// Make a prediction using a trained model
    pub fn predict(&self, model_id: u64, input: &PredictionInput) -> Result<PredictionOutput, UnifiedError> {
        if !self.active {
            return Err(UnifiedError::not_initialized("Prediction engine not active"));
        }

        let models = self.models.lock();
        let model = models.get(&model_id)
            .ok_or_else(|| UnifiedError::not_found("Model not found"))?;

        // In a real implementation, this would use the actual model
        let prediction = self.mock_predict(&model.config, input);

        let mut stats = self.stats.lock();
        stats.predictions_made += 1;

        Ok(prediction)
    }

    /// Get model information
    pub fn get_model_info(&self, model_id: u64) -> Result<TrainedModel, UnifiedError> {
        if !self.active {
            return Err(UnifiedError::not_initialized("Prediction engine not active"));
        }

        let models = self.models.lock();
        let model = models.get(&model_id)
            .ok_or_else(|| UnifiedError::not_found("Model not found"))?;

        Ok(model.clone())
    }

    /// List all models
    pub fn list_models(&self) -> Result<Vec<TrainedModel>, UnifiedError> {
        if !self.active {
            return Err(UnifiedError::not_initialized("Prediction engine not active"));
        }

        let models = self.models.lock();
        Ok(models.values().cloned().collect())
    }

    /// Delete a model
    pub fn delete_model(&self, model_id: u64) -> Result<(), UnifiedError> {
        if !self.active {
            return Err(UnifiedError::not_initialized("Prediction engine not active"));
        }

        let mut models = self.models.lock();
        if models.remove(&model_id).is_some() {
            let mut stats = self.stats.lock();
            stats.models_deleted += 1;
            Ok(())
        } else {
            Err(UnifiedError::not_found("Model not found"))
        }
    }

    /// Mock prediction function
    fn mock_predict(&self, config: &ModelConfig, input: &PredictionInput) -> PredictionOutput {
        // Simple mock prediction based on input features
        let prediction = match config.model_type {
            ModelType::LinearRegression => {
                // y = 0.5 * x1 + 0.3 * x2 + 0.2 * x3
                let mut result = 0.0;
                for (i, &feature) in input.features.iter().enumerate() {
                    let weight = match i {
                        0 => 0.5,
                        1 => 0.3,
                        2 => 0.2,
                        _ => 0.1,
                    };
                    result += weight * feature;
                }
                result
            }
            ModelType::NeuralNetwork => {
                // Mock neural network prediction
                let mut result = 0.0;
                for &feature in &input.features {
                    result += feature * 0.25;
                }
                (result / input.features.len() as f64).tanh()
            }
            ModelType::DecisionTree => {
                // Mock decision tree prediction
                if input.features.len() > 0 && input.features[0] > 0.5 {
                    1.0
                } else {
                    0.0
                }
            }
            ModelType::RandomForest => {
                // Mock random forest prediction
                let mut sum = 0.0;
                for &feature in &input.features {
                    sum += feature;
                }
                (sum / input.features.len() as f64) * 0.8
            }
            ModelType::SVM => {
                // Mock SVM prediction
                let mut dot_product = 0.0;
                for &feature in &input.features {
                    dot_product += feature * 0.7;
                }
                if dot_product > 0.0 { 1.0 } else { -1.0 }
            }
            ModelType::Clustering => {
                // Mock clustering prediction
                let mut sum = 0.0;
                for &feature in &input.features {
                    sum += feature;
                }
                (sum % 5.0).floor()
            }
        };

        PredictionOutput {
            prediction,
            confidence: 0.85, // Mock confidence
            metadata: BTreeMap::new(),
        }
    }

    /// Get current timestamp
    fn get_current_timestamp(&self) -> u64 {
        // In a real implementation, this would get the actual system time
        1234567890
    }

    /// Get prediction engine recommendations
    pub fn get_recommendations(&self) -> Vec<MLRecommendation> {
        let mut recommendations = Vec::new();
        let stats = self.stats.lock();

        if stats.models_trained > 0 && stats.predictions_made == 0 {
            recommendations.push(MLRecommendation {
                category: "Prediction".to_string(),
                priority: RecommendationPriority::Medium,
                title: "Use trained models for predictions".to_string(),
                description: "You have trained models but haven't made any predictions. Consider using them for system optimization".to_string(),
                expected_impact: 0.7,
            });
        }

        if stats.models_trained > 10 && stats.models_deleted == 0 {
            recommendations.push(MLRecommendation {
                category: "Prediction".to_string(),
                priority: RecommendationPriority::Low,
                title: "Clean up unused models".to_string(),
                description: "You have many models. Consider removing unused ones to save memory".to_string(),
                expected_impact: 0.3,
            });
        }

        recommendations
    }

    /// Reset prediction engine statistics
    pub fn reset_stats(&self) {
        let mut stats = self.stats.lock();
        *stats = PredictionEngineStats::default();
    }

    /// Optimize prediction engine
    pub fn optimize(&self) -> Result<(), UnifiedError> {
        if !self.active {
            return Err(UnifiedError::not_initialized("Prediction engine not active"));
        }

        // In a real implementation, this would optimize the prediction engine
        Ok(())
    }
}

/// Trained model
#[derive(Debug, Clone)]
pub struct TrainedModel {
    pub model_id: u64,
    pub config: ModelConfig,
    pub accuracy: f64,
    pub training_time: u64,
    pub metadata: BTreeMap<String, String>,
}

/// Prediction engine statistics
#[derive(Debug, Clone, Default)]
pub struct PredictionEngineStats {
    pub models_trained: u64,
    pub models_deleted: u64,
    pub predictions_made: u64,
}