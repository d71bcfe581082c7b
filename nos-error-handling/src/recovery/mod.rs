//! Error recovery
//! 
//! This module provides error recovery strategies and management.

use crate::Result;
use crate::Error;
use nos_api::collections::BTreeMap;
use spin::Mutex;

extern crate alloc;

use alloc::string::String;
use alloc::string::ToString;
use alloc::format;

/// Recovery manager
#[derive(Default)]
pub struct RecoveryManager {
    /// Recovery strategies
    strategies: BTreeMap<u32, RecoveryStrategy>,
    /// Recovery statistics
    stats: Mutex<RecoveryStats>,
}

impl RecoveryManager {
    /// Create a new recovery manager
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a recovery strategy
    pub fn add_strategy(&mut self, strategy: RecoveryStrategy) {
        self.strategies.insert(strategy.id, strategy);
    }

    /// Execute a recovery action
    pub fn execute_recovery_action(&self, action: &crate::types::RecoveryAction) -> Result<()> {
        // Get the strategy for this action type
        let strategy = self.strategies.get(&(action.action_type as u32));
        
        if let Some(strategy) = strategy {
            // Execute the strategy
            self.execute_strategy(strategy, action)
        } else {
            // Default recovery action
            self.default_recovery_action(action)
        }
    }

    /// Apply a recovery strategy
    pub fn apply_recovery_strategy(&self, strategy_id: &crate::types::RecoveryStrategy, error_record: &crate::types::ErrorRecord) -> Result<()> {
        // Get the strategy
        let strategy = self.strategies.get(&(*strategy_id as u32));
        
        if let Some(strategy) = strategy {
            // Apply the strategy
            self.apply_strategy(strategy, error_record)
        } else {
            Err(Error::NotFound(format!("Recovery strategy {} not found", *strategy_id as u32)))
        }
    }

    /// Get recovery statistics
    pub fn get_stats(&self) -> RecoveryStats {
        self.stats.lock().clone()
    }

    /// Execute a strategy
    fn execute_strategy(&self, strategy: &RecoveryStrategy, action: &crate::types::RecoveryAction) -> Result<()> {
        // TODO: Implement actual strategy execution
        let mut stats = self.stats.lock();
        stats.total_actions += 1;
        
        if action.success {
            stats.successful_actions += 1;
        } else {
            stats.failed_actions += 1;
        }
        
        // Use strategy parameter by accessing its fields
        let _ = &strategy.name;
        let _ = strategy.max_attempts;
        
        Ok(())
    }

    /// Apply a strategy
    fn apply_strategy(&self, strategy: &RecoveryStrategy, error_record: &crate::types::ErrorRecord) -> Result<()> {
        // TODO: Implement actual strategy application
        let mut stats = self.stats.lock();
        stats.total_strategies_applied += 1;
        
        if error_record.resolved {
            stats.successful_strategies += 1;
        } else {
            stats.failed_strategies += 1;
        }
        
        // Use strategy parameter by accessing its fields
        let _ = &strategy.name;
        let _ = strategy.id;
        
        Ok(())
    }

    /// Default recovery action
    fn default_recovery_action(&self, action: &crate::types::RecoveryAction) -> Result<()> {
        // TODO: Implement default recovery action
        let mut stats = self.stats.lock();
        stats.total_actions += 1;
        
        if action.success {
            stats.successful_actions += 1;
        } else {
            stats.failed_actions += 1;
        }
        
        Ok(())
    }

    /// Initialize the recovery manager
    pub fn init(&mut self) -> Result<()> {
        // Add default recovery strategies
        self.add_default_strategies();
        Ok(())
    }

    /// Shutdown the recovery manager
    pub fn shutdown(&mut self) -> Result<()> {
        // TODO: Shutdown recovery manager
        Ok(())
    }

    /// Add default recovery strategies
    fn add_default_strategies(&mut self) {
        // Clear existing strategies to avoid duplicates
        self.strategies.clear();
        // Retry strategy
        self.add_strategy(RecoveryStrategy {
            id: crate::types::RecoveryActionType::Retry as u32,
            name: "Retry".to_string(),
            description: "Retry the failed operation".to_string(),
            max_attempts: 3,
            retry_delay_ms: 1000,
            backoff_multiplier: 2.0,
        });
        
        // Restart strategy
        self.add_strategy(RecoveryStrategy {
            id: crate::types::RecoveryActionType::Restart as u32,
            name: "Restart".to_string(),
            description: "Restart the failed component".to_string(),
            max_attempts: 3,
            retry_delay_ms: 5000,
            backoff_multiplier: 1.5,
        });
        
        // Degrade strategy (using Isolate as the closest available variant)
        self.add_strategy(RecoveryStrategy {
            id: crate::types::RecoveryActionType::Isolate as u32,
            name: "Degrade".to_string(),
            description: "Degrade service functionality".to_string(),
            max_attempts: 1,
            retry_delay_ms: 0,
            backoff_multiplier: 1.0,
        });
    }
}

/// Recovery strategy
#[derive(Debug, Clone)]
pub struct RecoveryStrategy {
    /// Strategy ID
    pub id: u32,
    /// Strategy name
    pub name: String,
    /// Strategy description
    pub description: String,
    /// Maximum attempts
    pub max_attempts: u32,
    /// Retry delay (milliseconds)
    pub retry_delay_ms: u64,
    /// Backoff multiplier
    pub backoff_multiplier: f64,
}

/// Recovery statistics
#[derive(Debug, Clone, Default)]
pub struct RecoveryStats {
    /// Total recovery actions
    pub total_actions: u64,
    /// Successful recovery actions
    pub successful_actions: u64,
    /// Failed recovery actions
    pub failed_actions: u64,
    /// Total strategies applied
    pub total_strategies_applied: u64,
    /// Successful strategies
    pub successful_strategies: u64,
    /// Failed strategies
    pub failed_strategies: u64,
    /// Average recovery time (microseconds)
    pub avg_recovery_time: u64,
}

/// Global recovery manager
static GLOBAL_MANAGER: spin::Once<Mutex<RecoveryManager>> = spin::Once::new();

/// Initialize the global recovery manager
pub fn init_manager() -> Result<()> {
    GLOBAL_MANAGER.call_once(|| {
        Mutex::new(RecoveryManager::new())
    });
    
    // Initialize the manager
    GLOBAL_MANAGER.get().unwrap().lock().init()
}

/// Get the global recovery manager
pub fn get_manager() -> &'static Mutex<RecoveryManager> {
    GLOBAL_MANAGER.get().expect("Recovery manager not initialized")
}

/// Internal function to get the global recovery manager
fn get_manager_internal() -> &'static Mutex<RecoveryManager> {
    get_manager()
}

/// Shutdown the global recovery manager
pub fn shutdown_manager() -> Result<()> {
    // Note: spin::Once doesn't provide a way to reset, so we just return Ok(())
    // In a real implementation, you might want to provide a different approach
    Ok(())
}

/// Execute a recovery action
pub fn execute_recovery_action(action: &crate::types::RecoveryAction) -> Result<()> {
    let manager = get_manager().lock();
    manager.execute_recovery_action(action)
}

/// Apply a recovery strategy
pub fn apply_recovery_strategy(strategy_id: &crate::types::RecoveryStrategy, error_record: &crate::types::ErrorRecord) -> Result<()> {
    let manager = get_manager_internal().lock();
    manager.apply_recovery_strategy(strategy_id, error_record)
}

/// Get recovery statistics
pub fn recovery_get_stats() -> RecoveryStats {
    get_manager_internal().lock().get_stats()
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;

    #[test]
    fn test_recovery_manager() {
        let mut manager = RecoveryManager::new();
        
        // Add a test strategy
        let strategy = RecoveryStrategy {
            id: 100,
            name: "Test Strategy".to_string(),
            description: "Test recovery strategy".to_string(),
            max_attempts: 3,
            retry_delay_ms: 1000,
            backoff_multiplier: 2.0,
        };
        manager.add_strategy(strategy);
        
        // Execute a recovery action
        let action = crate::types::RecoveryAction {
            id: 1,
            action_type: crate::types::RecoveryActionType::Retry,
            name: "Test Action".to_string(),
            description: "Test recovery action".to_string(),
            execution_time: 1000,
            success: true,
            result_message: "Success".to_string(),
            parameters: alloc::collections::BTreeMap::new(),
        };
        
        assert!(manager.execute_recovery_action(&action).is_ok());
        
        // Check statistics
        let stats = manager.get_stats();
        assert_eq!(stats.total_actions, 1);
        assert_eq!(stats.successful_actions, 1);
        assert_eq!(stats.failed_actions, 0);
    }

    #[test]
    fn test_recovery_stats() {
        let stats = RecoveryStats::default();
        assert_eq!(stats.total_actions, 0);
        assert_eq!(stats.successful_actions, 0);
        assert_eq!(stats.failed_actions, 0);
        assert_eq!(stats.total_strategies_applied, 0);
        assert_eq!(stats.successful_strategies, 0);
        assert_eq!(stats.failed_strategies, 0);
        assert_eq!(stats.avg_recovery_time, 0);
    }
}