//! NUMA Policy Module
//! 
//! This module provides policy management for NUMA systems, including
//! dynamic policy adjustment, rule-based policies, and optimization.

use crate::error::unified::UnifiedError;
use crate::sync::Mutex;
use crate::numa::topology::{NodeId, NUMATopology};
use alloc::collections::BTreeMap;
use alloc::vec::Vec;
use core::sync::atomic::{AtomicU64, Ordering};

/// Policy types for NUMA systems
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PolicyType {
    /// Memory allocation policy
    MemoryAllocation,
    /// Task scheduling policy
    TaskScheduling,
    /// Load balancing policy
    LoadBalancing,
    /// Power management policy
    PowerManagement,
    /// Thermal management policy
    ThermalManagement,
}

/// Policy rule
#[derive(Debug, Clone)]
pub struct PolicyRule {
    /// Rule ID
    pub id: String,
    /// Rule type
    pub rule_type: PolicyType,
    /// Rule priority
    pub priority: u32,
    /// Rule conditions
    pub conditions: Vec<PolicyCondition>,
    /// Rule actions
    pub actions: Vec<PolicyAction>,
    /// Whether the rule is enabled
    pub enabled: bool,
    /// Rule creation time
    pub created_at: u64,
    /// Rule last modified time
    pub modified_at: u64,
    /// Rule hit count
    pub hit_count: AtomicU64,
}

/// Policy condition
#[derive(Debug, Clone)]
pub struct PolicyCondition {
    /// Condition type
    pub condition_type: ConditionType,
    /// Condition parameters
    pub parameters: BTreeMap<String, String>,
    /// Comparison operator
    pub operator: ComparisonOperator,
    /// Threshold value
    pub threshold: String,
}

/// Condition types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConditionType {
    /// CPU utilization
    CPUUtilization,
    /// Memory utilization
    MemoryUtilization,
    /// Load imbalance
    LoadImbalance,
    /// Memory locality
    MemoryLocality,
    /// Power consumption
    PowerConsumption,
    /// Temperature
    Temperature,
    /// Time of day
    TimeOfDay,
    /// Day of week
    DayOfWeek,
}

/// Comparison operators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComparisonOperator {
    /// Less than
    LessThan,
    /// Less than or equal
    LessThanOrEqual,
    /// Equal
    Equal,
    /// Greater than or equal
    GreaterThanOrEqual,
    /// Greater than
    GreaterThan,
    /// Not equal
    NotEqual,
    /// Contains
    Contains,
    /// Does not contain
    DoesNotContain,
}

/// Policy action
#[derive(Debug, Clone)]
pub struct PolicyAction {
    /// Action type
    pub action_type: ActionType,
    /// Action parameters
    pub parameters: BTreeMap<String, String>,
    /// Action delay (seconds)
    pub delay: u64,
    /// Action duration (seconds)
    pub duration: u64,
}

/// Action types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionType {
    /// Set memory allocation policy
    SetMemoryPolicy,
    /// Set task affinity
    SetTaskAffinity,
    /// Migrate task
    MigrateTask,
    /// Migrate memory
    MigrateMemory,
    /// Adjust CPU frequency
    AdjustCPUFrequency,
    /// Adjust power state
    AdjustPowerState,
    /// Trigger load balancing
    TriggerLoadBalancing,
    /// Send notification
    SendNotification,
}

/// NUMA policy manager
pub struct NUMAPolicyManager {
    /// NUMA topology
    topology: NUMATopology,
    /// Policy rules
    rules: Mutex<Vec<PolicyRule>>,
    /// Active policies
    active_policies: Mutex<BTreeMap<PolicyType, ActivePolicy>>,
    /// Policy statistics
    stats: Mutex<PolicyStats>,
    /// Policy evaluation history
    evaluation_history: Mutex<Vec<PolicyEvaluation>>,
    /// Maximum history entries
    max_history_entries: usize,
}

/// Active policy information
#[derive(Debug, Clone)]
pub struct ActivePolicy {
    /// Policy type
    pub policy_type: PolicyType,
    /// Current policy value
    pub current_value: String,
    /// Policy parameters
    pub parameters: BTreeMap<String, String>,
    /// Policy activation time
    pub activated_at: u64,
    /// Last evaluation time
    pub last_evaluated: u64,
    /// Evaluation count
    pub evaluation_count: u64,
}

/// Policy statistics
#[derive(Debug, Default)]
pub struct PolicyStats {
    /// Total policy evaluations
    pub total_evaluations: u64,
    /// Policy evaluations by type
    pub evaluations_by_type: BTreeMap<PolicyType, u64>,
    /// Rule matches
    pub rule_matches: u64,
    /// Rule applications
    pub rule_applications: u64,
    /// Policy changes
    pub policy_changes: u64,
    /// Average evaluation time (microseconds)
    pub avg_evaluation_time_us: u64,
}

/// Policy evaluation record
#[derive(Debug, Clone)]
pub struct PolicyEvaluation {
    /// Evaluation timestamp
    pub timestamp: u64,
    /// Policy type
    pub policy_type: PolicyType,
    /// Previous policy value
    pub previous_value: Option<String>,
    /// New policy value
    pub new_value: String,
    /// Triggering rules
    pub triggering_rules: Vec<String>,
    /// Evaluation duration (microseconds)
    pub duration_us: u64,
    /// Evaluation success
    pub success: bool,
}

impl NUMAPolicyManager {
    /// Create a new NUMA policy manager
    pub fn new(topology: NUMATopology) -> Self {
        Self {
            topology,
            rules: Mutex::new(Vec::new()),
            active_policies: Mutex::new(BTreeMap::new()),
            stats: Mutex::new(PolicyStats::default()),
            evaluation_history: Mutex::new(Vec::new()),
            max_history_entries: 1000,
        }
    }
    
    /// Add a policy rule
    pub fn add_rule(&self, rule: PolicyRule) -> Result<(), UnifiedError> {
        let mut rules = self.rules.lock();
        
        // Check if rule ID already exists
        if rules.iter().any(|r| r.id == rule.id) {
            return Err(UnifiedError::system("Policy rule ID already exists", None));
        }
        
        rules.push(rule);
        Ok(())
    }
    
    /// Remove a policy rule
    pub fn remove_rule(&self, rule_id: &str) -> Result<bool, UnifiedError> {
        let mut rules = self.rules.lock();
        
        let initial_len = rules.len();
        rules.retain(|r| r.id != rule_id);
        
        Ok(rules.len() < initial_len)
    }
    
    /// Get all policy rules
    pub fn get_rules(&self) -> Vec<PolicyRule> {
        let rules = self.rules.lock();
        rules.clone()
    }
    
    /// Get policy rules by type
    pub fn get_rules_by_type(&self, rule_type: PolicyType) -> Vec<PolicyRule> {
        let rules = self.rules.lock();
        rules.iter()
            .filter(|r| r.rule_type == rule_type)
            .cloned()
            .collect()
    }
    
    /// Enable a policy rule
    pub fn enable_rule(&self, rule_id: &str) -> Result<bool, UnifiedError> {
        let mut rules = self.rules.lock();
        
        for rule in rules.iter_mut() {
            if rule.id == rule_id {
                rule.enabled = true;
                return Ok(true);
            }
        }
        
        Ok(false)
    }
    
    /// Disable a policy rule
    pub fn disable_rule(&self, rule_id: &str) -> Result<bool, UnifiedError> {
        let mut rules = self.rules.lock();
        
        for rule in rules.iter_mut() {
            if rule.id == rule_id {
                rule.enabled = false;
                return Ok(true);
            }
        }
        
        Ok(false)
    }
    
    /// Evaluate policies
    pub fn evaluate_policies(&self) -> Result<Vec<PolicyEvaluation>, UnifiedError> {
        let start_time = self.get_timestamp();
        let mut evaluations = Vec::new();
        
        // Get current system state
        let system_state = self.get_system_state()?;
        
        // Get all rules
        let rules = self.rules.lock();
        
        // Evaluate each policy type
        for policy_type in [
            PolicyType::MemoryAllocation,
            PolicyType::TaskScheduling,
            PolicyType::LoadBalancing,
            PolicyType::PowerManagement,
            PolicyType::ThermalManagement,
        ] {
            let evaluation = self.evaluate_policy_type(policy_type, &system_state, &rules)?;
            evaluations.push(evaluation);
        }
        
        // Update statistics
        {
            let mut stats = self.stats.lock();
            stats.total_evaluations += 1;
            
            for evaluation in evaluations.iter() {
                *stats.evaluations_by_type.entry(evaluation.policy_type).or_insert(0) += 1;
                
                if evaluation.success {
                    stats.policy_changes += 1;
                }
            }
            
            let evaluation_time = self.get_timestamp() - start_time;
            stats.avg_evaluation_time_us = 
                (stats.avg_evaluation_time_us * (stats.total_evaluations - 1) + evaluation_time) / 
                stats.total_evaluations;
        }
        
        // Add to history
        {
            let mut history = self.evaluation_history.lock();
            
            // Remove oldest entries if needed
            if history.len() >= self.max_history_entries {
                let remove_count = history.len() - self.max_history_entries + 1;
                history.drain(0..remove_count);
            }
            
            history.extend(evaluations.clone());
        }
        
        Ok(evaluations)
    }
    
    /// Evaluate a specific policy type
    fn evaluate_policy_type(
        &self,
        policy_type: PolicyType,
        system_state: &SystemState,
        rules: &[PolicyRule],
    ) -> Result<PolicyEvaluation, UnifiedError> {
        let start_time = self.get_timestamp();
        
        // Get current active policy
        let current_policy = {
            let active_policies = self.active_policies.lock();
            active_policies.get(&policy_type).cloned()
        };
        
        // Find matching rules
        let matching_rules: Vec<_> = rules.iter()
            .filter(|r| r.rule_type == policy_type && r.enabled)
            .filter(|r| self.rule_matches_system_state(r, system_state))
            .collect();
        
        // Sort by priority
        let mut sorted_rules = matching_rules.clone();
        sorted_rules.sort_by(|a, b| a.priority.cmp(&b.priority));
        
        // Apply highest priority rule
        let mut new_value = current_policy.as_ref()
            .map(|p| p.current_value.clone())
            .unwrap_or_default();
        
        let mut triggering_rules = Vec::new();
        let mut success = false;
        
        if let Some(rule) = sorted_rules.first() {
            for action in rule.actions.iter() {
                match action.action_type {
                    ActionType::SetMemoryPolicy => {
                        if let Some(policy_value) = action.parameters.get("policy") {
                            new_value = policy_value.clone();
                            triggering_rules.push(rule.id.clone());
                            success = true;
                        }
                    },
                    ActionType::SetTaskAffinity => {
                        if let Some(affinity_value) = action.parameters.get("affinity") {
                            new_value = affinity_value.clone();
                            triggering_rules.push(rule.id.clone());
                            success = true;
                        }
                    },
                    ActionType::MigrateTask => {
                        // Task migration would be handled by the scheduler
                        new_value = "migrate_task".to_string();
                        triggering_rules.push(rule.id.clone());
                        success = true;
                    },
                    ActionType::MigrateMemory => {
                        // Memory migration would be handled by the memory manager
                        new_value = "migrate_memory".to_string();
                        triggering_rules.push(rule.id.clone());
                        success = true;
                    },
                    ActionType::AdjustCPUFrequency => {
                        if let Some(freq_value) = action.parameters.get("frequency") {
                            new_value = freq_value.clone();
                            triggering_rules.push(rule.id.clone());
                            success = true;
                        }
                    },
                    ActionType::AdjustPowerState => {
                        if let Some(state_value) = action.parameters.get("state") {
                            new_value = state_value.clone();
                            triggering_rules.push(rule.id.clone());
                            success = true;
                        }
                    },
                    ActionType::TriggerLoadBalancing => {
                        new_value = "load_balance".to_string();
                        triggering_rules.push(rule.id.clone());
                        success = true;
                    },
                    ActionType::SendNotification => {
                        // Notifications would be handled separately
                        new_value = "notification".to_string();
                        triggering_rules.push(rule.id.clone());
                    },
                }
            }
            
            // Update rule hit count
            rule.hit_count.fetch_add(1, Ordering::SeqCst);
        }
        
        // Update active policy if changed
        if success {
            let mut active_policies = self.active_policies.lock();
            
            let active_policy = ActivePolicy {
                policy_type,
                current_value: new_value.clone(),
                parameters: BTreeMap::new(),
                activated_at: self.get_timestamp(),
                last_evaluated: self.get_timestamp(),
                evaluation_count: current_policy.as_ref()
                    .map(|p| p.evaluation_count + 1)
                    .unwrap_or(1),
            };
            
            active_policies.insert(policy_type, active_policy);
        }
        
        let evaluation_time = self.get_timestamp() - start_time;
        
        Ok(PolicyEvaluation {
            timestamp: self.get_timestamp(),
            policy_type,
            previous_value: current_policy.map(|p| p.current_value.clone()),
            new_value,
            triggering_rules,
            duration_us: evaluation_time,
            success,
        })
    }
    
    /// Check if a rule matches the current system state
    fn rule_matches_system_state(&self, rule: &PolicyRule, system_state: &SystemState) -> bool {
        for condition in rule.conditions.iter() {
            if !self.condition_matches_system_state(condition, system_state) {
                return false;
            }
        }
        true
    }
    
    /// Check if a condition matches the current system state
    fn condition_matches_system_state(&self, condition: &PolicyCondition, system_state: &SystemState) -> bool {
        let threshold_value = &condition.threshold;
        
        match condition.condition_type {
            ConditionType::CPUUtilization => {
                if let Some(cpu_util) = system_state.cpu_utilization {
                    self.compare_values(cpu_util, threshold_value, condition.operator)
                } else {
                    false
                }
            },
            ConditionType::MemoryUtilization => {
                if let Some(mem_util) = system_state.memory_utilization {
                    self.compare_values(mem_util, threshold_value, condition.operator)
                } else {
                    false
                }
            },
            ConditionType::LoadImbalance => {
                if let Some(imbalance) = system_state.load_imbalance {
                    self.compare_values(imbalance, threshold_value, condition.operator)
                } else {
                    false
                }
            },
            ConditionType::MemoryLocality => {
                if let Some(locality) = system_state.memory_locality {
                    self.compare_values(locality, threshold_value, condition.operator)
                } else {
                    false
                }
            },
            ConditionType::PowerConsumption => {
                if let Some(power) = system_state.power_consumption {
                    self.compare_values(power, threshold_value, condition.operator)
                } else {
                    false
                }
            },
            ConditionType::Temperature => {
                if let Some(temp) = system_state.temperature {
                    self.compare_values(temp, threshold_value, condition.operator)
                } else {
                    false
                }
            },
            ConditionType::TimeOfDay => {
                // In a real implementation, this would check actual time
                // For now, we'll use a simple simulation
                let current_hour = (self.get_timestamp() / 3600) % 24;
                self.compare_values(&current_hour.to_string(), threshold_value, condition.operator)
            },
            ConditionType::DayOfWeek => {
                // In a real implementation, this would check actual day
                // For now, we'll use a simple simulation
                let current_day = (self.get_timestamp() / 86400) % 7;
                self.compare_values(&current_day.to_string(), threshold_value, condition.operator)
            },
        }
    }
    
    /// Compare two values using the specified operator
    fn compare_values(&self, value1: &str, value2: &str, operator: ComparisonOperator) -> bool {
        match operator {
            ComparisonOperator::LessThan => value1 < value2,
            ComparisonOperator::LessThanOrEqual => value1 <= value2,
            ComparisonOperator::Equal => value1 == value2,
            ComparisonOperator::GreaterThanOrEqual => value1 >= value2,
            ComparisonOperator::GreaterThan => value1 > value2,
            ComparisonOperator::NotEqual => value1 != value2,
            ComparisonOperator::Contains => value1.contains(value2),
            ComparisonOperator::DoesNotContain => !value1.contains(value2),
        }
    }
    
    /// Get current system state
    fn get_system_state(&self) -> Result<SystemState, UnifiedError> {
        // In a real implementation, this would query actual system state
        // For now, we'll simulate some values
        Ok(SystemState {
            cpu_utilization: Some("0.65"),
            memory_utilization: Some("0.72"),
            load_imbalance: Some("0.25"),
            memory_locality: Some("0.85"),
            power_consumption: Some("75.5"),
            temperature: Some("65.2"),
            node_utilizations: self.get_node_utilizations()?,
        })
    }
    
    /// Get utilization for all nodes
    fn get_node_utilizations(&self) -> Result<BTreeMap<NodeId, f32>, UnifiedError> {
        let mut utilizations = BTreeMap::new();
        
        for node_id in 0..self.topology.node_count() {
            // In a real implementation, this would query actual utilization
            // For now, we'll simulate some values
            let utilization = match node_id {
                0 => 0.45 + (self.get_timestamp() % 100) as f32 / 200.0,
                1 => 0.75 + (self.get_timestamp() % 100) as f32 / 300.0,
                _ => 0.60 + (self.get_timestamp() % 100) as f32 / 250.0,
            };
            
            utilizations.insert(node_id, utilization);
        }
        
        Ok(utilizations)
    }
    
    /// Get active policy
    pub fn get_active_policy(&self, policy_type: PolicyType) -> Option<ActivePolicy> {
        let active_policies = self.active_policies.lock();
        active_policies.get(&policy_type).cloned()
    }
    
    /// Get all active policies
    pub fn get_all_active_policies(&self) -> BTreeMap<PolicyType, ActivePolicy> {
        let active_policies = self.active_policies.lock();
        active_policies.clone()
    }
    
    /// Get policy statistics
    pub fn get_stats(&self) -> PolicyStats {
        let stats = self.stats.lock();
        stats.clone()
    }
    
    /// Get evaluation history
    pub fn get_evaluation_history(&self) -> Vec<PolicyEvaluation> {
        let history = self.evaluation_history.lock();
        history.clone()
    }
    
    /// Clear evaluation history
    pub fn clear_history(&self) -> Result<(), UnifiedError> {
        let mut history = self.evaluation_history.lock();
        history.clear();
        Ok(())
    }
    
    /// Get current timestamp
    fn get_timestamp(&self) -> u64 {
        // In a real implementation, this would get the actual timestamp
        // For now, we'll use a simple counter
        static TIMESTAMP: AtomicU64 = AtomicU64::new(1);
        TIMESTAMP.fetch_add(1, Ordering::SeqCst)
    }
}

/// System state information
#[derive(Debug, Clone)]
pub struct SystemState {
    /// CPU utilization
    pub cpu_utilization: Option<String>,
    /// Memory utilization
    pub memory_utilization: Option<String>,
    /// Load imbalance
    pub load_imbalance: Option<String>,
    /// Memory locality
    pub memory_locality: Option<String>,
    /// Power consumption
    pub power_consumption: Option<String>,
    /// Temperature
    pub temperature: Option<String>,
    /// Node utilizations
    pub node_utilizations: BTreeMap<NodeId, f32>,
}

/// Initialize NUMA policy manager
pub fn init_policy_manager(topology: &NUMATopology) -> Result<NUMAPolicyManager, UnifiedError> {
    Ok(NUMAPolicyManager::new(topology.clone()))
}