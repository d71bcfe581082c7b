//! Orchestration Engine Module
//! 
//! This module provides orchestration capabilities for NOS kernel,
//! including service orchestration, deployment management, and workflow automation.

use crate::error::unified::UnifiedError;
use alloc::collections::BTreeMap;
use alloc::string::String;
use alloc::sync::Arc;
use alloc::vec::Vec;
use core::sync::atomic::{AtomicU64, Ordering};
use spin::Mutex;

/// Orchestration operation types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrchestrationOperation {
    /// Deploy service
    Deploy,
    /// Update service
    Update,
    /// Scale service
    Scale,
    /// Rollback service
    Rollback,
    /// Delete service
    Delete,
    /// Pause service
    Pause,
    /// Resume service
    Resume,
}

/// Orchestration strategies
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrchestrationStrategy {
    /// Rolling update
    Rolling,
    /// Recreate all at once
    Recreate,
    /// Blue-green deployment
    BlueGreen,
    /// Canary deployment
    Canary,
    /// Custom strategy
    Custom,
}

/// Deployment states
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeploymentState {
    /// Deployment is pending
    Pending,
    /// Deployment is in progress
    InProgress,
    /// Deployment completed successfully
    Completed,
    /// Deployment failed
    Failed,
    /// Deployment is being rolled back
    RollingBack,
    /// Deployment was rolled back
    RolledBack,
    /// Deployment is paused
    Paused,
}

/// Service deployment configuration
#[derive(Debug, Clone)]
pub struct ServiceDeployment {
    /// Deployment ID
    pub id: u64,
    /// Service name
    pub service_name: String,
    /// Service version
    pub version: String,
    /// Container images
    pub containers: Vec<String>,
    /// Replicas
    pub replicas: u32,
    /// Orchestration strategy
    pub strategy: OrchestrationStrategy,
    /// Deployment state
    pub state: DeploymentState,
    /// Created timestamp
    pub created_at: u64,
    /// Started timestamp
    pub started_at: Option<u64>,
    /// Completed timestamp
    pub completed_at: Option<u64>,
    /// Error message
    pub error: Option<String>,
    /// Progress percentage
    pub progress: u8,
}

/// Workflow step
#[derive(Debug, Clone)]
pub struct WorkflowStep {
    /// Step ID
    pub id: u64,
    /// Step name
    pub name: String,
    /// Step type
    pub step_type: String,
    /// Step command
    pub command: String,
    /// Step arguments
    pub args: Vec<String>,
    /// Step dependencies
    pub dependencies: Vec<u64>,
    /// Step state
    pub state: WorkflowStepState,
    /// Created timestamp
    pub created_at: u64,
    /// Started timestamp
    pub started_at: Option<u64>,
    /// Completed timestamp
    pub completed_at: Option<u64>,
    /// Error message
    pub error: Option<String>,
}

/// Workflow step states
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkflowStepState {
    /// Step is pending
    Pending,
    /// Step is running
    Running,
    /// Step completed successfully
    Completed,
    /// Step failed
    Failed,
    /// Step is skipped
    Skipped,
}

/// Workflow definition
#[derive(Debug, Clone)]
pub struct Workflow {
    /// Workflow ID
    pub id: u64,
    /// Workflow name
    pub name: String,
    /// Workflow description
    pub description: String,
    /// Workflow steps
    pub steps: Vec<WorkflowStep>,
    /// Workflow state
    pub state: WorkflowState,
    /// Created timestamp
    pub created_at: u64,
    /// Started timestamp
    pub started_at: Option<u64>,
    /// Completed timestamp
    pub completed_at: Option<u64>,
}

/// Workflow states
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkflowState {
    /// Workflow is pending
    Pending,
    /// Workflow is running
    Running,
    /// Workflow completed successfully
    Completed,
    /// Workflow failed
    Failed,
    /// Workflow is paused
    Paused,
    /// Workflow is cancelled
    Cancelled,
}

/// Orchestration engine
pub struct OrchestrationEngine {
    /// Service deployments
    deployments: Mutex<BTreeMap<u64, ServiceDeployment>>,
    /// Workflows
    workflows: Mutex<BTreeMap<u64, Workflow>>,
    /// Next deployment ID
    next_deployment_id: AtomicU64,
    /// Next workflow ID
    next_workflow_id: AtomicU64,
    /// Next step ID
    next_step_id: AtomicU64,
    /// Statistics
    stats: Mutex<OrchestrationStats>,
    /// Active status
    active: bool,
}

/// Orchestration engine statistics
#[derive(Debug, Clone)]
pub struct OrchestrationStats {
    /// Total deployments
    pub total_deployments: u64,
    /// Successful deployments
    pub successful_deployments: u64,
    /// Failed deployments
    pub failed_deployments: u64,
    /// Total workflows
    pub total_workflows: u64,
    /// Completed workflows
    pub completed_workflows: u64,
    /// Failed workflows
    pub failed_workflows: u64,
    /// Total operations
    pub total_operations: u64,
}

impl Default for OrchestrationStats {
    fn default() -> Self {
        Self {
            total_deployments: 0,
            successful_deployments: 0,
            failed_deployments: 0,
            total_workflows: 0,
            completed_workflows: 0,
            failed_workflows: 0,
            total_operations: 0,
        }
    }
}

impl OrchestrationEngine {
    /// Create a new orchestration engine
    pub fn new() -> Result<Self, UnifiedError> {
        Ok(Self {
            deployments: Mutex::new(BTreeMap::new()),
            workflows: Mutex::new(BTreeMap::new()),
            next_deployment_id: AtomicU64::new(1),
            next_workflow_id: AtomicU64::new(1),
            next_step_id: AtomicU64::new(1),
            stats: Mutex::new(OrchestrationStats::default()),
            active: true,
        })
    }

    /// Initialize orchestration engine
    pub fn initialize(&self) -> Result<(), UnifiedError> {
        log::info!("Initializing orchestration engine");
        
        // Initialize orchestration components
        // This would include setting up deployment controllers, etc.
        
        log::info!("Orchestration engine initialized");
        Ok(())
    }

    /// Deploy a service
    pub fn deploy_service(
        &self,
        service_name: String,
        version: String,
        containers: Vec<String>,
        replicas: u32,
        strategy: OrchestrationStrategy,
    ) -> Result<u64, UnifiedError> {
        if !self.active {
            return Err(UnifiedError::CloudNative("Orchestration engine is not active".to_string()));
        }
        
        let deployment_id = self.next_deployment_id.fetch_add(1, Ordering::Relaxed);
        let current_time = self.get_timestamp();
        
        let deployment = ServiceDeployment {
            id: deployment_id,
            service_name: service_name.clone(),
            version,
            containers,
            replicas,
            strategy,
            state: DeploymentState::Pending,
            created_at: current_time,
            started_at: None,
            completed_at: None,
            error: None,
            progress: 0,
        };
        
        {
            let mut deployments = self.deployments.lock();
            deployments.insert(deployment_id, deployment);
        }
        
        // Update statistics
        {
            let mut stats = self.stats.lock();
            stats.total_deployments += 1;
            stats.total_operations += 1;
        }
        
        log::info!("Created deployment for service '{}' with ID: {}", service_name, deployment_id);
        Ok(deployment_id)
    }

    /// Start a deployment
    pub fn start_deployment(&self, deployment_id: u64) -> Result<(), UnifiedError> {
        if !self.active {
            return Err(UnifiedError::CloudNative("Orchestration engine is not active".to_string()));
        }
        
        let current_time = self.get_timestamp();
        
        {
            let mut deployments = self.deployments.lock();
            if let Some(deployment) = deployments.get_mut(&deployment_id) {
                match deployment.state {
                    DeploymentState::Pending => {
                        deployment.state = DeploymentState::InProgress;
                        deployment.started_at = Some(current_time);
                        
                        // Simulate deployment progress
                        deployment.progress = 50;
                        
                        // Update statistics
                        let mut stats = self.stats.lock();
                        stats.total_operations += 1;
                        
                        log::info!("Started deployment {} for service '{}'", deployment_id, deployment.service_name);
                        Ok(())
                    }
                    _ => Err(UnifiedError::CloudNative(
                        format!("Deployment {} cannot be started in state {:?}", deployment_id, deployment.state)
                    )),
                }
            } else {
                Err(UnifiedError::CloudNative(
                    format!("Deployment {} not found", deployment_id)
                ))
            }
        }
    }

    /// Complete a deployment
    pub fn complete_deployment(&self, deployment_id: u64) -> Result<(), UnifiedError> {
        if !self.active {
            return Err(UnifiedError::CloudNative("Orchestration engine is not active".to_string()));
        }
        
        let current_time = self.get_timestamp();
        
        {
            let mut deployments = self.deployments.lock();
            if let Some(deployment) = deployments.get_mut(&deployment_id) {
                match deployment.state {
                    DeploymentState::InProgress => {
                        deployment.state = DeploymentState::Completed;
                        deployment.completed_at = Some(current_time);
                        deployment.progress = 100;
                        
                        // Update statistics
                        let mut stats = self.stats.lock();
                        stats.successful_deployments += 1;
                        stats.total_operations += 1;
                        
                        log::info!("Completed deployment {} for service '{}'", deployment_id, deployment.service_name);
                        Ok(())
                    }
                    _ => Err(UnifiedError::CloudNative(
                        format!("Deployment {} cannot be completed in state {:?}", deployment_id, deployment.state)
                    )),
                }
            } else {
                Err(UnifiedError::CloudNative(
                    format!("Deployment {} not found", deployment_id)
                ))
            }
        }
    }

    /// Fail a deployment
    pub fn fail_deployment(&self, deployment_id: u64, error: String) -> Result<(), UnifiedError> {
        if !self.active {
            return Err(UnifiedError::CloudNative("Orchestration engine is not active".to_string()));
        }
        
        let current_time = self.get_timestamp();
        
        {
            let mut deployments = self.deployments.lock();
            if let Some(deployment) = deployments.get_mut(&deployment_id) {
                match deployment.state {
                    DeploymentState::InProgress | DeploymentState::Pending => {
                        deployment.state = DeploymentState::Failed;
                        deployment.completed_at = Some(current_time);
                        deployment.error = Some(error.clone());
                        
                        // Update statistics
                        let mut stats = self.stats.lock();
                        stats.failed_deployments += 1;
                        stats.total_operations += 1;
                        
                        log::error!("Failed deployment {} for service '{}': {}", deployment_id, deployment.service_name, error);
                        Ok(())
                    }
                    _ => Err(UnifiedError::CloudNative(
                        format!("Deployment {} cannot be failed in state {:?}", deployment_id, deployment.state)
                    )),
                }
            } else {
                Err(UnifiedError::CloudNative(
                    format!("Deployment {} not found", deployment_id)
                ))
            }
        }
    }

    /// Create a workflow
    pub fn create_workflow(
        &self,
        name: String,
        description: String,
        steps: Vec<(String, String, Vec<String>, Vec<u64>)>, // (name, command, args, dependencies)
    ) -> Result<u64, UnifiedError> {
        if !self.active {
            return Err(UnifiedError::CloudNative("Orchestration engine is not active".to_string()));
        }
        
        let workflow_id = self.next_workflow_id.fetch_add(1, Ordering::Relaxed);
        let current_time = self.get_timestamp();
        
        let mut workflow_steps = Vec::new();
        for (step_name, command, args, dependencies) in steps {
            let step_id = self.next_step_id.fetch_add(1, Ordering::Relaxed);
            let step = WorkflowStep {
                id: step_id,
                name: step_name,
                step_type: "command".to_string(),
                command,
                args,
                dependencies,
                state: WorkflowStepState::Pending,
                created_at: current_time,
                started_at: None,
                completed_at: None,
                error: None,
            };
            workflow_steps.push(step);
        }
        
        let workflow = Workflow {
            id: workflow_id,
            name: name.clone(),
            description,
            steps: workflow_steps,
            state: WorkflowState::Pending,
            created_at: current_time,
            started_at: None,
            completed_at: None,
        };
        
        {
            let mut workflows = self.workflows.lock();
            workflows.insert(workflow_id, workflow);
        }
        
        // Update statistics
        {
            let mut stats = self.stats.lock();
            stats.total_workflows += 1;
            stats.total_operations += 1;
        }
        
        log::info!("Created workflow '{}' with ID: {}", name, workflow_id);
        Ok(workflow_id)
    }

    /// Start a workflow
    pub fn start_workflow(&self, workflow_id: u64) -> Result<(), UnifiedError> {
        if !self.active {
            return Err(UnifiedError::CloudNative("Orchestration engine is not active".to_string()));
        }
        
        let current_time = self.get_timestamp();
        
        {
            let mut workflows = self.workflows.lock();
            if let Some(workflow) = workflows.get_mut(&workflow_id) {
                match workflow.state {
                    WorkflowState::Pending => {
                        workflow.state = WorkflowState::Running;
                        workflow.started_at = Some(current_time);
                        
                        // Start ready steps (those with no dependencies)
                        for step in &mut workflow.steps {
                            if step.dependencies.is_empty() && step.state == WorkflowStepState::Pending {
                                step.state = WorkflowStepState::Running;
                                step.started_at = Some(current_time);
                            }
                        }
                        
                        // Update statistics
                        let mut stats = self.stats.lock();
                        stats.total_operations += 1;
                        
                        log::info!("Started workflow '{}' with ID: {}", workflow.name, workflow_id);
                        Ok(())
                    }
                    _ => Err(UnifiedError::CloudNative(
                        format!("Workflow {} cannot be started in state {:?}", workflow_id, workflow.state)
                    )),
                }
            } else {
                Err(UnifiedError::CloudNative(
                    format!("Workflow {} not found", workflow_id)
                ))
            }
        }
    }

    /// Complete a workflow step
    pub fn complete_workflow_step(&self, workflow_id: u64, step_id: u64) -> Result<(), UnifiedError> {
        if !self.active {
            return Err(UnifiedError::CloudNative("Orchestration engine is not active".to_string()));
        }
        
        let current_time = self.get_timestamp();
        
        {
            let mut workflows = self.workflows.lock();
            if let Some(workflow) = workflows.get_mut(&workflow_id) {
                // Find and complete the step
                let mut step_found = false;
                for step in &mut workflow.steps {
                    if step.id == step_id && step.state == WorkflowStepState::Running {
                        step.state = WorkflowStepState::Completed;
                        step.completed_at = Some(current_time);
                        step_found = true;
                        break;
                    }
                }
                
                if step_found {
                    // Check if all steps are completed
                    let all_completed = workflow.steps.iter().all(|s| 
                        s.state == WorkflowStepState::Completed || s.state == WorkflowStepState::Skipped
                    );
                    
                    if all_completed {
                        workflow.state = WorkflowState::Completed;
                        workflow.completed_at = Some(current_time);
                        
                        // Update statistics
                        let mut stats = self.stats.lock();
                        stats.completed_workflows += 1;
                        stats.total_operations += 1;
                        
                        log::info!("Completed workflow '{}' with ID: {}", workflow.name, workflow_id);
                    }
                    
                    // Start dependent steps
                    for step in &mut workflow.steps {
                        if step.state == WorkflowStepState::Pending && 
                           step.dependencies.contains(&step_id) {
                            // Check if all dependencies are completed
                            let deps_completed = step.dependencies.iter().all(|dep_id| {
                                workflow.steps.iter().any(|s| s.id == *dep_id && 
                                    (s.state == WorkflowStepState::Completed || s.state == WorkflowStepState::Skipped))
                            });
                            
                            if deps_completed {
                                step.state = WorkflowStepState::Running;
                                step.started_at = Some(current_time);
                            }
                        }
                    }
                    
                    Ok(())
                } else {
                    Err(UnifiedError::CloudNative(
                        format!("Step {} not found or not running in workflow {}", step_id, workflow_id)
                    ))
                }
            } else {
                Err(UnifiedError::CloudNative(
                    format!("Workflow {} not found", workflow_id)
                ))
            }
        }
    }

    /// Get deployment information
    pub fn get_deployment_info(&self, deployment_id: u64) -> Result<ServiceDeployment, UnifiedError> {
        let deployments = self.deployments.lock();
        if let Some(deployment) = deployments.get(&deployment_id) {
            Ok(deployment.clone())
        } else {
            Err(UnifiedError::CloudNative(
                format!("Deployment {} not found", deployment_id)
            ))
        }
    }

    /// Get workflow information
    pub fn get_workflow_info(&self, workflow_id: u64) -> Result<Workflow, UnifiedError> {
        let workflows = self.workflows.lock();
        if let Some(workflow) = workflows.get(&workflow_id) {
            Ok(workflow.clone())
        } else {
            Err(UnifiedError::CloudNative(
                format!("Workflow {} not found", workflow_id)
            ))
        }
    }

    /// List all deployments
    pub fn list_deployments(&self) -> Vec<ServiceDeployment> {
        let deployments = self.deployments.lock();
        deployments.values().cloned().collect()
    }

    /// List all workflows
    pub fn list_workflows(&self) -> Vec<Workflow> {
        let workflows = self.workflows.lock();
        workflows.values().cloned().collect()
    }

    /// Get operation count
    pub fn get_operation_count(&self) -> u64 {
        let stats = self.stats.lock();
        stats.total_operations
    }

    /// Check if engine is active
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Activate or deactivate engine
    pub fn set_active(&mut self, active: bool) {
        self.active = active;
        
        if active {
            log::info!("Orchestration engine activated");
        } else {
            log::info!("Orchestration engine deactivated");
        }
    }

    /// Optimize orchestration engine
    pub fn optimize(&self) -> Result<(), UnifiedError> {
        if !self.active {
            return Err(UnifiedError::CloudNative("Orchestration engine is not active".to_string()));
        }
        
        // Optimize orchestration operations
        // This would include resource optimization, etc.
        
        log::info!("Orchestration engine optimized");
        Ok(())
    }

    /// Reset statistics
    pub fn reset_stats(&self) {
        let mut stats = self.stats.lock();
        *stats = OrchestrationStats::default();
    }

    /// Get current timestamp (in microseconds)
    fn get_timestamp(&self) -> u64 {
        // In a real implementation, this would use a high-precision timer
        static COUNTER: AtomicU64 = AtomicU64::new(0);
        COUNTER.fetch_add(1, Ordering::Relaxed)
    }
}