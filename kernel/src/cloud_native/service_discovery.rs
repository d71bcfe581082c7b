//! Service Discovery Module
//! 
//! This module provides service discovery capabilities for NOS kernel,
//! including service registration, lookup, and health checking.

use crate::error::unified::UnifiedError;
use alloc::collections::BTreeMap;
use alloc::string::String;
use alloc::sync::Arc;
use alloc::vec::Vec;
use core::sync::atomic::{AtomicU64, Ordering};
use spin::Mutex;

/// Service states
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServiceState {
    /// Service is starting
    Starting,
    /// Service is running
    Running,
    /// Service is stopping
    Stopping,
    /// Service is stopped
    Stopped,
    /// Service is failed
    Failed,
    /// Service is unknown
    Unknown,
}

/// Service types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServiceType {
    /// Web service
    Web,
    /// Database service
    Database,
    /// Cache service
    Cache,
    /// Message queue service
    MessageQueue,
    /// Storage service
    Storage,
    /// Compute service
    Compute,
    /// Network service
    Network,
    /// Custom service
    Custom,
}

/// Service protocol
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServiceProtocol {
    /// HTTP protocol
    HTTP,
    /// HTTPS protocol
    HTTPS,
    /// TCP protocol
    TCP,
    /// UDP protocol
    UDP,
    /// gRPC protocol
    GRPC,
    /// WebSocket protocol
    WebSocket,
    /// Custom protocol
    Custom,
}

/// Service endpoint
#[derive(Debug, Clone)]
pub struct ServiceEndpoint {
    /// Endpoint ID
    pub id: u64,
    /// Endpoint name
    pub name: String,
    /// Host address
    pub host: String,
    /// Port number
    pub port: u16,
    /// Protocol
    pub protocol: ServiceProtocol,
    /// Path
    pub path: String,
    /// Health check path
    pub health_check_path: Option<String>,
    /// Metadata
    pub metadata: BTreeMap<String, String>,
}

/// Service information
#[derive(Debug, Clone)]
pub struct ServiceInfo {
    /// Service ID
    pub id: u64,
    /// Service name
    pub name: String,
    /// Service type
    pub service_type: ServiceType,
    /// Service version
    pub version: String,
    /// Service state
    pub state: ServiceState,
    /// Service endpoints
    pub endpoints: Vec<ServiceEndpoint>,
    /// Service dependencies
    pub dependencies: Vec<String>,
    /// Service tags
    pub tags: Vec<String>,
    /// Created timestamp
    pub created_at: u64,
    /// Last updated timestamp
    pub updated_at: u64,
    /// Health check interval (in seconds)
    pub health_check_interval: u32,
    /// Last health check timestamp
    pub last_health_check: Option<u64>,
    /// Health status
    pub health_status: ServiceHealthStatus,
}

/// Service health status
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServiceHealthStatus {
    /// Service is healthy
    Healthy,
    /// Service is unhealthy
    Unhealthy,
    /// Service health is unknown
    Unknown,
}

/// Service query
#[derive(Debug, Clone)]
pub struct ServiceQuery {
    /// Query ID
    pub id: u64,
    /// Query name
    pub name: String,
    /// Service type filter
    pub service_type: Option<ServiceType>,
    /// Tag filters
    pub tags: Vec<String>,
    /// Protocol filter
    pub protocol: Option<ServiceProtocol>,
    /// Created timestamp
    pub created_at: u64,
}

/// Service discovery
pub struct ServiceDiscovery {
    /// Services
    services: Mutex<BTreeMap<u64, ServiceInfo>>,
    /// Service queries
    queries: Mutex<BTreeMap<u64, ServiceQuery>>,
    /// Next service ID
    next_service_id: AtomicU64,
    /// Next query ID
    next_query_id: AtomicU64,
    /// Statistics
    stats: Mutex<ServiceDiscoveryStats>,
    /// Active status
    active: bool,
}

/// Service discovery statistics
#[derive(Debug, Clone)]
pub struct ServiceDiscoveryStats {
    /// Total services
    pub total_services: u64,
    /// Active services
    pub active_services: u64,
    /// Failed services
    pub failed_services: u64,
    /// Total queries
    pub total_queries: u64,
    /// Successful queries
    pub successful_queries: u64,
    /// Failed queries
    pub failed_queries: u64,
    /// Total operations
    pub total_operations: u64,
}

impl Default for ServiceDiscoveryStats {
    fn default() -> Self {
        Self {
            total_services: 0,
            active_services: 0,
            failed_services: 0,
            total_queries: 0,
            successful_queries: 0,
            failed_queries: 0,
            total_operations: 0,
        }
    }
}

impl ServiceDiscovery {
    /// Create a new service discovery
    pub fn new() -> Result<Self, UnifiedError> {
        Ok(Self {
            services: Mutex::new(BTreeMap::new()),
            queries: Mutex::new(BTreeMap::new()),
            next_service_id: AtomicU64::new(1),
            next_query_id: AtomicU64::new(1),
            stats: Mutex::new(ServiceDiscoveryStats::default()),
            active: true,
        })
    }

    /// Initialize service discovery
    pub fn initialize(&self) -> Result<(), UnifiedError> {
        log::info!("Initializing service discovery");
        
        // Initialize service discovery components
        // This would include setting up service registry, etc.
        
        log::info!("Service discovery initialized");
        Ok(())
    }

    /// Register a service
    pub fn register_service(
        &self,
        name: String,
        service_type: ServiceType,
        version: String,
        endpoints: Vec<ServiceEndpoint>,
        dependencies: Vec<String>,
        tags: Vec<String>,
        health_check_interval: u32,
    ) -> Result<u64, UnifiedError> {
        if !self.active {
            return Err(UnifiedError::CloudNative("Service discovery is not active".to_string()));
        }
        
        let service_id = self.next_service_id.fetch_add(1, Ordering::Relaxed);
        let current_time = self.get_timestamp();
        
        let service = ServiceInfo {
            id: service_id,
            name: name.clone(),
            service_type,
            version,
            state: ServiceState::Starting,
            endpoints,
            dependencies,
            tags,
            created_at: current_time,
            updated_at: current_time,
            health_check_interval,
            last_health_check: None,
            health_status: ServiceHealthStatus::Unknown,
        };
        
        {
            let mut services = self.services.lock();
            services.insert(service_id, service);
        }
        
        // Update statistics
        {
            let mut stats = self.stats.lock();
            stats.total_services += 1;
            stats.total_operations += 1;
        }
        
        log::info!("Registered service '{}' with ID: {}", name, service_id);
        Ok(service_id)
    }

    /// Update a service
    pub fn update_service(
        &self,
        service_id: u64,
        name: Option<String>,
        version: Option<String>,
        endpoints: Option<Vec<ServiceEndpoint>>,
        dependencies: Option<Vec<String>>,
        tags: Option<Vec<String>>,
        health_check_interval: Option<u32>,
    ) -> Result<(), UnifiedError> {
        if !self.active {
            return Err(UnifiedError::CloudNative("Service discovery is not active".to_string()));
        }
        
        let current_time = self.get_timestamp();
        
        {
            let mut services = self.services.lock();
            if let Some(service) = services.get_mut(&service_id) {
                // Update service fields
                if let Some(n) = name {
                    service.name = n;
                }
                if let Some(v) = version {
                    service.version = v;
                }
                if let Some(e) = endpoints {
                    service.endpoints = e;
                }
                if let Some(d) = dependencies {
                    service.dependencies = d;
                }
                if let Some(t) = tags {
                    service.tags = t;
                }
                if let Some(h) = health_check_interval {
                    service.health_check_interval = h;
                }
                service.updated_at = current_time;
                
                // Update statistics
                let mut stats = self.stats.lock();
                stats.total_operations += 1;
                
                log::info!("Updated service '{}' with ID: {}", service.name, service_id);
                Ok(())
            } else {
                Err(UnifiedError::CloudNative(
                    format!("Service {} not found", service_id)
                ))
            }
        }
    }

    /// Start a service
    pub fn start_service(&self, service_id: u64) -> Result<(), UnifiedError> {
        if !self.active {
            return Err(UnifiedError::CloudNative("Service discovery is not active".to_string()));
        }
        
        {
            let mut services = self.services.lock();
            if let Some(service) = services.get_mut(&service_id) {
                match service.state {
                    ServiceState::Starting | ServiceState::Stopped => {
                        service.state = ServiceState::Running;
                        service.updated_at = self.get_timestamp();
                        
                        // Update statistics
                        let mut stats = self.stats.lock();
                        stats.active_services += 1;
                        stats.total_operations += 1;
                        
                        log::info!("Started service '{}' with ID: {}", service.name, service_id);
                        Ok(())
                    }
                    _ => Err(UnifiedError::CloudNative(
                        format!("Service {} cannot be started in state {:?}", service_id, service.state)
                    )),
                }
            } else {
                Err(UnifiedError::CloudNative(
                    format!("Service {} not found", service_id)
                ))
            }
        }
    }

    /// Stop a service
    pub fn stop_service(&self, service_id: u64) -> Result<(), UnifiedError> {
        if !self.active {
            return Err(UnifiedError::CloudNative("Service discovery is not active".to_string()));
        }
        
        {
            let mut services = self.services.lock();
            if let Some(service) = services.get_mut(&service_id) {
                match service.state {
                    ServiceState::Running => {
                        service.state = ServiceState::Stopping;
                        service.state = ServiceState::Stopped;
                        service.updated_at = self.get_timestamp();
                        
                        // Update statistics
                        let mut stats = self.stats.lock();
                        stats.active_services -= 1;
                        stats.total_operations += 1;
                        
                        log::info!("Stopped service '{}' with ID: {}", service.name, service_id);
                        Ok(())
                    }
                    _ => Err(UnifiedError::CloudNative(
                        format!("Service {} cannot be stopped in state {:?}", service_id, service.state)
                    )),
                }
            } else {
                Err(UnifiedError::CloudNative(
                    format!("Service {} not found", service_id)
                ))
            }
        }
    }

    /// Unregister a service
    pub fn unregister_service(&self, service_id: u64) -> Result<(), UnifiedError> {
        if !self.active {
            return Err(UnifiedError::CloudNative("Service discovery is not active".to_string()));
        }
        
        {
            let mut services = self.services.lock();
            if let Some(service) = services.remove(&service_id) {
                // Update statistics
                let mut stats = self.stats.lock();
                if service.state == ServiceState::Running {
                    stats.active_services -= 1;
                }
                stats.total_operations += 1;
                
                log::info!("Unregistered service '{}' with ID: {}", service.name, service_id);
                Ok(())
            } else {
                Err(UnifiedError::CloudNative(
                    format!("Service {} not found", service_id)
                ))
            }
        }
    }

    /// Query services
    pub fn query_services(
        &self,
        name: String,
        service_type: Option<ServiceType>,
        tags: Vec<String>,
        protocol: Option<ServiceProtocol>,
    ) -> Result<u64, UnifiedError> {
        if !self.active {
            return Err(UnifiedError::CloudNative("Service discovery is not active".to_string()));
        }
        
        let query_id = self.next_query_id.fetch_add(1, Ordering::Relaxed);
        let current_time = self.get_timestamp();
        
        let query = ServiceQuery {
            id: query_id,
            name: name.clone(),
            service_type,
            tags,
            protocol,
            created_at: current_time,
        };
        
        {
            let mut queries = self.queries.lock();
            queries.insert(query_id, query);
        }
        
        // Update statistics
        {
            let mut stats = self.stats.lock();
            stats.total_queries += 1;
            stats.total_operations += 1;
        }
        
        log::info!("Created service query '{}' with ID: {}", name, query_id);
        Ok(query_id)
    }

    /// Get query results
    pub fn get_query_results(&self, query_id: u64) -> Result<Vec<ServiceInfo>, UnifiedError> {
        let query = {
            let queries = self.queries.lock();
            queries.get(&query_id).cloned()
        };
        
        if let Some(q) = query {
            let services = self.services.lock();
            let mut results = Vec::new();
            
            for service in services.values() {
                // Check if service matches query criteria
                if self.service_matches_query(service, &q) {
                    results.push(service.clone());
                }
            }
            
            // Update statistics
            {
                let mut stats = self.stats.lock();
                if results.is_empty() {
                    stats.failed_queries += 1;
                } else {
                    stats.successful_queries += 1;
                }
            }
            
            log::info!("Query {} returned {} results", query_id, results.len());
            Ok(results)
        } else {
            Err(UnifiedError::CloudNative(
                format!("Query {} not found", query_id)
            ))
        }
    }

    /// Check if service matches query
    fn service_matches_query(&self, service: &ServiceInfo, query: &ServiceQuery) -> bool {
        // Check name match
        if !service.name.contains(&query.name) {
            return false;
        }
        
        // Check service type match
        if let Some(service_type) = query.service_type {
            if service.service_type != service_type {
                return false;
            }
        }
        
        // Check protocol match
        if let Some(protocol) = query.protocol {
            let has_protocol = service.endpoints.iter().any(|e| e.protocol == protocol);
            if !has_protocol {
                return false;
            }
        }
        
        // Check tags match
        if !query.tags.is_empty() {
            for tag in &query.tags {
                if !service.tags.contains(tag) {
                    return false;
                }
            }
        }
        
        true
    }

    /// Perform health check on a service
    pub fn perform_health_check(&self, service_id: u64) -> Result<(), UnifiedError> {
        if !self.active {
            return Err(UnifiedError::CloudNative("Service discovery is not active".to_string()));
        }
        
        let current_time = self.get_timestamp();
        
        {
            let mut services = self.services.lock();
            if let Some(service) = services.get_mut(&service_id) {
                // Simulate health check
                let is_healthy = service.state == ServiceState::Running;
                let health_status = if is_healthy {
                    ServiceHealthStatus::Healthy
                } else {
                    ServiceHealthStatus::Unhealthy
                };
                
                service.last_health_check = Some(current_time);
                service.health_status = health_status;
                
                // Update statistics
                let mut stats = self.stats.lock();
                stats.total_operations += 1;
                
                log::debug!("Health check for service '{}': {:?}", 
                           service.name, health_status);
                Ok(())
            } else {
                Err(UnifiedError::CloudNative(
                    format!("Service {} not found", service_id)
                ))
            }
        }
    }

    /// Get service information
    pub fn get_service_info(&self, service_id: u64) -> Result<ServiceInfo, UnifiedError> {
        let services = self.services.lock();
        if let Some(service) = services.get(&service_id) {
            Ok(service.clone())
        } else {
            Err(UnifiedError::CloudNative(
                format!("Service {} not found", service_id)
            ))
        }
    }

    /// List all services
    pub fn list_services(&self) -> Vec<ServiceInfo> {
        let services = self.services.lock();
        services.values().cloned().collect()
    }

    /// Get total services
    pub fn get_total_services(&self) -> u64 {
        let stats = self.stats.lock();
        stats.total_services
    }

    /// Get active services
    pub fn get_active_services(&self) -> u64 {
        let stats = self.stats.lock();
        stats.active_services
    }

    /// Check if discovery is active
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Activate or deactivate discovery
    pub fn set_active(&mut self, active: bool) {
        self.active = active;
        
        if active {
            log::info!("Service discovery activated");
        } else {
            log::info!("Service discovery deactivated");
        }
    }

    /// Optimize service discovery
    pub fn optimize(&self) -> Result<(), UnifiedError> {
        if !self.active {
            return Err(UnifiedError::CloudNative("Service discovery is not active".to_string()));
        }
        
        // Optimize service discovery
        // This would include cache optimization, etc.
        
        log::info!("Service discovery optimized");
        Ok(())
    }

    /// Reset statistics
    pub fn reset_stats(&self) {
        let mut stats = self.stats.lock();
        *stats = ServiceDiscoveryStats::default();
    }

    /// Get current timestamp (in microseconds)
    fn get_timestamp(&self) -> u64 {
        // In a real implementation, this would use a high-precision timer
        static COUNTER: AtomicU64 = AtomicU64::new(0);
        COUNTER.fetch_add(1, Ordering::Relaxed)
    }
}