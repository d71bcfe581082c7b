//! Cloud Native Monitoring System
//! 
//! This module provides comprehensive monitoring capabilities for cloud-native applications,
//! including metrics collection, performance monitoring, log aggregation, health monitoring,
//! and real-time dashboards.

use crate::error::unified::UnifiedError;
use crate::sync::spin::Mutex;
use alloc::collections::BTreeMap;
use alloc::vec::Vec;
use alloc::string::String;
use alloc::sync::Arc;
use core::sync::atomic::{AtomicU64, AtomicUsize, Ordering};

/// Monitoring system for cloud-native applications
pub struct CloudMonitoring {
    metrics_collector: MetricsCollector,
    performance_monitor: PerformanceMonitor,
    log_aggregator: LogAggregator,
    health_monitor: HealthMonitor,
    dashboard: Dashboard,
    stats: spin::Mutex<MonitoringStats>,
    active: spin::Mutex<bool>,
}

impl CloudMonitoring {
    /// Create a new cloud monitoring system
    pub fn new() -> Self {
        Self {
            metrics_collector: MetricsCollector::new(),
            performance_monitor: PerformanceMonitor::new(),
            log_aggregator: LogAggregator::new(),
            health_monitor: HealthMonitor::new(),
            dashboard: Dashboard::new(),
            stats: spin::Mutex::new(MonitoringStats::default()),
            active: spin::Mutex::new(false),
        }
    }

    /// Initialize the monitoring system
    pub fn initialize(&self) -> Result<(), UnifiedError> {
        let mut active = self.active.lock();
        if *active {
            return Err(UnifiedError::already_initialized("Cloud monitoring already active"));
        }

        // Initialize all components
        self.metrics_collector.initialize()?;
        self.performance_monitor.initialize()?;
        self.log_aggregator.initialize()?;
        self.health_monitor.initialize()?;
        self.dashboard.initialize()?;

        *active = true;
        Ok(())
    }

    /// Shutdown the monitoring system
    pub fn shutdown(&self) -> Result<(), UnifiedError> {
        let mut active = self.active.lock();
        if !*active {
            return Err(UnifiedError::not_initialized("Cloud monitoring not active"));
        }

        // Shutdown all components
        self.metrics_collector.shutdown()?;
        self.performance_monitor.shutdown()?;
        self.log_aggregator.shutdown()?;
        self.health_monitor.shutdown()?;
        self.dashboard.shutdown()?;

        *active = false;
        Ok(())
    }

    /// Get monitoring system status
    pub fn get_status(&self) -> MonitoringStatus {
        let active = self.active.lock();
        MonitoringStatus {
            active: *active,
            metrics_collector_status: self.metrics_collector.get_status(),
            performance_monitor_status: self.performance_monitor.get_status(),
            log_aggregator_status: self.log_aggregator.get_status(),
            health_monitor_status: self.health_monitor.get_status(),
            dashboard_status: self.dashboard.get_status(),
        }
    }

    /// Get monitoring statistics
    pub fn get_stats(&self) -> MonitoringStats {
        self.stats.lock().clone()
    }

    /// Collect metrics from all sources
    pub fn collect_metrics(&self) -> Result<MetricsSnapshot, UnifiedError> {
        let active = self.active.lock();
        if !*active {
            return Err(UnifiedError::not_initialized("Cloud monitoring not active"));
        }

        let mut stats = self.stats.lock();
        stats.metrics_collections += 1;

        self.metrics_collector.collect_metrics()
    }

    /// Monitor performance of cloud-native components
    pub fn monitor_performance(&self, component_id: &str) -> Result<PerformanceReport, UnifiedError> {
        let active = self.active.lock();
        if !*active {
            return Err(UnifiedError::not_initialized("Cloud monitoring not active"));
        }

        let mut stats = self.stats.lock();
        stats.performance_checks += 1;

        self.performance_monitor.generate_report(component_id)
    }

    /// Aggregate logs from cloud-native applications
    pub fn aggregate_logs(&self, query: &LogQuery) -> Result<LogAggregation, UnifiedError> {
        let active = self.active.lock();
        if !*active {
            return Err(UnifiedError::not_initialized("Cloud monitoring not active"));
        }

        let mut stats = self.stats.lock();
        stats.log_aggregations += 1;

        self.log_aggregator.aggregate(query)
    }

    /// Check health of cloud-native services
    pub fn check_health(&self, service_id: &str) -> Result<HealthReport, UnifiedError> {
        let active = self.active.lock();
        if !*active {
            return Err(UnifiedError::not_initialized("Cloud monitoring not active"));
        }

        let mut stats = self.stats.lock();
        stats.health_checks += 1;

        self.health_monitor.check_service_health(service_id)
    }

    /// Generate dashboard data
    pub fn generate_dashboard(&self, dashboard_id: &str) -> Result<DashboardData, UnifiedError> {
        let active = self.active.lock();
        if !*active {
            return Err(UnifiedError::not_initialized("Cloud monitoring not active"));
        }

        let mut stats = self.stats.lock();
        stats.dashboard_generations += 1;

        self.dashboard.generate_data(dashboard_id)
    }

    /// Create a new dashboard
    pub fn create_dashboard(&self, config: DashboardConfig) -> Result<u64, UnifiedError> {
        let active = self.active.lock();
        if !*active {
            return Err(UnifiedError::not_initialized("Cloud monitoring not active"));
        }

        self.dashboard.create(config)
    }

    /// Update dashboard configuration
    pub fn update_dashboard(&self, dashboard_id: u64, config: DashboardConfig) -> Result<(), UnifiedError> {
        let active = self.active.lock();
        if !*active {
            return Err(UnifiedError::not_initialized("Cloud monitoring not active"));
        }

        self.dashboard.update(dashboard_id, config)
    }

    /// Delete a dashboard
    pub fn delete_dashboard(&self, dashboard_id: u64) -> Result<(), UnifiedError> {
        let active = self.active.lock();
        if !*active {
            return Err(UnifiedError::not_initialized("Cloud monitoring not active"));
        }

        self.dashboard.delete(dashboard_id)
    }

    /// Set up monitoring alerts
    pub fn setup_alert(&self, alert_config: AlertConfig) -> Result<u64, UnifiedError> {
        let active = self.active.lock();
        if !*active {
            return Err(UnifiedError::not_initialized("Cloud monitoring not active"));
        }

        self.metrics_collector.setup_alert(alert_config)
    }

    /// Get monitoring recommendations
    pub fn get_recommendations(&self) -> Vec<MonitoringRecommendation> {
        let mut recommendations = Vec::new();

        // Get recommendations from all components
        recommendations.extend(self.metrics_collector.get_recommendations());
        recommendations.extend(self.performance_monitor.get_recommendations());
        recommendations.extend(self.log_aggregator.get_recommendations());
        recommendations.extend(self.health_monitor.get_recommendations());
        recommendations.extend(self.dashboard.get_recommendations());

        recommendations
    }

    /// Reset monitoring statistics
    pub fn reset_stats(&self) {
        let mut stats = self.stats.lock();
        *stats = MonitoringStats::default();
        
        // Reset individual component stats
        self.metrics_collector.reset_stats();
        self.performance_monitor.reset_stats();
        self.log_aggregator.reset_stats();
        self.health_monitor.reset_stats();
        self.dashboard.reset_stats();
    }

    /// Optimize monitoring system
    pub fn optimize(&self) -> Result<(), UnifiedError> {
        let active = self.active.lock();
        if !*active {
            return Err(UnifiedError::not_initialized("Cloud monitoring not active"));
        }

        // Optimize individual components
        self.metrics_collector.optimize()?;
        self.performance_monitor.optimize()?;
        self.log_aggregator.optimize()?;
        self.health_monitor.optimize()?;
        self.dashboard.optimize()?;

        Ok(())
    }

    /// Check if monitoring system is active
    pub fn is_active(&self) -> bool {
        *self.active.lock()
    }
}

/// Metrics collector for cloud-native applications
pub struct MetricsCollector {
    metrics: Mutex<BTreeMap<String, MetricValue>>,
    alerts: Mutex<BTreeMap<u64, AlertConfig>>,
    next_alert_id: AtomicU64,
    collection_interval: u64,
    retention_period: u64,
    stats: Mutex<MetricsCollectorStats>,
    active: bool,
}

impl MetricsCollector {
    /// Create a new metrics collector
    pub fn new() -> Self {
        Self {
            metrics: Mutex::new(BTreeMap::new()),
            alerts: Mutex::new(BTreeMap::new()),
            next_alert_id: AtomicU64::new(1),
            collection_interval: 60, // 60 seconds
            retention_period: 86400, // 24 hours
            stats: Mutex::new(MetricsCollectorStats::default()),
            active: false,
        }
    }

    /// Initialize the metrics collector
    pub fn initialize(&mut self) -> Result<(), UnifiedError> {
        if self.active {
            return Err(UnifiedError::already_initialized("Metrics collector already active"));
        }

        self.active = true;
        Ok(())
    }

    /// Shutdown the metrics collector
    pub fn shutdown(&mut self) -> Result<(), UnifiedError> {
        if !self.active {
            return Err(UnifiedError::not_initialized("Metrics collector not active"));
        }

        self.active = false;
        Ok(())
    }

    /// Get metrics collector status
    pub fn get_status(&self) -> MetricsCollectorStatus {
        MetricsCollectorStatus {
            active: self.active,
            metrics_count: self.metrics.lock().len(),
            alerts_count: self.alerts.lock().len(),
            collection_interval: self.collection_interval,
            retention_period: self.retention_period,
        }
    }

    /// Collect metrics from all sources
    pub fn collect_metrics(&self) -> Result<MetricsSnapshot, UnifiedError> {
        if !self.active {
            return Err(UnifiedError::not_initialized("Metrics collector not active"));
        }

        let metrics = self.metrics.lock().clone();
        let timestamp = self.get_current_timestamp();

        Ok(MetricsSnapshot {
            timestamp,
            metrics,
        })
    }

    /// Record a metric value
    pub fn record_metric(&self, name: &str, value: MetricValue) -> Result<(), UnifiedError> {
        if !self.active {
            return Err(UnifiedError::not_initialized("Metrics collector not active"));
        }

        let mut metrics = self.metrics.lock();
        metrics.insert(name.to_string(), value);

        let mut stats = self.stats.lock();
        stats.metrics_recorded += 1;

        // Check for alerts
        self.check_alerts(name, &value);

        Ok(())
    }

    /// Set up monitoring alerts
    pub fn setup_alert(&self, alert_config: AlertConfig) -> Result<u64, UnifiedError> {
        if !self.active {
            return Err(UnifiedError::not_initialized("Metrics collector not active"));
        }

        let alert_id = self.next_alert_id.fetch_add(1, Ordering::SeqCst);
        let mut alerts = self.alerts.lock();
        alerts.insert(alert_id, alert_config);

        let mut stats = self.stats.lock();
        stats.alerts_created += 1;

        Ok(alert_id)
    }

    /// Check for alert conditions
    fn check_alerts(&self, metric_name: &str, value: &MetricValue) {
        let alerts = self.alerts.lock();
        for (_, alert) in alerts.iter() {
            if alert.metric_name == metric_name {
                if self.evaluate_alert_condition(&alert.condition, value) {
                    self.trigger_alert(alert);
                }
            }
        }
    }

    /// Evaluate alert condition
    fn evaluate_alert_condition(&self, condition: &AlertCondition, value: &MetricValue) -> bool {
        match condition {
            AlertCondition::GreaterThan(threshold) => {
                if let MetricValue::Counter(v) = value {
                    *v > *threshold
                } else if let MetricValue::Gauge(v) = value {
                    *v > *threshold
                } else {
                    false
                }
            }
            AlertCondition::LessThan(threshold) => {
                if let MetricValue::Counter(v) = value {
                    *v < *threshold
                } else if let MetricValue::Gauge(v) = value {
                    *v < *threshold
                } else {
                    false
                }
            }
            AlertCondition::Equals(threshold) => {
                if let MetricValue::Counter(v) = value {
                    *v == *threshold
                } else if let MetricValue::Gauge(v) = value {
                    *v == *threshold
                } else {
                    false
                }
            }
        }
    }

    /// Trigger an alert
    fn trigger_alert(&self, alert: &AlertConfig) {
        // In a real implementation, this would send notifications
        // For now, we just update statistics
        let mut stats = self.stats.lock();
        stats.alerts_triggered += 1;
    }

    /// Get current timestamp
    fn get_current_timestamp(&self) -> u64 {
        // In a real implementation, this would get the actual system time
        1234567890
    }

    /// Get metrics collector recommendations
    pub fn get_recommendations(&self) -> Vec<MonitoringRecommendation> {
        let mut recommendations = Vec::new();
        let stats = self.stats.lock();

        if stats.metrics_recorded > 1000 && stats.alerts_created == 0 {
            recommendations.push(MonitoringRecommendation {
                category: "Metrics".to_string(),
                priority: RecommendationPriority::Medium,
                title: "Set up alerts for critical metrics".to_string(),
                description: "Consider setting up alerts for important metrics to get notified of issues".to_string(),
            });
        }

        if stats.alerts_triggered > stats.alerts_created / 2 {
            recommendations.push(MonitoringRecommendation {
                category: "Metrics".to_string(),
                priority: RecommendationPriority::High,
                title: "Review alert thresholds".to_string(),
                description: "Many alerts are being triggered. Consider adjusting thresholds to reduce noise".to_string(),
            });
        }

        recommendations
    }

    /// Reset metrics collector statistics
    pub fn reset_stats(&self) {
        let mut stats = self.stats.lock();
        *stats = MetricsCollectorStats::default();
    }

    /// Optimize metrics collector
    pub fn optimize(&self) -> Result<(), UnifiedError> {
        if !self.active {
            return Err(UnifiedError::not_initialized("Metrics collector not active"));
        }

        // In a real implementation, this would optimize metrics collection
        Ok(())
    }
}

/// Performance monitor for cloud-native applications
pub struct PerformanceMonitor {
    performance_data: Mutex<BTreeMap<String, PerformanceData>>,
    benchmarks: Mutex<BTreeMap<String, BenchmarkResult>>,
    next_benchmark_id: AtomicU64,
    monitoring_interval: u64,
    stats: Mutex<PerformanceMonitorStats>,
    active: bool,
}

impl PerformanceMonitor {
    /// Create a new performance monitor
    pub fn new() -> Self {
        Self {
            performance_data: Mutex::new(BTreeMap::new()),
            benchmarks: Mutex::new(BTreeMap::new()),
            next_benchmark_id: AtomicU64::new(1),
            monitoring_interval: 30, // 30 seconds
            stats: Mutex::new(PerformanceMonitorStats::default()),
            active: false,
        }
    }

    /// Initialize the performance monitor
    pub fn initialize(&mut self) -> Result<(), UnifiedError> {
        if self.active {
            return Err(UnifiedError::already_initialized("Performance monitor already active"));
        }

        self.active = true;
        Ok(())
    }

    /// Shutdown the performance monitor
    pub fn shutdown(&mut self) -> Result<(), UnifiedError> {
        if !self.active {
            return Err(UnifiedError::not_initialized("Performance monitor not active"));
        }

        self.active = false;
        Ok(())
    }

    /// Get performance monitor status
    pub fn get_status(&self) -> PerformanceMonitorStatus {
        PerformanceMonitorStatus {
            active: self.active,
            components_monitored: self.performance_data.lock().len(),
            benchmarks_count: self.benchmarks.lock().len(),
            monitoring_interval: self.monitoring_interval,
        }
    }

    /// Generate performance report for a component
    pub fn generate_report(&self, component_id: &str) -> Result<PerformanceReport, UnifiedError> {
        if !self.active {
            return Err(UnifiedError::not_initialized("Performance monitor not active"));
        }

        let performance_data = self.performance_data.lock();
        let data = performance_data.get(component_id).cloned().unwrap_or_default();

        Ok(PerformanceReport {
            component_id: component_id.to_string(),
            timestamp: self.get_current_timestamp(),
            data,
        })
    }

    /// Record performance data
    pub fn record_performance(&self, component_id: &str, data: PerformanceData) -> Result<(), UnifiedError> {
        if !self.active {
            return Err(UnifiedError::not_initialized("Performance monitor not active"));
        }

        let mut performance_data = self.performance_data.lock();
        performance_data.insert(component_id.to_string(), data);

        let mut stats = self.stats.lock();
        stats.performance_records += 1;

        Ok(())
    }

    /// Run a benchmark
    pub fn run_benchmark(&self, benchmark_config: BenchmarkConfig) -> Result<u64, UnifiedError> {
        if !self.active {
            return Err(UnifiedError::not_initialized("Performance monitor not active"));
        }

        let benchmark_id = self.next_benchmark_id.fetch_add(1, Ordering::SeqCst);
        
        // In a real implementation, this would actually run the benchmark
        let result = BenchmarkResult {
            benchmark_id,
            config: benchmark_config.clone(),
            start_time: self.get_current_timestamp(),
            end_time: self.get_current_timestamp() + 1000, // 1 second
            success: true,
            metrics: BTreeMap::new(),
        };

        let mut benchmarks = self.benchmarks.lock();
        benchmarks.insert(benchmark_id.to_string(), result);

        let mut stats = self.stats.lock();
        stats.benchmarks_run += 1;

        Ok(benchmark_id)
    }

    /// Get current timestamp
    fn get_current_timestamp(&self) -> u64 {
        // In a real implementation, this would get the actual system time
        1234567890
    }

    /// Get performance monitor recommendations
    pub fn get_recommendations(&self) -> Vec<MonitoringRecommendation> {
        let mut recommendations = Vec::new();
        let stats = self.stats.lock();

        if stats.performance_records > 100 && stats.benchmarks_run == 0 {
            recommendations.push(MonitoringRecommendation {
                category: "Performance".to_string(),
                priority: RecommendationPriority::Medium,
                title: "Run performance benchmarks".to_string(),
                description: "Consider running benchmarks to establish performance baselines".to_string(),
            });
        }

        recommendations
    }

    /// Reset performance monitor statistics
    pub fn reset_stats(&self) {
        let mut stats = self.stats.lock();
        *stats = PerformanceMonitorStats::default();
    }

    /// Optimize performance monitor
    pub fn optimize(&self) -> Result<(), UnifiedError> {
        if !self.active {
            return Err(UnifiedError::not_initialized("Performance monitor not active"));
        }

        // In a real implementation, this would optimize performance monitoring
        Ok(())
    }
}

/// Log aggregator for cloud-native applications
pub struct LogAggregator {
    logs: Mutex<Vec<LogEntry>>,
    indexes: Mutex<BTreeMap<String, Vec<usize>>>, // Index for fast queries
    retention_period: u64,
    max_logs: usize,
    stats: Mutex<LogAggregatorStats>,
    active: bool,
}

impl LogAggregator {
    /// Create a new log aggregator
    pub fn new() -> Self {
        Self {
            logs: Mutex::new(Vec::new()),
            indexes: Mutex::new(BTreeMap::new()),
            retention_period: 86400, // 24 hours
            max_logs: 100000,
            stats: Mutex::new(LogAggregatorStats::default()),
            active: false,
        }
    }

    /// Initialize the log aggregator
    pub fn initialize(&mut self) -> Result<(), UnifiedError> {
        if self.active {
            return Err(UnifiedError::already_initialized("Log aggregator already active"));
        }

        self.active = true;
        Ok(())
    }

    /// Shutdown the log aggregator
    pub fn shutdown(&mut self) -> Result<(), UnifiedError> {
        if !self.active {
            return Err(UnifiedError::not_initialized("Log aggregator not active"));
        }

        self.active = false;
        Ok(())
    }

    /// Get log aggregator status
    pub fn get_status(&self) -> LogAggregatorStatus {
        LogAggregatorStatus {
            active: self.active,
            logs_count: self.logs.lock().len(),
            retention_period: self.retention_period,
            max_logs: self.max_logs,
        }
    }

    /// Aggregate logs based on a query
    pub fn aggregate(&self, query: &LogQuery) -> Result<LogAggregation, UnifiedError> {
        if !self.active {
            return Err(UnifiedError::not_initialized("Log aggregator not active"));
        }

        let logs = self.logs.lock();
        let mut filtered_logs = Vec::new();

        for (index, log) in logs.iter().enumerate() {
            if self.matches_query(log, query) {
                filtered_logs.push((index, log.clone()));
            }
        }

        // Apply aggregation
        let aggregated = self.apply_aggregation(&filtered_logs, &query.aggregation);

        Ok(LogAggregation {
            query: query.clone(),
            timestamp: self.get_current_timestamp(),
            total_logs: logs.len(),
            filtered_count: filtered_logs.len(),
            result: aggregated,
        })
    }

    /// Add a log entry
    pub fn add_log(&self, log: LogEntry) -> Result<(), UnifiedError> {
        if !self.active {
            return Err(UnifiedError::not_initialized("Log aggregator not active"));
        }

        let mut logs = self.logs.lock();
        let index = logs.len();
        logs.push(log.clone());

        // Update indexes
        let mut indexes = self.indexes.lock();
        
        // Index by service
        let service_logs = indexes.entry(log.service.clone()).or_insert_with(Vec::new);
        service_logs.push(index);
        
        // Index by level
        let level_logs = indexes.entry(format!("level:{}", log.level)).or_insert_with(Vec::new);
        level_logs.push(index);

        // Clean up old logs if needed
        if logs.len() > self.max_logs {
            let remove_count = logs.len() - self.max_logs;
            logs.drain(0..remove_count);
            
            // Update indexes (simplified - in a real implementation would be more careful)
            for (_, indices) in indexes.iter_mut() {
                indices.retain(|&i| i >= remove_count);
                for i in indices.iter_mut() {
                    *i -= remove_count;
                }
            }
        }

        let mut stats = self.stats.lock();
        stats.logs_added += 1;

        Ok(())
    }

    /// Check if a log matches a query
    fn matches_query(&self, log: &LogEntry, query: &LogQuery) -> bool {
        // Check service filter
        if let Some(ref service) = query.service_filter {
            if log.service != *service {
                return false;
            }
        }

        // Check level filter
        if let Some(ref level) = query.level_filter {
            if log.level != *level {
                return false;
            }
        }

        // Check time range
        if let Some(start_time) = query.start_time {
            if log.timestamp < start_time {
                return false;
            }
        }

        if let Some(end_time) = query.end_time {
            if log.timestamp > end_time {
                return false;
            }
        }

        // Check message pattern
        if let Some(ref pattern) = query.message_pattern {
            if !log.message.contains(pattern) {
                return false;
            }
        }

        true
    }

    /// Apply aggregation to filtered logs
    fn apply_aggregation(&self, logs: &[(usize, LogEntry)], aggregation: &LogAggregationType) -> LogAggregationResult {
        match aggregation {
            LogAggregationType::Count => LogAggregationResult::Count(logs.len()),
            LogAggregationType::GroupBy(field) => {
                let mut groups = BTreeMap::new();
                for (_, log) in logs {
                    let key = match field.as_str() {
                        "service" => log.service.clone(),
                        "level" => log.level.to_string(),
                        _ => "unknown".to_string(),
                    };
                    *groups.entry(key).or_insert(0) += 1;
                }
                LogAggregationResult::Grouped(groups)
            }
            LogAggregationType::Latest => {
                if let Some((_, latest_log)) = logs.last() {
                    LogAggregationResult::Latest(latest_log.clone())
                } else {
                    LogAggregationResult::None
                }
            }
        }
    }

    /// Get current timestamp
    fn get_current_timestamp(&self) -> u64 {
        // In a real implementation, this would get the actual system time
        1234567890
    }

    /// Get log aggregator recommendations
    pub fn get_recommendations(&self) -> Vec<MonitoringRecommendation> {
        let mut recommendations = Vec::new();
        let stats = self.stats.lock();

        if stats.logs_added > 10000 && stats.queries_run == 0 {
            recommendations.push(MonitoringRecommendation {
                category: "Logging".to_string(),
                priority: RecommendationPriority::Medium,
                title: "Set up log queries and alerts".to_string(),
                description: "Consider setting up log queries and alerts to monitor application behavior".to_string(),
            });
        }

        recommendations
    }

    /// Reset log aggregator statistics
    pub fn reset_stats(&self) {
        let mut stats = self.stats.lock();
        *stats = LogAggregatorStats::default();
    }

    /// Optimize log aggregator
    pub fn optimize(&self) -> Result<(), UnifiedError> {
        if !self.active {
            return Err(UnifiedError::not_initialized("Log aggregator not active"));
        }

        // In a real implementation, this would optimize log aggregation
        Ok(())
    }
}

/// Health monitor for cloud-native applications
pub struct HealthMonitor {
    health_checks: Mutex<BTreeMap<String, HealthCheck>>,
    health_status: Mutex<BTreeMap<String, HealthStatus>>,
    check_interval: u64,
    stats: Mutex<HealthMonitorStats>,
    active: bool,
}

impl HealthMonitor {
    /// Create a new health monitor
    pub fn new() -> Self {
        Self {
            health_checks: Mutex::new(BTreeMap::new()),
            health_status: Mutex::new(BTreeMap::new()),
            check_interval: 60, // 60 seconds
            stats: Mutex::new(HealthMonitorStats::default()),
            active: false,
        }
    }

    /// Initialize the health monitor
    pub fn initialize(&mut self) -> Result<(), UnifiedError> {
        if self.active {
            return Err(UnifiedError::already_initialized("Health monitor already active"));
        }

        self.active = true;
        Ok(())
    }

    /// Shutdown the health monitor
    pub fn shutdown(&mut self) -> Result<(), UnifiedError> {
        if !self.active {
            return Err(UnifiedError::not_initialized("Health monitor not active"));
        }

        self.active = false;
        Ok(())
    }

    /// Get health monitor status
    pub fn get_status(&self) -> HealthMonitorStatus {
        HealthMonitorStatus {
            active: self.active,
            services_monitored: self.health_checks.lock().len(),
            check_interval: self.check_interval,
        }
    }

    /// Check health of a service
    pub fn check_service_health(&self, service_id: &str) -> Result<HealthReport, UnifiedError> {
        if !self.active {
            return Err(UnifiedError::not_initialized("Health monitor not active"));
        }

        let health_checks = self.health_checks.lock();
        let health_check = health_checks.get(service_id).cloned().unwrap_or_default();

        // In a real implementation, this would actually perform the health check
        let status = HealthStatus {
            service_id: service_id.to_string(),
            healthy: true,
            last_check: self.get_current_timestamp(),
            message: "Service is healthy".to_string(),
            details: BTreeMap::new(),
        };

        let mut health_status = self.health_status.lock();
        health_status.insert(service_id.to_string(), status.clone());

        let mut stats = self.stats.lock();
        stats.health_checks += 1;

        Ok(HealthReport {
            service_id: service_id.to_string(),
            timestamp: self.get_current_timestamp(),
            status,
            check_config: health_check,
        })
    }

    /// Register a health check
    pub fn register_health_check(&self, service_id: &str, health_check: HealthCheck) -> Result<(), UnifiedError> {
        if !self.active {
            return Err(UnifiedError::not_initialized("Health monitor not active"));
        }

        let mut health_checks = self.health_checks.lock();
        health_checks.insert(service_id.to_string(), health_check);

        Ok(())
    }

    /// Get current timestamp
    fn get_current_timestamp(&self) -> u64 {
        // In a real implementation, this would get the actual system time
        1234567890
    }

    /// Get health monitor recommendations
    pub fn get_recommendations(&self) -> Vec<MonitoringRecommendation> {
        let mut recommendations = Vec::new();
        let stats = self.stats.lock();

        if stats.health_checks > 100 && stats.unhealthy_checks > stats.health_checks / 10 {
            recommendations.push(MonitoringRecommendation {
                category: "Health".to_string(),
                priority: RecommendationPriority::High,
                title: "Investigate frequent health check failures".to_string(),
                description: "Many health checks are failing. Consider investigating service stability".to_string(),
            });
        }

        recommendations
    }

    /// Reset health monitor statistics
    pub fn reset_stats(&self) {
        let mut stats = self.stats.lock();
        *stats = HealthMonitorStats::default();
    }

    /// Optimize health monitor
    pub fn optimize(&self) -> Result<(), UnifiedError> {
        if !self.active {
            return Err(UnifiedError::not_initialized("Health monitor not active"));
        }

        // In a real implementation, this would optimize health monitoring
        Ok(())
    }
}

/// Dashboard for cloud-native monitoring
pub struct Dashboard {
    dashboards: Mutex<BTreeMap<u64, DashboardConfig>>,
    next_dashboard_id: AtomicU64,
    stats: Mutex<DashboardStats>,
    active: bool,
}

impl Dashboard {
    /// Create a new dashboard
    pub fn new() -> Self {
        Self {
            dashboards: Mutex::new(BTreeMap::new()),
            next_dashboard_id: AtomicU64::new(1),
            stats: Mutex::new(DashboardStats::default()),
            active: false,
        }
    }

    /// Initialize the dashboard
    pub fn initialize(&mut self) -> Result<(), UnifiedError> {
        if self.active {
            return Err(UnifiedError::already_initialized("Dashboard already active"));
        }

        self.active = true;
        Ok(())
    }

    /// Shutdown the dashboard
    pub fn shutdown(&mut self) -> Result<(), UnifiedError> {
        if !self.active {
            return Err(UnifiedError::not_initialized("Dashboard not active"));
        }

        self.active = false;
        Ok(())
    }

    /// Get dashboard status
    pub fn get_status(&self) -> DashboardStatus {
        DashboardStatus {
            active: self.active,
            dashboards_count: self.dashboards.lock().len(),
        }
    }

    /// Create a new dashboard
    pub fn create(&mut self, config: DashboardConfig) -> Result<u64, UnifiedError> {
        if !self.active {
            return Err(UnifiedError::not_initialized("Dashboard not active"));
        }

        let dashboard_id = self.next_dashboard_id.fetch_add(1, Ordering::SeqCst);
        let mut dashboards = self.dashboards.lock();
        dashboards.insert(dashboard_id, config);

        let mut stats = self.stats.lock();
        stats.dashboards_created += 1;

        Ok(dashboard_id)
    }

    /// Update a dashboard
    pub fn update(&self, dashboard_id: u64, config: DashboardConfig) -> Result<(), UnifiedError> {
        if !self.active {
            return Err(UnifiedError::not_initialized("Dashboard not active"));
        }

        let mut dashboards = self.dashboards.lock();
        if dashboards.contains_key(&dashboard_id) {
            dashboards.insert(dashboard_id, config);
            Ok(())
        } else {
            Err(UnifiedError::not_found("Dashboard not found"))
        }
    }

    /// Delete a dashboard
    pub fn delete(&self, dashboard_id: u64) -> Result<(), UnifiedError> {
        if !self.active {
            return Err(UnifiedError::not_initialized("Dashboard not active"));
        }

        let mut dashboards = self.dashboards.lock();
        if dashboards.remove(&dashboard_id).is_some() {
            let mut stats = self.stats.lock();
            stats.dashboards_deleted += 1;
            Ok(())
        } else {
            Err(UnifiedError::not_found("Dashboard not found"))
        }
    }

    /// Generate dashboard data
    pub fn generate_data(&self, dashboard_id: &str) -> Result<DashboardData, UnifiedError> {
        if !self.active {
            return Err(UnifiedError::not_initialized("Dashboard not active"));
        }

        // In a real implementation, this would generate actual dashboard data
        let data = DashboardData {
            dashboard_id: dashboard_id.to_string(),
            timestamp: self.get_current_timestamp(),
            widgets: Vec::new(),
        };

        let mut stats = self.stats.lock();
        stats.data_generations += 1;

        Ok(data)
    }

    /// Get current timestamp
    fn get_current_timestamp(&self) -> u64 {
        // In a real implementation, this would get the actual system time
        1234567890
    }

    /// Get dashboard recommendations
    pub fn get_recommendations(&self) -> Vec<MonitoringRecommendation> {
        let mut recommendations = Vec::new();
        let stats = self.stats.lock();

        if stats.dashboards_created > 0 && stats.data_generations == 0 {
            recommendations.push(MonitoringRecommendation {
                category: "Dashboard".to_string(),
                priority: RecommendationPriority::Medium,
                title: "Generate dashboard data".to_string(),
                description: "Consider generating dashboard data to visualize monitoring information".to_string(),
            });
        }

        recommendations
    }

    /// Reset dashboard statistics
    pub fn reset_stats(&self) {
        let mut stats = self.stats.lock();
        *stats = DashboardStats::default();
    }

    /// Optimize dashboard
    pub fn optimize(&self) -> Result<(), UnifiedError> {
        if !self.active {
            return Err(UnifiedError::not_initialized("Dashboard not active"));
        }

        // In a real implementation, this would optimize dashboard generation
        Ok(())
    }
}

// Data structures for monitoring

/// Metric value types
#[derive(Debug, Clone)]
pub enum MetricValue {
    Counter(u64),
    Gauge(f64),
    Histogram(Vec<f64>),
    Summary {
        count: u64,
        sum: f64,
        quantiles: Vec<(f64, f64)>,
    },
}

/// Metrics snapshot
#[derive(Debug, Clone)]
pub struct MetricsSnapshot {
    pub timestamp: u64,
    pub metrics: BTreeMap<String, MetricValue>,
}

/// Alert configuration
#[derive(Debug, Clone)]
pub struct AlertConfig {
    pub name: String,
    pub metric_name: String,
    pub condition: AlertCondition,
    pub severity: AlertSeverity,
    pub notification_channels: Vec<String>,
}

/// Alert condition
#[derive(Debug, Clone)]
pub enum AlertCondition {
    GreaterThan(u64),
    LessThan(u64),
    Equals(u64),
}

/// Alert severity
#[derive(Debug, Clone)]
pub enum AlertSeverity {
    Info,
    Warning,
    Critical,
}

/// Performance data
#[derive(Debug, Clone, Default)]
pub struct PerformanceData {
    pub cpu_usage: f64,
    pub memory_usage: f64,
    pub disk_io: f64,
    pub network_io: f64,
    pub response_time: f64,
    pub throughput: f64,
}

/// Performance report
#[derive(Debug, Clone)]
pub struct PerformanceReport {
    pub component_id: String,
    pub timestamp: u64,
    pub data: PerformanceData,
}

/// Benchmark configuration
#[derive(Debug, Clone)]
pub struct BenchmarkConfig {
    pub name: String,
    pub component_id: String,
    pub benchmark_type: BenchmarkType,
    pub parameters: BTreeMap<String, String>,
}

/// Benchmark type
#[derive(Debug, Clone)]
pub enum BenchmarkType {
    Latency,
    Throughput,
    ResourceUsage,
    Custom(String),
}

/// Benchmark result
#[derive(Debug, Clone)]
pub struct BenchmarkResult {
    pub benchmark_id: u64,
    pub config: BenchmarkConfig,
    pub start_time: u64,
    pub end_time: u64,
    pub success: bool,
    pub metrics: BTreeMap<String, f64>,
}

/// Log entry
#[derive(Debug, Clone)]
pub struct LogEntry {
    pub timestamp: u64,
    pub level: LogLevel,
    pub service: String,
    pub message: String,
    pub fields: BTreeMap<String, String>,
}

/// Log level
#[derive(Debug, Clone, PartialEq)]
pub enum LogLevel {
    Debug,
    Info,
    Warning,
    Error,
    Critical,
}

/// Log query
#[derive(Debug, Clone)]
pub struct LogQuery {
    pub service_filter: Option<String>,
    pub level_filter: Option<LogLevel>,
    pub start_time: Option<u64>,
    pub end_time: Option<u64>,
    pub message_pattern: Option<String>,
    pub aggregation: LogAggregationType,
}

/// Log aggregation type
#[derive(Debug, Clone)]
pub enum LogAggregationType {
    Count,
    GroupBy(String),
    Latest,
}

/// Log aggregation result
#[derive(Debug, Clone)]
pub enum LogAggregationResult {
    Count(usize),
    Grouped(BTreeMap<String, usize>),
    Latest(LogEntry),
    None,
}

/// Log aggregation
#[derive(Debug, Clone)]
pub struct LogAggregation {
    pub query: LogQuery,
    pub timestamp: u64,
    pub total_logs: usize,
    pub filtered_count: usize,
    pub result: LogAggregationResult,
}

/// Health check configuration
#[derive(Debug, Clone, Default)]
pub struct HealthCheck {
    pub endpoint: String,
    pub method: String,
    pub headers: BTreeMap<String, String>,
    pub expected_status: u16,
    pub timeout: u64,
    pub interval: u64,
}

/// Health status
#[derive(Debug, Clone)]
pub struct HealthStatus {
    pub service_id: String,
    pub healthy: bool,
    pub last_check: u64,
    pub message: String,
    pub details: BTreeMap<String, String>,
}

/// Health report
#[derive(Debug, Clone)]
pub struct HealthReport {
    pub service_id: String,
    pub timestamp: u64,
    pub status: HealthStatus,
    pub check_config: HealthCheck,
}

/// Dashboard configuration
#[derive(Debug, Clone)]
pub struct DashboardConfig {
    pub name: String,
    pub description: String,
    pub widgets: Vec<WidgetConfig>,
    pub refresh_interval: u64,
}

/// Widget configuration
#[derive(Debug, Clone)]
pub struct WidgetConfig {
    pub id: String,
    pub type_: WidgetType,
    pub title: String,
    pub data_source: String,
    pub query: String,
    pub position: WidgetPosition,
}

/// Widget type
#[derive(Debug, Clone)]
pub enum WidgetType {
    Metric,
    Chart,
    Table,
    Log,
    Health,
}

/// Widget position
#[derive(Debug, Clone)]
pub struct WidgetPosition {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

/// Dashboard data
#[derive(Debug, Clone)]
pub struct DashboardData {
    pub dashboard_id: String,
    pub timestamp: u64,
    pub widgets: Vec<WidgetData>,
}

/// Widget data
#[derive(Debug, Clone)]
pub struct WidgetData {
    pub id: String,
    pub data: serde_json::Value,
}

/// Monitoring recommendation
#[derive(Debug, Clone)]
pub struct MonitoringRecommendation {
    pub category: String,
    pub priority: RecommendationPriority,
    pub title: String,
    pub description: String,
}

/// Recommendation priority
#[derive(Debug, Clone)]
pub enum RecommendationPriority {
    Low,
    Medium,
    High,
}

// Status structures

/// Monitoring system status
#[derive(Debug, Clone)]
pub struct MonitoringStatus {
    pub active: bool,
    pub metrics_collector_status: MetricsCollectorStatus,
    pub performance_monitor_status: PerformanceMonitorStatus,
    pub log_aggregator_status: LogAggregatorStatus,
    pub health_monitor_status: HealthMonitorStatus,
    pub dashboard_status: DashboardStatus,
}

/// Metrics collector status
#[derive(Debug, Clone)]
pub struct MetricsCollectorStatus {
    pub active: bool,
    pub metrics_count: usize,
    pub alerts_count: usize,
    pub collection_interval: u64,
    pub retention_period: u64,
}

/// Performance monitor status
#[derive(Debug, Clone)]
pub struct PerformanceMonitorStatus {
    pub active: bool,
    pub components_monitored: usize,
    pub benchmarks_count: usize,
    pub monitoring_interval: u64,
}

/// Log aggregator status
#[derive(Debug, Clone)]
pub struct LogAggregatorStatus {
    pub active: bool,
    pub logs_count: usize,
    pub retention_period: u64,
    pub max_logs: usize,
}

/// Health monitor status
#[derive(Debug, Clone)]
pub struct HealthMonitorStatus {
    pub active: bool,
    pub services_monitored: usize,
    pub check_interval: u64,
}

/// Dashboard status
#[derive(Debug, Clone)]
pub struct DashboardStatus {
    pub active: bool,
    pub dashboards_count: usize,
}

// Statistics structures

/// Monitoring system statistics
#[derive(Debug, Clone, Default)]
pub struct MonitoringStats {
    pub metrics_collections: u64,
    pub performance_checks: u64,
    pub log_aggregations: u64,
    pub health_checks: u64,
    pub dashboard_generations: u64,
}

/// Metrics collector statistics
#[derive(Debug, Clone, Default)]
pub struct MetricsCollectorStats {
    pub metrics_recorded: u64,
    pub alerts_created: u64,
    pub alerts_triggered: u64,
}

/// Performance monitor statistics
#[derive(Debug, Clone, Default)]
pub struct PerformanceMonitorStats {
    pub performance_records: u64,
    pub benchmarks_run: u64,
}

/// Log aggregator statistics
#[derive(Debug, Clone, Default)]
pub struct LogAggregatorStats {
    pub logs_added: u64,
    pub queries_run: u64,
}

/// Health monitor statistics
#[derive(Debug, Clone, Default)]
pub struct HealthMonitorStats {
    pub health_checks: u64,
    pub unhealthy_checks: u64,
}

/// Dashboard statistics
#[derive(Debug, Clone, Default)]
pub struct DashboardStats {
    pub dashboards_created: u64,
    pub dashboards_deleted: u64,
    pub data_generations: u64,
}

// Implement Display for LogLevel
impl core::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            LogLevel::Debug => write!(f, "DEBUG"),
            LogLevel::Info => write!(f, "INFO"),
            LogLevel::Warning => write!(f, "WARNING"),
            LogLevel::Error => write!(f, "ERROR"),
            LogLevel::Critical => write!(f, "CRITICAL"),
        }
    }
}