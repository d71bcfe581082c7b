//! System health monitoring
//!
//! Monitors system health and detects issues.

extern crate alloc;

use alloc::vec::Vec;
use alloc::string::String;
use core::sync::atomic::{AtomicU64, Ordering};
use crate::subsystems::sync::Mutex;

/// Health check status
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HealthStatus {
    Healthy,
    Degraded,
    Unhealthy,
}

/// Health check result
#[derive(Debug, Clone)]
pub struct HealthCheckResult {
    /// Check name
    pub name: String,
    /// Status
    pub status: HealthStatus,
    /// Message
    pub message: String,
    /// Timestamp
    pub timestamp: u64,
}

/// Health checker
pub struct HealthChecker {
    /// Last check time
    last_check_time: AtomicU64,
    /// Check interval (nanoseconds)
    check_interval_ns: u64,
    /// Health status
    overall_status: AtomicU64, // 0=Healthy, 1=Degraded, 2=Unhealthy
}

impl HealthChecker {
    /// Create a new health checker
    pub fn new() -> Self {
        Self {
            last_check_time: AtomicU64::new(0),
            check_interval_ns: 1_000_000_000, // 1 second
            overall_status: AtomicU64::new(0), // Healthy
        }
    }
    
    /// Run health checks
    pub fn check_health(&self) -> Vec<HealthCheckResult> {
        let mut results = Vec::new();
        let current_time = crate::subsystems::time::hrtime_nanos();
        
        // Check memory health
        let memory_check = self.check_memory();
        results.push(memory_check);
        
        // Check process health
        let process_check = self.check_processes();
        results.push(process_check);
        
        // Check CPU health
        let cpu_check = self.check_cpu();
        results.push(cpu_check);
        
        // Update overall status
        let worst_status = results.iter()
            .map(|r| r.status)
            .max_by_key(|s| *s as u64)
            .unwrap_or(HealthStatus::Healthy);
        
        self.overall_status.store(worst_status as u64, Ordering::Release);
        self.last_check_time.store(current_time, Ordering::Release);
        
        results
    }
    
    /// Check memory health
    fn check_memory(&self) -> HealthCheckResult {
        // In real implementation, would check:
        // - Memory usage
        // - Memory fragmentation
        // - OOM conditions
        
        HealthCheckResult {
            name: "memory".to_string(),
            status: HealthStatus::Healthy,
            message: "Memory usage normal".to_string(),
            timestamp: crate::subsystems::time::hrtime_nanos(),
        }
    }
    
    /// Check process health
    fn check_processes(&self) -> HealthCheckResult {
        let proc_table = crate::process::PROC_TABLE.lock();
        let total_processes = proc_table.iter().count();
        let running_processes = proc_table.iter()
            .filter(|p| p.state == crate::process::ProcState::Running)
            .count();
        drop(proc_table);
        
        let status = if running_processes == 0 && total_processes > 0 {
            HealthStatus::Degraded
        } else {
            HealthStatus::Healthy
        };
        
        HealthCheckResult {
            name: "processes".to_string(),
            status,
            message: format!("{} running processes", running_processes),
            timestamp: crate::subsystems::time::hrtime_nanos(),
        }
    }
    
    /// Check CPU health
    fn check_cpu(&self) -> HealthCheckResult {
        // In real implementation, would check:
        // - CPU utilization
        // - Load average
        // - Temperature (if available)
        
        HealthCheckResult {
            name: "cpu".to_string(),
            status: HealthStatus::Healthy,
            message: "CPU usage normal".to_string(),
            timestamp: crate::subsystems::time::hrtime_nanos(),
        }
    }
    
    /// Get overall health status
    pub fn get_overall_status(&self) -> HealthStatus {
        match self.overall_status.load(Ordering::Acquire) {
            0 => HealthStatus::Healthy,
            1 => HealthStatus::Degraded,
            2 => HealthStatus::Unhealthy,
            _ => HealthStatus::Unhealthy,
        }
    }
}

/// Global health checker instance
static HEALTH_CHECKER: Mutex<Option<HealthChecker>> = Mutex::new(None);

/// Initialize health checker
pub fn init_health_checker() -> Result<(), i32> {
    let mut checker = HEALTH_CHECKER.lock();
    if checker.is_none() {
        *checker = Some(HealthChecker::new());
        crate::println!("[monitoring] Health checker initialized");
    }
    Ok(())
}

/// Get health checker
pub fn get_health_checker() -> &'static HealthChecker {
    static INIT_ONCE: crate::subsystems::sync::Once = crate::subsystems::sync::Once::new();
    INIT_ONCE.call_once(|| {
        let mut checker = HEALTH_CHECKER.lock();
        if checker.is_none() {
            *checker = Some(HealthChecker::new());
        }
    });
    
    unsafe {
        &*(HEALTH_CHECKER.lock().as_ref().unwrap() as *const HealthChecker)
    }
}

