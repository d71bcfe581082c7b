//! Security Testing Module
//! 
//! This module provides comprehensive security testing capabilities for the NOS kernel,
//! including vulnerability testing, penetration testing, and security validation.

extern crate alloc;

use alloc::collections::BTreeMap;
use alloc::string::String;
use alloc::vec::Vec;
use core::sync::atomic::{AtomicU64, Ordering};
use spin::Mutex;

/// Security test configuration
#[derive(Debug, Clone)]
pub struct SecurityTestConfig {
    /// Enable vulnerability scanning
    pub enable_vulnerability_scanning: bool,
    /// Enable penetration testing
    pub enable_penetration_testing: bool,
    /// Enable fuzzing
    pub enable_fuzzing: bool,
    /// Enable security regression testing
    pub enable_security_regression: bool,
    /// Security test timeout in milliseconds
    pub test_timeout_ms: u64,
    /// Output directory for security reports
    pub output_directory: String,
    /// Enable detailed logging
    pub enable_detailed_logging: bool,
}

impl Default for SecurityTestConfig {
    fn default() -> Self {
        Self {
            enable_vulnerability_scanning: true,
            enable_penetration_testing: false,
            enable_fuzzing: false,
            enable_security_regression: true,
            test_timeout_ms: 60000, // 60 seconds
            output_directory: String::from("/tmp/security_tests"),
            enable_detailed_logging: true,
        }
    }
}

/// Security test result
#[derive(Debug, Clone)]
pub struct SecurityTestResult {
    /// Test name
    pub name: String,
    /// Test category
    pub category: SecurityTestCategory,
    /// Test status
    pub status: SecurityTestStatus,
    /// Vulnerability found
    pub vulnerability_found: bool,
    /// Vulnerability details
    pub vulnerability_details: Option<VulnerabilityDetails>,
    /// Execution time in milliseconds
    pub execution_time_ms: u64,
    /// Security score (0-100, higher is better)
    pub security_score: u8,
    /// Test metrics
    pub metrics: SecurityTestMetrics,
}

/// Security test category
#[derive(Debug, Clone, PartialEq)]
pub enum SecurityTestCategory {
    /// Memory safety tests
    MemorySafety,
    /// Access control tests
    AccessControl,
    /// Cryptography tests
    Cryptography,
    /// Network security tests
    NetworkSecurity,
    /// System call security tests
    SystemCallSecurity,
    /// File system security tests
    FileSystemSecurity,
    /// Process security tests
    ProcessSecurity,
    /// Kernel integrity tests
    KernelIntegrity,
    /// Side-channel attacks
    SideChannel,
    /// Privilege escalation
    PrivilegeEscalation,
}

/// Security test status
#[derive(Debug, Clone, PartialEq)]
pub enum SecurityTestStatus {
    Passed,
    Failed,
    Warning,
    Skipped,
    Error,
}

/// Vulnerability details
#[derive(Debug, Clone)]
pub struct VulnerabilityDetails {
    /// Vulnerability type
    pub vulnerability_type: VulnerabilityType,
    /// Severity level
    pub severity: VulnerabilitySeverity,
    /// Description
    pub description: String,
    /// Affected components
    pub affected_components: Vec<String>,
    /// Recommended fix
    pub recommended_fix: String,
    /// CVE identifier if applicable
    pub cve_identifier: Option<String>,
}

/// Vulnerability type
#[derive(Debug, Clone, PartialEq)]
pub enum VulnerabilityType {
    BufferOverflow,
    UseAfterFree,
    DoubleFree,
    NullPointerDereference,
    IntegerOverflow,
    RaceCondition,
    PrivilegeEscalation,
    InformationDisclosure,
    DenialOfService,
    SideChannel,
    CryptographicWeakness,
    InjectionAttack,
    Misconfiguration,
    Other(String),
}

/// Vulnerability severity
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum VulnerabilitySeverity {
    Critical,
    High,
    Medium,
    Low,
    Info,
}

/// Security test metrics
#[derive(Debug, Clone, Default)]
pub struct SecurityTestMetrics {
    /// Number of checks performed
    pub checks_performed: u64,
    /// Number of vulnerabilities found
    pub vulnerabilities_found: u64,
    /// Code coverage percentage
    pub code_coverage: f64,
    /// Attack surface area
    pub attack_surface_area: u64,
    /// Custom metrics
    pub custom_metrics: BTreeMap<String, u64>,
}

/// Security test suite
#[derive(Debug)]
pub struct SecurityTestSuite {
    /// Suite name
    pub name: String,
    /// Security test cases
    pub test_cases: Vec<SecurityTestCase>,
    /// Setup function
    pub setup_fn: Option<fn() -> Result<(), String>>,
    /// Teardown function
    pub teardown_fn: Option<fn() -> Result<(), String>>,
}

/// Security test case
#[derive(Debug)]
pub struct SecurityTestCase {
    /// Test name
    pub name: String,
    /// Test function
    pub test_fn: fn() -> SecurityTestResult,
    /// Test category
    pub category: SecurityTestCategory,
    /// Expected security score
    pub expected_security_score: u8,
    /// Tags
    pub tags: Vec<String>,
}

/// Security test system
pub struct SecurityTestSystem {
    /// Configuration
    config: SecurityTestConfig,
    /// Security test suites
    test_suites: Mutex<Vec<SecurityTestSuite>>,
    /// Global statistics
    global_stats: SecurityTestStats,
    /// Vulnerability database
    vulnerability_db: Mutex<Vec<VulnerabilityDetails>>,
}

/// Security test statistics
#[derive(Debug, Default)]
pub struct SecurityTestStats {
    /// Total security tests run
    pub total_tests_run: AtomicU64,
    /// Total vulnerabilities found
    pub total_vulnerabilities_found: AtomicU64,
    /// Critical vulnerabilities found
    pub critical_vulnerabilities_found: AtomicU64,
    /// High vulnerabilities found
    pub high_vulnerabilities_found: AtomicU64,
    /// Medium vulnerabilities found
    pub medium_vulnerabilities_found: AtomicU64,
    /// Low vulnerabilities found
    pub low_vulnerabilities_found: AtomicU64,
    /// Average security score
    pub average_security_score: AtomicU64,
}

impl SecurityTestSystem {
    /// Create a new security test system
    pub fn new(config: SecurityTestConfig) -> Self {
        Self {
            config,
            test_suites: Mutex::new(Vec::new()),
            global_stats: SecurityTestStats::default(),
            vulnerability_db: Mutex::new(Vec::new()),
        }
    }

    /// Register a security test suite
    pub fn register_suite(&self, suite: SecurityTestSuite) {
        let mut suites = self.test_suites.lock();
        suites.push(suite);
    }

    /// Run all security tests
    pub fn run_all_security_tests(&self) -> Result<Vec<SecurityTestResult>, String> {
        let suites = self.test_suites.lock();
        let mut all_results = Vec::new();

        for suite in suites.iter() {
            let suite_results = self.run_security_test_suite(suite)?;
            all_results.extend(suite_results);
        }

        Ok(all_results)
    }

    /// Run a specific security test suite
    pub fn run_security_test_suite(&self, suite: &SecurityTestSuite) -> Result<Vec<SecurityTestResult>, String> {
        let mut results = Vec::new();

        // Run setup function
        if let Some(setup_fn) = suite.setup_fn {
            setup_fn().map_err(|e| format!("Setup failed: {}", e))?;
        }

        // Run all security test cases
        for test_case in &suite.test_cases {
            let result = self.run_security_test_case(test_case);
            results.push(result);
        }

        // Run teardown function
        if let Some(teardown_fn) = suite.teardown_fn {
            teardown_fn().map_err(|e| format!("Teardown failed: {}", e))?;
        }

        Ok(results)
    }

    /// Run a single security test case
    pub fn run_security_test_case(&self, test_case: &SecurityTestCase) -> SecurityTestResult {
        let start_time = crate::time::get_ticks();
        
        // Run the security test
        let mut result = (test_case.test_fn)();
        
        let end_time = crate::time::get_ticks();
        result.execution_time_ms = end_time - start_time;
        
        // Update global statistics
        self.global_stats.total_tests_run.fetch_add(1, Ordering::SeqCst);
        
        if result.vulnerability_found {
            self.global_stats.total_vulnerabilities_found.fetch_add(1, Ordering::SeqCst);
            
            if let Some(ref vuln_details) = result.vulnerability_details {
                match vuln_details.severity {
                    VulnerabilitySeverity::Critical => {
                        self.global_stats.critical_vulnerabilities_found.fetch_add(1, Ordering::SeqCst);
                    }
                    VulnerabilitySeverity::High => {
                        self.global_stats.high_vulnerabilities_found.fetch_add(1, Ordering::SeqCst);
                    }
                    VulnerabilitySeverity::Medium => {
                        self.global_stats.medium_vulnerabilities_found.fetch_add(1, Ordering::SeqCst);
                    }
                    VulnerabilitySeverity::Low => {
                        self.global_stats.low_vulnerabilities_found.fetch_add(1, Ordering::SeqCst);
                    }
                    VulnerabilitySeverity::Info => {
                        // Info level vulnerabilities don't increment counters
                    }
                }
                
                // Add to vulnerability database
                let mut vuln_db = self.vulnerability_db.lock();
                vuln_db.push(vuln_details.clone());
            }
        }
        
        // Update average security score
        let current_total = self.global_stats.average_security_score.load(Ordering::SeqCst);
        let new_total = current_total + result.security_score as u64;
        self.global_stats.average_security_score.store(new_total, Ordering::SeqCst);
        
        result
    }

    /// Get vulnerability database
    pub fn get_vulnerability_db(&self) -> Vec<VulnerabilityDetails> {
        self.vulnerability_db.lock().clone()
    }

    /// Clear vulnerability database
    pub fn clear_vulnerability_db(&self) {
        let mut vuln_db = self.vulnerability_db.lock();
        vuln_db.clear();
    }

    /// Get global statistics
    pub fn get_global_stats(&self) -> &SecurityTestStats {
        &self.global_stats
    }

    /// Generate security report
    pub fn generate_security_report(&self, results: &[SecurityTestResult]) -> SecurityReport {
        let mut report = SecurityReport::new();
        
        for result in results {
            report.add_test_result(result.clone());
        }
        
        report.finalize_report();
        report
    }
}

/// Security report
#[derive(Debug)]
pub struct SecurityReport {
    /// Test results
    pub test_results: Vec<SecurityTestResult>,
    /// Vulnerabilities found
    pub vulnerabilities: Vec<VulnerabilityDetails>,
    /// Overall security score
    pub overall_security_score: u8,
    /// Security assessment
    pub security_assessment: SecurityAssessment,
    /// Recommendations
    pub recommendations: Vec<String>,
}

impl SecurityReport {
    /// Create a new security report
    pub fn new() -> Self {
        Self {
            test_results: Vec::new(),
            vulnerabilities: Vec::new(),
            overall_security_score: 0,
            security_assessment: SecurityAssessment::Unknown,
            recommendations: Vec::new(),
        }
    }

    /// Add a test result
    pub fn add_test_result(&mut self, result: SecurityTestResult) {
        if let Some(ref vuln_details) = result.vulnerability_details {
            self.vulnerabilities.push(vuln_details.clone());
        }
        self.test_results.push(result);
    }

    /// Finalize the report
    pub fn finalize_report(&mut self) {
        if self.test_results.is_empty() {
            return;
        }

        // Calculate overall security score
        let total_score: u32 = self.test_results.iter()
            .map(|r| r.security_score as u32)
            .sum();
        self.overall_security_score = (total_score / self.test_results.len() as u32) as u8;

        // Determine security assessment
        self.security_assessment = if self.overall_security_score >= 90 {
            SecurityAssessment::Excellent
        } else if self.overall_security_score >= 80 {
            SecurityAssessment::Good
        } else if self.overall_security_score >= 70 {
            SecurityAssessment::Fair
        } else if self.overall_security_score >= 60 {
            SecurityAssessment::Poor
        } else {
            SecurityAssessment::Critical
        };

        // Generate recommendations
        self.generate_recommendations();
    }

    /// Generate security recommendations
    fn generate_recommendations(&mut self) {
        // Count vulnerabilities by type
        let mut vuln_counts = BTreeMap::new();
        for vuln in &self.vulnerabilities {
            let count = vuln_counts.entry(vuln.vulnerability_type.clone()).or_insert(0);
            *count += 1;
        }

        // Generate recommendations based on vulnerability types
        for (vuln_type, count) in vuln_counts {
            let recommendation = match vuln_type {
                VulnerabilityType::BufferOverflow => {
                    format!("Found {} buffer overflow vulnerabilities. Implement bounds checking and use safe memory operations.", count)
                }
                VulnerabilityType::UseAfterFree => {
                    format!("Found {} use-after-free vulnerabilities. Implement proper memory management and use reference counting.", count)
                }
                VulnerabilityType::PrivilegeEscalation => {
                    format!("Found {} privilege escalation vulnerabilities. Review permission checks and implement principle of least privilege.", count)
                }
                VulnerabilityType::InformationDisclosure => {
                    format!("Found {} information disclosure vulnerabilities. Review data handling and implement proper access controls.", count)
                }
                VulnerabilityType::RaceCondition => {
                    format!("Found {} race condition vulnerabilities. Implement proper synchronization mechanisms.", count)
                }
                _ => {
                    format!("Found {} {} vulnerabilities. Review affected code and implement appropriate security measures.", count, format!("{:?}", vuln_type))
                }
            };
            self.recommendations.push(recommendation);
        }
    }

    /// Print detailed report
    pub fn print_detailed_report(&self) {
        crate::println!();
        crate::println!("==== Security Test Report ====");
        crate::println!("Overall security score: {}/100", self.overall_security_score);
        crate::println!("Security assessment: {:?}", self.security_assessment);
        crate::println!("Total tests run: {}", self.test_results.len());
        crate::println!("Vulnerabilities found: {}", self.vulnerabilities.len());
        crate::println!();

        // Print test results by category
        let mut results_by_category = BTreeMap::new();
        for result in &self.test_results {
            let category_results = results_by_category.entry(result.category.clone()).or_insert_with(Vec::new);
            category_results.push(result);
        }

        for (category, results) in results_by_category {
            crate::println!("==== {:?} ====", category);
            for result in results {
                let status_str = match result.status {
                    SecurityTestStatus::Passed => "\x1b[32mPASS\x1b[0m",
                    SecurityTestStatus::Failed => "\x1b[31mFAIL\x1b[0m",
                    SecurityTestStatus::Warning => "\x1b[33mWARN\x1b[0m",
                    SecurityTestStatus::Skipped => "\x1b[37mSKIP\x1b[0m",
                    SecurityTestStatus::Error => "\x1b[31mERROR\x1b[0m",
                };

                crate::println!("  {} {} (Score: {}/100, {}ms)",
                    status_str,
                    result.name,
                    result.security_score,
                    result.execution_time_ms
                );

                if result.vulnerability_found {
                    if let Some(ref vuln_details) = result.vulnerability_details {
                        crate::println!("    Vulnerability: {:?}", vuln_details.vulnerability_type);
                        crate::println!("    Severity: {:?}", vuln_details.severity);
                        crate::println!("    Description: {}", vuln_details.description);
                    }
                }
            }
            crate::println!();
        }

        // Print vulnerabilities
        if !self.vulnerabilities.is_empty() {
            crate::println!("==== Vulnerabilities ====");
            for vuln in &self.vulnerabilities {
                crate::println!("Type: {:?}", vuln.vulnerability_type);
                crate::println!("Severity: {:?}", vuln.severity);
                crate::println!("Description: {}", vuln.description);
                crate::println!("Affected components: {:?}", vuln.affected_components);
                crate::println!("Recommended fix: {}", vuln.recommended_fix);
                if let Some(ref cve) = vuln.cve_identifier {
                    crate::println!("CVE: {}", cve);
                }
                crate::println!();
            }
        }

        // Print recommendations
        if !self.recommendations.is_empty() {
            crate::println!("==== Recommendations ====");
            for (i, recommendation) in self.recommendations.iter().enumerate() {
                crate::println!("{}. {}", i + 1, recommendation);
            }
            crate::println!();
        }
    }
}

/// Security assessment
#[derive(Debug, Clone, PartialEq)]
pub enum SecurityAssessment {
    Excellent,
    Good,
    Fair,
    Poor,
    Critical,
    Unknown,
}

/// Global security test system instance
static mut SECURITY_TEST_SYSTEM: Option<SecurityTestSystem> = None;
static SECURITY_TEST_SYSTEM_INIT: spin::Once = spin::Once::new();

/// Initialize the global security test system
pub fn init_security_test_system(config: SecurityTestConfig) -> Result<(), String> {
    SECURITY_TEST_SYSTEM_INIT.call_once(|| {
        let system = SecurityTestSystem::new(config);
        unsafe {
            SECURITY_TEST_SYSTEM = Some(system);
        }
    });
    Ok(())
}

/// Get the global security test system
pub fn get_security_test_system() -> Option<&'static SecurityTestSystem> {
    unsafe {
        SECURITY_TEST_SYSTEM.as_ref()
    }
}

/// Register a security test suite
pub fn register_security_test_suite(suite: SecurityTestSuite) {
    if let Some(system) = get_security_test_system() {
        system.register_suite(suite);
    }
}

/// Run all security tests
pub fn run_all_security_tests() -> Result<Vec<SecurityTestResult>, String> {
    let system = get_security_test_system().ok_or("Security test system not initialized")?;
    system.run_all_security_tests()
}

/// Macro to create a security test case
#[macro_export]
macro_rules! security_test_case {
    ($name:expr, $fn:expr, $category:expr, $expected_score:expr) => {
        $crate::testing::security_tests::SecurityTestCase {
            name: $name.to_string(),
            test_fn: $fn,
            category: $category,
            expected_security_score: $expected_score,
            tags: Vec::new(),
        }
    };
    ($name:expr, $fn:expr, $category:expr, $expected_score:expr, tags => [$($tag:expr),*]) => {
        $crate::testing::security_tests::SecurityTestCase {
            name: $name.to_string(),
            test_fn: $fn,
            category: $category,
            expected_security_score: $expected_score,
            tags: vec![$($tag.to_string()),*],
        }
    };
}

/// Macro to create a security test suite
#[macro_export]
macro_rules! security_test_suite {
    ($name:expr, [$($security_test_case:expr),*]) => {
        $crate::testing::security_tests::SecurityTestSuite {
            name: $name.to_string(),
            test_cases: vec![$($security_test_case),*],
            setup_fn: None,
            teardown_fn: None,
        }
    };
    ($name:expr, [$($security_test_case:expr),*], setup => $setup:expr) => {
        $crate::testing::security_tests::SecurityTestSuite {
            name: $name.to_string(),
            test_cases: vec![$($security_test_case),*],
            setup_fn: Some($setup),
            teardown_fn: None,
        }
    };
    ($name:expr, [$($security_test_case:expr),*], setup => $setup:expr, teardown => $teardown:expr) => {
        $crate::testing::security_tests::SecurityTestSuite {
            name: $name.to_string(),
            test_cases: vec![$($security_test_case),*],
            setup_fn: Some($setup),
            teardown_fn: Some($teardown),
        }
    };
}