//! Integration Testing Module
//! 
//! This module provides comprehensive integration testing capabilities for the NOS kernel,
//! including end-to-end testing, component interaction testing, and system validation.

extern crate alloc;

use alloc::collections::BTreeMap;
use alloc::string::String;
use alloc::vec::Vec;
use core::sync::atomic::{AtomicU64, Ordering};
use spin::Mutex;

/// Integration test configuration
#[derive(Debug, Clone)]
pub struct IntegrationTestConfig {
    /// Enable end-to-end testing
    pub enable_end_to_end_testing: bool,
    /// Enable component interaction testing
    pub enable_component_interaction_testing: bool,
    /// Enable system validation testing
    pub enable_system_validation_testing: bool,
    /// Enable performance regression testing
    pub enable_performance_regression_testing: bool,
    /// Integration test timeout in milliseconds
    pub test_timeout_ms: u64,
    /// Output directory for integration reports
    pub output_directory: String,
    /// Enable detailed logging
    pub enable_detailed_logging: bool,
}

impl Default for IntegrationTestConfig {
    fn default() -> Self {
        Self {
            enable_end_to_end_testing: true,
            enable_component_interaction_testing: true,
            enable_system_validation_testing: true,
            enable_performance_regression_testing: false,
            test_timeout_ms: 120000, // 2 minutes
            output_directory: String::from("/tmp/integration_tests"),
            enable_detailed_logging: true,
        }
    }
}

/// Integration test result
#[derive(Debug, Clone)]
pub struct IntegrationTestResult {
    /// Test name
    pub name: String,
    /// Test category
    pub category: IntegrationTestCategory,
    /// Test status
    pub status: IntegrationTestStatus,
    /// Execution time in milliseconds
    pub execution_time_ms: u64,
    /// Memory usage in bytes
    pub memory_usage_bytes: usize,
    /// Components tested
    pub components_tested: Vec<String>,
    /// Test metrics
    pub metrics: IntegrationTestMetrics,
    /// Error message if failed
    pub error_message: Option<String>,
}

/// Integration test category
#[derive(Debug, Clone, PartialEq)]
pub enum IntegrationTestCategory {
    /// End-to-end tests
    EndToEnd,
    /// Component interaction tests
    ComponentInteraction,
    /// System validation tests
    SystemValidation,
    /// Performance regression tests
    PerformanceRegression,
    /// API compatibility tests
    ApiCompatibility,
    /// Resource management tests
    ResourceManagement,
    /// Error handling tests
    ErrorHandling,
    /// Concurrency tests
    Concurrency,
}

/// Integration test status
#[derive(Debug, Clone, PartialEq)]
pub enum IntegrationTestStatus {
    Passed,
    Failed,
    Skipped,
    Timeout,
    Error,
}

/// Integration test metrics
#[derive(Debug, Clone, Default)]
pub struct IntegrationTestMetrics {
    /// Number of operations performed
    pub operations_performed: u64,
    /// Number of components involved
    pub components_involved: u64,
    /// System calls made
    pub syscalls_made: u64,
    /// Context switches
    pub context_switches: u64,
    /// Custom metrics
    pub custom_metrics: BTreeMap<String, u64>,
}

/// Integration test suite
#[derive(Debug)]
pub struct IntegrationTestSuite {
    /// Suite name
    pub name: String,
    /// Integration test cases
    pub test_cases: Vec<IntegrationTestCase>,
    /// Setup function
    pub setup_fn: Option<fn() -> Result<(), String>>,
    /// Teardown function
    pub teardown_fn: Option<fn() -> Result<(), String>>,
}

/// Integration test case
#[derive(Debug)]
pub struct IntegrationTestCase {
    /// Test name
    pub name: String,
    /// Test function
    pub test_fn: fn() -> IntegrationTestResult,
    /// Test category
    pub category: IntegrationTestCategory,
    /// Components to test
    pub components_to_test: Vec<String>,
    /// Expected execution time
    pub expected_execution_time_ms: u64,
    /// Tags
    pub tags: Vec<String>,
}

/// Integration test system
pub struct IntegrationTestSystem {
    /// Configuration
    config: IntegrationTestConfig,
    /// Integration test suites
    test_suites: Mutex<Vec<IntegrationTestSuite>>,
    /// Global statistics
    global_stats: IntegrationTestStats,
    /// Component registry
    component_registry: Mutex<BTreeMap<String, ComponentInfo>>,
}

/// Component information
#[derive(Debug, Clone)]
pub struct ComponentInfo {
    /// Component name
    pub name: String,
    /// Component type
    pub component_type: String,
    /// Dependencies
    pub dependencies: Vec<String>,
    /// Interface
    pub interface: String,
    /// Status
    pub status: ComponentStatus,
}

/// Component status
#[derive(Debug, Clone, PartialEq)]
pub enum ComponentStatus {
    Active,
    Inactive,
    Error,
    Unknown,
}

/// Integration test statistics
#[derive(Debug, Default)]
pub struct IntegrationTestStats {
    /// Total integration tests run
    pub total_tests_run: AtomicU64,
    /// Total tests passed
    pub total_tests_passed: AtomicU64,
    /// Total tests failed
    pub total_tests_failed: AtomicU64,
    /// Total tests skipped
    pub total_tests_skipped: AtomicU64,
    /// Total execution time in milliseconds
    pub total_execution_time_ms: AtomicU64,
    /// Components tested
    pub components_tested: AtomicU64,
}

impl IntegrationTestSystem {
    /// Create a new integration test system
    pub fn new(config: IntegrationTestConfig) -> Self {
        Self {
            config,
            test_suites: Mutex::new(Vec::new()),
            global_stats: IntegrationTestStats::default(),
            component_registry: Mutex::new(BTreeMap::new()),
        }
    }

    /// Register an integration test suite
    pub fn register_suite(&self, suite: IntegrationTestSuite) {
        let mut suites = self.test_suites.lock();
        suites.push(suite);
    }

    /// Register a component
    pub fn register_component(&self, component: ComponentInfo) {
        let mut registry = self.component_registry.lock();
        registry.insert(component.name.clone(), component);
    }

    /// Get component information
    pub fn get_component(&self, name: &str) -> Option<ComponentInfo> {
        let registry = self.component_registry.lock();
        registry.get(name).cloned()
    }

    /// Get all components
    pub fn get_all_components(&self) -> Vec<ComponentInfo> {
        let registry = self.component_registry.lock();
        registry.values().cloned().collect()
    }

    /// Run all integration tests
    pub fn run_all_integration_tests(&self) -> Result<Vec<IntegrationTestResult>, String> {
        let suites = self.test_suites.lock();
        let mut all_results = Vec::new();

        for suite in suites.iter() {
            let suite_results = self.run_integration_test_suite(suite)?;
            all_results.extend(suite_results);
        }

        Ok(all_results)
    }

    /// Run a specific integration test suite
    pub fn run_integration_test_suite(&self, suite: &IntegrationTestSuite) -> Result<Vec<IntegrationTestResult>, String> {
        let mut results = Vec::new();

        // Run setup function
        if let Some(setup_fn) = suite.setup_fn {
            setup_fn().map_err(|e| format!("Setup failed: {}", e))?;
        }

        // Run all integration test cases
        for test_case in &suite.test_cases {
            let result = self.run_integration_test_case(test_case);
            results.push(result);
        }

        // Run teardown function
        if let Some(teardown_fn) = suite.teardown_fn {
            teardown_fn().map_err(|e| format!("Teardown failed: {}", e))?;
        }

        Ok(results)
    }

    /// Run a single integration test case
    pub fn run_integration_test_case(&self, test_case: &IntegrationTestCase) -> IntegrationTestResult {
        let start_time = crate::time::get_ticks();
        let start_memory = self.get_memory_usage();
        
        // Run integration test
        let mut result = (test_case.test_fn)();
        
        let end_time = crate::time::get_ticks();
        let end_memory = self.get_memory_usage();
        
        result.execution_time_ms = end_time - start_time;
        result.memory_usage_bytes = end_memory.saturating_sub(start_memory);
        result.components_tested = test_case.components_to_test.clone();
        
        // Update global statistics
        self.global_stats.total_tests_run.fetch_add(1, Ordering::SeqCst);
        self.global_stats.total_execution_time_ms.fetch_add(result.execution_time_ms, Ordering::SeqCst);
        
        match result.status {
            IntegrationTestStatus::Passed => {
                self.global_stats.total_tests_passed.fetch_add(1, Ordering::SeqCst);
            }
            IntegrationTestStatus::Failed => {
                self.global_stats.total_tests_failed.fetch_add(1, Ordering::SeqCst);
            }
            IntegrationTestStatus::Skipped => {
                self.global_stats.total_tests_skipped.fetch_add(1, Ordering::SeqCst);
            }
            _ => {
                self.global_stats.total_tests_failed.fetch_add(1, Ordering::SeqCst);
            }
        }
        
        // Update components tested count
        self.global_stats.components_tested.fetch_add(
            result.components_tested.len() as u64,
            Ordering::SeqCst
        );
        
        result
    }

    /// Get current memory usage
    fn get_memory_usage(&self) -> usize {
        // In a real implementation, this would query the memory manager
        // For now, return a placeholder
        0
    }

    /// Get global statistics
    pub fn get_global_stats(&self) -> &IntegrationTestStats {
        &self.global_stats
    }

    /// Generate integration test report
    pub fn generate_integration_report(&self, results: &[IntegrationTestResult]) -> IntegrationTestReport {
        let mut report = IntegrationTestReport::new();
        
        for result in results {
            report.add_test_result(result.clone());
        }
        
        report.finalize_report();
        report
    }
}

/// Integration test report
#[derive(Debug)]
pub struct IntegrationTestReport {
    /// Test results
    pub test_results: Vec<IntegrationTestResult>,
    /// Components tested
    pub components_tested: Vec<String>,
    /// Overall success rate
    pub overall_success_rate: f64,
    /// Test assessment
    pub test_assessment: TestAssessment,
    /// Recommendations
    pub recommendations: Vec<String>,
}

impl IntegrationTestReport {
    /// Create a new integration test report
    pub fn new() -> Self {
        Self {
            test_results: Vec::new(),
            components_tested: Vec::new(),
            overall_success_rate: 0.0,
            test_assessment: TestAssessment::Unknown,
            recommendations: Vec::new(),
        }
    }

    /// Add a test result
    pub fn add_test_result(&mut self, result: IntegrationTestResult) {
        // Add components to the list if not already present
        for component in &result.components_tested {
            if !self.components_tested.contains(component) {
                self.components_tested.push(component.clone());
            }
        }
        
        self.test_results.push(result);
    }

    /// Finalize the report
    pub fn finalize_report(&mut self) {
        if self.test_results.is_empty() {
            return;
        }

        // Calculate overall success rate
        let passed_count = self.test_results.iter()
            .filter(|r| r.status == IntegrationTestStatus::Passed)
            .count();
        
        self.overall_success_rate = passed_count as f64 / self.test_results.len() as f64 * 100.0;

        // Determine test assessment
        self.test_assessment = if self.overall_success_rate >= 95.0 {
            TestAssessment::Excellent
        } else if self.overall_success_rate >= 85.0 {
            TestAssessment::Good
        } else if self.overall_success_rate >= 70.0 {
            TestAssessment::Fair
        } else if self.overall_success_rate >= 50.0 {
            TestAssessment::Poor
        } else {
            TestAssessment::Critical
        };

        // Generate recommendations
        self.generate_recommendations();
    }

    /// Generate recommendations
    fn generate_recommendations(&mut self) {
        // Count failures by category
        let mut failures_by_category = BTreeMap::new();
        for result in &self.test_results {
            if result.status == IntegrationTestStatus::Failed {
                let count = failures_by_category.entry(result.category.clone()).or_insert(0);
                *count += 1;
            }
        }

        // Generate recommendations based on failure categories
        for (category, count) in failures_by_category {
            let recommendation = match category {
                IntegrationTestCategory::EndToEnd => {
                    format!("Found {} end-to-end test failures. Review system integration points and data flow.", count)
                }
                IntegrationTestCategory::ComponentInteraction => {
                    format!("Found {} component interaction failures. Review component interfaces and communication protocols.", count)
                }
                IntegrationTestCategory::SystemValidation => {
                    format!("Found {} system validation failures. Review system requirements and validation criteria.", count)
                }
                IntegrationTestCategory::PerformanceRegression => {
                    format!("Found {} performance regression failures. Review performance-critical code paths and optimizations.", count)
                }
                IntegrationTestCategory::ApiCompatibility => {
                    format!("Found {} API compatibility failures. Review API contracts and version compatibility.", count)
                }
                IntegrationTestCategory::ResourceManagement => {
                    format!("Found {} resource management failures. Review resource allocation and cleanup procedures.", count)
                }
                IntegrationTestCategory::ErrorHandling => {
                    format!("Found {} error handling failures. Review error handling paths and recovery mechanisms.", count)
                }
                IntegrationTestCategory::Concurrency => {
                    format!("Found {} concurrency failures. Review synchronization mechanisms and race conditions.", count)
                }
            };
            self.recommendations.push(recommendation);
        }
    }

    /// Print detailed report
    pub fn print_detailed_report(&self) {
        crate::println!();
        crate::println!("==== Integration Test Report ====");
        crate::println!("Overall success rate: {:.1}%", self.overall_success_rate);
        crate::println!("Test assessment: {:?}", self.test_assessment);
        crate::println!("Total tests run: {}", self.test_results.len());
        crate::println!("Components tested: {}", self.components_tested.len());
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
                    IntegrationTestStatus::Passed => "\x1b[32mPASS\x1b[0m",
                    IntegrationTestStatus::Failed => "\x1b[31mFAIL\x1b[0m",
                    IntegrationTestStatus::Skipped => "\x1b[33mSKIP\x1b[0m",
                    IntegrationTestStatus::Timeout => "\x1b[35mTIME\x1b[0m",
                    IntegrationTestStatus::Error => "\x1b[31mERROR\x1b[0m",
                };

                crate::println!("  {} {} ({}ms, {} bytes)",
                    status_str,
                    result.name,
                    result.execution_time_ms,
                    result.memory_usage_bytes
                );

                if !result.components_tested.is_empty() {
                    crate::println!("    Components: {:?}", result.components_tested);
                }

                if let Some(ref error) = result.error_message {
                    crate::println!("    Error: {}", error);
                }
            }
            crate::println!();
        }

        // Print components tested
        if !self.components_tested.is_empty() {
            crate::println!("==== Components Tested ====");
            for component in &self.components_tested {
                crate::println!("- {}", component);
            }
            crate::println!();
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

/// Test assessment
#[derive(Debug, Clone, PartialEq)]
pub enum TestAssessment {
    Excellent,
    Good,
    Fair,
    Poor,
    Critical,
    Unknown,
}

/// Global integration test system instance
static mut INTEGRATION_TEST_SYSTEM: Option<IntegrationTestSystem> = None;
static INTEGRATION_TEST_SYSTEM_INIT: spin::Once = spin::Once::new();

/// Initialize the global integration test system
pub fn init_integration_test_system(config: IntegrationTestConfig) -> Result<(), String> {
    INTEGRATION_TEST_SYSTEM_INIT.call_once(|| {
        let system = IntegrationTestSystem::new(config);
        unsafe {
            INTEGRATION_TEST_SYSTEM = Some(system);
        }
    });
    Ok(())
}

/// Get the global integration test system
pub fn get_integration_test_system() -> Option<&'static IntegrationTestSystem> {
    unsafe {
        INTEGRATION_TEST_SYSTEM.as_ref()
    }
}

/// Register an integration test suite
pub fn register_integration_test_suite(suite: IntegrationTestSuite) {
    if let Some(system) = get_integration_test_system() {
        system.register_suite(suite);
    }
}

/// Run all integration tests
pub fn run_all_integration_tests() -> Result<Vec<IntegrationTestResult>, String> {
    let system = get_integration_test_system().ok_or("Integration test system not initialized")?;
    system.run_all_integration_tests()
}

/// Macro to create an integration test case
#[macro_export]
macro_rules! integration_test_case {
    ($name:expr, $fn:expr, $category:expr, $components:expr) => {
        $crate::testing::integration_tests::IntegrationTestCase {
            name: $name.to_string(),
            test_fn: $fn,
            category: $category,
            components_to_test: $components.iter().map(|s| s.to_string()).collect(),
            expected_execution_time_ms: 0,
            tags: Vec::new(),
        }
    };
    ($name:expr, $fn:expr, $category:expr, $components:expr, expected_time => $time:expr) => {
        $crate::testing::integration_tests::IntegrationTestCase {
            name: $name.to_string(),
            test_fn: $fn,
            category: $category,
            components_to_test: $components.iter().map(|s| s.to_string()).collect(),
            expected_execution_time_ms: $time,
            tags: Vec::new(),
        }
    };
    ($name:expr, $fn:expr, $category:expr, $components:expr, expected_time => $time:expr, tags => [$($tag:expr),*]) => {
        $crate::testing::integration_tests::IntegrationTestCase {
            name: $name.to_string(),
            test_fn: $fn,
            category: $category,
            components_to_test: $components.iter().map(|s| s.to_string()).collect(),
            expected_execution_time_ms: $time,
            tags: vec![$($tag.to_string()),*],
        }
    };
}

/// Macro to create an integration test suite
#[macro_export]
macro_rules! integration_test_suite {
    ($name:expr, [$($integration_test_case:expr),*]) => {
        $crate::testing::integration_tests::IntegrationTestSuite {
            name: $name.to_string(),
            test_cases: vec![$($integration_test_case),*],
            setup_fn: None,
            teardown_fn: None,
        }
    };
    ($name:expr, [$($integration_test_case:expr),*], setup => $setup:expr) => {
        $crate::testing::integration_tests::IntegrationTestSuite {
            name: $name.to_string(),
            test_cases: vec![$($integration_test_case),*],
            setup_fn: Some($setup),
            teardown_fn: None,
        }
    };
    ($name:expr, [$($integration_test_case:expr),*], setup => $setup:expr, teardown => $teardown:expr) => {
        $crate::testing::integration_tests::IntegrationTestSuite {
            name: $name.to_string(),
            test_cases: vec![$($integration_test_case),*],
            setup_fn: Some($setup),
            teardown_fn: Some($teardown),
        }
    };
}