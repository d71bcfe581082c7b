//! Comprehensive Testing Framework
//! 
//! This module provides a complete testing framework for the NOS kernel,
//! including unit tests, integration tests, performance benchmarks,
//! and security testing capabilities.

extern crate alloc;

use alloc::collections::BTreeMap;
use alloc::string::String;
use alloc::vec::Vec;
use core::sync::atomic::{AtomicUsize, Ordering};
use spin::Mutex;

/// Test framework configuration
#[derive(Debug, Clone)]
pub struct TestFrameworkConfig {
    /// Enable verbose output
    pub verbose: bool,
    /// Enable performance profiling
    pub enable_profiling: bool,
    /// Enable coverage analysis
    pub enable_coverage: bool,
    /// Enable security testing
    pub enable_security_tests: bool,
    /// Enable stress testing
    pub enable_stress_tests: bool,
    /// Test timeout in milliseconds
    pub test_timeout_ms: u64,
    /// Maximum number of parallel tests
    pub max_parallel_tests: usize,
    /// Output directory for test reports
    pub output_directory: String,
}

impl Default for TestFrameworkConfig {
    fn default() -> Self {
        Self {
            verbose: false,
            enable_profiling: true,
            enable_coverage: true,
            enable_security_tests: true,
            enable_stress_tests: false,
            test_timeout_ms: 30000, // 30 seconds
            max_parallel_tests: 4,
            output_directory: String::from("/tmp/test_reports"),
        }
    }
}

/// Test result status
#[derive(Debug, Clone, PartialEq)]
pub enum TestStatus {
    Passed,
    Failed,
    Skipped,
    Timeout,
    Panic,
    Unknown,
}

/// Test result
#[derive(Debug, Clone)]
pub struct TestResult {
    /// Test name
    pub name: String,
    /// Test module
    pub module: String,
    /// Test status
    pub status: TestStatus,
    /// Execution time in milliseconds
    pub execution_time_ms: u64,
    /// Memory usage in bytes
    pub memory_usage_bytes: usize,
    /// Error message if failed
    pub error_message: Option<String>,
    /// Stack trace if panicked
    pub stack_trace: Option<String>,
    /// Test metrics
    pub metrics: TestMetrics,
}

/// Test metrics
#[derive(Debug, Clone, Default)]
pub struct TestMetrics {
    /// CPU cycles used
    pub cpu_cycles: u64,
    /// Cache misses
    pub cache_misses: u64,
    /// Page faults
    pub page_faults: u64,
    /// Context switches
    pub context_switches: u64,
    /// System calls made
    pub syscalls: u64,
    /// Custom metrics
    pub custom_metrics: BTreeMap<String, u64>,
}

/// Test suite
#[derive(Debug)]
pub struct TestSuite {
    /// Suite name
    pub name: String,
    /// Test cases
    pub test_cases: Vec<TestCase>,
    /// Setup function
    pub setup_fn: Option<fn() -> Result<(), String>>,
    /// Teardown function
    pub teardown_fn: Option<fn() -> Result<(), String>>,
}

/// Test case
#[derive(Debug)]
pub struct TestCase {
    /// Test name
    pub name: String,
    /// Test function
    pub test_fn: fn() -> Result<(), String>,
    /// Test category
    pub category: TestCategory,
    /// Test priority
    pub priority: TestPriority,
    /// Expected execution time
    pub expected_time_ms: u64,
    /// Tags
    pub tags: Vec<String>,
}

/// Test category
#[derive(Debug, Clone, PartialEq)]
pub enum TestCategory {
    Unit,
    Integration,
    Performance,
    Security,
    Stress,
    Regression,
}

/// Test priority
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum TestPriority {
    Critical,
    High,
    Medium,
    Low,
}

/// Test framework
pub struct TestFramework {
    /// Configuration
    config: TestFrameworkConfig,
    /// Test suites
    test_suites: Vec<TestSuite>,
    /// Global statistics
    global_stats: TestFrameworkStats,
    /// Test registry
    test_registry: TestRegistry,
}

/// Test framework statistics
#[derive(Debug, Default)]
pub struct TestFrameworkStats {
    /// Total tests run
    pub total_tests_run: AtomicUsize,
    /// Total tests passed
    pub total_tests_passed: AtomicUsize,
    /// Total tests failed
    pub total_tests_failed: AtomicUsize,
    /// Total tests skipped
    pub total_tests_skipped: AtomicUsize,
    /// Total execution time
    pub total_execution_time_ms: AtomicUsize,
}

/// Test registry for managing test discovery and registration
pub struct TestRegistry {
    /// Registered test suites
    suites: Mutex<Vec<TestSuite>>,
    /// Test categories
    categories: Mutex<BTreeMap<String, Vec<String>>>,
    /// Test tags
    tags: Mutex<BTreeMap<String, Vec<String>>>,
}

impl TestRegistry {
    /// Create a new test registry
    pub fn new() -> Self {
        Self {
            suites: Mutex::new(Vec::new()),
            categories: Mutex::new(BTreeMap::new()),
            tags: Mutex::new(BTreeMap::new()),
        }
    }

    /// Register a test suite
    pub fn register_suite(&self, suite: TestSuite) {
        let mut suites = self.suites.lock();
        
        // Update categories
        let mut categories = self.categories.lock();
        for test_case in &suite.test_cases {
            let category_name = format!("{:?}", test_case.category);
            categories.entry(category_name).or_insert_with(Vec::new).push(test_case.name.clone());
        }
        
        // Update tags
        let mut tags = self.tags.lock();
        for test_case in &suite.test_cases {
            for tag in &test_case.tags {
                tags.entry(tag.clone()).or_insert_with(Vec::new).push(test_case.name.clone());
            }
        }
        
        suites.push(suite);
    }

    /// Get all test suites
    pub fn get_suites(&self) -> Vec<TestSuite> {
        self.suites.lock().clone()
    }

    /// Find tests by category
    pub fn find_tests_by_category(&self, category: TestCategory) -> Vec<TestCase> {
        let category_name = format!("{:?}", category);
        let categories = self.categories.lock();
        
        if let Some(test_names) = categories.get(&category_name) {
            let suites = self.suites.lock();
            let mut result = Vec::new();
            
            for suite in suites.iter() {
                for test_case in &suite.test_cases {
                    if test_names.contains(&test_case.name) {
                        result.push(test_case.clone());
                    }
                }
            }
            
            result
        } else {
            Vec::new()
        }
    }

    /// Find tests by tag
    pub fn find_tests_by_tag(&self, tag: &str) -> Vec<TestCase> {
        let tags = self.tags.lock();
        
        if let Some(test_names) = tags.get(tag) {
            let suites = self.suites.lock();
            let mut result = Vec::new();
            
            for suite in suites.iter() {
                for test_case in &suite.test_cases {
                    if test_names.contains(&test_case.name) {
                        result.push(test_case.clone());
                    }
                }
            }
            
            result
        } else {
            Vec::new()
        }
    }
}

impl TestFramework {
    /// Create a new test framework
    pub fn new(config: TestFrameworkConfig) -> Self {
        Self {
            config,
            test_suites: Vec::new(),
            global_stats: TestFrameworkStats::default(),
            test_registry: TestRegistry::new(),
        }
    }

    /// Register a test suite
    pub fn register_suite(&mut self, suite: TestSuite) {
        self.test_registry.register_suite(suite);
    }

    /// Run all tests
    pub fn run_all_tests(&mut self) -> TestFrameworkReport {
        let suites = self.test_registry.get_suites();
        self.run_test_suites(suites)
    }

    /// Run tests by category
    pub fn run_tests_by_category(&mut self, category: TestCategory) -> TestFrameworkReport {
        let test_cases = self.test_registry.find_tests_by_category(category);
        let suite = TestSuite {
            name: format!("{:?} Tests", category),
            test_cases,
            setup_fn: None,
            teardown_fn: None,
        };
        self.run_test_suites(vec![suite])
    }

    /// Run tests by tag
    pub fn run_tests_by_tag(&mut self, tag: &str) -> TestFrameworkReport {
        let test_cases = self.test_registry.find_tests_by_tag(tag);
        let suite = TestSuite {
            name: format!("Tag '{}' Tests", tag),
            test_cases,
            setup_fn: None,
            teardown_fn: None,
        };
        self.run_test_suites(vec![suite])
    }

    /// Run specific test suites
    fn run_test_suites(&mut self, suites: Vec<TestSuite>) -> TestFrameworkReport {
        let mut report = TestFrameworkReport::new();
        let start_time = crate::subsystems::time::get_ticks();

        for suite in suites {
            let suite_report = self.run_test_suite(suite);
            report.add_suite_report(suite_report);
        }

        let end_time = crate::subsystems::time::get_ticks();
        report.total_execution_time_ms = end_time - start_time;
        report.finalize_report();

        // Print report if verbose
        if self.config.verbose {
            report.print_detailed_report();
        }

        report
    }

    /// Run a single test suite
    fn run_test_suite(&mut self, suite: TestSuite) -> TestSuiteReport {
        let mut suite_report = TestSuiteReport::new(suite.name.clone());
        let start_time = crate::subsystems::time::get_ticks();

        // Run setup function
        if let Some(setup_fn) = suite.setup_fn {
            if let Err(e) = setup_fn() {
                suite_report.add_error(format!("Setup failed: {}", e));
                return suite_report;
            }
        }

        // Run all test cases
        for test_case in suite.test_cases {
            let test_result = self.run_test_case(&test_case);
            suite_report.add_test_result(test_result);
        }

        // Run teardown function
        if let Some(teardown_fn) = suite.teardown_fn {
            if let Err(e) = teardown_fn() {
                suite_report.add_error(format!("Teardown failed: {}", e));
            }
        }

        let end_time = crate::subsystems::time::get_ticks();
        suite_report.execution_time_ms = end_time - start_time;

        suite_report
    }

    /// Run a single test case
    fn run_test_case(&mut self, test_case: &TestCase) -> TestResult {
        let start_time = crate::subsystems::time::get_ticks();
        let start_memory = self.get_memory_usage();
        let mut metrics = TestMetrics::default();

        // Set up test timeout
        let timeout = if test_case.expected_time_ms > 0 {
            test_case.expected_time_ms * 2 // Double the expected time as timeout
        } else {
            self.config.test_timeout_ms
        };

        // Run the test with timeout
        let result = self.run_with_timeout(test_case.test_fn, timeout);

        let end_time = crate::subsystems::time::get_ticks();
        let end_memory = self.get_memory_usage();

        let execution_time_ms = end_time - start_time;
        let memory_usage = end_memory.saturating_sub(start_memory);

        // Update global statistics
        self.global_stats.total_tests_run.fetch_add(1, Ordering::SeqCst);
        self.global_stats.total_execution_time_ms.fetch_add(execution_time_ms as usize, Ordering::SeqCst);

        match result {
            Ok(()) => {
                self.global_stats.total_tests_passed.fetch_add(1, Ordering::SeqCst);
                TestResult {
                    name: test_case.name.clone(),
                    module: String::new(), // Would need to be passed in
                    status: TestStatus::Passed,
                    execution_time_ms,
                    memory_usage_bytes: memory_usage,
                    error_message: None,
                    stack_trace: None,
                    metrics,
                }
            }
            Err(error) => {
                self.global_stats.total_tests_failed.fetch_add(1, Ordering::SeqCst);
                TestResult {
                    name: test_case.name.clone(),
                    module: String::new(),
                    status: TestStatus::Failed,
                    execution_time_ms,
                    memory_usage_bytes: memory_usage,
                    error_message: Some(error),
                    stack_trace: None,
                    metrics,
                }
            }
        }
    }

    /// Run a function with timeout
    fn run_with_timeout(&self, f: fn() -> Result<(), String>, timeout_ms: u64) -> Result<(), String> {
        // In a real implementation, this would use a timer and async execution
        // For now, we'll just call the function directly
        f()
    }

    /// Get current memory usage
    fn get_memory_usage(&self) -> usize {
        // In a real implementation, this would query the memory manager
        // For now, return a placeholder
        0
    }

    /// Get global statistics
    pub fn get_global_stats(&self) -> &TestFrameworkStats {
        &self.global_stats
    }
}

/// Test suite report
#[derive(Debug)]
pub struct TestSuiteReport {
    /// Suite name
    pub name: String,
    /// Test results
    pub test_results: Vec<TestResult>,
    /// Execution time in milliseconds
    pub execution_time_ms: u64,
    /// Errors
    pub errors: Vec<String>,
}

impl TestSuiteReport {
    /// Create a new test suite report
    pub fn new(name: String) -> Self {
        Self {
            name,
            test_results: Vec::new(),
            execution_time_ms: 0,
            errors: Vec::new(),
        }
    }

    /// Add a test result
    pub fn add_test_result(&mut self, result: TestResult) {
        self.test_results.push(result);
    }

    /// Add an error
    pub fn add_error(&mut self, error: String) {
        self.errors.push(error);
    }

    /// Get the number of passed tests
    pub fn passed_count(&self) -> usize {
        self.test_results.iter().filter(|r| r.status == TestStatus::Passed).count()
    }

    /// Get the number of failed tests
    pub fn failed_count(&self) -> usize {
        self.test_results.iter().filter(|r| r.status == TestStatus::Failed).count()
    }

    /// Get the number of skipped tests
    pub fn skipped_count(&self) -> usize {
        self.test_results.iter().filter(|r| r.status == TestStatus::Skipped).count()
    }

    /// Get the success rate
    pub fn success_rate(&self) -> f64 {
        if self.test_results.is_empty() {
            0.0
        } else {
            self.passed_count() as f64 / self.test_results.len() as f64 * 100.0
        }
    }
}

/// Test framework report
#[derive(Debug)]
pub struct TestFrameworkReport {
    /// Suite reports
    pub suite_reports: Vec<TestSuiteReport>,
    /// Total execution time in milliseconds
    pub total_execution_time_ms: u64,
    /// Total tests
    pub total_tests: usize,
    /// Total passed tests
    pub total_passed: usize,
    /// Total failed tests
    pub total_failed: usize,
    /// Total skipped tests
    pub total_skipped: usize,
    /// Overall success rate
    pub success_rate: f64,
}

impl TestFrameworkReport {
    /// Create a new test framework report
    pub fn new() -> Self {
        Self {
            suite_reports: Vec::new(),
            total_execution_time_ms: 0,
            total_tests: 0,
            total_passed: 0,
            total_failed: 0,
            total_skipped: 0,
            success_rate: 0.0,
        }
    }

    /// Add a suite report
    pub fn add_suite_report(&mut self, suite_report: TestSuiteReport) {
        self.total_tests += suite_report.test_results.len();
        self.total_passed += suite_report.passed_count();
        self.total_failed += suite_report.failed_count();
        self.total_skipped += suite_report.skipped_count();
        self.suite_reports.push(suite_report);
    }

    /// Finalize the report
    pub fn finalize_report(&mut self) {
        if self.total_tests > 0 {
            self.success_rate = self.total_passed as f64 / self.total_tests as f64 * 100.0;
        }
    }

    /// Print a detailed report
    pub fn print_detailed_report(&self) {
        crate::println!();
        crate::println!("==== Test Framework Report ====");
        crate::println!("Total execution time: {}ms", self.total_execution_time_ms);
        crate::println!("Total tests: {}", self.total_tests);
        crate::println!("Passed: {} ({:.1}%)", self.total_passed, self.success_rate);
        crate::println!("Failed: {}", self.total_failed);
        crate::println!("Skipped: {}", self.total_skipped);
        crate::println!();

        for suite_report in &self.suite_reports {
            crate::println!("==== Suite: {} ====", suite_report.name);
            crate::println!("Execution time: {}ms", suite_report.execution_time_ms);
            crate::println!("Tests: {} (passed: {}, failed: {}, skipped: {})",
                suite_report.test_results.len(),
                suite_report.passed_count(),
                suite_report.failed_count(),
                suite_report.skipped_count()
            );
            crate::println!("Success rate: {:.1}%", suite_report.success_rate());

            for test_result in &suite_report.test_results {
                let status_str = match test_result.status {
                    TestStatus::Passed => "\x1b[32mPASS\x1b[0m",
                    TestStatus::Failed => "\x1b[31mFAIL\x1b[0m",
                    TestStatus::Skipped => "\x1b[33mSKIP\x1b[0m",
                    TestStatus::Timeout => "\x1b[35mTIME\x1b[0m",
                    TestStatus::Panic => "\x1b[31mPANIC\x1b[0m",
                    TestStatus::Unknown => "\x1b[37mUNKNOWN\x1b[0m",
                };

                crate::println!("  {} {} ({}ms, {} bytes)",
                    status_str,
                    test_result.name,
                    test_result.execution_time_ms,
                    test_result.memory_usage_bytes
                );

                if let Some(ref error) = test_result.error_message {
                    crate::println!("    Error: {}", error);
                }
            }
            crate::println!();
        }
    }
}

/// Global test framework instance
static mut TEST_FRAMEWORK: Option<TestFramework> = None;
static TEST_FRAMEWORK_INIT: spin::Once = spin::Once::new();

/// Initialize the global test framework
pub fn init_test_framework(config: TestFrameworkConfig) {
    TEST_FRAMEWORK_INIT.call_once(|| {
        let framework = TestFramework::new(config);
        unsafe {
            TEST_FRAMEWORK = Some(framework);
        }
    });
}

/// Get the global test framework
pub fn get_test_framework() -> Option<&'static mut TestFramework> {
    unsafe {
        TEST_FRAMEWORK.as_mut()
    }
}

/// Macro to register a test suite
#[macro_export]
macro_rules! register_test_suite {
    ($suite:expr) => {
        if let Some(framework) = $crate::testing::framework::get_test_framework() {
            framework.register_suite($suite);
        }
    };
}

/// Macro to create a test case
#[macro_export]
macro_rules! test_case {
    ($name:expr, $fn:expr) => {
        $crate::testing::framework::TestCase {
            name: $name.to_string(),
            test_fn: $fn,
            category: $crate::testing::framework::TestCategory::Unit,
            priority: $crate::testing::framework::TestPriority::Medium,
            expected_time_ms: 0,
            tags: Vec::new(),
        }
    };
    ($name:expr, $fn:expr, category => $category:expr) => {
        $crate::testing::framework::TestCase {
            name: $name.to_string(),
            test_fn: $fn,
            category: $category,
            priority: $crate::testing::framework::TestPriority::Medium,
            expected_time_ms: 0,
            tags: Vec::new(),
        }
    };
    ($name:expr, $fn:expr, category => $category:expr, priority => $priority:expr) => {
        $crate::testing::framework::TestCase {
            name: $name.to_string(),
            test_fn: $fn,
            category: $category,
            priority: $priority,
            expected_time_ms: 0,
            tags: Vec::new(),
        }
    };
    ($name:expr, $fn:expr, category => $category:expr, priority => $priority:expr, expected_time => $time:expr) => {
        $crate::testing::framework::TestCase {
            name: $name.to_string(),
            test_fn: $fn,
            category: $category,
            priority: $priority,
            expected_time_ms: $time,
            tags: Vec::new(),
        }
    };
    ($name:expr, $fn:expr, category => $category:expr, priority => $priority:expr, expected_time => $time:expr, tags => [$($tag:expr),*]) => {
        $crate::testing::framework::TestCase {
            name: $name.to_string(),
            test_fn: $fn,
            category: $category,
            priority: $priority,
            expected_time_ms: $time,
            tags: vec![$($tag.to_string()),*],
        }
    };
}

/// Macro to create a test suite
#[macro_export]
macro_rules! test_suite {
    ($name:expr, [$($test_case:expr),*]) => {
        $crate::testing::framework::TestSuite {
            name: $name.to_string(),
            test_cases: vec![$($test_case),*],
            setup_fn: None,
            teardown_fn: None,
        }
    };
    ($name:expr, [$($test_case:expr),*], setup => $setup:expr) => {
        $crate::testing::framework::TestSuite {
            name: $name.to_string(),
            test_cases: vec![$($test_case),*],
            setup_fn: Some($setup),
            teardown_fn: None,
        }
    };
    ($name:expr, [$($test_case:expr),*], setup => $setup:expr, teardown => $teardown:expr) => {
        $crate::testing::framework::TestSuite {
            name: $name.to_string(),
            test_cases: vec![$($test_case),*],
            setup_fn: Some($setup),
            teardown_fn: Some($teardown),
        }
    };
}