//! Enhanced Test Framework for NOS Kernel
//!
//! This module provides an enhanced testing framework with:
//! - Performance measurement utilities
//! - Parameterized tests
//! - Mock object framework
//! - Test data generators
//! - Enhanced error reporting
//! - Coverage analysis tools

extern crate alloc;

use alloc::string::String;
use alloc::vec::Vec;
use core::sync::atomic::{AtomicUsize, Ordering};
use core::time::Duration;

/// Enhanced test result type with detailed error information
pub type EnhancedTestResult = Result<(), TestError>;

/// Test error with detailed information
#[derive(Debug, Clone)]
pub struct TestError {
    pub message: String,
    pub file: &'static str,
    pub line: u32,
    pub function: &'static str,
    pub cause: Option<String>,
}

impl TestError {
    pub fn new(message: String, file: &'static str, line: u32, function: &'static str) -> Self {
        Self {
            message,
            file,
            line,
            function,
            cause: None,
        }
    }

    pub fn with_cause(mut self, cause: String) -> Self {
        self.cause = Some(cause);
        self
    }
}

impl core::fmt::Display for TestError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}:{} in {}: {}", self.file, self.line, self.function, self.message)?;
        if let Some(ref cause) = self.cause {
            write!(f, "\n  Caused by: {}", cause)?;
        }
        Ok(())
    }
}

/// Enhanced test runner with performance tracking
pub struct EnhancedTestRunner {
    tests: Vec<(&'static str, fn() -> EnhancedTestResult)>,
    performance_stats: Vec<TestPerformanceStats>,
}

/// Performance statistics for a test
#[derive(Debug, Clone)]
pub struct TestPerformanceStats {
    pub name: String,
    pub duration_ns: u64,
    pub memory_used_bytes: usize,
    pub cpu_cycles: u64,
    pub passed: bool,
}

impl EnhancedTestRunner {
    pub fn new() -> Self {
        Self {
            tests: Vec::new(),
            performance_stats: Vec::new(),
        }
    }

    pub fn add_test(&mut self, name: &'static str, test_fn: fn() -> EnhancedTestResult) {
        self.tests.push((name, test_fn));
    }

    pub fn run_all(&mut self) -> TestRunResults {
        let mut passed = 0;
        let mut failed = 0;
        let mut skipped = 0;

        crate::println!();
        crate::println!("==== Running {} Enhanced Tests ====", self.tests.len());
        crate::println!();

        for (name, test_fn) in &self.tests {
            crate::print!("  {}: ", name);
            
            let start_time = crate::subsystems::time::hrtime_nanos();
            let start_memory = self.get_memory_usage();
            let start_cycles = self.get_cpu_cycles();

            match test_fn() {
                Ok(()) => {
                    passed += 1;
                    let duration = crate::subsystems::time::hrtime_nanos() - start_time;
                    let memory_used = self.get_memory_usage().saturating_sub(start_memory);
                    let cycles = self.get_cpu_cycles().saturating_sub(start_cycles);
                    
                    self.performance_stats.push(TestPerformanceStats {
                        name: name.to_string(),
                        duration_ns: duration,
                        memory_used_bytes: memory_used,
                        cpu_cycles: cycles,
                        passed: true,
                    });
                    
                    crate::println!("\x1b[32mPASSED\x1b[0m ({}ms, {}KB)", 
                        duration / 1_000_000, memory_used / 1024);
                }
                Err(error) => {
                    failed += 1;
                    let duration = crate::subsystems::time::hrtime_nanos() - start_time;
                    let memory_used = self.get_memory_usage().saturating_sub(start_memory);
                    let cycles = self.get_cpu_cycles().saturating_sub(start_cycles);
                    
                    self.performance_stats.push(TestPerformanceStats {
                        name: name.to_string(),
                        duration_ns: duration,
                        memory_used_bytes: memory_used,
                        cpu_cycles: cycles,
                        passed: false,
                    });
                    
                    crate::println!("\x1b[31mFAILED\x1b[0m");
                    crate::println!("    Error: {}", error);
                }
            }
        }

        crate::println!();
        crate::println!("==== Enhanced Test Results ====");
        crate::println!("  Passed:  {}", passed);
        crate::println!("  Failed:  {}", failed);
        crate::println!("  Skipped: {}", skipped);
        crate::println!();

        TestRunResults {
            passed,
            failed,
            skipped,
            performance_stats: self.performance_stats.clone(),
        }
    }

    fn get_memory_usage(&self) -> usize {
        // Simplified memory usage calculation
        // In a real implementation, this would query the memory manager
        0
    }

    fn get_cpu_cycles(&self) -> u64 {
        // Simplified CPU cycle count
        // In a real implementation, this would use performance counters
        0
    }

    pub fn print_performance_summary(&self) {
        crate::println!();
        crate::println!("==== Performance Summary ====");
        
        let total_duration: u64 = self.performance_stats.iter().map(|s| s.duration_ns).sum();
        let total_memory: usize = self.performance_stats.iter().map(|s| s.memory_used_bytes).sum();
        let total_cycles: u64 = self.performance_stats.iter().map(|s| s.cpu_cycles).sum();
        
        crate::println!("  Total duration: {}ms", total_duration / 1_000_000);
        crate::println!("  Total memory used: {}KB", total_memory / 1024);
        crate::println!("  Total CPU cycles: {}", total_cycles);
        
        if !self.performance_stats.is_empty() {
            let avg_duration = total_duration / self.performance_stats.len() as u64;
            let avg_memory = total_memory / self.performance_stats.len();
            let avg_cycles = total_cycles / self.performance_stats.len() as u64;
            
            crate::println!("  Average duration: {}ms", avg_duration / 1_000_000);
            crate::println!("  Average memory: {}KB", avg_memory / 1024);
            crate::println!("  Average cycles: {}", avg_cycles);
        }
        
        crate::println!();
    }
}

/// Test run results
pub struct TestRunResults {
    pub passed: usize,
    pub failed: usize,
    pub skipped: usize,
    pub performance_stats: Vec<TestPerformanceStats>,
}

impl TestRunResults {
    pub fn total(&self) -> usize {
        self.passed + self.failed + self.skipped
    }

    pub fn success_rate(&self) -> f64 {
        if self.total() == 0 {
            0.0
        } else {
            self.passed as f64 / self.total() as f64 * 100.0
        }
    }
}

/// Parameterized test framework
pub struct ParameterizedTest<T> {
    name: &'static str,
    test_fn: fn(&T) -> EnhancedTestResult,
    parameters: Vec<T>,
}

impl<T> ParameterizedTest<T> {
    pub fn new(name: &'static str, test_fn: fn(&T) -> EnhancedTestResult) -> Self {
        Self {
            name,
            test_fn,
            parameters: Vec::new(),
        }
    }

    pub fn with_parameters(mut self, parameters: Vec<T>) -> Self {
        self.parameters = parameters;
        self
    }

    pub fn run(&self) -> Vec<(&'static str, EnhancedTestResult)> {
        let mut results = Vec::new();
        
        for (i, param) in self.parameters.iter().enumerate() {
            let test_name = alloc::format!("{} [{}]", self.name, i);
            let result = (self.test_fn)(param);
            results.push((test_name.leak(), result));
        }
        
        results
    }
}

/// Mock object framework
pub struct MockObject<T> {
    name: String,
    expectations: Vec<MockExpectation<T>>,
    call_log: Vec<MockCall<T>>,
}

/// Mock expectation
pub struct MockExpectation<T> {
    method: String,
    args: Vec<String>,
    return_value: Option<T>,
    call_count: usize,
    min_calls: usize,
    max_calls: usize,
}

/// Mock call record
pub struct MockCall<T> {
    method: String,
    args: Vec<String>,
    return_value: Option<T>,
    timestamp: u64,
}

impl<T> MockObject<T> {
    pub fn new(name: String) -> Self {
        Self {
            name,
            expectations: Vec::new(),
            call_log: Vec::new(),
        }
    }

    pub fn expect_call(&mut self, method: String, args: Vec<String>, return_value: Option<T>) {
        self.expectations.push(MockExpectation {
            method,
            args,
            return_value,
            call_count: 0,
            min_calls: 1,
            max_calls: 1,
        });
    }

    pub fn verify(&self) -> EnhancedTestResult {
        for expectation in &self.expectations {
            if expectation.call_count < expectation.min_calls {
                return Err(TestError::new(
                    alloc::format!("Expected at least {} calls to '{}', got {}", 
                        expectation.min_calls, expectation.method, expectation.call_count),
                    file!(),
                    line!(),
                    function!(),
                ));
            }
            
            if expectation.call_count > expectation.max_calls {
                return Err(TestError::new(
                    alloc::format!("Expected at most {} calls to '{}', got {}", 
                        expectation.max_calls, expectation.method, expectation.call_count),
                    file!(),
                    line!(),
                    function!(),
                ));
            }
        }
        Ok(())
    }
}

/// Test data generator
pub struct TestDataGenerator {
    rng_state: u32,
}

impl TestDataGenerator {
    pub fn new(seed: u32) -> Self {
        Self { rng_state: seed }
    }

    pub fn gen_u32(&mut self) -> u32 {
        self.rng_state = self.rng_state.wrapping_mul(1103515245).wrapping_add(12345);
        self.rng_state
    }

    pub fn gen_usize(&mut self) -> usize {
        self.gen_u32() as usize
    }

    pub fn gen_range(&mut self, min: usize, max: usize) -> usize {
        min + (self.gen_usize() % (max - min + 1))
    }

    pub fn gen_bytes(&mut self, len: usize) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(len);
        for _ in 0..len {
            bytes.push((self.gen_u32() % 256) as u8);
        }
        bytes
    }

    pub fn gen_string(&mut self, len: usize) -> String {
        let chars = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";
        let mut string = String::with_capacity(len);
        for _ in 0..len {
            let idx = self.gen_range(0, chars.len() - 1);
            string.push(chars[idx] as char);
        }
        string
    }
}

/// Coverage analysis tools
pub struct CoverageAnalyzer {
    covered_lines: AtomicUsize,
    total_lines: AtomicUsize,
    covered_functions: AtomicUsize,
    total_functions: AtomicUsize,
}

impl CoverageAnalyzer {
    pub fn new() -> Self {
        Self {
            covered_lines: AtomicUsize::new(0),
            total_lines: AtomicUsize::new(0),
            covered_functions: AtomicUsize::new(0),
            total_functions: AtomicUsize::new(0),
        }
    }

    pub fn mark_line_covered(&self) {
        self.covered_lines.fetch_add(1, Ordering::SeqCst);
    }

    pub fn set_total_lines(&self, count: usize) {
        self.total_lines.store(count, Ordering::SeqCst);
    }

    pub fn mark_function_covered(&self) {
        self.covered_functions.fetch_add(1, Ordering::SeqCst);
    }

    pub fn set_total_functions(&self, count: usize) {
        self.total_functions.store(count, Ordering::SeqCst);
    }

    pub fn get_coverage_report(&self) -> CoverageReport {
        let covered_lines = self.covered_lines.load(Ordering::SeqCst);
        let total_lines = self.total_lines.load(Ordering::SeqCst);
        let covered_functions = self.covered_functions.load(Ordering::SeqCst);
        let total_functions = self.total_functions.load(Ordering::SeqCst);

        CoverageReport {
            line_coverage: if total_lines > 0 {
                (covered_lines * 100) / total_lines
            } else {
                0
            },
            function_coverage: if total_functions > 0 {
                (covered_functions * 100) / total_functions
            } else {
                0
            },
            covered_lines,
            total_lines,
            covered_functions,
            total_functions,
        }
    }
}

/// Coverage report
#[derive(Debug, Clone)]
pub struct CoverageReport {
    pub line_coverage: usize,
    pub function_coverage: usize,
    pub covered_lines: usize,
    pub total_lines: usize,
    pub covered_functions: usize,
    pub total_functions: usize,
}

impl CoverageReport {
    pub fn print(&self) {
        crate::println!();
        crate::println!("==== Coverage Report ====");
        crate::println!("  Line coverage:    {}% ({}/{})", 
            self.line_coverage, self.covered_lines, self.total_lines);
        crate::println!("  Function coverage: {}% ({}/{})", 
            self.function_coverage, self.covered_functions, self.total_functions);
        crate::println!();
    }
}

/// Enhanced assertion macros
#[macro_export]
macro_rules! enhanced_test_assert {
    ($cond:expr) => {
        if !$cond {
            return Err($crate::enhanced_tests::TestError::new(
                alloc::format!("Assertion failed: {}", stringify!($cond)),
                file!(),
                line!(),
                function!(),
            ));
        }
    };
    ($cond:expr, $msg:expr) => {
        if !$cond {
            return Err($crate::enhanced_tests::TestError::new(
                alloc::format!("Assertion failed: {} - {}", stringify!($cond), $msg),
                file!(),
                line!(),
                function!(),
            ));
        }
    };
}

#[macro_export]
macro_rules! enhanced_test_assert_eq {
    ($left:expr, $right:expr) => {
        if $left != $right {
            return Err($crate::enhanced_tests::TestError::new(
                alloc::format!(
                    "Assertion failed: {} == {} (left: {:?}, right: {:?})",
                    stringify!($left),
                    stringify!($right),
                    $left,
                    $right
                ),
                file!(),
                line!(),
                function!(),
            ));
        }
    };
    ($left:expr, $right:expr, $msg:expr) => {
        if $left != $right {
            return Err($crate::enhanced_tests::TestError::new(
                alloc::format!(
                    "Assertion failed: {} == {} - {} (left: {:?}, right: {:?})",
                    stringify!($left),
                    stringify!($right),
                    $msg,
                    $left,
                    $right
                ),
                file!(),
                line!(),
                function!(),
            ));
        }
    };
}

#[macro_export]
macro_rules! enhanced_test_assert_ne {
    ($left:expr, $right:expr) => {
        if $left == $right {
            return Err($crate::enhanced_tests::TestError::new(
                alloc::format!(
                    "Assertion failed: {} != {} (left: {:?}, right: {:?})",
                    stringify!($left),
                    stringify!($right),
                    $left,
                    $right
                ),
                file!(),
                line!(),
                function!(),
            ));
        }
    };
}

/// Global enhanced test runner
static mut ENHANCED_TEST_RUNNER: Option<EnhancedTestRunner> = None;

/// Get the global enhanced test runner
pub fn get_enhanced_test_runner() -> &'static mut EnhancedTestRunner {
    unsafe {
        if ENHANCED_TEST_RUNNER.is_none() {
            ENHANCED_TEST_RUNNER = Some(EnhancedTestRunner::new());
        }
        ENHANCED_TEST_RUNNER.as_mut().unwrap()
    }
}

/// Run all enhanced tests
pub fn run_enhanced_tests() -> TestRunResults {
    let runner = get_enhanced_test_runner();
    let results = runner.run_all();
    runner.print_performance_summary();
    results
}

/// Register an enhanced test
#[macro_export]
macro_rules! enhanced_test_case {
    ($name:ident, $body:block) => {
        pub fn $name() -> $crate::enhanced_tests::EnhancedTestResult {
            $body
        }
    };
}