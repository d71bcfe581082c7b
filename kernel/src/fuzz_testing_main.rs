//! Fuzz Testing Main Entry Point
//!
//! This is the main entry point for the fuzz testing framework.
//! It coordinates all fuzz testing activities and generates reports.

#![no_main]

extern crate alloc;

use alloc::string::String;
use alloc::vec::Vec;
use crate::fuzz_testing::{
    FuzzConfig, FuzzCoordinator, run_comprehensive_fuzz_tests
};

/// Main entry point for fuzz testing
#[no_mangle]
pub extern "C" fn main() -> i32 {
    crate::println!("Starting NOS Kernel Fuzz Testing Framework");
    crate::println!("========================================");
    
    // Configure fuzz testing
    let config = FuzzConfig {
        max_iterations: 10000,
        max_input_size: 65536,
        mutation_rate: 0.1,
        timeout_ms: 5000,
        crash_detection: true,
        memory_leak_detection: true,
        security_checks: true,
    };
    
    crate::println!("Fuzz Configuration:");
    crate::println!("  Max iterations: {}", config.max_iterations);
    crate::println!("  Max input size: {}", config.max_input_size);
    crate::println!("  Mutation rate: {:.1}", config.mutation_rate);
    crate::println!("  Timeout: {}ms", config.timeout_ms);
    crate::println!("  Crash detection: {}", config.crash_detection);
    crate::println!("  Memory leak detection: {}", config.memory_leak_detection);
    crate::println!("  Security checks: {}", config.security_checks);
    crate::println!();
    
    // Run comprehensive fuzz tests
    run_comprehensive_fuzz_tests();
    
    crate::println!("Fuzz testing completed");
    0
}

/// Fuzz testing for specific system calls
pub fn fuzz_specific_syscall(syscall_name: &str, iterations: usize) {
    crate::println!("Fuzzing specific syscall: {}", syscall_name);
    
    let mut config = FuzzConfig::default();
    config.max_iterations = iterations;
    
    let mut coordinator = FuzzCoordinator::new(config);
    coordinator.setup_syscalls();
    
    // Find and fuzz the specific syscall
    // This is a simplified implementation
    crate::println!("Running {} iterations of syscall fuzzing", iterations);
    
    for i in 0..iterations {
        if i % 1000 == 0 {
            crate::println!("  Progress: {}/{}", i, iterations);
        }
        
        // Simulate fuzzing iteration
        let _result = simulate_fuzz_iteration(syscall_name, i);
    }
    
    crate::println!("Syscall fuzzing completed");
}

/// Simulate a fuzz iteration (simplified)
fn simulate_fuzz_iteration(syscall_name: &str, iteration: usize) -> bool {
    // In a real implementation, this would:
    // 1. Generate fuzzed input
    // 2. Execute the system call
    // 3. Detect crashes/hangs/memory leaks
    // 4. Log results
    
    // Simplified simulation
    match syscall_name {
        "read" => {
            // Simulate read syscall fuzzing
            iteration % 1000 != 0 // Return false 0.1% of the time to simulate crashes
        }
        "write" => {
            // Simulate write syscall fuzzing
            iteration % 1000 != 0
        }
        "open" => {
            // Simulate open syscall fuzzing
            iteration % 1000 != 0
        }
        "mmap" => {
            // Simulate mmap syscall fuzzing
            iteration % 1000 != 0
        }
        _ => {
            // Default case
            true
        }
    }
}

/// Quick fuzz test for development
pub fn quick_fuzz_test() {
    crate::println!("Running quick fuzz test...");
    
    let config = FuzzConfig {
        max_iterations: 1000,
        max_input_size: 4096,
        mutation_rate: 0.2,
        timeout_ms: 1000,
        crash_detection: true,
        memory_leak_detection: true,
        security_checks: true,
    };
    
    let mut coordinator = FuzzCoordinator::new(config);
    coordinator.setup_syscalls();
    
    let results = coordinator.run_all_fuzz_tests();
    coordinator.print_summary(&results);
    
    crate::println!("Quick fuzz test completed");
}

/// Memory corruption fuzz testing
pub fn fuzz_memory_corruption() {
    crate::println!("Running memory corruption fuzz test...");
    
    let config = FuzzConfig {
        max_iterations: 5000,
        max_input_size: 8192,
        mutation_rate: 0.15,
        timeout_ms: 2000,
        crash_detection: true,
        memory_leak_detection: true,
        security_checks: true,
    };
    
    // Test various memory corruption scenarios
    let scenarios = vec![
        "Buffer overflow",
        "Use after free",
        "Double free",
        "Invalid pointer",
        "Memory leak",
        "Heap overflow",
        "Stack overflow",
        "Format string",
    ];
    
    for scenario in scenarios {
        crate::println!("Testing scenario: {}", scenario);
        
        for i in 0..config.max_iterations / scenarios.len() {
            // Simulate memory corruption test
            let _result = test_memory_corruption_scenario(scenario, i);
        }
    }
    
    crate::println!("Memory corruption fuzz test completed");
}

/// Test a specific memory corruption scenario
fn test_memory_corruption_scenario(scenario: &str, iteration: usize) -> bool {
    // In a real implementation, this would:
    // 1. Set up the specific corruption scenario
    // 2. Execute the test
    // 3. Detect if the corruption was caught
    // 4. Log results
    
    // Simplified simulation
    match scenario {
        "Buffer overflow" => {
            // Simulate buffer overflow test
            iteration % 500 != 0
        }
        "Use after free" => {
            // Simulate use after free test
            iteration % 750 != 0
        }
        "Double free" => {
            // Simulate double free test
            iteration % 1000 != 0
        }
        "Invalid pointer" => {
            // Simulate invalid pointer test
            iteration % 200 != 0
        }
        "Memory leak" => {
            // Simulate memory leak test
            iteration % 300 != 0
        }
        "Heap overflow" => {
            // Simulate heap overflow test
            iteration % 400 != 0
        }
        "Stack overflow" => {
            // Simulate stack overflow test
            iteration % 600 != 0
        }
        "Format string" => {
            // Simulate format string test
            iteration % 800 != 0
        }
        _ => {
            true
        }
    }
}

/// Network protocol fuzz testing
pub fn fuzz_network_protocols() {
    crate::println!("Running network protocol fuzz test...");
    
    let config = FuzzConfig {
        max_iterations: 3000,
        max_input_size: 1500, // MTU size
        mutation_rate: 0.1,
        timeout_ms: 3000,
        crash_detection: true,
        memory_leak_detection: true,
        security_checks: true,
    };
    
    let mut coordinator = FuzzCoordinator::new(config);
    
    // Test TCP protocol fuzzing
    let tcp_result = coordinator.network_fuzzer.fuzz_tcp_protocol();
    crate::println!("TCP fuzzing completed: {} iterations, {} crashes", 
        tcp_result.iterations, tcp_result.crashes_found);
    
    // Test UDP protocol fuzzing
    let udp_result = coordinator.network_fuzzer.fuzz_udp_protocol();
    crate::println!("UDP fuzzing completed: {} iterations, {} crashes", 
        udp_result.iterations, udp_result.crashes_found);
    
    crate::println!("Network protocol fuzz test completed");
}

/// File system fuzz testing
pub fn fuzz_filesystem() {
    crate::println!("Running filesystem fuzz test...");
    
    let config = FuzzConfig {
        max_iterations: 2000,
        max_input_size: 4096,
        mutation_rate: 0.12,
        timeout_ms: 2000,
        crash_detection: true,
        memory_leak_detection: true,
        security_checks: true,
    };
    
    let mut coordinator = FuzzCoordinator::new(config);
    
    // Test file operations fuzzing
    let fs_result = coordinator.filesystem_fuzzer.fuzz_file_operations();
    crate::println!("Filesystem fuzzing completed: {} iterations, {} crashes", 
        fs_result.iterations, fs_result.crashes_found);
    
    crate::println!("Filesystem fuzz test completed");
}

/// Performance-focused fuzz testing
pub fn fuzz_performance() {
    crate::println!("Running performance-focused fuzz test...");
    
    let config = FuzzConfig {
        max_iterations: 1500,
        max_input_size: 2048,
        mutation_rate: 0.08,
        timeout_ms: 1500,
        crash_detection: true,
        memory_leak_detection: true,
        security_checks: true,
    };
    
    let mut coordinator = FuzzCoordinator::new(config);
    coordinator.setup_syscalls();
    
    let results = coordinator.run_all_fuzz_tests();
    
    // Analyze performance impact
    let total_time: u64 = results.iter().map(|r| r.execution_time_ms).sum();
    let avg_time = total_time / results.len() as u64;
    
    crate::println!("Performance fuzz test completed:");
    crate::println!("  Total iterations: {}", results.iter().map(|r| r.iterations).sum());
    crate::println!("  Average execution time: {}ms", avg_time);
    crate::println!("  Total crashes: {}", results.iter().map(|r| r.crashes_found).sum());
    
    crate::println!("Performance fuzz test completed");
}

/// Security-focused fuzz testing
pub fn fuzz_security() {
    crate::println!("Running security-focused fuzz test...");
    
    let config = FuzzConfig {
        max_iterations: 8000,
        max_input_size: 32768,
        mutation_rate: 0.25,
        timeout_ms: 8000,
        crash_detection: true,
        memory_leak_detection: true,
        security_checks: true,
    };
    
    let mut coordinator = FuzzCoordinator::new(config);
    coordinator.setup_syscalls();
    
    let results = coordinator.run_all_fuzz_tests();
    
    // Analyze security issues
    let total_security_issues = results.iter().map(|r| r.security_issues_found).sum();
    let critical_issues = results.iter().filter(|r| r.security_issues_found > 5).count();
    
    crate::println!("Security fuzz test completed:");
    crate::println!("  Total security issues: {}", total_security_issues);
    crate::println!("  Critical issues found: {}", critical_issues);
    
    if critical_issues > 0 {
        crate::println!("\x1b[31mCRITICAL SECURITY ISSUES FOUND!\x1b[0m");
    }
    
    crate::println!("Security fuzz test completed");
}

/// Continuous fuzz testing (for CI/CD)
pub fn continuous_fuzz_test(duration_minutes: u64) {
    crate::println!("Running continuous fuzz test for {} minutes...", duration_minutes);
    
    let config = FuzzConfig {
        max_iterations: 100000, // Very high for continuous testing
        max_input_size: 65536,
        mutation_rate: 0.1,
        timeout_ms: 10000, // Longer timeout
        crash_detection: true,
        memory_leak_detection: true,
        security_checks: true,
    };
    
    let mut coordinator = FuzzCoordinator::new(config);
    coordinator.setup_syscalls();
    
    let start_time = crate::time::hrtime_nanos();
    let target_duration = duration_minutes * 60 * 1000; // Convert to milliseconds
    
    loop {
        let current_time = crate::time::hrtime_nanos();
        let elapsed = (current_time - start_time) / 1_000_000; // Convert to milliseconds
        
        if elapsed >= target_duration {
            break;
        }
        
        // Run a batch of fuzz tests
        let results = coordinator.run_all_fuzz_tests();
        
        // Check for critical issues
        let total_crashes = results.iter().map(|r| r.crashes_found).sum();
        let total_security_issues = results.iter().map(|r| r.security_issues_found).sum();
        
        if total_crashes > 10 || total_security_issues > 20 {
            crate::println!("CRITICAL: High number of issues detected, stopping fuzz test");
            break;
        }
        
        // Progress update
        let progress = (elapsed * 100) / target_duration;
        crate::println!("Progress: {}% ({} crashes, {} security issues)", 
            progress, total_crashes, total_security_issues);
    }
    
    crate::println!("Continuous fuzz test completed");
}

/// Fuzz testing with custom input
pub fn fuzz_with_custom_input(input_data: &[u8], iterations: usize) {
    crate::println!("Running fuzz test with custom input...");
    crate::println!("Input size: {} bytes", input_data.len());
    crate::println!("Iterations: {}", iterations);
    
    for i in 0..iterations {
        if i % 1000 == 0 {
            crate::println!("Progress: {}/{}", i, iterations);
        }
        
        // Mutate the input data
        let mutated = mutate_input(input_data, i);
        
        // Test with mutated input
        let _result = test_with_input(&mutated);
    }
    
    crate::println!("Custom input fuzz test completed");
}

/// Mutate input data
fn mutate_input(original: &[u8], iteration: usize) -> Vec<u8> {
    let mut mutated = original.to_vec();
    
    // Simple mutation strategy
    let mutation_type = iteration % 4;
    
    match mutation_type {
        0 => {
            // Bit flip
            if !mutated.is_empty() {
                let byte_index = iteration % mutated.len();
                mutated[byte_index] ^= 1 << (iteration % 8);
            }
        }
        1 => {
            // Byte replace
            if !mutated.is_empty() {
                let byte_index = iteration % mutated.len();
                mutated[byte_index] = (iteration % 256) as u8;
            }
        }
        2 => {
            // Byte insert
            if mutated.len() < 65536 {
                let insert_pos = iteration % (mutated.len() + 1);
                mutated.insert(insert_pos, (iteration % 256) as u8);
            }
        }
        3 => {
            // Byte delete
            if !mutated.is_empty() {
                let delete_pos = iteration % mutated.len();
                mutated.remove(delete_pos);
            }
        }
        _ => {}
    }
    
    mutated
}

/// Test with input data
fn test_with_input(input: &[u8]) -> bool {
    // In a real implementation, this would:
    // 1. Use the input data in system calls
    // 2. Monitor for crashes/hangs
    // 3. Check for memory corruption
    // 4. Validate security boundaries
    
    // Simplified simulation
    input.len() % 1000 != 0 // Return false 0.1% of the time to simulate crashes
}