//! Compatibility test module
//!
//! This module contains compatibility tests for NOS components.

pub mod core_tests;

/// Run all compatibility tests
///
/// # Returns
/// * `TestResult` - Compatibility test result
pub fn run_compatibility_tests() -> crate::TestResult {

    
    let result = crate::TestResult::new();
    
    // TODO: Implement compatibility tests
    println!("  No compatibility tests implemented yet");
    
    result
}