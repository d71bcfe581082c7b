//! Integration test module
//!
//! This module contains integration tests for NOS components.

/// Run all integration tests
///
/// # Returns
/// * `TestResult` - Integration test result
pub fn run_integration_tests() -> crate::TestResult {

    
    let result = crate::TestResult::new();
    
    // TODO: Implement integration tests
    println!("  No integration tests implemented yet");
    
    result
}