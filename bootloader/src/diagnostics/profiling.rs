//! Performance profiling
//!
//! This module re-exports performance profiling tools including boot
//! optimization analysis. These are optional tools for performance analysis.
pub use crate::performance_profiling::*;
pub use crate::optimization::boot_optimization::*; // Optional boot optimization analysis
