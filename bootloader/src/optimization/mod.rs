//! Optimization - Parallelization, lazy loading, caching, error mitigation (P2, P3, P10)

pub mod boot_parallelization;
pub mod lazy_loading;
pub mod cache_optimization;
pub mod error_mitigation;
pub mod boot_optimization;
pub mod recovery;
