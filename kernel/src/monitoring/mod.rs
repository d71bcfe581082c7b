//! Production monitoring system
//!
//! Provides system monitoring and metrics collection for production environments.

pub mod metrics;
pub mod health;
pub mod alerting;
pub mod timeline;
