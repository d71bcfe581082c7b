//! Error diagnostics
//!
//! This module provides error diagnostic tools and analysis.

use spin::Mutex;
use crate::Result;

#[cfg(feature = "alloc")]
use alloc::vec::Vec;
#[cfg(feature = "alloc")]
use alloc::vec;
#[cfg(feature = "alloc")]
use alloc::string::String;
#[cfg(feature = "alloc")]
use alloc::string::ToString;
#[cfg(feature = "alloc")]
use alloc::collections::BTreeMap;

/// Diagnostic analyzer
#[cfg(feature = "alloc")]
#[derive(Default)]
pub struct DiagnosticAnalyzer {
    /// Analysis rules
    rules: Vec<AnalysisRule>,
    /// Analysis statistics
    stats: Mutex<AnalysisStats>,
}

#[cfg(feature = "alloc")]
impl DiagnosticAnalyzer {
    /// Create a new diagnostic analyzer
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an analysis rule
    pub fn add_rule(&mut self, rule: AnalysisRule) {
        self.rules.push(rule);
    }

    /// Analyze an error
    pub fn analyze_error(&self, error_record: &crate::types::ErrorRecord) -> Result<()> {
        // Apply all analysis rules
        for rule in &self.rules {
            if rule.matches(error_record) {
                rule.analyze(error_record)?;
            }
        }
        
        // Update statistics
        let mut stats = self.stats.lock();
        stats.total_analyzed += 1;
        
        Ok(())
    }

    /// Get analysis statistics
    pub fn get_stats(&self) -> AnalysisStats {
        self.stats.lock().clone()
    }

    /// Initialize analyzer
    pub fn init(&mut self) -> Result<()> {
        // Add default analysis rules
        self.add_default_rules();
        Ok(())
    }

    /// Shutdown analyzer
    pub fn shutdown(&mut self) -> Result<()> {
        // TODO: Shutdown analyzer
        Ok(())
    }

    /// Add default analysis rules
    fn add_default_rules(&mut self) {
        // Error frequency analysis
        self.add_rule(AnalysisRule {
            name: "Error Frequency".into(),
            description: "Analyze error frequency patterns".into(),
            condition: AnalysisCondition::Frequency {
                threshold: 5,
                time_window_seconds: 3600, // 1 hour
            },
            action: AnalysisAction::Log {
                level: DiagnosticLevel::Warning,
                message_template: "High error frequency detected: {count} errors in {time_window} seconds".to_string(),
            },
        });
        
        // Error correlation analysis
        self.add_rule(AnalysisRule {
            name: "Error Correlation".into(),
            description: "Analyze error correlation patterns".into(),
            condition: AnalysisCondition::Correlation {
                related_categories: vec![
                    crate::types::ErrorCategory::Memory,
                    crate::types::ErrorCategory::FileSystem,
                ],
                correlation_threshold: 0.8,
            },
            action: AnalysisAction::Log {
                level: DiagnosticLevel::Info,
                message_template: "Error correlation detected between {categories}".into(),
            },
        });
        
        // Error trend analysis
        self.add_rule(AnalysisRule {
            name: "Error Trend".into(),
            description: "Analyze error trend patterns".into(),
            condition: AnalysisCondition::Trend {
                time_window_seconds: 86400, // 24 hours
                trend_threshold: 0.2, // 20% increase
            },
            action: AnalysisAction::Log {
                level: DiagnosticLevel::Warning,
                message_template: "Error trend detected: {trend}% increase in {time_window} seconds".into(),
            },
        });
    }
}

/// Analysis rule
#[cfg(feature = "alloc")]
#[derive(Debug, Clone)]
pub struct AnalysisRule {
    /// Rule name
    pub name: String,
    /// Rule description
    pub description: String,
    /// Rule condition
    pub condition: AnalysisCondition,
    /// Rule action
    pub action: AnalysisAction,
}

/// Analysis condition
#[cfg(feature = "alloc")]
#[derive(Debug, Clone)]
pub enum AnalysisCondition {
    /// Frequency condition
    Frequency {
        /// Error count threshold
        threshold: u32,
        /// Time window in seconds
        time_window_seconds: u64,
    },
    /// Correlation condition
    Correlation {
        /// Related error categories
        related_categories: Vec<crate::types::ErrorCategory>,
        /// Correlation threshold
        correlation_threshold: f64,
    },
    /// Trend condition
    Trend {
        /// Time window in seconds
        time_window_seconds: u64,
        /// Trend threshold
        trend_threshold: f64,
    },
}

/// Analysis action
#[cfg(feature = "alloc")]
#[derive(Debug, Clone)]
pub enum AnalysisAction {
    /// Log action
    Log {
        /// Log level
        level: DiagnosticLevel,
        /// Message template
        message_template: String,
    },
    /// Alert action
    Alert {
        /// Alert level
        level: DiagnosticLevel,
        /// Alert message
        message: String,
        /// Alert recipients
        recipients: Vec<String>,
    },
    /// Corrective action
    Corrective {
        /// Action name
        name: String,
        /// Action description
        description: String,
        /// Action parameters
        parameters: BTreeMap<String, String>,
    },
}

/// Diagnostic level
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub enum DiagnosticLevel {
    /// Informational
    #[default]
    Info = 0,
    /// Warning
    Warning = 1,
    /// Error
    Error = 2,
    /// Critical
    Critical = 3,
}

/// Analysis statistics
#[cfg(feature = "alloc")]
#[derive(Debug, Clone, Default)]
pub struct AnalysisStats {
    /// Total analyzed errors
    pub total_analyzed: u64,
    /// Errors by category
    pub errors_by_category: BTreeMap<crate::types::ErrorCategory, u64>,
    /// Errors by severity
    pub errors_by_severity: BTreeMap<crate::types::ErrorSeverity, u64>,
    /// Analysis rules triggered
    pub rules_triggered: BTreeMap<String, u64>,
    /// Average analysis time (microseconds)
    pub avg_analysis_time: u64,
}

#[cfg(feature = "alloc")]
impl AnalysisRule {
    /// Check if the rule matches the error record
    pub fn matches(&self, error_record: &crate::types::ErrorRecord) -> bool {
        match &self.condition {
            AnalysisCondition::Frequency { threshold: _, time_window_seconds: _ } => {
                // TODO: Implement frequency matching
                false
            },
            AnalysisCondition::Correlation { related_categories, correlation_threshold: _ } => {
                // TODO: Implement correlation matching
                related_categories.contains(&error_record.category)
            },
            AnalysisCondition::Trend { time_window_seconds: _, trend_threshold: _ } => {
                // TODO: Implement trend matching
                false
            },
        }
    }

    /// Analyze the error record
    pub fn analyze(&self, error_record: &crate::types::ErrorRecord) -> Result<()> {
        match &self.action {
            AnalysisAction::Log { level, message_template } => {
                // TODO: Implement log action
                let _ = (level, message_template, error_record);
                Ok(())
            },
            AnalysisAction::Alert { level, message, recipients } => {
                // TODO: Implement alert action
                let _ = (level, message, recipients, error_record);
                Ok(())
            },
            AnalysisAction::Corrective { name, description, parameters } => {
                // TODO: Implement corrective action
                let _ = (name, description, parameters, error_record);
                Ok(())
            },
        }
    }
}

/// Global diagnostic analyzer
#[cfg(feature = "alloc")]
static GLOBAL_ANALYZER: spin::Once<Mutex<DiagnosticAnalyzer>> = spin::Once::new();

/// Initialize the global diagnostic analyzer
#[cfg(feature = "alloc")]
pub fn init_analyzer() -> Result<()> {
    GLOBAL_ANALYZER.call_once(|| {
        Mutex::new(DiagnosticAnalyzer::new())
    });
    
    // Initialize the analyzer
    GLOBAL_ANALYZER.get().unwrap().lock().init()
}

/// Get the global diagnostic analyzer
#[cfg(feature = "alloc")]
pub fn get_analyzer() -> &'static Mutex<DiagnosticAnalyzer> {
    GLOBAL_ANALYZER.get().expect("Diagnostic analyzer not initialized")
}

/// Internal function to get the global diagnostic analyzer
#[cfg(feature = "alloc")]
fn get_analyzer_internal() -> &'static Mutex<DiagnosticAnalyzer> {
    get_analyzer()
}

/// Shutdown the global diagnostic analyzer
#[cfg(feature = "alloc")]
pub fn shutdown_analyzer() -> Result<()> {
    // Note: spin::Once doesn't provide a way to reset, so we just return Ok(())
    // In a real implementation, you might want to provide a different approach
    Ok(())
}

/// Analyze an error
#[cfg(feature = "alloc")]
pub fn analyze_error(error_record: &crate::types::ErrorRecord) -> Result<()> {
    let analyzer = get_analyzer_internal().lock();
    analyzer.analyze_error(error_record)
}

/// Get diagnostic statistics
#[cfg(feature = "alloc")]
pub fn diagnostics_get_stats() -> AnalysisStats {
    get_analyzer_internal().lock().get_stats()
}

#[cfg(all(test, feature = "alloc"))]
mod tests {
    use super::*;

    #[test]
    fn test_diagnostic_analyzer() {
        let mut analyzer = DiagnosticAnalyzer::new();
        
        // Add a test rule
        let rule = AnalysisRule {
            name: "Test Rule".into(),
            description: "Test analysis rule".into(),
            condition: AnalysisCondition::Frequency {
                threshold: 5,
                time_window_seconds: 3600,
            },
            action: AnalysisAction::Log {
                level: DiagnosticLevel::Warning,
                message_template: "Test warning".into(),
            },
        };
        analyzer.add_rule(rule);
        
        // Analyze an error
        let error_record = crate::types::ErrorRecord::default();
        assert!(analyzer.analyze_error(&error_record).is_ok());
        
        // Check statistics
        let stats = analyzer.get_stats();
        assert_eq!(stats.total_analyzed, 1);
    }

    #[test]
    fn test_analysis_stats() {
        let stats = AnalysisStats::default();
        assert_eq!(stats.total_analyzed, 0);
        assert_eq!(stats.avg_analysis_time, 0);
        assert!(stats.errors_by_category.is_empty());
        assert!(stats.errors_by_severity.is_empty());
        assert!(stats.rules_triggered.is_empty());
    }

    #[test]
    fn test_diagnostic_level() {
        assert!(DiagnosticLevel::Info < DiagnosticLevel::Warning);
        assert!(DiagnosticLevel::Warning < DiagnosticLevel::Error);
        assert!(DiagnosticLevel::Error < DiagnosticLevel::Critical);
        
        assert_eq!(DiagnosticLevel::default(), DiagnosticLevel::Info);
    }
}