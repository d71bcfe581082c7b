// SELinux (Security-Enhanced Linux) Implementation
//
// This module provides SELinux-style mandatory access control (MAC)
// for fine-grained security policy enforcement.

extern crate alloc;

use alloc::collections::BTreeMap;
use alloc::sync::Arc;
use alloc::vec::Vec;
use alloc::string::String;
use alloc::string::ToString;
use alloc::format;
use core::sync::atomic::{AtomicU64, Ordering};
use spin::Mutex;

/// SELinux security context
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelinuxContext {
    /// User identity
    pub user: String,
    /// Role
    pub role: String,
    /// Type
    pub type_: String,
    /// Level (for MLS)
    pub level: Option<String>,
}

impl SelinuxContext {
    /// Create new security context
    pub fn new(user: String, role: String, type_: String) -> Self {
        Self {
            user,
            role,
            type_,
            level: None,
        }
    }

    /// Parse context from string (user:role:type:level)
    pub fn from_str(s: &str) -> Result<Self, &'static str> {
        let parts: Vec<&str> = s.split(':').collect();
        if parts.len() < 3 {
            return Err("Invalid context format");
        }

        let user = parts[0].to_string();
        let role = parts[1].to_string();
        let type_ = parts[2].to_string();
        let level = if parts.len() > 3 {
            Some(parts[3].to_string())
        } else {
            None
        };

        Ok(Self {
            user,
            role,
            type_,
            level,
        })
    }

    /// Convert to string
    pub fn to_string(&self) -> String {
        if let Some(level) = &self.level {
            format!("{}:{}:{}:{}", self.user, self.role, self.type_, level)
        } else {
            format!("{}:{}:{}", self.user, self.role, self.type_)
        }
    }
}

/// SELinux permission
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelinuxPermission {
    /// Permission name
    pub name: String,
    /// Permission class
    pub class: String,
}

/// SELinux policy rule
#[derive(Debug, Clone)]
pub struct SelinuxRule {
    /// Source type
    pub source_type: String,
    /// Target type
    pub target_type: String,
    /// Object class
    pub object_class: String,
    /// Permissions
    pub permissions: Vec<String>,
    /// Rule type
    pub rule_type: SelinuxRuleType,
}

/// SELinux rule types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelinuxRuleType {
    /// Allow rule
    Allow,
    /// Never allow rule
    NeverAllow,
    /// Audit rule
    Audit,
    /// Type transition rule
    TypeTransition,
    /// Type change rule
    TypeChange,
}

/// SELinux statistics
#[derive(Debug, Default, Clone)]
pub struct SelinuxStats {
    pub events_processed: u64,
    /// Total access checks
    pub total_checks: u64,
    /// Access allowed
    pub access_allowed: u64,
    /// Access denied
    pub access_denied: u64,
    /// Access audited
    pub access_audited: u64,
    /// Type transitions
    pub type_transitions: u64,
    /// Type changes
    pub type_changes: u64,
    /// Policy violations
    pub policy_violations: u64,
}

/// SELinux subsystem
pub struct SelinuxSubsystem {
    /// Security contexts by process
    process_contexts: BTreeMap<u64, SelinuxContext>,
    /// File contexts
    file_contexts: BTreeMap<String, SelinuxContext>,
    /// Policy rules
    policy_rules: Vec<SelinuxRule>,
    /// Default context for root
    root_context: SelinuxContext,
    /// Default context for regular users
    user_context: SelinuxContext,
    /// Whether SELinux is enforcing
    enforcing: bool,
    /// Statistics
    stats: Arc<Mutex<SelinuxStats>>,
}

impl SelinuxSubsystem {
    /// Create new SELinux subsystem
    pub fn new() -> Self {
        let root_context = SelinuxContext::new(
            "root".to_string(),
            "system_r".to_string(),
            "unconfined_t".to_string(),
        );

        let user_context = SelinuxContext::new(
            "user_u".to_string(),
            "object_r".to_string(),
            "user_t".to_string(),
        );

        Self {
            process_contexts: BTreeMap::new(),
            file_contexts: BTreeMap::new(),
            policy_rules: Vec::new(),
            root_context,
            user_context,
            enforcing: true,
            stats: Arc::new(Mutex::new(SelinuxStats::default())),
        }
    }

    /// Initialize SELinux for a process
    pub fn init_process(&mut self, pid: u64, uid: u32) -> Result<(), &'static str> {
        let context = if uid == 0 {
            self.root_context.clone()
        } else {
            self.user_context.clone()
        };

        self.process_contexts.insert(pid, context);
        Ok(())
    }

    /// Get process context
    pub fn get_process_context(&self, pid: u64) -> Option<&SelinuxContext> {
        self.process_contexts.get(&pid)
    }

    /// Set process context
    pub fn set_process_context(&mut self, pid: u64, context: SelinuxContext) -> Result<(), &'static str> {
        self.process_contexts.insert(pid, context);
        Ok(())
    }

    /// Get file context
    pub fn get_file_context(&self, path: &str) -> Option<&SelinuxContext> {
        self.file_contexts.get(path)
    }

    /// Set file context
    pub fn set_file_context(&mut self, path: String, context: SelinuxContext) -> Result<(), &'static str> {
        self.file_contexts.insert(path, context);
        Ok(())
    }

    /// Check access permission
    pub fn check_access(
        &self,
        pid: u64,
        target_context: &SelinuxContext,
        object_class: &str,
        permission: &str,
    ) -> bool {
        let source_context = match self.process_contexts.get(&pid) {
            Some(context) => context,
            None => {
                // Default deny
                return false;
            }
        };

        // Update statistics
        {
            let mut stats = self.stats.lock();
            stats.total_checks += 1;
        }

        // Check policy rules
        for rule in &self.policy_rules {
            if self.rule_matches(rule, source_context, target_context, object_class, permission) {
                match rule.rule_type {
                    SelinuxRuleType::Allow => {
                        let mut stats = self.stats.lock();
                        stats.access_allowed += 1;
                        return true;
                    }
                    SelinuxRuleType::NeverAllow => {
                        let mut stats = self.stats.lock();
                        stats.policy_violations += 1;
                        return false;
                    }
                    SelinuxRuleType::Audit => {
                        let mut stats = self.stats.lock();
                        stats.access_audited += 1;
                        // Allow but log
                        return true;
                    }
                    _ => continue,
                }
            }
        }

        // Default deny
        {
            let mut stats = self.stats.lock();
            stats.access_denied += 1;
        }
        false
    }

    /// Check if rule matches
    fn rule_matches(
        &self,
        rule: &SelinuxRule,
        source_context: &SelinuxContext,
        target_context: &SelinuxContext,
        object_class: &str,
        permission: &str,
    ) -> bool {
        // Check source type
        if rule.source_type != source_context.type_ {
            return false;
        }

        // Check target type
        if rule.target_type != target_context.type_ {
            return false;
        }

        // Check object class
        if rule.object_class != object_class {
            return false;
        }

        // Check permission
        rule.permissions.iter().any(|p| p == permission)
    }

    /// Add policy rule
    pub fn add_policy_rule(&mut self, rule: SelinuxRule) -> Result<(), &'static str> {
        self.policy_rules.push(rule);
        Ok(())
    }

    /// Check if enforcing
    pub fn is_enforcing(&self) -> bool {
        self.enforcing
    }

    /// Set enforcing mode
    pub fn set_enforcing(&mut self, enforcing: bool) {
        self.enforcing = enforcing;
    }

    /// Perform type transition
    pub fn type_transition(
        &mut self,
        pid: u64,
        target_context: &SelinuxContext,
        object_class: &str,
    ) -> Option<SelinuxContext> {
        let source_context = self.process_contexts.get(&pid)?;

        // Check for type transition rules
        for rule in &self.policy_rules {
            if rule.rule_type == SelinuxRuleType::TypeTransition &&
               rule.source_type == source_context.type_ &&
               rule.target_type == target_context.type_ &&
               rule.object_class == object_class {

                let mut stats = self.stats.lock();
                stats.type_transitions += 1;

                // Return new context with transitioned type
                return Some(SelinuxContext {
                    user: source_context.user.clone(),
                    role: source_context.role.clone(),
                    type_: rule.permissions.get(0)?.clone(),
                    level: source_context.level.clone(),
                });
            }
        }

        None
    }

    /// Cleanup process context
    pub fn cleanup_process(&mut self, pid: u64) {
        self.process_contexts.remove(&pid);
    }

    /// Get statistics
    pub fn get_stats(&self) -> SelinuxStats {
        self.stats.lock().clone()
    }

    /// Reset statistics
    pub fn reset_stats(&self) {
        *self.stats.lock() = SelinuxStats::default();
    }

    /// List policy rules
    pub fn list_rules(&self) -> &[SelinuxRule] {
        &self.policy_rules
    }
}

/// High-level SELinux interface functions

/// Initialize SELinux for process
/// Initialize SELinux subsystem
pub fn initialize_selinux() -> Result<(), i32> {
    *crate::security::SELINUX.lock() = Some(SelinuxSubsystem::new());
    Ok(())
}

/// Cleanup SELinux subsystem
pub fn cleanup_selinux() {
    // Placeholder: In a real implementation, this would clean up SELinux resources
}

pub fn init_process_selinux(pid: u64, uid: u32) -> Result<(), &'static str> {
    let mut guard = crate::security::SELINUX.lock();
    if let Some(ref mut s) = *guard {
        s.init_process(pid, uid)
    } else {
        Ok(())
    }
}

/// Get process SELinux context
pub fn get_process_selinux_context(pid: u64) -> Option<SelinuxContext> {
    let guard = crate::security::SELINUX.lock();
    guard.as_ref().and_then(|s| s.get_process_context(pid).cloned())
}

/// Set process SELinux context
pub fn set_process_selinux_context(pid: u64, context: SelinuxContext) -> Result<(), &'static str> {
    let mut guard = crate::security::SELINUX.lock();
    if let Some(ref mut s) = *guard {
        s.set_process_context(pid, context)
    } else {
        Ok(())
    }
}

/// Check SELinux access
pub fn check_selinux_access(
    pid: u64,
    target_context: &SelinuxContext,
    object_class: &str,
    permission: &str,
) -> bool {
    let guard = crate::security::SELINUX.lock();
    guard.as_ref().map(|s| s.check_access(pid, target_context, object_class, permission)).unwrap_or(false)
}

/// Get file SELinux context
pub fn get_file_selinux_context(path: &str) -> Option<SelinuxContext> {
    let guard = crate::security::SELINUX.lock();
    guard.as_ref().and_then(|s| s.get_file_context(path).cloned())
}

/// Set file SELinux context
pub fn set_file_selinux_context(path: String, context: SelinuxContext) -> Result<(), &'static str> {
    let mut guard = crate::security::SELINUX.lock();
    if let Some(ref mut s) = *guard {
        s.set_file_context(path, context)
    } else {
        Err("SELinux subsystem not initialized")
    }
}

/// Check if SELinux is enforcing
pub fn is_selinux_enforcing() -> bool {
    let guard = crate::security::SELINUX.lock();
    guard.as_ref().map(|s| s.is_enforcing()).unwrap_or(false)
}

/// Set SELinux enforcing mode
pub fn set_selinux_enforcing(enforcing: bool) {
    if let Some(ref mut s) = *crate::security::SELINUX.lock() {
        s.set_enforcing(enforcing);
    }
}

/// Get SELinux statistics
pub fn get_selinux_statistics() -> SelinuxStats {
    let guard = crate::security::SELINUX.lock();
    guard.as_ref().map(|s| s.get_stats()).unwrap_or_default()
}

// Global instance moved to crate::security::SELINUX (Option)

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selinux_context() {
        let context = SelinuxContext::new(
            "root".to_string(),
            "system_r".to_string(),
            "unconfined_t".to_string(),
        );

        assert_eq!(context.user, "root");
        assert_eq!(context.role, "system_r");
        assert_eq!(context.type_, "unconfined_t");
        assert_eq!(context.to_string(), "root:system_r:unconfined_t");
    }

    #[test]
    fn test_selinux_context_from_str() {
        let context = SelinuxContext::from_str("user_u:object_r:user_t:s0").unwrap();
        assert_eq!(context.user, "user_u");
        assert_eq!(context.role, "object_r");
        assert_eq!(context.type_, "user_t");
        assert_eq!(context.level, Some("s0".to_string()));
    }

    #[test]
    fn test_selinux_subsystem() {
        let mut subsystem = SelinuxSubsystem::new();
        assert!(subsystem.is_enforcing());

        subsystem.init_process(1234, 1000).unwrap();
        let context = subsystem.get_process_context(1234).unwrap();
        assert_eq!(context.type_, "user_t");
    }

    #[test]
    fn test_selinux_rule() {
        let rule = SelinuxRule {
            source_type: "user_t".to_string(),
            target_type: "file_t".to_string(),
            object_class: "file".to_string(),
            permissions: vec!["read".to_string(), "write".to_string()],
            rule_type: SelinuxRuleType::Allow,
        };

        assert_eq!(rule.source_type, "user_t");
        assert_eq!(rule.target_type, "file_t");
        assert_eq!(rule.object_class, "file");
        assert_eq!(rule.rule_type, SelinuxRuleType::Allow);
    }
}
