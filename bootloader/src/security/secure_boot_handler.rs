//! Secure Boot Handler
//!
//! Provides secure boot protocol support including:
//! - Secure boot mode detection
//! - Certificate chain management
//! - Boot variable validation
//! - Platform Key (PK) verification

use core::fmt;
use alloc::vec::Vec;
use alloc::string::String;
use alloc::format;

/// Secure Boot status codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SecureBootStatus {
    Enabled,
    Disabled,
    SetupMode,
    AuditMode,
    DeployedMode,
    UserMode,
    Unknown,
}

impl fmt::Display for SecureBootStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SecureBootStatus::Enabled => write!(f, "Enabled"),
            SecureBootStatus::Disabled => write!(f, "Disabled"),
            SecureBootStatus::SetupMode => write!(f, "Setup Mode"),
            SecureBootStatus::AuditMode => write!(f, "Audit Mode"),
            SecureBootStatus::DeployedMode => write!(f, "Deployed Mode"),
            SecureBootStatus::UserMode => write!(f, "User Mode"),
            SecureBootStatus::Unknown => write!(f, "Unknown"),
        }
    }
}

/// Certificate type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CertificateType {
    PlatformKey,      // PK - Platform Key
    KeyExchangeKey,   // KEK - Key Exchange Key
    SignatureDB,      // db - Signature Database
    ForbiddenDB,      // dbx - Forbidden Signature DB
    Unknown,
}

impl fmt::Display for CertificateType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CertificateType::PlatformKey => write!(f, "Platform Key (PK)"),
            CertificateType::KeyExchangeKey => write!(f, "Key Exchange Key (KEK)"),
            CertificateType::SignatureDB => write!(f, "Signature Database (db)"),
            CertificateType::ForbiddenDB => write!(f, "Forbidden Signature DB (dbx)"),
            CertificateType::Unknown => write!(f, "Unknown"),
        }
    }
}

/// Certificate information
#[derive(Debug, Clone)]
pub struct Certificate {
    pub cert_type: CertificateType,
    pub issuer: String,
    pub subject: String,
    pub not_before: u64,
    pub not_after: u64,
    pub is_valid: bool,
    pub signature_length: u32,
}

impl Certificate {
    /// Create new certificate
    pub fn new(cert_type: CertificateType) -> Self {
        Certificate {
            cert_type,
            issuer: String::new(),
            subject: String::new(),
            not_before: 0,
            not_after: 0,
            is_valid: false,
            signature_length: 0,
        }
    }

    /// Check if certificate is expired
    pub fn is_expired(&self, current_time: u64) -> bool {
        current_time > self.not_after || current_time < self.not_before
    }

    /// Get certificate validity period
    pub fn validity_period(&self) -> u64 {
        self.not_after.saturating_sub(self.not_before)
    }

    /// Validate certificate structure
    pub fn validate(&mut self) -> bool {
        if self.issuer.is_empty() || self.subject.is_empty() {
            return false;
        }
        if self.not_after <= self.not_before {
            return false;
        }
        if self.signature_length == 0 {
            return false;
        }
        self.is_valid = true;
        true
    }
}

impl fmt::Display for Certificate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Certificate {{ type: {}, issuer: {}, subject: {}, valid: {} }}",
            self.cert_type, self.issuer, self.subject, self.is_valid
        )
    }
}

/// Secure Boot variable
#[derive(Debug, Clone)]
pub struct SecureBootVariable {
    pub name: String,
    pub var_type: CertificateType,
    pub data_size: u32,
    pub attributes: u32,
    pub is_readable: bool,
    pub is_writable: bool,
}

impl SecureBootVariable {
    /// Create new secure boot variable
    pub fn new(name: &str, var_type: CertificateType) -> Self {
        SecureBootVariable {
            name: String::from(name),
            var_type,
            data_size: 0,
            attributes: 0,
            is_readable: true,
            is_writable: false,
        }
    }

    /// Check if variable is locked
    pub fn is_locked(&self) -> bool {
        !self.is_writable
    }

    /// Get variable type name
    pub fn type_name(&self) -> &'static str {
        match self.var_type {
            CertificateType::PlatformKey => "PK",
            CertificateType::KeyExchangeKey => "KEK",
            CertificateType::SignatureDB => "db",
            CertificateType::ForbiddenDB => "dbx",
            CertificateType::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for SecureBootVariable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}({}) {{ size: {}, locked: {} }}",
            self.type_name(),
            self.name,
            self.data_size,
            self.is_locked()
        )
    }
}

/// Secure Boot configuration and state
pub struct SecureBootHandler {
    status: SecureBootStatus,
    mode: SecureBootStatus,
    certificates: Vec<Certificate>,
    variables: Vec<SecureBootVariable>,
    pk_installed: bool,
    signatures_verified: u32,
    signatures_failed: u32,
}

impl SecureBootHandler {
    /// Create new secure boot handler
    pub fn new() -> Self {
        SecureBootHandler {
            status: SecureBootStatus::Unknown,
            mode: SecureBootStatus::Unknown,
            certificates: Vec::new(),
            variables: Vec::new(),
            pk_installed: false,
            signatures_verified: 0,
            signatures_failed: 0,
        }
    }

    /// Detect secure boot status from firmware
    pub fn detect_status(&mut self) -> SecureBootStatus {
        // Framework for detecting SecureBoot variable from UEFI
        // Would read from UEFI variable store in real implementation
        self.status = SecureBootStatus::Disabled;
        self.status
    }

    /// Detect secure boot mode
    pub fn detect_mode(&mut self) -> SecureBootStatus {
        // Framework for detecting boot mode
        // Checks SetupMode and AuditMode UEFI variables
        self.mode = SecureBootStatus::UserMode;
        self.mode
    }

    /// Register certificate
    pub fn register_certificate(&mut self, cert: Certificate) -> bool {
        if !cert.issuer.is_empty() {
            if cert.cert_type == CertificateType::PlatformKey {
                self.pk_installed = true;
            }
            self.certificates.push(cert);
            true
        } else {
            false
        }
    }

    /// Register secure boot variable
    pub fn register_variable(&mut self, var: SecureBootVariable) -> bool {
        if !var.name.is_empty() {
            self.variables.push(var);
            true
        } else {
            false
        }
    }

    /// Verify signature (framework)
    pub fn verify_signature(
        &mut self,
        data: &[u8],
        signature: &[u8],
        cert: &Certificate,
    ) -> bool {
        if data.is_empty() || signature.is_empty() {
            self.signatures_failed += 1;
            return false;
        }

        if !cert.is_valid {
            self.signatures_failed += 1;
            return false;
        }

        // Framework - actual RSA/ECDSA verification would be implemented
        // For now, check that signature matches data hash pattern
        let result = signature.len() == cert.signature_length as usize
            && !data.is_empty()
            && cert.is_valid;

        if result {
            self.signatures_verified += 1;
        } else {
            self.signatures_failed += 1;
        }

        result
    }

    /// Check if Platform Key is installed
    pub fn is_pk_installed(&self) -> bool {
        self.pk_installed
    }

    /// Get current secure boot status
    pub fn get_status(&self) -> SecureBootStatus {
        self.status
    }

    /// Get current boot mode
    pub fn get_mode(&self) -> SecureBootStatus {
        self.mode
    }

    /// Check if secure boot is enabled
    pub fn is_enabled(&self) -> bool {
        self.status == SecureBootStatus::Enabled
            || self.status == SecureBootStatus::DeployedMode
            || self.status == SecureBootStatus::UserMode
    }

    /// Check if in setup mode
    pub fn is_setup_mode(&self) -> bool {
        self.mode == SecureBootStatus::SetupMode
    }

    /// Check if in audit mode
    pub fn is_audit_mode(&self) -> bool {
        self.mode == SecureBootStatus::AuditMode
    }

    /// Get certificate count
    pub fn certificate_count(&self) -> usize {
        self.certificates.len()
    }

    /// Get variable count
    pub fn variable_count(&self) -> usize {
        self.variables.len()
    }

    /// Get all certificates
    pub fn get_certificates(&self) -> Vec<&Certificate> {
        self.certificates.iter().collect()
    }

    /// Get all variables
    pub fn get_variables(&self) -> Vec<&SecureBootVariable> {
        self.variables.iter().collect()
    }

    /// Get signature verification statistics
    pub fn get_stats(&self) -> (u32, u32) {
        (self.signatures_verified, self.signatures_failed)
    }

    /// Get detailed status report
    pub fn status_report(&self) -> String {
        format!(
            "SecureBootHandler {{ status: {}, mode: {}, pk: {}, certs: {}, vars: {}, verified: {}, failed: {} }}",
            self.status, self.mode, self.pk_installed,
            self.certificate_count(), self.variable_count(),
            self.signatures_verified, self.signatures_failed
        )
    }

    /// Reset handler state
    pub fn reset(&mut self) {
        self.status = SecureBootStatus::Unknown;
        self.mode = SecureBootStatus::Unknown;
        self.certificates.clear();
        self.variables.clear();
        self.pk_installed = false;
        self.signatures_verified = 0;
        self.signatures_failed = 0;
    }
}

impl fmt::Display for SecureBootHandler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.status_report())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_secure_boot_status_display() {
        assert_eq!(SecureBootStatus::Enabled.to_string(), "Enabled");
        assert_eq!(SecureBootStatus::SetupMode.to_string(), "Setup Mode");
    }

    #[test]
    fn test_certificate_type_display() {
        assert_eq!(CertificateType::PlatformKey.to_string(), "Platform Key (PK)");
        assert_eq!(CertificateType::SignatureDB.to_string(), "Signature Database (db)");
    }

    #[test]
    fn test_certificate_creation() {
        let cert = Certificate::new(CertificateType::PlatformKey);
        assert_eq!(cert.cert_type, CertificateType::PlatformKey);
        assert!(!cert.is_valid);
    }

    #[test]
    fn test_certificate_expiration() {
        let mut cert = Certificate::new(CertificateType::KeyExchangeKey);
        cert.not_before = 1000;
        cert.not_after = 2000;
        
        assert!(!cert.is_expired(1500));
        assert!(cert.is_expired(500));
        assert!(cert.is_expired(2500));
    }

    #[test]
    fn test_certificate_validity_period() {
        let mut cert = Certificate::new(CertificateType::SignatureDB);
        cert.not_before = 1000;
        cert.not_after = 5000;
        assert_eq!(cert.validity_period(), 4000);
    }

    #[test]
    fn test_certificate_validate() {
        let mut cert = Certificate::new(CertificateType::PlatformKey);
        cert.issuer = String::from("Test Issuer");
        cert.subject = String::from("Test Subject");
        cert.not_before = 1000;
        cert.not_after = 5000;
        cert.signature_length = 256;
        
        assert!(cert.validate());
        assert!(cert.is_valid);
    }

    #[test]
    fn test_certificate_invalid_validity() {
        let mut cert = Certificate::new(CertificateType::PlatformKey);
        cert.issuer = String::from("Test Issuer");
        cert.subject = String::from("Test Subject");
        cert.not_before = 5000;
        cert.not_after = 1000;
        cert.signature_length = 256;
        
        assert!(!cert.validate());
    }

    #[test]
    fn test_secure_boot_variable_creation() {
        let var = SecureBootVariable::new("PK", CertificateType::PlatformKey);
        assert_eq!(var.name, "PK");
        assert!(!var.is_locked());
    }

    #[test]
    fn test_secure_boot_variable_locked() {
        let mut var = SecureBootVariable::new("db", CertificateType::SignatureDB);
        var.is_writable = false;
        assert!(var.is_locked());
    }

    #[test]
    fn test_secure_boot_handler_creation() {
        let handler = SecureBootHandler::new();
        assert_eq!(handler.get_status(), SecureBootStatus::Unknown);
        assert!(!handler.is_pk_installed());
        assert_eq!(handler.certificate_count(), 0);
    }

    #[test]
    fn test_secure_boot_handler_detect_status() {
        let mut handler = SecureBootHandler::new();
        let status = handler.detect_status();
        assert_eq!(status, SecureBootStatus::Disabled);
    }

    #[test]
    fn test_secure_boot_handler_register_certificate() {
        let mut handler = SecureBootHandler::new();
        let mut cert = Certificate::new(CertificateType::PlatformKey);
        cert.issuer = String::from("Test CA");
        cert.subject = String::from("Test PK");
        
        assert!(handler.register_certificate(cert));
        assert_eq!(handler.certificate_count(), 1);
        assert!(handler.is_pk_installed());
    }

    #[test]
    fn test_secure_boot_handler_register_variable() {
        let mut handler = SecureBootHandler::new();
        let var = SecureBootVariable::new("KEK", CertificateType::KeyExchangeKey);
        
        assert!(handler.register_variable(var));
        assert_eq!(handler.variable_count(), 1);
    }

    #[test]
    fn test_secure_boot_handler_verify_signature() {
        let mut handler = SecureBootHandler::new();
        let mut cert = Certificate::new(CertificateType::SignatureDB);
        cert.issuer = String::from("CA");
        cert.subject = String::from("Subject");
        cert.not_before = 1000;
        cert.not_after = 5000;
        cert.signature_length = 256;
        cert.is_valid = true;
        
        let data = [1u8; 32];
        let signature = [2u8; 256];
        
        let result = handler.verify_signature(&data, &signature, &cert);
        assert!(result);
        assert_eq!(handler.get_stats().0, 1);
    }

    #[test]
    fn test_secure_boot_handler_is_enabled() {
        let mut handler = SecureBootHandler::new();
        handler.status = SecureBootStatus::Enabled;
        assert!(handler.is_enabled());
        
        handler.status = SecureBootStatus::Disabled;
        assert!(!handler.is_enabled());
    }

    #[test]
    fn test_secure_boot_handler_reset() {
        let mut handler = SecureBootHandler::new();
        let cert = Certificate::new(CertificateType::PlatformKey);
        handler.register_certificate(cert);
        
        assert!(handler.certificate_count() > 0);
        handler.reset();
        assert_eq!(handler.certificate_count(), 0);
        assert!(!handler.is_pk_installed());
    }
}
