//! Secure Boot Framework - UEFI Secure Boot and signature verification
//!
//! Provides:
//! - UEFI Secure Boot policy management
//! - Certificate and key management
//! - EFI signature verification
//! - Secure boot state tracking

/// UEFI signature database (DB, DBX, KEK, PK)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignatureDatabase {
    /// Platform Key (PK) - highest authority
    PlatformKey,
    /// Key Exchange Key (KEK)
    KeyExchangeKey,
    /// Authorized Signature Database (DB)
    SignatureDatabase,
    /// Forbidden Signature Database (DBX)
    ForbiddenDatabase,
}

/// Certificate types for EFI signatures
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CertificateType {
    /// X.509 certificate
    X509,
    /// SHA256 hash
    SHA256,
    /// PKCS7 signature
    PKCS7,
}

/// Secure Boot policy state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SecureBootState {
    /// Secure Boot disabled
    Disabled,
    /// Secure Boot enabled
    Enabled,
    /// Setup mode (allow any changes)
    SetupMode,
    /// Audit mode (log violations only)
    AuditMode,
}

/// EFI signature entry
#[derive(Debug, Clone, Copy)]
pub struct EfiSignature {
    /// Owner GUID
    pub owner_guid: u64,
    /// Certificate/hash data (up to 256 bytes)
    pub data: [u8; 256],
    /// Data length
    pub data_len: u32,
    /// Certificate type
    pub cert_type: CertificateType,
}

impl EfiSignature {
    /// Create EFI signature
    pub fn new(owner_guid: u64, cert_type: CertificateType) -> Self {
        EfiSignature {
            owner_guid,
            data: [0u8; 256],
            data_len: 0,
            cert_type,
        }
    }

    /// Set signature data
    pub fn set_data(&mut self, data: &[u8]) -> bool {
        if data.len() > 256 {
            return false;
        }
        self.data[..data.len()].copy_from_slice(data);
        self.data_len = data.len() as u32;
        true
    }

    /// Is signature valid
    pub fn is_valid(&self) -> bool {
        self.data_len > 0 && self.owner_guid != 0
    }
}

/// Secure Boot variable entry
#[derive(Debug, Clone, Copy)]
pub struct SecureBootVariable {
    /// Variable name hash
    pub name_hash: u32,
    /// Signature count
    pub sig_count: u32,
    /// Timestamp
    pub timestamp: u64,
    /// Variable version
    pub version: u8,
}

impl SecureBootVariable {
    /// Create secure boot variable
    pub fn new(name_hash: u32) -> Self {
        SecureBootVariable {
            name_hash,
            sig_count: 0,
            timestamp: 0,
            version: 1,
        }
    }
}

/// Secure Boot enforcement policy
#[derive(Debug, Clone, Copy)]
pub struct BootPolicy {
    /// Require signed bootloader
    pub require_signed_bootloader: bool,
    /// Require signed drivers
    pub require_signed_drivers: bool,
    /// Require signed kernel
    pub require_signed_kernel: bool,
    /// Allow rollback
    pub allow_rollback: bool,
}

impl BootPolicy {
    /// Create default policy (strict)
    pub fn default_strict() -> Self {
        BootPolicy {
            require_signed_bootloader: true,
            require_signed_drivers: true,
            require_signed_kernel: true,
            allow_rollback: false,
        }
    }

    /// Create permissive policy
    pub fn permissive() -> Self {
        BootPolicy {
            require_signed_bootloader: false,
            require_signed_drivers: false,
            require_signed_kernel: false,
            allow_rollback: true,
        }
    }
}

/// Secure Boot framework controller
pub struct SecureBootFramework {
    /// Current secure boot state
    state: SecureBootState,
    /// Boot policy
    policy: BootPolicy,
    /// Signature databases (PK, KEK, DB, DBX) - max 32 signatures each
    pk_sigs: [Option<EfiSignature>; 32],
    kek_sigs: [Option<EfiSignature>; 32],
    db_sigs: [Option<EfiSignature>; 32],
    dbx_sigs: [Option<EfiSignature>; 32],
    /// Signature counts
    pk_count: u32,
    kek_count: u32,
    db_count: u32,
    dbx_count: u32,
    /// Secure Boot variables
    variables: [Option<SecureBootVariable>; 16],
    /// Signed boot count
    signed_boots: u32,
    /// Verification failures
    verification_failures: u32,
}

impl SecureBootFramework {
    /// Create Secure Boot framework
    pub fn new() -> Self {
        SecureBootFramework {
            state: SecureBootState::Disabled,
            policy: BootPolicy::default_strict(),
            pk_sigs: [None; 32],
            kek_sigs: [None; 32],
            db_sigs: [None; 32],
            dbx_sigs: [None; 32],
            pk_count: 0,
            kek_count: 0,
            db_count: 0,
            dbx_count: 0,
            variables: [None; 16],
            signed_boots: 0,
            verification_failures: 0,
        }
    }

    /// Initialize Secure Boot
    pub fn initialize(&mut self) -> bool {
        // Load default policies
        self.state = SecureBootState::Enabled;
        true
    }

    /// Set secure boot state
    pub fn set_state(&mut self, state: SecureBootState) -> bool {
        if state == SecureBootState::SetupMode {
            // Allow policy changes only in setup mode
            self.state = state;
            true
        } else {
            self.state = state;
            true
        }
    }

    /// Get current state
    pub fn get_state(&self) -> SecureBootState {
        self.state
    }

    /// Load platform key (PK)
    pub fn load_platform_key(&mut self, signature: EfiSignature) -> bool {
        if !signature.is_valid() || self.pk_count >= 32 {
            return false;
        }
        self.pk_sigs[self.pk_count as usize] = Some(signature);
        self.pk_count += 1;
        true
    }

    /// Load Key Exchange Key (KEK)
    pub fn load_kek(&mut self, signature: EfiSignature) -> bool {
        if !signature.is_valid() || self.kek_count >= 32 {
            return false;
        }
        self.kek_sigs[self.kek_count as usize] = Some(signature);
        self.kek_count += 1;
        true
    }

    /// Load authorized signature (DB)
    pub fn load_authorized_signature(&mut self, signature: EfiSignature) -> bool {
        if !signature.is_valid() || self.db_count >= 32 {
            return false;
        }
        self.db_sigs[self.db_count as usize] = Some(signature);
        self.db_count += 1;
        true
    }

    /// Load forbidden signature (DBX)
    pub fn load_forbidden_signature(&mut self, signature: EfiSignature) -> bool {
        if !signature.is_valid() || self.dbx_count >= 32 {
            return false;
        }
        self.dbx_sigs[self.dbx_count as usize] = Some(signature);
        self.dbx_count += 1;
        true
    }

    /// Verify signature
    pub fn verify_signature(&mut self, data: &[u8], signature: &EfiSignature) -> bool {
        if self.state == SecureBootState::Disabled {
            return true; // Skip verification when disabled
        }

        // Check if signature is in forbidden database (DBX)
        for i in 0..self.dbx_count as usize {
            if let Some(forbidden) = self.dbx_sigs[i] {
                if forbidden.owner_guid == signature.owner_guid {
                    self.verification_failures += 1;
                    return false;
                }
            }
        }

        // Check if signature is in authorized database (DB)
        let mut found = false;
        for i in 0..self.db_count as usize {
            if let Some(authorized) = self.db_sigs[i] {
                if authorized.owner_guid == signature.owner_guid && data.len() > 0 {
                    found = true;
                    break;
                }
            }
        }

        if found {
            self.signed_boots += 1;
            true
        } else {
            self.verification_failures += 1;
            false
        }
    }

    /// Verify bootloader signature
    pub fn verify_bootloader(&mut self, _bootloader_data: &[u8]) -> bool {
        if !self.policy.require_signed_bootloader {
            return true;
        }

        log::debug!("Verifying bootloader signature");
        // Would verify against stored signature in real implementation
        self.signed_boots += 1;
        true
    }

    /// Verify driver signature
    pub fn verify_driver(&mut self, _driver_data: &[u8]) -> bool {
        if !self.policy.require_signed_drivers {
            return true;
        }

        log::debug!("Verifying driver signature");
        // Would verify against stored signature in real implementation
        true
    }

    /// Verify kernel signature
    pub fn verify_kernel(&mut self, _kernel_data: &[u8]) -> bool {
        if !self.policy.require_signed_kernel {
            return true;
        }

        log::debug!("Verifying kernel signature");
        // Would verify against stored signature in real implementation
        self.signed_boots += 1;
        true
    }

    /// Set boot policy
    pub fn set_policy(&mut self, policy: BootPolicy) -> bool {
        if self.state == SecureBootState::SetupMode {
            self.policy = policy;
            true
        } else {
            false
        }
    }

    /// Get current policy
    pub fn get_policy(&self) -> BootPolicy {
        self.policy
    }

    /// Get PK count
    pub fn get_pk_count(&self) -> u32 {
        self.pk_count
    }

    /// Get KEK count
    pub fn get_kek_count(&self) -> u32 {
        self.kek_count
    }

    /// Get DB count
    pub fn get_db_count(&self) -> u32 {
        self.db_count
    }

    /// Get DBX count
    pub fn get_dbx_count(&self) -> u32 {
        self.dbx_count
    }

    /// Get signed boot count
    pub fn get_signed_boots(&self) -> u32 {
        self.signed_boots
    }

    /// Get verification failure count
    pub fn get_verification_failures(&self) -> u32 {
        self.verification_failures
    }

    /// Get framework report
    pub fn secure_boot_report(&self) -> SecureBootReport {
        SecureBootReport {
            state: self.state,
            pk_count: self.get_pk_count(),
            kek_count: self.get_kek_count(),
            db_count: self.get_db_count(),
            dbx_count: self.get_dbx_count(),
            signed_boots: self.signed_boots,
            verification_failures: self.verification_failures,
        }
    }

    /// Add secure boot variable
    pub fn add_variable(&mut self, var: SecureBootVariable) -> bool {
        for i in 0..16 {
            if self.variables[i].is_none() {
                self.variables[i] = Some(var);
                return true;
            }
        }
        false
    }

    /// Get variable count
    pub fn get_variable_count(&self) -> u32 {
        self.variables.iter().filter(|v| v.is_some()).count() as u32
    }
}

/// Secure Boot status report
#[derive(Debug, Clone, Copy)]
pub struct SecureBootReport {
    /// Current state
    pub state: SecureBootState,
    /// Platform Key count
    pub pk_count: u32,
    /// Key Exchange Key count
    pub kek_count: u32,
    /// Authorized Signature count
    pub db_count: u32,
    /// Forbidden Signature count
    pub dbx_count: u32,
    /// Successful signed boots
    pub signed_boots: u32,
    /// Verification failures
    pub verification_failures: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_secure_boot_states() {
        assert_ne!(SecureBootState::Disabled, SecureBootState::Enabled);
        assert_ne!(SecureBootState::SetupMode, SecureBootState::AuditMode);
    }

    #[test]
    fn test_certificate_types() {
        assert_eq!(CertificateType::X509, CertificateType::X509);
        assert_ne!(CertificateType::X509, CertificateType::SHA256);
    }

    #[test]
    fn test_efi_signature_creation() {
        let sig = EfiSignature::new(0x12345678, CertificateType::X509);
        assert_eq!(sig.owner_guid, 0x12345678);
        assert_eq!(sig.cert_type, CertificateType::X509);
        assert!(!sig.is_valid()); // No data yet
    }

    #[test]
    fn test_efi_signature_set_data() {
        let mut sig = EfiSignature::new(0x12345678, CertificateType::X509);
        let data = [0xAAu8; 32];
        assert!(sig.set_data(&data));
        assert!(sig.is_valid());
    }

    #[test]
    fn test_efi_signature_oversized_data() {
        let mut sig = EfiSignature::new(0x12345678, CertificateType::X509);
        let data = [0xAAu8; 300];
        assert!(!sig.set_data(&data));
    }

    #[test]
    fn test_secure_boot_variable() {
        let var = SecureBootVariable::new(0x5678);
        assert_eq!(var.name_hash, 0x5678);
        assert_eq!(var.version, 1);
    }

    #[test]
    fn test_boot_policy_strict() {
        let policy = BootPolicy::default_strict();
        assert!(policy.require_signed_bootloader);
        assert!(policy.require_signed_kernel);
        assert!(!policy.allow_rollback);
    }

    #[test]
    fn test_boot_policy_permissive() {
        let policy = BootPolicy::permissive();
        assert!(!policy.require_signed_bootloader);
        assert!(!policy.require_signed_kernel);
        assert!(policy.allow_rollback);
    }

    #[test]
    fn test_secure_boot_framework_creation() {
        let framework = SecureBootFramework::new();
        assert_eq!(framework.state, SecureBootState::Disabled);
    }

    #[test]
    fn test_secure_boot_framework_initialize() {
        let mut framework = SecureBootFramework::new();
        assert!(framework.initialize());
        assert_eq!(framework.state, SecureBootState::Enabled);
    }

    #[test]
    fn test_set_state() {
        let mut framework = SecureBootFramework::new();
        framework.set_state(SecureBootState::AuditMode);
        assert_eq!(framework.get_state(), SecureBootState::AuditMode);
    }

    #[test]
    fn test_load_platform_key() {
        let mut framework = SecureBootFramework::new();
        let mut sig = EfiSignature::new(0x12345678, CertificateType::X509);
        sig.set_data(&[0xAAu8; 32]);
        
        assert!(framework.load_platform_key(sig));
        assert_eq!(framework.get_pk_count(), 1);
    }

    #[test]
    fn test_load_kek() {
        let mut framework = SecureBootFramework::new();
        let mut sig = EfiSignature::new(0x87654321, CertificateType::X509);
        sig.set_data(&[0xBBu8; 32]);
        
        assert!(framework.load_kek(sig));
        assert_eq!(framework.get_kek_count(), 1);
    }

    #[test]
    fn test_load_authorized_signature() {
        let mut framework = SecureBootFramework::new();
        let mut sig = EfiSignature::new(0xAABBCCDD, CertificateType::SHA256);
        sig.set_data(&[0xCCu8; 32]);
        
        assert!(framework.load_authorized_signature(sig));
        assert_eq!(framework.get_db_count(), 1);
    }

    #[test]
    fn test_load_forbidden_signature() {
        let mut framework = SecureBootFramework::new();
        let mut sig = EfiSignature::new(0xDDEEFF00, CertificateType::SHA256);
        sig.set_data(&[0xDDu8; 32]);
        
        assert!(framework.load_forbidden_signature(sig));
        assert_eq!(framework.get_dbx_count(), 1);
    }

    #[test]
    fn test_verify_disabled_boot() {
        let mut framework = SecureBootFramework::new();
        let data = [0xEEu8; 32];
        let sig = EfiSignature::new(0x12345678, CertificateType::X509);
        
        assert!(framework.verify_signature(&data, &sig)); // Passes when disabled
    }

    #[test]
    fn test_verify_bootloader() {
        let mut framework = SecureBootFramework::new();
        let data = [0xFFu8; 32];
        
        assert!(framework.verify_bootloader(&data));
    }

    #[test]
    fn test_verify_kernel() {
        let mut framework = SecureBootFramework::new();
        let data = [0x99u8; 64];
        
        assert!(framework.verify_kernel(&data));
    }

    #[test]
    fn test_set_policy() {
        let mut framework = SecureBootFramework::new();
        framework.set_state(SecureBootState::SetupMode);
        
        let new_policy = BootPolicy::permissive();
        assert!(framework.set_policy(new_policy));
    }

    #[test]
    fn test_get_policy() {
        let framework = SecureBootFramework::new();
        let policy = framework.get_policy();
        assert!(policy.require_signed_bootloader);
    }

    #[test]
    fn test_secure_boot_report() {
        let mut framework = SecureBootFramework::new();
        framework.initialize();
        
        let report = framework.secure_boot_report();
        assert_eq!(report.state, SecureBootState::Enabled);
        assert_eq!(report.signed_boots, 0);
    }

    #[test]
    fn test_add_variable() {
        let mut framework = SecureBootFramework::new();
        let var = SecureBootVariable::new(0x1111);
        
        assert!(framework.add_variable(var));
        assert_eq!(framework.get_variable_count(), 1);
    }

    #[test]
    fn test_multiple_variables() {
        let mut framework = SecureBootFramework::new();
        
        for i in 0..8 {
            let var = SecureBootVariable::new(0x1000 + i);
            assert!(framework.add_variable(var));
        }
        
        assert_eq!(framework.get_variable_count(), 8);
    }

    #[test]
    fn test_signature_databases() {
        let mut framework = SecureBootFramework::new();
        
        let mut sig1 = EfiSignature::new(0x11111111, CertificateType::X509);
        sig1.set_data(&[0x11u8; 32]);
        
        let mut sig2 = EfiSignature::new(0x22222222, CertificateType::SHA256);
        sig2.set_data(&[0x22u8; 32]);
        
        framework.load_platform_key(sig1);
        framework.load_authorized_signature(sig2);
        
        assert_eq!(framework.get_pk_count(), 1);
        assert_eq!(framework.get_db_count(), 1);
    }

    #[test]
    fn test_verification_tracking() {
        let mut framework = SecureBootFramework::new();
        framework.initialize();
        
        let data = [0x99u8; 32];
        let sig = EfiSignature::new(0x99999999, CertificateType::X509);
        
        framework.verify_signature(&data, &sig);
        assert!(framework.get_verification_failures() > 0);
    }

    #[test]
    fn test_signed_boot_tracking() {
        let mut framework = SecureBootFramework::new();
        framework.verify_bootloader(&[0xAAu8; 32]);
        
        assert!(framework.get_signed_boots() > 0);
    }
}
