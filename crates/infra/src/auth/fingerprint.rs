//! Public-key fingerprint derivation.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use coldline_domain::{ClientError, Fingerprint, Result};
use rsa::pkcs1::DecodeRsaPrivateKey;
use rsa::pkcs8::{DecodePrivateKey, EncodePublicKey};
use rsa::{RsaPrivateKey, RsaPublicKey};
use sha2::{Digest, Sha256};

/// Parse a private key PEM, accepting either PKCS#8 or PKCS#1 framing —
/// `openssl genrsa` and `openssl genpkey` both show up in the wild.
pub fn parse_private_key(pem: &str) -> Result<RsaPrivateKey> {
    RsaPrivateKey::from_pkcs8_pem(pem)
        .or_else(|_| RsaPrivateKey::from_pkcs1_pem(pem))
        .map_err(|e| ClientError::Config(format!("unparseable private key PEM: {e}")))
}

/// `"SHA256:" || base64(SHA-256(DER(public_key)))`.
///
/// Uses the standard base64 alphabet with padding, not stripped — the
/// Service's own fingerprint format keeps it.
pub fn fingerprint_of(private_key: &RsaPrivateKey) -> Result<Fingerprint> {
    let public_key = RsaPublicKey::from(private_key);
    let der = public_key
        .to_public_key_der()
        .map_err(|e| ClientError::Config(format!("failed to DER-encode public key: {e}")))?;
    let digest = Sha256::digest(der.as_bytes());
    Ok(Fingerprint::new(format!("SHA256:{}", STANDARD.encode(digest))))
}
