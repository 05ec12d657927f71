//! Key fingerprint newtype.

use std::fmt;

/// A stable identifier for the public key half of a keypair, of the form
/// `"SHA256:" || base64(SHA-256(DER(public_key)))`.
///
/// Computing the fingerprint requires a crypto library (see
/// `coldline_infra::auth::fingerprint`); this type just carries the result
/// around so the rest of the client never needs to care how it was derived.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Fingerprint(String);

impl Fingerprint {
    /// Wrap an already-computed fingerprint string.
    ///
    /// Callers outside `coldline-infra` should not normally construct this
    /// directly — use the fingerprint minter, which guarantees the
    /// `"SHA256:"` prefix and encoding.
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// The fingerprint as a plain string, e.g. for embedding in a JWT claim.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
