//! # Key Material
//!
//! Ed25519 keys as they appear in ledger snapshots and transaction payloads.
//!
//! Account public keys are stored hex-encoded in the account table, and
//! signatures travel hex-encoded inside the payload. This module owns the
//! parsing of both, so a malformed key is rejected in exactly one place.
//!
//! ## Security considerations
//!
//! - Private keys are zeroized on drop (thanks, ed25519-dalek).
//! - Key bytes are never logged. `Debug` on a keypair prints only the
//!   public half.
//! - Public keys are checked to decompress to a curve point at parse time,
//!   not at verification time.

use ed25519_dalek::{Signer, SigningKey, VerifyingKey, SECRET_KEY_LENGTH};
use rand::rngs::OsRng;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use crate::config::{PUBLIC_KEY_LENGTH, SIGNATURE_LENGTH};

/// Errors that can occur while decoding key material.
///
/// Intentionally vague about *why* a key is bad; the caller only needs to
/// know that it is.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum KeyError {
    #[error("invalid secret key bytes: wrong length or not hex")]
    InvalidSecretKey,

    #[error("invalid public key: {0}")]
    InvalidPublicKey(&'static str),

    #[error("malformed signature encoding: {0}")]
    MalformedSignature(&'static str),
}

/// An account keypair. Used by wallets and tests to produce signatures the
/// verifier will accept; the verifier itself never holds one.
///
/// Intentionally does NOT implement `Serialize`. Exporting a secret should
/// be a deliberate `secret_key_hex()` call, not a side effect of logging a
/// struct.
///
/// # Examples
///
/// ```
/// use rollup_txverify::crypto::keys::LedgerKeypair;
///
/// let kp = LedgerKeypair::generate();
/// let digest = [7u8; 32];
/// let sig = kp.sign(&digest);
/// assert!(kp.public_key().verify(&digest, &sig));
/// ```
pub struct LedgerKeypair {
    signing_key: SigningKey,
}

/// The public half of an account key. Always a valid curve point.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerPublicKey {
    bytes: [u8; PUBLIC_KEY_LENGTH],
}

/// A 64-byte Ed25519 signature over a message hash.
#[derive(Clone, PartialEq, Eq)]
pub struct LedgerSignature {
    bytes: [u8; SIGNATURE_LENGTH],
}

impl LedgerKeypair {
    /// Generate a fresh keypair from the OS RNG.
    pub fn generate() -> Self {
        Self {
            signing_key: SigningKey::generate(&mut OsRng),
        }
    }

    /// Deterministic keypair from a 32-byte seed. Test fixtures and devnet
    /// tooling only; a weak seed gives a weak key.
    pub fn from_seed(seed: &[u8; SECRET_KEY_LENGTH]) -> Self {
        Self {
            signing_key: SigningKey::from_bytes(seed),
        }
    }

    /// Reconstruct a keypair from a hex-encoded secret key.
    pub fn from_hex(hex_str: &str) -> Result<Self, KeyError> {
        let bytes = hex::decode(hex_str.trim()).map_err(|_| KeyError::InvalidSecretKey)?;
        let seed: [u8; SECRET_KEY_LENGTH] = bytes
            .as_slice()
            .try_into()
            .map_err(|_| KeyError::InvalidSecretKey)?;
        Ok(Self::from_seed(&seed))
    }

    /// The public key associated with this keypair.
    pub fn public_key(&self) -> LedgerPublicKey {
        LedgerPublicKey {
            bytes: self.signing_key.verifying_key().to_bytes(),
        }
    }

    /// Sign a message (in practice, a 32-byte message hash).
    pub fn sign(&self, message: &[u8]) -> LedgerSignature {
        LedgerSignature {
            bytes: self.signing_key.sign(message).to_bytes(),
        }
    }

    /// Export the secret key as hex. Handle with care.
    pub fn secret_key_hex(&self) -> String {
        hex::encode(self.signing_key.to_bytes())
    }
}

impl Clone for LedgerKeypair {
    fn clone(&self) -> Self {
        Self::from_seed(&self.signing_key.to_bytes())
    }
}

impl fmt::Debug for LedgerKeypair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Never print secret key material, not even partially.
        write!(f, "LedgerKeypair(pub={})", self.public_key().to_hex())
    }
}

// ---------------------------------------------------------------------------
// LedgerPublicKey
// ---------------------------------------------------------------------------

impl LedgerPublicKey {
    /// Parse a hex-encoded public key as stored in the account table.
    ///
    /// A leading `0x` is tolerated. The bytes must decompress to a point on
    /// the Ed25519 curve.
    pub fn from_hex(s: &str) -> Result<Self, KeyError> {
        let s = s.trim();
        let s = s.strip_prefix("0x").unwrap_or(s);
        let bytes = hex::decode(s).map_err(|_| KeyError::InvalidPublicKey("not hex"))?;
        Self::try_from_slice(&bytes)
    }

    /// Validate raw bytes as a public key.
    pub fn try_from_slice(slice: &[u8]) -> Result<Self, KeyError> {
        let bytes: [u8; PUBLIC_KEY_LENGTH] = slice
            .try_into()
            .map_err(|_| KeyError::InvalidPublicKey("expected 32 bytes"))?;
        VerifyingKey::from_bytes(&bytes)
            .map_err(|_| KeyError::InvalidPublicKey("not a curve point"))?;
        Ok(Self { bytes })
    }

    /// Get the raw bytes.
    pub fn as_bytes(&self) -> &[u8; PUBLIC_KEY_LENGTH] {
        &self.bytes
    }

    /// Convert to a `VerifyingKey` for direct use with ed25519-dalek.
    pub fn to_verifying_key(&self) -> Result<VerifyingKey, KeyError> {
        VerifyingKey::from_bytes(&self.bytes)
            .map_err(|_| KeyError::InvalidPublicKey("not a curve point"))
    }

    /// Boolean verification shortcut. See
    /// [`verify_digest`](super::signatures::verify_digest) for the variant
    /// that separates encoding failures from bad signatures.
    pub fn verify(&self, message: &[u8], signature: &LedgerSignature) -> bool {
        match self.to_verifying_key() {
            Ok(vk) => vk
                .verify_strict(message, &signature.to_dalek())
                .is_ok(),
            Err(_) => false,
        }
    }

    /// Hex-encoded representation, the form stored in snapshots.
    pub fn to_hex(&self) -> String {
        hex::encode(self.bytes)
    }
}

impl fmt::Display for LedgerPublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl fmt::Debug for LedgerPublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "LedgerPublicKey({})", &self.to_hex()[..16])
    }
}

// ---------------------------------------------------------------------------
// LedgerSignature
// ---------------------------------------------------------------------------

impl LedgerSignature {
    /// Parse a hex-encoded signature as carried in a payload's `sig` field.
    pub fn from_hex(s: &str) -> Result<Self, KeyError> {
        let s = s.trim();
        let s = s.strip_prefix("0x").unwrap_or(s);
        let bytes = hex::decode(s).map_err(|_| KeyError::MalformedSignature("not hex"))?;
        let bytes: [u8; SIGNATURE_LENGTH] = bytes
            .as_slice()
            .try_into()
            .map_err(|_| KeyError::MalformedSignature("expected 64 bytes"))?;
        Ok(Self { bytes })
    }

    /// Get the raw bytes.
    pub fn as_bytes(&self) -> &[u8; SIGNATURE_LENGTH] {
        &self.bytes
    }

    /// Hex-encoded representation.
    pub fn to_hex(&self) -> String {
        hex::encode(self.bytes)
    }

    pub(crate) fn to_dalek(&self) -> ed25519_dalek::Signature {
        ed25519_dalek::Signature::from_bytes(&self.bytes)
    }
}

impl fmt::Display for LedgerSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl fmt::Debug for LedgerSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let hex_str = self.to_hex();
        write!(f, "LedgerSignature({}...{})", &hex_str[..8], &hex_str[120..])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keypair_sign_verify_roundtrip() {
        let kp = LedgerKeypair::generate();
        let sig = kp.sign(b"digest");
        assert!(kp.public_key().verify(b"digest", &sig));
        assert!(!kp.public_key().verify(b"other", &sig));
    }

    #[test]
    fn deterministic_from_seed() {
        let kp1 = LedgerKeypair::from_seed(&[42u8; 32]);
        let kp2 = LedgerKeypair::from_seed(&[42u8; 32]);
        assert_eq!(kp1.public_key(), kp2.public_key());
        assert_eq!(kp1.sign(b"m").as_bytes(), kp2.sign(b"m").as_bytes());
    }

    #[test]
    fn secret_key_hex_roundtrip() {
        let kp = LedgerKeypair::generate();
        let restored = LedgerKeypair::from_hex(&kp.secret_key_hex()).unwrap();
        assert_eq!(kp.public_key(), restored.public_key());
    }

    #[test]
    fn invalid_secret_hex_rejected() {
        assert_eq!(
            LedgerKeypair::from_hex("deadbeef").unwrap_err(),
            KeyError::InvalidSecretKey
        );
        assert!(LedgerKeypair::from_hex("not-hex-at-all").is_err());
    }

    #[test]
    fn public_key_hex_roundtrip_with_prefix() {
        let pk = LedgerKeypair::generate().public_key();
        assert_eq!(LedgerPublicKey::from_hex(&pk.to_hex()).unwrap(), pk);
        assert_eq!(
            LedgerPublicKey::from_hex(&format!("0x{}", pk.to_hex())).unwrap(),
            pk
        );
    }

    #[test]
    fn public_key_rejects_wrong_length() {
        assert!(matches!(
            LedgerPublicKey::from_hex("abcd"),
            Err(KeyError::InvalidPublicKey(_))
        ));
    }

    #[test]
    fn public_key_rejects_non_point() {
        // Roughly half of all y-coordinates have no matching x on the curve.
        let rejected = (0u8..=255).any(|b| {
            let mut bytes = [0u8; 32];
            bytes[0] = b;
            matches!(
                LedgerPublicKey::try_from_slice(&bytes),
                Err(KeyError::InvalidPublicKey("not a curve point"))
            )
        });
        assert!(rejected);
    }

    #[test]
    fn signature_hex_roundtrip() {
        let sig = LedgerKeypair::generate().sign(b"test");
        assert_eq!(LedgerSignature::from_hex(&sig.to_hex()).unwrap(), sig);
    }

    #[test]
    fn signature_rejects_short_encoding() {
        assert!(matches!(
            LedgerSignature::from_hex("00ff"),
            Err(KeyError::MalformedSignature(_))
        ));
    }

    #[test]
    fn debug_does_not_leak_secret() {
        let kp = LedgerKeypair::generate();
        let debug_str = format!("{:?}", kp);
        assert!(debug_str.starts_with("LedgerKeypair(pub="));
        assert!(!debug_str.contains(&kp.secret_key_hex()));
    }
}
