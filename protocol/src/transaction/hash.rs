//! Message-hash binding.
//!
//! A transaction's message hash is MiMC over a fixed tuple of field
//! elements: the type code first, then the type's payload fields in their
//! canonical order. The signature and any derived values are never part of
//! the tuple. The proving circuit rebuilds the same tuple, so the order in
//! each kind's `canonical_fields` is consensus-critical.
//!
//! Encodings:
//!
//! - indices, ids, nonces and rates: the integer as a field element;
//! - amounts: the big-endian magnitude, reduced mod r (callers have already
//!   bounded amounts to [`MAX_AMOUNT_BITS`], so no reduction happens);
//! - hex blobs (addresses, content hashes): the decoded bytes, big-endian,
//!   which must already be a canonical scalar (strictly below r), so two
//!   distinct blobs never share an element;
//! - free text (names, memos): [`text_to_field`].

use std::fmt;

use ark_bn254::Fr;
use ark_ff::PrimeField;
use num_bigint::BigInt;

use super::error::VerifyError;
use super::payload::TxPayload;
use super::types::{GasFee, TxType};
use crate::config::{MAX_AMOUNT_BITS, MSG_HASH_LENGTH};
use crate::crypto::hash::text_to_field;
use crate::crypto::mimc::{field_to_bytes, Mimc};
use crate::ledger::amount::is_negative;

// ---------------------------------------------------------------------------
// MsgHash
// ---------------------------------------------------------------------------

/// A 32-byte message hash: one BN254 scalar, big-endian.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct MsgHash([u8; MSG_HASH_LENGTH]);

impl MsgHash {
    pub fn from_field(element: &Fr) -> Self {
        Self(field_to_bytes(element))
    }

    pub fn as_bytes(&self) -> &[u8; MSG_HASH_LENGTH] {
        &self.0
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl fmt::Display for MsgHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl fmt::Debug for MsgHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "MsgHash({})", self.to_hex())
    }
}

// ---------------------------------------------------------------------------
// FieldWriter
// ---------------------------------------------------------------------------

/// Builds the canonical field-element tuple for one transaction.
///
/// Infallible writers return `&mut Self` so calls chain; writers that parse
/// their input return `Result<&mut Self, VerifyError>` and chain with `?`.
#[derive(Debug, Clone)]
pub struct FieldWriter {
    tx_type: TxType,
    elements: Vec<Fr>,
}

impl FieldWriter {
    /// A writer whose first element is the type code.
    pub fn new(tx_type: TxType) -> Self {
        Self {
            tx_type,
            elements: vec![Fr::from(u64::from(tx_type.code()))],
        }
    }

    /// An index, id, nonce or rate.
    pub fn index(&mut self, value: u64) -> &mut Self {
        self.elements.push(Fr::from(value));
        self
    }

    /// A non-negative amount no wider than [`MAX_AMOUNT_BITS`].
    pub fn amount(&mut self, field: &str, value: &BigInt) -> Result<&mut Self, VerifyError> {
        check_amount(self.tx_type, field, value)?;
        let (_, magnitude) = value.to_bytes_be();
        self.elements.push(Fr::from_be_bytes_mod_order(&magnitude));
        Ok(self)
    }

    /// A hex blob of exactly `expected_len` bytes.
    pub fn hex(
        &mut self,
        field: &str,
        value: &str,
        expected_len: usize,
    ) -> Result<&mut Self, VerifyError> {
        let element = decode_hex_field(self.tx_type, field, value, expected_len)?;
        self.elements.push(element);
        Ok(self)
    }

    /// Free text.
    pub fn text(&mut self, value: &str) -> &mut Self {
        self.elements.push(text_to_field(value));
        self
    }

    /// The gas block: collector, fee asset, fee amount.
    pub fn gas(&mut self, gas: &GasFee) -> Result<&mut Self, VerifyError> {
        self.index(gas.gas_account_index)
            .index(u64::from(gas.gas_fee_asset_id))
            .amount("gas_fee_asset_amount", &gas.gas_fee_asset_amount)
    }

    pub fn elements(&self) -> &[Fr] {
        &self.elements
    }

    /// Hash the tuple with a fresh MiMC instance.
    pub fn finish(self) -> MsgHash {
        let mut hasher = Mimc::new();
        hasher.update_all(&self.elements);
        MsgHash::from_field(&hasher.finalize())
    }
}

/// Compute the message hash of a payload.
///
/// Pure: the same payload always yields the same hash, and the signature
/// field never influences it.
pub fn compute_msg_hash<P: TxPayload + ?Sized>(payload: &P) -> Result<MsgHash, VerifyError> {
    let mut writer = FieldWriter::new(payload.tx_type());
    payload.canonical_fields(&mut writer)?;
    Ok(writer.finish())
}

// ---------------------------------------------------------------------------
// Field helpers
// ---------------------------------------------------------------------------

/// Reject amounts that are negative or wider than the circuit accepts.
pub(crate) fn check_amount(tx_type: TxType, field: &str, value: &BigInt) -> Result<(), VerifyError> {
    if is_negative(value) {
        return Err(VerifyError::invalid_params(
            tx_type,
            format!("{field} must not be negative, got {value}"),
        ));
    }
    if value.bits() > MAX_AMOUNT_BITS {
        return Err(VerifyError::invalid_params(
            tx_type,
            format!("{field} exceeds {MAX_AMOUNT_BITS} bits"),
        ));
    }
    Ok(())
}

/// Decode a hex field of a fixed byte length into the scalar it is signed
/// as. A `0x` prefix is accepted; values at or above r are not.
pub(crate) fn decode_hex_field(
    tx_type: TxType,
    field: &str,
    value: &str,
    expected_len: usize,
) -> Result<Fr, VerifyError> {
    let stripped = value.strip_prefix("0x").unwrap_or(value);
    let bytes = hex::decode(stripped).map_err(|e| {
        VerifyError::invalid_params(tx_type, format!("{field} is not valid hex: {e}"))
    })?;
    if bytes.len() != expected_len {
        return Err(VerifyError::invalid_params(
            tx_type,
            format!("{field} must be {expected_len} bytes, got {}", bytes.len()),
        ));
    }
    canonical_field(&bytes).ok_or_else(|| {
        VerifyError::invalid_params(
            tx_type,
            format!("{field} is not below the BN254 scalar modulus"),
        )
    })
}

/// Big-endian bytes as a scalar, or `None` if they would wrap mod r.
fn canonical_field(bytes: &[u8]) -> Option<Fr> {
    if bytes.len() > MSG_HASH_LENGTH {
        return None;
    }
    let mut padded = [0u8; MSG_HASH_LENGTH];
    padded[MSG_HASH_LENGTH - bytes.len()..].copy_from_slice(bytes);
    let element = Fr::from_be_bytes_mod_order(bytes);
    (field_to_bytes(&element) == padded).then_some(element)
}

/// Lower-case hex without a `0x` prefix, the form blobs are stored in.
pub(crate) fn normalize_hex(value: &str) -> String {
    value.strip_prefix("0x").unwrap_or(value).to_ascii_lowercase()
}

/// Compare two hex strings ignoring case and an optional `0x` prefix.
pub(crate) fn same_hex(a: &str, b: &str) -> bool {
    let a = a.strip_prefix("0x").unwrap_or(a);
    let b = b.strip_prefix("0x").unwrap_or(b);
    a.eq_ignore_ascii_case(b)
}
