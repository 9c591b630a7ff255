//! # MiMC Sponge over BN254
//!
//! The message hash every signature covers has to be recomputed inside the
//! rollup circuit, where a byte-oriented hash costs tens of thousands of constraints.
//! MiMC with exponent 5 costs three multiplications per round, so the
//! circuit and this module agree on the following construction:
//!
//! ```text
//! E_k(m):  x_0 = m
//!          x_{i+1} = (x_i + k + c_i)^5        for i in 0..MIMC_ROUNDS
//!          E_k(m) = x_n + k
//!
//! absorb:  h' = E_h(m) + h + m                (Miyaguchi–Preneel)
//! ```
//!
//! starting from `h = 0`. This is gnark-crypto's `bn254/fr/mimc`: round
//! constants are iterated Keccak-256 of [`MIMC_SEED`](crate::config::MIMC_SEED),
//! so digests match the proving circuit bit for bit.
//!
//! A [`Mimc`] instance carries the chaining value between absorbs, and
//! [`Mimc::finalize`] consumes it. Hashing two messages means two hashers.

use std::sync::OnceLock;

use ark_bn254::Fr;
use ark_ff::{BigInteger, Field, PrimeField, Zero};

use super::hash::keccak256_array;
use crate::config::{MIMC_ROUNDS, MIMC_SEED, MSG_HASH_LENGTH};

static ROUND_CONSTANTS: OnceLock<Vec<Fr>> = OnceLock::new();

/// The MiMC round constants, computed once per process.
pub fn round_constants() -> &'static [Fr] {
    ROUND_CONSTANTS.get_or_init(|| {
        let mut rnd = keccak256_array(MIMC_SEED);
        (0..MIMC_ROUNDS)
            .map(|_| {
                rnd = keccak256_array(&rnd);
                Fr::from_be_bytes_mod_order(&rnd)
            })
            .collect()
    })
}

/// The keyed MiMC permutation `E_k(m)`.
fn encrypt(key: Fr, message: Fr) -> Fr {
    let mut x = message;
    for c in round_constants() {
        let t = x + key + c;
        let t2 = t.square();
        x = t2.square() * t;
    }
    x + key
}

/// Incremental MiMC hasher over BN254 scalars.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Mimc {
    state: Fr,
}

impl Mimc {
    /// A hasher in the initial (all-zero) state.
    pub fn new() -> Self {
        Self { state: Fr::zero() }
    }

    /// Absorb one field element.
    pub fn update(&mut self, element: Fr) {
        self.state = encrypt(self.state, element) + self.state + element;
    }

    /// Absorb a sequence of field elements in order.
    pub fn update_all(&mut self, elements: &[Fr]) {
        for element in elements {
            self.update(*element);
        }
    }

    /// Return the digest, consuming the hasher.
    pub fn finalize(self) -> Fr {
        self.state
    }
}

/// One-shot MiMC over a slice of elements with a fresh hasher.
pub fn hash_elements(elements: &[Fr]) -> Fr {
    let mut hasher = Mimc::new();
    hasher.update_all(elements);
    hasher.finalize()
}

/// Canonical 32-byte big-endian encoding of a scalar.
pub fn field_to_bytes(element: &Fr) -> [u8; MSG_HASH_LENGTH] {
    let be = element.into_bigint().to_bytes_be();
    let mut out = [0u8; MSG_HASH_LENGTH];
    // BN254 scalars are exactly four limbs; left-pad defensively anyway.
    let offset = MSG_HASH_LENGTH.saturating_sub(be.len());
    out[offset..].copy_from_slice(&be[be.len().saturating_sub(MSG_HASH_LENGTH)..]);
    out
}
