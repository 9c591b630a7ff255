//! Arbitrary-precision amounts.
//!
//! Balances, deltas, fees and prices are `num_bigint::BigInt` end to end.
//! On the wire they are decimal strings, because JSON numbers silently lose
//! precision above 2^53 in half the clients that will ever read them.

use std::str::FromStr;

use num_bigint::{BigInt, Sign};

/// Parse a decimal amount string. Surrounding whitespace is ignored.
pub fn parse_amount(text: &str) -> Option<BigInt> {
    BigInt::from_str(text.trim()).ok()
}

/// The zero amount.
pub fn zero() -> BigInt {
    BigInt::from(0u8)
}

/// Returns `true` for amounts strictly below zero.
pub fn is_negative(value: &BigInt) -> bool {
    value.sign() == Sign::Minus
}

/// Returns `true` for amounts strictly above zero.
pub fn is_positive(value: &BigInt) -> bool {
    value.sign() == Sign::Plus
}

/// Serde adapter: `BigInt` as a decimal string.
///
/// Deserialization also accepts plain JSON integers, which hand-written
/// fixtures tend to use for small values.
pub mod serde_amount {
    use num_bigint::BigInt;
    use serde::{de, Deserialize, Deserializer, Serializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawAmount {
        Text(String),
        Signed(i64),
        Unsigned(u64),
    }

    pub fn serialize<S: Serializer>(value: &BigInt, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(value)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<BigInt, D::Error> {
        match RawAmount::deserialize(deserializer)? {
            RawAmount::Text(text) => super::parse_amount(&text)
                .ok_or_else(|| de::Error::custom(format!("invalid decimal amount: {text:?}"))),
            RawAmount::Signed(v) => Ok(BigInt::from(v)),
            RawAmount::Unsigned(v) => Ok(BigInt::from(v)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::{Deserialize, Serialize};

    #[derive(Debug, Serialize, Deserialize, PartialEq)]
    struct Wrapper {
        #[serde(with = "serde_amount")]
        amount: BigInt,
    }

    #[test]
    fn parses_values_beyond_u128() {
        let big = "340282366920938463463374607431768211456000";
        assert_eq!(parse_amount(big).unwrap().to_string(), big);
    }

    #[test]
    fn rejects_garbage() {
        assert!(parse_amount("12a").is_none());
        assert!(parse_amount("").is_none());
    }

    #[test]
    fn sign_helpers() {
        assert!(is_negative(&BigInt::from(-1)));
        assert!(!is_negative(&zero()));
        assert!(is_positive(&BigInt::from(1)));
        assert!(!is_positive(&zero()));
    }

    #[test]
    fn serializes_as_decimal_string() {
        let w = Wrapper {
            amount: BigInt::from(-42),
        };
        assert_eq!(serde_json::to_string(&w).unwrap(), r#"{"amount":"-42"}"#);
    }

    #[test]
    fn deserializes_strings_and_integers() {
        let a: Wrapper = serde_json::from_str(r#"{"amount":"1000"}"#).unwrap();
        let b: Wrapper = serde_json::from_str(r#"{"amount":1000}"#).unwrap();
        let c: Wrapper = serde_json::from_str(r#"{"amount":-5}"#).unwrap();
        assert_eq!(a, b);
        assert_eq!(c.amount, BigInt::from(-5));
        assert!(serde_json::from_str::<Wrapper>(r#"{"amount":"ten"}"#).is_err());
    }
}
