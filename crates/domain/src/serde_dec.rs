//! Big integers travel as decimal strings in snapshot files. Small values
//! written as plain JSON numbers are accepted too.

use serde::{Deserialize, Deserializer, Serializer};

#[derive(Deserialize)]
#[serde(untagged)]
enum Raw {
    Text(String),
    Number(u64),
}

fn invalid<E: serde::de::Error>(what: &str, text: &str, reason: impl std::fmt::Debug) -> E {
    E::custom(format!("invalid {what} {text:?}: {reason:?}"))
}

/// `U256` as a decimal string.
pub mod dec_u256 {
    use super::*;
    use primitive_types::U256;

    pub fn serialize<S: Serializer>(value: &U256, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(value)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<U256, D::Error> {
        match Raw::deserialize(deserializer)? {
            Raw::Text(text) => {
                U256::from_dec_str(text.trim()).map_err(|e| invalid("decimal integer", &text, e))
            }
            Raw::Number(n) => Ok(U256::from(n)),
        }
    }
}

/// `u128` as a decimal string.
pub mod dec_u128 {
    use super::*;

    pub fn serialize<S: Serializer>(value: &u128, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(value)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u128, D::Error> {
        match Raw::deserialize(deserializer)? {
            Raw::Text(text) => text
                .trim()
                .parse::<u128>()
                .map_err(|e| invalid("liquidity", &text, e)),
            Raw::Number(n) => Ok(u128::from(n)),
        }
    }
}
