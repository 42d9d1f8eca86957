//! Typed identifier for products.
//!
//! Identifiers are assigned by the persistence engine, so there is no way to
//! generate one here; they are only parsed or wrapped.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Unique identifier for a [`Product`](crate::product::Product).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(i64);

impl ProductId {
    /// Wrap an identifier issued by storage.
    #[must_use]
    pub fn new(value: i64) -> Self {
        Self(value)
    }

    /// Access the inner integer.
    #[must_use]
    pub fn as_i64(self) -> i64 {
        self.0
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Accepts exactly an integer literal: an optional sign followed by `0` or a
/// digit run without a leading zero.
impl FromStr for ProductId {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = s.strip_prefix(['+', '-']).unwrap_or(s);
        let well_formed = match digits.as_bytes() {
            [] => false,
            [b'0'] => true,
            [b'0', ..] => false,
            bytes => bytes.iter().all(u8::is_ascii_digit),
        };
        if !well_formed {
            return Err(ValidationError::InvalidId);
        }
        s.parse::<i64>()
            .map(Self)
            .map_err(|_| ValidationError::InvalidId)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_parse_plain_integer() {
        assert_eq!("42".parse::<ProductId>(), Ok(ProductId::new(42)));
        assert_eq!("0".parse::<ProductId>(), Ok(ProductId::new(0)));
    }

    #[test]
    fn should_parse_signed_integer() {
        assert_eq!("-7".parse::<ProductId>(), Ok(ProductId::new(-7)));
        assert_eq!("+7".parse::<ProductId>(), Ok(ProductId::new(7)));
    }

    #[test]
    fn should_reject_non_integer_text() {
        for input in ["not-valid-url", "", "1.5", "12a", " 1", "-", "0x10"] {
            assert_eq!(
                input.parse::<ProductId>(),
                Err(ValidationError::InvalidId),
                "{input:?} should be rejected"
            );
        }
    }

    #[test]
    fn should_reject_leading_zero() {
        assert!("007".parse::<ProductId>().is_err());
    }

    #[test]
    fn should_reject_overflowing_integer() {
        assert!("99999999999999999999".parse::<ProductId>().is_err());
    }

    #[test]
    fn should_serialize_as_bare_integer() {
        let json = serde_json::to_string(&ProductId::new(3)).unwrap();
        assert_eq!(json, "3");
    }
}
