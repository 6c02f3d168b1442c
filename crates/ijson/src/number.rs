//! Arbitrary-precision JSON number values.
//!
//! JSON numbers that contain neither a decimal point nor an exponent are
//! integers of unbounded width; any other number is a decimal value whose
//! declared precision is preserved verbatim rather than rounded through
//! `f64` (spec.md §4.2, §9). `1` and `1.0` therefore decode to different
//! [`NumberValue`] variants even though they are numerically equal.
use alloc::string::ToString;
use core::fmt;

use bigdecimal::BigDecimal;
use num_bigint::BigInt;

/// A JSON number, preserving the integer/decimal distinction from its
/// source text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NumberValue {
    /// A number with no fractional part or exponent (`0`, `-7`,
    /// `10000000000`).
    Integer(BigInt),
    /// A number with a fractional part and/or exponent (`0.5`, `1.0`,
    /// `1e2`).
    Decimal(BigDecimal),
}

impl NumberValue {
    /// Parses the raw lexeme text of a JSON number (spec.md §4.1 grammar)
    /// into the appropriately-typed value.
    ///
    /// `text` must already have been validated by the lexer as a
    /// syntactically complete JSON number; this function does not
    /// re-validate the grammar, only classifies and converts it.
    pub(crate) fn parse(text: &str) -> Option<Self> {
        if text.contains(['.', 'e', 'E']) {
            text.parse::<BigDecimal>().ok().map(Self::Decimal)
        } else {
            text.parse::<BigInt>().ok().map(Self::Integer)
        }
    }

    /// Returns `true` if this number was lexed without a fractional part or
    /// exponent.
    #[must_use]
    pub fn is_integer(&self) -> bool {
        matches!(self, Self::Integer(_))
    }
}

impl fmt::Display for NumberValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Integer(i) => write!(f, "{i}"),
            Self::Decimal(d) => write!(f, "{d}"),
        }
    }
}

impl From<i64> for NumberValue {
    fn from(v: i64) -> Self {
        Self::Integer(BigInt::from(v))
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for NumberValue {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for NumberValue {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = alloc::string::String::deserialize(deserializer)?;
        Self::parse(&s).ok_or_else(|| serde::de::Error::custom("invalid JSON number"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integer_vs_decimal_classification() {
        assert!(NumberValue::parse("1").unwrap().is_integer());
        assert!(!NumberValue::parse("1.0").unwrap().is_integer());
        assert!(!NumberValue::parse("1E2").unwrap().is_integer());
        assert!(!NumberValue::parse("1e+2").unwrap().is_integer());
        assert!(NumberValue::parse("-7").unwrap().is_integer());
        assert!(NumberValue::parse("10000000000").unwrap().is_integer());
    }

    #[test]
    fn large_integers_are_not_truncated() {
        let n = NumberValue::parse("123456789012345678901234567890").unwrap();
        assert_eq!(n.to_string(), "123456789012345678901234567890");
    }

    #[test]
    fn decimal_preserves_declared_precision() {
        let n = NumberValue::parse("0.50").unwrap();
        assert_eq!(n.to_string(), "0.50");
    }
}
