//! Big Number Operations
//!
//! Provides the arbitrary precision integer used for `SMALL_BIG_EXT` and
//! `LARGE_BIG_EXT` terms.
//!
//! This module uses the `malachite` crate for arbitrary-precision arithmetic.
//! Only the operations the codec needs are exposed; anything else can be
//! reached through [`BigNumber::as_integer`].

use malachite::Integer;
use std::fmt;
use std::str::FromStr;

/// Big number representation using malachite's Integer
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BigNumber {
    value: Integer,
}

impl BigNumber {
    /// Create a new big number from i64
    pub fn from_i64(value: i64) -> Self {
        Self {
            value: Integer::from(value),
        }
    }

    /// Create a new big number from u64
    pub fn from_u64(value: u64) -> Self {
        Self {
            value: Integer::from(value),
        }
    }

    /// Create a new big number from i128
    pub fn from_i128(value: i128) -> Self {
        Self {
            value: Integer::from(value),
        }
    }

    /// Wrap an existing malachite Integer
    pub fn from_integer(value: Integer) -> Self {
        Self { value }
    }

    /// Zero
    pub fn zero() -> Self {
        Self::from_i64(0)
    }

    /// Borrow the underlying malachite Integer
    pub fn as_integer(&self) -> &Integer {
        &self.value
    }

    /// Consume and return the underlying malachite Integer
    pub fn into_integer(self) -> Integer {
        self.value
    }

    /// Convert to i64
    ///
    /// Returns None if the value is out of range
    pub fn to_i64(&self) -> Option<i64> {
        i64::try_from(&self.value).ok()
    }

    /// Convert to i32
    ///
    /// Returns None if the value is out of range. Used to decide whether a
    /// value can travel as `INTEGER_EXT`.
    pub fn to_i32(&self) -> Option<i32> {
        i32::try_from(&self.value).ok()
    }

    /// Check if the number is negative
    pub fn is_negative(&self) -> bool {
        self.value < 0
    }

    /// Check if the number is zero
    pub fn is_zero(&self) -> bool {
        self.value == 0
    }

    /// Absolute value
    pub fn abs(&self) -> Self {
        if self.is_negative() {
            Self {
                value: -self.value.clone(),
            }
        } else {
            self.clone()
        }
    }

    /// Negate the number
    pub fn negate(&self) -> Self {
        Self {
            value: -self.value.clone(),
        }
    }
}

impl From<i64> for BigNumber {
    fn from(value: i64) -> Self {
        Self::from_i64(value)
    }
}

impl From<i32> for BigNumber {
    fn from(value: i32) -> Self {
        Self::from_i64(value as i64)
    }
}

impl From<u64> for BigNumber {
    fn from(value: u64) -> Self {
        Self::from_u64(value)
    }
}

impl From<i128> for BigNumber {
    fn from(value: i128) -> Self {
        Self::from_i128(value)
    }
}

impl From<Integer> for BigNumber {
    fn from(value: Integer) -> Self {
        Self::from_integer(value)
    }
}

impl FromStr for BigNumber {
    type Err = ();

    /// Parse a decimal string, with an optional leading `-`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Integer::from_str(s).map(Self::from_integer)
    }
}

impl fmt::Display for BigNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_i64_round_trip() {
        for value in [0i64, 1, -1, i64::MAX, i64::MIN] {
            assert_eq!(BigNumber::from_i64(value).to_i64(), Some(value));
        }
    }

    #[test]
    fn test_to_i64_out_of_range() {
        let big = BigNumber::from_i128(i64::MAX as i128 + 1);
        assert_eq!(big.to_i64(), None);
    }

    #[test]
    fn test_to_i32_boundaries() {
        assert_eq!(BigNumber::from_i64(2_147_483_647).to_i32(), Some(i32::MAX));
        assert_eq!(BigNumber::from_i64(-2_147_483_648).to_i32(), Some(i32::MIN));
        assert_eq!(BigNumber::from_i64(2_147_483_648).to_i32(), None);
        assert_eq!(BigNumber::from_i64(-2_147_483_649).to_i32(), None);
    }

    #[test]
    fn test_sign_helpers() {
        assert!(BigNumber::from_i64(-5).is_negative());
        assert!(!BigNumber::from_i64(5).is_negative());
        assert!(BigNumber::zero().is_zero());
        assert_eq!(BigNumber::from_i64(-5).abs(), BigNumber::from_i64(5));
        assert_eq!(BigNumber::from_i64(7).negate(), BigNumber::from_i64(-7));
    }

    #[test]
    fn test_parse_and_display() {
        let text = "-123456789012345678901234567890";
        let big: BigNumber = text.parse().unwrap();
        assert!(big.is_negative());
        assert_eq!(big.to_string(), text);
        assert!("12x".parse::<BigNumber>().is_err());
    }
}
