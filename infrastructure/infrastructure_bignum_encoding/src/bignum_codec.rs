//! Bignum Codec Module
//!
//! Converts between `BigNumber` and (sign, magnitude) where the magnitude is
//! base-256 with the least significant byte first:
//! `value = Σ magnitude[i] * 256^i`, negated when the sign byte is nonzero.

use crate::common::{BignumError, LARGE_BIG_EXT, SMALL_BIG_EXT};
use entities_data_handling::OutputBuffer;
use entities_utilities::BigNumber;
use malachite::{Integer, Natural};

/// Magnitudes up to this many bytes are composed directly from a u128
const DIRECT_BYTES: usize = 16;

/// Bignum codec
pub struct BignumCodec;

impl BignumCodec {
    /// Compose a value from its sign and little-endian magnitude
    ///
    /// # Arguments
    /// * `negative` - Whether the sign byte was nonzero
    /// * `magnitude` - Little-endian base-256 digits; empty means zero
    pub fn decode_magnitude(negative: bool, magnitude: &[u8]) -> BigNumber {
        let value = compose(magnitude);
        if negative {
            BigNumber::from_integer(-value)
        } else {
            BigNumber::from_integer(value)
        }
    }

    /// Split a value into its sign and minimal little-endian magnitude
    ///
    /// # Returns
    /// * `(negative, magnitude)` - Zero yields an empty magnitude
    pub fn encode_magnitude(value: &BigNumber) -> (bool, Vec<u8>) {
        let negative = value.is_negative();
        let abs = value.abs().into_integer();
        let mut bytes = Vec::new();
        if let Ok(natural) = Natural::try_from(&abs) {
            for limb in natural.to_limbs_asc() {
                bytes.extend_from_slice(&limb.to_le_bytes());
            }
        }
        while bytes.last() == Some(&0) {
            bytes.pop();
        }
        (negative, bytes)
    }

    /// Write a tagged big integer
    ///
    /// Uses `SMALL_BIG_EXT` when the magnitude is under 256 bytes and
    /// `LARGE_BIG_EXT` otherwise.
    ///
    /// # Arguments
    /// * `value` - The value to encode
    /// * `out` - Buffer to append to
    ///
    /// # Returns
    /// * `Ok(())` - Value written
    /// * `Err(BignumError::ValueTooLarge)` - Magnitude length exceeds `u32::MAX`
    pub fn encode(value: &BigNumber, out: &mut OutputBuffer) -> Result<(), BignumError> {
        let (negative, magnitude) = Self::encode_magnitude(value);
        let len = magnitude.len();
        out.reserve(len + 6);
        if len < 256 {
            out.put_u8(SMALL_BIG_EXT);
            out.put_u8(len as u8);
        } else {
            let len32 = u32::try_from(len).map_err(|_| BignumError::ValueTooLarge(len))?;
            out.put_u8(LARGE_BIG_EXT);
            out.put_u32_be(len32);
        }
        out.put_u8(u8::from(negative));
        out.put_slice(&magnitude);
        Ok(())
    }

    /// Number of bytes [`BignumCodec::encode`] writes for `value`
    pub fn encoded_len(value: &BigNumber) -> usize {
        let len = magnitude_len(value);
        if len < 256 {
            3 + len
        } else {
            6 + len
        }
    }
}

/// Magnitude length in bytes without materializing the digits
fn magnitude_len(value: &BigNumber) -> usize {
    let abs = value.abs().into_integer();
    match Natural::try_from(&abs) {
        Ok(natural) => {
            let limbs = natural.to_limbs_asc();
            match limbs.last() {
                Some(top) => {
                    let limb_bytes = top.to_le_bytes().len();
                    let top_bytes = limb_bytes - (top.leading_zeros() as usize / 8);
                    (limbs.len() - 1) * limb_bytes + top_bytes
                }
                None => 0,
            }
        }
        Err(_) => 0,
    }
}

/// Sum of `bytes[i] * 256^i`, split in halves so large magnitudes stay
/// O(M(n) log n) rather than quadratic
fn compose(bytes: &[u8]) -> Integer {
    if bytes.len() <= DIRECT_BYTES {
        let mut word = [0u8; DIRECT_BYTES];
        word[..bytes.len()].copy_from_slice(bytes);
        return Integer::from(u128::from_le_bytes(word));
    }
    let mid = bytes.len() / 2;
    let low = compose(&bytes[..mid]);
    let high = compose(&bytes[mid..]);
    (high << ((mid as u64) * 8)) + low
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_magnitude_of_300() {
        let (negative, magnitude) = BignumCodec::encode_magnitude(&BigNumber::from_i64(300));
        assert!(!negative);
        assert_eq!(magnitude, vec![44, 1]);
    }

    #[test]
    fn test_negative_magnitude() {
        let (negative, magnitude) = BignumCodec::encode_magnitude(&BigNumber::from_i64(-300));
        assert!(negative);
        assert_eq!(magnitude, vec![44, 1]);
        assert_eq!(
            BignumCodec::decode_magnitude(true, &magnitude),
            BigNumber::from_i64(-300)
        );
    }

    #[test]
    fn test_zero_has_empty_magnitude() {
        let (negative, magnitude) = BignumCodec::encode_magnitude(&BigNumber::zero());
        assert!(!negative);
        assert!(magnitude.is_empty());
        assert_eq!(BignumCodec::decode_magnitude(false, &[]), BigNumber::zero());
    }

    #[test]
    fn test_decode_ignores_high_zero_bytes() {
        assert_eq!(
            BignumCodec::decode_magnitude(false, &[1, 0, 0, 0]),
            BigNumber::from_i64(1)
        );
    }

    #[test]
    fn test_i64_extremes() {
        for value in [i64::MAX, i64::MIN, i64::MIN + 1] {
            let big = BigNumber::from_i64(value);
            let (negative, magnitude) = BignumCodec::encode_magnitude(&big);
            assert_eq!(magnitude.len(), 8);
            assert_eq!(BignumCodec::decode_magnitude(negative, &magnitude), big);
        }
    }

    #[test]
    fn test_compose_beyond_direct_width() {
        // 2^(8*40) has a single 1 at byte index 40
        let mut magnitude = vec![0u8; 41];
        magnitude[40] = 1;
        let value = BignumCodec::decode_magnitude(false, &magnitude);
        let (_, back) = BignumCodec::encode_magnitude(&value);
        assert_eq!(back, magnitude);
    }

    #[test]
    fn test_encode_small_big_layout() {
        let mut out = OutputBuffer::new();
        BignumCodec::encode(&BigNumber::from_i64(2_147_483_648), &mut out).unwrap();
        assert_eq!(out.as_slice(), &[SMALL_BIG_EXT, 4, 0, 0, 0, 0, 128]);
    }

    #[test]
    fn test_encode_large_big_layout() {
        let mut magnitude = vec![0u8; 256];
        magnitude[255] = 1;
        let value = BignumCodec::decode_magnitude(true, &magnitude);
        let mut out = OutputBuffer::new();
        BignumCodec::encode(&value, &mut out).unwrap();
        let bytes = out.into_vec();
        assert_eq!(&bytes[..6], &[LARGE_BIG_EXT, 0, 0, 1, 0, 1]);
        assert_eq!(bytes.len(), 6 + 256);
        assert_eq!(BignumCodec::encoded_len(&value), bytes.len());
    }

    #[test]
    fn test_encoded_len_matches() {
        for value in [1i64 << 31, -(1i64 << 40), i64::MAX] {
            let big = BigNumber::from_i64(value);
            let mut out = OutputBuffer::new();
            BignumCodec::encode(&big, &mut out).unwrap();
            assert_eq!(BignumCodec::encoded_len(&big), out.len());
        }
    }
}
