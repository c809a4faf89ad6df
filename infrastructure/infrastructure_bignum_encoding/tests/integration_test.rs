//! Integration tests for infrastructure_bignum_encoding crate
//!
//! Verifies sign/magnitude conversion end to end against known values.

use entities_data_handling::OutputBuffer;
use entities_utilities::BigNumber;
use infrastructure_bignum_encoding::{BignumCodec, SMALL_BIG_EXT};

#[test]
fn test_round_trip_large_decimal() {
    let value: BigNumber = "-98765432109876543210987654321098765432109876543210"
        .parse()
        .unwrap();
    let (negative, magnitude) = BignumCodec::encode_magnitude(&value);
    assert!(negative);
    assert_eq!(BignumCodec::decode_magnitude(negative, &magnitude), value);
}

#[test]
fn test_encode_negative_2_pow_31_plus_one() {
    // -2147483649 needs 4 magnitude bytes: 0x80000001 little-endian
    let mut out = OutputBuffer::new();
    BignumCodec::encode(&BigNumber::from_i64(-2_147_483_649), &mut out).unwrap();
    assert_eq!(out.as_slice(), &[SMALL_BIG_EXT, 4, 1, 1, 0, 0, 128]);
}

#[test]
fn test_every_byte_value_round_trips() {
    let magnitude: Vec<u8> = (1..=255u8).collect();
    let value = BignumCodec::decode_magnitude(false, &magnitude);
    assert_eq!(BignumCodec::encode_magnitude(&value).1, magnitude);
}
