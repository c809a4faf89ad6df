//! Integration tests for entities_utilities
//!
//! Exercises BigNumber through its public API only.

use entities_utilities::BigNumber;

#[test]
fn test_ordering_across_magnitudes() {
    let small = BigNumber::from_i64(-1);
    let large: BigNumber = "340282366920938463463374607431768211456".parse().unwrap();
    assert!(small < BigNumber::zero());
    assert!(large > BigNumber::from_u64(u64::MAX));
}

#[test]
fn test_conversions_agree() {
    assert_eq!(BigNumber::from(42i32), BigNumber::from_i64(42));
    assert_eq!(BigNumber::from(42u64), BigNumber::from_i64(42));
    assert_eq!(BigNumber::from(42i128), BigNumber::from_i64(42));
}
