//! Property-based tests for the register map.
//! Encode/decode is total over all 256 byte values; single-pin updates
//! never disturb sibling bits.

use tca953x::pin::Pin;
use tca953x::registers::{
    clear_bit, decode_directions, decode_polarities, encode_directions, encode_polarities,
    set_bit, test_bit, with_bit, PIN_BITS_MASK,
};
use tca953x::{Direction, Polarity};

fn any_direction() -> impl proptest::strategy::Strategy<Value = Direction> {
    proptest::prop_oneof![
        proptest::strategy::Just(Direction::Output),
        proptest::strategy::Just(Direction::Input),
    ]
}

fn any_polarity() -> impl proptest::strategy::Strategy<Value = Polarity> {
    proptest::prop_oneof![
        proptest::strategy::Just(Polarity::Matching),
        proptest::strategy::Just(Polarity::Inverted),
    ]
}

proptest::proptest! {
    /// decode → encode keeps the pin bits and clears the reserved bits.
    #[test]
    fn direction_round_trip_normalises_high_bits(byte in 0u8..=255u8) {
        assert_eq!(encode_directions(decode_directions(byte)), byte & PIN_BITS_MASK);
    }

    #[test]
    fn polarity_round_trip_normalises_high_bits(byte in 0u8..=255u8) {
        assert_eq!(encode_polarities(decode_polarities(byte)), byte & PIN_BITS_MASK);
    }

    /// encode → decode is the identity on pin arrays.
    #[test]
    fn directions_survive_encoding(dirs in proptest::array::uniform4(any_direction())) {
        assert_eq!(decode_directions(encode_directions(dirs)), dirs);
    }

    #[test]
    fn polarities_survive_encoding(pols in proptest::array::uniform4(any_polarity())) {
        assert_eq!(decode_polarities(encode_polarities(pols)), pols);
    }

    /// Encoded bytes never carry reserved bits.
    #[test]
    fn encoded_directions_fit_low_nibble(dirs in proptest::array::uniform4(any_direction())) {
        assert_eq!(encode_directions(dirs) & !PIN_BITS_MASK, 0);
    }

    /// Read-modify-write of one pin leaves every other bit as it was.
    #[test]
    fn with_bit_only_changes_the_target_pin(byte in 0u8..=255u8, index in 0u8..4, active in proptest::bool::ANY) {
        let pin = Pin::new(index).map_err(|e| proptest::test_runner::TestCaseError::fail(e.to_string()))?;
        let updated = with_bit(byte, pin, active);
        assert_eq!(updated & !pin.mask(), byte & !pin.mask());
        assert_eq!(test_bit(updated, pin), active);
    }

    #[test]
    fn set_and_clear_are_idempotent(byte in 0u8..=255u8, index in 0u8..4) {
        let pin = Pin::new(index).map_err(|e| proptest::test_runner::TestCaseError::fail(e.to_string()))?;
        assert_eq!(set_bit(set_bit(byte, pin), pin), set_bit(byte, pin));
        assert_eq!(clear_bit(clear_bit(byte, pin), pin), clear_bit(byte, pin));
    }

    /// Pins outside 0–3 never validate.
    #[test]
    fn out_of_range_pins_are_rejected(index in 4u8..=255u8) {
        assert!(Pin::new(index).is_err());
    }
}
