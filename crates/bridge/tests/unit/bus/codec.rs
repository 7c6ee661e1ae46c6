//! # Bus Codec Tests
//!
//! Tests for the active-low packing of the four handled lines, including the SRQ bit which the
//! codec never touches.

use iecbridge_core::bus::{AssertedFlags, BusLine, BusState, decode, encode};
use pretty_assertions::assert_eq;
use proptest::prelude::*;
use rstest::rstest;

fn create_flags(data: bool, clock: bool, attention: bool, reset: bool) -> AssertedFlags {
    AssertedFlags {
        data,
        clock,
        attention,
        reset,
    }
}

#[test]
fn test_encode_nothing_asserted_is_idle() {
    assert_eq!(encode(AssertedFlags::RELEASED), BusState::IDLE);
    assert_eq!(encode(AssertedFlags::RELEASED).bits(), 0xFF);
}

#[test]
fn test_encode_data_and_clock() {
    let state = encode(create_flags(true, true, false, false));
    assert_eq!(state.bits(), 0xFC);
}

#[test]
fn test_decode_all_clear_asserts_every_handled_line() {
    let flags = decode(BusState(0x00));
    assert_eq!(flags, create_flags(true, true, true, true));
}

#[rstest]
#[case(BusLine::Data, 0xFE)]
#[case(BusLine::Clock, 0xFD)]
#[case(BusLine::Attention, 0xFB)]
#[case(BusLine::Reset, 0xEF)]
fn test_encode_single_line(#[case] line: BusLine, #[case] expected: u8) {
    let mut flags = AssertedFlags::RELEASED;
    flags.set(line, true);
    assert_eq!(encode(flags).bits(), expected);
}

#[test]
fn test_encode_never_pulls_service_request() {
    let state = encode(create_flags(true, true, true, true));
    assert_eq!(state.bits(), 0xE8);
    assert!(!state.is_asserted(BusLine::ServiceRequest));
}

#[test]
fn test_decode_ignores_service_request_bit() {
    let srq_only = BusState(!BusLine::ServiceRequest.mask());
    assert_eq!(decode(srq_only), AssertedFlags::RELEASED);
}

#[test]
fn test_all_sixteen_combinations_round_trip() {
    for bits in 0u8..16 {
        let flags = create_flags(bits & 1 != 0, bits & 2 != 0, bits & 4 != 0, bits & 8 != 0);
        assert_eq!(decode(encode(flags)), flags, "combination {bits:#06b}");
    }
}

proptest! {
    #[test]
    fn prop_decode_reads_only_handled_bits(raw in any::<u8>()) {
        let flags = decode(BusState(raw));
        prop_assert_eq!(flags.data, raw & 0x01 == 0);
        prop_assert_eq!(flags.clock, raw & 0x02 == 0);
        prop_assert_eq!(flags.attention, raw & 0x04 == 0);
        prop_assert_eq!(flags.reset, raw & 0x10 == 0);
    }

    #[test]
    fn prop_encode_keeps_unhandled_bits_set(
        data in any::<bool>(),
        clock in any::<bool>(),
        attention in any::<bool>(),
        reset in any::<bool>(),
    ) {
        let state = encode(create_flags(data, clock, attention, reset));
        prop_assert_eq!(state.bits() & 0xE8, 0xE8);
    }
}
