//! # Wired Bus Tests
//!
//! Open-collector resolution across several devices, with and without inverted logic.

use iecbridge_core::bus::wired::MAX_DEVICES;
use iecbridge_core::bus::{BusLine, BusState, WiredBus};

#[test]
fn test_empty_bus_reads_idle() {
    let bus = WiredBus::new();
    assert_eq!(bus.device_count(), 0);
    assert_eq!(bus.signals(None), BusState::IDLE);
}

#[test]
fn test_connected_device_starts_released() {
    let mut bus = WiredBus::new();
    let plain = bus.connect(false).unwrap();
    let inverted = bus.connect(true).unwrap();
    assert_eq!(bus.device_count(), 2);
    assert_eq!(bus.device_state(plain), BusState::IDLE);
    assert_eq!(bus.device_state(inverted), BusState::IDLE);
    assert_eq!(bus.signals(None), BusState::IDLE);
}

#[test]
fn test_any_device_pulling_pulls_the_line() {
    let mut bus = WiredBus::new();
    let a = bus.connect(false).unwrap();
    let b = bus.connect(false).unwrap();

    bus.set_signals(a, !BusLine::Clock.mask());
    bus.set_signals(b, !BusLine::Data.mask());

    let combined = bus.signals(None);
    assert!(combined.is_asserted(BusLine::Clock));
    assert!(combined.is_asserted(BusLine::Data));
    assert!(!combined.is_asserted(BusLine::Attention));
}

#[test]
fn test_inverted_device_pulls_with_set_bit() {
    let mut bus = WiredBus::new();
    let inverted = bus.connect(true).unwrap();

    bus.set_signals(inverted, BusLine::Attention.mask());

    assert!(bus.signals(None).is_asserted(BusLine::Attention));
    let own_view = bus.signals(Some(inverted));
    assert_eq!(own_view.bits() & BusLine::Attention.mask(), BusLine::Attention.mask());
}

#[test]
fn test_disconnect_releases_lines() {
    let mut bus = WiredBus::new();
    let a = bus.connect(false).unwrap();
    bus.set_signals(a, 0x00);
    assert!(bus.signals(None).is_asserted(BusLine::Reset));

    bus.disconnect(a);
    assert_eq!(bus.device_count(), 0);
    assert_eq!(bus.signals(None), BusState::IDLE);
    assert_eq!(bus.device_state(a), BusState::IDLE);
}

#[test]
fn test_connect_fails_when_full() {
    let mut bus = WiredBus::new();
    for _ in 0..MAX_DEVICES {
        assert!(bus.connect(false).is_some());
    }
    assert!(bus.connect(false).is_none());
}

#[test]
fn test_bits_above_the_bus_are_ignored() {
    let mut bus = WiredBus::new();
    let a = bus.connect(false).unwrap();
    bus.set_signals(a, 0x1F);
    assert_eq!(bus.signals(None), BusState::IDLE);
}
