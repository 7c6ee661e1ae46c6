//! # Loopback Peer Tests
//!
//! The loopback peer resolves the bridge's pushes against an idle or scripted host.

use iecbridge_core::bus::{BusLine, BusState};
use iecbridge_core::peer::{LoopbackPeer, PeerBus};

#[test]
fn test_starts_idle_and_uninitialized() {
    let mut peer = LoopbackPeer::new();
    assert!(!peer.is_initialized());
    assert_eq!(peer.bus(), BusState::IDLE);
    assert_eq!(peer.bridge_state(), BusState::IDLE);
}

#[test]
fn test_init_and_ticks() {
    let mut peer = LoopbackPeer::default();
    peer.init();
    peer.tick();
    peer.tick();
    assert!(peer.is_initialized());
    assert_eq!(peer.ticks(), 2);
    assert_eq!(peer.tick_count(), Some(2));
}

#[test]
fn test_bridge_push_is_reflected() {
    let mut peer = LoopbackPeer::new();
    let pushed = BusState::IDLE.with_asserted(BusLine::Data);
    peer.set_bus(pushed);
    assert_eq!(peer.bridge_state(), pushed);
    assert_eq!(peer.bus(), pushed);
}

#[test]
fn test_host_and_bridge_combine() {
    let mut peer = LoopbackPeer::new();
    peer.set_host(BusState::IDLE.with_asserted(BusLine::Attention));
    peer.set_bus(BusState::IDLE.with_asserted(BusLine::Clock));

    let bus = peer.bus();
    assert!(bus.is_asserted(BusLine::Attention));
    assert!(bus.is_asserted(BusLine::Clock));
    assert!(!bus.is_asserted(BusLine::Data));
}

#[test]
fn test_release_restores_idle() {
    let mut peer = LoopbackPeer::new();
    peer.set_bus(BusState(0x00));
    peer.set_bus(BusState::IDLE);
    assert_eq!(peer.bus(), BusState::IDLE);
}
