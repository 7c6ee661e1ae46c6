//! # Startup Tests
//!
//! This module verifies the startup order: firmware check, peer initialization, image load,
//! and initial program counter.

use iecbridge_core::BridgeError;
use iecbridge_core::common::constants::FLASH_BASE;
use iecbridge_core::sim::session;

use crate::common::builder::create_uf2_image;
use crate::common::harness::{create_temp_file, create_test_config, init_tracing};
use crate::common::mocks::mcu::FakeMcu;
use crate::common::mocks::peer::{MockPeer, PeerCall, RecordingPeer};

#[test]
fn test_missing_firmware_fails_before_peer_init() {
    init_tracing();
    let dir = tempfile::tempdir().unwrap();
    let config = create_test_config(&dir.path().join("c1541.uf2"));

    let mut peer = MockPeer::new();
    let _ = peer.expect_init().times(0);

    let Err(err) = session::start(&config, FakeMcu::new(1), peer) else {
        panic!("startup succeeded without firmware");
    };
    assert!(matches!(err, BridgeError::FirmwareNotFound(_)));
    assert_eq!(err.exit_code(), 1);
    assert_eq!(
        err.hint(),
        Some("Please build the firmware first: cd rp2040 && ./build.sh")
    );
}

#[test]
fn test_ensure_firmware_rejects_directory() {
    let dir = tempfile::tempdir().unwrap();
    assert!(session::ensure_firmware(dir.path()).is_err());
}

#[test]
fn test_start_initializes_loads_and_sets_pc() {
    init_tracing();
    let file = create_temp_file(&create_uf2_image(FLASH_BASE, &[0xA5; 300]));
    let config = create_test_config(file.path());

    let scheduler = session::start(&config, FakeMcu::new(1), RecordingPeer::new()).unwrap();

    let mcu = scheduler.mcu();
    assert_eq!(mcu.pc, Some(config.general.initial_pc));
    assert_eq!(mcu.flash, vec![0xA5; 300]);
    assert_eq!(mcu.steps, 0);
    assert_eq!(scheduler.peer().calls, vec![PeerCall::Init]);
}

#[test]
fn test_malformed_image_is_fatal() {
    init_tracing();
    let file = create_temp_file(&[0u8; 512]);
    let config = create_test_config(file.path());

    let err = session::start(&config, FakeMcu::new(1), RecordingPeer::new()).unwrap_err();
    assert!(matches!(err, BridgeError::Image(_)));
    assert_eq!(err.exit_code(), 1);
}
