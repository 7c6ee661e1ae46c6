//! # Configuration Tests
//!
//! Defaults, partial JSON overrides, and derived file locations.

use std::path::PathBuf;

use iecbridge_core::BridgeError;
use iecbridge_core::bus::BusLine;
use iecbridge_core::config::*;

use crate::common::harness::create_temp_file;

#[test]
fn test_config_default() {
    let config = BridgeConfig::default();
    assert_eq!(config.general.frame_cycles, 6_250_000);
    assert_eq!(config.general.report_interval, 10);
    assert_eq!(config.general.flash_base, 0x1000_0000);
    assert_eq!(config.general.initial_pc, 0x1000_0000);
}

#[test]
fn test_pin_defaults() {
    let pins = PinConfig::default();
    assert_eq!(pins.data, 2);
    assert_eq!(pins.clock, 3);
    assert_eq!(pins.attention, 4);
    assert_eq!(pins.service_request, 5);
    assert_eq!(pins.reset, 6);
    assert_eq!(pins.status_pins(), [("motor", 8), ("led", 25)]);
}

#[test]
fn test_line_pin_mapping() {
    let pins = PinConfig::default();
    assert_eq!(pins.line_pin(BusLine::Data), 2);
    assert_eq!(pins.line_pin(BusLine::Clock), 3);
    assert_eq!(pins.line_pin(BusLine::Attention), 4);
    assert_eq!(pins.line_pin(BusLine::ServiceRequest), 5);
    assert_eq!(pins.line_pin(BusLine::Reset), 6);
}

#[test]
fn test_path_defaults() {
    let paths = PathConfig::default();
    assert_eq!(paths.firmware, PathBuf::from("../rp2040/build/c1541.uf2"));
    assert_eq!(paths.peer_library, PathBuf::from("./libc64_emulation.so"));
    assert_eq!(paths.map_file(), PathBuf::from("../rp2040/build/c1541.elf.map"));
    assert_eq!(paths.elf_file(), PathBuf::from("../rp2040/build/c1541.elf"));
}

#[test]
fn test_empty_json_yields_defaults() {
    let config: BridgeConfig = serde_json::from_str("{}").unwrap();
    assert_eq!(config.general.frame_cycles, 6_250_000);
    assert_eq!(config.pins, PinConfig::default());
}

#[test]
fn test_partial_json_overrides_only_named_fields() {
    let json = r#"{ "general": { "frame_cycles": 1000 }, "pins": { "clock": 9 } }"#;
    let config: BridgeConfig = serde_json::from_str(json).unwrap();
    assert_eq!(config.general.frame_cycles, 1000);
    assert_eq!(config.general.report_interval, 10);
    assert_eq!(config.pins.clock, 9);
    assert_eq!(config.pins.data, 2);
}

#[test]
fn test_from_json_file() {
    let file = create_temp_file(br#"{ "paths": { "firmware": "fw.uf2" } }"#);
    let config = BridgeConfig::from_json_file(file.path()).unwrap();
    assert_eq!(config.paths.firmware, PathBuf::from("fw.uf2"));
    assert_eq!(config.paths.map_file(), PathBuf::from("fw.elf.map"));
}

#[test]
fn test_from_json_file_rejects_malformed() {
    let file = create_temp_file(b"{ not json");
    let err = BridgeConfig::from_json_file(file.path()).unwrap_err();
    assert!(matches!(err, BridgeError::Config(_)));
    assert_eq!(err.exit_code(), 1);
}
