//! # Symbol Lookup Tests
//!
//! Linker map parsing and ELF symbol tables.

use iecbridge_core::BridgeError;
use iecbridge_core::sim::symbols::{ElfSymbols, MapFile, SymbolTable};
use rstest::rstest;

use crate::common::harness::create_temp_file;

/// 32-bit firmware ELF defining `reset_handler`, `iec_state` and `drive_rom_ptr`.
const FIRMWARE_ELF: &[u8] = include_bytes!("../../fixtures/c1541.elf");

const MAP: &str = "\
Memory Configuration

Name             Origin             Length             Attributes
FLASH            0x10000000         0x00200000         xr

 .bss.iec_state
                0x20001a40       0x18 CMakeFiles/c1541.dir/iec.c.obj
 .bss.drive_rom_ptr
                0x20001a58        0x4 CMakeFiles/c1541.dir/drive.c.obj
 .text.short    0x10000400       0x20 CMakeFiles/c1541.dir/main.c.obj
 .data.Uppercase
                0x20000000 0x4 bad.obj
";

fn create_map() -> MapFile {
    MapFile::from_text("c1541.elf.map", MAP)
}

#[rstest]
#[case("iec_state", 0x2000_1a40)]
#[case(".bss.drive_rom_ptr", 0x2000_1a58)]
#[case("drive_rom", 0x2000_1a58)]
fn test_map_lookup(#[case] symbol: &str, #[case] address: u64) {
    assert_eq!(create_map().address_of(symbol).unwrap(), address);
}

#[test]
fn test_map_symbol_on_same_line_as_address_is_not_matched() {
    assert_eq!(create_map().find(".text.short"), None);
}

#[test]
fn test_map_first_valid_occurrence_wins() {
    let text = "foo mentioned in a header\nno address here\n .bss.foo\n  0x00000010 0x4 a.o\n";
    let map = MapFile::from_text("m", text);
    assert_eq!(map.find("foo"), Some(0x10));
}

#[test]
fn test_map_address_needs_trailing_space() {
    let map = MapFile::from_text("m", " .bss.bar\n                0x20000000");
    assert_eq!(map.find("bar"), None);
}

#[test]
fn test_map_missing_symbol_is_an_error() {
    let err = create_map().address_of("not_there").unwrap_err();
    assert!(matches!(
        err,
        BridgeError::SymbolNotFound { ref symbol, ref location }
            if symbol == "not_there" && location == "c1541.elf.map"
    ));
    assert_eq!(err.exit_code(), 1);
}

#[test]
fn test_map_empty_symbol_never_matches() {
    assert_eq!(create_map().find(""), None);
}

#[test]
fn test_map_open_reads_file() {
    let file = create_temp_file(MAP.as_bytes());
    let map = MapFile::open(file.path()).unwrap();
    assert_eq!(map.address_of("iec_state").unwrap(), 0x2000_1a40);
}

#[test]
fn test_map_open_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let err = MapFile::open(&dir.path().join("none.elf.map")).unwrap_err();
    assert!(matches!(err, BridgeError::Io { .. }));
}

#[test]
fn test_elf_rejects_non_elf_data() {
    let err = ElfSymbols::parse("fw.elf", b"definitely not an elf").unwrap_err();
    assert!(matches!(err, BridgeError::Elf(_)));
}

#[test]
fn test_elf_lookup_from_memory() {
    let symbols = ElfSymbols::parse("c1541.elf", FIRMWARE_ELF).unwrap();
    assert_eq!(symbols.len(), 3);
    assert_eq!(symbols.address_of("iec_state").unwrap(), 0x2000_1a40);
    assert_eq!(symbols.address_of("drive_rom_ptr").unwrap(), 0x2000_1a58);
    assert_eq!(symbols.address_of("reset_handler").unwrap(), 0x1000_0100);
}

#[test]
fn test_elf_lookup_from_unaligned_buffer() {
    let mut shifted = vec![0u8];
    shifted.extend_from_slice(FIRMWARE_ELF);
    let symbols = ElfSymbols::parse("c1541.elf", &shifted[1..]).unwrap();
    assert_eq!(symbols.address_of("iec_state").unwrap(), 0x2000_1a40);
}

#[test]
fn test_elf_open_reads_file() {
    let file = create_temp_file(FIRMWARE_ELF);
    let symbols = ElfSymbols::open(file.path()).unwrap();
    assert!(!symbols.is_empty());
    assert_eq!(symbols.address_of("drive_rom_ptr").unwrap(), 0x2000_1a58);
}

#[test]
fn test_elf_missing_symbol_is_an_error() {
    let symbols = ElfSymbols::parse("c1541.elf", FIRMWARE_ELF).unwrap();
    let err = symbols.address_of("not_there").unwrap_err();
    assert!(matches!(
        err,
        BridgeError::SymbolNotFound { ref symbol, ref location }
            if symbol == "not_there" && location == "c1541.elf"
    ));
}
