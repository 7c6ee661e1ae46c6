//! Configuration system for the bridge.
//!
//! This module defines the configuration structures used to parameterize a bridge run. It provides:
//! 1. **Defaults:** The fixed pin assignment, clocking, and file locations the drive firmware expects.
//! 2. **Structures:** `general` (clocking and diagnostics), `pins` (GPIO numbers), and `paths`.
//! 3. **Loading:** Deserialization from a JSON file; every field is optional.
//!
//! Running with `BridgeConfig::default()` reproduces the usual development layout, with the runner next to
//! the native libraries and the firmware build one directory up.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::bus::BusLine;
use crate::common::constants;
use crate::common::error::BridgeError;

/// Default configuration constants for the bridge.
mod defaults {
    use crate::common::constants;

    /// Frames between diagnostic reports.
    pub const REPORT_INTERVAL: u64 = 10;

    /// GPIO driving and sampling the IEC DATA line.
    pub const PIN_DATA: u8 = 2;

    /// GPIO driving and sampling the IEC CLK line.
    pub const PIN_CLOCK: u8 = 3;

    /// GPIO driving and sampling the IEC ATN line.
    pub const PIN_ATTENTION: u8 = 4;

    /// GPIO wired to the IEC SRQ line (reserved, never driven).
    pub const PIN_SERVICE_REQUEST: u8 = 5;

    /// GPIO driving and sampling the IEC RESET line.
    pub const PIN_RESET: u8 = 6;

    /// GPIO the firmware uses for the drive motor.
    pub const PIN_MOTOR: u8 = 8;

    /// GPIO the firmware uses for the activity LED (Pico on-board LED).
    pub const PIN_LED: u8 = 25;

    /// Firmware image produced by the RP2040 build.
    pub const FIRMWARE: &str = "../rp2040/build/c1541.uf2";

    /// Native peer library exporting the `c64_*` ABI.
    pub const PEER_LIBRARY: &str = "./libc64_emulation.so";

    /// Native MCU library exporting the `rp2040_*` ABI.
    pub const MCU_LIBRARY: &str = "./librp2040_sim.so";

    /// MCU cycles per frame.
    pub const fn frame_cycles() -> u64 {
        constants::MCU_CLOCK_HZ / constants::FRAMES_PER_SECOND
    }
}

/// Root configuration.
///
/// # Examples
///
/// ```
/// use iecbridge_core::config::BridgeConfig;
///
/// let json = r#"{
///     "general": { "report_interval": 5 },
///     "pins": { "led": 16 }
/// }"#;
///
/// let config: BridgeConfig = serde_json::from_str(json).unwrap();
/// assert_eq!(config.general.report_interval, 5);
/// assert_eq!(config.pins.led, 16);
/// assert_eq!(config.pins.data, 2);
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BridgeConfig {
    /// Clocking, image placement, and diagnostics
    #[serde(default)]
    pub general: GeneralConfig,
    /// GPIO pin assignment
    #[serde(default)]
    pub pins: PinConfig,
    /// Firmware and native library locations
    #[serde(default)]
    pub paths: PathConfig,
}

impl BridgeConfig {
    /// Reads a configuration from a JSON file.
    pub fn from_json_file(path: &Path) -> Result<Self, BridgeError> {
        let text = fs::read_to_string(path).map_err(|source| BridgeError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(serde_json::from_str(&text)?)
    }
}

/// Clocking, image placement, and diagnostics settings.
#[derive(Debug, Clone, Deserialize)]
pub struct GeneralConfig {
    /// MCU cycles run per frame
    #[serde(default = "GeneralConfig::default_frame_cycles")]
    pub frame_cycles: u64,

    /// Emit a diagnostic snapshot every N frames (0 disables reports)
    #[serde(default = "GeneralConfig::default_report_interval")]
    pub report_interval: u64,

    /// Base address of the MCU flash window
    #[serde(default = "GeneralConfig::default_flash_base")]
    pub flash_base: u32,

    /// Size of the MCU flash window in bytes
    #[serde(default = "GeneralConfig::default_flash_size")]
    pub flash_size: u32,

    /// Program counter the MCU starts at
    #[serde(default = "GeneralConfig::default_initial_pc")]
    pub initial_pc: u32,
}

impl GeneralConfig {
    fn default_frame_cycles() -> u64 {
        defaults::frame_cycles()
    }

    fn default_report_interval() -> u64 {
        defaults::REPORT_INTERVAL
    }

    fn default_flash_base() -> u32 {
        constants::FLASH_BASE
    }

    fn default_flash_size() -> u32 {
        constants::FLASH_SIZE
    }

    fn default_initial_pc() -> u32 {
        constants::INITIAL_PC
    }
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            frame_cycles: defaults::frame_cycles(),
            report_interval: defaults::REPORT_INTERVAL,
            flash_base: constants::FLASH_BASE,
            flash_size: constants::FLASH_SIZE,
            initial_pc: constants::INITIAL_PC,
        }
    }
}

/// GPIO pin assignment on the MCU.
///
/// The five IEC pins must match the firmware; the status pins are only read for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct PinConfig {
    /// IEC DATA
    #[serde(default = "PinConfig::default_data")]
    pub data: u8,
    /// IEC CLK
    #[serde(default = "PinConfig::default_clock")]
    pub clock: u8,
    /// IEC ATN
    #[serde(default = "PinConfig::default_attention")]
    pub attention: u8,
    /// IEC SRQ (wired but never driven or sampled)
    #[serde(default = "PinConfig::default_service_request")]
    pub service_request: u8,
    /// IEC RESET
    #[serde(default = "PinConfig::default_reset")]
    pub reset: u8,
    /// Drive motor status pin
    #[serde(default = "PinConfig::default_motor")]
    pub motor: u8,
    /// Activity LED status pin
    #[serde(default = "PinConfig::default_led")]
    pub led: u8,
}

impl PinConfig {
    fn default_data() -> u8 {
        defaults::PIN_DATA
    }

    fn default_clock() -> u8 {
        defaults::PIN_CLOCK
    }

    fn default_attention() -> u8 {
        defaults::PIN_ATTENTION
    }

    fn default_service_request() -> u8 {
        defaults::PIN_SERVICE_REQUEST
    }

    fn default_reset() -> u8 {
        defaults::PIN_RESET
    }

    fn default_motor() -> u8 {
        defaults::PIN_MOTOR
    }

    fn default_led() -> u8 {
        defaults::PIN_LED
    }

    /// MCU pin wired to `line`.
    pub const fn line_pin(&self, line: BusLine) -> u8 {
        match line {
            BusLine::Data => self.data,
            BusLine::Clock => self.clock,
            BusLine::Attention => self.attention,
            BusLine::ServiceRequest => self.service_request,
            BusLine::Reset => self.reset,
        }
    }

    /// Named status pins surfaced in diagnostic snapshots.
    pub fn status_pins(&self) -> [(&'static str, u8); 2] {
        [("motor", self.motor), ("led", self.led)]
    }
}

impl Default for PinConfig {
    fn default() -> Self {
        Self {
            data: defaults::PIN_DATA,
            clock: defaults::PIN_CLOCK,
            attention: defaults::PIN_ATTENTION,
            service_request: defaults::PIN_SERVICE_REQUEST,
            reset: defaults::PIN_RESET,
            motor: defaults::PIN_MOTOR,
            led: defaults::PIN_LED,
        }
    }
}

/// Firmware and native library locations, relative to the working directory.
#[derive(Debug, Clone, Deserialize)]
pub struct PathConfig {
    /// UF2 firmware image
    #[serde(default = "PathConfig::default_firmware")]
    pub firmware: PathBuf,
    /// Native peer (C64) library
    #[serde(default = "PathConfig::default_peer_library")]
    pub peer_library: PathBuf,
    /// Native MCU (RP2040) library
    #[serde(default = "PathConfig::default_mcu_library")]
    pub mcu_library: PathBuf,
}

impl PathConfig {
    fn default_firmware() -> PathBuf {
        PathBuf::from(defaults::FIRMWARE)
    }

    fn default_peer_library() -> PathBuf {
        PathBuf::from(defaults::PEER_LIBRARY)
    }

    fn default_mcu_library() -> PathBuf {
        PathBuf::from(defaults::MCU_LIBRARY)
    }

    /// Linker map written next to the firmware (`c1541.uf2` → `c1541.elf.map`).
    pub fn map_file(&self) -> PathBuf {
        self.firmware.with_extension("elf.map")
    }

    /// ELF written next to the firmware (`c1541.uf2` → `c1541.elf`).
    pub fn elf_file(&self) -> PathBuf {
        self.firmware.with_extension("elf")
    }
}

impl Default for PathConfig {
    fn default() -> Self {
        Self {
            firmware: Self::default_firmware(),
            peer_library: Self::default_peer_library(),
            mcu_library: Self::default_mcu_library(),
        }
    }
}
