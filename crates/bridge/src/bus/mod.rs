//! IEC serial bus representation.
//!
//! The bus is five open-collector lines. Each side of the bridge sees it differently: the MCU
//! as GPIO voltage levels, the peer as one packed active-low byte. This module holds both views
//! and the translation between them:
//! 1. **Lines:** The fixed line set and its bit layout.
//! 2. **State:** The packed `BusState` byte and the per-line `AssertedFlags` record.
//! 3. **Codec:** Pure `encode`/`decode` between the two.
//! 4. **Wired bus:** A wired-AND model combining several devices' drivers into one bus state.

/// Pure conversion between asserted flags and the bus-state byte.
pub mod codec;

/// The five IEC lines and their bit positions.
pub mod line;

/// Packed bus-state byte and per-line flag record.
pub mod state;

/// Open-collector wired-AND bus with per-device drivers.
pub mod wired;

pub use codec::{decode, encode};
pub use line::BusLine;
pub use state::{AssertedFlags, BusState};
pub use wired::{DeviceId, WiredBus};
