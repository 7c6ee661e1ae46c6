//! IEC bus synchronization bridge between an RP2040 simulator and a C64 simulator.
//!
//! This crate lets 1541 drive firmware running inside an MCU instruction-set simulator talk to a
//! peer computer simulator over a shared IEC serial bus, one bus tick at a time. It provides:
//! 1. **Bus:** The active-low bus-state byte codec and an open-collector wired-AND bus model.
//! 2. **MCU:** The adapter trait for the instruction-set simulator, trace events, and GPIO levels.
//! 3. **Peer:** The peer bus service trait, a loopback peer, and the native C ABI binding.
//! 4. **Simulation:** Firmware loading, symbol lookup, tick synchronization, and the frame loop.
//! 5. **Support:** Configuration, error types, statistics, and the `dlopen` wrapper.

/// Common types and constants (errors, fixed addresses, UF2 layout).
pub mod common;
/// Bridge configuration (defaults, pin assignment, paths).
pub mod config;
/// Bus lines, bus-state codec, and the wired-AND bus model.
pub mod bus;
/// Dynamic library loading for the native simulators.
pub mod ffi;
/// MCU adapter trait, trace events, and the native MCU binding.
pub mod mcu;
/// Peer bus service trait and implementations.
pub mod peer;
/// Firmware loading, synchronization controller, and frame scheduler.
pub mod sim;
/// Bridge statistics collection and reporting.
pub mod stats;

/// Root configuration type; use `BridgeConfig::default()` or load it from JSON.
pub use crate::config::BridgeConfig;
/// Crate-wide error type.
pub use crate::common::error::BridgeError;
/// Frame loop owning the MCU, the peer, and the synchronization controller.
pub use crate::sim::scheduler::FrameScheduler;
