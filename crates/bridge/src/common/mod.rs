//! Common utilities and types shared across the bridge.
//!
//! This module provides the building blocks every other module leans on:
//! 1. **Constants:** Flash window, UF2 block layout, and default clocking.
//! 2. **Error Handling:** The crate-wide `BridgeError` and the image decoder's `Uf2Error`.

/// Fixed addresses, block layout, and clocking constants.
pub mod constants;

/// Error types for startup, loading, lookup, and native interop.
pub mod error;

pub use constants::{FLASH_BASE, UF2_BLOCK_SIZE};
pub use error::{BridgeError, Uf2Error};
