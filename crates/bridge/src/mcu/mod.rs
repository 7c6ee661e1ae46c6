//! Microcontroller simulator boundary.
//!
//! The instruction-set simulator itself is external. This module defines what the bridge needs
//! from it and how that is reached:
//! 1. **Pins:** GPIO voltage levels and their open-collector meaning.
//! 2. **Trace:** Per-instruction trace events with a closed set of tags.
//! 3. **Adapter:** The `Mcu` trait the scheduler drives.
//! 4. **Native:** An `Mcu` backed by a `dlopen`'d simulator library.

/// `Mcu` backed by a native simulator library.
pub mod native;

/// GPIO levels.
pub mod pin;

/// Trace events, tags, and sinks.
pub mod trace;

/// The adapter trait.
pub mod traits;

pub use native::NativeMcu;
pub use pin::PinLevel;
pub use trace::{TraceEvent, TraceSink, TraceTag};
pub use traits::Mcu;
