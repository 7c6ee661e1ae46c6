//! Simulation setup and the synchronization core.
//!
//! Everything between process entry and the two simulators lives here:
//! 1. **Loader:** UF2 firmware image decoding and placement into MCU flash.
//! 2. **Symbols:** Firmware symbol addresses from the linker map or the ELF.
//! 3. **Sync:** The tick request and the synchronization controller.
//! 4. **Scheduler:** Bounded-cycle frames and the frame loop.
//! 5. **Diagnostics:** Periodic observational snapshots.
//! 6. **Session:** Startup ordering (firmware check, peer init, image load, initial PC).

/// Periodic diagnostic snapshots.
pub mod diagnostics;

/// UF2 image decoding and loading.
pub mod loader;

/// Frame scheduler and frame loop.
pub mod scheduler;

/// Startup sequence.
pub mod session;

/// Firmware symbol lookup.
pub mod symbols;

/// Tick request and synchronization controller.
pub mod sync;

pub use diagnostics::{DiagnosticSnapshot, Diagnostics};
pub use scheduler::{FrameHost, FrameReport, FrameScheduler};
pub use sync::{SyncController, TickRequest};
