//! Periodic frame diagnostics.
//!
//! Every Nth frame the scheduler asks for a snapshot: the average MCU cycles per peer tick for
//! that frame, the peer's display, and the levels of a few named status pins. Snapshots only
//! read state; nothing here feeds back into the simulation.

use tracing::info;

use crate::config::{GeneralConfig, PinConfig};
use crate::mcu::{Mcu, PinLevel};
use crate::peer::PeerBus;

use super::scheduler::FrameReport;

/// One diagnostic snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiagnosticSnapshot {
    /// Zero-based index of the frame the snapshot was taken after.
    pub frame: u64,
    /// Average MCU cycles per peer tick in that frame; `None` for a frame with no ticks.
    pub cycles_per_tick: Option<u64>,
    /// Named status pin levels.
    pub pins: Vec<(&'static str, PinLevel)>,
}

/// Diagnostic cadence and the pins to report.
#[derive(Debug, Clone, Copy)]
pub struct Diagnostics {
    interval: u64,
    status_pins: [(&'static str, u8); 2],
}

impl Diagnostics {
    /// Reports every `interval` frames; `0` disables reporting.
    pub const fn new(interval: u64, status_pins: [(&'static str, u8); 2]) -> Self {
        Self {
            interval,
            status_pins,
        }
    }

    /// Builds the cadence from configuration.
    pub fn from_config(general: &GeneralConfig, pins: &PinConfig) -> Self {
        Self::new(general.report_interval, pins.status_pins())
    }

    /// Whether frame `index` gets a snapshot. Frame 0 always does when reporting is enabled.
    pub const fn is_due(&self, index: u64) -> bool {
        self.interval != 0 && index % self.interval == 0
    }

    /// Takes a snapshot after `report` if one is due.
    ///
    /// # Arguments
    ///
    /// * `report` - The frame that just completed.
    /// * `mcu` - Source of the status pin levels.
    /// * `peer` - Asked to print its screen.
    pub fn capture<M, P>(
        &self,
        report: &FrameReport,
        mcu: &M,
        peer: &mut P,
    ) -> Option<DiagnosticSnapshot>
    where
        M: Mcu + ?Sized,
        P: PeerBus + ?Sized,
    {
        if !self.is_due(report.index) {
            return None;
        }

        peer.print_screen();

        let snapshot = DiagnosticSnapshot {
            frame: report.index,
            cycles_per_tick: report.cycles_per_tick(),
            pins: self
                .status_pins
                .iter()
                .map(|&(name, pin)| (name, mcu.gpio_output(pin)))
                .collect(),
        };

        match snapshot.cycles_per_tick {
            Some(cpt) => info!(frame = snapshot.frame, "MCU cycles per peer tick: {cpt}"),
            None => info!(frame = snapshot.frame, "MCU cycles per peer tick: n/a (no ticks)"),
        }
        for (name, level) in &snapshot.pins {
            info!(frame = snapshot.frame, "{name}: {level}");
        }

        Some(snapshot)
    }
}
