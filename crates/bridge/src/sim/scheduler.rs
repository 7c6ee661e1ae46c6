//! Frame Scheduler.
//!
//! Execution is sliced into frames of a fixed MCU cycle budget. Within a frame the scheduler:
//! 1. **Steps:** Executes one MCU instruction at a time, with the sync controller as trace sink.
//! 2. **Services:** Gives the controller one chance to tick the peer after every step.
//! 3. **Accounts:** Adds the step's cycles and stops once the budget is reached (overshoot allowed).
//!
//! Between frames control returns to a [`FrameHost`], the single suspension point where console
//! output is flushed and the caller may decide to stop.

use std::ops::ControlFlow;

use tracing::debug;

use crate::config::BridgeConfig;
use crate::mcu::Mcu;
use crate::peer::PeerBus;
use crate::stats::BridgeStats;

use super::diagnostics::{DiagnosticSnapshot, Diagnostics};
use super::sync::SyncController;

/// Outcome of one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameReport {
    /// Zero-based frame index.
    pub index: u64,
    /// Cycle budget the frame was given.
    pub target_cycles: u64,
    /// Cycles the MCU reported. Reaches `target_cycles` with at most one instruction of
    /// overshoot unless some steps reported zero cycles.
    pub cycles_run: u64,
    /// Peer ticks serviced during the frame.
    pub ticks: u64,
    /// Instructions stepped during the frame.
    pub instructions: u64,
}

impl FrameReport {
    /// Average cycles per tick, or `None` for a frame without ticks.
    pub fn cycles_per_tick(&self) -> Option<u64> {
        self.cycles_run.checked_div(self.ticks)
    }
}

/// Whoever runs the frame loop gets control back here after every frame.
pub trait FrameHost<M: ?Sized> {
    /// Called after each frame. Return `ControlFlow::Break(())` to stop the loop.
    fn after_frame(
        &mut self,
        report: &FrameReport,
        snapshot: Option<&DiagnosticSnapshot>,
        mcu: &mut M,
    ) -> ControlFlow<()>;
}

impl<M, F> FrameHost<M> for F
where
    M: ?Sized,
    F: FnMut(&FrameReport, Option<&DiagnosticSnapshot>, &mut M) -> ControlFlow<()>,
{
    fn after_frame(
        &mut self,
        report: &FrameReport,
        snapshot: Option<&DiagnosticSnapshot>,
        mcu: &mut M,
    ) -> ControlFlow<()> {
        self(report, snapshot, mcu)
    }
}

/// Owns both simulators and the controller that couples them.
#[derive(Debug)]
pub struct FrameScheduler<M, P> {
    mcu: M,
    peer: P,
    sync: SyncController,
    diagnostics: Diagnostics,
    frame_cycles: u64,
    next_index: u64,
    stats: BridgeStats,
}

impl<M: Mcu, P: PeerBus> FrameScheduler<M, P> {
    /// Creates a scheduler. The MCU is expected to be loaded and the peer initialized.
    pub fn new(mcu: M, peer: P, config: &BridgeConfig) -> Self {
        Self {
            mcu,
            peer,
            sync: SyncController::new(config.pins),
            diagnostics: Diagnostics::from_config(&config.general, &config.pins),
            frame_cycles: config.general.frame_cycles,
            next_index: 0,
            stats: BridgeStats::default(),
        }
    }

    /// Runs one frame of at least `target_cycles` MCU cycles.
    ///
    /// `cycles_run` is the sum of what the MCU reported. For ending the frame a step that
    /// reports zero cycles still advances the budget by one, so a stalled MCU runs at most
    /// `target_cycles` instructions. A `target_cycles` of zero still executes one instruction.
    pub fn run_frame(&mut self, target_cycles: u64) -> FrameReport {
        let mut report = FrameReport {
            index: self.next_index,
            target_cycles,
            cycles_run: 0,
            ticks: 0,
            instructions: 0,
        };
        let mut budget_used = 0u64;

        loop {
            let elapsed = u64::from(self.mcu.step(&mut self.sync));
            report.instructions += 1;

            if self.sync.maybe_service(&mut self.mcu, &mut self.peer) {
                report.ticks += 1;
            }

            report.cycles_run += elapsed;
            budget_used += elapsed.max(1);
            if budget_used >= target_cycles {
                break;
            }
        }

        self.next_index += 1;
        self.stats.frames += 1;
        self.stats.instructions += report.instructions;
        self.stats.mcu_cycles += report.cycles_run;
        debug!(
            frame = report.index,
            cycles = report.cycles_run,
            ticks = report.ticks,
            "frame complete"
        );
        report
    }

    /// Runs one frame with the configured budget and takes a diagnostic snapshot if due.
    pub fn next_frame(&mut self) -> (FrameReport, Option<DiagnosticSnapshot>) {
        let report = self.run_frame(self.frame_cycles);
        let snapshot = self.diagnostics.capture(&report, &self.mcu, &mut self.peer);
        (report, snapshot)
    }

    /// Runs frames until `host` breaks. Returns the number of frames run.
    pub fn run<H: FrameHost<M>>(&mut self, host: &mut H) -> u64 {
        let mut frames = 0;
        loop {
            let (report, snapshot) = self.next_frame();
            frames += 1;
            if host
                .after_frame(&report, snapshot.as_ref(), &mut self.mcu)
                .is_break()
            {
                return frames;
            }
        }
    }

    /// Statistics so far, including the controller's counters.
    pub fn stats(&self) -> BridgeStats {
        let mut stats = self.stats.clone();
        stats.sync = self.sync.counters();
        stats
    }

    /// The synchronization controller.
    pub const fn sync(&self) -> &SyncController {
        &self.sync
    }

    /// The MCU.
    pub const fn mcu(&self) -> &M {
        &self.mcu
    }

    /// Mutable access to the MCU, for use between frames.
    pub const fn mcu_mut(&mut self) -> &mut M {
        &mut self.mcu
    }

    /// The peer.
    pub const fn peer(&self) -> &P {
        &self.peer
    }

    /// Mutable access to the peer, for use between frames.
    pub const fn peer_mut(&mut self) -> &mut P {
        &mut self.peer
    }

    /// Consumes the scheduler and returns both simulators.
    pub fn into_parts(self) -> (M, P) {
        (self.mcu, self.peer)
    }
}
