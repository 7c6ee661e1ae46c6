//! Synchronization Controller.
//!
//! The controller is the only code that talks to the peer. It performs:
//! 1. **Tick requests:** Listens to MCU trace events and raises a sticky request on the tick sentinel.
//! 2. **Servicing:** After each MCU step, if a request is pending, samples the MCU's bus pins,
//!    pushes the encoded state to the peer (only when it changed), advances the peer one tick,
//!    and drives the peer's combined bus state back onto the MCU's input pins.
//!
//! At most one peer tick happens per MCU step; sentinels that arrive while a request is
//! already pending are collapsed into it.

use tracing::{debug, trace};

use crate::bus::{self, AssertedFlags, BusLine, BusState};
use crate::config::PinConfig;
use crate::mcu::{Mcu, TraceEvent, TraceSink, TraceTag};
use crate::peer::PeerBus;
use crate::stats::SyncCounters;

/// Sticky "the peer owes us a tick" flag.
///
/// Not a queue: raising it N times before it is taken yields exactly one service.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickRequest {
    pending: bool,
    collapsed: u64,
}

impl TickRequest {
    /// Raises the request. Returns `false` if it was already pending.
    pub const fn raise(&mut self) -> bool {
        if self.pending {
            self.collapsed += 1;
            false
        } else {
            self.pending = true;
            true
        }
    }

    /// Whether a tick is pending.
    pub const fn is_pending(&self) -> bool {
        self.pending
    }

    /// Clears the request and returns whether one was pending.
    pub const fn take(&mut self) -> bool {
        let pending = self.pending;
        self.pending = false;
        pending
    }

    /// Raises that were absorbed by an already pending request.
    pub const fn collapsed(&self) -> u64 {
        self.collapsed
    }
}

/// Couples the MCU's GPIO to the peer's bus, one tick at a time.
#[derive(Debug, Clone)]
pub struct SyncController {
    pins: PinConfig,
    last_encoded: BusState,
    request: TickRequest,
    counters: SyncCounters,
}

impl SyncController {
    /// Creates a controller with an idle last-pushed state and no pending request.
    pub fn new(pins: PinConfig) -> Self {
        Self {
            pins,
            last_encoded: BusState::IDLE,
            request: TickRequest::default(),
            counters: SyncCounters::default(),
        }
    }

    /// The last state pushed to the peer (idle before the first push).
    pub const fn last_encoded(&self) -> BusState {
        self.last_encoded
    }

    /// Whether a tick request is waiting to be serviced.
    pub const fn tick_pending(&self) -> bool {
        self.request.is_pending()
    }

    /// Counters accumulated so far.
    pub const fn counters(&self) -> SyncCounters {
        let mut counters = self.counters;
        counters.ticks_collapsed = self.request.collapsed();
        counters
    }

    /// Reads the MCU's drive levels on the four handled lines. Low means asserted.
    pub fn sample_outputs<M: Mcu + ?Sized>(&self, mcu: &M) -> AssertedFlags {
        AssertedFlags::from_levels(|line| mcu.gpio_output(self.pins.line_pin(line)))
    }

    /// Drives the MCU's input pins so that it sees every asserted line as active.
    pub fn drive_inputs<M: Mcu + ?Sized>(&self, mcu: &mut M, flags: AssertedFlags) {
        for line in BusLine::HANDLED {
            mcu.set_gpio_input(self.pins.line_pin(line), flags.level_of(line));
        }
    }

    /// Services a pending tick request. Returns `true` if the peer was ticked.
    ///
    /// With no request pending this has no side effects at all.
    pub fn maybe_service<M, P>(&mut self, mcu: &mut M, peer: &mut P) -> bool
    where
        M: Mcu + ?Sized,
        P: PeerBus + ?Sized,
    {
        if !self.request.is_pending() {
            return false;
        }

        let encoded = bus::encode(self.sample_outputs(mcu));
        if encoded == self.last_encoded {
            self.counters.pushes_suppressed += 1;
        } else {
            trace!(from = %self.last_encoded, to = %encoded, "push bus state");
            peer.set_bus(encoded);
            self.last_encoded = encoded;
            self.counters.pushes += 1;
        }

        peer.tick();
        self.counters.ticks += 1;

        let combined = peer.bus();
        self.drive_inputs(mcu, bus::decode(combined));

        let _ = self.request.take();
        true
    }
}

impl TraceSink for SyncController {
    fn on_trace(&mut self, event: &TraceEvent) {
        match &event.tag {
            Some(TraceTag::Tick) => {
                let _ = self.request.raise();
            }
            Some(TraceTag::Marker(text)) => {
                self.counters.markers += 1;
                debug!(
                    pc = %format!("{:#010x}", event.pc),
                    cycles = event.cycles,
                    "{text}"
                );
            }
            None => {}
        }
    }
}
