//! Loopback peer.
//!
//! A peer with no computer behind it: a wired-AND bus with two devices, an idle host and the
//! bridge. The firmware sees its own drive levels reflected back, plus whatever the host side
//! has been told to pull. Useful to bring up firmware without the native peer library and as a
//! deterministic peer in tests.

use tracing::info;

use crate::bus::{BusState, DeviceId, WiredBus};

use super::traits::PeerBus;

/// In-process peer over a [`WiredBus`].
#[derive(Debug, Clone)]
pub struct LoopbackPeer {
    bus: WiredBus,
    host: DeviceId,
    bridge: DeviceId,
    ticks: u64,
    initialized: bool,
}

impl LoopbackPeer {
    /// Creates a loopback peer with both devices releasing every line.
    pub fn new() -> Self {
        let mut bus = WiredBus::new();
        let (host, bridge) = match (bus.connect(false), bus.connect(false)) {
            (Some(host), Some(bridge)) => (host, bridge),
            _ => unreachable!("an empty bus has free slots"),
        };
        Self {
            bus,
            host,
            bridge,
            ticks: 0,
            initialized: false,
        }
    }

    /// Sets what the host side pulls, in bus polarity.
    pub fn set_host(&mut self, state: BusState) {
        self.bus.set_signals(self.host, state.bits());
    }

    /// The bridge's current contribution, in bus polarity.
    pub fn bridge_state(&self) -> BusState {
        self.bus.device_state(self.bridge)
    }

    /// Whether `init` has been called.
    pub const fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Ticks executed so far.
    pub const fn ticks(&self) -> u64 {
        self.ticks
    }
}

impl Default for LoopbackPeer {
    fn default() -> Self {
        Self::new()
    }
}

impl PeerBus for LoopbackPeer {
    fn init(&mut self) {
        self.initialized = true;
        self.ticks = 0;
    }

    fn tick(&mut self) {
        self.ticks += 1;
    }

    fn set_bus(&mut self, state: BusState) {
        self.bus.set_signals(self.bridge, state.bits());
    }

    fn bus(&mut self) -> BusState {
        self.bus.signals(None)
    }

    fn print_tick_count(&mut self) {
        info!(ticks = self.ticks, "loopback peer");
    }

    fn print_screen(&mut self) {
        info!(
            bus = %self.bus.signals(None),
            host = %self.bus.device_state(self.host),
            bridge = %self.bus.device_state(self.bridge),
            "loopback peer bus"
        );
    }

    fn tick_count(&mut self) -> Option<u64> {
        Some(self.ticks)
    }
}
