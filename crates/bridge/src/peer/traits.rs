//! Peer bus service trait.

use crate::bus::BusState;

/// The peer simulator as seen by the bridge.
///
/// One instance per process, not thread-safe, not reentrant. Calls are synchronous and assumed
/// to succeed; there is no timeout or retry.
pub trait PeerBus {
    /// Brings the peer up. Called once, after the firmware image is known to exist.
    fn init(&mut self);

    /// Advances the peer by one bus-synchronization unit.
    fn tick(&mut self);

    /// Replaces the bridge's contribution to the bus.
    fn set_bus(&mut self, state: BusState);

    /// Combined bus state as the peer sees it (all participants).
    fn bus(&mut self) -> BusState;

    /// Prints the peer's tick counter. Default: nothing.
    fn print_tick_count(&mut self) {}

    /// Prints a snapshot of the peer's display. Default: nothing.
    fn print_screen(&mut self) {}

    /// Ticks executed so far, if the peer reports them.
    fn tick_count(&mut self) -> Option<u64> {
        None
    }
}
