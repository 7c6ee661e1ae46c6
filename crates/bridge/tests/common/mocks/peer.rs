use std::collections::VecDeque;

use iecbridge_core::bus::BusState;
use iecbridge_core::peer::PeerBus;
use mockall::mock;

mock! {
    pub Peer {}
    impl PeerBus for Peer {
        fn init(&mut self);
        fn tick(&mut self);
        fn set_bus(&mut self, state: BusState);
        fn bus(&mut self) -> BusState;
        fn print_tick_count(&mut self);
        fn print_screen(&mut self);
        fn tick_count(&mut self) -> Option<u64>;
    }
}

/// One call made on a [`RecordingPeer`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PeerCall {
    Init,
    Tick,
    SetBus(BusState),
    GetBus,
    PrintScreen,
}

/// Peer that records every call and answers `bus()` from a script.
///
/// Scripted states are handed out one per `bus()` call; after that `fallback` is returned.
#[derive(Debug)]
pub struct RecordingPeer {
    pub calls: Vec<PeerCall>,
    pub scripted: VecDeque<BusState>,
    pub fallback: BusState,
}

impl Default for RecordingPeer {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordingPeer {
    pub fn new() -> Self {
        Self {
            calls: Vec::new(),
            scripted: VecDeque::new(),
            fallback: BusState::IDLE,
        }
    }

    pub fn with_bus(mut self, states: impl IntoIterator<Item = BusState>) -> Self {
        self.scripted.extend(states);
        self
    }

    pub fn count(&self, wanted: fn(&PeerCall) -> bool) -> usize {
        self.calls.iter().filter(|c| wanted(c)).count()
    }

    pub fn ticks(&self) -> usize {
        self.count(|c| matches!(c, PeerCall::Tick))
    }

    pub fn pushes(&self) -> Vec<BusState> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                PeerCall::SetBus(state) => Some(*state),
                _ => None,
            })
            .collect()
    }
}

impl PeerBus for RecordingPeer {
    fn init(&mut self) {
        self.calls.push(PeerCall::Init);
    }

    fn tick(&mut self) {
        self.calls.push(PeerCall::Tick);
    }

    fn set_bus(&mut self, state: BusState) {
        self.calls.push(PeerCall::SetBus(state));
    }

    fn bus(&mut self) -> BusState {
        self.calls.push(PeerCall::GetBus);
        self.scripted.pop_front().unwrap_or(self.fallback)
    }

    fn print_screen(&mut self) {
        self.calls.push(PeerCall::PrintScreen);
    }
}
