//! Bus-state codec.
//!
//! Stateless translation between the MCU's asserted flags and the peer's active-low byte.
//! Only DATA, CLK, ATN and RESET are carried; the SRQ bit is always left released on encode
//! and never derived on decode.

use super::line::BusLine;
use super::state::{AssertedFlags, BusState};

/// Packs asserted flags into a bus-state byte.
///
/// Starts from all bits set and clears the bit of every asserted line.
pub fn encode(flags: AssertedFlags) -> BusState {
    BusLine::HANDLED
        .iter()
        .filter(|&&line| flags.get(line))
        .fold(BusState::IDLE, |state, &line| state.with_asserted(line))
}

/// Unpacks a bus-state byte into asserted flags. A line is asserted iff its bit is clear.
pub fn decode(state: BusState) -> AssertedFlags {
    AssertedFlags::from_fn(|line| state.is_asserted(line))
}
