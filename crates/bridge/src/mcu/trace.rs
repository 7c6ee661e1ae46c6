//! Instruction trace events.
//!
//! The firmware marks interesting points in its instruction stream with inline tags. The MCU
//! simulator reports each executed instruction that carries one. Tag text is classified once,
//! here at the boundary, into a closed enum so nothing downstream compares strings.

use crate::common::constants::TICK_SENTINEL;

/// Classified trace tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TraceTag {
    /// The firmware reached a point where the peer must advance one tick.
    Tick,
    /// Any other marker; diagnostic only.
    Marker(String),
}

impl TraceTag {
    /// Classifies raw tag text. Surrounding whitespace is ignored (`"tick "` is a tick).
    pub fn from_raw(raw: &str) -> Self {
        let tag = raw.trim();
        if tag == TICK_SENTINEL {
            Self::Tick
        } else {
            Self::Marker(tag.to_string())
        }
    }
}

/// One executed-instruction notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TraceEvent {
    /// Program counter of the instruction.
    pub pc: u32,
    /// MCU cycle counter after the instruction.
    pub cycles: u64,
    /// Tag attached to the instruction, if any.
    pub tag: Option<TraceTag>,
}

impl TraceEvent {
    /// Convenience constructor for a tick sentinel at `pc`.
    pub const fn tick(pc: u32, cycles: u64) -> Self {
        Self {
            pc,
            cycles,
            tag: Some(TraceTag::Tick),
        }
    }

    /// Returns `true` if this is the tick sentinel.
    pub const fn is_tick(&self) -> bool {
        matches!(self.tag, Some(TraceTag::Tick))
    }
}

/// Subscriber for trace events, handed to [`Mcu::step`](super::Mcu::step).
pub trait TraceSink {
    /// Called for every trace event the step produces, in order.
    fn on_trace(&mut self, event: &TraceEvent);
}

/// Sink that drops everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl TraceSink for NullSink {
    fn on_trace(&mut self, _event: &TraceEvent) {}
}

impl TraceSink for Vec<TraceEvent> {
    fn on_trace(&mut self, event: &TraceEvent) {
        self.push(event.clone());
    }
}
