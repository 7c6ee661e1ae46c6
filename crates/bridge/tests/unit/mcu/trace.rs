//! # Trace Event Tests
//!
//! Tag classification at the MCU boundary and the provided sinks.

use iecbridge_core::mcu::trace::NullSink;
use iecbridge_core::mcu::{TraceEvent, TraceSink, TraceTag};
use rstest::rstest;

#[rstest]
#[case("tick")]
#[case("tick ")]
#[case("  tick\n")]
fn test_tick_sentinel_ignores_surrounding_whitespace(#[case] raw: &str) {
    assert_eq!(TraceTag::from_raw(raw), TraceTag::Tick);
}

#[rstest]
#[case("ticks")]
#[case("TICK")]
#[case("atn low")]
#[case("")]
fn test_other_text_is_a_marker(#[case] raw: &str) {
    assert_eq!(TraceTag::from_raw(raw), TraceTag::Marker(raw.trim().to_string()));
}

#[test]
fn test_event_tick_constructor() {
    let event = TraceEvent::tick(0x1000_0100, 42);
    assert!(event.is_tick());
    assert_eq!(event.pc, 0x1000_0100);

    let untagged = TraceEvent {
        pc: 0,
        cycles: 0,
        tag: None,
    };
    assert!(!untagged.is_tick());
}

#[test]
fn test_vec_sink_collects_in_order() {
    let mut events: Vec<TraceEvent> = Vec::new();
    events.on_trace(&TraceEvent::tick(1, 1));
    events.on_trace(&TraceEvent {
        pc: 2,
        cycles: 2,
        tag: Some(TraceTag::Marker("x".into())),
    });
    assert_eq!(events.len(), 2);
    assert!(events[0].is_tick());
    assert_eq!(events[1].pc, 2);
}

#[test]
fn test_null_sink_accepts_everything() {
    let mut sink = NullSink;
    sink.on_trace(&TraceEvent::tick(0, 0));
}
