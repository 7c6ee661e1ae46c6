
/// Trace tag classification and sinks.
pub mod trace;
