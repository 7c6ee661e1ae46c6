//! GPIO pin levels.

use std::fmt;

/// Voltage level of an MCU pin.
///
/// The IEC bus is open-collector: a device asserts a line by pulling it to ground, so `Low`
/// means "asserted" in both directions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PinLevel {
    /// Pulled to ground.
    Low,
    /// Released; the pull-up holds it high.
    #[default]
    High,
}

impl PinLevel {
    /// Returns `true` if a pin at this level is asserting its bus line.
    #[inline]
    pub const fn is_asserting(self) -> bool {
        matches!(self, Self::Low)
    }

    /// Level a pin must be driven to so the MCU sees the line as `asserted` or released.
    #[inline]
    pub const fn for_asserted(asserted: bool) -> Self {
        if asserted { Self::Low } else { Self::High }
    }

    /// Converts from a raw native value (0 = low, anything else = high).
    #[inline]
    pub const fn from_raw(raw: u8) -> Self {
        if raw == 0 { Self::Low } else { Self::High }
    }

    /// Raw native value (0 = low, 1 = high).
    #[inline]
    pub const fn to_raw(self) -> u8 {
        match self {
            Self::Low => 0,
            Self::High => 1,
        }
    }
}

impl fmt::Display for PinLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Low => f.write_str("Low"),
            Self::High => f.write_str("High"),
        }
    }
}
