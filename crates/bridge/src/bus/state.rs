//! Bus-state byte and asserted-line flags.
//!
//! `BusState` is the peer's view: one byte, one bit per line, active-low (a clear bit means the
//! line is pulled). `AssertedFlags` is the MCU side's logical view: `true` means "asserting".

use std::fmt;

use crate::mcu::PinLevel;

use super::line::BusLine;

/// Packed, active-low bus state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BusState(pub u8);

impl BusState {
    /// Every line released.
    pub const IDLE: Self = Self(0xFF);

    /// Returns the raw byte.
    #[inline]
    pub const fn bits(self) -> u8 {
        self.0
    }

    /// Returns `true` if `line` is pulled (its bit is clear).
    #[inline]
    pub const fn is_asserted(self, line: BusLine) -> bool {
        self.0 & line.mask() == 0
    }

    /// Returns a copy with `line` pulled.
    #[inline]
    #[must_use]
    pub const fn with_asserted(self, line: BusLine) -> Self {
        Self(self.0 & !line.mask())
    }

    /// Four-character status text in CLK, DATA, ATN, RESET order.
    ///
    /// An upper-case letter marks a pulled line, lower-case a released one, e.g. `"Cdar"`.
    pub fn status_text(self) -> String {
        [
            (BusLine::Clock, 'c'),
            (BusLine::Data, 'd'),
            (BusLine::Attention, 'a'),
            (BusLine::Reset, 'r'),
        ]
        .iter()
        .map(|&(line, c)| {
            if self.is_asserted(line) {
                c.to_ascii_uppercase()
            } else {
                c
            }
        })
        .collect()
    }
}

impl Default for BusState {
    fn default() -> Self {
        Self::IDLE
    }
}

impl From<u8> for BusState {
    fn from(bits: u8) -> Self {
        Self(bits)
    }
}

impl From<BusState> for u8 {
    fn from(state: BusState) -> Self {
        state.0
    }
}

impl fmt::Display for BusState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#04x} [{}]", self.0, self.status_text())
    }
}

/// Per-line "this side is asserting" flags for the four handled lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct AssertedFlags {
    /// DATA pulled.
    pub data: bool,
    /// CLK pulled.
    pub clock: bool,
    /// ATN pulled.
    pub attention: bool,
    /// RESET pulled.
    pub reset: bool,
}

impl AssertedFlags {
    /// No line asserted.
    pub const RELEASED: Self = Self {
        data: false,
        clock: false,
        attention: false,
        reset: false,
    };

    /// Returns the flag for `line`. SRQ is not tracked and always reads `false`.
    pub const fn get(&self, line: BusLine) -> bool {
        match line {
            BusLine::Data => self.data,
            BusLine::Clock => self.clock,
            BusLine::Attention => self.attention,
            BusLine::Reset => self.reset,
            BusLine::ServiceRequest => false,
        }
    }

    /// Sets the flag for `line`. Setting SRQ has no effect.
    pub const fn set(&mut self, line: BusLine, asserted: bool) {
        match line {
            BusLine::Data => self.data = asserted,
            BusLine::Clock => self.clock = asserted,
            BusLine::Attention => self.attention = asserted,
            BusLine::Reset => self.reset = asserted,
            BusLine::ServiceRequest => {}
        }
    }

    /// Builds a record by asking `asserted` about each handled line.
    pub fn from_fn(mut asserted: impl FnMut(BusLine) -> bool) -> Self {
        let mut flags = Self::RELEASED;
        for line in BusLine::HANDLED {
            flags.set(line, asserted(line));
        }
        flags
    }

    /// Builds a record from pin levels. A pin pulled low is asserting its line.
    pub fn from_levels(mut level: impl FnMut(BusLine) -> PinLevel) -> Self {
        Self::from_fn(|line| level(line).is_asserting())
    }

    /// Pin level that presents `line` to the MCU as asserted (`Low`) or released (`High`).
    pub const fn level_of(&self, line: BusLine) -> PinLevel {
        PinLevel::for_asserted(self.get(line))
    }
}
