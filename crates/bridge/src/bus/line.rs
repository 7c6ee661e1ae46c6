//! IEC bus line definitions.

use std::fmt;

/// One line of the IEC serial bus.
///
/// The discriminant order matches the bit position in the packed bus-state byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BusLine {
    /// DATA, bit 0.
    Data,
    /// CLK, bit 1.
    Clock,
    /// ATN, bit 2.
    Attention,
    /// SRQ, bit 3. Defined in the layout but never driven or sampled by the bridge.
    ServiceRequest,
    /// RESET, bit 4.
    Reset,
}

impl BusLine {
    /// All five lines in bit order.
    pub const ALL: [Self; 5] = [
        Self::Data,
        Self::Clock,
        Self::Attention,
        Self::ServiceRequest,
        Self::Reset,
    ];

    /// The four lines the bridge drives and samples. SRQ is excluded.
    pub const HANDLED: [Self; 4] = [Self::Data, Self::Clock, Self::Attention, Self::Reset];

    /// Bit mask of this line in the bus-state byte.
    #[inline]
    pub const fn mask(self) -> u8 {
        match self {
            Self::Data => 1 << 0,
            Self::Clock => 1 << 1,
            Self::Attention => 1 << 2,
            Self::ServiceRequest => 1 << 3,
            Self::Reset => 1 << 4,
        }
    }

    /// Mask covering all five lines.
    pub const fn all_mask() -> u8 {
        Self::Data.mask()
            | Self::Clock.mask()
            | Self::Attention.mask()
            | Self::ServiceRequest.mask()
            | Self::Reset.mask()
    }

    /// Short upper-case mnemonic (`"DATA"`, `"CLK"`, ...).
    pub const fn mnemonic(self) -> &'static str {
        match self {
            Self::Data => "DATA",
            Self::Clock => "CLK",
            Self::Attention => "ATN",
            Self::ServiceRequest => "SRQ",
            Self::Reset => "RESET",
        }
    }
}

impl fmt::Display for BusLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.mnemonic())
    }
}
