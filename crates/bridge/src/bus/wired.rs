//! Wired-AND IEC bus.
//!
//! Every line has a pull-up; any connected device can pull it low, and it reads high only when
//! nobody does. Devices write their own drive byte in their own logic: a device whose outputs go
//! through inverters on the real board is connected with `invert = true`, and its byte is flipped
//! before it is combined. Up to four devices share one bus.

use tracing::trace;

use super::line::BusLine;
use super::state::BusState;

/// Maximum number of devices on one bus.
pub const MAX_DEVICES: usize = 4;

/// Slot handle returned by [`WiredBus::connect`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DeviceId(u8);

impl DeviceId {
    /// Slot index on the bus.
    pub const fn slot(self) -> usize {
        self.0 as usize
    }
}

#[derive(Debug, Clone, Copy, Default)]
struct Slot {
    in_use: bool,
    invert_mask: u8,
    signals: u8,
}

impl Slot {
    /// The device's drive byte converted to bus polarity (clear bit = pulling).
    const fn effective(&self) -> u8 {
        (self.signals ^ self.invert_mask) | !BusLine::all_mask()
    }
}

/// Open-collector bus shared by up to [`MAX_DEVICES`] devices.
#[derive(Debug, Clone, Default)]
pub struct WiredBus {
    slots: [Slot; MAX_DEVICES],
}

impl WiredBus {
    /// Creates an empty bus; every line reads released.
    pub fn new() -> Self {
        Self::default()
    }

    /// Attaches a device in the first free slot, with all its lines released.
    ///
    /// Returns `None` when every slot is taken.
    pub fn connect(&mut self, invert: bool) -> Option<DeviceId> {
        let index = self.slots.iter().position(|s| !s.in_use)?;
        let invert_mask = if invert { BusLine::all_mask() } else { 0 };
        self.slots[index] = Slot {
            in_use: true,
            invert_mask,
            signals: 0xFF ^ invert_mask,
        };
        trace!(slot = index, invert, "iec device connected");
        Some(DeviceId(index as u8))
    }

    /// Detaches a device. Its lines stop contributing immediately.
    pub fn disconnect(&mut self, device: DeviceId) {
        if let Some(slot) = self.slots.get_mut(device.slot()) {
            slot.in_use = false;
            trace!(slot = device.slot(), "iec device disconnected");
        }
    }

    /// Number of connected devices.
    pub fn device_count(&self) -> usize {
        self.slots.iter().filter(|s| s.in_use).count()
    }

    /// Replaces a device's drive byte (in the device's own logic).
    pub fn set_signals(&mut self, device: DeviceId, signals: u8) {
        if let Some(slot) = self.slots.get_mut(device.slot()) {
            if slot.in_use && slot.signals != signals {
                trace!(
                    slot = device.slot(),
                    from = slot.signals,
                    to = signals,
                    "iec device signals changed"
                );
                slot.signals = signals;
            }
        }
    }

    /// Returns the device's own drive byte in bus polarity.
    pub fn device_state(&self, device: DeviceId) -> BusState {
        self.slots
            .get(device.slot())
            .filter(|s| s.in_use)
            .map_or(BusState::IDLE, |s| BusState(s.effective()))
    }

    /// Resolves the combined bus state.
    ///
    /// With `requesting = Some(device)` the result is flipped into that device's logic, so an
    /// inverted device reads a pulled line as a set bit.
    pub fn signals(&self, requesting: Option<DeviceId>) -> BusState {
        let combined = self
            .slots
            .iter()
            .filter(|s| s.in_use)
            .fold(0xFF, |acc, s| acc & s.effective());

        let invert = requesting
            .and_then(|d| self.slots.get(d.slot()))
            .map_or(0, |s| s.invert_mask);

        BusState(combined ^ invert)
    }
}
