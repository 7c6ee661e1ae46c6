//! MCU adapter trait.
//!
//! This is everything the bridge asks of the instruction-set simulator. It provides:
//! 1. **Setup:** Flash image loading and the initial program counter.
//! 2. **Execution:** Single-instruction stepping that reports elapsed cycles and trace events.
//! 3. **GPIO:** Per-pin output level reads and input level writes.
//! 4. **Console:** Draining bytes the firmware wrote to its UART.
//!
//! Implementations are single-instance and not reentrant; the frame scheduler owns the MCU and
//! is the only caller.

use crate::common::error::BridgeError;

use super::pin::PinLevel;
use super::trace::TraceSink;

/// Instruction-set simulator as seen by the bridge.
pub trait Mcu {
    /// Copies `data` into flash at `offset` bytes from the flash base.
    fn load_flash(&mut self, offset: u32, data: &[u8]) -> Result<(), BridgeError>;

    /// Sets the program counter.
    fn set_pc(&mut self, pc: u32);

    /// Executes one instruction and returns the cycles it took.
    ///
    /// Trace events raised by the instruction are delivered to `sink` before this returns.
    fn step(&mut self, sink: &mut dyn TraceSink) -> u32;

    /// Level the firmware is driving on `pin`.
    fn gpio_output(&self, pin: u8) -> PinLevel;

    /// Sets the level the firmware reads on `pin`.
    fn set_gpio_input(&mut self, pin: u8, level: PinLevel);

    /// Moves any pending UART output into `out`. Default: the MCU has no console.
    fn drain_uart(&mut self, out: &mut Vec<u8>) {
        let _ = out;
    }

    /// Total cycles executed so far, if the simulator tracks them. Default: `0`.
    fn cycles(&self) -> u64 {
        0
    }
}
