//! System-wide constants.
//!
//! Values fixed by the RP2040 memory map, the UF2 container format, and the
//! clocking the drive firmware is built for.

/// Base address of the RP2040 XIP flash window.
pub const FLASH_BASE: u32 = 0x1000_0000;

/// Size of the flash window the firmware may target (2 MiB on a Pico board).
pub const FLASH_SIZE: u32 = 2 * 1024 * 1024;

/// Program counter the bridge starts the MCU at (first flash byte, boot stage 2).
pub const INITIAL_PC: u32 = FLASH_BASE;

/// RP2040 system clock the firmware runs at, in Hz.
pub const MCU_CLOCK_HZ: u64 = 125_000_000;

/// Frames per emulated second; one frame is `MCU_CLOCK_HZ / FRAMES_PER_SECOND` cycles.
pub const FRAMES_PER_SECOND: u64 = 20;

/// Size of one UF2 block on disk.
pub const UF2_BLOCK_SIZE: usize = 512;

/// First UF2 start magic (`"UF2\n"`).
pub const UF2_MAGIC_START0: u32 = 0x0A32_4655;

/// Second UF2 start magic.
pub const UF2_MAGIC_START1: u32 = 0x9E5D_5157;

/// UF2 end magic, stored in the last word of the block.
pub const UF2_MAGIC_END: u32 = 0x0AB1_6F30;

/// Offset of the payload inside a UF2 block.
pub const UF2_PAYLOAD_OFFSET: usize = 32;

/// Largest payload a UF2 block can carry.
pub const UF2_MAX_PAYLOAD: usize = 476;

/// UF2 flag: block is not destined for main flash and must be skipped.
pub const UF2_FLAG_NOT_MAIN_FLASH: u32 = 0x0000_0001;

/// Trace tag the firmware emits when the peer should advance one tick.
pub const TICK_SENTINEL: &str = "tick";
