//! UF2 Firmware Loader.
//!
//! This module reads the drive firmware and places it into MCU flash. It performs:
//! 1. **Block decoding:** Splits the file into 512-byte UF2 blocks and checks their framing.
//! 2. **Placement:** Copies each payload to `target - flash_base` in the MCU's flash.
//! 3. **Validation:** Rejects blocks whose payload would fall outside the flash window.
//!
//! A trailing partial block is ignored, as is any block flagged as not destined for main flash.

use std::fs;
use std::io;
use std::path::Path;

use tracing::{debug, warn};

use crate::common::constants::{
    UF2_BLOCK_SIZE, UF2_FLAG_NOT_MAIN_FLASH, UF2_MAGIC_END, UF2_MAGIC_START0, UF2_MAGIC_START1,
    UF2_MAX_PAYLOAD, UF2_PAYLOAD_OFFSET,
};
use crate::common::error::{BridgeError, Uf2Error};
use crate::config::GeneralConfig;
use crate::mcu::Mcu;

/// One decoded UF2 block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Uf2Block {
    /// Block flags.
    pub flags: u32,
    /// Absolute target address of the payload.
    pub target: u32,
    /// Sequence number of this block.
    pub block_no: u32,
    /// Total number of blocks in the file.
    pub num_blocks: u32,
    /// Family ID (or file size, depending on flags).
    pub family_id: u32,
    /// Payload bytes.
    pub payload: Vec<u8>,
}

impl Uf2Block {
    /// Returns `true` if the block is flagged as not destined for main flash.
    pub const fn is_main_flash(&self) -> bool {
        self.flags & UF2_FLAG_NOT_MAIN_FLASH == 0
    }
}

/// Address range the image is allowed to target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlashWindow {
    /// First flash address.
    pub base: u32,
    /// Window size in bytes.
    pub size: u32,
}

impl FlashWindow {
    /// Offset of `[target, target + len)` inside the window, if it fits.
    pub fn offset_of(&self, target: u32, len: usize) -> Option<u32> {
        let offset = target.checked_sub(self.base)?;
        let end = u64::from(offset) + len as u64;
        (end <= u64::from(self.size)).then_some(offset)
    }
}

impl From<&GeneralConfig> for FlashWindow {
    fn from(general: &GeneralConfig) -> Self {
        Self {
            base: general.flash_base,
            size: general.flash_size,
        }
    }
}

/// What a load placed into flash.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadSummary {
    /// Blocks copied into flash.
    pub blocks_loaded: usize,
    /// Blocks skipped because they are not for main flash.
    pub blocks_skipped: usize,
    /// Payload bytes copied.
    pub bytes: usize,
}

fn word(block: &[u8], offset: usize) -> u32 {
    let mut bytes = [0u8; 4];
    bytes.copy_from_slice(&block[offset..offset + 4]);
    u32::from_le_bytes(bytes)
}

/// Decodes one 512-byte block.
///
/// # Arguments
///
/// * `index` - Position of the block in the file, used in error reports.
/// * `block` - Exactly one block of raw bytes.
pub fn decode_block(index: usize, block: &[u8; UF2_BLOCK_SIZE]) -> Result<Uf2Block, Uf2Error> {
    for (offset, expected) in [
        (0, UF2_MAGIC_START0),
        (4, UF2_MAGIC_START1),
        (UF2_BLOCK_SIZE - 4, UF2_MAGIC_END),
    ] {
        let found = word(block, offset);
        if found != expected {
            return Err(Uf2Error::BadMagic { index, found });
        }
    }

    let size = word(block, 16) as usize;
    if size > UF2_MAX_PAYLOAD {
        return Err(Uf2Error::PayloadTooLarge {
            index,
            size,
            max: UF2_MAX_PAYLOAD,
        });
    }

    Ok(Uf2Block {
        flags: word(block, 8),
        target: word(block, 12),
        block_no: word(block, 20),
        num_blocks: word(block, 24),
        family_id: word(block, 28),
        payload: block[UF2_PAYLOAD_OFFSET..UF2_PAYLOAD_OFFSET + size].to_vec(),
    })
}

/// Decodes every whole block in `data`. A trailing partial block is ignored.
pub fn parse_uf2(data: &[u8]) -> Result<Vec<Uf2Block>, Uf2Error> {
    data.chunks_exact(UF2_BLOCK_SIZE)
        .enumerate()
        .map(|(index, chunk)| {
            let mut block = [0u8; UF2_BLOCK_SIZE];
            block.copy_from_slice(chunk);
            decode_block(index, &block)
        })
        .collect()
}

/// Decodes `data` and copies every main-flash payload into the MCU.
pub fn load_uf2<M: Mcu + ?Sized>(
    mcu: &mut M,
    data: &[u8],
    window: FlashWindow,
) -> Result<LoadSummary, BridgeError> {
    let mut summary = LoadSummary::default();

    for (index, block) in parse_uf2(data)?.into_iter().enumerate() {
        if !block.is_main_flash() {
            warn!(block = index, flags = block.flags, "skipping non-flash UF2 block");
            summary.blocks_skipped += 1;
            continue;
        }

        let offset = window
            .offset_of(block.target, block.payload.len())
            .ok_or(Uf2Error::OutOfFlash {
                index,
                target: block.target,
                len: block.payload.len(),
            })?;

        mcu.load_flash(offset, &block.payload)?;
        summary.blocks_loaded += 1;
        summary.bytes += block.payload.len();
    }

    debug!(
        blocks = summary.blocks_loaded,
        skipped = summary.blocks_skipped,
        bytes = summary.bytes,
        "firmware placed in flash"
    );
    Ok(summary)
}

/// Reads a file, reporting a missing file as [`BridgeError::FirmwareNotFound`].
pub fn read_firmware(path: &Path) -> Result<Vec<u8>, BridgeError> {
    fs::read(path).map_err(|source| {
        if source.kind() == io::ErrorKind::NotFound {
            BridgeError::FirmwareNotFound(path.to_path_buf())
        } else {
            BridgeError::Io {
                path: path.to_path_buf(),
                source,
            }
        }
    })
}

/// Reads the UF2 file at `path` and loads it into the MCU.
pub fn load_firmware<M: Mcu + ?Sized>(
    mcu: &mut M,
    path: &Path,
    window: FlashWindow,
) -> Result<LoadSummary, BridgeError> {
    let data = read_firmware(path)?;
    load_uf2(mcu, &data, window)
}
