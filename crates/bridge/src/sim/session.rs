//! Startup sequence.
//!
//! Order matters: the firmware image must be known to exist before anything touches the peer,
//! so a missing build fails fast without bringing the peer up. Then the peer is initialized, the
//! image is placed in flash, and the program counter is set.

use std::path::Path;

use tracing::info;

use crate::common::error::BridgeError;
use crate::config::BridgeConfig;
use crate::mcu::Mcu;
use crate::peer::PeerBus;

use super::loader::{self, FlashWindow};
use super::scheduler::FrameScheduler;

/// Fails with [`BridgeError::FirmwareNotFound`] unless `path` names an existing file.
pub fn ensure_firmware(path: &Path) -> Result<(), BridgeError> {
    if path.is_file() {
        Ok(())
    } else {
        Err(BridgeError::FirmwareNotFound(path.to_path_buf()))
    }
}

/// Brings both simulators up and hands them to a new [`FrameScheduler`].
///
/// # Arguments
///
/// * `config` - Paths, flash window, initial PC, and pin assignment.
/// * `mcu` - An MCU with empty flash.
/// * `peer` - A peer that has not been initialized yet.
///
/// # Returns
///
/// A scheduler ready to run frames, or the first startup error. If the firmware is missing the
/// peer's `init` is never called.
pub fn start<M: Mcu, P: PeerBus>(
    config: &BridgeConfig,
    mut mcu: M,
    mut peer: P,
) -> Result<FrameScheduler<M, P>, BridgeError> {
    let firmware = &config.paths.firmware;
    ensure_firmware(firmware)?;

    info!("initializing peer");
    peer.init();

    info!(path = %firmware.display(), "loading firmware");
    let summary = loader::load_firmware(&mut mcu, firmware, FlashWindow::from(&config.general))?;
    info!(
        blocks = summary.blocks_loaded,
        bytes = summary.bytes,
        "firmware loaded"
    );

    mcu.set_pc(config.general.initial_pc);
    Ok(FrameScheduler::new(mcu, peer, config))
}
