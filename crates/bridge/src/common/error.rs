//! Bridge error definitions.
//!
//! Every failure the bridge can report is unrecoverable for the run. The variants exist so the
//! operator gets a precise message, not so callers can retry:
//! 1. **Startup:** Missing firmware image, unreadable files, bad configuration.
//! 2. **Lookup:** A requested firmware symbol is absent.
//! 3. **Native interop:** A simulator library or one of its exports cannot be loaded.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while decoding a UF2 firmware image.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Uf2Error {
    /// One of the three block magics does not match.
    #[error("block {index}: bad magic {found:#010x}")]
    BadMagic {
        /// Zero-based block index in the file.
        index: usize,
        /// The word found where a magic was expected.
        found: u32,
    },

    /// The payload size field exceeds what a block can carry.
    #[error("block {index}: payload size {size} exceeds {max}")]
    PayloadTooLarge {
        /// Zero-based block index in the file.
        index: usize,
        /// Declared payload size.
        size: usize,
        /// Largest payload a block may hold.
        max: usize,
    },

    /// The payload would land outside the flash window.
    #[error("block {index}: target {target:#010x}+{len} outside flash window")]
    OutOfFlash {
        /// Zero-based block index in the file.
        index: usize,
        /// Declared target address.
        target: u32,
        /// Payload length in bytes.
        len: usize,
    },
}

/// Top-level bridge error.
#[derive(Debug, Error)]
pub enum BridgeError {
    /// The firmware image is not at the expected path.
    #[error("firmware not found at {}", .0.display())]
    FirmwareNotFound(PathBuf),

    /// A file exists but could not be read.
    #[error("could not read {}: {source}", .path.display())]
    Io {
        /// File being read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The firmware image is malformed.
    #[error("malformed firmware image: {0}")]
    Image(#[from] Uf2Error),

    /// A requested symbol is not in the map file or symbol table.
    #[error("could not find offset of symbol {symbol} in {location}")]
    SymbolNotFound {
        /// Requested symbol name.
        symbol: String,
        /// Where the lookup was performed (file name).
        location: String,
    },

    /// The ELF file could not be parsed.
    #[error("could not parse ELF: {0}")]
    Elf(#[from] object::Error),

    /// A native simulator library failed to load.
    #[error("could not load {}: {reason}", .path.display())]
    Library {
        /// Library path handed to `dlopen`.
        path: PathBuf,
        /// Text reported by `dlerror`.
        reason: String,
    },

    /// A native simulator library lacks a required export.
    #[error("{library} does not export {symbol}")]
    MissingSymbol {
        /// Library display name.
        library: String,
        /// Missing export name.
        symbol: String,
    },

    /// The configuration file could not be parsed.
    #[error("invalid configuration: {0}")]
    Config(#[from] serde_json::Error),

    /// Forwarded UART output could not be written to the console.
    #[error("could not write console output: {0}")]
    Console(#[source] std::io::Error),
}

impl BridgeError {
    /// Process exit status the runner reports for this error.
    ///
    /// Every error is fatal for the run and maps to `1`.
    pub const fn exit_code(&self) -> i32 {
        1
    }

    /// Operator hint printed after the error message, if any.
    pub const fn hint(&self) -> Option<&'static str> {
        match self {
            Self::FirmwareNotFound(_) => {
                Some("Please build the firmware first: cd rp2040 && ./build.sh")
            }
            Self::Library { .. } => {
                Some("Build the simulator library next to the runner or pass its path explicitly")
            }
            _ => None,
        }
    }
}
