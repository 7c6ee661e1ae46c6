//! Firmware symbol lookup.
//!
//! Tests and tools sometimes need the address of a firmware variable. Two sources are supported:
//! 1. **Linker map:** The text map written next to the UF2 (`<image>.elf.map`).
//! 2. **ELF:** The symbol table of the firmware ELF.
//!
//! A symbol that cannot be found is an error; there is no fallback between sources.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use object::read::elf::ElfFile32;
use object::{Endianness, Object, ObjectSymbol};

use crate::common::error::BridgeError;

/// Something that maps symbol names to addresses.
pub trait SymbolTable {
    /// Address of `symbol`.
    fn address_of(&self, symbol: &str) -> Result<u64, BridgeError>;
}

fn read(path: &Path) -> Result<Vec<u8>, BridgeError> {
    fs::read(path).map_err(|source| BridgeError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// GNU ld map file.
#[derive(Debug, Clone)]
pub struct MapFile {
    location: String,
    text: String,
}

impl MapFile {
    /// Reads the map file at `path`.
    pub fn open(path: &Path) -> Result<Self, BridgeError> {
        let text = String::from_utf8_lossy(&read(path)?).into_owned();
        Ok(Self::from_text(path.display().to_string(), text))
    }

    /// Wraps map text already in memory. `location` is used in error messages.
    pub fn from_text(location: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            location: location.into(),
            text: text.into(),
        }
    }

    /// Finds the address for the first occurrence of `symbol` that is followed, on the next
    /// line, by optional spaces, a lowercase `0x` hex address, and a space.
    ///
    /// This is the layout ld uses when a section name is too long for its column: the name
    /// sits on its own line and the address starts the next one.
    pub fn find(&self, symbol: &str) -> Option<u64> {
        if symbol.is_empty() {
            return None;
        }
        self.text
            .match_indices(symbol)
            .find_map(|(pos, _)| address_on_next_line(&self.text[pos + symbol.len()..]))
    }
}

fn address_on_next_line(rest: &str) -> Option<u64> {
    let newline = rest.find('\n')?;
    let next = rest[newline + 1..].trim_start_matches(' ');
    let hex = next.strip_prefix("0x")?;
    let digits = hex
        .bytes()
        .take_while(|b| b.is_ascii_digit() || (b'a'..=b'f').contains(b))
        .count();
    if digits == 0 || !hex[digits..].starts_with(' ') {
        return None;
    }
    u64::from_str_radix(&hex[..digits], 16).ok()
}

impl SymbolTable for MapFile {
    fn address_of(&self, symbol: &str) -> Result<u64, BridgeError> {
        self.find(symbol).ok_or_else(|| BridgeError::SymbolNotFound {
            symbol: symbol.to_string(),
            location: self.location.clone(),
        })
    }
}

/// Symbol table of a 32-bit ELF.
#[derive(Debug, Clone)]
pub struct ElfSymbols {
    location: String,
    symbols: HashMap<String, u64>,
}

impl ElfSymbols {
    /// Reads and indexes the ELF at `path`.
    pub fn open(path: &Path) -> Result<Self, BridgeError> {
        let data = read(path)?;
        Self::parse(path.display().to_string(), &data)
    }

    /// Indexes an ELF image already in memory.
    pub fn parse(location: impl Into<String>, data: &[u8]) -> Result<Self, BridgeError> {
        let elf = ElfFile32::<Endianness>::parse(data)?;
        let symbols = elf
            .symbols()
            .filter(|sym| sym.is_definition())
            .filter_map(|sym| Some((sym.name().ok()?.to_string(), sym.address())))
            .filter(|(name, _)| !name.is_empty())
            .collect();
        Ok(Self {
            location: location.into(),
            symbols,
        })
    }

    /// Number of named, defined symbols.
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    /// Returns `true` if the ELF defines no named symbols.
    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }
}

impl SymbolTable for ElfSymbols {
    fn address_of(&self, symbol: &str) -> Result<u64, BridgeError> {
        self.symbols
            .get(symbol)
            .copied()
            .ok_or_else(|| BridgeError::SymbolNotFound {
                symbol: symbol.to_string(),
                location: self.location.clone(),
            })
    }
}
