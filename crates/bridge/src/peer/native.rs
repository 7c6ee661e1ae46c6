//! Native C64 peer binding.
//!
//! The peer simulator is a shared library exporting a fixed set of `c64_*` functions. All of its
//! state is process-global inside the library, which is why there is exactly one `NativePeer`
//! per process.

use std::fmt;
use std::path::Path;

use crate::bus::BusState;
use crate::common::error::BridgeError;
use crate::ffi::NativeLibrary;
use crate::ffi::library::cast_fn;

use super::traits::PeerBus;

type VoidFn = unsafe extern "C" fn();
type SetIecFn = unsafe extern "C" fn(u8);
type GetIecFn = unsafe extern "C" fn() -> u8;
type TickCountFn = unsafe extern "C" fn() -> u64;

/// Peer backed by the native `c64_*` library.
pub struct NativePeer {
    init: VoidFn,
    tick: VoidFn,
    set_iec: SetIecFn,
    get_iec: GetIecFn,
    print_tick_count: VoidFn,
    print_screen: VoidFn,
    tick_count: Option<TickCountFn>,
    lib: NativeLibrary,
}

impl NativePeer {
    /// Opens the library at `path` and resolves its exports. Does not initialize the peer.
    pub fn open(path: &Path) -> Result<Self, BridgeError> {
        let lib = NativeLibrary::open(path)?;

        // SAFETY: every symbol is cast to the signature declared by the c64 emulation wrapper.
        unsafe {
            Ok(Self {
                init: cast_fn(lib.symbol("c64_emulation_init")?),
                tick: cast_fn(lib.symbol("c64_emulation_tick")?),
                set_iec: cast_fn(lib.symbol("c64_set_iec_gpio")?),
                get_iec: cast_fn(lib.symbol("c64_get_iec_bus")?),
                print_tick_count: cast_fn(lib.symbol("c64_print_tick_count")?),
                print_screen: cast_fn(lib.symbol("c64_print_screen")?),
                tick_count: lib.try_symbol("c64_get_tick_count").map(|p| cast_fn(p)),
                lib,
            })
        }
    }
}

impl fmt::Debug for NativePeer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NativePeer")
            .field("library", &self.lib.path())
            .finish_non_exhaustive()
    }
}

impl PeerBus for NativePeer {
    fn init(&mut self) {
        // SAFETY: resolved from the library held in `self.lib`.
        unsafe { (self.init)() }
    }

    fn tick(&mut self) {
        // SAFETY: resolved from the library held in `self.lib`.
        unsafe { (self.tick)() }
    }

    fn set_bus(&mut self, state: BusState) {
        // SAFETY: resolved from the library held in `self.lib`.
        unsafe { (self.set_iec)(state.bits()) }
    }

    fn bus(&mut self) -> BusState {
        // SAFETY: resolved from the library held in `self.lib`.
        BusState(unsafe { (self.get_iec)() })
    }

    fn print_tick_count(&mut self) {
        // SAFETY: resolved from the library held in `self.lib`.
        unsafe { (self.print_tick_count)() }
    }

    fn print_screen(&mut self) {
        // SAFETY: resolved from the library held in `self.lib`.
        unsafe { (self.print_screen)() }
    }

    fn tick_count(&mut self) -> Option<u64> {
        // SAFETY: resolved from the library held in `self.lib`.
        self.tick_count.map(|f| unsafe { f() })
    }
}
