//! Native RP2040 simulator binding.
//!
//! Drives an instruction-set simulator exported from a shared library through the `rp2040_*`
//! C ABI. The library owns all simulator state behind an opaque context pointer.

use std::ffi::{CStr, c_char, c_void};
use std::fmt;
use std::path::Path;

use crate::common::error::BridgeError;
use crate::ffi::NativeLibrary;
use crate::ffi::library::cast_fn;

use super::pin::PinLevel;
use super::trace::{TraceEvent, TraceSink, TraceTag};
use super::traits::Mcu;

type CreateFn = unsafe extern "C" fn() -> *mut c_void;
type DestroyFn = unsafe extern "C" fn(*mut c_void);
type LoadFlashFn = unsafe extern "C" fn(*mut c_void, u32, *const u8, usize);
type SetPcFn = unsafe extern "C" fn(*mut c_void, u32);
type StepFn = unsafe extern "C" fn(*mut c_void) -> u32;
type PcFn = unsafe extern "C" fn(*mut c_void) -> u32;
type CyclesFn = unsafe extern "C" fn(*mut c_void) -> u64;
type TraceTagFn = unsafe extern "C" fn(*mut c_void) -> *const c_char;
type GpioOutputFn = unsafe extern "C" fn(*mut c_void, u32) -> u8;
type GpioSetInputFn = unsafe extern "C" fn(*mut c_void, u32, u8);
type UartReadFn = unsafe extern "C" fn(*mut c_void, *mut u8, usize) -> usize;

/// Resolved `rp2040_*` exports.
#[derive(Clone, Copy)]
struct Api {
    destroy: DestroyFn,
    load_flash: LoadFlashFn,
    set_pc: SetPcFn,
    step: StepFn,
    pc: PcFn,
    cycles: CyclesFn,
    trace_tag: TraceTagFn,
    gpio_output: GpioOutputFn,
    gpio_set_input: GpioSetInputFn,
    uart_read: UartReadFn,
}

/// `Mcu` implemented by a native simulator library.
pub struct NativeMcu {
    api: Api,
    ctx: *mut c_void,
    // Declared last: dropped after `ctx` is destroyed.
    lib: NativeLibrary,
}

impl NativeMcu {
    /// Opens the library at `path`, resolves every export, and creates a simulator instance.
    pub fn open(path: &Path) -> Result<Self, BridgeError> {
        let lib = NativeLibrary::open(path)?;

        // SAFETY: each symbol is cast to the signature it is declared with in the rp2040 ABI.
        let (create, api) = unsafe {
            let create: CreateFn = cast_fn(lib.symbol("rp2040_create")?);
            let api = Api {
                destroy: cast_fn(lib.symbol("rp2040_destroy")?),
                load_flash: cast_fn(lib.symbol("rp2040_load_flash")?),
                set_pc: cast_fn(lib.symbol("rp2040_set_pc")?),
                step: cast_fn(lib.symbol("rp2040_step")?),
                pc: cast_fn(lib.symbol("rp2040_pc")?),
                cycles: cast_fn(lib.symbol("rp2040_cycles")?),
                trace_tag: cast_fn(lib.symbol("rp2040_trace_tag")?),
                gpio_output: cast_fn(lib.symbol("rp2040_gpio_output")?),
                gpio_set_input: cast_fn(lib.symbol("rp2040_gpio_set_input")?),
                uart_read: cast_fn(lib.symbol("rp2040_uart_read")?),
            };
            (create, api)
        };

        // SAFETY: `create` takes no arguments and returns an owned context or null.
        let ctx = unsafe { create() };
        if ctx.is_null() {
            return Err(BridgeError::Library {
                path: path.to_path_buf(),
                reason: "rp2040_create returned null".to_string(),
            });
        }

        Ok(Self { api, ctx, lib })
    }

    /// Current program counter.
    pub fn pc(&self) -> u32 {
        // SAFETY: `ctx` is live until drop.
        unsafe { (self.api.pc)(self.ctx) }
    }
}

impl fmt::Debug for NativeMcu {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NativeMcu")
            .field("library", &self.lib.path())
            .finish_non_exhaustive()
    }
}

impl Drop for NativeMcu {
    fn drop(&mut self) {
        // SAFETY: `ctx` came from `rp2040_create` and is destroyed exactly once.
        unsafe { (self.api.destroy)(self.ctx) }
    }
}

impl Mcu for NativeMcu {
    fn load_flash(&mut self, offset: u32, data: &[u8]) -> Result<(), BridgeError> {
        // SAFETY: `data` is valid for `data.len()` bytes for the duration of the call.
        unsafe { (self.api.load_flash)(self.ctx, offset, data.as_ptr(), data.len()) };
        Ok(())
    }

    fn set_pc(&mut self, pc: u32) {
        // SAFETY: `ctx` is live until drop.
        unsafe { (self.api.set_pc)(self.ctx, pc) }
    }

    fn step(&mut self, sink: &mut dyn TraceSink) -> u32 {
        let pc = self.pc();
        // SAFETY: `ctx` is live until drop.
        let elapsed = unsafe { (self.api.step)(self.ctx) };

        // SAFETY: the returned pointer is null or a NUL-terminated string owned by the
        // simulator that stays valid until the next step; it is copied before stepping again.
        let raw = unsafe {
            let tag = (self.api.trace_tag)(self.ctx);
            (!tag.is_null()).then(|| CStr::from_ptr(tag).to_string_lossy().into_owned())
        };

        if let Some(raw) = raw {
            sink.on_trace(&TraceEvent {
                pc,
                cycles: self.cycles(),
                tag: Some(TraceTag::from_raw(&raw)),
            });
        }
        elapsed
    }

    fn gpio_output(&self, pin: u8) -> PinLevel {
        // SAFETY: `ctx` is live until drop.
        PinLevel::from_raw(unsafe { (self.api.gpio_output)(self.ctx, u32::from(pin)) })
    }

    fn set_gpio_input(&mut self, pin: u8, level: PinLevel) {
        // SAFETY: `ctx` is live until drop.
        unsafe { (self.api.gpio_set_input)(self.ctx, u32::from(pin), level.to_raw()) }
    }

    fn drain_uart(&mut self, out: &mut Vec<u8>) {
        let mut buf = [0u8; 256];
        loop {
            // SAFETY: `buf` is writable for `buf.len()` bytes.
            let n = unsafe { (self.api.uart_read)(self.ctx, buf.as_mut_ptr(), buf.len()) };
            let n = n.min(buf.len());
            if n == 0 {
                break;
            }
            out.extend_from_slice(&buf[..n]);
        }
    }

    fn cycles(&self) -> u64 {
        // SAFETY: `ctx` is live until drop.
        unsafe { (self.api.cycles)(self.ctx) }
    }
}
