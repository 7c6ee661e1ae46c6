//! Native library interop.
//!
//! Both simulators ship as shared libraries with a plain C ABI. This module wraps `dlopen`
//! so the adapters above it only deal with typed function pointers.

/// `dlopen`/`dlsym` wrapper.
pub mod library;

pub use library::NativeLibrary;
