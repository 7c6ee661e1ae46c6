//! Dynamic library handle.
//!
//! Thin RAII wrapper over `libc::dlopen`. The handle is closed on drop, so every function
//! pointer resolved from it must not outlive the `NativeLibrary`; the adapters keep both in
//! the same struct to guarantee that.

use std::ffi::{CStr, CString, c_void};
use std::fmt;
use std::os::unix::ffi::OsStrExt;
use std::path::{Path, PathBuf};

use crate::common::error::BridgeError;

/// An open shared library.
pub struct NativeLibrary {
    handle: *mut c_void,
    path: PathBuf,
}

impl NativeLibrary {
    /// Opens the library at `path` with immediate symbol binding.
    pub fn open(path: &Path) -> Result<Self, BridgeError> {
        let c_path = CString::new(path.as_os_str().as_bytes()).map_err(|_| BridgeError::Library {
            path: path.to_path_buf(),
            reason: "path contains a NUL byte".to_string(),
        })?;

        // SAFETY: `c_path` is a valid NUL-terminated string for the duration of the call.
        let handle = unsafe { libc::dlopen(c_path.as_ptr(), libc::RTLD_NOW | libc::RTLD_LOCAL) };
        if handle.is_null() {
            return Err(BridgeError::Library {
                path: path.to_path_buf(),
                reason: last_dl_error(),
            });
        }

        Ok(Self {
            handle,
            path: path.to_path_buf(),
        })
    }

    /// Path the library was opened from.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Resolves `name` and returns the raw address.
    pub fn symbol(&self, name: &str) -> Result<*mut c_void, BridgeError> {
        self.try_symbol(name).ok_or_else(|| BridgeError::MissingSymbol {
            library: self.path.display().to_string(),
            symbol: name.to_string(),
        })
    }

    /// Resolves `name`, returning `None` if the library does not export it.
    pub fn try_symbol(&self, name: &str) -> Option<*mut c_void> {
        let c_name = CString::new(name).ok()?;
        // SAFETY: `self.handle` came from a successful `dlopen` and is closed only on drop;
        // `c_name` is NUL-terminated.
        let ptr = unsafe { libc::dlsym(self.handle, c_name.as_ptr()) };
        (!ptr.is_null()).then_some(ptr)
    }
}

impl fmt::Debug for NativeLibrary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NativeLibrary")
            .field("path", &self.path)
            .finish_non_exhaustive()
    }
}

impl Drop for NativeLibrary {
    fn drop(&mut self) {
        // SAFETY: the handle is valid and this is its only close.
        let _ = unsafe { libc::dlclose(self.handle) };
    }
}

/// Reads and clears the thread's `dlerror` text.
fn last_dl_error() -> String {
    // SAFETY: `dlerror` returns either null or a NUL-terminated string owned by libc that
    // stays valid until the next dl* call on this thread; it is copied out immediately.
    unsafe {
        let msg = libc::dlerror();
        if msg.is_null() {
            "unknown dlopen failure".to_string()
        } else {
            CStr::from_ptr(msg).to_string_lossy().into_owned()
        }
    }
}

/// Reinterprets a resolved symbol as a typed function pointer.
///
/// # Safety
///
/// `ptr` must be the address of a function whose signature is exactly `F`, and `F` must be a
/// function pointer type.
pub unsafe fn cast_fn<F: Copy>(ptr: *mut c_void) -> F {
    debug_assert_eq!(size_of::<F>(), size_of::<*mut c_void>());
    // SAFETY: upheld by the caller.
    unsafe { std::mem::transmute_copy(&ptr) }
}
