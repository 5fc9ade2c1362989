// ── Platform abstraction layer ────────────────────────────────────────────────
//
// This module defines the interface that `dialog` uses to talk to the OS.  No
// `unsafe` lives here; all Win32 FFI is confined to the `win32` sub-module
// and never leaks outward.
//
// Both back ends expose the same two functions:
//
//   open_file(&FileDialog)   -> Result<Option<PathBuf>>
//   open_folder(&FileDialog) -> Result<Option<PathBuf>>
//
// `Ok(None)` means the user cancelled.

#[cfg(windows)]
pub(crate) mod win32;
#[cfg(windows)]
pub(crate) use win32::{open_file, open_folder};

#[cfg(not(windows))]
mod unsupported;
#[cfg(not(windows))]
pub(crate) use unsupported::{open_file, open_folder};
