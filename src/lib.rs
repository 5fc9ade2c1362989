//! Native Windows file and folder pickers.
//!
//! Two surfaces over the same code:
//!
//! * a C ABI (`OpenWindowsFile`, `OpenFileWithExtension`, `OpenFolderDialog`)
//!   for hosts that load `WindowsFileDialog.dll` and cannot call Win32
//!   themselves, and
//! * a safe Rust API, [`FileDialog`], that returns owned paths and tells
//!   cancellation apart from failure.
//!
//! Every call blocks the calling thread until the dialog is dismissed and
//! leaves the process working directory as it found it.

// ── Safety policy ────────────────────────────────────────────────────────────
// Unsafe code is forbidden everywhere except:
//   • `platform::win32` – Win32 / COM FFI
//   • `ffi`             – exported C entry points and raw argument reads
// Each unsafe block in those modules MUST carry a `// SAFETY:` comment.
#![deny(unsafe_code)]
// The library file name (and so the crate name) and the exported symbols are
// fixed by existing hosts.
#![allow(non_snake_case)]

mod cwd;
mod dialog;
mod error;
mod ffi;
mod filter;
mod platform;
mod wide;

pub use dialog::FileDialog;
pub use error::{DialogError, Result};
pub use ffi::{OpenFileWithExtension, OpenFolderDialog, OpenWindowsFile};
pub use filter::{FilterEntry, FilterSpec};

#[cfg(test)]
pub(crate) mod test_support {
    use std::cell::RefCell;
    use std::sync::{Mutex, MutexGuard};

    static CWD_LOCK: Mutex<()> = Mutex::new(());

    /// Serialise tests that read or change the process working directory.
    pub(crate) fn cwd_lock() -> MutexGuard<'static, ()> {
        CWD_LOCK.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    thread_local! {
        static RECORDS: RefCell<Vec<(log::Level, String)>> = RefCell::new(Vec::new());
    }

    /// Collects records per thread so parallel tests do not see each other.
    struct Capture;

    impl log::Log for Capture {
        fn enabled(&self, _: &log::Metadata<'_>) -> bool {
            true
        }

        fn log(&self, record: &log::Record<'_>) {
            RECORDS.with(|r| r.borrow_mut().push((record.level(), record.args().to_string())));
        }

        fn flush(&self) {}
    }

    static CAPTURE: Capture = Capture;

    /// Run `f` and return every log record it emitted on this thread.
    pub(crate) fn captured_logs(f: impl FnOnce()) -> Vec<(log::Level, String)> {
        // Only the first call installs the logger; later ones are no-ops.
        let _ = log::set_logger(&CAPTURE);
        log::set_max_level(log::LevelFilter::Trace);
        RECORDS.with(|r| r.borrow_mut().clear());
        f();
        RECORDS.with(|r| r.borrow_mut().drain(..).collect())
    }
}
