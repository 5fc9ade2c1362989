// ── C ABI ─────────────────────────────────────────────────────────────────────
//
// The three entry points a host P/Invokes from `WindowsFileDialog.dll`.
// Names, argument order and the null-means-default convention are fixed by
// existing callers:
//
//   const wchar_t* OpenWindowsFile(const wchar_t* initialDir);
//   const wchar_t* OpenFileWithExtension(const wchar_t* filter, const wchar_t* initialDir);
//   const wchar_t* OpenFolderDialog(const wchar_t* initialDir);
//
// Every failure, cancellation included, comes back as a pointer to an empty
// string; the pointer itself is never null.  The returned text lives in a
// per-thread, per-function slot and stays valid until the same function is
// called again on the same thread.  Callers copy it immediately.
//
// Besides `platform::win32`, this is the only module where `unsafe` code is
// permitted.

#![allow(unsafe_code)]

use std::{
    cell::RefCell,
    panic::{self, AssertUnwindSafe},
    path::PathBuf,
    thread::LocalKey,
};

use crate::dialog::FileDialog;
use crate::error::Result;
use crate::filter::FilterSpec;
use crate::wide::{os_string_from_wide, to_wide_null};

// ── Return slots ──────────────────────────────────────────────────────────────

thread_local! {
    static OPEN_FILE_SLOT: RefCell<Vec<u16>> = RefCell::new(vec![0]);
    static OPEN_FILTERED_SLOT: RefCell<Vec<u16>> = RefCell::new(vec![0]);
    static OPEN_FOLDER_SLOT: RefCell<Vec<u16>> = RefCell::new(vec![0]);
}

// ── Exports ───────────────────────────────────────────────────────────────────

/// Show the "Open File" dialog with the built-in `All` / `Text` filter.
///
/// # Safety
///
/// `initial_dir` must be null or point to a NUL-terminated UTF-16 string
/// that stays readable for the duration of the call.
#[no_mangle]
pub unsafe extern "C" fn OpenWindowsFile(initial_dir: *const u16) -> *const u16 {
    let picked = guarded("OpenWindowsFile", || {
        // SAFETY: forwarded from this function's contract.
        let dir = unsafe { read_wide(initial_dir) };
        request(dir).set_filter(FilterSpec::default()).pick_file()
    });
    publish(&OPEN_FILE_SLOT, picked)
}

/// Show the "Open File" dialog restricted by a caller-supplied filter list
/// (`label\0pattern\0…\0\0`).  A null `filter` shows every file.
///
/// # Safety
///
/// `filter` must be null or point to a double-NUL-terminated UTF-16 list;
/// `initial_dir` must be null or point to a NUL-terminated UTF-16 string.
/// Both must stay readable for the duration of the call.
#[no_mangle]
pub unsafe extern "C" fn OpenFileWithExtension(
    filter: *const u16,
    initial_dir: *const u16,
) -> *const u16 {
    let picked = guarded("OpenFileWithExtension", || {
        // SAFETY: forwarded from this function's contract.
        let (filter, dir) = unsafe { (read_wide_list(filter), read_wide(initial_dir)) };
        let mut dialog = request(dir);
        if let Some(units) = filter {
            let spec = FilterSpec::from_native(&units)
                .inspect_err(|e| log::warn!("OpenFileWithExtension: {e}"))?;
            dialog = dialog.set_filter(spec);
        }
        dialog.pick_file()
    });
    publish(&OPEN_FILTERED_SLOT, picked)
}

/// Show the folder picker.
///
/// # Safety
///
/// `initial_dir` must be null or point to a NUL-terminated UTF-16 string
/// that stays readable for the duration of the call.
#[no_mangle]
pub unsafe extern "C" fn OpenFolderDialog(initial_dir: *const u16) -> *const u16 {
    let picked = guarded("OpenFolderDialog", || {
        // SAFETY: forwarded from this function's contract.
        let dir = unsafe { read_wide(initial_dir) };
        request(dir).pick_folder()
    });
    publish(&OPEN_FOLDER_SLOT, picked)
}

// ── Helpers ───────────────────────────────────────────────────────────────────

fn request(initial_dir: Option<Vec<u16>>) -> FileDialog {
    let dialog = FileDialog::new();
    match initial_dir {
        Some(units) => dialog.set_directory(PathBuf::from(os_string_from_wide(&units))),
        None => dialog,
    }
}

/// Run `f`, collapsing errors, cancellation and panics to `None`.
/// Unwinding must never cross the `extern "C"` boundary.  Errors were
/// already logged where they arose.
fn guarded<F>(export: &str, f: F) -> Option<PathBuf>
where
    F: FnOnce() -> Result<Option<PathBuf>>,
{
    match panic::catch_unwind(AssertUnwindSafe(f)) {
        Ok(picked) => picked.ok().flatten(),
        Err(_) => {
            log::error!("{export} panicked; returning empty");
            None
        }
    }
}

/// Overwrite `slot` with `path` (or the empty string) and return a pointer
/// to its first unit.
fn publish(slot: &'static LocalKey<RefCell<Vec<u16>>>, path: Option<PathBuf>) -> *const u16 {
    slot.with(|cell| {
        let mut buf = cell.borrow_mut();
        buf.clear();
        match path {
            Some(p) => buf.extend(to_wide_null(p.as_os_str())),
            None => buf.push(0),
        }
        buf.as_ptr()
    })
}

/// Copy a NUL-terminated UTF-16 string.  Null and empty both mean "absent".
///
/// # Safety
///
/// `ptr` must be null or point to a readable, NUL-terminated UTF-16 string.
unsafe fn read_wide(ptr: *const u16) -> Option<Vec<u16>> {
    if ptr.is_null() {
        return None;
    }
    let mut len = 0;
    // SAFETY: the caller guarantees a terminator, so every offset up to and
    // including it is in bounds.
    while unsafe { *ptr.add(len) } != 0 {
        len += 1;
    }
    if len == 0 {
        return None;
    }
    // SAFETY: `len` units starting at `ptr` were just read above.
    Some(unsafe { std::slice::from_raw_parts(ptr, len) }.to_vec())
}

/// Copy a double-NUL-terminated list, without the final terminator pair.
///
/// # Safety
///
/// `ptr` must be null or point to a readable list that ends in two
/// consecutive NULs (or starts with one).
unsafe fn read_wide_list(ptr: *const u16) -> Option<Vec<u16>> {
    if ptr.is_null() {
        return None;
    }
    let mut len = 0;
    // SAFETY: the caller guarantees the list terminator, so the scan stops
    // before leaving the allocation.
    unsafe {
        while !(*ptr.add(len) == 0 && (len == 0 || *ptr.add(len - 1) == 0)) {
            len += 1;
        }
    }
    // SAFETY: `len` units starting at `ptr` were just read above.
    Some(unsafe { std::slice::from_raw_parts(ptr, len) }.to_vec())
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn wide(s: &str) -> Vec<u16> {
        s.encode_utf16().collect()
    }

    /// Read back a pointer returned by an export or `publish`.
    fn returned(ptr: *const u16) -> String {
        assert!(!ptr.is_null(), "exports never return null");
        // SAFETY: every slot holds a NUL-terminated buffer.
        let units = unsafe { read_wide(ptr) }.unwrap_or_default();
        String::from_utf16_lossy(&units)
    }

    #[test]
    fn read_wide_null_and_empty_are_absent() {
        let empty = [0u16];
        // SAFETY: null, and a one-unit terminated buffer.
        unsafe {
            assert_eq!(read_wide(std::ptr::null()), None);
            assert_eq!(read_wide(empty.as_ptr()), None);
        }
    }

    #[test]
    fn read_wide_stops_at_terminator() {
        let buf = wide("C:\\Users\0ignored\0");
        // SAFETY: `buf` is NUL-terminated.
        let got = unsafe { read_wide(buf.as_ptr()) }.expect("present");
        assert_eq!(String::from_utf16_lossy(&got), "C:\\Users");
    }

    #[test]
    fn read_wide_list_stops_at_double_nul() {
        let buf = wide("Text\0*.txt\0\0Beyond\0*.x\0\0");
        // SAFETY: `buf` contains a double NUL.
        let got = unsafe { read_wide_list(buf.as_ptr()) }.expect("present");
        assert_eq!(got, wide("Text\0*.txt\0"));
        let spec = FilterSpec::from_native(&got).expect("parse");
        assert_eq!(spec.entries().len(), 1);
    }

    #[test]
    fn read_wide_list_empty_list() {
        let buf = [0u16, 0];
        // SAFETY: starts with the terminator.
        let got = unsafe { read_wide_list(buf.as_ptr()) }.expect("present");
        assert!(got.is_empty());
    }

    #[test]
    fn terminated_list_with_orphan_label_keeps_complete_pairs() {
        let buf = wide("A\0*.a\0Orphan\0\0");
        // SAFETY: `buf` ends in a double NUL.
        let got = unsafe { read_wide_list(buf.as_ptr()) }.expect("present");
        let spec = FilterSpec::from_native(&got).expect("orphan label is dropped, not rejected");
        assert_eq!(spec.entries().len(), 1);
        assert_eq!(spec.to_native(), wide("A\0*.a\0\0"));
    }

    #[test]
    fn publish_overwrites_previous_result() {
        thread_local! {
            static SLOT: RefCell<Vec<u16>> = RefCell::new(vec![0]);
        }
        let first = returned(publish(&SLOT, Some(PathBuf::from("a-much-longer-first-path"))));
        assert_eq!(first, "a-much-longer-first-path");

        let second = returned(publish(&SLOT, Some(PathBuf::from("short"))));
        assert_eq!(second, "short");

        let third = returned(publish(&SLOT, None));
        assert_eq!(third, "");
    }

    #[test]
    fn slots_are_per_thread() {
        thread_local! {
            static SLOT: RefCell<Vec<u16>> = RefCell::new(vec![0]);
        }
        let mine = publish(&SLOT, Some(PathBuf::from("main")));

        std::thread::spawn(|| {
            let theirs = returned(publish(&SLOT, Some(PathBuf::from("worker"))));
            assert_eq!(theirs, "worker");
        })
        .join()
        .expect("worker thread");

        assert_eq!(returned(mine), "main");
    }

    #[test]
    fn guarded_collapses_panics_to_none() {
        let picked = guarded("test", || panic!("boom"));
        assert_eq!(picked, None);
    }

    #[test]
    fn guarded_collapses_errors_to_none() {
        let picked = guarded("test", || Err(crate::error::DialogError::Unsupported));
        assert_eq!(picked, None);
    }

    #[test]
    fn guarded_passes_selection_through() {
        let picked = guarded("test", || Ok(Some(PathBuf::from("x"))));
        assert_eq!(picked, Some(PathBuf::from("x")));
    }

    #[test]
    fn request_maps_initial_directory() {
        let dialog = request(Some(wide("C:\\start")));
        assert_eq!(dialog.directory(), Some(std::path::Path::new("C:\\start")));
        assert_eq!(request(None).directory(), None);
    }

    // These reach the platform layer, which blocks on a real dialog under
    // Windows.  Elsewhere it fails immediately with `Unsupported`.
    #[cfg(not(windows))]
    mod exports {
        use super::*;
        use crate::test_support::{captured_logs, cwd_lock};

        #[test]
        fn open_windows_file_failure_is_empty_string() {
            let _lock = cwd_lock();
            let before = std::env::current_dir().expect("cwd");
            // SAFETY: null is an accepted argument.
            let ptr = unsafe { OpenWindowsFile(std::ptr::null()) };
            assert_eq!(returned(ptr), "");
            assert_eq!(std::env::current_dir().expect("cwd"), before);
        }

        #[test]
        fn open_file_with_extension_failure_is_empty_string() {
            let _lock = cwd_lock();
            let filter = wide("Text\0*.txt\0\0");
            let dir = wide("/tmp\0");
            // SAFETY: both buffers are correctly terminated.
            let ptr = unsafe { OpenFileWithExtension(filter.as_ptr(), dir.as_ptr()) };
            assert_eq!(returned(ptr), "");
        }

        #[test]
        fn orphan_only_filter_still_reaches_dialog() {
            let _lock = cwd_lock();
            let filter = wide("Text\0\0");
            // SAFETY: double-NUL-terminated; null directory accepted.
            let ptr = unsafe { OpenFileWithExtension(filter.as_ptr(), std::ptr::null()) };
            assert_eq!(returned(ptr), "");
        }

        #[test]
        fn open_folder_failure_is_empty_string() {
            let _lock = cwd_lock();
            let dir = wide("/tmp\0");
            // SAFETY: terminated buffer.
            let ptr = unsafe { OpenFolderDialog(dir.as_ptr()) };
            assert_eq!(returned(ptr), "");
        }

        #[test]
        fn dialog_failure_is_logged_once() {
            let _lock = cwd_lock();
            let logs = captured_logs(|| {
                // SAFETY: null is an accepted argument.
                let _ = unsafe { OpenWindowsFile(std::ptr::null()) };
            });
            let failures = logs.iter().filter(|(_, m)| m.contains("not supported")).count();
            assert_eq!(failures, 1, "{logs:?}");
        }

        #[test]
        fn orphan_label_warns_and_failure_is_logged_once() {
            let _lock = cwd_lock();
            let filter = wide("A\0*.a\0Orphan\0\0");
            let logs = captured_logs(|| {
                // SAFETY: double-NUL-terminated; null directory accepted.
                let _ = unsafe { OpenFileWithExtension(filter.as_ptr(), std::ptr::null()) };
            });
            let dropped = logs.iter().filter(|(_, m)| m.contains("\"Orphan\" has no pattern")).count();
            let failures = logs.iter().filter(|(_, m)| m.contains("not supported")).count();
            assert_eq!((dropped, failures), (1, 1), "{logs:?}");
        }
    }
}
