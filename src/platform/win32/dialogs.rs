// ── Common "Open File" dialog ─────────────────────────────────────────────────
//
// Thin wrapper around `GetOpenFileNameW`.  Returns `Ok(Some(path))` on user
// confirmation, `Ok(None)` on cancel, and `Err` when the dialog itself failed
// (distinguished with `CommDlgExtendedError`).
//
// This is inside `platform::win32` so `unsafe` is permitted per crate policy.

#![allow(unsafe_code)]

use std::path::PathBuf;

use windows::{
    core::{PCWSTR, PWSTR},
    Win32::{
        Foundation::HWND,
        UI::Controls::Dialogs::{
            CommDlgExtendedError, GetOpenFileNameW, OFN_FILEMUSTEXIST, OFN_PATHMUSTEXIST,
            OPENFILENAMEW,
        },
    },
};

use crate::dialog::FileDialog;
use crate::error::{DialogError, Result};
use crate::wide::{path_from_buf, to_wide_null};

// ── Buffer size ───────────────────────────────────────────────────────────────

/// Maximum path length in `WCHAR`s, including the null terminator.
/// `MAX_PATH` (260) is too short for modern Windows paths; use 32 768 which
/// is the documented maximum for `\\?\` extended paths.
const PATH_BUF_LEN: usize = 32_768;

// ── Open dialog ───────────────────────────────────────────────────────────────

/// Show the standard "Open File" dialog described by `request`.
///
/// A request without a filter shows every file.
pub(crate) fn open_file(request: &FileDialog) -> Result<Option<PathBuf>> {
    let mut buf = vec![0u16; PATH_BUF_LEN];

    // Each of these must outlive the GetOpenFileNameW call below, so they are
    // bound here rather than built inline.
    let filter: Option<Vec<u16>> = request
        .filter()
        .filter(|f| !f.is_empty())
        .map(|f| f.to_native());
    let initial_dir: Option<Vec<u16>> = request.directory().map(|d| to_wide_null(d.as_os_str()));
    let title: Option<Vec<u16>> = request
        .title()
        .map(|t| to_wide_null(std::ffi::OsStr::new(t)));

    let mut ofn = OPENFILENAMEW {
        lStructSize: std::mem::size_of::<OPENFILENAMEW>() as u32,
        hwndOwner: HWND::default(),
        lpstrFilter: pcwstr_or_null(filter.as_deref()),
        nFilterIndex: 1,
        lpstrFile: PWSTR(buf.as_mut_ptr()),
        nMaxFile: PATH_BUF_LEN as u32,
        lpstrInitialDir: pcwstr_or_null(initial_dir.as_deref()),
        lpstrTitle: pcwstr_or_null(title.as_deref()),
        Flags: OFN_PATHMUSTEXIST | OFN_FILEMUSTEXIST,
        ..Default::default()
    };

    // SAFETY: `ofn` is fully initialised; `buf`, `filter`, `initial_dir` and
    // `title` outlive this call and the optional ones are NUL-terminated (the
    // filter double-NUL-terminated).  GetOpenFileNameW reads and writes only
    // within the buffers we provided.  It is modal and runs its own message
    // loop on the calling thread.
    let ok = unsafe { GetOpenFileNameW(&mut ofn) };

    if ok.as_bool() {
        return Ok(Some(path_from_buf(&buf)));
    }

    // SAFETY: CommDlgExtendedError reads thread-local state left by the
    // GetOpenFileNameW call above; it takes no arguments and cannot fail.
    let code = unsafe { CommDlgExtendedError() }.0;
    if code == 0 {
        // Zero means the user closed or cancelled the dialog.
        Ok(None)
    } else {
        Err(DialogError::Win32 {
            function: "GetOpenFileNameW",
            code,
        })
    }
}

// ── Helpers ───────────────────────────────────────────────────────────────────

fn pcwstr_or_null(wide: Option<&[u16]>) -> PCWSTR {
    wide.map_or(PCWSTR::null(), |w| PCWSTR(w.as_ptr()))
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_argument_is_null_pointer() {
        assert!(pcwstr_or_null(None).is_null());
    }

    #[test]
    fn present_argument_points_at_buffer() {
        let w = to_wide_null(std::ffi::OsStr::new("C:\\"));
        let p = pcwstr_or_null(Some(&w));
        assert_eq!(p.0, w.as_ptr());
    }
}
