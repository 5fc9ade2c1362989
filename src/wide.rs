// ── UTF-16 helpers ────────────────────────────────────────────────────────────
//
// Conversions between Rust strings/paths and the NUL-terminated UTF-16
// buffers Win32 expects.  No `unsafe` here; raw pointer reads live in `ffi`.
//
// On Windows the conversions are lossless (`OsStrExt::encode_wide` /
// `OsStringExt::from_wide`).  Elsewhere they go through UTF-8, replacing
// unpaired surrogates, which is enough for the non-Windows fallback and tests.

use std::{
    ffi::{OsStr, OsString},
    path::PathBuf,
};

/// Encode `s` as UTF-16 followed by a single NUL.
pub(crate) fn to_wide_null(s: &OsStr) -> Vec<u16> {
    #[cfg(windows)]
    {
        use std::os::windows::ffi::OsStrExt;
        s.encode_wide().chain(std::iter::once(0)).collect()
    }
    #[cfg(not(windows))]
    {
        s.to_string_lossy()
            .encode_utf16()
            .chain(std::iter::once(0))
            .collect()
    }
}

/// The part of `buf` before the first NUL, or all of it if there is none.
#[cfg_attr(not(windows), allow(dead_code))]
pub(crate) fn until_nul(buf: &[u16]) -> &[u16] {
    let len = buf.iter().position(|&c| c == 0).unwrap_or(buf.len());
    &buf[..len]
}

/// Decode UTF-16 units (no terminator) into an `OsString`.
pub(crate) fn os_string_from_wide(units: &[u16]) -> OsString {
    #[cfg(windows)]
    {
        use std::os::windows::ffi::OsStringExt;
        OsString::from_wide(units)
    }
    #[cfg(not(windows))]
    {
        OsString::from(String::from_utf16_lossy(units))
    }
}

/// Convert a NUL-terminated UTF-16 buffer to a `PathBuf`.
#[cfg_attr(not(windows), allow(dead_code))]
pub(crate) fn path_from_buf(buf: &[u16]) -> PathBuf {
    PathBuf::from(os_string_from_wide(until_nul(buf)))
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn to_wide_null_appends_single_terminator() {
        let w = to_wide_null(OsStr::new("ab"));
        assert_eq!(w, vec![u16::from(b'a'), u16::from(b'b'), 0]);
    }

    #[test]
    fn empty_string_is_just_a_terminator() {
        assert_eq!(to_wide_null(OsStr::new("")), vec![0]);
    }

    #[test]
    fn until_nul_stops_at_first_nul() {
        let buf = [u16::from(b'x'), 0, u16::from(b'y'), 0];
        assert_eq!(until_nul(&buf), &[u16::from(b'x')]);
    }

    #[test]
    fn until_nul_without_terminator_keeps_everything() {
        let buf = [u16::from(b'x'), u16::from(b'y')];
        assert_eq!(until_nul(&buf).len(), 2);
    }

    #[test]
    fn path_from_buf_ignores_trailing_garbage() {
        let mut buf: Vec<u16> = r"C:\notes\todo.txt".encode_utf16().collect();
        buf.push(0);
        buf.extend("stale".encode_utf16());
        assert_eq!(path_from_buf(&buf), PathBuf::from(r"C:\notes\todo.txt"));
    }

    #[test]
    fn non_ascii_survives_encoding() {
        let w = to_wide_null(OsStr::new("Dokumente\u{e4}\u{1F4C1}"));
        assert_eq!(os_string_from_wide(until_nul(&w)), OsString::from("Dokumente\u{e4}\u{1F4C1}"));
    }
}
