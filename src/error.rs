// ── Central error type ────────────────────────────────────────────────────────
//
// All fallible operations in the safe API return `error::Result<T>`.  A user
// cancelling a dialog is not an error; it is reported as `Ok(None)`.  The C
// ABI in `ffi` collapses every variant to the empty string.

/// Every error that a dialog call can produce.
#[derive(Debug)]
pub enum DialogError {
    /// A Win32 or COM call returned a failure code.
    Win32 {
        /// The name of the failing function, for display purposes.
        function: &'static str,
        /// `CommDlgExtendedError()` value for the common dialog, or the raw
        /// HRESULT bits for COM calls.
        code: u32,
    },

    /// A standard I/O error (current directory snapshot, path conversion, …).
    Io(std::io::Error),

    /// The filter list is not a sequence of label/pattern pairs.
    InvalidFilter(String),

    /// Native dialogs are only available on Windows.
    Unsupported,
}

impl DialogError {
    /// Wrap a windows-crate error, keeping the name of the API that failed.
    #[cfg(windows)]
    pub(crate) fn hresult(function: &'static str, e: &windows::core::Error) -> Self {
        // HRESULT.0 is i32; reinterpret bits as u32 for display purposes.
        Self::Win32 {
            function,
            code: e.code().0 as u32,
        }
    }
}

impl std::fmt::Display for DialogError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Win32 { function, code } => {
                write!(f, "{function} failed (error {code:#010x})")
            }
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::InvalidFilter(reason) => write!(f, "invalid filter: {reason}"),
            Self::Unsupported => f.write_str("native dialogs are not supported on this platform"),
        }
    }
}

impl std::error::Error for DialogError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Win32 { .. } | Self::InvalidFilter(_) | Self::Unsupported => None,
        }
    }
}

impl From<std::io::Error> for DialogError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

// Lets `?` work on `windows::core::Result<T>` where the failing function is
// obvious from context.  Prefer `DialogError::hresult` when it is not.
#[cfg(windows)]
impl From<windows::core::Error> for DialogError {
    fn from(e: windows::core::Error) -> Self {
        Self::hresult("windows", &e)
    }
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, DialogError>;

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn win32_display_includes_function_and_hex_code() {
        let e = DialogError::Win32 {
            function: "GetOpenFileNameW",
            code: 0x3002,
        };
        assert_eq!(e.to_string(), "GetOpenFileNameW failed (error 0x00003002)");
    }

    #[test]
    fn io_error_is_exposed_as_source() {
        use std::error::Error;

        let e = DialogError::from(std::io::Error::new(std::io::ErrorKind::NotFound, "gone"));
        assert!(e.source().is_some());
        assert!(e.to_string().starts_with("I/O error: "));
    }

    #[test]
    fn unsupported_has_no_source() {
        use std::error::Error;

        assert!(DialogError::Unsupported.source().is_none());
    }
}
