// ── File-type filters ─────────────────────────────────────────────────────────
//
// Pure Rust model of the common-dialog filter list.  No Win32 imports.
//
// The native encoding is NUL-separated label/pattern pairs ending with a
// double NUL:
//
//   "All\0*.*\0Text\0*.TXT\0\0"
//
// A pattern may hold several globs separated by `;` ("*.jpg;*.png").

use crate::error::{DialogError, Result};
use crate::wide::os_string_from_wide;

/// One row of the "Files of type" drop-down, decoded for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterEntry {
    /// Text shown to the user, e.g. `"Text Files (*.txt)"`.
    pub label: String,
    /// Semicolon-separated globs, e.g. `"*.txt;*.md"`.
    pub pattern: String,
}

/// Ordered list of filter entries.  The first entry is selected initially.
///
/// Labels and patterns are kept as the UTF-16 units they arrived in, so a
/// list parsed from a caller reaches the OS unchanged, unpaired surrogates
/// included.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterSpec {
    pairs: Vec<(Vec<u16>, Vec<u16>)>,
}

impl Default for FilterSpec {
    /// The filter used by the plain open-file dialog.
    fn default() -> Self {
        Self {
            pairs: vec![
                (wide("All"), wide("*.*")),
                (wide("Text"), wide("*.TXT")),
            ],
        }
    }
}

impl FilterSpec {
    /// A spec with no entries.  Encodes as an empty list.
    pub fn empty() -> Self {
        Self { pairs: Vec::new() }
    }

    /// Append a label/pattern pair.
    ///
    /// Fails if either side contains NUL (it would split the native list) or
    /// if the label or pattern is empty (an empty label terminates the list).
    pub fn push(&mut self, label: impl Into<String>, pattern: impl Into<String>) -> Result<()> {
        let label = label.into();
        let pattern = pattern.into();
        if label.is_empty() {
            return Err(DialogError::InvalidFilter("empty label".to_owned()));
        }
        if pattern.is_empty() {
            return Err(DialogError::InvalidFilter(format!("empty pattern for {label:?}")));
        }
        if label.contains('\0') || pattern.contains('\0') {
            return Err(DialogError::InvalidFilter(format!("NUL inside entry {label:?}")));
        }
        self.pairs.push((wide(&label), wide(&pattern)));
        Ok(())
    }

    /// Builder-style `push`.
    pub fn with(mut self, label: impl Into<String>, pattern: impl Into<String>) -> Result<Self> {
        self.push(label, pattern)?;
        Ok(self)
    }

    /// The entries decoded for display.  Unpaired surrogates are replaced.
    pub fn entries(&self) -> Vec<FilterEntry> {
        self.pairs
            .iter()
            .map(|(label, pattern)| FilterEntry {
                label: lossy(label),
                pattern: lossy(pattern),
            })
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Parse the native encoding.
    ///
    /// `units` may or may not include the terminating NULs; parsing stops at
    /// the first empty label either way.  A last label with no pattern after
    /// it is dropped, matching what the common dialog itself does with it.
    /// A label with an empty pattern followed by more entries is rejected.
    pub fn from_native(units: &[u16]) -> Result<Self> {
        let mut spec = Self::empty();
        let mut fields = units.split(|&c| c == 0);

        loop {
            let label = match fields.next() {
                Some(l) if !l.is_empty() => l,
                _ => break,
            };
            match fields.next() {
                Some(p) if !p.is_empty() => {
                    spec.pairs.push((label.to_vec(), p.to_vec()));
                }
                Some(_) if fields.clone().any(|f| !f.is_empty()) => {
                    return Err(DialogError::InvalidFilter(format!(
                        "empty pattern for {:?}",
                        lossy(label)
                    )));
                }
                _ => {
                    log::warn!("filter label {:?} has no pattern; dropped", lossy(label));
                    break;
                }
            }
        }

        Ok(spec)
    }

    /// Encode as `label\0pattern\0…\0\0`.
    pub fn to_native(&self) -> Vec<u16> {
        let mut out = Vec::new();
        for (label, pattern) in &self.pairs {
            out.extend_from_slice(label);
            out.push(0);
            out.extend_from_slice(pattern);
            out.push(0);
        }
        // An empty list still needs two NULs to be a valid terminator.
        if out.is_empty() {
            out.push(0);
        }
        out.push(0);
        out
    }
}

fn wide(s: &str) -> Vec<u16> {
    s.encode_utf16().collect()
}

fn lossy(units: &[u16]) -> String {
    os_string_from_wide(units).to_string_lossy().into_owned()
}

// ── Tests ─────────────────────────────────────────────────────────────────────
