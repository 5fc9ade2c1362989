// ── Safe dialog API ───────────────────────────────────────────────────────────
//
// `FileDialog` is the Rust-facing entry point.  It owns its arguments and
// returns owned paths, so there is no shared return storage here; the C ABI
// in `ffi` layers its return slots on top of this.
//
// No `unsafe`; all OS calls go through `crate::platform`.

use std::path::{Path, PathBuf};

use crate::cwd::WorkingDirGuard;
use crate::error::Result;
use crate::filter::FilterSpec;
use crate::platform;

/// Options for one native picker invocation.
///
/// ```no_run
/// use WindowsFileDialog::{FileDialog, FilterSpec};
///
/// let filter = FilterSpec::empty().with("Logs", "*.log")?;
/// let picked = FileDialog::new()
///     .set_filter(filter)
///     .set_directory(r"C:\logs")
///     .pick_file()?;
/// # Ok::<(), WindowsFileDialog::DialogError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct FileDialog {
    filter: Option<FilterSpec>,
    directory: Option<PathBuf>,
    title: Option<String>,
}

impl FileDialog {
    /// No filter, no starting directory, default title.
    pub fn new() -> Self {
        Self::default()
    }

    /// Restrict the file picker to the given types.  Ignored by `pick_folder`.
    pub fn set_filter(mut self, filter: FilterSpec) -> Self {
        self.filter = Some(filter);
        self
    }

    /// Folder the dialog opens in.  An empty path means "let the OS decide".
    pub fn set_directory(mut self, dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        self.directory = if dir.as_os_str().is_empty() {
            None
        } else {
            Some(dir.to_path_buf())
        };
        self
    }

    /// Title bar text.
    pub fn set_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    #[cfg_attr(not(windows), allow(dead_code))]
    pub(crate) fn filter(&self) -> Option<&FilterSpec> {
        self.filter.as_ref()
    }

    #[cfg_attr(not(windows), allow(dead_code))]
    pub(crate) fn directory(&self) -> Option<&Path> {
        self.directory.as_deref()
    }

    #[cfg_attr(not(windows), allow(dead_code))]
    pub(crate) fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    /// Show the "Open File" dialog and block until it is dismissed.
    ///
    /// Returns `Ok(None)` if the user cancelled.  The process working
    /// directory is the same afterwards as before, whatever the outcome.
    pub fn pick_file(&self) -> Result<Option<PathBuf>> {
        let _cwd = guard_working_dir();
        log::debug!("opening file dialog (dir: {:?})", self.directory);
        let picked = platform::open_file(self);
        log_outcome("file", &picked);
        picked
    }

    /// Show the folder picker and block until it is dismissed.
    ///
    /// Returns `Ok(None)` if the user cancelled.
    pub fn pick_folder(&self) -> Result<Option<PathBuf>> {
        let _cwd = guard_working_dir();
        log::debug!("opening folder dialog (dir: {:?})", self.directory);
        let picked = platform::open_folder(self);
        log_outcome("folder", &picked);
        picked
    }
}

// ── Helpers ───────────────────────────────────────────────────────────────────

/// Capture the working directory, or carry on without a guard if the current
/// directory cannot be read (e.g. it was deleted under us).
fn guard_working_dir() -> Option<WorkingDirGuard> {
    match WorkingDirGuard::capture() {
        Ok(guard) => {
            log::trace!("saved working directory {}", guard.saved().display());
            Some(guard)
        }
        Err(e) => {
            log::warn!("cannot snapshot working directory: {e}");
            None
        }
    }
}

fn log_outcome(kind: &str, picked: &Result<Option<PathBuf>>) {
    match picked {
        Ok(Some(path)) => log::debug!("{kind} dialog selected {}", path.display()),
        Ok(None) => log::debug!("{kind} dialog cancelled"),
        Err(e) => log::warn!("{kind} dialog failed: {e}"),
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
