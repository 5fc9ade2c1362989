// ── Working-directory guard ───────────────────────────────────────────────────
//
// The common dialog may change the process current directory as a side
// effect of browsing.  Hold a `WorkingDirGuard` for the duration of any
// dialog call; dropping it puts the original directory back, on every exit
// path including cancellation and errors.

use std::{env, io, path::PathBuf};

/// Restores the current directory captured at construction when dropped.
#[derive(Debug)]
pub(crate) struct WorkingDirGuard {
    saved: PathBuf,
}

impl WorkingDirGuard {
    /// Snapshot the current directory.
    pub(crate) fn capture() -> io::Result<Self> {
        Ok(Self {
            saved: env::current_dir()?,
        })
    }

    /// The directory that will be restored.
    pub(crate) fn saved(&self) -> &std::path::Path {
        &self.saved
    }
}

impl Drop for WorkingDirGuard {
    fn drop(&mut self) {
        if let Err(e) = env::set_current_dir(&self.saved) {
            log::warn!(
                "could not restore working directory {}: {e}",
                self.saved.display()
            );
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
