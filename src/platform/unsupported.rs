// Non-Windows targets have no native picker to call.  Building here keeps the
// pure-Rust layers (filters, C ABI contract) compiling and testable.

use std::path::PathBuf;

use crate::dialog::FileDialog;
use crate::error::{DialogError, Result};

pub(crate) fn open_file(_request: &FileDialog) -> Result<Option<PathBuf>> {
    Err(DialogError::Unsupported)
}

pub(crate) fn open_folder(_request: &FileDialog) -> Result<Option<PathBuf>> {
    Err(DialogError::Unsupported)
}
