// ── Folder picker ─────────────────────────────────────────────────────────────
//
// The common dialog cannot pick folders, so this goes through the shell item
// dialog (`IFileOpenDialog`) with `FOS_PICKFOLDERS`.  COM is entered and left
// around each call.
//
// This is inside `platform::win32` so `unsafe` is permitted per crate policy.

#![allow(unsafe_code)]

use std::path::PathBuf;

use windows::{
    core::HSTRING,
    Win32::{
        Foundation::{ERROR_CANCELLED, HWND},
        System::Com::{CoCreateInstance, CoTaskMemFree, CLSCTX_INPROC_SERVER},
        UI::Shell::{
            FileOpenDialog, IFileOpenDialog, IShellItem, SHCreateItemFromParsingName,
            FOS_FORCEFILESYSTEM, FOS_PICKFOLDERS, SIGDN_FILESYSPATH,
        },
    },
};

use super::com::ComApartment;
use crate::dialog::FileDialog;
use crate::error::{DialogError, Result};
use crate::wide::os_string_from_wide;

/// Show the folder picker described by `request`.  The filter is ignored.
pub(crate) fn open_folder(request: &FileDialog) -> Result<Option<PathBuf>> {
    let _com = ComApartment::enter()?;

    // Every interface below is declared after `_com`, so it is released
    // before the apartment is left.

    // SAFETY: COM is initialised on this thread for the lifetime of `_com`.
    let dialog: IFileOpenDialog =
        unsafe { CoCreateInstance(&FileOpenDialog, None, CLSCTX_INPROC_SERVER) }
            .map_err(|e| DialogError::hresult("CoCreateInstance", &e))?;

    // SAFETY: `dialog` is a live IFileOpenDialog for all calls below.
    unsafe {
        let options = dialog
            .GetOptions()
            .map_err(|e| DialogError::hresult("IFileDialog::GetOptions", &e))?;
        dialog
            .SetOptions(options | FOS_PICKFOLDERS | FOS_FORCEFILESYSTEM)
            .map_err(|e| DialogError::hresult("IFileDialog::SetOptions", &e))?;

        if let Some(title) = request.title() {
            if let Err(e) = dialog.SetTitle(&HSTRING::from(title)) {
                log::warn!("IFileDialog::SetTitle failed: {e:?}");
            }
        }

        // An unresolvable start folder is not fatal; the dialog falls back to
        // its own default location.
        if let Some(dir) = request.directory() {
            match SHCreateItemFromParsingName::<_, _, IShellItem>(
                &HSTRING::from(dir.as_os_str()),
                None,
            ) {
                Ok(item) => {
                    if let Err(e) = dialog.SetFolder(&item) {
                        log::warn!("IFileDialog::SetFolder failed: {e:?}");
                    }
                }
                Err(e) => {
                    log::warn!("cannot resolve start folder {}: {e:?}", dir.display());
                }
            }
        }
    }

    // SAFETY: Modal; runs its own message loop on the calling thread, which is
    // inside the STA entered above.
    if let Err(e) = unsafe { dialog.Show(HWND::default()) } {
        if e.code() == ERROR_CANCELLED.to_hresult() {
            return Ok(None);
        }
        return Err(DialogError::hresult("IFileDialog::Show", &e));
    }

    // SAFETY: Show succeeded, so the dialog holds a result item.
    let item = unsafe { dialog.GetResult() }
        .map_err(|e| DialogError::hresult("IFileDialog::GetResult", &e))?;
    // SAFETY: `item` is a live IShellItem; the returned string is allocated
    // with CoTaskMemAlloc and owned by us from here on.
    let raw = unsafe { item.GetDisplayName(SIGDN_FILESYSPATH) }
        .map_err(|e| DialogError::hresult("IShellItem::GetDisplayName", &e))?;

    // SAFETY: `raw` is a valid NUL-terminated wide string until freed below;
    // the slice is copied into an owned OsString before the free.
    let path = PathBuf::from(os_string_from_wide(unsafe { raw.as_wide() }));
    // SAFETY: Frees the CoTaskMem allocation exactly once; `raw` is not used
    // after this.
    unsafe { CoTaskMemFree(Some(raw.0 as *const _)) };

    Ok(Some(path))
}
