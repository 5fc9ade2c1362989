// ── Win32 platform implementation ─────────────────────────────────────────────
//
// One of exactly two modules in the crate where `unsafe` code is permitted
// (the other is `ffi`).  Every `unsafe` block MUST carry a `// SAFETY:`
// comment that states:
//   • which invariant makes the operation sound, and
//   • what the caller is responsible for maintaining.
//
// Nothing in this module is `pub` beyond what callers genuinely need; keep the
// unsafe surface as small as possible.

#![allow(unsafe_code)]

// ── Sub-modules ───────────────────────────────────────────────────────────────

mod com; // per-call COM apartment guard
mod dialogs; // GetOpenFileNameW (common dialog)
mod folder; // IFileOpenDialog with FOS_PICKFOLDERS

pub(crate) use dialogs::open_file;
pub(crate) use folder::open_folder;
