#![allow(unsafe_code)]

use std::marker::PhantomData;

use windows::Win32::System::Com::{
    CoInitializeEx, CoUninitialize, COINIT_APARTMENTTHREADED, COINIT_DISABLE_OLE1DDE,
};

use crate::error::{DialogError, Result};

/// A single-threaded COM apartment entered for the lifetime of the value.
///
/// Every successful `CoInitializeEx` (including `S_FALSE`, "already
/// initialised on this thread") is balanced by one `CoUninitialize` on drop.
/// Interface pointers created inside the apartment must be dropped first.
pub(crate) struct ComApartment {
    // COM initialisation is per thread; the guard must not move between threads.
    _not_send: PhantomData<*const ()>,
}

impl ComApartment {
    pub(crate) fn enter() -> Result<Self> {
        // SAFETY: No reserved pointer is passed.  The matching CoUninitialize
        // runs in Drop on this same thread (the guard is !Send).
        let hr = unsafe { CoInitializeEx(None, COINIT_APARTMENTTHREADED | COINIT_DISABLE_OLE1DDE) };
        // RPC_E_CHANGED_MODE (host thread already in the MTA) lands here too.
        hr.ok().map_err(|e| DialogError::hresult("CoInitializeEx", &e))?;
        log::trace!("entered COM apartment");
        Ok(Self {
            _not_send: PhantomData,
        })
    }
}

impl Drop for ComApartment {
    fn drop(&mut self) {
        // SAFETY: Paired with the successful CoInitializeEx in `enter`.
        unsafe { CoUninitialize() };
        log::trace!("left COM apartment");
    }
}
