use std::ffi::CString;
use std::path::Path;
use std::ptr::NonNull;

use crate::error::{SoundError, SoundResult};

/// Allocate a zeroed native object on the heap. miniaudio objects keep
/// pointers into themselves, so they must never move once initialized.
pub(crate) fn alloc_zeroed<T>() -> NonNull<T> {
    // SAFETY: only used for miniaudio's plain C structs, for which all-zero
    // bytes are a valid (uninitialized) state.
    let boxed: Box<T> = unsafe { Box::<T>::new_zeroed().assume_init() };
    NonNull::from(Box::leak(boxed))
}

/// Release memory obtained from [`alloc_zeroed`].
///
/// SAFETY: `ptr` must come from `alloc_zeroed` and any native uninit must
/// already have run.
pub(crate) unsafe fn free<T>(ptr: NonNull<T>) {
    drop(Box::from_raw(ptr.as_ptr()));
}

pub(crate) fn path_to_cstring(path: &Path) -> SoundResult<CString> {
    let path_str = path
        .to_str()
        .ok_or_else(|| SoundError::InvalidPath(path.display().to_string()))?;
    CString::new(path_str).map_err(|_| SoundError::InvalidPath(path_str.to_string()))
}
