//! The three POSIX-named C ABI exports, each one forward to the matching
//! `quay-compat` raw adapter. No state, no validation, no added failure
//! path; null and errno pass through verbatim.

use libc::{c_char, c_int, c_void, size_t, FILE};

use crate::diag::DiagLevel;

/// C11 `aligned_alloc`. Argument order follows C11; the adapter performs
/// the swap the UCRT's `_aligned_malloc` expects.
#[no_mangle]
pub unsafe extern "C" fn aligned_alloc(alignment: size_t, size: size_t) -> *mut c_void {
    let ptr = quay_compat::crt::aligned_alloc(alignment, size);
    shim_diag!(
        DiagLevel::Calls,
        "aligned_alloc({}, {}) -> {:p}",
        alignment,
        size,
        ptr
    );
    ptr
}

/// C `free`, releasing through `_aligned_free`. Correct only for pointers
/// from the exported [`aligned_alloc`]; null is a no-op.
#[no_mangle]
pub unsafe extern "C" fn free(ptr: *mut c_void) {
    shim_diag!(DiagLevel::Verbose, "free({:p})", ptr);
    quay_compat::crt::aligned_free(ptr)
}

/// POSIX `fdopen`. On success the returned stream owns `fd`.
#[no_mangle]
pub unsafe extern "C" fn fdopen(fd: c_int, mode: *const c_char) -> *mut FILE {
    let stream = quay_compat::crt::fdopen(fd, mode);
    shim_diag!(DiagLevel::Calls, "fdopen({}) -> {:p}", fd, stream);
    stream
}
