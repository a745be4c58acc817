//! POSIX backend: the host's C runtime already provides conforming
//! `aligned_alloc`, `free`, `fdopen` and `fileno`, so every adapter is a
//! direct pass-through via the `libc` crate. This backend exists so the safe
//! API and the tests exercise the exact adapter surface the UCRT backend
//! exports.

use libc::{c_char, c_int, c_void, size_t, FILE};

/// C11 `aligned_alloc`, forwarded verbatim.
///
/// Null on failure, errno set by the host. Alignment legality and zero-size
/// behavior are the host's own; nothing is checked here.
///
/// # Safety
/// The returned block must be released via [`aligned_free`].
pub unsafe fn aligned_alloc(alignment: size_t, size: size_t) -> *mut c_void {
    libc::aligned_alloc(alignment, size)
}

/// C `free` for blocks from [`aligned_alloc`]. Null is a no-op.
///
/// On POSIX hosts the aligned allocator and `free` share a heap, but callers
/// must still pair the two adapters so the same code is correct on the UCRT
/// backend, where they do not.
///
/// # Safety
/// `ptr` must be null or a live block returned by [`aligned_alloc`], not yet
/// freed.
pub unsafe fn aligned_free(ptr: *mut c_void) {
    libc::free(ptr)
}

/// POSIX `fdopen`, forwarded verbatim. The stream takes ownership of `fd`.
///
/// # Safety
/// `fd` must be a valid open descriptor and `mode` a null-terminated string.
/// After a non-null return, `fd` belongs to the stream; raw use of it is
/// undefined.
pub unsafe fn fdopen(fd: c_int, mode: *const c_char) -> *mut FILE {
    libc::fdopen(fd, mode)
}

/// POSIX `fileno`, forwarded verbatim.
///
/// # Safety
/// `stream` must be a valid open `FILE`.
pub unsafe fn stream_fd(stream: *mut FILE) -> c_int {
    libc::fileno(stream)
}
