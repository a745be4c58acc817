//! UCRT backend: forwards each POSIX-shaped call to the Windows-native
//! `_aligned_*` / `_fdopen` primitives.
//!
//! The UCRT satisfies the same contracts under different names, with one
//! trap: `_aligned_malloc` takes (size, alignment) where C11 `aligned_alloc`
//! takes (alignment, size), and blocks it returns must go back through
//! `_aligned_free` — the UCRT's generic `free` aborts the heap on them.

use libc::{c_char, c_int, c_void, size_t, FILE};

extern "C" {
    #[link_name = "_aligned_malloc"]
    fn ucrt_aligned_malloc(size: size_t, alignment: size_t) -> *mut c_void;

    #[link_name = "_aligned_free"]
    fn ucrt_aligned_free(ptr: *mut c_void);

    #[link_name = "_fdopen"]
    fn ucrt_fdopen(fd: c_int, mode: *const c_char) -> *mut FILE;

    #[link_name = "_fileno"]
    fn ucrt_fileno(stream: *mut FILE) -> c_int;
}

/// C11 `aligned_alloc` over `_aligned_malloc`. Note the argument-order swap.
///
/// Null on failure, errno set by the UCRT. Alignment legality and zero-size
/// behavior are the UCRT's own; nothing is checked here.
///
/// # Safety
/// The returned block must be released via [`aligned_free`], never a generic
/// `free`.
pub unsafe fn aligned_alloc(alignment: size_t, size: size_t) -> *mut c_void {
    ucrt_aligned_malloc(size, alignment)
}

/// C `free` contract for blocks from [`aligned_alloc`]. Null is a no-op.
///
/// # Safety
/// `ptr` must be null or a live block returned by [`aligned_alloc`] on this
/// platform, not yet freed.
pub unsafe fn aligned_free(ptr: *mut c_void) {
    ucrt_aligned_free(ptr)
}

/// POSIX `fdopen` over `_fdopen`. The stream takes ownership of `fd`.
///
/// # Safety
/// `fd` must be a valid open descriptor and `mode` a null-terminated string.
/// After a non-null return, `fd` belongs to the stream; raw use of it is
/// undefined.
pub unsafe fn fdopen(fd: c_int, mode: *const c_char) -> *mut FILE {
    ucrt_fdopen(fd, mode)
}

/// POSIX `fileno` over `_fileno`.
///
/// # Safety
/// `stream` must be a valid open `FILE`.
pub unsafe fn stream_fd(stream: *mut FILE) -> c_int {
    ucrt_fileno(stream)
}
