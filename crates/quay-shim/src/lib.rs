//! # quay-shim
//!
//! Link-time shim providing the POSIX/C11 names `aligned_alloc`, `free`
//! and `fdopen` on Windows/MSVC hosts, where the UCRT spells them
//! `_aligned_malloc`, `_aligned_free` and `_fdopen`. Code written against
//! the POSIX names links against this library and runs unmodified.
//!
//! Each export is a stateless one-line forward through `quay-compat`'s raw
//! adapters: no retry, no validation, no added failure path. Null returns
//! and errno pass through verbatim.
//!
//! # Compilation boundary
//!
//! The exports compile only under `all(windows, target_env = "msvc")`. On
//! every other target this crate contributes no symbols at all: those hosts'
//! C runtimes already provide the three names with conforming behavior, and
//! defining them here would collide with the host's own.
//!
//! # Deallocator identity
//!
//! The exported `free` releases through `_aligned_free`. It is therefore
//! only correct for pointers obtained from the exported `aligned_alloc`;
//! linking this shim into code that also frees `malloc` blocks through the
//! POSIX `free` name is a misuse of the seam.
//!
//! # Diagnostics
//!
//! Off by default. Set `QUAY_SHIM_LOG=calls` (or `verbose`) to mirror each
//! forwarded call to stderr. The channel allocates nothing — fixed stack
//! buffers and `libc::write` only — so it is safe inside a foreign process.

// Unsafe C ABI exports; per-function safety docs would restate the POSIX contract
#![allow(clippy::missing_safety_doc)]

#[cfg(all(windows, target_env = "msvc"))]
#[macro_use]
mod diag;

#[cfg(all(windows, target_env = "msvc"))]
mod exports;

#[cfg(all(windows, target_env = "msvc"))]
pub use exports::*;
