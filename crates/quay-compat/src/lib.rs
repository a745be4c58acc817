//! # quay-compat
//!
//! Safe adapters over the Quay POSIX/C11 compatibility layer.
//!
//! Three operations cross this boundary, and nothing else:
//!
//! - aligned allocation (`aligned_alloc` shape)
//! - deallocation of such a block (`free` shape)
//! - adapting an open descriptor to a buffered stream (`fdopen` shape)
//!
//! The raw adapters live in [`crt`] and are selected per target at build
//! time: on Windows/MSVC they forward to the UCRT's underscore-prefixed
//! primitives (`_aligned_malloc`, `_aligned_free`, `_fdopen`); everywhere
//! else they forward to the host's own POSIX symbols, which already satisfy
//! the contract. Each adapter is a stateless, synchronous pass-through:
//! failure is a null return carrying the host's errno, nothing is retried,
//! nothing is validated beyond what the host primitive validates.
//!
//! # Deallocator identity
//!
//! A block obtained through [`crt::aligned_alloc`] must be released through
//! [`crt::aligned_free`] and nothing else. On Windows the two map to the
//! `_aligned_*` allocator family, which is not interchangeable with the
//! UCRT's generic `free`. [`AlignedBlock`] enforces this mechanically via
//! `Drop`; raw-pointer users carry the obligation themselves.

#[cfg_attr(all(windows, target_env = "msvc"), path = "crt_windows.rs")]
#[cfg_attr(not(all(windows, target_env = "msvc")), path = "crt_posix.rs")]
pub mod crt;

pub mod heap;
pub mod logging;
pub mod stream;

pub use heap::AlignedBlock;
pub use stream::{Access, Mode, ModeError, Stream};
