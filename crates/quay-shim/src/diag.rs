//! Zero-allocation stderr diagnostics for the shim exports.
//!
//! The shim runs inside a foreign process, possibly underneath that
//! process's own allocator; the usual tracing stack is off limits. This
//! channel formats into a fixed stack buffer and emits with a single
//! `libc::write(2, ...)`, touching no heap and no Rust runtime services.
//!
//! Gated by `QUAY_SHIM_LOG`, read once through `libc::getenv` on first use:
//! unset/`off`/`0` disables it (the default), `verbose`/`2` selects the
//! chatty level, anything else enables per-call records.

use std::ffi::CStr;
use std::sync::atomic::{AtomicU8, Ordering};

#[derive(Clone, Copy, PartialEq, PartialOrd)]
#[repr(u8)]
pub(crate) enum DiagLevel {
    Off = 0,
    Calls = 1,
    Verbose = 2,
}

const LEVEL_UNSET: u8 = u8::MAX;
static LEVEL: AtomicU8 = AtomicU8::new(LEVEL_UNSET);

pub(crate) fn level() -> DiagLevel {
    let raw = LEVEL.load(Ordering::Relaxed);
    if raw != LEVEL_UNSET {
        return match raw {
            1 => DiagLevel::Calls,
            2 => DiagLevel::Verbose,
            _ => DiagLevel::Off,
        };
    }
    let level = unsafe {
        let val = libc::getenv(c"QUAY_SHIM_LOG".as_ptr());
        if val.is_null() {
            DiagLevel::Off
        } else {
            match CStr::from_ptr(val).to_bytes() {
                b"" | b"off" | b"0" => DiagLevel::Off,
                b"verbose" | b"2" => DiagLevel::Verbose,
                _ => DiagLevel::Calls,
            }
        }
    };
    LEVEL.store(level as u8, Ordering::Relaxed);
    level
}

pub(crate) const DIAG_BUF_SIZE: usize = 256;

/// `fmt::Write` over a caller-provided stack buffer; output past the end is
/// silently truncated.
pub(crate) struct StackWriter<'a> {
    buf: &'a mut [u8],
    pos: usize,
}

impl<'a> StackWriter<'a> {
    pub(crate) fn new(buf: &'a mut [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    pub(crate) fn as_bytes(&self) -> &[u8] {
        &self.buf[..self.pos]
    }
}

impl std::fmt::Write for StackWriter<'_> {
    fn write_str(&mut self, s: &str) -> std::fmt::Result {
        let bytes = s.as_bytes();
        let remaining = self.buf.len() - self.pos;
        let to_copy = std::cmp::min(bytes.len(), remaining);
        self.buf[self.pos..self.pos + to_copy].copy_from_slice(&bytes[..to_copy]);
        self.pos += to_copy;
        Ok(())
    }
}

pub(crate) fn emit(args: std::fmt::Arguments<'_>) {
    use std::fmt::Write;
    let mut buf = [0u8; DIAG_BUF_SIZE];
    let mut writer = StackWriter::new(&mut buf);
    let _ = write!(writer, "[quay-shim] ");
    let _ = writer.write_fmt(args);
    let _ = writer.write_str("\n");
    let msg = writer.as_bytes();
    unsafe {
        libc::write(2, msg.as_ptr().cast(), msg.len() as libc::c_uint);
    }
}

/// Records one line at the given level if `QUAY_SHIM_LOG` enables it.
macro_rules! shim_diag {
    ($level:expr, $($arg:tt)*) => {
        if $crate::diag::level() >= $level {
            $crate::diag::emit(format_args!($($arg)*));
        }
    };
}
