//! Owned buffered streams over the raw [`crt::fdopen`](crate::crt::fdopen)
//! adapter, plus the typed mode-string model.

use std::ffi::CStr;
use std::io;
use std::ptr::NonNull;
use std::str::FromStr;

use libc::{c_int, FILE};
use thiserror::Error;

use crate::crt;

/// Base access intent of a mode string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Read,
    Write,
    Append,
}

/// Typed form of the small enumerated `fdopen` mode-string set.
///
/// This is the safe-API surface only: the raw adapter keeps accepting an
/// arbitrary C string verbatim, and the legality of the rendered string
/// stays defined by the host primitive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Mode {
    access: Access,
    update: bool,
    binary: bool,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ModeError {
    #[error("empty mode string")]
    Empty,

    #[error("unknown access specifier: {0:?}")]
    UnknownAccess(char),

    #[error("unexpected mode flag: {0:?}")]
    UnexpectedFlag(char),
}

impl Mode {
    pub fn new(access: Access) -> Self {
        Self {
            access,
            update: false,
            binary: false,
        }
    }

    /// Adds the `+` update flag (read and write through the stream).
    pub fn update(mut self) -> Self {
        self.update = true;
        self
    }

    /// Adds the `b` binary flag. A no-op on POSIX hosts; on the UCRT it
    /// suppresses text-mode newline translation.
    pub fn binary(mut self) -> Self {
        self.binary = true;
        self
    }

    pub fn access(&self) -> Access {
        self.access
    }

    pub fn as_str(&self) -> &'static str {
        match (self.access, self.update, self.binary) {
            (Access::Read, false, false) => "r",
            (Access::Read, false, true) => "rb",
            (Access::Read, true, false) => "r+",
            (Access::Read, true, true) => "rb+",
            (Access::Write, false, false) => "w",
            (Access::Write, false, true) => "wb",
            (Access::Write, true, false) => "w+",
            (Access::Write, true, true) => "wb+",
            (Access::Append, false, false) => "a",
            (Access::Append, false, true) => "ab",
            (Access::Append, true, false) => "a+",
            (Access::Append, true, true) => "ab+",
        }
    }

    pub fn as_cstr(&self) -> &'static CStr {
        match (self.access, self.update, self.binary) {
            (Access::Read, false, false) => c"r",
            (Access::Read, false, true) => c"rb",
            (Access::Read, true, false) => c"r+",
            (Access::Read, true, true) => c"rb+",
            (Access::Write, false, false) => c"w",
            (Access::Write, false, true) => c"wb",
            (Access::Write, true, false) => c"w+",
            (Access::Write, true, true) => c"wb+",
            (Access::Append, false, false) => c"a",
            (Access::Append, false, true) => c"ab",
            (Access::Append, true, false) => c"a+",
            (Access::Append, true, true) => c"ab+",
        }
    }
}

impl FromStr for Mode {
    type Err = ModeError;

    /// Accepts the flag characters in either order (`"rb+"` and `"r+b"`
    /// name the same mode), matching what C runtimes accept.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        let access = match chars.next() {
            None => return Err(ModeError::Empty),
            Some('r') => Access::Read,
            Some('w') => Access::Write,
            Some('a') => Access::Append,
            Some(c) => return Err(ModeError::UnknownAccess(c)),
        };
        let mut mode = Mode::new(access);
        for c in chars {
            match c {
                '+' if !mode.update => mode.update = true,
                'b' if !mode.binary => mode.binary = true,
                other => return Err(ModeError::UnexpectedFlag(other)),
            }
        }
        Ok(mode)
    }
}

impl std::fmt::Display for Mode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Exclusive owner of one `FILE` stream produced by [`crt::fdopen`].
///
/// Constructing it consumes ownership of the descriptor; dropping the
/// stream runs `fclose`, which closes that descriptor. Buffered I/O goes
/// through the [`io::Read`]/[`io::Write`] implementations.
pub struct Stream {
    file: NonNull<FILE>,
}

impl Stream {
    /// Adapts an open descriptor to a buffered stream.
    ///
    /// A rejected descriptor or mode surfaces as the host's errno; no other
    /// failure path exists. On success the descriptor belongs to the stream
    /// and raw reads or writes on it bypass the buffer with undefined
    /// results.
    ///
    /// # Safety
    /// `fd` must be a valid open descriptor not owned elsewhere; ownership
    /// transfers to the returned stream.
    pub unsafe fn from_fd(fd: c_int, mode: Mode) -> io::Result<Self> {
        let file = crt::fdopen(fd, mode.as_cstr().as_ptr());
        let Some(file) = NonNull::new(file) else {
            return Err(io::Error::last_os_error());
        };
        tracing::trace!(fd, mode = mode.as_str(), "descriptor adapted to stream");
        Ok(Self { file })
    }

    /// The underlying descriptor, still owned by the stream.
    pub fn descriptor(&self) -> c_int {
        unsafe { crt::stream_fd(self.file.as_ptr()) }
    }

    pub fn as_ptr(&self) -> *mut FILE {
        self.file.as_ptr()
    }

    pub fn flush(&mut self) -> io::Result<()> {
        if unsafe { libc::fflush(self.file.as_ptr()) } != 0 {
            return Err(io::Error::last_os_error());
        }
        Ok(())
    }

    /// Releases ownership of the `FILE` (and with it the close obligation)
    /// to the caller.
    pub fn into_raw(self) -> *mut FILE {
        let file = self.file.as_ptr();
        std::mem::forget(self);
        file
    }
}

impl io::Read for Stream {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if buf.is_empty() {
            return Ok(0);
        }
        let n = unsafe { libc::fread(buf.as_mut_ptr().cast(), 1, buf.len(), self.file.as_ptr()) };
        if n == 0 && unsafe { libc::ferror(self.file.as_ptr()) } != 0 {
            unsafe { libc::clearerr(self.file.as_ptr()) };
            return Err(io::Error::last_os_error());
        }
        Ok(n)
    }
}

impl io::Write for Stream {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if buf.is_empty() {
            return Ok(0);
        }
        let n = unsafe { libc::fwrite(buf.as_ptr().cast(), 1, buf.len(), self.file.as_ptr()) };
        if n == 0 {
            unsafe { libc::clearerr(self.file.as_ptr()) };
            return Err(io::Error::last_os_error());
        }
        Ok(n)
    }

    fn flush(&mut self) -> io::Result<()> {
        Stream::flush(self)
    }
}

impl Drop for Stream {
    fn drop(&mut self) {
        tracing::trace!(fd = self.descriptor(), "stream closed");
        // fclose failure on drop has nowhere to go; POSIX leaves the stream
        // unusable either way.
        unsafe { libc::fclose(self.file.as_ptr()) };
    }
}

// The stream owns its FILE and all methods take &mut, so moving it across
// threads is fine; sharing it is not (C stream buffering).
unsafe impl Send for Stream {}

impl std::fmt::Debug for Stream {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Stream")
            .field("fd", &self.descriptor())
            .finish()
    }
}
