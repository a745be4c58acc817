//! Integration tests for the compatibility adapters.
//!
//! These exercise the raw adapters and the owned types against real files
//! and descriptors. Descriptor acquisition uses the unix fd traits, so the
//! suite runs on the POSIX backend; the same adapter surface compiles for
//! the UCRT backend.
#![cfg(unix)]

use std::io::{Read, Write};
use std::os::fd::IntoRawFd;

use quay_compat::{crt, Access, AlignedBlock, Mode, Stream};
use tempfile::tempdir;

/// Bytes written through the adapted stream must be observable through the
/// underlying file by an independent reader.
#[test]
fn test_stream_write_roundtrip() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("out.bin");
    let fd = std::fs::File::create(&path).unwrap().into_raw_fd();

    let mut stream = unsafe { Stream::from_fd(fd, Mode::new(Access::Write).binary()) }.unwrap();
    stream.write_all(b"quay roundtrip payload").unwrap();
    stream.flush().unwrap();

    assert_eq!(std::fs::read(&path).unwrap(), b"quay roundtrip payload");
    drop(stream);

    // fclose on drop closed the descriptor too; the file stays readable.
    assert_eq!(std::fs::read(&path).unwrap(), b"quay roundtrip payload");
}

#[test]
fn test_stream_read_back() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("in.bin");
    std::fs::write(&path, b"0123456789").unwrap();
    let fd = std::fs::File::open(&path).unwrap().into_raw_fd();

    let mut stream = unsafe { Stream::from_fd(fd, Mode::new(Access::Read)) }.unwrap();
    let mut buf = Vec::new();
    stream.read_to_end(&mut buf).unwrap();
    assert_eq!(buf, b"0123456789");
}

/// A write through a stream adapted with read-only intent must fail, per
/// POSIX stream semantics; the failure is an error return, never a crash.
#[test]
fn test_read_only_stream_rejects_write() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("ro.bin");
    std::fs::write(&path, b"existing").unwrap();
    let fd = std::fs::File::open(&path).unwrap().into_raw_fd();

    let mut stream = unsafe { Stream::from_fd(fd, Mode::new(Access::Read)) }.unwrap();
    let err = stream.write(b"nope");
    assert!(err.is_err());

    // The stream stays readable after the rejected write.
    let mut buf = [0u8; 8];
    stream.read_exact(&mut buf).unwrap();
    assert_eq!(&buf, b"existing");
}

/// The raw adapter passes host rejection through as null, nothing more.
#[test]
fn test_fdopen_invalid_mode_is_null() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("m.bin");
    let fd = std::fs::File::create(&path).unwrap().into_raw_fd();

    let file = unsafe { crt::fdopen(fd, c"z".as_ptr()) };
    assert!(file.is_null());
    unsafe { libc::close(fd) };
}

#[test]
fn test_fdopen_closed_descriptor_is_null() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("c.bin");
    let fd = std::fs::File::create(&path).unwrap().into_raw_fd();
    unsafe { libc::close(fd) };

    let file = unsafe { crt::fdopen(fd, c"r".as_ptr()) };
    assert!(file.is_null());
}

#[test]
fn test_stream_descriptor_matches() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("fd.bin");
    let fd = std::fs::File::create(&path).unwrap().into_raw_fd();

    let stream = unsafe { Stream::from_fd(fd, Mode::new(Access::Write)) }.unwrap();
    assert_eq!(stream.descriptor(), fd);
}

/// Aligned block as an I/O buffer: fill it, push it through a stream, read
/// the file back.
#[test]
fn test_aligned_buffer_through_stream() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("buf.bin");
    let fd = std::fs::File::create(&path).unwrap().into_raw_fd();

    let mut block = AlignedBlock::alloc(64, 256).unwrap();
    assert_eq!(block.ptr() as usize % 64, 0);
    for (i, b) in block.as_bytes_mut().iter_mut().enumerate() {
        *b = (i % 251) as u8;
    }

    let mut stream = unsafe { Stream::from_fd(fd, Mode::new(Access::Write).binary()) }.unwrap();
    stream.write_all(block.as_bytes()).unwrap();
    stream.flush().unwrap();
    drop(stream);

    assert_eq!(std::fs::read(&path).unwrap(), block.as_bytes());
}

/// Append mode positions every write at the end regardless of prior content.
#[test]
fn test_append_mode() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("app.bin");
    std::fs::write(&path, b"head:").unwrap();
    let fd = std::fs::OpenOptions::new()
        .append(true)
        .open(&path)
        .unwrap()
        .into_raw_fd();

    let mut stream = unsafe { Stream::from_fd(fd, Mode::new(Access::Append)) }.unwrap();
    stream.write_all(b"tail").unwrap();
    drop(stream);

    assert_eq!(std::fs::read(&path).unwrap(), b"head:tail");
}

/// into_raw hands the FILE and its close obligation to the caller.
#[test]
fn test_stream_into_raw() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("raw.bin");
    let fd = std::fs::File::create(&path).unwrap().into_raw_fd();

    let stream = unsafe { Stream::from_fd(fd, Mode::new(Access::Write)) }.unwrap();
    let file = stream.into_raw();
    assert!(!file.is_null());
    unsafe { libc::fclose(file) };
}
