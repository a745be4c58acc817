//! Allocates an aligned block, pushes it through an adapted stream, and
//! reads the file back.
//!
//! Run with `QUAY_LOG=trace` to watch the adapter events.

#![cfg_attr(not(unix), allow(unused))]

#[cfg(not(unix))]
fn main() {
    // Descriptor acquisition below uses the unix fd traits; on Windows,
    // obtain an fd via _open_osfhandle and call Stream::from_fd directly.
    eprintln!("this example runs on POSIX hosts only");
}

#[cfg(unix)]
fn main() -> std::io::Result<()> {
    use std::io::Write;
    use std::os::fd::IntoRawFd;

    use quay_compat::{logging, Access, AlignedBlock, Mode, Stream};

    logging::init(tracing_subscriber::filter::LevelFilter::INFO);

    let dir = tempfile::tempdir()?;
    let path = dir.path().join("roundtrip.bin");

    let mut block = AlignedBlock::alloc(64, 256)?;
    for (i, b) in block.as_bytes_mut().iter_mut().enumerate() {
        *b = i as u8;
    }
    println!(
        "allocated {} bytes at {:p} (aligned to {})",
        block.len(),
        block.ptr(),
        block.alignment()
    );

    let fd = std::fs::File::create(&path)?.into_raw_fd();
    let mut stream = unsafe { Stream::from_fd(fd, Mode::new(Access::Write).binary()) }?;
    stream.write_all(block.as_bytes())?;
    stream.flush()?;
    drop(stream);

    let read_back = std::fs::read(&path)?;
    assert_eq!(read_back, block.as_bytes());
    println!("round-trip OK: {} bytes match", read_back.len());
    Ok(())
}
