//! Owned aligned heap blocks over the raw [`crt`](crate::crt) adapter pair.

use std::alloc::Layout;
use std::io;
use std::ptr::NonNull;

use crate::crt;

/// Exclusive owner of one block returned by [`crt::aligned_alloc`].
///
/// `Drop` releases the block through [`crt::aligned_free`] — the matching
/// deallocator for this platform's aligned allocator family. Releasing it
/// any other way (in particular through a generic `free` on Windows) is
/// undefined behavior; that obligation travels with the pointer through
/// [`into_raw`](Self::into_raw).
pub struct AlignedBlock {
    ptr: NonNull<u8>,
    len: usize,
    align: usize,
}

impl AlignedBlock {
    /// Allocates `len` bytes aligned to `align` and zero-fills them.
    ///
    /// `align` must be a power of two accepted by the host allocator; this
    /// layer adds no validation of its own. A null return from the host is
    /// surfaced as the host's errno.
    pub fn alloc(align: usize, len: usize) -> io::Result<Self> {
        let ptr = unsafe { crt::aligned_alloc(align, len) };
        let Some(ptr) = NonNull::new(ptr.cast::<u8>()) else {
            return Err(io::Error::last_os_error());
        };
        // The raw adapter hands back uninitialized memory; the byte-slice
        // accessors require it initialized.
        unsafe { std::ptr::write_bytes(ptr.as_ptr(), 0, len) };
        tracing::trace!(align, len, ptr = ?ptr, "aligned block allocated");
        Ok(Self { ptr, len, align })
    }

    /// [`alloc`](Self::alloc) from a `Layout`.
    pub fn from_layout(layout: Layout) -> io::Result<Self> {
        Self::alloc(layout.align(), layout.size())
    }

    pub fn ptr(&self) -> *mut u8 {
        self.ptr.as_ptr()
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn alignment(&self) -> usize {
        self.align
    }

    pub fn as_bytes(&self) -> &[u8] {
        unsafe { std::slice::from_raw_parts(self.ptr.as_ptr(), self.len) }
    }

    pub fn as_bytes_mut(&mut self) -> &mut [u8] {
        unsafe { std::slice::from_raw_parts_mut(self.ptr.as_ptr(), self.len) }
    }

    /// Releases ownership without freeing. The caller must eventually pass
    /// the pointer back through [`crt::aligned_free`] or
    /// [`from_raw`](Self::from_raw); any other deallocation entry point is
    /// undefined.
    pub fn into_raw(self) -> *mut u8 {
        let ptr = self.ptr.as_ptr();
        std::mem::forget(self);
        ptr
    }

    /// Resumes ownership of a block previously released by
    /// [`into_raw`](Self::into_raw).
    ///
    /// # Safety
    /// `ptr` must have come from this layer's aligned allocation entry point
    /// with exactly this `len` and `align`, and must not be owned elsewhere.
    pub unsafe fn from_raw(ptr: *mut u8, len: usize, align: usize) -> Self {
        Self {
            ptr: NonNull::new_unchecked(ptr),
            len,
            align,
        }
    }
}

impl Drop for AlignedBlock {
    fn drop(&mut self) {
        tracing::trace!(ptr = ?self.ptr, len = self.len, "aligned block freed");
        unsafe { crt::aligned_free(self.ptr.as_ptr().cast()) };
    }
}

// Sole owner of plain memory; no interior mutability.
unsafe impl Send for AlignedBlock {}
unsafe impl Sync for AlignedBlock {}

impl std::fmt::Debug for AlignedBlock {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AlignedBlock")
            .field("ptr", &self.ptr)
            .field("len", &self.len)
            .field("align", &self.align)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alignment_grid() {
        let word = std::mem::size_of::<*const ()>();
        let mut align = word;
        while align <= 4096 {
            // C11 only guarantees sizes that are multiples of the alignment.
            for len in [align, align * 2, align * 16] {
                let mut block = AlignedBlock::alloc(align, len).unwrap();
                assert_eq!(block.ptr() as usize % align, 0);
                assert_eq!(block.len(), len);
                block.as_bytes_mut().fill(0xAB);
                assert!(block.as_bytes().iter().all(|&b| b == 0xAB));
            }
            align *= 2;
        }
    }

    #[test]
    fn test_scenario_64_by_256() {
        let mut block = AlignedBlock::alloc(64, 256).unwrap();
        assert_eq!(block.ptr() as usize % 64, 0);
        for (i, b) in block.as_bytes_mut().iter_mut().enumerate() {
            *b = i as u8;
        }
        drop(block);
    }

    #[test]
    fn test_zero_filled() {
        let block = AlignedBlock::alloc(32, 128).unwrap();
        assert!(block.as_bytes().iter().all(|&b| b == 0));
    }

    #[test]
    fn test_free_null_is_noop() {
        unsafe { crate::crt::aligned_free(std::ptr::null_mut()) };
    }

    #[test]
    fn test_from_layout() {
        let layout = Layout::from_size_align(512, 128).unwrap();
        let block = AlignedBlock::from_layout(layout).unwrap();
        assert_eq!(block.alignment(), 128);
        assert_eq!(block.len(), 512);
    }

    #[test]
    fn test_raw_roundtrip_keeps_obligation() {
        let mut block = AlignedBlock::alloc(64, 64).unwrap();
        block.as_bytes_mut()[0] = 7;
        let ptr = block.into_raw();
        let block = unsafe { AlignedBlock::from_raw(ptr, 64, 64) };
        assert_eq!(block.as_bytes()[0], 7);
    }
}
