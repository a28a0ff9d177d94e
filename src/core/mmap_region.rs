//! Mmap-backed region untuk dipakai sebagai backing memory `RingBuffer`
//!
//! Region ini murni bytes: cursor dan lock tetap milik `RingBuffer`.
//! File-backed region memungkinkan frame diperiksa (atau di-dump) oleh
//! proses lain yang me-map file yang sama.

use memmap2::{MmapMut, MmapOptions};
use std::fs::OpenOptions;
use std::io;
use std::path::Path;

/// Region memory hasil mmap
pub struct MmapRegion {
    mmap: MmapMut,
}

impl MmapRegion {
    /// Membuat atau membuka file region dengan ukuran `size` bytes.
    ///
    /// Isi file yang sudah ada tidak di-truncate.
    pub fn create<P: AsRef<Path>>(path: P, size: usize) -> io::Result<Self> {
        if size == 0 {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                "region size must be non-zero",
            ));
        }

        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(path)?;

        file.set_len(size as u64)?;

        // SAFETY: File dibuka read/write dan ukurannya sudah di-set.
        // Caller bertanggung jawab agar file tidak di-truncate proses lain.
        let mmap = unsafe { MmapOptions::new().len(size).map_mut(&file)? };

        Ok(Self { mmap })
    }

    /// Region anonim (tidak di-back file), zero-filled
    pub fn anonymous(size: usize) -> io::Result<Self> {
        let mmap = MmapOptions::new().len(size).map_anon()?;
        Ok(Self { mmap })
    }

    #[inline(always)]
    pub fn len(&self) -> usize {
        self.mmap.len()
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.mmap.is_empty()
    }

    /// Flush perubahan ke file backing
    pub fn flush(&self) -> io::Result<()> {
        self.mmap.flush()
    }
}

impl AsRef<[u8]> for MmapRegion {
    fn as_ref(&self) -> &[u8] {
        &self.mmap
    }
}

impl AsMut<[u8]> for MmapRegion {
    fn as_mut(&mut self) -> &mut [u8] {
        &mut self.mmap
    }
}

impl std::fmt::Debug for MmapRegion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MmapRegion")
            .field("len", &self.mmap.len())
            .finish()
    }
}
