//! Cursor read/write dan accounting used/free space secara circular

use crate::protocol::frame_len;

/// Dua offset ke dalam region `[0, capacity)`.
///
/// `read == write` berarti kosong. Satu byte selalu dibiarkan kosong
/// sehingga kondisi penuh tidak pernah menghasilkan `read == write`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Cursors {
    read: usize,
    write: usize,
    capacity: usize,
}

impl Cursors {
    pub(crate) const fn new(capacity: usize) -> Self {
        Self {
            read: 0,
            write: 0,
            capacity,
        }
    }

    #[inline(always)]
    pub(crate) fn read(&self) -> usize {
        self.read
    }

    #[inline(always)]
    pub(crate) fn write(&self) -> usize {
        self.write
    }

    /// Bytes yang sedang terpakai, diukur circular dari `read` ke `write`
    #[inline(always)]
    pub(crate) fn used(&self) -> usize {
        if self.write >= self.read {
            self.write - self.read
        } else {
            (self.capacity - self.read) + self.write
        }
    }

    #[inline(always)]
    pub(crate) fn free(&self) -> usize {
        self.capacity - self.used()
    }

    #[inline(always)]
    pub(crate) fn is_empty(&self) -> bool {
        self.read == self.write
    }

    /// Wake predicate writer: free space harus strictly lebih besar dari frame
    #[inline(always)]
    pub(crate) fn has_room(&self, payload_len: usize) -> bool {
        self.free() > frame_len(payload_len)
    }

    pub(crate) fn advance_write(&mut self, to: usize) {
        debug_assert!(to < self.capacity, "write cursor {} out of bounds", to);
        self.write = to;
    }

    pub(crate) fn advance_read(&mut self, to: usize) {
        debug_assert!(to < self.capacity, "read cursor {} out of bounds", to);
        self.read = to;
    }
}
