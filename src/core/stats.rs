//! Counter statistik ring buffer (relaxed atomics, tanpa lock)

use std::sync::atomic::{AtomicU64, Ordering};

#[derive(Debug, Default)]
pub(crate) struct RingStats {
    messages_written: AtomicU64,
    messages_read: AtomicU64,
    bytes_written: AtomicU64,
    bytes_read: AtomicU64,
    writer_waits: AtomicU64,
    reader_waits: AtomicU64,
    timeouts: AtomicU64,
    rejected_too_large: AtomicU64,
}

/// Snapshot statistik pada satu titik waktu
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatsSnapshot {
    pub messages_written: u64,
    pub messages_read: u64,
    pub bytes_written: u64,
    pub bytes_read: u64,
    /// Berapa kali writer harus blocking menunggu space
    pub writer_waits: u64,
    /// Berapa kali reader harus blocking menunggu data
    pub reader_waits: u64,
    pub timeouts: u64,
    pub rejected_too_large: u64,
}

impl RingStats {
    #[inline(always)]
    pub(crate) fn record_write(&self, len: usize) {
        self.messages_written.fetch_add(1, Ordering::Relaxed);
        self.bytes_written.fetch_add(len as u64, Ordering::Relaxed);
    }

    #[inline(always)]
    pub(crate) fn record_read(&self, len: usize) {
        self.messages_read.fetch_add(1, Ordering::Relaxed);
        self.bytes_read.fetch_add(len as u64, Ordering::Relaxed);
    }

    pub(crate) fn record_writer_wait(&self) {
        self.writer_waits.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_reader_wait(&self) {
        self.reader_waits.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_timeout(&self) {
        self.timeouts.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_too_large(&self) {
        self.rejected_too_large.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn snapshot(&self) -> StatsSnapshot {
        StatsSnapshot {
            messages_written: self.messages_written.load(Ordering::Relaxed),
            messages_read: self.messages_read.load(Ordering::Relaxed),
            bytes_written: self.bytes_written.load(Ordering::Relaxed),
            bytes_read: self.bytes_read.load(Ordering::Relaxed),
            writer_waits: self.writer_waits.load(Ordering::Relaxed),
            reader_waits: self.reader_waits.load(Ordering::Relaxed),
            timeouts: self.timeouts.load(Ordering::Relaxed),
            rejected_too_large: self.rejected_too_large.load(Ordering::Relaxed),
        }
    }
}
