//! Error taxonomy untuk operasi ring buffer

use std::time::Duration;

use thiserror::Error;

/// Error dari operasi `RingBuffer`.
///
/// Tidak ada error yang meninggalkan region dalam keadaan torn: cursor
/// hanya maju setelah bytes frame selesai ditulis atau dibaca.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum RingError {
    /// Free space saat ini tidak cukup (non-blocking path)
    #[error("ring buffer is full")]
    Full,

    /// Pesan + header tidak akan pernah muat di region ini
    #[error("message of {len} bytes exceeds the maximum of {max} bytes")]
    MessageTooLarge { len: usize, max: usize },

    /// Tidak ada pesan untuk dibaca (non-blocking path)
    #[error("ring buffer is empty")]
    Empty,

    /// Buffer output caller lebih kecil dari pesan; tidak ada yang dikonsumsi
    #[error("output buffer of {available} bytes cannot hold message of {required} bytes")]
    OutputBufferTooSmall { required: usize, available: usize },

    /// Bounded wait habis sebelum kondisi terpenuhi; state tidak berubah
    #[error("timed out after {0:?} waiting on ring buffer")]
    Timeout(Duration),

    /// Header di region mengklaim payload lebih besar dari used space
    #[error("corrupt frame: header claims {len} bytes but only {used} bytes are in use")]
    CorruptFrame { len: usize, used: usize },

    /// Operasi dipanggil setelah `destroy`
    #[error("ring buffer used after destroy")]
    Destroyed,
}

impl RingError {
    /// Apakah caller boleh retry operasi yang sama tanpa mengubah input
    pub fn is_retryable(&self) -> bool {
        matches!(self, RingError::Full | RingError::Empty | RingError::Timeout(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retryable_classification() {
        assert!(RingError::Full.is_retryable());
        assert!(RingError::Empty.is_retryable());
        assert!(RingError::Timeout(Duration::from_secs(1)).is_retryable());
        assert!(!RingError::MessageTooLarge { len: 10, max: 5 }.is_retryable());
        assert!(!RingError::OutputBufferTooSmall { required: 4, available: 2 }.is_retryable());
        assert!(!RingError::Destroyed.is_retryable());
    }

    #[test]
    fn test_display_mentions_sizes() {
        let err = RingError::OutputBufferTooSmall { required: 16, available: 4 };
        assert_eq!(
            err.to_string(),
            "output buffer of 4 bytes cannot hold message of 16 bytes"
        );
    }
}
