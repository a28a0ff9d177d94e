//! Format frame di dalam region
//!
//! Layout:
//! ┌──────────────────────────────────────────────┐
//! │ Length header (u64, native endian, 8 bytes)  │
//! ├──────────────────────────────────────────────┤
//! │ Payload (length bytes)                       │
//! └──────────────────────────────────────────────┘
//!
//! Tidak ada padding, alignment, atau checksum. Header maupun payload
//! boleh terpotong di akhir region dan lanjut di awal region.
//! Layout ini identik dengan header `size_t` pada host 64-bit, sehingga
//! reader eksternal di region yang sama bisa membacanya langsung.

use std::mem;

/// Tipe header panjang payload
pub type LengthHeader = u64;

/// Ukuran header dalam bytes
pub const HEADER_SIZE: usize = mem::size_of::<LengthHeader>();

/// Total bytes yang dipakai satu frame (header + payload)
#[inline(always)]
pub const fn frame_len(payload_len: usize) -> usize {
    HEADER_SIZE.saturating_add(payload_len)
}

/// Encode panjang payload ke header bytes
#[inline(always)]
pub fn encode_header(payload_len: usize) -> [u8; HEADER_SIZE] {
    (payload_len as LengthHeader).to_ne_bytes()
}

/// Decode header bytes menjadi panjang payload.
///
/// Nilai yang tidak muat di `usize` dijenuhkan ke `usize::MAX`; caller
/// memvalidasi hasilnya terhadap used space.
#[inline(always)]
pub fn decode_header(bytes: [u8; HEADER_SIZE]) -> usize {
    usize::try_from(LengthHeader::from_ne_bytes(bytes)).unwrap_or(usize::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_layout_matches_native_u64() {
        let bytes = encode_header(0x0102_0304);
        assert_eq!(bytes, 0x0102_0304u64.to_ne_bytes());
        assert_eq!(decode_header(bytes), 0x0102_0304);
    }

    #[test]
    fn test_frame_len() {
        assert_eq!(HEADER_SIZE, 8);
        assert_eq!(frame_len(0), HEADER_SIZE);
        assert_eq!(frame_len(100), 108);
        assert_eq!(frame_len(usize::MAX), usize::MAX);
    }
}
