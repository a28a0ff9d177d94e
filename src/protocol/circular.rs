//! Circular copy: satu helper untuk semua split-copy di batas region
//!
//! Dipakai identik untuk header dan payload, baik saat menulis ke region
//! maupun membaca dari region.

/// Arah transfer bytes relatif terhadap region
#[derive(Debug)]
pub enum Transfer<'a> {
    /// Salin `src` ke dalam region
    Into(&'a [u8]),
    /// Salin isi region ke `dst`
    OutOf(&'a mut [u8]),
}

impl Transfer<'_> {
    /// Jumlah bytes yang ditransfer
    #[inline(always)]
    pub fn len(&self) -> usize {
        match self {
            Transfer::Into(src) => src.len(),
            Transfer::OutOf(dst) => dst.len(),
        }
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Salin bytes mulai dari `offset`, wrap ke awal region jika melewati akhir.
///
/// Returns offset setelah bytes terakhir, dinormalisasi ke 0 jika tepat
/// jatuh di akhir region.
///
/// # Panics
/// Panic jika `offset` di luar region atau transfer lebih besar dari region.
#[inline]
pub fn circular_copy(region: &mut [u8], offset: usize, transfer: Transfer<'_>) -> usize {
    let capacity = region.len();
    let len = transfer.len();
    assert!(offset < capacity, "offset {} out of region {}", offset, capacity);
    assert!(len <= capacity, "transfer {} larger than region {}", len, capacity);

    if transfer.is_empty() {
        return offset;
    }

    let first = len.min(capacity - offset);
    let second = len - first;

    match transfer {
        Transfer::Into(src) => {
            region[offset..offset + first].copy_from_slice(&src[..first]);
            region[..second].copy_from_slice(&src[first..]);
        }
        Transfer::OutOf(dst) => {
            dst[..first].copy_from_slice(&region[offset..offset + first]);
            dst[first..].copy_from_slice(&region[..second]);
        }
    }

    let end = offset + len;
    if end >= capacity {
        end - capacity
    } else {
        end
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contiguous_copy() {
        let mut region = [0u8; 8];
        let next = circular_copy(&mut region, 2, Transfer::Into(b"abc"));
        assert_eq!(next, 5);
        assert_eq!(&region[2..5], b"abc");

        let mut out = [0u8; 3];
        let next = circular_copy(&mut region, 2, Transfer::OutOf(&mut out));
        assert_eq!(next, 5);
        assert_eq!(&out, b"abc");
    }

    #[test]
    fn test_split_copy_wraps_to_begin() {
        let mut region = [0u8; 8];
        let next = circular_copy(&mut region, 6, Transfer::Into(b"wxyz"));
        assert_eq!(next, 2);
        assert_eq!(&region[6..], b"wx");
        assert_eq!(&region[..2], b"yz");

        let mut out = [0u8; 4];
        circular_copy(&mut region, 6, Transfer::OutOf(&mut out));
        assert_eq!(&out, b"wxyz");
    }

    #[test]
    fn test_landing_on_end_normalizes_to_zero() {
        let mut region = [0u8; 8];
        assert_eq!(circular_copy(&mut region, 5, Transfer::Into(b"abc")), 0);
    }

    #[test]
    fn test_empty_transfer_keeps_offset() {
        let mut region = [0u8; 8];
        assert_eq!(circular_copy(&mut region, 7, Transfer::Into(&[])), 7);
    }

    #[test]
    #[should_panic]
    fn test_offset_out_of_region_panics() {
        let mut region = [0u8; 8];
        circular_copy(&mut region, 8, Transfer::Into(b"a"));
    }
}
