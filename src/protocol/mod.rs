//! Protocol Layer: length-prefixed framing di atas region circular
//!
//! Prinsip desain:
//! - Flat: `[length header][payload]`, tanpa padding atau alignment
//! - Wrap-aware: header dan payload boleh terpotong di batas region
//! - No allocation: copy langsung dari/ke slice caller

mod circular;
mod frame;

pub use circular::{circular_copy, Transfer};
pub use frame::{decode_header, encode_header, frame_len, LengthHeader, HEADER_SIZE};
