//! msgring - Bounded blocking ring buffer untuk pesan variable-length
//!
//! Arsitektur:
//! - Caller-owned region: `&mut [u8]`, `Vec<u8>`, atau mmap
//! - Length-prefixed framing yang boleh wrap di akhir region
//! - Mutex + Condvar dengan bounded wait, timeout sebagai error
//!
//! ```
//! use msgring::RingBuffer;
//!
//! let rb = RingBuffer::new(vec![0u8; 256]);
//! rb.write(b"hello").unwrap();
//!
//! let mut out = [0u8; 64];
//! let len = rb.read(&mut out).unwrap();
//! assert_eq!(&out[..len], b"hello");
//! ```

pub mod core;
pub mod protocol;

pub use crate::core::{MmapRegion, RingBuffer, RingError, StatsSnapshot, WaitPolicy};
pub use crate::protocol::HEADER_SIZE;
