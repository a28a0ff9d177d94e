//! Core module: Blocking Ring Buffer di atas region milik caller
//!
//! Prinsip desain:
//! - Fixed region: tidak pernah resize, producer blocking atau gagal saat penuh
//! - Single lock: region + cursor dilindungi satu Mutex, dibangunkan satu Condvar
//! - Bounded wait: timeout dikembalikan ke caller sebagai error

mod cursor;
mod error;
mod mmap_region;
mod ring_buffer;
mod stats;
mod wait;

pub use error::RingError;
pub use mmap_region::MmapRegion;
pub use ring_buffer::RingBuffer;
pub use stats::StatsSnapshot;
pub use wait::{WaitPolicy, DEFAULT_WAIT_TIMEOUT};
