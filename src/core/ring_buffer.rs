//! Blocking Single-Writer Single-Reader Ring Buffer untuk pesan variable-length
//!
//! Setiap pesan disimpan sebagai `[length header][payload]` di region milik
//! caller. Header dan payload boleh wrap di akhir region.
//!
//! Sinkronisasi: satu Mutex melindungi region + cursor, satu Condvar
//! membangunkan writer yang menunggu space dan reader yang menunggu data.
//! Semua wait dibatasi `WaitPolicy`, timeout dikembalikan sebagai error,
//! thread caller tidak pernah dihentikan.

use parking_lot::{Condvar, Mutex, MutexGuard};
use tracing::{debug, info, trace, warn};

use super::cursor::Cursors;
use super::stats::{RingStats, StatsSnapshot};
use super::{RingError, WaitPolicy};
use crate::protocol::{circular_copy, decode_header, encode_header, frame_len, Transfer, HEADER_SIZE};

/// State yang dilindungi lock: region, cursor, dan flag destroy
struct State<B> {
    region: B,
    cursors: Cursors,
    destroyed: bool,
}

impl<B: AsMut<[u8]>> State<B> {
    /// Baca header di read cursor tanpa memajukan cursor.
    ///
    /// Returns `(payload_len, payload_offset)`.
    fn peek_frame(&mut self) -> Result<(usize, usize), RingError> {
        let mut header = [0u8; HEADER_SIZE];
        let payload_at = circular_copy(
            self.region.as_mut(),
            self.cursors.read(),
            Transfer::OutOf(&mut header),
        );
        let len = decode_header(header);

        let used = self.cursors.used();
        if frame_len(len) > used {
            warn!(len, used, read = self.cursors.read(), "corrupt frame header");
            return Err(RingError::CorruptFrame { len, used });
        }

        Ok((len, payload_at))
    }
}

/// Ring buffer pesan di atas region bytes milik caller
///
/// `B` adalah backing memory: `&mut [u8]`, `Vec<u8>`, `Box<[u8]>`, atau
/// [`MmapRegion`](super::MmapRegion). Region tidak pernah di-resize,
/// di-zero, atau di-free oleh ring buffer.
pub struct RingBuffer<B> {
    state: Mutex<State<B>>,
    signal: Condvar,
    // Immutable setelah init, aman dibaca tanpa lock
    capacity: usize,
    policy: WaitPolicy,
    stats: RingStats,
}

impl<B: AsMut<[u8]>> RingBuffer<B> {
    /// Membuat ring buffer di atas `region` dengan `WaitPolicy` default (1 detik).
    ///
    /// # Panics
    /// Panic jika region tidak cukup untuk satu header plus satu byte.
    pub fn new(region: B) -> Self {
        Self::with_policy(region, WaitPolicy::default())
    }

    /// Membuat ring buffer dengan timeout blocking tertentu.
    ///
    /// # Panics
    /// Panic jika region tidak cukup untuk satu header plus satu byte.
    pub fn with_policy(mut region: B, policy: WaitPolicy) -> Self {
        let capacity = region.as_mut().len();
        assert!(
            capacity > HEADER_SIZE,
            "region of {} bytes cannot hold a {}-byte header",
            capacity,
            HEADER_SIZE
        );

        info!(
            capacity,
            timeout_ms = policy.timeout().as_millis() as u64,
            "ring buffer initialized"
        );

        Self {
            state: Mutex::new(State {
                region,
                cursors: Cursors::new(capacity),
                destroyed: false,
            }),
            signal: Condvar::new(),
            capacity,
            policy,
            stats: RingStats::default(),
        }
    }

    /// Ukuran region dalam bytes
    #[inline(always)]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Payload terbesar yang bisa ditulis (region kosong, satu byte tersisa)
    #[inline(always)]
    pub fn max_message_len(&self) -> usize {
        self.capacity - HEADER_SIZE - 1
    }

    /// Kebijakan blocking yang dipakai `write` dan `read`
    pub fn policy(&self) -> WaitPolicy {
        self.policy
    }

    /// Bytes terpakai (header + payload semua pesan yang belum dibaca)
    pub fn used(&self) -> usize {
        self.state.lock().cursors.used()
    }

    pub fn free(&self) -> usize {
        self.state.lock().cursors.free()
    }

    pub fn is_empty(&self) -> bool {
        self.state.lock().cursors.is_empty()
    }

    pub fn is_destroyed(&self) -> bool {
        self.state.lock().destroyed
    }

    pub fn stats(&self) -> StatsSnapshot {
        self.stats.snapshot()
    }

    /// Tulis pesan tanpa blocking.
    ///
    /// Returns `Err(RingError::Full)` jika free space saat ini kurang.
    pub fn try_write(&self, message: &[u8]) -> Result<(), RingError> {
        self.check_fits(message.len())?;
        let state = self.lock()?;
        if !state.cursors.has_room(message.len()) {
            return Err(RingError::Full);
        }
        self.commit_write(state, message);
        Ok(())
    }

    /// Tulis pesan, blocking selama free space kurang.
    ///
    /// Returns `Err(RingError::Timeout)` jika space tidak tersedia dalam
    /// batas `WaitPolicy`; ring buffer tidak berubah dalam kasus itu.
    pub fn write(&self, message: &[u8]) -> Result<(), RingError> {
        let len = message.len();
        self.check_fits(len)?;

        let mut state = self.lock()?;
        if !state.cursors.has_room(len) {
            self.stats.record_writer_wait();
            debug!(len, free = state.cursors.free(), "writer waiting for space");
            self.wait(&mut state, |s| !s.destroyed && !s.cursors.has_room(len))?;
        }

        self.commit_write(state, message);
        Ok(())
    }

    /// Baca pesan tertua ke `out` tanpa blocking.
    ///
    /// Returns panjang pesan. Jika `out` terlalu kecil, tidak ada yang
    /// dikonsumsi dan `Err(RingError::OutputBufferTooSmall)` dikembalikan.
    pub fn try_read(&self, out: &mut [u8]) -> Result<usize, RingError> {
        let state = self.lock()?;
        if state.cursors.is_empty() {
            return Err(RingError::Empty);
        }
        self.commit_read(state, out)
    }

    /// Baca pesan tertua ke `out`, blocking selama buffer kosong.
    pub fn read(&self, out: &mut [u8]) -> Result<usize, RingError> {
        let mut state = self.lock()?;
        self.wait_for_data(&mut state)?;
        self.commit_read(state, out)
    }

    /// Seperti `try_read`, tapi mengalokasikan buffer seukuran pesan
    pub fn try_read_vec(&self) -> Result<Vec<u8>, RingError> {
        let state = self.lock()?;
        if state.cursors.is_empty() {
            return Err(RingError::Empty);
        }
        self.take_vec(state)
    }

    /// Seperti `read`, tapi mengalokasikan buffer seukuran pesan
    pub fn read_vec(&self) -> Result<Vec<u8>, RingError> {
        let mut state = self.lock()?;
        self.wait_for_data(&mut state)?;
        self.take_vec(state)
    }

    /// Panjang pesan tertua tanpa mengkonsumsinya, `None` jika kosong
    pub fn peek_len(&self) -> Result<Option<usize>, RingError> {
        let mut state = self.lock()?;
        if state.cursors.is_empty() {
            return Ok(None);
        }
        state.peek_frame().map(|(len, _)| Some(len))
    }

    /// Tutup ring buffer.
    ///
    /// Semua writer/reader yang sedang menunggu dibangunkan dan menerima
    /// `RingError::Destroyed`, begitu juga setiap operasi berikutnya.
    /// Isi region tidak disentuh; ambil kembali lewat `into_inner`.
    ///
    /// Query occupancy (`used`, `free`, `is_empty`, `stats`) tetap
    /// mengembalikan state terakhir setelah destroy, untuk diagnosis pesan
    /// yang tertinggal.
    pub fn destroy(&self) -> Result<(), RingError> {
        let mut state = self.lock()?;
        state.destroyed = true;
        info!(used = state.cursors.used(), "ring buffer destroyed");
        drop(state);
        self.signal.notify_all();
        Ok(())
    }

    /// Kembalikan backing region ke caller
    pub fn into_inner(self) -> B {
        self.state.into_inner().region
    }

    /// Feasibility check tanpa lock: capacity tidak pernah berubah
    #[inline(always)]
    fn check_fits(&self, len: usize) -> Result<(), RingError> {
        if frame_len(len) >= self.capacity {
            self.stats.record_too_large();
            debug!(len, capacity = self.capacity, "message can never fit");
            return Err(RingError::MessageTooLarge {
                len,
                max: self.max_message_len(),
            });
        }
        Ok(())
    }

    fn lock(&self) -> Result<MutexGuard<'_, State<B>>, RingError> {
        let state = self.state.lock();
        if state.destroyed {
            return Err(RingError::Destroyed);
        }
        Ok(state)
    }

    fn wait<F>(&self, state: &mut MutexGuard<'_, State<B>>, blocked: F) -> Result<(), RingError>
    where
        F: FnMut(&State<B>) -> bool,
    {
        if let Err(err) = self.policy.wait_while(&self.signal, state, blocked) {
            self.stats.record_timeout();
            warn!(
                timeout_ms = self.policy.timeout().as_millis() as u64,
                used = state.cursors.used(),
                "ring buffer wait timed out"
            );
            return Err(err);
        }
        if state.destroyed {
            return Err(RingError::Destroyed);
        }
        Ok(())
    }

    fn wait_for_data(&self, state: &mut MutexGuard<'_, State<B>>) -> Result<(), RingError> {
        if state.cursors.is_empty() {
            self.stats.record_reader_wait();
            debug!("reader waiting for data");
            self.wait(state, |s| !s.destroyed && s.cursors.is_empty())?;
        }
        Ok(())
    }

    /// Tulis header + payload lalu majukan write cursor. Caller sudah
    /// memvalidasi space di bawah lock yang sama.
    fn commit_write(&self, mut state: MutexGuard<'_, State<B>>, message: &[u8]) {
        let State {
            region, cursors, ..
        } = &mut *state;
        let region = region.as_mut();

        let header = encode_header(message.len());
        let payload_at = circular_copy(region, cursors.write(), Transfer::Into(&header));
        let next = circular_copy(region, payload_at, Transfer::Into(message));
        cursors.advance_write(next);
        trace!(len = message.len(), write = next, "frame written");

        drop(state);
        self.signal.notify_all();
        self.stats.record_write(message.len());
    }

    fn commit_read(&self, mut state: MutexGuard<'_, State<B>>, out: &mut [u8]) -> Result<usize, RingError> {
        let (len, payload_at) = state.peek_frame()?;
        if out.len() < len {
            return Err(RingError::OutputBufferTooSmall {
                required: len,
                available: out.len(),
            });
        }

        let State {
            region, cursors, ..
        } = &mut *state;
        let next = circular_copy(region.as_mut(), payload_at, Transfer::OutOf(&mut out[..len]));
        cursors.advance_read(next);
        trace!(len, read = next, "frame read");

        drop(state);
        self.signal.notify_all();
        self.stats.record_read(len);
        Ok(len)
    }

    fn take_vec(&self, mut state: MutexGuard<'_, State<B>>) -> Result<Vec<u8>, RingError> {
        let (len, _) = state.peek_frame()?;
        let mut out = vec![0u8; len];
        self.commit_read(state, &mut out)?;
        Ok(out)
    }
}

impl<B> std::fmt::Debug for RingBuffer<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RingBuffer")
            .field("capacity", &self.capacity)
            .field("policy", &self.policy)
            .finish_non_exhaustive()
    }
}
