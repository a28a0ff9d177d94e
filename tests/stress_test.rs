//! Stress Test - satu writer dan satu reader di region kecil
//!
//! Region sengaja kecil supaya writer dan reader berulang kali blocking
//! (penuh/kosong) dan frame sering wrap di akhir region.
//!
//! Usage:
//!   cargo test --release --test stress_test -- --nocapture

use std::sync::atomic::{AtomicU64, Ordering};
use std::thread;
use std::time::{Duration, Instant};

use msgring::{MmapRegion, RingBuffer, RingError, WaitPolicy, HEADER_SIZE};

/// Panjang pesan deterministik per sequence (LCG)
fn random_len(seed: u64, max_len: usize) -> usize {
    let mut hash = seed;
    for _ in 0..4 {
        hash = hash.wrapping_mul(6364136223846793005).wrapping_add(1);
    }
    ((hash >> 33) as usize) % (max_len + 1)
}

/// Payload yang bisa diverifikasi: sequence number di depan, lalu pola bytes
fn make_message(seq: u64, len: usize) -> Vec<u8> {
    let mut msg: Vec<u8> = (0..len).map(|i| (seq as usize ^ i) as u8).collect();
    let prefix = seq.to_le_bytes();
    let n = prefix.len().min(len);
    msg[..n].copy_from_slice(&prefix[..n]);
    msg
}

fn exchange<B>(rb: &RingBuffer<B>, messages: u64, max_len: usize)
where
    B: AsMut<[u8]> + Send,
{
    let received = AtomicU64::new(0);

    thread::scope(|s| {
        s.spawn(|| {
            for seq in 0..messages {
                let msg = make_message(seq, random_len(seq, max_len));
                rb.write(&msg).unwrap();
            }
        });

        s.spawn(|| {
            let mut out = vec![0u8; max_len];
            for seq in 0..messages {
                let len = rb.read(&mut out).unwrap();
                assert_eq!(len, random_len(seq, max_len), "length mismatch at {}", seq);
                assert_eq!(out[..len], make_message(seq, len)[..], "payload mismatch at {}", seq);
                received.fetch_add(1, Ordering::Relaxed);
            }
        });
    });

    assert_eq!(received.load(Ordering::Relaxed), messages);
    assert!(rb.is_empty());
}

#[test]
fn stress_small_region_delivers_everything_in_order() {
    let rb = RingBuffer::new(vec![0u8; 97]);
    let start = Instant::now();
    exchange(&rb, 20_000, 40);

    let stats = rb.stats();
    println!(
        "20000 msgs in {:?}: writer waits {}, reader waits {}",
        start.elapsed(),
        stats.writer_waits,
        stats.reader_waits
    );
    assert_eq!(stats.messages_written, 20_000);
    assert_eq!(stats.messages_read, 20_000);
    assert_eq!(stats.bytes_written, stats.bytes_read);
    assert_eq!(stats.timeouts, 0);
}

#[test]
fn stress_messages_near_capacity() {
    // Setiap pesan hampir memenuhi region: writer selalu menunggu reader
    let rb = RingBuffer::new(vec![0u8; 64]);
    let max_len = rb.max_message_len();
    exchange(&rb, 2_000, max_len);
}

#[test]
fn stress_over_mmap_region() {
    let region = MmapRegion::anonymous(257).unwrap();
    let rb = RingBuffer::new(region);
    exchange(&rb, 10_000, 100);
}

/// Frame (header + payload) yang perlu ditulis dan dibaca agar cursor
/// berada di `start` dari region berukuran `capacity`
fn filler_frames(start: usize, capacity: usize) -> Vec<usize> {
    match start {
        0 => vec![],
        s if s >= HEADER_SIZE => vec![s],
        // Terlalu dekat ke awal untuk satu frame: satu putaran penuh lewat dua frame
        s => vec![capacity / 2, s + capacity - capacity / 2],
    }
}

#[test]
fn every_start_offset_round_trips() {
    // Untuk setiap posisi cursor awal, header atau payload bisa terpotong
    const CAPACITY: usize = 40;
    for start in 0..CAPACITY {
        for len in [0usize, 1, 5, 13, CAPACITY - HEADER_SIZE - 1] {
            let rb = RingBuffer::new(vec![0u8; CAPACITY]);
            for frame in filler_frames(start, CAPACITY) {
                rb.write(&vec![0xEE; frame - HEADER_SIZE]).unwrap();
                rb.read_vec().unwrap();
            }

            let msg = make_message(start as u64 * 31 + len as u64, len);
            rb.write(&msg).unwrap();
            assert_eq!(rb.used(), HEADER_SIZE + len, "start {} len {}", start, len);
            assert_eq!(rb.read_vec().unwrap(), msg, "start {} len {}", start, len);
        }
    }
}

#[test]
fn backpressure_blocks_writer_until_reader_frees_space() {
    let rb = RingBuffer::new(vec![0u8; 128]);
    while rb.try_write(&[1u8; 20]).is_ok() {}
    assert_eq!(rb.try_write(&[2u8; 20]), Err(RingError::Full));

    let done = AtomicU64::new(0);
    thread::scope(|s| {
        s.spawn(|| {
            rb.write(&[2u8; 20]).unwrap();
            done.store(1, Ordering::Release);
        });

        thread::sleep(Duration::from_millis(50));
        assert_eq!(done.load(Ordering::Acquire), 0, "writer should still be blocked");
        assert_eq!(rb.read_vec().unwrap(), vec![1u8; 20]);
    });

    assert_eq!(done.load(Ordering::Acquire), 1);
    assert!(rb.stats().writer_waits >= 1);
}

#[test]
fn timeout_is_returned_not_fatal() {
    let rb = RingBuffer::with_policy(vec![0u8; 64], WaitPolicy::new(Duration::from_millis(30)));
    let handle_result = thread::scope(|s| s.spawn(|| rb.read_vec()).join());

    // Thread reader selesai normal dan menerima error bertipe
    assert_eq!(
        handle_result.unwrap(),
        Err(RingError::Timeout(Duration::from_millis(30)))
    );

    // Ring buffer tetap bisa dipakai
    rb.write(b"still alive").unwrap();
    assert_eq!(rb.read_vec().unwrap(), b"still alive");
}
