//! msgring demo - satu writer thread dan satu reader thread
//!
//! Menukar N pesan dengan panjang acak lewat region kecil (heap atau mmap),
//! memverifikasi urutan dan isi setiap pesan, lalu mencetak statistik.
//!
//! Usage:
//!   cargo run --release -- [OPTIONS]
//!   RUST_LOG=debug cargo run -- --messages 1000

use std::error::Error;
use std::thread;
use std::time::{Duration, Instant};

use msgring::{MmapRegion, RingBuffer, RingError, StatsSnapshot, WaitPolicy, HEADER_SIZE};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

/// Demo configuration
struct DemoConfig {
    region_size: usize,
    messages: u64,
    max_len: usize,
    timeout_ms: u64,
    mmap_path: Option<String>,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            region_size: 4096,
            messages: 100_000,
            max_len: 512,
            timeout_ms: 1000,
            mmap_path: None,
        }
    }
}

/// Panjang pesan ke-`seq`, deterministik (LCG)
fn message_len(seq: u64, max_len: usize) -> usize {
    let hash = seq
        .wrapping_mul(6364136223846793005)
        .wrapping_add(1442695040888963407);
    ((hash >> 33) as usize) % (max_len + 1)
}

fn fill_message(buf: &mut Vec<u8>, seq: u64, len: usize) {
    buf.clear();
    buf.extend((0..len).map(|i| (seq as usize).wrapping_add(i) as u8));
}

fn run_demo<B>(rb: &RingBuffer<B>, config: &DemoConfig) -> DemoResult<Duration>
where
    B: AsMut<[u8]> + Send,
{
    let max_len = config.max_len.min(rb.max_message_len());
    let messages = config.messages;
    let start = Instant::now();

    thread::scope(|s| -> DemoResult<Duration> {
        let writer = s.spawn(move || -> Result<(), RingError> {
            let mut msg = Vec::with_capacity(max_len);
            for seq in 0..messages {
                fill_message(&mut msg, seq, message_len(seq, max_len));
                rb.write(&msg)?;
            }
            Ok(())
        });

        let mut out = vec![0u8; max_len];
        let mut expected = Vec::with_capacity(max_len);
        for seq in 0..messages {
            let len = rb.read(&mut out)?;
            fill_message(&mut expected, seq, message_len(seq, max_len));
            if out[..len] != expected[..] {
                return Err(format!("message {} corrupted ({} bytes)", seq, len).into());
            }
        }

        writer
            .join()
            .map_err(|_| "writer thread panicked")??;
        Ok(start.elapsed())
    })
}

fn print_stats(stats: &StatsSnapshot, elapsed: Duration) {
    let secs = elapsed.as_secs_f64();
    println!("\n📊 Ring Buffer Stats ({:.3}s)", secs);
    println!("   Messages written: {}", stats.messages_written);
    println!("   Messages read:    {}", stats.messages_read);
    println!("   Bytes:            {} KB", stats.bytes_read / 1024);
    println!("   Writer waits:     {}", stats.writer_waits);
    println!("   Reader waits:     {}", stats.reader_waits);
    println!("   Timeouts:         {}", stats.timeouts);
    println!(
        "   Throughput:       {:.2} M msgs/sec ({:.2} MB/sec)",
        stats.messages_read as f64 / secs / 1_000_000.0,
        stats.bytes_read as f64 / secs / 1_000_000.0
    );
}

type DemoResult<T> = Result<T, Box<dyn Error + Send + Sync>>;

fn run_on<B>(region: B, policy: WaitPolicy, config: &DemoConfig) -> DemoResult<(StatsSnapshot, Duration, B)>
where
    B: AsMut<[u8]> + Send,
{
    let rb = RingBuffer::with_policy(region, policy);
    info!(
        capacity = rb.capacity(),
        max_message_len = rb.max_message_len(),
        timeout_ms = rb.policy().timeout().as_millis() as u64,
        "ring buffer ready"
    );
    let elapsed = run_demo(&rb, config)?;
    let stats = rb.stats();
    rb.destroy()?;
    Ok((stats, elapsed, rb.into_inner()))
}

fn run(config: DemoConfig) -> DemoResult<()> {
    if config.region_size <= HEADER_SIZE {
        return Err(format!("region size must exceed the {}-byte header", HEADER_SIZE).into());
    }

    let policy = WaitPolicy::new(Duration::from_millis(config.timeout_ms));
    info!(
        region_size = config.region_size,
        timeout_ms = policy.timeout().as_millis() as u64,
        messages = config.messages,
        max_len = config.max_len,
        "starting demo"
    );

    let (stats, elapsed) = match &config.mmap_path {
        Some(path) => {
            let region = MmapRegion::create(path, config.region_size)?;
            let (stats, elapsed, region) = run_on(region, policy, &config)?;
            region.flush()?;
            (stats, elapsed)
        }
        None => {
            let (stats, elapsed, _) = run_on(vec![0u8; config.region_size], policy, &config)?;
            (stats, elapsed)
        }
    };

    print_stats(&stats, elapsed);
    Ok(())
}

fn parse_args() -> DemoConfig {
    let args: Vec<String> = std::env::args().collect();
    let mut config = DemoConfig::default();

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--region-size" | "-r" => {
                if i + 1 < args.len() {
                    config.region_size = args[i + 1].parse().unwrap_or(4096);
                    i += 1;
                }
            }
            "--messages" | "-n" => {
                if i + 1 < args.len() {
                    config.messages = args[i + 1].parse().unwrap_or(100_000);
                    i += 1;
                }
            }
            "--max-len" | "-l" => {
                if i + 1 < args.len() {
                    config.max_len = args[i + 1].parse().unwrap_or(512);
                    i += 1;
                }
            }
            "--timeout-ms" | "-t" => {
                if i + 1 < args.len() {
                    config.timeout_ms = args[i + 1].parse().unwrap_or(1000);
                    i += 1;
                }
            }
            "--mmap" | "-m" => {
                if i + 1 < args.len() {
                    config.mmap_path = Some(args[i + 1].clone());
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("msgring - Blocking Ring Buffer Demo\n");
                println!("Usage: msgring [OPTIONS]\n");
                println!("Options:");
                println!("  -r, --region-size <BYTES>  Region size (default: 4096)");
                println!("  -n, --messages <N>         Messages to exchange (default: 100000)");
                println!("  -l, --max-len <BYTES>      Max message length (default: 512)");
                println!("  -t, --timeout-ms <MS>      Blocking wait timeout (default: 1000)");
                println!("  -m, --mmap <PATH>          Back the region with a mapped file");
                println!("  -h, --help                 Show this help");
                std::process::exit(0);
            }
            _ => {}
        }
        i += 1;
    }

    config
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = parse_args();

    if let Err(e) = run(config) {
        error!(error = %e, "demo failed");
        std::process::exit(1);
    }
}
