//! # Timering Demo
//!
//! Simulates a CPU load reading every few seconds for two simulated hours,
//! then checkpoints the store and reloads it.
//!
//! Run with: `cargo run --example simulate`

use anyhow::Result;
use chrono::{TimeDelta, Utc};

use timering::{Config, Recorder, SnapshotFile};

fn main() -> Result<()> {
    // Initialize logging so we can see what's happening
    timering::init_logging();

    println!("╔════════════════════════════════════════════════════════════╗");
    println!("║           Timering Demo                                    ║");
    println!("╠════════════════════════════════════════════════════════════╣");
    println!("║ Feeds two simulated hours of readings into a one hour      ║");
    println!("║ ring of one minute buckets, then checkpoints it.           ║");
    println!("╚════════════════════════════════════════════════════════════╝");
    println!();

    let snapshot_path = std::env::temp_dir().join("timering-demo").join("cpu.ring");
    let config = Config {
        resolution_secs: 60,
        capacity: 60,
        snapshot_path: Some(snapshot_path.clone()),
    };

    // Start from scratch each run
    let _ = std::fs::remove_file(&snapshot_path);

    let recorder = Recorder::with_config(config)?;

    println!("📈 Configuration:");
    println!("   Resolution: {}s", recorder.config().resolution_secs);
    println!("   Capacity: {} buckets", recorder.config().capacity);
    println!(
        "   Retention: {} minutes",
        recorder.config().retention().num_minutes()
    );
    println!(
        "   Estimated memory: {} bytes",
        recorder.config().estimated_memory_bytes()
    );
    println!();

    let start = Utc::now() - TimeDelta::hours(2);
    let step = TimeDelta::seconds(7);
    let total = 2 * 3600 / 7;

    for i in 0..total {
        let t = start + step * i;
        recorder.record_at(simulated_load(i), t)?;

        if i > 0 && i % 120 == 0 {
            println!(
                "   ⏱️  {} readings | Ring: {:.1}% full",
                i,
                recorder.store().fill_ratio() * 100.0
            );
        }
    }

    // One late reading to show rejection
    if let Err(e) = recorder.record_at(0.0, start) {
        println!("   ⚠️  Rejected: {}", e);
    }
    println!();

    recorder.checkpoint()?;
    let stats = recorder.stats();
    println!("📊 Stats:");
    println!("   Accepted: {}", stats.samples_accepted);
    println!("   Rejected: {}", stats.samples_rejected);
    println!("   Checkpoints: {}", stats.checkpoints_written);
    println!();

    let reloaded = SnapshotFile::new(&snapshot_path).load()?;
    println!("{}", reloaded);

    Ok(())
}

/// A slow sine wave with some jitter, roughly between 0 and 100
fn simulated_load(i: i32) -> f64 {
    let phase = i as f64 / 200.0;
    let jitter = ((i * 37) % 11) as f64 - 5.0;
    (50.0 + 40.0 * phase.sin() + jitter).clamp(0.0, 100.0)
}
