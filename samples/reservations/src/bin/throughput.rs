// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 shapemap contributors

//! throughput - single-threaded and concurrent mapping load.

use clap::{Parser, Subcommand};
use shapemap::MapHandler;
use shapemap_samples_reservations::google::GoogleReservation;
use shapemap_samples_reservations::handler;
use shapemap_samples_reservations::models::Reservation;
use std::path::PathBuf;
use std::time::{Duration, Instant};

/// Mapping throughput runner
#[derive(Parser, Debug)]
#[command(name = "throughput")]
#[command(about = "Measure warm mapping throughput")]
struct Args {
    #[command(subcommand)]
    mode: Mode,

    /// Engine config (YAML)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
enum Mode {
    /// Tight loop on one thread
    Sequential {
        /// Number of conversions
        #[arg(short = 'n', long, default_value = "200000")]
        iterations: usize,
    },

    /// Many threads sharing one handler
    Concurrent {
        /// Worker threads
        #[arg(short, long, default_value = "8")]
        threads: usize,

        /// Conversions per thread
        #[arg(short = 'n', long, default_value = "10000")]
        iterations: usize,
    },
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();
    let handler = handler(args.config.as_deref())?;

    let source = GoogleReservation {
        reservation_code: "GOOGLE-PERF-1".into(),
        primary_guest_name: "Performance Guest".into(),
        number_of_guests: 2,
        ..GoogleReservation::default()
    };
    // Warm-up: first resolution compiles and registers the mapper.
    let _: Reservation = handler.map(&source)?;

    match args.mode {
        Mode::Sequential { iterations } => {
            let start = Instant::now();
            for _ in 0..iterations {
                let _: Reservation = handler.map(&source)?;
            }
            report(iterations, start.elapsed());
        }
        Mode::Concurrent {
            threads,
            iterations,
        } => {
            let start = Instant::now();
            run_concurrent(&handler, &source, threads, iterations)?;
            report(threads * iterations, start.elapsed());
            println!("Registered mappers: {}", handler.registry().len());
        }
    }
    Ok(())
}

fn run_concurrent(
    handler: &MapHandler,
    source: &GoogleReservation,
    threads: usize,
    iterations: usize,
) -> anyhow::Result<()> {
    crossbeam::scope(|s| {
        let workers: Vec<_> = (0..threads)
            .map(|_| {
                s.spawn(move |_| -> shapemap::Result<()> {
                    for _ in 0..iterations {
                        let _: Reservation = handler.map(source)?;
                    }
                    Ok(())
                })
            })
            .collect();
        workers
            .into_iter()
            .map(|w| {
                w.join()
                    .map_err(|_| anyhow::anyhow!("worker panicked"))?
                    .map_err(anyhow::Error::from)
            })
            .collect::<anyhow::Result<()>>()
    })
    .map_err(|_| anyhow::anyhow!("worker scope panicked"))?
}

fn report(count: usize, elapsed: Duration) {
    println!("Conversions: {count}");
    println!("Elapsed: {}ms", elapsed.as_millis());
    let secs = elapsed.as_secs_f64();
    if secs > 0.0 {
        println!("Throughput: {:.0} maps/sec", count as f64 / secs);
    }
}
