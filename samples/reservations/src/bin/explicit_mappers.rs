// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 shapemap contributors

//! explicit_mappers - registered partner mappers beat conventions.

use clap::Parser;
use shapemap::MappingDiagnostics;
use shapemap_samples_reservations::google::GoogleReservation;
use shapemap_samples_reservations::handler;
use shapemap_samples_reservations::models::Reservation;
use std::path::PathBuf;

/// Show a hand-written partner mapper in action
#[derive(Parser, Debug)]
#[command(name = "explicit_mappers")]
#[command(about = "Show a hand-written partner mapper in action")]
struct Args {
    /// Engine config (YAML)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Guest name sent by the partner
    #[arg(short, long, default_value = "explicit")]
    guest: String,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();
    let handler = handler(args.config.as_deref())?;

    let google = GoogleReservation {
        reservation_code: "GOOGLE-EXPLICIT-1".into(),
        primary_guest_name: args.guest.clone(),
        number_of_guests: 2,
        ..GoogleReservation::default()
    };

    let mapped: Reservation = handler.map(&google)?;
    println!("{} -> {}", args.guest, mapped.guest_name);

    if let Some(diagnostics) = handler.diagnostics() {
        for record in diagnostics.list_registrations() {
            println!(
                "registered {} -> {} at {}",
                record.source_name, record.target_name, record.registered_at
            );
        }
    }
    Ok(())
}
