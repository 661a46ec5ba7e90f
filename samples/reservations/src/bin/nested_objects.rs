// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 shapemap contributors

//! nested_objects - nested profiles and batches of reservations.

use chrono::{TimeDelta, Utc};
use clap::Parser;
use shapemap_samples_reservations::google::{GoogleGuestProfile, GoogleReservationWithGuest};
use shapemap_samples_reservations::handler;
use shapemap_samples_reservations::models::ReservationWithGuest;
use std::path::PathBuf;

/// Map reservations carrying nested guest profiles
#[derive(Parser, Debug)]
#[command(name = "nested_objects")]
#[command(about = "Map reservations carrying nested guest profiles")]
struct Args {
    /// Engine config (YAML)
    #[arg(short, long)]
    config: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();
    let handler = handler(args.config.as_deref())?;
    let now = Utc::now();

    let single = GoogleReservationWithGuest {
        reservation_code: "GOOGLE-NESTED-1".into(),
        check_in_date: now + TimeDelta::days(1),
        guest: Some(GoogleGuestProfile {
            google_guest_id: "GG-100".into(),
            full_name: "Nested".into(),
        }),
    };
    let mapped: ReservationWithGuest = handler.map(&single)?;
    println!(
        "Reservation: {}, guest: {}",
        mapped.reservation_id,
        guest_name(&mapped)
    );

    let batch = vec![
        GoogleReservationWithGuest {
            reservation_code: "GOOGLE-NESTED-2".into(),
            check_in_date: now + TimeDelta::days(2),
            guest: Some(GoogleGuestProfile {
                google_guest_id: "GG-101".into(),
                full_name: "List-1".into(),
            }),
        },
        GoogleReservationWithGuest {
            reservation_code: "GOOGLE-NESTED-3".into(),
            check_in_date: now + TimeDelta::days(3),
            guest: None,
        },
    ];
    let mapped: Vec<ReservationWithGuest> = handler.map(&batch)?;
    println!("Batch mapped: {} reservations", mapped.len());
    for reservation in &mapped {
        println!("  {} -> {}", reservation.reservation_id, guest_name(reservation));
    }
    Ok(())
}

fn guest_name(reservation: &ReservationWithGuest) -> &str {
    reservation
        .guest
        .as_ref()
        .map_or("<none>", |g| g.full_name.as_str())
}
