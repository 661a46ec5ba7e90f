// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 shapemap contributors

//! basic_mapping - the four call shapes, identity copies and the type guard.

use anyhow::Context;
use chrono::{TimeDelta, Utc};
use clap::Parser;
use shapemap::{Shape, Value};
use shapemap_samples_reservations::google::GoogleReservation;
use shapemap_samples_reservations::handler;
use shapemap_samples_reservations::models::Reservation;
use std::path::PathBuf;

/// Map a partner reservation through every call shape
#[derive(Parser, Debug)]
#[command(name = "basic_mapping")]
#[command(about = "Map a partner reservation through every call shape")]
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
    let google = GoogleReservation {
        reservation_code: "GOOGLE-BASIC-1".into(),
        primary_guest_name: "Basic Guest".into(),
        check_in_date: now + TimeDelta::days(2),
        check_out_date: now + TimeDelta::days(4),
        number_of_guests: 1,
    };
    let payload = google.to_value();
    let (src, tgt) = (GoogleReservation::descriptor(), Reservation::descriptor());

    let typed: Reservation = handler.map(&google)?;
    println!("Typed map:    {} / {}", typed.reservation_id, typed.guest_name);

    let erased: Reservation = handler.map_value::<GoogleReservation, Reservation>(&payload)?;
    println!("Erased map:   {} / {}", erased.reservation_id, erased.guest_name);

    let dynamic = Reservation::from_value(handler.map_dynamic(&payload, &src, &tgt)?)?;
    println!("Dynamic map:  {} / {}", dynamic.reservation_id, dynamic.guest_name);

    let by_name = handler.map_by_name(&payload, &src.qualified_name, &tgt.qualified_name)?;
    let by_name = Reservation::from_value(by_name)?;
    println!("By-name map:  {} / {}", by_name.reservation_id, by_name.guest_name);

    let parity = [&erased, &dynamic, &by_name].iter().all(|r| **r == typed);
    println!("Parity check (all call shapes): {parity}");

    let mut source = Reservation {
        reservation_id: "IDENTITY-1".into(),
        guest_name: "Deep Copy Guest".into(),
        check_in_date: now + TimeDelta::days(5),
        check_out_date: now + TimeDelta::days(6),
        guest_count: 2,
    };
    let copy: Reservation = handler.map(&source)?;
    source.guest_name = "Mutated After Map".into();
    println!("Identity copy unchanged: {}", copy.guest_name);

    let wrong = Reservation {
        reservation_id: "WRONG".into(),
        ..Reservation::default()
    };
    match handler.map_dynamic(&wrong.to_value(), &src, &tgt) {
        Err(err) if err.is_invalid_argument() => println!("Guardrail: {err}"),
        Err(err) => return Err(err).context("unexpected guard failure"),
        Ok(_) => anyhow::bail!("mismatched source type was accepted"),
    }

    let null = handler.map_dynamic(&Value::Null, &src, &tgt)?;
    println!("Null input maps to: {null:?}");
    Ok(())
}
