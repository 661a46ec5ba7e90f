// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 shapemap contributors

//! Hotel-side reservation schema.

use chrono::{DateTime, Utc};
use shapemap::Shape;

#[derive(Debug, Clone, Default, PartialEq, Shape)]
#[shape(name = "travel::Reservation")]
pub struct Reservation {
    pub reservation_id: String,
    pub guest_name: String,
    pub check_in_date: DateTime<Utc>,
    pub check_out_date: DateTime<Utc>,
    pub guest_count: i32,
}

#[derive(Debug, Clone, Default, PartialEq, Shape)]
#[shape(name = "travel::GuestProfile")]
pub struct GuestProfile {
    pub guest_id: String,
    pub full_name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Shape)]
#[shape(name = "travel::ReservationWithGuest")]
pub struct ReservationWithGuest {
    pub reservation_id: String,
    pub check_in_date: DateTime<Utc>,
    pub guest: Option<GuestProfile>,
}
