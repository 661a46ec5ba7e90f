// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 shapemap contributors

//! Shared models for the integration suites.

#![allow(dead_code)]

use chrono::{DateTime, TimeZone, Utc};
use shapemap::Shape;

#[derive(Debug, Clone, Default, PartialEq, Shape)]
pub struct PartnerBooking {
    pub code: String,
    pub name: String,
    pub guests: i32,
}

#[derive(Debug, Clone, Default, PartialEq, Shape)]
pub struct Booking {
    pub id: String,
    pub name: String,
    pub guest_count: i32,
}

#[derive(Debug, Clone, Default, PartialEq, Shape)]
pub struct PartnerGuest {
    pub guest_id: String,
    pub full_name: String,
    pub email: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Shape)]
pub struct Guest {
    #[shape(rename = "GUEST_ID")]
    pub id: String,
    pub full_name: String,
    pub email: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Shape)]
pub struct PartnerStay {
    pub reservation_id: String,
    pub nights: u32,
    pub check_in: DateTime<Utc>,
    pub guest: Option<PartnerGuest>,
    pub companions: Vec<PartnerGuest>,
}

#[derive(Debug, Clone, Default, PartialEq, Shape)]
pub struct Stay {
    pub reservation_id: String,
    pub nights: u32,
    pub check_in: DateTime<Utc>,
    pub guest: Option<Guest>,
    pub companions: Vec<Guest>,
}

#[derive(Debug, Clone, Default, PartialEq, Shape)]
pub struct LoyaltyAccount {
    pub member_id: String,
    #[shape(write_only)]
    pub pin: String,
    pub points: u32,
    pub tier: String,
}

#[derive(Debug, Clone, Default, PartialEq, Shape)]
pub struct LoyaltyView {
    pub member_id: String,
    pub pin: String,
    #[shape(read_only)]
    pub points: u32,
    #[shape(rename = "Tier")]
    pub level: String,
}

#[derive(Debug, Clone, PartialEq, Shape)]
#[shape(no_default)]
pub struct SealedVoucher {
    pub code: String,
}

#[derive(Debug, Clone, Default, PartialEq, Shape)]
pub struct RoomRate {
    pub room: String,
    pub nightly: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Shape)]
pub struct PricedRate {
    pub room: String,
    pub nightly: String,
}

pub fn check_in() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 14, 15, 0, 0)
        .single()
        .unwrap_or_default()
}

pub fn partner_guest(id: &str, name: &str) -> PartnerGuest {
    PartnerGuest {
        guest_id: id.to_string(),
        full_name: name.to_string(),
        email: Some(format!("{}@example.com", name.to_lowercase())),
    }
}

pub fn partner_stay() -> PartnerStay {
    PartnerStay {
        reservation_id: "GOO-1".to_string(),
        nights: 3,
        check_in: check_in(),
        guest: Some(partner_guest("G-1", "Alice")),
        companions: vec![partner_guest("G-2", "Bob"), partner_guest("G-3", "Carol")],
    }
}
