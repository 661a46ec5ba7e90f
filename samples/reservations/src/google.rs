// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 shapemap contributors

//! Google partner schema and its explicit conversions.
//!
//! Partner field names do not line up with the hotel schema, so both pairs
//! get hand-written mappers. They are registered scoped: every conversion
//! builds a fresh mapper instance.

use crate::models::{GuestProfile, Reservation, ReservationWithGuest};
use chrono::{DateTime, Utc};
use shapemap::{MappingContext, OverrideRegistry, Result, Shape, TypeMapper};

#[derive(Debug, Clone, Default, PartialEq, Shape)]
#[shape(name = "partners::google::GoogleReservation")]
pub struct GoogleReservation {
    pub reservation_code: String,
    pub primary_guest_name: String,
    pub check_in_date: DateTime<Utc>,
    pub check_out_date: DateTime<Utc>,
    pub number_of_guests: i32,
}

#[derive(Debug, Clone, Default, PartialEq, Shape)]
#[shape(name = "partners::google::GoogleGuestProfile")]
pub struct GoogleGuestProfile {
    pub google_guest_id: String,
    pub full_name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Shape)]
#[shape(name = "partners::google::GoogleReservationWithGuest")]
pub struct GoogleReservationWithGuest {
    pub reservation_code: String,
    pub check_in_date: DateTime<Utc>,
    pub guest: Option<GoogleGuestProfile>,
}

/// Google reservation to hotel reservation; guest names are upper-cased.
#[derive(Debug, Default)]
pub struct ReservationMapper;

impl TypeMapper<GoogleReservation, Reservation> for ReservationMapper {
    fn map(&self, _ctx: &MappingContext<'_>, source: GoogleReservation) -> Result<Reservation> {
        Ok(Reservation {
            reservation_id: source.reservation_code,
            guest_name: source.primary_guest_name.to_uppercase(),
            check_in_date: source.check_in_date,
            check_out_date: source.check_out_date,
            guest_count: source.number_of_guests,
        })
    }
}

#[derive(Debug, Default)]
pub struct ReservationWithGuestMapper;

impl TypeMapper<GoogleReservationWithGuest, ReservationWithGuest> for ReservationWithGuestMapper {
    fn map(
        &self,
        _ctx: &MappingContext<'_>,
        source: GoogleReservationWithGuest,
    ) -> Result<ReservationWithGuest> {
        Ok(ReservationWithGuest {
            reservation_id: source.reservation_code,
            check_in_date: source.check_in_date,
            guest: source.guest.map(|guest| GuestProfile {
                guest_id: guest.google_guest_id,
                full_name: guest.full_name,
            }),
        })
    }
}

/// Register the partner mappers.
pub fn register(overrides: &OverrideRegistry) {
    overrides
        .register_scoped::<GoogleReservation, Reservation, _, _>(ReservationMapper::default)
        .register_scoped::<GoogleReservationWithGuest, ReservationWithGuest, _, _>(
            ReservationWithGuestMapper::default,
        );
}

#[cfg(test)]
#[allow(clippy::unwrap_used)] // test scaffolding
mod tests {
    use super::*;
    use shapemap::{MapHandler, OverrideProvider};
    use std::sync::Arc;

    fn handler() -> MapHandler {
        let overrides = Arc::new(OverrideRegistry::new());
        register(&overrides);
        MapHandler::builder()
            .overrides(overrides as Arc<dyn OverrideProvider>)
            .build()
            .unwrap()
    }

    #[test]
    fn test_reservation_mapper() {
        let source = GoogleReservation {
            reservation_code: "GOOGLE-1".into(),
            primary_guest_name: "Ana Lima".into(),
            number_of_guests: 2,
            ..GoogleReservation::default()
        };

        let mapped: Reservation = handler().map(&source).unwrap();
        assert_eq!(mapped.reservation_id, "GOOGLE-1");
        assert_eq!(mapped.guest_name, "ANA LIMA");
        assert_eq!(mapped.guest_count, 2);
    }

    #[test]
    fn test_missing_guest_stays_absent() {
        let handler = handler();
        let batch = vec![
            GoogleReservationWithGuest {
                reservation_code: "GOOGLE-2".into(),
                guest: Some(GoogleGuestProfile {
                    google_guest_id: "GG-101".into(),
                    full_name: "List-1".into(),
                }),
                ..GoogleReservationWithGuest::default()
            },
            GoogleReservationWithGuest {
                reservation_code: "GOOGLE-3".into(),
                ..GoogleReservationWithGuest::default()
            },
        ];

        let mapped: Vec<ReservationWithGuest> = handler.map(&batch).unwrap();
        assert_eq!(mapped.len(), 2);
        assert_eq!(mapped[0].guest.as_ref().unwrap().guest_id, "GG-101");
        assert!(mapped[1].guest.is_none());
    }
}
