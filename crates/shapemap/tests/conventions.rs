// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 shapemap contributors

#![allow(clippy::unwrap_used)] // test scaffolding

//! Convention strategy integration tests
//!
//! Identity copies, field matching by name, nested objects and sequences,
//! resolved through a default-configured handler.

mod common;

use common::{
    check_in, partner_guest, partner_stay, Guest, LoyaltyAccount, LoyaltyView, PartnerGuest,
    PartnerStay, PricedRate, RoomRate, SealedVoucher, Stay,
};
use shapemap::types::Decimal;
use shapemap::{EngineConfig, MapHandler, MappingError, Shape, Value};

// ============================================================================
// Identity
// ============================================================================

#[test]
fn test_identity_copy_is_independent() {
    let handler = MapHandler::new();
    let mut source = partner_stay();

    let copy: PartnerStay = handler.map(&source).unwrap();
    assert_eq!(copy, source);

    source.nights = 9;
    source.companions.clear();
    if let Some(guest) = source.guest.as_mut() {
        guest.full_name = "Mallory".into();
    }
    assert_eq!(copy.nights, 3);
    assert_eq!(copy.companions.len(), 2);
    assert_eq!(copy.guest.unwrap().full_name, "Alice");
}

#[test]
fn test_identity_dynamic_copy_is_independent() {
    let handler = MapHandler::new();
    let ty = PartnerStay::descriptor();
    let mut value = partner_stay().to_value();

    let copy = handler.map_dynamic(&value, &ty, &ty).unwrap();
    assert_eq!(copy, value);

    value.as_struct_mut().unwrap().set("nights", 1u32);
    assert_eq!(copy.get_field("nights"), Some(&Value::U32(3)));
}

#[test]
fn test_scalar_pass_through() {
    let handler = MapHandler::new();

    assert_eq!(handler.map::<i32, i32>(&42).unwrap(), 42);
    assert_eq!(handler.map::<String, String>(&"abc".into()).unwrap(), "abc");
    assert!(handler.map::<bool, bool>(&true).unwrap());

    let price = Decimal::new(12_950, 2);
    assert_eq!(handler.map::<Decimal, Decimal>(&price).unwrap(), price);

    let id = uuid::Uuid::new_v4();
    assert_eq!(handler.map::<uuid::Uuid, uuid::Uuid>(&id).unwrap(), id);

    let when = check_in();
    assert_eq!(
        handler
            .map::<chrono::DateTime<chrono::Utc>, chrono::DateTime<chrono::Utc>>(&when)
            .unwrap(),
        when
    );
}

#[test]
fn test_identity_skips_unconstructible_types() {
    let handler = MapHandler::new();
    let voucher = SealedVoucher {
        code: "V-1".into(),
    };

    let err = handler.map::<SealedVoucher, SealedVoucher>(&voucher).unwrap_err();
    assert!(
        matches!(err, MappingError::NotFound { strategies_evaluated: 4, .. }),
        "{err}"
    );
    assert!(err.to_string().contains("SealedVoucher"));
    assert!(handler.registry().is_empty());
}

#[test]
fn test_scalar_widening_is_not_a_convention() {
    let handler = MapHandler::new();
    let err = handler.map::<i32, i64>(&7).unwrap_err();
    assert!(err.is_not_found(), "{err}");
}

// ============================================================================
// Property matching
// ============================================================================

#[test]
fn test_field_attributes() {
    let handler = MapHandler::new();
    let account = LoyaltyAccount {
        member_id: "M-7".into(),
        pin: "1234".into(),
        points: 900,
        tier: "gold".into(),
    };

    let view: LoyaltyView = handler.map(&account).unwrap();
    assert_eq!(view.member_id, "M-7");
    // Write-only on the source side, so never read.
    assert_eq!(view.pin, "");
    // Read-only on the target side, so never assigned.
    assert_eq!(view.points, 0);
    // Renamed target field matched case-insensitively.
    assert_eq!(view.level, "gold");
}

#[test]
fn test_mismatched_field_is_skipped() {
    let handler = MapHandler::new();
    let rate = RoomRate {
        room: "deluxe".into(),
        nightly: 189.5,
    };

    let priced: PricedRate = handler.map(&rate).unwrap();
    assert_eq!(priced.room, "deluxe");
    assert_eq!(priced.nightly, "");
}

#[test]
fn test_strict_fields_reject_mismatch() {
    let config = EngineConfig::from_yaml_str("strict_fields: true\n").unwrap();
    let handler = MapHandler::builder().config(config).build().unwrap();

    let err = handler.map::<RoomRate, PricedRate>(&RoomRate::default()).unwrap_err();
    assert!(err.is_compilation(), "{err}");
    assert!(err.to_string().contains("nightly"));
    assert!(handler.registry().is_empty());

    // Compatible pairs are unaffected.
    let guest: Guest = handler.map(&partner_guest("G-1", "Alice")).unwrap();
    assert_eq!(guest.id, "G-1");
}

// ============================================================================
// Nested objects
// ============================================================================

#[test]
fn test_nested_objects_convert_recursively() {
    let handler = MapHandler::new();
    let stay: Stay = handler.map(&partner_stay()).unwrap();

    assert_eq!(stay.reservation_id, "GOO-1");
    assert_eq!(stay.nights, 3);
    assert_eq!(stay.check_in, check_in());

    let guest = stay.guest.unwrap();
    assert_eq!(guest.id, "G-1");
    assert_eq!(guest.full_name, "Alice");
    assert_eq!(guest.email.as_deref(), Some("alice@example.com"));

    let names: Vec<_> = stay.companions.iter().map(|g| g.full_name.as_str()).collect();
    assert_eq!(names, ["Bob", "Carol"]);

    assert!(handler
        .registry()
        .is_registered(&PartnerGuest::descriptor(), &Guest::descriptor()));
}

#[test]
fn test_null_nested_field_skips_nested_conversion() {
    let handler = MapHandler::new();
    let source = PartnerStay {
        guest: None,
        companions: Vec::new(),
        ..partner_stay()
    };

    let stay: Stay = handler.map(&source).unwrap();
    assert!(stay.guest.is_none());
    assert!(stay.companions.is_empty());
    assert!(!handler
        .registry()
        .is_registered(&PartnerGuest::descriptor(), &Guest::descriptor()));
}

#[test]
fn test_null_optional_scalar_stays_absent() {
    let handler = MapHandler::new();
    let source = PartnerGuest {
        email: None,
        ..partner_guest("G-9", "Zed")
    };

    let guest: Guest = handler.map(&source).unwrap();
    assert_eq!(guest.email, None);
    assert_eq!(guest.full_name, "Zed");
}

// ============================================================================
// Sequences
// ============================================================================

#[test]
fn test_sequence_preserves_order() {
    let handler = MapHandler::new();
    let source: Vec<_> = (0..5)
        .map(|i| partner_guest(&format!("G-{i}"), &format!("Guest{i}")))
        .collect();

    let guests: Vec<Guest> = handler.map(&source).unwrap();
    let ids: Vec<_> = guests.iter().map(|g| g.id.as_str()).collect();
    assert_eq!(ids, ["G-0", "G-1", "G-2", "G-3", "G-4"]);
}

#[test]
fn test_empty_and_null_sequences() {
    let handler = MapHandler::new();
    let empty: Vec<Guest> = handler.map(&Vec::<PartnerGuest>::new()).unwrap();
    assert!(empty.is_empty());

    let (src, tgt) = (
        Vec::<PartnerGuest>::descriptor(),
        Vec::<Guest>::descriptor(),
    );
    assert_eq!(handler.map_dynamic(&Value::Null, &src, &tgt).unwrap(), Value::Null);
}

#[test]
fn test_null_sequence_field_maps_to_null() {
    let handler = MapHandler::new();
    let mut value = partner_stay().to_value();
    value
        .as_struct_mut()
        .unwrap()
        .set("companions", Value::Null);

    let out = handler
        .map_dynamic(&value, &PartnerStay::descriptor(), &Stay::descriptor())
        .unwrap();
    assert_eq!(out.get_field("companions"), Some(&Value::Null));
    assert!(Stay::from_value(out).unwrap().companions.is_empty());
}

#[test]
fn test_failing_element_fails_sequence() {
    let handler = MapHandler::new();

    let none: Vec<SealedVoucher> = handler.map(&Vec::<PartnerGuest>::new()).unwrap();
    assert!(none.is_empty());

    let err = handler
        .map::<Vec<PartnerGuest>, Vec<SealedVoucher>>(&vec![partner_guest("G-1", "Alice")])
        .unwrap_err();
    assert!(matches!(err, MappingError::NotFound { .. }), "{err}");
}
