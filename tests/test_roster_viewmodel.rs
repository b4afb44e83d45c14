//! Unit tests for the roster view-model.
//!
//! Tests cover:
//! - Aadhar substring filtering over the cached snapshot
//! - Stale-but-available snapshots across failed fetches
//! - Single-card expand/collapse keyed by record id
//! - Idempotent card rendering

mod common;

use clearpass::ApiError;
use clearpass::models::Tier;
use clearpass::viewmodel::Roster;

use common::*;

#[test]
fn test_filter_matches_aadhar_substring() {
    // 1. Cache a snapshot of three applications
    let mut roster = Roster::new();
    roster.apply_fetch(Ok(vec![
        make_application("a1", "Asha", "123456789012"),
        make_application("a2", "Binod", "999912345678"),
        make_application("a3", "Chitra", "555555555555"),
    ]));

    // 2. A substring query returns exactly the matching subset, in order
    roster.set_query("1234".to_string());
    let visible: Vec<&str> = roster.visible().iter().map(|r| r.id.as_str()).collect();
    assert_eq!(visible, vec!["a1", "a2"]);

    // 3. An empty query returns everything
    roster.set_query(String::new());
    assert_eq!(roster.visible().len(), 3);

    // 4. A query matching nothing leaves the empty-state branch
    roster.set_query("000000".to_string());
    assert!(roster.is_empty());
}

#[test]
fn test_failed_fetch_keeps_previous_snapshot() {
    let mut roster = Roster::new();
    roster.apply_fetch(Ok(vec![make_application("a1", "Asha", "123456789012")]));
    assert_eq!(roster.records().len(), 1);

    // A failed poll must leave the stale snapshot visible
    roster.apply_fetch(Err(ApiError::Network));
    assert_eq!(roster.records().len(), 1);
    assert_eq!(
        roster.last_error(),
        Some("Network error. Please try again.")
    );

    // The next success clears the error and replaces the snapshot
    roster.apply_fetch(Ok(vec![
        make_application("a1", "Asha", "123456789012"),
        make_application("a2", "Binod", "999912345678"),
    ]));
    assert_eq!(roster.records().len(), 2);
    assert_eq!(roster.last_error(), None);
}

#[test]
fn test_first_fetch_must_succeed_before_cache_exists() {
    let mut roster: Roster<clearpass::models::ApplicationRecord> = Roster::new();
    assert!(!roster.has_cache());

    roster.apply_fetch(Err(ApiError::Server("Unauthorized".to_string())));
    assert!(!roster.has_cache());

    roster.apply_fetch(Ok(vec![]));
    assert!(roster.has_cache());
}

#[test]
fn test_toggle_expands_one_card_at_a_time() {
    let mut roster = Roster::new();
    roster.apply_fetch(Ok(vec![
        make_application("a1", "Asha", "123456789012"),
        make_application("a2", "Binod", "999912345678"),
    ]));

    roster.toggle("a1");
    assert!(roster.is_expanded("a1"));
    assert!(!roster.is_expanded("a2"));

    // Expanding another card collapses the first
    roster.toggle("a2");
    assert!(!roster.is_expanded("a1"));
    assert!(roster.is_expanded("a2"));

    // Toggling the open card collapses it
    roster.toggle("a2");
    assert_eq!(roster.expanded_id(), None);
}

#[test]
fn test_expansion_does_not_survive_record_removal() {
    let mut roster = Roster::new();
    roster.apply_fetch(Ok(vec![
        make_application("a1", "Asha", "123456789012"),
        make_application("a2", "Binod", "999912345678"),
    ]));
    roster.toggle("a1");

    // a1 disappears from the next snapshot; its expansion must not land
    // on whatever now sits at its old position
    roster.apply_fetch(Ok(vec![make_application("a2", "Binod", "999912345678")]));
    assert_eq!(roster.expanded_id(), None);

    // A refresh that still contains the expanded id keeps it expanded
    roster.toggle("a2");
    roster.apply_fetch(Ok(vec![
        make_application("a2", "Binod", "999912345678"),
        make_application("a3", "Chitra", "555555555555"),
    ]));
    assert!(roster.is_expanded("a2"));
}

#[test]
fn test_card_rendering_is_idempotent() {
    let record = make_application("a1", "Asha", "123456789012");
    assert_eq!(record.summary_card(), record.summary_card());
    assert_eq!(record.detail_fields(), record.detail_fields());

    let traveler = make_traveler("t1", "Binod", "999912345678", Tier::Two);
    assert_eq!(traveler.summary_card(), traveler.summary_card());
    assert_eq!(traveler.detail_fields(), traveler.detail_fields());
}

#[test]
fn test_aadhar_validation() {
    use clearpass::models::aadhar_valid;

    assert!(aadhar_valid("123456789012"));
    assert!(!aadhar_valid("12345678901"));
    assert!(!aadhar_valid("1234567890123"));
    assert!(!aadhar_valid("12345678901a"));
    assert!(!aadhar_valid(""));
}

#[test]
fn test_tier_conversions_and_penalties() {
    assert!(matches!(Tier::try_from(1), Ok(Tier::One)));
    assert!(matches!(Tier::try_from(3), Ok(Tier::Three)));
    assert!(Tier::try_from(0).is_err());
    assert!(Tier::try_from(4).is_err());

    assert_eq!(i64::from(Tier::Two), 2);
    assert_eq!(Tier::One.penalty_rupees(), 5_000);
    assert_eq!(Tier::Two.penalty_rupees(), 10_000);
    assert_eq!(Tier::Three.penalty_rupees(), 20_000);
}
