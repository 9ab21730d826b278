//! Shared test fixtures for E2E CLI tests.
#![allow(dead_code)] // Some fixtures reserved for future tests

use cardcraft::clock::FixedClock;
use cardcraft::models::{
    Card, CardElement, CardTemplate, ElementResponse, ElementType, NewResponse, NewSession,
    NewTemplate, Participant, Position, SessionStatus, WorkshopSession,
};
use cardcraft::store::{DataStore, FileBackend};
use std::path::Path;
use std::process::Command;
use tempfile::TempDir;

/// Path to the cardcraft binary (set by cargo at compile time)
pub fn cardcraft_bin() -> &'static str {
    env!("CARGO_BIN_EXE_cardcraft")
}

/// Runs the binary against a throwaway data directory.
pub fn run_in(data_dir: &Path, args: &[&str]) -> std::process::Output {
    Command::new(cardcraft_bin())
        .arg("--data-dir")
        .arg(data_dir)
        .args(args)
        .output()
        .expect("Failed to execute command")
}

/// Creates an empty data directory for one test.
pub fn temp_data_dir() -> TempDir {
    TempDir::new().expect("Failed to create temp dir")
}

/// Store handle over a test's data directory, with deterministic timestamps.
pub fn store_in(data_dir: &Path) -> DataStore<FileBackend, FixedClock> {
    let backend = FileBackend::new(data_dir).expect("Failed to open backend");
    DataStore::new(backend, FixedClock::at("2025-01-01T00:00:00Z"))
}

/// A card with one element of each major type, at deterministic positions.
pub fn test_card(name: &str) -> Card {
    let clock = FixedClock::at("2025-01-01T00:00:00Z");
    let mut card = Card::new(name, &clock);
    card.add_element(
        CardElement::with_defaults(ElementType::NameLabel, Position::new(20.0, 20.0)),
        &clock,
    );
    card.add_element(
        CardElement::with_defaults(ElementType::TextArea, Position::new(20.0, 80.0)),
        &clock,
    );
    card.add_element(
        CardElement::with_defaults(ElementType::QrCode, Position::new(280.0, 480.0)),
        &clock,
    );
    card
}

/// Seeds one template and returns it.
pub fn seed_template(data_dir: &Path, name: &str) -> CardTemplate {
    let mut store = store_in(data_dir);
    store
        .save_template(NewTemplate {
            name: name.to_string(),
            description: "E2E test template".to_string(),
            card: test_card(name),
            category: "test".to_string(),
            tags: vec!["e2e".to_string()],
            is_public: false,
        })
        .expect("Failed to seed template")
}

/// Seeds one session with no participants or responses and returns it.
pub fn seed_session(data_dir: &Path, name: &str) -> WorkshopSession {
    let mut store = store_in(data_dir);
    store
        .create_session(NewSession {
            name: name.to_string(),
            description: "E2E test session".to_string(),
            card_template: test_card(name),
            status: SessionStatus::Active,
        })
        .expect("Failed to seed session")
}

/// Seeds a session with participants and scanned responses and returns it
/// re-read from the store.
pub fn seed_session_with_responses(data_dir: &Path, name: &str) -> WorkshopSession {
    let session = seed_session(data_dir, name);
    let mut store = store_in(data_dir);

    let alice = seed_participant(&mut store, &session.id, "Alice");
    let bob = seed_participant(&mut store, &session.id, "Bob");

    for (participant, text, confidence) in [
        (&alice, "Great workshop, great pacing", Some(0.9)),
        (&bob, "Workshop ran long", Some(0.7)),
        (&alice, "More breaks please", None),
    ] {
        store
            .add_response(NewResponse {
                participant_id: participant.id.clone(),
                session_id: session.id.clone(),
                card_id: session.card_template.id.clone(),
                element_responses: vec![ElementResponse {
                    element_id: "el-1".to_string(),
                    element_type: "text-area".to_string(),
                    original_value: String::new(),
                    scanned_value: Some(text.to_string()),
                    processed_value: Some(text.to_string()),
                    confidence,
                }],
                processed_at: Some(
                    "2025-01-01T09:30:00Z"
                        .parse()
                        .expect("valid RFC 3339 timestamp"),
                ),
            })
            .expect("Failed to seed response")
            .expect("Seeded session should exist");
    }

    store
        .session(&session.id)
        .expect("Failed to re-read session")
        .expect("Seeded session should exist")
}

fn seed_participant(
    store: &mut DataStore<FileBackend, FixedClock>,
    session_id: &str,
    name: &str,
) -> Participant {
    store
        .add_participant(session_id, name, None)
        .expect("Failed to seed participant")
        .expect("Seeded session should exist")
}
