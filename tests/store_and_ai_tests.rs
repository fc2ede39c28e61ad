
use echo_journal::ai::{GeminiClient, GenerationRequest, TextGenerator};
use echo_journal::errors::{AIError, AppError, StoreError};
use echo_journal::ops;
use echo_journal::tarot::{load_deck, CardStore, Deck};
use mockito::Matcher;
use predicates::prelude::*;
use serde_json::json;
use serial_test::serial;
use std::time::Duration;
use tempfile::tempdir;
use test_helpers::base_echo_command;

const MODEL: &str = "test-model";
const GENERATE_PATH: &str = "/v1beta/models/test-model:generateContent";

fn completion(text: &str) -> String {
    json!({
        "candidates": [{
            "content": { "role": "model", "parts": [{ "text": text }] }
        }]
    })
    .to_string()
}

fn client(url: &str) -> GeminiClient {
    GeminiClient::new(url, MODEL, Some("test-key".to_string()), Duration::from_secs(5))
}

#[test]
fn test_gemini_generate_sends_key_and_instruction() {
    let mut server = mockito::Server::new();
    let mock = server
        .mock("POST", GENERATE_PATH)
        .match_header("x-goog-api-key", "test-key")
        .match_body(Matcher::PartialJson(json!({
            "contents": [{ "parts": [{ "text": "Hello" }] }],
            "systemInstruction": { "parts": [{ "text": "Be brief" }] }
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(completion("Hi there"))
        .create();

    let request = GenerationRequest::new("Hello").with_system_instruction("Be brief");
    let text = client(&server.url()).generate(&request).unwrap();

    assert_eq!(text, "Hi there");
    mock.assert();
}

#[test]
fn test_gemini_json_mode_sets_mime_type() {
    let mut server = mockito::Server::new();
    let mock = server
        .mock("POST", GENERATE_PATH)
        .match_body(Matcher::PartialJson(json!({
            "generationConfig": { "responseMimeType": "application/json" }
        })))
        .with_status(200)
        .with_body(completion(r#"{"overview":"Soft light.","guidance":"1. Walk."}"#))
        .create();

    let report = ops::generate_monthly_report(&client(&server.url()), &["hope".to_string()]);
    assert_eq!(report.overview, "Soft light.");
    assert_eq!(report.guidance, "1. Walk.");
    mock.assert();
}

#[test]
fn test_gemini_model_not_found() {
    let mut server = mockito::Server::new();
    server
        .mock("POST", GENERATE_PATH)
        .with_status(404)
        .with_body("not found")
        .create();

    let result = client(&server.url()).generate(&GenerationRequest::new("Hello"));
    match result {
        Err(AppError::AI(AIError::ModelNotFound(model))) => assert_eq!(model, MODEL),
        other => panic!("expected ModelNotFound, got {:?}", other),
    }
}

#[test]
fn test_gemini_server_error_and_empty_completion() {
    let mut server = mockito::Server::new();
    server
        .mock("POST", GENERATE_PATH)
        .with_status(500)
        .with_body("quota exceeded")
        .expect(1)
        .create();

    let result = client(&server.url()).generate(&GenerationRequest::new("Hello"));
    assert!(matches!(
        result,
        Err(AppError::AI(AIError::InvalidResponse(ref msg))) if msg.contains("quota exceeded")
    ));

    let mut empty_server = mockito::Server::new();
    empty_server
        .mock("POST", GENERATE_PATH)
        .with_status(200)
        .with_body(json!({ "candidates": [] }).to_string())
        .create();
    let result = client(&empty_server.url()).generate(&GenerationRequest::new("Hello"));
    assert!(matches!(result, Err(AppError::AI(AIError::InvalidResponse(_)))));
}

#[test]
fn test_configured_timeout_is_applied() {
    let mut server = mockito::Server::new();
    server
        .mock("POST", GENERATE_PATH)
        .with_status(200)
        .with_body_from_request(|_| {
            std::thread::sleep(Duration::from_secs(3));
            completion("too late").into_bytes()
        })
        .create();
    let slow_ai = GeminiClient::new(
        server.url(),
        MODEL,
        Some("test-key".to_string()),
        Duration::from_millis(500),
    );
    let result = slow_ai.generate(&GenerationRequest::new("Hello"));
    assert!(matches!(result, Err(AppError::AI(AIError::Unreachable(_)))));

    let mut store_server = mockito::Server::new();
    store_server
        .mock("GET", "/rest/v1/tarot_cards")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body_from_request(|_| {
            std::thread::sleep(Duration::from_secs(3));
            b"[]".to_vec()
        })
        .create();
    let slow_store = CardStore::new(store_server.url(), "anon-key", Duration::from_millis(500));
    assert!(matches!(
        slow_store.fetch_all_cards(),
        Err(AppError::Store(StoreError::Unreachable(_)))
    ));
}

#[test]
fn test_store_fetch_maps_rows() {
    let mut server = mockito::Server::new();
    let mock = server
        .mock("GET", "/rest/v1/tarot_cards")
        .match_query(Matcher::UrlEncoded("select".into(), "*".into()))
        .match_header("apikey", "anon-key")
        .match_header("authorization", "Bearer anon-key")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            json!([
                { "id": 7, "name": "The Chariot", "url": "https://img/7.jpg" },
                { "id": "c9", "name": "The Hermit", "keywords": ["solitude"], "meaning": "Rest" }
            ])
            .to_string(),
        )
        .create();

    let store = CardStore::new(server.url(), "anon-key", Duration::from_secs(5));
    let cards = store.fetch_all_cards().unwrap();

    assert_eq!(cards.len(), 2);
    assert_eq!(cards[0].id, "7");
    assert_eq!(cards[0].image_url, "https://img/7.jpg");
    assert_eq!(cards[1].keywords, vec!["solitude".to_string()]);
    mock.assert();

    let deck = load_deck(Some(&store));
    assert_eq!(deck.len(), 2);
    assert!(deck.find("7").is_some());
}

#[test]
fn test_store_failures_fall_back_to_builtin_deck() {
    let mut server = mockito::Server::new();
    server
        .mock("GET", "/rest/v1/tarot_cards")
        .match_query(Matcher::Any)
        .with_status(500)
        .create();
    let store = CardStore::new(server.url(), "anon-key", Duration::from_secs(5));
    assert!(matches!(
        store.fetch_all_cards(),
        Err(AppError::Store(StoreError::InvalidResponse(_)))
    ));
    assert_eq!(load_deck(Some(&store)), Deck::builtin());

    let mut empty_server = mockito::Server::new();
    empty_server
        .mock("GET", "/rest/v1/tarot_cards")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body("[]")
        .create();
    let empty_store = CardStore::new(empty_server.url(), "anon-key", Duration::from_secs(5));
    assert_eq!(load_deck(Some(&empty_store)), Deck::builtin());

    let mut garbled_server = mockito::Server::new();
    garbled_server
        .mock("GET", "/rest/v1/tarot_cards")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body("{\"not\": \"a list\"}")
        .create();
    let garbled_store = CardStore::new(garbled_server.url(), "anon-key", Duration::from_secs(5));
    assert_eq!(load_deck(Some(&garbled_store)), Deck::builtin());
}

#[test]
fn test_unreachable_store_falls_back() {
    let store = CardStore::new(test_helpers::UNREACHABLE_URL, "anon-key", Duration::from_secs(2));
    assert!(matches!(
        store.fetch_all_cards(),
        Err(AppError::Store(StoreError::Unreachable(_)))
    ));
    assert_eq!(load_deck(Some(&store)), Deck::builtin());
}

#[test]
#[serial]
fn test_cli_draw_uses_ai_reply() {
    let mut server = mockito::Server::new();
    let mock = server
        .mock("POST", GENERATE_PATH)
        .match_header("x-goog-api-key", "cli-key")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(completion("Which colour in the lantern draws you first?"))
        .create();

    let temp = tempdir().unwrap();
    base_echo_command(temp.path())
        .env("ECHO_GEMINI_URL", server.url())
        .env("ECHO_GEMINI_API_KEY", "cli-key")
        .env("ECHO_MODEL", MODEL)
        .args(["draw", "c9", "--date", "2024-03-10"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Which colour in the lantern draws you first?",
        ));
    mock.assert();
}

#[test]
#[serial]
fn test_cli_deck_from_store() {
    let mut server = mockito::Server::new();
    server
        .mock("GET", "/rest/v1/tarot_cards")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(json!([{ "id": 1, "name": "Store Card", "url": "https://img/1.jpg" }]).to_string())
        .create();

    let temp = tempdir().unwrap();
    base_echo_command(temp.path())
        .env("ECHO_STORE_URL", server.url())
        .env("ECHO_STORE_KEY", "anon-key")
        .arg("deck")
        .assert()
        .success()
        .stdout(predicate::str::contains("Store Card"))
        .stdout(predicate::str::contains("The Hermit").not());
}
