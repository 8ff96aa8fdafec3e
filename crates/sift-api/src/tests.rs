//! Router tests against an in-memory `SqliteStore`.

use std::sync::Arc;

use axum::{
  body::Body,
  http::{Request, StatusCode, header},
};
use serde_json::{Value, json};
use sift_store_sqlite::SqliteStore;
use tower::ServiceExt as _;

use crate::{api_router, strings::ValueField};

async fn store() -> Arc<SqliteStore> {
  Arc::new(SqliteStore::open_in_memory().await.unwrap())
}

async fn send(
  store:  &Arc<SqliteStore>,
  method: &str,
  uri:    &str,
  body:   Option<&str>,
) -> (StatusCode, Value) {
  let mut builder = Request::builder().method(method).uri(uri);
  if body.is_some() {
    builder = builder.header(header::CONTENT_TYPE, "application/json");
  }
  let req = builder
    .body(Body::from(body.unwrap_or_default().to_string()))
    .unwrap();

  let resp = api_router(store.clone()).oneshot(req).await.unwrap();
  let status = resp.status();
  let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
    .await
    .unwrap();
  let json = if bytes.is_empty() {
    Value::Null
  } else {
    serde_json::from_slice(&bytes).unwrap()
  };
  (status, json)
}

async fn create(store: &Arc<SqliteStore>, value: &str) -> Value {
  let body = json!({ "value": value }).to_string();
  let (status, json) = send(store, "POST", "/strings", Some(&body)).await;
  assert_eq!(status, StatusCode::CREATED, "{json}");
  json
}

fn sorted_values(json: &Value) -> Vec<String> {
  let mut v: Vec<String> = json["data"]
    .as_array()
    .unwrap()
    .iter()
    .map(|r| r["value"].as_str().unwrap().to_owned())
    .collect();
  v.sort();
  v
}

// ── Body decoding ─────────────────────────────────────────────────────────────

#[test]
fn value_field_classification() {
  assert_eq!(
    ValueField::from_body(json!({ "value": "x" })),
    ValueField::Text("x".into())
  );
  assert_eq!(ValueField::from_body(json!({})), ValueField::Missing);
  assert_eq!(ValueField::from_body(json!(["value"])), ValueField::Missing);
  assert_eq!(
    ValueField::from_body(json!({ "value": 12345 })),
    ValueField::TypeMismatch
  );
  assert_eq!(
    ValueField::from_body(json!({ "value": null })),
    ValueField::TypeMismatch
  );
}

// ── Create ────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn create_returns_full_record() {
  let s = store().await;
  let json = create(&s, "racecar").await;

  assert_eq!(json["value"], "racecar");
  assert_eq!(json["id"], json["properties"]["sha256_hash"]);
  assert_eq!(json["properties"]["length"], 7);
  assert_eq!(json["properties"]["is_palindrome"], true);
  assert_eq!(json["properties"]["unique_characters"], 4);
  assert_eq!(json["properties"]["word_count"], 1);
  assert_eq!(json["properties"]["character_frequency_map"]["r"], 2);
  assert!(json["created_at"].is_string());
}

#[tokio::test]
async fn create_duplicate_conflicts() {
  let s = store().await;
  create(&s, "racecar").await;

  let body = json!({ "value": "racecar" }).to_string();
  let (status, json) = send(&s, "POST", "/strings", Some(&body)).await;
  assert_eq!(status, StatusCode::CONFLICT);
  assert!(json["error"].is_string());
}

#[tokio::test]
async fn create_missing_value_is_bad_request() {
  let s = store().await;
  let (status, json) = send(&s, "POST", "/strings", Some("{}")).await;
  assert_eq!(status, StatusCode::BAD_REQUEST);
  assert!(json["error"].as_str().unwrap().contains("missing"));
}

#[tokio::test]
async fn create_non_string_is_unprocessable() {
  let s = store().await;
  for body in [r#"{"value":12345}"#, r#"{"value":null}"#, r#"{"value":["a"]}"#] {
    let (status, json) = send(&s, "POST", "/strings", Some(body)).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY, "{body}");
    assert!(json["error"].is_string());
  }
}

#[tokio::test]
async fn create_malformed_json_is_bad_request() {
  let s = store().await;
  let (status, json) = send(&s, "POST", "/strings", Some("{not json")).await;
  assert_eq!(status, StatusCode::BAD_REQUEST);
  assert!(json["error"].is_string());
}

// ── Get / delete ──────────────────────────────────────────────────────────────

#[tokio::test]
async fn get_existing_and_missing() {
  let s = store().await;
  let created = create(&s, "hello world").await;

  let (status, json) = send(&s, "GET", "/strings/hello%20world", None).await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(json, created);

  let (status, json) = send(&s, "GET", "/strings/nonexistent", None).await;
  assert_eq!(status, StatusCode::NOT_FOUND);
  assert!(json["error"].is_string());
}

#[tokio::test]
async fn value_path_may_contain_slashes() {
  let s = store().await;
  create(&s, "and/or").await;

  let (status, json) = send(&s, "GET", "/strings/and/or", None).await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(json["value"], "and/or");
}

#[tokio::test]
async fn delete_then_missing() {
  let s = store().await;
  create(&s, "noon").await;

  let (status, json) = send(&s, "DELETE", "/strings/noon", None).await;
  assert_eq!(status, StatusCode::NO_CONTENT);
  assert_eq!(json, Value::Null);

  let (status, _) = send(&s, "DELETE", "/strings/noon", None).await;
  assert_eq!(status, StatusCode::NOT_FOUND);
  let (status, _) = send(&s, "GET", "/strings/noon", None).await;
  assert_eq!(status, StatusCode::NOT_FOUND);
}

// ── Structured filtering ──────────────────────────────────────────────────────

#[tokio::test]
async fn list_without_filters_returns_all_newest_first() {
  let s = store().await;
  for v in ["first", "second"] {
    create(&s, v).await;
  }

  let (status, json) = send(&s, "GET", "/strings", None).await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(json["count"], 2);
  assert_eq!(json["data"][0]["value"], "second");
  assert_eq!(json["filters_applied"], json!({}));
}

#[tokio::test]
async fn list_filters_palindromic_single_words() {
  let s = store().await;
  for v in ["madam", "hello", "noon"] {
    create(&s, v).await;
  }

  let (status, json) = send(
    &s,
    "GET",
    "/strings?is_palindrome=true&word_count=1",
    None,
  )
  .await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(json["count"], 2);
  assert_eq!(sorted_values(&json), ["madam", "noon"]);
  assert_eq!(
    json["filters_applied"],
    json!({ "is_palindrome": true, "word_count": 1 })
  );
}

#[tokio::test]
async fn list_rejects_malformed_parameters() {
  let s = store().await;
  for (uri, name) in [
    ("/strings?is_palindrome=maybe", "is_palindrome"),
    ("/strings?min_length=abc", "min_length"),
    ("/strings?max_length=1.5", "max_length"),
    ("/strings?word_count=", "word_count"),
    ("/strings?contains_character=ab", "contains_character"),
  ] {
    let (status, json) = send(&s, "GET", uri, None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
    assert!(json["error"].as_str().unwrap().contains(name), "{json}");
  }
}

// ── Natural language ──────────────────────────────────────────────────────────

#[tokio::test]
async fn natural_language_query_filters_and_echoes() {
  let s = store().await;
  for v in ["anna", "level", "abba", "hello"] {
    create(&s, v).await;
  }

  let (status, json) = send(
    &s,
    "GET",
    "/strings/filter-by-natural-language?query=palindromic%20strings%20that%20contain%20the%20first%20vowel",
    None,
  )
  .await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(sorted_values(&json), ["abba", "anna"]);
  assert_eq!(json["count"], 2);
  assert_eq!(
    json["interpreted_query"],
    json!({
      "original": "palindromic strings that contain the first vowel",
      "parsed_filters": { "is_palindrome": true, "contains_character": "a" },
    })
  );
}

#[tokio::test]
async fn natural_language_valid_query_may_match_nothing() {
  let s = store().await;
  create(&s, "tiny").await;

  let (status, json) = send(
    &s,
    "GET",
    "/strings/filter-by-natural-language?query=strings%20longer%20than%2010%20characters",
    None,
  )
  .await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(json["count"], 0);
  assert_eq!(json["interpreted_query"]["parsed_filters"], json!({ "min_length": 11 }));
}

#[tokio::test]
async fn natural_language_missing_or_unparseable_is_bad_request() {
  let s = store().await;
  for uri in [
    "/strings/filter-by-natural-language",
    "/strings/filter-by-natural-language?query=",
    "/strings/filter-by-natural-language?query=banana",
  ] {
    let (status, json) = send(&s, "GET", uri, None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
    assert!(json["error"].is_string());
  }
}
