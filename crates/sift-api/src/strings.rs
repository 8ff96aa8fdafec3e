//! Handlers for `/strings` endpoints.
//!
//! | Method   | Path | Notes |
//! |----------|------|-------|
//! | `POST`   | `/strings` | Body: `{"value":"..."}`; returns 201 + stored record |
//! | `GET`    | `/strings` | Optional `is_palindrome`, `min_length`, `max_length`, `word_count`, `contains_character` |
//! | `GET`    | `/strings/filter-by-natural-language` | `?query=` required |
//! | `GET`    | `/strings/{*value}` | 404 if not found |
//! | `DELETE` | `/strings/{*value}` | 204; 404 if not found |

use std::sync::Arc;

use axum::{
  Json,
  extract::{
    Path, Query, State,
    rejection::{JsonRejection, QueryRejection},
  },
  http::StatusCode,
  response::IntoResponse,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sift_core::{
  filter::{FilterParams, FilterSet},
  interpret::{Interpretation, interpret},
  record::{AnalyzedRecord, analyze},
  store::{InsertOutcome, StringStore},
};

use crate::error::ApiError;

// ─── Create ───────────────────────────────────────────────────────────────────

/// The `value` field of a create request, classified by JSON type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValueField {
  /// The body is not an object or has no `value` key.
  Missing,
  Text(String),
  /// `value` is present but is not a JSON string (including `null`).
  TypeMismatch,
}

impl ValueField {
  pub fn from_body(body: Value) -> Self {
    let Value::Object(mut map) = body else {
      return ValueField::Missing;
    };
    match map.remove("value") {
      None => ValueField::Missing,
      Some(Value::String(s)) => ValueField::Text(s),
      Some(_) => ValueField::TypeMismatch,
    }
  }
}

/// `POST /strings` — body: `{"value":"..."}`
pub async fn create<S>(
  State(store): State<Arc<S>>,
  body: Result<Json<Value>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError>
where
  S: StringStore,
{
  let Json(body) = body.map_err(|e| ApiError::BadRequest(e.body_text()))?;

  let value = match ValueField::from_body(body) {
    ValueField::Text(s) => s,
    ValueField::Missing => {
      return Err(ApiError::BadRequest(
        "missing 'value' field in request body".into(),
      ));
    }
    ValueField::TypeMismatch => {
      return Err(ApiError::Unprocessable(
        "invalid data type for 'value': must be a string".into(),
      ));
    }
  };

  match store.insert(analyze(&value)).await.map_err(ApiError::store)? {
    InsertOutcome::Created(record) => {
      tracing::info!(id = %record.id, "created string record");
      Ok((StatusCode::CREATED, Json(record)))
    }
    InsertOutcome::Duplicate => {
      tracing::debug!(?value, "rejected duplicate string");
      Err(ApiError::Conflict("string already exists in the system".into()))
    }
  }
}

// ─── List ─────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct ListResponse {
  pub data:            Vec<AnalyzedRecord>,
  pub count:           usize,
  pub filters_applied: FilterSet,
}

/// `GET /strings[?is_palindrome=..][&min_length=..][&max_length=..][&word_count=..][&contains_character=..]`
pub async fn list<S>(
  State(store): State<Arc<S>>,
  params: Result<Query<FilterParams>, QueryRejection>,
) -> Result<Json<ListResponse>, ApiError>
where
  S: StringStore,
{
  let Query(params) = params.map_err(|e| ApiError::BadRequest(e.body_text()))?;
  let filters = FilterSet::from_params(&params)?;

  let data = store.query(&filters).await.map_err(ApiError::store)?;
  Ok(Json(ListResponse {
    count: data.len(),
    data,
    filters_applied: filters,
  }))
}

// ─── Natural language ─────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct NaturalLanguageParams {
  pub query: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct NaturalLanguageResponse {
  pub data:              Vec<AnalyzedRecord>,
  pub count:             usize,
  pub interpreted_query: Interpretation,
}

/// `GET /strings/filter-by-natural-language?query=...`
pub async fn natural_language<S>(
  State(store): State<Arc<S>>,
  params: Result<Query<NaturalLanguageParams>, QueryRejection>,
) -> Result<Json<NaturalLanguageResponse>, ApiError>
where
  S: StringStore,
{
  let Query(params) = params.map_err(|e| ApiError::BadRequest(e.body_text()))?;
  let query = params
    .query
    .filter(|q| !q.is_empty())
    .ok_or_else(|| ApiError::BadRequest("missing 'query' parameter".into()))?;

  let interpreted = interpret(&query)?;
  tracing::debug!(
    query = %interpreted.original,
    filters = ?interpreted.parsed_filters,
    "interpreted natural language query"
  );

  let data = store
    .query(&interpreted.parsed_filters)
    .await
    .map_err(ApiError::store)?;
  Ok(Json(NaturalLanguageResponse {
    count: data.len(),
    data,
    interpreted_query: interpreted,
  }))
}

// ─── Get one ──────────────────────────────────────────────────────────────────

/// `GET /strings/{*value}`
pub async fn get_one<S>(
  State(store): State<Arc<S>>,
  Path(value): Path<String>,
) -> Result<Json<AnalyzedRecord>, ApiError>
where
  S: StringStore,
{
  let record = store
    .get_by_value(&value)
    .await
    .map_err(ApiError::store)?
    .ok_or_else(not_found)?;
  Ok(Json(record))
}

// ─── Delete one ───────────────────────────────────────────────────────────────

/// `DELETE /strings/{*value}` — 204 with an empty body.
pub async fn delete_one<S>(
  State(store): State<Arc<S>>,
  Path(value): Path<String>,
) -> Result<StatusCode, ApiError>
where
  S: StringStore,
{
  if !store.delete_by_value(&value).await.map_err(ApiError::store)? {
    return Err(not_found());
  }
  tracing::info!(?value, "deleted string record");
  Ok(StatusCode::NO_CONTENT)
}

fn not_found() -> ApiError {
  ApiError::NotFound("string does not exist in the system".into())
}
