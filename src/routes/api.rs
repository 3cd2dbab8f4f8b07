// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Activity log API routes.

use crate::error::{AppError, Result};
use crate::models::{ActivityKind, ViewFrame};
use crate::time_utils::combine_local_date_time;
use crate::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{delete, get},
    Json, Router,
};
use chrono::{DateTime, FixedOffset, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;
use validator::Validate;

/// Firestore document IDs are at most 1500 bytes; ours are far shorter.
const MAX_ID_LEN: usize = 128;

/// Activity API routes.
pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/activities", get(get_activities).post(log_activity))
        .route("/api/activities/{id}", delete(delete_activity))
}

// ─── Log ─────────────────────────────────────────────────────

/// Body for logging an activity.
///
/// The quick buttons send only `type`. The manual-entry form also sends the
/// local `date` (`YYYY-MM-DD`) and `time` (`HH:MM`).
#[derive(Debug, Deserialize, Validate)]
pub struct LogActivityRequest {
    #[serde(rename = "type")]
    #[validate(length(min = 1, max = 32))]
    pub activity_type: String,
    pub date: Option<String>,
    pub time: Option<String>,
}

#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct LogActivityResponse {
    pub id: String,
}

/// Combine the optional form fields into a manual activity time.
fn parse_manual_time(
    date: Option<&str>,
    time: Option<&str>,
    tz: &FixedOffset,
) -> Result<Option<DateTime<Utc>>> {
    let date = date.map(str::trim).filter(|d| !d.is_empty());
    let time = time.map(str::trim).filter(|t| !t.is_empty());

    match (date, time) {
        (None, None) => Ok(None),
        (Some(date), Some(time)) => combine_local_date_time(date, time, tz)
            .map(Some)
            .ok_or_else(|| {
                AppError::BadRequest(
                    "Invalid 'date'/'time': expected YYYY-MM-DD and HH:MM".to_string(),
                )
            }),
        _ => Err(AppError::BadRequest(
            "'date' and 'time' must be given together".to_string(),
        )),
    }
}

/// Log an activity now or at a manually entered time.
async fn log_activity(
    State(state): State<Arc<AppState>>,
    Json(request): Json<LogActivityRequest>,
) -> Result<(StatusCode, Json<LogActivityResponse>)> {
    request
        .validate()
        .map_err(|e| AppError::BadRequest(format!("Invalid activity: {}", e)))?;

    let activity_type = request.activity_type.trim();
    if activity_type.is_empty() {
        return Err(AppError::BadRequest(
            "Activity type must not be blank".to_string(),
        ));
    }

    let manual_time = parse_manual_time(
        request.date.as_deref(),
        request.time.as_deref(),
        state.activity_log.display_offset(),
    )?;

    let id = state
        .activity_log
        .log_activity(ActivityKind::from(activity_type), manual_time)
        .await?;

    Ok((StatusCode::CREATED, Json(LogActivityResponse { id })))
}

// ─── List ────────────────────────────────────────────────────

/// Render the current log.
///
/// A failed query still answers with a frame (the error placeholder) so the
/// front end can show it in place of the list.
async fn get_activities(State(state): State<Arc<AppState>>) -> Response {
    match state.activity_log.render_now().await {
        Ok(log) => Json(ViewFrame::Rendered(log)).into_response(),
        Err(e) => {
            tracing::error!(error = %e, "Error loading activity log");
            (StatusCode::BAD_GATEWAY, Json(ViewFrame::load_error())).into_response()
        }
    }
}

// ─── Delete ──────────────────────────────────────────────────

async fn delete_activity(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<StatusCode> {
    if id.len() > MAX_ID_LEN || id.contains('/') {
        return Err(AppError::BadRequest("Invalid activity ID".to_string()));
    }

    state.activity_log.delete_activity(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn utc() -> FixedOffset {
        FixedOffset::east_opt(0).unwrap()
    }

    #[test]
    fn test_no_manual_time() {
        assert_eq!(parse_manual_time(None, None, &utc()).unwrap(), None);
        assert_eq!(parse_manual_time(Some(""), Some(" "), &utc()).unwrap(), None);
    }

    #[test]
    fn test_manual_time_combines_fields() {
        let parsed = parse_manual_time(Some("2026-10-17"), Some("22:00"), &utc())
            .unwrap()
            .unwrap();
        assert_eq!(parsed.to_rfc3339(), "2026-10-17T22:00:00+00:00");
    }

    #[test]
    fn test_manual_time_needs_both_fields() {
        let err = parse_manual_time(Some("2026-10-17"), None, &utc()).unwrap_err();
        assert!(matches!(err, AppError::BadRequest(_)));
    }

    #[test]
    fn test_manual_time_rejects_garbage() {
        let err = parse_manual_time(Some("17/10/2026"), Some("22:00"), &utc()).unwrap_err();
        assert!(matches!(err, AppError::BadRequest(_)));
    }
}
