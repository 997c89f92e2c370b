//! HTTP request handlers for the JustTip API.
//!
//! This module contains the handler functions for all API endpoints.

use std::time::Instant;

use axum::{
    Json, Router,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, PathRejection, QueryRejection},
    },
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde_json::json;
use tracing::{info, warn};
use uuid::Uuid;

use crate::error::EngineError;
use crate::models::{DailyTipPool, ShiftId};

use super::request::{ShiftRequest, StartDateQuery, WeekStartQuery};
use super::response::{ApiError, ApiErrorResponse};
use super::state::AppState;

type HandlerResult = Result<Response, ApiErrorResponse>;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/api/employees", get(list_employees_handler))
        .route("/api/roster", get(weekly_roster_handler))
        .route("/api/roster/shifts", post(create_shift_handler))
        .route(
            "/api/roster/shifts/:id",
            get(get_shift_handler)
                .put(update_shift_handler)
                .delete(delete_shift_handler),
        )
        .route(
            "/api/tips/daily",
            get(daily_tips_handler).post(save_tips_handler),
        )
        .route("/api/tips/payout", get(payout_handler))
        .with_state(state)
}

/// Handler for GET /health.
async fn health_handler() -> impl IntoResponse {
    Json(json!({ "status": "ok" }))
}

/// Handler for GET /api/employees.
async fn list_employees_handler(State(state): State<AppState>) -> HandlerResult {
    let correlation_id = Uuid::new_v4();
    let employees = state
        .roster()
        .list_employees()
        .await
        .map_err(|e| engine_failure(correlation_id, e))?;
    Ok(Json(employees).into_response())
}

/// Handler for GET /api/roster?startDate=YYYY-MM-DD.
async fn weekly_roster_handler(
    State(state): State<AppState>,
    query: Result<Query<StartDateQuery>, QueryRejection>,
) -> HandlerResult {
    let correlation_id = Uuid::new_v4();
    let Query(query) = query.map_err(|r| query_failure(correlation_id, r))?;
    info!(correlation_id = %correlation_id, start_date = %query.start_date, "Fetching weekly roster");

    let roster = state
        .roster()
        .get_weekly_roster(query.start_date)
        .await
        .map_err(|e| engine_failure(correlation_id, e))?;
    Ok(Json(roster).into_response())
}

/// Handler for GET /api/roster/shifts/{id}.
async fn get_shift_handler(
    State(state): State<AppState>,
    id: Result<Path<ShiftId>, PathRejection>,
) -> HandlerResult {
    let correlation_id = Uuid::new_v4();
    let Path(id) = id.map_err(|r| path_failure(correlation_id, r))?;

    let shift = state
        .roster()
        .get_shift(id)
        .await
        .map_err(|e| engine_failure(correlation_id, e))?;
    Ok(Json(shift).into_response())
}

/// Handler for POST /api/roster/shifts.
///
/// Returns 201 with the created shift.
async fn create_shift_handler(
    State(state): State<AppState>,
    payload: Result<Json<ShiftRequest>, JsonRejection>,
) -> HandlerResult {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing create shift request");

    let Json(request) = payload.map_err(|r| json_failure(correlation_id, r))?;
    let start = Instant::now();
    let shift = state
        .roster()
        .create_shift(request.into())
        .await
        .map_err(|e| engine_failure(correlation_id, e))?;

    info!(
        correlation_id = %correlation_id,
        shift_id = shift.id,
        duration_us = start.elapsed().as_micros(),
        "Shift created"
    );
    Ok((StatusCode::CREATED, Json(shift)).into_response())
}

/// Handler for PUT /api/roster/shifts/{id}.
async fn update_shift_handler(
    State(state): State<AppState>,
    id: Result<Path<ShiftId>, PathRejection>,
    payload: Result<Json<ShiftRequest>, JsonRejection>,
) -> HandlerResult {
    let correlation_id = Uuid::new_v4();
    let Path(id) = id.map_err(|r| path_failure(correlation_id, r))?;
    info!(correlation_id = %correlation_id, shift_id = id, "Processing update shift request");

    let Json(request) = payload.map_err(|r| json_failure(correlation_id, r))?;
    let shift = state
        .roster()
        .update_shift(id, request.into())
        .await
        .map_err(|e| engine_failure(correlation_id, e))?;
    Ok(Json(shift).into_response())
}

/// Handler for DELETE /api/roster/shifts/{id}.
///
/// Returns 204 on success.
async fn delete_shift_handler(
    State(state): State<AppState>,
    id: Result<Path<ShiftId>, PathRejection>,
) -> HandlerResult {
    let correlation_id = Uuid::new_v4();
    let Path(id) = id.map_err(|r| path_failure(correlation_id, r))?;
    info!(correlation_id = %correlation_id, shift_id = id, "Processing delete shift request");

    state
        .roster()
        .delete_shift(id)
        .await
        .map_err(|e| engine_failure(correlation_id, e))?;
    Ok(StatusCode::NO_CONTENT.into_response())
}

/// Handler for GET /api/tips/daily?weekStart=YYYY-MM-DD.
async fn daily_tips_handler(
    State(state): State<AppState>,
    query: Result<Query<WeekStartQuery>, QueryRejection>,
) -> HandlerResult {
    let correlation_id = Uuid::new_v4();
    let Query(query) = query.map_err(|r| query_failure(correlation_id, r))?;

    let pools = state
        .tips()
        .get_daily_tips(query.week_start)
        .await
        .map_err(|e| engine_failure(correlation_id, e))?;
    Ok(Json(pools).into_response())
}

/// Handler for POST /api/tips/daily.
///
/// Accepts an array of `{ date, amount }`. Returns 200 when every entry was
/// saved and 207 when some were rejected; both carry the save report.
async fn save_tips_handler(
    State(state): State<AppState>,
    payload: Result<Json<Vec<DailyTipPool>>, JsonRejection>,
) -> HandlerResult {
    let correlation_id = Uuid::new_v4();
    let Json(entries) = payload.map_err(|r| json_failure(correlation_id, r))?;
    info!(correlation_id = %correlation_id, entries = entries.len(), "Processing save tips request");

    let report = state.tips().save_daily_tips(entries).await;
    let status = if report.is_complete() {
        StatusCode::OK
    } else {
        warn!(
            correlation_id = %correlation_id,
            failed = report.failed.len(),
            "Some tip pools were rejected"
        );
        StatusCode::MULTI_STATUS
    };
    Ok((status, Json(report)).into_response())
}

/// Handler for GET /api/tips/payout?weekStart=YYYY-MM-DD.
async fn payout_handler(
    State(state): State<AppState>,
    query: Result<Query<WeekStartQuery>, QueryRejection>,
) -> HandlerResult {
    let correlation_id = Uuid::new_v4();
    let Query(query) = query.map_err(|r| query_failure(correlation_id, r))?;
    info!(correlation_id = %correlation_id, week_start = %query.week_start, "Processing payout request");

    let start = Instant::now();
    let payout = state
        .tips()
        .calculate_weekly_payout(query.week_start)
        .await
        .map_err(|e| engine_failure(correlation_id, e))?;

    info!(
        correlation_id = %correlation_id,
        total_tips = %payout.total_weekly_tips,
        duration_us = start.elapsed().as_micros(),
        "Payout calculated"
    );
    Ok(Json(payout).into_response())
}

fn engine_failure(correlation_id: Uuid, err: EngineError) -> ApiErrorResponse {
    warn!(correlation_id = %correlation_id, error = %err, "Request failed");
    err.into()
}

fn json_failure(correlation_id: Uuid, rejection: JsonRejection) -> ApiErrorResponse {
    let error = match rejection {
        JsonRejection::JsonDataError(err) => {
            let body_text = err.body_text();
            warn!(
                correlation_id = %correlation_id,
                error = %body_text,
                "JSON data error"
            );
            if body_text.contains("missing field") {
                ApiError::validation_error(body_text)
            } else {
                ApiError::malformed_json(body_text)
            }
        }
        JsonRejection::JsonSyntaxError(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "JSON syntax error"
            );
            ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
        }
        JsonRejection::MissingJsonContentType(_) => {
            ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
        }
        _ => ApiError::malformed_json("Failed to parse request body"),
    };
    ApiErrorResponse::bad_request(error)
}

fn query_failure(correlation_id: Uuid, rejection: QueryRejection) -> ApiErrorResponse {
    let body_text = rejection.body_text();
    warn!(correlation_id = %correlation_id, error = %body_text, "Invalid query string");
    ApiErrorResponse::bad_request(ApiError::validation_error(body_text))
}

fn path_failure(correlation_id: Uuid, rejection: PathRejection) -> ApiErrorResponse {
    let body_text = rejection.body_text();
    warn!(correlation_id = %correlation_id, error = %body_text, "Invalid path parameter");
    ApiErrorResponse::bad_request(ApiError::validation_error(body_text))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use chrono::NaiveDate;
    use std::sync::Arc;
    use tower::ServiceExt;

    use crate::calculation::PayoutRounding;
    use crate::models::Employee;
    use crate::validation::FixedClock;

    fn create_test_state() -> AppState {
        AppState::in_memory(
            [Employee::new(1, "Alice"), Employee::new(2, "Bob")],
            Arc::new(FixedClock(NaiveDate::from_ymd_opt(2026, 1, 12).unwrap())),
            PayoutRounding::HalfEven,
        )
    }

    async fn read_error(response: Response) -> ApiError {
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&body).unwrap()
    }

    #[tokio::test]
    async fn test_health() {
        let router = create_router(create_test_state());

        let response = router
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_malformed_json_returns_400() {
        let router = create_router(create_test_state());

        let response = router
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/roster/shifts")
                    .header("Content-Type", "application/json")
                    .body(Body::from("{invalid json"))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(read_error(response).await.code, "MALFORMED_JSON");
    }

    #[tokio::test]
    async fn test_missing_field_returns_validation_error() {
        let router = create_router(create_test_state());
        let body = r#"{ "date": "2026-01-13", "startTime": "09:00", "endTime": "17:00" }"#;

        let response = router
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/roster/shifts")
                    .header("Content-Type", "application/json")
                    .body(Body::from(body))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let error = read_error(response).await;
        assert_eq!(error.code, "VALIDATION_ERROR");
        assert!(error.message.contains("employeeId"), "got: {}", error.message);
    }

    #[tokio::test]
    async fn test_missing_query_returns_validation_error() {
        let router = create_router(create_test_state());

        let response = router
            .oneshot(
                Request::builder()
                    .uri("/api/tips/payout")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(read_error(response).await.code, "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_non_numeric_shift_id_returns_400() {
        let router = create_router(create_test_state());

        let response = router
            .oneshot(
                Request::builder()
                    .uri("/api/roster/shifts/abc")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
