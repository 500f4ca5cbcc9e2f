use crate::infra::{AppState, EligibilityService, ImprovementsView, LenderComparison};
use axum::extract::{Query, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Extension, Json, Router};
use loan_eligibility::eligibility::{BorrowerProfile, EligibilityResult};
use loan_eligibility::error::AppError;
use loan_eligibility::session::KeyValueStore;
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;

/// Highest score the scorer can produce.
const MAX_SCORE: u16 = 100;

#[derive(Debug, Default, Deserialize)]
pub(crate) struct LenderQuery {
    #[serde(default)]
    pub(crate) score: Option<u16>,
}

/// Router exposing scoring, the stored slot, lender comparison, and tips.
pub(crate) fn eligibility_router<S>(service: Arc<EligibilityService<S>>) -> Router
where
    S: KeyValueStore + 'static,
{
    Router::new()
        .route(
            "/api/v1/eligibility",
            get(stored_handler::<S>)
                .post(score_handler::<S>)
                .delete(reset_handler::<S>),
        )
        .route("/api/v1/lenders", get(lenders_handler::<S>))
        .route("/api/v1/improvements", get(improvements_handler::<S>))
        .with_state(service)
}

pub(crate) fn with_operational_routes<S>(service: Arc<EligibilityService<S>>) -> Router
where
    S: KeyValueStore + 'static,
{
    eligibility_router(service)
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
}

pub(crate) async fn score_handler<S>(
    State(service): State<Arc<EligibilityService<S>>>,
    Json(profile): Json<BorrowerProfile>,
) -> Json<EligibilityResult>
where
    S: KeyValueStore + 'static,
{
    Json(service.score_and_try_store(&profile))
}

pub(crate) async fn stored_handler<S>(
    State(service): State<Arc<EligibilityService<S>>>,
) -> Result<Response, AppError>
where
    S: KeyValueStore + 'static,
{
    let response = match service.stored()? {
        Some(assessment) => (StatusCode::OK, Json(assessment)).into_response(),
        None => (
            StatusCode::NOT_FOUND,
            Json(json!({ "error": "no assessment stored" })),
        )
            .into_response(),
    };
    Ok(response)
}

pub(crate) async fn reset_handler<S>(
    State(service): State<Arc<EligibilityService<S>>>,
) -> Result<StatusCode, AppError>
where
    S: KeyValueStore + 'static,
{
    service.reset()?;
    Ok(StatusCode::NO_CONTENT)
}

pub(crate) async fn lenders_handler<S>(
    State(service): State<Arc<EligibilityService<S>>>,
    Query(query): Query<LenderQuery>,
) -> Response
where
    S: KeyValueStore + 'static,
{
    let score = match query.score {
        Some(score) if score > MAX_SCORE => {
            let payload = json!({
                "error": format!("score must be between 0 and {MAX_SCORE}, got {score}"),
            });
            return (StatusCode::BAD_REQUEST, Json(payload)).into_response();
        }
        Some(score) => u8::try_from(score).ok(),
        None => None,
    };
    let comparison: LenderComparison = service.lender_comparison(score);
    (StatusCode::OK, Json(comparison)).into_response()
}

pub(crate) async fn improvements_handler<S>(
    State(service): State<Arc<EligibilityService<S>>>,
) -> Json<ImprovementsView>
where
    S: KeyValueStore + 'static,
{
    Json(service.improvements())
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::Request;
    use loan_eligibility::lenders::LenderDirectory;
    use loan_eligibility::session::InMemoryStore;
    use serde_json::Value;
    use tower::ServiceExt;

    fn router() -> Router {
        let directory = LenderDirectory::bundled().expect("bundled fixture");
        let service = Arc::new(EligibilityService::new(InMemoryStore::default(), directory));
        eligibility_router(service)
    }

    async fn send(router: &Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = router
            .clone()
            .oneshot(request)
            .await
            .expect("router dispatch");
        let status = response.status();
        let body = to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("read body");
        let payload = if body.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&body).expect("json payload")
        };
        (status, payload)
    }

    fn get_request(uri: &str) -> Request<Body> {
        Request::builder()
            .method("GET")
            .uri(uri)
            .body(Body::empty())
            .expect("request")
    }

    fn score_request(payload: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/api/v1/eligibility")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(payload.to_string()))
            .expect("request")
    }

    #[tokio::test]
    async fn score_endpoint_returns_result_and_persists_slot() {
        let router = router();
        let (status, body) = send(
            &router,
            score_request(json!({
                "age": 30,
                "income": 80000,
                "monthlyDebt": 0,
                "creditRating": "Excellent",
                "residencyStatus": "Citizen"
            })),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["score"], 100);
        assert_eq!(body["tier"], "High");
        assert_eq!(body["loanRange"], "$64,000");
        assert_eq!(body["maxLoanAmount"], 64_000);

        let (status, stored) = send(&router, get_request("/api/v1/eligibility")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(stored["score"], 100);
        assert_eq!(stored["credit"], "Excellent");
    }

    #[tokio::test]
    async fn unknown_enum_strings_are_scored_not_rejected() {
        let router = router();
        let (status, body) = send(
            &router,
            score_request(json!({
                "age": 20,
                "income": 35000,
                "monthlyDebt": 1500,
                "creditRating": "N/A",
                "residencyStatus": "other"
            })),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["score"], 32);
        assert_eq!(body["tier"], "Low");
    }

    #[tokio::test]
    async fn missing_fields_score_in_the_floor_buckets() {
        let router = router();
        let (status, body) = send(
            &router,
            score_request(json!({ "age": 30, "income": 80000, "monthlyDebt": 0 })),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        // 15 + 25 + 20 + 0 (credit) + 5 (residency)
        assert_eq!(body["score"], 65);
        assert_eq!(body["tier"], "Moderate");
    }

    #[tokio::test]
    async fn null_credit_scores_like_unrecognized() {
        let router = router();
        let payload = |credit: Value| {
            json!({
                "age": 30,
                "income": 80000,
                "monthlyDebt": 0,
                "creditRating": credit,
                "residencyStatus": "Citizen"
            })
        };

        let (null_status, null_body) = send(&router, score_request(payload(Value::Null))).await;
        let (_, blank_body) = send(&router, score_request(payload(json!("")))).await;
        let (_, poor_body) = send(&router, score_request(payload(json!("Poor")))).await;

        assert_eq!(null_status, StatusCode::OK);
        assert_eq!(null_body["score"], 75);
        assert_eq!(null_body["score"], blank_body["score"]);
        assert_eq!(null_body["improvements"], poor_body["improvements"]);
    }

    #[tokio::test]
    async fn fractional_age_is_floored_to_whole_years() {
        let router = router();
        let (status, body) = send(
            &router,
            score_request(json!({
                "age": 24.9,
                "income": 80000,
                "monthlyDebt": 0,
                "creditRating": "Excellent",
                "residencyStatus": "Citizen"
            })),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        // Age 24 falls in the 18-24 bucket.
        assert_eq!(body["score"], 97);
    }

    #[tokio::test]
    async fn slot_field_names_are_accepted_in_score_body() {
        let router = router();
        let (status, body) = send(
            &router,
            score_request(json!({
                "age": 30,
                "income": 60000,
                "debts": 2500,
                "credit": "good",
                "residency": "citizen"
            })),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        // debt ratio 0.5 scores 5
        assert_eq!(body["score"], 75);

        let (_, stored) = send(&router, get_request("/api/v1/eligibility")).await;
        assert_eq!(stored["debts"], 2500.0);
        assert_eq!(stored["credit"], "Good");
    }

    #[tokio::test]
    async fn lenders_endpoint_rejects_scores_above_one_hundred() {
        let router = router();
        let (status, body) = send(&router, get_request("/api/v1/lenders?score=150")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].as_str().unwrap_or_default().contains("150"));

        let (status, _) = send(&router, get_request("/api/v1/lenders?score=100")).await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn stored_endpoint_reports_missing_slot() {
        let router = router();
        let (status, body) = send(&router, get_request("/api/v1/eligibility")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert!(body["error"].as_str().unwrap_or_default().contains("no assessment"));
    }

    #[tokio::test]
    async fn reset_clears_slot_and_unfilters_lenders() {
        let router = router();
        send(
            &router,
            score_request(json!({
                "age": 40,
                "income": 50000,
                "monthlyDebt": 500,
                "creditRating": "Average",
                "residencyStatus": "Resident"
            })),
        )
        .await;

        let (_, filtered) = send(&router, get_request("/api/v1/lenders")).await;
        assert_eq!(filtered["score"], 75);
        let filtered_count = filtered["lenders"].as_array().map(Vec::len).unwrap_or(0);

        let response = router
            .clone()
            .oneshot(
                Request::builder()
                    .method("DELETE")
                    .uri("/api/v1/eligibility")
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("router dispatch");
        assert_eq!(response.status(), StatusCode::NO_CONTENT);

        let (_, all) = send(&router, get_request("/api/v1/lenders")).await;
        assert!(all["score"].is_null());
        let all_count = all["lenders"].as_array().map(Vec::len).unwrap_or(0);
        assert!(all_count > filtered_count);
    }

    #[tokio::test]
    async fn lenders_endpoint_accepts_score_override() {
        let router = router();
        let (status, body) = send(&router, get_request("/api/v1/lenders?score=55")).await;
        assert_eq!(status, StatusCode::OK);

        let minimums: Vec<u64> = body["lenders"]
            .as_array()
            .expect("lender array")
            .iter()
            .filter_map(|lender| lender["minScoreNeeded"].as_u64())
            .collect();
        assert!(!minimums.is_empty());
        assert!(minimums.iter().all(|min| *min <= 55));
        assert!(minimums.windows(2).all(|pair| pair[0] >= pair[1]));
    }

    #[tokio::test]
    async fn improvements_endpoint_lists_catalog() {
        let router = router();
        let (status, body) = send(&router, get_request("/api/v1/improvements")).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body["score"].is_null());
        let tips = body["tips"].as_array().expect("tips array");
        assert_eq!(tips.len(), 8);
        assert_eq!(tips[0]["category"], "Income");
    }
}
