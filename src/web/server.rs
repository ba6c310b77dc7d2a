use axum::{
    extract::{rejection::JsonRejection, DefaultBodyLimit, State},
    http::{HeaderName, HeaderValue, StatusCode},
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tower::limit::ConcurrencyLimitLayer;
use tower::ServiceBuilder;
use tower_governor::{governor::GovernorConfigBuilder, GovernorLayer};
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::timeout::TimeoutLayer;

use crate::catalog::store::ReferenceStore;
use crate::cli::{load_store, ServeArgs};
use crate::core::case::ObservedCase;
use crate::core::types::{EmergencyFlag, Species};
use crate::matching::engine::TriageEngine;
use crate::matching::outcome::DISCLAIMER;
use crate::utils::validation::{validate_symptom_labels, warn_unknown_symptoms};

/// Security configuration constants to prevent `DoS` attacks
pub const MAX_REQUEST_BODY_SIZE: usize = 64 * 1024; // 64KB
pub const MAX_CONCURRENT_REQUESTS: usize = 100;
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Shared application state
pub struct AppState {
    pub store: ReferenceStore,
}

/// Body of `POST /api/evaluate`
#[derive(Debug, Deserialize)]
pub struct EvaluateRequest {
    pub species: Species,
    #[serde(default)]
    pub symptoms: Vec<String>,
    #[serde(default)]
    pub emergency_flags: Vec<EmergencyFlag>,
}

/// Error response body
#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub error_type: String,
    pub details: Option<String>,
}

/// Create a safe error response that prevents information disclosure
/// while logging detailed errors server-side for debugging
pub fn create_safe_error_response(
    error_type: &str,
    user_message: &str,
    internal_error: Option<&str>,
) -> ErrorResponse {
    // Log detailed error server-side for debugging (not exposed to client)
    if let Some(internal_msg) = internal_error {
        tracing::error!("Internal error ({}): {}", error_type, internal_msg);
    }

    ErrorResponse {
        error: user_message.to_string(),
        error_type: error_type.to_string(),
        details: None,
    }
}

fn bad_request(error_type: &str, user_message: &str, internal_error: Option<&str>) -> Response {
    (
        StatusCode::BAD_REQUEST,
        Json(create_safe_error_response(
            error_type,
            user_message,
            internal_error,
        )),
    )
        .into_response()
}

/// Run the web server
///
/// # Errors
///
/// Returns an error if the reference table cannot be loaded, the tokio runtime
/// cannot be created or the server fails to start.
pub fn run(args: ServeArgs) -> anyhow::Result<()> {
    let store = load_store(args.catalog.as_deref())?;

    // Build tokio runtime
    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(async move { run_server(args, store).await })
}

/// Routes and state, without the protective middleware
pub fn api_routes(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/evaluate", post(evaluate_handler))
        .route("/api/reference", get(reference_handler))
        .route("/api/vocabulary", get(vocabulary_handler))
        .with_state(state)
}

/// Create the application router with all routes and middleware configured.
///
/// # Errors
///
/// Returns an error if the rate limiter configuration is rejected.
pub fn create_router(store: ReferenceStore) -> anyhow::Result<Router> {
    let state = Arc::new(AppState { store });

    // Configure IP-based rate limiting
    let governor_conf = GovernorConfigBuilder::default()
        .per_second(10) // 10 requests per second per IP
        .burst_size(50) // Allow bursts of 50 requests
        .finish()
        .ok_or_else(|| anyhow::anyhow!("Invalid rate limit configuration"))?;

    let app = api_routes(state).layer(
        ServiceBuilder::new()
            // Security headers for browser protection
            .layer(SetResponseHeaderLayer::if_not_present(
                HeaderName::from_static("x-content-type-options"),
                HeaderValue::from_static("nosniff"),
            ))
            .layer(SetResponseHeaderLayer::if_not_present(
                HeaderName::from_static("x-frame-options"),
                HeaderValue::from_static("DENY"),
            ))
            .layer(SetResponseHeaderLayer::if_not_present(
                HeaderName::from_static("referrer-policy"),
                HeaderValue::from_static("strict-origin-when-cross-origin"),
            ))
            // IP-based rate limiting to prevent abuse
            .layer(GovernorLayer {
                config: Arc::new(governor_conf),
            })
            // Request timeout to prevent slow client attacks
            .layer(TimeoutLayer::with_status_code(
                StatusCode::REQUEST_TIMEOUT,
                REQUEST_TIMEOUT,
            ))
            // Limit concurrent requests to prevent DOS
            .layer(ConcurrencyLimitLayer::new(MAX_CONCURRENT_REQUESTS))
            .layer(DefaultBodyLimit::max(MAX_REQUEST_BODY_SIZE)),
    );

    Ok(app)
}

async fn run_server(args: ServeArgs, store: ReferenceStore) -> anyhow::Result<()> {
    let app = create_router(store)?;

    let addr = format!("{}:{}", args.address, args.port);
    println!("Starting pet-triage API at http://{addr}");
    tracing::info!(%addr, "Listening");

    if args.open {
        let _ = open::that(format!("http://{addr}/api/vocabulary"));
    }

    let listener = TcpListener::bind(&addr).await?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}

/// Evaluate one case and return its outcome
async fn evaluate_handler(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<EvaluateRequest>, JsonRejection>,
) -> Response {
    let Json(request) = match payload {
        Ok(json) => json,
        Err(rejection) if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE => {
            return (
                StatusCode::PAYLOAD_TOO_LARGE,
                Json(create_safe_error_response(
                    "payload_too_large",
                    "Request body is too large",
                    None,
                )),
            )
                .into_response();
        }
        Err(rejection) => {
            return bad_request(
                "invalid_request",
                "Request body must be JSON with a known species",
                Some(&rejection.body_text()),
            );
        }
    };

    let emergency_flags: BTreeSet<EmergencyFlag> = request.emergency_flags.into_iter().collect();

    // Any emergency flag decides the outcome, so labels are not checked
    let symptoms = if emergency_flags.is_empty() {
        let symptoms = match validate_symptom_labels(request.symptoms) {
            Ok(symptoms) => symptoms,
            Err(e) => return bad_request("invalid_symptoms", &e.to_string(), None),
        };
        warn_unknown_symptoms(&state.store, &symptoms);
        symptoms
    } else {
        BTreeSet::new()
    };

    let case = ObservedCase {
        species: request.species,
        symptoms,
        emergency_flags,
    };

    let engine = TriageEngine::new(&state.store);
    let outcome = engine.evaluate(&case);
    tracing::debug!(outcome = outcome.kind(), "Evaluated case");

    Json(outcome).into_response()
}

/// Return the species tables in the reference store
async fn reference_handler(State(state): State<Arc<AppState>>) -> Json<serde_json::Value> {
    let tables: Vec<serde_json::Value> = state
        .store
        .tables()
        .iter()
        .map(|t| {
            serde_json::json!({
                "species": t.species,
                "label": t.species.label(),
                "conditions": t.conditions,
            })
        })
        .collect();

    Json(serde_json::json!({
        "version": state.store.version,
        "count": state.store.len(),
        "species": tables,
    }))
}

/// Return everything a form needs to collect a case
async fn vocabulary_handler(State(state): State<Arc<AppState>>) -> Json<serde_json::Value> {
    let species: Vec<serde_json::Value> = Species::ALL
        .into_iter()
        .map(|s| {
            serde_json::json!({
                "id": s,
                "label": s.label(),
                "supported": state.store.supports(s),
            })
        })
        .collect();
    let flags: Vec<serde_json::Value> = EmergencyFlag::ALL
        .into_iter()
        .map(|f| serde_json::json!({"id": f, "label": f.label()}))
        .collect();

    Json(serde_json::json!({
        "version": state.store.version,
        "species": species,
        "symptoms": state.store.vocabulary(),
        "emergency_flags": flags,
        "disclaimer": DISCLAIMER,
    }))
}
