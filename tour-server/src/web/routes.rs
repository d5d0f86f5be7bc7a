//! HTTP route handlers.

use askama::Template;
use axum::{
    Json, Router,
    extract::{Query, State},
    http::{HeaderMap, StatusCode, header},
    response::{Html, IntoResponse, Response},
    routing::get,
};
use chrono::NaiveDate;
use tower_http::services::ServeDir;
use tracing::{error, info, warn};

use crate::collect::CollectError;
use crate::planner::{TourConfig, TravelGraph, format_itineraries};

use super::dto::*;
use super::state::AppState;
use super::templates::*;

/// Create the application router.
///
/// `static_dir` is the path to the static assets directory.
pub fn create_router(state: AppState, static_dir: &str) -> Router {
    Router::new()
        .route("/", get(index_page))
        .route("/health", get(health))
        .route("/itineraries", get(find_itineraries))
        .nest_service("/static", ServeDir::new(static_dir))
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Index page with search form.
async fn index_page(State(state): State<AppState>) -> Response {
    askama_axum::into_response(&IndexTemplate::with_defaults(&state.config))
}

/// Check if request accepts HTML.
fn accepts_html(headers: &HeaderMap) -> bool {
    headers
        .get(header::ACCEPT)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|accept| accept.contains("text/html"))
}

/// Check if request asks for plain text.
fn accepts_text(headers: &HeaderMap) -> bool {
    headers
        .get(header::ACCEPT)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|accept| accept.contains("text/plain"))
}

fn parse_date(name: &str, value: &str) -> Result<NaiveDate, AppError> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").map_err(|_| AppError::BadRequest {
        message: format!("Invalid {name} date (expected YYYY-MM-DD): {value}"),
    })
}

/// Resolve and validate the search thresholds of a request.
fn search_config(req: &ItineraryRequest, defaults: &TourConfig) -> Result<TourConfig, AppError> {
    let config = req.tour_config(defaults);
    config.validate().map_err(|e| AppError::BadRequest {
        message: e.to_string(),
    })?;
    Ok(config)
}

/// Find itineraries between two dates.
async fn find_itineraries(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(req): Query<ItineraryRequest>,
) -> Result<Response, AppError> {
    let from = parse_date("from", &req.from)?;
    let to = parse_date("to", &req.to)?;
    if from > to {
        return Err(AppError::BadRequest {
            message: format!("from ({from}) is after to ({to})"),
        });
    }

    let competitions = req.competitions().map_err(|e| AppError::BadRequest {
        message: e.to_string(),
    })?;
    let config = search_config(&req, &state.config)?;

    let matches = state.collector.collect(&competitions, from, to).await?;
    let matches_considered = matches.len();

    // The search is CPU-bound; keep it off the async workers.
    let outcome = tokio::task::spawn_blocking(move || {
        TravelGraph::from_config(matches, &config).search(config.min_games)
    })
    .await
    .map_err(|e| AppError::Internal {
        message: format!("search task failed: {e}"),
    })?;

    info!(
        %from,
        %to,
        matches = matches_considered,
        itineraries = outcome.itineraries.len(),
        states = outcome.states_explored,
        truncated = outcome.truncated,
        "itinerary search"
    );
    let itineraries = outcome.itineraries;

    // Return HTML, plain text or JSON based on Accept header
    if accepts_html(&headers) {
        let template = ItinerariesTemplate {
            itineraries: itinerary_views(&itineraries),
            matches_considered,
            truncated: outcome.truncated,
        };
        let html = template.render().map_err(|e| AppError::Internal {
            message: format!("Template error: {}", e),
        })?;

        Ok(Html(html).into_response())
    } else if accepts_text(&headers) {
        Ok((
            [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
            format_itineraries(&itineraries),
        )
            .into_response())
    } else {
        let itineraries = itineraries
            .iter()
            .map(ItineraryResult::from_itinerary)
            .collect();

        Ok(Json(ItineraryResponse {
            matches_considered,
            truncated: outcome.truncated,
            itineraries,
        })
        .into_response())
    }
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
    Internal { message: String },
}

impl From<CollectError> for AppError {
    fn from(e: CollectError) -> Self {
        AppError::Internal {
            message: e.to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::BadRequest { message } => (StatusCode::BAD_REQUEST, message),
            AppError::Internal { message } => (StatusCode::INTERNAL_SERVER_ERROR, message),
        };

        if status.is_server_error() {
            error!(%status, %message, "request failed");
        } else {
            warn!(%status, %message, "rejected request");
        }

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::planner::{MAX_DAYS_LIMIT, MAX_DIST_KM_LIMIT};
    use axum::http::HeaderValue;

    #[test]
    fn accepts_html_header() {
        let mut headers = HeaderMap::new();
        assert!(!accepts_html(&headers));

        headers.insert(header::ACCEPT, HeaderValue::from_static("application/json"));
        assert!(!accepts_html(&headers));

        headers.insert(
            header::ACCEPT,
            HeaderValue::from_static("text/html,application/xhtml+xml"),
        );
        assert!(accepts_html(&headers));
    }

    #[test]
    fn accepts_text_header() {
        let mut headers = HeaderMap::new();
        assert!(!accepts_text(&headers));

        headers.insert(header::ACCEPT, HeaderValue::from_static("text/plain"));
        assert!(accepts_text(&headers));
        assert!(!accepts_html(&headers));
    }

    #[test]
    fn parse_dates() {
        assert_eq!(
            parse_date("from", " 2025-09-01 ").unwrap(),
            NaiveDate::from_ymd_opt(2025, 9, 1).unwrap()
        );
        assert!(matches!(
            parse_date("to", "01/09/2025"),
            Err(AppError::BadRequest { message }) if message.contains("to date")
        ));
    }

    #[test]
    fn negative_distance_rejected() {
        let req = ItineraryRequest {
            max_dist_km: Some(-1.0),
            ..Default::default()
        };
        assert!(matches!(
            search_config(&req, &TourConfig::default()),
            Err(AppError::BadRequest { .. })
        ));

        let req = ItineraryRequest {
            max_dist_km: Some(120.0),
            ..Default::default()
        };
        assert_eq!(
            search_config(&req, &TourConfig::default()).unwrap().max_dist_km,
            120.0
        );
    }

    #[test]
    fn long_windows_rejected() {
        let req = ItineraryRequest {
            max_days: Some(30),
            ..Default::default()
        };
        assert!(matches!(
            search_config(&req, &TourConfig::default()),
            Err(AppError::BadRequest { message }) if message.contains("max_days")
        ));

        let req = ItineraryRequest {
            max_days: Some(MAX_DAYS_LIMIT),
            ..Default::default()
        };
        assert_eq!(
            search_config(&req, &TourConfig::default()).unwrap().max_days,
            MAX_DAYS_LIMIT
        );
    }

    #[test]
    fn huge_distance_rejected() {
        let req = ItineraryRequest {
            max_dist_km: Some(10_000.0),
            ..Default::default()
        };
        assert!(matches!(
            search_config(&req, &TourConfig::default()),
            Err(AppError::BadRequest { message }) if message.contains("max_dist_km")
        ));

        let req = ItineraryRequest {
            max_dist_km: Some(MAX_DIST_KM_LIMIT),
            ..Default::default()
        };
        assert!(search_config(&req, &TourConfig::default()).is_ok());
    }

    #[test]
    fn request_keeps_state_limit() {
        let defaults = TourConfig::default().with_max_states(42);
        let req = ItineraryRequest {
            max_days: Some(7),
            ..Default::default()
        };
        let config = search_config(&req, &defaults).unwrap();
        assert_eq!(config.max_states, 42);
        assert_eq!(config.max_days, 7);
    }

    #[test]
    fn error_status_codes() {
        let response = AppError::BadRequest {
            message: "nope".to_string(),
        }
        .into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let response = AppError::from(CollectError::Football(
            crate::football::FootballError::Unauthorized,
        ))
        .into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
