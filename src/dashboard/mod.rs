//! Dashboard — Axum web server with the calculator form.
//!
//! Serves a REST API and a self-contained HTML form that replaces the
//! desktop entry window. CORS enabled for local development.

pub mod routes;

use anyhow::{Context, Result};
use axum::{
    http::{header, HeaderValue, Method},
    response::Html,
    routing::{get, post},
    Router,
};
use tower_http::cors::CorsLayer;
use tracing::info;

use routes::AppState;

/// The embedded form HTML (compiled into the binary).
const DASHBOARD_HTML: &str = include_str!("templates/index.html");

/// Serve the dashboard until Ctrl+C.
pub async fn serve_dashboard(state: AppState, port: u16) -> Result<()> {
    let app = build_router(state);
    let addr = std::net::SocketAddr::from(([0, 0, 0, 0], port));

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind dashboard port {port}"))?;
    info!(port, "Dashboard server listening on http://localhost:{port}");

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            info!("Shutdown signal received.");
        })
        .await
        .context("Dashboard server error")?;

    Ok(())
}

/// Build the Axum router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(HeaderValue::from_static("*"))
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE]);

    Router::new()
        // API routes
        .route("/api/calculate", post(routes::calculate))
        .route("/api/config", get(routes::get_config))
        .route("/api/status", get(routes::get_status))
        .route("/health", get(routes::health))
        // Form HTML
        .route("/", get(serve_form))
        .layer(cors)
        .with_state(state)
}

/// Serve the embedded HTML form.
async fn serve_form() -> Html<&'static str> {
    Html(DASHBOARD_HTML)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::Calculator;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use super::routes::DashboardState;
    use std::sync::Arc;
    use tower::ServiceExt;

    fn test_state() -> AppState {
        Arc::new(DashboardState::new("ODDS-APEX", Calculator::default()))
    }

    fn post_json(uri: &str, body: serde_json::Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn body_json(resp: axum::response::Response) -> serde_json::Value {
        let body = axum::body::to_bytes(resp.into_body(), 100_000).await.unwrap();
        serde_json::from_slice(&body).unwrap()
    }

    #[tokio::test]
    async fn test_health_endpoint() {
        let app = build_router(test_state());
        let resp = app
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_calculate_endpoint() {
        let app = build_router(test_state());
        let resp = app
            .oneshot(post_json(
                "/api/calculate",
                serde_json::json!({
                    "home_avg_scored": "1.5",
                    "home_avg_conceded": "1.5",
                    "away_avg_scored": "1.5",
                    "away_avg_conceded": "1.5",
                    "home_xg": "1.6",
                    "away_xg": "1.1",
                    "home_xg_against": "1.0",
                    "away_xg_against": "1.0",
                    "account_balance": "1000",
                    "kelly_fraction": "5",
                    "live_over": "2.10"
                }),
            ))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);

        let json = body_json(resp).await;
        assert_eq!(json["insights"]["decision"]["back"]["kind"], "back");
        assert_eq!(json["insights"]["decision"]["lay"]["kind"], "no_value");
        assert_eq!(json["lines"][0]["kind"], "heading");
        let p = json["insights"]["fair"]["over_probability"].as_f64().unwrap();
        assert!((p - 0.508).abs() < 0.001);
    }

    #[tokio::test]
    async fn test_calculate_invalid_input() {
        let app = build_router(test_state());
        let resp = app
            .oneshot(post_json(
                "/api/calculate",
                serde_json::json!({ "home_xg": "one point six" }),
            ))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);

        let json = body_json(resp).await;
        assert_eq!(json["error"], "invalid_input");
        assert_eq!(json["message"], "Please enter valid numerical values.");
    }

    #[tokio::test]
    async fn test_calculate_degenerate() {
        let app = build_router(test_state());
        let resp = app
            .oneshot(post_json(
                "/api/calculate",
                serde_json::json!({
                    "home_xg": "1.5",
                    "away_xg": "1.2",
                    "away_xg_against": "-20"
                }),
            ))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let json = body_json(resp).await;
        assert_eq!(json["error"], "model_degenerate");
    }

    #[tokio::test]
    async fn test_config_endpoint() {
        let app = build_router(test_state());
        let resp = app
            .oneshot(Request::builder().uri("/api/config").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        let json = body_json(resp).await;
        assert_eq!(json["market"], "Over 2.5");
        assert_eq!(json["model"]["max_goals"], 10);
        assert_eq!(json["strategy"]["commission"], 0.05);
    }

    #[tokio::test]
    async fn test_status_endpoint() {
        let app = build_router(test_state());
        let resp = app
            .oneshot(Request::builder().uri("/api/status").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        let json = body_json(resp).await;
        assert_eq!(json["name"], "ODDS-APEX");
        assert_eq!(json["calculations"], 0);
    }

    #[tokio::test]
    async fn test_form_html() {
        let app = build_router(test_state());
        let resp = app
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);

        let body = axum::body::to_bytes(resp.into_body(), 100_000).await.unwrap();
        let html = String::from_utf8(body.to_vec()).unwrap();
        assert!(html.contains("Odds Apex"));
        assert!(html.contains("Calculate Over Insights"));
        assert!(html.contains("Reset All"));
    }
}
