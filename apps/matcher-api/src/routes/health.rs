use axum::Json;
use serde_json::{json, Value};

pub const API_TITLE: &str = "CV and Job Description Matcher";

/// GET /health
/// Returns a simple status object with service version and title.
pub async fn health_handler() -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "version": env!("CARGO_PKG_VERSION"),
        "title": API_TITLE
    }))
}
