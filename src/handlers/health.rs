//! Health check endpoint

use axum::extract::State;
use axum::Json;

use crate::database;
use crate::utils::errors::Result;
use crate::AppState;

pub async fn health_check(State(state): State<AppState>) -> Result<Json<serde_json::Value>> {
    database::health_check(&state.pool).await?;

    Ok(Json(serde_json::json!({
        "status": "ok",
        "version": crate::VERSION,
    })))
}
