//! Tag endpoints

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use crate::middleware::AuthUser;
use crate::models::event::Tag;
use crate::utils::errors::{EventlyError, Result};
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct CreateTagRequest {
    pub name: String,
}

pub async fn list_tags(State(state): State<AppState>) -> Result<Json<Vec<Tag>>> {
    let tags = state.db.tags.list().await?;
    Ok(Json(tags))
}

pub async fn create_tag(
    State(state): State<AppState>,
    _user: AuthUser,
    Json(request): Json<CreateTagRequest>,
) -> Result<(StatusCode, Json<Tag>)> {
    let name = request.name.trim();
    if name.is_empty() {
        return Err(EventlyError::InvalidInput("Tag name is required".to_string()));
    }

    let tag = state.db.tags.create(name).await?;
    Ok((StatusCode::CREATED, Json(tag)))
}
