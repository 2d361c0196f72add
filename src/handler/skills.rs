use std::sync::Arc;

use axum::{extract::Path, response::IntoResponse, routing::get, Extension, Json, Router};
use serde_json::json;

use crate::{error::HttpError, AppState};

pub fn skill_handler() -> Router {
    Router::new()
        .route("/", get(get_skills))
        .route("/categories", get(get_skill_categories))
        .route("/category/:category", get(get_skills_by_category))
        .route("/:skill_id", get(get_skill))
}

pub async fn get_skills(
    Extension(app_state): Extension<Arc<AppState>>,
) -> Result<impl IntoResponse, HttpError> {
    let skills = app_state.db_client
        .get_skills()
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok(Json(json!({
        "status": "success",
        "data": skills
    })))
}

pub async fn get_skill_categories(
    Extension(app_state): Extension<Arc<AppState>>,
) -> Result<impl IntoResponse, HttpError> {
    let categories = app_state.db_client
        .get_skill_categories()
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok(Json(json!({
        "status": "success",
        "data": categories
    })))
}

pub async fn get_skills_by_category(
    Path(category): Path<String>,
    Extension(app_state): Extension<Arc<AppState>>,
) -> Result<impl IntoResponse, HttpError> {
    let skills = app_state.db_client
        .get_skills_by_category(&category)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok(Json(json!({
        "status": "success",
        "data": skills
    })))
}

pub async fn get_skill(
    Path(skill_id): Path<i32>,
    Extension(app_state): Extension<Arc<AppState>>,
) -> Result<impl IntoResponse, HttpError> {
    let skill = app_state.db_client
        .get_skill(skill_id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?
        .ok_or_else(|| HttpError::not_found(format!("Skill {} not found", skill_id)))?;

    Ok(Json(json!({
        "status": "success",
        "data": skill
    })))
}
