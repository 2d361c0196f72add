use std::{str::FromStr, sync::Arc};

use axum::{
    extract::Path,
    http::StatusCode,
    middleware,
    response::IntoResponse,
    routing::{get, post, put},
    Extension, Json, Router,
};
use serde_json::json;
use validator::Validate;

use crate::{
    dtos::userskilldtos::{CreateUserSkillDto, UpdateUserSkillDto},
    error::{ErrorMessage, HttpError},
    middleware::{auth, JWTAuthMiddeware},
    models::userskillmodel::{SkillType, UserSkill},
    AppState,
};

/// Listing is public; changing a registry entry needs a token.
pub fn user_skill_handler() -> Router {
    Router::new()
        .route("/", post(create_user_skill).layer(middleware::from_fn(auth)))
        .route("/user/:user_id", get(get_user_skills))
        .route(
            "/:user_skill_id",
            put(update_user_skill)
                .delete(delete_user_skill)
                .layer(middleware::from_fn(auth)),
        )
}

fn permission_denied() -> HttpError {
    HttpError::new(ErrorMessage::PermissionDenied.to_string(), StatusCode::FORBIDDEN)
}

async fn owned_user_skill(
    app_state: &AppState,
    user_skill_id: i32,
    user_id: i32,
) -> Result<UserSkill, HttpError> {
    let user_skill = app_state.db_client
        .get_user_skill(user_skill_id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?
        .ok_or_else(|| HttpError::not_found(format!("User skill {} not found", user_skill_id)))?;

    if user_skill.user_id != user_id {
        return Err(permission_denied());
    }

    Ok(user_skill)
}

pub async fn create_user_skill(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(user): Extension<JWTAuthMiddeware>,
    Json(body): Json<CreateUserSkillDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let skill_type = SkillType::from_str(&body.skill_type).map_err(HttpError::bad_request)?;

    if body.user_id != user.user.id {
        return Err(permission_denied());
    }

    app_state.db_client
        .get_skill(body.skill_id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?
        .ok_or_else(|| HttpError::not_found(format!("Skill {} not found", body.skill_id)))?;

    let user_skill = app_state.db_client
        .create_user_skill(
            user.user.id,
            body.skill_id,
            skill_type,
            body.proficiency_level,
            body.description,
            body.is_available.unwrap_or(true),
        )
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?
        .ok_or_else(|| {
            HttpError::unique_constraint_violation(format!(
                "You already list this skill as {}",
                skill_type
            ))
        })?;

    tracing::info!(
        user_skill_id = user_skill.id,
        user_id = user_skill.user_id,
        skill_type = %skill_type,
        "User skill added"
    );

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "status": "success",
            "data": user_skill
        })),
    ))
}

pub async fn get_user_skills(
    Path(user_id): Path<i32>,
    Extension(app_state): Extension<Arc<AppState>>,
) -> Result<impl IntoResponse, HttpError> {
    let user_skills = app_state.db_client
        .get_user_skills(user_id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok(Json(json!({
        "status": "success",
        "data": user_skills
    })))
}

pub async fn update_user_skill(
    Path(user_skill_id): Path<i32>,
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(user): Extension<JWTAuthMiddeware>,
    Json(body): Json<UpdateUserSkillDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    owned_user_skill(&app_state, user_skill_id, user.user.id).await?;

    let user_skill = app_state.db_client
        .update_user_skill(
            user_skill_id,
            body.proficiency_level,
            body.description,
            body.is_available,
        )
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?
        .ok_or_else(|| HttpError::not_found(format!("User skill {} not found", user_skill_id)))?;

    Ok(Json(json!({
        "status": "success",
        "data": user_skill
    })))
}

pub async fn delete_user_skill(
    Path(user_skill_id): Path<i32>,
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(user): Extension<JWTAuthMiddeware>,
) -> Result<impl IntoResponse, HttpError> {
    owned_user_skill(&app_state, user_skill_id, user.user.id).await?;

    let deleted = app_state.db_client
        .delete_user_skill(user_skill_id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    if !deleted {
        return Err(HttpError::not_found(format!("User skill {} not found", user_skill_id)));
    }

    tracing::info!(user_skill_id, user_id = user.user.id, "User skill removed");

    Ok(StatusCode::NO_CONTENT)
}
