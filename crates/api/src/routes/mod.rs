//! API route definitions.

use axum::{
    Json, Router,
    http::StatusCode,
    middleware,
    response::{IntoResponse, Response},
};
use serde_json::json;
use tracing::error;
use uuid::Uuid;

use crate::{AppState, middleware::auth::auth_middleware};
use procura_core::lifecycle::Role;
use procura_db::{SettingsRepository, UserRepository};
use procura_db::repositories::DocumentError;
use procura_db::repositories::user::UserError;
use procura_shared::AppError;

pub mod health;
pub mod projects;
pub mod purchase_orders;
pub mod reports;
pub mod settings;
pub mod users;
pub mod variation_orders;
pub mod vendors;
pub mod work_contracts;

/// Creates the API router with protected routes that need state for middleware.
#[allow(clippy::needless_pass_by_value)]
pub fn api_routes_with_state(state: AppState) -> Router<AppState> {
    // Protected routes that require authentication
    let protected_routes = Router::new()
        .merge(projects::routes())
        .merge(vendors::routes())
        .merge(users::routes())
        .merge(settings::routes())
        .merge(purchase_orders::routes())
        .merge(work_contracts::routes())
        .merge(variation_orders::routes())
        .merge(reports::routes())
        .layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    Router::new().merge(health::routes()).merge(protected_routes)
}

/// Builds an error response body in the shared shape.
pub(crate) fn error_response(status: StatusCode, code: &str, message: &str) -> Response {
    (status, Json(json!({ "error": code, "message": message }))).into_response()
}

/// Maps an application error onto an HTTP response.
pub(crate) fn app_error(e: &AppError) -> Response {
    let status =
        StatusCode::from_u16(e.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    error_response(status, e.error_code(), &e.to_string())
}

/// Maps a document repository error onto an HTTP response.
pub(crate) fn document_error(e: &DocumentError) -> Response {
    if let DocumentError::Database(db) = e {
        error!(error = %db, "database error");
    }
    let status =
        StatusCode::from_u16(e.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    error_response(status, e.error_code(), &e.to_string())
}

/// Resolves the actor's effective role from the users table.
///
/// The token's role claim is advisory; a decision is authorized only by the
/// server-side registry, and unknown or deactivated users are denied.
pub(crate) async fn actor_role(state: &AppState, user_id: Uuid) -> Result<Role, Response> {
    let users = UserRepository::new((*state.db).clone());
    match users.effective_role(user_id).await {
        Ok(role) => Ok(role.into()),
        Err(UserError::NotFound(_) | UserError::Inactive(_)) => Err(app_error(
            &AppError::Forbidden("no active user record for this account".into()),
        )),
        Err(e) => {
            error!(error = %e, "failed to resolve actor role");
            Err(app_error(&AppError::Internal(
                "failed to resolve actor role".into(),
            )))
        }
    }
}

/// Guard for administration endpoints.
pub(crate) async fn require_admin(state: &AppState, user_id: Uuid) -> Result<(), Response> {
    let role = actor_role(state, user_id).await?;
    if role.is_admin() {
        Ok(())
    } else {
        Err(app_error(&AppError::Forbidden(
            "administrator access required".into(),
        )))
    }
}

/// Admin-managed LINE credential from the settings singleton.
///
/// The notifier prefers this over the static config token, so a token saved
/// through the settings API takes effect on the next approval.
pub(crate) async fn stored_line_token(state: &AppState) -> Option<String> {
    SettingsRepository::new((*state.db).clone())
        .get()
        .await
        .ok()
        .and_then(|settings| settings.line_token)
}

/// Guard for document authoring endpoints. Viewers are read only.
pub(crate) async fn require_author(state: &AppState, user_id: Uuid) -> Result<(), Response> {
    let role = actor_role(state, user_id).await?;
    if role.can_author() {
        Ok(())
    } else {
        Err(app_error(&AppError::Forbidden(
            "authoring access required".into(),
        )))
    }
}
