//! User administration routes.
//!
//! All endpoints here are admin only; roles changed through this surface take
//! effect on the next decision, since decisions always re-read the registry.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, get, patch, post},
};
use serde::Deserialize;
use tracing::{error, info};

use crate::routes::{error_response, require_admin};
use crate::{AppState, middleware::AuthUser};
use procura_db::UserRepository;
use procura_db::entities::sea_orm_active_enums::UserRole;
use procura_db::repositories::user::{CreateUserInput, UserError};
use procura_shared::types::UserId;

/// POST /users request body.
#[derive(Debug, Deserialize)]
pub struct CreateUserRequest {
    pub display_name: String,
    pub email: String,
    pub role: UserRole,
}

/// PATCH `/users/{id}/role` request body.
#[derive(Debug, Deserialize)]
pub struct SetRoleRequest {
    pub role: UserRole,
}

/// PATCH `/users/{id}/active` request body.
#[derive(Debug, Deserialize)]
pub struct SetActiveRequest {
    pub is_active: bool,
}

/// Creates the users router (requires auth middleware to be applied externally).
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/users", post(create_user))
        .route("/users", get(list_users))
        .route("/users/{id}", get(get_user))
        .route("/users/{id}", delete(delete_user))
        .route("/users/{id}/role", patch(set_role))
        .route("/users/{id}/active", patch(set_active))
}

fn user_error(e: &UserError) -> axum::response::Response {
    match e {
        UserError::NotFound(_) => {
            error_response(StatusCode::NOT_FOUND, "USER_NOT_FOUND", &e.to_string())
        }
        UserError::Inactive(_) => {
            error_response(StatusCode::FORBIDDEN, "USER_INACTIVE", &e.to_string())
        }
        UserError::Validation(_) => {
            error_response(StatusCode::BAD_REQUEST, "VALIDATION_ERROR", &e.to_string())
        }
        UserError::Referenced(_) => {
            error_response(StatusCode::CONFLICT, "USER_REFERENCED", &e.to_string())
        }
        UserError::Database(db) => {
            error!(error = %db, "database error");
            error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                "DATABASE_ERROR",
                "An error occurred",
            )
        }
    }
}

/// POST /users - Register a user.
async fn create_user(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(payload): Json<CreateUserRequest>,
) -> impl IntoResponse {
    if let Err(resp) = require_admin(&state, auth.user_id()).await {
        return resp;
    }

    let repo = UserRepository::new((*state.db).clone());
    match repo
        .create(CreateUserInput {
            display_name: payload.display_name,
            email: payload.email,
            role: payload.role,
        })
        .await
    {
        Ok(user) => {
            info!(user_id = %user.id, "user created");
            (StatusCode::CREATED, Json(user)).into_response()
        }
        Err(e) => user_error(&e),
    }
}

/// GET /users - List users.
async fn list_users(State(state): State<AppState>, auth: AuthUser) -> impl IntoResponse {
    if let Err(resp) = require_admin(&state, auth.user_id()).await {
        return resp;
    }

    let repo = UserRepository::new((*state.db).clone());
    match repo.list().await {
        Ok(users) => Json(users).into_response(),
        Err(e) => user_error(&e),
    }
}

/// GET `/users/{id}` - Get one user.
async fn get_user(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(UserId(id)): Path<UserId>,
) -> impl IntoResponse {
    if let Err(resp) = require_admin(&state, auth.user_id()).await {
        return resp;
    }

    let repo = UserRepository::new((*state.db).clone());
    match repo.get(id).await {
        Ok(user) => Json(user).into_response(),
        Err(e) => user_error(&e),
    }
}

/// DELETE `/users/{id}` - Remove a user from the registry.
///
/// Refused with a conflict while any document still names the user;
/// deactivation is the way to revoke access without touching history.
async fn delete_user(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(UserId(id)): Path<UserId>,
) -> impl IntoResponse {
    if let Err(resp) = require_admin(&state, auth.user_id()).await {
        return resp;
    }

    let repo = UserRepository::new((*state.db).clone());
    match repo.delete(id).await {
        Ok(()) => {
            info!(user_id = %id, "user deleted");
            StatusCode::NO_CONTENT.into_response()
        }
        Err(e) => user_error(&e),
    }
}

/// PATCH `/users/{id}/role` - Change a user's role.
async fn set_role(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(UserId(id)): Path<UserId>,
    Json(payload): Json<SetRoleRequest>,
) -> impl IntoResponse {
    if let Err(resp) = require_admin(&state, auth.user_id()).await {
        return resp;
    }

    let repo = UserRepository::new((*state.db).clone());
    match repo.set_role(id, payload.role).await {
        Ok(user) => {
            info!(user_id = %user.id, role = ?user.role, "user role changed");
            Json(user).into_response()
        }
        Err(e) => user_error(&e),
    }
}

/// PATCH `/users/{id}/active` - Activate or deactivate a user.
async fn set_active(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(UserId(id)): Path<UserId>,
    Json(payload): Json<SetActiveRequest>,
) -> impl IntoResponse {
    if let Err(resp) = require_admin(&state, auth.user_id()).await {
        return resp;
    }

    let repo = UserRepository::new((*state.db).clone());
    match repo.set_active(id, payload.is_active).await {
        Ok(user) => Json(user).into_response(),
        Err(e) => user_error(&e),
    }
}

#[cfg(test)]
mod tests {
    use axum::body::Body;
    use axum::http::{Method, Request, StatusCode};
    use sea_orm::DatabaseConnection;
    use std::sync::Arc;
    use tower::ServiceExt;
    use uuid::Uuid;

    use crate::AppState;
    use procura_shared::config::NotifyConfig;
    use procura_shared::{JwtConfig, JwtService, LineNotifyService};

    fn test_state() -> AppState {
        AppState {
            db: Arc::new(DatabaseConnection::Disconnected),
            jwt_service: Arc::new(JwtService::new(&JwtConfig {
                secret: "test-secret".to_string(),
            })),
            notifier: Arc::new(LineNotifyService::new(NotifyConfig::default())),
        }
    }

    #[tokio::test]
    async fn test_single_user_routes_registered_behind_auth() {
        // An unregistered path would 404; both stop at the auth gate instead.
        let id = Uuid::new_v4();
        for method in [Method::GET, Method::DELETE] {
            let app = crate::create_router(test_state());
            let response = app
                .oneshot(
                    Request::builder()
                        .method(method)
                        .uri(format!("/api/v1/users/{id}"))
                        .body(Body::empty())
                        .unwrap(),
                )
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        }
    }
}
