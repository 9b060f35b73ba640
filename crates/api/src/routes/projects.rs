//! Project routes, including the live budget view.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, patch, post},
};
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::json;
use tracing::{error, info};

use crate::routes::{error_response, require_admin};
use crate::{AppState, middleware::AuthUser};
use procura_db::repositories::project::{CreateProjectInput, ProjectError};
use procura_db::repositories::reconciliation::ReconciliationError;
use procura_db::{ProjectRepository, ReconciliationRepository};
use procura_db::entities::sea_orm_active_enums::ProjectStatus;
use procura_shared::types::{PageRequest, PageResponse, ProjectId};

/// POST /projects request body.
#[derive(Debug, Deserialize)]
pub struct CreateProjectRequest {
    pub name: String,
    #[serde(default)]
    pub code: String,
    pub budget: Decimal,
}

/// PATCH `/projects/{id}/status` request body.
#[derive(Debug, Deserialize)]
pub struct UpdateProjectStatusRequest {
    pub status: ProjectStatus,
}

/// GET /projects query parameters.
#[derive(Debug, Default, Deserialize)]
pub struct ListProjectsQuery {
    pub status: Option<ProjectStatus>,
    pub page: Option<u32>,
    pub per_page: Option<u32>,
}

impl ListProjectsQuery {
    fn page_request(&self) -> PageRequest {
        let defaults = PageRequest::default();
        PageRequest {
            page: self.page.unwrap_or(defaults.page),
            per_page: self.per_page.unwrap_or(defaults.per_page),
        }
    }
}

/// Creates the projects router (requires auth middleware to be applied externally).
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/projects", post(create_project))
        .route("/projects", get(list_projects))
        .route("/projects/{id}", get(get_project))
        .route("/projects/{id}/status", patch(update_status))
        .route("/projects/{id}/budget", get(get_budget))
}

fn project_error(e: &ProjectError) -> axum::response::Response {
    match e {
        ProjectError::NotFound(_) => {
            error_response(StatusCode::NOT_FOUND, "PROJECT_NOT_FOUND", &e.to_string())
        }
        ProjectError::Validation(_) => {
            error_response(StatusCode::BAD_REQUEST, "VALIDATION_ERROR", &e.to_string())
        }
        ProjectError::Database(db) => {
            error!(error = %db, "database error");
            error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                "DATABASE_ERROR",
                "An error occurred",
            )
        }
    }
}

/// POST /projects - Create a project (admin only).
async fn create_project(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(payload): Json<CreateProjectRequest>,
) -> impl IntoResponse {
    if let Err(resp) = require_admin(&state, auth.user_id()).await {
        return resp;
    }

    let repo = ProjectRepository::new((*state.db).clone());
    match repo
        .create(CreateProjectInput {
            name: payload.name,
            code: payload.code,
            budget: payload.budget,
        })
        .await
    {
        Ok(project) => {
            info!(project_id = %project.id, "project created");
            (StatusCode::CREATED, Json(project)).into_response()
        }
        Err(e) => project_error(&e),
    }
}

/// GET /projects - List projects.
async fn list_projects(
    State(state): State<AppState>,
    _auth: AuthUser,
    Query(query): Query<ListProjectsQuery>,
) -> impl IntoResponse {
    let page = query.page_request();
    let repo = ProjectRepository::new((*state.db).clone());
    match repo.list(query.status, &page).await {
        Ok((data, total)) => {
            Json(PageResponse::new(data, page.page, page.per_page, total)).into_response()
        }
        Err(e) => project_error(&e),
    }
}

/// GET `/projects/{id}` - Get one project.
async fn get_project(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(ProjectId(id)): Path<ProjectId>,
) -> impl IntoResponse {
    let repo = ProjectRepository::new((*state.db).clone());
    match repo.get(id).await {
        Ok(project) => Json(project).into_response(),
        Err(e) => project_error(&e),
    }
}

/// PATCH `/projects/{id}/status` - Change a project's status (admin only).
async fn update_status(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(ProjectId(id)): Path<ProjectId>,
    Json(payload): Json<UpdateProjectStatusRequest>,
) -> impl IntoResponse {
    if let Err(resp) = require_admin(&state, auth.user_id()).await {
        return resp;
    }

    let repo = ProjectRepository::new((*state.db).clone());
    match repo.set_status(id, payload.status).await {
        Ok(project) => Json(project).into_response(),
        Err(e) => project_error(&e),
    }
}

/// GET `/projects/{id}/budget` - Reconciled budget figures for one project.
///
/// Nothing here is stored; the figures are re-derived from the approved
/// document snapshot on every call.
async fn get_budget(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(ProjectId(id)): Path<ProjectId>,
) -> impl IntoResponse {
    let repo = ReconciliationRepository::new((*state.db).clone());
    match repo.project_budget(id).await {
        Ok(summary) => Json(json!({
            "projectId": id,
            "summary": summary,
        }))
        .into_response(),
        Err(ReconciliationError::ProjectNotFound(_)) => error_response(
            StatusCode::NOT_FOUND,
            "PROJECT_NOT_FOUND",
            "Project not found",
        ),
        Err(ReconciliationError::Database(db)) => {
            error!(error = %db, "database error");
            error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                "DATABASE_ERROR",
                "An error occurred",
            )
        }
    }
}
