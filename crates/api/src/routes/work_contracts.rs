//! Work contract routes.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, get, post, put},
};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::Value;
use tracing::info;
use uuid::Uuid;

use crate::routes::{actor_role, document_error, require_author, stored_line_token};
use crate::{AppState, middleware::AuthUser};
use procura_core::costing::LineItem;
use procura_core::lifecycle::DocumentStatus;
use procura_db::entities::sea_orm_active_enums::DocumentScope;
use procura_db::entities::work_contracts;
use procura_db::repositories::DocumentFilter;
use procura_db::repositories::work_contract::WorkContractInput;
use procura_db::{ProjectRepository, VendorRepository, WorkContractRepository};
use procura_shared::notify::{NotifyKind, NotifyPayload};
use procura_shared::types::{PageRequest, PageResponse, WorkContractId};

/// Work contract create/update request body.
#[derive(Debug, Deserialize)]
pub struct WorkContractRequest {
    pub wc_number: String,
    pub project_id: Uuid,
    #[serde(default)]
    pub vendor_id: Option<Uuid>,
    #[serde(default = "default_scope")]
    pub scope: DocumentScope,
    #[serde(default)]
    pub items: Vec<LineItem>,
    #[serde(default)]
    pub vat_rate: Option<Decimal>,
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
    #[serde(default)]
    pub payment_terms: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub signature_url: Option<String>,
    /// Submit for approval instead of saving as a draft.
    #[serde(default)]
    pub submit: bool,
}

fn default_scope() -> DocumentScope {
    DocumentScope::Project
}

impl WorkContractRequest {
    fn into_input(self) -> (WorkContractInput, bool) {
        let submit = self.submit;
        (
            WorkContractInput {
                wc_number: self.wc_number,
                project_id: self.project_id,
                vendor_id: self.vendor_id,
                scope: self.scope,
                items: self.items,
                vat_rate: self.vat_rate,
                start_date: self.start_date,
                end_date: self.end_date,
                payment_terms: self.payment_terms,
                notes: self.notes,
                signature_url: self.signature_url,
            },
            submit,
        )
    }
}

/// POST `/work-contracts/{id}/reject` request body.
#[derive(Debug, Default, Deserialize)]
pub struct RejectRequest {
    #[serde(default)]
    pub reason: Option<String>,
}

/// GET /work-contracts query parameters.
#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    pub project_id: Option<Uuid>,
    pub status: Option<DocumentStatus>,
    pub page: Option<u32>,
    pub per_page: Option<u32>,
}

impl ListQuery {
    fn filter(&self) -> DocumentFilter {
        DocumentFilter {
            project_id: self.project_id,
            status: self.status,
        }
    }

    fn page_request(&self) -> PageRequest {
        let defaults = PageRequest::default();
        PageRequest {
            page: self.page.unwrap_or(defaults.page),
            per_page: self.per_page.unwrap_or(defaults.per_page),
        }
    }
}

/// Creates the work contracts router (requires auth middleware to be applied externally).
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/work-contracts", post(create))
        .route("/work-contracts", get(list))
        .route("/work-contracts/{id}", get(get_one))
        .route("/work-contracts/{id}", put(update))
        .route("/work-contracts/{id}", delete(delete_one))
        .route("/work-contracts/{id}/submit", post(submit))
        .route("/work-contracts/{id}/approve", post(approve))
        .route("/work-contracts/{id}/reject", post(reject))
}

/// POST /work-contracts - Create a work contract.
async fn create(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(payload): Json<WorkContractRequest>,
) -> impl IntoResponse {
    if let Err(resp) = require_author(&state, auth.user_id()).await {
        return resp;
    }

    let (input, submit) = payload.into_input();
    let repo = WorkContractRepository::new((*state.db).clone());
    match repo.create(input, auth.user_id(), submit).await {
        Ok(wc) => {
            info!(wc_id = %wc.id, wc_number = %wc.wc_number, submitted = submit, "work contract created");
            (StatusCode::CREATED, Json(wc)).into_response()
        }
        Err(e) => document_error(&e),
    }
}

/// GET /work-contracts - List work contracts.
async fn list(
    State(state): State<AppState>,
    _auth: AuthUser,
    Query(query): Query<ListQuery>,
) -> impl IntoResponse {
    let page = query.page_request();
    let repo = WorkContractRepository::new((*state.db).clone());
    match repo.list(query.filter(), &page).await {
        Ok((data, total)) => {
            Json(PageResponse::new(data, page.page, page.per_page, total)).into_response()
        }
        Err(e) => document_error(&e),
    }
}

/// GET `/work-contracts/{id}` - Get one work contract.
async fn get_one(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(WorkContractId(id)): Path<WorkContractId>,
) -> impl IntoResponse {
    let repo = WorkContractRepository::new((*state.db).clone());
    match repo.get(id).await {
        Ok(wc) => Json(wc).into_response(),
        Err(e) => document_error(&e),
    }
}

/// PUT `/work-contracts/{id}` - Edit a draft or rejected work contract.
async fn update(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(WorkContractId(id)): Path<WorkContractId>,
    Json(payload): Json<WorkContractRequest>,
) -> impl IntoResponse {
    if let Err(resp) = require_author(&state, auth.user_id()).await {
        return resp;
    }

    let (input, submit) = payload.into_input();
    let repo = WorkContractRepository::new((*state.db).clone());
    match repo.update(id, input, auth.user_id(), submit).await {
        Ok(wc) => Json(wc).into_response(),
        Err(e) => document_error(&e),
    }
}

/// DELETE `/work-contracts/{id}` - Delete a draft or rejected work contract.
async fn delete_one(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(WorkContractId(id)): Path<WorkContractId>,
) -> impl IntoResponse {
    if let Err(resp) = require_author(&state, auth.user_id()).await {
        return resp;
    }

    let repo = WorkContractRepository::new((*state.db).clone());
    match repo.delete(id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => document_error(&e),
    }
}

/// POST `/work-contracts/{id}/submit` - Submit for approval.
async fn submit(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(WorkContractId(id)): Path<WorkContractId>,
) -> impl IntoResponse {
    if let Err(resp) = require_author(&state, auth.user_id()).await {
        return resp;
    }

    let repo = WorkContractRepository::new((*state.db).clone());
    match repo.submit(id, auth.user_id()).await {
        Ok(wc) => {
            info!(wc_id = %wc.id, "work contract submitted");
            Json(wc).into_response()
        }
        Err(e) => document_error(&e),
    }
}

/// POST `/work-contracts/{id}/approve` - Approve a pending work contract.
async fn approve(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(WorkContractId(id)): Path<WorkContractId>,
) -> impl IntoResponse {
    let role = match actor_role(&state, auth.user_id()).await {
        Ok(role) => role,
        Err(resp) => return resp,
    };

    let repo = WorkContractRepository::new((*state.db).clone());
    match repo.approve(id, auth.user_id(), role).await {
        Ok(wc) => {
            info!(wc_id = %wc.id, approver = %auth.user_id(), "work contract approved");
            notify_approval(&state, &wc).await;
            Json(wc).into_response()
        }
        Err(e) => document_error(&e),
    }
}

/// POST `/work-contracts/{id}/reject` - Reject a pending work contract.
async fn reject(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(WorkContractId(id)): Path<WorkContractId>,
    Json(payload): Json<RejectRequest>,
) -> impl IntoResponse {
    let role = match actor_role(&state, auth.user_id()).await {
        Ok(role) => role,
        Err(resp) => return resp,
    };

    let repo = WorkContractRepository::new((*state.db).clone());
    match repo.reject(id, auth.user_id(), role, payload.reason).await {
        Ok(wc) => {
            info!(wc_id = %wc.id, "work contract rejected");
            Json(wc).into_response()
        }
        Err(e) => document_error(&e),
    }
}

async fn notify_approval(state: &AppState, wc: &work_contracts::Model) {
    if !state.notifier.is_enabled() {
        return;
    }

    let project_name = ProjectRepository::new((*state.db).clone())
        .get(wc.project_id)
        .await
        .map(|p| p.name)
        .unwrap_or_default();
    let vendor_data = match wc.vendor_id {
        Some(vendor_id) => VendorRepository::new((*state.db).clone())
            .get(vendor_id)
            .await
            .ok()
            .map(|v| serde_json::to_value(&v).unwrap_or(Value::Null)),
        None => None,
    };

    state.notifier.send_detached(
        NotifyPayload {
            kind: NotifyKind::WorkContract,
            data: serde_json::to_value(wc).unwrap_or(Value::Null),
            vendor_data,
            project_name,
        },
        stored_line_token(state).await,
    );
}
