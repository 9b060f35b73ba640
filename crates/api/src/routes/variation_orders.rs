//! Variation order routes.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, get, post, put},
};
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::Value;
use tracing::info;
use uuid::Uuid;

use crate::routes::{actor_role, document_error, require_author, stored_line_token};
use crate::{AppState, middleware::AuthUser};
use procura_core::costing::VariationItem;
use procura_core::lifecycle::DocumentStatus;
use procura_db::entities::variation_orders;
use procura_db::repositories::DocumentFilter;
use procura_db::repositories::variation_order::VariationOrderInput;
use procura_db::{ProjectRepository, VariationOrderRepository};
use procura_shared::notify::{NotifyKind, NotifyPayload};
use procura_shared::types::{PageRequest, PageResponse, VariationOrderId};

/// Variation order create/update request body.
///
/// Each item carries a `type` of `add` or `omit`; omissions subtract from the
/// subtotal, and the document may total negative.
#[derive(Debug, Deserialize)]
pub struct VariationOrderRequest {
    pub vo_number: String,
    pub project_id: Uuid,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub reason: Option<String>,
    #[serde(default)]
    pub items: Vec<VariationItem>,
    #[serde(default)]
    pub vat_rate: Option<Decimal>,
    /// Submit for approval instead of saving as a draft.
    #[serde(default)]
    pub submit: bool,
}

impl VariationOrderRequest {
    fn into_input(self) -> (VariationOrderInput, bool) {
        let submit = self.submit;
        (
            VariationOrderInput {
                vo_number: self.vo_number,
                project_id: self.project_id,
                title: self.title,
                reason: self.reason,
                items: self.items,
                vat_rate: self.vat_rate,
            },
            submit,
        )
    }
}

/// POST `/variation-orders/{id}/reject` request body.
#[derive(Debug, Default, Deserialize)]
pub struct RejectRequest {
    #[serde(default)]
    pub reason: Option<String>,
}

/// GET /variation-orders query parameters.
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

/// Creates the variation orders router (requires auth middleware to be applied externally).
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/variation-orders", post(create))
        .route("/variation-orders", get(list))
        .route("/variation-orders/{id}", get(get_one))
        .route("/variation-orders/{id}", put(update))
        .route("/variation-orders/{id}", delete(delete_one))
        .route("/variation-orders/{id}/submit", post(submit))
        .route("/variation-orders/{id}/approve", post(approve))
        .route("/variation-orders/{id}/reject", post(reject))
}

/// POST /variation-orders - Create a variation order.
async fn create(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(payload): Json<VariationOrderRequest>,
) -> impl IntoResponse {
    if let Err(resp) = require_author(&state, auth.user_id()).await {
        return resp;
    }

    let (input, submit) = payload.into_input();
    let repo = VariationOrderRepository::new((*state.db).clone());
    match repo.create(input, auth.user_id(), submit).await {
        Ok(vo) => {
            info!(vo_id = %vo.id, vo_number = %vo.vo_number, submitted = submit, "variation order created");
            (StatusCode::CREATED, Json(vo)).into_response()
        }
        Err(e) => document_error(&e),
    }
}

/// GET /variation-orders - List variation orders.
async fn list(
    State(state): State<AppState>,
    _auth: AuthUser,
    Query(query): Query<ListQuery>,
) -> impl IntoResponse {
    let page = query.page_request();
    let repo = VariationOrderRepository::new((*state.db).clone());
    match repo.list(query.filter(), &page).await {
        Ok((data, total)) => {
            Json(PageResponse::new(data, page.page, page.per_page, total)).into_response()
        }
        Err(e) => document_error(&e),
    }
}

/// GET `/variation-orders/{id}` - Get one variation order.
async fn get_one(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(VariationOrderId(id)): Path<VariationOrderId>,
) -> impl IntoResponse {
    let repo = VariationOrderRepository::new((*state.db).clone());
    match repo.get(id).await {
        Ok(vo) => Json(vo).into_response(),
        Err(e) => document_error(&e),
    }
}

/// PUT `/variation-orders/{id}` - Edit a draft or rejected variation order.
async fn update(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(VariationOrderId(id)): Path<VariationOrderId>,
    Json(payload): Json<VariationOrderRequest>,
) -> impl IntoResponse {
    if let Err(resp) = require_author(&state, auth.user_id()).await {
        return resp;
    }

    let (input, submit) = payload.into_input();
    let repo = VariationOrderRepository::new((*state.db).clone());
    match repo.update(id, input, auth.user_id(), submit).await {
        Ok(vo) => Json(vo).into_response(),
        Err(e) => document_error(&e),
    }
}

/// DELETE `/variation-orders/{id}` - Delete a draft or rejected variation order.
async fn delete_one(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(VariationOrderId(id)): Path<VariationOrderId>,
) -> impl IntoResponse {
    if let Err(resp) = require_author(&state, auth.user_id()).await {
        return resp;
    }

    let repo = VariationOrderRepository::new((*state.db).clone());
    match repo.delete(id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => document_error(&e),
    }
}

/// POST `/variation-orders/{id}/submit` - Submit for approval.
async fn submit(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(VariationOrderId(id)): Path<VariationOrderId>,
) -> impl IntoResponse {
    if let Err(resp) = require_author(&state, auth.user_id()).await {
        return resp;
    }

    let repo = VariationOrderRepository::new((*state.db).clone());
    match repo.submit(id, auth.user_id()).await {
        Ok(vo) => {
            info!(vo_id = %vo.id, "variation order submitted");
            Json(vo).into_response()
        }
        Err(e) => document_error(&e),
    }
}

/// POST `/variation-orders/{id}/approve` - Approve a pending variation order.
///
/// From this moment the signed total adjusts the project's effective budget.
async fn approve(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(VariationOrderId(id)): Path<VariationOrderId>,
) -> impl IntoResponse {
    let role = match actor_role(&state, auth.user_id()).await {
        Ok(role) => role,
        Err(resp) => return resp,
    };

    let repo = VariationOrderRepository::new((*state.db).clone());
    match repo.approve(id, auth.user_id(), role).await {
        Ok(vo) => {
            info!(vo_id = %vo.id, approver = %auth.user_id(), "variation order approved");
            notify_approval(&state, &vo).await;
            Json(vo).into_response()
        }
        Err(e) => document_error(&e),
    }
}

/// POST `/variation-orders/{id}/reject` - Reject a pending variation order.
async fn reject(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(VariationOrderId(id)): Path<VariationOrderId>,
    Json(payload): Json<RejectRequest>,
) -> impl IntoResponse {
    let role = match actor_role(&state, auth.user_id()).await {
        Ok(role) => role,
        Err(resp) => return resp,
    };

    let repo = VariationOrderRepository::new((*state.db).clone());
    match repo.reject(id, auth.user_id(), role, payload.reason).await {
        Ok(vo) => {
            info!(vo_id = %vo.id, "variation order rejected");
            Json(vo).into_response()
        }
        Err(e) => document_error(&e),
    }
}

async fn notify_approval(state: &AppState, vo: &variation_orders::Model) {
    if !state.notifier.is_enabled() {
        return;
    }

    let project_name = ProjectRepository::new((*state.db).clone())
        .get(vo.project_id)
        .await
        .map(|p| p.name)
        .unwrap_or_default();

    state.notifier.send_detached(
        NotifyPayload {
            kind: NotifyKind::VariationOrder,
            data: serde_json::to_value(vo).unwrap_or(Value::Null),
            vendor_data: None,
            project_name,
        },
        stored_line_token(state).await,
    );
}
