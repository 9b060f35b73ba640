//! Purchase order routes.

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
use procura_core::costing::LineItem;
use procura_core::lifecycle::DocumentStatus;
use procura_db::entities::sea_orm_active_enums::DocumentScope;
use procura_db::entities::{purchase_orders, vendors};
use procura_db::repositories::DocumentFilter;
use procura_db::repositories::purchase_order::PurchaseOrderInput;
use procura_db::{ProjectRepository, PurchaseOrderRepository, VendorRepository};
use procura_shared::notify::{NotifyKind, NotifyPayload};
use procura_shared::types::{PageRequest, PageResponse, PurchaseOrderId};

/// Purchase order create/update request body.
///
/// `items` may arrive with missing or non-numeric quantities and prices;
/// those coerce to zero and the amounts are recomputed server side.
#[derive(Debug, Deserialize)]
pub struct PurchaseOrderRequest {
    pub po_number: String,
    pub project_id: Uuid,
    #[serde(default)]
    pub vendor_id: Option<Uuid>,
    #[serde(default = "default_scope")]
    pub scope: DocumentScope,
    #[serde(default)]
    pub items: Vec<LineItem>,
    #[serde(default)]
    pub vat_rate: Option<Decimal>,
    /// Submit for approval instead of saving as a draft.
    #[serde(default)]
    pub submit: bool,
}

fn default_scope() -> DocumentScope {
    DocumentScope::Project
}

impl PurchaseOrderRequest {
    fn into_input(self) -> (PurchaseOrderInput, bool) {
        let submit = self.submit;
        (
            PurchaseOrderInput {
                po_number: self.po_number,
                project_id: self.project_id,
                vendor_id: self.vendor_id,
                scope: self.scope,
                items: self.items,
                vat_rate: self.vat_rate,
            },
            submit,
        )
    }
}

/// POST `/purchase-orders/{id}/reject` request body.
#[derive(Debug, Default, Deserialize)]
pub struct RejectRequest {
    #[serde(default)]
    pub reason: Option<String>,
}

/// GET /purchase-orders query parameters.
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

/// Creates the purchase orders router (requires auth middleware to be applied externally).
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/purchase-orders", post(create))
        .route("/purchase-orders", get(list))
        .route("/purchase-orders/{id}", get(get_one))
        .route("/purchase-orders/{id}", put(update))
        .route("/purchase-orders/{id}", delete(delete_one))
        .route("/purchase-orders/{id}/submit", post(submit))
        .route("/purchase-orders/{id}/approve", post(approve))
        .route("/purchase-orders/{id}/reject", post(reject))
}

/// POST /purchase-orders - Create a purchase order.
async fn create(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(payload): Json<PurchaseOrderRequest>,
) -> impl IntoResponse {
    if let Err(resp) = require_author(&state, auth.user_id()).await {
        return resp;
    }

    let (input, submit) = payload.into_input();
    let repo = PurchaseOrderRepository::new((*state.db).clone());
    match repo.create(input, auth.user_id(), submit).await {
        Ok(po) => {
            info!(po_id = %po.id, po_number = %po.po_number, submitted = submit, "purchase order created");
            (StatusCode::CREATED, Json(po)).into_response()
        }
        Err(e) => document_error(&e),
    }
}

/// GET /purchase-orders - List purchase orders.
async fn list(
    State(state): State<AppState>,
    _auth: AuthUser,
    Query(query): Query<ListQuery>,
) -> impl IntoResponse {
    let page = query.page_request();
    let repo = PurchaseOrderRepository::new((*state.db).clone());
    match repo.list(query.filter(), &page).await {
        Ok((data, total)) => {
            Json(PageResponse::new(data, page.page, page.per_page, total)).into_response()
        }
        Err(e) => document_error(&e),
    }
}

/// GET `/purchase-orders/{id}` - Get one purchase order.
async fn get_one(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(PurchaseOrderId(id)): Path<PurchaseOrderId>,
) -> impl IntoResponse {
    let repo = PurchaseOrderRepository::new((*state.db).clone());
    match repo.get(id).await {
        Ok(po) => Json(po).into_response(),
        Err(e) => document_error(&e),
    }
}

/// PUT `/purchase-orders/{id}` - Edit a draft or rejected purchase order.
async fn update(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(PurchaseOrderId(id)): Path<PurchaseOrderId>,
    Json(payload): Json<PurchaseOrderRequest>,
) -> impl IntoResponse {
    if let Err(resp) = require_author(&state, auth.user_id()).await {
        return resp;
    }

    let (input, submit) = payload.into_input();
    let repo = PurchaseOrderRepository::new((*state.db).clone());
    match repo.update(id, input, auth.user_id(), submit).await {
        Ok(po) => Json(po).into_response(),
        Err(e) => document_error(&e),
    }
}

/// DELETE `/purchase-orders/{id}` - Delete a draft or rejected purchase order.
async fn delete_one(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(PurchaseOrderId(id)): Path<PurchaseOrderId>,
) -> impl IntoResponse {
    if let Err(resp) = require_author(&state, auth.user_id()).await {
        return resp;
    }

    let repo = PurchaseOrderRepository::new((*state.db).clone());
    match repo.delete(id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => document_error(&e),
    }
}

/// POST `/purchase-orders/{id}/submit` - Submit for approval.
async fn submit(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(PurchaseOrderId(id)): Path<PurchaseOrderId>,
) -> impl IntoResponse {
    if let Err(resp) = require_author(&state, auth.user_id()).await {
        return resp;
    }

    let repo = PurchaseOrderRepository::new((*state.db).clone());
    match repo.submit(id, auth.user_id()).await {
        Ok(po) => {
            info!(po_id = %po.id, "purchase order submitted");
            Json(po).into_response()
        }
        Err(e) => document_error(&e),
    }
}

/// POST `/purchase-orders/{id}/approve` - Approve a pending purchase order.
///
/// The actor's role comes from the users table, never from the token. On
/// success a LINE notification is fired after the approval is persisted;
/// delivery failure never reverses the approval.
async fn approve(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(PurchaseOrderId(id)): Path<PurchaseOrderId>,
) -> impl IntoResponse {
    let role = match actor_role(&state, auth.user_id()).await {
        Ok(role) => role,
        Err(resp) => return resp,
    };

    let repo = PurchaseOrderRepository::new((*state.db).clone());
    match repo.approve(id, auth.user_id(), role).await {
        Ok(po) => {
            info!(po_id = %po.id, approver = %auth.user_id(), "purchase order approved");
            notify_approval(&state, &po).await;
            Json(po).into_response()
        }
        Err(e) => document_error(&e),
    }
}

/// POST `/purchase-orders/{id}/reject` - Reject a pending purchase order.
async fn reject(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(PurchaseOrderId(id)): Path<PurchaseOrderId>,
    Json(payload): Json<RejectRequest>,
) -> impl IntoResponse {
    let role = match actor_role(&state, auth.user_id()).await {
        Ok(role) => role,
        Err(resp) => return resp,
    };

    let repo = PurchaseOrderRepository::new((*state.db).clone());
    match repo.reject(id, auth.user_id(), role, payload.reason).await {
        Ok(po) => {
            info!(po_id = %po.id, "purchase order rejected");
            Json(po).into_response()
        }
        Err(e) => document_error(&e),
    }
}

async fn notify_approval(state: &AppState, po: &purchase_orders::Model) {
    if !state.notifier.is_enabled() {
        return;
    }

    let project_name = ProjectRepository::new((*state.db).clone())
        .get(po.project_id)
        .await
        .map(|p| p.name)
        .unwrap_or_default();
    let vendor_data = match po.vendor_id {
        Some(vendor_id) => VendorRepository::new((*state.db).clone())
            .get(vendor_id)
            .await
            .ok()
            .map(vendor_snapshot),
        None => None,
    };

    state.notifier.send_detached(
        NotifyPayload {
            kind: NotifyKind::PurchaseOrder,
            data: serde_json::to_value(po).unwrap_or(Value::Null),
            vendor_data,
            project_name,
        },
        stored_line_token(state).await,
    );
}

fn vendor_snapshot(vendor: vendors::Model) -> Value {
    serde_json::to_value(&vendor).unwrap_or(Value::Null)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use rust_decimal_macros::dec;

    #[rstest]
    #[case(None, None, 1, 20)]
    #[case(Some(3), Some(50), 3, 50)]
    #[case(Some(2), None, 2, 20)]
    fn test_list_query_page_defaults(
        #[case] page: Option<u32>,
        #[case] per_page: Option<u32>,
        #[case] expected_page: u32,
        #[case] expected_per_page: u32,
    ) {
        let query = ListQuery {
            page,
            per_page,
            ..ListQuery::default()
        };
        let req = query.page_request();
        assert_eq!(req.page, expected_page);
        assert_eq!(req.per_page, expected_per_page);
    }

    #[test]
    fn test_request_coerces_non_numeric_item_fields() {
        // Free-text quantity lands as zero; numeric strings parse.
        let json = serde_json::json!({
            "po_number": "PO-0001",
            "project_id": Uuid::nil(),
            "items": [{
                "id": Uuid::nil(),
                "description": "steel",
                "quantity": "approx. two",
                "unit": "ea",
                "unit_price": "150.50"
            }]
        });
        let request: PurchaseOrderRequest = serde_json::from_value(json).unwrap();
        assert_eq!(request.items[0].quantity, Decimal::ZERO);
        assert_eq!(request.items[0].unit_price, dec!(150.50));
        assert!(!request.submit);
    }

    #[test]
    fn test_status_filter_parses_lowercase() {
        let query: ListQuery =
            serde_json::from_value(serde_json::json!({ "status": "approved" })).unwrap();
        assert_eq!(query.status, Some(DocumentStatus::Approved));
    }
}
