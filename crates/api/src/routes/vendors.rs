//! Vendor registry routes.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, patch, post, put},
};
use serde::Deserialize;
use tracing::{error, info};

use crate::routes::{error_response, require_admin};
use crate::{AppState, middleware::AuthUser};
use procura_db::VendorRepository;
use procura_db::repositories::vendor::{VendorError, VendorInput};
use procura_shared::types::{PageRequest, PageResponse, VendorId};

/// Vendor create/update request body.
#[derive(Debug, Deserialize)]
pub struct VendorRequest {
    pub name: String,
    #[serde(default)]
    pub tax_id: Option<String>,
    #[serde(default)]
    pub contact_name: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub map_url: Option<String>,
    #[serde(default)]
    pub categories: Vec<String>,
}

impl From<VendorRequest> for VendorInput {
    fn from(r: VendorRequest) -> Self {
        Self {
            name: r.name,
            tax_id: r.tax_id,
            contact_name: r.contact_name,
            phone: r.phone,
            email: r.email,
            address: r.address,
            map_url: r.map_url,
            categories: r.categories,
        }
    }
}

/// PATCH `/vendors/{id}/active` request body.
#[derive(Debug, Deserialize)]
pub struct SetActiveRequest {
    pub is_active: bool,
}

/// GET /vendors query parameters.
#[derive(Debug, Default, Deserialize)]
pub struct ListVendorsQuery {
    #[serde(default)]
    pub active_only: bool,
    pub page: Option<u32>,
    pub per_page: Option<u32>,
}

/// Creates the vendors router (requires auth middleware to be applied externally).
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/vendors", post(create_vendor))
        .route("/vendors", get(list_vendors))
        .route("/vendors/{id}", get(get_vendor))
        .route("/vendors/{id}", put(update_vendor))
        .route("/vendors/{id}/active", patch(set_active))
}

fn vendor_error(e: &VendorError) -> axum::response::Response {
    match e {
        VendorError::NotFound(_) => {
            error_response(StatusCode::NOT_FOUND, "VENDOR_NOT_FOUND", &e.to_string())
        }
        VendorError::Validation(_) => {
            error_response(StatusCode::BAD_REQUEST, "VALIDATION_ERROR", &e.to_string())
        }
        VendorError::Database(db) => {
            error!(error = %db, "database error");
            error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                "DATABASE_ERROR",
                "An error occurred",
            )
        }
    }
}

/// POST /vendors - Register a vendor.
async fn create_vendor(
    State(state): State<AppState>,
    _auth: AuthUser,
    Json(payload): Json<VendorRequest>,
) -> impl IntoResponse {
    let repo = VendorRepository::new((*state.db).clone());
    match repo.create(payload.into()).await {
        Ok(vendor) => {
            info!(vendor_id = %vendor.id, "vendor created");
            (StatusCode::CREATED, Json(vendor)).into_response()
        }
        Err(e) => vendor_error(&e),
    }
}

/// GET /vendors - List vendors.
async fn list_vendors(
    State(state): State<AppState>,
    _auth: AuthUser,
    Query(query): Query<ListVendorsQuery>,
) -> impl IntoResponse {
    let defaults = PageRequest::default();
    let page = PageRequest {
        page: query.page.unwrap_or(defaults.page),
        per_page: query.per_page.unwrap_or(defaults.per_page),
    };
    let repo = VendorRepository::new((*state.db).clone());
    match repo.list(query.active_only, &page).await {
        Ok((data, total)) => {
            Json(PageResponse::new(data, page.page, page.per_page, total)).into_response()
        }
        Err(e) => vendor_error(&e),
    }
}

/// GET `/vendors/{id}` - Get one vendor.
async fn get_vendor(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(VendorId(id)): Path<VendorId>,
) -> impl IntoResponse {
    let repo = VendorRepository::new((*state.db).clone());
    match repo.get(id).await {
        Ok(vendor) => Json(vendor).into_response(),
        Err(e) => vendor_error(&e),
    }
}

/// PUT `/vendors/{id}` - Update a vendor's profile.
async fn update_vendor(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(VendorId(id)): Path<VendorId>,
    Json(payload): Json<VendorRequest>,
) -> impl IntoResponse {
    let repo = VendorRepository::new((*state.db).clone());
    match repo.update(id, payload.into()).await {
        Ok(vendor) => Json(vendor).into_response(),
        Err(e) => vendor_error(&e),
    }
}

/// PATCH `/vendors/{id}/active` - Activate or deactivate a vendor (admin only).
async fn set_active(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(VendorId(id)): Path<VendorId>,
    Json(payload): Json<SetActiveRequest>,
) -> impl IntoResponse {
    if let Err(resp) = require_admin(&state, auth.user_id()).await {
        return resp;
    }

    let repo = VendorRepository::new((*state.db).clone());
    match repo.set_active(id, payload.is_active).await {
        Ok(vendor) => {
            info!(vendor_id = %vendor.id, is_active = vendor.is_active, "vendor active flag changed");
            Json(vendor).into_response()
        }
        Err(e) => vendor_error(&e),
    }
}
