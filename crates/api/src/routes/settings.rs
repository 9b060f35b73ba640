//! System settings routes.

use axum::{
    Json, Router,
    extract::State,
    response::IntoResponse,
    routing::{get, put},
};
use serde::Deserialize;
use tracing::error;

use crate::routes::{app_error, require_admin};
use crate::{AppState, middleware::AuthUser};
use procura_db::SettingsRepository;
use procura_db::repositories::settings::SettingsInput;
use procura_shared::AppError;

/// PUT /settings request body.
#[derive(Debug, Default, Deserialize)]
pub struct SettingsRequest {
    #[serde(default)]
    pub company_name: Option<String>,
    #[serde(default)]
    pub company_address: Option<String>,
    #[serde(default)]
    pub company_phone: Option<String>,
    #[serde(default)]
    pub company_tax_id: Option<String>,
    #[serde(default)]
    pub company_logo_url: Option<String>,
    #[serde(default)]
    pub line_token: Option<String>,
    #[serde(default)]
    pub vendor_categories: Vec<String>,
    #[serde(default)]
    pub units: Vec<String>,
    #[serde(default)]
    pub approver_signature_urls: Vec<String>,
}

/// Creates the settings router (requires auth middleware to be applied externally).
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/settings", get(get_settings))
        .route("/settings", put(update_settings))
}

/// GET /settings - Fetch the global configuration singleton.
async fn get_settings(State(state): State<AppState>, _auth: AuthUser) -> impl IntoResponse {
    let repo = SettingsRepository::new((*state.db).clone());
    match repo.get().await {
        Ok(settings) => Json(settings).into_response(),
        Err(e) => {
            error!(error = %e, "failed to load settings");
            app_error(&AppError::Database("an error occurred".into()))
        }
    }
}

/// PUT /settings - Replace the global configuration (admin only).
async fn update_settings(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(payload): Json<SettingsRequest>,
) -> impl IntoResponse {
    if let Err(resp) = require_admin(&state, auth.user_id()).await {
        return resp;
    }

    let repo = SettingsRepository::new((*state.db).clone());
    match repo
        .update(SettingsInput {
            company_name: payload.company_name,
            company_address: payload.company_address,
            company_phone: payload.company_phone,
            company_tax_id: payload.company_tax_id,
            company_logo_url: payload.company_logo_url,
            line_token: payload.line_token,
            vendor_categories: payload.vendor_categories,
            units: payload.units,
            approver_signature_urls: payload.approver_signature_urls,
        })
        .await
    {
        Ok(settings) => Json(settings).into_response(),
        Err(e) => {
            error!(error = %e, "failed to update settings");
            app_error(&AppError::Database("an error occurred".into()))
        }
    }
}
