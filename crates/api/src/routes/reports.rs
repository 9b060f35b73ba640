//! Cross-project reporting routes.

use axum::{Json, Router, extract::State, response::IntoResponse, routing::get};
use serde_json::json;
use tracing::error;

use crate::routes::app_error;
use crate::{AppState, middleware::AuthUser};
use procura_db::ReconciliationRepository;
use procura_shared::AppError;

/// Creates the reports router (requires auth middleware to be applied externally).
pub fn routes() -> Router<AppState> {
    Router::new().route("/reports/budgets", get(budget_report))
}

/// GET /reports/budgets - Reconciled budget figures for every project.
///
/// One snapshot per project; each row is internally consistent the same way
/// the single-project budget view is.
async fn budget_report(State(state): State<AppState>, _auth: AuthUser) -> impl IntoResponse {
    let repo = ReconciliationRepository::new((*state.db).clone());
    match repo.budget_report().await {
        Ok(rows) => {
            let data: Vec<_> = rows
                .into_iter()
                .map(|row| {
                    json!({
                        "project": row.project,
                        "summary": row.summary,
                    })
                })
                .collect();
            Json(json!({ "data": data })).into_response()
        }
        Err(e) => {
            error!(error = %e, "failed to build budget report");
            app_error(&AppError::Database("an error occurred".into()))
        }
    }
}

#[cfg(test)]
mod tests {
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use sea_orm::DatabaseConnection;
    use std::sync::Arc;
    use tower::ServiceExt;

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
    async fn test_budgets_report_path_registered_behind_auth() {
        // The plural path is the published one; a 404 here would mean the
        // route went missing or moved.
        let app = crate::create_router(test_state());
        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/v1/reports/budgets")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }
}
