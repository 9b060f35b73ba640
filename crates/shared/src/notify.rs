//! Outbound LINE notification client.
//!
//! On approval of a document the system fires a best-effort POST to the
//! configured LINE notify relay with the full document payload, denormalized
//! vendor data, and the project name. Delivery failures are logged and never
//! block or reverse the approval; there is no retry.

use serde::Serialize;
use serde_json::Value;
use std::time::Duration;

use crate::config::NotifyConfig;

/// Document kind tag carried in the notification payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum NotifyKind {
    /// Purchase order.
    #[serde(rename = "PO")]
    PurchaseOrder,
    /// Work contract.
    #[serde(rename = "WC")]
    WorkContract,
    /// Variation order.
    #[serde(rename = "VO")]
    VariationOrder,
}

/// Payload sent to the notify relay.
#[derive(Debug, Clone, Serialize)]
pub struct NotifyPayload {
    /// Document kind.
    #[serde(rename = "type")]
    pub kind: NotifyKind,
    /// Full document snapshot.
    pub data: Value,
    /// Denormalized vendor snapshot, when the document has one.
    #[serde(rename = "vendorData", skip_serializing_if = "Option::is_none")]
    pub vendor_data: Option<Value>,
    /// Name of the project the document belongs to.
    #[serde(rename = "projectName")]
    pub project_name: String,
}

/// Fire-and-forget LINE notification service.
#[derive(Debug, Clone)]
pub struct LineNotifyService {
    client: reqwest::Client,
    config: NotifyConfig,
}

impl LineNotifyService {
    /// Creates a new notification service.
    #[must_use]
    pub fn new(config: NotifyConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs.max(1)))
            .build()
            .unwrap_or_default();
        Self { client, config }
    }

    /// Returns true if an endpoint is configured.
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.config.endpoint.is_some()
    }

    /// Picks the bearer token for a delivery.
    ///
    /// Admin-stored credentials win over the static config fallback.
    fn resolve_token<'a>(&'a self, stored: Option<&'a str>) -> Option<&'a str> {
        stored.or(self.config.token.as_deref())
    }

    /// Sends an approval notification.
    ///
    /// `stored_token` is the credential held in system settings; when absent
    /// the config token is used. Never returns an error: failures are logged
    /// at `warn` and swallowed. Callers must have durably persisted the
    /// approval before calling this.
    pub async fn send(&self, payload: &NotifyPayload, stored_token: Option<&str>) {
        let Some(endpoint) = &self.config.endpoint else {
            tracing::debug!("notify endpoint not configured, skipping notification");
            return;
        };

        let mut request = self.client.post(endpoint).json(payload);
        if let Some(token) = self.resolve_token(stored_token) {
            request = request.bearer_auth(token);
        }

        match request.send().await {
            Ok(resp) if resp.status().is_success() => {
                tracing::info!(kind = ?payload.kind, "approval notification delivered");
            }
            Ok(resp) => {
                tracing::warn!(
                    kind = ?payload.kind,
                    status = %resp.status(),
                    "approval notification rejected by relay"
                );
            }
            Err(e) => {
                tracing::warn!(kind = ?payload.kind, error = %e, "approval notification failed");
            }
        }
    }

    /// Spawns `send` on the runtime so the caller never waits on delivery.
    pub fn send_detached(&self, payload: NotifyPayload, stored_token: Option<String>) {
        let svc = self.clone();
        tokio::spawn(async move {
            svc.send(&payload, stored_token.as_deref()).await;
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_payload_serialization_shape() {
        let payload = NotifyPayload {
            kind: NotifyKind::PurchaseOrder,
            data: json!({"poNumber": "PO-2026-001"}),
            vendor_data: Some(json!({"name": "Siam Steel"})),
            project_name: "Warehouse Extension".to_string(),
        };
        let value = serde_json::to_value(&payload).unwrap();
        assert_eq!(value["type"], "PO");
        assert_eq!(value["vendorData"]["name"], "Siam Steel");
        assert_eq!(value["projectName"], "Warehouse Extension");
    }

    #[test]
    fn test_vendor_data_omitted_when_absent() {
        let payload = NotifyPayload {
            kind: NotifyKind::VariationOrder,
            data: json!({}),
            vendor_data: None,
            project_name: "P".to_string(),
        };
        let value = serde_json::to_value(&payload).unwrap();
        assert_eq!(value["type"], "VO");
        assert!(value.get("vendorData").is_none());
    }

    #[tokio::test]
    async fn test_send_without_endpoint_is_noop() {
        let svc = LineNotifyService::new(NotifyConfig::default());
        assert!(!svc.is_enabled());
        svc.send(
            &NotifyPayload {
                kind: NotifyKind::WorkContract,
                data: json!({}),
                vendor_data: None,
                project_name: String::new(),
            },
            None,
        )
        .await;
    }

    #[test]
    fn test_stored_token_wins_over_config() {
        let svc = LineNotifyService::new(NotifyConfig {
            endpoint: Some("http://localhost/notify".to_string()),
            token: Some("config-token".to_string()),
            timeout_secs: 5,
        });
        assert_eq!(svc.resolve_token(Some("stored-token")), Some("stored-token"));
        assert_eq!(svc.resolve_token(None), Some("config-token"));
    }

    #[test]
    fn test_no_token_at_all_is_allowed() {
        let svc = LineNotifyService::new(NotifyConfig {
            endpoint: Some("http://localhost/notify".to_string()),
            token: None,
            timeout_secs: 5,
        });
        assert_eq!(svc.resolve_token(None), None);
    }
}
