//! Premium subscription status.
//!
//! The backend owns all billing logic; this client only asks "does this
//! user currently pay?" so the ad gate can be switched off. A user counts
//! as premium with an active subscription or a lifetime purchase. Any
//! failure degrades to not-premium rather than surfacing an error.

use serde::{Deserialize, Serialize};

use crate::error::ApiError;

/// Subscription state as reported by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubscriptionStatus {
    Active,
    Lifetime,
    #[serde(other)]
    Inactive,
}

/// Premium status snapshot for one user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PremiumStatus {
    pub status: SubscriptionStatus,
    #[serde(default)]
    pub plan: Option<String>,
}

impl PremiumStatus {
    /// Whether ads should be suppressed for this user.
    pub fn is_active(&self) -> bool {
        matches!(
            self.status,
            SubscriptionStatus::Active | SubscriptionStatus::Lifetime
        )
    }

    /// Status for a signed-out or unreachable-backend session.
    pub fn inactive() -> Self {
        Self {
            status: SubscriptionStatus::Inactive,
            plan: None,
        }
    }
}

/// Fetch the subscription status from the backend.
///
/// # Errors
/// Any transport or decode failure; callers are expected to fall back to
/// [`PremiumStatus::inactive`].
pub async fn fetch_premium_status(
    base_url: &str,
    token: Option<&str>,
) -> Result<PremiumStatus, ApiError> {
    let endpoint = format!("{}/api/stripe/subscription-status", base_url.trim_end_matches('/'));

    let client = reqwest::Client::new();
    let mut request = client.get(&endpoint);
    if let Some(token) = token {
        request = request.bearer_auth(token);
    }

    let response = request.send().await?;
    let status = response.status();
    if !status.is_success() {
        return Err(ApiError::UnexpectedStatus {
            endpoint,
            status: status.as_u16(),
        });
    }

    response
        .json::<PremiumStatus>()
        .await
        .map_err(|e| ApiError::MalformedResponse(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_active_subscription() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/api/stripe/subscription-status")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"status": "active", "plan": "family"}"#)
            .create_async()
            .await;

        let status = fetch_premium_status(&server.url(), Some("tok")).await.unwrap();
        assert!(status.is_active());
        assert_eq!(status.plan.as_deref(), Some("family"));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_unknown_status_maps_to_inactive() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/api/stripe/subscription-status")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"status": "canceled"}"#)
            .create_async()
            .await;

        let status = fetch_premium_status(&server.url(), None).await.unwrap();
        assert!(!status.is_active());
        assert!(status.plan.is_none());
    }

    #[tokio::test]
    async fn test_http_error_is_reported() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/api/stripe/subscription-status")
            .with_status(503)
            .create_async()
            .await;

        let err = fetch_premium_status(&server.url(), None).await.unwrap_err();
        assert!(matches!(err, ApiError::UnexpectedStatus { status: 503, .. }));
    }
}
