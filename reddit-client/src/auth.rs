use crate::api::RedditApiClient;
use gemharvest_core::{CoreError, RedditApiError};
use serde::Deserialize;
use std::time::{Duration, SystemTime};
use tracing::{debug, info};

const TOKEN_ENDPOINT: &str = "https://www.reddit.com/api/v1/access_token";

/// Application-only bearer token from the client_credentials grant.
/// This flow carries no user context, so the session is read-only.
#[derive(Debug, Clone)]
pub struct AppToken {
    pub access_token: String,
    pub expires_at: SystemTime,
    pub scope: String,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    expires_in: u64,
    #[serde(default)]
    scope: String,
}

impl RedditApiClient {
    /// Exchanges script-app credentials for an app-only token and stores
    /// it on the client. Must be called before any listing fetch.
    pub async fn authenticate(
        &mut self,
        client_id: &str,
        client_secret: &str,
    ) -> Result<(), CoreError> {
        info!("Requesting app-only Reddit token");
        let response = self
            .http_client
            .post(TOKEN_ENDPOINT)
            .basic_auth(client_id, Some(client_secret))
            .header("User-Agent", &self.user_agent)
            .form(&[("grant_type", "client_credentials")])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(CoreError::RedditApi(RedditApiError::AuthenticationFailed {
                reason: format!("token endpoint returned {status}"),
            }));
        }

        let token_response: TokenResponse = response.json().await.map_err(|e| {
            CoreError::RedditApi(RedditApiError::InvalidResponse {
                details: format!("Failed to parse token response: {e}"),
            })
        })?;

        debug!(
            "Token granted, expires in {} seconds",
            token_response.expires_in
        );
        self.token = Some(AppToken {
            access_token: token_response.access_token,
            expires_at: SystemTime::now() + Duration::from_secs(token_response.expires_in),
            scope: token_response.scope,
        });
        Ok(())
    }

    pub fn is_authenticated(&self) -> bool {
        match &self.token {
            Some(token) => token.expires_at > SystemTime::now(),
            None => false,
        }
    }

    /// App-only sessions have no user context, so an authenticated client
    /// is always read-only. Mirrors the confirmation the run prints.
    pub fn read_only(&self) -> bool {
        self.is_authenticated()
    }
}
