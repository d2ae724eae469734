use std::time::{Duration, Instant};

use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;

use crate::app::{errors::PipelineError, util::time::current_time_in_secs};

use super::service_account::ServiceAccount;

pub static SCOPE_DEVSTORAGE_FULL_CONTROL: &str =
    "https://www.googleapis.com/auth/devstorage.full_control";
pub static SCOPE_DATASTORE: &str = "https://www.googleapis.com/auth/datastore";

// tokens are issued for an hour
const TOKEN_LIFETIME: Duration = Duration::from_secs(55 * 60);

/// OAuth access tokens for one service account, refreshed on demand.
#[derive(Debug)]
pub struct GoogleAuth {
    pub service_account: ServiceAccount,
    scope: String,
    http_client: reqwest::Client,
    token: RwLock<Option<AccessToken>>,
}

#[derive(Debug, Clone)]
struct AccessToken {
    value: String,
    token_time: Instant,
}

#[derive(Debug, Serialize)]
struct GrantClaims<'a> {
    iss: &'a str,
    scope: &'a str,
    aud: &'a str,
    exp: u64,
    iat: u64,
}

#[derive(Debug, Deserialize)]
struct OAuthTokenResponse {
    access_token: String,
}

impl GoogleAuth {
    pub fn new(
        service_account: ServiceAccount,
        scope: &str,
        http_client: reqwest::Client,
    ) -> GoogleAuth {
        GoogleAuth {
            service_account,
            scope: scope.to_string(),
            http_client,
            token: RwLock::new(None),
        }
    }

    pub async fn access_token(&self) -> Result<String, PipelineError> {
        if let Some(token) = self.token.read().await.as_ref() {
            if token.token_time.elapsed() < TOKEN_LIFETIME {
                return Ok(token.value.to_string());
            }
        }

        let mut token = self.token.write().await;

        // another caller may have refreshed while we waited for the lock
        if let Some(current) = token.as_ref() {
            if current.token_time.elapsed() < TOKEN_LIFETIME {
                return Ok(current.value.to_string());
            }
        }

        let value = self.login().await?;
        *token = Some(AccessToken {
            value: value.to_string(),
            token_time: Instant::now(),
        });

        Ok(value)
    }

    fn sign_grant(&self) -> Result<String, PipelineError> {
        let iat = current_time_in_secs();
        let claims = GrantClaims {
            iss: &self.service_account.client_email,
            scope: &self.scope,
            aud: &self.service_account.token_uri,
            exp: iat + 3600,
            iat,
        };

        let encoding_key = EncodingKey::from_rsa_pem(self.service_account.private_key.as_bytes())
            .map_err(|e| PipelineError::Auth(format!("unable to read private key: {}", e)))?;

        encode(&Header::new(Algorithm::RS256), &claims, &encoding_key)
            .map_err(|e| PipelineError::Auth(format!("failed to sign grant: {}", e)))
    }

    async fn login(&self) -> Result<String, PipelineError> {
        let assertion = self.sign_grant()?;

        let result = self
            .http_client
            .post(&self.service_account.token_uri)
            .form(&[
                ("grant_type", "urn:ietf:params:oauth:grant-type:jwt-bearer"),
                ("assertion", assertion.as_str()),
            ])
            .send()
            .await;

        let res = match result {
            Ok(res) => res,
            Err(e) => {
                tracing::error!(%e);
                return Err(PipelineError::Auth(format!("token request failed: {}", e)));
            }
        };

        let status = res.status();
        let text = res
            .text()
            .await
            .map_err(|e| PipelineError::Auth(format!("token response unreadable: {}", e)))?;

        match serde_json::from_str::<OAuthTokenResponse>(&text) {
            Ok(token_response) if status.is_success() => {
                tracing::debug!(
                    "logged in to google as {}",
                    self.service_account.client_email
                );
                Ok(token_response.access_token)
            }
            _ => {
                tracing::error!(%text);
                Err(PipelineError::Auth(format!(
                    "failed to log in as {} ({})",
                    self.service_account.client_email, status
                )))
            }
        }
    }
}
