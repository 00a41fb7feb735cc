//! Identity provider authentication.
//!
//! Tokens for the Exposed API are issued by an AWS Cognito user pool using the
//! `USER_PASSWORD_AUTH` flow. The provider sits behind the [`IdentityProvider`]
//! trait so the session logic does not depend on Cognito directly.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

pub const USER_PASSWORD_AUTH: &str = "USER_PASSWORD_AUTH";
pub const INITIATE_AUTH_TARGET: &str = "AWSCognitoIdentityProviderService.InitiateAuth";
pub const AMZ_JSON_CONTENT_TYPE: &str = "application/x-amz-json-1.1";

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),
    #[error("JSON parsing error: {0}")]
    JsonError(#[from] serde_json::Error),
    #[error("Authentication failed: {0}")]
    AuthFailed(String),
    #[error("Authentication requires an unsupported challenge: {0}")]
    ChallengeRequired(String),
    #[error("Token validation error: {0}")]
    TokenValidationError(String),
}

/// Short-lived tokens returned by a successful authentication.
#[derive(Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct TokenSet {
    pub access_token: String,
    pub id_token: String,
    pub refresh_token: String,
    #[serde(default)]
    pub token_type: String,
    #[serde(default)]
    pub expires_in: u64,
}

impl fmt::Debug for TokenSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenSet")
            .field("token_type", &self.token_type)
            .field("expires_in", &self.expires_in)
            .finish_non_exhaustive()
    }
}

impl TokenSet {
    fn validate(self) -> Result<TokenSet, AuthError> {
        for (name, value) in [
            ("access token", &self.access_token),
            ("ID token", &self.id_token),
            ("refresh token", &self.refresh_token),
        ] {
            if value.is_empty() {
                return Err(AuthError::TokenValidationError(format!(
                    "identity provider returned an empty {}",
                    name
                )));
            }
        }
        Ok(self)
    }
}

#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Exchange a username and password for a fresh token set.
    async fn authenticate(
        &self,
        client_id: &str,
        username: &str,
        password: &str,
    ) -> Result<TokenSet, AuthError>;
}

#[derive(Serialize)]
#[serde(rename_all = "PascalCase")]
struct InitiateAuthRequest<'a> {
    auth_flow: &'static str,
    client_id: &'a str,
    auth_parameters: AuthParameters<'a>,
}

#[derive(Serialize)]
#[serde(rename_all = "UPPERCASE")]
struct AuthParameters<'a> {
    username: &'a str,
    password: &'a str,
}

#[derive(Deserialize)]
#[serde(rename_all = "PascalCase")]
struct InitiateAuthResponse {
    authentication_result: Option<TokenSet>,
    challenge_name: Option<String>,
}

/// Cognito user pool client speaking the `InitiateAuth` JSON protocol.
pub struct CognitoProvider {
    auth_url: String,
    client: reqwest::Client,
}

impl CognitoProvider {
    pub fn new(auth_url: String) -> Result<Self, AuthError> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("exposed/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self { auth_url, client })
    }

    fn describe_failure(&self, error_body: &str) -> String {
        match serde_json::from_str::<serde_json::Value>(error_body) {
            Ok(error_json) => {
                tracing::debug!("Parsed error JSON: {:?}", error_json);

                let error_type = error_json
                    .get("__type")
                    .and_then(|v| v.as_str())
                    .map(|t| t.rsplit('#').next().unwrap_or(t).to_string());
                let message = error_json
                    .get("message")
                    .or_else(|| error_json.get("Message"))
                    .and_then(|v| v.as_str())
                    .unwrap_or("");

                let description = match error_type.as_deref() {
                    Some("NotAuthorizedException") => {
                        format!("Invalid username or password. {}", message)
                    }
                    Some("UserNotFoundException") => format!("Unknown user. {}", message),
                    Some("ResourceNotFoundException") => {
                        format!("Unknown client ID. {}", message)
                    }
                    Some("InvalidParameterException") => {
                        format!("Invalid request. {}", message)
                    }
                    Some(other) => format!("{} {}", other, message),
                    None => error_body.to_string(),
                };
                description.trim().to_string()
            }
            Err(json_err) => {
                tracing::warn!(
                    "Failed to parse error response as JSON: {}. Raw error: {}",
                    json_err,
                    error_body
                );
                error_body.to_string()
            }
        }
    }
}

#[async_trait]
impl IdentityProvider for CognitoProvider {
    async fn authenticate(
        &self,
        client_id: &str,
        username: &str,
        password: &str,
    ) -> Result<TokenSet, AuthError> {
        tracing::debug!("Authenticating with identity provider: {}", &self.auth_url);
        tracing::debug!("Client ID: {}", client_id);

        let request = InitiateAuthRequest {
            auth_flow: USER_PASSWORD_AUTH,
            client_id,
            auth_parameters: AuthParameters { username, password },
        };

        let response = self
            .client
            .post(&self.auth_url)
            .header("X-Amz-Target", INITIATE_AUTH_TARGET)
            .header(reqwest::header::CONTENT_TYPE, AMZ_JSON_CONTENT_TYPE)
            .body(serde_json::to_vec(&request)?)
            .send()
            .await?;

        let status = response.status();
        tracing::debug!("Authentication response status: {}", status);
        let body = response.text().await?;

        if !status.is_success() {
            tracing::error!("Authentication request failed with status {}: {}", status, &body);
            return Err(AuthError::AuthFailed(format!(
                "HTTP {} {}",
                status,
                self.describe_failure(&body)
            )));
        }

        let response: InitiateAuthResponse = serde_json::from_str(&body)?;
        match (response.authentication_result, response.challenge_name) {
            (Some(tokens), _) => {
                tracing::debug!("Authentication successful, received tokens");
                tokens.validate()
            }
            (None, Some(challenge)) => Err(AuthError::ChallengeRequired(challenge)),
            (None, None) => Err(AuthError::AuthFailed(
                "identity provider returned no authentication result".to_string(),
            )),
        }
    }
}
