//! Session management for the Exposed API.
//!
//! A [`Session`] couples the long-lived keychain credentials with the
//! short-lived token set obtained from the identity provider. It starts out
//! unauthenticated and becomes authenticated after the first successful
//! exchange; later exchanges overwrite the tokens in place.

use crate::{
    auth::{AuthError, CognitoProvider, IdentityProvider, TokenSet},
    keychain::{Keychain, KeychainError},
};
use std::path::PathBuf;
use thiserror::Error;
use tracing::{debug, info};

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Configuration error: {0}")]
    KeychainError(#[from] KeychainError),
    #[error("{0}")]
    AuthError(#[from] AuthError),
}

pub struct Session {
    keychain: Keychain,
    tokens: Option<TokenSet>,
    provider: Box<dyn IdentityProvider>,
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("keychain", &self.keychain)
            .field("authenticated", &self.is_authenticated())
            .finish_non_exhaustive()
    }
}

impl Session {
    pub fn new(keychain: Keychain, provider: Box<dyn IdentityProvider>) -> Self {
        Self {
            keychain,
            tokens: None,
            provider,
        }
    }

    /// Build an unauthenticated session talking to the Cognito endpoint named
    /// by the keychain.
    pub fn from_keychain(keychain: Keychain) -> Result<Self, AuthError> {
        let provider = CognitoProvider::new(keychain.auth_url())?;
        Ok(Self::new(keychain, Box::new(provider)))
    }

    /// Load the default keychain and authenticate. Used once at startup.
    pub async fn bootstrap() -> Result<Session, SessionError> {
        let keychain = Keychain::load_default()?;
        Self::bootstrap_with(keychain).await
    }

    pub async fn bootstrap_from(path: PathBuf) -> Result<Session, SessionError> {
        let keychain = Keychain::load_from_file(path)?;
        Self::bootstrap_with(keychain).await
    }

    async fn bootstrap_with(keychain: Keychain) -> Result<Session, SessionError> {
        let mut session = Session::from_keychain(keychain)?;
        session.authenticate().await?;
        Ok(session)
    }

    /// Run the username/password exchange and store the resulting tokens.
    /// On failure the previous tokens, if any, are left untouched.
    pub async fn authenticate(&mut self) -> Result<(), AuthError> {
        debug!(
            "Authenticating user {} with client {}...",
            self.keychain.username(),
            self.keychain.client_id()
        );

        let tokens = self
            .provider
            .authenticate(
                self.keychain.client_id(),
                self.keychain.username(),
                self.keychain.password(),
            )
            .await?;
        self.tokens = Some(tokens);

        Ok(())
    }

    /// Obtain a new token set after the access token was rejected.
    ///
    /// This re-runs the password flow with the stored credentials. The refresh
    /// token is kept on the session but is not used for the exchange.
    pub async fn refresh(&mut self) -> Result<(), AuthError> {
        info!("Access token rejected, re-authenticating");
        self.authenticate().await
    }

    pub fn is_authenticated(&self) -> bool {
        self.tokens.is_some()
    }

    pub fn access_token(&self) -> Option<&str> {
        self.tokens.as_ref().map(|t| t.access_token.as_str())
    }

    pub fn id_token(&self) -> Option<&str> {
        self.tokens.as_ref().map(|t| t.id_token.as_str())
    }

    pub fn refresh_token(&self) -> Option<&str> {
        self.tokens.as_ref().map(|t| t.refresh_token.as_str())
    }

    pub fn api(&self) -> &str {
        self.keychain.api()
    }

    pub fn keychain(&self) -> &Keychain {
        &self.keychain
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::io::Write;
    use std::sync::{
        atomic::{AtomicUsize, Ordering},
        Arc,
    };

    struct CountingProvider {
        calls: Arc<AtomicUsize>,
        accept: bool,
    }

    #[async_trait]
    impl IdentityProvider for CountingProvider {
        async fn authenticate(
            &self,
            client_id: &str,
            username: &str,
            password: &str,
        ) -> Result<TokenSet, AuthError> {
            let n = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
            assert_eq!(client_id, "client");
            assert_eq!(username, "ops");
            assert_eq!(password, "secret");

            if !self.accept {
                return Err(AuthError::AuthFailed("rejected".to_string()));
            }
            Ok(TokenSet {
                access_token: format!("access-{}", n),
                id_token: format!("id-{}", n),
                refresh_token: format!("refresh-{}", n),
                token_type: "Bearer".to_string(),
                expires_in: 3600,
            })
        }
    }

    fn keychain() -> Keychain {
        Keychain::new(
            "client".to_string(),
            "https://api.example.com".to_string(),
            "ops".to_string(),
            "secret".to_string(),
        )
    }

    fn session(accept: bool) -> (Session, Arc<AtomicUsize>) {
        let calls = Arc::new(AtomicUsize::new(0));
        let provider = CountingProvider {
            calls: calls.clone(),
            accept,
        };
        (Session::new(keychain(), Box::new(provider)), calls)
    }

    #[tokio::test]
    async fn test_new_session_is_unauthenticated() {
        let (session, calls) = session(true);
        assert!(!session.is_authenticated());
        assert_eq!(session.access_token(), None);
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_authenticate_populates_all_tokens() {
        let (mut session, calls) = session(true);
        session.authenticate().await.unwrap();

        assert!(session.is_authenticated());
        assert_eq!(session.access_token(), Some("access-1"));
        assert_eq!(session.id_token(), Some("id-1"));
        assert_eq!(session.refresh_token(), Some("refresh-1"));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_refresh_overwrites_tokens() {
        let (mut session, calls) = session(true);
        session.authenticate().await.unwrap();
        session.refresh().await.unwrap();

        assert_eq!(session.access_token(), Some("access-2"));
        assert_eq!(session.id_token(), Some("id-2"));
        assert_eq!(session.refresh_token(), Some("refresh-2"));
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_rejected_authentication_leaves_session_unauthenticated() {
        let (mut session, _) = session(false);
        let result = session.authenticate().await;

        assert!(matches!(result, Err(AuthError::AuthFailed(_))));
        assert!(!session.is_authenticated());
    }

    #[tokio::test]
    async fn test_bootstrap_from_missing_keychain_is_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = Session::bootstrap_from(dir.path().join("keychain.json")).await;
        assert!(matches!(result, Err(SessionError::KeychainError(_))));
    }

    #[tokio::test]
    async fn test_bootstrap_from_malformed_keychain_is_config_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"[1, 2, 3]").unwrap();

        let result = Session::bootstrap_from(file.path().to_path_buf()).await;
        assert!(matches!(
            result,
            Err(SessionError::KeychainError(
                KeychainError::FailedToParseKeychain { .. }
            ))
        ));
    }

    #[tokio::test]
    async fn test_bootstrap_from_valid_keychain_populates_all_tokens() {
        use wiremock::matchers::{header, method};
        use wiremock::{Mock, MockServer, ResponseTemplate};

        let mock_server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(header(
                "X-Amz-Target",
                "AWSCognitoIdentityProviderService.InitiateAuth",
            ))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "AuthenticationResult": {
                    "AccessToken": "access",
                    "IdToken": "id",
                    "RefreshToken": "refresh",
                    "TokenType": "Bearer",
                    "ExpiresIn": 3600
                }
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let keychain = serde_json::json!({
            "client_id": "client",
            "api": "https://api.example.com",
            "username": "ops",
            "password": "secret",
            "auth_url": mock_server.uri(),
        });
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(keychain.to_string().as_bytes()).unwrap();

        let session = Session::bootstrap_from(file.path().to_path_buf())
            .await
            .unwrap();

        assert!(session.is_authenticated());
        assert_eq!(session.access_token(), Some("access"));
        assert_eq!(session.id_token(), Some("id"));
        assert_eq!(session.refresh_token(), Some("refresh"));
        assert_eq!(session.api(), "https://api.example.com");
    }
}
