//! Keychain loading for the Exposed CLI.
//!
//! The keychain is a small JSON document holding the long-lived credentials
//! used to obtain API tokens. It lives at `~/.pdc/keychain.json` unless the
//! `EXPOSED_KEYCHAIN` environment variable points somewhere else.

use dirs::home_dir;
use serde::{Deserialize, Serialize};
use std::{fmt, fs, path::PathBuf};
use tracing::debug;

pub const DEFAULT_KEYCHAIN_DIRECTORY: &str = ".pdc";
pub const DEFAULT_KEYCHAIN_FILE_NAME: &str = "keychain.json";
pub const KEYCHAIN_ENVIRONMENT_VARIABLE: &str = "EXPOSED_KEYCHAIN";
pub const DEFAULT_REGION: &str = "us-east-2";

#[derive(Debug, thiserror::Error)]
pub enum KeychainError {
    #[error("failed to resolve the home directory")]
    FailedToFindHomeDirectory,
    #[error("valid keychain is required at {path:?}: {cause}")]
    FailedToReadKeychain {
        path: PathBuf,
        cause: std::io::Error,
    },
    #[error("failed to parse keychain as JSON: {cause}")]
    FailedToParseKeychain { cause: serde_json::Error },
    #[error("missing value for property {name:?}")]
    MissingRequiredPropertyValue { name: String },
}

/// Long-lived credentials as stored on disk.
#[derive(Clone, PartialEq, Serialize, Deserialize)]
pub struct Keychain {
    client_id: String,
    api: String,
    username: String,
    password: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    region: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    auth_url: Option<String>,
}

impl fmt::Debug for Keychain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Keychain")
            .field("client_id", &self.client_id)
            .field("api", &self.api)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("region", &self.region)
            .field("auth_url", &self.auth_url)
            .finish()
    }
}

impl Keychain {
    pub fn new(client_id: String, api: String, username: String, password: String) -> Self {
        Self {
            client_id,
            api,
            username,
            password,
            region: None,
            auth_url: None,
        }
    }

    pub fn with_auth_url(mut self, auth_url: String) -> Self {
        self.auth_url = Some(auth_url);
        self
    }

    pub fn client_id(&self) -> &str {
        &self.client_id
    }

    /// Base URL of the Exposed API without a trailing slash.
    pub fn api(&self) -> &str {
        self.api.trim_end_matches('/')
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn password(&self) -> &str {
        &self.password
    }

    pub fn region(&self) -> &str {
        self.region.as_deref().unwrap_or(DEFAULT_REGION)
    }

    /// Identity provider endpoint, derived from the region unless overridden.
    pub fn auth_url(&self) -> String {
        match &self.auth_url {
            Some(url) => url.clone(),
            None => format!("https://cognito-idp.{}.amazonaws.com/", self.region()),
        }
    }

    pub fn get_default_keychain_file_path() -> Result<PathBuf, KeychainError> {
        if let Ok(path) = std::env::var(KEYCHAIN_ENVIRONMENT_VARIABLE) {
            return Ok(PathBuf::from(path));
        }

        match home_dir() {
            Some(home) => {
                let mut path = home;
                path.push(DEFAULT_KEYCHAIN_DIRECTORY);
                path.push(DEFAULT_KEYCHAIN_FILE_NAME);
                Ok(path)
            }
            None => Err(KeychainError::FailedToFindHomeDirectory),
        }
    }

    pub fn load_default() -> Result<Keychain, KeychainError> {
        let path = Keychain::get_default_keychain_file_path()?;
        Keychain::load_from_file(path)
    }

    pub fn load_from_file(path: PathBuf) -> Result<Keychain, KeychainError> {
        debug!("Loading keychain from {}...", path.display());

        let content = fs::read_to_string(&path)
            .map_err(|cause| KeychainError::FailedToReadKeychain { path, cause })?;
        let keychain: Keychain = serde_json::from_str(&content)
            .map_err(|cause| KeychainError::FailedToParseKeychain { cause })?;
        keychain.validate()?;

        Ok(keychain)
    }

    fn validate(&self) -> Result<(), KeychainError> {
        let required = [
            ("client_id", &self.client_id),
            ("api", &self.api),
            ("username", &self.username),
            ("password", &self.password),
        ];
        for (name, value) in required {
            if value.trim().is_empty() {
                return Err(KeychainError::MissingRequiredPropertyValue {
                    name: name.to_string(),
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_keychain(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_load_valid_keychain() {
        let file = write_keychain(
            r#"{"client_id":"abc","api":"https://api.example.com/","username":"ops","password":"secret"}"#,
        );

        let keychain = Keychain::load_from_file(file.path().to_path_buf()).unwrap();
        assert_eq!(keychain.client_id(), "abc");
        assert_eq!(keychain.api(), "https://api.example.com");
        assert_eq!(keychain.username(), "ops");
        assert_eq!(keychain.password(), "secret");
        assert_eq!(keychain.region(), DEFAULT_REGION);
        assert_eq!(
            keychain.auth_url(),
            "https://cognito-idp.us-east-2.amazonaws.com/"
        );
    }

    #[test]
    fn test_region_overrides_auth_url() {
        let file = write_keychain(
            r#"{"client_id":"abc","api":"https://api","username":"ops","password":"pw","region":"eu-west-1"}"#,
        );

        let keychain = Keychain::load_from_file(file.path().to_path_buf()).unwrap();
        assert_eq!(
            keychain.auth_url(),
            "https://cognito-idp.eu-west-1.amazonaws.com/"
        );
    }

    #[test]
    fn test_explicit_auth_url_wins() {
        let keychain = Keychain::new(
            "abc".to_string(),
            "https://api".to_string(),
            "ops".to_string(),
            "pw".to_string(),
        )
        .with_auth_url("http://127.0.0.1:9000/".to_string());
        assert_eq!(keychain.auth_url(), "http://127.0.0.1:9000/");
    }

    #[test]
    fn test_missing_file_is_read_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = Keychain::load_from_file(dir.path().join("keychain.json"));
        assert!(matches!(
            result,
            Err(KeychainError::FailedToReadKeychain { .. })
        ));
    }

    #[test]
    fn test_malformed_json_is_parse_error() {
        let file = write_keychain("{ not json");
        let result = Keychain::load_from_file(file.path().to_path_buf());
        assert!(matches!(
            result,
            Err(KeychainError::FailedToParseKeychain { .. })
        ));
    }

    #[test]
    fn test_missing_field_is_parse_error() {
        let file = write_keychain(r#"{"client_id":"abc","api":"https://api"}"#);
        let result = Keychain::load_from_file(file.path().to_path_buf());
        assert!(matches!(
            result,
            Err(KeychainError::FailedToParseKeychain { .. })
        ));
    }

    #[test]
    fn test_empty_password_is_rejected() {
        let file = write_keychain(
            r#"{"client_id":"abc","api":"https://api","username":"ops","password":""}"#,
        );
        let result = Keychain::load_from_file(file.path().to_path_buf());
        assert!(matches!(
            result,
            Err(KeychainError::MissingRequiredPropertyValue { name }) if name == "password"
        ));
    }

    #[test]
    fn test_debug_redacts_password() {
        let keychain = Keychain::new(
            "abc".to_string(),
            "https://api".to_string(),
            "ops".to_string(),
            "hunter2".to_string(),
        );
        let debug = format!("{:?}", keychain);
        assert!(!debug.contains("hunter2"));
        assert!(debug.contains("<redacted>"));
    }
}
