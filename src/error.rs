use thiserror::Error;

use crate::{
    auth::AuthError, client::ApiError, exit_codes::ExposedExitCode, format::FormattingError,
    keychain::KeychainError, session::SessionError,
};

/// Error types that can occur during CLI command execution
#[derive(Debug, Error)]
pub enum CliError {
    /// Error when an unsupported or undefined subcommand is encountered
    #[error("Undefined or unsupported subcommand: {0}")]
    UnsupportedSubcommand(String),
    /// Error when a required command-line argument is missing
    #[error("Missing required argument: {0}")]
    MissingRequiredArgument(String),
    /// Error related to loading the keychain or authenticating at startup
    #[error("{0}")]
    SessionError(#[from] SessionError),
    /// Error related to data formatting
    #[error("Formatting error: {0}")]
    FormattingError(#[from] FormattingError),

    #[error("API error: {0}")]
    ExposedApiError(#[from] ApiError),
}

impl CliError {
    /// Get the appropriate exit code for this error
    pub fn exit_code(&self) -> ExposedExitCode {
        match self {
            CliError::UnsupportedSubcommand(_) => ExposedExitCode::UsageError,
            CliError::MissingRequiredArgument(_) => ExposedExitCode::UsageError,
            CliError::SessionError(SessionError::KeychainError(_)) => ExposedExitCode::ConfigError,
            CliError::SessionError(SessionError::AuthError(e)) => auth_exit_code(e),
            CliError::FormattingError(_) => ExposedExitCode::DataError,
            CliError::ExposedApiError(e) => match e {
                ApiError::NetworkError(_) => ExposedExitCode::NetworkError,
                ApiError::AuthError(e) => auth_exit_code(e),
                ApiError::RequestError { .. } => ExposedExitCode::ApiError,
                ApiError::DecodeError(_) => ExposedExitCode::DataError,
                ApiError::EncodeError(_) => ExposedExitCode::SoftwareError,
                ApiError::InvalidUrl(_) => ExposedExitCode::ConfigError,
                ApiError::InvalidNamespace(_) => ExposedExitCode::UsageError,
            },
        }
    }
}

fn auth_exit_code(error: &AuthError) -> ExposedExitCode {
    match error {
        AuthError::HttpError(_) => ExposedExitCode::NetworkError,
        _ => ExposedExitCode::AuthError,
    }
}

impl From<KeychainError> for CliError {
    fn from(error: KeychainError) -> Self {
        CliError::SessionError(SessionError::KeychainError(error))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::StatusCode;

    #[test]
    fn test_keychain_errors_are_config_errors() {
        let error = CliError::from(KeychainError::FailedToFindHomeDirectory);
        assert_eq!(error.exit_code(), ExposedExitCode::ConfigError);
    }

    #[test]
    fn test_rejected_credentials_are_auth_errors() {
        let error = CliError::SessionError(SessionError::AuthError(AuthError::AuthFailed(
            "HTTP 400".to_string(),
        )));
        assert_eq!(error.exit_code(), ExposedExitCode::AuthError);

        let error = CliError::from(ApiError::AuthError(AuthError::ChallengeRequired(
            "MFA".to_string(),
        )));
        assert_eq!(error.exit_code(), ExposedExitCode::AuthError);
    }

    #[test]
    fn test_request_errors_are_api_errors() {
        let error = CliError::from(ApiError::RequestError {
            status: StatusCode::UNAUTHORIZED,
            body: String::new(),
        });
        assert_eq!(error.exit_code(), ExposedExitCode::ApiError);
        assert_eq!(error.to_string(), "API error: request failed 401 Unauthorized");
    }

    #[test]
    fn test_decode_errors_are_data_errors() {
        let cause = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let error = CliError::from(ApiError::DecodeError(cause));
        assert_eq!(error.exit_code(), ExposedExitCode::DataError);
    }

    #[test]
    fn test_invalid_feed_names_are_usage_errors() {
        let error = CliError::from(ApiError::InvalidNamespace("..".to_string()));
        assert_eq!(error.exit_code(), ExposedExitCode::UsageError);
    }
}
