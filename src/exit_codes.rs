//! Custom exit codes for the Exposed CLI
//!
//! This module defines specific exit codes for different error conditions
//! to make scripting and automation easier.

/// Custom exit codes for the Exposed CLI
///
/// These codes follow the BSD sysexits.h conventions where possible:
/// - 0: Success
/// - 64-78: Standard exit codes from sysexits.h
/// - 100+: Custom application-specific codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExposedExitCode {
    /// Success (0) - Command completed successfully
    Success = exitcode::OK,

    /// Command line usage error (64) - User input error
    UsageError = exitcode::USAGE,

    /// Data format error (65) - Response or output data was incorrect
    DataError = exitcode::DATAERR,

    /// Internal software error (70) - Unexpected application error
    SoftwareError = exitcode::SOFTWARE,

    /// Configuration error (78) - Missing or malformed keychain
    ConfigError = exitcode::CONFIG,

    /// Authentication error (100) - Identity provider rejected the credentials
    AuthError = 100,

    /// Network error (101) - Connection or communication issues
    NetworkError = 101,

    /// API error (102) - Remote API returned an error status
    ApiError = 102,
}

impl ExposedExitCode {
    /// Convert to numeric exit code
    pub fn code(&self) -> i32 {
        *self as i32
    }
}

impl From<ExposedExitCode> for i32 {
    fn from(code: ExposedExitCode) -> Self {
        code.code()
    }
}
