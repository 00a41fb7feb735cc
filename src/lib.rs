//! The Exposed CLI client library.
//!
//! This crate provides the core functionality for the Exposed command-line
//! client: keychain loading, identity provider authentication, the
//! authenticated API client, and the command handlers built on top of it.
//!
//! # Modules
//!
//! - `actions`: Command handlers
//! - `auth`: Identity provider authentication
//! - `client`: Authenticated Exposed API client
//! - `commands`: CLI command parsing
//! - `keychain`: Credential file loading
//! - `model`: Feed records and result sets
//! - `session`: Token lifecycle on top of the keychain

pub mod actions;
pub mod auth;
pub mod client;
pub mod commands;
pub mod error;
pub mod exit_codes;
pub mod format;
pub mod keychain;
pub mod model;
pub mod param_utils;
pub mod session;
