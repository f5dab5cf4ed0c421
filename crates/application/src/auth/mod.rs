//! Authentication module.
//!
//! This module provides:
//! - In-memory credential storage with expiry tracking
//! - The single-flight OAuth2 client-credentials token manager

mod token_manager;
mod token_store;

pub use token_manager::TokenManager;
pub use token_store::{DEFAULT_MAX_AGE_SECS, TokenStatus, TokenStore};
