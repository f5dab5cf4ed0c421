//! Authentication domain types

mod types;

pub use types::{
    AuthError, CachedCredential, DEFAULT_TOKEN_LIFETIME_SECS, LifetimePolicy, token_preview,
};
