//! SF Report Infrastructure - Adapters and implementations
//!
//! This crate provides concrete implementations of the ports
//! defined in the application layer, and the production wiring.

pub mod adapters;
pub mod runtime;

pub use adapters::{AllowListHttpClient, ProcessEnv, ReqwestHttpClient, SystemClock};
pub use runtime::{Runtime, RuntimeError, RuntimeSettings};
