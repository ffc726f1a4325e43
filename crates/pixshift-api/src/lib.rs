//! Pixshift API Library
//!
//! This crate provides the HTTP handlers, multipart intake and application setup
//! for the image transformation service.

mod handlers;
pub mod setup;
mod telemetry;
mod utils;

// Public modules
pub mod error;
pub mod state;

// Re-exports
pub use error::HttpAppError;
pub use state::AppState;
