//! # chat-core
//!
//! Shared pieces for the chatbot workspace: the [`ChatError`] taxonomy every layer reports with,
//! the authenticated [`Identity`] handed from the session layer to the orchestrator, and tracing
//! initialization.

pub mod error;
pub mod logger;
pub mod types;

pub use error::{ChatError, Result};
pub use logger::init_tracing;
pub use types::{ChatMode, Identity, UserFacts};
