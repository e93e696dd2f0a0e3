//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate store calls into use-case level APIs.
//! - Keep widget/intents/FFI layers decoupled from storage details.

pub mod note_query;
