//! Host bridge for Simplenote widget and intents extensions.

pub mod api;
