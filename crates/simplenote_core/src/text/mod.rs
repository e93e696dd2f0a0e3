//! Text analysis helpers over raw note content.

pub mod checklist;
