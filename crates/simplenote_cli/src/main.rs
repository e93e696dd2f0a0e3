//! CLI smoke entry point.
//!
//! # Responsibility
//! - Verify `simplenote_core` linkage (`simplenote`).
//! - Scan a text file for checklist items (`simplenote checklists <path>`).

use simplenote_core::{find_checklists_anywhere, summarize_checklists};
use std::process::ExitCode;

fn main() -> ExitCode {
    let args: Vec<String> = std::env::args().skip(1).collect();
    match args.as_slice() {
        [] => {
            println!("simplenote_core version={}", simplenote_core::core_version());
            ExitCode::SUCCESS
        }
        [command, path] if command == "checklists" => match std::fs::read_to_string(path) {
            Ok(text) => {
                let summary = summarize_checklists(&text);
                println!(
                    "items={} checked={} inline_markers={}",
                    summary.total,
                    summary.checked,
                    find_checklists_anywhere(&text).len()
                );
                ExitCode::SUCCESS
            }
            Err(err) => {
                eprintln!("failed to read `{path}`: {err}");
                ExitCode::FAILURE
            }
        },
        _ => {
            eprintln!("usage: simplenote [checklists <path>]");
            ExitCode::from(2)
        }
    }
}
