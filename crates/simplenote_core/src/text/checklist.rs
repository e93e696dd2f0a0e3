//! Checklist marker recognition.
//!
//! # Responsibility
//! - Find markdown-like checklist markers (`- [ ]`, `- [x]`, `- []`).
//! - Offer a line-anchored policy (list items) and an embedded-anywhere
//!   policy (inline markers).
//!
//! # Invariants
//! - Marker grammar: `"-" WS* "[" (WS | "x")? "]"`, WS = space or tab.
//! - Only lowercase `x` marks a checked item; any other interior content
//!   (for example `[x ]`) is not a marker.
//! - Match ranges are byte offsets covering `-` through `]`, never the
//!   leading indentation.

use once_cell::sync::Lazy;
use regex::Regex;
use std::ops::Range;

static LINE_ANCHORED_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?m)^[ \t]*(-[ \t]*\[([ \t]|x)?\])").expect("valid line-anchored checklist regex")
});
static ANYWHERE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(-[ \t]*\[([ \t]|x)?\])").expect("valid embedded checklist regex")
});

/// One checklist marker found in a scanned string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChecklistMatch {
    /// Byte range of the marker within the scanned text.
    pub range: Range<usize>,
    /// `true` when the bracket interior is `x`.
    pub checked: bool,
}

impl ChecklistMatch {
    /// Returns the marker text, or `None` when `text` is not the scanned input.
    pub fn as_str<'t>(&self, text: &'t str) -> Option<&'t str> {
        text.get(self.range.clone())
    }
}

/// Checked/total counts for line-anchored checklist items.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ChecklistSummary {
    pub total: usize,
    pub checked: usize,
}

/// Finds checklist markers that open a line (after optional indentation).
///
/// A marker in the middle of a sentence is ignored, and at most one marker
/// is reported per line.
pub fn find_line_anchored_checklists(text: &str) -> Vec<ChecklistMatch> {
    collect_matches(&LINE_ANCHORED_RE, text)
}

/// Finds every checklist marker regardless of its position in the line.
pub fn find_checklists_anywhere(text: &str) -> Vec<ChecklistMatch> {
    collect_matches(&ANYWHERE_RE, text)
}

/// Counts line-anchored checklist items and how many are checked.
pub fn summarize_checklists(text: &str) -> ChecklistSummary {
    find_line_anchored_checklists(text)
        .iter()
        .fold(ChecklistSummary::default(), |mut summary, item| {
            summary.total += 1;
            if item.checked {
                summary.checked += 1;
            }
            summary
        })
}

fn collect_matches(regex: &Regex, text: &str) -> Vec<ChecklistMatch> {
    regex
        .captures_iter(text)
        .filter_map(|caps| {
            let marker = caps.get(1)?;
            let checked = caps.get(2).is_some_and(|interior| interior.as_str() == "x");
            Some(ChecklistMatch {
                range: marker.range(),
                checked,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{
        find_checklists_anywhere, find_line_anchored_checklists, summarize_checklists,
    };

    #[test]
    fn anchored_ignores_markers_in_the_middle_of_a_line() {
        let text = "This is a badly formed todo - [ ] Buy avocados - []";
        assert!(find_line_anchored_checklists(text).is_empty());
    }

    #[test]
    fn anywhere_reports_every_marker_on_one_line() {
        let text = "The second regex should consider this as a valid checklist - [ ] Buy avocados - []";
        assert_eq!(find_checklists_anywhere(text).len(), 2);
    }

    #[test]
    fn leading_marker_counts_once_anchored_twice_anywhere() {
        let text = "- [ ] Buy avocados - []";
        assert_eq!(find_line_anchored_checklists(text).len(), 1);
        assert_eq!(find_checklists_anywhere(text).len(), 2);
    }

    #[test]
    fn unbounded_indentation_is_accepted() {
        let text = "           - [ ] Buy avocados - [ ]";
        let anchored = find_line_anchored_checklists(text);
        assert_eq!(anchored.len(), 1);
        assert_eq!(anchored[0].as_str(text), Some("- [ ]"));
        assert_eq!(Some(anchored[0].range.start), text.find('-'));
        assert_eq!(find_checklists_anywhere(text).len(), 2);
    }

    #[test]
    fn anchored_matches_only_well_formed_items_across_lines() {
        let text = "ToDo\n\n- [ ] Buy avocados\n- [ ] Ship it\n- [x ] Malformed!\n- [x] Correct.";
        let matches = find_line_anchored_checklists(text);
        assert_eq!(matches.len(), 3);
        assert_eq!(
            matches.iter().map(|item| item.checked).collect::<Vec<_>>(),
            vec![false, false, true]
        );
    }

    #[test]
    fn malformed_interior_never_matches() {
        let text = "- [x ] Malformed!";
        assert!(find_line_anchored_checklists(text).is_empty());
        assert!(find_checklists_anywhere(text).is_empty());
    }

    #[test]
    fn uppercase_x_is_not_a_checked_marker() {
        let text = "- [X] shouting";
        assert!(find_line_anchored_checklists(text).is_empty());
        assert!(find_checklists_anywhere(text).is_empty());
    }

    #[test]
    fn empty_interior_is_valid() {
        let text = "- [] Item";
        assert_eq!(find_line_anchored_checklists(text).len(), 1);
        assert_eq!(find_checklists_anywhere(text).len(), 1);
    }

    #[test]
    fn tabs_are_horizontal_whitespace() {
        let text = "\t-\t[\t] tabbed";
        let matches = find_line_anchored_checklists(text);
        assert_eq!(matches.len(), 1);
        assert!(!matches[0].checked);
    }

    #[test]
    fn indentation_does_not_cross_newlines() {
        let text = "intro\n\n   - [x] done";
        let matches = find_line_anchored_checklists(text);
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].as_str(text), Some("- [x]"));
    }

    #[test]
    fn anywhere_count_is_never_below_anchored_count() {
        let samples = [
            "",
            "plain text",
            "- [ ] a\n  - [x] b - [] c\nnot - [ ] d",
            "-[]-[x]-[ ]",
            "- [x ] bad - [x] good",
        ];
        for sample in samples {
            assert!(
                find_checklists_anywhere(sample).len()
                    >= find_line_anchored_checklists(sample).len(),
                "sample: {sample:?}"
            );
        }
    }

    #[test]
    fn summary_counts_checked_items() {
        let summary = summarize_checklists("- [x] a\n- [ ] b\n  - [x] c\ninline - [x] d");
        assert_eq!(summary.total, 3);
        assert_eq!(summary.checked, 2);
    }
}
