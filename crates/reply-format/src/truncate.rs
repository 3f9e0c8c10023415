//! Caps the number of list items in a reply.

use crate::format::split_sections;
use crate::rules::is_list_line;

/// Appended as its own paragraph when list items were dropped.
pub const CLOSING_NOTE: &str = "Let me know if you'd like more suggestions.";

pub const DEFAULT_MAX_LIST_ITEMS: usize = 5;

/// Keeps at most `max_items` list lines.
///
/// Lines are walked in order across all sections. Non-list lines are kept as long as the cap has
/// not been passed, so an opening paragraph always survives. The first list line beyond the cap
/// ends the reply there and [`CLOSING_NOTE`] is appended. Text with `max_items` or fewer list
/// lines is returned unchanged.
pub fn truncate(text: &str, max_items: usize) -> String {
    let mut kept_sections: Vec<Vec<&str>> = Vec::new();
    let mut items = 0usize;
    let mut dropped = false;

    for section in split_sections(text) {
        let mut kept = Vec::new();
        for line in section {
            if is_list_line(line) {
                if items == max_items {
                    dropped = true;
                    break;
                }
                items += 1;
            }
            kept.push(line);
        }
        if !kept.is_empty() {
            kept_sections.push(kept);
        }
        if dropped {
            break;
        }
    }

    if !dropped {
        return text.to_string();
    }

    let mut out = kept_sections
        .iter()
        .map(|section| section.join("\n"))
        .collect::<Vec<_>>()
        .join("\n\n");
    if !out.is_empty() {
        out.push_str("\n\n");
    }
    out.push_str(CLOSING_NOTE);
    out
}
