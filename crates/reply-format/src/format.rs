//! Section-aware reply formatting.

use crate::rules::{apply_rules, is_list_line};

/// Glyph every bullet is normalized to.
pub const BULLET: &str = "•";

/// An opening line up to this many characters can stand alone as a lead-in paragraph.
pub const LEAD_IN_MAX_LEN: usize = 80;

/// Splits text into blank-line-delimited sections of non-blank lines.
pub fn split_sections(text: &str) -> Vec<Vec<&str>> {
    let mut sections = Vec::new();
    let mut current = Vec::new();
    for line in text.lines() {
        if line.trim().is_empty() {
            if !current.is_empty() {
                sections.push(std::mem::take(&mut current));
            }
        } else {
            current.push(line);
        }
    }
    if !current.is_empty() {
        sections.push(current);
    }
    sections
}

/// Normalizes raw completion text for display.
///
/// Each line goes through [`MARKUP_RULES`](crate::rules::MARKUP_RULES); lines left empty (or a
/// bare bullet) are dropped, as are sections left empty. When the first section opens with a
/// short non-list line followed by more lines, that line becomes its own paragraph. Sections are
/// joined by one blank line.
pub fn format(raw: &str) -> String {
    let mut sections: Vec<Vec<String>> = split_sections(raw)
        .into_iter()
        .map(|section| {
            section
                .into_iter()
                .map(apply_rules)
                .filter(|line| !line.is_empty() && line != BULLET)
                .collect::<Vec<_>>()
        })
        .filter(|section| !section.is_empty())
        .collect();

    if let Some(first) = sections.first_mut() {
        let lead_in = first.len() > 1
            && !is_list_line(&first[0])
            && first[0].chars().count() <= LEAD_IN_MAX_LEN;
        if lead_in {
            let rest = first.split_off(1);
            sections.insert(1, rest);
        }
    }

    sections
        .iter()
        .map(|section| section.join("\n"))
        .collect::<Vec<_>>()
        .join("\n\n")
}
