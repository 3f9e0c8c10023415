//! # Reply format
//!
//! Pure text transforms applied to a completion before it is shown:
//!
//! - [`format`]: strips markdown markup, normalizes bullets to `• `, keeps numbered lines, and
//!   splits a short opening line into its own lead-in paragraph.
//! - [`truncate`]: keeps at most `max_items` list lines and appends [`CLOSING_NOTE`] when any
//!   were dropped.
//!
//! Both are deterministic and do no I/O. The markup rules live in [`rules::MARKUP_RULES`] as an
//! ordered `(pattern, replacement)` table.

mod format;
pub mod rules;
mod truncate;

pub use format::{format, split_sections, BULLET, LEAD_IN_MAX_LEN};
pub use rules::{apply_rules, is_list_line, MarkupRule};
pub use truncate::{truncate, CLOSING_NOTE, DEFAULT_MAX_LIST_ITEMS};

/// `format` followed by `truncate`; what the chat endpoint returns.
pub fn format_reply(raw: &str, max_items: usize) -> String {
    truncate(&format(raw), max_items)
}
