//! Ordered line rewrite rules.

use once_cell::sync::Lazy;
use regex::Regex;

/// One `(pattern, replacement)` rewrite applied to a single line.
pub struct MarkupRule {
    pub name: &'static str,
    pub pattern: Regex,
    pub replacement: &'static str,
}

impl MarkupRule {
    fn new(name: &'static str, pattern: &str, replacement: &'static str) -> Self {
        Self {
            name,
            pattern: Regex::new(pattern).expect("invalid markup rule pattern"),
            replacement,
        }
    }

    pub fn apply(&self, line: &str) -> String {
        self.pattern.replace_all(line, self.replacement).into_owned()
    }
}

/// Rules in application order. Order matters: bold markers go before the bullet rule so `**x**`
/// is not read as a bullet, and the bullet rule goes before the stray `*` rule so `* item`
/// bullets survive.
pub static MARKUP_RULES: Lazy<Vec<MarkupRule>> = Lazy::new(|| {
    vec![
        MarkupRule::new("heading-triple", r"#{3,}", ""),
        MarkupRule::new("heading-marker", r"^\s*#{1,2}\s+", ""),
        MarkupRule::new("bold", r"\*\*", ""),
        MarkupRule::new("bullet", r"^\s*(?:\*\.\s*|[-*•]\s+)", "• "),
        MarkupRule::new("stray-asterisk", r"\*", ""),
        MarkupRule::new("whitespace", r"\s+", " "),
        MarkupRule::new("trim", r"^ | $", ""),
    ]
});

/// Any item number counts, so items past the fifth are still capped.
static NUMBERED_LINE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*\d+\.\s+\S").expect("invalid numbered line pattern"));

static BULLET_LINE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*(?:•|-|\*)\s+\S").expect("invalid bullet line pattern"));

/// Runs every rule over `line` in order.
pub fn apply_rules(line: &str) -> String {
    MARKUP_RULES
        .iter()
        .fold(line.to_string(), |acc, rule| rule.apply(&acc))
}

/// A bulleted (`•`, `-`, `*`) or numbered (`3. text`) line.
pub fn is_list_line(line: &str) -> bool {
    BULLET_LINE.is_match(line) || NUMBERED_LINE.is_match(line)
}
