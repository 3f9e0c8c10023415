//! Extracts facts a user states about themselves ("my name is Alice", "I live in Paris").
//!
//! Each key has a fixed, ordered pattern list. The first pattern that matches anywhere in the
//! message wins for that key, regardless of where in the message the other patterns match.

use chat_core::UserFacts;
use once_cell::sync::Lazy;
use regex::Regex;

struct FactPattern {
    key: &'static str,
    patterns: Vec<Regex>,
}

fn compile(patterns: &[&str]) -> Vec<Regex> {
    patterns
        .iter()
        .map(|p| Regex::new(p).expect("invalid fact pattern"))
        .collect()
}

/// A place name, ended by punctuation, end of text, or a clause word.
const PLACE: &str = concat!(
    r"([\p{L}][\p{L} '-]*?)",
    r"(?:\s*(?:[.,!?;]|$)|\s+(?:and|but|where|so|because|while|since|with|for|now)\b)"
);

static FACT_PATTERNS: Lazy<Vec<FactPattern>> = Lazy::new(|| {
    vec![
        FactPattern {
            key: "name",
            patterns: compile(&[
                r"(?i)\bmy name is\s+([\p{L}][\p{L}'-]*)",
                r"(?i)\bcall me\s+([\p{L}][\p{L}'-]*)",
                r"(?i)\bi'?m called\s+([\p{L}][\p{L}'-]*)",
            ]),
        },
        FactPattern {
            key: "location",
            patterns: compile(&[
                format!(r"(?i)\bi live in\s+{}", PLACE).as_str(),
                format!(r"(?i)\bi(?:'m| am) from\s+{}", PLACE).as_str(),
            ]),
        },
    ]
});

/// Facts found in `message`; empty when nothing matched.
pub fn extract_facts(message: &str) -> UserFacts {
    let mut facts = UserFacts::new();
    for fact in FACT_PATTERNS.iter() {
        let found = fact
            .patterns
            .iter()
            .find_map(|re| re.captures(message).and_then(|c| c.get(1)))
            .map(|m| m.as_str().trim())
            .filter(|v| !v.is_empty());
        if let Some(value) = found {
            facts.insert(fact.key, value);
        }
    }
    facts
}
