//! String literal escaping

use serde::Deserialize;

/// Characters escaped by [`EscapePolicy::Legacy`] on top of `\` and `"`
const LEGACY_SPECIALS: &[char] = &['<', '>', '*', '_', '(', ')', '[', ']', '#'];

/// Which characters get a backslash inside a quoted string
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EscapePolicy {
    /// Only `\` and `"`
    #[default]
    Minimal,
    /// Also `< > * _ ( ) [ ] #`, matching older converter output
    Legacy,
}

impl EscapePolicy {
    fn needs_escape(self, c: char) -> bool {
        match self {
            EscapePolicy::Minimal => c == '\\' || c == '"',
            EscapePolicy::Legacy => c == '\\' || c == '"' || LEGACY_SPECIALS.contains(&c),
        }
    }
}

/// Escape a string for use between double quotes
pub fn escape(value: &str, policy: EscapePolicy) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        if policy.needs_escape(c) {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

/// Reverse [`escape`] for either policy
pub fn unescape(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut chars = value.chars();
    while let Some(c) = chars.next() {
        if c == '\\' {
            if let Some(next) = chars.next() {
                out.push(next);
                continue;
            }
        }
        out.push(c);
    }
    out
}
