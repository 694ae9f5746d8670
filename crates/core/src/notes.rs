//! Append-only free-text notes.
//!
//! Stored as a single text column: entries are joined with `\n` in call order.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Notes(Option<String>);

impl Notes {
    pub fn empty() -> Self {
        Self(None)
    }

    pub fn from_option(text: Option<String>) -> Self {
        Self(text)
    }

    /// Appends one entry: `entry` when empty, otherwise `"{prior}\n{entry}"`.
    pub fn append(&mut self, entry: impl AsRef<str>) {
        let entry = entry.as_ref();
        if self.is_empty() {
            self.0 = Some(entry.to_string());
            return;
        }
        if let Some(prior) = &mut self.0 {
            prior.push('\n');
            prior.push_str(entry);
        }
    }

    /// Appends `"{verb}: {reason}"`.
    pub fn append_reason(&mut self, verb: &str, reason: &str) {
        self.append(format!("{verb}: {reason}"));
    }

    pub fn as_deref(&self) -> Option<&str> {
        self.0.as_deref()
    }

    pub fn is_empty(&self) -> bool {
        self.0.as_deref().is_none_or(str::is_empty)
    }

    pub fn entries(&self) -> impl Iterator<Item = &str> {
        self.0.as_deref().into_iter().flat_map(|s| s.split('\n'))
    }

    pub fn contains(&self, needle: &str) -> bool {
        self.0.as_deref().is_some_and(|s| s.contains(needle))
    }

    pub fn into_option(self) -> Option<String> {
        self.0
    }
}

impl From<Option<String>> for Notes {
    fn from(value: Option<String>) -> Self {
        Self(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_entry_has_no_leading_newline() {
        let mut notes = Notes::empty();
        notes.append_reason("Voided", "Product returned");
        assert_eq!(notes.as_deref(), Some("Voided: Product returned"));
    }

    #[test]
    fn empty_string_counts_as_no_prior_text() {
        let mut notes = Notes::from_option(Some(String::new()));
        assert!(notes.is_empty());
        notes.append("Returned on 2024-02-15");
        assert_eq!(notes.as_deref(), Some("Returned on 2024-02-15"));
    }

    #[test]
    fn entries_keep_call_order() {
        let mut notes = Notes::from_option(Some("Original note".to_string()));
        notes.append_reason("Claim rejected", "X");
        notes.append_reason("Claim rejected", "Y");
        assert_eq!(
            notes.as_deref(),
            Some("Original note\nClaim rejected: X\nClaim rejected: Y")
        );
        let entries: Vec<_> = notes.entries().collect();
        assert_eq!(entries, ["Original note", "Claim rejected: X", "Claim rejected: Y"]);
    }
}
