//! Text normalization and surface statistics

use regex::Regex;
use serde::{Deserialize, Serialize};

pub struct TextProcessor {
    non_word_regex: Regex,
    whitespace_regex: Regex,
    quantity_regex: Regex,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextStats {
    /// Whitespace-separated tokens
    pub word_count: usize,
    /// Characters, whitespace included
    pub character_count: usize,
}

impl Default for TextProcessor {
    fn default() -> Self {
        Self::new()
    }
}

impl TextProcessor {
    pub fn new() -> Self {
        let non_word_regex = Regex::new(r"[^\w\s]").expect("Invalid punctuation regex");
        let whitespace_regex = Regex::new(r"\s+").expect("Invalid whitespace regex");
        let quantity_regex = Regex::new(r"\d+%|\$\d+|\d+\s*(?:million|thousand|k\b)")
            .expect("Invalid quantity regex");

        Self {
            non_word_regex,
            whitespace_regex,
            quantity_regex,
        }
    }

    /// Canonical form fed to the embedding model: punctuation becomes
    /// spaces, whitespace runs collapse, everything is lowercased and trimmed.
    pub fn normalize_for_embedding(&self, text: &str) -> String {
        let without_punct = self.non_word_regex.replace_all(text, " ");
        let collapsed = self.whitespace_regex.replace_all(&without_punct, " ");
        collapsed.to_lowercase().trim().to_string()
    }

    pub fn stats(&self, text: &str) -> TextStats {
        TextStats {
            word_count: text.split_whitespace().count(),
            character_count: text.chars().count(),
        }
    }

    /// Percentages, dollar amounts, or "<n> million|thousand|k" magnitudes
    pub fn has_quantified_achievements(&self, text: &str) -> bool {
        self.quantity_regex.is_match(text)
    }

    pub fn has_contact_details(&self, text: &str) -> bool {
        let lowered = text.to_lowercase();
        ["@", "email", "phone"].iter().any(|marker| lowered.contains(marker))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_for_embedding() {
        let processor = TextProcessor::new();
        assert_eq!(
            processor.normalize_for_embedding("  Need   Python!!\n\tand Node.js, ASAP. "),
            "need python and node js asap"
        );
        assert_eq!(processor.normalize_for_embedding("!!!"), "");
        assert_eq!(processor.normalize_for_embedding(""), "");
    }

    #[test]
    fn test_normalization_is_formatting_invariant() {
        let processor = TextProcessor::new();
        assert_eq!(
            processor.normalize_for_embedding("Python Developer"),
            processor.normalize_for_embedding("python---developer...")
        );
    }

    #[test]
    fn test_stats() {
        let processor = TextProcessor::new();
        let stats = processor.stats("Jane  Doe\nRust engineer ");
        assert_eq!(stats.word_count, 4);
        assert_eq!(stats.character_count, 24);

        let stats = processor.stats("");
        assert_eq!(stats.word_count, 0);
        assert_eq!(stats.character_count, 0);
    }

    #[test]
    fn test_quantified_achievements() {
        let processor = TextProcessor::new();
        assert!(processor.has_quantified_achievements("Cut latency by 40%"));
        assert!(processor.has_quantified_achievements("Saved $120 per seat"));
        assert!(processor.has_quantified_achievements("Served 3 million users"));
        assert!(processor.has_quantified_achievements("Grew revenue to 50k"));
        assert!(!processor.has_quantified_achievements("Improved latency a lot"));
        assert!(!processor.has_quantified_achievements("Managed 50 kittens"));
    }

    #[test]
    fn test_contact_details() {
        let processor = TextProcessor::new();
        assert!(processor.has_contact_details("jane@example.com"));
        assert!(processor.has_contact_details("PHONE: 555 0100"));
        assert!(!processor.has_contact_details("Jane Doe, Rust engineer"));
    }
}
