//! Years-of-experience detection and organization extraction

use log::debug;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::num::IntErrorKind;
use std::sync::Arc;
use unicode_segmentation::UnicodeSegmentation;

/// Named-entity capability that tags organizations in free text
pub trait OrganizationRecognizer: Send + Sync {
    /// Organization mentions in document order; repeats are kept
    fn extract_organizations(&self, text: &str) -> Vec<String>;
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExperienceInfo {
    pub years_of_experience: u32,
    pub companies: Vec<String>,
    /// Reserved; nothing populates job titles yet
    pub job_titles: BTreeSet<String>,
    /// Reserved; nothing populates experience sections yet
    pub experience_sections: Vec<String>,
}

pub struct ExperienceExtractor {
    year_patterns: Vec<Regex>,
    recognizer: Option<Arc<dyn OrganizationRecognizer>>,
}

impl Default for ExperienceExtractor {
    fn default() -> Self {
        Self::new(None)
    }
}

impl ExperienceExtractor {
    /// `recognizer` is optional; without one `companies` stays empty
    pub fn new(recognizer: Option<Arc<dyn OrganizationRecognizer>>) -> Self {
        // Priority order matters: the first pattern with any match decides
        let year_patterns = [
            r"(\d+)\+?\s*years?\s*(?:of\s*)?experience",
            r"(\d+)\+?\s*yrs?\s*(?:of\s*)?experience",
            r"experience\s*:?\s*(\d+)\+?\s*years?",
        ]
        .iter()
        .map(|p| Regex::new(p).expect("Invalid years-of-experience regex"))
        .collect();

        if recognizer.is_none() {
            debug!("No organization recognizer configured; company extraction disabled");
        }

        Self {
            year_patterns,
            recognizer,
        }
    }

    pub fn extract(&self, text: &str) -> ExperienceInfo {
        let companies = self
            .recognizer
            .as_ref()
            .map(|r| r.extract_organizations(text))
            .unwrap_or_default();

        ExperienceInfo {
            years_of_experience: self.years_of_experience(text),
            companies,
            ..ExperienceInfo::default()
        }
    }

    /// Largest year count captured by the first pattern that matches at all
    pub fn years_of_experience(&self, text: &str) -> u32 {
        let lowered = text.to_lowercase();

        for pattern in &self.year_patterns {
            let years: Vec<u32> = pattern
                .captures_iter(&lowered)
                .filter_map(|cap| cap.get(1))
                .filter_map(|m| match m.as_str().parse::<u32>() {
                    Ok(years) => Some(years),
                    // An oversized count is still a match for this pattern
                    Err(e) if *e.kind() == IntErrorKind::PosOverflow => Some(u32::MAX),
                    Err(_) => None,
                })
                .collect();

            if let Some(max) = years.into_iter().max() {
                return max;
            }
        }

        0
    }

    pub fn has_recognizer(&self) -> bool {
        self.recognizer.is_some()
    }
}

/// Lightweight organization tagger built on capitalization and corporate
/// suffixes. It recognizes "Acme Corp", "Globex Technologies", "Initech LLC",
/// and capitalized names introduced by "at" ("Engineer at Hooli").
pub struct PatternOrganizationRecognizer {
    suffixes: BTreeSet<&'static str>,
    at_pattern: Regex,
}

impl Default for PatternOrganizationRecognizer {
    fn default() -> Self {
        Self::new()
    }
}

impl PatternOrganizationRecognizer {
    pub fn new() -> Self {
        let suffixes = [
            "inc", "corp", "corporation", "llc", "ltd", "limited", "gmbh", "co",
            "company", "technologies", "technology", "labs", "systems", "solutions",
            "group", "university", "college", "bank",
        ]
        .into_iter()
        .collect();

        let at_pattern = Regex::new(r"\bat[ \t]+((?:[A-Z][\w&.-]*)(?:[ \t]+[A-Z][\w&.-]*)*)")
            .expect("Invalid organization regex");

        Self {
            suffixes,
            at_pattern,
        }
    }

    fn is_capitalized(word: &str) -> bool {
        word.chars().next().is_some_and(char::is_uppercase)
    }

    /// True when the run goes on with another suffix ("Technologies Inc"),
    /// so only the longest span of the run is reported
    fn suffix_continues(&self, line: &str, words: &[(usize, &str)], idx: usize) -> bool {
        let (start, word) = words[idx];
        match words.get(idx + 1) {
            Some(&(next_start, next)) => {
                line[start + word.len()..next_start].chars().all(char::is_whitespace)
                    && Self::is_capitalized(next)
                    && self.suffixes.contains(next.to_lowercase().as_str())
            }
            None => false,
        }
    }

    fn suffix_matches(&self, text: &str) -> Vec<(usize, String)> {
        let mut found = Vec::new();

        for line in text.lines() {
            let line_offset = line.as_ptr() as usize - text.as_ptr() as usize;
            let words: Vec<(usize, &str)> = line.unicode_word_indices().collect();

            for (idx, (_, word)) in words.iter().enumerate() {
                if idx == 0 || !self.suffixes.contains(word.to_lowercase().as_str()) {
                    continue;
                }
                if !Self::is_capitalized(word) || self.suffix_continues(line, &words, idx) {
                    continue;
                }

                // Walk back over the capitalized run preceding the suffix
                let mut first = idx;
                while first > 0 {
                    let (prev_start, prev) = words[first - 1];
                    let gap = &line[prev_start + prev.len()..words[first].0];
                    if !Self::is_capitalized(prev) || !gap.chars().all(char::is_whitespace) {
                        break;
                    }
                    first -= 1;
                }
                if first == idx {
                    continue;
                }

                let start = words[first].0;
                let end = words[idx].0 + word.len();
                found.push((line_offset + start, line[start..end].to_string()));
            }
        }

        found
    }
}

impl OrganizationRecognizer for PatternOrganizationRecognizer {
    fn extract_organizations(&self, text: &str) -> Vec<String> {
        let mut found = self.suffix_matches(text);

        for cap in self.at_pattern.captures_iter(text) {
            if let Some(m) = cap.get(1) {
                let name = m.as_str().trim_end_matches(&['.', '-'][..]).to_string();
                let overlaps = found
                    .iter()
                    .any(|(pos, existing)| *pos < m.end() && m.start() < pos + existing.len());
                if !name.is_empty() && !overlaps {
                    found.push((m.start(), name));
                }
            }
        }

        found.sort_by_key(|(pos, _)| *pos);
        found.into_iter().map(|(_, name)| name).collect()
    }
}
