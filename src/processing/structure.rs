//! Resume section-completeness heuristic

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionType {
    Contact,
    Experience,
    Education,
    Skills,
    Projects,
}

impl SectionType {
    pub const ALL: [SectionType; 5] = [
        SectionType::Contact,
        SectionType::Experience,
        SectionType::Education,
        SectionType::Skills,
        SectionType::Projects,
    ];

    /// Lowercase markers whose presence anywhere in the text signals the section
    pub fn trigger_keywords(&self) -> &'static [&'static str] {
        match self {
            SectionType::Contact => &["email", "phone", "@", "contact"],
            SectionType::Experience => &["experience", "work", "employment", "career"],
            SectionType::Education => &["education", "degree", "university", "college"],
            SectionType::Skills => &["skills", "technical", "proficient", "expertise"],
            SectionType::Projects => &["project", "portfolio", "github", "developed"],
        }
    }
}

impl fmt::Display for SectionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SectionType::Contact => "Contact",
            SectionType::Experience => "Experience",
            SectionType::Education => "Education",
            SectionType::Skills => "Skills",
            SectionType::Projects => "Projects",
        };
        write!(f, "{}", name)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StructureReport {
    /// 0.0 to 1.0
    pub score: f32,
    pub present_sections: Vec<SectionType>,
    pub missing_sections: Vec<SectionType>,
}

/// Scores a resume by which conventional sections it appears to contain
#[derive(Debug, Clone, Copy, Default)]
pub struct StructureScorer;

impl StructureScorer {
    const SECTION_INCREMENT: f32 = 0.2;

    pub fn new() -> Self {
        Self
    }

    pub fn score(&self, text: &str) -> f32 {
        self.report(text).score
    }

    pub fn report(&self, text: &str) -> StructureReport {
        let lowered = text.to_lowercase();
        let (present, missing): (Vec<SectionType>, Vec<SectionType>) = SectionType::ALL
            .into_iter()
            .partition(|section| {
                section
                    .trigger_keywords()
                    .iter()
                    .any(|keyword| lowered.contains(keyword))
            });

        let score = (present.len() as f32 * Self::SECTION_INCREMENT).min(1.0);

        StructureReport {
            score,
            present_sections: present,
            missing_sections: missing,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_sections_score_exactly_one() {
        let text = "Email me. Work history. Degree in CS. Skills: lots. Project list.";
        let report = StructureScorer::new().report(text);
        assert_eq!(report.score, 1.0);
        assert!(report.missing_sections.is_empty());
    }

    #[test]
    fn test_empty_text_scores_zero() {
        let report = StructureScorer::new().report("");
        assert_eq!(report.score, 0.0);
        assert_eq!(report.missing_sections.len(), 5);
    }

    #[test]
    fn test_monotonic_as_sections_are_added() {
        let scorer = StructureScorer::new();
        let fragments = ["CONTACT", " EMPLOYMENT", " UNIVERSITY", " EXPERTISE", " PORTFOLIO"];

        let mut text = String::new();
        let mut previous = scorer.score(&text);
        for fragment in fragments {
            text.push_str(fragment);
            let current = scorer.score(&text);
            assert!(current >= previous);
            previous = current;
        }
        assert_eq!(previous, 1.0);
    }

    #[test]
    fn test_repeated_keywords_do_not_inflate() {
        let scorer = StructureScorer::new();
        let once = scorer.score("experience");
        let many = scorer.score("experience work employment career experience");
        assert_eq!(once, many);
        assert!((once - 0.2).abs() < 1e-6);
    }

    #[test]
    fn test_missing_sections_reported() {
        let report = StructureScorer::new().report("jane@example.com\nEducation: BSc");
        assert_eq!(
            report.present_sections,
            vec![SectionType::Contact, SectionType::Education]
        );
        assert_eq!(
            report.missing_sections,
            vec![SectionType::Experience, SectionType::Skills, SectionType::Projects]
        );
    }
}
