//! Taxonomy-driven skill extraction

use crate::config::MatchMode;
use crate::error::{Result, ResumeMatcherError};
use crate::processing::taxonomy::SkillTaxonomy;
use aho_corasick::{AhoCorasick, MatchKind};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Skills found in one piece of text
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SkillSet {
    /// Every taxonomy category, with the skills found for it in taxonomy order
    pub skills_by_category: BTreeMap<String, Vec<String>>,
    /// Distinct skills across all categories
    pub all_skills: BTreeSet<String>,
}

impl SkillSet {
    pub fn len(&self) -> usize {
        self.all_skills.len()
    }

    pub fn is_empty(&self) -> bool {
        self.all_skills.is_empty()
    }

    pub fn contains(&self, skill: &str) -> bool {
        let needle = skill.to_lowercase();
        self.all_skills.iter().any(|s| s.to_lowercase() == needle)
    }

    /// Lowercased skills, for comparison against externally supplied skill lists
    pub fn normalized(&self) -> BTreeSet<String> {
        self.all_skills.iter().map(|s| s.to_lowercase()).collect()
    }
}

/// Scans text for every term of a [`SkillTaxonomy`].
///
/// Matching runs over the lowercased text with a single Aho-Corasick
/// automaton in overlapping mode, so each term is tested independently: a
/// term embedded inside another ("java" in "javascript") still counts unless
/// [`MatchMode::WordBoundary`] is selected.
pub struct SkillExtractor {
    taxonomy: SkillTaxonomy,
    matcher: AhoCorasick,
    // pattern id -> (category index, skill index)
    pattern_index: Vec<(usize, usize)>,
    match_mode: MatchMode,
}

impl SkillExtractor {
    pub fn new(taxonomy: SkillTaxonomy) -> Result<Self> {
        Self::with_match_mode(taxonomy, MatchMode::Substring)
    }

    pub fn with_match_mode(taxonomy: SkillTaxonomy, match_mode: MatchMode) -> Result<Self> {
        let mut patterns = Vec::new();
        let mut pattern_index = Vec::new();

        for (cat_idx, category) in taxonomy.categories().iter().enumerate() {
            for (skill_idx, skill) in category.skills.iter().enumerate() {
                patterns.push(skill.to_lowercase());
                pattern_index.push((cat_idx, skill_idx));
            }
        }

        let matcher = AhoCorasick::builder()
            .match_kind(MatchKind::Standard)
            .build(&patterns)
            .map_err(|e| ResumeMatcherError::Processing(format!("Failed to build skill matcher: {}", e)))?;

        Ok(Self {
            taxonomy,
            matcher,
            pattern_index,
            match_mode,
        })
    }

    /// Extract every taxonomy skill mentioned in `text`
    pub fn extract(&self, text: &str) -> SkillSet {
        let lowered = text.to_lowercase();
        let categories = self.taxonomy.categories();

        let mut hits: Vec<Vec<bool>> = categories
            .iter()
            .map(|c| vec![false; c.skills.len()])
            .collect();

        for mat in self.matcher.find_overlapping_iter(&lowered) {
            if self.match_mode == MatchMode::WordBoundary
                && !is_word_bounded(&lowered, mat.start(), mat.end())
            {
                continue;
            }
            let (cat_idx, skill_idx) = self.pattern_index[mat.pattern().as_usize()];
            hits[cat_idx][skill_idx] = true;
        }

        let mut skill_set = SkillSet::default();
        for (category, found) in categories.iter().zip(hits) {
            let matched: Vec<String> = category
                .skills
                .iter()
                .zip(found)
                .filter(|(_, hit)| *hit)
                .map(|(skill, _)| skill.clone())
                .collect();

            skill_set.all_skills.extend(matched.iter().cloned());
            skill_set.skills_by_category.insert(category.name.clone(), matched);
        }

        skill_set
    }

    pub fn taxonomy(&self) -> &SkillTaxonomy {
        &self.taxonomy
    }

    pub fn match_mode(&self) -> MatchMode {
        self.match_mode
    }
}

fn is_word_bounded(text: &str, start: usize, end: usize) -> bool {
    let before = text[..start].chars().next_back();
    let after = text[end..].chars().next();
    !before.is_some_and(char::is_alphanumeric) && !after.is_some_and(char::is_alphanumeric)
}
