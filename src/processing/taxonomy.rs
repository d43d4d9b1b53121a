//! Categorized skill vocabulary loaded from TOML

use crate::config::ExtractionConfig;
use crate::error::{Result, ResumeMatcherError};
use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashSet};
use std::path::Path;

const BUNDLED_TAXONOMY: &str = include_str!("../../data/skill_taxonomy.toml");

/// A named group of canonical skill terms, in file order
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkillCategory {
    pub name: String,
    pub skills: Vec<String>,
}

/// Immutable skill dictionary. Terms keep the casing they were written with;
/// all lookups are case-insensitive.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkillTaxonomy {
    #[serde(rename = "category")]
    categories: Vec<SkillCategory>,
}

impl SkillTaxonomy {
    /// The taxonomy compiled into the binary
    pub fn bundled() -> Result<Self> {
        Self::from_toml_str(BUNDLED_TAXONOMY)
    }

    /// Load the taxonomy named by the extraction config, falling back to the bundled one
    pub fn from_config(config: &ExtractionConfig) -> Result<Self> {
        match &config.taxonomy_path {
            Some(path) => Self::from_path(path),
            None => Self::bundled(),
        }
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let taxonomy = Self::from_toml_str(&content)?;
        debug!(
            "Loaded skill taxonomy from {} ({} categories, {} skills)",
            path.display(),
            taxonomy.categories.len(),
            taxonomy.len()
        );
        Ok(taxonomy)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let raw: SkillTaxonomy = toml::from_str(content)
            .map_err(|e| ResumeMatcherError::Taxonomy(format!("Failed to parse taxonomy: {}", e)))?;
        Self::from_categories(raw.categories)
    }

    /// Build from in-memory categories. Blank terms are dropped and a term
    /// repeated in any casing, in any category, keeps only its first occurrence.
    pub fn from_categories(categories: Vec<SkillCategory>) -> Result<Self> {
        let mut seen_names = HashSet::new();
        let mut seen_skills = HashSet::new();
        let mut cleaned = Vec::with_capacity(categories.len());

        for category in categories {
            let name = category.name.trim().to_string();
            if name.is_empty() {
                return Err(ResumeMatcherError::Taxonomy(
                    "Skill category with an empty name".to_string(),
                ));
            }
            if !seen_names.insert(name.clone()) {
                return Err(ResumeMatcherError::Taxonomy(format!(
                    "Duplicate skill category: {}",
                    name
                )));
            }

            let skills: Vec<String> = category
                .skills
                .into_iter()
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .filter(|s| seen_skills.insert(s.to_lowercase()))
                .collect();

            cleaned.push(SkillCategory { name, skills });
        }

        Ok(Self { categories: cleaned })
    }

    pub fn categories(&self) -> &[SkillCategory] {
        &self.categories
    }

    /// Every distinct skill term across all categories
    pub fn vocabulary(&self) -> BTreeSet<&str> {
        self.categories
            .iter()
            .flat_map(|c| c.skills.iter().map(String::as_str))
            .collect()
    }

    /// Name of the first category containing `skill`
    pub fn category_of(&self, skill: &str) -> Option<&str> {
        let needle = skill.trim().to_lowercase();
        self.categories
            .iter()
            .find(|c| c.skills.iter().any(|s| s.to_lowercase() == needle))
            .map(|c| c.name.as_str())
    }

    pub fn contains(&self, skill: &str) -> bool {
        self.category_of(skill).is_some()
    }

    /// Number of distinct skill terms
    pub fn len(&self) -> usize {
        self.vocabulary().len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.iter().all(|c| c.skills.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bundled_taxonomy_loads() {
        let taxonomy = SkillTaxonomy::bundled().unwrap();
        let names: Vec<&str> = taxonomy.categories().iter().map(|c| c.name.as_str()).collect();
        assert_eq!(
            names,
            vec![
                "programming_languages",
                "web_technologies",
                "databases",
                "cloud_platforms",
                "devops_tools",
                "data_science",
                "soft_skills",
            ]
        );
        assert!(taxonomy.contains("python"));
        assert!(taxonomy.contains("Machine Learning"));
        assert_eq!(taxonomy.category_of("docker"), Some("devops_tools"));
        assert_eq!(taxonomy.category_of("cobol"), None);
    }

    #[test]
    fn test_duplicate_skills_collapsed_case_insensitively() {
        let taxonomy = SkillTaxonomy::from_categories(vec![SkillCategory {
            name: "databases".to_string(),
            skills: vec!["PostgreSQL".into(), "postgresql".into(), " ".into(), "redis".into()],
        }])
        .unwrap();

        assert_eq!(taxonomy.categories()[0].skills, vec!["PostgreSQL", "redis"]);
        assert_eq!(taxonomy.len(), 2);
    }

    #[test]
    fn test_case_variants_across_categories_keep_first() {
        let content = r#"
            [[category]]
            name = "devops"
            skills = ["Git", "Docker"]

            [[category]]
            name = "tools"
            skills = ["git", "jira"]
        "#;
        let taxonomy = SkillTaxonomy::from_toml_str(content).unwrap();

        assert_eq!(taxonomy.len(), 3);
        assert_eq!(taxonomy.categories()[1].skills, vec!["jira"]);
        assert_eq!(taxonomy.category_of("GIT"), Some("devops"));
    }

    #[test]
    fn test_duplicate_category_rejected() {
        let content = r#"
            [[category]]
            name = "tools"
            skills = ["git"]

            [[category]]
            name = "tools"
            skills = ["docker"]
        "#;
        assert!(matches!(
            SkillTaxonomy::from_toml_str(content),
            Err(ResumeMatcherError::Taxonomy(_))
        ));
    }

    #[test]
    fn test_malformed_taxonomy_rejected() {
        assert!(SkillTaxonomy::from_toml_str("[[category]]\nname = 3").is_err());
    }
}
