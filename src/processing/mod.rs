//! Skill extraction, scoring and recommendation

pub mod analyzer;
pub mod ats_matcher;
pub mod embeddings;
pub mod experience;
pub mod gap_analysis;
pub mod recommender;
pub mod semantic;
pub mod skill_extractor;
pub mod structure;
pub mod taxonomy;
pub mod text_processor;

/// Round to two decimal places, the precision used for reported scores
pub(crate) fn round2(value: f32) -> f32 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round2() {
        assert_eq!(round2(64.004), 64.0);
        assert_eq!(round2(66.666_67), 66.67);
        assert_eq!(round2(0.0), 0.0);
    }
}
