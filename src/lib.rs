//! Retire Match - preference-matching engine for retirement relocation
//!
//! This library scores candidate towns against a retiree's stated preferences
//! across six categories (region, climate, culture, hobbies, administration,
//! budget), aggregates them into an explained 0-100 match, and ranks a catalog.

pub mod config;
pub mod core;
pub mod models;
pub mod services;

// Re-export commonly used types
pub use crate::core::{normalize::normalize, Matcher, RankedMatches, ReferenceData};
pub use crate::models::{CategoryWeights, MatchResult, RankRequest, RankResponse, Town, UserPreference};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_exports() {
        let matcher = Matcher::default();
        let result = matcher.score_town(&UserPreference::default(), &Town::new("1", "Lisbon", "Portugal"));
        assert_eq!(result.overall, 100);
        assert_eq!(normalize("Coastal"), normalize("coastal"));
    }
}
