//! Combines the six category scores into one explained match result.

use crate::models::{
    Category, CategoryScore, CategoryScores, CategoryWeights, Factor, MatchQuality, MatchResult, Town,
    UserPreference,
};

/// Coverage below which a high overall score gets a personalization note
const LOW_COVERAGE: f64 = 0.4;
const HIGH_SCORE: u8 = 80;
/// Town 0-10 scores below this raise an advisory
const ADVISORY_THRESHOLD: f64 = 5.0;

pub const PERSONALIZATION_NOTE: &str =
    "Few preferences set, so high scores reflect openness more than fit. Add preferences for sharper matches.";
pub const SAFETY_ADVISORY: &str = "safety concerns may need investigation";
pub const HEALTHCARE_ADVISORY: &str = "healthcare may be limited";

/// Weighted mean of category scores, rounded and clamped to 0-100
#[inline]
pub fn weighted_overall(scores: &[CategoryScore], weights: &CategoryWeights) -> u8 {
    let weights = weights.effective();
    let overall: f64 = scores
        .iter()
        .map(|s| f64::from(s.score) * weights.share(s.category))
        .sum();
    overall.round().clamp(0.0, 100.0) as u8
}

/// Fraction of the six categories where the user expressed any preference
pub fn preference_coverage(preference: &UserPreference) -> f64 {
    let expressed = [
        !preference.region.is_open(),
        !preference.climate.is_open(),
        !preference.culture.is_open(),
        !preference.hobbies.is_open(),
        !preference.administration.is_open(),
        !preference.budget.is_open(),
    ];
    expressed.iter().filter(|&&e| e).count() as f64 / expressed.len() as f64
}

/// Build the match result for one town from its six category scores
pub fn aggregate(
    preference: &UserPreference,
    town: &Town,
    breakdown: Vec<CategoryScore>,
    weights: &CategoryWeights,
    top_factor_limit: usize,
) -> MatchResult {
    let weights = weights.effective();
    let overall = weighted_overall(&breakdown, &weights);

    let mut categories = CategoryScores::default();
    for score in &breakdown {
        categories.set(score.category, score.score);
    }

    let top_factors = top_factors(&breakdown, &weights, top_factor_limit);
    let warnings = merge_warnings(&breakdown, town);

    let preference_coverage = preference_coverage(preference);
    let personalization_note = (preference_coverage < LOW_COVERAGE && overall >= HIGH_SCORE)
        .then(|| PERSONALIZATION_NOTE.to_string());

    MatchResult {
        town_id: town.id.clone(),
        town_name: town.name.clone(),
        country: town.country.clone(),
        overall,
        quality: MatchQuality::from_score(overall),
        categories,
        breakdown,
        top_factors,
        warnings,
        preference_coverage,
        personalization_note,
    }
}

/// Positive factors re-expressed as their contribution to the overall score,
/// largest first
fn top_factors(breakdown: &[CategoryScore], weights: &CategoryWeights, limit: usize) -> Vec<Factor> {
    let mut factors: Vec<Factor> = breakdown
        .iter()
        .filter(|score| score.max_points > 0.0)
        .flat_map(|score| {
            let scale = 100.0 / score.max_points * weights.share(score.category);
            score.factors.iter().map(move |factor| Factor {
                category: factor.category,
                description: factor.description.clone(),
                points: factor.points * scale,
            })
        })
        .filter(|factor| factor.points > 0.0)
        .collect();

    factors.sort_by(|a, b| b.points.partial_cmp(&a.points).unwrap_or(std::cmp::Ordering::Equal));
    factors.truncate(limit);
    factors
}

fn merge_warnings(breakdown: &[CategoryScore], town: &Town) -> Vec<String> {
    let mut warnings: Vec<String> = Vec::new();
    let mut push = |warning: &str| {
        if !warnings.iter().any(|w| w == warning) {
            warnings.push(warning.to_string());
        }
    };

    for warning in breakdown.iter().flat_map(|score| score.warnings.iter()) {
        push(warning);
    }

    let below = |score: Option<f64>| score.is_some_and(|s| s.is_finite() && s < ADVISORY_THRESHOLD);
    if below(town.safety_score) {
        push(SAFETY_ADVISORY);
    }
    if below(town.healthcare_score) {
        push(HEALTHCARE_ADVISORY);
    }

    warnings
}
