use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use rayon::prelude::*;
use tracing::{debug, info};

use crate::core::{
    administration::score_administration, aggregate::aggregate, budget::score_budget,
    climate::score_climate, culture::score_culture, hobbies::score_hobbies,
    reference::ReferenceData, region::score_region,
};
use crate::models::{CategoryWeights, MatchResult, Town, UserPreference};

/// Default number of explanation factors kept per result
pub const DEFAULT_TOP_FACTORS: usize = 5;

/// Result of ranking a catalog
#[derive(Debug)]
pub struct RankedMatches {
    pub matches: Vec<MatchResult>,
    pub total_candidates: usize,
    pub cancelled: bool,
}

/// Scores towns for a user and ranks them.
///
/// # Pipeline Stages
/// 1. Six category scorers (region, climate, culture, hobbies, administration, budget)
/// 2. Weighted aggregation with explanations and advisories
/// 3. Deterministic ranking and truncation
///
/// The matcher holds only immutable state, so one instance can be shared
/// across threads and requests.
#[derive(Debug, Clone)]
pub struct Matcher {
    weights: CategoryWeights,
    reference: Arc<ReferenceData>,
    top_factor_limit: usize,
}

impl Matcher {
    pub fn new(weights: CategoryWeights, reference: Arc<ReferenceData>) -> Self {
        Self {
            weights,
            reference,
            top_factor_limit: DEFAULT_TOP_FACTORS,
        }
    }

    pub fn with_default_weights() -> Self {
        Self::new(CategoryWeights::default(), Arc::new(ReferenceData::embedded()))
    }

    pub fn with_top_factor_limit(mut self, limit: usize) -> Self {
        self.top_factor_limit = limit;
        self
    }

    pub fn weights(&self) -> &CategoryWeights {
        &self.weights
    }

    /// Score one town for one user. Deterministic and total: missing or
    /// malformed data lowers scores and adds warnings, it never fails.
    pub fn score_town(&self, preference: &UserPreference, town: &Town) -> MatchResult {
        let breakdown = vec![
            score_region(&preference.region, town, &self.reference),
            score_climate(&preference.climate, town),
            score_culture(&preference.culture, town),
            score_hobbies(&preference.hobbies, town, &self.reference),
            score_administration(&preference.administration, town),
            score_budget(&preference.budget, town),
        ];

        aggregate(preference, town, breakdown, &self.weights, self.top_factor_limit)
    }

    /// Score every town in parallel and return the best `limit` matches
    ///
    /// # Arguments
    /// * `preference` - The user's relocation preferences
    /// * `towns` - Candidate towns
    /// * `limit` - Maximum number of matches to return
    pub fn rank_towns(&self, preference: &UserPreference, towns: &[Town], limit: usize) -> Vec<MatchResult> {
        let never = AtomicBool::new(false);
        self.rank_towns_cancellable(preference, towns, limit, &never).matches
    }

    /// Like [`Matcher::rank_towns`], but stops scoring once `cancel_flag` is
    /// set. Towns already scored are still ranked and returned.
    pub fn rank_towns_cancellable(
        &self,
        preference: &UserPreference,
        towns: &[Town],
        limit: usize,
        cancel_flag: &AtomicBool,
    ) -> RankedMatches {
        let total_candidates = towns.len();
        debug!(total_candidates, limit, "Ranking towns");

        let mut matches: Vec<MatchResult> = towns
            .par_iter()
            .filter_map(|town| {
                if is_cancelled(cancel_flag) {
                    return None;
                }
                Some(self.score_town(preference, town))
            })
            .collect();

        let cancelled = is_cancelled(cancel_flag);
        sort_matches(&mut matches);
        matches.truncate(limit);

        info!(
            total_candidates,
            returned = matches.len(),
            cancelled,
            "Ranked towns"
        );

        RankedMatches {
            matches,
            total_candidates,
            cancelled,
        }
    }
}

impl Default for Matcher {
    fn default() -> Self {
        Self::with_default_weights()
    }
}

fn is_cancelled(cancel_flag: &AtomicBool) -> bool {
    cancel_flag.load(Ordering::Relaxed)
}

/// Overall score descending, then town name, then id
pub fn sort_matches(matches: &mut [MatchResult]) {
    matches.sort_by(|a, b| {
        b.overall
            .cmp(&a.overall)
            .then_with(|| a.town_name.cmp(&b.town_name))
            .then_with(|| a.town_id.cmp(&b.town_id))
    });
}
