// Core algorithm exports
pub mod administration;
pub mod aggregate;
pub mod budget;
pub mod climate;
pub mod culture;
pub mod hobbies;
pub mod matcher;
pub mod normalize;
pub mod reference;
pub mod region;
pub mod scorecard;

pub use administration::score_administration;
pub use aggregate::{aggregate, preference_coverage, weighted_overall};
pub use budget::{budget_ratio_score, score_budget};
pub use climate::score_climate;
pub use culture::score_culture;
pub use hobbies::score_hobbies;
pub use matcher::{sort_matches, Matcher, RankedMatches};
pub use normalize::{normalize, normalize_all, split_list};
pub use reference::{ReferenceData, ReferenceError};
pub use region::score_region;
