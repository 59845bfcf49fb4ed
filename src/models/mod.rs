// Model exports
pub mod domain;
pub mod lenient;
pub mod requests;
pub mod responses;
pub mod tags;

pub use domain::{
    AdministrationPreference, BudgetPreference, CategoryWeights, ClimatePreference, CulturePreference,
    HobbiesPreference, RegionPreference, Town, UserPreference,
};
pub use requests::RankRequest;
pub use responses::{
    Category, CategoryScore, CategoryScores, Factor, MatchQuality, MatchResult, RankResponse,
};
pub use tags::{Band, UnknownTag};
