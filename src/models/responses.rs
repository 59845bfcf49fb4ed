use std::fmt;

use serde::{Deserialize, Serialize};

/// The six scoring categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Region,
    Climate,
    Culture,
    Hobbies,
    Administration,
    Budget,
}

impl Category {
    pub const ALL: [Category; 6] = [
        Category::Region,
        Category::Climate,
        Category::Culture,
        Category::Hobbies,
        Category::Administration,
        Category::Budget,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Category::Region => "region",
            Category::Climate => "climate",
            Category::Culture => "culture",
            Category::Hobbies => "hobbies",
            Category::Administration => "administration",
            Category::Budget => "budget",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One explanation line: what happened and how many points it earned
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Factor {
    pub category: Category,
    pub description: String,
    pub points: f64,
}

/// Result of a single category scorer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryScore {
    pub category: Category,
    /// 0-100
    pub score: u8,
    /// Points available on the scorer's internal scale; factor points are
    /// expressed on that scale
    #[serde(rename = "maxPoints")]
    pub max_points: f64,
    pub factors: Vec<Factor>,
    pub warnings: Vec<String>,
}

/// Per-category scores, flattened for display
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryScores {
    pub region: u8,
    pub climate: u8,
    pub culture: u8,
    pub hobbies: u8,
    pub administration: u8,
    pub budget: u8,
}

impl CategoryScores {
    pub fn get(&self, category: Category) -> u8 {
        match category {
            Category::Region => self.region,
            Category::Climate => self.climate,
            Category::Culture => self.culture,
            Category::Hobbies => self.hobbies,
            Category::Administration => self.administration,
            Category::Budget => self.budget,
        }
    }

    pub fn set(&mut self, category: Category, score: u8) {
        match category {
            Category::Region => self.region = score,
            Category::Climate => self.climate = score,
            Category::Culture => self.culture = score,
            Category::Hobbies => self.hobbies = score,
            Category::Administration => self.administration = score,
            Category::Budget => self.budget = score,
        }
    }
}

/// Qualitative label for an overall score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchQuality {
    Excellent,
    Good,
    Fair,
    Poor,
}

impl MatchQuality {
    pub fn from_score(score: u8) -> Self {
        match score {
            85.. => MatchQuality::Excellent,
            70..=84 => MatchQuality::Good,
            50..=69 => MatchQuality::Fair,
            _ => MatchQuality::Poor,
        }
    }
}

/// Scored and explained match of one town for one user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    #[serde(rename = "townId")]
    pub town_id: String,
    #[serde(rename = "townName")]
    pub town_name: String,
    pub country: String,
    /// 0-100
    pub overall: u8,
    pub quality: MatchQuality,
    pub categories: CategoryScores,
    pub breakdown: Vec<CategoryScore>,
    #[serde(rename = "topFactors")]
    pub top_factors: Vec<Factor>,
    pub warnings: Vec<String>,
    #[serde(rename = "preferenceCoverage")]
    pub preference_coverage: f64,
    #[serde(rename = "personalizationNote")]
    pub personalization_note: Option<String>,
}

/// Response written by the ranking binary
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankResponse {
    pub matches: Vec<MatchResult>,
    pub total_results: usize,
    pub skipped_records: usize,
    pub cancelled: bool,
}
