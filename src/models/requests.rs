use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::domain::UserPreference;

/// Request to rank the catalog for one user
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RankRequest {
    #[validate(nested)]
    pub preference: UserPreference,
    /// Result count; the configured default when absent
    #[serde(default)]
    #[validate(range(min = 1))]
    pub limit: Option<u16>,
    #[serde(default)]
    #[serde(alias = "excludeTownIds", rename = "excludeTownIds")]
    pub exclude_town_ids: Vec<String>,
}
