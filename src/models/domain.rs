use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::lenient;
use crate::models::responses::Category;
use crate::models::tags::{
    EnglishProficiency, ExpatCommunitySize, GeographicFeature, HumidityLevel, LanguageComfort,
    PaceOfLife, PrecipitationLevel, QualityLevel, SeasonalPreference, SeasonalVariation,
    SunshineLevel, TemperatureBand, UrbanRural, VegetationType,
};

/// A user's relocation preferences, one sub-object per scoring category.
///
/// Every field is optional. An empty list or `None` means the user is open to
/// anything for that sub-facet.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct UserPreference {
    #[serde(alias = "user_id")]
    pub id: Option<String>,
    #[serde(alias = "region_preferences")]
    pub region: RegionPreference,
    #[serde(alias = "climate_preferences")]
    pub climate: ClimatePreference,
    #[serde(alias = "culture_preferences")]
    #[validate(nested)]
    pub culture: CulturePreference,
    #[serde(alias = "hobbies_preferences")]
    pub hobbies: HobbiesPreference,
    #[serde(alias = "admin_preferences")]
    pub administration: AdministrationPreference,
    #[serde(alias = "costs", alias = "cost_preferences")]
    #[validate(nested)]
    pub budget: BudgetPreference,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegionPreference {
    #[serde(deserialize_with = "lenient::string_list")]
    pub countries: Vec<String>,
    #[serde(deserialize_with = "lenient::string_list")]
    pub regions: Vec<String>,
    #[serde(deserialize_with = "lenient::string_list")]
    pub provinces: Vec<String>,
    #[serde(deserialize_with = "lenient::tag_list")]
    pub geographic_features: Vec<GeographicFeature>,
    #[serde(deserialize_with = "lenient::tag_list")]
    pub vegetation_types: Vec<VegetationType>,
}

impl RegionPreference {
    pub fn is_open(&self) -> bool {
        self.countries.is_empty()
            && self.regions.is_empty()
            && self.provinces.is_empty()
            && self.geographic_features.is_empty()
            && self.vegetation_types.is_empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClimatePreference {
    #[serde(alias = "summer_climate_preference")]
    #[serde(deserialize_with = "lenient::tag_list")]
    pub summer: Vec<TemperatureBand>,
    #[serde(alias = "winter_climate_preference")]
    #[serde(deserialize_with = "lenient::tag_list")]
    pub winter: Vec<TemperatureBand>,
    #[serde(alias = "humidity_level")]
    #[serde(deserialize_with = "lenient::tag_list")]
    pub humidity: Vec<HumidityLevel>,
    #[serde(deserialize_with = "lenient::tag_list")]
    pub sunshine: Vec<SunshineLevel>,
    #[serde(deserialize_with = "lenient::tag_list")]
    pub precipitation: Vec<PrecipitationLevel>,
    #[serde(alias = "seasonal_preference")]
    #[serde(deserialize_with = "lenient::tag")]
    pub seasonal: Option<SeasonalPreference>,
}

impl ClimatePreference {
    pub fn is_open(&self) -> bool {
        self.summer.is_empty()
            && self.winter.is_empty()
            && self.humidity.is_empty()
            && self.sunshine.is_empty()
            && self.precipitation.is_empty()
            && self.seasonal.is_none()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct CulturePreference {
    #[serde(deserialize_with = "lenient::tag")]
    pub language_comfort: Option<LanguageComfort>,
    #[serde(deserialize_with = "lenient::string_list")]
    pub languages_spoken: Vec<String>,
    #[serde(alias = "expat_community_preference")]
    #[serde(deserialize_with = "lenient::tag_list")]
    pub expat_community: Vec<ExpatCommunitySize>,
    #[serde(deserialize_with = "lenient::tag_list")]
    pub urban_rural: Vec<UrbanRural>,
    #[serde(deserialize_with = "lenient::tag_list")]
    pub pace_of_life: Vec<PaceOfLife>,
    /// Importance of dining and nightlife, 1 (indifferent) to 5
    #[validate(range(min = 1, max = 5))]
    pub dining_importance: Option<u8>,
    #[validate(range(min = 1, max = 5))]
    pub cultural_events_importance: Option<u8>,
    #[validate(range(min = 1, max = 5))]
    pub museums_importance: Option<u8>,
}

impl CulturePreference {
    pub fn is_open(&self) -> bool {
        let indifferent = |importance: Option<u8>| importance.map_or(true, |v| v <= 1);

        self.language_comfort.is_none()
            && self.languages_spoken.is_empty()
            && self.expat_community.is_empty()
            && self.urban_rural.is_empty()
            && self.pace_of_life.is_empty()
            && indifferent(self.dining_importance)
            && indifferent(self.cultural_events_importance)
            && indifferent(self.museums_importance)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HobbiesPreference {
    #[serde(deserialize_with = "lenient::string_list")]
    pub activities: Vec<String>,
    #[serde(deserialize_with = "lenient::string_list")]
    pub interests: Vec<String>,
}

impl HobbiesPreference {
    pub fn is_open(&self) -> bool {
        self.activities.is_empty() && self.interests.is_empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdministrationPreference {
    #[serde(alias = "healthcare_quality")]
    #[serde(deserialize_with = "lenient::tag")]
    pub healthcare: Option<QualityLevel>,
    #[serde(alias = "safety_importance")]
    #[serde(deserialize_with = "lenient::tag")]
    pub safety: Option<QualityLevel>,
    #[serde(alias = "visa_preference")]
    #[serde(deserialize_with = "lenient::tag")]
    pub visa: Option<QualityLevel>,
    pub citizenship: Option<String>,
    pub income_tax_sensitive: bool,
    pub property_tax_sensitive: bool,
    pub sales_tax_sensitive: bool,
}

impl AdministrationPreference {
    pub fn is_tax_sensitive(&self) -> bool {
        self.income_tax_sensitive || self.property_tax_sensitive || self.sales_tax_sensitive
    }

    pub fn is_open(&self) -> bool {
        self.healthcare.is_none()
            && self.safety.is_none()
            && self.visa.is_none()
            && !self.is_tax_sensitive()
    }
}

/// Budget limits, in the same currency as the town cost figures
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct BudgetPreference {
    #[serde(alias = "total_monthly_cost", alias = "total_monthly_budget")]
    #[validate(range(exclusive_min = 0.0))]
    pub total_monthly: Option<f64>,
    #[serde(alias = "max_monthly_rent")]
    #[validate(range(exclusive_min = 0.0))]
    pub max_rent: Option<f64>,
    #[validate(range(exclusive_min = 0.0))]
    pub max_home_price: Option<f64>,
    #[serde(alias = "monthly_healthcare_cost")]
    #[validate(range(exclusive_min = 0.0))]
    pub max_healthcare: Option<f64>,
}

impl BudgetPreference {
    pub fn is_open(&self) -> bool {
        self.total_monthly.is_none()
            && self.max_rent.is_none()
            && self.max_home_price.is_none()
            && self.max_healthcare.is_none()
    }
}

/// Candidate town with the facts the scorers compare against.
///
/// Field aliases accept the historical catalog column names.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct Town {
    pub id: String,
    #[serde(alias = "town_name")]
    pub name: String,
    pub country: String,
    #[serde(alias = "region", alias = "state")]
    pub province: Option<String>,
    /// Broader region string, possibly comma-joined
    pub geo_region: Option<String>,
    /// Membership tags (regions, alliances, continents)
    #[serde(deserialize_with = "lenient::string_list")]
    pub regions: Vec<String>,

    #[serde(alias = "geographic_features_actual")]
    #[serde(deserialize_with = "lenient::tag_list")]
    pub geographic_features: Vec<GeographicFeature>,
    #[serde(alias = "vegetation_type_actual")]
    #[serde(deserialize_with = "lenient::tag_list")]
    pub vegetation_types: Vec<VegetationType>,
    #[serde(deserialize_with = "lenient::string_list")]
    pub water_bodies: Vec<String>,

    #[serde(alias = "summer_climate_actual")]
    #[serde(deserialize_with = "lenient::tag")]
    pub summer_climate: Option<TemperatureBand>,
    #[serde(alias = "winter_climate_actual")]
    #[serde(deserialize_with = "lenient::tag")]
    pub winter_climate: Option<TemperatureBand>,
    pub avg_temp_summer: Option<f64>,
    pub avg_temp_winter: Option<f64>,
    #[serde(alias = "humidity_level_actual")]
    #[serde(deserialize_with = "lenient::tag")]
    pub humidity: Option<HumidityLevel>,
    #[serde(alias = "sunshine_level_actual")]
    #[serde(deserialize_with = "lenient::tag")]
    pub sunshine: Option<SunshineLevel>,
    #[serde(alias = "precipitation_level_actual")]
    #[serde(deserialize_with = "lenient::tag")]
    pub precipitation: Option<PrecipitationLevel>,
    pub sunshine_hours: Option<f64>,
    #[serde(alias = "annual_rainfall")]
    pub annual_rainfall_mm: Option<f64>,
    #[serde(alias = "seasonal_variation_actual")]
    #[serde(deserialize_with = "lenient::tag")]
    pub seasonal_variation: Option<SeasonalVariation>,

    pub primary_language: Option<String>,
    #[serde(deserialize_with = "lenient::string_list")]
    pub languages_spoken: Vec<String>,
    #[serde(alias = "english_proficiency_level")]
    #[serde(deserialize_with = "lenient::tag")]
    pub english_proficiency: Option<EnglishProficiency>,
    #[serde(deserialize_with = "lenient::tag")]
    pub expat_community_size: Option<ExpatCommunitySize>,
    #[serde(alias = "urban_rural_character")]
    #[serde(deserialize_with = "lenient::tag")]
    pub urban_rural: Option<UrbanRural>,
    #[serde(alias = "pace_of_life_actual")]
    #[serde(deserialize_with = "lenient::tag")]
    pub pace_of_life: Option<PaceOfLife>,
    #[validate(range(min = 1, max = 5))]
    pub restaurants_rating: Option<u8>,
    #[validate(range(min = 1, max = 5))]
    pub nightlife_rating: Option<u8>,
    #[validate(range(min = 1, max = 5))]
    pub cultural_events_rating: Option<u8>,
    #[validate(range(min = 1, max = 5))]
    pub museums_rating: Option<u8>,

    #[serde(deserialize_with = "lenient::string_list")]
    pub activities_available: Vec<String>,
    #[serde(deserialize_with = "lenient::string_list")]
    pub interests_supported: Vec<String>,

    #[validate(range(min = 0.0, max = 10.0))]
    pub healthcare_score: Option<f64>,
    #[validate(range(min = 0.0, max = 10.0))]
    pub safety_score: Option<f64>,
    #[serde(deserialize_with = "lenient::string_list")]
    pub visa_on_arrival_countries: Vec<String>,
    #[serde(deserialize_with = "lenient::string_list")]
    pub easy_residency_countries: Vec<String>,
    pub retirement_visa_available: Option<bool>,
    #[validate(range(min = 0.0, max = 100.0))]
    pub income_tax_rate_pct: Option<f64>,
    #[validate(range(min = 0.0, max = 100.0))]
    pub property_tax_rate_pct: Option<f64>,
    #[validate(range(min = 0.0, max = 100.0))]
    pub sales_tax_rate_pct: Option<f64>,
    #[serde(alias = "tax_haven_status")]
    pub tax_haven: Option<bool>,
    pub foreign_income_taxed: Option<bool>,

    #[serde(alias = "cost_of_living_usd", alias = "typical_monthly_living_cost")]
    pub cost_of_living: Option<f64>,
    #[serde(alias = "typical_rent_1bed", alias = "rent_1bed")]
    pub typical_rent: Option<f64>,
    pub typical_home_price: Option<f64>,
    #[serde(alias = "healthcare_cost_monthly")]
    pub healthcare_cost: Option<f64>,
}

impl Town {
    /// Convenience constructor for the identity fields; everything else is unknown.
    pub fn new(id: impl Into<String>, name: impl Into<String>, country: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            country: country.into(),
            ..Self::default()
        }
    }
}

/// Relative importance of each category in the overall score
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CategoryWeights {
    pub region: f64,
    pub climate: f64,
    pub culture: f64,
    pub hobbies: f64,
    pub administration: f64,
    pub budget: f64,
}

impl CategoryWeights {
    pub fn get(&self, category: Category) -> f64 {
        match category {
            Category::Region => self.region,
            Category::Climate => self.climate,
            Category::Culture => self.culture,
            Category::Hobbies => self.hobbies,
            Category::Administration => self.administration,
            Category::Budget => self.budget,
        }
    }

    /// Sum of the usable weights; negative or non-finite weights count as zero
    pub fn total(&self) -> f64 {
        Category::ALL.iter().map(|&c| usable_weight(self.get(c))).sum()
    }

    /// These weights, or the defaults when they cannot form a weighted mean
    pub fn effective(&self) -> Self {
        if self.total() > 0.0 {
            *self
        } else {
            Self::default()
        }
    }

    /// Weight of a category as a share of the total, 0.0-1.0
    pub fn share(&self, category: Category) -> f64 {
        let total = self.total();
        if total > 0.0 {
            usable_weight(self.get(category)) / total
        } else {
            0.0
        }
    }
}

fn usable_weight(weight: f64) -> f64 {
    if weight.is_finite() && weight > 0.0 {
        weight
    } else {
        0.0
    }
}

impl Default for CategoryWeights {
    fn default() -> Self {
        Self {
            region: 20.0,
            climate: 15.0,
            culture: 15.0,
            hobbies: 10.0,
            administration: 20.0,
            budget: 20.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_weights_sum_to_100() {
        assert_eq!(CategoryWeights::default().total(), 100.0);
        assert_eq!(CategoryWeights::default().share(Category::Hobbies), 0.1);
    }

    #[test]
    fn test_degenerate_weights_fall_back() {
        let zero = CategoryWeights {
            region: 0.0,
            climate: 0.0,
            culture: 0.0,
            hobbies: 0.0,
            administration: 0.0,
            budget: -3.0,
        };
        assert_eq!(zero.effective(), CategoryWeights::default());
    }

    #[test]
    fn test_town_accepts_catalog_aliases() {
        let town: Town = serde_json::from_str(
            r#"{
                "id": "42",
                "town_name": "Cascais",
                "country": "Portugal",
                "geographic_features_actual": ["Coastal"],
                "vegetation_type_actual": ["mediterranean"],
                "cost_of_living_usd": 2600
            }"#,
        )
        .unwrap();
        assert_eq!(town.name, "Cascais");
        assert_eq!(town.geographic_features, vec![GeographicFeature::Coastal]);
        assert_eq!(town.vegetation_types, vec![VegetationType::Mediterranean]);
        assert_eq!(town.cost_of_living, Some(2600.0));
    }

    #[test]
    fn test_open_preference() {
        let preference: UserPreference = serde_json::from_str("{}").unwrap();
        assert!(preference.region.is_open());
        assert!(preference.climate.is_open());
        assert!(preference.culture.is_open());
        assert!(preference.hobbies.is_open());
        assert!(preference.administration.is_open());
        assert!(preference.budget.is_open());
    }

    #[test]
    fn test_unknown_tag_dropped_from_record() {
        let parsed: RegionPreference =
            serde_json::from_str(r#"{"geographic_features": ["volcanic", "Lakes"], "provinces": null}"#).unwrap();
        assert_eq!(parsed.geographic_features, vec![GeographicFeature::Lake]);
        assert!(parsed.provinces.is_empty());
    }
}
