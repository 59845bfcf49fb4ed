// Unit tests for Retire Match

use retire_match::core::{
    budget_ratio_score,
    normalize::{contains_normalized, intersects, normalize, split_list},
    score_administration, score_budget, score_climate, score_culture, score_hobbies, score_region,
    Matcher, ReferenceData,
};
use retire_match::models::tags::{
    GeographicFeature, LanguageComfort, QualityLevel, SeasonalPreference, TemperatureBand, VegetationType,
};
use retire_match::models::{
    AdministrationPreference, BudgetPreference, ClimatePreference, CulturePreference, HobbiesPreference,
    RegionPreference, Town, UserPreference,
};

fn spain_preference() -> RegionPreference {
    RegionPreference {
        countries: vec!["Spain".to_string()],
        geographic_features: vec![GeographicFeature::Coastal],
        vegetation_types: vec![VegetationType::Mediterranean],
        ..RegionPreference::default()
    }
}

#[test]
fn test_normalize_equivalences() {
    assert_eq!(normalize("Coastal"), normalize("coastal"));
    assert_eq!(normalize("  Arts & Crafts "), "art_and_craft");
    assert_eq!(normalize("Mountains"), "mountain");
    assert_eq!(normalize("Beaches"), "beach");
    assert_eq!(normalize("bus"), "bus");
    assert_eq!(normalize("Tennis"), "tennis");
}

#[test]
fn test_normalize_collections() {
    assert_eq!(split_list("Southern Europe, Mediterranean"), vec!["southern_europe", "mediterranean"]);
    assert!(contains_normalized(&["Lake Chapala", "Rivers"], "river"));
    assert!(intersects(&["Golf", "Tennis"], &["tennis "]));
    assert!(!intersects(&["Golf"], &["sailing"]));
}

#[test]
fn test_region_spain_coastal_scores_100() {
    let town = Town {
        geographic_features: vec![GeographicFeature::Coastal, GeographicFeature::Plains],
        vegetation_types: vec![VegetationType::Mediterranean],
        ..Town::new("1", "Valencia", "Spain")
    };
    assert_eq!(score_region(&spain_preference(), &town, &ReferenceData::embedded()).score, 100);
}

#[test]
fn test_region_spain_mountain_scores_67() {
    let town = Town {
        geographic_features: vec![GeographicFeature::Mountain],
        vegetation_types: vec![VegetationType::Mediterranean],
        ..Town::new("2", "Granada", "Spain")
    };
    assert_eq!(score_region(&spain_preference(), &town, &ReferenceData::embedded()).score, 67);
}

#[test]
fn test_region_missing_vegetation_warns() {
    let preference = RegionPreference {
        vegetation_types: vec![VegetationType::Mediterranean],
        ..RegionPreference::default()
    };
    let town = Town::new("3", "Unknown", "Spain");
    let result = score_region(&preference, &town, &ReferenceData::embedded());
    let vegetation = result.factors.last().unwrap();
    assert_eq!(vegetation.points, 0.0);
    assert!(result.warnings.contains(&"vegetation data unavailable".to_string()));

    let user = UserPreference {
        region: preference,
        ..UserPreference::default()
    };
    let matched = Matcher::with_default_weights().score_town(&user, &town);
    assert!(matched.warnings.contains(&"vegetation data unavailable".to_string()));
}

#[test]
fn test_region_country_beats_region() {
    let preference = RegionPreference {
        countries: vec!["Spain".to_string()],
        regions: vec!["Caribbean".to_string()],
        ..RegionPreference::default()
    };
    let result = score_region(&preference, &Town::new("4", "Burgos", "Spain"), &ReferenceData::embedded());
    assert_eq!(result.factors[0].points, 40.0);
}

#[test]
fn test_climate_numeric_fallback() {
    let preference = ClimatePreference {
        summer: vec![TemperatureBand::Hot],
        seasonal: Some(SeasonalPreference::SummerFocused),
        ..ClimatePreference::default()
    };
    let town = Town {
        avg_temp_summer: Some(31.0),
        ..Town::new("5", "Seville", "Spain")
    };
    assert_eq!(score_climate(&preference, &town).score, 100);
}

#[test]
fn test_culture_english_only_in_english_town() {
    let preference = CulturePreference {
        language_comfort: Some(LanguageComfort::EnglishOnly),
        ..CulturePreference::default()
    };
    let town = Town {
        primary_language: Some("English".to_string()),
        ..Town::new("6", "Sarasota", "United States")
    };
    assert_eq!(score_culture(&preference, &town).score, 100);
}

#[test]
fn test_hobbies_ratio() {
    let preference = HobbiesPreference {
        activities: vec!["golf".to_string(), "tennis".to_string(), "sailing".to_string(), "fishing".to_string()],
        interests: vec![],
    };
    let town = Town {
        activities_available: vec!["Golf".to_string(), "Fishing".to_string()],
        ..Town::new("7", "Naples", "United States")
    };
    assert_eq!(score_hobbies(&preference, &town, &ReferenceData::embedded()).score, 50);
}

#[test]
fn test_administration_average_of_parts() {
    let preference = AdministrationPreference {
        healthcare: Some(QualityLevel::Functional),
        ..AdministrationPreference::default()
    };
    let town = Town {
        healthcare_score: Some(6.0),
        ..Town::new("8", "Merida", "Mexico")
    };
    // (60 + 100 + 100 + 100) / 4
    assert_eq!(score_administration(&preference, &town).score, 90);
}

#[test]
fn test_budget_ratio_monotonic_table() {
    let mut previous = 0;
    for tenths in 1..=30 {
        let score = budget_ratio_score(Some(f64::from(tenths) * 100.0), Some(1000.0));
        assert!(score >= previous);
        previous = score;
    }
    assert_eq!(previous, 85);
}

#[test]
fn test_budget_sentinel_when_cost_missing() {
    let preference = BudgetPreference {
        total_monthly: Some(2500.0),
        ..BudgetPreference::default()
    };
    let result = score_budget(&preference, &Town::new("9", "Unknown", "Nowhere"));
    assert_eq!(result.score, 0);
    assert_eq!(result.factors[0].points, 0.0);
    assert!(result.warnings.contains(&"cost of living data unavailable".to_string()));
}

#[test]
fn test_budget_even_ratio_scores_55() {
    let preference = BudgetPreference {
        total_monthly: Some(2000.0),
        ..BudgetPreference::default()
    };
    let town = Town {
        cost_of_living: Some(2000.0),
        ..Town::new("10", "Lagos", "Portugal")
    };
    assert_eq!(score_budget(&preference, &town).score, 55);
}
