//! Region scoring: location, geographic features and vegetation.
//!
//! Three parts are scored on a 90-point scale and rescaled to 0-100:
//! country/region (40), geographic features (30), vegetation (20).

use std::collections::HashSet;

use crate::core::normalize::{normalize, normalized_set, split_list};
use crate::core::reference::ReferenceData;
use crate::core::scorecard::{join_labels, ScoreCard};
use crate::models::tags::{GeographicFeature, VegetationType};
use crate::models::{Category, CategoryScore, RegionPreference, Town};

const LOCATION_POINTS: f64 = 40.0;
const REGION_ONLY_POINTS: f64 = 30.0;
const FEATURE_POINTS: f64 = 30.0;
const VEGETATION_POINTS: f64 = 20.0;
const RELATED_CREDIT: f64 = 0.5;
const MAX_POINTS: f64 = LOCATION_POINTS + FEATURE_POINTS + VEGETATION_POINTS;

pub const VEGETATION_UNAVAILABLE: &str = "vegetation data unavailable";
pub const FEATURES_UNAVAILABLE: &str = "geographic feature data unavailable";

/// Symmetric "related feature" pairs earning partial credit
const RELATED_FEATURES: &[(GeographicFeature, GeographicFeature)] = &[
    (GeographicFeature::Coastal, GeographicFeature::Island),
    (GeographicFeature::Coastal, GeographicFeature::Lake),
    (GeographicFeature::Coastal, GeographicFeature::River),
    (GeographicFeature::Lake, GeographicFeature::River),
    (GeographicFeature::Mountain, GeographicFeature::Valley),
    (GeographicFeature::Mountain, GeographicFeature::Forest),
    (GeographicFeature::Valley, GeographicFeature::Forest),
    (GeographicFeature::Valley, GeographicFeature::River),
    (GeographicFeature::Valley, GeographicFeature::Plains),
];

const RELATED_VEGETATION: &[(VegetationType, VegetationType)] = &[
    (VegetationType::Mediterranean, VegetationType::Subtropical),
    (VegetationType::Subtropical, VegetationType::Tropical),
    (VegetationType::Forest, VegetationType::Grassland),
    (VegetationType::Forest, VegetationType::Temperate),
];

/// Water-body keywords and the feature they imply
const WATER_BODY_HINTS: &[(&str, GeographicFeature)] = &[
    ("ocean", GeographicFeature::Coastal),
    ("sea", GeographicFeature::Coastal),
    ("gulf", GeographicFeature::Coastal),
    ("bay", GeographicFeature::Coastal),
    ("coast", GeographicFeature::Coastal),
    ("lake", GeographicFeature::Lake),
    ("lagoon", GeographicFeature::Lake),
    ("river", GeographicFeature::River),
];

/// Score a town against the user's region preferences
pub fn score_region(
    preference: &RegionPreference,
    town: &Town,
    reference: &ReferenceData,
) -> CategoryScore {
    let mut card = ScoreCard::new(Category::Region, MAX_POINTS);

    score_location(preference, town, reference, &mut card);
    score_features(preference, town, &mut card);
    score_vegetation(preference, town, &mut card);

    card.finish()
}

fn score_location(
    preference: &RegionPreference,
    town: &Town,
    reference: &ReferenceData,
    card: &mut ScoreCard,
) {
    if preference.countries.is_empty() && preference.regions.is_empty() && preference.provinces.is_empty() {
        card.award(LOCATION_POINTS, "Open to any country/region");
        return;
    }

    let town_country = normalize(&town.country);
    let town_province = town.province.as_deref().map(normalize);

    for country in &preference.countries {
        let wanted = normalize(country);
        if wanted.is_empty() {
            continue;
        }
        if wanted == town_country {
            card.award(LOCATION_POINTS, format!("Country match ({})", town.country));
            return;
        }
        if town_province.as_deref() == Some(wanted.as_str()) {
            card.award(LOCATION_POINTS, format!("State match ({})", country.trim()));
            return;
        }
    }

    if let Some(province) = preference
        .provinces
        .iter()
        .find(|province| {
            let wanted = normalize(province);
            !wanted.is_empty() && town_province.as_deref() == Some(wanted.as_str())
        })
    {
        card.award(LOCATION_POINTS, format!("State match ({})", province.trim()));
        return;
    }

    if !preference.regions.is_empty() {
        let memberships = town_memberships(town, reference);
        if let Some(region) = preference
            .regions
            .iter()
            .find(|region| memberships.contains(&normalize(region)))
        {
            card.award(REGION_ONLY_POINTS, format!("Region match only ({})", region.trim()));
            return;
        }
    }

    card.award(0.0, "No location match");
}

/// Town membership tags: declared regions, broader-region segments and the
/// reference memberships of its country
fn town_memberships(town: &Town, reference: &ReferenceData) -> HashSet<String> {
    let mut memberships = normalized_set(&town.regions);
    if let Some(geo_region) = &town.geo_region {
        memberships.extend(split_list(geo_region));
    }
    if let Some(tags) = reference.memberships_of(&town.country) {
        memberships.extend(tags.iter().cloned());
    }
    memberships.remove("");
    memberships
}

fn score_features(preference: &RegionPreference, town: &Town, card: &mut ScoreCard) {
    let wanted = &preference.geographic_features;
    if wanted.is_empty() {
        card.award(FEATURE_POINTS, "Open to any geography");
        return;
    }
    if selects_all(wanted, GeographicFeature::ALL) {
        card.award(FEATURE_POINTS, "Open to all geographies (all selected)");
        return;
    }

    let (actual, inferred) = town_features(town);
    if actual.is_empty() {
        card.missing("Geographic feature data unavailable", FEATURES_UNAVAILABLE);
        return;
    }

    if let Some(feature) = wanted.iter().find(|f| actual.contains(f)) {
        let note = if inferred { ", inferred from water bodies" } else { "" };
        card.award(FEATURE_POINTS, format!("Geographic features match ({feature}{note})"));
    } else if let Some((want, have)) = related_pair(wanted, &actual, RELATED_FEATURES) {
        card.award(
            FEATURE_POINTS * RELATED_CREDIT,
            format!("Related geographic features ({want} ~ {have})"),
        );
    } else {
        card.award(0.0, format!("No geographic feature match (wanted {})", join_labels(wanted)));
    }
}

/// Declared features, or features implied by water-body descriptors when none
/// are declared. The flag is true for inferred features.
fn town_features(town: &Town) -> (Vec<GeographicFeature>, bool) {
    if !town.geographic_features.is_empty() {
        return (town.geographic_features.clone(), false);
    }

    let mut inferred = Vec::new();
    for body in &town.water_bodies {
        let body = normalize(body);
        for (keyword, feature) in WATER_BODY_HINTS {
            if body.split('_').any(|word| word == *keyword) && !inferred.contains(feature) {
                inferred.push(*feature);
            }
        }
    }
    (inferred, true)
}

fn score_vegetation(preference: &RegionPreference, town: &Town, card: &mut ScoreCard) {
    let wanted = &preference.vegetation_types;
    if wanted.is_empty() {
        card.award(VEGETATION_POINTS, "Open to any vegetation");
        return;
    }
    if selects_all(wanted, VegetationType::ALL) {
        card.award(VEGETATION_POINTS, "Open to all vegetation (all selected)");
        return;
    }

    let actual = &town.vegetation_types;
    if actual.is_empty() {
        card.missing("Vegetation data unavailable", VEGETATION_UNAVAILABLE);
        return;
    }

    if let Some(kind) = wanted.iter().find(|v| actual.contains(v)) {
        card.award(VEGETATION_POINTS, format!("Vegetation type match ({kind})"));
    } else if let Some((want, have)) = related_pair(wanted, actual, RELATED_VEGETATION) {
        card.award(
            VEGETATION_POINTS * RELATED_CREDIT,
            format!("Related vegetation type ({want} ~ {have})"),
        );
    } else {
        card.award(0.0, format!("No vegetation match (wanted {})", join_labels(wanted)));
    }
}

fn selects_all<T: PartialEq>(selected: &[T], all: &[T]) -> bool {
    all.iter().all(|variant| selected.contains(variant))
}

/// First (wanted, actual) pair listed as related, in either direction
fn related_pair<T: Copy + PartialEq>(wanted: &[T], actual: &[T], table: &[(T, T)]) -> Option<(T, T)> {
    wanted.iter().find_map(|&want| {
        actual.iter().find_map(|&have| {
            table
                .iter()
                .any(|&(a, b)| (a == want && b == have) || (a == have && b == want))
                .then_some((want, have))
        })
    })
}
