//! Culture scoring: living environment, pace, language, expat community and
//! the three 1-5 importance ratings.

use crate::core::normalize::normalize;
use crate::core::scorecard::{capitalize, ScoreCard};
use crate::models::tags::{EnglishProficiency, LanguageComfort};
use crate::models::{Category, CategoryScore, CulturePreference, Town};

const LIVING_POINTS: f64 = 15.0;
const PACE_POINTS: f64 = 15.0;
const LANGUAGE_POINTS: f64 = 25.0;
const EXPAT_POINTS: f64 = 15.0;
const DINING_POINTS: f64 = 10.0;
const EVENTS_POINTS: f64 = 10.0;
const MUSEUMS_POINTS: f64 = 10.0;
const MAX_POINTS: f64 =
    LIVING_POINTS + PACE_POINTS + LANGUAGE_POINTS + EXPAT_POINTS + DINING_POINTS + EVENTS_POINTS + MUSEUMS_POINTS;

const NEAR_MISS: f64 = 0.5;
const LEARNER_CREDIT: f64 = 0.6;
/// Town English proficiency at which an English speaker gets by
const ENGLISH_THRESHOLD: EnglishProficiency = EnglishProficiency::High;

pub const CULTURE_UNAVAILABLE: &str = "culture data unavailable";
const LANGUAGE_UNAVAILABLE: &str = "language data unavailable";

pub fn score_culture(preference: &CulturePreference, town: &Town) -> CategoryScore {
    if preference.is_open() {
        return ScoreCard::open(Category::Culture, "Open to any culture");
    }
    if !has_needed_facts(preference, town) {
        return ScoreCard::neutral(Category::Culture, CULTURE_UNAVAILABLE);
    }

    let mut card = ScoreCard::new(Category::Culture, MAX_POINTS);

    card.band_facet("living environment", LIVING_POINTS, &preference.urban_rural, town.urban_rural, NEAR_MISS, None);
    card.band_facet("pace of life", PACE_POINTS, &preference.pace_of_life, town.pace_of_life, NEAR_MISS, None);
    score_language(preference, town, &mut card);
    card.band_facet(
        "expat community",
        EXPAT_POINTS,
        &preference.expat_community,
        town.expat_community_size,
        NEAR_MISS,
        None,
    );

    score_importance(&mut card, "dining & nightlife", DINING_POINTS, preference.dining_importance, dining_rating(town));
    score_importance(
        &mut card,
        "cultural events",
        EVENTS_POINTS,
        preference.cultural_events_importance,
        town.cultural_events_rating,
    );
    score_importance(&mut card, "museums", MUSEUMS_POINTS, preference.museums_importance, town.museums_rating);

    card.finish()
}

fn is_important(importance: Option<u8>) -> bool {
    importance.is_some_and(|v| v > 1)
}

/// Whether the town carries at least one fact the expressed preferences need
fn has_needed_facts(preference: &CulturePreference, town: &Town) -> bool {
    let language_wanted = preference.language_comfort.is_some() || !preference.languages_spoken.is_empty();
    let language_known =
        town.primary_language.is_some() || !town.languages_spoken.is_empty() || town.english_proficiency.is_some();

    [
        (!preference.urban_rural.is_empty(), town.urban_rural.is_some()),
        (!preference.pace_of_life.is_empty(), town.pace_of_life.is_some()),
        (language_wanted, language_known),
        (!preference.expat_community.is_empty(), town.expat_community_size.is_some()),
        (is_important(preference.dining_importance), dining_rating(town).is_some()),
        (is_important(preference.cultural_events_importance), town.cultural_events_rating.is_some()),
        (is_important(preference.museums_importance), town.museums_rating.is_some()),
    ]
    .iter()
    .any(|&(wanted, available)| wanted && available)
}

fn score_language(preference: &CulturePreference, town: &Town, card: &mut ScoreCard) {
    if preference.language_comfort.is_none() && preference.languages_spoken.is_empty() {
        card.award(LANGUAGE_POINTS, "Open on language");
        return;
    }

    if let Some(language) = speaks_local_language(&preference.languages_spoken, town) {
        card.award(LANGUAGE_POINTS, format!("Speaks local language ({language})"));
        return;
    }

    let english_primary = town
        .primary_language
        .as_deref()
        .is_some_and(|l| normalize(l) == "english");

    match preference.language_comfort {
        Some(LanguageComfort::EnglishOnly) => {
            if english_primary {
                card.award(LANGUAGE_POINTS, "English is the primary language");
                return;
            }
            match town.english_proficiency {
                Some(level) if level >= ENGLISH_THRESHOLD => {
                    card.award(LANGUAGE_POINTS, format!("English widely spoken ({level})"))
                }
                Some(level) if ENGLISH_THRESHOLD.rank() - level.rank() == 1 => card.award(
                    LANGUAGE_POINTS * NEAR_MISS,
                    format!("English proficiency {level}"),
                ),
                Some(level) => card.award(0.0, format!("Language barrier (English proficiency {level})")),
                None => card.missing("English proficiency unknown", LANGUAGE_UNAVAILABLE),
            }
        }
        Some(LanguageComfort::WillingToLearn) => {
            if english_primary {
                card.award(LANGUAGE_POINTS, "English is the primary language");
            } else if let Some(level) = town.english_proficiency.filter(|&l| l >= ENGLISH_THRESHOLD) {
                card.award(LANGUAGE_POINTS, format!("English widely spoken ({level})"));
            } else {
                card.award(LANGUAGE_POINTS * LEARNER_CREDIT, "Willing to learn local language");
            }
        }
        Some(LanguageComfort::AlreadySpeaks) | None => {
            if town.primary_language.is_none() && town.languages_spoken.is_empty() {
                card.missing("Local language unknown", LANGUAGE_UNAVAILABLE);
            } else {
                card.award(0.0, "Language barrier");
            }
        }
    }
}

fn speaks_local_language<'a>(spoken: &[String], town: &'a Town) -> Option<&'a str> {
    let local = town.primary_language.iter().chain(town.languages_spoken.iter());
    for language in local {
        let key = normalize(language);
        if !key.is_empty() && spoken.iter().any(|s| normalize(s) == key) {
            return Some(language.as_str());
        }
    }
    None
}

/// Combined dining and nightlife rating; either one alone is used as is.
/// An out-of-range rating is passed through so it is reported, not averaged away.
fn dining_rating(town: &Town) -> Option<u8> {
    let ratings = [town.restaurants_rating, town.nightlife_rating];
    if let Some(&invalid) = ratings.iter().flatten().find(|r| !(1..=5).contains(*r)) {
        return Some(invalid);
    }

    match (town.restaurants_rating, town.nightlife_rating) {
        (Some(r), Some(n)) => Some(((f64::from(r) + f64::from(n)) / 2.0).round() as u8),
        (Some(r), None) => Some(r),
        (None, n) => n,
    }
}

fn score_importance(card: &mut ScoreCard, facet: &str, points: f64, importance: Option<u8>, rating: Option<u8>) {
    let Some(importance) = importance.filter(|&v| v > 1) else {
        card.award(points, format!("Flexible on {facet}"));
        return;
    };
    let Some(rating) = rating else {
        card.missing(format!("No {facet} rating"), format!("{facet} data unavailable"));
        return;
    };
    if !(1..=5).contains(&rating) {
        card.missing(format!("Invalid {facet} rating ({rating})"), format!("{facet} rating out of range"));
        return;
    }

    let (credit, label) = match importance.abs_diff(rating) {
        0 => (1.0, "matched"),
        1 => (0.7, "good match"),
        2 => (0.4, "acceptable"),
        _ => (0.0, "mismatch"),
    };
    card.award(
        points * credit,
        format!("{} {label} (wanted {importance}, town {rating})", capitalize(facet)),
    );
}
