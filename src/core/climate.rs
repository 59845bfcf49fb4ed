//! Climate scoring over ordered bands.
//!
//! Town bands come from the categorical fields when present, otherwise they
//! are derived from averages (temperatures, sunshine hours, rainfall).

use crate::core::scorecard::{band_credit, ScoreCard};
use crate::models::tags::{
    PrecipitationLevel, SeasonalPreference, SeasonalVariation, SunshineLevel, TemperatureBand,
};
use crate::models::{Category, CategoryScore, ClimatePreference, Town};

const SUMMER_POINTS: f64 = 25.0;
const WINTER_POINTS: f64 = 25.0;
const HUMIDITY_POINTS: f64 = 15.0;
const SUNSHINE_POINTS: f64 = 15.0;
const PRECIPITATION_POINTS: f64 = 10.0;
const SEASONAL_POINTS: f64 = 10.0;
const MAX_POINTS: f64 = SUMMER_POINTS
    + WINTER_POINTS
    + HUMIDITY_POINTS
    + SUNSHINE_POINTS
    + PRECIPITATION_POINTS
    + SEASONAL_POINTS;

const NEAR_MISS: f64 = 0.7;

pub const CLIMATE_UNAVAILABLE: &str = "climate data unavailable";

/// A town band and whether it was derived from a numeric fact
type Reading<B> = Option<(B, Option<&'static str>)>;

pub fn score_climate(preference: &ClimatePreference, town: &Town) -> CategoryScore {
    if preference.is_open() {
        return ScoreCard::open(Category::Climate, "Open to any climate");
    }

    let summer = summer_band(town);
    let winter = winter_band(town);
    let sunshine = sunshine_level(town);
    let precipitation = precipitation_level(town);

    let needed = [
        (!preference.summer.is_empty(), summer.is_some()),
        (!preference.winter.is_empty(), winter.is_some()),
        (!preference.humidity.is_empty(), town.humidity.is_some()),
        (!preference.sunshine.is_empty(), sunshine.is_some()),
        (!preference.precipitation.is_empty(), precipitation.is_some()),
        (
            preference.seasonal.is_some(),
            town.seasonal_variation.is_some() || summer.is_some() || winter.is_some(),
        ),
    ];
    if needed.iter().all(|&(wanted, available)| !wanted || !available) {
        return ScoreCard::neutral(Category::Climate, CLIMATE_UNAVAILABLE);
    }

    let mut card = ScoreCard::new(Category::Climate, MAX_POINTS);
    let (band, source) = split(summer);
    card.band_facet("summer climate", SUMMER_POINTS, &preference.summer, band, NEAR_MISS, source);
    let (band, source) = split(winter);
    card.band_facet("winter climate", WINTER_POINTS, &preference.winter, band, NEAR_MISS, source);
    card.band_facet("humidity", HUMIDITY_POINTS, &preference.humidity, town.humidity, NEAR_MISS, None);
    let (level, source) = split(sunshine);
    card.band_facet("sunshine", SUNSHINE_POINTS, &preference.sunshine, level, NEAR_MISS, source);
    let (level, source) = split(precipitation);
    card.band_facet(
        "precipitation",
        PRECIPITATION_POINTS,
        &preference.precipitation,
        level,
        NEAR_MISS,
        source,
    );

    score_seasonal(preference.seasonal, town, summer.map(|(b, _)| b), winter.map(|(b, _)| b), &mut card);

    card.finish()
}

fn score_seasonal(
    preference: Option<SeasonalPreference>,
    town: &Town,
    summer: Option<TemperatureBand>,
    winter: Option<TemperatureBand>,
    card: &mut ScoreCard,
) {
    let Some(preference) = preference else {
        card.award(SEASONAL_POINTS, "Open to any seasonal pattern");
        return;
    };

    let credit = match preference {
        SeasonalPreference::WarmAllYear => winter.map(|w| at_least(w, TemperatureBand::Mild)),
        SeasonalPreference::SummerFocused => summer.map(|s| at_least(s, TemperatureBand::Warm)),
        SeasonalPreference::WinterFocused => winter.map(|w| at_most(w, TemperatureBand::Cool)),
        SeasonalPreference::AllSeasons => match town.seasonal_variation {
            Some(variation) => Some(band_credit(&[SeasonalVariation::Distinct], variation, NEAR_MISS).0),
            None => match (summer, winter) {
                (Some(s), Some(w)) => {
                    let contrast = s >= TemperatureBand::Warm && w <= TemperatureBand::Cool;
                    Some(if contrast { 1.0 } else { 0.0 })
                }
                _ => None,
            },
        },
    };

    match credit {
        None => card.missing("Seasonal data unavailable", "seasonal data unavailable"),
        Some(c) if c >= 1.0 => card.award(SEASONAL_POINTS, format!("Seasonal pattern match ({preference})")),
        Some(c) if c > 0.0 => card.award(
            SEASONAL_POINTS * c,
            format!("Seasonal pattern close match ({preference})"),
        ),
        Some(_) => card.award(0.0, format!("Seasonal pattern mismatch ({preference})")),
    }
}

/// Full credit at or above `floor`, near miss one band below
fn at_least(actual: TemperatureBand, floor: TemperatureBand) -> f64 {
    if actual >= floor {
        1.0
    } else if floor.rank() - actual.rank() == 1 {
        NEAR_MISS
    } else {
        0.0
    }
}

/// Full credit at or below `ceiling`, near miss one band above
fn at_most(actual: TemperatureBand, ceiling: TemperatureBand) -> f64 {
    if actual <= ceiling {
        1.0
    } else if actual.rank() - ceiling.rank() == 1 {
        NEAR_MISS
    } else {
        0.0
    }
}

fn summer_band(town: &Town) -> Reading<TemperatureBand> {
    town.summer_climate.map(|band| (band, None)).or_else(|| {
        usable(town.avg_temp_summer).map(|celsius| (summer_band_from_celsius(celsius), Some("from average temperature")))
    })
}

fn winter_band(town: &Town) -> Reading<TemperatureBand> {
    town.winter_climate.map(|band| (band, None)).or_else(|| {
        usable(town.avg_temp_winter).map(|celsius| (winter_band_from_celsius(celsius), Some("from average temperature")))
    })
}

fn sunshine_level(town: &Town) -> Reading<SunshineLevel> {
    town.sunshine.map(|level| (level, None)).or_else(|| {
        usable(town.sunshine_hours).map(|hours| (sunshine_from_hours(hours), Some("from sunshine hours")))
    })
}

fn precipitation_level(town: &Town) -> Reading<PrecipitationLevel> {
    town.precipitation.map(|level| (level, None)).or_else(|| {
        usable(town.annual_rainfall_mm).map(|mm| (precipitation_from_rainfall(mm), Some("from annual rainfall")))
    })
}

fn split<B>(reading: Reading<B>) -> (Option<B>, Option<&'static str>) {
    match reading {
        Some((band, source)) => (Some(band), source),
        None => (None, None),
    }
}

fn usable(value: Option<f64>) -> Option<f64> {
    value.filter(|v| v.is_finite())
}

#[inline]
pub fn summer_band_from_celsius(celsius: f64) -> TemperatureBand {
    match celsius {
        c if c >= 28.0 => TemperatureBand::Hot,
        c if c >= 22.0 => TemperatureBand::Warm,
        c if c >= 15.0 => TemperatureBand::Mild,
        c if c >= 8.0 => TemperatureBand::Cool,
        _ => TemperatureBand::Cold,
    }
}

#[inline]
pub fn winter_band_from_celsius(celsius: f64) -> TemperatureBand {
    match celsius {
        c if c >= 18.0 => TemperatureBand::Warm,
        c if c >= 12.0 => TemperatureBand::Mild,
        c if c >= 3.0 => TemperatureBand::Cool,
        _ => TemperatureBand::Cold,
    }
}

#[inline]
pub fn sunshine_from_hours(hours: f64) -> SunshineLevel {
    if hours > 2800.0 {
        SunshineLevel::OftenSunny
    } else if hours > 2200.0 {
        SunshineLevel::Balanced
    } else {
        SunshineLevel::LessSunny
    }
}

#[inline]
pub fn precipitation_from_rainfall(mm: f64) -> PrecipitationLevel {
    if mm < 400.0 {
        PrecipitationLevel::MostlyDry
    } else if mm < 1000.0 {
        PrecipitationLevel::Balanced
    } else {
        PrecipitationLevel::LessDry
    }
}
