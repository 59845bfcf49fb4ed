//! Closed categorical vocabularies for town and preference attributes.
//!
//! Raw strings are parsed through the normalizer at the ingestion boundary, so
//! "Coastal", "coast" and "coastal " all become [`GeographicFeature::Coastal`].
//! An unknown value fails to parse; record fields go through
//! [`crate::models::lenient`], which drops such values with a warning.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::normalize::normalize;

/// A categorical value outside the known vocabulary
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown {kind} value: {value:?}")]
pub struct UnknownTag {
    pub kind: &'static str,
    pub value: String,
}

macro_rules! categorical_tag {
    (
        $(#[$meta:meta])*
        $name:ident, $kind:literal {
            $($variant:ident => $canonical:literal $(| $alias:literal)*),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(try_from = "String", into = "&'static str")]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            /// Every variant, in declaration order
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// Canonical wire label
            pub fn as_str(self) -> &'static str {
                match self {
                    $($name::$variant => $canonical),+
                }
            }

            /// Position on the declared scale
            pub fn rank(self) -> u8 {
                self as u8
            }
        }

        impl FromStr for $name {
            type Err = UnknownTag;

            fn from_str(raw: &str) -> Result<Self, Self::Err> {
                let key = normalize(raw);
                $(
                    if key == normalize($canonical) $(|| key == normalize($alias))* {
                        return Ok($name::$variant);
                    }
                )+
                Err(UnknownTag { kind: $kind, value: raw.to_string() })
            }
        }

        impl TryFrom<String> for $name {
            type Error = UnknownTag;

            fn try_from(raw: String) -> Result<Self, Self::Error> {
                raw.parse()
            }
        }

        impl From<$name> for &'static str {
            fn from(tag: $name) -> Self {
                tag.as_str()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

/// A categorical scale whose variants are declared in ascending order, so
/// that neighbouring variants can earn near-miss credit.
pub trait Band: Copy + Eq + fmt::Display {
    fn rank(self) -> u8;

    /// Number of steps between two values on the scale
    fn steps_to(self, other: Self) -> u8 {
        self.rank().abs_diff(other.rank())
    }
}

macro_rules! ordered_band {
    ($($name:ident),+) => {
        $(
            impl Band for $name {
                fn rank(self) -> u8 {
                    $name::rank(self)
                }
            }
        )+
    };
}

categorical_tag! {
    /// Physical geography of a town
    GeographicFeature, "geographic feature" {
        Coastal => "coastal" | "coast" | "beach" | "seaside",
        Mountain => "mountain" | "mountainous",
        Island => "island",
        Lake => "lake" | "lakeside",
        River => "river" | "riverside",
        Valley => "valley",
        Desert => "desert",
        Forest => "forest" | "forested",
        Plains => "plains" | "flat",
    }
}

categorical_tag! {
    /// Dominant vegetation around a town
    VegetationType, "vegetation type" {
        Tropical => "tropical",
        Subtropical => "subtropical",
        Mediterranean => "mediterranean",
        Temperate => "temperate",
        Forest => "forest",
        Grassland => "grassland" | "prairie" | "steppe",
        Desert => "desert" | "arid",
    }
}

categorical_tag! {
    /// Seasonal temperature band, coldest first
    TemperatureBand, "temperature band" {
        Cold => "cold",
        Cool => "cool",
        Mild => "mild",
        Warm => "warm",
        Hot => "hot",
    }
}

categorical_tag! {
    HumidityLevel, "humidity level" {
        Dry => "dry" | "low" | "arid",
        Balanced => "balanced" | "moderate",
        Humid => "humid" | "high",
    }
}

categorical_tag! {
    SunshineLevel, "sunshine level" {
        LessSunny => "less_sunny" | "low" | "partly_sunny" | "often_cloudy",
        Balanced => "balanced" | "moderate",
        OftenSunny => "often_sunny" | "high" | "sunny" | "mostly_sunny" | "abundant",
    }
}

categorical_tag! {
    PrecipitationLevel, "precipitation level" {
        MostlyDry => "mostly_dry" | "low" | "dry",
        Balanced => "balanced" | "moderate",
        LessDry => "less_dry" | "high" | "wet",
    }
}

categorical_tag! {
    SeasonalVariation, "seasonal variation" {
        Minimal => "minimal" | "low",
        Moderate => "moderate",
        Distinct => "distinct" | "distinct_seasons" | "high" | "extreme",
    }
}

categorical_tag! {
    /// Which seasonal pattern the user wants to live with
    SeasonalPreference, "seasonal preference" {
        AllSeasons => "all_seasons" | "four_seasons",
        WarmAllYear => "warm_all_year",
        SummerFocused => "summer_focused" | "warm_seasons" | "prefer_warm_seasons",
        WinterFocused => "winter_focused" | "cool_seasons" | "prefer_cool_seasons",
    }
}

categorical_tag! {
    LanguageComfort, "language comfort" {
        EnglishOnly => "english_only",
        WillingToLearn => "willing_to_learn" | "learn_local",
        AlreadySpeaks => "already_speaks" | "comfortable",
    }
}

categorical_tag! {
    EnglishProficiency, "english proficiency" {
        Low => "low",
        Moderate => "moderate",
        High => "high",
        Native => "native",
    }
}

categorical_tag! {
    ExpatCommunitySize, "expat community size" {
        Small => "small",
        Moderate => "moderate",
        Large => "large",
    }
}

categorical_tag! {
    UrbanRural, "urban/rural character" {
        Rural => "rural" | "remote",
        Suburban => "suburban",
        Urban => "urban",
    }
}

categorical_tag! {
    PaceOfLife, "pace of life" {
        Relaxed => "relaxed" | "slow",
        Moderate => "moderate",
        Fast => "fast",
    }
}

categorical_tag! {
    /// Minimum acceptable level for healthcare, safety or visa access
    QualityLevel, "quality level" {
        Basic => "basic",
        Functional => "functional",
        Good => "good",
    }
}

ordered_band!(
    TemperatureBand,
    HumidityLevel,
    SunshineLevel,
    PrecipitationLevel,
    SeasonalVariation,
    EnglishProficiency,
    ExpatCommunitySize,
    UrbanRural,
    PaceOfLife,
    QualityLevel
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_is_case_and_plural_insensitive() {
        assert_eq!("Coastal".parse::<GeographicFeature>(), Ok(GeographicFeature::Coastal));
        assert_eq!("  COAST ".parse::<GeographicFeature>(), Ok(GeographicFeature::Coastal));
        assert_eq!("Mountains".parse::<GeographicFeature>(), Ok(GeographicFeature::Mountain));
        assert_eq!("plain".parse::<GeographicFeature>(), Ok(GeographicFeature::Plains));
        assert_eq!("Often Sunny".parse::<SunshineLevel>(), Ok(SunshineLevel::OftenSunny));
        assert_eq!("distinct-seasons".parse::<SeasonalVariation>(), Ok(SeasonalVariation::Distinct));
    }

    #[test]
    fn test_unknown_value_rejected() {
        let err = "volcanic".parse::<GeographicFeature>().unwrap_err();
        assert_eq!(err.kind, "geographic feature");
        assert_eq!(err.value, "volcanic");
    }

    #[test]
    fn test_band_steps() {
        assert_eq!(TemperatureBand::Warm.steps_to(TemperatureBand::Mild), 1);
        assert_eq!(TemperatureBand::Cold.steps_to(TemperatureBand::Hot), 4);
        assert_eq!(QualityLevel::Good.steps_to(QualityLevel::Good), 0);
        assert!(EnglishProficiency::High > EnglishProficiency::Moderate);
    }

    #[test]
    fn test_serde_uses_canonical_labels() {
        let json = serde_json::to_string(&vec![SunshineLevel::OftenSunny, SunshineLevel::LessSunny]).unwrap();
        assert_eq!(json, r#"["often_sunny","less_sunny"]"#);

        let parsed: Vec<PrecipitationLevel> = serde_json::from_str(r#"["Wet", "dry"]"#).unwrap();
        assert_eq!(parsed, vec![PrecipitationLevel::LessDry, PrecipitationLevel::MostlyDry]);

        assert!(serde_json::from_str::<VegetationType>(r#""tundra""#).is_err());
    }
}
