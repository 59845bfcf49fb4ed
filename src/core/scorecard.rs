use crate::models::{Band, Category, CategoryScore, Factor};

/// Score given to a category whose required town facts are wholly absent
pub const NEUTRAL_SCORE: u8 = 50;

/// Accumulates sub-facet points, explanations and warnings for one category.
#[derive(Debug)]
pub struct ScoreCard {
    category: Category,
    max_points: f64,
    points: f64,
    factors: Vec<Factor>,
    warnings: Vec<String>,
}

impl ScoreCard {
    pub fn new(category: Category, max_points: f64) -> Self {
        Self {
            category,
            max_points,
            points: 0.0,
            factors: Vec::new(),
            warnings: Vec::new(),
        }
    }

    /// Record a sub-facet outcome
    pub fn award(&mut self, points: f64, description: impl Into<String>) {
        let points = if points.is_finite() { points.max(0.0) } else { 0.0 };
        self.points += points;
        self.factors.push(Factor {
            category: self.category,
            description: description.into(),
            points,
        });
    }

    /// Record a sub-facet that scored zero because the town lacks the fact
    pub fn missing(&mut self, description: impl Into<String>, warning: impl Into<String>) {
        self.award(0.0, description);
        self.warn(warning);
    }

    pub fn warn(&mut self, warning: impl Into<String>) {
        let warning = warning.into();
        if !self.warnings.contains(&warning) {
            self.warnings.push(warning);
        }
    }

    /// Round the accumulated points onto the 0-100 scale
    pub fn finish(self) -> CategoryScore {
        let score = if self.max_points > 0.0 {
            (self.points / self.max_points * 100.0).round().clamp(0.0, 100.0) as u8
        } else {
            0
        };

        tracing::trace!(category = %self.category, score, points = self.points, "category scored");

        CategoryScore {
            category: self.category,
            score,
            max_points: self.max_points,
            factors: self.factors,
            warnings: self.warnings,
        }
    }

    /// Score one ordered-band sub-facet worth `points`. `facet` names it in
    /// factor text and in the missing-data warning; `source` annotates town
    /// values derived from numeric facts.
    pub fn band_facet<B: Band>(
        &mut self,
        facet: &str,
        points: f64,
        wanted: &[B],
        actual: Option<B>,
        near_miss: f64,
        source: Option<&str>,
    ) {
        let title = capitalize(facet);
        if wanted.is_empty() {
            self.award(points, format!("Open to any {facet}"));
            return;
        }
        let Some(actual) = actual else {
            self.missing(format!("{title} data unavailable"), format!("{facet} data unavailable"));
            return;
        };

        let note = source.map(|s| format!(", {s}")).unwrap_or_default();
        match band_credit(wanted, actual, near_miss) {
            (credit, _) if credit >= 1.0 => {
                self.award(points, format!("{title} match ({actual}{note})"))
            }
            (credit, Some(closest)) if credit > 0.0 => self.award(
                points * credit,
                format!("{title} close match (wanted {closest}, town {actual}{note})"),
            ),
            _ => self.award(
                0.0,
                format!("{title} mismatch (wanted {}, town {actual}{note})", join_labels(wanted)),
            ),
        }
    }

    /// Full credit: the user expressed no preference in this category
    pub fn open(category: Category, description: &str) -> CategoryScore {
        let mut card = Self::new(category, 100.0);
        card.award(100.0, description);
        card.finish()
    }

    /// Neutral mid score, flagged with a warning
    pub fn neutral(category: Category, warning: &str) -> CategoryScore {
        let mut card = Self::new(category, 100.0);
        card.award(f64::from(NEUTRAL_SCORE), format!("Neutral score ({warning})"));
        card.warn(warning);
        card.finish()
    }

    /// Minimum score for malformed input
    pub fn minimum(category: Category, warning: &str) -> CategoryScore {
        let mut card = Self::new(category, 100.0);
        card.award(0.0, format!("Scored at minimum ({warning})"));
        card.warn(warning);
        card.finish()
    }
}

/// Best credit ratio (0.0-1.0) for `actual` against any wanted band:
/// exact band is full credit, one step away earns `near_miss`, farther earns nothing.
pub fn band_credit<B: Band>(wanted: &[B], actual: B, near_miss: f64) -> (f64, Option<B>) {
    wanted
        .iter()
        .map(|&band| {
            let credit = match band.steps_to(actual) {
                0 => 1.0,
                1 => near_miss,
                _ => 0.0,
            };
            (credit, Some(band))
        })
        .fold((0.0, None), |best, candidate| if candidate.0 > best.0 { candidate } else { best })
}

/// Join labels for factor descriptions
pub fn join_labels<T: std::fmt::Display>(values: &[T]) -> String {
    values.iter().map(|v| v.to_string()).collect::<Vec<_>>().join("/")
}

pub fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::tags::TemperatureBand;

    #[test]
    fn test_band_facet_outcomes() {
        let mut card = ScoreCard::new(Category::Climate, 100.0);
        card.band_facet("summer climate", 25.0, &[TemperatureBand::Warm], Some(TemperatureBand::Warm), 0.7, None);
        card.band_facet("winter climate", 25.0, &[TemperatureBand::Mild], Some(TemperatureBand::Cool), 0.7, None);
        card.band_facet("humidity", 15.0, &[] as &[TemperatureBand], None, 0.7, None);
        card.band_facet("sunshine", 15.0, &[TemperatureBand::Hot], None, 0.7, None);
        card.band_facet("rain", 10.0, &[TemperatureBand::Hot], Some(TemperatureBand::Cold), 0.7, Some("derived"));
        let result = card.finish();

        let points: Vec<f64> = result.factors.iter().map(|f| f.points).collect();
        assert_eq!(points, vec![25.0, 17.5, 15.0, 0.0, 0.0]);
        assert_eq!(result.factors[0].description, "Summer climate match (warm)");
        assert!(result.factors[1].description.starts_with("Winter climate close match"));
        assert!(result.factors[4].description.contains("derived"));
        assert_eq!(result.warnings, vec!["sunshine data unavailable".to_string()]);
    }

    #[test]
    fn test_capitalize() {
        assert_eq!(capitalize("pace of life"), "Pace of life");
        assert_eq!(capitalize(""), "");
    }

    #[test]
    fn test_finish_rescales_points() {
        let mut card = ScoreCard::new(Category::Region, 90.0);
        card.award(40.0, "Country match");
        card.award(0.0, "No geographic feature match");
        card.award(20.0, "Vegetation type match");
        let result = card.finish();
        assert_eq!(result.score, 67);
        assert_eq!(result.factors.len(), 3);
    }

    #[test]
    fn test_warnings_deduplicated() {
        let mut card = ScoreCard::new(Category::Climate, 100.0);
        card.warn("climate data unavailable");
        card.warn("climate data unavailable");
        assert_eq!(card.finish().warnings.len(), 1);
    }

    #[test]
    fn test_non_finite_points_ignored() {
        let mut card = ScoreCard::new(Category::Budget, 100.0);
        card.award(f64::NAN, "broken");
        card.award(-5.0, "negative");
        assert_eq!(card.finish().score, 0);
    }

    #[test]
    fn test_band_credit_picks_best() {
        let wanted = [TemperatureBand::Cold, TemperatureBand::Warm];
        assert_eq!(band_credit(&wanted, TemperatureBand::Warm, 0.7), (1.0, Some(TemperatureBand::Warm)));
        assert_eq!(band_credit(&wanted, TemperatureBand::Hot, 0.7), (0.7, Some(TemperatureBand::Warm)));
        assert_eq!(band_credit(&[TemperatureBand::Cold], TemperatureBand::Hot, 0.7).0, 0.0);
        assert_eq!(band_credit::<TemperatureBand>(&[], TemperatureBand::Hot, 0.7), (0.0, None));
    }

    #[test]
    fn test_open_and_neutral() {
        assert_eq!(ScoreCard::open(Category::Hobbies, "Open to any activities").score, 100);
        let neutral = ScoreCard::neutral(Category::Culture, "culture data unavailable");
        assert_eq!(neutral.score, NEUTRAL_SCORE);
        assert_eq!(neutral.warnings, vec!["culture data unavailable".to_string()]);
    }
}
