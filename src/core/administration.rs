//! Administration scoring: healthcare, safety, visa access and tax burden.
//!
//! Each part yields a 0-100 sub-score worth 25 points; the category is their
//! average.

use crate::core::normalize::contains_normalized;
use crate::core::scorecard::{capitalize, ScoreCard};
use crate::models::tags::QualityLevel;
use crate::models::{AdministrationPreference, Category, CategoryScore, Town};

const PART_POINTS: f64 = 25.0;
const MAX_POINTS: f64 = PART_POINTS * 4.0;

const RETIREMENT_VISA_CREDIT: f64 = 0.8;
const TAX_HAVEN_BONUS: f64 = 10.0;
const FOREIGN_INCOME_BONUS: f64 = 10.0;

/// Rate thresholds (percent) for grades 5, 4, 3 and 2; anything above grades 1
const INCOME_TAX_GRADES: [f64; 4] = [10.0, 20.0, 30.0, 40.0];
const PROPERTY_TAX_GRADES: [f64; 4] = [1.0, 2.0, 3.0, 4.0];
const SALES_TAX_GRADES: [f64; 4] = [10.0, 17.0, 22.0, 27.0];

pub const ADMINISTRATION_UNAVAILABLE: &str = "administration data unavailable";

pub fn score_administration(preference: &AdministrationPreference, town: &Town) -> CategoryScore {
    if preference.is_open() {
        return ScoreCard::open(Category::Administration, "Open on healthcare, safety, visa and taxes");
    }
    if !has_needed_facts(preference, town) {
        return ScoreCard::neutral(Category::Administration, ADMINISTRATION_UNAVAILABLE);
    }

    let mut card = ScoreCard::new(Category::Administration, MAX_POINTS);
    score_quality(&mut card, "healthcare", preference.healthcare, town.healthcare_score);
    score_quality(&mut card, "safety", preference.safety, town.safety_score);
    score_visa(&mut card, preference, town);
    score_taxes(&mut card, preference, town);
    card.finish()
}

fn has_needed_facts(preference: &AdministrationPreference, town: &Town) -> bool {
    let visa_known = !town.visa_on_arrival_countries.is_empty()
        || !town.easy_residency_countries.is_empty()
        || town.retirement_visa_available.is_some();
    let tax_known = town.income_tax_rate_pct.is_some()
        || town.property_tax_rate_pct.is_some()
        || town.sales_tax_rate_pct.is_some()
        || town.tax_haven.is_some()
        || town.foreign_income_taxed.is_some();

    (preference.healthcare.is_some() && town.healthcare_score.is_some())
        || (preference.safety.is_some() && town.safety_score.is_some())
        || (preference.visa.is_some() && visa_known)
        || (preference.is_tax_sensitive() && tax_known)
}

/// Credit ratio for a town 0-10 score against the wanted quality level
#[inline]
pub fn quality_credit(wanted: QualityLevel, score: f64) -> f64 {
    match wanted {
        QualityLevel::Good => match score {
            s if s >= 7.0 => 1.0,
            s if s >= 6.0 => 0.85,
            s if s >= 5.0 => 0.65,
            s if s >= 4.0 => 0.4,
            _ => 0.0,
        },
        QualityLevel::Functional => (score / 10.0).clamp(0.0, 1.0),
        QualityLevel::Basic => match score {
            s if s >= 4.0 => 1.0,
            s if s >= 3.0 => 0.7,
            s if s >= 2.0 => 0.4,
            _ => 0.0,
        },
    }
}

fn score_quality(card: &mut ScoreCard, facet: &str, wanted: Option<QualityLevel>, score: Option<f64>) {
    let Some(wanted) = wanted else {
        card.award(PART_POINTS, format!("Flexible on {facet}"));
        return;
    };
    let Some(score) = score else {
        card.missing(format!("No {facet} score"), format!("{facet} data unavailable"));
        return;
    };
    if !score.is_finite() || !(0.0..=10.0).contains(&score) {
        card.missing(format!("Invalid {facet} score"), format!("{facet} score out of range"));
        return;
    }

    let credit = quality_credit(wanted, score);
    let verdict = if credit >= 1.0 {
        "meets"
    } else if credit > 0.0 {
        "partly meets"
    } else {
        "falls short of"
    };
    card.award(
        PART_POINTS * credit,
        format!("{} score {score:.1} {verdict} {wanted} requirement", capitalize(facet)),
    );
}

fn score_visa(card: &mut ScoreCard, preference: &AdministrationPreference, town: &Town) {
    let Some(wanted) = preference.visa else {
        card.award(PART_POINTS, "Flexible on visa access");
        return;
    };

    let citizenship = preference.citizenship.as_deref().unwrap_or_default();
    if !citizenship.is_empty() {
        if contains_normalized(&town.visa_on_arrival_countries, citizenship) {
            card.award(PART_POINTS, format!("Visa on arrival for {citizenship} citizens"));
            return;
        }
        if contains_normalized(&town.easy_residency_countries, citizenship) {
            card.award(PART_POINTS, format!("Easy residency for {citizenship} citizens"));
            return;
        }
    }

    match town.retirement_visa_available {
        Some(true) => {
            let credit = if wanted == QualityLevel::Basic { 1.0 } else { RETIREMENT_VISA_CREDIT };
            card.award(PART_POINTS * credit, "Retirement visa available");
        }
        Some(false) => card.award(0.0, "No easy visa route"),
        None if town.visa_on_arrival_countries.is_empty() && town.easy_residency_countries.is_empty() => {
            card.missing("Visa information unavailable", "visa data unavailable")
        }
        None => card.award(0.0, "No easy visa route"),
    }
}

/// Grade a tax rate 5 (lowest) to 1 (highest) against four thresholds
#[inline]
pub fn tax_grade(rate_pct: f64, thresholds: &[f64; 4]) -> u8 {
    let above = thresholds.iter().filter(|&&limit| rate_pct > limit).count() as u8;
    5 - above
}

fn score_taxes(card: &mut ScoreCard, preference: &AdministrationPreference, town: &Town) {
    if !preference.is_tax_sensitive() {
        card.award(PART_POINTS, "Not sensitive to taxes");
        return;
    }

    let sensitive = [
        (preference.income_tax_sensitive, "income tax", town.income_tax_rate_pct, &INCOME_TAX_GRADES),
        (preference.property_tax_sensitive, "property tax", town.property_tax_rate_pct, &PROPERTY_TAX_GRADES),
        (preference.sales_tax_sensitive, "sales tax", town.sales_tax_rate_pct, &SALES_TAX_GRADES),
    ];

    let mut grades = Vec::new();
    let mut details = Vec::new();
    for (_, label, rate, thresholds) in sensitive.iter().filter(|(wanted, ..)| *wanted) {
        match rate.filter(|r| r.is_finite() && *r >= 0.0) {
            Some(rate) => {
                grades.push(f64::from(tax_grade(rate, thresholds)));
                details.push(format!("{label} {rate}%"));
            }
            None => {
                grades.push(0.0);
                card.warn(format!("{label} data unavailable"));
            }
        }
    }

    let mut sub_score = grades.iter().sum::<f64>() / grades.len() as f64 / 5.0 * 100.0;
    if town.tax_haven == Some(true) {
        sub_score += TAX_HAVEN_BONUS;
        details.push("tax haven".to_string());
    }
    if town.foreign_income_taxed == Some(false) {
        sub_score += FOREIGN_INCOME_BONUS;
        details.push("foreign income untaxed".to_string());
    }
    let sub_score = sub_score.min(100.0);

    let description = if details.is_empty() {
        "Tax rates unknown".to_string()
    } else {
        format!("Tax burden ({})", details.join(", "))
    };
    card.award(PART_POINTS * sub_score / 100.0, description);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn town() -> Town {
        Town {
            healthcare_score: Some(8.0),
            safety_score: Some(6.0),
            visa_on_arrival_countries: vec!["United States".to_string(), "Canada".to_string()],
            retirement_visa_available: Some(true),
            income_tax_rate_pct: Some(25.0),
            property_tax_rate_pct: Some(0.5),
            sales_tax_rate_pct: Some(21.0),
            ..Town::new("1", "Valencia", "Spain")
        }
    }

    #[test]
    fn test_open_preference() {
        let result = score_administration(&AdministrationPreference::default(), &town());
        assert_eq!(result.score, 100);
    }

    #[test]
    fn test_quality_credit_bands() {
        assert_eq!(quality_credit(QualityLevel::Good, 7.0), 1.0);
        assert_eq!(quality_credit(QualityLevel::Good, 6.5), 0.85);
        assert_eq!(quality_credit(QualityLevel::Good, 3.9), 0.0);
        assert_eq!(quality_credit(QualityLevel::Functional, 6.0), 0.6);
        assert_eq!(quality_credit(QualityLevel::Basic, 3.0), 0.7);
        assert_eq!(quality_credit(QualityLevel::Basic, 9.0), 1.0);
    }

    #[test]
    fn test_healthcare_and_safety() {
        let preference = AdministrationPreference {
            healthcare: Some(QualityLevel::Good),
            safety: Some(QualityLevel::Good),
            ..AdministrationPreference::default()
        };
        // 25 + 25 * 0.85 + 25 + 25
        assert_eq!(score_administration(&preference, &town()).score, 96);
    }

    #[test]
    fn test_visa_routes() {
        let mut preference = AdministrationPreference {
            visa: Some(QualityLevel::Good),
            citizenship: Some("united states".to_string()),
            ..AdministrationPreference::default()
        };
        assert_eq!(score_administration(&preference, &town()).factors[2].points, PART_POINTS);

        preference.citizenship = Some("Australia".to_string());
        assert_eq!(score_administration(&preference, &town()).factors[2].points, PART_POINTS * 0.8);

        preference.visa = Some(QualityLevel::Basic);
        assert_eq!(score_administration(&preference, &town()).factors[2].points, PART_POINTS);

        let closed = Town {
            retirement_visa_available: Some(false),
            ..town()
        };
        assert_eq!(score_administration(&preference, &closed).factors[2].points, 0.0);
    }

    #[test]
    fn test_tax_grades() {
        assert_eq!(tax_grade(5.0, &INCOME_TAX_GRADES), 5);
        assert_eq!(tax_grade(10.0, &INCOME_TAX_GRADES), 5);
        assert_eq!(tax_grade(25.0, &INCOME_TAX_GRADES), 3);
        assert_eq!(tax_grade(45.0, &INCOME_TAX_GRADES), 1);
        assert_eq!(tax_grade(21.0, &SALES_TAX_GRADES), 3);
    }

    #[test]
    fn test_tax_sub_score_with_bonuses() {
        let preference = AdministrationPreference {
            income_tax_sensitive: true,
            property_tax_sensitive: true,
            ..AdministrationPreference::default()
        };
        // grades 3 and 5: mean 4 -> 80
        let result = score_administration(&preference, &town());
        assert_eq!(result.factors[3].points, 20.0);

        let haven = Town {
            tax_haven: Some(true),
            foreign_income_taxed: Some(false),
            ..town()
        };
        // 80 + 10 + 10
        assert_eq!(score_administration(&preference, &haven).factors[3].points, PART_POINTS);
    }

    #[test]
    fn test_missing_tax_rate_warns() {
        let preference = AdministrationPreference {
            income_tax_sensitive: true,
            sales_tax_sensitive: true,
            ..AdministrationPreference::default()
        };
        let partial = Town {
            sales_tax_rate_pct: None,
            ..town()
        };
        let result = score_administration(&preference, &partial);
        // grades 3 and 0: mean 1.5 -> 30
        assert_eq!(result.factors[3].points, 7.5);
        assert!(result.warnings.contains(&"sales tax data unavailable".to_string()));
    }

    #[test]
    fn test_out_of_range_score_is_minimum() {
        let preference = AdministrationPreference {
            healthcare: Some(QualityLevel::Basic),
            ..AdministrationPreference::default()
        };
        let broken = Town {
            healthcare_score: Some(42.0),
            ..town()
        };
        let result = score_administration(&preference, &broken);
        assert_eq!(result.factors[0].points, 0.0);
        assert!(result.warnings.contains(&"healthcare score out of range".to_string()));
    }

    #[test]
    fn test_whole_category_missing_is_neutral() {
        let preference = AdministrationPreference {
            healthcare: Some(QualityLevel::Good),
            income_tax_sensitive: true,
            ..AdministrationPreference::default()
        };
        let result = score_administration(&preference, &Town::new("2", "Unknown", "Nowhere"));
        assert_eq!(result.score, 50);
        assert_eq!(result.warnings, vec![ADMINISTRATION_UNAVAILABLE.to_string()]);
    }
}
