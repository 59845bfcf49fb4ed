//! Budget scoring: monthly budget against cost of living, plus bonus credit
//! for rent, home price and healthcare cost limits the user actually set.

use crate::core::scorecard::ScoreCard;
use crate::models::{BudgetPreference, Category, CategoryScore, Town};

/// Points are awarded directly on the 0-100 scale
const MAX_POINTS: f64 = 100.0;
const RENT_BONUS: f64 = 5.0;
const HOME_PRICE_BONUS: f64 = 5.0;
const HEALTHCARE_BONUS: f64 = 5.0;

/// Rent up to this multiple of the limit still earns a partial bonus
const RENT_STRETCH: f64 = 1.25;
const RENT_STRETCH_BONUS: f64 = 2.0;

/// (minimum budget/cost ratio, points), checked in order
const RATIO_STEPS: [(f64, u8); 7] = [(2.0, 85), (1.5, 75), (1.2, 65), (1.0, 55), (0.9, 40), (0.8, 25), (0.7, 12)];
const BELOW_STEPS: u8 = 5;
const FLEXIBLE_MONTHLY: u8 = RATIO_STEPS[0].1;

pub const INVALID_BUDGET: &str = "invalid budget value";
pub const COST_UNAVAILABLE: &str = "cost of living data unavailable";

/// Step-table score (0-85) for a monthly budget against a monthly cost.
///
/// Missing, zero, negative or non-finite inputs return the sentinel 0.
#[inline]
pub fn budget_ratio_score(budget: Option<f64>, cost: Option<f64>) -> u8 {
    let (Some(budget), Some(cost)) = (positive(budget), positive(cost)) else {
        return 0;
    };
    let ratio = budget / cost;
    RATIO_STEPS
        .iter()
        .find(|(min_ratio, _)| ratio >= *min_ratio)
        .map_or(BELOW_STEPS, |&(_, points)| points)
}

fn positive(value: Option<f64>) -> Option<f64> {
    value.filter(|v| v.is_finite() && *v > 0.0)
}

/// Score a town's affordability.
///
/// With only a monthly budget the score is exactly [`budget_ratio_score`].
/// Rent, home price and healthcare limits add bonus points only when the
/// user set them and the town has the figure. A monthly budget against an
/// unknown cost of living scores the sentinel 0 for the whole category.
pub fn score_budget(preference: &BudgetPreference, town: &Town) -> CategoryScore {
    if preference.is_open() {
        return ScoreCard::open(Category::Budget, "Open on budget");
    }

    let limits = [
        preference.total_monthly,
        preference.max_rent,
        preference.max_home_price,
        preference.max_healthcare,
    ];
    if limits.iter().flatten().any(|v| positive(Some(*v)).is_none()) {
        return ScoreCard::minimum(Category::Budget, INVALID_BUDGET);
    }

    let mut card = ScoreCard::new(Category::Budget, MAX_POINTS);
    match preference.total_monthly {
        Some(budget) => {
            let Some(cost) = positive(town.cost_of_living) else {
                card.missing("Cost of living unknown", COST_UNAVAILABLE);
                return card.finish();
            };
            let points = budget_ratio_score(Some(budget), Some(cost));
            let verdict = if budget >= cost { "covers" } else { "falls short of" };
            card.award(
                f64::from(points),
                format!("Budget {budget:.0} {verdict} cost of living {cost:.0} ({:.2}x)", budget / cost),
            );
        }
        None => card.award(f64::from(FLEXIBLE_MONTHLY), "Flexible on monthly budget"),
    }

    if let Some(max_rent) = preference.max_rent {
        rent_bonus(&mut card, max_rent, town.typical_rent);
    }
    if let Some(limit) = preference.max_home_price {
        limit_bonus(&mut card, "home price", HOME_PRICE_BONUS, limit, town.typical_home_price);
    }
    if let Some(limit) = preference.max_healthcare {
        limit_bonus(&mut card, "healthcare cost", HEALTHCARE_BONUS, limit, town.healthcare_cost);
    }
    card.finish()
}

fn rent_bonus(card: &mut ScoreCard, max_rent: f64, rent: Option<f64>) {
    let Some(rent) = positive(rent) else {
        card.missing("Rent unknown", "rent data unavailable");
        return;
    };

    if rent <= max_rent {
        card.award(RENT_BONUS, format!("Rent {rent:.0} within limit {max_rent:.0}"));
    } else if rent <= max_rent * RENT_STRETCH {
        card.award(RENT_STRETCH_BONUS, format!("Rent {rent:.0} slightly over limit {max_rent:.0}"));
    } else {
        card.award(0.0, format!("Rent {rent:.0} over limit {max_rent:.0}"));
    }
}

fn limit_bonus(card: &mut ScoreCard, facet: &str, bonus: f64, limit: f64, actual: Option<f64>) {
    let Some(actual) = positive(actual) else {
        card.missing(format!("No {facet} figure"), format!("{facet} data unavailable"));
        return;
    };

    if actual <= limit {
        card.award(bonus, format!("Typical {facet} {actual:.0} within limit {limit:.0}"));
    } else {
        card.award(0.0, format!("Typical {facet} {actual:.0} over limit {limit:.0}"));
    }
}
