//! Hobbies scoring: share of the user's activities and interests a town supports.

use std::collections::HashSet;

use crate::core::normalize::{normalize, normalized_set};
use crate::core::reference::ReferenceData;
use crate::core::scorecard::ScoreCard;
use crate::models::{Category, CategoryScore, HobbiesPreference, Town};

pub const HOBBIES_UNAVAILABLE: &str = "hobbies data unavailable";

pub fn score_hobbies(preference: &HobbiesPreference, town: &Town, reference: &ReferenceData) -> CategoryScore {
    let selected = selected_hobbies(preference);
    if selected.is_empty() {
        return ScoreCard::open(Category::Hobbies, "Open to any activities");
    }

    let activities = normalized_set(&town.activities_available);
    let interests = normalized_set(&town.interests_supported);
    let town_has_data = !activities.is_empty() || !interests.is_empty();

    if !town_has_data && selected.iter().any(|(tag, _)| !reference.is_universal_hobby(tag)) {
        return ScoreCard::neutral(Category::Hobbies, HOBBIES_UNAVAILABLE);
    }

    let mut matched = Vec::new();
    let mut unmatched = Vec::new();
    for (tag, kind) in &selected {
        let offered = match kind {
            HobbyKind::Activity => &activities,
            HobbyKind::Interest => &interests,
        };
        if reference.is_universal_hobby(tag) || offers(offered, tag, reference) {
            matched.push(tag.as_str());
        } else {
            unmatched.push(tag.as_str());
        }
    }

    let per_hobby = 100.0 / selected.len() as f64;
    let mut card = ScoreCard::new(Category::Hobbies, 100.0);
    if !matched.is_empty() {
        card.award(
            per_hobby * matched.len() as f64,
            format!("Hobbies available ({})", matched.join(", ")),
        );
    }
    if !unmatched.is_empty() {
        card.award(0.0, format!("Hobbies not available ({})", unmatched.join(", ")));
    }
    card.finish()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum HobbyKind {
    Activity,
    Interest,
}

/// Union of activity and interest tags, normalized, first occurrence wins
fn selected_hobbies(preference: &HobbiesPreference) -> Vec<(String, HobbyKind)> {
    let mut seen = HashSet::new();
    let tagged = preference
        .activities
        .iter()
        .map(|a| (a, HobbyKind::Activity))
        .chain(preference.interests.iter().map(|i| (i, HobbyKind::Interest)));

    tagged
        .filter_map(|(raw, kind)| {
            let tag = normalize(raw);
            (!tag.is_empty() && seen.insert(tag.clone())).then_some((tag, kind))
        })
        .collect()
}

/// A tag is offered directly or, for a compound tag, through any member
fn offers(offered: &HashSet<String>, tag: &str, reference: &ReferenceData) -> bool {
    offered.contains(tag)
        || reference
            .compound_members(tag)
            .is_some_and(|members| members.iter().any(|m| offered.contains(m)))
}
