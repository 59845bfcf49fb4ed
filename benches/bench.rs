// Criterion benchmarks for Retire Match

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use retire_match::core::{budget_ratio_score, normalize::normalize, Matcher};
use retire_match::models::tags::{
    GeographicFeature, QualityLevel, TemperatureBand, UrbanRural, VegetationType,
};
use retire_match::models::{
    AdministrationPreference, BudgetPreference, ClimatePreference, CulturePreference, HobbiesPreference,
    RegionPreference, Town, UserPreference,
};

const COUNTRIES: [&str; 5] = ["Spain", "Portugal", "Mexico", "Thailand", "France"];

fn create_town(id: usize) -> Town {
    let features = GeographicFeature::ALL;
    let vegetation = VegetationType::ALL;
    let bands = TemperatureBand::ALL;

    Town {
        geographic_features: vec![features[id % features.len()]],
        vegetation_types: vec![vegetation[id % vegetation.len()]],
        summer_climate: Some(bands[id % bands.len()]),
        avg_temp_winter: Some((id % 25) as f64),
        urban_rural: Some(UrbanRural::ALL[id % UrbanRural::ALL.len()]),
        activities_available: vec!["golf".to_string(), "hiking".to_string(), "swimming".to_string()],
        healthcare_score: Some((id % 10) as f64),
        safety_score: Some(((id + 3) % 10) as f64),
        income_tax_rate_pct: Some((id % 45) as f64),
        cost_of_living: Some(1200.0 + (id % 20) as f64 * 100.0),
        typical_rent: Some(500.0 + (id % 15) as f64 * 50.0),
        ..Town::new(id.to_string(), format!("Town {}", id), COUNTRIES[id % COUNTRIES.len()])
    }
}

fn create_preference() -> UserPreference {
    UserPreference {
        id: Some("current_user".to_string()),
        region: RegionPreference {
            countries: vec!["Spain".to_string(), "Portugal".to_string()],
            regions: vec!["Mediterranean".to_string()],
            geographic_features: vec![GeographicFeature::Coastal],
            vegetation_types: vec![VegetationType::Mediterranean],
            ..RegionPreference::default()
        },
        climate: ClimatePreference {
            summer: vec![TemperatureBand::Warm],
            winter: vec![TemperatureBand::Mild],
            ..ClimatePreference::default()
        },
        culture: CulturePreference {
            urban_rural: vec![UrbanRural::Suburban],
            ..CulturePreference::default()
        },
        hobbies: HobbiesPreference {
            activities: vec!["golf".to_string(), "water sports".to_string()],
            interests: vec![],
        },
        administration: AdministrationPreference {
            healthcare: Some(QualityLevel::Good),
            income_tax_sensitive: true,
            ..AdministrationPreference::default()
        },
        budget: BudgetPreference {
            total_monthly: Some(2500.0),
            max_rent: Some(900.0),
            ..BudgetPreference::default()
        },
    }
}

fn bench_normalize(c: &mut Criterion) {
    c.bench_function("normalize", |b| {
        b.iter(|| normalize(black_box("Arts & Crafts, Mountains")));
    });
}

fn bench_budget_ratio(c: &mut Criterion) {
    c.bench_function("budget_ratio_score", |b| {
        b.iter(|| budget_ratio_score(black_box(Some(2500.0)), black_box(Some(2100.0))));
    });
}

fn bench_score_town(c: &mut Criterion) {
    let matcher = Matcher::with_default_weights();
    let preference = create_preference();
    let town = create_town(7);

    c.bench_function("score_town", |b| {
        b.iter(|| matcher.score_town(black_box(&preference), black_box(&town)));
    });
}

fn bench_ranking(c: &mut Criterion) {
    let matcher = Matcher::with_default_weights();
    let preference = create_preference();

    let mut group = c.benchmark_group("ranking");

    for town_count in [10, 100, 1000, 5000].iter() {
        let towns: Vec<Town> = (0..*town_count).map(create_town).collect();

        group.bench_with_input(BenchmarkId::new("rank_towns", town_count), town_count, |b, _| {
            b.iter(|| matcher.rank_towns(black_box(&preference), black_box(&towns), black_box(20)));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_normalize, bench_budget_ratio, bench_score_town, bench_ranking);

criterion_main!(benches);
