use chrono::{TimeZone, Utc};
use nutridex::{
    discover, matches, sort_recipes, Author, Difficulty, FilterCriteria, MacroTotals, Recipe,
    SortStrategy,
};

fn recipe(id: u64, title: &str) -> Recipe {
    Recipe {
        id,
        title: title.into(),
        description: String::new(),
        image_url: None,
        prep_time_minutes: 30,
        servings: 2,
        difficulty: Difficulty::Easy,
        rating: Some(4.0),
        ratings_count: 1,
        created_at: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap() + chrono::Duration::days(id as i64),
        author: Author {
            id: "chef-1".into(),
            name: "Ana".into(),
            avatar_url: None,
        },
        categories: vec![],
        allergens: vec![],
        macros: MacroTotals::default(),
    }
}

#[test]
fn text_match_covers_title_and_description() {
    let mut r = recipe(1, "Bowl de frango");
    r.description = "com legumes assados".into();

    let mut criteria = FilterCriteria::new();
    criteria.search_term = "FRANGO".into();
    assert!(matches(&r, &criteria));

    criteria.search_term = "legumes".into();
    assert!(matches(&r, &criteria));

    criteria.search_term = "peixe".into();
    assert!(!matches(&r, &criteria));
}

// Category matching is deliberately a substring check, tolerating
// pluralization and casing drift in source category names. Do not tighten
// to exact equality without product sign-off; this test pins the current
// behavior.
#[test]
fn category_match_is_substring_not_exact() {
    let mut r = recipe(1, "Panqueca");
    r.categories = vec!["Sobremesas Fit".into()];

    let mut criteria = FilterCriteria::new();
    criteria.category = Some("sobremesa".into());
    assert!(matches(&r, &criteria));

    criteria.category = Some("Sobremesas Fit".into());
    assert!(matches(&r, &criteria));

    criteria.category = Some("salgado".into());
    assert!(!matches(&r, &criteria));
}

#[test]
fn difficulty_is_exact_when_set() {
    let mut r = recipe(1, "Risoto");
    r.difficulty = Difficulty::Hard;

    let mut criteria = FilterCriteria::new();
    assert!(matches(&r, &criteria)); // "all"

    criteria.difficulty = Some(Difficulty::Hard);
    assert!(matches(&r, &criteria));

    criteria.difficulty = Some(Difficulty::Easy);
    assert!(!matches(&r, &criteria));
}

#[test]
fn time_range_upper_bound_is_an_unbounded_sentinel() {
    let mut slow = recipe(1, "Feijoada");
    slow.prep_time_minutes = 500;

    let mut criteria = FilterCriteria::new();
    criteria.time_range = (0, 181); // slider at max = no upper bound
    assert!(matches(&slow, &criteria));

    criteria.time_range = (0, 30);
    assert!(!matches(&slow, &criteria));

    criteria.time_range = (60, 181);
    assert!(matches(&slow, &criteria));
}

#[test]
fn servings_range_is_inclusive_on_both_ends() {
    let mut r = recipe(1, "Lasanha");
    r.servings = 6;

    let mut criteria = FilterCriteria::new();
    criteria.servings_range = (6, 6);
    assert!(matches(&r, &criteria));

    criteria.servings_range = (1, 5);
    assert!(!matches(&r, &criteria));

    criteria.servings_range = (7, 12);
    assert!(!matches(&r, &criteria));
}

#[test]
fn allergen_exclusion_requires_empty_intersection() {
    let mut with_gluten = recipe(1, "Macarrão");
    with_gluten.allergens = vec!["gluten".into(), "soy".into()];
    let mut soy_only = recipe(2, "Tofu grelhado");
    soy_only.allergens = vec!["soy".into()];

    let mut criteria = FilterCriteria::with_allergy_profile(["gluten"]);

    // toggle off: everything passes
    assert!(matches(&with_gluten, &criteria));

    criteria.allergen_filter_enabled = true;
    assert!(!matches(&with_gluten, &criteria));
    assert!(matches(&soy_only, &criteria));
}

#[test]
fn minimum_rating_counts_unrated_as_zero() {
    let mut unrated = recipe(1, "Nova receita");
    unrated.rating = None;

    let mut criteria = FilterCriteria::new();
    assert!(matches(&unrated, &criteria));

    criteria.min_rating = Some(3.0);
    assert!(!matches(&unrated, &criteria));
}

#[test]
fn sort_newest_and_oldest_use_creation_time() {
    let mut recipes = vec![recipe(2, "b"), recipe(3, "c"), recipe(1, "a")];
    sort_recipes(&mut recipes, SortStrategy::Newest);
    assert_eq!(ids(&recipes), [3, 2, 1]);

    sort_recipes(&mut recipes, SortStrategy::Oldest);
    assert_eq!(ids(&recipes), [1, 2, 3]);
}

#[test]
fn sort_by_time_is_ascending() {
    let mut quick = recipe(1, "Vitamina");
    quick.prep_time_minutes = 5;
    let mut slow = recipe(2, "Assado");
    slow.prep_time_minutes = 90;

    let mut recipes = vec![slow, quick];
    sort_recipes(&mut recipes, SortStrategy::Time);
    assert_eq!(ids(&recipes), [1, 2]);
}

#[test]
fn rating_sort_is_stable_on_ties() {
    let mut first = recipe(1, "Empate A");
    first.rating = Some(4.0);
    let mut second = recipe(2, "Empate B");
    second.rating = Some(4.0);
    let mut top = recipe(3, "Melhor");
    top.rating = Some(5.0);
    let mut unrated = recipe(4, "Sem nota");
    unrated.rating = None;

    let mut recipes = vec![first, second, top, unrated];
    sort_recipes(&mut recipes, SortStrategy::Rating);

    // ties keep input order; unrated sorts as 0, last but not excluded
    assert_eq!(ids(&recipes), [3, 1, 2, 4]);
}

#[test]
fn discover_filters_then_sorts() {
    let mut vegan = recipe(1, "Salada vegana");
    vegan.categories = vec!["Vegano".into()];
    vegan.rating = Some(3.5);
    let mut bowl = recipe(2, "Bowl vegano");
    bowl.categories = vec!["Vegano".into()];
    bowl.rating = Some(4.8);
    let mut meat = recipe(3, "Picanha");
    meat.categories = vec!["Carnes".into()];

    let all = vec![vegan, bowl, meat];
    let mut criteria = FilterCriteria::new();
    criteria.category = Some("vegano".into());
    criteria.sort_by = SortStrategy::Rating;

    let hits = discover(&all, &criteria);
    assert_eq!(hits.iter().map(|r| r.id).collect::<Vec<_>>(), [2, 1]);
}

#[test]
fn empty_collection_discovers_nothing() {
    let criteria = FilterCriteria::new();
    assert!(discover(&[], &criteria).is_empty());
}

#[test]
fn criteria_serialize_with_wire_names() {
    let mut criteria = FilterCriteria::new();
    criteria.sort_by = SortStrategy::Rating;
    criteria.difficulty = Some(Difficulty::Easy);

    let value = serde_json::to_value(&criteria).unwrap();
    assert_eq!(value["sortBy"], serde_json::json!("rating"));
    assert_eq!(value["difficulty"], serde_json::json!("easy"));

    let back: FilterCriteria = serde_json::from_value(value).unwrap();
    assert_eq!(back, criteria);
}

fn ids(recipes: &[Recipe]) -> Vec<u64> {
    recipes.iter().map(|r| r.id).collect()
}
