use vitrine_catalog::{Category, Product};
use vitrine_feed::{group_by_category, section_order, sort_products, FeedConfig, SortKey, VisibleCounts};

fn product(id: u64, category: &str, premium: bool) -> Product {
    Product {
        id,
        name: format!("Товар {id}"),
        price: 1000 + id as i64,
        old_price: None,
        images: vec!["/img/placeholder.png".to_string()],
        category: Category::parse(category),
        subcategory: None,
        brand: None,
        brand_id: None,
        badge: None,
        premium,
        is_new: false,
        gender: None,
        created_at: None,
        stock: None,
        popularity: None,
        recommendation_score: None,
        description: None,
    }
}

#[test]
fn grouping_excludes_premium_and_keeps_order() {
    let products = vec![
        product(1, "обувь", false),
        product(2, "clothes", false),
        product(3, "footwear", true),
        product(4, "footwear", false),
        product(5, "бижутерия", false),
    ];

    let groups = group_by_category(&products);
    let footwear: Vec<u64> = groups["footwear"].iter().map(|p| p.id).collect();
    assert_eq!(footwear, vec![1, 4]);
    assert_eq!(groups["clothes"].len(), 1);
    assert_eq!(groups["other"].len(), 1);
    assert!(!groups.contains_key("premium"));
}

#[test]
fn sections_run_canonical_first_then_alphabetical() {
    let products = vec![
        product(1, "весенняя капсула", false),
        product(2, "bags", false),
        product(3, "footwear", false),
        product(4, "аксессуары", false),
    ];

    let groups = group_by_category(&products);
    let order = section_order(&groups);
    assert_eq!(order, vec!["footwear", "bags", "accessories", "other"]);
}

#[test]
fn price_sorts_are_stable_over_ties() {
    let mut products = vec![
        product(1, "footwear", false),
        product(2, "footwear", false),
        product(3, "footwear", false),
    ];
    products[0].price = 2000;
    products[1].price = 1000;
    products[2].price = 2000;

    let mut ascending = products.clone();
    sort_products(&mut ascending, SortKey::PriceAsc);
    let ids: Vec<u64> = ascending.iter().map(|p| p.id).collect();
    assert_eq!(ids, vec![2, 1, 3]);

    let mut descending = products.clone();
    sort_products(&mut descending, SortKey::PriceDesc);
    let ids: Vec<u64> = descending.iter().map(|p| p.id).collect();
    assert_eq!(ids, vec![1, 3, 2]);
}

#[test]
fn popular_sort_requires_a_leading_popularity_value() {
    let mut products = vec![
        product(1, "footwear", false),
        product(2, "footwear", false),
        product(3, "footwear", false),
    ];
    products[1].popularity = Some(50.0);
    products[2].popularity = Some(90.0);

    // First item has no popularity, so the source order stands.
    let mut unsorted = products.clone();
    sort_products(&mut unsorted, SortKey::Popular);
    let ids: Vec<u64> = unsorted.iter().map(|p| p.id).collect();
    assert_eq!(ids, vec![1, 2, 3]);

    products[0].popularity = Some(10.0);
    sort_products(&mut products, SortKey::Popular);
    let ids: Vec<u64> = products.iter().map(|p| p.id).collect();
    assert_eq!(ids, vec![3, 2, 1]);
}

#[test]
fn visible_counts_clamp_into_range() {
    let config = FeedConfig::default();
    let counts = VisibleCounts::default();

    assert_eq!(counts.visible_for("footwear", 100, &config), 20);
    assert_eq!(counts.visible_for("footwear", 12, &config), 12);
    assert_eq!(counts.visible_for("footwear", 0, &config), 0);
}

#[test]
fn show_more_pages_forward_and_show_less_collapses() {
    let config = FeedConfig::default();
    let mut counts = VisibleCounts::default();

    counts.show_more("footwear", 100, &config);
    assert_eq!(counts.visible_for("footwear", 100, &config), 50);

    counts.show_more("footwear", 100, &config);
    assert_eq!(counts.visible_for("footwear", 100, &config), 80);

    counts.show_more("footwear", 100, &config);
    assert_eq!(counts.visible_for("footwear", 100, &config), 100);

    counts.show_less("footwear", 100, &config);
    assert_eq!(counts.visible_for("footwear", 100, &config), 20);
}

#[test]
fn narrowed_totals_clamp_stale_counts() {
    let config = FeedConfig::default();
    let mut counts = VisibleCounts::default();

    counts.show_more("footwear", 100, &config);
    assert_eq!(counts.visible_for("footwear", 100, &config), 50);

    // Filters narrowed the section; the stored 50 clamps down.
    assert_eq!(counts.visible_for("footwear", 30, &config), 30);

    // And paging from the narrowed state steps from the clamped value.
    counts.show_more("footwear", 30, &config);
    assert_eq!(counts.visible_for("footwear", 30, &config), 30);
    assert_eq!(counts.visible_for("footwear", 200, &config), 30);

    counts.show_more("footwear", 200, &config);
    assert_eq!(counts.visible_for("footwear", 200, &config), 60);
}

#[test]
fn collapsed_small_sections_regrow_to_the_initial_page() {
    let config = FeedConfig::default();
    let mut counts = VisibleCounts::default();

    counts.show_less("footwear", 5, &config);
    assert_eq!(counts.visible_for("footwear", 5, &config), 5);

    // The category refilled; the stored 5 grows back to the initial page.
    assert_eq!(counts.visible_for("footwear", 100, &config), 20);
}

#[test]
fn retain_drops_stale_categories() {
    let config = FeedConfig::default();
    let mut counts = VisibleCounts::default();

    counts.show_more("footwear", 100, &config);
    counts.show_more("clothes", 100, &config);
    counts.retain(&["clothes".to_string()]);

    assert_eq!(counts.visible_for("clothes", 100, &config), 50);
    assert_eq!(counts.visible_for("footwear", 100, &config), 20);
}
