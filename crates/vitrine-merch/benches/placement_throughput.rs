use criterion::{black_box, criterion_group, criterion_main, Criterion};
use vitrine_catalog::{Campaign, CampaignTone};
use vitrine_core::seed::{SeedKey, SessionSeed};
use vitrine_merch::{assign_campaign_slots, pick_seeded};

fn placement_bench(c: &mut Criterion) {
    let campaigns: Vec<Campaign> = (1..=8)
        .map(|i| Campaign {
            id: format!("cmp-{i}"),
            badge: "Акция".to_string(),
            title: "Скидки недели".to_string(),
            subtitle: "До -50% на избранное".to_string(),
            href: "/search".to_string(),
            tone: CampaignTone::Sale,
        })
        .collect();

    c.bench_function("assign_slots_200", |b| {
        b.iter(|| {
            let key = SeedKey::section(SessionSeed::fixed(42), "footwear", 0, 200);
            black_box(assign_campaign_slots(200, &campaigns, &key));
        });
    });

    c.bench_function("pick_seeded_500_of_2k", |b| {
        let pool: Vec<u32> = (0..2_000).collect();
        b.iter(|| {
            let key = SeedKey::campaign(SessionSeed::fixed(42), "footwear", 0, "cmp-3");
            black_box(pick_seeded(&pool, 500, &key));
        });
    });
}

criterion_group!(benches, placement_bench);
criterion_main!(benches);
