//! Trio ranking throughput over synthetic rosters.
//!
//! Run with: `cargo bench`
//! Roster sizes cover a small personal roster up to a large late-game one.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use majel::data::{
    AbilitySlot, ConditionKind, EffectBundle, EffectTag, Engagement, IntentDefinition,
    OfficerAbility, RosterOfficer, TargetContext,
};
use majel::optimizer::{recommend_crews, RecommendRequest};

const EFFECT_KEYS: &[&str] = &[
    "damage_dealt",
    "weapon_damage",
    "crit_chance",
    "mitigation",
    "hull_health",
    "mining_rate",
];

fn synthetic(officers: usize) -> (Vec<RosterOfficer>, EffectBundle) {
    let mut bundle = EffectBundle::default();
    bundle.intent_weights.insert(
        "grinding".to_string(),
        EFFECT_KEYS
            .iter()
            .enumerate()
            .map(|(i, key)| (key.to_string(), 2.0 - i as f64 * 0.4))
            .collect(),
    );
    bundle.intents.insert(
        "grinding".to_string(),
        IntentDefinition {
            name: None,
            default_context: TargetContext::new("hostile", Engagement::Attacking).with_tag("pve"),
        },
    );

    let mut roster = Vec::with_capacity(officers);
    for i in 0..officers {
        let id = format!("officer-{i}");
        let key = EFFECT_KEYS[i % EFFECT_KEYS.len()];
        let mut effect = EffectTag::new(key, 0.05 + (i % 11) as f64 * 0.05);
        if i % 3 == 0 {
            effect = effect.with_condition(ConditionKind::AtRoundStart);
        }
        if i % 7 == 0 {
            effect = effect.with_target_kind("station");
        }
        let slot = if i % 2 == 0 {
            AbilitySlot::CaptainManeuver
        } else {
            AbilitySlot::OfficerAbility
        };
        bundle
            .officer_abilities
            .insert(id.clone(), vec![OfficerAbility::new(slot, vec![effect])]);

        let mut officer = RosterOfficer::new(id);
        if i % 4 != 0 {
            officer = officer.with_synergy(format!("group-{}", i % 5));
        }
        roster.push(officer);
    }
    (roster, bundle)
}

fn bench_ranking(c: &mut Criterion) {
    let mut group = c.benchmark_group("ranking");
    group.sample_size(20);

    for officers in [20usize, 50, 100] {
        let (roster, bundle) = synthetic(officers);
        let trios = officers * (officers - 1) * (officers - 2) / 2;
        group.throughput(Throughput::Elements(trios as u64));
        group.bench_with_input(BenchmarkId::from_parameter(officers), &officers, |b, _| {
            let request = RecommendRequest {
                limit: 10,
                ..RecommendRequest::new(&roster, "grinding")
            };
            b.iter(|| black_box(recommend_crews(&request, Some(&bundle))));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_ranking);
criterion_main!(benches);
