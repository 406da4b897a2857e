//! Value-function semantics exercised through the public API.

use modopt::*;

/// Fixture constants: factor = 1 / typical observed range per axis.
/// Chosen so expected values can be computed by hand; accuracy and
/// crit avoidance deliberately share a factor.
fn fixture_data() -> GameData {
    let mut factors = [0.0; StatAxis::COUNT];
    factors[StatAxis::Health.index()] = 0.0005; // 1/2000
    factors[StatAxis::Protection.index()] = 0.00025; // 1/4000
    factors[StatAxis::Speed.index()] = 0.05; // 1/20
    factors[StatAxis::CritDmg.index()] = 0.04;
    factors[StatAxis::Potency.index()] = 0.08;
    factors[StatAxis::Tenacity.index()] = 0.08;
    factors[StatAxis::Offense.index()] = 0.004;
    factors[StatAxis::CritChance.index()] = 0.1;
    factors[StatAxis::Defense.index()] = 0.03;
    factors[StatAxis::Accuracy.index()] = 0.08;
    factors[StatAxis::CritAvoid.index()] = 0.08;

    GameData::new(
        factors,
        vec![
            SetBonus::new(SetType::Health, 2, Stat::new(StatType::HealthPct, 10.0)),
            SetBonus::new(SetType::Speed, 4, Stat::new(StatType::SpeedPct, 10.0)),
        ],
    )
    .unwrap()
}

fn base() -> BaseStats {
    BaseStats::new(18000.0, 24000.0, 3000.0, 1500.0, 1.0, 130.0, 200.0, 100.0)
}

#[test]
fn basic_weights_interchangeable_only_with_equal_factors() {
    let data = fixture_data();
    let plan = OptimizationPlan::new(PlanMode::Basic)
        .with_weight(StatAxis::Accuracy, 50.0)
        .with_weight(StatAxis::CritAvoid, 50.0)
        .with_weight(StatAxis::Speed, 50.0)
        .with_weight(StatAxis::Health, 50.0);

    let mut accuracy = StatSet::new();
    accuracy.add(StatType::AccuracyPct, 3.0);
    let mut crit_avoid = StatSet::new();
    crit_avoid.add(StatType::CritAvoidPct, 3.0);

    // Equal factors (0.08): 3 * 50 * 0.08 = 12 either way.
    let a = score_stat_set(&accuracy, &base(), &plan, &data);
    let b = score_stat_set(&crit_avoid, &base(), &plan, &data);
    assert!((a - 12.0).abs() < 1e-9);
    assert!((a - b).abs() < 1e-12);

    // Unequal factors: the same raw magnitude is not interchangeable.
    let mut speed = StatSet::new();
    speed.add(StatType::Speed, 3.0);
    let mut health = StatSet::new();
    health.add(StatType::Health, 3.0);

    let s = score_stat_set(&speed, &base(), &plan, &data);
    let h = score_stat_set(&health, &base(), &plan, &data);
    assert!((s - 7.5).abs() < 1e-9); // 3 * 50 * 0.05
    assert!((h - 0.075).abs() < 1e-9); // 3 * 50 * 0.0005
    assert!((s - h).abs() > 1.0);
}

#[test]
fn advanced_weights_apply_per_point() {
    let data = fixture_data();
    let plan = OptimizationPlan::new(PlanMode::Advanced).with_weight(StatAxis::Speed, 100.0);

    // The documented example: weight 100, +6 speed -> 600.
    let m = Mod::new(
        "m1",
        Slot::Arrow,
        SetType::Speed,
        5,
        15,
        Stat::new(StatType::Speed, 6.0),
    );
    assert!((score_mod(&m, &base(), &plan, &data) - 600.0).abs() < 1e-9);
}

#[test]
fn percent_lines_convert_through_base_stats() {
    let data = fixture_data();
    let plan = OptimizationPlan::new(PlanMode::Advanced).with_weight(StatAxis::Speed, 100.0);

    // The documented example: a 10% speed bonus on base speed 130 is
    // 13 flat speed, worth 100 * 130 * 0.1 = 1300.
    let mut bonus = StatSet::new();
    bonus.add(StatType::SpeedPct, 10.0);
    assert!((score_stat_set(&bonus, &base(), &plan, &data) - 1300.0).abs() < 1e-9);
}

#[test]
fn offense_percent_mixes_physical_and_special() {
    let data = fixture_data();
    let plan = OptimizationPlan::new(PlanMode::Advanced).with_weight(StatAxis::Offense, 1.0);
    let mixed = BaseStats::new(18000.0, 24000.0, 3000.0, 1500.0, 0.5, 130.0, 200.0, 100.0);

    let mut line = StatSet::new();
    line.add(StatType::OffensePct, 10.0);
    // Offense base = 3000 * 0.5 + 1500 * 0.5 = 2250; 10% -> 225.
    let score = score_stat_set(&line, &mixed, &plan, &data);
    assert!((score - 225.0).abs() < 1e-9);
}

#[test]
fn locked_secondaries_contribute_nothing() {
    let data = fixture_data();
    let plan = OptimizationPlan::new(PlanMode::Advanced).with_weight(StatAxis::Speed, 100.0);

    let locked = Mod::new(
        "locked",
        Slot::Arrow,
        SetType::Speed,
        5,
        1,
        Stat::new(StatType::Speed, 20.0),
    )
    .with_locked_secondary(Stat::new(StatType::Speed, 5.0));

    let revealed = Mod::new(
        "revealed",
        Slot::Arrow,
        SetType::Speed,
        5,
        12,
        Stat::new(StatType::Speed, 20.0),
    )
    .with_secondary(Stat::new(StatType::Speed, 5.0));

    let base = base();
    assert!((score_mod(&locked, &base, &plan, &data) - 2000.0).abs() < 1e-9);
    assert!((score_mod(&revealed, &base, &plan, &data) - 2500.0).abs() < 1e-9);
}

#[test]
fn set_bonus_counted_once_per_completed_threshold() {
    let data = fixture_data();
    let plan = OptimizationPlan::new(PlanMode::Advanced).with_weight(StatAxis::Health, 1.0);

    // Four health-set mods form two completed 2-mod sets.
    let mods: Vec<Mod> = Slot::ALL[..4]
        .iter()
        .enumerate()
        .map(|(i, &slot)| {
            Mod::new(
                format!("h{i}"),
                slot,
                SetType::Health,
                5,
                15,
                Stat::new(StatType::Health, 100.0),
            )
        })
        .collect();
    let refs: Vec<&Mod> = mods.iter().collect();

    // Lines: 4 * 100 = 400. Bonus: 2 * (10% of 18000) = 3600.
    let score = score_assignment(&refs, &base(), &plan, &data);
    assert!((score - 4000.0).abs() < 1e-9);
}
