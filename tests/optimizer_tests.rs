//! End-to-end optimization runs: pool conservation, determinism,
//! priority-order effects, partial failure, and cancellation.

use modopt::*;
use std::collections::HashSet;

fn fixture_data() -> GameData {
    let mut factors = [0.0; StatAxis::COUNT];
    factors[StatAxis::Health.index()] = 0.0005;
    factors[StatAxis::Protection.index()] = 0.00025;
    factors[StatAxis::Speed.index()] = 0.05;
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

fn speed_plan() -> OptimizationPlan {
    OptimizationPlan::new(PlanMode::Advanced).with_weight(StatAxis::Speed, 100.0)
}

fn speed_mod(id: &str, slot: Slot, speed: f64) -> Mod {
    Mod::new(
        id,
        slot,
        SetType::Health,
        5,
        15,
        Stat::new(StatType::Speed, speed),
    )
}

/// Two mods per slot: a fast one and a slow one.
fn tiered_pool() -> ItemPool {
    let mut mods = Vec::new();
    for &slot in &Slot::ALL {
        mods.push(speed_mod(&format!("fast-{}", slot.name()), slot, 20.0));
        mods.push(speed_mod(&format!("slow-{}", slot.name()), slot, 5.0));
    }
    ItemPool::from_mods(mods).unwrap()
}

fn ids_of(assignment: &Assignment) -> HashSet<String> {
    assignment
        .mod_ids()
        .iter()
        .map(|id| id.as_str().to_string())
        .collect()
}

#[test]
fn no_mod_assigned_twice_and_none_lost() {
    let data = fixture_data();
    let pool = tiered_pool();
    let initial_ids: HashSet<String> = pool.ids().map(|id| id.as_str().to_string()).collect();

    let characters = vec![
        Character::new("First", base(), speed_plan()),
        Character::new("Second", base(), speed_plan()),
    ];
    let result = Scheduler::new(&data).optimize(&characters, pool).unwrap();

    let mut assigned: HashSet<String> = HashSet::new();
    for assignment in result.assignments() {
        for id in assignment.mod_ids() {
            // No id may appear in two assignments.
            assert!(assigned.insert(id.as_str().to_string()), "duplicate {id}");
        }
    }

    let residual_ids: HashSet<String> = result
        .residual
        .ids()
        .map(|id| id.as_str().to_string())
        .collect();
    assert!(assigned.is_disjoint(&residual_ids));

    let mut reunited = assigned;
    reunited.extend(residual_ids);
    assert_eq!(reunited, initial_ids);
}

#[test]
fn pool_shrinks_by_exactly_zero_or_six() {
    let data = fixture_data();
    let pool = tiered_pool();
    let initial_len = pool.len();

    let characters = vec![
        Character::new("First", base(), speed_plan()),
        Character::new("Second", base(), speed_plan()),
        // Third finds an empty pool and fails; the pool must not move.
        Character::new("Third", base(), speed_plan()),
    ];
    let result = Scheduler::new(&data).optimize(&characters, pool).unwrap();

    let mut expected_len = initial_len;
    for outcome in &result.outcomes {
        match outcome {
            CharacterOutcome::Assigned(assignment) => {
                assert_eq!(assignment.mods().len(), 6);
                expected_len -= 6;
            }
            CharacterOutcome::Failed { .. } => {}
            CharacterOutcome::Cancelled { .. } => {}
        }
    }
    assert_eq!(result.residual.len(), expected_len);
    assert_eq!(result.residual.len(), 0);
    assert!(matches!(
        &result.outcomes[2],
        CharacterOutcome::Failed {
            error: OptimizeError::Infeasible { .. },
            ..
        }
    ));
}

#[test]
fn identical_inputs_produce_identical_outcomes() {
    let data = fixture_data();
    let characters = vec![
        Character::new("First", base(), speed_plan()),
        Character::new("Second", base(), speed_plan()),
    ];

    let run1 = Scheduler::new(&data)
        .optimize(&characters, tiered_pool())
        .unwrap();
    let run2 = Scheduler::new(&data)
        .optimize(&characters, tiered_pool())
        .unwrap();

    assert_eq!(run1, run2);
}

#[test]
fn priority_order_changes_who_gets_the_best_mods() {
    let data = fixture_data();
    let alice = Character::new("Alice", base(), speed_plan());
    let bob = Character::new("Bob", base(), speed_plan());

    let run_ab = Scheduler::new(&data)
        .optimize(&[alice.clone(), bob.clone()], tiered_pool())
        .unwrap();
    let run_ba = Scheduler::new(&data)
        .optimize(&[bob, alice], tiered_pool())
        .unwrap();

    let alice_first = ids_of(run_ab.outcomes[0].assignment().unwrap());
    let alice_second = ids_of(run_ba.outcomes[1].assignment().unwrap());

    // First in priority always takes every fast mod.
    assert!(alice_first.iter().all(|id| id.starts_with("fast-")));
    assert!(alice_second.iter().all(|id| id.starts_with("slow-")));
    assert_ne!(alice_first, alice_second);
}

#[test]
fn exhausted_pool_leaves_second_character_infeasible() {
    let data = fixture_data();
    // Eight mods: one per slot, plus spare square and arrow mods. The
    // first character takes the best six; two leftovers cannot dress
    // the second character.
    let mut mods: Vec<Mod> = Slot::ALL
        .iter()
        .map(|&slot| speed_mod(&format!("best-{}", slot.name()), slot, 15.0))
        .collect();
    mods.push(speed_mod("spare-square", Slot::Square, 3.0));
    mods.push(speed_mod("spare-arrow", Slot::Arrow, 3.0));
    let pool = ItemPool::from_mods(mods).unwrap();

    let characters = vec![
        Character::new("First", base(), speed_plan()),
        Character::new("Second", base(), speed_plan()),
    ];
    let result = Scheduler::new(&data).optimize(&characters, pool).unwrap();

    let first = result.outcomes[0].assignment().unwrap();
    assert!(ids_of(first).iter().all(|id| id.starts_with("best-")));

    // The leftovers cover square and arrow only; diamond is the first
    // slot with no candidate.
    assert_eq!(
        &result.outcomes[1],
        &CharacterOutcome::Failed {
            character: "Second".to_string(),
            error: OptimizeError::Infeasible {
                character: "Second".to_string(),
                slot: Slot::Diamond,
            },
        }
    );
    assert_eq!(result.residual.len(), 2);
}

#[test]
fn unknown_named_plan_fails_one_character_only() {
    let data = fixture_data();
    let broken = Character::new("Broken", base(), speed_plan()).using_plan("raid-preset");
    let fine = Character::new("Fine", base(), speed_plan());

    let result = Scheduler::new(&data)
        .optimize(&[broken, fine], tiered_pool())
        .unwrap();

    assert!(matches!(
        &result.outcomes[0],
        CharacterOutcome::Failed {
            error: OptimizeError::UnknownPlan { .. },
            ..
        }
    ));
    // The failed character consumed nothing; the next one still gets
    // the fast mods.
    let fine_ids = ids_of(result.outcomes[1].assignment().unwrap());
    assert!(fine_ids.iter().all(|id| id.starts_with("fast-")));
}

#[test]
fn named_plan_resolves_like_inline() {
    let data = fixture_data();
    let inline = Character::new("Inline", base(), speed_plan());
    let named = Character::new("Named", base(), OptimizationPlan::default())
        .with_named_plan("raids", speed_plan())
        .using_plan("raids");

    let run_inline = Scheduler::new(&data)
        .optimize(&[inline], tiered_pool())
        .unwrap();
    let run_named = Scheduler::new(&data)
        .optimize(&[named], tiered_pool())
        .unwrap();

    assert_eq!(
        ids_of(run_inline.outcomes[0].assignment().unwrap()),
        ids_of(run_named.outcomes[0].assignment().unwrap()),
    );
}

#[test]
fn five_dot_filter_restricts_eligibility() {
    let data = fixture_data();
    let mut mods = Vec::new();
    for &slot in &Slot::ALL {
        // The four-dot mod carries more speed but is ineligible.
        let mut four_dot = speed_mod(&format!("four-{}", slot.name()), slot, 25.0);
        four_dot.dots = 4;
        mods.push(four_dot);
        mods.push(speed_mod(&format!("five-{}", slot.name()), slot, 10.0));
    }
    let pool = ItemPool::from_mods(mods).unwrap();

    let strict = Character::new("Strict", base(), speed_plan()).with_five_dot_filter(true);
    let result = Scheduler::new(&data).optimize(&[strict], pool).unwrap();

    let ids = ids_of(result.outcomes[0].assignment().unwrap());
    assert!(ids.iter().all(|id| id.starts_with("five-")));
}

#[test]
fn cancelled_run_is_consistent_and_resumable() {
    let data = fixture_data();
    let alice = Character::new("Alice", base(), speed_plan());
    let bob = Character::new("Bob", base(), speed_plan());

    // Uninterrupted reference run.
    let full = Scheduler::new(&data)
        .optimize(&[alice.clone(), bob.clone()], tiered_pool())
        .unwrap();

    // Cancel before anything happens: every character is recorded as
    // cancelled and the pool comes back untouched.
    let token = CancelToken::new();
    token.cancel();
    let cancelled = Scheduler::new(&data)
        .with_cancel_token(token)
        .optimize(&[alice.clone(), bob.clone()], tiered_pool())
        .unwrap();
    assert!(cancelled
        .outcomes
        .iter()
        .all(|o| matches!(o, CharacterOutcome::Cancelled { .. })));
    assert_eq!(cancelled.residual.len(), tiered_pool().len());

    // Resuming in two steps reproduces the uninterrupted run: the
    // residual pool after Alice is exactly what Bob's search needs.
    let step1 = Scheduler::new(&data)
        .optimize(&[alice], tiered_pool())
        .unwrap();
    let step2 = Scheduler::new(&data)
        .optimize(&[bob], step1.residual.clone())
        .unwrap();

    assert_eq!(&full.outcomes[0], &step1.outcomes[0]);
    assert_eq!(&full.outcomes[1], &step2.outcomes[0]);
    assert_eq!(full.residual, step2.residual);
}

#[test]
fn set_bonus_changes_the_winning_assignment() {
    let data = fixture_data();
    // Speed-set mods individually trail the health-set mods by one
    // point of speed, but four of them unlock +10% of base speed 130 =
    // 13 flat speed.
    let mut mods = Vec::new();
    for &slot in &Slot::ALL {
        mods.push(speed_mod(&format!("plain-{}", slot.name()), slot, 11.0));
        let mut set_piece = speed_mod(&format!("set-{}", slot.name()), slot, 10.0);
        set_piece.set_type = SetType::Speed;
        mods.push(set_piece);
    }
    let pool = ItemPool::from_mods(mods).unwrap();

    let character = Character::new("A", base(), speed_plan());
    let result = Scheduler::new(&data).optimize(&[character], pool).unwrap();
    let assignment = result.outcomes[0].assignment().unwrap();

    let speed_set_count = assignment
        .mods()
        .iter()
        .filter(|m| m.set_type == SetType::Speed)
        .count();
    assert_eq!(speed_set_count, 4);
    // 4 x 10 + 2 x 11 + 13 bonus = 75 speed at weight 100.
    assert!((assignment.value - 7500.0).abs() < 1e-6);
}
