//! Condition evaluation integration tests.
//!
//! These tests verify that evaluation is pure, that game-specific kinds only
//! work once registered, and that catalog-authored JSON conditions evaluate
//! the same as builder-made ones.

use ability_engine::conditions::{
    dice, CompareOp, CompositeOp, Condition, ConditionContext, ConditionEvaluator, ConditionRegistry,
};
use ability_engine::core::{Params, RegistryError, Target};
use proptest::prelude::*;

fn dice_registry() -> ConditionRegistry {
    let mut registry = ConditionRegistry::new();
    dice::register_dice_conditions(&mut registry).unwrap();
    registry
}

// =============================================================================
// Registry isolation
// =============================================================================

/// Test that dice kinds are unsatisfied until registered.
#[test]
fn test_dice_set_requires_registration() {
    let condition = dice::dice_set([("fist", 3)]);
    let ctx = ConditionContext::new().with_face_count("fist", 5);

    let mut registry = ConditionRegistry::new();
    assert!(!registry.evaluate(&condition, &ctx));

    dice::register_dice_conditions(&mut registry).unwrap();
    assert!(registry.evaluate(&condition, &ctx));
}

/// Test that two registries do not share registrations.
#[test]
fn test_registries_are_independent() {
    let registered = dice_registry();
    let empty = ConditionRegistry::new();
    let condition = dice::small_straight();
    let ctx = ConditionContext::new().with_dice([1, 2, 3, 4, 6]);

    assert!(registered.evaluate(&condition, &ctx));
    assert!(!empty.evaluate(&condition, &ctx));
}

/// Test that repeated init is refused without changing behaviour.
#[test]
fn test_repeated_registration_is_harmless() {
    let mut registry = dice_registry();
    assert!(matches!(
        dice::register_dice_conditions(&mut registry),
        Err(RegistryError::Duplicate(_))
    ));
    assert!(registry.evaluate(
        &dice::dice_set([("lotus", 1)]),
        &ConditionContext::new().with_face_count("lotus", 1)
    ));
}

/// Test a game-defined kind reading extra context data.
#[test]
fn test_custom_kind_reads_extra() {
    let mut registry = ConditionRegistry::new();
    registry
        .register("turnAtLeast", |params, ctx| {
            let turn = ctx.extra.get_int("turn", 0);
            turn >= params.get_int("turn", 0)
        })
        .unwrap();

    let condition = Condition::custom("turnAtLeast", Params::new().with("turn", 3i64));
    assert!(!registry.evaluate(&condition, &ConditionContext::new().with_extra("turn", 2i64)));
    assert!(registry.evaluate(&condition, &ConditionContext::new().with_extra("turn", 3i64)));
}

// =============================================================================
// Built-in kinds
// =============================================================================

/// Test status checks on both sides of the activation.
#[test]
fn test_status_conditions() {
    let registry = ConditionRegistry::new();
    let ctx = ConditionContext::new()
        .with_status("evasive", 2)
        .with_target_status("knockdown", 1);

    assert!(registry.evaluate(&Condition::has_status("evasive", 2), &ctx));
    assert!(!registry.evaluate(&Condition::has_status("evasive", 3), &ctx));
    assert!(registry.evaluate(&Condition::target_has_status("knockdown", 1), &ctx));

    let opponent_check = Condition::HasStatus {
        target: Target::Opponent,
        status_id: "knockdown".into(),
        min_stacks: 1,
    };
    assert!(registry.evaluate(&opponent_check, &ctx));
    assert!(!registry.evaluate(&Condition::has_status("knockdown", 1), &ctx));
}

/// Test that a zero stack threshold still requires the status.
#[test]
fn test_zero_min_stacks_requires_presence() {
    let registry = ConditionRegistry::new();
    let condition = Condition::has_status("evasive", 0);

    assert!(!registry.evaluate(&condition, &ConditionContext::new()));
    assert!(registry.evaluate(&condition, &ConditionContext::new().with_status("evasive", 1)));
}

/// Test hit and miss guards inside and outside resolution.
#[test]
fn test_hit_and_miss() {
    let registry = ConditionRegistry::new();

    let outside = ConditionContext::new();
    assert!(!registry.evaluate(&Condition::OnHit, &outside));
    assert!(!registry.evaluate(&Condition::OnMiss, &outside));

    let hit = ConditionContext::new().with_damage_dealt(4);
    assert!(registry.evaluate(&Condition::OnHit, &hit));
    assert!(!registry.evaluate(&Condition::OnMiss, &hit));

    let miss = ConditionContext::new().with_damage_dealt(0);
    assert!(!registry.evaluate(&Condition::OnHit, &miss));
    assert!(registry.evaluate(&Condition::OnMiss, &miss));
}

/// Test composite identities and malformed negation.
#[test]
fn test_composites() {
    let registry = ConditionRegistry::new();
    let ctx = ConditionContext::new();

    assert!(registry.evaluate(&Condition::all(Vec::new()), &ctx));
    assert!(!registry.evaluate(&Condition::any(Vec::new()), &ctx));
    assert!(!registry.evaluate(&Condition::Always.negate(), &ctx));

    let malformed = Condition::Composite {
        op: CompositeOp::Not,
        children: vec![Condition::Always, Condition::Always],
    };
    assert!(!registry.evaluate(&malformed, &ctx));
}

// =============================================================================
// JSON
// =============================================================================

/// Test a nested catalog condition loaded from JSON.
#[test]
fn test_json_condition_tree() {
    let json = r#"{
        "type": "composite",
        "op": "and",
        "children": [
            {"type": "custom", "kind": "diceSet", "params": {"faces": {"lotus": 2, "palm": 2}}},
            {"type": "resource", "resourceId": "cp", "op": ">=", "value": 3},
            {
                "type": "composite",
                "op": "not",
                "children": [{"type": "hasStatus", "statusId": "knockdown"}]
            }
        ]
    }"#;
    let condition: Condition = serde_json::from_str(json).unwrap();

    let built = dice::dice_set([("lotus", 2), ("palm", 2)])
        .and(Condition::resource("cp", CompareOp::Ge, 3))
        .and(Condition::has_status("knockdown", 1).negate());
    assert_eq!(condition, built);

    let registry = dice_registry();
    let ctx = ConditionContext::new()
        .with_face_count("lotus", 2)
        .with_face_count("palm", 3)
        .with_resource("cp", 3);
    assert!(registry.evaluate(&condition, &ctx));
    assert!(!registry.evaluate(&condition, &ctx.clone().with_status("knockdown", 1)));
    assert!(!registry.evaluate(&condition, &ctx.with_resource("cp", 2)));
}

// =============================================================================
// Properties
// =============================================================================

fn arb_context() -> impl Strategy<Value = ConditionContext> {
    (
        prop::collection::vec(1u8..=6, 0..6),
        0i64..10,
        0u32..4,
        prop::option::of(0i64..10),
    )
        .prop_map(|(dice, cp, evasive, dealt)| {
            let mut ctx = ConditionContext::new()
                .with_dice(dice.clone())
                .with_resource("cp", cp)
                .with_status("evasive", evasive);
            for value in dice {
                let face = if value <= 2 { "fist" } else { "other" };
                *ctx.face_counts.entry(face.to_string()).or_insert(0) += 1;
            }
            ctx.damage_dealt = dealt;
            ctx
        })
}

fn sample_conditions() -> Vec<Condition> {
    vec![
        Condition::Always,
        dice::dice_set([("fist", 2)]),
        dice::small_straight(),
        Condition::resource("cp", CompareOp::Gt, 4),
        Condition::has_status("evasive", 2).or(Condition::OnHit),
        Condition::OnMiss.negate(),
        Condition::custom("unregistered", Params::new()),
    ]
}

proptest! {
    /// Evaluation leaves the context untouched and gives the same answer twice.
    #[test]
    fn prop_evaluation_is_pure(ctx in arb_context()) {
        let registry = dice_registry();
        let before = ctx.clone();

        for condition in sample_conditions() {
            let first = ConditionEvaluator::evaluate(&condition, &ctx, &registry);
            let second = ConditionEvaluator::evaluate(&condition, &ctx, &registry);
            prop_assert_eq!(first, second);
        }
        prop_assert_eq!(ctx, before);
    }

    /// Double negation is the identity for well-formed conditions.
    #[test]
    fn prop_double_negation(ctx in arb_context()) {
        let registry = dice_registry();
        for condition in sample_conditions() {
            let twice = condition.clone().negate().negate();
            prop_assert_eq!(registry.evaluate(&condition, &ctx), registry.evaluate(&twice, &ctx));
        }
    }
}
