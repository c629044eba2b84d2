//! End-to-end tests through the reference duel.
//!
//! These tests verify the whole pipeline a game runs each turn: snapshot,
//! availability, choice, phased resolution against `DuelState`.

use ability_engine::abilities::{AbilityDef, AbilityType};
use ability_engine::core::{AbilityId, EntityId, ResolveConfig};
use ability_engine::engine::Engine;
use ability_engine::games::duel::{self, DuelState};
use ability_engine::resolver::GameContext;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

const P1: EntityId = DuelState::PLAYER_ONE;
const P2: EntityId = DuelState::PLAYER_TWO;

fn engine() -> Engine {
    Engine::builder()
        .with_dice_conditions()
        .abilities(duel::monk_abilities())
        .statuses(duel::monk_statuses())
        .build()
        .unwrap()
}

fn all_ids(engine: &Engine) -> Vec<AbilityId> {
    engine.catalog().iter().map(|d| d.id.clone()).collect()
}

// =============================================================================
// Scenarios
// =============================================================================

/// Test four fists surface the 6-damage variant, which takes 50 health to 44.
#[test]
fn test_fist_technique_scenario() {
    let engine = engine();
    let mut state = DuelState::new(&engine, &all_ids(&engine), 50);

    let ctx = state.condition_context(P1, P2, &[1, 1, 2, 2, 4], Some("offensiveRoll"));
    assert_eq!(ctx.face_count("fist"), 4);

    let available = state.available_abilities(&engine, P1, &ctx);
    assert_eq!(available, vec![AbilityId::new("fist-technique-4")]);

    let dealt = state
        .activate(&engine, P1, P2, &available[0], ctx, &ResolveConfig::new())
        .unwrap();
    assert_eq!(dealt, 6);
    assert_eq!(state.get_health(P2), 44);
    assert_eq!(state.get_health(P1), 50);
}

/// Test the same scenario driven from the engine with explicit face counts.
#[test]
fn test_fist_technique_from_face_counts() {
    let engine = engine();
    let ctx = ability_engine::conditions::ConditionContext::new().with_face_count("fist", 4);
    let available = engine.available_abilities(&[AbilityId::new("fist-technique")], &ctx);
    assert_eq!(available, vec![AbilityId::new("fist-technique-4")]);
}

/// Test that a hit with Zen Strike knocks the defender down.
#[test]
fn test_zen_strike_knockdown_on_hit() {
    let engine = engine();
    let mut state = DuelState::new(&engine, &all_ids(&engine), 50);

    let ctx = state.condition_context(P1, P2, &[1, 1, 3, 6, 6], None);
    assert!(state.available_abilities(&engine, P1, &ctx).is_empty());

    let ctx = state.condition_context(P1, P2, &[2, 3, 4, 5, 5], None);
    let available = state.available_abilities(&engine, P1, &ctx);
    assert_eq!(available, vec![AbilityId::new("zen-strike"), AbilityId::new("training")]);

    state.activate(&engine, P1, P2, &"zen-strike".into(), ctx, &ResolveConfig::new());
    assert_eq!(state.get_health(P2), 45);
    assert_eq!(state.get_status_stacks(P2, &"knockdown".into()), 1);
}

/// Test that a fully shielded defender takes nothing and is not knocked down.
#[test]
fn test_shield_turns_hit_into_miss() {
    let engine = engine();
    let mut state = DuelState::new(&engine, &all_ids(&engine), 50);

    let defend = state.condition_context(P2, P1, &[], Some("defensiveRoll"));
    assert_eq!(state.available_abilities(&engine, P2, &defend), vec![AbilityId::new("meditation")]);
    state.activate(&engine, P2, P1, &"meditation".into(), defend, &ResolveConfig::new());
    state.grant_damage_shield(P2, 2);
    assert_eq!(state.combatant(P2).unwrap().shield, 5);

    let attack = state.condition_context(P1, P2, &[1, 2, 3, 4, 6], None);
    let dealt = state
        .activate(&engine, P1, P2, &"zen-strike".into(), attack, &ResolveConfig::new())
        .unwrap();

    assert_eq!(dealt, 0);
    assert_eq!(state.get_health(P2), 50);
    assert_eq!(state.get_status_stacks(P2, &"knockdown".into()), 0);
    assert_eq!(state.get_status_stacks(P2, &"chi".into()), 1);
}

/// Test that Meditation shakes off knockdown when the monk is down.
#[test]
fn test_meditation_removes_knockdown() {
    let engine = engine();
    let mut state = DuelState::new(&engine, &all_ids(&engine), 50);
    state.grant_status(P2, &"knockdown".into(), 1);

    let defend = state.condition_context(P2, P1, &[], Some("defensiveRoll"));
    state.activate(&engine, P2, P1, &"meditation".into(), defend, &ResolveConfig::new());

    assert_eq!(state.get_status_stacks(P2, &"knockdown".into()), 0);
    assert_eq!(state.get_status_stacks(P2, &"chi".into()), 1);
    assert_eq!(state.combatant(P2).unwrap().shield, 3);
}

/// Test Lotus Palm's resource gate and its custom steal action.
#[test]
fn test_lotus_palm_steals_cp() {
    let engine = engine();
    let mut state = DuelState::new(&engine, &all_ids(&engine), 50);
    let roll = [3, 4, 6, 6, 1];

    let ctx = state.condition_context(P1, P2, &roll, None);
    assert!(!state.available_abilities(&engine, P1, &ctx).contains(&"lotus-palm".into()));

    state.set_resource(P1, "cp", 3);
    state.set_resource(P2, "cp", 4);
    let ctx = state.condition_context(P1, P2, &roll, None);
    assert!(state.available_abilities(&engine, P1, &ctx).contains(&"lotus-palm".into()));

    state.activate(&engine, P1, P2, &"lotus-palm".into(), ctx, &ResolveConfig::new());
    assert_eq!(state.get_health(P2), 45);
    assert_eq!(state.combatant(P1).unwrap().resource("cp"), 5);
    assert_eq!(state.combatant(P2).unwrap().resource("cp"), 2);
    assert_eq!(state.custom_actions()[0].action_id, duel::STEAL_CP);
}

/// Test Calm Water draws at immediate timing and grants evasive afterwards.
#[test]
fn test_calm_water_sequence() {
    let engine = engine();
    let mut state = DuelState::new(&engine, &all_ids(&engine), 50);

    let ctx = state.condition_context(P1, P2, &[2, 3, 4, 5, 6], None);
    state.activate(&engine, P1, P2, &"calm-water".into(), ctx, &ResolveConfig::new());

    let p1 = state.combatant(P1).unwrap();
    assert_eq!(p1.cards_drawn, 1);
    assert_eq!(state.get_health(P2), 43);
    assert_eq!(state.get_status_stacks(P1, &"evasive".into()), 2);
}

/// Test that bonus damage from a played card lands once.
#[test]
fn test_bonus_damage_card() {
    let engine = engine();
    let mut state = DuelState::new(&engine, &all_ids(&engine), 50);

    let ctx = state.condition_context(P1, P2, &[1, 1, 1, 6, 6], None);
    let config = ResolveConfig::new().with_bonus_damage(2).once();
    let dealt = state
        .activate(&engine, P1, P2, &"fist-technique-3".into(), ctx, &config)
        .unwrap();
    assert_eq!(dealt, 6);
}

// =============================================================================
// Upgrades
// =============================================================================

/// Test that Training upgrades Fist Technique once and repeat training is a
/// no-op.
#[test]
fn test_replace_ability_idempotent() {
    let engine = engine();
    let mut state = DuelState::new(&engine, &all_ids(&engine), 50);
    let fist: AbilityId = "fist-technique".into();

    let ctx = state.condition_context(P1, P2, &[5], None);
    state.activate(&engine, P1, P2, &"training".into(), ctx.clone(), &ResolveConfig::new());
    let after_first = state.combatant(P1).unwrap().loadout.clone();
    assert_eq!(after_first.level(&fist), Some(2));

    state.activate(&engine, P1, P2, &"training".into(), ctx, &ResolveConfig::new());
    assert_eq!(state.combatant(P1).unwrap().loadout, after_first);
    assert_eq!(state.combatant(P1).unwrap().tokens.get("combo"), Some(&2));

    // The opponent's loadout is untouched.
    assert_eq!(state.combatant(P2).unwrap().loadout.level(&fist), Some(1));

    let ctx = state.condition_context(P1, P2, &[1, 1, 2, 2, 6], None);
    state.activate(&engine, P1, P2, &"fist-technique-4".into(), ctx, &ResolveConfig::new());
    assert_eq!(state.get_health(P2), 43);
}

// =============================================================================
// Catalog data
// =============================================================================

const FIST_TECHNIQUE_JSON: &str = r#"{
    "id": "fist-technique",
    "name": "Fist Technique",
    "type": "offensive",
    "description": "3/4/5 fists: deal 4/6/8 damage.",
    "variants": [
        {
            "id": "fist-technique-3",
            "trigger": {"type": "custom", "kind": "diceSet", "params": {"faces": {"fist": 3}}},
            "effects": [{"description": "Deal 4 damage", "action": {"type": "damage", "target": "opponent", "value": 4}}],
            "priority": 1
        },
        {
            "id": "fist-technique-4",
            "trigger": {"type": "custom", "kind": "diceSet", "params": {"faces": {"fist": 4}}},
            "effects": [{"description": "Deal 6 damage", "action": {"type": "damage", "target": "opponent", "value": 6}}],
            "priority": 2
        },
        {
            "id": "fist-technique-5",
            "trigger": {"type": "custom", "kind": "diceSet", "params": {"faces": {"fist": 5}}},
            "effects": [{"description": "Deal 8 damage", "action": {"type": "damage", "target": "opponent", "value": 8}}],
            "priority": 3
        }
    ]
}"#;

/// Test that JSON catalog data matches the built-in definition.
#[test]
fn test_json_catalog_fixture() {
    let def: AbilityDef = serde_json::from_str(FIST_TECHNIQUE_JSON).unwrap();
    assert_eq!(def, duel::fist_technique());
    assert_eq!(def.ability_type, AbilityType::Offensive);
}

/// Test an ability whose trigger names its game kind directly.
#[test]
fn test_json_game_kind_trigger() {
    let json = r#"{
        "id": "zen-strike",
        "name": "Zen Strike",
        "type": "offensive",
        "trigger": {"type": "smallStraight"},
        "effects": [
            {"description": "Deal 5 damage", "action": {"type": "damage", "target": "opponent", "value": 5}},
            {
                "description": "On hit, inflict knockdown",
                "action": {"type": "grantStatus", "target": "opponent", "statusId": "knockdown", "value": 1},
                "timing": "postDamage",
                "condition": {"type": "onHit"}
            }
        ]
    }"#;
    let def: AbilityDef = serde_json::from_str(json).unwrap();
    assert_eq!(def, duel::zen_strike());

    let engine = Engine::builder().with_dice_conditions().ability(def).build().unwrap();
    let ctx = ability_engine::conditions::ConditionContext::new().with_dice([1, 2, 3, 4, 6]);
    assert_eq!(
        engine.available_abilities(&[AbilityId::new("zen-strike")], &ctx),
        vec![AbilityId::new("zen-strike")]
    );
}

/// Test that the whole monk catalog survives a trip through JSON and loads
/// into an engine without issues.
#[test]
fn test_monk_catalog_json() {
    let json = serde_json::to_string(&duel::monk_abilities()).unwrap();
    let defs: Vec<AbilityDef> = serde_json::from_str(&json).unwrap();
    assert_eq!(defs, duel::monk_abilities());

    let engine = Engine::builder()
        .with_dice_conditions()
        .abilities(defs)
        .build()
        .unwrap();
    assert!(engine.validate().is_empty());
}

/// Test that validation reports dice kinds when the game forgot to register them.
#[test]
fn test_validation_without_dice_vocabulary() {
    let engine = Engine::builder().abilities(duel::monk_abilities()).build().unwrap();
    let issues = engine.validate();
    assert!(!issues.is_empty());
    assert!(issues.iter().all(|i| i.to_string().contains("unregistered condition kind")));
}

// =============================================================================
// Determinism
// =============================================================================

#[derive(Debug, PartialEq)]
struct Outcome {
    health: (i64, i64),
    statuses: Vec<(String, u32)>,
    choices: Vec<AbilityId>,
}

fn simulate(seed: u64, turns: usize) -> Outcome {
    let engine = engine();
    let mut state = DuelState::new(&engine, &all_ids(&engine), 50);
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut choices = Vec::new();

    for turn in 0..turns {
        let (attacker, defender) = if turn % 2 == 0 { (P1, P2) } else { (P2, P1) };
        let roll: Vec<u8> = (0..5).map(|_| rng.gen_range(1..=6)).collect();
        state.set_resource(attacker, "cp", rng.gen_range(0..6));

        let ctx = state.condition_context(attacker, defender, &roll, Some("offensiveRoll"));
        let available = state.available_abilities(&engine, attacker, &ctx);
        if let Some(choice) = available.first() {
            state.activate(&engine, attacker, defender, choice, ctx, &ResolveConfig::new());
            choices.push(choice.clone());
        }
        state.end_turn(defender);
    }

    let statuses = [P1, P2]
        .into_iter()
        .flat_map(|e| state.statuses().statuses_of(e))
        .map(|(id, count)| (id.to_string(), count))
        .collect();
    Outcome {
        health: (state.get_health(P1), state.get_health(P2)),
        statuses,
        choices,
    }
}

/// Test that the same seeded rolls always produce the same match.
#[test]
fn test_seeded_match_is_deterministic() {
    for seed in [1, 7, 42] {
        assert_eq!(simulate(seed, 20), simulate(seed, 20), "seed {seed} diverged");
    }
}

/// Test that health stays within bounds over a long match.
#[test]
fn test_seeded_match_health_bounded() {
    let outcome = simulate(99, 30);
    assert!(outcome.health.0 <= 50 && outcome.health.0 >= 0);
    assert!(outcome.health.1 <= 50 && outcome.health.1 >= 0);
}
