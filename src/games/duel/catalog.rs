//! Monk hero content for the duel.

use crate::abilities::{AbilityDef, AbilityType, AbilityVariant, Effect, EffectAction, EffectTiming};
use crate::conditions::{dice, CompareOp, Condition};
use crate::core::{Params, Target};
use crate::status::{StatusEffectDef, StatusKind, StatusTiming};

/// Face shown by a die value.
#[must_use]
pub fn face_of(value: u8) -> Option<&'static str> {
    match value {
        1 | 2 => Some("fist"),
        3 | 4 => Some("palm"),
        5 => Some("taiji"),
        6 => Some("lotus"),
        _ => None,
    }
}

/// Status definitions used by the monk.
#[must_use]
pub fn monk_statuses() -> Vec<StatusEffectDef> {
    vec![
        StatusEffectDef::new("evasive", "Evasive", StatusKind::Buff, 3)
            .with_timing(StatusTiming::OnDefend)
            .with_description("Spend to roll a die; on 1-2 prevent all damage."),
        StatusEffectDef::new("knockdown", "Knockdown", StatusKind::Debuff, 1)
            .with_timing(StatusTiming::OnAttack)
            .with_removal_cost("cp", 2)
            .with_description("Skip your next offensive roll unless you pay 2 CP."),
        StatusEffectDef::new("chi", "Chi", StatusKind::Buff, 5)
            .with_description("Spend to add 1 damage to an attack."),
    ]
}

fn damage(value: i64) -> Effect {
    Effect::new(format!("Deal {value} damage")).with_action(EffectAction::damage(Target::Opponent, value))
}

fn fist_variant(fists: u32, damage_value: i64, priority: i32) -> AbilityVariant {
    AbilityVariant::new(
        format!("fist-technique-{fists}"),
        dice::dice_set([("fist", fists)]),
        priority,
    )
    .with_effect(damage(damage_value))
}

/// Fist Technique: 3, 4 or 5 fists for 4, 6 or 8 damage.
#[must_use]
pub fn fist_technique() -> AbilityDef {
    AbilityDef::new("fist-technique", "Fist Technique", AbilityType::Offensive)
        .with_description("3/4/5 fists: deal 4/6/8 damage.")
        .with_variant(fist_variant(3, 4, 1))
        .with_variant(fist_variant(4, 6, 2))
        .with_variant(fist_variant(5, 8, 3))
}

/// Fist Technique after its first upgrade: 5/7/9 damage.
#[must_use]
pub fn fist_technique_ii() -> AbilityDef {
    AbilityDef::new("fist-technique", "Fist Technique II", AbilityType::Offensive)
        .with_description("3/4/5 fists: deal 5/7/9 damage.")
        .with_variant(fist_variant(3, 5, 1))
        .with_variant(fist_variant(4, 7, 2))
        .with_variant(fist_variant(5, 9, 3))
}

/// Zen Strike: small straight for 5 damage and knockdown on hit.
#[must_use]
pub fn zen_strike() -> AbilityDef {
    AbilityDef::new("zen-strike", "Zen Strike", AbilityType::Offensive)
        .with_trigger(dice::small_straight())
        .with_effect(damage(5))
        .with_effect(
            Effect::new("On hit, inflict knockdown")
                .with_action(EffectAction::grant_status(Target::Opponent, "knockdown", 1))
                .with_timing(EffectTiming::PostDamage)
                .with_condition(Condition::OnHit),
        )
}

/// Calm Water: large straight for 7 damage, gain 2 evasive and draw a card.
#[must_use]
pub fn calm_water() -> AbilityDef {
    AbilityDef::new("calm-water", "Calm Water", AbilityType::Offensive)
        .with_trigger(dice::large_straight())
        .with_effect(
            Effect::new("Draw a card")
                .with_action(EffectAction::DrawCard {
                    target: Target::Caster,
                    draw_count: 1,
                })
                .with_timing(EffectTiming::Immediate),
        )
        .with_effect(damage(7))
        .with_effect(
            Effect::new("Gain 2 evasive")
                .with_action(EffectAction::grant_status(Target::Caster, "evasive", 2))
                .with_timing(EffectTiming::PostDamage),
        )
}

/// Lotus Palm: 2 lotus and 2 palms, 3 CP or more: unblockable 5 damage and
/// steal 2 CP.
#[must_use]
pub fn lotus_palm() -> AbilityDef {
    AbilityDef::new("lotus-palm", "Lotus Palm", AbilityType::Offensive)
        .with_trigger(dice::dice_set([("lotus", 2), ("palm", 2)]).and(Condition::resource("cp", CompareOp::Ge, 3)))
        .with_tag("unblockable")
        .with_effect(Effect::new("Cannot be defended"))
        .with_effect(damage(5))
        .with_effect(
            Effect::new("Steal 2 CP")
                .with_action(EffectAction::Custom {
                    target: Target::Opponent,
                    custom_action_id: "steal-cp".to_string(),
                    params: Some(Params::new().with("amount", 2i64)),
                })
                .with_timing(EffectTiming::PostDamage),
        )
}

/// Meditation: on the defensive roll, gain chi and a shield and shake off
/// knockdown.
#[must_use]
pub fn meditation() -> AbilityDef {
    AbilityDef::new("meditation", "Meditation", AbilityType::Defensive)
        .with_trigger(dice::phase("defensiveRoll", None))
        .with_effect(
            Effect::new("Gain 1 chi")
                .with_action(EffectAction::grant_status(Target::Caster, "chi", 1))
                .with_timing(EffectTiming::Immediate),
        )
        .with_effect(
            Effect::new("Remove knockdown")
                .with_action(EffectAction::remove_status(Target::Caster, "knockdown", None))
                .with_timing(EffectTiming::Immediate)
                .with_condition(Condition::has_status("knockdown", 1)),
        )
        .with_effect(
            Effect::new("Gain a 3 point damage shield")
                .with_action(EffectAction::GrantDamageShield {
                    target: Target::Caster,
                    shield_value: 3,
                })
                .with_timing(EffectTiming::Immediate),
        )
}

/// Training: spend the turn to upgrade Fist Technique.
#[must_use]
pub fn training() -> AbilityDef {
    AbilityDef::new("training", "Training", AbilityType::Offensive)
        .with_trigger(dice::dice_set([("taiji", 1)]))
        .with_effect(
            Effect::new("Upgrade Fist Technique")
                .with_action(EffectAction::ReplaceAbility {
                    target: Target::Caster,
                    target_ability_id: "fist-technique".into(),
                    new_ability_def: Box::new(fist_technique_ii()),
                    new_ability_level: 2,
                })
                .with_timing(EffectTiming::Immediate),
        )
        .with_effect(
            Effect::new("Gain 1 combo token")
                .with_action(EffectAction::GrantToken {
                    target: Target::Caster,
                    token_id: "combo".to_string(),
                    value: 1,
                })
                .with_timing(EffectTiming::Immediate),
        )
}

/// Every monk ability.
#[must_use]
pub fn monk_abilities() -> Vec<AbilityDef> {
    vec![
        fist_technique(),
        zen_strike(),
        calm_water(),
        lotus_palm(),
        meditation(),
        training(),
    ]
}
