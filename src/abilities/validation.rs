//! Offline catalog checks.
//!
//! At runtime a broken definition degrades quietly: an unregistered condition
//! kind is unsatisfied, an untimed heal never fires. `validate_catalog` finds
//! those cases up front so a game can fail its content tests instead of
//! shipping an ability that silently does nothing.

use thiserror::Error;

use crate::conditions::{CompositeOp, Condition, ConditionRegistry};
use crate::core::AbilityId;

use super::definition::AbilityDef;
use super::effect::{Effect, EffectAction, EffectTiming};

/// A problem found in catalog data.
///
/// `owner` is the base or variant id the offending item belongs to.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum CatalogIssue {
    #[error("ability '{0}' has neither a trigger nor variants and can never be available")]
    NoTrigger(AbilityId),

    #[error("ability '{0}' defines both a trigger and variants; the trigger is ignored")]
    AmbiguousTrigger(AbilityId),

    #[error("effect {index} of '{owner}' ({action}) has no timing and never fires")]
    UntimedEffect {
        owner: AbilityId,
        index: usize,
        action: &'static str,
    },

    #[error("effect {index} of '{owner}' draws cards outside immediate timing")]
    DrawOutsideImmediate { owner: AbilityId, index: usize },

    #[error("'{owner}' uses unregistered condition kind '{kind}'")]
    UnregisteredKind { owner: AbilityId, kind: String },

    #[error("'{owner}' has a 'not' condition with {children} children")]
    MalformedNot { owner: AbilityId, children: usize },

    #[error("variants of '{owner}' share priority {priority}; declaration order decides")]
    PriorityTie { owner: AbilityId, priority: i32 },
}

/// Check definitions against the registry they will be evaluated with.
///
/// Definitions nested in `replaceAbility` effects are checked too.
///
/// ## Example
///
/// ```
/// use ability_engine::abilities::{validate_catalog, AbilityDef, AbilityType, CatalogIssue, Effect, EffectAction};
/// use ability_engine::conditions::{Condition, ConditionRegistry};
/// use ability_engine::core::Target;
///
/// let def = AbilityDef::new("meditation", "Meditation", AbilityType::Defensive)
///     .with_trigger(Condition::Always)
///     .with_effect(Effect::from_action(EffectAction::heal(Target::Caster, 2)));
///
/// let issues = validate_catalog([&def], &ConditionRegistry::new());
/// assert!(matches!(issues[0], CatalogIssue::UntimedEffect { index: 0, .. }));
/// ```
pub fn validate_catalog<'a>(
    defs: impl IntoIterator<Item = &'a AbilityDef>,
    registry: &ConditionRegistry,
) -> Vec<CatalogIssue> {
    let mut issues = Vec::new();
    for def in defs {
        validate_def(def, registry, &mut issues);
    }
    issues
}

fn validate_def(def: &AbilityDef, registry: &ConditionRegistry, issues: &mut Vec<CatalogIssue>) {
    match (&def.trigger, def.has_variants()) {
        (None, false) => issues.push(CatalogIssue::NoTrigger(def.id.clone())),
        (Some(_), true) => issues.push(CatalogIssue::AmbiguousTrigger(def.id.clone())),
        (Some(trigger), false) => check_condition(&def.id, trigger, registry, issues),
        (None, true) => {}
    }
    validate_effects(&def.id, &def.effects, registry, issues);

    for (i, variant) in def.variants.iter().enumerate() {
        check_condition(&variant.id, &variant.trigger, registry, issues);
        validate_effects(&variant.id, &variant.effects, registry, issues);

        let tied = def.variants[..i]
            .iter()
            .any(|earlier| earlier.priority == variant.priority);
        let reported = issues.iter().any(|issue| {
            matches!(issue, CatalogIssue::PriorityTie { owner, priority }
                if owner == &def.id && *priority == variant.priority)
        });
        if tied && !reported {
            issues.push(CatalogIssue::PriorityTie {
                owner: def.id.clone(),
                priority: variant.priority,
            });
        }
    }
}

fn validate_effects(
    owner: &AbilityId,
    effects: &[Effect],
    registry: &ConditionRegistry,
    issues: &mut Vec<CatalogIssue>,
) {
    for (index, effect) in effects.iter().enumerate() {
        if let Some(condition) = &effect.condition {
            check_condition(owner, condition, registry, issues);
        }
        let Some(action) = &effect.action else {
            continue;
        };

        match effect.effective_timing() {
            None => issues.push(CatalogIssue::UntimedEffect {
                owner: owner.clone(),
                index,
                action: action.kind(),
            }),
            Some(timing) if timing != EffectTiming::Immediate => {
                if let EffectAction::DrawCard { .. } = action {
                    issues.push(CatalogIssue::DrawOutsideImmediate {
                        owner: owner.clone(),
                        index,
                    });
                }
            }
            Some(_) => {}
        }

        if let EffectAction::ReplaceAbility { new_ability_def, .. } = action {
            validate_def(new_ability_def, registry, issues);
        }
    }
}

fn check_condition(
    owner: &AbilityId,
    condition: &Condition,
    registry: &ConditionRegistry,
    issues: &mut Vec<CatalogIssue>,
) {
    match condition {
        Condition::Custom { kind, .. } if !registry.contains(kind) => {
            let already = issues.iter().any(|issue| {
                matches!(issue, CatalogIssue::UnregisteredKind { owner: o, kind: k }
                    if o == owner && k == kind)
            });
            if !already {
                issues.push(CatalogIssue::UnregisteredKind {
                    owner: owner.clone(),
                    kind: kind.clone(),
                });
            }
        }
        Condition::Composite { op, children } => {
            if *op == CompositeOp::Not && children.len() != 1 {
                issues.push(CatalogIssue::MalformedNot {
                    owner: owner.clone(),
                    children: children.len(),
                });
            }
            for child in children {
                check_condition(owner, child, registry, issues);
            }
        }
        _ => {}
    }
}
