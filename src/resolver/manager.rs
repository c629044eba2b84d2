//! Availability queries and effect resolution.
//!
//! `AbilityManager` answers two questions. Which of these abilities can fire
//! right now (pure)? And, for the one the player chose, what happens in a
//! given timing phase (mutations through [`GameContext`])?

use tracing::{debug, warn};

use crate::abilities::{
    AbilityDef, AbilityLookup, AbilityType, AbilityVariant, Effect, EffectAction, EffectTiming,
};
use crate::conditions::{ConditionContext, ConditionEvaluator, ConditionRegistry};
use crate::core::{AbilityId, ResolveConfig};

use super::context::{GameContext, ResolutionContext};

/// What happened to one effect during resolution.
///
/// Only effects whose timing matched the phase get an outcome.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EffectOutcome {
    /// The action was passed to the game.
    Applied,
    /// The guard condition did not hold.
    GuardFailed,
    /// Text-only effect.
    NoAction,
    /// The action is not allowed in this phase.
    Refused(String),
}

/// Ability availability and resolution over one ability source.
///
/// ## Example
///
/// ```
/// use ability_engine::abilities::{AbilityCatalog, AbilityDef, AbilityType, Effect, EffectAction};
/// use ability_engine::conditions::{CompareOp, Condition, ConditionContext, ConditionRegistry};
/// use ability_engine::core::Target;
/// use ability_engine::resolver::AbilityManager;
///
/// let catalog = AbilityCatalog::from_defs([
///     AbilityDef::new("palm-strike", "Palm Strike", AbilityType::Offensive)
///         .with_trigger(Condition::resource("cp", CompareOp::Ge, 2))
///         .with_effect(Effect::from_action(EffectAction::damage(Target::Opponent, 3))),
/// ])
/// .unwrap();
/// let registry = ConditionRegistry::new();
/// let manager = AbilityManager::new(&registry, &catalog);
///
/// let ids = ["palm-strike".into()];
/// assert!(manager.available_abilities(&ids, &ConditionContext::new()).is_empty());
///
/// let ctx = ConditionContext::new().with_resource("cp", 2);
/// assert_eq!(manager.available_abilities(&ids, &ctx), vec!["palm-strike".into()]);
/// ```
#[derive(Clone, Copy)]
pub struct AbilityManager<'a> {
    registry: &'a ConditionRegistry,
    abilities: &'a dyn AbilityLookup,
}

impl<'a> AbilityManager<'a> {
    /// Create a manager over a registry and an ability source.
    pub fn new(registry: &'a ConditionRegistry, abilities: &'a dyn AbilityLookup) -> Self {
        Self {
            registry,
            abilities,
        }
    }

    /// The ids that can fire now, in candidate order.
    ///
    /// Candidates are base ids. For an ability with variants the chosen
    /// variant's id is reported; for a flat ability, the base id. Unknown ids
    /// are skipped.
    pub fn available_abilities(&self, ability_ids: &[AbilityId], ctx: &ConditionContext) -> Vec<AbilityId> {
        ability_ids
            .iter()
            .filter_map(|id| {
                let Some(def) = self.abilities.ability(id) else {
                    debug!(ability = %id, "candidate is not a known ability; skipping");
                    return None;
                };
                self.fireable_id(def, ctx)
            })
            .collect()
    }

    /// [`available_abilities`](Self::available_abilities) restricted to one
    /// ability type.
    pub fn available_abilities_of_type(
        &self,
        ability_ids: &[AbilityId],
        ctx: &ConditionContext,
        ability_type: AbilityType,
    ) -> Vec<AbilityId> {
        self.available_abilities(ability_ids, ctx)
            .into_iter()
            .filter(|id| {
                self.abilities
                    .lookup(id)
                    .is_some_and(|(def, _)| def.ability_type == ability_type)
            })
            .collect()
    }

    /// The variant that fires for `def`: the highest priority satisfied one,
    /// the earliest declared on ties.
    pub fn select_variant<'d>(&self, def: &'d AbilityDef, ctx: &ConditionContext) -> Option<&'d AbilityVariant> {
        let mut chosen: Option<&AbilityVariant> = None;
        for variant in &def.variants {
            if chosen.is_some_and(|best| variant.priority <= best.priority) {
                continue;
            }
            if ConditionEvaluator::evaluate(&variant.trigger, ctx, self.registry) {
                chosen = Some(variant);
            }
        }
        chosen
    }

    fn fireable_id(&self, def: &AbilityDef, ctx: &ConditionContext) -> Option<AbilityId> {
        if def.has_variants() {
            return self.select_variant(def, ctx).map(|v| v.id.clone());
        }
        match &def.trigger {
            Some(trigger) if ConditionEvaluator::evaluate(trigger, ctx, self.registry) => Some(def.id.clone()),
            Some(_) => None,
            None => {
                debug!(ability = %def.id, "ability has no trigger and no variants");
                None
            }
        }
    }

    /// Apply the effects that fire at `timing`, in declaration order.
    ///
    /// Damage gets `config.bonus_damage` added (to the first damage action
    /// only when `bonus_damage_once` is set); totals below zero become zero.
    /// What the game reports as applied is added to
    /// `resolution.damage_dealt`. Nothing here aborts the list.
    ///
    /// Guards read the resolution snapshot, except for the damage total and
    /// the statuses they name, which come from `game` at evaluation time.
    pub fn resolve_effects(
        &self,
        effects: &[Effect],
        timing: EffectTiming,
        resolution: &mut ResolutionContext,
        game: &mut dyn GameContext,
        config: &ResolveConfig,
    ) -> Vec<EffectOutcome> {
        let mut outcomes = Vec::new();
        let mut bonus_available = config.has_bonus();

        for (index, effect) in effects.iter().enumerate() {
            if !effect.fires_at(timing) {
                continue;
            }

            if let Some(condition) = &effect.condition {
                resolution.refresh_statuses(condition, &*game);
                if !ConditionEvaluator::evaluate(condition, resolution.guard_context(), self.registry) {
                    debug!(source = %resolution.source_ability_id, index, "effect guard not satisfied");
                    outcomes.push(EffectOutcome::GuardFailed);
                    continue;
                }
            }

            let Some(action) = &effect.action else {
                outcomes.push(EffectOutcome::NoAction);
                continue;
            };

            let outcome = Self::dispatch(action, timing, resolution, game, config, &mut bonus_available);
            debug!(
                source = %resolution.source_ability_id,
                index,
                action = action.kind(),
                ?timing,
                ?outcome,
                "effect resolved"
            );
            outcomes.push(outcome);
        }
        outcomes
    }

    fn dispatch(
        action: &EffectAction,
        timing: EffectTiming,
        resolution: &mut ResolutionContext,
        game: &mut dyn GameContext,
        config: &ResolveConfig,
        bonus_available: &mut bool,
    ) -> EffectOutcome {
        let target = action.target().resolve(resolution.attacker, resolution.defender);
        let source = &resolution.source_ability_id;

        match action {
            EffectAction::Damage { value, .. } => {
                let mut amount = *value;
                if *bonus_available {
                    amount += config.bonus_damage;
                    if config.bonus_damage_once {
                        *bonus_available = false;
                    }
                }
                let applied = game.apply_damage(target, amount.max(0), source);
                resolution.damage_dealt += applied;
            }
            EffectAction::Heal { value, .. } => game.apply_heal(target, *value, source),
            EffectAction::GrantStatus { status_id, value, .. } => game.grant_status(target, status_id, *value),
            EffectAction::GrantToken { token_id, value, .. } => game.grant_token(target, token_id, *value),
            EffectAction::RemoveStatus { status_id, value, .. } => game.remove_status(target, status_id, *value),
            EffectAction::DrawCard { draw_count, .. } => {
                if timing != EffectTiming::Immediate {
                    warn!(source = %source, ?timing, "drawCard only resolves at immediate timing; skipping");
                    return EffectOutcome::Refused(format!("drawCard at {:?}", timing));
                }
                game.draw_cards(target, *draw_count);
            }
            EffectAction::GrantDamageShield { shield_value, .. } => game.grant_damage_shield(target, *shield_value),
            EffectAction::ReplaceAbility {
                target_ability_id,
                new_ability_def,
                new_ability_level,
                ..
            } => game.replace_ability(target, target_ability_id, new_ability_def, *new_ability_level),
            EffectAction::Custom {
                custom_action_id,
                params,
                ..
            } => game.execute_custom_action(
                custom_action_id,
                resolution.attacker,
                resolution.defender,
                source,
                params.as_ref(),
            ),
        }
        EffectOutcome::Applied
    }

    /// Resolve one phase of a base or variant id's effects.
    ///
    /// Returns `None` if the id is unknown.
    pub fn resolve_ability(
        &self,
        id: &AbilityId,
        timing: EffectTiming,
        resolution: &mut ResolutionContext,
        game: &mut dyn GameContext,
        config: &ResolveConfig,
    ) -> Option<Vec<EffectOutcome>> {
        let Some(effects) = self.abilities.effects(id) else {
            debug!(ability = %id, "cannot resolve unknown ability");
            return None;
        };
        Some(self.resolve_effects(effects, timing, resolution, game, config))
    }

    /// Resolve `preDefense`, `withDamage` and `postDamage` in order on one
    /// resolution context. Returns whether the id was known.
    pub fn resolve_activation(
        &self,
        id: &AbilityId,
        resolution: &mut ResolutionContext,
        game: &mut dyn GameContext,
        config: &ResolveConfig,
    ) -> bool {
        let Some(effects) = self.abilities.effects(id) else {
            debug!(ability = %id, "cannot resolve unknown ability");
            return false;
        };
        for timing in EffectTiming::ATTACK_SEQUENCE {
            self.resolve_effects(effects, timing, resolution, game, config);
        }
        true
    }

    /// Rules text of every effect of a base or variant id, including effects
    /// the engine does not execute. A base id with variants lists them all.
    pub fn describe(&self, id: &AbilityId) -> Vec<&'a str> {
        match self.abilities.lookup(id) {
            Some((_, Some(variant))) => variant.effects.iter().map(|e| e.description.as_str()).collect(),
            Some((def, None)) => def.all_effects().map(|e| e.description.as_str()).collect(),
            None => Vec::new(),
        }
    }
}

impl std::fmt::Debug for AbilityManager<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AbilityManager")
            .field("registry", self.registry)
            .finish_non_exhaustive()
    }
}
