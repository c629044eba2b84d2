//! Effect definitions.
//!
//! An effect is one mechanical consequence of an activated ability: deal 6
//! damage, grant 1 stack of burn, draw a card. Each effect carries a timing
//! phase, an optional guard condition and an optional action. Effects without
//! an action are rules text the engine does not execute.

use serde::{Deserialize, Serialize};

use crate::conditions::Condition;
use crate::core::{AbilityId, Params, StatusId, Target};

use super::definition::AbilityDef;

/// Named point in an activation at which a subset of effects applies.
///
/// The calling game decides when each phase happens and asks the resolver to
/// apply that phase's effects.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EffectTiming {
    /// As soon as the ability is chosen (draws, resource gains).
    Immediate,
    /// Before the defender responds.
    PreDefense,
    /// Together with the attack's damage.
    WithDamage,
    /// After damage has been dealt (on-hit riders).
    PostDamage,
    /// When the game enters the phase the ability is tied to.
    OnPhaseEnter,
}

impl EffectTiming {
    /// The attack sequence, in the order a game resolves it.
    pub const ATTACK_SEQUENCE: [EffectTiming; 3] = [
        EffectTiming::PreDefense,
        EffectTiming::WithDamage,
        EffectTiming::PostDamage,
    ];
}

/// The mechanical part of an effect.
///
/// `target` is relative to the activation: `self` is the attacker,
/// `opponent` the defender.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum EffectAction {
    /// Deal damage.
    Damage { target: Target, value: i64 },

    /// Restore health.
    Heal { target: Target, value: i64 },

    /// Add stacks of a status.
    #[serde(rename_all = "camelCase")]
    GrantStatus {
        target: Target,
        status_id: StatusId,
        value: u32,
    },

    /// Add game tokens (non-status counters such as combo points).
    #[serde(rename_all = "camelCase")]
    GrantToken {
        target: Target,
        token_id: String,
        value: u32,
    },

    /// Remove stacks of a status. `None` removes every stack.
    #[serde(rename_all = "camelCase")]
    RemoveStatus {
        target: Target,
        status_id: StatusId,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        value: Option<u32>,
    },

    /// Draw cards. Only honoured at `immediate` timing.
    #[serde(rename_all = "camelCase")]
    DrawCard { target: Target, draw_count: u32 },

    /// Give the target a shield that absorbs subsequent damage.
    #[serde(rename_all = "camelCase")]
    GrantDamageShield { target: Target, shield_value: i64 },

    /// Swap one of the target's abilities for an upgraded definition.
    #[serde(rename_all = "camelCase")]
    ReplaceAbility {
        target: Target,
        target_ability_id: AbilityId,
        new_ability_def: Box<AbilityDef>,
        new_ability_level: u32,
    },

    /// Game-specific action executed by the game's `GameContext`.
    #[serde(rename_all = "camelCase")]
    Custom {
        target: Target,
        custom_action_id: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        params: Option<Params>,
    },
}

impl EffectAction {
    /// Create a damage action.
    pub fn damage(target: Target, value: i64) -> Self {
        Self::Damage { target, value }
    }

    /// Create a heal action.
    pub fn heal(target: Target, value: i64) -> Self {
        Self::Heal { target, value }
    }

    /// Create a grant-status action.
    pub fn grant_status(target: Target, status_id: impl Into<StatusId>, value: u32) -> Self {
        Self::GrantStatus {
            target,
            status_id: status_id.into(),
            value,
        }
    }

    /// Create a remove-status action. `None` removes all stacks.
    pub fn remove_status(target: Target, status_id: impl Into<StatusId>, value: Option<u32>) -> Self {
        Self::RemoveStatus {
            target,
            status_id: status_id.into(),
            value,
        }
    }

    /// Create a custom action.
    pub fn custom(target: Target, custom_action_id: impl Into<String>) -> Self {
        Self::Custom {
            target,
            custom_action_id: custom_action_id.into(),
            params: None,
        }
    }

    /// Which side of the activation this action points at.
    #[must_use]
    pub fn target(&self) -> Target {
        match self {
            EffectAction::Damage { target, .. }
            | EffectAction::Heal { target, .. }
            | EffectAction::GrantStatus { target, .. }
            | EffectAction::GrantToken { target, .. }
            | EffectAction::RemoveStatus { target, .. }
            | EffectAction::DrawCard { target, .. }
            | EffectAction::GrantDamageShield { target, .. }
            | EffectAction::ReplaceAbility { target, .. }
            | EffectAction::Custom { target, .. } => *target,
        }
    }

    /// Check if this action deals damage.
    #[must_use]
    pub fn is_damage(&self) -> bool {
        matches!(self, EffectAction::Damage { .. })
    }

    /// Name of the action kind, as it appears in catalog data.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            EffectAction::Damage { .. } => "damage",
            EffectAction::Heal { .. } => "heal",
            EffectAction::GrantStatus { .. } => "grantStatus",
            EffectAction::GrantToken { .. } => "grantToken",
            EffectAction::RemoveStatus { .. } => "removeStatus",
            EffectAction::DrawCard { .. } => "drawCard",
            EffectAction::GrantDamageShield { .. } => "grantDamageShield",
            EffectAction::ReplaceAbility { .. } => "replaceAbility",
            EffectAction::Custom { .. } => "custom",
        }
    }
}

/// One effect of an ability.
///
/// ## Timing
///
/// An effect without explicit timing fires at `withDamage` if its action
/// deals damage, and never otherwise. Catalog validation reports the second
/// case; the resolver does not guess.
///
/// ## Example
///
/// ```
/// use ability_engine::abilities::{Effect, EffectAction, EffectTiming};
/// use ability_engine::conditions::Condition;
/// use ability_engine::core::Target;
///
/// let burn_on_hit = Effect::new("Inflict burn on hit")
///     .with_action(EffectAction::grant_status(Target::Opponent, "burn", 1))
///     .with_timing(EffectTiming::PostDamage)
///     .with_condition(Condition::OnHit);
///
/// assert!(burn_on_hit.fires_at(EffectTiming::PostDamage));
///
/// let hit = Effect::new("Deal 6 damage").with_action(EffectAction::damage(Target::Opponent, 6));
/// assert_eq!(hit.effective_timing(), Some(EffectTiming::WithDamage));
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Effect {
    /// Rules text shown to players.
    #[serde(default)]
    pub description: String,

    /// What the effect does. `None` for text-only effects.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action: Option<EffectAction>,

    /// When the effect applies. See the type docs for the default.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timing: Option<EffectTiming>,

    /// Guard that must hold at resolution time.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub condition: Option<Condition>,
}

impl Effect {
    /// Create a text-only effect.
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            ..Self::default()
        }
    }

    /// Create an effect from an action, with empty rules text.
    pub fn from_action(action: EffectAction) -> Self {
        Self::default().with_action(action)
    }

    /// Set the action (builder pattern).
    #[must_use]
    pub fn with_action(mut self, action: EffectAction) -> Self {
        self.action = Some(action);
        self
    }

    /// Set the timing (builder pattern).
    #[must_use]
    pub fn with_timing(mut self, timing: EffectTiming) -> Self {
        self.timing = Some(timing);
        self
    }

    /// Set the guard condition (builder pattern).
    #[must_use]
    pub fn with_condition(mut self, condition: Condition) -> Self {
        self.condition = Some(condition);
        self
    }

    /// The timing this effect actually fires at, if any.
    #[must_use]
    pub fn effective_timing(&self) -> Option<EffectTiming> {
        match (self.timing, &self.action) {
            (Some(timing), _) => Some(timing),
            (None, Some(action)) if action.is_damage() => Some(EffectTiming::WithDamage),
            (None, _) => None,
        }
    }

    /// Check if this effect fires in the given phase.
    #[must_use]
    pub fn fires_at(&self, timing: EffectTiming) -> bool {
        self.effective_timing() == Some(timing)
    }

    /// Check if the engine executes anything for this effect.
    #[must_use]
    pub fn is_executable(&self) -> bool {
        self.action.is_some()
    }
}
