//! The resolver's view of the game.
//!
//! The resolver never touches game state directly. Every mutation goes
//! through a [`GameContext`] the game implements over its own match state.

use tracing::debug;

use crate::abilities::AbilityDef;
use crate::conditions::{Condition, ConditionContext};
use crate::core::{AbilityId, EntityId, Params, StatusId, Target};

/// Capability interface the game supplies to the resolver.
///
/// The first seven methods are required. The remainder default to no-ops that
/// log at debug level, for games without tokens, decks, shields or upgrades.
pub trait GameContext {
    /// Deal damage. Returns the amount actually applied after shields and
    /// other mitigation.
    fn apply_damage(&mut self, target: EntityId, amount: i64, source: &AbilityId) -> i64;

    /// Restore health.
    fn apply_heal(&mut self, target: EntityId, amount: i64, source: &AbilityId);

    /// Add status stacks.
    fn grant_status(&mut self, target: EntityId, status: &StatusId, stacks: u32);

    /// Remove status stacks; `None` removes all.
    fn remove_status(&mut self, target: EntityId, status: &StatusId, stacks: Option<u32>);

    /// Current health.
    fn get_health(&self, entity: EntityId) -> i64;

    /// Current stack count of a status.
    fn get_status_stacks(&self, entity: EntityId, status: &StatusId) -> u32;

    /// Run a game-specific action.
    fn execute_custom_action(
        &mut self,
        action_id: &str,
        attacker: EntityId,
        defender: EntityId,
        source: &AbilityId,
        params: Option<&Params>,
    );

    /// Add game tokens.
    fn grant_token(&mut self, target: EntityId, token_id: &str, amount: u32) {
        debug!(%target, token = token_id, amount, "grant_token not supported by this game");
    }

    /// Draw cards.
    fn draw_cards(&mut self, target: EntityId, count: u32) {
        debug!(%target, count, "draw_cards not supported by this game");
    }

    /// Give a damage shield.
    fn grant_damage_shield(&mut self, target: EntityId, amount: i64) {
        debug!(%target, amount, "grant_damage_shield not supported by this game");
    }

    /// Swap an owned ability for an upgraded definition.
    fn replace_ability(&mut self, target: EntityId, ability: &AbilityId, def: &AbilityDef, level: u32) {
        debug!(%target, ability = %ability, new_id = %def.id, level, "replace_ability not supported by this game");
    }
}

/// State of one activation while its phases resolve.
///
/// Create one per activation and pass it to every phase, so `damage_dealt`
/// from `withDamage` is visible to `onHit`/`onMiss` guards in `postDamage`.
#[derive(Clone, Debug)]
pub struct ResolutionContext {
    pub attacker: EntityId,
    pub defender: EntityId,

    /// Ability (or variant) being resolved. Passed to the game as the source.
    pub source_ability_id: AbilityId,

    /// Damage actually applied so far in this activation.
    pub damage_dealt: i64,

    /// Condition context effect guards are evaluated against, from the
    /// attacker's point of view.
    pub snapshot: ConditionContext,
}

impl ResolutionContext {
    /// Create a context with an empty snapshot.
    pub fn new(attacker: EntityId, defender: EntityId, source_ability_id: impl Into<AbilityId>) -> Self {
        Self {
            attacker,
            defender,
            source_ability_id: source_ability_id.into(),
            damage_dealt: 0,
            snapshot: ConditionContext::new(),
        }
    }

    /// Set the guard snapshot (builder pattern).
    #[must_use]
    pub fn with_snapshot(mut self, snapshot: ConditionContext) -> Self {
        self.snapshot = snapshot;
        self
    }

    /// Check if the activation has dealt damage.
    #[must_use]
    pub fn hit(&self) -> bool {
        self.damage_dealt > 0
    }

    /// Snapshot with the current damage total folded in, for guards.
    pub(crate) fn guard_context(&mut self) -> &ConditionContext {
        self.snapshot.damage_dealt = Some(self.damage_dealt);
        &self.snapshot
    }

    /// Re-read from the game every status `guard` looks at, so statuses
    /// granted or removed earlier in this activation are visible to it.
    pub(crate) fn refresh_statuses(&mut self, guard: &Condition, game: &dyn GameContext) {
        let mut refs = Vec::new();
        guard.status_refs(&mut refs);

        for (side, status) in refs {
            let stacks = game.get_status_stacks(side.resolve(self.attacker, self.defender), status);
            let statuses = match side {
                Target::Caster => &mut self.snapshot.statuses,
                Target::Opponent => &mut self.snapshot.target_statuses,
            };
            if stacks == 0 {
                statuses.remove(status.as_str());
            } else {
                statuses.insert(status.as_str().to_string(), stacks);
            }
        }
    }
}
