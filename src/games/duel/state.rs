//! Duel match state and its `GameContext` adapter.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::abilities::{AbilityDef, AbilityLoadout, EffectTiming};
use crate::conditions::ConditionContext;
use crate::core::{AbilityId, EntityId, Params, ResolveConfig, StatusId};
use crate::engine::Engine;
use crate::resolver::{GameContext, ResolutionContext};
use crate::status::StatusManager;

use super::catalog::face_of;

/// Custom action the duel understands: move `amount` CP from defender to
/// attacker.
pub const STEAL_CP: &str = "steal-cp";

/// One side of the duel.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Combatant {
    pub health: i64,
    pub max_health: i64,
    /// Damage absorbed before health is touched.
    pub shield: i64,
    pub resources: BTreeMap<String, i64>,
    pub tokens: BTreeMap<String, u32>,
    pub cards_drawn: u32,
    pub loadout: AbilityLoadout,
}

impl Combatant {
    fn new(health: i64, loadout: AbilityLoadout) -> Self {
        Self {
            health,
            max_health: health,
            shield: 0,
            resources: BTreeMap::new(),
            tokens: BTreeMap::new(),
            cards_drawn: 0,
            loadout,
        }
    }

    /// Get a resource, 0 if absent.
    #[must_use]
    pub fn resource(&self, name: &str) -> i64 {
        self.resources.get(name).copied().unwrap_or(0)
    }
}

/// A custom action the resolver asked the duel to run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CustomActionRecord {
    pub action_id: String,
    pub attacker: EntityId,
    pub defender: EntityId,
    pub source: AbilityId,
    pub params: Option<Params>,
}

/// State of a two-combatant duel.
///
/// Entity 0 and entity 1 are the two combatants. Calls naming any other
/// entity are ignored.
#[derive(Clone, Debug)]
pub struct DuelState {
    combatants: [Combatant; 2],
    statuses: StatusManager,
    custom_actions: Vec<CustomActionRecord>,
}

impl DuelState {
    /// First combatant.
    pub const PLAYER_ONE: EntityId = EntityId::new(0);
    /// Second combatant.
    pub const PLAYER_TWO: EntityId = EntityId::new(1);

    /// Start a duel where both sides own `abilities` from the engine's
    /// catalog and start at `health`.
    #[must_use]
    pub fn new(engine: &Engine, abilities: &[AbilityId], health: i64) -> Self {
        Self {
            combatants: [
                Combatant::new(health, engine.loadout(abilities)),
                Combatant::new(health, engine.loadout(abilities)),
            ],
            statuses: engine.status_manager(),
            custom_actions: Vec::new(),
        }
    }

    /// Get a combatant.
    #[must_use]
    pub fn combatant(&self, entity: EntityId) -> Option<&Combatant> {
        self.combatants.get(entity.raw() as usize)
    }

    fn combatant_mut(&mut self, entity: EntityId) -> Option<&mut Combatant> {
        let combatant = self.combatants.get_mut(entity.raw() as usize);
        if combatant.is_none() {
            debug!(%entity, "not a duel combatant; ignoring");
        }
        combatant
    }

    /// Set a resource value.
    pub fn set_resource(&mut self, entity: EntityId, name: &str, value: i64) {
        if let Some(c) = self.combatant_mut(entity) {
            c.resources.insert(name.to_string(), value);
        }
    }

    /// The status manager.
    #[must_use]
    pub fn statuses(&self) -> &StatusManager {
        &self.statuses
    }

    /// Custom actions run so far, oldest first.
    #[must_use]
    pub fn custom_actions(&self) -> &[CustomActionRecord] {
        &self.custom_actions
    }

    /// Build the condition snapshot for `entity` acting against `opponent`.
    ///
    /// Face counts come from the dice; resources include `hp`.
    #[must_use]
    pub fn condition_context(
        &self,
        entity: EntityId,
        opponent: EntityId,
        dice: &[u8],
        phase: Option<&str>,
    ) -> ConditionContext {
        let mut ctx = ConditionContext::new().with_dice(dice.iter().copied());
        for face in dice.iter().filter_map(|d| face_of(*d)) {
            *ctx.face_counts.entry(face.to_string()).or_insert(0) += 1;
        }
        if let Some(phase) = phase {
            ctx = ctx.with_phase(phase);
        }
        if let Some(c) = self.combatant(entity) {
            ctx.resources = c.resources.iter().map(|(k, v)| (k.clone(), *v)).collect();
            ctx.resources.insert("hp".to_string(), c.health);
        }
        ctx.statuses = self.statuses.snapshot(entity);
        ctx.target_statuses = self.statuses.snapshot(opponent);
        ctx
    }

    /// Abilities `entity` can fire given `ctx`.
    #[must_use]
    pub fn available_abilities(&self, engine: &Engine, entity: EntityId, ctx: &ConditionContext) -> Vec<AbilityId> {
        match self.combatant(entity) {
            Some(c) => engine
                .manager_for(&c.loadout)
                .available_abilities(&c.loadout.ability_ids(), ctx),
            None => Vec::new(),
        }
    }

    /// Run a chosen ability: `immediate`, then the attack sequence. Returns
    /// the damage dealt, or `None` if the attacker does not own `ability`.
    pub fn activate(
        &mut self,
        engine: &Engine,
        attacker: EntityId,
        defender: EntityId,
        ability: &AbilityId,
        snapshot: ConditionContext,
        config: &ResolveConfig,
    ) -> Option<i64> {
        let loadout = self.combatant(attacker)?.loadout.clone();
        let manager = engine.manager_for(&loadout);

        let mut resolution = ResolutionContext::new(attacker, defender, ability.clone()).with_snapshot(snapshot);
        manager.resolve_ability(ability, EffectTiming::Immediate, &mut resolution, self, config)?;
        manager.resolve_activation(ability, &mut resolution, self, config);

        debug!(%attacker, %defender, ability = %ability, damage = resolution.damage_dealt, "activation resolved");
        Some(resolution.damage_dealt)
    }

    /// Turn-end bookkeeping: shields expire.
    pub fn end_turn(&mut self, entity: EntityId) {
        if let Some(c) = self.combatant_mut(entity) {
            c.shield = 0;
        }
    }

    fn steal_cp(&mut self, attacker: EntityId, defender: EntityId, params: Option<&Params>) {
        let wanted = params.map_or(1, |p| p.get_int("amount", 1)).max(0);
        let available = self.combatant(defender).map_or(0, |c| c.resource("cp"));
        let stolen = wanted.min(available);

        if let Some(c) = self.combatant_mut(defender) {
            c.resources.insert("cp".to_string(), available - stolen);
        }
        if let Some(c) = self.combatant_mut(attacker) {
            *c.resources.entry("cp".to_string()).or_insert(0) += stolen;
        }
    }
}

impl GameContext for DuelState {
    fn apply_damage(&mut self, target: EntityId, amount: i64, _source: &AbilityId) -> i64 {
        let amount = amount.max(0);
        let Some(c) = self.combatant_mut(target) else {
            return 0;
        };
        let absorbed = c.shield.min(amount).max(0);
        c.shield -= absorbed;
        let applied = amount - absorbed;
        c.health = (c.health - applied).max(0);
        applied
    }

    fn apply_heal(&mut self, target: EntityId, amount: i64, _source: &AbilityId) {
        if let Some(c) = self.combatant_mut(target) {
            c.health = (c.health + amount).min(c.max_health);
        }
    }

    fn grant_status(&mut self, target: EntityId, status: &StatusId, stacks: u32) {
        self.statuses.grant(target, status, stacks);
    }

    fn remove_status(&mut self, target: EntityId, status: &StatusId, stacks: Option<u32>) {
        self.statuses.remove(target, status, stacks);
    }

    fn get_health(&self, entity: EntityId) -> i64 {
        self.combatant(entity).map_or(0, |c| c.health)
    }

    fn get_status_stacks(&self, entity: EntityId, status: &StatusId) -> u32 {
        self.statuses.stacks(entity, status)
    }

    fn execute_custom_action(
        &mut self,
        action_id: &str,
        attacker: EntityId,
        defender: EntityId,
        source: &AbilityId,
        params: Option<&Params>,
    ) {
        if action_id == STEAL_CP {
            self.steal_cp(attacker, defender, params);
        }
        self.custom_actions.push(CustomActionRecord {
            action_id: action_id.to_string(),
            attacker,
            defender,
            source: source.clone(),
            params: params.cloned(),
        });
    }

    fn grant_token(&mut self, target: EntityId, token_id: &str, amount: u32) {
        if let Some(c) = self.combatant_mut(target) {
            let tokens = c.tokens.entry(token_id.to_string()).or_insert(0);
            *tokens = tokens.saturating_add(amount);
        }
    }

    fn draw_cards(&mut self, target: EntityId, count: u32) {
        if let Some(c) = self.combatant_mut(target) {
            c.cards_drawn += count;
        }
    }

    fn grant_damage_shield(&mut self, target: EntityId, amount: i64) {
        if let Some(c) = self.combatant_mut(target) {
            c.shield += amount.max(0);
        }
    }

    fn replace_ability(&mut self, target: EntityId, ability: &AbilityId, def: &AbilityDef, level: u32) {
        if let Some(c) = self.combatant_mut(target) {
            c.loadout.replace(ability, def.clone(), level);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::duel::{monk_abilities, monk_statuses};

    fn engine() -> Engine {
        Engine::builder()
            .with_dice_conditions()
            .abilities(monk_abilities())
            .statuses(monk_statuses())
            .build()
            .unwrap()
    }

    fn duel(engine: &Engine) -> DuelState {
        let ids: Vec<AbilityId> = engine.catalog().iter().map(|d| d.id.clone()).collect();
        DuelState::new(engine, &ids, 50)
    }

    #[test]
    fn test_shield_absorbs_first() {
        let engine = engine();
        let mut state = duel(&engine);
        let p2 = DuelState::PLAYER_TWO;

        state.grant_damage_shield(p2, 3);
        assert_eq!(state.apply_damage(p2, 5, &"x".into()), 2);
        assert_eq!(state.get_health(p2), 48);
        assert_eq!(state.combatant(p2).unwrap().shield, 0);

        state.grant_damage_shield(p2, 10);
        assert_eq!(state.apply_damage(p2, 4, &"x".into()), 0);
        assert_eq!(state.combatant(p2).unwrap().shield, 6);

        state.end_turn(p2);
        assert_eq!(state.combatant(p2).unwrap().shield, 0);
    }

    #[test]
    fn test_negative_damage_is_ignored() {
        let engine = engine();
        let mut state = duel(&engine);
        let p2 = DuelState::PLAYER_TWO;
        state.grant_damage_shield(p2, 2);

        assert_eq!(state.apply_damage(p2, -5, &"x".into()), 0);
        assert_eq!(state.get_health(p2), 50);
        assert_eq!(state.combatant(p2).unwrap().shield, 2);
    }

    #[test]
    fn test_heal_capped() {
        let engine = engine();
        let mut state = duel(&engine);
        let p1 = DuelState::PLAYER_ONE;

        state.apply_damage(p1, 10, &"x".into());
        state.apply_heal(p1, 25, &"x".into());
        assert_eq!(state.get_health(p1), 50);
    }

    #[test]
    fn test_unknown_entity_ignored() {
        let engine = engine();
        let mut state = duel(&engine);
        assert_eq!(state.apply_damage(EntityId::new(7), 5, &"x".into()), 0);
        assert_eq!(state.get_health(EntityId::new(7)), 0);
    }

    #[test]
    fn test_condition_context_counts_faces() {
        let engine = engine();
        let mut state = duel(&engine);
        state.set_resource(DuelState::PLAYER_ONE, "cp", 3);
        state.grant_status(DuelState::PLAYER_TWO, &"knockdown".into(), 1);

        let ctx = state.condition_context(
            DuelState::PLAYER_ONE,
            DuelState::PLAYER_TWO,
            &[1, 2, 2, 3, 6],
            Some("offensiveRoll"),
        );
        assert_eq!(ctx.face_count("fist"), 3);
        assert_eq!(ctx.face_count("palm"), 1);
        assert_eq!(ctx.face_count("lotus"), 1);
        assert_eq!(ctx.resource("cp"), 3);
        assert_eq!(ctx.resource("hp"), 50);
        assert_eq!(ctx.target_statuses.get("knockdown"), Some(&1));
        assert_eq!(ctx.phase.as_deref(), Some("offensiveRoll"));
    }

    #[test]
    fn test_steal_cp_limited_by_pool() {
        let engine = engine();
        let mut state = duel(&engine);
        state.set_resource(DuelState::PLAYER_TWO, "cp", 1);

        let params = Params::new().with("amount", 2i64);
        state.execute_custom_action(
            STEAL_CP,
            DuelState::PLAYER_ONE,
            DuelState::PLAYER_TWO,
            &"lotus-palm".into(),
            Some(&params),
        );

        assert_eq!(state.combatant(DuelState::PLAYER_ONE).unwrap().resource("cp"), 1);
        assert_eq!(state.combatant(DuelState::PLAYER_TWO).unwrap().resource("cp"), 0);
        assert_eq!(state.custom_actions().len(), 1);
    }
}
