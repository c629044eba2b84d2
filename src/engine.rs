//! The engine value a match owns.
//!
//! `Engine` bundles the static parts of a game: the condition registry, the
//! ability catalog and the status definitions. Build it once at game init and
//! share it between matches; per-match state (status stacks, loadouts, health)
//! lives in the game.
//!
//! ## Example
//!
//! ```
//! use ability_engine::abilities::{AbilityDef, AbilityType, AbilityVariant, Effect, EffectAction};
//! use ability_engine::conditions::{dice, ConditionContext};
//! use ability_engine::core::Target;
//! use ability_engine::engine::Engine;
//!
//! let engine = Engine::builder()
//!     .with_dice_conditions()
//!     .ability(
//!         AbilityDef::new("fist-technique", "Fist Technique", AbilityType::Offensive).with_variant(
//!             AbilityVariant::new("fist-technique-3", dice::dice_set([("fist", 3)]), 1)
//!                 .with_effect(Effect::from_action(EffectAction::damage(Target::Opponent, 4))),
//!         ),
//!     )
//!     .build()
//!     .unwrap();
//!
//! let ctx = ConditionContext::new().with_face_count("fist", 3);
//! let available = engine.manager().available_abilities(&["fist-technique".into()], &ctx);
//! assert_eq!(available, vec!["fist-technique-3".into()]);
//! ```

use rustc_hash::FxHashSet;
use tracing::{debug, warn};

use crate::abilities::{validate_catalog, AbilityCatalog, AbilityDef, AbilityLoadout, AbilityLookup, CatalogIssue};
use crate::conditions::{dice, ConditionContext, ConditionFn, ConditionRegistry};
use crate::core::{AbilityId, EngineError, Params};
use crate::resolver::AbilityManager;
use crate::status::{StatusEffectDef, StatusManager};

/// Static game data plus the registry it is evaluated with.
#[derive(Clone, Debug)]
pub struct Engine {
    registry: ConditionRegistry,
    catalog: AbilityCatalog,
    statuses: StatusManager,
}

impl Engine {
    /// Start building an engine.
    #[must_use]
    pub fn builder() -> EngineBuilder {
        EngineBuilder::default()
    }

    /// Create an engine from already-built parts.
    pub fn new(
        registry: ConditionRegistry,
        catalog: AbilityCatalog,
        statuses: impl IntoIterator<Item = StatusEffectDef>,
    ) -> Self {
        Self {
            registry,
            catalog,
            statuses: StatusManager::from_defs(statuses),
        }
    }

    /// The condition registry.
    #[must_use]
    pub fn registry(&self) -> &ConditionRegistry {
        &self.registry
    }

    /// The shared ability catalog.
    #[must_use]
    pub fn catalog(&self) -> &AbilityCatalog {
        &self.catalog
    }

    /// Manager over the shared catalog.
    #[must_use]
    pub fn manager(&self) -> AbilityManager<'_> {
        AbilityManager::new(&self.registry, &self.catalog)
    }

    /// Manager over one combatant's loadout, which may hold upgraded
    /// definitions.
    #[must_use]
    pub fn manager_for<'a>(&'a self, loadout: &'a AbilityLoadout) -> AbilityManager<'a> {
        AbilityManager::new(&self.registry, loadout)
    }

    /// A status manager with every status definition and no stacks.
    #[must_use]
    pub fn status_manager(&self) -> StatusManager {
        self.statuses.clone()
    }

    /// A loadout holding the catalog abilities with the given base ids, at
    /// level 1. Unknown ids are skipped.
    #[must_use]
    pub fn loadout(&self, ability_ids: &[AbilityId]) -> AbilityLoadout {
        let mut loadout = AbilityLoadout::new();
        for id in ability_ids {
            match self.catalog.ability(id) {
                Some(def) => loadout.push(def.clone(), 1),
                None => debug!(ability = %id, "not in catalog; left out of loadout"),
            }
        }
        loadout
    }

    /// Check the catalog against the registry.
    #[must_use]
    pub fn validate(&self) -> Vec<CatalogIssue> {
        validate_catalog(self.catalog.iter(), &self.registry)
    }

    /// Shorthand for `self.manager().available_abilities(..)`.
    #[must_use]
    pub fn available_abilities(&self, ability_ids: &[AbilityId], ctx: &ConditionContext) -> Vec<AbilityId> {
        self.manager().available_abilities(ability_ids, ctx)
    }
}

/// Builder for [`Engine`].
///
/// Registration errors surface from [`build`](Self::build), so the builder
/// chain itself never fails.
#[derive(Default)]
pub struct EngineBuilder {
    registry: ConditionRegistry,
    dice: bool,
    conditions: Vec<(String, ConditionFn)>,
    abilities: Vec<AbilityDef>,
    statuses: Vec<StatusEffectDef>,
}

impl EngineBuilder {
    /// Start from an existing registry.
    #[must_use]
    pub fn registry(mut self, registry: ConditionRegistry) -> Self {
        self.registry = registry;
        self
    }

    /// Register the dice vocabulary (`diceSet`, straights, `phase`).
    #[must_use]
    pub fn with_dice_conditions(mut self) -> Self {
        self.dice = true;
        self
    }

    /// Register a game-specific condition kind.
    #[must_use]
    pub fn condition<F>(mut self, kind: impl Into<String>, evaluator: F) -> Self
    where
        F: Fn(&Params, &ConditionContext) -> bool + Send + Sync + 'static,
    {
        self.conditions.push((kind.into(), std::sync::Arc::new(evaluator)));
        self
    }

    /// Add an ability definition.
    #[must_use]
    pub fn ability(mut self, def: AbilityDef) -> Self {
        self.abilities.push(def);
        self
    }

    /// Add several ability definitions.
    #[must_use]
    pub fn abilities(mut self, defs: impl IntoIterator<Item = AbilityDef>) -> Self {
        self.abilities.extend(defs);
        self
    }

    /// Add a status definition.
    #[must_use]
    pub fn status(mut self, def: StatusEffectDef) -> Self {
        self.statuses.push(def);
        self
    }

    /// Add several status definitions.
    #[must_use]
    pub fn statuses(mut self, defs: impl IntoIterator<Item = StatusEffectDef>) -> Self {
        self.statuses.extend(defs);
        self
    }

    /// Register everything and load the catalog.
    pub fn build(self) -> Result<Engine, EngineError> {
        let mut registry = self.registry;
        if self.dice {
            dice::register_dice_conditions(&mut registry)?;
        }
        for (kind, evaluator) in self.conditions {
            registry.register(kind, move |params, ctx| evaluator(params, ctx))?;
        }

        let catalog = AbilityCatalog::from_defs(self.abilities)?;

        let mut seen = FxHashSet::default();
        for def in &self.statuses {
            if !seen.insert(&def.id) {
                warn!(status = %def.id, "status defined twice; the later definition wins");
            }
        }

        debug!(
            kinds = registry.len(),
            abilities = catalog.len(),
            statuses = self.statuses.len(),
            "engine built"
        );
        Ok(Engine::new(registry, catalog, self.statuses))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::abilities::{AbilityType, Effect, EffectAction};
    use crate::conditions::Condition;
    use crate::core::{CatalogError, RegistryError, StatusId, Target};
    use crate::status::StatusKind;

    fn strike() -> AbilityDef {
        AbilityDef::new("strike", "Strike", AbilityType::Offensive)
            .with_trigger(Condition::Always)
            .with_effect(Effect::from_action(EffectAction::damage(Target::Opponent, 3)))
    }

    #[test]
    fn test_build_registers_conditions() {
        let engine = Engine::builder()
            .with_dice_conditions()
            .condition("lowHealth", |params, ctx| {
                ctx.resource("health") <= params.get_int("threshold", 10)
            })
            .build()
            .unwrap();

        assert!(engine.registry().contains(dice::DICE_SET));
        assert!(engine.registry().contains("lowHealth"));
        assert_eq!(engine.registry().len(), 5);
    }

    #[test]
    fn test_build_fails_on_duplicate_kind() {
        let result = Engine::builder()
            .with_dice_conditions()
            .condition(dice::PHASE, |_, _| true)
            .build();
        assert_eq!(
            result.unwrap_err(),
            EngineError::Registry(RegistryError::Duplicate(dice::PHASE.to_string()))
        );
    }

    #[test]
    fn test_build_fails_on_duplicate_ability() {
        let result = Engine::builder().ability(strike()).ability(strike()).build();
        assert_eq!(
            result.unwrap_err(),
            EngineError::Catalog(CatalogError::DuplicateId("strike".into()))
        );
    }

    #[test]
    fn test_status_manager_is_fresh() {
        let engine = Engine::builder()
            .status(StatusEffectDef::new("burn", "Burn", StatusKind::Debuff, 3))
            .build()
            .unwrap();

        let mut first = engine.status_manager();
        first.grant(0.into(), &StatusId::new("burn"), 2);

        let second = engine.status_manager();
        assert!(second.is_empty());
        assert!(second.def(&StatusId::new("burn")).is_some());
    }

    #[test]
    fn test_loadout_skips_unknown() {
        let engine = Engine::builder().ability(strike()).build().unwrap();
        let loadout = engine.loadout(&["strike".into(), "missing".into()]);
        assert_eq!(loadout.len(), 1);
        assert_eq!(loadout.level(&"strike".into()), Some(1));
    }

    #[test]
    fn test_validate_reports_untimed_effects() {
        let engine = Engine::builder()
            .ability(strike().with_effect(Effect::from_action(EffectAction::heal(Target::Caster, 1))))
            .build()
            .unwrap();
        assert_eq!(engine.validate().len(), 1);
    }
}
