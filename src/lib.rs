//! # ability-engine
//!
//! A generic ability, condition and effect resolution engine for turn-based
//! dice and card combat games.
//!
//! ## Design Principles
//!
//! 1. **Pure Evaluation, Funnelled Mutation**: Conditions are evaluated against
//!    a snapshot and never change anything. Effects change game state only
//!    through the game's `GameContext` implementation.
//!
//! 2. **Game-Agnostic**: No hardcoded dice faces, phases or resources. Games
//!    register their own condition kinds (or opt into the bundled dice
//!    vocabulary) at startup.
//!
//! 3. **Data-Driven**: Abilities and statuses are serde data, so catalogs can
//!    live in JSON.
//!
//! ## Architecture
//!
//! - **Deterministic**: No randomness inside the engine (dice arrive already
//!   rolled), ordered iteration everywhere results depend on order.
//!
//! - **Persistent Status Storage**: Stack counts live in an `im::OrdMap`, so
//!   match state clones in O(1) for rollback.
//!
//! ## Modules
//!
//! - `core`: Identifiers, parameter payloads, resolution config, errors
//! - `conditions`: Condition model, registry, evaluation, dice vocabulary
//! - `abilities`: Ability/effect model, catalog, loadouts, validation
//! - `resolver`: `GameContext`, availability queries, effect resolution
//! - `status`: Status definitions and stack bookkeeping
//! - `engine`: Registry + catalog + statuses bundled for a match
//! - `games`: Reference duel exercising the whole engine

pub mod core;
pub mod conditions;
pub mod abilities;
pub mod resolver;
pub mod status;
pub mod engine;
pub mod games;

// Re-export commonly used types
pub use crate::core::{
    AbilityId, CatalogError, EngineError, EntityId, ParamValue, Params, RegistryError, ResolveConfig,
    StatusId, Target,
};

pub use crate::conditions::{
    CompareOp, CompositeOp, Condition, ConditionContext, ConditionEvaluator, ConditionRegistry,
};

pub use crate::abilities::{
    validate_catalog, AbilityCatalog, AbilityDef, AbilityLoadout, AbilityLookup, AbilityType,
    AbilityVariant, CatalogIssue, Effect, EffectAction, EffectTiming,
};

pub use crate::resolver::{AbilityManager, EffectOutcome, GameContext, ResolutionContext};

pub use crate::status::{RemovalCost, StatusEffectDef, StatusKind, StatusManager, StatusTiming};

pub use crate::engine::{Engine, EngineBuilder};
