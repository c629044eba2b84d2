//! Ability and effect model.
//!
//! Abilities are static catalog data. The resolver turns them into
//! `GameContext` calls; nothing here mutates game state.
//!
//! ## Key Types
//!
//! - [`AbilityDef`]: Flat trigger + effects, or a list of [`AbilityVariant`]s
//! - [`Effect`]: Optional action, timing phase and guard condition
//! - [`EffectAction`]: Closed set of actions the resolver knows how to apply
//! - [`AbilityCatalog`]: Shared, insertion-ordered definition store
//! - [`AbilityLoadout`]: One combatant's abilities, upgradable mid-match
//! - [`validate_catalog`]: Offline checks for definitions that never fire

mod catalog;
mod definition;
mod effect;
mod loadout;
mod validation;

pub use catalog::{AbilityCatalog, AbilityLookup};
pub use definition::{AbilityDef, AbilityType, AbilityVariant};
pub use effect::{Effect, EffectAction, EffectTiming};
pub use loadout::{AbilityLoadout, LoadoutSlot};
pub use validation::{validate_catalog, CatalogIssue};

/// Effect targets are activation-relative: `self` or `opponent`.
pub use crate::core::Target as EffectTarget;
