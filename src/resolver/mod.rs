//! Ability availability and effect resolution.
//!
//! ## Resolution flow
//!
//! 1. Build a [`ConditionContext`](crate::conditions::ConditionContext) from
//!    game state and ask [`AbilityManager::available_abilities`].
//! 2. The player picks one of the returned ids.
//! 3. Create a [`ResolutionContext`] for the activation.
//! 4. Call [`AbilityManager::resolve_effects`] (or `resolve_ability`) once per
//!    timing phase, reusing the same resolution context so `onHit` guards in
//!    `postDamage` see the damage from `withDamage`.

mod context;
mod manager;

pub use context::{GameContext, ResolutionContext};
pub use manager::{AbilityManager, EffectOutcome};
