//! Setup-time errors.
//!
//! Evaluation and resolution never fail: a bad condition is unsatisfied and a
//! bad effect is skipped. Building the engine is different. Registering the
//! same condition kind twice or loading two abilities with one id is a
//! programming error the game should see at init, so those paths return
//! these types.

use thiserror::Error;

use super::ids::AbilityId;

/// Errors from [`ConditionRegistry`](crate::conditions::ConditionRegistry) registration.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// The kind already has an evaluator; the first registration is kept.
    #[error("condition kind '{0}' is already registered")]
    Duplicate(String),

    /// The kind name belongs to a built-in condition.
    #[error("condition kind '{0}' is reserved for a built-in condition")]
    Reserved(String),
}

/// Errors from loading ability definitions into an
/// [`AbilityCatalog`](crate::abilities::AbilityCatalog).
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum CatalogError {
    /// A base ability or variant with this id is already loaded.
    #[error("ability id '{0}' is already defined")]
    DuplicateId(AbilityId),

    /// The definition populates both a flat trigger and a variant list.
    #[error("ability '{0}' defines both a trigger and variants")]
    AmbiguousTrigger(AbilityId),
}

/// Errors from [`EngineBuilder::build`](crate::engine::EngineBuilder::build).
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum EngineError {
    #[error(transparent)]
    Registry(#[from] RegistryError),

    #[error(transparent)]
    Catalog(#[from] CatalogError),
}
