//! Registry of game-specific condition kinds.
//!
//! The engine knows nothing about dice combinatorics or phase names. A game
//! that authors `{"type": "diceSet", "faces": {...}}` conditions must
//! register a `diceSet` evaluator at startup; until then those conditions are
//! unsatisfied. The registry starts empty.

use std::sync::Arc;

use rustc_hash::FxHashMap;

use crate::core::{Params, RegistryError};

use super::condition::{Condition, ConditionEvaluator};
use super::context::ConditionContext;

/// Evaluator for one game-specific condition kind.
///
/// Receives the condition's payload and the context snapshot. Must be pure.
pub type ConditionFn = Arc<dyn Fn(&Params, &ConditionContext) -> bool + Send + Sync>;

/// Kind names owned by built-in conditions.
pub const BUILTIN_KINDS: [&str; 8] = [
    "always",
    "resource",
    "hasStatus",
    "targetHasStatus",
    "onHit",
    "onMiss",
    "composite",
    "custom",
];

/// Registry mapping condition kinds to evaluators.
///
/// Cloning is cheap (evaluators are shared), so one registry built at game
/// init can be handed to every match.
///
/// ## Example
///
/// ```
/// use ability_engine::conditions::{Condition, ConditionContext, ConditionRegistry};
/// use ability_engine::core::Params;
///
/// let mut registry = ConditionRegistry::new();
/// let even_roll = Condition::custom("evenRoll", Params::new());
/// let ctx = ConditionContext::new().with_dice([2, 4]);
///
/// assert!(!registry.evaluate(&even_roll, &ctx));
///
/// registry
///     .register("evenRoll", |_params, ctx| ctx.dice.iter().all(|d| d % 2 == 0))
///     .unwrap();
/// assert!(registry.evaluate(&even_roll, &ctx));
/// ```
#[derive(Clone, Default)]
pub struct ConditionRegistry {
    /// Evaluators by kind.
    evaluators: FxHashMap<String, ConditionFn>,

    /// Kinds in registration order, for stable listing.
    order: Vec<String>,
}

impl ConditionRegistry {
    /// Create a new empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an evaluator for a kind.
    ///
    /// A kind can be registered once; later attempts leave the first
    /// evaluator in place and return [`RegistryError::Duplicate`]. Built-in
    /// kind names are refused with [`RegistryError::Reserved`].
    pub fn register<F>(&mut self, kind: impl Into<String>, evaluator: F) -> Result<(), RegistryError>
    where
        F: Fn(&Params, &ConditionContext) -> bool + Send + Sync + 'static,
    {
        let kind = kind.into();

        if BUILTIN_KINDS.contains(&kind.as_str()) {
            return Err(RegistryError::Reserved(kind));
        }
        if self.evaluators.contains_key(&kind) {
            return Err(RegistryError::Duplicate(kind));
        }

        self.order.push(kind.clone());
        self.evaluators.insert(kind, Arc::new(evaluator));
        Ok(())
    }

    /// Remove an evaluator. Returns whether the kind was registered.
    pub fn unregister(&mut self, kind: &str) -> bool {
        if self.evaluators.remove(kind).is_some() {
            self.order.retain(|k| k != kind);
            true
        } else {
            false
        }
    }

    /// Get the evaluator for a kind.
    #[must_use]
    pub fn get(&self, kind: &str) -> Option<&ConditionFn> {
        self.evaluators.get(kind)
    }

    /// Check if a kind is registered.
    #[must_use]
    pub fn contains(&self, kind: &str) -> bool {
        self.evaluators.contains_key(kind)
    }

    /// Registered kinds, in registration order.
    pub fn kinds(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }

    /// Get the number of registered kinds.
    #[must_use]
    pub fn len(&self) -> usize {
        self.evaluators.len()
    }

    /// Check if registry is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.evaluators.is_empty()
    }

    /// Evaluate a condition against this registry.
    #[must_use]
    pub fn evaluate(&self, condition: &Condition, ctx: &ConditionContext) -> bool {
        ConditionEvaluator::evaluate(condition, ctx, self)
    }
}

impl std::fmt::Debug for ConditionRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConditionRegistry")
            .field("kinds", &self.order)
            .finish()
    }
}
