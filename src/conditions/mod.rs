//! Condition model, registry and evaluation.
//!
//! Conditions gate abilities (triggers) and individual effects (guards).
//! Evaluation is a pure function of the condition, a [`ConditionContext`]
//! snapshot and the [`ConditionRegistry`].
//!
//! ## Key Components
//!
//! - [`Condition`]: Built-in kinds plus `custom` kinds for game vocabulary
//! - [`ConditionContext`]: Snapshot of dice, resources, statuses and phase
//! - [`ConditionRegistry`]: Evaluators for game-specific kinds (empty by default)
//! - [`ConditionEvaluator`]: The evaluation function itself
//! - [`dice`]: Opt-in dice vocabulary (`diceSet`, straights, `phase`)
//!
//! ## Example Usage
//!
//! ```
//! use ability_engine::conditions::{dice, CompareOp, Condition, ConditionContext, ConditionRegistry};
//!
//! let mut registry = ConditionRegistry::new();
//! let trigger = dice::dice_set([("fist", 3)])
//!     .and(Condition::resource("cp", CompareOp::Ge, 2));
//!
//! let ctx = ConditionContext::new()
//!     .with_face_count("fist", 3)
//!     .with_resource("cp", 2);
//!
//! // Dice kinds mean nothing until the game registers them.
//! assert!(!registry.evaluate(&trigger, &ctx));
//!
//! dice::register_dice_conditions(&mut registry).unwrap();
//! assert!(registry.evaluate(&trigger, &ctx));
//! ```

mod condition;
mod context;
pub mod dice;
mod registry;

pub use condition::{CompareOp, CompositeOp, Condition, ConditionEvaluator};
pub use context::ConditionContext;
pub use registry::{ConditionFn, ConditionRegistry, BUILTIN_KINDS};
