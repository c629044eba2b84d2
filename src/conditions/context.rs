//! Snapshot of game state that conditions are evaluated against.
//!
//! The calling game copies what the engine may look at (phase, dice, resources,
//! statuses) into a `ConditionContext` before asking any question. Nothing in
//! here points back at the game's own state, so evaluation cannot mutate it.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::core::{ParamValue, Params, Target};

/// Read-only view of the state relevant to condition evaluation.
///
/// Missing entries read as zero: an absent resource is 0, an absent status
/// has 0 stacks, an absent face has been rolled 0 times.
///
/// ## Example
///
/// ```
/// use ability_engine::conditions::ConditionContext;
///
/// let ctx = ConditionContext::new()
///     .with_phase("offensiveRoll")
///     .with_dice([1, 1, 2, 5, 6])
///     .with_face_count("fist", 3)
///     .with_resource("cp", 4)
///     .with_status("evasive", 1);
///
/// assert_eq!(ctx.resource("cp"), 4);
/// assert_eq!(ctx.resource("hp"), 0);
/// assert_eq!(ctx.face_count("fist"), 3);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ConditionContext {
    /// Current phase id (game-defined, compared as a string).
    pub phase: Option<String>,

    /// Rolled dice values, in roll order.
    pub dice: Vec<u8>,

    /// How many dice show each named face.
    pub face_counts: FxHashMap<String, u32>,

    /// Resource pools of the activating entity (cp, hp, mana...).
    pub resources: FxHashMap<String, i64>,

    /// Status stacks held by the activating entity.
    pub statuses: FxHashMap<String, u32>,

    /// Status stacks held by the opposing entity.
    pub target_statuses: FxHashMap<String, u32>,

    /// Damage dealt so far by the activation being resolved.
    /// `None` outside of effect resolution.
    pub damage_dealt: Option<i64>,

    /// Extra game-specific data for registered condition kinds.
    pub extra: Params,
}

impl ConditionContext {
    /// Create an empty context.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the current phase (builder pattern).
    #[must_use]
    pub fn with_phase(mut self, phase: impl Into<String>) -> Self {
        self.phase = Some(phase.into());
        self
    }

    /// Set the rolled dice values (builder pattern).
    #[must_use]
    pub fn with_dice(mut self, dice: impl IntoIterator<Item = u8>) -> Self {
        self.dice = dice.into_iter().collect();
        self
    }

    /// Set the count for one face (builder pattern).
    #[must_use]
    pub fn with_face_count(mut self, face: impl Into<String>, count: u32) -> Self {
        self.face_counts.insert(face.into(), count);
        self
    }

    /// Set a resource value (builder pattern).
    #[must_use]
    pub fn with_resource(mut self, resource: impl Into<String>, value: i64) -> Self {
        self.resources.insert(resource.into(), value);
        self
    }

    /// Set a status stack count on the activating entity (builder pattern).
    #[must_use]
    pub fn with_status(mut self, status: impl Into<String>, stacks: u32) -> Self {
        self.statuses.insert(status.into(), stacks);
        self
    }

    /// Set a status stack count on the opposing entity (builder pattern).
    #[must_use]
    pub fn with_target_status(mut self, status: impl Into<String>, stacks: u32) -> Self {
        self.target_statuses.insert(status.into(), stacks);
        self
    }

    /// Record damage dealt by the current activation (builder pattern).
    #[must_use]
    pub fn with_damage_dealt(mut self, damage: i64) -> Self {
        self.damage_dealt = Some(damage);
        self
    }

    /// Add game-specific data (builder pattern).
    #[must_use]
    pub fn with_extra(mut self, key: impl Into<String>, value: impl Into<ParamValue>) -> Self {
        self.extra.insert(key, value);
        self
    }

    /// Get a resource value, 0 if absent.
    #[must_use]
    pub fn resource(&self, resource: &str) -> i64 {
        self.resources.get(resource).copied().unwrap_or(0)
    }

    /// Get how many dice show a face, 0 if absent.
    #[must_use]
    pub fn face_count(&self, face: &str) -> u32 {
        self.face_counts.get(face).copied().unwrap_or(0)
    }

    /// Get status stacks on one side of the activation, 0 if absent.
    #[must_use]
    pub fn status_stacks(&self, target: Target, status: &str) -> u32 {
        let statuses = match target {
            Target::Caster => &self.statuses,
            Target::Opponent => &self.target_statuses,
        };
        statuses.get(status).copied().unwrap_or(0)
    }

    /// Number of dice rolled.
    #[must_use]
    pub fn dice_count(&self) -> usize {
        self.dice.len()
    }
}
