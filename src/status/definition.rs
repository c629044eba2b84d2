//! Status effect definitions.

use serde::{Deserialize, Serialize};

use crate::core::StatusId;

/// Whether a status helps or hinders its holder.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusKind {
    Buff,
    Debuff,
}

/// When a status does its work. The game decides what that work is.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum StatusTiming {
    OnTurnStart,
    OnTurnEnd,
    OnAttack,
    OnDefend,
    OnDamageTaken,
}

/// What the holder pays to cleanse a status.
///
/// Metadata only: the status manager never touches resources.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemovalCost {
    pub resource: String,
    pub amount: i64,
}

/// Definition of a buff or debuff.
///
/// ## Example
///
/// ```
/// use ability_engine::status::{StatusEffectDef, StatusKind, StatusTiming};
///
/// let burn = StatusEffectDef::new("burn", "Burn", StatusKind::Debuff, 3)
///     .with_timing(StatusTiming::OnTurnStart)
///     .with_removal_cost("cp", 2);
///
/// assert!(burn.removable);
/// assert_eq!(burn.removal_cost.as_ref().unwrap().amount, 2);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusEffectDef {
    pub id: StatusId,
    pub name: String,

    #[serde(rename = "type")]
    pub kind: StatusKind,

    /// Maximum stacks one entity can hold.
    pub stack_limit: u32,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timing: Option<StatusTiming>,

    #[serde(default = "removable_default")]
    pub removable: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub removal_cost: Option<RemovalCost>,

    #[serde(default)]
    pub description: String,
}

fn removable_default() -> bool {
    true
}

impl StatusEffectDef {
    /// Create a removable status with no timing or cost.
    pub fn new(id: impl Into<StatusId>, name: impl Into<String>, kind: StatusKind, stack_limit: u32) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            kind,
            stack_limit,
            timing: None,
            removable: true,
            removal_cost: None,
            description: String::new(),
        }
    }

    /// Set the timing (builder pattern).
    #[must_use]
    pub fn with_timing(mut self, timing: StatusTiming) -> Self {
        self.timing = Some(timing);
        self
    }

    /// Set the cleanse cost (builder pattern).
    #[must_use]
    pub fn with_removal_cost(mut self, resource: impl Into<String>, amount: i64) -> Self {
        self.removal_cost = Some(RemovalCost {
            resource: resource.into(),
            amount,
        });
        self
    }

    /// Mark the status as impossible to cleanse (builder pattern).
    #[must_use]
    pub fn unremovable(mut self) -> Self {
        self.removable = false;
        self
    }

    /// Set the description (builder pattern).
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}
