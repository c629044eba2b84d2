//! Trigger and guard conditions.
//!
//! Conditions decide whether an ability can be activated (triggers) and
//! whether an individual effect applies (guards). The engine provides the
//! built-in kinds; games add their own through the
//! [`ConditionRegistry`](super::ConditionRegistry).

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::core::{Params, StatusId, Target};

use super::context::ConditionContext;
use super::registry::{ConditionRegistry, BUILTIN_KINDS};

/// Comparison operator for resource conditions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CompareOp {
    #[serde(rename = "<")]
    Lt,
    #[serde(rename = "<=")]
    Le,
    #[serde(rename = "=")]
    Eq,
    #[serde(rename = ">=")]
    Ge,
    #[serde(rename = ">")]
    Gt,
}

impl CompareOp {
    /// Apply the comparison `lhs op rhs`.
    #[must_use]
    pub fn compare(self, lhs: i64, rhs: i64) -> bool {
        match self {
            CompareOp::Lt => lhs < rhs,
            CompareOp::Le => lhs <= rhs,
            CompareOp::Eq => lhs == rhs,
            CompareOp::Ge => lhs >= rhs,
            CompareOp::Gt => lhs > rhs,
        }
    }
}

/// Boolean combinator for composite conditions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CompositeOp {
    And,
    Or,
    Not,
}

fn one_stack() -> u32 {
    1
}

/// A condition that must hold for an ability or effect to fire.
///
/// Conditions are immutable descriptors. Evaluating one never changes the
/// context or the registry.
///
/// In catalog data a game kind can be written under its own tag, with its
/// params as sibling fields (`{"type": "diceSet", "faces": {"fist": 3}}`), or
/// wrapped as `{"type": "custom", "kind": "diceSet", "params": {...}}`. Both
/// load as [`Condition::Custom`]; the first form is what gets written.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "ConditionData", try_from = "ConditionData")]
pub enum Condition {
    /// Always satisfied.
    Always,

    /// Compare a named resource of the activating entity against a value.
    Resource {
        resource_id: String,
        op: CompareOp,
        value: i64,
    },

    /// An entity holds at least `min_stacks` of a status.
    HasStatus {
        target: Target,
        status_id: StatusId,
        min_stacks: u32,
    },

    /// The opposing entity holds at least `min_stacks` of a status.
    TargetHasStatus {
        status_id: StatusId,
        min_stacks: u32,
    },

    /// The activation being resolved has dealt damage.
    OnHit,

    /// The activation being resolved has dealt no damage.
    OnMiss,

    /// Boolean combination of child conditions.
    Composite {
        op: CompositeOp,
        children: Vec<Condition>,
    },

    /// Game-specific kind, evaluated by the registered evaluator.
    Custom {
        kind: String,
        params: Params,
    },
}

/// Serialized form of a [`Condition`].
#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum ConditionData {
    Builtin(BuiltinData),
    Game(GameKindData),
}

#[derive(Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
enum BuiltinData {
    Always,
    #[serde(rename_all = "camelCase")]
    Resource {
        resource_id: String,
        op: CompareOp,
        value: i64,
    },
    #[serde(rename_all = "camelCase")]
    HasStatus {
        #[serde(default)]
        target: Target,
        status_id: StatusId,
        #[serde(default = "one_stack")]
        min_stacks: u32,
    },
    #[serde(rename_all = "camelCase")]
    TargetHasStatus {
        status_id: StatusId,
        #[serde(default = "one_stack")]
        min_stacks: u32,
    },
    OnHit,
    OnMiss,
    Composite {
        op: CompositeOp,
        children: Vec<Condition>,
    },
    Custom {
        kind: String,
        #[serde(default)]
        params: Params,
    },
}

/// A game kind written under its own tag.
#[derive(Serialize, Deserialize)]
struct GameKindData {
    #[serde(rename = "type")]
    kind: String,
    #[serde(flatten)]
    params: Params,
}

impl From<Condition> for ConditionData {
    fn from(condition: Condition) -> Self {
        let builtin = match condition {
            Condition::Always => BuiltinData::Always,
            Condition::Resource {
                resource_id,
                op,
                value,
            } => BuiltinData::Resource {
                resource_id,
                op,
                value,
            },
            Condition::HasStatus {
                target,
                status_id,
                min_stacks,
            } => BuiltinData::HasStatus {
                target,
                status_id,
                min_stacks,
            },
            Condition::TargetHasStatus { status_id, min_stacks } => {
                BuiltinData::TargetHasStatus { status_id, min_stacks }
            }
            Condition::OnHit => BuiltinData::OnHit,
            Condition::OnMiss => BuiltinData::OnMiss,
            Condition::Composite { op, children } => BuiltinData::Composite { op, children },
            Condition::Custom { kind, params } => {
                // The wrapped form stays unambiguous when the flat one would not be.
                if BUILTIN_KINDS.contains(&kind.as_str()) || params.get("type").is_some() {
                    BuiltinData::Custom { kind, params }
                } else {
                    return ConditionData::Game(GameKindData { kind, params });
                }
            }
        };
        ConditionData::Builtin(builtin)
    }
}

impl TryFrom<ConditionData> for Condition {
    type Error = String;

    fn try_from(data: ConditionData) -> Result<Self, Self::Error> {
        let builtin = match data {
            ConditionData::Builtin(builtin) => builtin,
            ConditionData::Game(GameKindData { kind, params }) => {
                // A built-in tag only ends up here when its fields were wrong.
                if BUILTIN_KINDS.contains(&kind.as_str()) {
                    return Err(format!("malformed '{kind}' condition"));
                }
                return Ok(Condition::Custom { kind, params });
            }
        };
        Ok(match builtin {
            BuiltinData::Always => Condition::Always,
            BuiltinData::Resource {
                resource_id,
                op,
                value,
            } => Condition::Resource {
                resource_id,
                op,
                value,
            },
            BuiltinData::HasStatus {
                target,
                status_id,
                min_stacks,
            } => Condition::HasStatus {
                target,
                status_id,
                min_stacks,
            },
            BuiltinData::TargetHasStatus { status_id, min_stacks } => {
                Condition::TargetHasStatus { status_id, min_stacks }
            }
            BuiltinData::OnHit => Condition::OnHit,
            BuiltinData::OnMiss => Condition::OnMiss,
            BuiltinData::Composite { op, children } => Condition::Composite { op, children },
            BuiltinData::Custom { kind, params } => Condition::Custom { kind, params },
        })
    }
}

impl Condition {
    /// Create a resource comparison.
    pub fn resource(resource_id: impl Into<String>, op: CompareOp, value: i64) -> Self {
        Self::Resource {
            resource_id: resource_id.into(),
            op,
            value,
        }
    }

    /// Create a condition on the activating entity's statuses.
    pub fn has_status(status_id: impl Into<StatusId>, min_stacks: u32) -> Self {
        Self::HasStatus {
            target: Target::Caster,
            status_id: status_id.into(),
            min_stacks,
        }
    }

    /// Create a condition on the opposing entity's statuses.
    pub fn target_has_status(status_id: impl Into<StatusId>, min_stacks: u32) -> Self {
        Self::TargetHasStatus {
            status_id: status_id.into(),
            min_stacks,
        }
    }

    /// Create a game-specific condition.
    pub fn custom(kind: impl Into<String>, params: Params) -> Self {
        Self::Custom {
            kind: kind.into(),
            params,
        }
    }

    /// Create an AND condition.
    pub fn all(conditions: impl IntoIterator<Item = Condition>) -> Self {
        Self::Composite {
            op: CompositeOp::And,
            children: conditions.into_iter().collect(),
        }
    }

    /// Create an OR condition.
    pub fn any(conditions: impl IntoIterator<Item = Condition>) -> Self {
        Self::Composite {
            op: CompositeOp::Or,
            children: conditions.into_iter().collect(),
        }
    }

    /// Negate this condition.
    pub fn negate(self) -> Self {
        Self::Composite {
            op: CompositeOp::Not,
            children: vec![self],
        }
    }

    /// Add another condition with AND.
    pub fn and(self, other: Condition) -> Self {
        match self {
            Self::Composite {
                op: CompositeOp::And,
                mut children,
            } => {
                children.push(other);
                Self::all(children)
            }
            _ => Self::all([self, other]),
        }
    }

    /// Add another condition with OR.
    pub fn or(self, other: Condition) -> Self {
        match self {
            Self::Composite {
                op: CompositeOp::Or,
                mut children,
            } => {
                children.push(other);
                Self::any(children)
            }
            _ => Self::any([self, other]),
        }
    }

    /// Name of this condition's kind, as it appears in catalog data.
    #[must_use]
    pub fn kind(&self) -> &str {
        match self {
            Condition::Always => "always",
            Condition::Resource { .. } => "resource",
            Condition::HasStatus { .. } => "hasStatus",
            Condition::TargetHasStatus { .. } => "targetHasStatus",
            Condition::OnHit => "onHit",
            Condition::OnMiss => "onMiss",
            Condition::Composite { .. } => "composite",
            Condition::Custom { kind, .. } => kind,
        }
    }

    /// Collect the statuses this condition tree reads, with the side each is
    /// read from.
    pub fn status_refs<'a>(&'a self, out: &mut Vec<(Target, &'a StatusId)>) {
        match self {
            Condition::HasStatus { target, status_id, .. } => out.push((*target, status_id)),
            Condition::TargetHasStatus { status_id, .. } => out.push((Target::Opponent, status_id)),
            Condition::Composite { children, .. } => {
                for child in children {
                    child.status_refs(out);
                }
            }
            _ => {}
        }
    }

    /// Collect the game-specific kinds this condition tree depends on.
    pub fn custom_kinds<'a>(&'a self, out: &mut Vec<&'a str>) {
        match self {
            Condition::Custom { kind, .. } => {
                if !out.contains(&kind.as_str()) {
                    out.push(kind);
                }
            }
            Condition::Composite { children, .. } => {
                for child in children {
                    child.custom_kinds(out);
                }
            }
            _ => {}
        }
    }
}

/// Evaluator for conditions.
pub struct ConditionEvaluator;

impl ConditionEvaluator {
    /// Check if a condition is satisfied.
    ///
    /// Total for any well-formed condition: unknown kinds and malformed
    /// composites are logged and treated as unsatisfied.
    pub fn evaluate(
        condition: &Condition,
        ctx: &ConditionContext,
        registry: &ConditionRegistry,
    ) -> bool {
        match condition {
            Condition::Always => true,

            Condition::Resource {
                resource_id,
                op,
                value,
            } => op.compare(ctx.resource(resource_id), *value),

            Condition::HasStatus {
                target,
                status_id,
                min_stacks,
            } => ctx.status_stacks(*target, status_id.as_str()) >= (*min_stacks).max(1),

            Condition::TargetHasStatus {
                status_id,
                min_stacks,
            } => ctx.status_stacks(Target::Opponent, status_id.as_str()) >= (*min_stacks).max(1),

            Condition::OnHit => ctx.damage_dealt.is_some_and(|dealt| dealt > 0),

            Condition::OnMiss => ctx.damage_dealt.is_some_and(|dealt| dealt == 0),

            Condition::Composite { op, children } => match op {
                CompositeOp::And => children.iter().all(|c| Self::evaluate(c, ctx, registry)),
                CompositeOp::Or => children.iter().any(|c| Self::evaluate(c, ctx, registry)),
                CompositeOp::Not => match children.as_slice() {
                    [child] => !Self::evaluate(child, ctx, registry),
                    _ => {
                        warn!(
                            children = children.len(),
                            "'not' condition needs exactly one child; treating as unsatisfied"
                        );
                        false
                    }
                },
            },

            Condition::Custom { kind, params } => match registry.get(kind) {
                Some(evaluator) => evaluator(params, ctx),
                None => {
                    warn!(kind = %kind, "condition kind is not registered; treating as unsatisfied");
                    false
                }
            },
        }
    }
}
