//! Ability definitions.
//!
//! An `AbilityDef` is immutable catalog data. It is either a flat ability
//! (one trigger, one effect list) or a set of variants of which at most one
//! fires per activation.

use serde::{Deserialize, Serialize};

use crate::conditions::Condition;
use crate::core::AbilityId;

use super::effect::Effect;

/// Whether an ability is used on the attacker's or the defender's turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AbilityType {
    Offensive,
    Defensive,
}

/// One alternative form of an ability.
///
/// Among the satisfied variants of an ability, the one with the highest
/// `priority` fires; equal priorities go to the one declared first.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AbilityVariant {
    /// Variant id, unique across the catalog.
    pub id: AbilityId,

    /// Condition that makes this variant eligible.
    pub trigger: Condition,

    /// Effects applied when this variant is chosen.
    #[serde(default)]
    pub effects: Vec<Effect>,

    /// Selection priority. Higher wins.
    #[serde(default)]
    pub priority: i32,

    /// Free-form labels (e.g. "unblockable").
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
}

impl AbilityVariant {
    /// Create a variant with no effects.
    pub fn new(id: impl Into<AbilityId>, trigger: Condition, priority: i32) -> Self {
        Self {
            id: id.into(),
            trigger,
            effects: Vec::new(),
            priority,
            tags: Vec::new(),
        }
    }

    /// Add an effect (builder pattern).
    #[must_use]
    pub fn with_effect(mut self, effect: Effect) -> Self {
        self.effects.push(effect);
        self
    }

    /// Add a tag (builder pattern).
    #[must_use]
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.push(tag.into());
        self
    }
}

/// Definition of an ability.
///
/// ## Example
///
/// ```
/// use ability_engine::abilities::{AbilityDef, AbilityType, AbilityVariant, Effect, EffectAction};
/// use ability_engine::conditions::dice;
/// use ability_engine::core::Target;
///
/// let fist = AbilityDef::new("fist-technique", "Fist Technique", AbilityType::Offensive)
///     .with_variant(
///         AbilityVariant::new("fist-technique-3", dice::dice_set([("fist", 3)]), 1)
///             .with_effect(Effect::from_action(EffectAction::damage(Target::Opponent, 4))),
///     )
///     .with_variant(
///         AbilityVariant::new("fist-technique-4", dice::dice_set([("fist", 4)]), 2)
///             .with_effect(Effect::from_action(EffectAction::damage(Target::Opponent, 6))),
///     );
///
/// assert!(fist.has_variants());
/// assert_eq!(fist.all_effects().count(), 2);
/// assert!(fist.variant(&"fist-technique-4".into()).is_some());
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AbilityDef {
    /// Base ability id.
    pub id: AbilityId,

    /// Display name.
    pub name: String,

    /// Offensive or defensive.
    #[serde(rename = "type")]
    pub ability_type: AbilityType,

    /// Rules text.
    #[serde(default)]
    pub description: String,

    /// Trigger of a flat ability.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trigger: Option<Condition>,

    /// Effects of a flat ability.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub effects: Vec<Effect>,

    /// Alternative forms. Non-empty means the flat trigger is not used.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub variants: Vec<AbilityVariant>,

    /// Free-form labels.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
}

impl AbilityDef {
    /// Create an ability with no trigger, effects or variants.
    pub fn new(id: impl Into<AbilityId>, name: impl Into<String>, ability_type: AbilityType) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            ability_type,
            description: String::new(),
            trigger: None,
            effects: Vec::new(),
            variants: Vec::new(),
            tags: Vec::new(),
        }
    }

    /// Set the description (builder pattern).
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Set the flat trigger (builder pattern).
    #[must_use]
    pub fn with_trigger(mut self, trigger: Condition) -> Self {
        self.trigger = Some(trigger);
        self
    }

    /// Add a flat effect (builder pattern).
    #[must_use]
    pub fn with_effect(mut self, effect: Effect) -> Self {
        self.effects.push(effect);
        self
    }

    /// Add a variant (builder pattern).
    #[must_use]
    pub fn with_variant(mut self, variant: AbilityVariant) -> Self {
        self.variants.push(variant);
        self
    }

    /// Add a tag (builder pattern).
    #[must_use]
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.push(tag.into());
        self
    }

    /// Check if this ability is defined through variants.
    #[must_use]
    pub fn has_variants(&self) -> bool {
        !self.variants.is_empty()
    }

    /// Find a variant by id.
    #[must_use]
    pub fn variant(&self, id: &AbilityId) -> Option<&AbilityVariant> {
        self.variants.iter().find(|v| &v.id == id)
    }

    /// Effects for the base id or one of this ability's variant ids.
    #[must_use]
    pub fn effects_for(&self, id: &AbilityId) -> Option<&[Effect]> {
        if &self.id == id {
            Some(&self.effects)
        } else {
            self.variant(id).map(|v| v.effects.as_slice())
        }
    }

    /// Every effect of the ability, flat ones first, then each variant's in
    /// declaration order. Includes text-only effects.
    pub fn all_effects(&self) -> impl Iterator<Item = &Effect> {
        self.effects
            .iter()
            .chain(self.variants.iter().flat_map(|v| v.effects.iter()))
    }

    /// The base id followed by every variant id.
    pub fn ids(&self) -> impl Iterator<Item = &AbilityId> {
        std::iter::once(&self.id).chain(self.variants.iter().map(|v| &v.id))
    }
}
