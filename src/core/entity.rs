//! Entity identification.
//!
//! Every combatant the engine can target (players, summoned units, bosses)
//! is addressed by an `EntityId`. The engine never interprets the number;
//! the calling game decides how ids map onto its own match state.
//!
//! ## Usage
//!
//! ```
//! use ability_engine::core::EntityId;
//!
//! let attacker = EntityId::new(0);
//! let defender = EntityId::new(1);
//!
//! assert_ne!(attacker, defender);
//! assert_eq!(format!("{}", defender), "Entity(1)");
//! ```

use serde::{Deserialize, Serialize};

/// Unique identifier for an entity that can hold statuses and take damage.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EntityId(pub u32);

impl EntityId {
    /// Create a new entity ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

/// Which side of an activation an effect or status check points at.
///
/// Abilities are authored relative to whoever activates them, so the same
/// definition works for either player. The resolver maps `Caster` to the
/// attacker and `Opponent` to the defender of the current activation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Target {
    /// The entity activating the ability.
    #[default]
    #[serde(rename = "self")]
    Caster,
    /// The entity on the other side of the activation.
    #[serde(rename = "opponent")]
    Opponent,
}

impl Target {
    /// Map this side onto concrete entities.
    #[must_use]
    pub const fn resolve(self, caster: EntityId, opponent: EntityId) -> EntityId {
        match self {
            Target::Caster => caster,
            Target::Opponent => opponent,
        }
    }
}

impl From<u32> for EntityId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for EntityId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Entity({})", self.0)
    }
}
