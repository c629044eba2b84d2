//! Resolution configuration.
//!
//! Games pass a `ResolveConfig` alongside each `resolve_effects` call to
//! inject one-off modifiers (a card that adds +3 damage to the next attack,
//! a passive that boosts every hit). The engine never stores it between
//! calls.

use serde::{Deserialize, Serialize};

/// Per-call modifiers for effect resolution.
///
/// ## Example
///
/// ```
/// use ability_engine::core::ResolveConfig;
///
/// let config = ResolveConfig::new().with_bonus_damage(3).once();
/// assert_eq!(config.bonus_damage, 3);
/// assert!(config.bonus_damage_once);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ResolveConfig {
    /// Extra damage added to damage actions in the resolved phase.
    pub bonus_damage: i64,

    /// Apply `bonus_damage` only to the first damage action of the phase.
    /// When false, every damage action of the phase receives the bonus.
    pub bonus_damage_once: bool,
}

impl ResolveConfig {
    /// Create a config with no modifiers.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the bonus damage.
    #[must_use]
    pub fn with_bonus_damage(mut self, bonus: i64) -> Self {
        self.bonus_damage = bonus;
        self
    }

    /// Restrict the bonus to the first damage action.
    #[must_use]
    pub fn once(mut self) -> Self {
        self.bonus_damage_once = true;
        self
    }

    /// Check whether this config modifies anything.
    #[must_use]
    pub fn has_bonus(&self) -> bool {
        self.bonus_damage != 0
    }
}
