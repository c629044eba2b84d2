//! Per-combatant ability loadouts.
//!
//! The catalog is shared and immutable. Upgrades (`replaceAbility`) change
//! what one combatant has, so each combatant keeps its own loadout seeded from
//! the catalog.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use tracing::debug;

use crate::core::AbilityId;

use super::catalog::AbilityLookup;
use super::definition::{AbilityDef, AbilityVariant};

/// One owned ability and its upgrade level.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoadoutSlot {
    pub def: AbilityDef,
    pub level: u32,
}

/// The abilities a combatant currently owns, in acquisition order.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AbilityLoadout {
    slots: Vec<LoadoutSlot>,
}

impl AbilityLoadout {
    /// Create an empty loadout.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an ability at level 1 (builder pattern).
    #[must_use]
    pub fn with_ability(mut self, def: AbilityDef) -> Self {
        self.push(def, 1);
        self
    }

    /// Add an ability at the given level.
    pub fn push(&mut self, def: AbilityDef, level: u32) {
        self.slots.push(LoadoutSlot { def, level });
    }

    /// Replace the ability whose base id is `target` with `def` at `level`.
    ///
    /// Returns whether anything changed: replacing with the definition and
    /// level already in place is a no-op, as is naming an ability the
    /// combatant does not own.
    pub fn replace(&mut self, target: &AbilityId, def: AbilityDef, level: u32) -> bool {
        let Some(slot) = self.slots.iter_mut().find(|s| &s.def.id == target) else {
            debug!(ability = %target, "replace target not in loadout");
            return false;
        };
        if slot.level == level && slot.def == def {
            return false;
        }
        debug!(ability = %target, new_id = %def.id, level, "ability replaced");
        slot.def = def;
        slot.level = level;
        true
    }

    /// Upgrade level of an owned ability.
    #[must_use]
    pub fn level(&self, id: &AbilityId) -> Option<u32> {
        self.slot(id).map(|s| s.level)
    }

    /// Base ids in acquisition order; the candidate list for availability.
    #[must_use]
    pub fn ability_ids(&self) -> SmallVec<[AbilityId; 8]> {
        self.slots.iter().map(|s| s.def.id.clone()).collect()
    }

    /// Iterate over slots in acquisition order.
    pub fn iter(&self) -> impl Iterator<Item = &LoadoutSlot> {
        self.slots.iter()
    }

    /// Get the number of owned abilities.
    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Check if the loadout is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    fn slot(&self, id: &AbilityId) -> Option<&LoadoutSlot> {
        self.slots.iter().find(|s| &s.def.id == id)
    }
}

impl AbilityLookup for AbilityLoadout {
    fn lookup(&self, id: &AbilityId) -> Option<(&AbilityDef, Option<&AbilityVariant>)> {
        self.slots.iter().find_map(|slot| {
            let def = &slot.def;
            if &def.id == id {
                Some((def, None))
            } else {
                def.variant(id).map(|v| (def, Some(v)))
            }
        })
    }
}
