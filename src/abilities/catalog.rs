//! Ability catalog for definition lookup.
//!
//! The `AbilityCatalog` stores every ability definition a game ships with.
//! It keeps insertion order for iteration and indexes both base ids and
//! variant ids, so an id reported by the availability query can be resolved
//! directly.

use rustc_hash::FxHashMap;

use crate::core::{AbilityId, CatalogError};

use super::definition::{AbilityDef, AbilityVariant};
use super::effect::Effect;

/// Read access to ability definitions by id.
///
/// Implemented by the shared [`AbilityCatalog`] and by a combatant's
/// [`AbilityLoadout`](super::AbilityLoadout), whose definitions may have been
/// upgraded mid-match.
pub trait AbilityLookup {
    /// Find the ability owning `id`, which may be a base or variant id.
    /// The variant is returned when `id` names one.
    fn lookup(&self, id: &AbilityId) -> Option<(&AbilityDef, Option<&AbilityVariant>)>;

    /// Find an ability by base id.
    fn ability(&self, id: &AbilityId) -> Option<&AbilityDef> {
        match self.lookup(id) {
            Some((def, None)) => Some(def),
            _ => None,
        }
    }

    /// Effects of a base or variant id.
    fn effects(&self, id: &AbilityId) -> Option<&[Effect]> {
        self.lookup(id).map(|(def, variant)| match variant {
            Some(v) => v.effects.as_slice(),
            None => def.effects.as_slice(),
        })
    }
}

/// Where an id points inside the catalog.
#[derive(Clone, Copy, Debug)]
struct Slot {
    def: usize,
    variant: Option<usize>,
}

/// Catalog of ability definitions.
///
/// ## Example
///
/// ```
/// use ability_engine::abilities::{AbilityCatalog, AbilityDef, AbilityLookup, AbilityType};
/// use ability_engine::conditions::Condition;
///
/// let mut catalog = AbilityCatalog::new();
/// catalog
///     .insert(
///         AbilityDef::new("meditation", "Meditation", AbilityType::Defensive)
///             .with_trigger(Condition::Always),
///     )
///     .unwrap();
///
/// let found = catalog.ability(&"meditation".into()).unwrap();
/// assert_eq!(found.name, "Meditation");
/// ```
#[derive(Clone, Debug, Default)]
pub struct AbilityCatalog {
    defs: Vec<AbilityDef>,
    index: FxHashMap<AbilityId, Slot>,
}

impl AbilityCatalog {
    /// Create a new empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a catalog from definitions, stopping at the first bad one.
    pub fn from_defs(defs: impl IntoIterator<Item = AbilityDef>) -> Result<Self, CatalogError> {
        let mut catalog = Self::new();
        for def in defs {
            catalog.insert(def)?;
        }
        Ok(catalog)
    }

    /// Add a definition.
    ///
    /// Fails if the base id or any variant id is already taken (including
    /// twice within `def`), or if `def` has both a flat trigger and
    /// variants. On failure the catalog is unchanged.
    pub fn insert(&mut self, def: AbilityDef) -> Result<(), CatalogError> {
        if def.trigger.is_some() && def.has_variants() {
            return Err(CatalogError::AmbiguousTrigger(def.id));
        }

        let mut seen: Vec<&AbilityId> = Vec::with_capacity(def.variants.len() + 1);
        for id in def.ids() {
            if self.index.contains_key(id) || seen.contains(&id) {
                return Err(CatalogError::DuplicateId(id.clone()));
            }
            seen.push(id);
        }

        let position = self.defs.len();
        self.index.insert(
            def.id.clone(),
            Slot {
                def: position,
                variant: None,
            },
        );
        for (i, variant) in def.variants.iter().enumerate() {
            self.index.insert(
                variant.id.clone(),
                Slot {
                    def: position,
                    variant: Some(i),
                },
            );
        }
        self.defs.push(def);
        Ok(())
    }

    /// Check if a base or variant id is known.
    #[must_use]
    pub fn contains(&self, id: &AbilityId) -> bool {
        self.index.contains_key(id)
    }

    /// Base id of the ability that owns `id`.
    #[must_use]
    pub fn base_id(&self, id: &AbilityId) -> Option<&AbilityId> {
        self.index.get(id).map(|slot| &self.defs[slot.def].id)
    }

    /// Get the number of abilities (variants not counted).
    #[must_use]
    pub fn len(&self) -> usize {
        self.defs.len()
    }

    /// Check if the catalog is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.defs.is_empty()
    }

    /// Iterate over definitions in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &AbilityDef> {
        self.defs.iter()
    }

    /// Find abilities matching a predicate.
    pub fn find<F>(&self, predicate: F) -> impl Iterator<Item = &AbilityDef>
    where
        F: Fn(&AbilityDef) -> bool,
    {
        self.defs.iter().filter(move |d| predicate(d))
    }
}

impl AbilityLookup for AbilityCatalog {
    fn lookup(&self, id: &AbilityId) -> Option<(&AbilityDef, Option<&AbilityVariant>)> {
        let slot = self.index.get(id)?;
        let def = &self.defs[slot.def];
        Some((def, slot.variant.map(|i| &def.variants[i])))
    }
}
