//! Status stack bookkeeping.
//!
//! Stacks live in a persistent `OrdMap` keyed by `(entity, status)`, so a
//! manager clones in O(1) when a game snapshots its state and iterates in a
//! stable order. Entries that reach zero are removed, never stored.

use std::sync::Arc;

use im::OrdMap;
use rustc_hash::FxHashMap;
use tracing::{debug, warn};

use crate::core::{EntityId, StatusId};

use super::definition::{RemovalCost, StatusEffectDef, StatusTiming};

/// Owner of every status stack in a match.
///
/// Definitions are shared between clones; registering one after cloning
/// copies the definition table for that clone only.
///
/// ## Example
///
/// ```
/// use ability_engine::core::{EntityId, StatusId};
/// use ability_engine::status::{StatusEffectDef, StatusKind, StatusManager};
///
/// let mut statuses = StatusManager::new()
///     .with_def(StatusEffectDef::new("burn", "Burn", StatusKind::Debuff, 3));
///
/// let hero = EntityId::new(0);
/// let burn = StatusId::new("burn");
///
/// assert_eq!(statuses.grant(hero, &burn, 2), 2);
/// assert_eq!(statuses.grant(hero, &burn, 5), 3);
/// assert_eq!(statuses.remove(hero, &burn, Some(1)), 2);
/// assert_eq!(statuses.remove(hero, &burn, None), 0);
/// ```
#[derive(Clone, Debug, Default)]
pub struct StatusManager {
    defs: Arc<FxHashMap<StatusId, StatusEffectDef>>,
    stacks: OrdMap<(EntityId, StatusId), u32>,
}

impl StatusManager {
    /// Create a manager with no definitions.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a manager from definitions.
    pub fn from_defs(defs: impl IntoIterator<Item = StatusEffectDef>) -> Self {
        let defs = defs.into_iter().map(|def| (def.id.clone(), def)).collect();
        Self {
            defs: Arc::new(defs),
            stacks: OrdMap::new(),
        }
    }

    /// Add a definition (builder pattern).
    #[must_use]
    pub fn with_def(mut self, def: StatusEffectDef) -> Self {
        self.register(def);
        self
    }

    /// Add or replace a definition. Returns the replaced one.
    ///
    /// Existing stacks above the new limit are left alone until the next
    /// grant.
    pub fn register(&mut self, def: StatusEffectDef) -> Option<StatusEffectDef> {
        Arc::make_mut(&mut self.defs).insert(def.id.clone(), def)
    }

    /// Get a definition.
    #[must_use]
    pub fn def(&self, status: &StatusId) -> Option<&StatusEffectDef> {
        self.defs.get(status)
    }

    /// Add stacks, capped at the status's stack limit. Returns the new count.
    ///
    /// Excess stacks are discarded. Unknown statuses are refused: nothing is
    /// stored and the result is 0.
    pub fn grant(&mut self, entity: EntityId, status: &StatusId, stacks: u32) -> u32 {
        let Some(def) = self.defs.get(status) else {
            warn!(%entity, status = %status, "cannot grant unknown status");
            return 0;
        };

        let key = (entity, status.clone());
        let current = self.stacks.get(&key).copied().unwrap_or(0);
        let count = current.saturating_add(stacks).min(def.stack_limit);

        if count == 0 {
            self.stacks.remove(&key);
        } else {
            self.stacks.insert(key, count);
        }
        debug!(%entity, status = %status, stacks, count, "status granted");
        count
    }

    /// Remove stacks, or all of them when `stacks` is `None`. Returns the new
    /// count, never below zero.
    pub fn remove(&mut self, entity: EntityId, status: &StatusId, stacks: Option<u32>) -> u32 {
        let key = (entity, status.clone());
        let Some(current) = self.stacks.get(&key).copied() else {
            return 0;
        };

        let count = match stacks {
            Some(n) => current.saturating_sub(n),
            None => 0,
        };
        if count == 0 {
            self.stacks.remove(&key);
        } else {
            self.stacks.insert(key, count);
        }
        debug!(%entity, status = %status, count, "status removed");
        count
    }

    /// Remove one stack. Games call this from their turn-end handling.
    pub fn decay(&mut self, entity: EntityId, status: &StatusId) -> u32 {
        self.remove(entity, status, Some(1))
    }

    /// Current stack count.
    #[must_use]
    pub fn stacks(&self, entity: EntityId, status: &StatusId) -> u32 {
        self.stacks
            .get(&(entity, status.clone()))
            .copied()
            .unwrap_or(0)
    }

    /// Cleanse cost of a status, if it has one.
    #[must_use]
    pub fn removal_cost(&self, status: &StatusId) -> Option<&RemovalCost> {
        self.defs.get(status).and_then(|def| def.removal_cost.as_ref())
    }

    /// Check if a status can be cleansed. Unknown statuses cannot.
    #[must_use]
    pub fn is_removable(&self, status: &StatusId) -> bool {
        self.defs.get(status).is_some_and(|def| def.removable)
    }

    /// Statuses an entity holds, ordered by status id.
    #[must_use]
    pub fn statuses_of(&self, entity: EntityId) -> Vec<(StatusId, u32)> {
        self.stacks
            .range((entity, StatusId::new(String::new()))..)
            .take_while(|((holder, _), _)| *holder == entity)
            .map(|((_, status), count)| (status.clone(), *count))
            .collect()
    }

    /// Stack counts keyed by status name, the shape condition contexts use.
    #[must_use]
    pub fn snapshot(&self, entity: EntityId) -> FxHashMap<String, u32> {
        self.statuses_of(entity)
            .into_iter()
            .map(|(status, count)| (status.0, count))
            .collect()
    }

    /// Held statuses whose definition has the given timing.
    #[must_use]
    pub fn statuses_with_timing(&self, entity: EntityId, timing: StatusTiming) -> Vec<(StatusId, u32)> {
        self.statuses_of(entity)
            .into_iter()
            .filter(|(status, _)| {
                self.defs
                    .get(status)
                    .is_some_and(|def| def.timing == Some(timing))
            })
            .collect()
    }

    /// Drop every status an entity holds. Returns how many were dropped.
    pub fn clear_entity(&mut self, entity: EntityId) -> usize {
        let held = self.statuses_of(entity);
        for (status, _) in &held {
            self.stacks.remove(&(entity, status.clone()));
        }
        held.len()
    }

    /// Check if no entity holds any status.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.stacks.is_empty()
    }
}
