//! Status effects (buffs and debuffs).
//!
//! A status is an integer stack count per `(entity, status)`, capped by the
//! definition's stack limit. All mutation goes through [`StatusManager`] so
//! the cap holds everywhere.

mod definition;
mod manager;

pub use definition::{RemovalCost, StatusEffectDef, StatusKind, StatusTiming};
pub use manager::StatusManager;
