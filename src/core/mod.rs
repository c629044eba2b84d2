//! Core engine types: identifiers, parameter payloads, configuration, errors.
//!
//! This module contains the game-agnostic building blocks shared by the
//! condition, ability, resolver and status modules.

pub mod config;
pub mod entity;
pub mod error;
pub mod ids;
pub mod params;

pub use config::ResolveConfig;
pub use entity::{EntityId, Target};
pub use error::{CatalogError, EngineError, RegistryError};
pub use ids::{AbilityId, StatusId};
pub use params::{ParamValue, Params};
