//! Two-combatant dice duel for exercising the engine.
//!
//! A minimal game built the way a real game layer would use the engine:
//! - Each combatant starts with the same health and the monk's abilities
//! - Dice faces: 1-2 fist, 3-4 palm, 5 taiji, 6 lotus
//! - `DuelState` implements `GameContext`: health, damage shields, statuses,
//!   CP, tokens, card draws and ability upgrades
//! - `steal-cp` is the one custom action it handles

mod catalog;
mod state;

pub use catalog::{
    calm_water, face_of, fist_technique, fist_technique_ii, lotus_palm, meditation, monk_abilities,
    monk_statuses, training, zen_strike,
};
pub use state::{Combatant, CustomActionRecord, DuelState, STEAL_CP};
