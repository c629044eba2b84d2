//! Dice-game condition vocabulary.
//!
//! Evaluators for the kinds dice-driven games share: face combinations,
//! straights and phase checks. None of them are available until a game calls
//! [`register_dice_conditions`]; a card game without dice never sees them.
//!
//! ## Kinds
//!
//! | kind            | params                                  | satisfied when                          |
//! |-----------------|-----------------------------------------|-----------------------------------------|
//! | `diceSet`       | `faces: {face: count}`                  | every face shows at least `count` times |
//! | `smallStraight` | none                                    | 4 consecutive values are present        |
//! | `largeStraight` | none                                    | 5 consecutive values are present        |
//! | `phase`         | `phaseId: text`, `diceCount: int` (opt) | phase matches (and dice count matches)  |

use std::collections::BTreeMap;

use crate::core::{Params, RegistryError};

use super::condition::Condition;
use super::context::ConditionContext;
use super::registry::ConditionRegistry;

/// Kind name for face-combination conditions.
pub const DICE_SET: &str = "diceSet";
/// Kind name for four-in-a-row straights.
pub const SMALL_STRAIGHT: &str = "smallStraight";
/// Kind name for five-in-a-row straights.
pub const LARGE_STRAIGHT: &str = "largeStraight";
/// Kind name for phase checks.
pub const PHASE: &str = "phase";

/// Install the dice vocabulary into a registry.
///
/// Fails without touching the registry if any of the kinds is already taken.
pub fn register_dice_conditions(registry: &mut ConditionRegistry) -> Result<(), RegistryError> {
    for kind in [DICE_SET, SMALL_STRAIGHT, LARGE_STRAIGHT, PHASE] {
        if registry.contains(kind) {
            return Err(RegistryError::Duplicate(kind.to_string()));
        }
    }

    registry.register(DICE_SET, dice_set_satisfied)?;
    registry.register(SMALL_STRAIGHT, |_, ctx| longest_run(&ctx.dice) >= 4)?;
    registry.register(LARGE_STRAIGHT, |_, ctx| longest_run(&ctx.dice) >= 5)?;
    registry.register(PHASE, phase_satisfied)?;
    Ok(())
}

/// Build a `diceSet` condition from `(face, count)` pairs.
pub fn dice_set<'a>(faces: impl IntoIterator<Item = (&'a str, u32)>) -> Condition {
    let faces: BTreeMap<String, u32> = faces
        .into_iter()
        .map(|(face, count)| (face.to_string(), count))
        .collect();
    Condition::custom(DICE_SET, Params::new().with("faces", faces))
}

/// Build a `smallStraight` condition.
pub fn small_straight() -> Condition {
    Condition::custom(SMALL_STRAIGHT, Params::new())
}

/// Build a `largeStraight` condition.
pub fn large_straight() -> Condition {
    Condition::custom(LARGE_STRAIGHT, Params::new())
}

/// Build a `phase` condition, optionally requiring an exact dice count.
pub fn phase(phase_id: &str, dice_count: Option<u32>) -> Condition {
    let mut params = Params::new().with("phaseId", phase_id);
    if let Some(count) = dice_count {
        params.insert("diceCount", i64::from(count));
    }
    Condition::custom(PHASE, params)
}

fn dice_set_satisfied(params: &Params, ctx: &ConditionContext) -> bool {
    match params.get_counts("faces") {
        Some(faces) => faces
            .iter()
            .all(|(face, required)| ctx.face_count(face) >= *required),
        None => false,
    }
}

fn phase_satisfied(params: &Params, ctx: &ConditionContext) -> bool {
    let Some(expected) = params.get_text("phaseId") else {
        return false;
    };
    if ctx.phase.as_deref() != Some(expected) {
        return false;
    }
    match params.get("diceCount").and_then(|v| v.as_int()) {
        Some(count) => ctx.dice_count() as i64 == count,
        None => true,
    }
}

/// Length of the longest run of consecutive distinct values.
fn longest_run(dice: &[u8]) -> usize {
    let mut values = dice.to_vec();
    values.sort_unstable();
    values.dedup();

    let mut best = 0;
    let mut current = 0;
    let mut previous: Option<u8> = None;
    for value in values {
        current = match previous {
            Some(p) if p.checked_add(1) == Some(value) => current + 1,
            _ => 1,
        };
        best = best.max(current);
        previous = Some(value);
    }
    best
}
