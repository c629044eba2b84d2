//! Typed payloads for game-specific conditions and custom actions.
//!
//! The engine's closed vocabulary cannot know what a `diceSet` condition or a
//! `"steal-cp"` custom action needs. Those carry a `Params` map instead, and
//! the game's registered evaluator (or its `GameContext`) reads it.
//!
//! ## ParamValue Types
//!
//! - `Int`: Numbers (dice count, amounts)
//! - `Bool`: Flags
//! - `Text`: Strings (phase ids, face names)
//! - `IntList`: Number lists (exact dice values)
//! - `TextList`: String lists (tags)
//! - `Counts`: Named counters (face -> required count)

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Value carried in a parameter payload.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
    /// Boolean flag.
    Bool(bool),
    /// Integer value.
    Int(i64),
    /// Text value.
    Text(String),
    /// List of integers.
    IntList(Vec<i64>),
    /// List of strings.
    TextList(Vec<String>),
    /// Named counters, e.g. `{"fist": 3, "palm": 1}`.
    Counts(BTreeMap<String, u32>),
}

impl ParamValue {
    /// Get as integer if this is an Int value.
    #[must_use]
    pub fn as_int(&self) -> Option<i64> {
        match self {
            ParamValue::Int(v) => Some(*v),
            _ => None,
        }
    }

    /// Get as bool if this is a Bool value.
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            ParamValue::Bool(v) => Some(*v),
            _ => None,
        }
    }

    /// Get as string reference if this is a Text value.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            ParamValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Get as int list reference if this is an IntList value.
    #[must_use]
    pub fn as_int_list(&self) -> Option<&[i64]> {
        match self {
            ParamValue::IntList(v) => Some(v),
            _ => None,
        }
    }

    /// Get as text list reference if this is a TextList value.
    #[must_use]
    pub fn as_text_list(&self) -> Option<&[String]> {
        match self {
            ParamValue::TextList(v) => Some(v),
            _ => None,
        }
    }

    /// Get as counter map if this is a Counts value.
    #[must_use]
    pub fn as_counts(&self) -> Option<&BTreeMap<String, u32>> {
        match self {
            ParamValue::Counts(v) => Some(v),
            _ => None,
        }
    }
}

impl From<i64> for ParamValue {
    fn from(v: i64) -> Self {
        ParamValue::Int(v)
    }
}

impl From<i32> for ParamValue {
    fn from(v: i32) -> Self {
        ParamValue::Int(i64::from(v))
    }
}

impl From<bool> for ParamValue {
    fn from(v: bool) -> Self {
        ParamValue::Bool(v)
    }
}

impl From<String> for ParamValue {
    fn from(v: String) -> Self {
        ParamValue::Text(v)
    }
}

impl From<&str> for ParamValue {
    fn from(v: &str) -> Self {
        ParamValue::Text(v.to_string())
    }
}

impl From<Vec<i64>> for ParamValue {
    fn from(v: Vec<i64>) -> Self {
        ParamValue::IntList(v)
    }
}

impl From<Vec<String>> for ParamValue {
    fn from(v: Vec<String>) -> Self {
        ParamValue::TextList(v)
    }
}

impl From<BTreeMap<String, u32>> for ParamValue {
    fn from(v: BTreeMap<String, u32>) -> Self {
        ParamValue::Counts(v)
    }
}

/// Parameter payload, ordered by key so serialized catalogs are stable.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Params(BTreeMap<String, ParamValue>);

impl Params {
    /// Create an empty payload.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a parameter (builder pattern).
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<ParamValue>) -> Self {
        self.0.insert(key.into(), value.into());
        self
    }

    /// Insert or overwrite a parameter.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<ParamValue>) {
        self.0.insert(key.into(), value.into());
    }

    /// Get a parameter.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&ParamValue> {
        self.0.get(key)
    }

    /// Get an integer parameter with a default value.
    #[must_use]
    pub fn get_int(&self, key: &str, default: i64) -> i64 {
        self.get(key).and_then(ParamValue::as_int).unwrap_or(default)
    }

    /// Get a text parameter.
    #[must_use]
    pub fn get_text(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(ParamValue::as_text)
    }

    /// Get a counter-map parameter.
    #[must_use]
    pub fn get_counts(&self, key: &str) -> Option<&BTreeMap<String, u32>> {
        self.get(key).and_then(ParamValue::as_counts)
    }

    /// Check if the payload is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate parameters in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &ParamValue)> {
        self.0.iter()
    }
}
