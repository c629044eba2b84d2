//! String-keyed catalog identifiers.
//!
//! Abilities and statuses are authored as data (usually JSON) and referenced
//! by readable ids such as `"fist-technique"` or `"burn"`. These newtypes keep
//! the two namespaces from being mixed up while serializing as plain strings.

use serde::{Deserialize, Serialize};

/// Identifier of an ability or of one of its variants.
///
/// Variant ids share the namespace with base ability ids: the availability
/// query reports whichever one is fireable.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AbilityId(pub String);

impl AbilityId {
    /// Create a new ability ID.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrow the id as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for AbilityId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for AbilityId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl std::fmt::Display for AbilityId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identifier of a status effect definition (buff or debuff).
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StatusId(pub String);

impl StatusId {
    /// Create a new status ID.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrow the id as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for StatusId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for StatusId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl std::fmt::Display for StatusId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ability_id_from() {
        let a: AbilityId = "fist-technique".into();
        let b = AbilityId::new(String::from("fist-technique"));
        assert_eq!(a, b);
        assert_eq!(a.as_str(), "fist-technique");
        assert_eq!(format!("{}", a), "fist-technique");
    }

    #[test]
    fn test_ids_serialize_as_strings() {
        let status = StatusId::new("burn");
        assert_eq!(serde_json::to_string(&status).unwrap(), "\"burn\"");

        let ability: AbilityId = serde_json::from_str("\"meditation\"").unwrap();
        assert_eq!(ability, AbilityId::new("meditation"));
    }
}
