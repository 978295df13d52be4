use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// An authenticated user and the abilities granted to them
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Principal {
    /// Identifier shown in logs
    pub id: String,
    /// Granted ability names (e.g. "view-users", "edit-settings")
    #[serde(default)]
    pub abilities: BTreeSet<String>,
}

impl Principal {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            abilities: BTreeSet::new(),
        }
    }

    /// Grant an ability
    pub fn with_ability(mut self, ability: impl Into<String>) -> Self {
        self.abilities.insert(ability.into());
        self
    }

    /// Whether this principal holds `ability` (exact match)
    pub fn has_ability(&self, ability: &str) -> bool {
        self.abilities.contains(ability)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_principal_abilities() {
        let admin = Principal::new("admin")
            .with_ability("view-users")
            .with_ability("edit-users");

        assert!(admin.has_ability("view-users"));
        assert!(admin.has_ability("edit-users"));
        assert!(!admin.has_ability("delete-users"));
        assert!(!admin.has_ability("view"));
    }

    #[test]
    fn test_principal_deserializes_without_abilities() {
        let principal: Principal = serde_json::from_str(r#"{"id":"guest-like"}"#).unwrap();
        assert_eq!(principal.id, "guest-like");
        assert!(principal.abilities.is_empty());
    }
}
