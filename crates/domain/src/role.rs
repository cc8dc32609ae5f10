//! Participant roles.
//!
//! Roles are held per connection and never persisted in the document.

use serde::{Deserialize, Serialize};

/// Role of a connected participant.
///
/// Unrecognized tags are kept verbatim in [`Role::Other`] and treated as
/// restricted everywhere, since all gating checks for [`Role::Dm`] only.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Role {
    /// Dungeon Master - full read/write access to the document
    Dm,
    /// Player - sees player characters and revealed monsters only
    #[default]
    Player,
    /// Any other tag a client registered with
    Other(String),
}

impl Role {
    /// Check if this role is DM
    pub fn is_dm(&self) -> bool {
        matches!(self, Role::Dm)
    }

    /// Check if this role only sees the restricted projection
    pub fn is_restricted(&self) -> bool {
        !self.is_dm()
    }

    pub fn as_str(&self) -> &str {
        match self {
            Role::Dm => "dm",
            Role::Player => "player",
            Role::Other(tag) => tag,
        }
    }
}

impl From<String> for Role {
    fn from(value: String) -> Self {
        match value.as_str() {
            "dm" => Role::Dm,
            "player" => Role::Player,
            _ => Role::Other(value),
        }
    }
}

impl From<&str> for Role {
    fn from(value: &str) -> Self {
        Role::from(value.to_string())
    }
}

impl From<Role> for String {
    fn from(value: Role) -> Self {
        match value {
            Role::Other(tag) => tag,
            known => known.as_str().to_string(),
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
