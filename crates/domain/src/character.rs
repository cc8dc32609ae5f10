//! Characters tracked by the shared document.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::role::Role;

/// Stable character identifier, unique within the document.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CharacterId(String);

impl CharacterId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for CharacterId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for CharacterId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// The `type` discriminator of a character.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum CharacterKind {
    Player,
    Monster,
    /// Any other discriminator; kept verbatim and never shown to players
    Other(String),
}

impl CharacterKind {
    pub fn as_str(&self) -> &str {
        match self {
            CharacterKind::Player => "player",
            CharacterKind::Monster => "monster",
            CharacterKind::Other(tag) => tag,
        }
    }
}

impl From<String> for CharacterKind {
    fn from(value: String) -> Self {
        match value.as_str() {
            "player" => CharacterKind::Player,
            "monster" => CharacterKind::Monster,
            _ => CharacterKind::Other(value),
        }
    }
}

impl From<CharacterKind> for String {
    fn from(value: CharacterKind) -> Self {
        match value {
            CharacterKind::Other(tag) => tag,
            known => known.as_str().to_string(),
        }
    }
}

fn is_false(value: &bool) -> bool {
    !*value
}

/// A character record.
///
/// Only identity and the reveal flag are typed. Everything else (name,
/// page-owned fields, client-specific extras) lives in `fields` so that a
/// page can copy exactly the fields it owns and leave the rest untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Character {
    pub id: CharacterId,
    #[serde(rename = "type")]
    pub kind: CharacterKind,
    /// Gates visibility of a monster to players on every page.
    #[serde(default, skip_serializing_if = "is_false")]
    pub revealed_to_players: bool,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl Character {
    pub fn new(id: impl Into<String>, kind: CharacterKind) -> Self {
        Self {
            id: CharacterId::new(id),
            kind,
            revealed_to_players: false,
            fields: Map::new(),
        }
    }

    pub fn player(id: impl Into<String>) -> Self {
        Self::new(id, CharacterKind::Player)
    }

    pub fn monster(id: impl Into<String>) -> Self {
        Self::new(id, CharacterKind::Monster)
    }

    pub fn with_field(mut self, name: &str, value: Value) -> Self {
        self.fields.insert(name.to_string(), value);
        self
    }

    pub fn revealed(mut self, revealed: bool) -> Self {
        self.revealed_to_players = revealed;
        self
    }

    pub fn field(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    pub fn is_monster(&self) -> bool {
        matches!(self.kind, CharacterKind::Monster)
    }

    /// Player characters and revealed monsters are visible to players.
    pub fn is_visible_to_players(&self) -> bool {
        match self.kind {
            CharacterKind::Player => true,
            CharacterKind::Monster => self.revealed_to_players,
            CharacterKind::Other(_) => false,
        }
    }

    pub fn is_visible_to(&self, role: &Role) -> bool {
        role.is_dm() || self.is_visible_to_players()
    }
}
