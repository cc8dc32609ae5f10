//! Editing pages and the field ownership schema.
//!
//! Every page owns a disjoint set of character fields and keeps its own
//! undo/redo history. Extraction and merge both consult [`Page::owned_fields`],
//! so this table is the only place page boundaries are defined.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// Maximum number of entries kept on each history or redo stack.
pub const MAX_HISTORY: usize = 20;

const COMBAT_FIELDS: &[&str] = &[
    "currentHp",
    "maxHp",
    "tempHp",
    "initiative",
    "statusEffects",
    "deathSaves",
    "concentration",
    "resources",
];

const SPELLS_FIELDS: &[&str] = &["spellSlots", "abilities", "hitDice"];

const MONSTERS_FIELDS: &[&str] = &["monsterAbilities"];

const INVENTORY_FIELDS: &[&str] = &["inventory"];

/// One of the independent editing contexts of the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Page {
    Combat,
    Spells,
    Monsters,
    Inventory,
}

impl Page {
    pub const ALL: [Page; 4] = [Page::Combat, Page::Spells, Page::Monsters, Page::Inventory];

    /// Character fields owned by this page, in schema order.
    pub fn owned_fields(self) -> &'static [&'static str] {
        match self {
            Page::Combat => COMBAT_FIELDS,
            Page::Spells => SPELLS_FIELDS,
            Page::Monsters => MONSTERS_FIELDS,
            Page::Inventory => INVENTORY_FIELDS,
        }
    }

    pub fn owns(self, field: &str) -> bool {
        self.owned_fields().contains(&field)
    }

    /// Whether this page also snapshots the combat state and the
    /// character list itself (additions, removals, order).
    pub fn owns_roster(self) -> bool {
        matches!(self, Page::Combat)
    }

    /// Whether only the DM may write history for this page.
    pub fn is_dm_only(self) -> bool {
        matches!(self, Page::Monsters)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Page::Combat => "combat",
            Page::Spells => "spells",
            Page::Monsters => "monsters",
            Page::Inventory => "inventory",
        }
    }
}

impl FromStr for Page {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "combat" => Ok(Page::Combat),
            "spells" => Ok(Page::Spells),
            "monsters" => Ok(Page::Monsters),
            "inventory" => Ok(Page::Inventory),
            other => Err(DomainError::UnknownPage(other.to_string())),
        }
    }
}

impl std::fmt::Display for Page {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
