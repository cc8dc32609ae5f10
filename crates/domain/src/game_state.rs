//! The canonical game document and its update-merge policy.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::character::{Character, CharacterId, CharacterKind};
use crate::combat::CombatState;
use crate::error::DomainError;
use crate::history::PageStacks;
use crate::role::Role;

/// The single shared document.
///
/// Character order is significant: it encodes initiative / turn order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GameState {
    pub characters: Vec<Character>,
    pub combat_state: CombatState,
    /// Monster templates; reference data, not per-encounter.
    pub monster_database: Vec<Value>,
    pub history: PageStacks,
    pub redo: PageStacks,
}

/// Partial document sent with `update-state`. Absent parts are not applied.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StateUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub characters: Option<Vec<Character>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub combat_state: Option<CombatState>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub monster_database: Option<Vec<Value>>,
}

impl GameState {
    pub fn character(&self, id: &CharacterId) -> Option<&Character> {
        self.characters.iter().find(|c| &c.id == id)
    }

    fn position(&self, id: &CharacterId) -> Option<usize> {
        self.characters.iter().position(|c| &c.id == id)
    }

    /// Apply a partial `update-state` from a participant with `role`.
    ///
    /// The DM replaces every supplied part wholesale. Players may only
    /// overwrite characters they can see (and must leave them visible), may
    /// add new player characters, and may replace the combat state. Entries a
    /// player is not allowed to write are skipped one by one.
    pub fn apply_update(&mut self, role: &Role, update: StateUpdate) {
        if role.is_dm() {
            if let Some(characters) = update.characters {
                self.characters = dedupe_by_id(characters);
            }
            if let Some(combat_state) = update.combat_state {
                self.combat_state = combat_state;
            }
            if let Some(monster_database) = update.monster_database {
                self.monster_database = monster_database;
            }
            return;
        }

        if let Some(characters) = update.characters {
            for incoming in characters {
                self.merge_player_character(incoming);
            }
        }
        if let Some(combat_state) = update.combat_state {
            self.combat_state = combat_state;
        }
        if update.monster_database.is_some() {
            tracing::debug!(%role, "Ignoring monster database from restricted participant");
        }
    }

    fn merge_player_character(&mut self, incoming: Character) {
        match self.position(&incoming.id) {
            Some(index) => {
                if self.characters[index].is_visible_to_players()
                    && incoming.is_visible_to_players()
                {
                    self.characters[index] = incoming;
                } else {
                    tracing::debug!(character_id = %incoming.id, "Skipping character a player may not write");
                }
            }
            None if incoming.kind == CharacterKind::Player => {
                self.characters.push(incoming);
            }
            None => {
                tracing::debug!(character_id = %incoming.id, "Skipping unknown non-player character from player");
            }
        }
    }

    /// Replace a single character by id.
    ///
    /// Restricted participants may only replace characters they can see and
    /// may not hide them in the process.
    pub fn update_character(
        &mut self,
        role: &Role,
        character: Character,
    ) -> Result<(), DomainError> {
        let Some(index) = self.position(&character.id) else {
            return Err(DomainError::CharacterNotFound(character.id));
        };
        if role.is_restricted()
            && !(self.characters[index].is_visible_to_players()
                && character.is_visible_to_players())
        {
            return Err(DomainError::permission_denied("update hidden character"));
        }
        self.characters[index] = character;
        Ok(())
    }

    pub fn update_combat(&mut self, combat_state: CombatState) {
        self.combat_state = combat_state;
    }
}

fn dedupe_by_id(characters: Vec<Character>) -> Vec<Character> {
    let mut seen = HashSet::new();
    characters
        .into_iter()
        .filter(|c| {
            let fresh = seen.insert(c.id.clone());
            if !fresh {
                tracing::warn!(character_id = %c.id, "Dropping duplicate character id");
            }
            fresh
        })
        .collect()
}
