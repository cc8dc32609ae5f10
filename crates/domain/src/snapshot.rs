//! Page-scoped snapshots of the character list.
//!
//! A scoped snapshot keeps `id`, `type` and only the fields a page owns.
//! Merging a snapshot back writes those fields and nothing else, which lets
//! each page restore its own history over a list that other pages keep editing.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::character::{Character, CharacterId, CharacterKind};
use crate::combat::CombatState;
use crate::page::Page;

/// Partial character record restricted to one page's owned fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScopedCharacter {
    pub id: CharacterId,
    #[serde(rename = "type")]
    pub kind: CharacterKind,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl ScopedCharacter {
    /// Copy the fields `page` owns out of `character`.
    pub fn capture(page: Page, character: &Character) -> Self {
        let mut fields = Map::new();
        // The monsters page only scopes monster abilities.
        let scoped = !(page == Page::Monsters && !character.is_monster());
        if scoped {
            for name in page.owned_fields() {
                if let Some(value) = character.fields.get(*name) {
                    fields.insert((*name).to_string(), value.clone());
                }
            }
        }
        Self {
            id: character.id.clone(),
            kind: character.kind.clone(),
            fields,
        }
    }

    /// Overwrite the fields `page` owns that are present in this snapshot.
    ///
    /// Fields another page owns are skipped even if a stored snapshot carries
    /// them.
    pub fn restore_into(&self, page: Page, character: &mut Character) {
        for (name, value) in &self.fields {
            if page.owns(name) {
                character.fields.insert(name.clone(), value.clone());
            }
        }
    }

    /// Rebuild a character that no longer exists in the live list.
    fn revive(&self) -> Character {
        Character {
            id: self.id.clone(),
            kind: self.kind.clone(),
            revealed_to_players: false,
            fields: Map::new(),
        }
    }
}

/// Scoped copy of every character for `page`.
pub fn extract(page: Page, characters: &[Character]) -> Vec<ScopedCharacter> {
    characters
        .iter()
        .map(|character| ScopedCharacter::capture(page, character))
        .collect()
}

/// Combat state captured alongside a snapshot; only the combat page has one.
pub fn extract_combat(page: Page, combat: &CombatState) -> Option<CombatState> {
    page.owns_roster().then(|| combat.clone())
}

/// Merge a scoped snapshot back into the live document.
///
/// For the combat page the combat state is replaced and the character list is
/// rebuilt in snapshot order: characters missing from the live list are
/// re-inserted, characters absent from the snapshot are dropped. Other pages
/// only rewrite owned fields of characters that still exist.
pub fn merge(
    page: Page,
    characters: &mut Vec<Character>,
    combat: &mut CombatState,
    snapshot: &[ScopedCharacter],
    snapshot_combat: Option<&CombatState>,
) {
    if page.owns_roster() {
        if let Some(restored) = snapshot_combat {
            *combat = restored.clone();
        }
        reconcile_roster(page, characters, snapshot);
        return;
    }

    let by_id: HashMap<&CharacterId, &ScopedCharacter> =
        snapshot.iter().map(|scoped| (&scoped.id, scoped)).collect();
    for character in characters.iter_mut() {
        if let Some(scoped) = by_id.get(&character.id) {
            scoped.restore_into(page, character);
        }
    }
}

fn reconcile_roster(page: Page, characters: &mut Vec<Character>, snapshot: &[ScopedCharacter]) {
    let mut live: HashMap<CharacterId, Character> = characters
        .drain(..)
        .map(|character| (character.id.clone(), character))
        .collect();
    let mut seen = HashSet::new();

    for scoped in snapshot {
        if !seen.insert(scoped.id.clone()) {
            continue;
        }
        let mut character = match live.remove(&scoped.id) {
            Some(existing) => existing,
            None => {
                tracing::debug!(character_id = %scoped.id, "Re-inserting character from combat snapshot");
                scoped.revive()
            }
        };
        scoped.restore_into(page, &mut character);
        characters.push(character);
    }

    for id in live.keys() {
        tracing::debug!(character_id = %id, "Dropping character absent from combat snapshot");
    }
}
