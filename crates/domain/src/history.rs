//! Per-page undo/redo history.
//!
//! Each page keeps two bounded stacks of scoped snapshots. Undo and redo are
//! symmetric: before applying an entry, the current scoped state is pushed on
//! the opposite stack so the step can itself be reversed.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::character::Character;
use crate::combat::CombatState;
use crate::error::DomainError;
use crate::game_state::GameState;
use crate::page::{Page, MAX_HISTORY};
use crate::role::Role;
use crate::snapshot::{self, ScopedCharacter};

/// One restorable point in a page's history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    pub characters: Vec<ScopedCharacter>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub combat_state: Option<CombatState>,
    #[serde(default)]
    pub description: String,
    /// Milliseconds since the Unix epoch.
    #[serde(default)]
    pub timestamp: i64,
}

impl HistoryEntry {
    /// Capture the current scoped state of `page`.
    pub fn capture(
        page: Page,
        characters: &[Character],
        combat: &CombatState,
        description: impl Into<String>,
        timestamp: i64,
    ) -> Self {
        Self {
            characters: snapshot::extract(page, characters),
            combat_state: snapshot::extract_combat(page, combat),
            description: description.into(),
            timestamp,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HistoryDirection {
    Undo,
    Redo,
}

impl std::fmt::Display for HistoryDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HistoryDirection::Undo => f.write_str("undo"),
            HistoryDirection::Redo => f.write_str("redo"),
        }
    }
}

/// One bounded stack per page. Oldest entries sit at the front.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageStacks {
    pub combat: VecDeque<HistoryEntry>,
    pub spells: VecDeque<HistoryEntry>,
    pub monsters: VecDeque<HistoryEntry>,
    pub inventory: VecDeque<HistoryEntry>,
}

impl PageStacks {
    pub fn get(&self, page: Page) -> &VecDeque<HistoryEntry> {
        match page {
            Page::Combat => &self.combat,
            Page::Spells => &self.spells,
            Page::Monsters => &self.monsters,
            Page::Inventory => &self.inventory,
        }
    }

    pub fn get_mut(&mut self, page: Page) -> &mut VecDeque<HistoryEntry> {
        match page {
            Page::Combat => &mut self.combat,
            Page::Spells => &mut self.spells,
            Page::Monsters => &mut self.monsters,
            Page::Inventory => &mut self.inventory,
        }
    }

    /// Push onto the top of a page's stack, evicting the oldest on overflow.
    pub fn push(&mut self, page: Page, entry: HistoryEntry) {
        let stack = self.get_mut(page);
        stack.push_back(entry);
        while stack.len() > MAX_HISTORY {
            stack.pop_front();
        }
    }

    pub fn pop(&mut self, page: Page) -> Option<HistoryEntry> {
        self.get_mut(page).pop_back()
    }

    pub fn peek(&self, page: Page) -> Option<&HistoryEntry> {
        self.get(page).back()
    }

    pub fn clear(&mut self, page: Page) {
        self.get_mut(page).clear();
    }

    pub fn len(&self, page: Page) -> usize {
        self.get(page).len()
    }

    pub fn is_empty(&self, page: Page) -> bool {
        self.get(page).is_empty()
    }

    pub fn entries_mut(&mut self) -> impl Iterator<Item = &mut HistoryEntry> {
        self.combat
            .iter_mut()
            .chain(self.spells.iter_mut())
            .chain(self.monsters.iter_mut())
            .chain(self.inventory.iter_mut())
    }
}

/// Result of a successful undo or redo.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryApplied {
    pub page: Page,
    pub direction: HistoryDirection,
    pub description: String,
}

impl GameState {
    /// Record the current scoped state of `page` as a new undo point.
    ///
    /// A fresh action invalidates the page's redo timeline.
    pub fn record_entry(
        &mut self,
        page: Page,
        role: &Role,
        description: impl Into<String>,
        timestamp: i64,
    ) -> Result<(), DomainError> {
        if page.is_dm_only() && !role.is_dm() {
            return Err(DomainError::permission_denied("record monster history"));
        }
        let entry = HistoryEntry::capture(
            page,
            &self.characters,
            &self.combat_state,
            description,
            timestamp,
        );
        self.history.push(page, entry);
        self.redo.clear(page);
        Ok(())
    }

    pub fn undo(
        &mut self,
        page: Page,
        role: &Role,
        timestamp: i64,
    ) -> Result<HistoryApplied, DomainError> {
        self.step(page, role, HistoryDirection::Undo, timestamp)
    }

    pub fn redo(
        &mut self,
        page: Page,
        role: &Role,
        timestamp: i64,
    ) -> Result<HistoryApplied, DomainError> {
        self.step(page, role, HistoryDirection::Redo, timestamp)
    }

    fn step(
        &mut self,
        page: Page,
        role: &Role,
        direction: HistoryDirection,
        timestamp: i64,
    ) -> Result<HistoryApplied, DomainError> {
        if page.is_dm_only() && !role.is_dm() {
            return Err(DomainError::permission_denied("replay monster history"));
        }

        let (source, target) = match direction {
            HistoryDirection::Undo => (&mut self.history, &mut self.redo),
            HistoryDirection::Redo => (&mut self.redo, &mut self.history),
        };

        let Some(entry) = source.pop(page) else {
            return Err(DomainError::NoHistory { page, direction });
        };

        let current = HistoryEntry::capture(
            page,
            &self.characters,
            &self.combat_state,
            entry.description.clone(),
            timestamp,
        );
        target.push(page, current);

        snapshot::merge(
            page,
            &mut self.characters,
            &mut self.combat_state,
            &entry.characters,
            entry.combat_state.as_ref(),
        );

        Ok(HistoryApplied {
            page,
            direction,
            description: entry.description,
        })
    }
}
