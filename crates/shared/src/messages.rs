//! WebSocket message types for engine-client communication
//!
//! Frames are JSON text, internally tagged with `"type"` in kebab-case and
//! camelCase payload fields.
//!
//! ## Versioning Policy
//!
//! - New variants can be added at the end (forward compatible)
//! - Renaming variants is a breaking change
//! - Unknown client message types deserialize to `Unknown` and are ignored

use serde::{Deserialize, Serialize};

use skirmish_domain::{
    Character, CombatState, GameState, HistoryDirection, Page, Role, StateUpdate,
};

// =============================================================================
// Client Messages (Client → Engine)
// =============================================================================

/// Messages from a table client to the engine
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case", rename_all_fields = "camelCase")]
pub enum ClientMessage {
    /// Register this connection as `dm`, `player` or any other tag
    RegisterMode { role: Role },
    /// Partial document update
    UpdateState {
        #[serde(flatten)]
        update: StateUpdate,
    },
    /// Replace one character by id
    UpdateCharacter { character: Character },
    /// Replace the combat tracker state
    UpdateCombat { combat_state: CombatState },
    /// Record an undo point for a page
    SaveHistoryEntry {
        page: String,
        #[serde(default)]
        description: String,
    },
    RequestUndo { page: String },
    RequestRedo { page: String },
    /// Keep-alive ping
    Heartbeat,
    /// Unknown message type for forward compatibility
    #[serde(other)]
    Unknown,
}

impl ClientMessage {
    /// Event name as it appears on the wire, for logging.
    pub fn kind(&self) -> &'static str {
        match self {
            ClientMessage::RegisterMode { .. } => "register-mode",
            ClientMessage::UpdateState { .. } => "update-state",
            ClientMessage::UpdateCharacter { .. } => "update-character",
            ClientMessage::UpdateCombat { .. } => "update-combat",
            ClientMessage::SaveHistoryEntry { .. } => "save-history-entry",
            ClientMessage::RequestUndo { .. } => "request-undo",
            ClientMessage::RequestRedo { .. } => "request-redo",
            ClientMessage::Heartbeat => "heartbeat",
            ClientMessage::Unknown => "unknown",
        }
    }
}

// =============================================================================
// Server Messages (Engine → Client)
// =============================================================================

/// Messages from the engine to a table client
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case", rename_all_fields = "camelCase")]
pub enum ServerMessage {
    /// Full document, already projected for the recipient's role
    StateSync { state: GameState },
    CharacterUpdated { character: Character },
    CombatUpdated { combat_state: CombatState },
    /// An undo or redo was applied to a page
    HistoryApplied {
        page: Page,
        description: String,
        direction: HistoryDirection,
        characters: Vec<Character>,
        combat_state: CombatState,
        /// Entries left on the page's undo stack
        undo_depth: usize,
        /// Entries left on the page's redo stack
        redo_depth: usize,
    },
    /// Sent only to the participant whose undo/redo could not be applied
    HistoryError { message: String },
    Pong,
}
