//! Skirmish domain: the shared combat-tracking document.
//!
//! Pure, synchronous rules with no I/O:
//!
//! - `character` / `combat` - the document's records
//! - `page` - editing pages and the field ownership schema
//! - `snapshot` - page-scoped extraction and merge
//! - `history` - per-page bounded undo/redo state machine
//! - `game_state` - the canonical document and update-merge policy
//! - `projection` - role-based view filtering
//! - `role` - participant roles

pub mod character;
pub mod combat;
pub mod error;
pub mod game_state;
pub mod history;
pub mod page;
pub mod projection;
pub mod role;
pub mod snapshot;

pub use character::{Character, CharacterId, CharacterKind};
pub use combat::CombatState;
pub use error::DomainError;
pub use game_state::{GameState, StateUpdate};
pub use history::{HistoryApplied, HistoryDirection, HistoryEntry, PageStacks};
pub use page::{Page, MAX_HISTORY};
pub use projection::{project, project_character, project_characters, project_combat};
pub use role::Role;
pub use snapshot::ScopedCharacter;
