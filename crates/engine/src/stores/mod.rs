//! In-memory state storage modules.
//!
//! - `GameStore` - the canonical document, single writer
//! - `RoleRegistry` - connection roles, never persisted

pub mod game_store;
pub mod roles;

pub use game_store::GameStore;
pub use roles::RoleRegistry;
