//! Skirmish Protocol - Shared types for engine and client communication
//!
//! # Design Principles
//!
//! 1. **No business logic** - Pure data types and serialization
//! 2. **Permissive input** - absent optional fields are simply not applied,
//!    unknown message types deserialize to `Unknown`
//! 3. **Pages as strings** - an unknown page identifier still parses, so the
//!    engine can ignore it instead of rejecting the whole frame

pub mod messages;

pub use messages::{ClientMessage, ServerMessage};
