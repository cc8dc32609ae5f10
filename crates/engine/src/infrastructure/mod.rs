//! Infrastructure implementations.
//!
//! Contains port trait implementations for external dependencies.

pub mod autosave;
pub mod clock;
pub mod persistence;
pub mod ports;
