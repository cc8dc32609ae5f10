//! Unified error types for the domain layer
//!
//! Permission and unknown-page errors are meant to be swallowed by the caller
//! (logged, never surfaced to clients). Only [`DomainError::NoHistory`] is
//! reported back to the requesting participant.

use thiserror::Error;

use crate::character::CharacterId;
use crate::history::HistoryDirection;
use crate::page::Page;

/// Unified error type for domain operations
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A restricted participant attempted a DM-only or out-of-scope mutation
    #[error("Permission denied: {action}")]
    PermissionDenied { action: &'static str },

    /// Page identifier not present in the ownership schema
    #[error("Unknown page: {0}")]
    UnknownPage(String),

    /// Character id not present in the document
    #[error("Character not found: {0}")]
    CharacterNotFound(CharacterId),

    /// Undo or redo requested on an empty stack
    #[error("Nothing to {direction} on the {page} page")]
    NoHistory {
        page: Page,
        direction: HistoryDirection,
    },
}

impl DomainError {
    pub fn permission_denied(action: &'static str) -> Self {
        Self::PermissionDenied { action }
    }

    /// Whether this error is reported to the requester rather than dropped.
    pub fn is_reportable(&self) -> bool {
        matches!(self, Self::NoHistory { .. })
    }
}
