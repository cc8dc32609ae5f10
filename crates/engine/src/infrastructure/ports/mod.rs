//! Port traits for infrastructure boundaries.
//!
//! These are the ONLY abstractions in the engine. Everything else is concrete types.
//! Ports exist for:
//! - Document persistence (could swap JSON file -> database)
//! - Clock (for testing)

mod error;
mod external;
mod testing;

pub use error::PersistenceError;
pub use external::PersistencePort;
pub use testing::{history_timestamp, ClockPort};

// =============================================================================
// Test-Only Mocks (only available during test builds)
// =============================================================================
#[cfg(test)]
pub use external::MockPersistencePort;

#[cfg(test)]
pub use testing::MockClockPort;
