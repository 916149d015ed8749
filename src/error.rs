//! Error types for the league simulation
//!
//! This module defines all error types using anyhow for consistent error handling
//! throughout the application.

/// Result type alias for convenience
pub type Result<T> = anyhow::Result<T>;

/// Custom error types for specific simulation scenarios
#[derive(Debug, thiserror::Error)]
pub enum SimulationError {
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error("Race requires at least 2 participants, got {found}")]
    InsufficientParticipants { found: usize },

    #[error("Precondition violation: {reason}")]
    PreconditionViolation { reason: String },

    #[error("Player not found: {player_id}")]
    PlayerNotFound { player_id: u64 },
}
