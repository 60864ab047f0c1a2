//! Errors raised by the scheduling and ranking engines.

use thiserror::Error;

use crate::models::FixtureId;

/// Errors that can occur while building a schedule or recording results.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum LeagueError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Unknown fixture: {0}")]
    UnknownFixture(FixtureId),
}

impl LeagueError {
    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }
}
