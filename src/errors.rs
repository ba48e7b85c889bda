use std::time::Duration;

use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum MatchmakingError {
    #[error("Could not find token {0}")]
    UnknownToken(Uuid),
}

/// Failures reported by the transport layer. The matchmaking core never
/// propagates these; every one degrades to a declined outcome at the point
/// of use.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("endpoint did not respond within {0:?}")]
    Timeout(Duration),
    #[error("endpoint unreachable: {0}")]
    Unreachable(String),
}
