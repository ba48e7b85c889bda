use tracing::{info, warn};
use uuid::Uuid;

use crate::{
    errors::MatchmakingError,
    matchmaker::{operations::notify, MatchmakerDeps},
    transport::PlayerEndpoint,
};

/// Cancel an ongoing search. An unknown token gets a not-found reply and
/// mutates nothing; it is a user-visible condition, not an internal error.
pub async fn stop_search(token: Uuid, endpoint: &dyn PlayerEndpoint, deps: &MatchmakerDeps) {
    match deps.pool.remove_by_token(token) {
        Ok(participant) => {
            info!(
                "Removed player {} from the search pool. pool size = {}",
                participant.name,
                deps.pool.len()
            );
            notify::search_stopped(endpoint, &participant.name).await;
        }
        Err(MatchmakingError::UnknownToken(_)) => {
            warn!("Stop-search request with unknown token {}.", token);
            notify::token_not_found(endpoint, token).await;
        }
    }
}
