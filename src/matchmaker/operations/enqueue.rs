use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use crate::{
    matchmaker::{operations::notify, pool::Participant, MatchmakerDeps},
    transport::PlayerEndpoint,
};

/// Register a participant for matchmaking: allocate a fresh identity
/// token, enqueue at the pool tail and report the token back over the
/// endpoint. Returns the assigned token.
pub async fn start_search(
    name: String,
    endpoint: Arc<dyn PlayerEndpoint>,
    deps: &MatchmakerDeps,
) -> Uuid {
    let participant = Participant::new(name, endpoint);
    let token = participant.token;

    deps.pool.register(participant.clone());
    info!(
        "Player {} entered the search pool with token {}. pool size = {}",
        participant.name,
        token,
        deps.pool.len()
    );

    notify::issue_token(&participant).await;

    token
}
