use uuid::Uuid;

use crate::{
    matchmaker::pool::Participant,
    protocol::{ErrorCode, ServerMessage},
    transport::PlayerEndpoint,
};

/// Report the freshly assigned identity token to a registered participant.
pub async fn issue_token(participant: &Participant) {
    participant
        .endpoint
        .send(ServerMessage::Token {
            token: participant.token.to_string(),
        })
        .await;
}

/// Tell a bounced participant that the proposed opponent did not accept.
pub async fn opponent_did_not_accept(participant: &Participant) {
    participant
        .endpoint
        .send(ServerMessage::OpponentDidNotAccept)
        .await;
}

/// Announce the final match to a participant.
pub async fn match_found(participant: &Participant) {
    participant.endpoint.send(ServerMessage::MatchFound).await;
}

/// Acknowledge a successful stop-search request.
pub async fn search_stopped(endpoint: &dyn PlayerEndpoint, name: &str) {
    endpoint
        .send(ServerMessage::SearchStopped {
            message: format!("Removed player {} from search queue.", name),
        })
        .await;
}

/// Reply to a stop-search request carrying a token nobody holds.
pub async fn token_not_found(endpoint: &dyn PlayerEndpoint, token: Uuid) {
    endpoint
        .send(ServerMessage::Error {
            code: ErrorCode::TokenNotFound,
            message: format!("Could not find token {}", token),
        })
        .await;
}
