use std::{sync::Arc, time::Duration};

use async_trait::async_trait;

use crate::{
    errors::TransportError,
    matchmaker::pool::Participant,
    protocol::{ClientReply, ServerMessage},
};

/// Handle to a participant's transport endpoint. The endpoint is owned by
/// the transport layer; the core only holds references to it and never
/// closes or mutates it.
#[async_trait]
pub trait PlayerEndpoint: Send + Sync {
    /// Fire-and-forget delivery.
    async fn send(&self, message: ServerMessage);

    /// Request/response round. The transport gives up after `timeout`; the
    /// caller enforces the same bound on its own side as well.
    async fn exchange(
        &self,
        message: ServerMessage,
        timeout: Duration,
    ) -> Result<ClientReply, TransportError>;
}

/// Session startup collaborator. Takes a confirmed, verified pair and
/// creates the live session; the core does not observe a result.
#[async_trait]
pub trait SessionStarter: Send + Sync {
    async fn start_session(&self, player1: Arc<Participant>, player2: Arc<Participant>);
}
