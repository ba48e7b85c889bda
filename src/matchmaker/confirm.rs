use std::time::Duration;

use futures::future;
use tokio::time::timeout;
use tracing::debug;

use crate::{matchmaker::pool::Participant, protocol::ServerMessage};

/// Ask one participant to accept the proposed match. Exactly one proposal
/// message is sent. Every path resolves to a plain yes/no: an explicit
/// "accept" reply confirms, while a decline, a malformed reply without the
/// `response` field, a transport failure or the timeout all decline.
pub async fn request_confirmation(participant: &Participant, accept_timeout: Duration) -> bool {
    let exchange = participant
        .endpoint
        .exchange(ServerMessage::Accept, accept_timeout);

    // The transport enforces the timeout itself; the outer bound is a
    // backstop against transports that don't.
    match timeout(accept_timeout, exchange).await {
        Ok(Ok(reply)) => match reply.response.as_deref() {
            Some(response) => response.eq_ignore_ascii_case("accept"),
            None => false,
        },
        Ok(Err(err)) => {
            debug!(
                "Confirmation exchange with {} failed: {}",
                participant.name, err
            );
            false
        }
        Err(_) => {
            debug!(
                "{} did not answer the accept prompt within {:?}.",
                participant.name, accept_timeout
            );
            false
        }
    }
}

/// Run both confirmation exchanges concurrently and wait for both to
/// settle. Neither exchange observes, blocks or cancels the other; a slow
/// participant only delays the joined result, never the peer's exchange.
pub async fn confirm_pair(
    player1: &Participant,
    player2: &Participant,
    accept_timeout: Duration,
) -> (bool, bool) {
    future::join(
        request_confirmation(player1, accept_timeout),
        request_confirmation(player2, accept_timeout),
    )
    .await
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use async_trait::async_trait;

    use super::*;
    use crate::{
        errors::TransportError,
        protocol::ClientReply,
        transport::PlayerEndpoint,
    };

    enum Script {
        Reply(&'static str),
        Malformed,
        Silent,
        Unreachable,
    }

    struct ScriptedEndpoint(Script);

    #[async_trait]
    impl PlayerEndpoint for ScriptedEndpoint {
        async fn send(&self, _message: ServerMessage) {}

        async fn exchange(
            &self,
            _message: ServerMessage,
            _timeout: Duration,
        ) -> Result<ClientReply, TransportError> {
            match &self.0 {
                Script::Reply(text) => Ok(ClientReply {
                    response: Some(text.to_string()),
                }),
                Script::Malformed => Ok(ClientReply { response: None }),
                Script::Silent => std::future::pending().await,
                Script::Unreachable => {
                    Err(TransportError::Unreachable("socket closed".to_string()))
                }
            }
        }
    }

    fn participant(script: Script) -> Arc<Participant> {
        Participant::new("player".to_string(), Arc::new(ScriptedEndpoint(script)))
    }

    const ACCEPT_TIMEOUT: Duration = Duration::from_secs(11);

    #[tokio::test]
    async fn explicit_accept_confirms() {
        let p = participant(Script::Reply("accept"));
        assert!(request_confirmation(&p, ACCEPT_TIMEOUT).await);

        let p = participant(Script::Reply("ACCEPT"));
        assert!(request_confirmation(&p, ACCEPT_TIMEOUT).await);
    }

    #[tokio::test]
    async fn anything_else_declines() {
        let p = participant(Script::Reply("decline"));
        assert!(!request_confirmation(&p, ACCEPT_TIMEOUT).await);

        let p = participant(Script::Malformed);
        assert!(!request_confirmation(&p, ACCEPT_TIMEOUT).await);

        let p = participant(Script::Unreachable);
        assert!(!request_confirmation(&p, ACCEPT_TIMEOUT).await);
    }

    #[tokio::test(start_paused = true)]
    async fn timeout_declines() {
        let p = participant(Script::Silent);
        assert!(!request_confirmation(&p, ACCEPT_TIMEOUT).await);
    }

    #[tokio::test(start_paused = true)]
    async fn exchanges_run_concurrently() {
        let p1 = participant(Script::Silent);
        let p2 = participant(Script::Silent);

        let started = tokio::time::Instant::now();
        let (r1, r2) = confirm_pair(&p1, &p2, ACCEPT_TIMEOUT).await;
        let elapsed = started.elapsed();

        assert!(!r1 && !r2);
        // Two sequential timeouts would take 22s of virtual time; the
        // overlapping exchanges finish after one.
        assert!(elapsed >= ACCEPT_TIMEOUT);
        assert!(elapsed < ACCEPT_TIMEOUT * 2);
    }

    #[tokio::test(start_paused = true)]
    async fn a_silent_peer_does_not_block_the_other_exchange() {
        let p1 = participant(Script::Reply("accept"));
        let p2 = participant(Script::Silent);

        let (r1, r2) = confirm_pair(&p1, &p2, ACCEPT_TIMEOUT).await;
        assert!(r1);
        assert!(!r2);
    }
}
