use std::{sync::Arc, time::Duration};

use chrono::Utc;
use tracing::{debug, info, warn};

use crate::matchmaker::{
    confirm, operations::notify, pool::Participant, verify::ConnectionVerifier, MatchmakerDeps,
};

/// The matching loop: drain pairs from the pool, drive the dual
/// confirmation, apply the outcome policy, verify both connections and
/// hand the pair to session startup. Runs as one long-lived task until the
/// shutdown token fires; nothing a participant does is fatal to it.
pub async fn run(deps: MatchmakerDeps) {
    let accept_timeout = Duration::from_secs(deps.settings.accept_timeout_seconds);
    let verifier = ConnectionVerifier::new(Duration::from_secs(deps.settings.verify_timeout_seconds));

    loop {
        let (player1, player2) = tokio::select! {
            _ = deps.shutdown_token.cancelled() => {
                info!("Matching loop shutting down.");
                return;
            }
            pair = deps.pool.next_pair() => pair,
        };

        PairingAttempt { player1, player2 }
            .resolve(&deps, accept_timeout, &verifier)
            .await;
    }
}

/// One dequeued pair, from confirmation through to startup or dispersal.
/// Owned exclusively by the matching loop; once created it always runs to
/// a policy decision.
struct PairingAttempt {
    player1: Arc<Participant>,
    player2: Arc<Participant>,
}

impl PairingAttempt {
    async fn resolve(
        self,
        deps: &MatchmakerDeps,
        accept_timeout: Duration,
        verifier: &ConnectionVerifier,
    ) {
        let Self { player1, player2 } = self;

        debug!(
            "Matchmaking loop found a match. Players: {} and {}.",
            player1.name, player2.name
        );

        let (accepted1, accepted2) = confirm::confirm_pair(&player1, &player2, accept_timeout).await;

        match (accepted1, accepted2) {
            (true, true) => {}
            (true, false) => {
                deps.pool.release(player2.token);
                return_to_pool(deps, player1).await;
                return;
            }
            (false, true) => {
                deps.pool.release(player1.token);
                return_to_pool(deps, player2).await;
                return;
            }
            (false, false) => {
                // Both walked away; neither is requeued or notified.
                deps.pool.release(player1.token);
                deps.pool.release(player2.token);
                return;
            }
        }

        // A participant that fails the probe is dropped, not requeued; its
        // peer goes back to the head of the pool without a notification.
        if !verifier.verify(&player1).await {
            debug!("Player 1, {}, failed verification.", player1.name);
            deps.pool.release(player1.token);
            requeue_or_drop(deps, player2);
            return;
        }
        if !verifier.verify(&player2).await {
            debug!("Player 2, {}, failed verification.", player2.name);
            deps.pool.release(player2.token);
            requeue_or_drop(deps, player1);
            return;
        }

        notify::match_found(&player1).await;
        notify::match_found(&player2).await;

        info!(
            "Starting session for {} and {} (waited {}s and {}s).",
            player1.name,
            player2.name,
            (Utc::now() - player1.enqueued_at).num_seconds(),
            (Utc::now() - player2.enqueued_at).num_seconds()
        );

        deps.pool.release(player1.token);
        deps.pool.release(player2.token);
        deps.sessions.start_session(player1, player2).await;
    }
}

/// Bounce a still-willing participant back to the pool head and tell it
/// why. Skipped entirely if it cancelled while the attempt was in flight.
async fn return_to_pool(deps: &MatchmakerDeps, participant: Arc<Participant>) {
    if deps.pool.requeue_front(participant.clone()) {
        notify::opponent_did_not_accept(&participant).await;
    } else {
        warn!(
            "Player {} cancelled during the pairing attempt; not requeued.",
            participant.name
        );
    }
}

fn requeue_or_drop(deps: &MatchmakerDeps, participant: Arc<Participant>) {
    if !deps.pool.requeue_front(participant.clone()) {
        warn!(
            "Player {} cancelled during the pairing attempt; not requeued.",
            participant.name
        );
    }
}
