use std::time::Duration;

use tokio::time::timeout;
use tracing::debug;

use crate::{matchmaker::pool::Participant, protocol::ServerMessage};

/// Bounded liveness probe of a participant's endpoint, independent of the
/// accept/decline protocol. Any reply within the bound counts as alive;
/// the reply content is ignored.
pub struct ConnectionVerifier {
    verify_timeout: Duration,
}

impl ConnectionVerifier {
    pub fn new(verify_timeout: Duration) -> Self {
        Self { verify_timeout }
    }

    pub async fn verify(&self, participant: &Participant) -> bool {
        let probe = participant
            .endpoint
            .exchange(ServerMessage::Verify, self.verify_timeout);

        match timeout(self.verify_timeout, probe).await {
            Ok(Ok(_any_reply)) => true,
            Ok(Err(err)) => {
                debug!("Verification of {} failed: {}", participant.name, err);
                false
            }
            Err(_) => {
                debug!(
                    "{} did not answer the verification probe within {:?}.",
                    participant.name, self.verify_timeout
                );
                false
            }
        }
    }
}
