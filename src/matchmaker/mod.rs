pub mod confirm;
pub mod operations;
pub mod pool;
pub mod run_loop;
pub mod verify;

use std::sync::Arc;

use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::info;
use uuid::Uuid;

use crate::{
    env::MatchmakingSettings,
    transport::{PlayerEndpoint, SessionStarter},
};
use pool::WaitingPool;

/// Everything the matching loop and the registration handlers share.
#[derive(Clone)]
pub struct MatchmakerDeps {
    pub pool: Arc<WaitingPool>,
    pub settings: MatchmakingSettings,
    pub sessions: Arc<dyn SessionStarter>,
    pub shutdown_token: CancellationToken,
}

/// The matchmaking service. Explicitly constructed and injected rather
/// than a process-wide singleton; whoever composes the service at startup
/// owns it for the process lifetime and spawns the loop exactly once.
pub struct Matchmaker {
    deps: MatchmakerDeps,
}

impl Matchmaker {
    pub fn new(
        settings: MatchmakingSettings,
        sessions: Arc<dyn SessionStarter>,
        shutdown_token: CancellationToken,
    ) -> Self {
        Self {
            deps: MatchmakerDeps {
                pool: Arc::new(WaitingPool::new()),
                settings,
                sessions,
                shutdown_token,
            },
        }
    }

    /// Start the background matching loop. Called once at service startup;
    /// the loop runs until the shutdown token fires.
    pub fn spawn(&self) -> JoinHandle<()> {
        info!("Matchmaker started.");
        tokio::spawn(run_loop::run(self.deps.clone()))
    }

    /// Admit a new participant into the waiting pool.
    pub async fn start_search(&self, name: String, endpoint: Arc<dyn PlayerEndpoint>) -> Uuid {
        operations::enqueue::start_search(name, endpoint, &self.deps).await
    }

    /// Remove a searching participant on its own request.
    pub async fn stop_search(&self, token: Uuid, endpoint: &dyn PlayerEndpoint) {
        operations::dequeue::stop_search(token, endpoint, &self.deps).await;
    }

    pub fn pool(&self) -> &Arc<WaitingPool> {
        &self.deps.pool
    }
}
