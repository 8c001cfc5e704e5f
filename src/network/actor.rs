//! Network actor - runs endpoint fetches in the Tokio async runtime

use std::time::Instant;

use tokio::sync::mpsc;
use tokio::task::JoinSet;

use crate::messages::{NetworkCommand, NetworkResponse};
use crate::network::client::ApiClient;

/// Network actor that turns fetch commands into independent tasks
pub struct NetworkActor {
    client: ApiClient,
    response_tx: mpsc::UnboundedSender<NetworkResponse>,
    active_requests: JoinSet<()>,
}

impl NetworkActor {
    pub fn new(client: ApiClient, response_tx: mpsc::UnboundedSender<NetworkResponse>) -> Self {
        NetworkActor {
            client,
            response_tx,
            active_requests: JoinSet::new(),
        }
    }

    /// Run the network actor message loop
    pub async fn run(mut self, mut cmd_rx: mpsc::UnboundedReceiver<NetworkCommand>) {
        loop {
            tokio::select! {
                biased;

                cmd = cmd_rx.recv() => {
                    match cmd {
                        Some(NetworkCommand::Fetch { id, key }) => {
                            let response_tx = self.response_tx.clone();
                            let client = self.client.clone();

                            // Each fetch settles on its own; none waits for another
                            self.active_requests.spawn(async move {
                                tracing::info!(id, endpoint = key.as_str(), "Fetching");
                                let start = Instant::now();
                                let outcome = client.fetch(key).await;
                                let time_ms = start.elapsed().as_millis() as u64;
                                tracing::info!(id, endpoint = key.as_str(), ok = outcome.is_ok(), time_ms, "Fetch settled");
                                let _ = response_tx.send(NetworkResponse::Settled {
                                    id,
                                    key,
                                    outcome,
                                    time_ms,
                                });
                            });
                        }

                        Some(NetworkCommand::Shutdown) | None => {
                            self.active_requests.abort_all();
                            break;
                        }
                    }
                }

                // Reap finished tasks
                Some(_result) = self.active_requests.join_next() => {}
            }
        }
    }
}
