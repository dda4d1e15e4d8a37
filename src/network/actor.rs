//! Network actor - runs server requests in the Tokio async runtime

use tokio::sync::mpsc;
use tokio::task::JoinSet;

use crate::messages::{NetworkCommand, NetworkResponse, Operation};
use crate::network::client::ApiClient;

/// Network actor that processes server request commands
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
                        Some(NetworkCommand::Shutdown) | None => break,
                        Some(cmd) => self.spawn(cmd),
                    }
                }

                // Reap completed tasks
                Some(_result) = self.active_requests.join_next() => {}
            }
        }
    }

    fn spawn(&mut self, cmd: NetworkCommand) {
        let client = self.client.clone();
        let response_tx = self.response_tx.clone();

        self.active_requests.spawn(async move {
            if let Some(response) = execute(&client, cmd).await {
                let _ = response_tx.send(response);
            }
        });
    }
}

/// Run one command against the server, mapping failures to `NetworkResponse::Failed`
pub async fn execute(client: &ApiClient, cmd: NetworkCommand) -> Option<NetworkResponse> {
    let response = match cmd {
        NetworkCommand::LoadModels { id } => {
            tracing::info!(id, "Loading models");
            match client.list_models().await {
                Ok(models) => NetworkResponse::ModelsLoaded { id, models },
                Err(e) => failed(id, Operation::LoadModels, e),
            }
        }
        NetworkCommand::UploadPdf { id, path } => {
            tracing::info!(id, path = %path.display(), "Uploading PDF");
            match client.upload_pdf(&path).await {
                Ok(result) => NetworkResponse::UploadFinished { id, result },
                Err(e) => failed(id, Operation::Upload, e),
            }
        }
        NetworkCommand::AskQuestion { id, payload } => {
            tracing::info!(id, model = %payload.model, temperature = payload.temperature, "Asking question");
            match client.ask(&payload).await {
                Ok(result) => NetworkResponse::AnswerReceived { id, result },
                Err(e) => failed(id, Operation::Ask, e),
            }
        }
        NetworkCommand::Shutdown => return None,
    };

    tracing::info!(id = response.id(), operation = %response.operation(), "Request completed");
    Some(response)
}

fn failed(id: u64, operation: Operation, error: crate::error::ApiError) -> NetworkResponse {
    tracing::warn!(id, %operation, error = %error, "Request error");
    NetworkResponse::Failed {
        id,
        operation,
        message: error.user_message(),
    }
}
