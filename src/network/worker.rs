use tokio::sync::mpsc;

use crate::common::{ApiCommand, ApiEvent};

use super::client::MotdApiClient;

/// Background task that runs requests for the UI.
///
/// Mỗi lệnh chạy trên một task riêng để request chậm không chặn các request khác.
pub struct ApiWorker {
    client: MotdApiClient,
    command_receiver: mpsc::Receiver<ApiCommand>,
    event_sender: mpsc::Sender<ApiEvent>,
}

impl ApiWorker {
    pub fn new(
        client: MotdApiClient,
        command_receiver: mpsc::Receiver<ApiCommand>,
        event_sender: mpsc::Sender<ApiEvent>,
    ) -> Self {
        Self {
            client,
            command_receiver,
            event_sender,
        }
    }

    /// Runs until every command sender is dropped.
    pub async fn run(mut self) {
        log::info!("API worker started against {}", self.client.base_url());

        while let Some(command) = self.command_receiver.recv().await {
            let client = self.client.clone();
            let event_sender = self.event_sender.clone();

            tokio::spawn(async move {
                let ApiCommand {
                    request_id,
                    endpoint,
                } = command;
                log::debug!("{} started ({request_id})", endpoint.name());

                let result = client.execute(&endpoint).await;
                match &result {
                    Ok(_) => log::debug!("{} fulfilled ({request_id})", endpoint.name()),
                    Err(err) => log::warn!("{} failed ({request_id}): {err}", endpoint.name()),
                }

                let event = ApiEvent::Settled {
                    request_id,
                    endpoint,
                    result,
                };
                if let Err(err) = event_sender.send(event).await {
                    log::warn!("Failed to notify UI about settled request: {err}");
                }
            });
        }

        log::info!("API worker stopped");
    }
}
