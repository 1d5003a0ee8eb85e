use std::sync::Arc;

use crate::configs::settings::Settings;
use crate::services::device_client::DeviceClient;
use crate::services::poll_service::PollService;

pub mod configs;
pub mod errors;
pub mod models;
pub mod services;

pub async fn run(settings: &Arc<Settings>) {
    let client = DeviceClient::new(&settings.api.base_url, settings.api.token());

    let service =
        PollService::new(client, settings).expect("Failed to load reading stores.");

    tracing::info!(
        "polling {} channels every {}s",
        settings.channels.len(),
        settings.poller.interval_secs
    );

    service.run().await;
}
