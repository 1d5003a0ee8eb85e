use std::time::Duration;

use tokio::time;

use crate::configs::settings::Settings;
use crate::errors::StoreError;
use crate::models::Channel;
use crate::services::device_client::ReadingFetcher;
use crate::services::reading_store::ReadingStore;

struct ChannelState {
    channel: Channel,
    store: ReadingStore,
}

/// Polls every configured channel on a fixed period and appends fresh
/// readings to the matching store. Channels are independent: one failing
/// never blocks the others in the same tick, nor any future tick.
pub struct PollService<F> {
    fetcher: F,
    channels: Vec<ChannelState>,
    period: Duration,
}

impl<F: ReadingFetcher> PollService<F> {
    /// Load one store per configured channel. A store that fails to load
    /// is fatal here, before the first tick.
    pub fn new(fetcher: F, settings: &Settings) -> Result<Self, StoreError> {
        let mut channels = Vec::with_capacity(settings.channels.len());

        for channel in &settings.channels {
            let store = ReadingStore::load(settings.series_path(channel))?;
            channels.push(ChannelState {
                channel: channel.clone(),
                store,
            });
        }

        Ok(Self {
            fetcher,
            channels,
            period: Duration::from_secs(settings.poller.interval_secs),
        })
    }

    /// The first tick fires immediately, then once per period. A tick is
    /// awaited in full before the next one, so fetches for the same
    /// channel never overlap.
    pub async fn run(mut self) {
        let mut interval = time::interval(self.period);

        loop {
            interval.tick().await;
            self.poll_once().await;
        }
    }

    /// One pass over all channels. Every outcome is handled here; errors
    /// are logged and swallowed, the next tick being the implicit retry.
    pub async fn poll_once(&mut self) {
        for state in &mut self.channels {
            match self.fetcher.fetch_channel(&state.channel).await {
                Ok(reading) => match state.store.append_if_new(reading) {
                    Ok(true) => {
                        tracing::info!("Appended reading on channel {}", state.channel.name)
                    }
                    Ok(false) => {
                        tracing::debug!("Unchanged reading on channel {}", state.channel.name)
                    }
                    Err(e) => tracing::error!(
                        "Error persisting reading on channel {}: {}",
                        state.channel.name,
                        e
                    ),
                },
                Err(e) => {
                    tracing::error!("Error fetching channel {}: {}", state.channel.name, e)
                }
            }
        }
    }

    pub fn store(&self, name: &str) -> Option<&ReadingStore> {
        self.channels
            .iter()
            .find(|state| state.channel.name == name)
            .map(|state| &state.store)
    }
}
