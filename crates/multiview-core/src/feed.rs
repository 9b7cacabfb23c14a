//! Periodic channel-list polling.
//!
//! The feed is a fire-and-forget poll loop: fetch, deliver, sleep, repeat.
//! Failures are surfaced as events and logged, and the loop keeps its cadence
//! regardless; the only retry is the next scheduled tick.  Unlike a detached
//! timer, the task is owned through a handle and stops cleanly on teardown.

use std::time::Duration;

use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::channel::{parse_channel_list, ChannelDescriptor};

/// Events emitted by the poll task.
#[derive(Debug, Clone)]
pub enum FeedEvent {
    /// A fresh channel list; replaces the previous one wholesale.
    Channels(Vec<ChannelDescriptor>),
    /// A poll failed.  The next tick polls again.
    Error(String),
}

/// Handle to a running poll task.
pub struct FeedHandle {
    cancel: CancellationToken,
    task: tokio::task::JoinHandle<()>,
}

impl FeedHandle {
    /// Cancel the loop and wait for the task to exit.
    pub async fn stop(self) {
        self.cancel.cancel();
        let _ = self.task.await;
    }

    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }
}

pub struct ChannelFeed;

impl ChannelFeed {
    /// Spawn the poll loop.  The first fetch fires immediately, then one per
    /// `interval`; ticks missed while a slow fetch is in flight are skipped
    /// rather than bunched up.
    pub fn spawn(
        client: reqwest::Client,
        channels_url: String,
        interval: Duration,
        tx: mpsc::Sender<FeedEvent>,
    ) -> FeedHandle {
        let cancel = CancellationToken::new();
        let task_cancel = cancel.clone();
        let task = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);
            let mut polls: u64 = 0;
            loop {
                tokio::select! {
                    _ = task_cancel.cancelled() => {
                        debug!("channel feed stopped after {} polls", polls);
                        return;
                    }
                    _ = ticker.tick() => {
                        polls += 1;
                        let event = match fetch_channels(&client, &channels_url).await {
                            Ok(channels) => {
                                debug!("poll #{}: {} channels", polls, channels.len());
                                FeedEvent::Channels(channels)
                            }
                            Err(e) => {
                                warn!("poll #{} failed: {:#}", polls, e);
                                FeedEvent::Error(format!("{:#}", e))
                            }
                        };
                        if tx.send(event).await.is_err() {
                            // receiver gone; nothing left to feed
                            return;
                        }
                    }
                }
            }
        });
        FeedHandle { cancel, task }
    }
}

async fn fetch_channels(
    client: &reqwest::Client,
    url: &str,
) -> anyhow::Result<Vec<ChannelDescriptor>> {
    let resp = client.get(url).send().await?.error_for_status()?;
    let body = resp.text().await?;
    parse_channel_list(&body)
}
