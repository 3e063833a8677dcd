use std::{sync::Arc, time::Duration};

use anyhow::Result;
use async_trait::async_trait;
use thiserror::Error;
use tracing::{info, warn};

use crate::events::{EventContext, EventDispatcher, RtmEvent, SessionInfo};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TransportError {
    #[error("transport failed to connect: {0}")]
    Connect(String),
    #[error("transport read failed: {0}")]
    Receive(String),
    #[error("transport disconnect failed: {0}")]
    Disconnect(String),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReconnectPolicy {
    pub max_retries: u32,
    pub base_delay_ms: u64,
    pub max_delay_ms: u64,
}

impl Default for ReconnectPolicy {
    fn default() -> Self {
        Self { max_retries: 5, base_delay_ms: 250, max_delay_ms: 5_000 }
    }
}

impl ReconnectPolicy {
    fn backoff(&self, attempt: u32) -> Duration {
        let exponent = attempt.min(16);
        let multiplier = 1_u64 << exponent;
        let delay_ms = self.base_delay_ms.saturating_mul(multiplier).min(self.max_delay_ms);
        Duration::from_millis(delay_ms)
    }
}

/// Realtime message stream. `connect` yields the session identity Slack
/// reports for the bot; `next_event` returns `None` when the stream closes.
/// Live implementations decode raw gateway frames with
/// [`parse_event`](crate::events::parse_event) and may surface malformed
/// frames as [`RtmEvent::Unsupported`] or a `Receive` error.
#[async_trait]
pub trait RtmTransport: Send + Sync {
    async fn connect(&self) -> Result<SessionInfo, TransportError>;
    async fn next_event(&self) -> Result<Option<RtmEvent>, TransportError>;
    async fn disconnect(&self) -> Result<(), TransportError>;
}

#[derive(Default)]
pub struct NoopRtmTransport;

#[async_trait]
impl RtmTransport for NoopRtmTransport {
    async fn connect(&self) -> Result<SessionInfo, TransportError> {
        Ok(SessionInfo::default())
    }

    async fn next_event(&self) -> Result<Option<RtmEvent>, TransportError> {
        Ok(None)
    }

    async fn disconnect(&self) -> Result<(), TransportError> {
        Ok(())
    }
}

pub struct RtmRunner {
    transport: Arc<dyn RtmTransport>,
    dispatcher: EventDispatcher,
    reconnect_policy: ReconnectPolicy,
}

impl RtmRunner {
    pub fn new(
        transport: Arc<dyn RtmTransport>,
        dispatcher: EventDispatcher,
        reconnect_policy: ReconnectPolicy,
    ) -> Self {
        Self { transport, dispatcher, reconnect_policy }
    }

    pub async fn start(&self) -> Result<()> {
        for attempt in 0..=self.reconnect_policy.max_retries {
            match self.connect_and_pump(attempt).await {
                Ok(()) => return Ok(()),
                Err(transport_error) => {
                    warn!(
                        attempt,
                        max_retries = self.reconnect_policy.max_retries,
                        error = %transport_error,
                        "realtime transport failed"
                    );

                    if attempt >= self.reconnect_policy.max_retries {
                        warn!(
                            max_retries = self.reconnect_policy.max_retries,
                            "realtime retries exhausted; continuing process without crash"
                        );
                        return Ok(());
                    }

                    let delay = self.reconnect_policy.backoff(attempt);
                    if !delay.is_zero() {
                        tokio::time::sleep(delay).await;
                    }
                }
            }
        }

        Ok(())
    }

    async fn connect_and_pump(&self, attempt: u32) -> Result<(), TransportError> {
        info!(attempt, "opening realtime transport connection");
        let session = self.transport.connect().await?;
        info!(
            attempt,
            self_name = %session.self_name,
            team_name = %session.team_name,
            "realtime transport connected"
        );

        let mut sequence: u64 = 0;
        loop {
            let Some(event) = self.transport.next_event().await? else {
                info!(attempt, "realtime transport stream closed");
                self.transport.disconnect().await?;
                return Ok(());
            };

            sequence += 1;
            let context = EventContext {
                correlation_id: format!("evt-{sequence}"),
                session: session.clone(),
            };

            info!(
                event_type = ?event.event_type(),
                correlation_id = %context.correlation_id,
                "received realtime event"
            );

            if let Err(error) = self.dispatcher.dispatch(&event, &context).await {
                warn!(
                    correlation_id = %context.correlation_id,
                    error = %error,
                    "event dispatch failed; continuing realtime loop"
                );
            }
        }
    }
}
