//! Wires configuration into the running bot: Web API gateway, Acclaim
//! client, event dispatcher, and the realtime runner.

use std::sync::Arc;

use thiserror::Error;
use tracing::info;

use badgey_acclaim::AcclaimClient;
use badgey_core::config::{AppConfig, ConfigError, LoadOptions};
use badgey_slack::events::{
    ChannelJoinedHandler, EventDispatcher, HelloHandler, MessageHandler,
};
use badgey_slack::rtm::{NoopRtmTransport, RtmTransport};
use badgey_slack::{Gateway, ReconnectPolicy, RtmRunner, WebApiGateway};

use crate::badges::AcclaimTemplateService;

#[derive(Debug, Error)]
pub enum BootstrapError {
    #[error(transparent)]
    Config(#[from] ConfigError),
}

pub struct Application {
    pub config: AppConfig,
    pub runner: RtmRunner,
}

pub async fn bootstrap(options: LoadOptions) -> Result<Application, BootstrapError> {
    let config = AppConfig::load(options)?;
    bootstrap_with_config(config).await
}

/// Builds the full application from an already loaded config.
///
/// The realtime transport defaults to a no-op, so `badgey run` starts, logs,
/// and returns once the (empty) stream closes. Connecting to a real
/// workspace means implementing [`RtmTransport`] over a websocket and
/// swapping it in here; the handler wiring is transport-agnostic.
pub async fn bootstrap_with_config(config: AppConfig) -> Result<Application, BootstrapError> {
    let gateway: Arc<dyn Gateway> = Arc::new(WebApiGateway::new(config.slack.token.clone()));
    let transport: Arc<dyn RtmTransport> = Arc::new(NoopRtmTransport);

    let dispatcher = build_dispatcher(&config, gateway);
    let runner = RtmRunner::new(transport, dispatcher, ReconnectPolicy::default());

    info!(
        acclaim_token_configured = config.acclaim.token.is_some(),
        acclaim_base_url = %config.acclaim.base_url,
        "application bootstrapped"
    );

    Ok(Application { config, runner })
}

fn build_dispatcher(config: &AppConfig, gateway: Arc<dyn Gateway>) -> EventDispatcher {
    let acclaim = AcclaimClient::new(&config.acclaim);

    let mut dispatcher = EventDispatcher::new();
    dispatcher.register(HelloHandler);
    dispatcher.register(ChannelJoinedHandler::new(gateway.clone()));
    dispatcher.register(MessageHandler::new(gateway, AcclaimTemplateService::new(acclaim)));
    dispatcher
}
