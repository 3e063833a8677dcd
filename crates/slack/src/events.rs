use std::{collections::HashMap, sync::Arc};

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, warn};

use badgey_core::{classify, invited_by_self, replies, Intent};

use crate::attachment::{attachment_demo_message, Attachment, AttachmentMessage};
use crate::gateway::{Gateway, GatewayError};

/// Identity of the connected bot session, delivered with the `hello` event.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SessionInfo {
    pub self_id: String,
    pub self_name: String,
    pub team_name: String,
    pub team_domain: String,
}

impl Default for SessionInfo {
    fn default() -> Self {
        Self {
            self_id: "unknown".to_owned(),
            self_name: "unknown".to_owned(),
            team_name: "unknown".to_owned(),
            team_domain: "unknown".to_owned(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EventContext {
    pub correlation_id: String,
    pub session: SessionInfo,
}

impl Default for EventContext {
    fn default() -> Self {
        Self { correlation_id: "unknown-correlation-id".to_owned(), session: SessionInfo::default() }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RtmEvent {
    Hello,
    ChannelJoined { channel_id: String, latest_text: Option<String> },
    Message { channel_id: String, user_id: Option<String>, text: String },
    Unsupported { event_type: String },
}

impl RtmEvent {
    pub fn event_type(&self) -> RtmEventType {
        match self {
            Self::Hello => RtmEventType::Hello,
            Self::ChannelJoined { .. } => RtmEventType::ChannelJoined,
            Self::Message { .. } => RtmEventType::Message,
            Self::Unsupported { .. } => RtmEventType::Unsupported,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum RtmEventType {
    Hello,
    ChannelJoined,
    Message,
    Unsupported,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum EventParseError {
    #[error("event payload has no `type` field")]
    MissingType,
    #[error("malformed `{event_type}` event: {detail}")]
    Malformed { event_type: String, detail: String },
}

#[derive(Debug, Deserialize)]
struct RawChannelJoined {
    channel: RawChannel,
}

#[derive(Debug, Deserialize)]
struct RawChannel {
    id: String,
    #[serde(default)]
    latest: Option<RawLatest>,
}

#[derive(Debug, Deserialize)]
struct RawLatest {
    #[serde(default)]
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawMessage {
    channel: String,
    #[serde(default)]
    user: Option<String>,
    #[serde(default)]
    text: Option<String>,
}

/// Parses a raw realtime payload into a typed event. This is the decode step
/// a live [`RtmTransport`](crate::rtm::RtmTransport) runs on each inbound
/// gateway frame before handing it to the dispatcher. Unknown event types
/// are preserved as [`RtmEvent::Unsupported`] so the loop can log and move
/// on.
pub fn parse_event(payload: &Value) -> Result<RtmEvent, EventParseError> {
    let event_type = payload
        .get("type")
        .and_then(Value::as_str)
        .ok_or(EventParseError::MissingType)?;

    match event_type {
        "hello" => Ok(RtmEvent::Hello),
        "channel_joined" => {
            let raw: RawChannelJoined =
                serde_json::from_value(payload.clone()).map_err(|error| {
                    EventParseError::Malformed {
                        event_type: event_type.to_owned(),
                        detail: error.to_string(),
                    }
                })?;
            Ok(RtmEvent::ChannelJoined {
                channel_id: raw.channel.id,
                latest_text: raw.channel.latest.and_then(|latest| latest.text),
            })
        }
        "message" => {
            let raw: RawMessage = serde_json::from_value(payload.clone()).map_err(|error| {
                EventParseError::Malformed {
                    event_type: event_type.to_owned(),
                    detail: error.to_string(),
                }
            })?;
            Ok(RtmEvent::Message {
                channel_id: raw.channel,
                user_id: raw.user,
                text: raw.text.unwrap_or_default(),
            })
        }
        other => Ok(RtmEvent::Unsupported { event_type: other.to_owned() }),
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum HandlerResult {
    Replied,
    Processed,
    Ignored,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum EventHandlerError {
    #[error(transparent)]
    Gateway(#[from] GatewayError),
    #[error("badge lookup failure: {0}")]
    BadgeLookup(String),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DispatchError {
    #[error(transparent)]
    Handler(#[from] EventHandlerError),
}

#[async_trait]
pub trait EventHandler: Send + Sync {
    fn event_type(&self) -> RtmEventType;
    async fn handle(
        &self,
        event: &RtmEvent,
        ctx: &EventContext,
    ) -> Result<HandlerResult, EventHandlerError>;
}

#[derive(Default)]
pub struct EventDispatcher {
    handlers: HashMap<RtmEventType, Arc<dyn EventHandler>>,
}

impl EventDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register<H>(&mut self, handler: H)
    where
        H: EventHandler + 'static,
    {
        self.handlers.insert(handler.event_type(), Arc::new(handler));
    }

    pub async fn dispatch(
        &self,
        event: &RtmEvent,
        ctx: &EventContext,
    ) -> Result<HandlerResult, DispatchError> {
        let Some(handler) = self.handlers.get(&event.event_type()) else {
            return Ok(HandlerResult::Ignored);
        };

        handler.handle(event, ctx).await.map_err(DispatchError::from)
    }

    pub fn handler_count(&self) -> usize {
        self.handlers.len()
    }
}

pub fn default_dispatcher(gateway: Arc<dyn Gateway>) -> EventDispatcher {
    let mut dispatcher = EventDispatcher::new();
    dispatcher.register(HelloHandler);
    dispatcher.register(ChannelJoinedHandler::new(gateway.clone()));
    dispatcher.register(MessageHandler::new(gateway, NoopBadgeTemplateService));
    dispatcher
}

/// Looks up a badge template and renders it as an attachment. `Ok(None)`
/// means the template does not exist; errors cover credential and transport
/// failures.
#[async_trait]
pub trait BadgeTemplateService: Send + Sync {
    async fn template_attachment(
        &self,
        template_id: &str,
    ) -> Result<Option<Attachment>, EventHandlerError>;
}

pub struct NoopBadgeTemplateService;

#[async_trait]
impl BadgeTemplateService for NoopBadgeTemplateService {
    async fn template_attachment(
        &self,
        _template_id: &str,
    ) -> Result<Option<Attachment>, EventHandlerError> {
        Ok(None)
    }
}

pub struct HelloHandler;

#[async_trait]
impl EventHandler for HelloHandler {
    fn event_type(&self) -> RtmEventType {
        RtmEventType::Hello
    }

    async fn handle(
        &self,
        _event: &RtmEvent,
        ctx: &EventContext,
    ) -> Result<HandlerResult, EventHandlerError> {
        debug!(
            self_name = %ctx.session.self_name,
            team_name = %ctx.session.team_name,
            team_url = %format!("https://{}.slack.com", ctx.session.team_domain),
            "realtime session established"
        );
        Ok(HandlerResult::Processed)
    }
}

pub struct ChannelJoinedHandler {
    gateway: Arc<dyn Gateway>,
}

impl ChannelJoinedHandler {
    pub fn new(gateway: Arc<dyn Gateway>) -> Self {
        Self { gateway }
    }
}

#[async_trait]
impl EventHandler for ChannelJoinedHandler {
    fn event_type(&self) -> RtmEventType {
        RtmEventType::ChannelJoined
    }

    async fn handle(
        &self,
        event: &RtmEvent,
        ctx: &EventContext,
    ) -> Result<HandlerResult, EventHandlerError> {
        let RtmEvent::ChannelJoined { channel_id, latest_text } = event else {
            return Ok(HandlerResult::Ignored);
        };

        let joined_by_self = latest_text
            .as_deref()
            .map(|text| invited_by_self(text, &ctx.session.self_id))
            .unwrap_or(false);

        if !joined_by_self {
            debug!(channel_id = %channel_id, "another member joined the channel");
            return Ok(HandlerResult::Processed);
        }

        self.gateway.send_text(channel_id, &replies::channel_welcome()).await?;
        debug!(channel_id = %channel_id, "joined channel and sent welcome");
        Ok(HandlerResult::Replied)
    }
}

pub struct MessageHandler<S> {
    gateway: Arc<dyn Gateway>,
    badge_templates: S,
}

impl<S> MessageHandler<S>
where
    S: BadgeTemplateService,
{
    pub fn new(gateway: Arc<dyn Gateway>, badge_templates: S) -> Self {
        Self { gateway, badge_templates }
    }
}

#[async_trait]
impl<S> EventHandler for MessageHandler<S>
where
    S: BadgeTemplateService + 'static,
{
    fn event_type(&self) -> RtmEventType {
        RtmEventType::Message
    }

    async fn handle(
        &self,
        event: &RtmEvent,
        ctx: &EventContext,
    ) -> Result<HandlerResult, EventHandlerError> {
        let RtmEvent::Message { channel_id, user_id, text } = event else {
            return Ok(HandlerResult::Ignored);
        };
        let sender = user_id.as_deref().unwrap_or("unknown");

        match classify(text, &ctx.session.self_id) {
            Intent::Greeting => {
                self.gateway.send_typing(channel_id).await?;
                self.gateway.send_text(channel_id, &replies::greeting(sender)).await?;
                debug!(user_id = sender, "greeted sender");

                if is_direct_message_channel(channel_id) {
                    self.gateway
                        .send_text(channel_id, replies::direct_message_followup())
                        .await?;
                    debug!(channel_id = %channel_id, "greeting arrived as a direct message");
                }
                Ok(HandlerResult::Replied)
            }
            Intent::AttachmentDemo => {
                let message = attachment_demo_message(channel_id);
                self.gateway.post_message(&message).await?;
                debug!(channel_id = %channel_id, "posted attachment demo");
                Ok(HandlerResult::Replied)
            }
            Intent::MentionAcknowledged => {
                self.gateway.send_text(channel_id, replies::mention_acknowledgment()).await?;
                debug!(channel_id = %channel_id, "acknowledged mention");
                Ok(HandlerResult::Replied)
            }
            Intent::HelpRequest => {
                self.gateway.send_text(channel_id, replies::help_text()).await?;
                debug!(channel_id = %channel_id, "sent help text");
                Ok(HandlerResult::Replied)
            }
            Intent::BadgeLookup(badge_id) => {
                // Individual badge rendering is not wired up yet; hold the
                // channel with a placeholder so the command is not silent.
                self.gateway.send_text(channel_id, replies::badge_lookup_placeholder()).await?;
                debug!(badge_id = %badge_id, "badge lookup placeholder sent");
                Ok(HandlerResult::Replied)
            }
            Intent::BadgeTemplateLookup(template_id) => {
                match self.badge_templates.template_attachment(&template_id).await {
                    Ok(Some(attachment)) => {
                        let message = AttachmentMessage::new(channel_id.clone(), vec![attachment]);
                        self.gateway.post_message(&message).await?;
                        debug!(template_id = %template_id, "posted badge template card");
                        Ok(HandlerResult::Replied)
                    }
                    Ok(None) => {
                        debug!(template_id = %template_id, "badge template not found");
                        Ok(HandlerResult::Processed)
                    }
                    Err(error) => {
                        warn!(
                            template_id = %template_id,
                            correlation_id = %ctx.correlation_id,
                            error = %error,
                            "badge template lookup failed; leaving channel quiet"
                        );
                        Ok(HandlerResult::Processed)
                    }
                }
            }
            Intent::UnknownBotCommand => {
                self.gateway.send_text(channel_id, &replies::unknown_command(sender)).await?;
                debug!(user_id = sender, "unknown bot command");
                Ok(HandlerResult::Replied)
            }
            Intent::Ignored => Ok(HandlerResult::Ignored),
        }
    }
}

/// Direct message channel ids start with `D`.
pub fn is_direct_message_channel(channel_id: &str) -> bool {
    channel_id.starts_with('D')
}
