//! Slack integration: realtime event ingestion, intent-driven handlers, and
//! the outbound Web API gateway.
//!
//! The realtime transport is a trait seam so the event loop and handlers can
//! be exercised end to end with scripted fakes.

pub mod attachment;
pub mod events;
pub mod gateway;
pub mod rtm;

pub use attachment::{Attachment, AttachmentBuilder, AttachmentMessage};
pub use events::{
    default_dispatcher, BadgeTemplateService, EventContext, EventDispatcher, HandlerResult,
    RtmEvent, SessionInfo,
};
pub use gateway::{Gateway, GatewayError, NoopGateway, WebApiGateway};
pub use rtm::{NoopRtmTransport, ReconnectPolicy, RtmRunner, RtmTransport};
