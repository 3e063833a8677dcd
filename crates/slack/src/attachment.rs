//! Slack message attachments for richly formatted replies.

use serde::Serialize;

/// A classic Slack attachment. Only fields the bot sets are modeled; unset
/// fields are omitted from the serialized payload entirely.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Attachment {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fallback: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pretext: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title_link: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub footer: Option<String>,
}

impl Attachment {
    pub fn builder() -> AttachmentBuilder {
        AttachmentBuilder::default()
    }
}

#[derive(Default)]
pub struct AttachmentBuilder {
    attachment: Attachment,
}

impl AttachmentBuilder {
    pub fn fallback(mut self, fallback: impl Into<String>) -> Self {
        self.attachment.fallback = Some(fallback.into());
        self
    }

    pub fn color(mut self, color: impl Into<String>) -> Self {
        self.attachment.color = Some(color.into());
        self
    }

    pub fn pretext(mut self, pretext: impl Into<String>) -> Self {
        self.attachment.pretext = Some(pretext.into());
        self
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.attachment.title = Some(title.into());
        self
    }

    pub fn title_link(mut self, title_link: impl Into<String>) -> Self {
        self.attachment.title_link = Some(title_link.into());
        self
    }

    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.attachment.text = Some(text.into());
        self
    }

    pub fn image_url(mut self, image_url: impl Into<String>) -> Self {
        self.attachment.image_url = Some(image_url.into());
        self
    }

    pub fn footer(mut self, footer: impl Into<String>) -> Self {
        self.attachment.footer = Some(footer.into());
        self
    }

    pub fn build(self) -> Attachment {
        self.attachment
    }
}

/// `chat.postMessage` payload carrying one or more attachments.
#[derive(Clone, Debug, Serialize)]
pub struct AttachmentMessage {
    pub channel: String,
    pub as_user: bool,
    pub attachments: Vec<Attachment>,
}

impl AttachmentMessage {
    pub fn new(channel: impl Into<String>, attachments: Vec<Attachment>) -> Self {
        Self { channel: channel.into(), as_user: true, attachments }
    }
}

/// The fixed demo attachment sent in reply to `bot attachment`.
pub fn attachment_demo_message(channel: &str) -> AttachmentMessage {
    let main_msg =
        "Beep Beep Boop is a ridiculously simple hosting platform for your Slackbots.";
    let attachment = Attachment::builder()
        .fallback(main_msg)
        .pretext("We bring bots to life. :sunglasses: :thumbsup:")
        .title("Host, deploy and share your bot in seconds.")
        .image_url("https://storage.googleapis.com/beepboophq/_assets/bot-1.22f6fb.png")
        .title_link("https://beepboophq.com/")
        .text(main_msg)
        .color("#7CD197")
        .build();

    AttachmentMessage::new(channel, vec![attachment])
}

#[cfg(test)]
mod tests {
    use super::{attachment_demo_message, Attachment};

    #[test]
    fn unset_fields_are_omitted_from_payload() {
        let attachment = Attachment::builder().title("Rustacean").build();
        let json = serde_json::to_value(&attachment).expect("serialize");

        assert_eq!(json, serde_json::json!({ "title": "Rustacean" }));
    }

    #[test]
    fn demo_message_posts_as_user_to_the_source_channel() {
        let message = attachment_demo_message("C42");

        assert_eq!(message.channel, "C42");
        assert!(message.as_user);
        assert_eq!(message.attachments.len(), 1);
        assert_eq!(message.attachments[0].color.as_deref(), Some("#7CD197"));
        assert_eq!(
            message.attachments[0].title.as_deref(),
            Some("Host, deploy and share your bot in seconds.")
        );
    }
}
