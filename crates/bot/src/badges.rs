//! Bridges Acclaim badge template lookups into Slack attachments.

use async_trait::async_trait;

use badgey_acclaim::model::BadgeTemplate;
use badgey_acclaim::{standard_size_image_url, AcclaimClient, AcclaimError};
use badgey_slack::events::{BadgeTemplateService, EventHandlerError};
use badgey_slack::Attachment;

pub struct AcclaimTemplateService {
    client: AcclaimClient,
}

impl AcclaimTemplateService {
    pub fn new(client: AcclaimClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl BadgeTemplateService for AcclaimTemplateService {
    async fn template_attachment(
        &self,
        template_id: &str,
    ) -> Result<Option<Attachment>, EventHandlerError> {
        match self.client.badge_template(template_id).await {
            Ok(template) => template_attachment(&template)
                .map(Some)
                .map_err(|error| EventHandlerError::BadgeLookup(error.to_string())),
            Err(AcclaimError::NotFound) => Ok(None),
            Err(error) => Err(EventHandlerError::BadgeLookup(error.to_string())),
        }
    }
}

/// Renders a badge template as a Slack attachment: the template name as the
/// linked title, description as body text, and the standard sized image.
pub fn template_attachment(template: &BadgeTemplate) -> Result<Attachment, AcclaimError> {
    let image_url = standard_size_image_url(&template.image.url)?;

    let mut builder = Attachment::builder()
        .fallback(template.name.clone())
        .title(template.name.clone())
        .image_url(image_url);
    if let Some(url) = &template.url {
        builder = builder.title_link(url.clone());
    }
    if let Some(description) = &template.description {
        builder = builder.text(description.clone());
    }

    Ok(builder.build())
}

#[cfg(test)]
mod tests {
    use badgey_acclaim::model::{BadgeTemplate, Image};

    use super::template_attachment;

    fn template() -> BadgeTemplate {
        BadgeTemplate {
            name: "Rustacean".to_owned(),
            description: Some("Ships production Rust.".to_owned()),
            url: Some("https://www.youracclaim.com/org/example/badge/rustacean".to_owned()),
            image: Image { url: "https://cdn.example/images/abc/badge.png".to_owned() },
        }
    }

    #[test]
    fn maps_template_fields_onto_the_attachment() {
        let attachment = template_attachment(&template()).expect("attachment");

        assert_eq!(attachment.title.as_deref(), Some("Rustacean"));
        assert_eq!(attachment.fallback.as_deref(), Some("Rustacean"));
        assert_eq!(attachment.text.as_deref(), Some("Ships production Rust."));
        assert_eq!(
            attachment.title_link.as_deref(),
            Some("https://www.youracclaim.com/org/example/badge/rustacean")
        );
        assert_eq!(
            attachment.image_url.as_deref(),
            Some("https://cdn.example/images/abc/standard_badge.png")
        );
    }

    #[test]
    fn omits_optional_fields_the_template_lacks() {
        let mut template = template();
        template.description = None;
        template.url = None;

        let attachment = template_attachment(&template).expect("attachment");

        assert!(attachment.text.is_none());
        assert!(attachment.title_link.is_none());
        assert!(attachment.image_url.is_some());
    }

    #[test]
    fn propagates_bad_image_urls() {
        let mut template = template();
        template.image.url = "not a url".to_owned();

        assert!(template_attachment(&template).is_err());
    }
}
