use std::sync::LazyLock;

use regex::Regex;

/// Canonical 8-4-4-4-12 UUID. Hex digits match case-insensitively; captures
/// keep whatever casing the sender typed.
const UUID_PATTERN: &str =
    "[0-9a-fA-F]{8}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{12}";

static UUID_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(UUID_PATTERN).unwrap());
static BADGE_TEMPLATE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(&format!("badge template ({UUID_PATTERN})")).unwrap());
static BADGE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(&format!("badge ({UUID_PATTERN})")).unwrap());

/// Classified meaning of an inbound message. Produced and consumed within a
/// single event-handling invocation; never stored.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Intent {
    Greeting,
    AttachmentDemo,
    MentionAcknowledged,
    HelpRequest,
    BadgeLookup(String),
    BadgeTemplateLookup(String),
    UnknownBotCommand,
    Ignored,
}

type Rule = fn(&str, &str) -> Option<Intent>;

/// Ordered dispatch rules, first match wins. Exact phrases come before the
/// mention check, specific badge patterns before the generic `bot` fallback.
const RULES: &[Rule] =
    &[exact_phrase, mention, badge_template_lookup, badge_lookup, bot_fallback];

pub fn classify(text: &str, self_id: &str) -> Intent {
    RULES.iter().find_map(|rule| rule(text, self_id)).unwrap_or(Intent::Ignored)
}

/// The literal token Slack renders for a user mention.
pub fn mention_token(self_id: &str) -> String {
    format!("<@{self_id}>")
}

/// First canonical UUID anywhere in the text, original casing preserved.
pub fn extract_uuid(text: &str) -> Option<&str> {
    UUID_RE.find(text).map(|found| found.as_str())
}

/// A channel join counts as a self-invite when the channel's latest message
/// starts with the bot's own mention token.
pub fn invited_by_self(latest_text: &str, self_id: &str) -> bool {
    latest_text.starts_with(&mention_token(self_id))
}

fn exact_phrase(text: &str, _self_id: &str) -> Option<Intent> {
    match text {
        "hi" | "bot hi" => Some(Intent::Greeting),
        "attachment" | "bot attachment" => Some(Intent::AttachmentDemo),
        "help" | "bot help" => Some(Intent::HelpRequest),
        _ => None,
    }
}

fn mention(text: &str, self_id: &str) -> Option<Intent> {
    text.contains(&mention_token(self_id)).then_some(Intent::MentionAcknowledged)
}

fn badge_template_lookup(text: &str, _self_id: &str) -> Option<Intent> {
    BADGE_TEMPLATE_RE
        .captures(text)
        .map(|captures| Intent::BadgeTemplateLookup(captures[1].to_owned()))
}

fn badge_lookup(text: &str, _self_id: &str) -> Option<Intent> {
    // `badge template <uuid>` never reaches here, and would not match anyway:
    // this pattern requires the uuid directly after `badge `.
    BADGE_RE.captures(text).map(|captures| Intent::BadgeLookup(captures[1].to_owned()))
}

fn bot_fallback(text: &str, _self_id: &str) -> Option<Intent> {
    text.starts_with("bot").then_some(Intent::UnknownBotCommand)
}
