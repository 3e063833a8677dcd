//! Fixed reply text for the canned conversation paths.

pub fn help_text() -> &'static str {
    "I will respond to the following messages:\n\
     `bot hi` for a simple message.\n\
     `bot attachment` to see a Slack attachment message.\n\
     `@<your bot's name>` to demonstrate detecting a mention.\n\
     `bot help` to see this again."
}

pub fn greeting(user_id: &str) -> String {
    format!("Hello <@{user_id}>.")
}

pub fn direct_message_followup() -> &'static str {
    "It's nice to talk to you directly."
}

pub fn mention_acknowledgment() -> &'static str {
    "You really do care about me. :heart:"
}

pub fn channel_welcome() -> String {
    format!("Thanks for the invite! I don't do much yet, but {}", help_text())
}

pub fn unknown_command(user_id: &str) -> String {
    format!("Sorry <@{user_id}>, I don't understand.\n{}", help_text())
}

pub fn badge_lookup_placeholder() -> &'static str {
    "under construction"
}

#[cfg(test)]
mod tests {
    use super::{channel_welcome, greeting, help_text, unknown_command};

    #[test]
    fn greeting_addresses_the_sender() {
        assert_eq!(greeting("U9"), "Hello <@U9>.");
    }

    #[test]
    fn help_lists_every_supported_command() {
        let help = help_text();
        assert!(help.contains("`bot hi`"));
        assert!(help.contains("`bot attachment`"));
        assert!(help.contains("`bot help`"));
    }

    #[test]
    fn welcome_and_unknown_command_both_include_help() {
        assert!(channel_welcome().contains(help_text()));
        let reply = unknown_command("U7");
        assert!(reply.starts_with("Sorry <@U7>"));
        assert!(reply.contains(help_text()));
    }
}
