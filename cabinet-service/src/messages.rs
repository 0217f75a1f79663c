//! User-facing message catalog.
//!
//! Chat and health texts live in `messages/en.ftl` and are compiled in.

use fluent_bundle::concurrent::FluentBundle;
use fluent_bundle::{FluentArgs, FluentResource};
use tracing::warn;
use unic_langid::langid;

const EN_MESSAGES: &str = include_str!("../messages/en.ftl");

/// English Fluent bundle shared across requests
pub struct MessageCatalog {
    bundle: FluentBundle<FluentResource>,
}

impl MessageCatalog {
    pub fn new() -> Self {
        let resource = FluentResource::try_new(EN_MESSAGES.to_string()).unwrap_or_else(
            |(resource, errors)| {
                warn!(errors = ?errors, "Message catalog has syntax errors");
                resource
            },
        );

        let mut bundle = FluentBundle::new_concurrent(vec![langid!("en")]);
        // Messages end up in plain-text chat transcripts
        bundle.set_use_isolating(false);
        if let Err(errors) = bundle.add_resource(resource) {
            warn!(errors = ?errors, "Duplicate message ids in catalog");
        }

        Self { bundle }
    }

    /// The message for `key`, or the key itself when it is not in the catalog
    pub fn get(&self, key: &str) -> String {
        self.render(key, None)
    }

    /// The message for `key` with `{ $name }` placeholders filled from `args`
    pub fn format(&self, key: &str, args: &[(&str, &str)]) -> String {
        let mut fluent_args = FluentArgs::new();
        for (name, value) in args {
            fluent_args.set(*name, *value);
        }
        self.render(key, Some(&fluent_args))
    }

    fn render(&self, key: &str, args: Option<&FluentArgs>) -> String {
        let Some(pattern) = self.bundle.get_message(key).and_then(|m| m.value()) else {
            warn!(key = %key, "Missing message");
            return key.to_string();
        };

        let mut errors = vec![];
        let text = self.bundle.format_pattern(pattern, args, &mut errors);
        if !errors.is_empty() {
            warn!(key = %key, errors = ?errors, "Message formatting errors");
        }
        text.into_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_message() {
        let catalog = MessageCatalog::new();
        assert_eq!(
            catalog.get("chat-confirm-recipe"),
            "Would you like to use this recipe?"
        );
    }

    #[test]
    fn test_format_has_no_isolation_marks() {
        let catalog = MessageCatalog::new();
        assert_eq!(
            catalog.format("chat-recipe-error", &[("reason", "Status 500")]),
            "⚠️ Failed to get recipe: Status 500"
        );
    }

    #[test]
    fn test_unknown_key_falls_back_to_key() {
        let catalog = MessageCatalog::new();
        assert_eq!(catalog.get("nonexistent-key"), "nonexistent-key");
    }

    #[test]
    fn test_every_chat_message_is_present() {
        let catalog = MessageCatalog::new();
        for key in [
            "chat-no-recipe",
            "chat-recipe-failed",
            "chat-inventory-updated",
            "chat-inventory-failed",
            "chat-declined",
            "chat-empty-input",
            "chat-empty-pantry",
            "health-status-healthy",
        ] {
            assert_ne!(catalog.get(key), key);
        }
    }
}
