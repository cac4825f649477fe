//! Message responder
//!
//! Decides how to answer a message. Pure apart from the random choices, which
//! come from the caller's RNG.

use dayvid_gateway::{DispatchEvent, GatewayEventType};
use rand::seq::SliceRandom;
use rand::Rng;
use regex::Regex;
use std::sync::LazyLock;

/// Emojis used to reward a correct spelling
pub const REACTION_EMOJIS: [&str; 2] = ["🤤", "🔥"];

static DAYVID_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)da(y)+vid").expect("DAYVID_PATTERN is a valid regex"));

/// Trigger words and the reply templates they select from
struct Rule {
    triggers: &'static [&'static str],
    templates: &'static [&'static str],
}

/// Checked in order; the first rule with a matching trigger wins
const RULES: &[Rule] = &[
    Rule {
        triggers: &["david"],
        templates: &[
            "{david_string}!",
            "Ah, my ole' fern {david_string}!",
            "What a good ole' Toronno boy that {david_string} is, innhe?",
        ],
    },
    Rule {
        triggers: &["leg", "legman", "legrnan"],
        templates: &[
            "Do you perhaps mean {david_string}, {author}?",
            "{author}, I think you mean {david_string}.",
        ],
    },
];

/// What to do in response to a message
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Add a reaction to the message
    React {
        channel_id: String,
        message_id: String,
        emoji: &'static str,
    },
    /// Post a reply in the message's channel
    Reply { channel_id: String, content: String },
}

/// Chooses an [`Action`] for incoming messages
#[derive(Debug, Clone)]
pub struct Responder {
    bot_username: String,
}

impl Responder {
    /// Create a responder that never answers `bot_username`
    pub fn new(bot_username: impl Into<String>) -> Self {
        Self {
            bot_username: bot_username.into(),
        }
    }

    /// Decide how to answer `event`, if at all
    pub fn respond<R: Rng + ?Sized>(&self, event: &DispatchEvent, rng: &mut R) -> Option<Action> {
        if !event.is(GatewayEventType::MessageCreate) {
            return None;
        }

        let (Some(channel_id), Some(author), Some(content)) = (
            event.channel_id.as_deref(),
            event.author_name.as_deref(),
            event.content.as_deref(),
        ) else {
            tracing::debug!(seq = ?event.sequence, "MESSAGE_CREATE without channel, author or content");
            return None;
        };

        if author == self.bot_username {
            return None;
        }

        let content = content.to_lowercase();

        if DAYVID_PATTERN.is_match(&content) {
            let message_id = event.message_id.clone()?;
            let emoji = REACTION_EMOJIS.choose(rng).copied()?;
            return Some(Action::React {
                channel_id: channel_id.to_string(),
                message_id,
                emoji,
            });
        }

        let rule = RULES
            .iter()
            .find(|rule| rule.triggers.iter().any(|t| content.contains(t)))?;
        let template = rule.templates.choose(rng)?;

        Some(Action::Reply {
            channel_id: channel_id.to_string(),
            content: template
                .replace("{david_string}", &david_string(rng))
                .replace("{author}", author),
        })
    }
}

/// `DA`, one to ten `Y`s, then `VID`
pub fn david_string<R: Rng + ?Sized>(rng: &mut R) -> String {
    format!("DA{}VID", "Y".repeat(rng.gen_range(1..=10)))
}
