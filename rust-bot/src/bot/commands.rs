//! Command matching for mention text.

/// A command recognised in mention text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Ping,
    Help,
    Unknown,
}

impl Command {
    /// Pick the command for `text`. `ping` wins over `help`.
    pub fn parse(text: &str) -> Self {
        if contains_word(text, "ping") {
            Command::Ping
        } else if contains_word(text, "help") {
            Command::Help
        } else {
            Command::Unknown
        }
    }

    /// Reply text addressed to `user`.
    pub fn reply(self, user: &str) -> String {
        match self {
            Command::Ping => format!("<@{user}> pong"),
            Command::Help => format!("<@{user}> just send me a `ping`"),
            Command::Unknown => format!("<@{user}> I don't understand, ask me for `help`"),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Command::Ping => "ping",
            Command::Help => "help",
            Command::Unknown => "unknown",
        }
    }
}

/// Whether `text`, split on single spaces, contains `word`, ignoring case.
///
/// Punctuation attached to the word defeats the match.
pub fn contains_word(text: &str, word: &str) -> bool {
    let word = word.to_lowercase();
    text.split(' ').any(|w| w.to_lowercase() == word)
}
