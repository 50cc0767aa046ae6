//! Parsing of login choices and composer lines.

use crate::chat::{Attachment, UserMap};

/// Emojis offered by `/emoji`.
pub const EMOJIS: &[&str] = &[
    "😊", "😂", "❤️", "👍", "🎉", "🔥", "😎", "🙏", "😍", "😅", "🤔",
];

/// One line typed into the composer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Plain text message.
    Send(String),
    /// `/file <path-or-url> [caption]`
    SendFile { attachment: Attachment, caption: String },
    /// `/emoji` or `/emoji <n>`: list the picker, or send the n-th emoji.
    Emoji(Option<usize>),
    /// `/typing on|off`
    Typing(bool),
    Clear,
    Logout,
    Quit,
    Help,
    /// Blank line.
    Empty,
    /// Slash command that did not parse, with a hint for the user.
    Invalid(String),
}

impl Command {
    pub fn parse(line: &str) -> Self {
        let line = line.trim();
        if line.is_empty() {
            return Command::Empty;
        }
        let Some(rest) = line.strip_prefix('/') else {
            return Command::Send(line.to_string());
        };

        let (name, args) = match rest.split_once(char::is_whitespace) {
            Some((name, args)) => (name, args.trim()),
            None => (rest, ""),
        };
        match name {
            "file" => {
                let (target, caption) = match args.split_once(char::is_whitespace) {
                    Some((target, caption)) => (target, caption.trim()),
                    None => (args, ""),
                };
                if target.is_empty() {
                    return Command::Invalid("usage: /file <path-or-url> [caption]".to_string());
                }
                Command::SendFile {
                    attachment: Attachment::from_url(target),
                    caption: caption.to_string(),
                }
            }
            "emoji" if args.is_empty() => Command::Emoji(None),
            "emoji" => match args.parse::<usize>() {
                Ok(n) if (1..=EMOJIS.len()).contains(&n) => Command::Emoji(Some(n - 1)),
                _ => Command::Invalid(format!("usage: /emoji [1-{}]", EMOJIS.len())),
            },
            "typing" => match args {
                "on" => Command::Typing(true),
                "off" => Command::Typing(false),
                _ => Command::Invalid("usage: /typing on|off".to_string()),
            },
            "clear" => Command::Clear,
            "logout" => Command::Logout,
            "quit" | "exit" => Command::Quit,
            "help" | "?" => Command::Help,
            other => Command::Invalid(format!("unknown command '/{other}', try /help")),
        }
    }
}

/// Resolve a login-screen answer: a 1-based position or a user id.
pub fn parse_login_choice(input: &str, users: &UserMap) -> Option<String> {
    let input = input.trim();
    if users.contains_key(input) {
        return Some(input.to_string());
    }
    let n: usize = input.parse().ok()?;
    users.keys().nth(n.checked_sub(1)?).cloned()
}
