//! Line-oriented terminal front end.
//!
//! Plays the part of the login screen, conversation header, message list
//! and composer: it reads commands from stdin, calls store methods, and
//! prints whatever each committed state adds.

pub mod command;
pub mod format;
pub mod render;

use std::io::Write;

use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};

use crate::store::{ChatProvider, ChatStore};
use command::{parse_login_choice, Command, EMOJIS};
use render::ConversationView;

type Input = Lines<BufReader<Stdin>>;

/// What the caller should do after a composer command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Stay in the conversation, optionally telling the user something.
    Continue(Option<String>),
    Logout,
    Quit,
}

/// Apply one composer command to the store.
pub fn apply_command(store: &ChatStore, command: Command) -> Outcome {
    let rejected = || Outcome::Continue(Some("(nothing to send)".to_string()));
    match command {
        Command::Send(text) => {
            store.set_typing(false);
            if store.send_message(&text, None) {
                Outcome::Continue(None)
            } else {
                rejected()
            }
        }
        Command::SendFile {
            attachment,
            caption,
        } => {
            store.set_typing(false);
            if store.send_message(&caption, Some(attachment)) {
                Outcome::Continue(None)
            } else {
                rejected()
            }
        }
        Command::Emoji(None) => Outcome::Continue(Some(render::emoji_picker())),
        Command::Emoji(Some(i)) => match EMOJIS.get(i) {
            Some(emoji) if store.send_message(emoji, None) => Outcome::Continue(None),
            _ => rejected(),
        },
        Command::Typing(on) => {
            store.set_typing(on);
            Outcome::Continue(None)
        }
        Command::Clear => {
            store.clear_messages();
            Outcome::Continue(None)
        }
        Command::Logout => Outcome::Logout,
        Command::Quit => Outcome::Quit,
        Command::Help => Outcome::Continue(Some(render::help())),
        Command::Empty => Outcome::Continue(None),
        Command::Invalid(hint) => Outcome::Continue(Some(hint)),
    }
}

/// Run the interactive loop until the user quits or stdin closes.
///
/// `user` skips the login screen for the first session.
pub async fn run(provider: ChatProvider, mut user: Option<String>) -> anyhow::Result<()> {
    let store = std::sync::Arc::clone(provider.store());
    let mut input = BufReader::new(tokio::io::stdin()).lines();

    loop {
        let user_id = match user.take() {
            Some(id) => id,
            None => {
                print!("{}", render::login_screen(&store.state()));
                flush();
                let line = tokio::select! {
                    line = input.next_line() => line?,
                    _ = tokio::signal::ctrl_c() => None,
                };
                let Some(line) = line else { break };
                if matches!(Command::parse(&line), Command::Quit) {
                    break;
                }
                match parse_login_choice(&line, &store.state().users) {
                    Some(id) => id,
                    None => {
                        println!("Unknown user '{}'", line.trim());
                        continue;
                    }
                }
            }
        };

        if !store.login(&user_id) {
            println!("Unknown user '{user_id}'");
            continue;
        }
        let end = conversation(&provider, &mut input).await;
        store.logout();
        match end? {
            Outcome::Quit => break,
            Outcome::Logout | Outcome::Continue(_) => {}
        }
    }

    provider.shutdown().await;
    Ok(())
}

/// One logged-in session. Returns `Logout` or `Quit`.
async fn conversation(provider: &ChatProvider, input: &mut Input) -> anyhow::Result<Outcome> {
    let store = provider.store();
    let _receipts = provider.read_receipts();
    let mut updates = store.subscribe();
    let mut view = ConversationView::new();

    let state = updates.borrow_and_update().clone();
    print_lines(view.update(&state));

    loop {
        tokio::select! {
            line = input.next_line() => {
                let Some(line) = line? else {
                    return Ok(Outcome::Quit);
                };
                match apply_command(store, Command::parse(&line)) {
                    Outcome::Continue(Some(note)) => println!("{note}"),
                    Outcome::Continue(None) => {}
                    end => return Ok(end),
                }
            }
            changed = updates.changed() => {
                if changed.is_err() {
                    return Ok(Outcome::Quit);
                }
                let state = updates.borrow_and_update().clone();
                print_lines(view.update(&state));
            }
            _ = tokio::signal::ctrl_c() => return Ok(Outcome::Quit),
        }
    }
}

fn print_lines(lines: Vec<String>) {
    for line in lines {
        println!("{line}");
    }
    flush();
}

fn flush() {
    let _ = std::io::stdout().flush();
}
