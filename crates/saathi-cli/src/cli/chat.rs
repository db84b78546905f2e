//! Interactive copilot chat loop.
//!
//! Drives the core chat manager from a terminal: loads saved history,
//! prints the greeting, then reads lines with async readline, handling
//! slash commands for session switching, language selection, and exit.

use std::time::Duration;

use console::style;
use rustyline_async::{Readline, ReadlineEvent};
use tracing::debug;

use saathi_core::backend::CopilotBackend;
use saathi_core::chat::{relative_time, ChatManager, ChatStore, SendOutcome};
use saathi_types::backend::Language;
use saathi_types::chat::{ChatMessage, MessageKind};

use crate::state::AppState;

/// Slash commands available inside the chat loop.
#[derive(Debug, PartialEq)]
enum ChatCommand {
    /// Show available commands.
    Help,
    /// Clear the terminal screen.
    Clear,
    /// Exit the chat.
    Exit,
    /// Start a fresh conversation.
    New,
    /// List saved sessions.
    Sessions,
    /// Open a session by its list index.
    Open(usize),
    /// Switch the reply language.
    Language(String),
    /// Unknown command.
    Unknown(String),
}

/// Parse user input as a slash command.
///
/// Returns `None` if the input doesn't start with `/`.
fn parse_command(input: &str) -> Option<ChatCommand> {
    let trimmed = input.trim();
    if !trimmed.starts_with('/') {
        return None;
    }

    let parts: Vec<&str> = trimmed.splitn(2, ' ').collect();
    let cmd = parts[0].to_lowercase();
    let arg = parts.get(1).map(|s| s.trim());

    match cmd.as_str() {
        "/help" | "/h" | "/?" => Some(ChatCommand::Help),
        "/clear" | "/cls" => Some(ChatCommand::Clear),
        "/exit" | "/quit" | "/q" => Some(ChatCommand::Exit),
        "/new" => Some(ChatCommand::New),
        "/sessions" => Some(ChatCommand::Sessions),
        "/open" => match arg.and_then(|a| a.parse::<usize>().ok()) {
            Some(index) => Some(ChatCommand::Open(index)),
            None => Some(ChatCommand::Unknown(
                "/open requires a session number".to_string(),
            )),
        },
        "/language" | "/lang" => match arg {
            Some(lang) if !lang.is_empty() => Some(ChatCommand::Language(lang.to_string())),
            _ => Some(ChatCommand::Unknown(
                "/language requires english, hindi, or hinglish".to_string(),
            )),
        },
        other => Some(ChatCommand::Unknown(other.to_string())),
    }
}

fn print_help() {
    println!();
    println!("  {}", style("Available commands:").bold());
    println!();
    println!("  {}      {}", style("/help").cyan(), "Show this help message");
    println!("  {}     {}", style("/clear").cyan(), "Clear the screen");
    println!("  {}      {}", style("/exit").cyan(), "End the chat");
    println!("  {}       {}", style("/new").cyan(), "Start a fresh conversation");
    println!("  {}  {}", style("/sessions").cyan(), "List saved sessions");
    println!("  {}  {}", style("/open <n>").cyan(), "Continue a saved session");
    println!("  {}  {}", style("/language").cyan(), "Switch reply language");
    println!();
    println!("  {}", style("Ctrl+D to exit").dim());
    println!();
}

fn print_message(message: &ChatMessage) {
    let label = match message.kind {
        MessageKind::User => style("You >").green().bold(),
        MessageKind::Bot => style("Saathi >").cyan().bold(),
    };
    println!("  {} {}", label, message.content);
}

fn print_sessions<S: ChatStore, B: CopilotBackend>(manager: &ChatManager<S, B>) {
    if manager.sessions().is_empty() {
        println!("\n  {}\n", style("No saved sessions yet.").dim());
        return;
    }
    println!();
    for (index, session) in manager.sessions().iter().enumerate() {
        let marker = if manager.active_session_id() == Some(session.id.as_str()) {
            "*"
        } else {
            " "
        };
        println!(
            "  {marker}{} {} {} {}",
            style(format!("[{}]", index + 1)).cyan(),
            style(session.title()).bold(),
            session.preview,
            style(relative_time(session.last_activity_at, chrono::Utc::now())).dim(),
        );
    }
    println!();
}

fn thinking_spinner() -> indicatif::ProgressBar {
    let spinner = indicatif::ProgressBar::new_spinner();
    if let Ok(template) =
        indicatif::ProgressStyle::default_spinner().template("{spinner:.cyan} {msg}")
    {
        spinner.set_style(template);
    }
    spinner.set_message("thinking...");
    spinner.enable_steady_tick(Duration::from_millis(80));
    spinner
}

/// Run the interactive chat loop.
pub async fn run_chat_loop(state: &AppState, language: Language) -> anyhow::Result<()> {
    let mut manager = ChatManager::new(state.chat_store(), state.backend());
    manager.set_language(language);

    if state.user.is_none() && state.config.persistence_enabled() {
        println!(
            "  {}",
            style("Not signed in; this chat will not be saved.").yellow()
        );
    }

    manager.load_history(state.user.as_ref()).await;
    debug!(sessions = manager.sessions().len(), "history loaded");

    println!();
    for message in manager.transcript() {
        print_message(message);
    }
    if !manager.sessions().is_empty() {
        println!(
            "\n  {}",
            style(format!(
                "{} saved session(s). /sessions to list, /open <n> to continue one.",
                manager.sessions().len()
            ))
            .dim()
        );
    }
    println!();

    let prompt = format!("  {} ", style("You >").green().bold());
    let (mut rl, _writer) = Readline::new(prompt)
        .map_err(|e| anyhow::anyhow!("failed to initialize input: {e}"))?;

    loop {
        let line = match rl.readline().await {
            Ok(ReadlineEvent::Line(line)) => line.trim().to_string(),
            Ok(ReadlineEvent::Eof) => {
                println!("\n  {}", style("Chat ended.").dim());
                break;
            }
            Ok(ReadlineEvent::Interrupted) => {
                println!("\n  {}", style("Press Ctrl+D to exit, or keep chatting.").dim());
                continue;
            }
            Err(_) => break,
        };
        if line.is_empty() {
            continue;
        }

        if let Some(cmd) = parse_command(&line) {
            match cmd {
                ChatCommand::Help => print_help(),
                ChatCommand::Clear => {
                    let _ = rl.clear();
                }
                ChatCommand::Exit => {
                    println!("\n  {}", style("Chat ended.").dim());
                    break;
                }
                ChatCommand::New => {
                    manager.start_new_session(state.user.as_ref());
                    println!();
                    for message in manager.transcript() {
                        print_message(message);
                    }
                    println!();
                }
                ChatCommand::Sessions => print_sessions(&manager),
                ChatCommand::Open(index) => {
                    let selected = manager
                        .sessions()
                        .get(index.wrapping_sub(1))
                        .map(|session| session.id.clone());
                    match selected {
                        Some(id) => {
                            manager.select_session(&id);
                            println!();
                            for message in manager.transcript() {
                                print_message(message);
                            }
                            println!();
                        }
                        None => println!(
                            "\n  {} No session {index}. /sessions to list them.\n",
                            style("?").yellow().bold()
                        ),
                    }
                }
                ChatCommand::Language(lang) => match lang.parse::<Language>() {
                    Ok(language) => {
                        manager.set_language(language);
                        println!(
                            "\n  {} Replies will be in {language}.\n",
                            style("*").cyan().bold()
                        );
                    }
                    Err(error) => {
                        println!("\n  {} {error}\n", style("!").yellow().bold());
                    }
                },
                ChatCommand::Unknown(name) => println!(
                    "\n  {} Unknown command: {}. Type /help for available commands.\n",
                    style("?").yellow().bold(),
                    style(name).dim()
                ),
            }
            continue;
        }

        let spinner = thinking_spinner();
        let outcome = manager.send_message(&line, state.user.as_ref()).await;
        spinner.finish_and_clear();

        match outcome {
            SendOutcome::Ignored => continue,
            SendOutcome::Replied | SendOutcome::Failed => {
                // The manager appends the reply (or the error notice) as the
                // final bot message of the transcript.
                if let Some(message) = manager.transcript().last() {
                    println!();
                    print_message(message);
                    println!();
                }
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_help() {
        assert_eq!(parse_command("/help"), Some(ChatCommand::Help));
        assert_eq!(parse_command("/?"), Some(ChatCommand::Help));
    }

    #[test]
    fn test_parse_open() {
        assert_eq!(parse_command("/open 2"), Some(ChatCommand::Open(2)));
        assert!(matches!(
            parse_command("/open"),
            Some(ChatCommand::Unknown(_))
        ));
        assert!(matches!(
            parse_command("/open two"),
            Some(ChatCommand::Unknown(_))
        ));
    }

    #[test]
    fn test_parse_language() {
        assert_eq!(
            parse_command("/language hindi"),
            Some(ChatCommand::Language("hindi".to_string()))
        );
        assert!(matches!(
            parse_command("/lang"),
            Some(ChatCommand::Unknown(_))
        ));
    }

    #[test]
    fn test_parse_not_command() {
        assert_eq!(parse_command("hello"), None);
    }

    #[test]
    fn test_parse_unknown() {
        assert_eq!(
            parse_command("/foo"),
            Some(ChatCommand::Unknown("/foo".to_string()))
        );
    }
}
