//! Portfolio chat demo host
//!
//! Mounts one responder on a page session and drives it from stdin.

use futures::StreamExt;
use portfolio_chat::rules::Preset;
use portfolio_chat::transcript::Speaker;
use portfolio_chat::{ChatConfig, ChatUpdate, PageSession};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const HELP: &str = "Commands: /reset, /quick <experience|skills|results>, /card <id>, /cards, /quit";

/// One line of host input
#[derive(Debug, PartialEq, Eq)]
enum HostCommand<'a> {
    Quit,
    Reset,
    Quick(&'a str),
    Card(&'a str),
    Cards,
    Help,
    /// Slash-prefixed line matching no command
    Unknown(&'a str),
    /// Anything else is typed into the chat box
    Say(&'a str),
}

impl<'a> HostCommand<'a> {
    fn parse(line: &'a str) -> Self {
        let line = line.trim();
        let (command, argument) = line.split_once(' ').unwrap_or((line, ""));
        let argument = argument.trim();

        match command {
            "/quit" => HostCommand::Quit,
            "/reset" => HostCommand::Reset,
            "/quick" => HostCommand::Quick(argument),
            "/card" => HostCommand::Card(argument),
            "/cards" => HostCommand::Cards,
            "/help" => HostCommand::Help,
            _ if command.starts_with('/') => HostCommand::Unknown(command),
            _ => HostCommand::Say(line),
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "portfolio_chat=info".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .json()
                .with_current_span(false)
                .with_span_list(false)
                .with_writer(std::io::stderr),
        )
        .init();

    let config = ChatConfig::from_env();
    tracing::info!(
        reply_delay_ms = u64::try_from(config.reply_delay.as_millis()).unwrap_or(u64::MAX),
        "Configuration loaded"
    );

    let session = PageSession::open(&config);
    let chat = session.chat().clone();

    for turn in chat.snapshot().turns {
        println!("assistant> {}", turn.text);
    }
    println!("{HELP}");

    let mut updates = Box::pin(chat.updates());
    let printer = tokio::spawn(async move {
        while let Some(update) = updates.next().await {
            match update {
                ChatUpdate::TurnAppended { turn } if turn.speaker == Speaker::Assistant => {
                    println!("assistant> {}", turn.text);
                }
                ChatUpdate::ComposingChanged { composing: true } => println!("(typing...)"),
                ChatUpdate::TranscriptReset { greeting } => {
                    println!("-- conversation reset --");
                    println!("assistant> {}", greeting.text);
                }
                _ => {}
            }
        }
    });

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        match HostCommand::parse(&line) {
            HostCommand::Quit => break,
            HostCommand::Reset => chat.reset().await,
            HostCommand::Quick(name) => match Preset::from_name(name) {
                Some(preset) => chat.press(preset).await,
                None => println!("Unknown preset '{name}'. Try experience, skills or results."),
            },
            HostCommand::Card(id) => {
                if !session.ask_service(id) {
                    println!("Unknown card '{id}'. Use /cards to list them.");
                }
            }
            HostCommand::Cards => {
                for card in session.cards() {
                    println!("{:<10} {} - {}", card.id, card.title, card.summary);
                }
            }
            HostCommand::Help => println!("{HELP}"),
            HostCommand::Unknown(command) => {
                println!("Unknown command '{command}'.");
                println!("{HELP}");
            }
            HostCommand::Say(text) => {
                chat.edit_draft(text).await;
                chat.submit_draft().await;
            }
        }
    }

    // Let a reply that is still composing arrive before shutting down
    let mut snapshots = chat.subscribe_snapshots();
    let _ = tokio::time::timeout(
        config.reply_delay * 2,
        snapshots.wait_for(|s| !s.is_composing),
    )
    .await;

    session.close().await;
    // The update stream ends once the last handle is gone
    drop(chat);
    let _ = printer.await;
    Ok(())
}
