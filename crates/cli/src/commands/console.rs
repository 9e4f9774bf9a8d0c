//! `supportdesk console` — Interactive operator console.
//!
//! Plain lines go into the draft; slash commands act on it. Transcript
//! output is driven by conversation events, so composed replies appear on
//! their own once the composing delay elapses.

use std::path::Path;
use std::sync::Arc;

use supportdesk_core::{ConversationEvent, SystemClock};
use supportdesk_workflow::ConsoleSession;
use tokio::io::{self, AsyncBufReadExt, BufReader};
use tokio::sync::{broadcast, mpsc};

use crate::render;

/// A parsed line of operator input.
#[derive(Debug, PartialEq, Eq)]
pub enum ConsoleCommand {
    /// Append a line to the draft
    Text(String),
    Send,
    Escalate,
    /// List canned replies, or insert the 1-based one given
    Canned(Option<usize>),
    Insert(String),
    Auto,
    Suggest,
    Draft,
    Clear,
    Transcript,
    Export,
    Help,
    Quit,
    Unknown(String),
}

impl ConsoleCommand {
    pub fn parse(line: &str) -> Self {
        let trimmed = line.trim();
        let Some(rest) = trimmed.strip_prefix('/') else {
            return ConsoleCommand::Text(line.trim_end().to_string());
        };

        let mut parts = rest.splitn(2, char::is_whitespace);
        let name = parts.next().unwrap_or_default();
        let arg = parts.next().map(str::trim).unwrap_or_default();

        match name {
            "send" => ConsoleCommand::Send,
            "escalate" => ConsoleCommand::Escalate,
            "canned" if arg.is_empty() => ConsoleCommand::Canned(None),
            "canned" => match arg.parse::<usize>() {
                Ok(n) => ConsoleCommand::Canned(Some(n)),
                Err(_) => ConsoleCommand::Unknown(trimmed.to_string()),
            },
            "insert" if !arg.is_empty() => ConsoleCommand::Insert(arg.to_string()),
            "auto" => ConsoleCommand::Auto,
            "suggest" => ConsoleCommand::Suggest,
            "draft" => ConsoleCommand::Draft,
            "clear" => ConsoleCommand::Clear,
            "transcript" => ConsoleCommand::Transcript,
            "export" => ConsoleCommand::Export,
            "help" | "?" => ConsoleCommand::Help,
            "quit" | "exit" | "q" => ConsoleCommand::Quit,
            _ => ConsoleCommand::Unknown(trimmed.to_string()),
        }
    }
}

pub async fn run(config_path: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    let config = super::load_config(config_path)?;
    let customer = config.console.customer_name.clone();
    let mut session = ConsoleSession::from_config(&config, Arc::new(SystemClock))?;
    let mut events = session.events().subscribe();

    println!();
    println!("  ╔══════════════════════════════════════════════╗");
    println!("  ║        SupportDesk — Live Support Console     ║");
    println!("  ╚══════════════════════════════════════════════╝");
    println!();
    println!("  Customer:   {customer}");
    println!("  Knowledge:  {} articles", session.matcher().store().len());
    println!("  Reply delay: {} ms", config.scheduler.reply_delay_ms);
    println!();
    for message in session.store().messages().await {
        println!("{}", render::message(&message, &customer));
    }
    println!();
    print_help();

    let mut lines = spawn_stdin_reader();

    loop {
        tokio::select! {
            line = lines.recv() => {
                let Some(line) = line else { break };
                if !handle(&mut session, ConsoleCommand::parse(&line), &customer).await? {
                    break;
                }
            }
            event = events.recv() => {
                if !print_event(event, &customer) {
                    break;
                }
            }
        }
    }

    // Let pending follow-ups land before leaving
    while session.is_composing().await {
        if !print_event(events.recv().await, &customer) {
            break;
        }
    }
    while let Ok(event) = events.try_recv() {
        if let Some(text) = render::event(&event, &customer) {
            println!("{text}");
        }
    }

    println!();
    println!("  Session closed.");
    println!();
    Ok(())
}

/// Forward stdin lines until EOF.
fn spawn_stdin_reader() -> mpsc::Receiver<String> {
    let (tx, rx) = mpsc::channel(32);
    tokio::spawn(async move {
        let mut lines = BufReader::new(io::stdin()).lines();
        loop {
            match lines.next_line().await {
                Ok(Some(line)) => {
                    if tx.send(line).await.is_err() {
                        break;
                    }
                }
                Ok(None) => break,
                Err(e) => {
                    tracing::warn!(error = %e, "Failed to read console input");
                    break;
                }
            }
        }
    });
    rx
}

/// Print one received event. Returns `false` once the bus is closed.
fn print_event(
    event: Result<Arc<ConversationEvent>, broadcast::error::RecvError>,
    customer: &str,
) -> bool {
    match event {
        Ok(event) => {
            if let Some(text) = render::event(&event, customer) {
                println!("{text}");
            }
            true
        }
        Err(broadcast::error::RecvError::Lagged(skipped)) => {
            tracing::warn!(skipped, "Console fell behind on conversation events");
            true
        }
        Err(broadcast::error::RecvError::Closed) => false,
    }
}

/// Apply one command. Returns `false` when the operator quits.
async fn handle(
    session: &mut ConsoleSession,
    command: ConsoleCommand,
    customer: &str,
) -> Result<bool, Box<dyn std::error::Error>> {
    match command {
        ConsoleCommand::Text(line) => session.draft_mut().push_line(&line),
        ConsoleCommand::Send => {
            if session.send_draft().await.is_none() {
                println!("  Draft is empty — nothing sent.");
            }
        }
        ConsoleCommand::Escalate => {
            session.send_and_escalate().await;
        }
        ConsoleCommand::Canned(None) => {
            for (i, reply) in session.canned_replies().iter().enumerate() {
                println!("  {}. {reply}", i + 1);
            }
        }
        ConsoleCommand::Canned(Some(n)) => {
            let inserted = n
                .checked_sub(1)
                .and_then(|index| session.insert_canned(index))
                .is_some();
            if inserted {
                print_draft(session);
            } else {
                println!("  No canned reply #{n}.");
            }
        }
        ConsoleCommand::Insert(id) => {
            if session.insert_resolution(&id).is_some() {
                print_draft(session);
            } else {
                println!("  No knowledge article '{id}'.");
            }
        }
        ConsoleCommand::Auto => {
            if session.auto_draft().await.is_some() {
                print_draft(session);
            } else {
                println!("  No customer message to draft a reply for.");
            }
        }
        ConsoleCommand::Suggest => {
            println!("  AI Assist — suggested resolutions");
            for article in session.recommendations().await {
                println!("{}", render::article(&article));
            }
        }
        ConsoleCommand::Draft => print_draft(session),
        ConsoleCommand::Clear => {
            session.draft_mut().clear();
            println!("  Draft cleared.");
        }
        ConsoleCommand::Transcript => {
            for message in session.store().messages().await {
                println!("{}", render::message(&message, customer));
            }
            if session.is_composing().await {
                println!("  … AI drafting: composing follow-up");
            }
        }
        ConsoleCommand::Export => {
            let messages = session.store().messages().await;
            println!("{}", serde_json::to_string_pretty(&messages)?);
        }
        ConsoleCommand::Help => print_help(),
        ConsoleCommand::Quit => return Ok(false),
        ConsoleCommand::Unknown(input) => {
            println!("  Unknown command: {input} (try /help)");
        }
    }
    Ok(true)
}

fn print_draft(session: &ConsoleSession) {
    if session.draft().is_empty() {
        println!("  Draft is empty.");
        return;
    }
    println!("  Draft:");
    for line in session.draft().text().lines() {
        println!("    | {line}");
    }
}

fn print_help() {
    println!("  Type to add to the draft. Commands:");
    println!("    /send             send the draft");
    println!("    /escalate         send the Tier 2 escalation notice");
    println!("    /canned [N]       list canned replies, or insert reply N");
    println!("    /insert <id>      insert a knowledge article's resolution");
    println!("    /auto             auto-draft a reply to the latest customer message");
    println!("    /suggest          show suggested resolutions");
    println!("    /draft, /clear    show or clear the draft");
    println!("    /transcript       reprint the conversation");
    println!("    /export           print the conversation as JSON");
    println!("    /quit             leave the console");
    println!();
}
