//! Chat commands: one-shot ask and the interactive loop.
//!
//! The loop reads utterances, treats slash-prefixed input as commands, and
//! asks everything else as a question. Answers print as they complete.

pub mod commands;
pub mod input;

use std::io::Write;

use anyhow::Result;
use console::style;
use dialoguer::Input;

use mnemo_types::error::AskError;

use crate::cli::memory::describe_fetch;
use crate::cli::session::spinner;
use crate::state::AppState;

use commands::ChatCommand;
use input::{ChatInput, InputEvent};

/// Short, user-facing description of an ask failure.
fn describe_ask(err: &AskError) -> String {
    match err {
        AskError::EmptyQuestion => "please enter a question".to_string(),
        AskError::NotAuthenticated => "not logged in -- run: mnemo login".to_string(),
        AskError::AlreadyInProgress => "a question is already in progress".to_string(),
        AskError::Rejected { status, .. } => format!("the backend refused the question: HTTP {status}"),
        AskError::Unreachable(_) => {
            "could not reach the memory backend -- check your connection".to_string()
        }
    }
}

/// Ask a single question and print the answer.
pub async fn ask(state: &AppState, question: Option<&str>, json: bool) -> Result<()> {
    let question = match question {
        Some(q) => q.to_string(),
        None => Input::new()
            .with_prompt("What do you want to ask?")
            .interact_text()?,
    };

    let bar = spinner("thinking...");
    let result = state.manager.ask(&question).await;
    bar.finish_and_clear();

    match result {
        Ok(answer) => {
            if json {
                println!(
                    "{}",
                    serde_json::json!({"question": question, "answer": answer})
                );
            } else {
                println!("  {answer}");
            }
            Ok(())
        }
        Err(err) => {
            tracing::debug!("ask failed: {err}");
            anyhow::bail!(describe_ask(&err));
        }
    }
}

/// Run the interactive chat loop.
pub async fn run_chat_loop(state: &AppState) -> Result<()> {
    if state.manager.credential().is_none() {
        anyhow::bail!("not logged in -- run: mnemo login");
    }

    println!();
    println!(
        "  {} {}",
        style("mnemo").magenta().bold(),
        style("-- your personal memory assistant").dim()
    );
    println!(
        "  {}",
        style("Ask a question, or /help for commands. Ctrl+D to leave.").dim()
    );
    println!();

    // A fresh screen loads its memories before the first exchange.
    match state.manager.refresh().await {
        Ok(memories) => println!("  {} memories synced", memories.len()),
        Err(err) => eprintln!(
            "  {} {}",
            style("!").yellow().bold(),
            describe_fetch(&err)
        ),
    }

    let (mut input, mut stdout) = ChatInput::new("you> ".to_string())?;

    loop {
        match input.next_utterance().await {
            InputEvent::Utterance(line) if line.is_empty() => continue,
            InputEvent::Utterance(line) => {
                if let Some(command) = commands::parse(&line) {
                    match command {
                        ChatCommand::Help => commands::print_help(),
                        ChatCommand::Clear => input.clear(),
                        ChatCommand::Exit => break,
                        ChatCommand::History => {
                            for exchange in state.manager.history() {
                                writeln!(stdout, "you>   {}", exchange.question)?;
                                writeln!(stdout, "mnemo> {}", exchange.answer)?;
                            }
                        }
                        ChatCommand::Memories => {
                            for memory in state.manager.memories() {
                                writeln!(
                                    stdout,
                                    "  #{} {} ({})",
                                    memory.id, memory.content, memory.timestamp
                                )?;
                            }
                        }
                        ChatCommand::Refresh => match state.manager.refresh().await {
                            Ok(memories) => {
                                writeln!(stdout, "  {} memories synced", memories.len())?
                            }
                            Err(err) => writeln!(stdout, "  ! {}", describe_fetch(&err))?,
                        },
                        ChatCommand::Remember(content) => {
                            match state.manager.remember(&content).await {
                                Ok(memory) => {
                                    writeln!(stdout, "  Got it! (memory #{})", memory.id)?
                                }
                                Err(err) => {
                                    tracing::debug!("save failed: {err}");
                                    writeln!(stdout, "  ! could not save that memory")?
                                }
                            }
                        }
                        ChatCommand::Unknown(message) => {
                            writeln!(stdout, "  ? {message} (try /help)")?
                        }
                    }
                    continue;
                }

                match state.manager.ask(&line).await {
                    Ok(answer) => writeln!(stdout, "mnemo> {answer}")?,
                    Err(err) => writeln!(stdout, "  ! {}", describe_ask(&err))?,
                }
            }
            InputEvent::Eof | InputEvent::Interrupted => break,
        }
    }

    println!("\n  Session ended.");
    Ok(())
}
