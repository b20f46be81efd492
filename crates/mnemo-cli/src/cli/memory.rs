//! Memory CLI commands: remember, memories, show.

use anyhow::Result;
use comfy_table::{Cell, Color, ContentArrangement, Table, presets};
use console::style;
use dialoguer::Input;

use mnemo_types::error::{FetchError, SaveError};
use mnemo_types::memory::Memory;

use crate::state::AppState;

/// Short, user-facing description of a save failure.
fn describe_save(err: &SaveError) -> String {
    match err {
        SaveError::EmptyContent => "please enter something to remember".to_string(),
        SaveError::NotAuthenticated => "not logged in -- run: mnemo login".to_string(),
        SaveError::AlreadyInProgress => "a save is already in progress".to_string(),
        SaveError::Rejected { status, .. } => format!("save failed: HTTP {status}"),
        SaveError::Unreachable(_) => {
            "could not reach the memory backend -- check your connection".to_string()
        }
    }
}

/// Short, user-facing description of a fetch failure.
pub(crate) fn describe_fetch(err: &FetchError) -> String {
    match err {
        FetchError::NotAuthenticated => "not logged in -- run: mnemo login".to_string(),
        FetchError::AlreadyInProgress => "a memory fetch is already in progress".to_string(),
        FetchError::Rejected { status } => format!("memory fetch failed: HTTP {status}"),
        FetchError::Unreachable(_) => {
            "could not reach the memory backend -- check your connection".to_string()
        }
    }
}

/// Trim text to a display width, ellipsized on a char boundary.
fn ellipsize(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let cut: String = text.chars().take(max.saturating_sub(3)).collect();
    format!("{cut}...")
}

/// Save a new memory.
pub async fn remember(state: &AppState, content: Option<&str>, json: bool) -> Result<()> {
    let content = match content {
        Some(c) => c.to_string(),
        None => Input::new()
            .with_prompt("What do you want to remember?")
            .interact_text()?,
    };

    match state.manager.remember(&content).await {
        Ok(memory) => {
            if json {
                println!("{}", serde_json::to_string_pretty(&memory)?);
            } else {
                println!(
                    "  {} Got it! (memory #{})",
                    style("✓").green().bold(),
                    memory.id
                );
            }
            Ok(())
        }
        Err(err) => {
            tracing::debug!("save failed: {err}");
            anyhow::bail!(describe_save(&err));
        }
    }
}

/// Refresh from the backend and list all memories.
pub async fn list(state: &AppState, json: bool) -> Result<()> {
    let memories = match state.manager.refresh().await {
        Ok(memories) => memories,
        Err(err) => {
            tracing::debug!("refresh failed: {err}");
            anyhow::bail!(describe_fetch(&err));
        }
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&memories)?);
        return Ok(());
    }

    if memories.is_empty() {
        println!();
        println!(
            "  {} No memories yet. Save one with: mnemo remember \"...\"",
            style("i").blue().bold()
        );
        println!();
        return Ok(());
    }

    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL_CONDENSED);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec![
        Cell::new("Id").fg(Color::White),
        Cell::new("Memory").fg(Color::White),
        Cell::new("Saved at").fg(Color::White),
    ]);

    for memory in &memories {
        table.add_row(vec![
            Cell::new(memory.id).fg(Color::Yellow),
            Cell::new(ellipsize(&memory.content, 60)).fg(Color::White),
            Cell::new(&memory.timestamp).fg(Color::DarkGrey),
        ]);
    }

    println!("{table}");
    Ok(())
}

/// Show a single memory fetched straight from the backend.
pub async fn show(state: &AppState, id: i64, json: bool) -> Result<()> {
    let memory: Memory = match state.manager.fetch_memory(id).await {
        Ok(memory) => memory,
        Err(err) => {
            tracing::debug!("memory fetch failed: {err}");
            anyhow::bail!(describe_fetch(&err));
        }
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&memory)?);
        return Ok(());
    }

    println!();
    println!("  {} Memory #{}", style("●").cyan(), style(memory.id).bold());
    println!("  {}", memory.content);
    println!("  {}", style(&memory.timestamp).dim());
    println!();

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_describe_fetch_surfaces_status_code() {
        let message = describe_fetch(&FetchError::Rejected { status: 500 });
        assert!(message.contains("500"));
    }

    #[test]
    fn test_describe_save_for_blank_content_is_actionable() {
        let message = describe_save(&SaveError::EmptyContent);
        assert!(message.contains("enter something"));
    }

    #[test]
    fn test_ellipsize_keeps_short_text() {
        assert_eq!(ellipsize("buy milk", 60), "buy milk");
    }

    #[test]
    fn test_ellipsize_cuts_on_char_boundaries() {
        let text = "récurrent récurrent récurrent";
        let cut = ellipsize(text, 10);
        assert!(cut.ends_with("..."));
        assert!(cut.chars().count() <= 10);
    }
}
