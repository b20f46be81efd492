//! Session CLI commands: login, logout, status.

use anyhow::Result;
use console::style;
use dialoguer::{Input, Password};
use indicatif::{ProgressBar, ProgressStyle};

use mnemo_types::error::AuthError;

use crate::state::AppState;

/// Short, user-facing description of a login failure.
fn describe(err: &AuthError) -> String {
    match err {
        AuthError::Rejected { status, .. } => {
            format!("login failed: HTTP {status} -- check your username and password")
        }
        AuthError::InvalidResponse => "login failed: the server sent no token".to_string(),
        AuthError::Unreachable(_) => {
            "could not reach the memory backend -- check your connection and base_url".to_string()
        }
        AuthError::AlreadyInProgress => "a login is already in progress".to_string(),
    }
}

/// Spinner shown while a round-trip is in flight.
pub(crate) fn spinner(message: &str) -> ProgressBar {
    let bar = ProgressBar::new_spinner();
    bar.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.cyan} {msg}")
            .expect("valid spinner template"),
    );
    bar.set_message(message.to_string());
    bar.enable_steady_tick(std::time::Duration::from_millis(80));
    bar
}

/// Log in, persist the token, and pull the memory list right away.
pub async fn login(state: &AppState, username: Option<&str>, json: bool) -> Result<()> {
    let username = match username {
        Some(u) => u.to_string(),
        None => Input::new().with_prompt("Username").interact_text()?,
    };
    let password = Password::new().with_prompt("Password").interact()?;

    let bar = spinner("logging in...");
    let login_result = state.manager.login(&username, &password).await;
    bar.finish_and_clear();

    if let Err(err) = login_result {
        tracing::debug!("login failed: {err}");
        anyhow::bail!(describe(&err));
    }

    // Mirror the screen behavior: a fresh session loads its memories.
    let synced = match state.manager.refresh().await {
        Ok(memories) => Some(memories.len()),
        Err(err) => {
            tracing::warn!("initial memory refresh failed: {err}");
            None
        }
    };

    if json {
        println!(
            "{}",
            serde_json::json!({"logged_in": true, "username": username, "memories": synced})
        );
    } else {
        println!(
            "  {} Logged in as '{}'",
            style("✓").green().bold(),
            style(&username).bold()
        );
        match synced {
            Some(count) => println!("  {count} memories synced"),
            None => println!(
                "  {} could not sync memories yet -- try: mnemo memories",
                style("!").yellow().bold()
            ),
        }
    }

    Ok(())
}

/// Clear the session. Idempotent.
pub async fn logout(state: &AppState, json: bool) -> Result<()> {
    state.manager.logout().await;

    if json {
        println!("{}", serde_json::json!({"logged_in": false}));
    } else {
        println!("  {} Logged out", style("✓").green().bold());
    }

    Ok(())
}

/// Show session and backend configuration at a glance.
pub async fn status(state: &AppState, json: bool) -> Result<()> {
    let authenticated = state.manager.credential().is_some();

    if json {
        println!(
            "{}",
            serde_json::json!({
                "logged_in": authenticated,
                "base_url": state.config.base_url,
                "data_dir": state.data_dir.display().to_string(),
            })
        );
        return Ok(());
    }

    println!();
    let session_mark = if authenticated {
        format!("{} logged in", style("✓").green().bold())
    } else {
        format!("{} logged out", style("✗").red())
    };
    println!("  Session:  {session_mark}");
    println!("  Backend:  {}", style(&state.config.base_url).cyan());
    println!("  Data dir: {}", state.data_dir.display());
    println!();

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_describe_rejection_names_the_status() {
        let message = describe(&AuthError::Rejected {
            status: 401,
            body: "nope".to_string(),
        });
        assert!(message.contains("401"));
        assert!(!message.contains("nope"));
    }

    #[test]
    fn test_describe_unreachable_is_generic() {
        let message = describe(&AuthError::Unreachable("tcp reset".to_string()));
        assert!(message.contains("could not reach"));
        assert!(!message.contains("tcp reset"));
    }
}
