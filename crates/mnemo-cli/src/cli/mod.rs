//! CLI command definitions and command modules for the `mnemo` binary.
//!
//! Uses clap derive macros for argument parsing. Commands are verbs over
//! the session ("login", "logout") and the memory store ("remember",
//! "ask", "memories", "show"), plus the interactive chat loop.

pub mod chat;
pub mod memory;
pub mod session;

use clap::{Parser, Subcommand};

/// Remember things by voice or text, and ask questions about them later.
#[derive(Parser)]
#[command(name = "mnemo", version, about, long_about = None)]
pub struct Cli {
    /// Output machine-readable JSON instead of styled text.
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress all output except errors.
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Detailed output (-v for info, -vv for debug, -vvv for trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Log in to the memory backend and keep the session token.
    Login {
        /// Username (prompted when omitted).
        #[arg(short, long)]
        username: Option<String>,
    },

    /// Clear the stored session token.
    Logout,

    /// Save something to remember.
    Remember {
        /// The content to remember (prompted when omitted).
        content: Option<String>,
    },

    /// Ask a question answered from your memories.
    Ask {
        /// The question (prompted when omitted).
        question: Option<String>,
    },

    /// List your memories.
    #[command(alias = "ls")]
    Memories,

    /// Show a single memory by id.
    Show {
        /// Server-assigned memory id.
        id: i64,
    },

    /// Interactive chat session.
    Chat,

    /// Show session and backend status.
    Status,
}
