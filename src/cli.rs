//! CLI definitions for chatnav.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// chatnav CLI.
#[derive(Parser)]
#[command(name = "chatnav")]
#[command(about = "Index and jump between your own messages in LLM chat pages")]
#[command(version)]
pub(crate) struct Cli {
    /// Configuration file path (default: ~/.chatnav/config.toml when present)
    #[arg(short, long, global = true, env = "CHATNAV_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Attach to a chat tab in a running Chrome and navigate it (default)
    Attach {
        /// DevTools HTTP endpoint (overrides cdp.endpoint)
        #[arg(long, env = "CHATNAV_CDP_ENDPOINT")]
        endpoint: Option<String>,

        /// Pick the first tab whose URL contains this text instead of the
        /// first supported chat tab
        #[arg(long)]
        url_contains: Option<String>,
    },

    /// Navigate a built-in in-memory chat page
    Demo,

    /// List configured site profiles
    Sites,

    /// Tell whether a URL belongs to a supported chat site
    Check {
        /// Page URL
        url: String,
    },

    /// Validate the configuration file
    Validate,
}
