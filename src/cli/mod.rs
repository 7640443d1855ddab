//! CLI module for the semantic cache server

pub mod serve;

use clap::{Parser, Subcommand};

/// Semantic response cache - serves stored responses for similar queries
#[derive(Parser)]
#[command(name = "semcache")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the cache API server
    Serve,
}
