//! Command-line interface

pub mod commands;
pub mod discover;
pub mod output;

use clap::{Parser, Subcommand};
use commands::{PluginsCommand, RenderCommand, ValidateCommand};
use std::ffi::OsString;

/// Workflow builder
#[derive(Debug, Parser, Clone)]
#[command(name = "workflow-dsl")]
#[command(author = "Workflow DSL Contributors")]
#[command(version = "0.1.0")]
#[command(about = "Builds GitHub-Actions-style workflow files from workflow documents", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// Available commands
#[derive(Debug, Subcommand, Clone)]
pub enum Command {
    /// Render workflow documents to workflow files
    Render(RenderCommand),

    /// Evaluate a workflow document and check job dependencies
    Validate(ValidateCommand),

    /// List the builders provided by the bundled plugins
    Plugins(PluginsCommand),
}

impl Cli {
    /// Parse CLI arguments from environment
    pub fn from_args() -> Self {
        Self::parse()
    }

    /// Parse CLI arguments from a slice
    pub fn try_parse_from<I, T>(itr: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        <Self as Parser>::try_parse_from(itr)
    }
}
