//! CLI command definitions

use crate::core::{KeyStyle, SerializeOptions};
use clap::{ArgGroup, Args};

/// Render workflow documents
#[derive(Debug, Args, Clone)]
#[command(group(ArgGroup::new("input").required(true).args(["file", "dir"])))]
pub struct RenderCommand {
    /// Path to a workflow document
    #[arg(short, long, conflicts_with = "dir")]
    pub file: Option<String>,

    /// Write the rendered workflow here instead of stdout
    #[arg(short, long, requires = "file")]
    pub output: Option<String>,

    /// Render every `.yml`/`.yaml` document under this directory
    #[arg(long, requires = "out_dir")]
    pub dir: Option<String>,

    /// Output directory for `--dir`; relative paths are kept
    #[arg(long)]
    pub out_dir: Option<String>,

    /// Spell keys as model fields (`runs_on`) instead of `runs-on`
    #[arg(long)]
    pub model_keys: bool,
}

impl RenderCommand {
    pub fn key_style(&self) -> KeyStyle {
        if self.model_keys {
            KeyStyle::Model
        } else {
            KeyStyle::Actions
        }
    }

    pub fn serialize_options(&self) -> SerializeOptions {
        SerializeOptions {
            key_style: self.key_style(),
        }
    }
}

/// Validate a workflow document
#[derive(Debug, Args, Clone)]
pub struct ValidateCommand {
    /// Path to a workflow document
    #[arg(short, long)]
    pub file: String,

    /// Output the evaluated workflow in JSON format
    #[arg(long)]
    pub json: bool,
}

/// List plugin builders
#[derive(Debug, Args, Clone)]
pub struct PluginsCommand {
    /// Output in JSON format
    #[arg(long)]
    pub json: bool,
}
