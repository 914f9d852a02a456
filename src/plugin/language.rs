//! Language helpers - step builders that wrap a script with language boilerplate

use crate::core::{normalize_script, DslError, Step, StepOptions};
use crate::plugin::{BuilderOptions, Plugin, PluginMethodInfo, StepBuilderFn};
use std::sync::Arc;
use tracing::debug;

/// Boilerplate for one scripting language
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LanguageConfig {
    /// Display name, used in the default step name
    pub name: String,

    /// First line(s) of the script
    pub header: Option<String>,

    /// Snippet that makes the script fail fast
    pub strict_mode: Option<String>,

    /// Snippet that traces execution
    pub debug_mode: Option<String>,

    /// Commands run before the user script
    pub setup_commands: Option<Vec<String>>,

    /// Shell for the produced step
    pub shell: Option<String>,
}

impl LanguageConfig {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn header(mut self, header: impl Into<String>) -> Self {
        self.header = Some(header.into());
        self
    }

    pub fn strict_mode(mut self, snippet: impl Into<String>) -> Self {
        self.strict_mode = Some(snippet.into());
        self
    }

    pub fn debug_mode(mut self, snippet: impl Into<String>) -> Self {
        self.debug_mode = Some(snippet.into());
        self
    }

    pub fn setup_commands<I, S>(mut self, commands: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.setup_commands = Some(commands.into_iter().map(Into::into).collect());
        self
    }

    pub fn shell(mut self, shell: impl Into<String>) -> Self {
        self.shell = Some(shell.into());
        self
    }

    /// Bash with `set -euo pipefail` and `set -x`
    pub fn bash() -> Self {
        Self::new("Bash")
            .header("#!/usr/bin/env bash")
            .strict_mode("set -euo pipefail")
            .debug_mode("set -x")
            .shell("bash")
    }

    /// PowerShell Core
    pub fn pwsh() -> Self {
        Self::new("PowerShell")
            .strict_mode("$ErrorActionPreference = 'Stop'\nSet-StrictMode -Version Latest")
            .debug_mode("Set-PSDebug -Trace 1")
            .shell("pwsh")
    }

    /// Python run through the `python` shell
    pub fn python() -> Self {
        Self::new("Python")
            .header("# -*- coding: utf-8 -*-")
            .debug_mode("import logging; logging.basicConfig(level=logging.DEBUG)")
            .shell("python")
    }

    /// Assemble the run text: enabled boilerplate in fixed order, then the script
    fn assemble(&self, script: &str, opts: &BuilderOptions) -> String {
        let mut parts: Vec<&str> = Vec::new();

        if opts.header {
            parts.extend(self.header.as_deref());
        }
        if opts.strict {
            parts.extend(self.strict_mode.as_deref());
        }
        if opts.debug {
            parts.extend(self.debug_mode.as_deref());
        }
        if opts.setup {
            if let Some(commands) = &self.setup_commands {
                parts.extend(commands.iter().map(String::as_str));
            }
        }

        parts.push(script);
        parts.join("\n")
    }
}

/// Create a step builder for a language.
///
/// The builder normalizes the incoming script (an empty result is an
/// `EmptyScript` error), prefixes the boilerplate enabled by the options and
/// names the step `Run <language> script` unless the options say otherwise.
pub fn create_language_helper(config: LanguageConfig) -> StepBuilderFn {
    Arc::new(move |script: &str, opts: &BuilderOptions| {
        let normalized = normalize_script(script);
        if normalized.is_empty() {
            return Err(DslError::EmptyScript {
                language: config.name.clone(),
            });
        }

        let name = opts
            .name
            .clone()
            .unwrap_or_else(|| format!("Run {} script", config.name));
        debug!(language = %config.name, step = %name, "Building language step");

        let mut step = Step::new(StepOptions::new().name(name).run(config.assemble(&normalized, opts)));
        step.shell = config.shell.clone();
        if let Some(env) = &opts.env {
            step.env = Some(env.clone());
        }

        Ok(step)
    })
}

/// The `languages` plugin: `bash`, `pwsh` and `python` step builders
pub fn language_plugin() -> Plugin {
    let mut plugin = Plugin::new("languages")
        .with_version("0.1.0")
        .with_description("Provides language-specific script builders");

    let languages = [
        ("bash", LanguageConfig::bash(), "echo \"hello\""),
        ("pwsh", LanguageConfig::pwsh(), "Write-Output 'hello'"),
        ("python", LanguageConfig::python(), "print('hello')"),
    ];

    for (builder_name, config, example) in languages {
        let info = PluginMethodInfo::new(
            builder_name,
            format!("Run a {} script as a step", config.name),
        )
        .with_example(example);
        let builder = create_language_helper(config);
        plugin.add_step_builder(builder_name, move |script: &str, opts: &BuilderOptions| builder(script, opts), info);
    }

    plugin
}
