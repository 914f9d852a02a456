//! workflow-dsl - Declarative builder for GitHub-Actions-style workflows

pub mod cli;
pub mod core;
pub mod dsl;
pub mod plugin;

// Re-export commonly used types
pub use core::{
    normalize_script, serialize, serialize_with, to_yaml, DslError, FsScriptSource, Job, KeyStyle,
    MemoryScriptSource, Result, ScriptSource, SerializeOptions, Step, StepOptions, Strategy,
    TriggerSpec, Workflow,
};
pub use dsl::{Api, CaptureBuffer, JobBuilder, OutputTarget, WorkflowBuilder, WorkflowDocument};
pub use plugin::{
    create_language_helper, language_plugin, BuilderOptions, LanguageConfig, Plugin,
    PluginMethodInfo, PluginRegistry,
};
