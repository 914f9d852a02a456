//! Plugins contribute named builders that extend what a job block can do

pub mod language;
pub mod registry;

pub use language::{create_language_helper, language_plugin, LanguageConfig};
pub use registry::PluginRegistry;

use crate::core::{Job, Result, Step, Workflow};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Builds a step from script text
pub type StepBuilderFn = Arc<dyn Fn(&str, &BuilderOptions) -> Result<Step> + Send + Sync>;

/// Builds a job from a job name
pub type JobBuilderFn = Arc<dyn Fn(&str, &BuilderOptions) -> Result<Job> + Send + Sync>;

/// Builds a workflow from a workflow name
pub type WorkflowBuilderFn = Arc<dyn Fn(&str, &BuilderOptions) -> Result<Workflow> + Send + Sync>;

/// Per-invocation options handed to a builder
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuilderOptions {
    /// Step name override
    pub name: Option<String>,

    /// Prepend the language header
    pub header: bool,

    /// Prepend the strict-mode snippet
    pub strict: bool,

    /// Prepend the debug-mode snippet
    pub debug: bool,

    /// Prepend the setup commands
    pub setup: bool,

    /// Environment for the built step
    pub env: Option<IndexMap<String, String>>,
}

impl BuilderOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn header(mut self, header: bool) -> Self {
        self.header = header;
        self
    }

    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    pub fn debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    pub fn setup(mut self, setup: bool) -> Self {
        self.setup = setup;
        self
    }

    pub fn env_var(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env
            .get_or_insert_with(IndexMap::new)
            .insert(key.into(), value.into());
        self
    }
}

/// Documentation for one builder a plugin provides
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PluginMethodInfo {
    pub name: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub params: Option<IndexMap<String, String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub returns: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub example: Option<String>,
}

impl PluginMethodInfo {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            ..Self::default()
        }
    }

    pub fn with_example(mut self, example: impl Into<String>) -> Self {
        self.example = Some(example.into());
        self
    }
}

/// A named bundle of builders
#[derive(Clone, Default)]
pub struct Plugin {
    pub name: String,
    pub version: String,
    pub description: String,

    /// Documentation per step builder
    pub step_methods: IndexMap<String, PluginMethodInfo>,

    pub step_builders: IndexMap<String, StepBuilderFn>,
    pub job_builders: IndexMap<String, JobBuilderFn>,
    pub workflow_builders: IndexMap<String, WorkflowBuilderFn>,
}

impl Plugin {
    /// Create a plugin with no builders
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Register a step builder along with its documentation
    pub fn add_step_builder<F>(&mut self, name: impl Into<String>, builder: F, info: PluginMethodInfo)
    where
        F: Fn(&str, &BuilderOptions) -> Result<Step> + Send + Sync + 'static,
    {
        let name = name.into();
        self.step_methods.insert(name.clone(), info);
        self.step_builders.insert(name, Arc::new(builder));
    }

    pub fn add_job_builder<F>(&mut self, name: impl Into<String>, builder: F)
    where
        F: Fn(&str, &BuilderOptions) -> Result<Job> + Send + Sync + 'static,
    {
        self.job_builders.insert(name.into(), Arc::new(builder));
    }

    pub fn add_workflow_builder<F>(&mut self, name: impl Into<String>, builder: F)
    where
        F: Fn(&str, &BuilderOptions) -> Result<Workflow> + Send + Sync + 'static,
    {
        self.workflow_builders.insert(name.into(), Arc::new(builder));
    }
}

impl fmt::Debug for Plugin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Plugin")
            .field("name", &self.name)
            .field("version", &self.version)
            .field("step_builders", &self.step_builders.keys().collect::<Vec<_>>())
            .field("job_builders", &self.job_builders.keys().collect::<Vec<_>>())
            .field("workflow_builders", &self.workflow_builders.keys().collect::<Vec<_>>())
            .finish()
    }
}
