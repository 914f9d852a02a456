//! Declarative builders for workflows
//!
//! An [`Api`] owns one plugin registry and one output target. Workflows are
//! described with nested closures:
//!
//! ```
//! use workflow_dsl::{Api, BuilderOptions, StepOptions, TriggerSpec, language_plugin};
//!
//! let mut api = Api::new();
//! api.load_plugins(vec![language_plugin()]);
//!
//! let workflow = api.workflow("ci", |w| {
//!     w.on("push", TriggerSpec::new().branches(["main"]));
//!     w.job("build", |j| {
//!         j.runs_on("ubuntu-latest");
//!         j.step("checkout", StepOptions::new().uses("actions/checkout@v4"))?;
//!         j.invoke("bash", Some("make test"), &BuilderOptions::new().strict(true))?;
//!         Ok(())
//!     })
//! })?;
//!
//! assert_eq!(workflow.jobs["build"].steps.len(), 2);
//! # Ok::<(), workflow_dsl::DslError>(())
//! ```

pub mod capture;
pub mod document;
pub mod job_builder;
pub mod workflow_builder;

pub use capture::{CaptureBuffer, CaptureGuard, OutputTarget};
pub use document::WorkflowDocument;
pub use job_builder::JobBuilder;
pub use workflow_builder::WorkflowBuilder;

use crate::core::{DslError, Job, Result, Step, StepOptions, Workflow};
use crate::plugin::{BuilderOptions, Plugin, PluginRegistry};
use tracing::info;

/// One builder session: a plugin registry plus the target for printed output
///
/// Sessions share nothing, so independent callers each create their own.
#[derive(Debug)]
pub struct Api {
    registry: PluginRegistry,
    output: OutputTarget,
}

impl Api {
    /// Create a session with no plugins that prints to stdout
    pub fn new() -> Self {
        Self::with_output(OutputTarget::stdout())
    }

    /// Create a session that prints to the given target
    pub fn with_output(output: OutputTarget) -> Self {
        Self {
            registry: PluginRegistry::new(),
            output,
        }
    }

    pub fn registry(&self) -> &PluginRegistry {
        &self.registry
    }

    pub fn output(&self) -> &OutputTarget {
        &self.output
    }

    pub fn load_plugin(&mut self, plugin: Plugin) {
        self.registry.load_plugin(plugin);
    }

    /// Load plugins in priority order; later plugins win name collisions
    pub fn load_plugins<I>(&mut self, plugins: I)
    where
        I: IntoIterator<Item = Plugin>,
    {
        self.registry.load_plugins(plugins);
    }

    /// Build a workflow by evaluating `block` against a fresh builder.
    ///
    /// Any error inside the block aborts the whole evaluation; no partial
    /// workflow is returned.
    pub fn workflow<F>(&self, name: impl Into<String>, block: F) -> Result<Workflow>
    where
        F: FnOnce(&mut WorkflowBuilder<'_>) -> Result<()>,
    {
        let mut builder = WorkflowBuilder::new(self, Workflow::new(name));
        block(&mut builder)?;
        let workflow = builder.finish();

        info!(
            workflow = %workflow.name,
            jobs = workflow.jobs.len(),
            triggers = workflow.on.len(),
            "Workflow built"
        );
        Ok(workflow)
    }

    /// Build a workflow with a plugin-provided workflow builder
    pub fn workflow_from(
        &self,
        builder_name: &str,
        name: &str,
        options: &BuilderOptions,
    ) -> Result<Workflow> {
        let builder = self
            .registry
            .workflow_builder(builder_name)
            .ok_or_else(|| DslError::UnknownWorkflowBuilder {
                name: builder_name.to_string(),
            })?;
        builder(name, options)
    }

    /// A new empty job
    pub fn job(&self, name: impl Into<String>) -> Job {
        Job::new(name)
    }

    /// A new literal step
    pub fn step(&self, options: StepOptions) -> Step {
        Step::new(options)
    }
}

impl Default for Api {
    fn default() -> Self {
        Self::new()
    }
}
