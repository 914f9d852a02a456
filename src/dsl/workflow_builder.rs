//! Workflow-level builder context

use crate::core::{DslError, Result, TriggerSpec, Workflow};
use crate::dsl::{Api, JobBuilder};
use crate::plugin::BuilderOptions;
use tracing::debug;

/// Collects triggers, environment and jobs for one workflow
pub struct WorkflowBuilder<'a> {
    api: &'a Api,
    workflow: Workflow,
}

impl<'a> WorkflowBuilder<'a> {
    pub(crate) fn new(api: &'a Api, workflow: Workflow) -> Self {
        Self { api, workflow }
    }

    /// Trigger on `event`, replacing any earlier trigger for the same event
    pub fn on(&mut self, event: impl Into<String>, trigger: TriggerSpec) {
        self.workflow.set_trigger(event, trigger);
    }

    /// Trigger on `event` without filters
    pub fn on_event(&mut self, event: impl Into<String>) {
        self.on(event, TriggerSpec::default());
    }

    /// Set a workflow-wide environment variable
    pub fn env(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.workflow.set_env(key, value);
    }

    /// Define a job by evaluating `block` against a fresh job builder.
    ///
    /// The job builder sees the step builders registered at this moment.
    pub fn job<F>(&mut self, name: impl Into<String>, block: F) -> Result<()>
    where
        F: FnOnce(&mut JobBuilder) -> Result<()>,
    {
        let job = self.api.job(name);
        debug!(workflow = %self.workflow.name, job = %job.name, "Evaluating job");

        let mut builder = JobBuilder::new(
            job,
            self.api.registry().step_builders().clone(),
            self.api.output().clone(),
        );
        block(&mut builder)?;
        self.workflow.add_job(builder.finish());
        Ok(())
    }

    /// Define a job with a plugin-provided job builder
    pub fn job_from(
        &mut self,
        builder_name: &str,
        job_name: &str,
        options: &BuilderOptions,
    ) -> Result<()> {
        let builder = self
            .api
            .registry()
            .job_builder(builder_name)
            .ok_or_else(|| DslError::UnknownJobBuilder {
                name: builder_name.to_string(),
            })?;
        let job = builder(job_name, options)?;
        self.workflow.add_job(job);
        Ok(())
    }

    /// The workflow built so far
    pub fn workflow(&self) -> &Workflow {
        &self.workflow
    }

    pub(crate) fn finish(self) -> Workflow {
        self.workflow
    }
}
