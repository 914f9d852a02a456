//! Job-level builder context

use crate::core::{normalize_script, DslError, Job, Result, Step, StepOptions, Strategy};
use crate::dsl::OutputTarget;
use crate::plugin::{BuilderOptions, StepBuilderFn};
use indexmap::IndexMap;
use tracing::debug;

/// Builds one job: runner, literal steps, and steps from plugin builders.
///
/// Plugin builders are reached through a dispatch table snapshotted from the
/// registry when the job context is created; [`JobBuilder::invoke`] and
/// [`JobBuilder::invoke_captured`] call them by name.
pub struct JobBuilder {
    job: Job,
    builders: IndexMap<String, StepBuilderFn>,
    output: OutputTarget,
}

impl JobBuilder {
    pub(crate) fn new(
        job: Job,
        builders: IndexMap<String, StepBuilderFn>,
        output: OutputTarget,
    ) -> Self {
        Self {
            job,
            builders,
            output,
        }
    }

    pub fn runs_on(&mut self, runner: impl Into<String>) {
        self.job.runs_on = Some(runner.into());
    }

    pub fn needs<I, S>(&mut self, jobs: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.job.needs = Some(jobs.into_iter().map(Into::into).collect());
    }

    pub fn env(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.job.env.insert(key.into(), value.into());
    }

    pub fn strategy(&mut self, strategy: Strategy) {
        self.job.strategy = Some(strategy);
    }

    /// Add a literal step named `name`
    pub fn step(&mut self, name: impl Into<String>, options: StepOptions) -> Result<()> {
        self.literal(options.name(name))
    }

    /// Add a literal step named `name` whose `run` is what `block` prints.
    ///
    /// The printed text is normalized and replaces any `run` in `options`.
    /// A block that prints nothing leaves the step without `run`, so it then
    /// needs `uses`.
    pub fn step_captured<F>(
        &mut self,
        name: impl Into<String>,
        options: StepOptions,
        block: F,
    ) -> Result<()>
    where
        F: FnOnce(&mut JobBuilder) -> Result<()>,
    {
        let script = {
            let guard = self.output.capture();
            block(self)?;
            normalize_script(&guard.finish())
        };

        let mut options = options.name(name);
        options.run = (!script.is_empty()).then_some(script);
        self.literal(options)
    }

    /// Add a literal step exactly as described by `options`
    pub fn literal(&mut self, options: StepOptions) -> Result<()> {
        let step = Step::new(options);
        if !step.has_action() {
            return Err(DslError::IncompleteStep {
                name: step.name.unwrap_or_default(),
            });
        }
        self.job.add_step(step);
        Ok(())
    }

    /// Add a step built by the plugin builder `builder_name` from inline text
    pub fn invoke(
        &mut self,
        builder_name: &str,
        content: Option<&str>,
        options: &BuilderOptions,
    ) -> Result<()> {
        let builder = self.lookup(builder_name)?;
        let script = match content {
            Some(text) if !text.is_empty() => text,
            _ => {
                return Err(DslError::EmptyStepContent {
                    builder: builder_name.to_string(),
                })
            }
        };

        debug!(job = %self.job.name, builder = %builder_name, "Invoking step builder");
        let step = builder(script, options)?;
        self.job.add_step(step);
        Ok(())
    }

    /// Add a step built by `builder_name` from whatever `block` prints.
    ///
    /// Printing through [`JobBuilder::print`] inside the block goes to a
    /// private buffer. The previous output target is restored when the block
    /// returns, fails, or panics.
    pub fn invoke_captured<F>(
        &mut self,
        builder_name: &str,
        options: &BuilderOptions,
        block: F,
    ) -> Result<()>
    where
        F: FnOnce(&mut JobBuilder) -> Result<()>,
    {
        self.lookup(builder_name)?;

        let script = {
            let guard = self.output.capture();
            block(self)?;
            guard.finish()
        };

        self.invoke(builder_name, Some(script.as_str()), options)
    }

    /// Print text to the current output target
    pub fn print(&self, text: &str) -> Result<()> {
        Ok(self.output.print(text)?)
    }

    /// Print a line to the current output target
    pub fn println(&self, text: &str) -> Result<()> {
        Ok(self.output.println(text)?)
    }

    /// Whether a step builder of this name is available in this job
    pub fn has_builder(&self, name: &str) -> bool {
        self.builders.contains_key(name)
    }

    pub fn builder_names(&self) -> Vec<&str> {
        self.builders.keys().map(String::as_str).collect()
    }

    /// The job built so far
    pub fn job(&self) -> &Job {
        &self.job
    }

    pub(crate) fn finish(self) -> Job {
        self.job
    }

    fn lookup(&self, name: &str) -> Result<StepBuilderFn> {
        self.builders
            .get(name)
            .cloned()
            .ok_or_else(|| DslError::UnknownBuilder {
                name: name.to_string(),
            })
    }
}
