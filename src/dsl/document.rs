//! Workflow documents - declarative YAML replayed through the builders

use crate::core::{
    DslError, Result, ScriptSource, StepOptions, Strategy, TriggerSpec, Workflow,
};
use crate::dsl::{Api, JobBuilder};
use crate::plugin::BuilderOptions;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Top-level workflow document loaded from YAML
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WorkflowDocument {
    /// Workflow name
    pub name: String,

    /// Triggers; an event with no filters may be written as `event:` or `event: {}`
    #[serde(default)]
    pub on: IndexMap<String, Option<TriggerSpec>>,

    /// Workflow-wide environment
    #[serde(default)]
    pub env: IndexMap<String, String>,

    /// Jobs in declaration order
    #[serde(default)]
    pub jobs: IndexMap<String, JobDocument>,
}

/// Job as defined in YAML
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct JobDocument {
    /// Optional; must match the job's key when given
    #[serde(default)]
    pub name: Option<String>,

    #[serde(default, alias = "runs-on")]
    pub runs_on: Option<String>,

    #[serde(default)]
    pub needs: Option<Vec<String>>,

    #[serde(default)]
    pub env: IndexMap<String, String>,

    #[serde(default)]
    pub strategy: Option<StrategyDocument>,

    #[serde(default)]
    pub steps: Vec<StepDocument>,
}

/// Strategy as defined in YAML
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StrategyDocument {
    #[serde(default)]
    pub matrix: IndexMap<String, Vec<String>>,

    #[serde(default, alias = "fail-fast")]
    pub fail_fast: Option<bool>,

    #[serde(default, alias = "max-parallel")]
    pub max_parallel: Option<u32>,
}

/// Step as defined in YAML.
///
/// With `builder` set, the step is produced by that plugin builder from
/// `script` or `script_file`; otherwise it is a literal step that needs
/// `run` or `uses`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StepDocument {
    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub id: Option<String>,

    #[serde(default, rename = "if")]
    pub if_: Option<String>,

    #[serde(default)]
    pub uses: Option<String>,

    #[serde(default)]
    pub with: Option<IndexMap<String, String>>,

    #[serde(default)]
    pub run: Option<String>,

    #[serde(default)]
    pub shell: Option<String>,

    #[serde(default)]
    pub env: Option<IndexMap<String, String>>,

    /// Plugin step builder to use
    #[serde(default)]
    pub builder: Option<String>,

    /// Inline script for the builder
    #[serde(default)]
    pub script: Option<String>,

    /// Script file for the builder, relative to the document
    #[serde(default)]
    pub script_file: Option<PathBuf>,

    #[serde(default)]
    pub header: bool,

    #[serde(default)]
    pub strict: bool,

    #[serde(default)]
    pub debug: bool,

    #[serde(default)]
    pub setup: bool,
}

impl WorkflowDocument {
    /// Load a workflow document from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse a workflow document from a YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let document: WorkflowDocument = serde_yaml::from_str(yaml)?;
        document.validate()?;
        Ok(document)
    }

    /// Check that every step entry has a usable shape
    pub fn validate(&self) -> Result<()> {
        for (job_name, job) in &self.jobs {
            if let Some(name) = job.name.as_ref().filter(|n| *n != job_name) {
                return Err(DslError::InvalidDocument(format!(
                    "job '{}' is named '{}'; a job's name must match its key",
                    job_name, name
                )));
            }
            for (index, step) in job.steps.iter().enumerate() {
                step.validate().map_err(|message| {
                    DslError::InvalidDocument(format!(
                        "job '{}' step {}: {}",
                        job_name,
                        index + 1,
                        message
                    ))
                })?;
            }
        }
        Ok(())
    }

    /// Build the workflow by replaying the document through `api`'s builders
    pub fn evaluate(&self, api: &Api, scripts: &dyn ScriptSource) -> Result<Workflow> {
        api.workflow(self.name.as_str(), |w| {
            for (event, trigger) in &self.on {
                w.on(event.as_str(), trigger.clone().unwrap_or_default());
            }
            for (key, value) in &self.env {
                w.env(key.as_str(), value.as_str());
            }
            for (job_name, job) in &self.jobs {
                w.job(job_name.as_str(), |j| job.apply(j, scripts))?;
            }
            Ok(())
        })
    }

    /// Total number of step entries
    pub fn step_count(&self) -> usize {
        self.jobs.values().map(|j| j.steps.len()).sum()
    }
}

impl JobDocument {
    fn apply(&self, j: &mut JobBuilder, scripts: &dyn ScriptSource) -> Result<()> {
        if let Some(runner) = &self.runs_on {
            j.runs_on(runner.as_str());
        }
        if let Some(needs) = &self.needs {
            j.needs(needs.iter().cloned());
        }
        for (key, value) in &self.env {
            j.env(key.as_str(), value.as_str());
        }
        if let Some(strategy) = &self.strategy {
            j.strategy(strategy.to_strategy());
        }
        for step in &self.steps {
            step.apply(j, scripts)?;
        }
        Ok(())
    }
}

impl StrategyDocument {
    fn to_strategy(&self) -> Strategy {
        Strategy {
            matrix: self.matrix.clone(),
            fail_fast: self.fail_fast,
            max_parallel: self.max_parallel,
        }
    }
}

impl StepDocument {
    fn validate(&self) -> std::result::Result<(), String> {
        match &self.builder {
            Some(builder) => {
                if self.script.is_some() && self.script_file.is_some() {
                    return Err(format!(
                        "builder '{}' takes either `script` or `script_file`, not both",
                        builder
                    ));
                }
                if self.run.is_some() || self.uses.is_some() {
                    return Err(format!(
                        "builder '{}' cannot be combined with `run` or `uses`",
                        builder
                    ));
                }
            }
            None => {
                if self.script.is_some() || self.script_file.is_some() {
                    return Err("`script` and `script_file` need a `builder`".to_string());
                }
                if self.header || self.strict || self.debug || self.setup {
                    return Err("builder toggles need a `builder`".to_string());
                }
            }
        }
        Ok(())
    }

    fn apply(&self, j: &mut JobBuilder, scripts: &dyn ScriptSource) -> Result<()> {
        match &self.builder {
            Some(builder) => {
                let content = match (&self.script, &self.script_file) {
                    (Some(script), _) => Some(script.clone()),
                    (None, Some(path)) => Some(scripts.read(path)?),
                    (None, None) => None,
                };
                j.invoke(builder, content.as_deref(), &self.builder_options())
            }
            None => j.literal(self.step_options()),
        }
    }

    fn builder_options(&self) -> BuilderOptions {
        BuilderOptions {
            name: self.name.clone(),
            header: self.header,
            strict: self.strict,
            debug: self.debug,
            setup: self.setup,
            env: self.env.clone(),
        }
    }

    fn step_options(&self) -> StepOptions {
        StepOptions {
            name: self.name.clone(),
            run: self.run.clone(),
            uses: self.uses.clone(),
            with: self.with.clone(),
            env: self.env.clone(),
            id: self.id.clone(),
            if_: self.if_.clone(),
            shell: self.shell.clone(),
        }
    }
}
