//! Step domain model

use indexmap::IndexMap;

/// A single step in a job - either a script to run or an action to use
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Step {
    /// Display name
    pub name: Option<String>,

    /// Script text to run
    pub run: Option<String>,

    /// External action reference, e.g. `actions/checkout@v4`
    pub uses: Option<String>,

    /// Inputs for the action
    pub with: Option<IndexMap<String, String>>,

    /// Environment variables for this step
    pub env: Option<IndexMap<String, String>>,

    /// Step identifier, referenced by later steps
    pub id: Option<String>,

    /// Condition expression
    pub if_: Option<String>,

    /// Shell used for `run`
    pub shell: Option<String>,
}

/// Options for building a literal step
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StepOptions {
    pub name: Option<String>,
    pub run: Option<String>,
    pub uses: Option<String>,
    pub with: Option<IndexMap<String, String>>,
    pub env: Option<IndexMap<String, String>>,
    pub id: Option<String>,
    pub if_: Option<String>,
    pub shell: Option<String>,
}

impl StepOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn run(mut self, run: impl Into<String>) -> Self {
        self.run = Some(run.into());
        self
    }

    pub fn uses(mut self, uses: impl Into<String>) -> Self {
        self.uses = Some(uses.into());
        self
    }

    /// Add one action input
    pub fn with_input(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.with
            .get_or_insert_with(IndexMap::new)
            .insert(key.into(), value.into());
        self
    }

    /// Add one environment variable
    pub fn env_var(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env
            .get_or_insert_with(IndexMap::new)
            .insert(key.into(), value.into());
        self
    }

    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn if_(mut self, condition: impl Into<String>) -> Self {
        self.if_ = Some(condition.into());
        self
    }

    pub fn shell(mut self, shell: impl Into<String>) -> Self {
        self.shell = Some(shell.into());
        self
    }
}

impl Step {
    /// Create a step by copying the given options
    pub fn new(options: StepOptions) -> Self {
        Step {
            name: options.name,
            run: options.run,
            uses: options.uses,
            with: options.with,
            env: options.env,
            id: options.id,
            if_: options.if_,
            shell: options.shell,
        }
    }

    /// Whether the step has something to do
    pub fn has_action(&self) -> bool {
        self.run.is_some() || self.uses.is_some()
    }
}
