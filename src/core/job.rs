//! Job domain model

use crate::core::step::Step;
use indexmap::IndexMap;

/// A named, ordered sequence of steps that run on one runner
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Job {
    /// Job name, also its key in the workflow
    pub name: String,

    /// Runner label, e.g. `ubuntu-latest`
    pub runs_on: Option<String>,

    /// Jobs that must finish before this one
    pub needs: Option<Vec<String>>,

    /// Environment variables for every step
    pub env: IndexMap<String, String>,

    /// Steps in declaration order
    pub steps: Vec<Step>,

    /// Matrix strategy
    pub strategy: Option<Strategy>,
}

/// Matrix strategy for a job
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Strategy {
    /// Matrix axes in declaration order
    pub matrix: IndexMap<String, Vec<String>>,

    pub fail_fast: Option<bool>,

    pub max_parallel: Option<u32>,
}

impl Strategy {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a matrix axis
    pub fn axis<I, S>(mut self, name: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.matrix
            .insert(name.into(), values.into_iter().map(Into::into).collect());
        self
    }

    pub fn fail_fast(mut self, fail_fast: bool) -> Self {
        self.fail_fast = Some(fail_fast);
        self
    }

    pub fn max_parallel(mut self, max_parallel: u32) -> Self {
        self.max_parallel = Some(max_parallel);
        self
    }
}

impl Job {
    /// Create a job with no steps
    pub fn new(name: impl Into<String>) -> Self {
        Job {
            name: name.into(),
            runs_on: None,
            needs: None,
            env: IndexMap::new(),
            steps: Vec::new(),
            strategy: None,
        }
    }

    /// Append a step
    pub fn add_step(&mut self, step: Step) {
        self.steps.push(step);
    }
}
