//! Workflow domain model

use crate::core::{
    error::{DslError, Result},
    job::Job,
};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::warn;

/// A complete workflow: triggers plus jobs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Workflow {
    /// Workflow name
    pub name: String,

    /// Trigger per event name
    pub on: IndexMap<String, TriggerSpec>,

    /// Jobs keyed by name, in insertion order
    pub jobs: IndexMap<String, Job>,

    /// Workflow-wide environment variables
    pub env: IndexMap<String, String>,
}

/// Conditions under which an event triggers the workflow
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TriggerSpec {
    pub branches: Option<Vec<String>>,
    pub tags: Option<Vec<String>>,
    pub paths: Option<Vec<String>>,
}

impl TriggerSpec {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn branches<I, S>(mut self, branches: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.branches = Some(branches.into_iter().map(Into::into).collect());
        self
    }

    pub fn tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = Some(tags.into_iter().map(Into::into).collect());
        self
    }

    pub fn paths<I, S>(mut self, paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.paths = Some(paths.into_iter().map(Into::into).collect());
        self
    }
}

impl Workflow {
    /// Create a workflow with no triggers or jobs
    pub fn new(name: impl Into<String>) -> Self {
        Workflow {
            name: name.into(),
            on: IndexMap::new(),
            jobs: IndexMap::new(),
            env: IndexMap::new(),
        }
    }

    /// Add a job, replacing any job already registered under the same name
    pub fn add_job(&mut self, job: Job) {
        if self.jobs.contains_key(&job.name) {
            warn!(workflow = %self.name, job = %job.name, "Replacing previously defined job");
        }
        self.jobs.insert(job.name.clone(), job);
    }

    /// Set the trigger for an event, replacing any previous one
    pub fn set_trigger(&mut self, event: impl Into<String>, trigger: TriggerSpec) {
        self.on.insert(event.into(), trigger);
    }

    /// Set a workflow-wide environment variable
    pub fn set_env(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.env.insert(key.into(), value.into());
    }

    /// Get a job by name
    pub fn job(&self, name: &str) -> Option<&Job> {
        self.jobs.get(name)
    }

    /// Check that every `needs` entry names a job of this workflow and that
    /// `needs` has no cycles
    pub fn check_needs(&self) -> Result<()> {
        for job in self.jobs.values() {
            for need in job.needs.iter().flatten() {
                if !self.jobs.contains_key(need) {
                    return Err(DslError::UnknownNeed {
                        job: job.name.clone(),
                        need: need.clone(),
                    });
                }
            }
        }

        let mut visited = HashSet::new();
        let mut recursion_stack = HashSet::new();
        for name in self.jobs.keys() {
            if !visited.contains(name.as_str()) {
                self.dfs_check(name, &mut visited, &mut recursion_stack)?;
            }
        }

        Ok(())
    }

    fn dfs_check<'a>(
        &'a self,
        name: &'a str,
        visited: &mut HashSet<&'a str>,
        recursion_stack: &mut HashSet<&'a str>,
    ) -> Result<()> {
        visited.insert(name);
        recursion_stack.insert(name);

        if let Some(job) = self.jobs.get(name) {
            for need in job.needs.iter().flatten() {
                if recursion_stack.contains(need.as_str()) {
                    return Err(DslError::NeedsCycle { job: need.clone() });
                }
                if !visited.contains(need.as_str()) {
                    self.dfs_check(need, visited, recursion_stack)?;
                }
            }
        }

        recursion_stack.remove(name);
        Ok(())
    }
}
