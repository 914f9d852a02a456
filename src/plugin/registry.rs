//! Registry of builders aggregated from loaded plugins

use crate::plugin::{JobBuilderFn, Plugin, StepBuilderFn, WorkflowBuilderFn};
use indexmap::IndexMap;
use std::fmt;
use tracing::{info, warn};

/// Builders from every loaded plugin, keyed by name
///
/// A builder name registered again by a later plugin replaces the earlier
/// builder: plugins are loaded in priority order and the last one wins.
#[derive(Clone, Default)]
pub struct PluginRegistry {
    step_builders: IndexMap<String, StepBuilderFn>,
    job_builders: IndexMap<String, JobBuilderFn>,
    workflow_builders: IndexMap<String, WorkflowBuilderFn>,
    loaded_plugins: IndexMap<String, Plugin>,
}

impl PluginRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Load one plugin, overriding builders that share a name
    pub fn load_plugin(&mut self, plugin: Plugin) {
        info!(
            plugin = %plugin.name,
            version = %plugin.version,
            step_builders = plugin.step_builders.len(),
            "Loading plugin"
        );

        merge(&mut self.step_builders, &plugin.step_builders, &plugin.name, "step");
        merge(&mut self.job_builders, &plugin.job_builders, &plugin.name, "job");
        merge(
            &mut self.workflow_builders,
            &plugin.workflow_builders,
            &plugin.name,
            "workflow",
        );

        self.loaded_plugins.insert(plugin.name.clone(), plugin);
    }

    /// Load plugins in order; later plugins win name collisions
    pub fn load_plugins<I>(&mut self, plugins: I)
    where
        I: IntoIterator<Item = Plugin>,
    {
        for plugin in plugins {
            self.load_plugin(plugin);
        }
    }

    pub fn step_builder(&self, name: &str) -> Option<&StepBuilderFn> {
        self.step_builders.get(name)
    }

    pub fn job_builder(&self, name: &str) -> Option<&JobBuilderFn> {
        self.job_builders.get(name)
    }

    pub fn workflow_builder(&self, name: &str) -> Option<&WorkflowBuilderFn> {
        self.workflow_builders.get(name)
    }

    /// All step builders, in registration order
    pub fn step_builders(&self) -> &IndexMap<String, StepBuilderFn> {
        &self.step_builders
    }

    /// Names of all step builders
    pub fn step_builder_names(&self) -> Vec<String> {
        self.step_builders.keys().cloned().collect()
    }

    pub fn loaded_plugins(&self) -> &IndexMap<String, Plugin> {
        &self.loaded_plugins
    }

    pub fn plugin(&self, name: &str) -> Option<&Plugin> {
        self.loaded_plugins.get(name)
    }
}

impl fmt::Debug for PluginRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PluginRegistry")
            .field("step_builders", &self.step_builders.keys().collect::<Vec<_>>())
            .field("job_builders", &self.job_builders.keys().collect::<Vec<_>>())
            .field("workflow_builders", &self.workflow_builders.keys().collect::<Vec<_>>())
            .field("loaded_plugins", &self.loaded_plugins.keys().collect::<Vec<_>>())
            .finish()
    }
}

fn merge<B: Clone>(
    target: &mut IndexMap<String, B>,
    source: &IndexMap<String, B>,
    plugin: &str,
    kind: &str,
) {
    for (name, builder) in source {
        if target.insert(name.clone(), builder.clone()).is_some() {
            warn!(plugin = %plugin, builder = %name, kind = %kind, "Overriding previously registered builder");
        }
    }
}
