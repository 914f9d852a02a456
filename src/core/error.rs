//! Error types for workflow building

use thiserror::Error;

/// Errors raised while evaluating a workflow definition
#[derive(Debug, Error)]
pub enum DslError {
    /// A plugin builder was invoked without inline text and without captured output
    #[error("Missing script content for '{builder}' step")]
    EmptyStepContent { builder: String },

    /// A language helper normalized its script down to nothing
    #[error("Empty script content provided to {language} builder")]
    EmptyScript { language: String },

    /// A step builder name that no loaded plugin provides
    #[error("Unknown step builder: {name}")]
    UnknownBuilder { name: String },

    /// A job builder name that no loaded plugin provides
    #[error("Unknown job builder: {name}")]
    UnknownJobBuilder { name: String },

    /// A workflow builder name that no loaded plugin provides
    #[error("Unknown workflow builder: {name}")]
    UnknownWorkflowBuilder { name: String },

    /// A literal step with neither `run` nor `uses`
    #[error("Step '{name}' needs either `run` or `uses`")]
    IncompleteStep { name: String },

    /// A script file that does not exist
    #[error("File not found at path: {path}")]
    NotFound { path: String },

    /// A job that needs a job missing from the workflow
    #[error("Job '{job}' needs non-existent job '{need}'")]
    UnknownNeed { job: String, need: String },

    /// A cycle through `needs`
    #[error("Cycle detected in job needs involving '{job}'")]
    NeedsCycle { job: String },

    /// A workflow document entry that cannot be evaluated
    #[error("Invalid workflow document: {0}")]
    InvalidDocument(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

pub type Result<T> = std::result::Result<T, DslError>;
