//! Core domain models for workflows
//!
//! This module defines the workflow, job, and step entities, the script
//! normalizer, and the serializer that turns a workflow into its output
//! structure.

pub mod error;
pub mod job;
pub mod script;
pub mod serialize;
pub mod source;
pub mod step;
pub mod workflow;

pub use error::{DslError, Result};
pub use job::*;
pub use script::normalize_script;
pub use serialize::{serialize, serialize_with, to_yaml, KeyStyle, Node, SerializeOptions};
pub use source::{FsScriptSource, MemoryScriptSource, ScriptSource};
pub use step::*;
pub use workflow::*;
