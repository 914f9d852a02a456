//! Scenario-based tests for workflow-dsl

mod captured_scripts;
mod document_render;
mod duplicate_jobs;
mod omission;
mod unknown_builder;
