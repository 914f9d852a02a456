//! Test utility functions for workflow-dsl

#![allow(dead_code)]

use serde_yaml::Value;
use tempfile::TempDir;
use workflow_dsl::{
    language_plugin, Api, CaptureBuffer, MemoryScriptSource, OutputTarget, StepOptions,
    TriggerSpec, Workflow, WorkflowDocument,
};

/// A session with the language plugin that prints into `buffer`
pub fn session_with(buffer: &CaptureBuffer) -> Api {
    let mut api = Api::with_output(OutputTarget::new(buffer.clone()));
    api.load_plugins(vec![language_plugin()]);
    api
}

/// A session with the language plugin whose output is discarded
pub fn session() -> Api {
    session_with(&CaptureBuffer::new())
}

/// The canonical "ci" workflow: push to main, one build job with two steps
pub fn ci_workflow(api: &Api) -> Workflow {
    api.workflow("ci", |w| {
        w.on("push", TriggerSpec::new().branches(["main"]));
        w.job("build", |j| {
            j.runs_on("ubuntu-latest");
            j.step("checkout", StepOptions::new().uses("actions/checkout@v4"))?;
            j.step("test", StepOptions::new().run("make test"))
        })
    })
    .expect("ci workflow should build")
}

/// Parse and evaluate a document with the given in-memory scripts
pub fn workflow_from_yaml_with(yaml: &str, scripts: &MemoryScriptSource) -> Workflow {
    WorkflowDocument::from_yaml(yaml)
        .expect("document should parse")
        .evaluate(&session(), scripts)
        .expect("document should evaluate")
}

pub fn workflow_from_yaml(yaml: &str) -> Workflow {
    workflow_from_yaml_with(yaml, &MemoryScriptSource::new())
}

/// Look up a nested mapping key by path
pub fn at<'a>(value: &'a Value, path: &[&str]) -> Option<&'a Value> {
    path.iter().try_fold(value, |current, key| current.get(*key))
}

/// Assert that no null or empty value appears anywhere in the output,
/// except the keyed entries under `on` and `jobs`
pub fn assert_no_empty_values(value: &Value) {
    check_non_empty(value, &mut Vec::new());
}

fn check_non_empty(value: &Value, path: &mut Vec<String>) {
    let keyed_entry = path.len() == 2 && (path[0] == "on" || path[0] == "jobs");

    match value {
        Value::Null => panic!("null value at {}", path.join(".")),
        Value::String(s) if s.is_empty() => panic!("empty string at {}", path.join(".")),
        Value::Sequence(items) => {
            assert!(!items.is_empty(), "empty list at {}", path.join("."));
            for (index, item) in items.iter().enumerate() {
                path.push(index.to_string());
                check_non_empty(item, path);
                path.pop();
            }
        }
        Value::Mapping(map) => {
            assert!(
                keyed_entry || !map.is_empty(),
                "empty mapping at {}",
                path.join(".")
            );
            for (key, item) in map {
                path.push(key.as_str().unwrap_or_default().to_string());
                check_non_empty(item, path);
                path.pop();
            }
        }
        _ => {}
    }
}

/// A fresh scratch directory, removed when dropped
pub fn scratch_dir() -> TempDir {
    tempfile::tempdir().expect("scratch dir should be created")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_at_follows_path() {
        let value: Value = serde_yaml::from_str("a:\n  b: 1\n").unwrap();
        assert_eq!(at(&value, &["a", "b"]).and_then(Value::as_u64), Some(1));
        assert!(at(&value, &["a", "c"]).is_none());
    }

    #[test]
    #[should_panic(expected = "empty list at jobs.build.needs")]
    fn test_empty_list_is_reported() {
        let value: Value = serde_yaml::from_str("jobs:\n  build:\n    needs: []\n").unwrap();
        assert_no_empty_values(&value);
    }
}
