//! Test: Omission - absent and empty fields never reach the output

use crate::helpers::*;
use indexmap::IndexMap;
use workflow_dsl::{
    serialize, serialize_with, BuilderOptions, SerializeOptions, StepOptions, Strategy,
    TriggerSpec,
};

/// A workflow that sets every optional field to "empty" renders without them
#[test]
fn test_empty_fields_are_omitted_everywhere() {
    let api = session();
    let workflow = api
        .workflow("ci", |w| {
            w.on("push", TriggerSpec::new().branches(Vec::<String>::new()));
            w.on_event("workflow_dispatch");
            w.job("build", |j| {
                j.needs(Vec::<String>::new());
                j.strategy(Strategy::new());
                j.step("test", StepOptions::new().run("make test"))
            })?;
            w.job("idle", |_| Ok(()))
        })
        .unwrap();

    for options in [SerializeOptions::default(), SerializeOptions::actions()] {
        assert_no_empty_values(&serialize_with(&workflow, options));
    }

    let value = serialize(&workflow);
    let build = &value["jobs"]["build"];
    assert!(build.get("needs").is_none());
    assert!(build.get("strategy").is_none());
    assert!(build.get("env").is_none());
    assert!(build.get("runs_on").is_none());

    // Keyed entries stay, even with nothing under them
    assert!(value["on"]["push"].as_mapping().map(|m| m.is_empty()).unwrap_or(false));
    assert!(value["on"]["workflow_dispatch"].is_mapping());
    assert_eq!(value["jobs"]["idle"]["name"].as_str(), Some("idle"));
    assert!(value["jobs"]["idle"].get("steps").is_none());
}

/// A step with empty maps and text keeps only what was actually set
#[test]
fn test_step_with_empty_maps() {
    let api = session();
    let workflow = api
        .workflow("ci", |w| {
            w.job("build", |j| {
                j.literal(StepOptions {
                    name: Some(String::new()),
                    run: Some("make".to_string()),
                    with: Some(IndexMap::new()),
                    env: Some(IndexMap::new()),
                    id: Some(String::new()),
                    ..StepOptions::default()
                })
            })
        })
        .unwrap();

    let value = serialize(&workflow);
    let step = &value["jobs"]["build"]["steps"][0];
    assert_eq!(step.as_mapping().map(|m| m.len()), Some(1));
    assert_eq!(step["run"].as_str(), Some("make"));
}

/// Steps built by language helpers omit what their options leave unset
#[test]
fn test_helper_step_omits_unset_options() {
    let api = session();
    let workflow = api
        .workflow("ci", |w| {
            w.job("build", |j| j.invoke("python", Some("print(1)"), &BuilderOptions::default()))
        })
        .unwrap();

    let value = serialize(&workflow);
    let step = &value["jobs"]["build"]["steps"][0];
    assert!(step.get("env").is_none());
    assert!(step.get("uses").is_none());
    assert_eq!(step["shell"].as_str(), Some("python"));
    assert_no_empty_values(&value);
}
