//! Test: Duplicate jobs - redefining a job name replaces it

use crate::helpers::*;
use workflow_dsl::{serialize, StepOptions, TriggerSpec};

/// The later definition wins and keeps its first position
#[test]
fn test_duplicate_job_replaces_earlier_definition() {
    let api = session();
    let workflow = api
        .workflow("ci", |w| {
            w.job("lint", |j| j.step("lint", StepOptions::new().run("make lint")))?;
            w.job("build", |j| j.step("old", StepOptions::new().run("make old")))?;
            w.job("test", |j| j.step("test", StepOptions::new().run("make test")))?;
            w.job("build", |j| {
                j.runs_on("macos-latest");
                j.step("new", StepOptions::new().run("make new"))
            })
        })
        .unwrap();

    let names: Vec<_> = workflow.jobs.keys().map(String::as_str).collect();
    assert_eq!(names, vec!["lint", "build", "test"]);

    let build = &workflow.jobs["build"];
    assert_eq!(build.steps.len(), 1);
    assert_eq!(build.steps[0].name.as_deref(), Some("new"));

    let value = serialize(&workflow);
    assert_eq!(
        at(&value, &["jobs", "build", "runs_on"]).and_then(|v| v.as_str()),
        Some("macos-latest")
    );
}

/// Redefining a trigger replaces its filters
#[test]
fn test_duplicate_trigger_keeps_last() {
    let api = session();
    let workflow = api
        .workflow("ci", |w| {
            w.on("push", TriggerSpec::new().branches(["main"]));
            w.on("push", TriggerSpec::new().tags(["v*"]));
            Ok(())
        })
        .unwrap();

    let value = serialize(&workflow);
    assert!(at(&value, &["on", "push", "branches"]).is_none());
    assert_eq!(value["on"]["push"]["tags"][0].as_str(), Some("v*"));
}
