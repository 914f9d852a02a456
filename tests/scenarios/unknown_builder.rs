//! Test: Unknown builder - evaluation aborts without output

use crate::helpers::*;
use workflow_dsl::{BuilderOptions, CaptureBuffer, DslError, StepOptions, TriggerSpec};

/// An unregistered builder name aborts the workflow and prints nothing
#[test]
fn test_unknown_builder_aborts_workflow() {
    let outer = CaptureBuffer::new();
    let api = session_with(&outer);

    let result = api.workflow("ci", |w| {
        w.on("push", TriggerSpec::new().branches(["main"]));
        w.job("build", |j| {
            j.step("checkout", StepOptions::new().uses("actions/checkout@v4"))?;
            j.invoke("ruby", Some("puts 'hi'"), &BuilderOptions::default())
        })
    });

    match result {
        Err(DslError::UnknownBuilder { name }) => assert_eq!(name, "ruby"),
        other => panic!("Expected UnknownBuilder, got {:?}", other),
    }
    assert_eq!(outer.contents(), "");
}

/// An unknown builder inside a captured block still restores the output target
#[test]
fn test_unknown_builder_inside_capture() {
    let outer = CaptureBuffer::new();
    let api = session_with(&outer);

    let result = api.workflow("ci", |w| {
        w.job("build", |j| {
            j.invoke_captured("bash", &BuilderOptions::default(), |j| {
                j.println("echo before")?;
                j.invoke("ruby", None, &BuilderOptions::default())
            })
        })
    });

    assert!(matches!(result, Err(DslError::UnknownBuilder { .. })));
    assert_eq!(outer.contents(), "");

    api.output().println("still reaches the outer target").unwrap();
    assert_eq!(outer.contents(), "still reaches the outer target\n");
}

/// A builder from a plugin that was never loaded is unknown
#[test]
fn test_builder_requires_loaded_plugin() {
    let api = workflow_dsl::Api::with_output(workflow_dsl::OutputTarget::new(CaptureBuffer::new()));
    let result = api.workflow("ci", |w| {
        w.job("build", |j| j.invoke("bash", Some("make"), &BuilderOptions::default()))
    });
    assert!(matches!(result, Err(DslError::UnknownBuilder { .. })));
}
