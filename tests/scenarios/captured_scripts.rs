//! Test: Captured scripts - printed output becomes step content

use crate::helpers::*;
use workflow_dsl::{BuilderOptions, CaptureBuffer, DslError};

/// Indented printed lines are normalized and wrapped with enabled boilerplate
#[test]
fn test_captured_script_with_boilerplate() {
    let outer = CaptureBuffer::new();
    let api = session_with(&outer);

    let options = BuilderOptions::new()
        .name("Build and test")
        .header(true)
        .strict(true)
        .env_var("RUST_BACKTRACE", "1");

    let workflow = api
        .workflow("ci", |w| {
            w.job("build", |j| {
                j.println("outside before")?;
                j.invoke_captured("bash", &options, |j| {
                    j.println("")?;
                    j.println("    cargo build")?;
                    j.println("      --release")?;
                    j.println("    cargo test")?;
                    j.println("")
                })?;
                j.println("outside after")
            })
        })
        .unwrap();

    let step = &workflow.jobs["build"].steps[0];
    assert_eq!(step.name.as_deref(), Some("Build and test"));
    assert_eq!(
        step.run.as_deref(),
        Some("#!/usr/bin/env bash\nset -euo pipefail\ncargo build\n  --release\ncargo test")
    );
    assert_eq!(step.shell.as_deref(), Some("bash"));
    assert_eq!(
        step.env.as_ref().and_then(|e| e.get("RUST_BACKTRACE")).map(String::as_str),
        Some("1")
    );
    assert_eq!(outer.contents(), "outside before\noutside after\n");
}

/// Nested captures each collect only their own output
#[test]
fn test_nested_captures() {
    let outer = CaptureBuffer::new();
    let api = session_with(&outer);

    let workflow = api
        .workflow("ci", |w| {
            w.job("build", |j| {
                j.invoke_captured("bash", &BuilderOptions::new().name("outer"), |j| {
                    j.println("echo outer-1")?;
                    j.invoke_captured("python", &BuilderOptions::new().name("inner"), |j| {
                        j.println("print('inner')")
                    })?;
                    j.println("echo outer-2")
                })
            })
        })
        .unwrap();

    let steps = &workflow.jobs["build"].steps;
    assert_eq!(steps.len(), 2);
    assert_eq!(steps[0].name.as_deref(), Some("inner"));
    assert_eq!(steps[0].run.as_deref(), Some("print('inner')"));
    assert_eq!(steps[1].name.as_deref(), Some("outer"));
    assert_eq!(steps[1].run.as_deref(), Some("echo outer-1\necho outer-2"));
    assert_eq!(outer.contents(), "");
}

/// A block that only prints whitespace reaches the builder and is rejected there
#[test]
fn test_whitespace_only_capture_is_empty_script() {
    let outer = CaptureBuffer::new();
    let api = session_with(&outer);

    let result = api.workflow("ci", |w| {
        w.job("build", |j| {
            j.invoke_captured("pwsh", &BuilderOptions::default(), |j| j.println("   "))
        })
    });
    match result {
        Err(DslError::EmptyScript { language }) => assert_eq!(language, "PowerShell"),
        other => panic!("Expected EmptyScript, got {:?}", other),
    }
}
