//! Test: Document render - YAML document to workflow file

use crate::helpers::*;
use serde_yaml::Value;
use std::fs;
use workflow_dsl::{
    to_yaml, DslError, FsScriptSource, MemoryScriptSource, SerializeOptions, WorkflowDocument,
};

const RELEASE: &str = r#"
name: "release"
on:
  push:
    tags: ["v*"]
  workflow_dispatch:
env:
  CARGO_TERM_COLOR: always
jobs:
  build:
    runs-on: ubuntu-latest
    strategy:
      matrix:
        target: [x86_64-unknown-linux-gnu, aarch64-unknown-linux-gnu]
      max-parallel: 2
    steps:
      - uses: actions/checkout@v4
      - name: Build
        builder: bash
        strict: true
        script_file: scripts/build.sh
  publish:
    runs-on: ubuntu-latest
    needs: [build]
    steps:
      - name: Publish
        if: startsWith(github.ref, 'refs/tags/')
        run: cargo publish
        env:
          CARGO_REGISTRY_TOKEN: ${{ secrets.CRATES_TOKEN }}
"#;

/// Scripts are read relative to the document and the result renders cleanly
#[test]
fn test_document_renders_with_script_files() {
    let scratch = scratch_dir();
    let dir = scratch.path();
    fs::create_dir_all(dir.join("scripts")).unwrap();
    fs::write(
        dir.join("scripts/build.sh"),
        "\n    cargo build --release\n    cargo test\n",
    )
    .unwrap();
    fs::write(dir.join("release.yml"), RELEASE).unwrap();

    let document = WorkflowDocument::from_file(dir.join("release.yml")).unwrap();
    let workflow = document
        .evaluate(&session(), &FsScriptSource::with_base_dir(dir))
        .unwrap();
    workflow.check_needs().unwrap();

    let yaml = to_yaml(&workflow, SerializeOptions::actions()).unwrap();
    let value: Value = serde_yaml::from_str(&yaml).unwrap();
    assert_no_empty_values(&value);

    assert_eq!(value["on"]["push"]["tags"][0].as_str(), Some("v*"));
    assert!(value["on"]["workflow_dispatch"].is_mapping());
    assert_eq!(value["env"]["CARGO_TERM_COLOR"].as_str(), Some("always"));

    let build = &value["jobs"]["build"];
    assert_eq!(build["runs-on"].as_str(), Some("ubuntu-latest"));
    assert_eq!(build["strategy"]["max-parallel"].as_u64(), Some(2));
    assert_eq!(build["steps"][0]["uses"].as_str(), Some("actions/checkout@v4"));
    assert_eq!(
        build["steps"][1]["run"].as_str(),
        Some("set -euo pipefail\ncargo build --release\ncargo test")
    );

    let publish = &value["jobs"]["publish"]["steps"][0];
    assert_eq!(publish["if"].as_str(), Some("startsWith(github.ref, 'refs/tags/')"));
    assert_eq!(
        publish["env"]["CARGO_REGISTRY_TOKEN"].as_str(),
        Some("${{ secrets.CRATES_TOKEN }}")
    );
}

/// A missing script file surfaces as NotFound
#[test]
fn test_document_with_missing_script_file() {
    let document = WorkflowDocument::from_yaml(RELEASE).unwrap();
    let result = document.evaluate(&session(), &MemoryScriptSource::new());
    assert!(matches!(result, Err(DslError::NotFound { .. })));
}

/// Dependencies on unknown jobs and cycles are reported after evaluation
#[test]
fn test_document_needs_are_checked() {
    let unknown = workflow_from_yaml(
        r#"
name: "ci"
jobs:
  deploy:
    needs: [build]
    steps:
      - run: ./deploy.sh
"#,
    );
    match unknown.check_needs() {
        Err(DslError::UnknownNeed { job, need }) => {
            assert_eq!(job, "deploy");
            assert_eq!(need, "build");
        }
        other => panic!("Expected UnknownNeed, got {:?}", other),
    }

    let cyclic = workflow_from_yaml(
        r#"
name: "ci"
jobs:
  a:
    needs: [b]
  b:
    needs: [a]
"#,
    );
    assert!(matches!(cyclic.check_needs(), Err(DslError::NeedsCycle { .. })));
}

/// Inline scripts and in-memory script files produce the same step
#[test]
fn test_inline_and_file_scripts_agree() {
    let inline = workflow_from_yaml(
        r#"
name: "ci"
jobs:
  test:
    steps:
      - builder: python
        script: |
          import sys
          print(sys.version)
"#,
    );
    let scripts = MemoryScriptSource::new().with_script("check.py", "import sys\nprint(sys.version)\n");
    let from_file = workflow_from_yaml_with(
        r#"
name: "ci"
jobs:
  test:
    steps:
      - builder: python
        script_file: check.py
"#,
        &scripts,
    );
    assert_eq!(inline.jobs["test"].steps, from_file.jobs["test"].steps);
}
