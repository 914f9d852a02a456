//! Model → output structure
//!
//! Every entity is lowered through one recursive visitor over [`Node`]. Each
//! node lists its fields in output order and the same omission rule applies
//! to all of them: an absent or empty field produces no key at all.

use crate::core::{
    error::Result,
    job::{Job, Strategy},
    step::Step,
    workflow::{TriggerSpec, Workflow},
};
use indexmap::IndexMap;
use serde_yaml::{Mapping, Value};

/// How multi-word keys are spelled in the output
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum KeyStyle {
    /// Model field names: `runs_on`
    #[default]
    Model,
    /// Workflow-file spelling: `runs-on`
    Actions,
}

/// Serialization settings
#[derive(Debug, Clone, Copy, Default)]
pub struct SerializeOptions {
    pub key_style: KeyStyle,
}

impl SerializeOptions {
    pub fn actions() -> Self {
        Self {
            key_style: KeyStyle::Actions,
        }
    }
}

/// Any entity of the workflow graph
#[derive(Debug, Clone, Copy)]
pub enum Node<'a> {
    Workflow(&'a Workflow),
    Job(&'a Job),
    Step(&'a Step),
    Trigger(&'a TriggerSpec),
    Strategy(&'a Strategy),
}

/// One field value before the omission rule is applied
enum Field<'a> {
    Text(Option<&'a str>),
    Bool(Option<bool>),
    Number(Option<u32>),
    List(Option<&'a [String]>),
    Map(Option<&'a IndexMap<String, String>>),
    Matrix(&'a IndexMap<String, Vec<String>>),
    Node(Option<Node<'a>>),
    Nodes(Vec<Node<'a>>),
    /// Keyed entries that are always kept, even when their own value is empty
    Keyed(Vec<(&'a str, Node<'a>)>),
}

/// Serialize a workflow with the default options
pub fn serialize(workflow: &Workflow) -> Value {
    serialize_with(workflow, SerializeOptions::default())
}

/// Serialize a workflow
pub fn serialize_with(workflow: &Workflow, options: SerializeOptions) -> Value {
    visit(Node::Workflow(workflow), options)
}

/// Render a workflow as YAML text
pub fn to_yaml(workflow: &Workflow, options: SerializeOptions) -> Result<String> {
    Ok(serde_yaml::to_string(&serialize_with(workflow, options))?)
}

/// Lower any node into a mapping, omitting absent and empty fields
pub fn visit(node: Node<'_>, options: SerializeOptions) -> Value {
    let mut mapping = Mapping::new();
    for (key, field) in fields(node, options.key_style) {
        if let Some(value) = lower(field, options) {
            mapping.insert(Value::String(key.to_string()), value);
        }
    }
    Value::Mapping(mapping)
}

fn fields(node: Node<'_>, style: KeyStyle) -> Vec<(&'static str, Field<'_>)> {
    match node {
        Node::Workflow(workflow) => vec![
            ("name", Field::Text(Some(workflow.name.as_str()))),
            (
                "on",
                Field::Keyed(
                    workflow
                        .on
                        .iter()
                        .map(|(event, trigger)| (event.as_str(), Node::Trigger(trigger)))
                        .collect(),
                ),
            ),
            (
                "jobs",
                Field::Keyed(
                    workflow
                        .jobs
                        .iter()
                        .map(|(name, job)| (name.as_str(), Node::Job(job)))
                        .collect(),
                ),
            ),
            ("env", Field::Map(Some(&workflow.env))),
        ],
        Node::Job(job) => vec![
            ("name", Field::Text(Some(job.name.as_str()))),
            (
                match style {
                    KeyStyle::Model => "runs_on",
                    KeyStyle::Actions => "runs-on",
                },
                Field::Text(job.runs_on.as_deref()),
            ),
            ("needs", Field::List(job.needs.as_deref())),
            ("env", Field::Map(Some(&job.env))),
            ("strategy", Field::Node(job.strategy.as_ref().map(Node::Strategy))),
            ("steps", Field::Nodes(job.steps.iter().map(Node::Step).collect())),
        ],
        Node::Step(step) => vec![
            ("name", Field::Text(step.name.as_deref())),
            ("id", Field::Text(step.id.as_deref())),
            ("if", Field::Text(step.if_.as_deref())),
            ("uses", Field::Text(step.uses.as_deref())),
            ("with", Field::Map(step.with.as_ref())),
            ("shell", Field::Text(step.shell.as_deref())),
            ("run", Field::Text(step.run.as_deref())),
            ("env", Field::Map(step.env.as_ref())),
        ],
        Node::Trigger(trigger) => vec![
            ("branches", Field::List(trigger.branches.as_deref())),
            ("tags", Field::List(trigger.tags.as_deref())),
            ("paths", Field::List(trigger.paths.as_deref())),
        ],
        Node::Strategy(strategy) => vec![
            ("matrix", Field::Matrix(&strategy.matrix)),
            ("fail-fast", Field::Bool(strategy.fail_fast)),
            ("max-parallel", Field::Number(strategy.max_parallel)),
        ],
    }
}

fn lower(field: Field<'_>, options: SerializeOptions) -> Option<Value> {
    match field {
        Field::Text(text) => text
            .filter(|t| !t.is_empty())
            .map(|t| Value::String(t.to_string())),
        Field::Bool(flag) => flag.map(Value::Bool),
        Field::Number(number) => number.map(|n| Value::Number(u64::from(n).into())),
        Field::List(items) => items.filter(|i| !i.is_empty()).map(strings),
        Field::Map(map) => map.filter(|m| !m.is_empty()).map(|m| {
            Value::Mapping(
                m.iter()
                    .map(|(k, v)| (Value::String(k.clone()), Value::String(v.clone())))
                    .collect(),
            )
        }),
        Field::Matrix(matrix) => non_empty(
            matrix
                .iter()
                .filter(|(_, values)| !values.is_empty())
                .map(|(axis, values)| (Value::String(axis.clone()), strings(values)))
                .collect(),
        ),
        Field::Node(node) => node.map(|n| visit(n, options)).filter(|v| !is_empty(v)),
        Field::Nodes(nodes) => {
            let items: Vec<Value> = nodes
                .into_iter()
                .map(|n| visit(n, options))
                .filter(|v| !is_empty(v))
                .collect();
            (!items.is_empty()).then(|| Value::Sequence(items))
        }
        Field::Keyed(entries) => non_empty(
            entries
                .into_iter()
                .map(|(key, node)| (Value::String(key.to_string()), visit(node, options)))
                .collect(),
        ),
    }
}

fn strings(items: &[String]) -> Value {
    Value::Sequence(items.iter().cloned().map(Value::String).collect())
}

fn non_empty(mapping: Mapping) -> Option<Value> {
    (!mapping.is_empty()).then(|| Value::Mapping(mapping))
}

fn is_empty(value: &Value) -> bool {
    match value {
        Value::Mapping(m) => m.is_empty(),
        Value::Sequence(s) => s.is_empty(),
        Value::Null => true,
        _ => false,
    }
}
