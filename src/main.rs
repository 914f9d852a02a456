use anyhow::{bail, Context, Result};
use std::fs;
use std::path::Path;
use tracing::{debug, error};
use tracing_subscriber::{EnvFilter, FmtSubscriber};
use workflow_dsl::cli::discover::collect_documents;
use workflow_dsl::cli::commands::{PluginsCommand, RenderCommand, ValidateCommand};
use workflow_dsl::cli::output::*;
use workflow_dsl::cli::{Cli, Command};
use workflow_dsl::{
    language_plugin, serialize_with, to_yaml, Api, FsScriptSource, SerializeOptions, Workflow,
    WorkflowDocument,
};

fn main() -> Result<()> {
    let cli = Cli::from_args();

    // Initialize logging; stdout is reserved for rendered workflows
    let default_level = if cli.verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("Failed to set logging subscriber")?;

    match &cli.command {
        Command::Render(cmd) => render(cmd)?,
        Command::Validate(cmd) => validate(cmd)?,
        Command::Plugins(cmd) => list_plugins(cmd)?,
    }

    Ok(())
}

/// A session with the bundled plugins loaded
fn session() -> Api {
    let mut api = Api::new();
    api.load_plugins(vec![language_plugin()]);
    api
}

/// Load a document and evaluate it, resolving script files next to it
fn build_workflow(api: &Api, path: &Path) -> Result<Workflow> {
    let document = WorkflowDocument::from_file(path)
        .with_context(|| format!("Failed to load workflow document {}", path.display()))?;

    let base_dir = path.parent().unwrap_or_else(|| Path::new("."));
    let scripts = FsScriptSource::with_base_dir(base_dir);

    let workflow = document
        .evaluate(api, &scripts)
        .with_context(|| format!("Failed to evaluate {}", path.display()))?;
    workflow
        .check_needs()
        .with_context(|| format!("Invalid job dependencies in {}", path.display()))?;
    Ok(workflow)
}

fn render(cmd: &RenderCommand) -> Result<()> {
    let api = session();
    let options = cmd.serialize_options();

    match (&cmd.file, &cmd.dir, &cmd.out_dir) {
        (Some(file), _, _) => render_file(&api, Path::new(file), cmd.output.as_deref(), options),
        (None, Some(dir), Some(out_dir)) => {
            render_dir(&api, Path::new(dir), Path::new(out_dir), options)
        }
        _ => bail!("Either --file or --dir with --out-dir is required"),
    }
}

fn render_file(
    api: &Api,
    path: &Path,
    output: Option<&str>,
    options: SerializeOptions,
) -> Result<()> {
    let workflow = build_workflow(api, path)?;
    let yaml = to_yaml(&workflow, options)?;

    match output {
        Some(out) => {
            write_output(Path::new(out), &yaml)?;
            eprintln!("{} Wrote {}", CHECK, style(out).bold());
        }
        None => print!("{}", yaml),
    }
    Ok(())
}

fn render_dir(api: &Api, dir: &Path, out_dir: &Path, options: SerializeOptions) -> Result<()> {
    let documents = collect_documents(dir, out_dir)
        .with_context(|| format!("Failed to read directory {}", dir.display()))?;

    if documents.is_empty() {
        eprintln!("{} No workflow documents found in {}", INFO, dir.display());
        return Ok(());
    }

    let progress = create_progress_bar(documents.len());
    let mut failures = 0usize;

    for path in &documents {
        let relative = path.strip_prefix(dir).unwrap_or(path);
        progress.set_message(relative.display().to_string());

        let rendered = build_workflow(api, path).and_then(|workflow| {
            let yaml = to_yaml(&workflow, options)?;
            write_output(&out_dir.join(relative), &yaml)
        });

        if let Err(e) = rendered {
            failures += 1;
            error!("{:#}", e);
            progress.println(format!("{} {}", CROSS, style(relative.display()).red()));
        } else {
            debug!(document = %relative.display(), "Rendered");
        }
        progress.inc(1);
    }

    progress.finish_and_clear();

    if failures > 0 {
        bail!("{} of {} workflow documents failed to render", failures, documents.len());
    }
    eprintln!(
        "{} Rendered {} workflows into {}",
        CHECK,
        style(documents.len()).cyan(),
        style(out_dir.display()).bold()
    );
    Ok(())
}

fn write_output(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory {}", parent.display()))?;
    }
    fs::write(path, content).with_context(|| format!("Failed to write {}", path.display()))
}

fn validate(cmd: &ValidateCommand) -> Result<()> {
    println!("{} Validating workflow document...", INFO);

    let api = session();
    match build_workflow(&api, Path::new(&cmd.file)) {
        Ok(workflow) => {
            println!("{} Workflow document is valid!", CHECK);
            println!("{}", format_workflow_summary(&workflow));
            if !workflow.jobs.is_empty() {
                println!("{}", format_jobs(&workflow));
            }

            if cmd.json {
                let value = serialize_with(&workflow, SerializeOptions::actions());
                println!("\n{}", serde_json::to_string_pretty(&value)?);
            }
            Ok(())
        }
        Err(e) => {
            println!("{} Validation failed:", CROSS);
            println!("  {}", style(format!("{:#}", e)).red());
            std::process::exit(1);
        }
    }
}

fn list_plugins(cmd: &PluginsCommand) -> Result<()> {
    let api = session();
    let plugins = api.registry().loaded_plugins();

    if cmd.json {
        let data: Vec<_> = plugins
            .values()
            .map(|plugin| {
                serde_json::json!({
                    "name": plugin.name,
                    "version": plugin.version,
                    "description": plugin.description,
                    "step_builders": plugin.step_methods.values().collect::<Vec<_>>(),
                })
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&serde_json::json!({ "plugins": data }))?);
        return Ok(());
    }

    if plugins.is_empty() {
        println!("{} No plugins loaded", WARN);
        return Ok(());
    }

    for plugin in plugins.values() {
        println!("{}", format_plugin(plugin));
        for info in plugin.step_methods.values() {
            println!("{}", format_method(info));
        }
    }
    Ok(())
}
