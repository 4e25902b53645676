use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{anyhow, Result};
use clap::{Parser, Subcommand};
use stackmate_analyzer::{GeminiClient, DEFAULT_MODEL};
use stackmate_core::{Catalog, Role};

mod core_flows;
mod render;

use core_flows::{generate_manifest, parse_pins, template_overrides};

#[derive(Parser, Debug)]
#[command(name = "stackmate")]
#[command(about = "AI-assisted web stack recommendation and manifest generation", long_about = None)]
struct Cli {
    /// Replace the built-in component catalog with an external TOML file.
    #[arg(long)]
    catalog: Option<PathBuf>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Resolve a stack for a new project and print its manifest.
    New {
        name: String,
        /// Describe the project requirements in natural language.
        #[arg(long, conflicts_with = "stack")]
        describe: Option<String>,
        /// Use a named stack template instead of requirement analysis.
        #[arg(long)]
        stack: Option<String>,
        /// Pin a single role, e.g. --pin database=postgresql. Repeatable.
        #[arg(long = "pin")]
        pin: Vec<String>,
        #[arg(long, default_value_t = 30)]
        timeout_secs: u64,
        #[arg(long, default_value = DEFAULT_MODEL)]
        model: String,
        /// Skip the model call and resolve the default stack.
        #[arg(long)]
        offline: bool,
        /// Print the manifest as JSON instead of summary lines.
        #[arg(long)]
        json: bool,
    },
    /// List the named stack templates.
    Stacks,
    /// List catalog entries, optionally filtered by role.
    Catalog {
        #[arg(long)]
        role: Option<String>,
    },
    /// Report credential, model, and catalog health.
    Doctor,
}

fn main() -> Result<()> {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::New {
            name,
            describe,
            stack,
            pin,
            timeout_secs,
            model,
            offline,
            json,
        } => {
            let catalog = load_catalog(cli.catalog.as_deref())?;

            let mut overrides = match stack.as_deref() {
                Some(template) => template_overrides(template).ok_or_else(|| {
                    anyhow!("unknown stack template '{template}'; run `stackmate stacks`")
                })?,
                None => Default::default(),
            };
            for (role, id) in parse_pins(&pin)? {
                overrides.insert(role, id);
            }

            let client = GeminiClient::from_env(model)?;
            let description = if offline { None } else { describe.as_deref() };

            let spinner = description.and_then(|_| render::analysis_spinner());
            let generated = generate_manifest(
                &catalog,
                &client,
                description,
                &overrides,
                Duration::from_secs(timeout_secs),
            );
            if let Some(spinner) = spinner {
                spinner.finish_and_clear();
            }
            let generated = generated?;

            for warning in &generated.warnings {
                eprintln!("{}", render::warning_line(warning));
            }
            if json {
                println!("{}", serde_json::to_string_pretty(&generated.manifest)?);
            } else {
                println!("{}", render::status_line("plan", &format!("project: {name}")));
                for line in render::format_manifest_lines(&generated.manifest) {
                    println!("{line}");
                }
            }
        }
        Commands::Stacks => {
            for line in core_flows::format_template_lines() {
                println!("{line}");
            }
        }
        Commands::Catalog { role } => {
            let catalog = load_catalog(cli.catalog.as_deref())?;
            let role = match role {
                Some(raw) => {
                    Some(Role::parse(&raw).ok_or_else(|| anyhow!("unknown role '{raw}'"))?)
                }
                None => None,
            };
            for line in render::format_catalog_lines(&catalog, role) {
                println!("{line}");
            }
        }
        Commands::Doctor => {
            let catalog = load_catalog(cli.catalog.as_deref())?;
            let credential = if GeminiClient::credential_configured() {
                "configured"
            } else {
                "missing (offline fallback only)"
            };
            println!("{}", render::status_line("step", &format!("credential: {credential}")));
            println!("{}", render::status_line("step", &format!("model: {DEFAULT_MODEL}")));
            println!(
                "{}",
                render::status_line(
                    "step",
                    &format!("catalog: ok ({} entries)", catalog.entries().len())
                )
            );
        }
    }

    Ok(())
}

fn load_catalog(path: Option<&Path>) -> Result<Catalog> {
    match path {
        Some(path) => stackmate_catalog::load_path(path),
        None => stackmate_catalog::builtin(),
    }
}
