use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand, ValueEnum};
use scoresafe::{
    Catalog, ExecutionPlan, PolicyEngine, Preset, SafetyProfile, ScoresafeError, load_catalog,
    load_profile, render_svgo_config,
};
use tracing_subscriber::{EnvFilter, fmt};

#[derive(Parser)]
#[command(name = "scoresafe")]
#[command(about = "Plan score-safe SVG optimizer passes", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Build an execution plan from requested passes
    Plan {
        #[command(flatten)]
        policy: PolicyArgs,

        /// Passes to request (default: the preset's list, or the catalog defaults with --profile)
        units: Vec<String>,

        /// Output format
        #[arg(short, long, value_enum, default_value = "list")]
        format: Format,

        /// Output file (use - for stdout)
        #[arg(short, long, default_value = "-")]
        output: PathBuf,
    },

    /// Warn about forbidden tags that no pass carries
    CheckProfile {
        #[command(flatten)]
        policy: PolicyArgs,
    },

    /// List the passes in the catalog
    Catalog {
        /// Catalog file (.json or .toml; default: built-in svgo catalog)
        #[arg(long)]
        catalog: Option<PathBuf>,
    },
}

#[derive(Args)]
struct PolicyArgs {
    /// Built-in preset (lilypond, permissive)
    #[arg(long, default_value = "lilypond", conflicts_with = "profile")]
    preset: String,

    /// Safety profile file (.json or .toml)
    #[arg(long)]
    profile: Option<PathBuf>,

    /// Catalog file (.json or .toml; default: built-in svgo catalog)
    #[arg(long)]
    catalog: Option<PathBuf>,
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    /// One pass name per line
    List,
    /// JSON array of pass names
    Json,
    /// svgo.config.js module
    Svgo,
}

/// Exit status when the requested passes are rejected.
const EXIT_REJECTED: u8 = 2;

fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Plan {
            policy,
            units,
            format,
            output,
        } => {
            let (engine, requested) = resolve(&policy)?;
            let plan = match requested {
                _ if !units.is_empty() => engine.build_plan(&units),
                Some(requested) => engine.build_plan(&requested),
                None => {
                    let defaults = engine.default_plan();
                    for excluded in &defaults.excluded {
                        tracing::info!(
                            profile = %engine.profile().name,
                            "skipping default: {excluded}"
                        );
                    }
                    Ok(defaults.plan)
                }
            };

            let plan = match plan {
                Ok(plan) => plan,
                Err(report) => {
                    eprintln!("{report}");
                    return Ok(ExitCode::from(EXIT_REJECTED));
                }
            };
            tracing::debug!(passes = plan.len(), "plan built");

            let rendered = render(&plan, &engine, format)?;
            if output.as_os_str() == "-" {
                io::stdout().write_all(rendered.as_bytes())?;
            } else {
                fs::write(&output, &rendered)?;
            }
        }
        Command::CheckProfile { policy } => {
            let (engine, _) = resolve(&policy)?;
            let warnings = engine.validate_profile();
            for warning in &warnings {
                tracing::warn!(profile = %engine.profile().name, "{warning}");
                println!("warning: {warning}");
            }
            if warnings.is_empty() {
                println!("profile `{}` ok", engine.profile().name);
            }
        }
        Command::Catalog { catalog } => {
            let catalog = match catalog {
                Some(path) => load_catalog(path)?,
                None => Catalog::svgo(),
            };
            let mut stdout = io::stdout().lock();
            for unit in &catalog {
                let tags: Vec<_> = unit.risk_tags.iter().map(String::as_str).collect();
                writeln!(
                    stdout,
                    "{}{}\t[{}]\t{}",
                    unit.name,
                    if unit.default_enabled { "*" } else { "" },
                    tags.join(", "),
                    unit.summary.as_deref().unwrap_or("")
                )?;
            }
        }
    }

    Ok(ExitCode::SUCCESS)
}

/// Build the engine, plus the preset's requested list when a preset is in use.
fn resolve(args: &PolicyArgs) -> Result<(PolicyEngine, Option<Vec<String>>), ScoresafeError> {
    let catalog = match &args.catalog {
        Some(path) => load_catalog(path)?,
        None => Catalog::svgo(),
    };

    let (profile, requested): (SafetyProfile, _) = match &args.profile {
        Some(path) => (load_profile(path)?, None),
        None => {
            let preset = Preset::by_name(&args.preset, &catalog)?;
            (preset.profile, Some(preset.requested))
        }
    };

    Ok((PolicyEngine::new(catalog, profile), requested))
}

fn render(
    plan: &ExecutionPlan,
    engine: &PolicyEngine,
    format: Format,
) -> Result<String, ScoresafeError> {
    Ok(match format {
        Format::List => plan.iter().map(|name| format!("{name}\n")).collect(),
        Format::Json => {
            let mut out = serde_json::to_string_pretty(plan)?;
            out.push('\n');
            out
        }
        Format::Svgo => {
            let mut out = render_svgo_config(plan, engine.catalog(), engine.profile())?;
            out.push('\n');
            out
        }
    })
}
