//! Command-line interface

use std::io::Write;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand, ValueEnum};
use color_eyre::eyre::{WrapErr, bail};
use serde::Serialize;
use vaxpolicy_core::analysis::{
    BreakEvenConfig, OneWayAnalysis, SweepParameter, TwoWayAnalysis, find_break_even,
};
use vaxpolicy_core::{ModelParameters, ParameterField, evaluate};

use crate::config::{ScenarioFile, apply_overrides, parse_override, parse_sweep};
use crate::report::{
    BreakEvenEntry, Report, render_break_even, render_comparison, render_one_way,
    render_parameters, render_report, render_two_way,
};

#[derive(Parser, Debug)]
#[command(name = "vaxpolicy")]
#[command(about = "Compare the utility of a vaccine mandate against voluntary vaccination")]
pub struct Args {
    /// Scenario file (YAML) with parameter values and report settings
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Override one parameter, e.g. --set freedom_value=2e8 (repeatable)
    #[arg(long = "set", value_name = "FIELD=VALUE", value_parser = parse_override, global = true)]
    pub overrides: Vec<(ParameterField, f64)>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text, global = true)]
    pub format: OutputFormat,

    /// Log level (debug, info, warn, error)
    #[arg(short, long, default_value = "warn", global = true)]
    pub log_level: String,

    /// Write logs to this file instead of stderr
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Baseline decision plus the standard sensitivity tables (default)
    Report,
    /// Evaluate both policies for a single parameter set
    Evaluate,
    /// Sweep one parameter, e.g. vaccine_efficacy=0.5:0.95:6 or freedom_value=1e8,2e8
    Sweep {
        #[arg(value_parser = parse_sweep)]
        sweep: SweepParameter,
    },
    /// Two-way table of recommendations over two parameters
    Grid {
        /// Parameter listed down the side
        #[arg(value_parser = parse_sweep)]
        rows: SweepParameter,
        /// Parameter listed across the top
        #[arg(value_parser = parse_sweep)]
        columns: SweepParameter,
    },
    /// Find the value at which the recommendation flips
    BreakEven {
        field: ParameterField,
        min: f64,
        max: f64,
        #[arg(long, default_value_t = 1e-6)]
        tolerance: f64,
        #[arg(long, default_value_t = 100)]
        max_iterations: usize,
    },
    /// Write the baseline scenario to a YAML file
    InitConfig {
        path: PathBuf,
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

fn emit<T: Serialize>(
    out: &mut impl Write,
    format: OutputFormat,
    value: &T,
    text: impl FnOnce() -> String,
) -> color_eyre::Result<()> {
    match format {
        OutputFormat::Text => write!(out, "{}", text())?,
        OutputFormat::Json => writeln!(out, "{}", serde_json::to_string_pretty(value)?)?,
    }
    Ok(())
}

/// Scenario from `--config` (or the baseline) with `--set` overrides applied
fn load_scenario(args: &Args) -> color_eyre::Result<(ScenarioFile, ModelParameters)> {
    let scenario = ScenarioFile::load_or_default(args.config.as_deref())?;
    let params = apply_overrides(scenario.parameters, &args.overrides)?;
    Ok((scenario, params))
}

fn init_config(path: &Path, force: bool, out: &mut impl Write) -> color_eyre::Result<()> {
    if path.exists() && !force {
        bail!(
            "{} already exists (use --force to overwrite)",
            path.display()
        );
    }
    let scenario = ScenarioFile {
        name: Some("baseline".to_string()),
        ..Default::default()
    };
    scenario.save(path)?;
    writeln!(out, "Wrote baseline scenario to {}", path.display())?;
    Ok(())
}

/// Execute a parsed command line, writing results to `out`
pub fn run(args: Args, out: &mut impl Write) -> color_eyre::Result<()> {
    let format = args.format;

    match args.command.clone().unwrap_or(Command::Report) {
        Command::Report => {
            let (scenario, params) = load_scenario(&args)?;
            let report = Report::build(scenario.name, &params, &scenario.report)?;
            emit(out, format, &report, || render_report(&report))?;
        }
        Command::Evaluate => {
            let (_, params) = load_scenario(&args)?;
            let result = evaluate(&params).wrap_err("Invalid model parameters")?;
            emit(out, format, &result, || {
                format!(
                    "Parameters:\n{}\n{}",
                    render_parameters(&params),
                    render_comparison(&result)
                )
            })?;
        }
        Command::Sweep { sweep } => {
            let (_, params) = load_scenario(&args)?;
            let analysis = OneWayAnalysis::run(&params, &sweep);
            emit(out, format, &analysis, || render_one_way(&analysis))?;
        }
        Command::Grid { rows, columns } => {
            let (_, params) = load_scenario(&args)?;
            let analysis = TwoWayAnalysis::run(&params, &rows, &columns);
            emit(out, format, &analysis, || render_two_way(&analysis))?;
        }
        Command::BreakEven {
            field,
            min,
            max,
            tolerance,
            max_iterations,
        } => {
            let (_, params) = load_scenario(&args)?;
            let config = BreakEvenConfig {
                tolerance,
                max_iterations,
            };
            let found = find_break_even(&params, field, min, max, &config)?;
            let entry = BreakEvenEntry {
                field,
                min,
                max,
                result: Ok(found),
            };
            emit(out, format, &entry, || render_break_even(&entry))?;
        }
        Command::InitConfig { path, force } => init_config(&path, force, out)?,
    }

    Ok(())
}
