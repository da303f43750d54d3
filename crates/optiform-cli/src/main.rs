mod logging;
mod report;

use clap::{Parser, Subcommand, ValueEnum};
use optiform_core::{ModelSpec, TranslateConfig, Translation, Translator};
use optiform_expr::{CoefficientResolution, ExtractOptions, LinearExprError, LinearExpression};
use optiform_solver::{SolverBackend, SolverConfig, SolverResponse};
use serde::Serialize;
use std::fs::{File, create_dir_all};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::report::{Report, render_report_table, render_request_table};

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Turn symbolic linear expressions into solver-ready coefficients"
)]
struct Cli {
    /// Log filter (for example `debug` or `optiform_core=debug`); overrides OPTIFORM_TRACE
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Extract the coefficient of one variable from an expression
    Coefficient(CoefficientArgs),
    /// Translate a model description into a solver request
    Translate(TranslateArgs),
    /// Map a solver response back onto a model's names
    Report(ReportArgs),
}

#[derive(Parser, Debug)]
struct CoefficientArgs {
    /// Linear expression, for example "10*x1 + 8*x2"
    #[arg(long, short = 'e')]
    expression: String,

    /// Variable to look up
    #[arg(long, short = 'v')]
    variable: String,

    /// Parameter value for a symbolic multiplier, as name=value
    #[arg(long = "param", value_parser = parse_param)]
    params: Vec<(String, f64)>,

    #[command(flatten)]
    extract: ExtractArgs,

    /// Fail on malformed terms and unresolved symbols
    #[arg(long)]
    strict: bool,

    /// Output format for stdout
    #[arg(long, value_enum, default_value = "plain")]
    format: CoefficientFormat,
}

#[derive(Parser, Debug)]
struct ExtractArgs {
    /// Value assumed for symbolic multipliers without a parameter
    #[arg(long)]
    symbolic_default: Option<f64>,

    /// Sum every term of a variable instead of keeping the first
    #[arg(long)]
    combine_duplicates: bool,
}

#[derive(Parser, Debug)]
struct TranslateArgs {
    /// Model description (JSON)
    #[arg(long)]
    input: PathBuf,

    /// Output format
    #[arg(long, value_enum, default_value = "lp")]
    format: TranslateFormat,

    /// Write output to this path instead of stdout
    #[arg(long)]
    output: Option<PathBuf>,

    /// Treat diagnostics as errors
    #[arg(long)]
    strict: bool,

    /// Reject variables that are used but not declared
    #[arg(long)]
    no_declare: bool,

    #[command(flatten)]
    extract: ExtractArgs,

    #[command(flatten)]
    solver: SolverArgs,
}

#[derive(Parser, Debug)]
struct SolverArgs {
    /// Solver backend recorded in the request (ortools, pulp, cvxpy)
    #[arg(long, value_parser = parse_backend)]
    backend: Option<SolverBackend>,

    /// Time limit in seconds
    #[arg(long)]
    time_limit: Option<f64>,

    /// Relative MIP gap
    #[arg(long)]
    mip_gap: Option<f64>,

    /// Solver threads
    #[arg(long)]
    threads: Option<u32>,
}

#[derive(Parser, Debug)]
struct ReportArgs {
    /// Model description (JSON) the response belongs to
    #[arg(long)]
    input: PathBuf,

    /// Solver response (JSON)
    #[arg(long)]
    response: PathBuf,

    /// Output format for stdout
    #[arg(long, value_enum, default_value = "table")]
    format: ReportFormat,
}

#[derive(Debug, Clone, Copy, Eq, PartialEq, ValueEnum)]
enum CoefficientFormat {
    Plain,
    Json,
}

#[derive(Debug, Clone, Copy, Eq, PartialEq, ValueEnum)]
enum TranslateFormat {
    Lp,
    Json,
    Table,
}

#[derive(Debug, Clone, Copy, Eq, PartialEq, ValueEnum)]
enum ReportFormat {
    Table,
    Json,
}

#[derive(Debug, Serialize)]
struct CoefficientOutput<'a> {
    expression: &'a str,
    variable: &'a str,
    coefficient: f64,
    resolved: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    unresolved_symbols: Vec<&'a str>,
    #[serde(skip_serializing_if = "nothing_skipped")]
    skipped: &'a [String],
}

fn nothing_skipped(skipped: &&[String]) -> bool {
    skipped.is_empty()
}

fn main() {
    if let Err(err) = run() {
        eprintln!("{err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    logging::init(cli.log_level.as_deref())?;
    match cli.command {
        Command::Coefficient(args) => coefficient_command(args),
        Command::Translate(args) => translate_command(args),
        Command::Report(args) => report_command(args),
    }
}

fn coefficient_command(args: CoefficientArgs) -> Result<(), Box<dyn std::error::Error>> {
    let options = args.extract.options(args.params);
    let parsed = if args.strict {
        LinearExpression::parse_strict(&args.expression)?
    } else {
        LinearExpression::parse(&args.expression)
    };
    let resolution = parsed.coefficient(&args.variable, &options);
    if args.strict {
        ensure_resolved(&args.variable, &resolution)?;
    }

    let output = CoefficientOutput {
        expression: &args.expression,
        variable: &args.variable,
        coefficient: resolution.value(options.symbolic_fallback()),
        resolved: resolution.is_resolved(),
        unresolved_symbols: resolution.unresolved_symbols(),
        skipped: parsed.skipped(),
    };
    match args.format {
        CoefficientFormat::Plain => println!("{}", output.coefficient),
        CoefficientFormat::Json => println!("{}", serde_json::to_string_pretty(&output)?),
    }
    Ok(())
}

fn ensure_resolved(
    variable: &str,
    resolution: &CoefficientResolution,
) -> Result<(), LinearExprError> {
    if resolution.is_resolved() {
        return Ok(());
    }
    Err(LinearExprError::UnresolvedCoefficient {
        variable: variable.to_string(),
        symbols: resolution
            .unresolved_symbols()
            .into_iter()
            .map(str::to_string)
            .collect(),
    })
}

fn translate_command(args: TranslateArgs) -> Result<(), Box<dyn std::error::Error>> {
    let spec = load_spec(&args.input)?;
    let config = args.extract.translate_config(args.strict, args.no_declare);
    let rendered = render_translation(&spec, config, &args.solver.config(), args.format)?;

    match args.output {
        Some(path) => write_output(&path, &rendered)?,
        None => print!("{rendered}"),
    }
    Ok(())
}

fn render_translation(
    spec: &ModelSpec,
    config: TranslateConfig,
    solver_config: &SolverConfig,
    format: TranslateFormat,
) -> Result<String, Box<dyn std::error::Error>> {
    let translation = translate(spec, config)?;
    let rendered = match format {
        TranslateFormat::Lp => translation.model.to_lp_string(),
        TranslateFormat::Json => {
            let request = translation.model.to_request(solver_config)?;
            format!("{}\n", serde_json::to_string_pretty(&request)?)
        }
        TranslateFormat::Table => {
            let request = translation.model.to_request(solver_config)?;
            render_request_table(&request)
        }
    };
    Ok(rendered)
}

fn report_command(args: ReportArgs) -> Result<(), Box<dyn std::error::Error>> {
    let report = build_report(&args.input, &args.response)?;
    match args.format {
        ReportFormat::Table => print!("{}", render_report_table(&report)),
        ReportFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
    }
    Ok(())
}

/// Check a stored solver response against the model it answers.
fn build_report(model: &Path, response: &Path) -> Result<Report, Box<dyn std::error::Error>> {
    let spec = load_spec(model)?;
    let translation = translate(&spec, TranslateConfig::new())?;
    let request = translation.model.to_request(&SolverConfig::new())?;

    let response = SolverResponse::from_json(&std::fs::read_to_string(response)?)?;
    response.check_against(&request)?;
    let solution = translation.model.solution_from_response(response)?;
    Ok(Report::new(&solution))
}

/// Translate, echoing diagnostics to stderr.
fn translate(
    spec: &ModelSpec,
    config: TranslateConfig,
) -> Result<Translation, Box<dyn std::error::Error>> {
    let translation = Translator::new(config).translate(spec)?;
    for diagnostic in &translation.diagnostics {
        eprintln!("warning: {diagnostic}");
    }
    Ok(translation)
}

impl ExtractArgs {
    fn options(&self, params: Vec<(String, f64)>) -> ExtractOptions {
        let mut options = ExtractOptions::new().with_combine_duplicates(self.combine_duplicates);
        if let Some(value) = self.symbolic_default {
            options = options.with_symbolic_default(value);
        }
        for (name, value) in params {
            options = options.with_parameter(name, value);
        }
        options
    }

    fn translate_config(&self, strict: bool, no_declare: bool) -> TranslateConfig {
        let mut config = TranslateConfig::new()
            .with_strict(strict)
            .with_declare_undeclared(!no_declare)
            .with_combine_duplicates(self.combine_duplicates);
        if let Some(value) = self.symbolic_default {
            config = config.with_symbolic_default(value);
        }
        config
    }
}

impl SolverArgs {
    fn config(&self) -> SolverConfig {
        SolverConfig {
            backend: self.backend,
            time_limit: self.time_limit,
            mip_gap: self.mip_gap,
            threads: self.threads,
            ..SolverConfig::default()
        }
    }
}

fn load_spec(path: &Path) -> Result<ModelSpec, Box<dyn std::error::Error>> {
    let text = std::fs::read_to_string(path)?;
    Ok(ModelSpec::from_json(&text)?)
}

fn write_output(path: &Path, rendered: &str) -> Result<(), Box<dyn std::error::Error>> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            create_dir_all(parent)?;
        }
    }
    let mut writer = BufWriter::new(File::create(path)?);
    writer.write_all(rendered.as_bytes())?;
    writer.flush()?;
    Ok(())
}

fn parse_param(raw: &str) -> Result<(String, f64), String> {
    let (name, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected name=value, got '{raw}'"))?;
    let name = name.trim();
    if name.is_empty() {
        return Err(format!("missing parameter name in '{raw}'"));
    }
    let value: f64 = value
        .trim()
        .parse()
        .map_err(|_| format!("'{}' is not a number", value.trim()))?;
    if !value.is_finite() {
        return Err(format!("parameter '{name}' must be finite"));
    }
    Ok((name.to_string(), value))
}

fn parse_backend(raw: &str) -> Result<SolverBackend, String> {
    raw.parse()
}

fn boxed_input_error(message: &str) -> Box<dyn std::error::Error> {
    Box::new(std::io::Error::new(
        std::io::ErrorKind::InvalidInput,
        message.to_string(),
    ))
}
