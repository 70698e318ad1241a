use std::io::{self, Write};
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use spec_builtins_core::{ExtractionConfig, SmoothNumbers, reinterpret_builtins};
use spec_builtins_extract::output::{OutputFormat, format_builtins, format_report};
use spec_builtins_extract::{BuiltinExtractor, DEFAULT_INPUT, ExtractionRun};
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "spec-builtins")]
#[command(version, about = "Generate builtin function tables from specification documents")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Extract builtin functions and their arity ranges from the specification.
    Builtins(BuiltinsArgs),
    /// List products of small prime powers within a range.
    Powers(PowersArgs),
    /// List the as_<type><width> reinterpret builtins.
    Reinterpret(ReinterpretArgs),
    /// Print the built-in extraction configuration as YAML.
    DefaultConfig,
}

#[derive(Debug, Args)]
struct BuiltinsArgs {
    /// Specification HTML file, or `-` for stdin.
    #[arg(long, default_value = DEFAULT_INPUT)]
    input: PathBuf,
    /// YAML file overriding the table allow-list, override set or operators.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Macro)]
    format: OutputFormat,
    /// Write the extraction report as JSON to stderr.
    #[arg(long)]
    report: bool,
}

#[derive(Debug, Args)]
struct PowersArgs {
    /// Only list even numbers.
    #[arg(short = 'e')]
    even: bool,
    /// Number of leading primes from 2, 3, 5, 7, 11, 13 to use.
    #[arg(short = 'p', default_value_t = 6, value_parser = clap::value_parser!(u8).range(1..=6))]
    primes: u8,
    /// Smallest number to list.
    #[arg(default_value_t = 2)]
    min: u64,
    /// Largest number to list.
    #[arg(default_value_t = 512)]
    max: u64,
}

#[derive(Debug, Args)]
struct ReinterpretArgs {
    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Macro)]
    format: OutputFormat,
}

fn main() {
    init_tracing();
    let cli = Cli::parse();

    let result = match cli.command {
        Command::Builtins(args) => run_builtins(args),
        Command::Powers(args) => run_powers(args),
        Command::Reinterpret(args) => run_reinterpret(args),
        Command::DefaultConfig => run_default_config(),
    };

    if let Err(err) = result {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

/// Logs go to stderr so generated code on stdout stays clean.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn run_builtins(args: BuiltinsArgs) -> Result<(), String> {
    let config = match &args.config {
        Some(path) => ExtractionConfig::load(path)
            .map_err(|err| format!("Failed to load config '{}': {err}", path.display()))?,
        None => ExtractionConfig::default(),
    };
    debug!(
        tables = config.tables.len(),
        overrides = config.skip_second_variant.len(),
        "Loaded extraction config"
    );
    let extractor = BuiltinExtractor::new(config);

    let run: ExtractionRun = if args.input.as_os_str() == "-" {
        extractor
            .extract_reader(io::stdin().lock())
            .map_err(|err| format!("Failed to read stdin: {err}"))?
    } else {
        extractor
            .extract_file(&args.input)
            .map_err(|err| format!("Failed to read '{}': {err}", args.input.display()))?
    };

    if args.report {
        let report = format_report(&run.report)
            .map_err(|err| format!("Failed to serialize report: {err}"))?;
        eprintln!("{report}");
    }

    let out = format_builtins(&run.table, args.format)
        .map_err(|err| format!("Failed to format output: {err}"))?;
    write_stdout(&out)
}

fn run_powers(args: PowersArgs) -> Result<(), String> {
    let numbers = SmoothNumbers::new(args.min, args.max)
        .with_primes(usize::from(args.primes))
        .even_only(args.even)
        .generate()
        .map_err(|err| err.to_string())?;

    let line = numbers
        .iter()
        .map(u64::to_string)
        .collect::<Vec<_>>()
        .join(" ");
    write_stdout(&format!("{line}\n"))
}

fn run_reinterpret(args: ReinterpretArgs) -> Result<(), String> {
    let out = format_builtins(&reinterpret_builtins(), args.format)
        .map_err(|err| format!("Failed to format output: {err}"))?;
    write_stdout(&out)
}

fn run_default_config() -> Result<(), String> {
    let yaml = ExtractionConfig::default()
        .to_yaml()
        .map_err(|err| format!("Failed to serialize config: {err}"))?;
    write_stdout(&yaml)
}

fn write_stdout(text: &str) -> Result<(), String> {
    let mut stdout = io::stdout().lock();
    stdout
        .write_all(text.as_bytes())
        .and_then(|()| stdout.flush())
        .map_err(|err| format!("Failed to write output: {err}"))
}
