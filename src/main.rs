use std::path::PathBuf;

use clap::{Parser, Subcommand};
use frete_tools::mapping::FieldMapping;
use frete_tools::{Result, ToolError, pipeline, report};
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = Cli::parse();
    if let Err(error) = init_tracing(cli.verbose).and_then(|()| run(cli)) {
        eprintln!("error: {error}");
        std::process::exit(1);
    }
}

fn init_tracing(verbose: bool) -> Result<()> {
    let default_level = if verbose { "info" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|error| ToolError::Logging(error.to_string()))
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Consolidate(args) => execute_consolidate(args),
    }
}

fn execute_consolidate(args: ConsolidateArgs) -> Result<()> {
    for input in [&args.esl, &args.sig] {
        if !input.exists() {
            return Err(ToolError::MissingInput(input.clone()));
        }
    }

    let mapping = match &args.mapping {
        Some(path) => FieldMapping::load(path)?,
        None => FieldMapping::builtin(),
    };

    let outcome = pipeline::consolidate_files(&args.esl, &args.sig, &args.output, &mapping)?;
    let summary = outcome.summary();

    print!("{}", report::render(&summary, &outcome.consolidated));
    println!("report written to {}", args.output.display());

    if let Some(path) = &args.summary {
        summary.write_json(path)?;
    }
    Ok(())
}

#[derive(Parser)]
#[command(
    author,
    version,
    about = "Consolidate ESL Desktop and SIG freight spreadsheets into one billing report."
)]
struct Cli {
    /// Log progress at info level (overridden by RUST_LOG).
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Merge the two exports into the consolidated report.
    Consolidate(ConsolidateArgs),
}

#[derive(clap::Args)]
struct ConsolidateArgs {
    /// First spreadsheet: the ESL Desktop export.
    #[arg(long)]
    esl: PathBuf,

    /// Second spreadsheet: the SIG model.
    #[arg(long)]
    sig: PathBuf,

    /// Output file path (`.xlsx` or `.csv`).
    #[arg(long, default_value = "planilha_final_consolidada.xlsx")]
    output: PathBuf,

    /// JSON array of `[source, destination]` pairs replacing the built-in mapping.
    #[arg(long)]
    mapping: Option<PathBuf>,

    /// Also write the run summary as JSON to this path.
    #[arg(long)]
    summary: Option<PathBuf>,
}
