use anyhow::{Context as AnyhowContext, Result};
use clap::{Args, Parser, Subcommand};
use docline_archetype::{ArchetypeSearch, TokenSequence};
use serde::Serialize;
use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;

mod config;
mod jobs;
mod pipeline;

pub use config::DoclineConfig;
pub use jobs::resolve_jobs;
pub use pipeline::{run_report, ReportSummary};

#[derive(Parser)]
#[command(name = "docline")]
#[command(about = "Find duplicated documentation comments and their common archetype", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Quiet mode: log only warnings/errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// TOML configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the HTML report for a comment similarity graph
    Report(ReportArgs),

    /// Extract the archetype of one cluster given as a JSON array of strings
    Archetype(ArchetypeArgs),
}

#[derive(Args)]
struct ReportArgs {
    /// Graph JSON with a top-level "digraph" array
    #[arg(short = 'i', long = "input-json")]
    input_json: PathBuf,

    /// Directory for the generated pages
    #[arg(short = 'o', long = "output-dir")]
    output_dir: Option<PathBuf>,

    /// Encoding of the input file
    #[arg(short = 'e', long = "input-enc")]
    input_enc: Option<String>,

    /// Number of leading volatile positions tried per fold order
    #[arg(long)]
    cover: Option<usize>,

    /// Upper bound on fold orders examined per cluster [default: 2048]
    #[arg(long)]
    max_orders: Option<usize>,

    /// Worker threads (defaults to DOCLINE_JOBS or the CPU count)
    #[arg(long)]
    jobs: Option<usize>,
}

#[derive(Args)]
struct ArchetypeArgs {
    /// Number of leading volatile positions tried per fold order
    #[arg(long)]
    cover: Option<usize>,

    /// Upper bound on fold orders examined [default: 2048]
    #[arg(long)]
    max_orders: Option<usize>,

    /// JSON file with an array of strings (stdin when omitted)
    file: Option<PathBuf>,
}

#[derive(Serialize)]
struct ArchetypeOutput {
    archetype: TokenSequence,
    text: String,
    score: usize,
    members: usize,
    distinct_members: usize,
    orders_tried: usize,
    truncated: bool,
}

pub fn main_entry() -> Result<()> {
    let cli = Cli::parse();

    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    if cli.quiet {
        builder.filter_level(log::LevelFilter::Warn);
    } else if cli.verbose {
        builder.filter_level(log::LevelFilter::Debug);
    }
    builder.target(env_logger::Target::Stderr).init();

    let mut config = DoclineConfig::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Report(args) => run_report_command(args, &mut config, cli.quiet)?,
        Commands::Archetype(args) => run_archetype_command(args, &mut config)?,
    }
    Ok(())
}

fn run_report_command(args: ReportArgs, config: &mut DoclineConfig, quiet: bool) -> Result<()> {
    if let Some(dir) = args.output_dir {
        config.report.output_dir = dir;
    }
    if let Some(encoding) = args.input_enc {
        config.graph.input_encoding = encoding;
    }
    apply_search_overrides(config, args.cover, args.max_orders);
    config.validate()?;

    let jobs = resolve_jobs(args.jobs, config.jobs);
    let summary = run_report(&args.input_json, config, jobs, !quiet)?;
    log::info!(
        "Wrote {} component pages for {} records to {}",
        summary.components,
        summary.records,
        summary.output_dir.display()
    );
    Ok(())
}

fn run_archetype_command(args: ArchetypeArgs, config: &mut DoclineConfig) -> Result<()> {
    apply_search_overrides(config, args.cover, args.max_orders);

    let raw = match &args.file {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("Cannot read {}", path.display()))?,
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("Cannot read stdin")?;
            buf
        }
    };
    let texts: Vec<String> =
        serde_json::from_str(&raw).context("Expected a JSON array of strings")?;

    let search = ArchetypeSearch::new(&config.archetype)?;
    let outcome = search.extract_from_texts(&texts);
    let output = ArchetypeOutput {
        text: outcome.archetype.joined(),
        archetype: outcome.archetype,
        score: outcome.score,
        members: outcome.members,
        distinct_members: outcome.distinct_members,
        orders_tried: outcome.orders_tried,
        truncated: outcome.truncated,
    };
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn apply_search_overrides(
    config: &mut DoclineConfig,
    cover: Option<usize>,
    max_orders: Option<usize>,
) {
    if let Some(cover) = cover {
        config.archetype.cover = cover;
    }
    if max_orders.is_some() {
        config.archetype.max_orders = max_orders;
    }
}
