use grade_statistics::fileio::read_samples;
use grade_statistics::graph::{render_box_plots, GraphConfig};
use grade_statistics::{assemble, partition, Report, Whitelist};

use anyhow::Context;
use clap::Parser;
use rand::SeedableRng;
use rand_pcg::Pcg64;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use std::path::PathBuf;

/// Prints a five-number summary of each course's grades and draws one box
/// plot per course.
#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {
    /// The CSV file containing grades to be plotted
    #[arg(long)]
    input_filename: PathBuf,
    /// The output file the box plot image is written to
    #[arg(long)]
    output_filename: PathBuf,
    /// A course code that may be displayed; repeat for more. All course codes
    /// are displayed if omitted
    #[arg(long = "course-code-whitelist", value_name = "CODE", conflicts_with = "redact_all")]
    course_code_whitelist: Vec<String>,
    /// Redact every course code
    #[arg(long)]
    redact_all: bool,
    /// The x axis label, overriding the graph configuration
    #[arg(long)]
    x_axis_label: Option<String>,
    /// Seed for the order of redacted courses
    #[arg(long)]
    seed: Option<u64>,
    /// The first line of the input is a record, not a header
    #[arg(long)]
    no_header: bool,
    /// JSON graph configuration
    #[arg(long)]
    graph_config: Option<PathBuf>,
    /// Only print the summary table
    #[arg(long)]
    no_plot: bool,
    /// Print the summary as JSON instead of a table
    #[arg(long)]
    json: bool,
}

fn init_logging() {
    _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .try_init();
}

pub fn run() -> anyhow::Result<()> {
    let args = CommandArgs::parse();
    init_logging();

    let samples = read_samples(&args.input_filename, !args.no_header)
        .with_context(|| format!("failed to read grades from {}", args.input_filename.display()))?;
    info!(courses = samples.len(), "loaded grade records");

    let whitelist = if args.redact_all {
        Whitelist::default()
    } else if args.course_code_whitelist.is_empty() {
        Whitelist::all_of(&samples)
    } else {
        Whitelist::new(args.course_code_whitelist.iter().cloned())
    };
    for code in whitelist.unknown_entries(&samples) {
        warn!(code, "whitelisted course code does not appear in the input");
    }

    let mut rng = match args.seed {
        Some(seed) => Pcg64::seed_from_u64(seed),
        None => Pcg64::from_os_rng(),
    };
    let partitioned = partition(&samples, &whitelist, &mut rng);
    let report: Report = assemble(&partitioned)?;

    if args.json {
        println!("{}", report.to_json()?);
    } else {
        report.print();
    }

    if !args.no_plot {
        let mut config = match &args.graph_config {
            Some(path) => GraphConfig::read(path)
                .with_context(|| format!("failed to load {}", path.display()))?,
            None => GraphConfig::default(),
        };
        if let Some(x_axis_label) = args.x_axis_label {
            config.x_label = x_axis_label;
        }
        render_box_plots(&report, &args.output_filename, &config)?;
    }

    Ok(())
}
