mod logging;

use std::fs::File;
use std::io::{BufReader, BufWriter, Write, stdin, stdout};
use std::path::{Path, PathBuf};

use clap::{ArgGroup, Parser};
use color_eyre::Result;
use color_eyre::eyre::{WrapErr, eyre};
use topcsv::batch;
use topcsv::config::{self, Config};
use topcsv::discover::{LogFilter, find_logs};
use topcsv::presets::build_watch_list;
use topcsv::report::{self, Metric, NumericPolicy, ParseOptions, WatchList};

#[derive(Parser)]
#[command(
    name = "topcsv",
    about = "Convert top batch logs into per-process CSV time series",
    group(ArgGroup::new("metric").required(true).args(["cpu", "mem"]))
)]
struct Cli {
    /// Gather CPU usage for each process.
    #[arg(short, long)]
    cpu: bool,

    /// Gather virtual memory usage for each process.
    #[arg(short, long)]
    mem: bool,

    /// Search DIR recursively for top.log[.N] files and write a CSV next to
    /// each one. --input-file and --output-file are ignored.
    #[arg(short, long, value_name = "DIR")]
    find: Option<PathBuf>,

    /// Input file to read from, instead of stdin.
    #[arg(short, long)]
    input_file: Option<PathBuf>,

    /// Output file to write to, instead of stdout.
    #[arg(short, long)]
    output_file: Option<PathBuf>,

    /// Named process set: all, ats, cms, dcs, ecs, sms, or one from the
    /// config file. Processes listed on the command line are added to it.
    #[arg(short, long)]
    preset: Option<String>,

    /// Processes to track, in output column order.
    #[arg(value_name = "PROCESSES", num_args = 0..)]
    processes: Vec<String>,

    /// Path to config file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Skip status lines whose metric is not a number instead of failing.
    #[arg(long, default_value_t = false)]
    skip_invalid: bool,

    /// Worker threads for --find (0 = one per CPU).
    #[arg(short, long, default_value_t = 0)]
    jobs: usize,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Emit logs as JSON lines on stderr.
    #[arg(long, default_value_t = false)]
    log_json: bool,
}

impl Cli {
    fn metric(&self) -> Metric {
        if self.cpu {
            Metric::CpuPercent
        } else {
            Metric::VirtualMemory
        }
    }
}

fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();
    logging::init_tracing(cli.verbose, cli.log_json)?;

    let config = load_config_for_cli(&cli);
    let watch = build_watch_list(cli.preset.as_deref(), &cli.processes, &config.presets)?;
    let options = parse_options_for_cli(&cli, &config);
    let metric = cli.metric();
    tracing::info!(processes = watch.len(), ?metric, "watch list ready");

    match &cli.find {
        Some(root) => run_find(root, &config, &watch, metric, &options, cli.jobs),
        None => run_single(&cli, &watch, metric, &options),
    }
}

fn load_config_for_cli(cli: &Cli) -> Config {
    match &cli.config {
        Some(path) => config::load_config_from_path(path),
        None => config::load_config(),
    }
}

fn parse_options_for_cli(cli: &Cli, config: &Config) -> ParseOptions {
    let mut options = config.parse_options();
    if cli.skip_invalid {
        options.numeric_policy = NumericPolicy::Skip;
    }
    options
}

fn run_single(cli: &Cli, watch: &WatchList, metric: Metric, options: &ParseOptions) -> Result<()> {
    let parsed = match &cli.input_file {
        Some(path) => {
            let file = File::open(path)
                .wrap_err_with(|| format!("Error opening file: {}", path.display()))?;
            report::parse_report(BufReader::new(file), watch, metric, options)?
        }
        None => report::parse_report(stdin().lock(), watch, metric, options)?,
    };

    match &cli.output_file {
        Some(path) => {
            let file = File::create(path)
                .wrap_err_with(|| format!("Error opening file: {}", path.display()))?;
            let mut out = BufWriter::new(file);
            report::emitter::write_csv(&mut out, &parsed.snapshots, watch, metric)?;
        }
        None => {
            let mut out = stdout().lock();
            report::emitter::write_csv(&mut out, &parsed.snapshots, watch, metric)?;
        }
    }

    if parsed.summary.skipped > 0 {
        tracing::warn!(skipped = parsed.summary.skipped, "some status lines were skipped");
    }
    Ok(())
}

fn run_find(
    root: &Path,
    config: &Config,
    watch: &WatchList,
    metric: Metric,
    options: &ParseOptions,
    jobs: usize,
) -> Result<()> {
    let filter = LogFilter::new(&config.discovery.file_pattern)?;
    let logs = find_logs(root, &filter)?;
    if logs.is_empty() {
        tracing::warn!(root = %root.display(), "no top logs found");
        return Ok(());
    }

    let outcomes = batch::convert_all(&logs, watch, metric, options, jobs)
        .map_err(|e| eyre!("failed to start worker pool: {e}"))?;

    let mut out = stdout().lock();
    for outcome in &outcomes {
        writeln!(out, "Found: {}", outcome.input.display())?;
        if let Ok(summary) = &outcome.result {
            writeln!(out, "Writing: {}", outcome.output.display())?;
            tracing::debug!(
                input = %outcome.input.display(),
                lines = summary.lines,
                snapshots = summary.snapshots,
                matched = summary.matched,
                "converted"
            );
        }
    }
    out.flush()?;

    let failed = outcomes.iter().filter(|o| o.result.is_err()).count();
    tracing::info!(converted = outcomes.len() - failed, failed, "find mode done");
    Ok(())
}
