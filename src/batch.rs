use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};

use rayon::prelude::*;

use crate::discover::output_path_for;
use crate::error::ReportError;
use crate::report::{self, ConvertSummary, Metric, ParseOptions, WatchList};

/// Result of converting one discovered log.
#[derive(Debug)]
pub struct FileOutcome {
    pub input: PathBuf,
    pub output: PathBuf,
    pub result: Result<ConvertSummary, ReportError>,
}

/// Convert `input` into `output`. The output file is only created once the
/// whole input parsed successfully.
pub fn convert_file(
    input: &Path,
    output: &Path,
    watch: &WatchList,
    metric: Metric,
    options: &ParseOptions,
) -> Result<ConvertSummary, ReportError> {
    let _file_span = tracing::debug_span!("batch.convert_file", input = %input.display()).entered();

    let reader = BufReader::new(File::open(input)?);
    let parsed = report::parse_report(reader, watch, metric, options)?;

    let mut writer = BufWriter::new(File::create(output)?);
    report::emitter::write_csv(&mut writer, &parsed.snapshots, watch, metric)?;
    Ok(parsed.summary)
}

/// Convert every file in `inputs` next to itself, on up to `jobs` threads
/// (`0` lets rayon decide). Outcomes keep the order of `inputs`.
pub fn convert_all(
    inputs: &[PathBuf],
    watch: &WatchList,
    metric: Metric,
    options: &ParseOptions,
    jobs: usize,
) -> Result<Vec<FileOutcome>, rayon::ThreadPoolBuildError> {
    let pool = rayon::ThreadPoolBuilder::new().num_threads(jobs).build()?;

    let outcomes: Vec<FileOutcome> = pool.install(|| {
        inputs
            .par_iter()
            .map(|input| {
                let output = output_path_for(input, metric);
                let result = convert_file(input, &output, watch, metric, options);
                if let Err(e) = &result {
                    tracing::warn!(input = %input.display(), error = %e, "conversion failed");
                }
                FileOutcome {
                    input: input.clone(),
                    output,
                    result,
                }
            })
            .collect()
    });
    Ok(outcomes)
}
