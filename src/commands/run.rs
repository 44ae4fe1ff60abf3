use std::path::PathBuf;

use crate::config::{Config, expand_home_path};
use crate::error::AppError;
use crate::query::{SimpleQuery, parse_output_format_or_default};
use crate::report::write_report;
use crate::scanner::{ScanPipeline, Scanner};
use crate::utils::non_empty;

#[derive(Debug, Default)]
pub struct RunOptions {
    pub project: Option<String>,
    pub output: Option<PathBuf>,
    pub format: Option<String>,
    pub image_file: Option<PathBuf>,
    pub image_uri: Option<String>,
}

pub fn execute_run(options: RunOptions) -> Result<(), AppError> {
    let config = Config::load()?;
    let scanner = Scanner::new(&config)?;
    run_with(options, &config, &scanner)
}

/// Build and validate the query, then hand it to `pipeline` and write the result.
pub fn run_with(
    options: RunOptions,
    config: &Config,
    pipeline: &dyn ScanPipeline,
) -> Result<(), AppError> {
    let query = build_query(options, config)?;
    query.validate()?;

    log::info!("scanning {query}");
    let report = pipeline.scan(&query)?;
    log::info!(
        "found {} image(s) across {} container(s)",
        report.images.len(),
        report.container_count()
    );

    write_report(&report, query.output_fmt, query.output_path.as_deref())
}

/// Merge flags over configuration. Empty values count as unset.
pub fn build_query(options: RunOptions, config: &Config) -> Result<SimpleQuery, AppError> {
    let token = non_empty(options.format).or_else(|| non_empty(config.format.clone()));
    let (output_fmt, diagnostic) = parse_output_format_or_default(token.as_deref().unwrap_or(""));
    if let Some(diagnostic) = diagnostic {
        log::warn!("{diagnostic}");
    }

    let output_path = match options.output.filter(|path| !path.as_os_str().is_empty()) {
        Some(path) => Some(expand_home_path(&path)?),
        None => config.output_path()?,
    };

    Ok(SimpleQuery {
        project_id: non_empty(options.project).or_else(|| non_empty(config.project.clone())),
        output_path,
        output_fmt,
        image_file: options.image_file.filter(|path| !path.as_os_str().is_empty()),
        image_uri: non_empty(options.image_uri),
    })
}
