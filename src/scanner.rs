use globset::GlobSet;
use rayon::prelude::*;

use crate::config::Config;
use crate::error::AppError;
use crate::model::{ImageRecord, Report};
use crate::query::{ScanTarget, SimpleQuery};
use crate::runtime;

/// Consumer of a validated query; produces the report that gets written out.
pub trait ScanPipeline {
    fn scan(&self, query: &SimpleQuery) -> Result<Report, AppError>;
}

pub struct Scanner {
    runtimes: Vec<String>,
    exclude: Option<GlobSet>,
}

impl Scanner {
    pub fn new(config: &Config) -> Result<Self, AppError> {
        let exclude = config.compile_excludes()?;
        Ok(Self { runtimes: config.runtimes.clone(), exclude })
    }

    fn scan_runtimes(&self) -> Result<Vec<ImageRecord>, AppError> {
        let per_runtime: Vec<Vec<ImageRecord>> = self
            .runtimes
            .par_iter()
            .map(|name| runtime::list_running_images(name))
            .collect::<Result<_, _>>()?;

        Ok(per_runtime
            .into_iter()
            .flatten()
            .filter(|image| !self.is_excluded(&image.reference))
            .collect())
    }

    fn is_excluded(&self, reference: &str) -> bool {
        self.exclude.as_ref().is_some_and(|set| set.is_match(reference))
    }
}

impl ScanPipeline for Scanner {
    fn scan(&self, query: &SimpleQuery) -> Result<Report, AppError> {
        let images = match query.target() {
            ScanTarget::Uri(uri) => vec![ImageRecord::uri(uri.to_string())],
            ScanTarget::File(path) => {
                if !path.is_file() {
                    return Err(AppError::ImageFileNotFound(path.to_path_buf()));
                }
                vec![ImageRecord::file(path.display().to_string())]
            }
            ScanTarget::Runtimes => self.scan_runtimes()?,
        };

        let mut report = Report::new(query.project_id.clone());
        report.add_images(images);
        Ok(report)
    }
}
