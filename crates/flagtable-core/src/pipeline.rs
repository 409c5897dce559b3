// crates/flagtable-core/src/pipeline.rs

//! Runs directory load → flag attach → table construction once.
//!
//! Failure handling is decided here and nowhere else:
//! - directory failure: [`Pipeline::run`] logs it and returns an empty table,
//!   [`Pipeline::try_run`] hands it to the caller;
//! - flag failures: handled per [`FailurePolicy`](crate::loader::FailurePolicy);
//!   a batch abort is recorded in the report, the table is still built.

use crate::common::FlagSummary;
use crate::config::PipelineConfig;
use crate::error::{DirectoryLoadError, FlagError};
use crate::loader::{attach_flags, load_directory};
use crate::table::CountryTable;
use crate::traits::Fetch;
use log::{error, info, warn};

#[derive(Debug)]
pub struct PipelineReport {
    pub table: CountryTable,
    pub flags: FlagSummary,
    /// Set when an aborting flag policy stopped the batch.
    pub flag_error: Option<FlagError>,
}

pub struct Pipeline<F> {
    fetcher: F,
    config: PipelineConfig,
}

impl<F: Fetch + Sync> Pipeline<F> {
    pub fn new(fetcher: F, config: PipelineConfig) -> Self {
        Self { fetcher, config }
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }

    /// Like [`Pipeline::try_run`], but a directory failure becomes an empty table.
    pub fn run(&self) -> PipelineReport {
        match self.try_run() {
            Ok(report) => report,
            Err(err) => {
                error!("Country directory unavailable, showing an empty table: {err}");
                PipelineReport {
                    table: self.empty_table(),
                    flags: FlagSummary::default(),
                    flag_error: None,
                }
            }
        }
    }

    pub fn try_run(&self) -> Result<PipelineReport, DirectoryLoadError> {
        let mut directory = load_directory(&self.fetcher, &self.config.directory_source())?;

        let (flags, flag_error) = if self.config.fetch_flags {
            match attach_flags(
                &self.fetcher,
                &mut directory,
                &self.config.flag_source(),
                &self.config.flag_policy(),
            ) {
                Ok(summary) => (summary, None),
                Err(aborted) => {
                    warn!("Flag batch aborted at '{}': {}", aborted.code(), aborted.error);
                    (aborted.summary, Some(aborted.error))
                }
            }
        } else {
            info!("Flag fetching disabled");
            (FlagSummary::default(), None)
        };

        let table = CountryTable::from_directory(directory, &self.config.locale, self.config.article_base());
        Ok(PipelineReport {
            table,
            flags,
            flag_error,
        })
    }

    fn empty_table(&self) -> CountryTable {
        CountryTable::new(&self.config.locale, self.config.article_base())
    }
}
