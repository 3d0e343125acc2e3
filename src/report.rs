use std::io::Write;

use clap::ValueEnum;
use comfy_table::presets::ASCII_FULL_CONDENSED;
use comfy_table::Table;
use log::{debug, info, warn};

use crate::error::LookupError;
use crate::lookup::{lookup, Fetch, LookupResult, HEADER};

/// What to do with the rest of the batch when a request fails at the
/// transport level.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum NetworkPolicy {
    /// Render the rows gathered so far, then stop with the error.
    #[default]
    Abort,
    /// Report the failed address and carry on with the next one.
    Skip,
}

/// Outcome of one batch.
#[derive(Debug, Default)]
pub struct Report {
    pub rows: Vec<LookupResult>,
    pub not_found: Vec<String>,
    pub skipped: Vec<String>,
}

impl Report {
    pub fn table(&self) -> Table {
        let mut table = Table::new();
        table.load_preset(ASCII_FULL_CONDENSED).set_header(HEADER);
        for result in &self.rows {
            table.add_row(result.row());
        }
        table
    }

    pub fn render<W: Write>(&self, out: &mut W) -> Result<(), LookupError> {
        writeln!(out, "{}", self.table())?;
        Ok(())
    }
}

pub struct Reporter<F> {
    fetcher: F,
    policy: NetworkPolicy,
}

impl<F: Fetch> Reporter<F> {
    pub fn new(fetcher: F, policy: NetworkPolicy) -> Self {
        Self { fetcher, policy }
    }

    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }

    pub fn policy(&self) -> NetworkPolicy {
        self.policy
    }

    /// Looks up every address in order and writes the table of successful
    /// lookups to `out`. Addresses without data are reported inline as they
    /// are processed.
    ///
    /// Under [`NetworkPolicy::Abort`] a transport error ends the batch: the
    /// rows gathered so far are rendered (if any) and the error is returned.
    pub fn run<W: Write>(&self, addresses: &[String], out: &mut W) -> Result<Report, LookupError> {
        if addresses.is_empty() {
            writeln!(out, "{}", LookupError::NoAddresses)?;
            return Ok(Report::default());
        }

        let mut report = Report::default();
        for address in addresses {
            match lookup(&self.fetcher, address) {
                Ok(result) => report.rows.push(result),
                Err(LookupError::Decode { address, source }) => {
                    debug!("discarding malformed response for {}: {}", address, source);
                    writeln!(out, "{}", LookupError::NotFound { address: address.clone() })?;
                    report.not_found.push(address);
                }
                Err(LookupError::NotFound { address }) => {
                    writeln!(out, "{}", LookupError::NotFound { address: address.clone() })?;
                    report.not_found.push(address);
                }
                Err(err) if err.is_transport() => match self.policy {
                    NetworkPolicy::Abort => {
                        if !report.rows.is_empty() {
                            report.render(out)?;
                        }
                        return Err(err);
                    }
                    NetworkPolicy::Skip => {
                        warn!("skipping {}: {:?}", address, err);
                        writeln!(out, "{}", err)?;
                        report.skipped.push(address.clone());
                    }
                },
                Err(err) => return Err(err),
            }
        }

        report.render(out)?;
        info!(
            "{} found, {} not found, {} skipped",
            report.rows.len(),
            report.not_found.len(),
            report.skipped.len()
        );
        Ok(report)
    }
}
