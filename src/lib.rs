use std::io::Write;

use anyhow::Result;

mod cli;
mod error;
mod lookup;
mod report;

pub use cli::Cli;
pub use error::{LookupError, TransportError};
pub use lookup::{lookup, Fetch, HttpFetcher, LookupResult, DEFAULT_ENDPOINT, HEADER};
pub use report::{NetworkPolicy, Report, Reporter};

/// Runs one batch and flushes `out`, so whatever was rendered is visible
/// before a fatal error is reported.
pub fn run_ip_lookup<F: Fetch, W: Write>(
    reporter: &Reporter<F>,
    ip_addresses: &[String],
    out: &mut W,
) -> Result<Report> {
    let report = reporter.run(ip_addresses, out);
    out.flush()?;
    Ok(report?)
}

#[cfg(test)]
mod tests {
    use std::io;

    use super::*;

    struct Unreachable;

    impl Fetch for Unreachable {
        fn fetch(&self, address: &str) -> Result<Vec<u8>, LookupError> {
            Err(LookupError::Network {
                address: address.to_string(),
                source: Box::new(io::Error::new(io::ErrorKind::TimedOut, "timed out")),
            })
        }
    }

    #[test]
    fn fatal_errors_keep_their_type() {
        let reporter = Reporter::new(Unreachable, NetworkPolicy::Abort);
        let mut out = Vec::new();
        let err = run_ip_lookup(&reporter, &["8.8.8.8".to_string()], &mut out).unwrap_err();

        assert_eq!(err.to_string(), "error found with IP 8.8.8.8");
        let lookup_err = err.downcast_ref::<LookupError>().unwrap();
        assert!(lookup_err.is_transport());
        assert!(out.is_empty());
    }

    #[test]
    fn skipped_errors_still_render() {
        let reporter = Reporter::new(Unreachable, NetworkPolicy::Skip);
        let mut out = Vec::new();
        let report = run_ip_lookup(&reporter, &["8.8.8.8".to_string()], &mut out).unwrap();

        assert_eq!(report.skipped, vec!["8.8.8.8"]);
        let out = String::from_utf8(out).unwrap();
        assert!(out.starts_with("error found with IP 8.8.8.8\n"));
        assert!(out.contains("TimeZone"));
    }
}
