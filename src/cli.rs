use clap::Parser;
use clap_verbosity_flag::{Verbosity, WarnLevel};
use log::LevelFilter;
use url::Url;

use crate::error::LookupError;
use crate::lookup::{HttpFetcher, DEFAULT_ENDPOINT};
use crate::report::{NetworkPolicy, Reporter};

/// Command to find information about IP addresses.
#[derive(Debug, Parser)]
#[command(name = "iplocator")]
#[command(about = "Command to find information about IP addresses")]
#[command(version = env!("CARGO_PKG_VERSION"))]
pub struct Cli {
    /// IP addresses to look up, separated by spaces
    ip_addresses: Vec<String>,

    /// Base URL of the geolocation service.
    #[arg(long, default_value = DEFAULT_ENDPOINT)]
    endpoint: Url,

    /// What to do with the rest of the batch when a request fails.
    #[arg(long, value_enum, value_name = "POLICY", ignore_case = true, default_value = "abort")]
    on_network_error: NetworkPolicy,

    #[command(flatten)]
    verbosity: Verbosity<WarnLevel>,

    /// Accepted for compatibility, has no effect.
    #[arg(short = 't', long = "toggle", hide = true)]
    _toggle: bool,
}

impl Cli {
    /// Addresses in argument order. Arguments holding several
    /// whitespace-separated addresses are split; an argument with nothing to
    /// split is kept as it is.
    pub fn addresses(&self) -> Vec<String> {
        let mut addresses = Vec::new();
        for arg in &self.ip_addresses {
            let before = addresses.len();
            addresses.extend(arg.split_whitespace().map(str::to_string));
            if addresses.len() == before {
                addresses.push(arg.clone());
            }
        }
        addresses
    }

    pub fn log_level_filter(&self) -> LevelFilter {
        self.verbosity.log_level_filter()
    }

    /// Builds the reporter described by these arguments.
    pub fn reporter(&self) -> Result<Reporter<HttpFetcher>, LookupError> {
        let fetcher = HttpFetcher::new(self.endpoint.clone())?;
        Ok(Reporter::new(fetcher, self.on_network_error))
    }
}
