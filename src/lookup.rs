use log::debug;
use serde::Deserialize;
use url::Url;

use crate::error::LookupError;

pub const DEFAULT_ENDPOINT: &str = "http://ipinfo.io";

/// Table header, in the same order as [`LookupResult::row`].
pub const HEADER: [&str; 7] = [
    "IP",
    "Organisation",
    "City",
    "Region",
    "Country",
    "Location",
    "TimeZone",
];

/// Body returned by the geolocation service. Missing and `null` fields are
/// both treated as empty.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct IpInfo {
    ip: Option<String>,
    city: Option<String>,
    region: Option<String>,
    country: Option<String>,
    loc: Option<String>,
    org: Option<String>,
    timezone: Option<String>,
}

/// Geolocation data for one address. Only constructed when the service
/// returned a location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupResult {
    pub address: String,
    pub organization: String,
    pub city: String,
    pub region: String,
    pub country: String,
    /// "lat,long"
    pub coordinates: String,
    pub timezone: String,
}

impl LookupResult {
    /// Decodes a service response for `address`.
    ///
    /// Fails with [`LookupError::Decode`] on malformed JSON and with
    /// [`LookupError::NotFound`] when the response carries no coordinates.
    pub fn from_json(address: &str, body: &[u8]) -> Result<Self, LookupError> {
        let info: IpInfo = serde_json::from_slice(body).map_err(|source| LookupError::Decode {
            address: address.to_string(),
            source,
        })?;

        let coordinates = info.loc.unwrap_or_default();
        if coordinates.is_empty() {
            return Err(LookupError::NotFound {
                address: address.to_string(),
            });
        }

        Ok(LookupResult {
            address: info.ip.unwrap_or_default(),
            organization: info.org.unwrap_or_default(),
            city: info.city.unwrap_or_default(),
            region: info.region.unwrap_or_default(),
            country: info.country.unwrap_or_default(),
            coordinates,
            timezone: info.timezone.unwrap_or_default(),
        })
    }

    pub fn row(&self) -> [&str; 7] {
        [
            &self.address,
            &self.organization,
            &self.city,
            &self.region,
            &self.country,
            &self.coordinates,
            &self.timezone,
        ]
    }
}

/// Retrieves the raw service response for one address.
pub trait Fetch {
    fn fetch(&self, address: &str) -> Result<Vec<u8>, LookupError>;
}

/// Fetches and decodes the record for `address`.
pub fn lookup<F: Fetch + ?Sized>(fetcher: &F, address: &str) -> Result<LookupResult, LookupError> {
    let body = fetcher.fetch(address)?;
    LookupResult::from_json(address, &body)
}

/// Blocking [`Fetch`] implementation over `minreq`.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    endpoint: Url,
}

impl HttpFetcher {
    /// The endpoint must be able to carry a path, e.g. `http://ipinfo.io`.
    pub fn new(endpoint: Url) -> Result<Self, LookupError> {
        if endpoint.cannot_be_a_base() {
            return Err(LookupError::InvalidEndpoint(endpoint.to_string()));
        }
        Ok(Self { endpoint })
    }

    /// Request URL for `address`, which is appended as a single
    /// percent-encoded path segment.
    pub fn url(&self, address: &str) -> String {
        let mut url = self.endpoint.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().push(address);
        }
        url.into()
    }
}

impl Fetch for HttpFetcher {
    fn fetch(&self, address: &str) -> Result<Vec<u8>, LookupError> {
        let url = self.url(address);
        debug!("GET {}", url);

        let response = minreq::get(url.as_str())
            .with_header("Accept", "application/json")
            .send_lazy()
            .map_err(|e| LookupError::Network {
                address: address.to_string(),
                source: Box::new(e),
            })?;
        debug!("{} answered with status {}", url, response.status_code);

        // The connection is released when `response` is dropped at the end of
        // this scope, after the body has been drained.
        let mut body = Vec::new();
        for byte in response {
            let (byte, remaining) = byte.map_err(|e| LookupError::BrokenResponse {
                address: address.to_string(),
                source: Box::new(e),
            })?;
            body.reserve(remaining);
            body.push(byte);
        }

        Ok(body)
    }
}
