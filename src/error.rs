use thiserror::Error;

/// Boxed error produced by an HTTP transport.
pub type TransportError = Box<dyn std::error::Error + Send + Sync + 'static>;

#[derive(Error, Debug)]
pub enum LookupError {
    #[error("Error: At least one IP address is required.")]
    NoAddresses,

    #[error("error found with IP {address}")]
    Network {
        address: String,
        #[source]
        source: TransportError,
    },

    #[error("received broken response from the server")]
    BrokenResponse {
        address: String,
        #[source]
        source: TransportError,
    },

    #[error("could not decode the response for {address}")]
    Decode {
        address: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("could not find information about {address}")]
    NotFound { address: String },

    #[error("invalid service endpoint {0}")]
    InvalidEndpoint(String),

    #[error("failed to write report")]
    Output(#[from] std::io::Error),
}

impl LookupError {
    /// Whether the request itself failed, as opposed to the service having
    /// no usable data for the address.
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Network { .. } | Self::BrokenResponse { .. })
    }

    pub fn address(&self) -> Option<&str> {
        match self {
            Self::NoAddresses | Self::InvalidEndpoint(_) | Self::Output(_) => None,
            Self::Network { address, .. }
            | Self::BrokenResponse { address, .. }
            | Self::Decode { address, .. }
            | Self::NotFound { address } => Some(address),
        }
    }
}
