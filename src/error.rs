//! Error types.

use axum::extract::rejection::JsonRejection;
use std::net::IpAddr;
use std::time::Duration;

/// Error enumerates the possible zonecrab error states.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// Returned when a value that must be an IPv4 dotted quad (e.g. `192.168.1.10`) is not.
    ///
    /// Generation fails as a whole when this is returned: no partial zone files are produced.
    #[error("invalid IPv4 address: \"{0}\"")]
    InvalidAddress(String),

    /// Returned when a domain is not a valid DNS name, or a host prefix is not a single valid
    /// DNS label.
    #[error("invalid DNS name: \"{0}\"")]
    InvalidName(String),

    /// Returned when one of the five required [`ConfigRequest`][crate::request::ConfigRequest]
    /// fields is empty or missing.
    #[error("Missing required fields")]
    MissingFields,

    /// Returned when clients `POST` invalid JSON.
    #[error(transparent)]
    JsonExtractorRejection(#[from] JsonRejection),

    /// Returned when the [`Config::api_bind_addr`][`crate::config::Config::api_bind_addr`] is
    /// not a loopback address, or an address within a private network space. The diagnostics
    /// endpoint launches processes on the host and is only meant to be reachable from the
    /// local network.
    #[error("API bind address ({0}) must be a loopback or private IP")]
    InsecureAPIBind(IpAddr),

    /// Returned when the [`Config::api_timeout`][`crate::config::Config::api_timeout`] would
    /// cut off a diagnostics request before its probes can time out on their own.
    #[error("API timeout ({api:?}) must be longer than the probe timeout ({probe:?})")]
    ApiTimeoutTooShort { api: Duration, probe: Duration },

    /// Returned when a timestamp can't be rendered for a response.
    #[error("could not format timestamp")]
    TimeFormat(#[from] time::error::Format),

    /// Returned when a generic IO error occurs.
    #[error("an IO error occurred")]
    IO(#[from] std::io::Error),

    /// Returned when [trying to load a `Config`][crate::config::Config::try_from_file] fails
    /// due to invalid JSON content.
    #[error("invalid JSON")]
    InvalidJSON(#[from] serde_json::Error),
}
