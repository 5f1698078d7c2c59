//! The single error boundary of the crate: loading region data.
//!
//! Everything after a successful load degrades to defaults instead of failing,
//! so this is the only error type the library exposes.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LoadError {
    /// The server answered with a non-success status.
    #[error("GET {url} failed with HTTP {status}")]
    Http {
        url: String,
        status: reqwest::StatusCode,
    },

    /// Connection, timeout or body read failure.
    #[error("network error for {url}")]
    Network {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("could not build HTTP client")]
    Client(#[source] reqwest::Error),

    /// The payload was not the JSON shape we expected.
    #[error("malformed {what}")]
    Decode {
        what: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("malformed boundary geometry: {0}")]
    Geometry(String),

    #[error("could not read {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("a loader thread panicked")]
    Worker,
}
