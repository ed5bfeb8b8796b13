//! Data ingestion and fetch collaborators

pub mod http;
pub mod ingest;
pub mod provider;

pub use http::{HttpFetcher, RoutingFetcher};
pub use ingest::{parse_bars, ParseError};
pub use provider::{FetchError, Fetcher, FileFetcher, StaticFetcher};
