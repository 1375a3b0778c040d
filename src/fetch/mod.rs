//! Remote text retrieval

pub mod client;

pub use client::{HttpFetcher, SourceFetcher, StaticFetcher};
