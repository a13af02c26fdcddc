//! Core library for the `loadgen` CLI.
//!
//! A run validates a [`config::RunConfig`], fans a fixed number of tickets out
//! to a bounded pool of workers that each issue one HTTP GET per ticket, and
//! folds every outcome into a single [`metrics::Report`]. The HTTP client sits
//! behind the [`http::HttpClient`] trait so runs can be driven without a
//! network.
pub mod app;
pub mod args;
pub mod config;
pub mod error;
pub mod http;
pub mod metrics;
pub mod shutdown;
