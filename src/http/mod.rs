//! HTTP client seam and the worker pool that drives it.
mod client;
mod sender;

#[cfg(test)]
pub(crate) mod test_support;

pub use client::{HttpClient, ReqwestClient};
pub use sender::{Ticket, WorkerPool, spawn_job_source};
