use thiserror::Error;

#[derive(Debug, Error)]
pub enum MetricsError {
    #[error("Failed to create histogram: {source}")]
    CreateHistogram {
        #[source]
        source: hdrhistogram::CreationError,
    },
}
