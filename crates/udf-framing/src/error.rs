use thiserror::Error;

#[derive(Debug, Error)]
pub enum FramingError {
    #[error("truncated frame: needed {needed} more bytes, {remaining} remaining")]
    TruncatedFrame { needed: usize, remaining: usize },

    #[error("invalid header encoding: {0}")]
    InvalidHeaderEncoding(String),

    #[error("aggregation envelope decode failed: {0}")]
    EnvelopeDecode(String),
}
