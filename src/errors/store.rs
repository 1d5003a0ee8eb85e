#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Series file I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("Series file does not parse as a reading array: {0}")]
    CorruptData(#[source] serde_json::Error),

    #[error("Series could not be encoded: {0}")]
    Encode(#[source] serde_json::Error),
}
