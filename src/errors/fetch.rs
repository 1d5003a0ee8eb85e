#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("Device status request failed: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Unexpected response shape at `{path}`")]
    UnexpectedShape { path: String },

    #[error("Malformed reading timestamp `{raw}`: {source}")]
    MalformedTimestamp {
        raw: String,
        #[source]
        source: time::error::Parse,
    },
}
