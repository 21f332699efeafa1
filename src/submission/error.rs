#[derive(Debug, thiserror::Error)]
pub enum SubmissionError {
    #[error("submission request failed: {0}")]
    Request(String),
    #[error("submission service responded with status {status}: {body}")]
    Status { status: u16, body: String },
    #[error("submission response could not be decoded: {0}")]
    Decode(String),
    #[error("submission was rejected: {0}")]
    Rejected(String),
    #[error("io error at {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("json error at {path}: {source}")]
    Json {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}
