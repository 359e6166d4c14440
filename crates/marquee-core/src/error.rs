pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("dataset JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid node {path:?}: {message}")]
    InvalidNode { path: String, message: String },

    #[error("dataset is empty")]
    EmptyDataset,
}
