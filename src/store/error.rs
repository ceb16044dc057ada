use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("address book io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("address book is not a valid JSON object: {0}")]
    Json(#[from] serde_json::Error),
}
