use thiserror::Error;

#[derive(Debug, Error)]
pub enum RpcError {
    #[error("rpc transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("rpc endpoint returned HTTP {status}")]
    Http { status: reqwest::StatusCode },

    #[error("rpc error {code} calling {method}: {message}")]
    Server {
        method: String,
        code: i64,
        message: String,
    },

    #[error("rpc method {method} returned no result")]
    MissingResult { method: String },
}
