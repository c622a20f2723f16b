use thiserror::Error;

pub type Result<T> = core::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Connection Error: {0}")]
    Connection(reqwest::Error),

    #[error("Reqwest Error: {0}")]
    Reqwest(reqwest::Error),

    #[error("Couldn't build the HTTP client: {0}")]
    Client(reqwest::Error),

    #[error("Json Error: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<reqwest::Error> for Error {
    fn from(value: reqwest::Error) -> Self {
        if value.is_connect() {
            Error::Connection(value)
        } else {
            Error::Reqwest(value)
        }
    }
}

impl Error {
    /// Short name of the failure class, used when a failed request is logged and skipped.
    pub fn kind(&self) -> &'static str {
        match self {
            Error::Connection(_) => "ConnectionError",
            Error::Reqwest(_) | Error::Client(_) => "RequestError",
            Error::Json(_) => "DecodeError",
        }
    }
}
