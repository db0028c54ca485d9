use std::path::PathBuf;

use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use log::error;
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    /// Write request without a usable `tunnels` collection.
    #[error("Invalid data")]
    InvalidData,

    #[error("malformed tunnel config: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("malformed settings file: {0}")]
    Settings(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("could not locate the home directory")]
    NoHomeDir,

    #[error("config directory '{}' does not exist, make sure it is mounted", .0.display())]
    ConfigDirMissing(PathBuf),
}

pub type Result<T> = std::result::Result<T, Error>;

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        match self {
            Error::InvalidData => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();

        if status.is_server_error() {
            error!("{self}");
        }

        HttpResponse::build(status).json(json!({
            "status": "error",
            "message": self.to_string(),
        }))
    }
}
