use chrono::{DateTime, Utc};
use diesel::result::Error as DieselError;
use diesel::result::ConnectionError;
use rocket::http::Status;
use serde::Serialize;
use std::error::Error;
use std::fmt::Display;

/// Anything that stops a load or a table rebuild.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("could not connect to the database: {0}")]
    Connection(#[from] ConnectionError),
    #[error("database error: {0}")]
    Database(#[from] DieselError),
    #[error("could not read the dataset: {0}")]
    Csv(#[from] csv::Error),
    #[error("could not open the dataset: {0}")]
    Io(#[from] std::io::Error),
    #[error("line {line}: expected {expected} fields, found {found}")]
    MalformedRow {
        line: u64,
        expected: usize,
        found: usize,
    },
    #[error("line {line}: {value:?} is not a valid news id")]
    InvalidId { line: u64, value: String },
}

#[derive(Debug, thiserror::Error)]
pub enum QueryError {
    #[error("news database unavailable: {0}")]
    Unavailable(#[from] ConnectionError),
    #[error("no news with id {0}")]
    NotFound(i64),
    #[error("database error: {0}")]
    Database(#[from] DieselError),
}

#[derive(Debug)]
pub struct APIError {
    timestamp: DateTime<Utc>,
    status: Status,
    message: String,
}
impl APIError {
    pub fn new(status: Status, message: String) -> Self {
        APIError {
            timestamp: Utc::now(),
            status,
            message,
        }
    }

    pub fn status(&self) -> Status {
        self.status
    }
}
impl Default for APIError {
    fn default() -> Self {
        Self {
            timestamp: Utc::now(),
            status: Status::InternalServerError,
            message: "Something went wrong processing this request".into(),
        }
    }
}
impl Display for APIError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NewsApiError")
            .field("timestamp", &self.timestamp)
            .field("code", &self.status.code)
            .field("error", &self.status.reason())
            .field("message", &self.message)
            .finish()
    }
}
impl Serialize for APIError {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::SerializeStruct;
        let mut api_error = serializer.serialize_struct("NewsApiError", 4)?;
        api_error.serialize_field("timestamp", &self.timestamp)?;
        api_error.serialize_field("code", &self.status.code)?;
        api_error.serialize_field("error", &self.status.reason())?;
        api_error.serialize_field("message", &self.message)?;
        api_error.end()
    }
}
impl Error for APIError {}

impl<'r> rocket::response::Responder<'r, 'static> for APIError {
    fn respond_to(self, request: &'r rocket::Request<'_>) -> rocket::response::Result<'static> {
        let status = self.status;
        rocket::Response::build_from(rocket::serde::json::Json(self).respond_to(request)?)
            .status(status)
            .ok()
    }
}

impl From<QueryError> for APIError {
    fn from(err: QueryError) -> Self {
        match err {
            QueryError::NotFound(id) => {
                APIError::new(Status::NotFound, format!("No news with id {}.", id))
            }
            QueryError::Unavailable(_) => APIError::new(
                Status::ServiceUnavailable,
                "The news database is unavailable.".into(),
            ),
            QueryError::Database(_) => Default::default(),
        }
    }
}
