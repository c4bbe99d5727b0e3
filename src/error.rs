use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use serde_json::json;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, DashboardError>;

/// Everything that can stop a render cycle. Input-stage errors are terminal:
/// the user corrects the input and the cycle restarts from scratch.
#[derive(Error, Debug)]
pub enum DashboardError {
    /// Uploaded table is missing one or more required columns.
    #[error("uploaded table must contain the columns 'Semester', 'SGPA', 'CGPA' (missing: {})", .missing.join(", "))]
    Schema { missing: Vec<String> },

    /// The input table could not be parsed.
    #[error("error reading table: {0}")]
    Parse(String),

    /// Manual entry where every field is still at its zero default.
    #[error("all SGPA and CGPA values are still zero; enter at least one grade")]
    EmptyInput,

    /// Guard against computing metrics over zero records. Upstream checks
    /// should keep this from ever reaching a user.
    #[error("cannot compute metrics over zero records")]
    EmptyData,
}

impl DashboardError {
    pub fn kind(&self) -> &'static str {
        match self {
            DashboardError::Schema { .. } => "schema",
            DashboardError::Parse(_) => "parse",
            DashboardError::EmptyInput => "empty_input",
            DashboardError::EmptyData => "empty_data",
        }
    }
}

impl ResponseError for DashboardError {
    fn status_code(&self) -> StatusCode {
        match self {
            DashboardError::Schema { .. } | DashboardError::Parse(_) => StatusCode::BAD_REQUEST,
            DashboardError::EmptyInput => StatusCode::UNPROCESSABLE_ENTITY,
            DashboardError::EmptyData => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(json!({
            "kind": self.kind(),
            "error": self.to_string(),
        }))
    }
}
