//! Failure taxonomy for the cities API and the list controller.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CityApiError {
    #[error("network failure: {0}")]
    Network(#[from] reqwest::Error),
    #[error("{}", describe_http(*status, status_text, body.as_deref()))]
    Http {
        status: u16,
        status_text: String,
        body: Option<String>,
    },
    #[error("malformed response body: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid cities endpoint '{0}'")]
    InvalidEndpoint(String),
    #[error("city id must not be empty")]
    EmptyCityId,
}

impl CityApiError {
    pub fn http(status: reqwest::StatusCode, body: Option<String>) -> Self {
        Self::Http {
            status: status.as_u16(),
            status_text: status.canonical_reason().unwrap_or_default().to_string(),
            body,
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => Some(*status),
            Self::Network(err) => err.status().map(|status| status.as_u16()),
            _ => None,
        }
    }
}

fn describe_http(status: u16, status_text: &str, body: Option<&str>) -> String {
    let mut message = format!("HTTP {status}");
    if !status_text.is_empty() {
        message.push(' ');
        message.push_str(status_text);
    }
    if let Some(body) = body.map(str::trim).filter(|body| !body.is_empty()) {
        message.push_str(" - ");
        message.push_str(body);
    }
    message
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please fill in all fields.")]
    MissingFields,
    #[error("Population must be a whole number, got '{0}'.")]
    InvalidPopulation(String),
}

#[derive(Debug, Error)]
pub enum ControllerError {
    #[error(transparent)]
    Api(#[from] CityApiError),
    #[error(transparent)]
    Validation(#[from] ValidationError),
}
