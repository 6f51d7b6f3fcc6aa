use reqwest::StatusCode;
use serde_json::Value;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Unexpected response from {path}: {source}")]
    Decode {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Response from {0} carried no data")]
    MissingData(String),

    #[error("Permission denied: {0}")]
    Permission(String),
}

pub type ClientResult<T> = Result<T, ClientError>;

impl ClientError {
    pub fn validation(message: impl Into<String>) -> Self {
        ClientError::Validation(message.into())
    }

    /// Build an API error from a non-2xx status and whatever body came back
    pub fn from_response(status: StatusCode, body: &[u8]) -> Self {
        ClientError::Api {
            status: status.as_u16(),
            message: extract_error_message(status, body),
        }
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, ClientError::Validation(_))
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Api { status, .. } => Some(*status),
            ClientError::Network(err) => err.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// The string a page shows in its alert
    pub fn display_message(&self) -> String {
        match self {
            ClientError::Validation(message)
            | ClientError::Permission(message)
            | ClientError::Api { message, .. } => message.clone(),
            ClientError::Network(err) if err.is_timeout() => {
                "The server took too long to respond. Please try again.".to_string()
            }
            ClientError::Network(_) => {
                "Unable to reach the server. Check your connection and try again.".to_string()
            }
            ClientError::Decode { .. } | ClientError::MissingData(_) => {
                "Unexpected response from the server".to_string()
            }
        }
    }
}

/// Best-effort message extraction over the error shapes the API is known to return.
pub fn extract_error_message(status: StatusCode, body: &[u8]) -> String {
    if let Ok(json) = serde_json::from_slice::<Value>(body) {
        if let Some(message) = message_from_json(&json) {
            return message;
        }
    } else if let Ok(text) = std::str::from_utf8(body) {
        let text = text.trim();
        // HTML error pages are not worth showing
        if !text.is_empty() && text.len() <= 200 && !text.starts_with('<') {
            return text.to_string();
        }
    }

    format!("Request failed with status {}", status.as_u16())
}

fn message_from_json(json: &Value) -> Option<String> {
    let non_empty = |value: &Value| {
        value
            .as_str()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
    };

    if let Some(message) = json.get("message").and_then(non_empty) {
        return Some(message);
    }

    if let Some(error) = json.get("error") {
        if let Some(message) = non_empty(error) {
            return Some(message);
        }
        if let Some(message) = error.get("message").and_then(non_empty) {
            return Some(message);
        }
    }

    if let Some(first) = json.get("errors").and_then(|e| e.get(0)) {
        if let Some(message) = non_empty(first) {
            return Some(message);
        }
        if let Some(message) = first.get("message").and_then(non_empty) {
            return Some(message);
        }
    }

    json.get("detail").and_then(non_empty)
}
