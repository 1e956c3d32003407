use thiserror::Error;

/// Failure of a client action, classified by what the UI does with it.
#[derive(Debug, Error)]
pub enum ApiError {
    /// 400: content rejected by the server ("atomized") or bad input.
    #[error("Bad Request: {}", .0.as_deref().unwrap_or("content rejected"))]
    BadRequest(Option<String>),

    #[error("Unauthorized: {}", .0.as_deref().unwrap_or("invalid credentials"))]
    Unauthorized(Option<String>),

    /// 403: ownership violation.
    #[error("Forbidden: {}", .0.as_deref().unwrap_or("not the owner"))]
    Forbidden(Option<String>),

    #[error("Not Found: {}", .0.as_deref().unwrap_or("no such resource"))]
    NotFound(Option<String>),

    #[error("HTTP {status}: {}", .detail.as_deref().unwrap_or("server error"))]
    Server { status: u16, detail: Option<String> },

    #[error("network: {0}")]
    Network(#[from] reqwest::Error),

    #[error("decode: {0}")]
    Decode(String),

    /// The session store could not be written.
    #[error("session storage: {0}")]
    Storage(String),
}

impl ApiError {
    /// Classify a non-success response. `body` is the raw response text;
    /// the `detail` field of a JSON error body is kept when present.
    pub fn from_status(status: u16, body: &str) -> Self {
        let detail = extract_detail(body);
        match status {
            400 => ApiError::BadRequest(detail),
            401 => ApiError::Unauthorized(detail),
            403 => ApiError::Forbidden(detail),
            404 => ApiError::NotFound(detail),
            _ => ApiError::Server { status, detail },
        }
    }

    /// Message the server attached to the failure, if any.
    pub fn detail(&self) -> Option<&str> {
        match self {
            ApiError::BadRequest(d)
            | ApiError::Unauthorized(d)
            | ApiError::Forbidden(d)
            | ApiError::NotFound(d)
            | ApiError::Server { detail: d, .. } => d.as_deref(),
            ApiError::Network(_) | ApiError::Decode(_) | ApiError::Storage(_) => None,
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::BadRequest(_) => Some(400),
            ApiError::Unauthorized(_) => Some(401),
            ApiError::Forbidden(_) => Some(403),
            ApiError::NotFound(_) => Some(404),
            ApiError::Server { status, .. } => Some(*status),
            ApiError::Network(e) => e.status().map(|s| s.as_u16()),
            ApiError::Decode(_) | ApiError::Storage(_) => None,
        }
    }

    pub fn is_rejected_content(&self) -> bool {
        matches!(self, ApiError::BadRequest(_))
    }

    pub fn is_forbidden(&self) -> bool {
        matches!(self, ApiError::Forbidden(_))
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::Decode(err.to_string())
    }
}

fn extract_detail(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    value
        .get("detail")
        .and_then(|d| d.as_str())
        .filter(|d| !d.is_empty())
        .map(str::to_string)
}
