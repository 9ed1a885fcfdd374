//! Response classification by declared content type.

use reqwest::blocking::Response;
use reqwest::header::CONTENT_TYPE;
use serde_json::{Map, Value};
use tracing::{debug, trace};

use crate::error::{Error, ResponseError};

/// Content type of JSON API responses.
pub const CONTENT_TYPE_JSON: &str = "application/json";

/// Content type of snapshot responses.
pub const CONTENT_TYPE_JPEG: &str = "image/jpeg";

/// A decoded recorder response.
///
/// The variant is chosen by exact match on the declared content type.
#[derive(Debug)]
pub enum ApiResponse {
    /// `application/json` body, parsed.
    Json(Value),
    /// `image/jpeg` body, unmodified.
    Image(Vec<u8>),
    /// Any other content type: the unconsumed transport response.
    Other(Response),
}

impl ApiResponse {
    /// Short description of the variant, used in error messages.
    pub fn kind(&self) -> String {
        match self {
            ApiResponse::Json(_) => CONTENT_TYPE_JSON.to_string(),
            ApiResponse::Image(_) => CONTENT_TYPE_JPEG.to_string(),
            ApiResponse::Other(response) => {
                content_type(response).unwrap_or("no content type").to_string()
            }
        }
    }

    /// Returns the JSON value, if this is a JSON response.
    pub fn as_json(&self) -> Option<&Value> {
        match self {
            ApiResponse::Json(value) => Some(value),
            _ => None,
        }
    }

    /// Convert into a JSON object.
    ///
    /// # Errors
    ///
    /// Fails if the response is not JSON, or is JSON but not an object.
    pub fn into_json_object(self) -> Result<Map<String, Value>, ResponseError> {
        match self {
            ApiResponse::Json(Value::Object(map)) => Ok(map),
            ApiResponse::Json(other) => Err(ResponseError::malformed(format!(
                "expected a JSON object, got {}",
                json_type_name(&other)
            ))),
            other => Err(ResponseError::UnexpectedContentType {
                expected: CONTENT_TYPE_JSON,
                actual: other.kind(),
            }),
        }
    }

    /// Convert into raw image bytes.
    ///
    /// # Errors
    ///
    /// Fails if the response is not `image/jpeg`.
    pub fn into_image(self) -> Result<Vec<u8>, ResponseError> {
        match self {
            ApiResponse::Image(bytes) => Ok(bytes),
            other => Err(ResponseError::UnexpectedContentType {
                expected: CONTENT_TYPE_JPEG,
                actual: other.kind(),
            }),
        }
    }
}

/// Classify a transport response.
///
/// Non-success statuses become [`ResponseError::Status`] with the raw body
/// text; the recorder's error bodies are often malformed JSON, so no attempt
/// is made to parse them.
pub(crate) fn interpret(response: Response) -> Result<ApiResponse, Error> {
    let response = ensure_success(response)?;
    let status = response.status();

    let declared = content_type(&response).map(str::to_owned);
    trace!(status = %status, content_type = ?declared, "classifying response");

    match declared.as_deref() {
        Some(CONTENT_TYPE_JSON) => {
            let bytes = response.bytes()?;
            let value: Value = serde_json::from_slice(&bytes).map_err(ResponseError::malformed)?;
            Ok(ApiResponse::Json(value))
        }
        Some(CONTENT_TYPE_JPEG) => {
            let bytes = response.bytes()?;
            Ok(ApiResponse::Image(bytes.to_vec()))
        }
        _ => Ok(ApiResponse::Other(response)),
    }
}

/// Pass a success response through; turn anything else into
/// [`ResponseError::Status`] carrying the decoded body text.
pub(crate) fn ensure_success(response: Response) -> Result<Response, ResponseError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = match response.text() {
        Ok(body) => body,
        Err(e) => {
            debug!(error = %e.without_url(), %status, "Failed to read error body");
            String::new()
        }
    };

    Err(ResponseError::Status {
        status: status.as_u16(),
        body,
    })
}

fn content_type(response: &Response) -> Option<&str> {
    response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
