//! Request body extraction for item writes.
//!
//! Bodies are decoded by content type:
//! - `application/json` (and `+json` types): must be a JSON object to carry
//!   fields; any other JSON value, or an empty body, reads as `{}`
//! - `application/x-www-form-urlencoded`: decoded as form fields
//! - anything else, or no content type: reads as `{}`

use axum::{
    async_trait,
    body::Bytes,
    extract::{FromRequest, Request},
    http::header::CONTENT_TYPE,
    Form,
};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::error::ApiError;

/// Decoded write payload.
#[derive(Debug, Clone, Default)]
pub struct Payload<T>(pub T);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BodyKind {
    Json,
    Form,
    Other,
}

fn body_kind(content_type: Option<&str>) -> BodyKind {
    let essence = content_type
        .and_then(|ct| ct.split(';').next())
        .map(|ct| ct.trim().to_ascii_lowercase())
        .unwrap_or_default();

    if essence == "application/json"
        || (essence.starts_with("application/") && essence.ends_with("+json"))
    {
        BodyKind::Json
    } else if essence == "application/x-www-form-urlencoded" {
        BodyKind::Form
    } else {
        BodyKind::Other
    }
}

/// Decode a JSON body, keeping only the fields of a top-level object.
pub fn decode_json<T>(bytes: &[u8]) -> Result<T, ApiError>
where
    T: DeserializeOwned + Default,
{
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(T::default());
    }

    let value: Value =
        serde_json::from_slice(bytes).map_err(|e| ApiError::BadRequest(e.to_string()))?;

    let fields = match value {
        Value::Object(fields) => fields,
        _ => Map::new(),
    };

    serde_json::from_value(Value::Object(fields)).map_err(|e| ApiError::BadRequest(e.to_string()))
}

#[async_trait]
impl<T, S> FromRequest<S> for Payload<T>
where
    T: DeserializeOwned + Default + Send,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let content_type = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok());

        match body_kind(content_type) {
            BodyKind::Json => {
                let bytes = Bytes::from_request(req, state).await?;
                decode_json(&bytes).map(Payload)
            }
            BodyKind::Form => {
                let Form(value) = Form::<T>::from_request(req, state).await?;
                Ok(Payload(value))
            }
            BodyKind::Other => Ok(Payload(T::default())),
        }
    }
}
