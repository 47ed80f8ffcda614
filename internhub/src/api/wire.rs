//! Alternate wire encoding (MessagePack)
//!
//! Requests with `Content-Type: application/msgpack` are decoded before
//! normal processing; responses honor `Accept: application/msgpack`, falling
//! back to JSON when encoding fails.

use axum::{
    async_trait,
    body::Bytes,
    extract::{FromRequest, FromRequestParts, Request},
    http::{header, request::Parts},
    response::{IntoResponse, Response},
    Json,
};
use serde::{de::DeserializeOwned, Serialize};

use crate::error::ApiError;

pub const MSGPACK_CONTENT_TYPE: &str = "application/msgpack";

/// Request body decoded from JSON or MessagePack, depending on Content-Type
pub struct Decoded<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for Decoded<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let is_msgpack = req
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(|v| v.starts_with(MSGPACK_CONTENT_TYPE))
            .unwrap_or(false);

        if is_msgpack {
            let bytes = Bytes::from_request(req, state)
                .await
                .map_err(|_| ApiError::Validation("Failed to read request body".to_string()))?;
            let value = rmp_serde::from_slice(&bytes)
                .map_err(|_| ApiError::Validation("Invalid MessagePack data".to_string()))?;
            Ok(Decoded(value))
        } else {
            let Json(value) = Json::<T>::from_request(req, state)
                .await
                .map_err(|e| ApiError::Validation(format!("Invalid request body: {}", e)))?;
            Ok(Decoded(value))
        }
    }
}

/// Response format negotiated from the Accept header
#[derive(Debug, Clone, Copy)]
pub struct WireFormat {
    wants_msgpack: bool,
}

#[async_trait]
impl<S> FromRequestParts<S> for WireFormat
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let wants_msgpack = parts
            .headers
            .get(header::ACCEPT)
            .and_then(|v| v.to_str().ok())
            .map(|v| v.contains(MSGPACK_CONTENT_TYPE))
            .unwrap_or(false);

        Ok(WireFormat { wants_msgpack })
    }
}

impl WireFormat {
    /// Plain JSON responder, for callers outside a request context
    pub fn json() -> Self {
        Self {
            wants_msgpack: false,
        }
    }

    /// Encode a response in the negotiated format
    ///
    /// MessagePack encode failure falls back to JSON rather than erroring.
    pub fn respond<T: Serialize>(&self, value: T) -> Response {
        if self.wants_msgpack {
            if let Ok(buf) = rmp_serde::to_vec_named(&value) {
                return ([(header::CONTENT_TYPE, MSGPACK_CONTENT_TYPE)], buf).into_response();
            }
        }
        Json(value).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Sample {
        name: String,
        count: u32,
    }

    #[test]
    fn test_msgpack_roundtrip_matches_json_shape() {
        let sample = Sample {
            name: "backend".to_string(),
            count: 3,
        };

        let encoded = rmp_serde::to_vec_named(&sample).unwrap();
        let decoded: Sample = rmp_serde::from_slice(&encoded).unwrap();
        assert_eq!(decoded, sample);
    }

    #[test]
    fn test_respond_msgpack_sets_content_type() {
        let format = WireFormat {
            wants_msgpack: true,
        };
        let response = format.respond(Sample {
            name: "x".to_string(),
            count: 1,
        });

        assert_eq!(
            response.headers().get(header::CONTENT_TYPE).unwrap(),
            MSGPACK_CONTENT_TYPE
        );
    }

    #[test]
    fn test_respond_json_by_default() {
        let response = WireFormat::json().respond(Sample {
            name: "x".to_string(),
            count: 1,
        });

        let content_type = response
            .headers()
            .get(header::CONTENT_TYPE)
            .unwrap()
            .to_str()
            .unwrap();
        assert!(content_type.starts_with("application/json"));
    }
}
