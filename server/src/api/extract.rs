//! Request extractors whose rejections use the shared `{"error": ...}` body.

use crate::api::ApiError;
use axum::extract::{FromRequest, FromRequestParts};
use serde::{Deserialize, Deserializer};
use std::fmt;
use uuid::Uuid;

/// JSON body extractor. A missing or malformed body is a 400.
///
/// Handlers that check permissions take `Result<ApiJson<T>, ApiError>` and
/// only look at the body once the caller is allowed to write.
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct ApiJson<T>(pub T);

#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(ApiError))]
pub struct ApiPath<T>(pub T);

#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(ApiError))]
pub struct ApiQuery<T>(pub T);

/// A resource id taken from the URL.
///
/// A segment that is not a UUID names no resource. It is reported as not
/// found by the lookup that would have used it, so permission checks that
/// come before that lookup still run first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathId {
    Valid(Uuid),
    Malformed(String),
}

impl PathId {
    /// The id, or the resource's not-found error for a malformed segment.
    pub fn resolve(&self, not_found: impl FnOnce(&str) -> ApiError) -> Result<Uuid, ApiError> {
        match self {
            PathId::Valid(id) => Ok(*id),
            PathId::Malformed(raw) => Err(not_found(raw)),
        }
    }
}

impl From<Uuid> for PathId {
    fn from(id: Uuid) -> Self {
        PathId::Valid(id)
    }
}

impl fmt::Display for PathId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathId::Valid(id) => write!(f, "{}", id),
            PathId::Malformed(raw) => f.write_str(raw),
        }
    }
}

impl<'de> Deserialize<'de> for PathId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(match Uuid::parse_str(&raw) {
            Ok(id) => PathId::Valid(id),
            Err(_) => PathId::Malformed(raw),
        })
    }
}
