//! Reading an uploaded image out of a multipart body.

use crate::api::ApiError;
use axum::body::Bytes;
use axum::extract::multipart::MultipartError;
use axum::extract::Multipart;
use axum::http::StatusCode;
use larder_core::image_too_large;

/// Name of the multipart field carrying the image.
pub const IMAGE_FIELD: &str = "image";

/// Bytes of the `image` field. Other fields are skipped. A body cut off by
/// the request size limit reports the image limit `max_size`.
pub async fn read_image_field(
    multipart: &mut Multipart,
    max_size: usize,
) -> Result<Bytes, ApiError> {
    let too_large = |e: MultipartError| {
        if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
            ApiError::from(image_too_large(max_size))
        } else {
            ApiError::from(e)
        }
    };

    while let Some(field) = multipart.next_field().await.map_err(too_large)? {
        if field.name() == Some(IMAGE_FIELD) {
            return field.bytes().await.map_err(too_large);
        }
    }
    Err(ApiError::BadRequest("No file was submitted.".to_string()))
}
