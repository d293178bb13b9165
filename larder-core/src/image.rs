//! Image validation for recipe pictures and profile images.
//!
//! Images are stored as-is; this only checks size and that the bytes are
//! one of the accepted formats.

use std::io::Cursor;

use image::{ImageFormat, ImageReader};

use crate::error::ValidationError;

/// Allowed image formats for uploads.
pub const ALLOWED_FORMATS: &[ImageFormat] = &[
    ImageFormat::Jpeg,
    ImageFormat::Png,
    ImageFormat::Gif,
    ImageFormat::WebP,
];

/// Maximum size of a recipe image (5MB).
pub const MAX_RECIPE_IMAGE_SIZE: usize = 5 * 1024 * 1024;

/// Maximum size of a user profile image (500KB).
pub const MAX_PROFILE_IMAGE_SIZE: usize = 500 * 1024;

/// A recipe can have at most this many images.
pub const MAX_IMAGES_PER_RECIPE: i64 = 3;

fn describe_limit(max_size: usize) -> String {
    if max_size >= 1024 * 1024 && max_size % (1024 * 1024) == 0 {
        format!("{} MB", max_size / (1024 * 1024))
    } else {
        format!("{} KB", max_size / 1024)
    }
}

/// Error for an image over `max_size` bytes.
pub fn image_too_large(max_size: usize) -> ValidationError {
    ValidationError::ImageTooLarge(describe_limit(max_size))
}

/// Check a recipe that already has `existing` images can take one more.
pub fn ensure_image_slot(existing: i64) -> Result<(), ValidationError> {
    if existing >= MAX_IMAGES_PER_RECIPE {
        return Err(ValidationError::TooManyImages(MAX_IMAGES_PER_RECIPE));
    }
    Ok(())
}

/// Validate image data against a size limit and the allowed formats.
///
/// Returns the content type on success (e.g., "image/jpeg").
pub fn validate_image(data: &[u8], max_size: usize) -> Result<String, ValidationError> {
    if data.len() > max_size {
        return Err(image_too_large(max_size));
    }

    let reader = ImageReader::new(Cursor::new(data))
        .with_guessed_format()
        .map_err(|e| ValidationError::InvalidImage(format!("Failed to read image: {}", e)))?;

    let format = reader
        .format()
        .ok_or_else(|| ValidationError::InvalidImage("Could not detect image format".to_string()))?;

    if !ALLOWED_FORMATS.contains(&format) {
        return Err(ValidationError::InvalidImage(format!(
            "Unsupported image format: {:?}. Allowed: JPEG, PNG, GIF, WebP",
            format
        )));
    }

    Ok(format.to_mime_type().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    const PNG_SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

    #[test]
    fn test_detects_png() {
        assert_eq!(
            validate_image(&PNG_SIGNATURE, MAX_RECIPE_IMAGE_SIZE),
            Ok("image/png".to_string())
        );
    }

    #[test]
    fn test_rejects_unknown_bytes() {
        let result = validate_image(b"not an image", MAX_RECIPE_IMAGE_SIZE);
        assert!(matches!(result, Err(ValidationError::InvalidImage(_))));
    }

    #[test]
    fn test_fourth_image_is_rejected() {
        for existing in 0..MAX_IMAGES_PER_RECIPE {
            assert_eq!(ensure_image_slot(existing), Ok(()));
        }
        let err = ensure_image_slot(MAX_IMAGES_PER_RECIPE).unwrap_err();
        assert_eq!(
            err.to_string(),
            "More than 3 images cannot be posted for one recipe."
        );
    }

    #[test]
    fn test_rejects_oversized() {
        let data = vec![0u8; MAX_PROFILE_IMAGE_SIZE + 1];
        let err = validate_image(&data, MAX_PROFILE_IMAGE_SIZE).unwrap_err();
        assert_eq!(err.to_string(), "Maximum size of the image is 500 KB");

        let data = vec![0u8; MAX_RECIPE_IMAGE_SIZE + 1];
        let err = validate_image(&data, MAX_RECIPE_IMAGE_SIZE).unwrap_err();
        assert_eq!(err.to_string(), "Maximum size of the image is 5 MB");
    }
}
