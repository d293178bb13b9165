use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("{0} cannot be empty")]
    Blank(&'static str),

    #[error("Enter a valid slug consisting of letters, numbers, underscores or hyphens, got {0:?}")]
    InvalidSlug(String),

    #[error("{field} cannot be longer than {max} characters")]
    TooLong { field: &'static str, max: usize },

    #[error("Enter a valid email address.")]
    InvalidEmail,

    #[error("Password must be at least {0} characters")]
    PasswordTooShort(usize),

    #[error("Invalid quantity: {0}")]
    InvalidQuantity(String),

    #[error("Unknown unit of measurement: {0}. Allowed: ml, mg, oz, l, gm")]
    UnknownUnit(String),

    #[error("Rating must be between {min} and {max}, got {value}")]
    RatingOutOfRange { value: i64, min: i16, max: i16 },

    #[error("Maximum size of the image is {0}")]
    ImageTooLarge(String),

    #[error("{0}")]
    InvalidImage(String),

    #[error("More than {0} images cannot be posted for one recipe.")]
    TooManyImages(i64),
}
