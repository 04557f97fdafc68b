use thiserror::Error;

#[derive(Debug, Error)]
pub enum RmScribeError {
    #[error("Decode error: {0}")]
    DecodeError(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Package error: {0}")]
    PackageError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Generates factory methods for [`RmScribeError`] variants that wrap a `String`.
macro_rules! error_constructors {
    ($(
        $(#[doc = $doc:expr])*
        $method:ident => $variant:ident
    ),* $(,)?) => {
        impl RmScribeError {
            $(
                $(#[doc = $doc])*
                pub fn $method(msg: impl Into<String>) -> Self {
                    Self::$variant(msg.into())
                }
            )*
        }
    };
}

error_constructors! {
    /// Create a decode error.
    decode => DecodeError,
    /// Create a validation error.
    validation => ValidationError,
    /// Create a package error.
    package => PackageError,
}

impl From<image::ImageError> for RmScribeError {
    fn from(e: image::ImageError) -> Self {
        Self::DecodeError(e.to_string())
    }
}

impl From<serde_json::Error> for RmScribeError {
    fn from(e: serde_json::Error) -> Self {
        Self::PackageError(e.to_string())
    }
}

impl From<zip::result::ZipError> for RmScribeError {
    fn from(e: zip::result::ZipError) -> Self {
        Self::PackageError(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, RmScribeError>;
