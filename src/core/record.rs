// Greeting record payloads and creator-side validation.

use serde::{Deserialize, Serialize};

pub const NAME_MIN: usize = 2;
pub const NAME_MAX: usize = 20;
pub const MAX_IMAGES: usize = 3;
pub const MAX_IMAGE_BYTES: u64 = 5 * 1024 * 1024;

/// Row shape sent on insert.
#[derive(Debug, Clone, Serialize)]
pub struct NewGreeting {
    pub unique_code: String,
    pub partner_name: String,
    pub creator_name: String,
    pub image_urls: Vec<String>,
    pub view_count: u32,
}

/// Row shape returned by the backend.
#[derive(Debug, Clone, Deserialize)]
pub struct GreetingRecord {
    pub id: i64,
    pub unique_code: String,
    pub partner_name: String,
    pub creator_name: String,
    pub image_urls: Vec<String>,
    pub view_count: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("name must be {min} to {max} characters, got {found}")]
    NameLength {
        min: usize,
        max: usize,
        found: usize,
    },
    #[error("at most {max} photos allowed, got {found}")]
    TooManyImages { max: usize, found: usize },
    #[error("photo {index} is {size} bytes, limit is {limit}")]
    ImageTooLarge { index: usize, size: u64, limit: u64 },
    #[error("photo {index} has unsupported type {mime:?}")]
    UnsupportedImageType { index: usize, mime: String },
}

/// Trimmed name of acceptable length, or a typed error.
pub fn validate_name(name: &str) -> Result<&str, ValidationError> {
    let trimmed = name.trim();
    let found = trimmed.chars().count();
    if !(NAME_MIN..=NAME_MAX).contains(&found) {
        return Err(ValidationError::NameLength {
            min: NAME_MIN,
            max: NAME_MAX,
            found,
        });
    }
    Ok(trimmed)
}

pub fn validate_image_count(found: usize) -> Result<(), ValidationError> {
    if found > MAX_IMAGES {
        return Err(ValidationError::TooManyImages {
            max: MAX_IMAGES,
            found,
        });
    }
    Ok(())
}

/// Size and content-type check for one photo; returns the storage extension.
pub fn validate_image(index: usize, size: u64, mime: &str) -> Result<&'static str, ValidationError> {
    if size > MAX_IMAGE_BYTES {
        return Err(ValidationError::ImageTooLarge {
            index,
            size,
            limit: MAX_IMAGE_BYTES,
        });
    }
    ext_for_mime(mime).ok_or_else(|| ValidationError::UnsupportedImageType {
        index,
        mime: mime.to_owned(),
    })
}

#[inline]
pub fn ext_for_mime(mime: &str) -> Option<&'static str> {
    match mime {
        "image/png" => Some("png"),
        "image/jpeg" | "image/jpg" => Some("jpg"),
        "image/webp" => Some("webp"),
        "image/gif" => Some("gif"),
        _ => None,
    }
}

/// Storage key for an uploaded photo: `{code}/{index}.{ext}`.
pub fn object_path(code: &str, index: usize, ext: &str) -> String {
    format!("{code}/{index}.{ext}")
}
