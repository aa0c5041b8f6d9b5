//! Gallery rules: category/image field validation, upload labelling
//! defaults, and the `src` representation shared by every image.

use base64::engine::general_purpose::STANDARD as BASE64_STANDARD;
use base64::Engine;
use chrono::Datelike;
use mime_guess::mime::Mime;

use crate::error::CoreError;

/// Maximum length of a category id or name (`VARCHAR(255)` columns).
pub const MAX_CATEGORY_FIELD_LEN: usize = 255;

/// Maximum length of an image `alt` / `title` (`VARCHAR(255)` columns).
pub const MAX_IMAGE_LABEL_LEN: usize = 255;

/// Maximum length of an image `date` label (`VARCHAR(50)` column).
pub const MAX_IMAGE_DATE_LEN: usize = 50;

/// Content type used when neither the upload nor its filename tells us one.
pub const FALLBACK_CONTENT_TYPE: &str = "application/octet-stream";

const DATA_URL_PREFIX: &str = "data:";
const BASE64_MARKER: &str = ";base64,";

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// Validate a category id: non-empty and within the column bound.
///
/// The id is an opaque user-chosen identifier; nothing else is checked.
pub fn validate_category_id(id: &str) -> Result<(), CoreError> {
    if id.trim().is_empty() {
        return Err(CoreError::Validation("Category id is required".into()));
    }
    if id.len() > MAX_CATEGORY_FIELD_LEN {
        return Err(CoreError::Validation(format!(
            "Category id must be at most {MAX_CATEGORY_FIELD_LEN} characters"
        )));
    }
    Ok(())
}

/// Validate a category name: non-empty and within the column bound.
pub fn validate_category_name(name: &str) -> Result<(), CoreError> {
    if name.trim().is_empty() {
        return Err(CoreError::Validation("Category name is required".into()));
    }
    if name.len() > MAX_CATEGORY_FIELD_LEN {
        return Err(CoreError::Validation(format!(
            "Category name must be at most {MAX_CATEGORY_FIELD_LEN} characters"
        )));
    }
    Ok(())
}

/// Validate the free-text labels attached to an image.
pub fn validate_image_labels(alt: &str, title: &str, date: &str) -> Result<(), CoreError> {
    if alt.len() > MAX_IMAGE_LABEL_LEN || title.len() > MAX_IMAGE_LABEL_LEN {
        return Err(CoreError::Validation(format!(
            "Image alt and title must be at most {MAX_IMAGE_LABEL_LEN} characters"
        )));
    }
    if date.len() > MAX_IMAGE_DATE_LEN {
        return Err(CoreError::Validation(format!(
            "Image date must be at most {MAX_IMAGE_DATE_LEN} characters"
        )));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Upload defaults
// ---------------------------------------------------------------------------

/// Strip the final extension from an uploaded filename.
///
/// Any client-side directory prefix is dropped first. Dotfiles such as
/// `.hidden` keep their name.
pub fn filename_stem(filename: &str) -> &str {
    let base = filename.rsplit(&['/', '\\'][..]).next().unwrap_or(filename);
    match base.rfind('.') {
        Some(0) | None => base,
        Some(idx) => &base[..idx],
    }
}

/// The default `date` label for an upload: the current year.
pub fn default_image_date() -> String {
    chrono::Utc::now().year().to_string()
}

/// Treat empty or whitespace-only form values as absent.
pub fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Resolved labels for an uploaded image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadLabels {
    pub title: String,
    pub alt: String,
    pub date: String,
}

/// Apply the upload defaults: `title`/`alt` fall back to the filename stem,
/// `date` falls back to the current year.
pub fn resolve_upload_labels(
    filename: Option<&str>,
    title: Option<String>,
    alt: Option<String>,
    date: Option<String>,
) -> UploadLabels {
    let stem = filename.map(filename_stem).unwrap_or_default().to_string();
    UploadLabels {
        title: non_blank(title).unwrap_or_else(|| stem.clone()),
        alt: non_blank(alt).unwrap_or(stem),
        date: non_blank(date).unwrap_or_else(default_image_date),
    }
}

/// Decide the content type of an upload: declared type first, then a guess
/// from the filename, then [`FALLBACK_CONTENT_TYPE`].
///
/// A declared type is reduced to its essence (`type/subtype`, no
/// parameters); one that does not parse as a MIME type is ignored.
pub fn resolve_content_type(declared: Option<&str>, filename: Option<&str>) -> String {
    if let Some(mime) = declared.and_then(|d| d.trim().parse::<Mime>().ok()) {
        return mime.essence_str().to_string();
    }
    filename
        .and_then(|f| mime_guess::from_path(f).first())
        .map(|m| m.essence_str().to_string())
        .unwrap_or_else(|| FALLBACK_CONTENT_TYPE.to_string())
}

// ---------------------------------------------------------------------------
// Image source
// ---------------------------------------------------------------------------

/// Encode bytes as `data:<content_type>;base64,<payload>`.
pub fn encode_data_url(content_type: &str, bytes: &[u8]) -> String {
    format!(
        "{DATA_URL_PREFIX}{content_type}{BASE64_MARKER}{}",
        BASE64_STANDARD.encode(bytes)
    )
}

/// The two shapes an image `src` can take.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageSource<'a> {
    /// Bytes embedded in the row as a base64 data URL.
    Embedded {
        content_type: &'a str,
        payload: &'a str,
    },
    /// A URL or path resolved by the client.
    External(&'a str),
}

impl<'a> ImageSource<'a> {
    /// Classify a stored `src` value.
    pub fn classify(src: &'a str) -> Self {
        src.strip_prefix(DATA_URL_PREFIX)
            .and_then(|rest| rest.split_once(BASE64_MARKER))
            .map_or(ImageSource::External(src), |(content_type, payload)| {
                ImageSource::Embedded {
                    content_type,
                    payload,
                }
            })
    }

    /// Decode the embedded bytes. Returns `None` for external sources.
    pub fn decode(&self) -> Option<Result<Vec<u8>, CoreError>> {
        match self {
            ImageSource::Embedded { payload, .. } => Some(
                BASE64_STANDARD
                    .decode(payload)
                    .map_err(|e| CoreError::Validation(format!("Invalid base64 payload: {e}"))),
            ),
            ImageSource::External(_) => None,
        }
    }
}
