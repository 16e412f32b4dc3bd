//! Movie form validation.
//!
//! [`validate_movie_form`] applies every rule that can be decided from the
//! submitted values alone: required fields, lengths, integer parsing and the
//! cover image constraints. Rules that need the store (id uniqueness, the
//! category reference) are added by the service on top of the returned
//! [`FieldErrors`].

use std::collections::BTreeMap;
use std::fmt;

use image::ImageFormat;
use serde::Serialize;
use validator::Validate;

use crate::movie::{MovieForm, UploadedFile};
use crate::types::DbId;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Maximum length, in characters, of a movie id and title.
pub const MAX_STRING_LENGTH: usize = 255;

/// Maximum cover image size in kilobytes.
pub const MAX_COVER_KILOBYTES: usize = 2048;

/// Extensions accepted for cover images (compared case-insensitively).
pub const ALLOWED_COVER_EXTENSIONS: &[&str] = &["jpeg", "png", "jpg", "gif", "svg"];

pub const MSG_ID_REQUIRED: &str = "The id field is required.";
pub const MSG_ID_TOO_LONG: &str = "The id may not be greater than 255 characters.";
pub const MSG_ID_TAKEN: &str = "The id has already been taken.";
pub const MSG_CATEGORY_NOT_INTEGER: &str = "The category id must be an integer.";
pub const MSG_CATEGORY_INVALID: &str = "The selected category id is invalid.";
pub const MSG_YEAR_NOT_INTEGER: &str = "The year must be an integer.";
pub const MSG_COVER_REQUIRED: &str = "The cover image field is required.";
pub const MSG_COVER_NOT_IMAGE: &str = "The cover image must be an image.";
pub const MSG_COVER_BAD_TYPE: &str =
    "The cover image must be a file of type: jpeg, png, jpg, gif, svg.";
pub const MSG_COVER_TOO_LARGE: &str = "The cover image may not be greater than 2048 kilobytes.";

// ---------------------------------------------------------------------------
// Field errors
// ---------------------------------------------------------------------------

/// Validation messages grouped by form field, in field-name order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<String, Vec<String>>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a message for `field`.
    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.0
            .entry(field.to_string())
            .or_default()
            .push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Whether `field` already has at least one message.
    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    /// Messages recorded for `field`, if any.
    pub fn get(&self, field: &str) -> Option<&[String]> {
        self.0.get(field).map(Vec::as_slice)
    }

    /// Names of the fields that failed, in order.
    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, messages) in &self.0 {
            for message in messages {
                if !first {
                    f.write_str("; ")?;
                }
                write!(f, "{field}: {message}")?;
                first = false;
            }
        }
        Ok(())
    }
}

impl From<validator::ValidationErrors> for FieldErrors {
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut out = FieldErrors::new();
        for (field, errs) in errors.field_errors() {
            let field = field.to_string();
            for err in errs {
                let message = err
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("The {field} field is invalid ({}).", err.code));
                out.add(&field, message);
            }
        }
        out
    }
}

// ---------------------------------------------------------------------------
// Form rules
// ---------------------------------------------------------------------------

/// Which use case a form is being checked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    /// `id` and a cover image are required.
    Create,
    /// `id` is ignored and the cover image is optional.
    Update,
}

/// Form fields that passed the static rules, parsed into domain types.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MovieFields {
    /// Present for [`FormMode::Create`] only.
    pub id: Option<String>,
    pub title: String,
    pub category_id: DbId,
    pub synopsis: String,
    pub year: i32,
    pub cast: String,
}

/// Check a normalized form (see [`MovieForm::normalized`]) against the
/// static rules.
///
/// On success the parsed fields are returned; otherwise every failing rule
/// is reported at once.
pub fn validate_movie_form(
    form: &MovieForm,
    mode: FormMode,
    cover: Option<&UploadedFile>,
) -> Result<MovieFields, FieldErrors> {
    let mut errors = match form.validate() {
        Ok(()) => FieldErrors::new(),
        Err(e) => FieldErrors::from(e),
    };

    if mode == FormMode::Create {
        match form.id.as_deref() {
            None => errors.add("id", MSG_ID_REQUIRED),
            Some(id) if id.chars().count() > MAX_STRING_LENGTH => {
                errors.add("id", MSG_ID_TOO_LONG)
            }
            Some(_) => {}
        }
    }

    let category_id = parse_integer::<DbId>(form.category_id.as_deref());
    if form.category_id.is_some() && category_id.is_none() {
        errors.add("category_id", MSG_CATEGORY_NOT_INTEGER);
    }

    let year = parse_integer::<i32>(form.year.as_deref());
    if form.year.is_some() && year.is_none() {
        errors.add("year", MSG_YEAR_NOT_INTEGER);
    }

    let cover = cover.filter(|f| !f.is_empty());
    match cover {
        Some(file) => validate_cover_image(file, &mut errors),
        None if mode == FormMode::Create => errors.add("cover_image", MSG_COVER_REQUIRED),
        None => {}
    }

    match (
        form.title.clone(),
        category_id,
        form.synopsis.clone(),
        year,
        form.cast.clone(),
    ) {
        (Some(title), Some(category_id), Some(synopsis), Some(year), Some(cast))
            if errors.is_empty() =>
        {
            Ok(MovieFields {
                id: match mode {
                    FormMode::Create => form.id.clone(),
                    FormMode::Update => None,
                },
                title,
                category_id,
                synopsis,
                year,
                cast,
            })
        }
        _ => Err(errors),
    }
}

/// Parse an optional integer field. `None` when absent or not an integer.
pub fn parse_integer<T: std::str::FromStr>(value: Option<&str>) -> Option<T> {
    value.and_then(|v| v.parse::<T>().ok())
}

// ---------------------------------------------------------------------------
// Cover image rules
// ---------------------------------------------------------------------------

fn validate_cover_image(file: &UploadedFile, errors: &mut FieldErrors) {
    let sniffed = sniff_image_format(&file.bytes);
    if sniffed.is_none() {
        errors.add("cover_image", MSG_COVER_NOT_IMAGE);
    }

    let extension_allowed = file
        .extension()
        .map(|ext| ext.to_ascii_lowercase())
        .is_some_and(|ext| ALLOWED_COVER_EXTENSIONS.contains(&ext.as_str()));
    let content_allowed = sniffed.map_or(true, ImageKind::is_allowed);
    if !extension_allowed || !content_allowed {
        errors.add("cover_image", MSG_COVER_BAD_TYPE);
    }

    if file.bytes.len() > MAX_COVER_KILOBYTES * 1024 {
        errors.add("cover_image", MSG_COVER_TOO_LARGE);
    }
}

/// Image kinds recognized from file content.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageKind {
    Jpeg,
    Png,
    Gif,
    Svg,
    /// A raster format outside the accepted set (webp, bmp, ...).
    Other,
}

impl ImageKind {
    pub fn is_allowed(self) -> bool {
        !matches!(self, ImageKind::Other)
    }
}

/// Identify an image from its leading bytes. `None` if it is not an image.
pub fn sniff_image_format(bytes: &[u8]) -> Option<ImageKind> {
    if looks_like_svg(bytes) {
        return Some(ImageKind::Svg);
    }
    match image::guess_format(bytes).ok()? {
        ImageFormat::Jpeg => Some(ImageKind::Jpeg),
        ImageFormat::Png => Some(ImageKind::Png),
        ImageFormat::Gif => Some(ImageKind::Gif),
        _ => Some(ImageKind::Other),
    }
}

fn looks_like_svg(bytes: &[u8]) -> bool {
    let head = &bytes[..bytes.len().min(1024)];
    let text = String::from_utf8_lossy(head).to_ascii_lowercase();
    let text = text.trim_start_matches('\u{feff}').trim_start();

    if text.starts_with("<svg") {
        return true;
    }
    (text.starts_with("<?xml") || text.starts_with("<!doctype svg") || text.starts_with("<!--"))
        && text.contains("<svg")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
