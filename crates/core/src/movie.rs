//! Movie catalog entities and the payloads that flow through the service.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::types::{DbId, MovieId, Timestamp};

/// One catalog entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Movie {
    pub id: MovieId,
    pub title: String,
    pub category_id: DbId,
    pub synopsis: String,
    pub year: i32,
    pub cast: String,
    /// File name inside the cover image store.
    pub cover_image: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A movie category. Read-only from the catalog's point of view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: DbId,
    pub name: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Validated payload for inserting a movie.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewMovie {
    pub id: MovieId,
    pub title: String,
    pub category_id: DbId,
    pub synopsis: String,
    pub year: i32,
    pub cast: String,
    pub cover_image: String,
}

/// Validated payload for updating a movie.
///
/// `cover_image: None` keeps the stored value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MovieChanges {
    pub title: String,
    pub category_id: DbId,
    pub synopsis: String,
    pub year: i32,
    pub cast: String,
    pub cover_image: Option<String>,
}

/// Raw text fields of a create or update form, exactly as submitted.
///
/// Run [`MovieForm::normalized`] before validating so that blank values
/// count as missing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct MovieForm {
    pub id: Option<String>,
    #[validate(
        required(message = "The title field is required."),
        length(max = 255, message = "The title may not be greater than 255 characters.")
    )]
    pub title: Option<String>,
    #[validate(required(message = "The category id field is required."))]
    pub category_id: Option<String>,
    #[validate(required(message = "The synopsis field is required."))]
    pub synopsis: Option<String>,
    #[validate(required(message = "The year field is required."))]
    pub year: Option<String>,
    #[validate(required(message = "The cast field is required."))]
    pub cast: Option<String>,
}

impl MovieForm {
    /// Trim every field and turn blank strings into `None`.
    pub fn normalized(self) -> Self {
        Self {
            id: blank_to_none(self.id),
            title: blank_to_none(self.title),
            category_id: blank_to_none(self.category_id),
            synopsis: blank_to_none(self.synopsis),
            year: blank_to_none(self.year),
            cast: blank_to_none(self.cast),
        }
    }
}

fn blank_to_none(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// An uploaded cover image, held in memory until it is moved into the file store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedFile {
    /// File name as reported by the client.
    pub file_name: String,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

impl UploadedFile {
    /// The client-supplied extension, without the dot and with its case preserved.
    ///
    /// Any directory prefix the client sent is ignored. Returns `None` when
    /// the base name has no extension.
    pub fn extension(&self) -> Option<&str> {
        let base = self
            .file_name
            .rsplit(['/', '\\'])
            .next()
            .unwrap_or(&self.file_name);
        match base.rsplit_once('.') {
            Some((_, ext)) if !ext.is_empty() => Some(ext),
            _ => None,
        }
    }

    /// An upload with no content is treated as no upload at all.
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// Data needed to render the edit form.
#[derive(Debug, Clone, Serialize)]
pub struct EditForm {
    pub movie: Movie,
    pub categories: Vec<Category>,
}
