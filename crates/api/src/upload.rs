//! Multipart parsing for the movie create and update forms.

use axum::extract::multipart::MultipartError;
use axum::extract::Multipart;
use axum::http::StatusCode;
use filmdex_core::movie::{MovieForm, UploadedFile};
use filmdex_core::validation::{FieldErrors, MSG_COVER_TOO_LARGE};

use crate::error::{AppError, AppResult};

/// Multipart field carrying the cover image file.
pub const COVER_FIELD: &str = "cover_image";

/// Text fields copied into [`MovieForm`].
const TEXT_FIELDS: &[&str] = &["id", "title", "category_id", "synopsis", "year", "cast"];

/// A decoded movie form submission.
#[derive(Debug, Default)]
pub struct MovieSubmission {
    pub form: MovieForm,
    pub cover: Option<UploadedFile>,
}

/// Read every part of a movie form.
///
/// Text parts fill the matching [`MovieForm`] field, the `cover_image` part
/// becomes the upload and unknown parts are ignored. A body over the size
/// limit is reported against the cover, since it is the only part that can
/// get that large. Any other malformed body, or a text part that is not
/// UTF-8, is a bad request.
pub async fn read_movie_form(mut multipart: Multipart) -> AppResult<MovieSubmission> {
    let mut submission = MovieSubmission::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| multipart_error(e, &submission.form))?
    {
        let name = field.name().unwrap_or("").to_string();

        if name == COVER_FIELD {
            let file_name = field.file_name().unwrap_or("").to_string();
            let content_type = field.content_type().map(str::to_string);
            let bytes = field
                .bytes()
                .await
                .map_err(|e| multipart_error(e, &submission.form))?;
            submission.cover = Some(UploadedFile {
                file_name,
                content_type,
                bytes: bytes.to_vec(),
            });
            continue;
        }

        if !TEXT_FIELDS.contains(&name.as_str()) {
            continue;
        }
        let text = field
            .text()
            .await
            .map_err(|e| multipart_error(e, &submission.form))?;
        set_text_field(&mut submission.form, &name, text);
    }

    Ok(submission)
}

fn set_text_field(form: &mut MovieForm, name: &str, value: String) {
    let slot = match name {
        "id" => &mut form.id,
        "title" => &mut form.title,
        "category_id" => &mut form.category_id,
        "synopsis" => &mut form.synopsis,
        "year" => &mut form.year,
        "cast" => &mut form.cast,
        _ => return,
    };
    *slot = Some(value);
}

/// Map a multipart read failure, keeping whatever text was read so far.
fn multipart_error(err: MultipartError, form: &MovieForm) -> AppError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        let mut errors = FieldErrors::new();
        errors.add(COVER_FIELD, MSG_COVER_TOO_LARGE);
        return AppError::InvalidForm {
            errors,
            old_input: form.clone(),
        };
    }
    AppError::BadRequest(err.to_string())
}
