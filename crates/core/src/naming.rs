//! Cover image file naming.

use std::io;

use uuid::Uuid;

use crate::error::CoreError;

/// Generate a fresh cover image file name: a random UUID followed by the
/// client's original extension.
///
/// The extension is kept as sent. Without one the name is the bare UUID.
pub fn cover_file_name(extension: Option<&str>) -> String {
    build_cover_file_name(Uuid::new_v4(), extension)
}

/// Deterministic half of [`cover_file_name`].
///
/// # Examples
///
/// ```
/// use filmdex_core::naming::build_cover_file_name;
/// use uuid::Uuid;
///
/// let id = Uuid::nil();
/// assert_eq!(
///     build_cover_file_name(id, Some("jpg")),
///     "00000000-0000-0000-0000-000000000000.jpg"
/// );
/// assert_eq!(
///     build_cover_file_name(id, None),
///     "00000000-0000-0000-0000-000000000000"
/// );
/// ```
pub fn build_cover_file_name(id: Uuid, extension: Option<&str>) -> String {
    match extension {
        Some(ext) => format!("{id}.{ext}"),
        None => id.to_string(),
    }
}

/// Whether `name` is a flat file name safe to join onto the store directory.
pub fn is_flat_file_name(name: &str) -> bool {
    !name.is_empty()
        && name != "."
        && name != ".."
        && !name.contains(['/', '\\', '\0'])
}

/// Reject a name that is not flat with an `InvalidInput` I/O error.
///
/// Every [`FileStore`](crate::store::FileStore) applies this before touching a name.
pub fn check_flat_file_name(name: &str) -> Result<(), CoreError> {
    if is_flat_file_name(name) {
        return Ok(());
    }
    Err(CoreError::Io(io::Error::new(
        io::ErrorKind::InvalidInput,
        format!("'{name}' is not a flat file name"),
    )))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preserves_extension_case() {
        let name = build_cover_file_name(Uuid::nil(), Some("PNG"));
        assert!(name.ends_with(".PNG"));
    }

    #[test]
    fn random_names_differ() {
        assert_ne!(cover_file_name(Some("jpg")), cover_file_name(Some("jpg")));
    }

    #[test]
    fn random_name_is_uuid_plus_extension() {
        let name = cover_file_name(Some("gif"));
        let (stem, ext) = name.rsplit_once('.').unwrap();
        assert_eq!(ext, "gif");
        assert!(Uuid::parse_str(stem).is_ok());
    }

    #[test]
    fn flat_names() {
        assert!(is_flat_file_name("abc.jpg"));
        assert!(!is_flat_file_name(""));
        assert!(!is_flat_file_name(".."));
        assert!(!is_flat_file_name("../etc/passwd"));
        assert!(!is_flat_file_name("a\\b.png"));
    }
}
