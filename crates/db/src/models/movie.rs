//! Movie model.

use filmdex_core::movie::Movie;
use filmdex_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// A row from the `movies` table.
#[derive(Debug, Clone, FromRow)]
pub struct MovieRow {
    pub id: String,
    pub title: String,
    pub category_id: DbId,
    pub synopsis: String,
    pub year: i32,
    #[sqlx(rename = "cast_members")]
    pub cast: String,
    pub cover_image: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl From<MovieRow> for Movie {
    fn from(row: MovieRow) -> Self {
        Movie {
            id: row.id,
            title: row.title,
            category_id: row.category_id,
            synopsis: row.synopsis,
            year: row.year,
            cast: row.cast,
            cover_image: row.cover_image,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn row_converts_field_for_field() {
        let now = chrono::Utc::now();
        let row = MovieRow {
            id: "m1".into(),
            title: "Inception".into(),
            category_id: 1,
            synopsis: "A thief...".into(),
            year: 2010,
            cast: "Leonardo DiCaprio".into(),
            cover_image: "abc.jpg".into(),
            created_at: now,
            updated_at: now,
        };

        let movie = Movie::from(row);
        assert_eq!(movie.id, "m1");
        assert_eq!(movie.cast, "Leonardo DiCaprio");
        assert_eq!(movie.cover_image, "abc.jpg");
        assert_eq!(movie.created_at, now);
    }
}
