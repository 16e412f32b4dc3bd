use crate::validation::FieldErrors;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: String },

    #[error("Validation failed: {0}")]
    Validation(FieldErrors),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("File store error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl CoreError {
    /// Shorthand for a missing movie.
    pub fn movie_not_found(id: &str) -> Self {
        Self::NotFound {
            entity: "Movie",
            id: id.to_string(),
        }
    }
}
