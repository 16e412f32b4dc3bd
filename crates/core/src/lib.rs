//! Core domain for the filmdex movie catalog.
//!
//! Holds the movie and category types, form validation, paging, the
//! storage and file store collaborator traits (with local and in-memory
//! implementations), and the [`service::MovieService`] that orchestrates
//! every catalog use case. Has no dependency on the database or HTTP layer.

pub mod error;
pub mod files;
pub mod memory;
pub mod movie;
pub mod naming;
pub mod pagination;
pub mod search;
pub mod service;
pub mod store;
pub mod types;
pub mod validation;
