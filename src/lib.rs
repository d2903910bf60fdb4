//! Search the NASA Image and Video Library and resolve each hit's collection
//! manifest concurrently.

pub mod config;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;

pub use error::{AppError, AppResult};
pub use models::{ItemOutcome, MediaRecord, MediaType, ResultItem, SearchFilters, SearchQuery};
pub use services::{MediaSearchService, MediaTransport, NasaImagesClient};
