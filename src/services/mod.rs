pub mod providers;
pub mod search;

pub use providers::{MediaTransport, NasaImagesClient};
pub use search::MediaSearchService;
