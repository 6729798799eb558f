pub mod apod_api;
pub mod traits;

pub use apod_api::ApodApiSource;
pub use traits::RecordSource;
