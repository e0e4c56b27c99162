pub mod client;
pub mod error;
pub(crate) mod retry;
pub mod source;

pub use client::CatalogClient;
pub use error::CatalogError;
pub use source::CatalogSource;
