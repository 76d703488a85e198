// Service exports
pub mod numbeo;

pub use numbeo::{EnrichmentError, IndexClient};
