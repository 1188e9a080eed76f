pub mod embedding_client;
pub mod extender;

pub use embedding_client::{EmbeddingResponse, EmbeddingService, HttpEmbeddingService};
pub use extender::{extend, LookupRequest, PendingLookup};
