//*** START FILE: src/lib.rs ***//

pub mod config;
pub mod logger;
pub mod types {
    pub mod sentence_data;
}
pub mod parsing;
pub mod plotting;
pub mod remote;
pub mod session;

pub use config::Config;
pub use session::Session;
pub use types::sentence_data::{Point, Rgb, SentenceRecord, Series, SeriesKind, SeriesPair};

//*** END FILE: src/lib.rs ***//
