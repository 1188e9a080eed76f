//*** START FILE: src/parsing/mod.rs ***//
pub mod csv_loader;
pub mod tooltip_text;

// Re-export the entry points used by the session and the chart
pub use csv_loader::{load_records, read_records};
pub use tooltip_text::tooltip_lines;
//*** END FILE: src/parsing/mod.rs ***//
