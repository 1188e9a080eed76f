use crate::logger;
use crate::types::sentence_data::SentenceRecord;
use anyhow::{bail, Context, Result};
use std::fs::File;
use std::io::Read;
use std::path::Path;

const REQUIRED_COLUMNS: [&str; 6] = [
    "active_sentence",
    "active_x_coord",
    "active_y_coord",
    "passive_sentence",
    "passive_x_coord",
    "passive_y_coord",
];

/// Loads every row of an embeddings CSV. Truncation to the display cap
/// happens later, in the reshaper.
pub fn load_records(path: &Path) -> Result<Vec<SentenceRecord>> {
    let file = File::open(path)
        .with_context(|| format!("Failed to open embeddings file {}", path.display()))?;
    let records = read_records(file)
        .with_context(|| format!("Failed to read embeddings file {}", path.display()))?;
    logger::debug(&format!("Loaded {} rows from {}", records.len(), path.display()));
    Ok(records)
}

pub fn read_records<R: Read>(reader: R) -> Result<Vec<SentenceRecord>> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::Headers)
        .from_reader(reader);

    let headers = csv_reader.headers().context("Missing header row")?.clone();
    let missing: Vec<&str> = REQUIRED_COLUMNS
        .iter()
        .copied()
        .filter(|col| !headers.iter().any(|h| h == *col))
        .collect();
    if missing.len() == REQUIRED_COLUMNS.len() {
        bail!("Header row has none of the expected columns ({})", REQUIRED_COLUMNS.join(", "));
    } else if !missing.is_empty() {
        logger::warn(&format!("Embeddings file is missing columns: {}", missing.join(", ")));
    }

    let mut records = Vec::new();
    let mut degenerate = 0usize;
    for (row, result) in csv_reader.records().enumerate() {
        let mut raw = result.with_context(|| format!("Unreadable row {}", row + 1))?;
        // short rows: absent trailing cells read as empty, i.e. NaN coordinates
        while raw.len() < headers.len() {
            raw.push_field("");
        }
        let record: SentenceRecord = raw
            .deserialize(Some(&headers))
            .with_context(|| format!("Malformed row {}", row + 1))?;
        if record.has_degenerate_coords() {
            degenerate += 1;
        }
        records.push(record);
    }

    if degenerate > 0 {
        logger::warn(&format!(
            "{} row(s) have missing or non-numeric coordinates; they will not be drawn",
            degenerate
        ));
    }
    Ok(records)
}
