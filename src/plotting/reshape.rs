use crate::config::ROW_LIMIT;
use crate::types::sentence_data::{Point, Rgb, SentenceRecord, SeriesPair};

/// Reshapes the first `ROW_LIMIT` records into the Active/Passive series.
pub fn reshape(records: &[SentenceRecord]) -> SeriesPair {
    reshape_with_limit(records, ROW_LIMIT)
}

pub fn reshape_with_limit(records: &[SentenceRecord], limit: usize) -> SeriesPair {
    let mut pair = SeriesPair::new();
    for record in records.iter().take(limit) {
        pair.push_pair(
            Point {
                x: record.active_x_coord,
                y: record.active_y_coord,
                label: record.active_sentence.clone(),
                border: Rgb::ACTIVE_BORDER,
                fill: Rgb::ACTIVE_FILL,
            },
            Point {
                x: record.passive_x_coord,
                y: record.passive_y_coord,
                label: record.passive_sentence.clone(),
                border: Rgb::PASSIVE_BORDER,
                fill: Rgb::PASSIVE_FILL,
            },
        );
    }
    pair
}
