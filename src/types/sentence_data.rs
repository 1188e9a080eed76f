//*** START FILE: src/types/sentence_data.rs ***//
use serde::{Deserialize, Deserializer, Serialize};

pub const ACTIVE_LABEL: &str = "Active";
pub const PASSIVE_LABEL: &str = "Passive";

/// An sRGB color, kept free of any UI crate so the data model stays plain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const ACTIVE_BORDER: Rgb = Rgb(0x43, 0xa0, 0x47);
    pub const ACTIVE_FILL: Rgb = Rgb(0x7c, 0xb3, 0x42);
    pub const PASSIVE_BORDER: Rgb = Rgb(0x1e, 0x88, 0xe5);
    pub const PASSIVE_FILL: Rgb = Rgb(0x03, 0x9b, 0xe5);
    pub const EXTENSION_BORDER: Rgb = Rgb(0x8e, 0x24, 0xaa);
    pub const EXTENSION_FILL: Rgb = Rgb(0xd8, 0x1b, 0x60);
    pub const CONNECTOR: Rgb = Rgb(0xf4, 0x51, 0x1e);

    /// Parses `#rrggbb` (the leading `#` is optional).
    pub fn from_hex(hex: &str) -> Result<Self, String> {
        let digits = hex.trim().trim_start_matches('#');
        if digits.len() != 6 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(format!("'{}' is not a #rrggbb color", hex));
        }
        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&digits[range], 16).map_err(|e| format!("'{}': {}", hex, e))
        };
        Ok(Rgb(channel(0..2)?, channel(2..4)?, channel(4..6)?))
    }
}

/// One row of `embeddings.csv`.
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct SentenceRecord {
    #[serde(default)]
    pub active_sentence: String,
    #[serde(default = "missing_coord", deserialize_with = "lenient_coord")]
    pub active_x_coord: f64,
    #[serde(default = "missing_coord", deserialize_with = "lenient_coord")]
    pub active_y_coord: f64,
    #[serde(default)]
    pub passive_sentence: String,
    #[serde(default = "missing_coord", deserialize_with = "lenient_coord")]
    pub passive_x_coord: f64,
    #[serde(default = "missing_coord", deserialize_with = "lenient_coord")]
    pub passive_y_coord: f64,
}

impl SentenceRecord {
    pub fn has_degenerate_coords(&self) -> bool {
        ![
            self.active_x_coord,
            self.active_y_coord,
            self.passive_x_coord,
            self.passive_y_coord,
        ]
        .iter()
        .all(|c| c.is_finite())
    }
}

fn missing_coord() -> f64 {
    f64::NAN
}

// Unparseable cells become NaN instead of failing the whole row.
fn lenient_coord<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw
        .and_then(|s| s.trim().parse::<f64>().ok())
        .unwrap_or(f64::NAN))
}

#[derive(Debug, Clone, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
    pub label: String,
    pub border: Rgb,
    pub fill: Rgb,
}

impl Point {
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeriesKind {
    Active,
    Passive,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    pub name: String,
    pub points: Vec<Point>,
}

impl Series {
    fn new(name: &str) -> Self {
        Self { name: name.to_string(), points: Vec::new() }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// The Active and Passive series. Index `i` of one always pairs with index
/// `i` of the other, so the only way to grow them is [`SeriesPair::push_pair`].
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesPair {
    active: Series,
    passive: Series,
}

impl Default for SeriesPair {
    fn default() -> Self {
        Self::new()
    }
}

impl SeriesPair {
    pub fn new() -> Self {
        Self {
            active: Series::new(ACTIVE_LABEL),
            passive: Series::new(PASSIVE_LABEL),
        }
    }

    pub fn push_pair(&mut self, active: Point, passive: Point) {
        self.active.points.push(active);
        self.passive.points.push(passive);
    }

    pub fn active(&self) -> &Series {
        &self.active
    }

    pub fn passive(&self) -> &Series {
        &self.passive
    }

    pub fn series(&self, kind: SeriesKind) -> &Series {
        match kind {
            SeriesKind::Active => &self.active,
            SeriesKind::Passive => &self.passive,
        }
    }

    pub fn point(&self, kind: SeriesKind, index: usize) -> Option<&Point> {
        self.series(kind).points.get(index)
    }

    pub fn len(&self) -> usize {
        self.active.len()
    }

    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }
}

//*** END FILE: src/types/sentence_data.rs ***//
