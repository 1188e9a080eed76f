//! Hover-pairing overlay: remembers which index the pointer is on and
//! produces the dashed segment joining that index across both series.

use crate::config::ConnectorConfig;
use crate::types::sentence_data::{Rgb, SeriesKind};
use anyhow::Result;
use egui::Pos2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HoverState {
    #[default]
    NoSelection,
    Selected(usize),
}

/// A point under the pointer, as reported by the renderer's hit test.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hit {
    pub series: SeriesKind,
    pub index: usize,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConnectorStyle {
    pub dash: f32,
    pub gap: f32,
    pub color: Rgb,
    pub width: f32,
}

impl Default for ConnectorStyle {
    fn default() -> Self {
        Self { dash: 2.0, gap: 2.0, color: Rgb::CONNECTOR, width: 2.0 }
    }
}

impl ConnectorStyle {
    pub fn from_config(config: &ConnectorConfig) -> Result<Self> {
        Ok(Self {
            dash: config.dash[0],
            gap: config.dash[1],
            color: config.rgb()?,
            width: config.width,
        })
    }
}

/// Screen-space segment to stroke for the current selection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Connector {
    pub from: Pos2,
    pub to: Pos2,
    pub style: ConnectorStyle,
}

#[derive(Debug, Clone, Default)]
pub struct ConnectorOverlay {
    style: ConnectorStyle,
}

impl ConnectorOverlay {
    pub fn new(style: ConnectorStyle) -> Self {
        Self { style }
    }

    /// Pointer event: the new state depends only on this event's hit.
    pub fn after_event(&self, _previous: HoverState, hit: Option<Hit>) -> HoverState {
        match hit {
            Some(hit) => HoverState::Selected(hit.index),
            None => HoverState::NoSelection,
        }
    }

    /// Redraw: `position` maps (series, index) to pixels, or `None` when the
    /// point is not on screen.
    pub fn before_draw<F>(&self, state: HoverState, position: F) -> Option<Connector>
    where
        F: Fn(SeriesKind, usize) -> Option<Pos2>,
    {
        let HoverState::Selected(index) = state else {
            return None;
        };
        let from = position(SeriesKind::Active, index)?;
        let to = position(SeriesKind::Passive, index)?;
        Some(Connector { from, to, style: self.style })
    }
}

/// Nearest candidate whose marker (a disc of `radius` px) contains the
/// pointer. Ties keep the earliest candidate.
pub fn nearest_hit<I>(pointer: Pos2, candidates: I, radius: f32) -> Option<Hit>
where
    I: IntoIterator<Item = (Hit, Pos2)>,
{
    let mut best: Option<(Hit, f32)> = None;
    for (hit, pos) in candidates {
        let dist = pos.distance(pointer);
        // NaN distance never counts as inside
        if !(dist <= radius) {
            continue;
        }
        if best.map_or(true, |(_, best_dist)| dist < best_dist) {
            best = Some((hit, dist));
        }
    }
    best.map(|(hit, _)| hit)
}
