pub mod chart;
pub mod overlay;
pub mod reshape;

pub use chart::ChartRenderer;
pub use overlay::{ConnectorOverlay, ConnectorStyle, HoverState};
pub use reshape::{reshape, reshape_with_limit};
