use crate::parsing::tooltip_text::tooltip_lines;
use crate::plotting::overlay::{nearest_hit, Connector, ConnectorOverlay, Hit, HoverState};
use crate::types::sentence_data::{Rgb, Series, SeriesKind, SeriesPair};
use egui::{Color32, Pos2, Shape, Stroke};
use egui_plot::{
    Corner, Legend, MarkerShape, Plot, PlotMemory, PlotPoint, PlotPoints, PlotTransform, Points,
};

pub const PLOT_ID: &str = "sentences";
const MARKER_RADIUS: f32 = 4.0;
const BORDER_WIDTH: f32 = 1.0;
// Pointer slack around a marker that still counts as a hit.
const HIT_SLACK: f32 = 1.0;

pub fn to_color32(rgb: Rgb) -> Color32 {
    Color32::from_rgb(rgb.0, rgb.1, rgb.2)
}

/// Sets every text style to `size` points (small text a quarter smaller).
pub fn apply_font_size(ctx: &egui::Context, size: f32) {
    let mut style = (*ctx.style()).clone();
    for (text_style, font_id) in style.text_styles.iter_mut() {
        font_id.size = match text_style {
            egui::TextStyle::Small => size * 0.75,
            _ => size,
        };
    }
    ctx.set_style(style);
}

/// Points of one series that share a border/fill pair, drawable as one item.
#[derive(Debug, Clone, PartialEq)]
pub struct StyleGroup {
    pub border: Rgb,
    pub fill: Rgb,
    pub coords: Vec<[f64; 2]>,
}

/// Groups a series' drawable points by style, in first-seen order.
/// Non-finite points are left out.
pub fn style_groups(series: &Series) -> Vec<StyleGroup> {
    let mut groups: Vec<StyleGroup> = Vec::new();
    for point in series.points.iter().filter(|p| p.is_finite()) {
        match groups.iter_mut().find(|g| g.border == point.border && g.fill == point.fill) {
            Some(group) => group.coords.push([point.x, point.y]),
            None => groups.push(StyleGroup {
                border: point.border,
                fill: point.fill,
                coords: vec![[point.x, point.y]],
            }),
        }
    }
    groups
}

fn screen_position(
    series: &SeriesPair,
    transform: &PlotTransform,
    kind: SeriesKind,
    index: usize,
) -> Option<Pos2> {
    let point = series.point(kind, index).filter(|p| p.is_finite())?;
    Some(transform.position_from_point(&PlotPoint::new(point.x, point.y)))
}

/// Candidates for the hit test: finite points of series not hidden via the legend.
fn hit_candidates<'a>(
    series: &'a SeriesPair,
    transform: &'a PlotTransform,
    visible: [bool; 2],
) -> impl Iterator<Item = (Hit, Pos2)> + 'a {
    [SeriesKind::Active, SeriesKind::Passive]
        .into_iter()
        .zip(visible)
        .filter(|(_, shown)| *shown)
        .flat_map(move |(kind, _)| {
            (0..series.series(kind).len()).filter_map(move |index| {
                screen_position(series, transform, kind, index)
                    .map(|pos| (Hit { series: kind, index }, pos))
            })
        })
}

pub fn connector_shapes(connector: &Connector) -> Vec<Shape> {
    let style = connector.style;
    let stroke = Stroke::new(style.width, to_color32(style.color));
    if style.dash <= 0.0 || style.gap <= 0.0 {
        return vec![Shape::line_segment([connector.from, connector.to], stroke)];
    }
    Shape::dashed_line(&[connector.from, connector.to], stroke, style.dash, style.gap)
}

/// Draws the scatter plot and runs the hover overlay against it.
pub struct ChartRenderer {
    overlay: ConnectorOverlay,
    hover: HoverState,
}

impl ChartRenderer {
    pub fn new(overlay: ConnectorOverlay) -> Self {
        Self { overlay, hover: HoverState::NoSelection }
    }

    /// Index currently joined by the connector, if any.
    pub fn hover_state(&self) -> HoverState {
        self.hover
    }

    /// Forgets the hovered index, e.g. after the series were replaced.
    pub fn reset_hover(&mut self) {
        self.hover = HoverState::NoSelection;
    }

    /// Draws one frame of the chart and returns the plot-to-screen mapping
    /// it was drawn with.
    pub fn show(&mut self, ui: &mut egui::Ui, series: &SeriesPair) -> PlotTransform {
        // legend visibility lives in the plot memory under this id
        let plot_id = ui.make_persistent_id(PLOT_ID);
        let plot = Plot::new(PLOT_ID)
            .id(plot_id)
            .legend(Legend::default().position(Corner::LeftTop))
            .show_x(false)
            .show_y(false);

        let plot_response = plot.show(ui, |plot_ui| {
            for kind in [SeriesKind::Active, SeriesKind::Passive] {
                let s = series.series(kind);
                for group in style_groups(s) {
                    plot_ui.points(
                        Points::new(PlotPoints::new(group.coords.clone()))
                            .shape(MarkerShape::Circle)
                            .filled(true)
                            .radius(MARKER_RADIUS)
                            .color(to_color32(group.border))
                            .name(&s.name),
                    );
                    plot_ui.points(
                        Points::new(PlotPoints::new(group.coords))
                            .shape(MarkerShape::Circle)
                            .filled(true)
                            .radius(MARKER_RADIUS - BORDER_WIDTH)
                            .color(to_color32(group.fill))
                            .name(&s.name),
                    );
                }
            }
        });

        let transform = plot_response.transform;
        let hidden = PlotMemory::load(ui.ctx(), plot_id).map(|mem| mem.hidden_items);
        let visible = [SeriesKind::Active, SeriesKind::Passive].map(|kind| {
            let name = &series.series(kind).name;
            hidden.as_ref().map_or(true, |h| !h.contains(name))
        });

        let hit = plot_response.response.hover_pos().and_then(|pointer| {
            nearest_hit(
                pointer,
                hit_candidates(series, &transform, visible),
                MARKER_RADIUS + HIT_SLACK,
            )
        });

        self.hover = self.overlay.after_event(self.hover, hit);
        // no connector to a point in a hidden series
        let connector = self.overlay.before_draw(self.hover, |kind, index| {
            let shown = visible[kind as usize];
            screen_position(series, &transform, kind, index).filter(|_| shown)
        });
        if let Some(connector) = connector {
            ui.painter_at(plot_response.response.rect)
                .extend(connector_shapes(&connector));
        }

        let Some(hit) = hit else {
            return transform;
        };
        if let Some(point) = series.point(hit.series, hit.index) {
            let title = series.series(hit.series).name.clone();
            let lines = tooltip_lines(&point.label);
            plot_response.response.on_hover_ui_at_pointer(|ui| {
                ui.strong(title);
                for line in &lines {
                    ui.label(line);
                }
            });
        }
        transform
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plotting::overlay::ConnectorStyle;
    use crate::types::sentence_data::Point;
    use egui::pos2;

    fn point(x: f64, border: Rgb, fill: Rgb) -> Point {
        Point { x, y: x, label: String::new(), border, fill }
    }

    #[test]
    fn groups_points_by_style_and_skips_nan() {
        let series = Series {
            name: "Active".into(),
            points: vec![
                point(1.0, Rgb::ACTIVE_BORDER, Rgb::ACTIVE_FILL),
                point(f64::NAN, Rgb::ACTIVE_BORDER, Rgb::ACTIVE_FILL),
                point(2.0, Rgb::ACTIVE_BORDER, Rgb::ACTIVE_FILL),
                point(3.0, Rgb::EXTENSION_BORDER, Rgb::EXTENSION_FILL),
            ],
        };
        let groups = style_groups(&series);

        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].coords, vec![[1.0, 1.0], [2.0, 2.0]]);
        assert_eq!(groups[1].fill, Rgb::EXTENSION_FILL);
        assert_eq!(groups[1].coords, vec![[3.0, 3.0]]);
    }

    #[test]
    fn connector_is_dashed_unless_pattern_is_empty() {
        let dashed = Connector {
            from: pos2(0.0, 0.0),
            to: pos2(40.0, 0.0),
            style: ConnectorStyle::default(),
        };
        assert!(connector_shapes(&dashed).len() > 1);

        let solid = Connector {
            style: ConnectorStyle { dash: 0.0, gap: 0.0, ..ConnectorStyle::default() },
            ..dashed
        };
        assert_eq!(connector_shapes(&solid).len(), 1);
    }

    #[test]
    fn colors_convert_channel_for_channel() {
        assert_eq!(to_color32(Rgb::CONNECTOR), Color32::from_rgb(0xf4, 0x51, 0x1e));
    }

    // Headless frames: a plot filling an 800x600 screen, driven by pointer events.

    const CONNECTOR_COLOR: Color32 = Color32::from_rgb(0xf4, 0x51, 0x1e);

    struct Frame {
        transform: PlotTransform,
        plot_id: egui::Id,
        connector_drawn: bool,
    }

    fn run_frame(
        ctx: &egui::Context,
        chart: &mut ChartRenderer,
        series: &SeriesPair,
        events: Vec<egui::Event>,
    ) -> Frame {
        let input = egui::RawInput {
            screen_rect: Some(egui::Rect::from_min_size(Pos2::ZERO, egui::vec2(800.0, 600.0))),
            events,
            ..Default::default()
        };
        let mut drawn = None;
        let output = ctx.run(input, |ctx| {
            egui::CentralPanel::default().show(ctx, |ui| {
                let plot_id = ui.make_persistent_id(PLOT_ID);
                drawn = Some((chart.show(ui, series), plot_id));
            });
        });
        let (transform, plot_id) = drawn.expect("central panel did not run");
        let connector_drawn = output.shapes.iter().any(|clipped| {
            matches!(&clipped.shape, Shape::LineSegment { stroke, .. } if stroke.color == CONNECTOR_COLOR)
        });
        Frame { transform, plot_id, connector_drawn }
    }

    /// Moves the pointer onto a data coordinate and lets egui settle.
    fn hover_at(
        ctx: &egui::Context,
        chart: &mut ChartRenderer,
        series: &SeriesPair,
        x: f64,
        y: f64,
    ) -> Frame {
        let layout = run_frame(ctx, chart, series, Vec::new());
        let target = layout.transform.position_from_point(&PlotPoint::new(x, y));
        run_frame(ctx, chart, series, vec![egui::Event::PointerMoved(target)]);
        run_frame(ctx, chart, series, Vec::new())
    }

    fn pair_of(active: &[(f64, f64)], passive: &[(f64, f64)]) -> SeriesPair {
        let mut pair = SeriesPair::new();
        for (a, p) in active.iter().zip(passive) {
            let make = |(x, y): (f64, f64)| Point {
                x,
                y,
                label: "the quick brown fox".into(),
                border: Rgb::ACTIVE_BORDER,
                fill: Rgb::ACTIVE_FILL,
            };
            pair.push_pair(make(*a), make(*p));
        }
        pair
    }

    #[test]
    fn hovering_a_point_selects_it_and_draws_connector() {
        let ctx = egui::Context::default();
        let mut chart = ChartRenderer::new(ConnectorOverlay::default());
        let series = pair_of(&[(0.0, 0.0), (10.0, 10.0)], &[(5.0, 5.0), (2.0, 8.0)]);

        let before = run_frame(&ctx, &mut chart, &series, Vec::new());
        assert_eq!(chart.hover_state(), HoverState::NoSelection);
        assert!(!before.connector_drawn);

        let frame = hover_at(&ctx, &mut chart, &series, 5.0, 5.0);
        assert_eq!(chart.hover_state(), HoverState::Selected(0));
        assert!(frame.connector_drawn);
    }

    #[test]
    fn series_hidden_in_legend_is_not_hit() {
        let ctx = egui::Context::default();
        let mut chart = ChartRenderer::new(ConnectorOverlay::default());
        let series = pair_of(&[(0.0, 0.0), (10.0, 10.0)], &[(5.0, 5.0), (2.0, 8.0)]);

        let first = run_frame(&ctx, &mut chart, &series, Vec::new());
        let mut mem = PlotMemory::load(&ctx, first.plot_id).expect("plot memory stored");
        mem.hidden_items.insert("Passive".to_string());
        mem.store(&ctx, first.plot_id);

        let frame = hover_at(&ctx, &mut chart, &series, 5.0, 5.0);
        assert_eq!(chart.hover_state(), HoverState::NoSelection);
        assert!(!frame.connector_drawn);

        // the visible partner of a hidden point gets no connector either
        let frame = hover_at(&ctx, &mut chart, &series, 10.0, 10.0);
        assert_eq!(chart.hover_state(), HoverState::Selected(1));
        assert!(!frame.connector_drawn);
    }

    #[test]
    fn nan_point_is_not_hit() {
        let ctx = egui::Context::default();
        let mut chart = ChartRenderer::new(ConnectorOverlay::default());
        // passive[0] would sit at (5, 5) were its x parseable
        let series = pair_of(&[(0.0, 0.0), (10.0, 10.0)], &[(f64::NAN, 5.0), (2.0, 8.0)]);

        let frame = hover_at(&ctx, &mut chart, &series, 5.0, 5.0);
        assert_eq!(chart.hover_state(), HoverState::NoSelection);
        assert!(!frame.connector_drawn);
    }

    #[test]
    fn nan_partner_gets_no_connector() {
        let ctx = egui::Context::default();
        let mut chart = ChartRenderer::new(ConnectorOverlay::default());
        let series = pair_of(&[(0.0, 0.0), (10.0, 10.0)], &[(5.0, 5.0), (f64::NAN, f64::NAN)]);

        let frame = hover_at(&ctx, &mut chart, &series, 10.0, 10.0);
        assert_eq!(chart.hover_state(), HoverState::Selected(1));
        assert!(!frame.connector_drawn);
    }
}
