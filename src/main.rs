//*** START FILE: src/main.rs ***//
#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

mod cli;

use anyhow::{anyhow, Result};
use clap::Parser;
use eframe::{egui, App, NativeOptions};
use std::sync::Arc;
use std::time::Duration;

use crate::cli::Cli;
use voice_embedding_viewer::config;
use voice_embedding_viewer::logger;
use voice_embedding_viewer::plotting::chart::{apply_font_size, ChartRenderer};
use voice_embedding_viewer::plotting::overlay::{ConnectorOverlay, ConnectorStyle, HoverState};
use voice_embedding_viewer::remote::{HttpEmbeddingService, LookupRequest};
use voice_embedding_viewer::session::{load_base_series, Session};
use voice_embedding_viewer::SeriesKind;

const WINDOW_TITLE: &str = "Active vs Passive Sentence Embeddings";

struct ViewerApp {
    session: Session,
    chart: ChartRenderer,
    data_path_display: String,
    endpoint_display: String,
}

impl ViewerApp {
    fn submit_form(&mut self, ctx: &egui::Context) {
        let request = LookupRequest {
            active: self.session.form.active.trim().to_string(),
            passive: self.session.form.passive.trim().to_string(),
        };
        let ctx = ctx.clone();
        if !self.session.submit(request, move || ctx.request_repaint()) {
            logger::warn("A lookup is already in progress");
        }
    }
}

impl App for ViewerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if self.session.poll() {
            self.chart.reset_hover();
        }

        egui::TopBottomPanel::top("top_panel").show(ctx, |ui| {
            egui::menu::bar(ui, |ui| {
                ui.menu_button("File", |ui| {
                    if ui.button("Exit").clicked() { ctx.send_viewport_cmd(egui::ViewportCommand::Close); }
                });
            });
        });

        egui::SidePanel::left("side_panel_left").min_width(250.0).default_width(320.0).show(ctx, |ui| {
            ui.heading("Try a sentence pair");
            ui.separator();

            ui.label("Active:");
            ui.add(egui::TextEdit::multiline(&mut self.session.form.active).desired_rows(2));
            ui.label("Passive:");
            ui.add(egui::TextEdit::multiline(&mut self.session.form.passive).desired_rows(2));

            let can_submit = !self.session.is_waiting()
                && !self.session.form.active.trim().is_empty()
                && !self.session.form.passive.trim().is_empty();
            if ui.add_enabled(can_submit, egui::Button::new("Embed")).clicked() {
                self.submit_form(ctx);
            }
            if self.session.is_waiting() {
                ui.horizontal(|ui| { ui.spinner(); ui.label("Waiting for embedding service..."); });
            }
            ui.separator();

            ui.collapsing("Source", |ui| {
                ui.label(&self.data_path_display);
                ui.label(&self.endpoint_display);
                ui.label(format!("Sentence pairs: {}", self.session.base().len()));
            });

            if let (HoverState::Selected(index), Some(series)) = (self.chart.hover_state(), self.session.series()) {
                ui.separator();
                ui.label(format!("Selected pair {}", index + 1));
                for kind in [SeriesKind::Active, SeriesKind::Passive] {
                    if let Some(point) = series.point(kind, index) {
                        ui.label(format!("{}: {}", series.series(kind).name, point.label.trim()));
                    }
                }
            }
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            if let Some(err) = self.session.lookup_error() {
                ui.colored_label(egui::Color32::RED, err);
                ui.separator();
            }
            match self.session.series() {
                Some(series) => {
                    self.chart.show(ui, series);
                }
                None => {
                    ui.centered_and_justified(|ui| { ui.spinner(); });
                }
            }
        });
    }
}

fn main() {
    if let Err(e) = run() {
        logger::error(&format!("{:#}", e));
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    logger::set_verbose(cli.verbose);

    let mut config = config::load_or_default(&cli.config)?;
    if let Some(data) = cli.data {
        config.data_path = data;
    }
    if let Some(endpoint) = cli.endpoint {
        config.endpoint = endpoint;
    }
    config.validate()?;

    let base = load_base_series(&config)?;
    logger::info(&format!(
        "Loaded {} sentence pairs from {}",
        base.len(),
        config.data_path.display()
    ));

    if cli.active.is_some() != cli.passive.is_some() {
        logger::warn("Both --active and --passive are needed for a lookup; ignoring the one given");
    }
    let request = LookupRequest::from_parts(cli.active, cli.passive);
    let service = Arc::new(HttpEmbeddingService::new(
        &config.endpoint,
        Duration::from_secs(config.request_timeout_secs),
    )?);
    let style = ConnectorStyle::from_config(&config.connector)?;

    let data_path_display = format!("Data: {}", config.data_path.display());
    let endpoint_display = format!("Endpoint: {}", service.endpoint());
    let font_size = config.font_size;

    let options = NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([800.0, 600.0]),
        ..Default::default()
    };
    eframe::run_native(
        WINDOW_TITLE,
        options,
        Box::new(move |cc| {
            apply_font_size(&cc.egui_ctx, font_size);
            let ctx = cc.egui_ctx.clone();
            let session = Session::start(base, request, service, move || ctx.request_repaint());
            Box::new(ViewerApp {
                session,
                chart: ChartRenderer::new(ConnectorOverlay::new(style)),
                data_path_display,
                endpoint_display,
            })
        }),
    )
    .map_err(|e| anyhow!("Viewer window failed: {}", e))
}
//*** END FILE: src/main.rs ***//
