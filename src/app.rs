use eframe::egui;

use crate::error::{CurvatureError, Result};
use crate::state::FigureState;
use crate::ui::{panels, plot};

/// Screen pixels per figure inch in the viewer window.
const VIEWER_DPI: f64 = 220.0;
const PEAK_PANEL_WIDTH: f32 = 240.0;

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct CurvatureApp {
    pub figure: FigureState,
    /// Name of the input shown in the top bar.
    pub source: String,
    reset_view: bool,
}

impl CurvatureApp {
    pub fn new(figure: FigureState, source: impl Into<String>) -> Self {
        Self {
            figure,
            source: source.into(),
            reset_view: true,
        }
    }
}

impl eframe::App for CurvatureApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: summary + controls ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            if panels::top_bar(ui, &self.figure, &self.source) {
                self.reset_view = true;
            }
        });

        // ---- Left side panel: peak table ----
        egui::SidePanel::left("peak_panel")
            .default_width(PEAK_PANEL_WIDTH)
            .resizable(true)
            .show(ctx, |ui| {
                panels::peak_panel(ui, &self.figure);
            });

        // ---- Central panel: plot ----
        egui::CentralPanel::default().show(ctx, |ui| {
            plot::curvature_plot(ui, &self.figure, &mut self.reset_view);
        });
    }
}

/// Open the viewer window and block until it is closed.
pub fn show(figure: FigureState, source: &str) -> Result<()> {
    let (width, height) = figure.style.figure_size;
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([
                (width * VIEWER_DPI) as f32 + PEAK_PANEL_WIDTH,
                (height * VIEWER_DPI) as f32 + 40.0,
            ])
            .with_min_inner_size([600.0, 300.0]),
        ..Default::default()
    };

    let app = CurvatureApp::new(figure, source);
    eframe::run_native(
        "Filament Curvature",
        options,
        Box::new(move |_cc| Ok(Box::new(app))),
    )
    .map_err(|e| CurvatureError::Viewer(e.to_string()))
}
