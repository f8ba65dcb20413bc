use eframe::egui::{self, RichText, ScrollArea, Ui};

use crate::state::FigureState;

// ---------------------------------------------------------------------------
// Left side panel – detected peaks
// ---------------------------------------------------------------------------

/// List every detected peak with its position, height and prominence.
pub fn peak_panel(ui: &mut Ui, state: &FigureState) {
    ui.heading("Peaks");
    ui.separator();

    if state.peaks.is_empty() {
        ui.label("No peaks above the prominence threshold.");
        return;
    }

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            egui::Grid::new("peak_table")
                .striped(true)
                .num_columns(4)
                .show(ui, |ui: &mut Ui| {
                    ui.strong("#");
                    ui.strong("s\u{303}");
                    ui.strong("\u{3c7}\u{303}");
                    ui.strong("prominence");
                    ui.end_row();

                    for peak in &state.peaks {
                        let x = state.profile.positions[peak.index];
                        let y = state.profile.curvature[peak.index];
                        ui.label(peak.index.to_string());
                        ui.label(format!("{x:.4}"));
                        ui.label(format!("{y:.4}"));
                        ui.label(format!("{:.4}", peak.prominence));
                        ui.end_row();
                    }
                });
        });
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Summary line and view controls.  Returns `true` when the user asked for
/// the axis limits to be restored.
pub fn top_bar(ui: &mut Ui, state: &FigureState, source: &str) -> bool {
    let mut reset = false;
    egui::menu::bar(ui, |ui: &mut Ui| {
        if ui.button("Reset view").clicked() {
            reset = true;
        }

        ui.separator();
        ui.label(RichText::new(source).strong());
        ui.separator();

        ui.label(format!(
            "{} samples, {} peaks, length {:.4}",
            state.profile.len(),
            state.peaks.len(),
            state.profile.total_length
        ));

        if let Some(fs) = state.profile.sampling_rate {
            ui.separator();
            ui.label(format!("sampling rate {fs:.3}"));
        }
    });
    reset
}
