use eframe::egui::{Color32, Ui};
use egui_plot::{Legend, Line, MarkerShape, Plot, PlotBounds, PlotPoints, Points};

use crate::color::to_egui;
use crate::state::{FigureState, X_LABEL, Y_LABEL};

// ---------------------------------------------------------------------------
// Curvature plot (central panel)
// ---------------------------------------------------------------------------

/// Render the curvature trace with its peak markers.
///
/// When `reset_view` is set the view snaps back to the figure's axis limits
/// and the flag is cleared.
pub fn curvature_plot(ui: &mut Ui, state: &FigureState, reset_view: &mut bool) {
    let style = &state.style;

    let trace: PlotPoints = state.profile.points().map(|(x, y)| [x, y]).collect();
    let peaks: PlotPoints = state
        .peak_points()
        .into_iter()
        .map(|(x, y)| [x, y])
        .collect();

    let line = Line::new(trace)
        .name("curvature")
        .color(to_egui(style.series_color(0)))
        .width(style.line_width as f32);

    let markers = Points::new(peaks)
        .name(format!("peaks ({})", state.peaks.len()))
        .shape(MarkerShape::Circle)
        .filled(true)
        .radius((style.marker_size / 2.0) as f32)
        .color(Color32::BLACK);

    Plot::new("curvature_plot")
        .legend(Legend::default())
        .x_axis_label(X_LABEL)
        .y_axis_label(Y_LABEL)
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            if std::mem::take(reset_view) {
                plot_ui.set_plot_bounds(PlotBounds::from_min_max(
                    [state.x_range.start, state.y_range.start],
                    [state.x_range.end, state.y_range.end],
                ));
            }
            plot_ui.line(line);
            plot_ui.points(markers);
        });
}
