use std::ops::Range;

use crate::data::model::{CurvatureProfile, Peak};
use crate::style::PlotStyle;

/// The y axis never starts below this value.
pub const Y_FLOOR: f64 = 1.0;

/// Fraction of the data span added above the maximum.
const Y_MARGIN: f64 = 0.05;

pub const X_LABEL: &str = "s\u{303}";
pub const Y_LABEL: &str = "\u{3c7}\u{303}(s\u{303})";

// ---------------------------------------------------------------------------
// Figure state
// ---------------------------------------------------------------------------

/// Everything both renderers draw, independent of the backend.
#[derive(Debug, Clone)]
pub struct FigureState {
    pub profile: CurvatureProfile,
    pub peaks: Vec<Peak>,
    pub style: PlotStyle,
    pub x_range: Range<f64>,
    pub y_range: Range<f64>,
}

impl FigureState {
    pub fn new(profile: CurvatureProfile, peaks: Vec<Peak>, style: PlotStyle) -> Self {
        let y_range = y_limits(&profile.curvature);
        Self {
            profile,
            peaks,
            style,
            x_range: 0.0..1.0,
            y_range,
        }
    }

    /// `(x, y)` of every detected peak.
    pub fn peak_points(&self) -> Vec<(f64, f64)> {
        self.peaks
            .iter()
            .map(|p| (self.profile.positions[p.index], self.profile.curvature[p.index]))
            .collect()
    }
}

/// Lower limit pinned to [`Y_FLOOR`], upper limit at the data maximum plus a
/// small margin.
pub fn y_limits(values: &[f64]) -> Range<f64> {
    let (min, max) = values
        .iter()
        .copied()
        .filter(|v| v.is_finite())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
            (lo.min(v), hi.max(v))
        });

    let upper = max + Y_MARGIN * (max - min);
    if !upper.is_finite() || upper <= Y_FLOOR {
        log::warn!("Curvature never rises above {Y_FLOOR}; using a unit-height y axis");
        return Y_FLOOR..Y_FLOOR + 1.0;
    }
    Y_FLOOR..upper
}
