use std::path::PathBuf;

use clap::Parser;

use crate::data::peaks::{PeakCriteria, DEFAULT_PROMINENCE};

/// Find and plot the peaks of a filament curvature profile.
///
/// Without arguments reads `curvature.txt` and `paper.mplstyle` from the
/// working directory, writes `curvature.pdf` and opens a viewer window.
#[derive(Parser, Debug, Clone)]
#[command(author, version, about)]
pub struct Args {
    /// Curvature table: segment length, curvature, reorder index per row
    #[arg(long, default_value = "curvature.txt")]
    pub input: PathBuf,

    /// Style sheet (matplotlib `key : value` format)
    #[arg(long, default_value = "paper.mplstyle")]
    pub style: PathBuf,

    /// Output PDF, overwritten if it exists
    #[arg(long, default_value = "curvature.pdf")]
    pub output: PathBuf,

    /// Minimum peak prominence
    #[arg(long, default_value_t = DEFAULT_PROMINENCE)]
    pub prominence: f64,

    /// Limit the prominence valley search to this many samples around each peak
    #[arg(long)]
    pub window: Option<usize>,

    /// Also write a JSON summary of the profile and its peaks
    #[arg(long)]
    pub report: Option<PathBuf>,

    /// Do not open the viewer window (headless)
    #[arg(long, default_value_t = false)]
    pub no_show: bool,
}

impl Args {
    pub fn criteria(&self) -> PeakCriteria {
        PeakCriteria {
            min_prominence: self.prominence,
            window: self.window,
        }
    }
}
