use std::path::Path;

use crate::app;
use crate::cli::Args;
use crate::data::loader::load_table;
use crate::data::model::{CurvatureProfile, CurvatureTable, Peak};
use crate::data::peaks::{find_peaks, PeakCriteria};
use crate::data::reduce::reduce;
use crate::error::Result;
use crate::render;
use crate::report::{write_report, ProfileReport};
use crate::state::FigureState;
use crate::style::{load_style, PlotStyle, TickDirection};

/// Physical figure size in inches, applied on top of the style sheet.
pub const FIGURE_SIZE: (f64, f64) = (3.71, 2.0);

/// Reduced profile plus the peaks found on it.
#[derive(Debug, Clone)]
pub struct Analysis {
    pub profile: CurvatureProfile,
    pub peaks: Vec<Peak>,
    pub criteria: PeakCriteria,
}

pub fn analyze(table: &CurvatureTable, criteria: &PeakCriteria) -> Result<Analysis> {
    let profile = reduce(table)?;
    let peaks = find_peaks(&profile.curvature, criteria)?;
    Ok(Analysis {
        profile,
        peaks,
        criteria: criteria.clone(),
    })
}

pub fn analyze_file(path: &Path, criteria: &PeakCriteria) -> Result<Analysis> {
    let table = load_table(path)?;
    analyze(&table, criteria)
}

/// The sheet's settings with the fixed figure size and inward ticks.
pub fn figure_style(sheet: PlotStyle) -> PlotStyle {
    sheet
        .with_figure_size(FIGURE_SIZE.0, FIGURE_SIZE.1)
        .with_tick_direction(TickDirection::In)
}

/// Style → load → reduce → peaks → (report) → PDF → viewer.
pub fn run(args: &Args) -> Result<()> {
    let style = figure_style(load_style(&args.style)?);
    let analysis = analyze_file(&args.input, &args.criteria())?;

    if let Some(path) = &args.report {
        write_report(&ProfileReport::new(&analysis), path)?;
    }

    let figure = FigureState::new(analysis.profile, analysis.peaks, style);
    render::write_pdf(&figure, &args.output)?;

    if args.no_show {
        log::info!("Viewer disabled, done");
        return Ok(());
    }
    app::show(figure, &args.input.display().to_string())
}
