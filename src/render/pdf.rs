use std::error::Error;
use std::path::Path;

use plotters::coord::ranged1d::Ranged;
use plotters::coord::types::RangedCoordf64;
use plotters::coord::Shift;
use plotters::prelude::*;
use svg2pdf::usvg;
use svg2pdf::usvg::fontdb;

use crate::color::to_plotters;
use crate::error::{CurvatureError, Result};
use crate::state::{FigureState, X_LABEL, Y_LABEL};
use crate::style::TickDirection;

use super::clip::clip_polyline;

/// SVG user units per inch; svg2pdf maps one unit to one PDF point.
const POINTS_PER_INCH: f64 = 72.0;

const MAJOR_TICK: i32 = 4;
const MINOR_TICK: i32 = 2;
const X_MAJOR_LABELS: usize = 6;
const Y_MAJOR_LABELS: usize = 5;
const MINOR_PER_MAJOR: usize = 5;

const GENERIC_FAMILIES: [&str; 5] = ["serif", "sans-serif", "monospace", "cursive", "fantasy"];
const SERIF_FONTS: [&str; 6] = [
    "Times New Roman",
    "DejaVu Serif",
    "Liberation Serif",
    "Nimbus Roman",
    "Noto Serif",
    "FreeSerif",
];
const SANS_FONTS: [&str; 6] = [
    "Arial",
    "DejaVu Sans",
    "Liberation Sans",
    "Nimbus Sans",
    "Noto Sans",
    "FreeSans",
];
const MONO_FONTS: [&str; 5] = [
    "Courier New",
    "DejaVu Sans Mono",
    "Liberation Mono",
    "Noto Sans Mono",
    "FreeMono",
];

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Render the figure and write it to `path` as PDF, replacing any existing file.
pub fn write_pdf(state: &FigureState, path: &Path) -> Result<()> {
    let pdf = render_pdf(state)?;
    std::fs::write(path, pdf).map_err(|e| CurvatureError::io(path, e))?;
    log::info!("Wrote {}", path.display());
    Ok(())
}

pub fn render_pdf(state: &FigureState) -> Result<Vec<u8>> {
    let fonts = font_database()?;
    let family = resolve_family(&fonts, &state.style.font_family);
    let svg = draw_svg(state, &family)?;
    convert(&svg, fonts)
}

/// Draw the figure onto an in-memory SVG canvas sized from the style's
/// figure size.
pub fn render_svg(state: &FigureState) -> Result<String> {
    draw_svg(state, &state.style.font_family)
}

pub fn svg_to_pdf(svg: &str) -> Result<Vec<u8>> {
    convert(svg, font_database()?)
}

fn draw_svg(state: &FigureState, font: &str) -> Result<String> {
    let (width, height) = state.style.figure_size;
    let size = (
        (width * POINTS_PER_INCH).round() as u32,
        (height * POINTS_PER_INCH).round() as u32,
    );

    let mut svg = String::new();
    {
        let root = SVGBackend::with_string(&mut svg, size).into_drawing_area();
        draw_figure(&root, state, font).map_err(|e| CurvatureError::Render(e.to_string()))?;
        root.present()
            .map_err(|e| CurvatureError::Render(e.to_string()))?;
    }
    Ok(svg)
}

fn convert(svg: &str, fonts: fontdb::Database) -> Result<Vec<u8>> {
    let mut options = usvg::Options::default();
    *options.fontdb_mut() = fonts;

    let tree = usvg::Tree::from_str(svg, &options)
        .map_err(|e| CurvatureError::Render(format!("parsing SVG: {e}")))?;
    svg2pdf::to_pdf(
        &tree,
        svg2pdf::ConversionOptions::default(),
        svg2pdf::PageOptions::default(),
    )
    .map_err(|e| CurvatureError::Render(format!("converting SVG to PDF: {e}")))
}

// ---------------------------------------------------------------------------
// Fonts
// ---------------------------------------------------------------------------

/// System fonts with the generic families pointed at faces that are actually
/// installed.  usvg silently drops text whose family has no match.
fn font_database() -> Result<fontdb::Database> {
    let mut db = fontdb::Database::new();
    db.load_system_fonts();

    let any_family = db
        .faces()
        .find_map(|face| face.families.first().map(|(name, _)| name.clone()))
        .ok_or_else(|| CurvatureError::Render("no system fonts found for the figure text".into()))?;

    let serif = first_installed(&db, &SERIF_FONTS).unwrap_or_else(|| any_family.clone());
    let sans = first_installed(&db, &SANS_FONTS).unwrap_or_else(|| any_family.clone());
    let mono = first_installed(&db, &MONO_FONTS).unwrap_or_else(|| sans.clone());
    log::debug!("Font families: serif={serif:?}, sans-serif={sans:?}, monospace={mono:?}");

    db.set_serif_family(serif);
    db.set_cursive_family(sans.clone());
    db.set_fantasy_family(sans.clone());
    db.set_monospace_family(mono);
    db.set_sans_serif_family(sans);
    Ok(db)
}

fn is_installed(db: &fontdb::Database, family: &str) -> bool {
    db.faces().any(|face| {
        face.families
            .iter()
            .any(|(name, _)| name.eq_ignore_ascii_case(family))
    })
}

fn first_installed(db: &fontdb::Database, candidates: &[&str]) -> Option<String> {
    candidates
        .iter()
        .find(|name| is_installed(db, name))
        .map(|name| name.to_string())
}

/// The family written into the SVG: the requested one when it is generic or
/// installed, otherwise `sans-serif`.
fn resolve_family(db: &fontdb::Database, requested: &str) -> String {
    let generic = GENERIC_FAMILIES
        .iter()
        .any(|g| g.eq_ignore_ascii_case(requested));
    if generic || is_installed(db, requested) {
        return requested.to_string();
    }
    log::warn!("Font family {requested:?} is not installed, using sans-serif");
    "sans-serif".to_string()
}

// ---------------------------------------------------------------------------
// Drawing
// ---------------------------------------------------------------------------

fn draw_figure(
    root: &DrawingArea<SVGBackend<'_>, Shift>,
    state: &FigureState,
    font: &str,
) -> std::result::Result<(), Box<dyn Error>> {
    let style = &state.style;
    let label_pt = style.label_points();
    let tick_pt = style.tick_label_points();
    let axis_width = (style.axes_line_width.round() as u32).max(1);

    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(root)
        .margin(4)
        .x_label_area_size((2.0 * tick_pt + label_pt) as u32)
        .y_label_area_size((3.0 * tick_pt + label_pt) as u32)
        .build_cartesian_2d(state.x_range.clone(), state.y_range.clone())?;

    chart
        .configure_mesh()
        .disable_mesh()
        .x_labels(X_MAJOR_LABELS)
        .y_labels(Y_MAJOR_LABELS)
        .x_desc(X_LABEL)
        .y_desc(Y_LABEL)
        .axis_desc_style((font, label_pt))
        .label_style((font, tick_pt))
        .axis_style(BLACK.stroke_width(axis_width))
        .set_tick_mark_size(
            LabelAreaPosition::Bottom,
            tick_length(style.x_tick_direction, MAJOR_TICK),
        )
        .set_tick_mark_size(
            LabelAreaPosition::Left,
            tick_length(style.y_tick_direction, MAJOR_TICK),
        )
        .draw()?;

    // Close the frame on the top and right.
    let (x, y) = (&state.x_range, &state.y_range);
    chart.draw_series(std::iter::once(Rectangle::new(
        [(x.start, y.start), (x.end, y.end)],
        BLACK.stroke_width(axis_width),
    )))?;

    let line_style = to_plotters(style.series_color(0))
        .stroke_width((style.line_width.round() as u32).max(1));
    for run in clip_polyline(state.profile.points(), x, y) {
        chart.draw_series(LineSeries::new(run, line_style))?;
    }

    let radius = (style.marker_size / 2.0).round().max(1.0) as i32;
    chart.draw_series(
        state
            .peak_points()
            .into_iter()
            .filter(|(px, py)| x.contains(px) && (y.start..=y.end).contains(py))
            .map(|p| Circle::new(p, radius, BLACK.filled())),
    )?;

    for (v, size) in manual_ticks(x, X_MAJOR_LABELS, style.x_tick_direction, style.x_minor_ticks) {
        let (px, py) = chart.backend_coord(&(v, y.start));
        let (outside, inside) = tick_extent(style.x_tick_direction, size);
        root.draw(&PathElement::new(
            vec![(px, py - inside), (px, py + outside)],
            BLACK.stroke_width(axis_width),
        ))?;
    }
    for (v, size) in manual_ticks(y, Y_MAJOR_LABELS, style.y_tick_direction, style.y_minor_ticks) {
        let (px, py) = chart.backend_coord(&(x.start, v));
        let (outside, inside) = tick_extent(style.y_tick_direction, size);
        root.draw(&PathElement::new(
            vec![(px + inside, py), (px - outside, py)],
            BLACK.stroke_width(axis_width),
        ))?;
    }

    Ok(())
}

/// How far a tick reaches outside and inside the axes, in pixels.
fn tick_extent(direction: TickDirection, size: i32) -> (i32, i32) {
    match direction {
        TickDirection::In => (0, size),
        TickDirection::Out => (size, 0),
        TickDirection::InOut => (size / 2, size - size / 2),
    }
}

/// Major tick size handed to plotters: positive lengths point away from the
/// plot, negative ones into it.  Of an `inout` tick plotters only draws the
/// outer part.
fn tick_length(direction: TickDirection, size: i32) -> i32 {
    match tick_extent(direction, size) {
        (0, inside) => -inside,
        (outside, _) => outside,
    }
}

/// Ticks plotters does not draw: whole `inout` major ticks and the minor ticks.
fn manual_ticks(
    range: &std::ops::Range<f64>,
    majors: usize,
    direction: TickDirection,
    minor_visible: bool,
) -> Vec<(f64, i32)> {
    let mut ticks = Vec::new();
    if direction == TickDirection::InOut {
        let axis = RangedCoordf64::from(range.clone());
        ticks.extend(axis.key_points(majors).into_iter().map(|v| (v, MAJOR_TICK)));
    }
    if minor_visible {
        ticks.extend(minor_ticks(range, majors).into_iter().map(|v| (v, MINOR_TICK)));
    }
    ticks
}

/// Finer key points of the axis range, minus the ones that carry a major tick.
fn minor_ticks(range: &std::ops::Range<f64>, majors: usize) -> Vec<f64> {
    let axis = RangedCoordf64::from(range.clone());
    let major = axis.key_points(majors);
    let step = match major.as_slice() {
        [a, b, ..] => (b - a).abs(),
        _ => range.end - range.start,
    };
    axis.key_points(majors * MINOR_PER_MAJOR)
        .into_iter()
        .filter(|v| major.iter().all(|m| (m - v).abs() > step * 1e-6))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::{CurvatureProfile, Peak};
    use crate::style::PlotStyle;

    fn state(style: PlotStyle) -> FigureState {
        let positions: Vec<f64> = (1..=50).map(|i| i as f64 / 50.0).collect();
        let curvature: Vec<f64> = positions
            .iter()
            .map(|s| 1.5 + (s * 12.0).sin())
            .collect();
        let peaks = crate::data::peaks::find_peaks(&curvature, &Default::default()).unwrap();
        let profile = CurvatureProfile {
            positions,
            curvature,
            total_length: 10.0,
            sampling_rate: Some(5.0),
        };
        FigureState::new(profile, peaks, style)
    }

    #[test]
    fn svg_has_one_marker_per_peak() {
        let state = state(PlotStyle::default().with_figure_size(3.71, 2.0));
        assert!(!state.peaks.is_empty());
        let svg = render_svg(&state).unwrap();
        assert_eq!(svg.matches("<circle").count(), state.peaks.len());
        assert!(svg.contains("width=\"267\""));
    }

    #[test]
    fn markers_outside_the_axes_are_skipped() {
        let mut state = state(PlotStyle::default());
        state.peaks = vec![Peak {
            index: 0,
            prominence: 1.0,
            left_base: 0,
            right_base: 0,
        }];
        state.y_range = 100.0..200.0;
        let svg = render_svg(&state).unwrap();
        assert_eq!(svg.matches("<circle").count(), 0);
    }

    #[test]
    fn pdf_output_is_deterministic() {
        let state = state(PlotStyle::default().with_tick_direction(TickDirection::In));
        let first = render_pdf(&state).unwrap();
        let second = render_pdf(&state).unwrap();
        assert!(first.starts_with(b"%PDF"));
        assert_eq!(first, second);
    }

    #[test]
    fn minor_ticks_skip_majors() {
        let range = 0.0..1.0;
        let majors = RangedCoordf64::from(range.clone()).key_points(X_MAJOR_LABELS);
        let minors = minor_ticks(&range, X_MAJOR_LABELS);
        assert!(!minors.is_empty());
        assert!(minors.iter().all(|v| range.contains(v)));
        assert!(minors.iter().all(|v| !majors.contains(v)));
    }

    #[test]
    fn tick_direction_sets_sign() {
        assert_eq!(tick_length(TickDirection::In, 4), -4);
        assert_eq!(tick_length(TickDirection::Out, 4), 4);
        assert_eq!(tick_length(TickDirection::InOut, 4), 2);
    }

    #[test]
    fn inout_ticks_straddle_the_axis() {
        assert_eq!(tick_extent(TickDirection::InOut, 4), (2, 2));
        assert_eq!(tick_extent(TickDirection::InOut, 3), (1, 2));

        let range = 0.0..1.0;
        let majors = RangedCoordf64::from(range.clone()).key_points(X_MAJOR_LABELS);
        let ticks = manual_ticks(&range, X_MAJOR_LABELS, TickDirection::InOut, false);
        assert_eq!(ticks.len(), majors.len());
        assert!(ticks.iter().all(|&(_, size)| size == MAJOR_TICK));
        assert!(manual_ticks(&range, X_MAJOR_LABELS, TickDirection::Out, false).is_empty());

        let out = render_svg(&state(PlotStyle::default())).unwrap();
        let inout =
            render_svg(&state(PlotStyle::default().with_tick_direction(TickDirection::InOut)))
                .unwrap();
        assert!(inout.matches("<polyline").count() > out.matches("<polyline").count());
    }

    fn contains(haystack: &[u8], needle: &[u8]) -> bool {
        haystack.windows(needle.len()).any(|w| w == needle)
    }

    #[test]
    fn pdf_embeds_the_label_font() {
        for family in ["serif", "sans-serif"] {
            let mut style = PlotStyle::default().with_tick_direction(TickDirection::In);
            style.font_family = family.to_string();
            let pdf = render_pdf(&state(style)).unwrap();
            assert!(contains(&pdf, b"/FontFile"), "no embedded font for {family}");
        }
    }

    #[test]
    fn missing_font_family_falls_back() {
        let fonts = font_database().unwrap();
        assert_eq!(resolve_family(&fonts, "serif"), "serif");
        assert_eq!(resolve_family(&fonts, "No Such Typeface 9"), "sans-serif");

        let mut style = PlotStyle::default();
        style.font_family = "No Such Typeface 9".to_string();
        let pdf = render_pdf(&state(style)).unwrap();
        assert!(contains(&pdf, b"/FontFile"));
    }
}
