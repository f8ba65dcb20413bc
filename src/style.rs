use std::path::Path;

use crate::color::{self, Rgb8};
use crate::error::{CurvatureError, Result};

// ---------------------------------------------------------------------------
// Plot style
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickDirection {
    In,
    Out,
    InOut,
}

/// A font size that is either given in points or relative to `font.size`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FontSize {
    Points(f64),
    Relative(f64),
}

impl FontSize {
    pub fn resolve(self, base: f64) -> f64 {
        match self {
            FontSize::Points(pt) => pt,
            FontSize::Relative(scale) => base * scale,
        }
    }
}

/// Every visual parameter the figure needs, passed explicitly to the
/// renderers.  Lengths are in points, the figure size is in inches.
#[derive(Debug, Clone, PartialEq)]
pub struct PlotStyle {
    pub color_cycle: Vec<Rgb8>,
    pub figure_size: (f64, f64),
    pub font_family: String,
    pub font_size: f64,
    pub label_size: FontSize,
    pub tick_label_size: FontSize,
    pub line_width: f64,
    pub marker_size: f64,
    pub axes_line_width: f64,
    pub x_tick_direction: TickDirection,
    pub y_tick_direction: TickDirection,
    pub x_minor_ticks: bool,
    pub y_minor_ticks: bool,
}

impl Default for PlotStyle {
    fn default() -> Self {
        Self {
            color_cycle: color::default_cycle(),
            figure_size: (6.4, 4.8),
            font_family: "sans-serif".to_string(),
            font_size: 10.0,
            label_size: FontSize::Relative(1.0),
            tick_label_size: FontSize::Relative(1.0),
            line_width: 1.5,
            marker_size: 6.0,
            axes_line_width: 0.8,
            x_tick_direction: TickDirection::Out,
            y_tick_direction: TickDirection::Out,
            x_minor_ticks: false,
            y_minor_ticks: false,
        }
    }
}

impl PlotStyle {
    /// Colour of the `n`-th plotted series.
    pub fn series_color(&self, n: usize) -> Rgb8 {
        if self.color_cycle.is_empty() {
            return color::generate_palette(n + 1)[n];
        }
        self.color_cycle[n % self.color_cycle.len()]
    }

    pub fn with_figure_size(mut self, width: f64, height: f64) -> Self {
        self.figure_size = (width, height);
        self
    }

    /// Point both axes' major and minor ticks the same way.
    pub fn with_tick_direction(mut self, direction: TickDirection) -> Self {
        self.x_tick_direction = direction;
        self.y_tick_direction = direction;
        self
    }

    pub fn label_points(&self) -> f64 {
        self.label_size.resolve(self.font_size)
    }

    pub fn tick_label_points(&self) -> f64 {
        self.tick_label_size.resolve(self.font_size)
    }
}

// ---------------------------------------------------------------------------
// Style sheet parsing
// ---------------------------------------------------------------------------

/// Load a matplotlib-style sheet (`key : value` lines) on top of the defaults.
pub fn load_style(path: &Path) -> Result<PlotStyle> {
    let text = std::fs::read_to_string(path).map_err(|e| CurvatureError::io(path, e))?;
    let style = parse_style(&text)?;
    log::info!("Loaded style sheet {}", path.display());
    Ok(style)
}

pub fn parse_style(text: &str) -> Result<PlotStyle> {
    let mut style = PlotStyle::default();

    for (line_no, raw) in text.lines().enumerate() {
        let line = line_no + 1;
        let content = strip_comment(raw).trim();
        if content.is_empty() {
            continue;
        }
        let Some((key, value)) = content.split_once(':') else {
            log::warn!("style sheet line {line}: missing ':' in {content:?}, ignored");
            continue;
        };
        apply_entry(&mut style, key.trim(), value.trim(), line)?;
    }
    Ok(style)
}

fn apply_entry(style: &mut PlotStyle, key: &str, value: &str, line: usize) -> Result<()> {
    let err = |message: String| CurvatureError::Style { line, message };

    match key {
        "axes.prop_cycle" => {
            style.color_cycle = parse_color_cycle(value).map_err(err)?;
        }
        "figure.figsize" => {
            let dims = parse_float_list(value).map_err(err)?;
            match dims.as_slice() {
                [w, h] if *w > 0.0 && *h > 0.0 => style.figure_size = (*w, *h),
                _ => return Err(err(format!("figure.figsize needs two positive numbers, got {value:?}"))),
            }
        }
        "font.family" => {
            let first = value.split(',').next().unwrap_or("").trim();
            style.font_family = first.trim_matches(|c| c == '\'' || c == '"').to_string();
        }
        "font.size" => style.font_size = parse_positive(value).map_err(err)?,
        "axes.labelsize" => style.label_size = parse_font_size(value).map_err(err)?,
        "xtick.labelsize" | "ytick.labelsize" => {
            style.tick_label_size = parse_font_size(value).map_err(err)?
        }
        "lines.linewidth" => style.line_width = parse_positive(value).map_err(err)?,
        "lines.markersize" => style.marker_size = parse_positive(value).map_err(err)?,
        "axes.linewidth" => style.axes_line_width = parse_positive(value).map_err(err)?,
        "xtick.direction" => style.x_tick_direction = parse_direction(value).map_err(err)?,
        "ytick.direction" => style.y_tick_direction = parse_direction(value).map_err(err)?,
        "xtick.minor.visible" => style.x_minor_ticks = parse_bool(value).map_err(err)?,
        "ytick.minor.visible" => style.y_minor_ticks = parse_bool(value).map_err(err)?,
        other => log::debug!("style sheet line {line}: ignoring {other}"),
    }
    Ok(())
}

/// Drop a trailing `#` comment unless the `#` sits inside quotes.
fn strip_comment(line: &str) -> &str {
    let mut quote: Option<char> = None;
    for (i, c) in line.char_indices() {
        match (quote, c) {
            (None, '\'' | '"') => quote = Some(c),
            (Some(q), c) if c == q => quote = None,
            (None, '#') => return &line[..i],
            _ => {}
        }
    }
    line
}

fn parse_positive(value: &str) -> std::result::Result<f64, String> {
    match value.parse::<f64>() {
        Ok(v) if v.is_finite() && v > 0.0 => Ok(v),
        _ => Err(format!("expected a positive number, got {value:?}")),
    }
}

fn parse_float_list(value: &str) -> std::result::Result<Vec<f64>, String> {
    value
        .split(',')
        .map(|tok| {
            tok.trim()
                .parse::<f64>()
                .map_err(|_| format!("'{}' is not a number", tok.trim()))
        })
        .collect()
}

fn parse_font_size(value: &str) -> std::result::Result<FontSize, String> {
    let scale = match value {
        "xx-small" => 0.579,
        "x-small" => 0.694,
        "small" => 0.833,
        "medium" => 1.0,
        "large" => 1.2,
        "x-large" => 1.44,
        "xx-large" => 1.728,
        "smaller" => 1.0 / 1.2,
        "larger" => 1.2,
        _ => return parse_positive(value).map(FontSize::Points),
    };
    Ok(FontSize::Relative(scale))
}

fn parse_direction(value: &str) -> std::result::Result<TickDirection, String> {
    match value {
        "in" => Ok(TickDirection::In),
        "out" => Ok(TickDirection::Out),
        "inout" => Ok(TickDirection::InOut),
        other => Err(format!("unknown tick direction {other:?}")),
    }
}

fn parse_bool(value: &str) -> std::result::Result<bool, String> {
    match value.to_ascii_lowercase().as_str() {
        "true" | "yes" | "on" | "1" => Ok(true),
        "false" | "no" | "off" | "0" => Ok(false),
        other => Err(format!("expected a boolean, got {other:?}")),
    }
}

/// Extract the colour list from `cycler('color', [...])` or `cycler(color=[...])`.
/// Other cyclers combined with `+` are ignored.
fn parse_color_cycle(value: &str) -> std::result::Result<Vec<Rgb8>, String> {
    let start = value
        .find("color")
        .ok_or_else(|| format!("no color cycler in {value:?}"))?;
    let rest = &value[start..];
    let open = rest
        .find('[')
        .ok_or_else(|| "color cycler has no '[' list".to_string())?;
    let close = rest[open..]
        .find(']')
        .ok_or_else(|| "color cycler list is not closed".to_string())?;
    let list = &rest[open + 1..open + close];

    let colors = list
        .split(',')
        .map(str::trim)
        .filter(|tok| !tok.is_empty())
        .map(|tok| color::parse_color(tok).ok_or_else(|| format!("cannot parse colour {tok}")))
        .collect::<std::result::Result<Vec<Rgb8>, String>>()?;

    if colors.is_empty() {
        return Err("color cycler is empty".to_string());
    }
    Ok(colors)
}
