use std::str::FromStr;

use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};
use plotters::style::RGBColor;

/// 8-bit sRGB colour as used by the style sheet and both renderers.
pub type Rgb8 = Srgb<u8>;

/// matplotlib's default `tab10` colour cycle.
const DEFAULT_CYCLE: [&str; 10] = [
    "1f77b4", "ff7f0e", "2ca02c", "d62728", "9467bd", "8c564b", "e377c2", "7f7f7f", "bcbd22",
    "17becf",
];

// ---------------------------------------------------------------------------
// Color palette generator
// ---------------------------------------------------------------------------

/// Generates `n` visually distinct colours using evenly spaced hues.
pub fn generate_palette(n: usize) -> Vec<Rgb8> {
    (0..n)
        .map(|i| {
            let hue = (i as f32 / n as f32) * 360.0;
            let hsl = Hsl::new(hue, 0.75, 0.55);
            let rgb: Srgb = hsl.into_color();
            rgb.into_format()
        })
        .collect()
}

/// The colour cycle used when the style sheet does not set one.
pub fn default_cycle() -> Vec<Rgb8> {
    DEFAULT_CYCLE
        .iter()
        .filter_map(|hex| Rgb8::from_str(hex).ok())
        .collect()
}

// ---------------------------------------------------------------------------
// Parsing and conversion
// ---------------------------------------------------------------------------

/// Parse a style-sheet colour: hex with or without `#`, optionally quoted,
/// or one of the single-letter base colours.
pub fn parse_color(text: &str) -> Option<Rgb8> {
    let text = text.trim().trim_matches(|c| c == '\'' || c == '"');
    let named = match text {
        "k" | "black" => Some((0, 0, 0)),
        "w" | "white" => Some((255, 255, 255)),
        "r" | "red" => Some((255, 0, 0)),
        "g" | "green" => Some((0, 128, 0)),
        "b" | "blue" => Some((0, 0, 255)),
        _ => None,
    };
    match named {
        Some((r, g, b)) => Some(Rgb8::new(r, g, b)),
        None => Rgb8::from_str(text).ok(),
    }
}

pub fn to_egui(color: Rgb8) -> Color32 {
    Color32::from_rgb(color.red, color.green, color.blue)
}

pub fn to_plotters(color: Rgb8) -> RGBColor {
    RGBColor(color.red, color.green, color.blue)
}
