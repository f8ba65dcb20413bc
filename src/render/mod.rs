/// Figure export.  Plotters draws the chart onto an SVG canvas which is then
/// converted to PDF.
mod clip;
pub mod pdf;

pub use pdf::{render_pdf, render_svg, write_pdf};
