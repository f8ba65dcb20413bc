pub mod app;
pub mod cli;
pub mod color;
pub mod data;
pub mod error;
pub mod pipeline;
pub mod render;
pub mod report;
pub mod state;
pub mod style;
pub mod ui;

pub use error::{CurvatureError, Result};
