use std::path::Path;

use crate::error::{CurvatureError, Result};

use super::model::CurvatureTable;

/// Columns per row: segment length, curvature, reorder index.
const COLUMNS: usize = 3;

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a curvature table from a whitespace-separated text file.
///
/// Expected layout (no header):
///
/// ```text
/// # length   curvature   index
/// 0.0125     1.031       0
/// 0.0125     1.094       1
/// ...
/// ```
pub fn load_table(path: &Path) -> Result<CurvatureTable> {
    let text = std::fs::read_to_string(path).map_err(|e| CurvatureError::io(path, e))?;
    let table = parse_table(&text)?;
    log::info!("Loaded {} rows from {}", table.len(), path.display());
    Ok(table)
}

/// Parse the table body.  Blank lines and `#` comments are skipped; every
/// other line must hold exactly three numbers.
pub fn parse_table(text: &str) -> Result<CurvatureTable> {
    let mut table = CurvatureTable {
        lengths: Vec::new(),
        curvature: Vec::new(),
        order: Vec::new(),
    };

    for (line_no, raw) in text.lines().enumerate() {
        let line_no = line_no + 1;
        let content = match raw.find('#') {
            Some(pos) => &raw[..pos],
            None => raw,
        };
        if content.trim().is_empty() {
            continue;
        }

        let row = parse_row(content, line_no)?;
        table.lengths.push(row[0]);
        table.curvature.push(row[1]);
        table.order.push(row[2]);
    }

    if table.is_empty() {
        return Err(CurvatureError::Parse {
            line: 0,
            message: "no data rows found".to_string(),
        });
    }
    Ok(table)
}

fn parse_row(content: &str, line: usize) -> Result<[f64; COLUMNS]> {
    let values = content
        .split_whitespace()
        .enumerate()
        .map(|(col, tok)| {
            tok.parse::<f64>().map_err(|_| CurvatureError::Parse {
                line,
                message: format!("column {col}: '{tok}' is not a number"),
            })
        })
        .collect::<Result<Vec<f64>>>()?;

    <[f64; COLUMNS]>::try_from(values).map_err(|values| CurvatureError::Parse {
        line,
        message: format!("expected {COLUMNS} columns, found {}", values.len()),
    })
}
