use serde::Serialize;

// ---------------------------------------------------------------------------
// CurvatureTable – the raw three-column input
// ---------------------------------------------------------------------------

/// The parsed contents of `curvature.txt`, one entry per row in file order.
///
/// Columns are kept as separate vectors because every later step works on a
/// whole column at a time.
#[derive(Debug, Clone, PartialEq)]
pub struct CurvatureTable {
    /// Segment length (column 0).
    pub lengths: Vec<f64>,
    /// Raw curvature value (column 1).
    pub curvature: Vec<f64>,
    /// Reorder index (column 2), still as parsed floats.
    pub order: Vec<f64>,
}

impl CurvatureTable {
    /// Number of rows.
    pub fn len(&self) -> usize {
        self.lengths.len()
    }

    /// Whether the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.lengths.is_empty()
    }
}

// ---------------------------------------------------------------------------
// CurvatureProfile – the reduced data that gets plotted
// ---------------------------------------------------------------------------

/// Curvature along the normalized arc length of the curve.
#[derive(Debug, Clone, PartialEq)]
pub struct CurvatureProfile {
    /// Cumulative arc length divided by the total length (x axis, ends at 1).
    pub positions: Vec<f64>,
    /// Curvature values after applying the reorder index (y axis).
    pub curvature: Vec<f64>,
    /// Sum of all segment lengths.
    pub total_length: f64,
    /// Reciprocal of the first position spacing, kept as a diagnostic.
    pub sampling_rate: Option<f64>,
}

impl CurvatureProfile {
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// `(x, y)` pairs in sample order.
    pub fn points(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.positions
            .iter()
            .copied()
            .zip(self.curvature.iter().copied())
    }
}

// ---------------------------------------------------------------------------
// Peak
// ---------------------------------------------------------------------------

/// A local maximum of the curvature trace.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Peak {
    /// Sample index into the curvature sequence.
    pub index: usize,
    /// Height above the higher of the two surrounding valleys.
    pub prominence: f64,
    /// Index of the lowest sample between the peak and the next higher sample on the left.
    pub left_base: usize,
    /// Same as `left_base`, on the right.
    pub right_base: usize,
}
