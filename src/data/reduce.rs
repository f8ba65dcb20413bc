use crate::error::{CurvatureError, Result};

use super::model::{CurvatureProfile, CurvatureTable};

// ---------------------------------------------------------------------------
// Table → profile
// ---------------------------------------------------------------------------

/// Reorder the curvature column, accumulate the segment lengths and
/// normalize the positions to end at 1.
pub fn reduce(table: &CurvatureTable) -> Result<CurvatureProfile> {
    let order = reorder_indices(&table.order)?;
    if let Some(row) = table.curvature.iter().position(|v| !v.is_finite()) {
        return Err(CurvatureError::Validation(format!(
            "row {row}: curvature {} is not finite",
            table.curvature[row]
        )));
    }
    let curvature = apply_order(&table.curvature, &order);

    let cumulative = cumulative_positions(&table.lengths)?;
    let total_length = *cumulative
        .last()
        .ok_or_else(|| CurvatureError::Validation("empty length column".to_string()))?;
    let sampling_rate = sampling_rate(&cumulative);
    if let Some(fs) = sampling_rate {
        log::debug!("Sampling rate {fs:.6} samples per unit length");
    }
    let positions = normalize(&cumulative, total_length)?;

    Ok(CurvatureProfile {
        positions,
        curvature,
        total_length,
        sampling_rate,
    })
}

/// Convert the float index column into a validated permutation of `0..n`.
pub fn reorder_indices(order: &[f64]) -> Result<Vec<usize>> {
    let n = order.len();
    let mut seen = vec![false; n];
    let mut indices = Vec::with_capacity(n);

    for (row, &raw) in order.iter().enumerate() {
        if !raw.is_finite() || raw < 0.0 || raw.fract() != 0.0 {
            return Err(CurvatureError::Validation(format!(
                "row {row}: reorder index {raw} is not a non-negative integer"
            )));
        }
        let idx = raw as usize;
        if idx >= n {
            return Err(CurvatureError::Validation(format!(
                "row {row}: reorder index {idx} is out of range for {n} rows"
            )));
        }
        if std::mem::replace(&mut seen[idx], true) {
            return Err(CurvatureError::Validation(format!(
                "row {row}: reorder index {idx} appears more than once"
            )));
        }
        indices.push(idx);
    }
    Ok(indices)
}

/// `result[i] = values[order[i]]`.  `order` must come from [`reorder_indices`].
pub fn apply_order(values: &[f64], order: &[usize]) -> Vec<f64> {
    order.iter().map(|&i| values[i]).collect()
}

/// Running sum of the segment lengths.
pub fn cumulative_positions(lengths: &[f64]) -> Result<Vec<f64>> {
    let mut total = 0.0;
    lengths
        .iter()
        .enumerate()
        .map(|(row, &len)| {
            if !len.is_finite() || len < 0.0 {
                return Err(CurvatureError::Validation(format!(
                    "row {row}: segment length {len} must be finite and non-negative"
                )));
            }
            total += len;
            Ok(total)
        })
        .collect()
}

/// Divide every position by `total`, which must be strictly positive.
pub fn normalize(positions: &[f64], total: f64) -> Result<Vec<f64>> {
    if !total.is_finite() || total <= 0.0 {
        return Err(CurvatureError::Validation(format!(
            "total length {total} must be finite and positive"
        )));
    }
    Ok(positions.iter().map(|&p| p / total).collect())
}

/// Reciprocal of the spacing between the first two positions.
pub fn sampling_rate(positions: &[f64]) -> Option<f64> {
    match positions {
        [first, second, ..] if second > first => Some(1.0 / (second - first)),
        _ => None,
    }
}
