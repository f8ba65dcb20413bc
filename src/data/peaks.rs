use crate::error::{CurvatureError, Result};

use super::model::Peak;

/// Prominence threshold used when nothing else is configured.
pub const DEFAULT_PROMINENCE: f64 = 0.01;

#[derive(Clone, Debug, PartialEq)]
pub struct PeakCriteria {
    /// Minimum prominence a local maximum needs to be reported (inclusive).
    pub min_prominence: f64,
    /// Optional evaluation window in samples, centred on each candidate.
    /// Valleys further away than `window / 2` samples are ignored, so a
    /// window needs at least 2 samples to reach either neighbour.
    pub window: Option<usize>,
}

impl Default for PeakCriteria {
    fn default() -> Self {
        Self {
            min_prominence: DEFAULT_PROMINENCE,
            window: None,
        }
    }
}

impl PeakCriteria {
    pub fn validate(&self) -> Result<()> {
        if !self.min_prominence.is_finite() || self.min_prominence < 0.0 {
            return Err(CurvatureError::Validation(format!(
                "prominence threshold {} must be finite and non-negative",
                self.min_prominence
            )));
        }
        if let Some(window) = self.window {
            if window < 2 {
                return Err(CurvatureError::Validation(format!(
                    "peak window {window} must span at least 2 samples"
                )));
            }
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Peak finding
// ---------------------------------------------------------------------------

/// Find local maxima of `values` whose prominence reaches the threshold.
///
/// Peaks come back in ascending index order.  The first and last sample are
/// never peaks; a flat top reports its middle sample (rounded down).
pub fn find_peaks(values: &[f64], criteria: &PeakCriteria) -> Result<Vec<Peak>> {
    criteria.validate()?;

    let peaks: Vec<Peak> = local_maxima(values)
        .into_iter()
        .map(|idx| prominence(values, idx, criteria.window))
        .filter(|peak| peak.prominence >= criteria.min_prominence)
        .collect();

    log::info!(
        "Found {} peaks with prominence >= {}",
        peaks.len(),
        criteria.min_prominence
    );
    Ok(peaks)
}

/// Indices of all samples that rise above the left neighbour and then stay
/// flat or fall to a strictly lower sample on the right.
pub fn local_maxima(values: &[f64]) -> Vec<usize> {
    let mut maxima = Vec::new();
    if values.len() < 3 {
        return maxima;
    }

    let last = values.len() - 1;
    let mut i = 1;
    while i < last {
        if values[i - 1] < values[i] {
            let mut ahead = i + 1;
            while ahead < last && values[ahead] == values[i] {
                ahead += 1;
            }
            if values[ahead] < values[i] {
                maxima.push((i + ahead - 1) / 2);
                i = ahead;
            }
        }
        i += 1;
    }
    maxima
}

/// Measure how far the peak at `idx` stands above its surrounding valleys.
///
/// Each side is scanned outward until a strictly higher sample, the window
/// edge or the end of the data; the lowest sample seen is that side's base.
pub fn prominence(values: &[f64], idx: usize, window: Option<usize>) -> Peak {
    let height = values[idx];
    let (lo, hi) = match window {
        Some(w) => (
            idx.saturating_sub(w / 2),
            (idx + w / 2).min(values.len() - 1),
        ),
        None => (0, values.len() - 1),
    };

    let mut left_base = idx;
    let mut left_min = height;
    for i in (lo..=idx).rev() {
        if values[i] > height {
            break;
        }
        if values[i] < left_min {
            left_min = values[i];
            left_base = i;
        }
    }

    let mut right_base = idx;
    let mut right_min = height;
    for i in idx..=hi {
        if values[i] > height {
            break;
        }
        if values[i] < right_min {
            right_min = values[i];
            right_base = i;
        }
    }

    Peak {
        index: idx,
        prominence: height - left_min.max(right_min),
        left_base,
        right_base,
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    fn indices(peaks: &[Peak]) -> Vec<usize> {
        peaks.iter().map(|p| p.index).collect()
    }

    #[test]
    fn single_peak_in_three_samples() {
        let peaks = find_peaks(&[5.0, 9.0, 3.0], &PeakCriteria::default()).unwrap();
        assert_eq!(indices(&peaks), vec![1]);
        assert_relative_eq!(peaks[0].prominence, 4.0);
        assert_eq!((peaks[0].left_base, peaks[0].right_base), (0, 2));
    }

    #[test]
    fn endpoints_and_monotone_runs_have_no_peaks() {
        let criteria = PeakCriteria::default();
        assert!(find_peaks(&[], &criteria).unwrap().is_empty());
        assert!(find_peaks(&[1.0, 2.0], &criteria).unwrap().is_empty());
        assert!(find_peaks(&[1.0, 2.0, 3.0, 4.0], &criteria).unwrap().is_empty());
        assert!(find_peaks(&[4.0, 3.0, 2.0], &criteria).unwrap().is_empty());
    }

    #[test]
    fn plateau_reports_middle_sample() {
        assert_eq!(local_maxima(&[0.0, 2.0, 2.0, 2.0, 0.0]), vec![2]);
        assert_eq!(local_maxima(&[0.0, 2.0, 2.0, 0.0]), vec![1]);
        // A plateau that runs into the end is not a maximum.
        assert!(local_maxima(&[0.0, 2.0, 2.0, 2.0]).is_empty());
    }

    #[test]
    fn prominence_uses_higher_of_the_two_valleys() {
        // Peak at 3 is bounded by the higher peak at 1 on the left.
        let values = [0.0, 10.0, 4.0, 6.0, 1.0];
        let p = prominence(&values, 3, None);
        assert_relative_eq!(p.prominence, 2.0);
        assert_eq!(p.left_base, 2);
        assert_eq!(p.right_base, 4);

        let p = prominence(&values, 1, None);
        assert_relative_eq!(p.prominence, 9.0);
        assert_eq!(p.right_base, 4);
    }

    #[test]
    fn small_wiggles_are_dropped() {
        let values = [1.0, 1.5005, 1.495, 1.5, 1.2, 1.0];
        let peaks = find_peaks(&values, &PeakCriteria::default()).unwrap();
        assert_eq!(indices(&peaks), vec![1]);
    }

    #[test]
    fn threshold_is_inclusive() {
        let values = [0.0, 0.5, 0.0];
        let criteria = PeakCriteria {
            min_prominence: 0.5,
            window: None,
        };
        assert_eq!(indices(&find_peaks(&values, &criteria).unwrap()), vec![1]);
    }

    #[test]
    fn lowering_threshold_never_loses_peaks() {
        let values: Vec<f64> = (0..200)
            .map(|i| {
                let t = i as f64 * 0.1;
                1.0 + t.sin() + 0.05 * (7.3 * t).sin() + 0.01 * (31.0 * t).cos()
            })
            .collect();

        let mut previous = usize::MAX;
        for threshold in [0.0, 0.005, 0.01, 0.05, 0.1, 0.5, 1.0, 5.0] {
            let criteria = PeakCriteria {
                min_prominence: threshold,
                window: None,
            };
            let peaks = find_peaks(&values, &criteria).unwrap();
            assert!(peaks.len() <= previous, "threshold {threshold}");
            assert!(peaks.windows(2).all(|w| w[0].index < w[1].index));
            assert!(peaks.iter().all(|p| p.index < values.len()));
            assert!(peaks.iter().all(|p| p.prominence >= threshold));
            previous = peaks.len();
        }
    }

    #[test]
    fn window_limits_valley_search() {
        let values = [0.0, 3.0, 2.0, 2.5, 2.0, 3.0, 0.0];
        let full = prominence(&values, 3, None);
        assert_relative_eq!(full.prominence, 0.5);

        // Window of 3 only sees the direct neighbours.
        let narrow = prominence(&values, 1, Some(3));
        assert_relative_eq!(narrow.prominence, 1.0);
        let wide = prominence(&values, 1, None);
        assert_relative_eq!(wide.prominence, 3.0);
    }

    #[test]
    fn rejects_bad_criteria() {
        let negative = PeakCriteria {
            min_prominence: -0.1,
            window: None,
        };
        assert!(find_peaks(&[0.0, 1.0, 0.0], &negative).is_err());

        let tiny_window = PeakCriteria {
            min_prominence: 0.01,
            window: Some(1),
        };
        assert!(find_peaks(&[0.0, 1.0, 0.0], &tiny_window).is_err());
    }

    #[test]
    fn two_sample_window_reaches_the_neighbours() {
        let values = [0.0, 3.0, 1.0, 2.0, 0.5];
        let two = PeakCriteria {
            min_prominence: 0.0,
            window: Some(2),
        };
        let three = PeakCriteria {
            window: Some(3),
            ..two.clone()
        };
        let peaks = find_peaks(&values, &two).unwrap();
        assert_eq!(peaks, find_peaks(&values, &three).unwrap());
        assert_eq!(peaks.len(), 2);
        assert_relative_eq!(peaks[0].prominence, 2.0);
        assert_relative_eq!(peaks[1].prominence, 1.0);
    }
}
