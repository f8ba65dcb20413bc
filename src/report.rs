use std::path::Path;

use serde::Serialize;

use crate::data::model::Peak;
use crate::error::{CurvatureError, Result};
use crate::pipeline::Analysis;

/// Machine-readable summary of one run, written with `--report`.
#[derive(Debug, Clone, Serialize)]
pub struct ProfileReport {
    pub rows: usize,
    pub total_length: f64,
    pub sampling_rate: Option<f64>,
    pub prominence_threshold: f64,
    pub peaks: Vec<PeakEntry>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PeakEntry {
    #[serde(flatten)]
    pub peak: Peak,
    pub position: f64,
    pub curvature: f64,
}

impl ProfileReport {
    pub fn new(analysis: &Analysis) -> Self {
        let profile = &analysis.profile;
        let peaks = analysis
            .peaks
            .iter()
            .map(|&peak| PeakEntry {
                peak,
                position: profile.positions[peak.index],
                curvature: profile.curvature[peak.index],
            })
            .collect();

        Self {
            rows: profile.len(),
            total_length: profile.total_length,
            sampling_rate: profile.sampling_rate,
            prominence_threshold: analysis.criteria.min_prominence,
            peaks,
        }
    }
}

pub fn write_report(report: &ProfileReport, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(report)?;
    std::fs::write(path, json).map_err(|e| CurvatureError::io(path, e))?;
    log::info!("Wrote report {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use serde_json::Value;

    use super::*;
    use crate::data::loader::parse_table;
    use crate::data::peaks::PeakCriteria;
    use crate::pipeline::analyze;

    #[test]
    fn report_lists_peaks_with_positions() {
        let table = parse_table("1 5 0\n1 9 1\n1 3 2\n").unwrap();
        let analysis = analyze(&table, &PeakCriteria::default()).unwrap();

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.json");
        write_report(&ProfileReport::new(&analysis), &path).unwrap();

        let json: Value = serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(json["rows"], 3);
        assert_eq!(json["total_length"], 3.0);
        assert_eq!(json["prominence_threshold"], 0.01);
        let peaks = json["peaks"].as_array().unwrap();
        assert_eq!(peaks.len(), 1);
        assert_eq!(peaks[0]["index"], 1);
        assert_eq!(peaks[0]["curvature"], 9.0);
        assert_eq!(peaks[0]["prominence"], 4.0);
        assert_eq!(peaks[0]["left_base"], 0);
    }
}
