use std::fs;
use std::path::Path;

use filament_curvature::cli::Args;
use filament_curvature::data::peaks::PeakCriteria;
use filament_curvature::pipeline::{analyze_file, run};
use filament_curvature::CurvatureError;
use tempfile::TempDir;

const STYLE: &str = "\
axes.prop_cycle : cycler('color', ['0C5DA5', '00B945'])
font.family : serif
font.size : 8
lines.linewidth : 1.0
xtick.minor.visible : True
ytick.minor.visible : True
";

/// Two bends on a baseline of 1.2, stored in reversed row order.
fn write_inputs(dir: &Path) {
    let n = 120;
    let profile: Vec<f64> = (0..n)
        .map(|i| {
            let s = i as f64 / (n - 1) as f64;
            1.2 + 0.8 * (-(s - 0.3).powi(2) / 0.002).exp() + 0.5 * (-(s - 0.7).powi(2) / 0.004).exp()
        })
        .collect();

    let mut text = String::new();
    for row in 0..n {
        // Row `row` stores profile value n-1-row; index column undoes that.
        let idx = n - 1 - row;
        text.push_str(&format!("0.01 {} {}\n", profile[idx], idx));
    }
    fs::write(dir.join("curvature.txt"), text).unwrap();
    fs::write(dir.join("paper.mplstyle"), STYLE).unwrap();
}

fn args(dir: &TempDir) -> Args {
    Args {
        input: dir.path().join("curvature.txt"),
        style: dir.path().join("paper.mplstyle"),
        output: dir.path().join("curvature.pdf"),
        prominence: 0.01,
        window: None,
        report: Some(dir.path().join("peaks.json")),
        no_show: true,
    }
}

#[test]
fn end_to_end_writes_pdf_and_report() {
    let dir = tempfile::tempdir().unwrap();
    write_inputs(dir.path());
    run(&args(&dir)).unwrap();

    let pdf = fs::read(dir.path().join("curvature.pdf")).unwrap();
    assert!(pdf.starts_with(b"%PDF"));
    // Axis labels and tick numbers need an embedded font.
    assert!(pdf.windows(b"/FontFile".len()).any(|w| w == b"/FontFile"));

    let report: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(dir.path().join("peaks.json")).unwrap()).unwrap();
    assert_eq!(report["rows"], 120);
    let peaks = report["peaks"].as_array().unwrap();
    assert_eq!(peaks.len(), 2);
    let first = peaks[0]["position"].as_f64().unwrap();
    let second = peaks[1]["position"].as_f64().unwrap();
    assert!((first - 0.3).abs() < 0.02, "{first}");
    assert!((second - 0.7).abs() < 0.02, "{second}");
}

#[test]
fn rerun_produces_identical_pdf() {
    let dir = tempfile::tempdir().unwrap();
    write_inputs(dir.path());
    let args = args(&dir);

    run(&args).unwrap();
    let first = fs::read(&args.output).unwrap();
    run(&args).unwrap();
    let second = fs::read(&args.output).unwrap();
    assert_eq!(first, second);
}

#[test]
fn reordering_restores_profile_order() {
    let dir = tempfile::tempdir().unwrap();
    write_inputs(dir.path());
    let analysis = analyze_file(&dir.path().join("curvature.txt"), &PeakCriteria::default()).unwrap();

    let positions = &analysis.profile.positions;
    assert_eq!(*positions.last().unwrap(), 1.0);
    assert!(positions.windows(2).all(|w| w[0] <= w[1]));
    assert!(analysis.peaks.windows(2).all(|w| w[0].index < w[1].index));
    // Baseline at both ends after reordering.
    assert!((analysis.profile.curvature[0] - 1.2).abs() < 1e-6);
    assert!((analysis.profile.curvature[119] - 1.2).abs() < 1e-6);
}

#[test]
fn missing_style_sheet_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    write_inputs(dir.path());
    fs::remove_file(dir.path().join("paper.mplstyle")).unwrap();

    let err = run(&args(&dir)).unwrap_err();
    assert!(matches!(err, CurvatureError::Io { .. }), "{err}");
    assert!(!dir.path().join("curvature.pdf").exists());
}

#[test]
fn malformed_table_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    write_inputs(dir.path());
    fs::write(dir.path().join("curvature.txt"), "1 5 0\n1 nine 1\n").unwrap();

    let err = run(&args(&dir)).unwrap_err();
    assert!(matches!(err, CurvatureError::Parse { line: 2, .. }), "{err}");
}

#[test]
fn existing_output_is_overwritten() {
    let dir = tempfile::tempdir().unwrap();
    write_inputs(dir.path());
    let args = args(&dir);
    fs::write(&args.output, b"stale").unwrap();

    run(&args).unwrap();
    assert!(fs::read(&args.output).unwrap().starts_with(b"%PDF"));
}
