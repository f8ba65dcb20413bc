/// Data layer: core types, loading, reduction and peak finding.
///
/// Architecture:
/// ```text
///   curvature.txt
///        │
///        ▼
///   ┌──────────┐
///   │  loader  │  parse 3-column table → CurvatureTable
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  reduce  │  reorder curvature, cumulative + normalized arc length
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  peaks   │  local maxima filtered by prominence → Vec<Peak>
///   └──────────┘
/// ```

pub mod loader;
pub mod model;
pub mod peaks;
pub mod reduce;
