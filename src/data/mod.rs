/// Data layer: run files, selection, grouping and averaging.
///
/// Architecture:
/// ```text
///   <dir>/<index>_<suffix>.csv
///        │
///        ▼
///   ┌──────────┐
///   │  select   │  third-from-last column > threshold → file names
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  group    │  sort by index, split where gap > max_gap
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  average  │  interior files of each span → mean of last 3 columns
///   └──────────┘
/// ```

pub mod average;
pub mod group;
pub mod loader;
pub mod model;
pub mod select;
