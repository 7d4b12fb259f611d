/// Data layer: core types, loading, filtering, aggregation, and export.
///
/// Architecture:
/// ```text
///  .csv (latin-1)
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  decode, normalize headers, drop bad rows → ZooDataset
///   └──────────┘   (memoized once per process)
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  class + name search → filtered indices
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  stats    │  metrics, histogram, top species, sex comparison
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  export   │  filtered rows → UTF-8 CSV
///   └──────────┘
/// ```

pub mod export;
pub mod filter;
pub mod loader;
pub mod model;
pub mod stats;
