/// Data layer: typed cells, loading, key normalization, record building, filtering.
///
/// Architecture:
/// ```text
///  Material Units.csv      Material Properties.{csv,json,parquet}
///        │                          │
///        ▼                          ▼
///   ┌──────────────────────────────────┐
///   │  loader    parse file → rows     │  Vec<UnitRow>, RawTable
///   └──────────────────────────────────┘
///        │
///        ▼
///   ┌──────────────────────────────────┐
///   │  builder   keys + name filter    │  RecordSet (never empty)
///   └──────────────────────────────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  technology / category selections → working sets
///   └──────────┘
/// ```

pub mod builder;
pub mod filter;
pub mod keys;
pub mod loader;
pub mod model;
