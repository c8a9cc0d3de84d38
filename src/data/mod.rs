/// Data layer: core types, loading, reshaping, and export.
///
/// Architecture:
/// ```text
///   .xlsx ("Data" sheet)
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  skip preamble, read header → RawTable
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  reshape  │  selected rows, year columns → Vec<LongRecord>
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  export   │  Indicator Name,Year,Value CSV
///   └──────────┘
/// ```

pub mod export;
pub mod loader;
pub mod model;
pub mod reshape;
