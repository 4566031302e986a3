/// Data layer: core types, loading, filtering, aggregation and export.
///
/// Architecture:
/// ```text
///  .csv / .parquet
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  rename, clean salary, label grade → SalaryTable
///   └──────────┘
///        │
///        ▼
///   ┌─────────────┐
///   │ SalaryTable  │  immutable Vec<Record>, loaded once
///   └─────────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  criteria → visuals view / table view (RowSet)
///   └──────────┘
///        │
///        ▼
///   ┌───────────┐      ┌──────────┐
///   │ aggregate  │      │  export   │  RowSet → CSV bytes
///   └───────────┘      └──────────┘
///    KPIs, rankings, per-grade groups
/// ```

pub mod aggregate;
pub mod export;
pub mod filter;
pub mod loader;
pub mod model;
