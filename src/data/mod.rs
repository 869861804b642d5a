/// Data layer: core types, loading, filtering and aggregation.
///
/// Architecture:
/// ```text
///   dados.csv / .tsv
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse + validate → Dataset (or SourceNotFound)
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  Dataset  │  Vec<TumorRecord>, bounds per measure
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  FilterSpec (category AND ranges) → subset
///   └──────────┘
///        │
///        ▼
///   ┌──────────────────────┐
///   │ summary / histogram   │  counts, means, bins → ui
///   └──────────────────────┘
/// ```

pub mod filter;
pub mod histogram;
pub mod loader;
pub mod model;
pub mod summary;
