/// Data layer: core types, the embedded dataset, filtering, and derivation.
///
/// Architecture:
/// ```text
///   ┌──────────┐
///   │ dataset   │  embedded BRICS table → Dataset
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  (Dataset, FilterState) → FilteredView
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  derive   │  FilteredView → means / rankings / histograms / boxplots
///   └──────────┘
/// ```
///
/// Everything here is pure: no I/O, no shared state. A `FilteredView` is
/// recomputed fresh for every render or export call, never cached.

pub mod dataset;
pub mod derive;
pub mod error;
pub mod filter;
pub mod model;
