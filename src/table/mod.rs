//! Element universe: core types and the embedded periodic table.
//!
//! ```text
//!   data (118 embedded records)
//!        │
//!        ▼
//!   ┌───────────────┐
//!   │ PeriodicTable │  Vec<Element>, symbol index, process-wide static
//!   └───────────────┘
//!        │
//!        ▼
//!   filter / systems   declarative predicates → candidate element lists
//! ```

mod data;
mod model;

pub use data::periodic_table;
pub use model::{AttrValue, Element, PeriodicTable};
