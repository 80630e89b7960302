//! Chemical-system generation from declarative periodic-table filters.
//!
//! Chemical systems (hyphen-joined, symbol-sorted strings such as `"Na-Si"`)
//! are generated by combinatorially pairing elements drawn from
//! MongoDB-style filters over periodic-table attributes, then turned into
//! the criteria document a compound database consumes:
//!
//! ```
//! use chemsys::{generate_systems, ElementSpec, periodic_table};
//! use serde_json::json;
//!
//! let slots = [
//!     ElementSpec::parse(&json!({"group": {"$in": [13, 14, 15, 16]}}))?,
//!     ElementSpec::parse(&json!({"$or": [{"is_alkali": true}, {"is_alkaline": true}]}))?,
//! ];
//! let systems = generate_systems(&slots, periodic_table())?;
//! assert!(systems.binary_search(&"Na-Si".to_string()).is_ok());
//! # Ok::<(), chemsys::Error>(())
//! ```
//!
//! The periodic table is embedded and exposed as a process-wide read-only
//! static; the compound database is an external collaborator behind the
//! [`CompoundDatabase`] trait.

mod error;
pub mod filter;
pub mod query;
pub mod systems;
pub mod table;

pub use error::Error;
pub use filter::FilterSpec;
pub use query::{chemsys_criteria, search_systems, CompoundDatabase, Record};
pub use systems::{generate_systems, ElementSpec, SEPARATOR};
pub use table::{periodic_table, AttrValue, Element, PeriodicTable};
