use anyhow::Result;
use serde_json::{json, Map, Value as JsonValue};

use crate::systems::{generate_systems, ElementSpec};
use crate::table::PeriodicTable;

// ---------------------------------------------------------------------------
// Compound-database seam
// ---------------------------------------------------------------------------

/// One compound record: requested field names mapped to values. The response
/// schema belongs to the database, not to this crate.
pub type Record = Map<String, JsonValue>;

/// Build the criteria document selecting compounds whose chemical system is
/// one of `systems`:
///
/// ```json
/// { "chemsys": { "$in": ["Na-Si", "K-Si", ...] } }
/// ```
pub fn chemsys_criteria(systems: &[String]) -> JsonValue {
    json!({ "chemsys": { "$in": systems } })
}

/// A remote compound database, consumed as an opaque service. Transport,
/// timeouts, and retries are the implementation's concern.
pub trait CompoundDatabase {
    /// Return the records matching `criteria`, restricted to `fields`.
    fn search(&self, criteria: &JsonValue, fields: &[&str]) -> Result<Vec<Record>>;
}

/// Generate the chemical systems for `slots` and fetch the matching
/// compound records, the whole pipeline in one call.
pub fn search_systems<D: CompoundDatabase>(
    db: &D,
    slots: &[ElementSpec],
    fields: &[&str],
    table: &PeriodicTable,
) -> Result<Vec<Record>> {
    let systems = generate_systems(slots, table)?;
    if systems.is_empty() {
        log::info!("no chemical systems generated, skipping database search");
        return Ok(Vec::new());
    }
    log::info!("searching compound database for {} systems", systems.len());
    db.search(&chemsys_criteria(&systems), fields)
}
