use serde_json::Value as JsonValue;

use crate::error::Error;
use crate::filter::FilterSpec;
use crate::table::{Element, PeriodicTable};

/// Separator between symbols in a chemical-system string, e.g. `"Na-Si"`.
pub const SEPARATOR: char = '-';

// ---------------------------------------------------------------------------
// Element specification: one slot of a target chemical system
// ---------------------------------------------------------------------------

/// One required compositional role, resolved to a candidate element list.
#[derive(Debug, Clone, PartialEq)]
pub enum ElementSpec {
    /// Explicit symbols, e.g. `["Na", "K"]`.
    Symbols(Vec<String>),
    /// Declarative attribute filter.
    Filter(FilterSpec),
}

impl ElementSpec {
    /// Parse from JSON: an array of symbol strings, or a filter document.
    pub fn parse(doc: &JsonValue) -> Result<Self, Error> {
        match doc {
            JsonValue::Array(items) => {
                let symbols = items
                    .iter()
                    .map(|v| {
                        v.as_str().map(str::to_string).ok_or_else(|| {
                            Error::invalid(format!("element list entries must be strings, got {v}"))
                        })
                    })
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(ElementSpec::Symbols(symbols))
            }
            JsonValue::Object(_) => Ok(ElementSpec::Filter(FilterSpec::parse(doc)?)),
            other => Err(Error::invalid(format!(
                "element specification must be a symbol list or a filter object, got {other}"
            ))),
        }
    }

    /// Resolve to a concrete element list against the universe.
    pub fn resolve<'t>(&self, table: &'t PeriodicTable) -> Result<Vec<&'t Element>, Error> {
        match self {
            ElementSpec::Symbols(symbols) => symbols
                .iter()
                .map(|sym| {
                    table
                        .get(sym)
                        .ok_or_else(|| Error::UnknownElement(sym.clone()))
                })
                .collect(),
            ElementSpec::Filter(spec) => spec.evaluate(table),
        }
    }
}

/// Element specifications deserialize through the same JSON shapes
/// [`ElementSpec::parse`] accepts: symbol arrays or filter objects.
impl<'de> serde::Deserialize<'de> for ElementSpec {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let doc: JsonValue = serde::Deserialize::deserialize(deserializer)?;
        ElementSpec::parse(&doc).map_err(serde::de::Error::custom)
    }
}

impl From<FilterSpec> for ElementSpec {
    fn from(spec: FilterSpec) -> Self {
        ElementSpec::Filter(spec)
    }
}

// ---------------------------------------------------------------------------
// System generation
// ---------------------------------------------------------------------------

/// Generate every chemical-system string obtainable by choosing one element
/// per slot: Cartesian product across the resolved slot lists, each tuple's
/// symbols sorted and joined with [`SEPARATOR`], the whole list sorted
/// lexicographically.
///
/// The output is deliberately *not* deduplicated: when slots overlap, the
/// same unordered combination is reachable through several tuples and
/// appears once per tuple. Callers wanting a set must dedup themselves.
///
/// A slot resolving to no elements empties the product, so the overall
/// result is an empty list, which is a valid outcome rather than an error.
pub fn generate_systems(slots: &[ElementSpec], table: &PeriodicTable) -> Result<Vec<String>, Error> {
    let resolved = slots
        .iter()
        .map(|spec| spec.resolve(table))
        .collect::<Result<Vec<_>, _>>()?;

    let mut systems: Vec<String> = cartesian_product(&resolved)
        .map(|tuple| {
            let mut symbols: Vec<&str> = tuple.iter().map(|el| el.symbol).collect();
            symbols.sort_unstable();
            join_symbols(&symbols)
        })
        .collect();
    systems.sort_unstable();

    log::debug!("generated {} systems from {} slots", systems.len(), slots.len());
    Ok(systems)
}

fn join_symbols(symbols: &[&str]) -> String {
    let mut out = String::with_capacity(symbols.len() * 3);
    for (i, sym) in symbols.iter().enumerate() {
        if i > 0 {
            out.push(SEPARATOR);
        }
        out.push_str(sym);
    }
    out
}

/// Odometer-style Cartesian product over the slot lists. Yields nothing when
/// any list is empty (or when there are no slots at all).
fn cartesian_product<'a, 't>(
    lists: &'a [Vec<&'t Element>],
) -> impl Iterator<Item = Vec<&'t Element>> + 'a {
    let mut counters = vec![0usize; lists.len()];
    let mut exhausted = lists.is_empty() || lists.iter().any(Vec::is_empty);

    std::iter::from_fn(move || {
        if exhausted {
            return None;
        }
        let tuple: Vec<&Element> = counters
            .iter()
            .zip(lists)
            .map(|(&c, list)| list[c])
            .collect();

        // Advance the rightmost counter, carrying leftwards.
        exhausted = true;
        for (c, list) in counters.iter_mut().zip(lists).rev() {
            *c += 1;
            if *c < list.len() {
                exhausted = false;
                break;
            }
            *c = 0;
        }
        Some(tuple)
    })
}
