use std::cmp::Ordering;
use std::collections::BTreeSet;

use serde_json::Value as JsonValue;

use crate::error::Error;
use crate::table::{AttrValue, Element, PeriodicTable};

// ---------------------------------------------------------------------------
// Filter specification: which elements qualify for a slot
// ---------------------------------------------------------------------------

/// Operator keys of the MongoDB-style filter documents this crate accepts.
const OR_KEY: &str = "$or";
const IN_KEY: &str = "$in";
const GT_KEY: &str = "$gt";
const LT_KEY: &str = "$lt";

/// A single attribute test.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Test {
    /// Attribute equals the literal exactly.
    Equals(AttrValue),
    /// Attribute is a member of the list (`$in`).
    In(Vec<AttrValue>),
    /// Attribute is strictly greater than the bound (`$gt`).
    GreaterThan(AttrValue),
    /// Attribute is strictly less than the bound (`$lt`).
    LessThan(AttrValue),
}

#[derive(Debug, Clone, PartialEq)]
enum Clause {
    /// Narrow to elements whose named attribute passes the test.
    Attr { name: String, test: Test },
    /// Narrow to elements matching at least one sub-specification,
    /// each evaluated against the full universe.
    Or(Vec<FilterSpec>),
}

/// A parsed filter specification: a conjunction of clauses.
///
/// Parsed once from the flexible JSON document into this closed variant set,
/// then evaluated with a single exhaustive match per clause.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterSpec {
    clauses: Vec<Clause>,
}

impl FilterSpec {
    /// Parse a JSON filter document.
    ///
    /// The document must be an object. Each entry is one AND-composed clause:
    /// * `"$or": [sub, ...]` is a logical OR over sub-documents
    /// * `attr: {"$in": [...]}` / `{"$gt": v}` / `{"$lt": v}` is a comparison
    /// * `attr: literal` is an exact equality test
    ///
    /// An operator object must carry exactly one recognised operator key.
    pub fn parse(doc: &JsonValue) -> Result<Self, Error> {
        let obj = doc
            .as_object()
            .ok_or_else(|| Error::invalid(format!("expected a JSON object, got {doc}")))?;

        let mut clauses = Vec::with_capacity(obj.len());
        for (key, val) in obj {
            if key == OR_KEY {
                clauses.push(parse_or(val)?);
            } else {
                clauses.push(Clause::Attr {
                    name: key.clone(),
                    test: parse_test(key, val)?,
                });
            }
        }
        Ok(FilterSpec { clauses })
    }

    /// Return the elements satisfying every clause, in universe order.
    pub fn evaluate<'t>(&self, table: &'t PeriodicTable) -> Result<Vec<&'t Element>, Error> {
        let indices = self.evaluate_indices(table)?;
        log::debug!("filter matched {} of {} elements", indices.len(), table.len());
        Ok(indices.into_iter().map(|i| &table.elements()[i]).collect())
    }

    /// Evaluate to universe indices. Starts from the full universe and
    /// narrows clause by clause; `$or` takes the union of its sub-results
    /// over the *original* universe and intersects the working set with it.
    fn evaluate_indices(&self, table: &PeriodicTable) -> Result<Vec<usize>, Error> {
        let mut working: Vec<usize> = (0..table.len()).collect();

        for clause in &self.clauses {
            match clause {
                Clause::Attr { name, test } => {
                    let mut kept = Vec::with_capacity(working.len());
                    for &i in &working {
                        let value = table.elements()[i].attr(name)?;
                        if test.matches(&value) {
                            kept.push(i);
                        }
                    }
                    working = kept;
                }
                Clause::Or(subs) => {
                    let mut union = BTreeSet::new();
                    for sub in subs {
                        union.extend(sub.evaluate_indices(table)?);
                    }
                    working.retain(|i| union.contains(i));
                }
            }
        }
        Ok(working)
    }
}

/// Filter documents deserialize straight into their parsed form, so specs
/// can live inside larger serde-read structures (config files, request
/// bodies) without an intermediate [`JsonValue`] step.
impl<'de> serde::Deserialize<'de> for FilterSpec {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let doc: JsonValue = serde::Deserialize::deserialize(deserializer)?;
        FilterSpec::parse(&doc).map_err(serde::de::Error::custom)
    }
}

impl Test {
    fn matches(&self, value: &AttrValue) -> bool {
        match self {
            Test::Equals(want) => compare(value, want) == Ordering::Equal,
            Test::In(list) => list.iter().any(|v| compare(value, v) == Ordering::Equal),
            Test::GreaterThan(bound) => compare(value, bound) == Ordering::Greater,
            Test::LessThan(bound) => compare(value, bound) == Ordering::Less,
        }
    }
}

/// Compare two attribute values, coercing `Integer`/`Float` through `f64`
/// so `{"group": 3.0}` and `{"group": 3}` agree. Non-numeric pairs fall back
/// to `AttrValue`'s total order.
fn compare(a: &AttrValue, b: &AttrValue) -> Ordering {
    match (a.as_f64(), b.as_f64()) {
        (Some(x), Some(y)) => x.total_cmp(&y),
        _ => a.cmp(b),
    }
}

// ---------------------------------------------------------------------------
// Document parsing helpers
// ---------------------------------------------------------------------------

fn parse_or(val: &JsonValue) -> Result<Clause, Error> {
    let subs = val
        .as_array()
        .ok_or_else(|| Error::invalid(format!("`{OR_KEY}` expects an array of sub-filters")))?;
    let specs = subs
        .iter()
        .map(FilterSpec::parse)
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Clause::Or(specs))
}

fn parse_test(attr: &str, val: &JsonValue) -> Result<Test, Error> {
    let Some(obj) = val.as_object() else {
        // Plain scalar: exact equality.
        return Ok(Test::Equals(scalar_value(attr, val)?));
    };

    // At most one comparison operator per attribute-value mapping.
    let mut entries = obj.iter();
    let (op, operand) = match (entries.next(), entries.next()) {
        (Some(entry), None) => entry,
        _ => {
            return Err(Error::invalid(format!(
                "attribute `{attr}` expects exactly one comparison operator, got {}",
                obj.len()
            )))
        }
    };

    match op.as_str() {
        IN_KEY => {
            let list = operand.as_array().ok_or_else(|| {
                Error::invalid(format!("`{IN_KEY}` on `{attr}` expects an array"))
            })?;
            let values = list
                .iter()
                .map(|v| scalar_value(attr, v))
                .collect::<Result<Vec<_>, _>>()?;
            Ok(Test::In(values))
        }
        GT_KEY => Ok(Test::GreaterThan(scalar_value(attr, operand)?)),
        LT_KEY => Ok(Test::LessThan(scalar_value(attr, operand)?)),
        other => Err(Error::invalid(format!(
            "unsupported comparison operator `{other}` on attribute `{attr}`"
        ))),
    }
}

/// Convert a JSON scalar into an [`AttrValue`].
fn scalar_value(attr: &str, val: &JsonValue) -> Result<AttrValue, Error> {
    match val {
        JsonValue::String(s) => Ok(AttrValue::String(s.clone())),
        JsonValue::Number(n) => {
            if let Some(i) = n.as_i64() {
                Ok(AttrValue::Integer(i))
            } else if let Some(f) = n.as_f64() {
                Ok(AttrValue::Float(f))
            } else {
                Err(Error::invalid(format!(
                    "attribute `{attr}`: number {n} is out of range"
                )))
            }
        }
        JsonValue::Bool(b) => Ok(AttrValue::Bool(*b)),
        JsonValue::Null => Ok(AttrValue::Null),
        other => Err(Error::invalid(format!(
            "attribute `{attr}`: expected a scalar, got {other}"
        ))),
    }
}
