use std::collections::BTreeMap;
use std::fmt;

use crate::error::Error;

// ---------------------------------------------------------------------------
// AttrValue – a single element attribute value
// ---------------------------------------------------------------------------

/// A dynamically-typed attribute value, mirroring the JSON scalars that
/// filter documents are written in.
/// Filter evaluation keeps these in ordered sets, so `AttrValue` must be `Ord`.
#[derive(Debug, Clone, PartialEq)]
pub enum AttrValue {
    String(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
    Null,
}

// -- Manual Eq/Ord so we can put AttrValue in BTreeSet --

impl Eq for AttrValue {}

impl PartialOrd for AttrValue {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for AttrValue {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        use AttrValue::*;
        fn discriminant(v: &AttrValue) -> u8 {
            match v {
                Null => 0,
                Bool(_) => 1,
                Integer(_) => 2,
                Float(_) => 3,
                String(_) => 4,
            }
        }
        let da = discriminant(self);
        let db = discriminant(other);
        if da != db {
            return da.cmp(&db);
        }
        match (self, other) {
            (Null, Null) => std::cmp::Ordering::Equal,
            (Bool(a), Bool(b)) => a.cmp(b),
            (Integer(a), Integer(b)) => a.cmp(b),
            (Float(a), Float(b)) => a.total_cmp(b),
            (String(a), String(b)) => a.cmp(b),
            _ => std::cmp::Ordering::Equal,
        }
    }
}

impl std::hash::Hash for AttrValue {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        match self {
            AttrValue::String(s) => s.hash(state),
            AttrValue::Integer(i) => i.hash(state),
            AttrValue::Float(f) => f.to_bits().hash(state),
            AttrValue::Bool(b) => b.hash(state),
            AttrValue::Null => {}
        }
    }
}

impl fmt::Display for AttrValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttrValue::String(s) => write!(f, "{s}"),
            AttrValue::Integer(i) => write!(f, "{i}"),
            AttrValue::Float(v) => write!(f, "{v}"),
            AttrValue::Bool(b) => write!(f, "{b}"),
            AttrValue::Null => write!(f, "<null>"),
        }
    }
}

impl AttrValue {
    /// Try to interpret the value as an `f64` for numeric comparisons.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            AttrValue::Float(v) => Some(*v),
            AttrValue::Integer(i) => Some(*i as f64),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Element – one periodic-table entry
// ---------------------------------------------------------------------------

/// A single chemical element. Immutable once the universe is built;
/// group, period, and classification flags are derived from the atomic number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    /// Atomic number Z (1..=118).
    pub number: u32,
    /// Short symbol, e.g. "Na".
    pub symbol: &'static str,
    /// English name, e.g. "Sodium".
    pub name: &'static str,
}

impl Element {
    /// Periodic-table group, 1..=18. Lanthanoids and actinoids report
    /// group 3, the convention of the data provider this crate shadows.
    pub fn group(&self) -> u32 {
        let z = self.number;
        match z {
            1 => 1,
            2 => 18,
            3..=18 => {
                // Periods 2 and 3: groups 1, 2, then 13..=18.
                let col = z - if z <= 10 { 2 } else { 10 };
                if col <= 2 { col } else { col + 10 }
            }
            19..=54 => z - if z <= 36 { 18 } else { 36 },
            _ => {
                // Periods 6 and 7: the f-block collapses into group 3.
                let col = z - if z <= 86 { 54 } else { 86 };
                match col {
                    1 | 2 => col,
                    3..=17 => 3,
                    _ => col - 14,
                }
            }
        }
    }

    /// Periodic-table period, 1..=7.
    pub fn period(&self) -> u32 {
        match self.number {
            1..=2 => 1,
            3..=10 => 2,
            11..=18 => 3,
            19..=36 => 4,
            37..=54 => 5,
            55..=86 => 6,
            _ => 7,
        }
    }

    /// Group 1 minus hydrogen.
    pub fn is_alkali(&self) -> bool {
        self.number != 1 && self.group() == 1
    }

    /// Group 2 (alkaline earth metals).
    pub fn is_alkaline(&self) -> bool {
        self.group() == 2
    }

    pub fn is_metalloid(&self) -> bool {
        matches!(self.symbol, "B" | "Si" | "Ge" | "As" | "Sb" | "Te" | "Po")
    }

    /// Group 17.
    pub fn is_halogen(&self) -> bool {
        self.group() == 17
    }

    /// Group 18.
    pub fn is_noble_gas(&self) -> bool {
        self.group() == 18
    }

    /// d-block elements, groups 3..=12 (f-block excluded).
    pub fn is_transition_metal(&self) -> bool {
        let g = self.group();
        (3..=12).contains(&g) && !self.is_lanthanoid() && !self.is_actinoid()
    }

    /// La..=Lu.
    pub fn is_lanthanoid(&self) -> bool {
        (57..=71).contains(&self.number)
    }

    /// Ac..=Lr.
    pub fn is_actinoid(&self) -> bool {
        (89..=103).contains(&self.number)
    }

    /// Look up an attribute by its filter-document name.
    ///
    /// Fails with [`Error::UnknownAttribute`] for names outside the fixed
    /// attribute set: a filter referencing a typo'd attribute must surface
    /// immediately rather than silently match nothing.
    pub fn attr(&self, name: &str) -> Result<AttrValue, Error> {
        let value = match name {
            "symbol" => AttrValue::String(self.symbol.to_string()),
            "name" => AttrValue::String(self.name.to_string()),
            "number" => AttrValue::Integer(self.number as i64),
            "group" => AttrValue::Integer(self.group() as i64),
            "period" => AttrValue::Integer(self.period() as i64),
            "is_alkali" => AttrValue::Bool(self.is_alkali()),
            "is_alkaline" => AttrValue::Bool(self.is_alkaline()),
            "is_metalloid" => AttrValue::Bool(self.is_metalloid()),
            "is_halogen" => AttrValue::Bool(self.is_halogen()),
            "is_noble_gas" => AttrValue::Bool(self.is_noble_gas()),
            "is_transition_metal" => AttrValue::Bool(self.is_transition_metal()),
            "is_lanthanoid" => AttrValue::Bool(self.is_lanthanoid()),
            "is_actinoid" => AttrValue::Bool(self.is_actinoid()),
            other => return Err(Error::UnknownAttribute(other.to_string())),
        };
        Ok(value)
    }
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol)
    }
}

// ---------------------------------------------------------------------------
// PeriodicTable – the complete element universe
// ---------------------------------------------------------------------------

/// The full element universe with a pre-computed symbol index.
/// Iteration order is atomic-number order and is the order filter results
/// come back in.
#[derive(Debug, Clone)]
pub struct PeriodicTable {
    elements: Vec<Element>,
    by_symbol: BTreeMap<&'static str, usize>,
}

impl PeriodicTable {
    /// Build the symbol index from an element list.
    pub(crate) fn from_elements(elements: Vec<Element>) -> Self {
        let by_symbol = elements
            .iter()
            .enumerate()
            .map(|(i, el)| (el.symbol, i))
            .collect();
        PeriodicTable {
            elements,
            by_symbol,
        }
    }

    /// All elements in atomic-number order.
    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    /// Look up an element by symbol.
    pub fn get(&self, symbol: &str) -> Option<&Element> {
        self.by_symbol.get(symbol).map(|&i| &self.elements[i])
    }

    /// Number of elements.
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Whether the universe is empty.
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }
}
