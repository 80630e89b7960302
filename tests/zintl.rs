//! End-to-end properties of filter evaluation, system generation, and the
//! compound-database seam, checked against the real periodic table.

use anyhow::bail;
use serde_json::{json, Value as JsonValue};

use chemsys::{
    generate_systems, periodic_table, search_systems, CompoundDatabase, ElementSpec, FilterSpec,
    Record,
};

fn slot(doc: JsonValue) -> ElementSpec {
    ElementSpec::parse(&doc).expect("valid element specification")
}

#[test]
fn equality_filters_return_exactly_the_matching_subset() {
    let spec = FilterSpec::parse(&json!({"period": 2, "is_metalloid": true})).unwrap();
    let via_filter: Vec<&str> = spec
        .evaluate(periodic_table())
        .unwrap()
        .iter()
        .map(|el| el.symbol)
        .collect();

    let direct: Vec<&str> = periodic_table()
        .elements()
        .iter()
        .filter(|el| el.period() == 2 && el.is_metalloid())
        .map(|el| el.symbol)
        .collect();

    assert_eq!(via_filter, direct);
    assert_eq!(via_filter, vec!["B"]);
}

#[test]
fn group1_group2_pairs_have_one_symbol_from_each_group() {
    let slots = [slot(json!({"group": 1})), slot(json!({"group": 2}))];
    let systems = generate_systems(&slots, periodic_table()).unwrap();
    assert!(!systems.is_empty());

    for system in &systems {
        let groups: Vec<u32> = system
            .split('-')
            .map(|sym| periodic_table().get(sym).unwrap().group())
            .collect();
        let mut groups = groups;
        groups.sort_unstable();
        assert_eq!(groups, vec![1, 2], "bad system `{system}`");
    }
}

#[test]
fn generation_is_deterministic() {
    let slots = [
        slot(json!({"group": {"$in": [13, 14]}})),
        slot(json!({"is_alkali": true})),
    ];
    let first = generate_systems(&slots, periodic_table()).unwrap();
    let second = generate_systems(&slots, periodic_table()).unwrap();
    assert_eq!(first, second);
}

#[test]
fn output_is_sorted_and_symbols_are_sorted_within_each_string() {
    let slots = [
        slot(json!({"is_alkaline": true})),
        slot(json!({"group": {"$in": [16, 17]}})),
    ];
    let systems = generate_systems(&slots, periodic_table()).unwrap();

    assert!(systems.windows(2).all(|w| w[0] <= w[1]));
    for system in &systems {
        let symbols: Vec<&str> = system.split('-').collect();
        assert!(symbols.windows(2).all(|w| w[0] <= w[1]), "bad system `{system}`");
    }
}

#[test]
fn an_empty_slot_yields_an_empty_result_not_an_error() {
    let slots = [
        slot(json!({"is_alkali": true})),
        // No element is both alkali and a noble gas.
        slot(json!({"is_alkali": true, "is_noble_gas": true})),
    ];
    let systems = generate_systems(&slots, periodic_table()).unwrap();
    assert!(systems.is_empty());
}

#[test]
fn zintl_systems_match_an_independent_enumeration() {
    let slots = [
        slot(json!({"group": {"$in": [13, 14, 15, 16]}})),
        slot(json!({"$or": [{"is_alkali": true}, {"is_alkaline": true}]})),
    ];
    let via_filters = generate_systems(&slots, periodic_table()).unwrap();

    // Independent rendition of the same semantic query, written directly
    // against element attributes.
    let table = periodic_table();
    let anions: Vec<&str> = table
        .elements()
        .iter()
        .filter(|el| (13..=16).contains(&el.group()))
        .map(|el| el.symbol)
        .collect();
    let cations: Vec<&str> = table
        .elements()
        .iter()
        .filter(|el| el.is_alkali() || el.is_alkaline())
        .map(|el| el.symbol)
        .collect();

    let mut direct = Vec::new();
    for a in &anions {
        for c in &cations {
            let mut pair = [*a, *c];
            pair.sort_unstable();
            direct.push(pair.join("-"));
        }
    }
    direct.sort_unstable();

    assert_eq!(via_filters, direct);
    assert!(via_filters.binary_search(&"Na-Si".to_string()).is_ok());
    assert_eq!(via_filters.len(), anions.len() * cations.len());
}

#[test]
fn identical_slots_produce_self_pairs_and_duplicates() {
    let slots = [slot(json!({"group": 3})), slot(json!({"group": 3}))];
    let systems = generate_systems(&slots, periodic_table()).unwrap();

    let group3 = periodic_table()
        .elements()
        .iter()
        .filter(|el| el.group() == 3)
        .count();
    // Sc, Y, plus the whole f-block.
    assert_eq!(group3, 32);
    assert_eq!(systems.len(), group3 * group3);

    // Self-pairs appear, and distinct pairs appear once per tuple ordering.
    assert!(systems.contains(&"Ac-Ac".to_string()));
    let ac_la = systems.iter().filter(|s| *s == "Ac-La").count();
    assert_eq!(ac_la, 2);
}

// ---------------------------------------------------------------------------
// Compound-database seam
// ---------------------------------------------------------------------------

/// In-memory stand-in for the remote compound database.
struct StaticDb {
    records: Vec<Record>,
}

impl CompoundDatabase for StaticDb {
    fn search(&self, criteria: &JsonValue, fields: &[&str]) -> anyhow::Result<Vec<Record>> {
        let Some(wanted) = criteria
            .pointer("/chemsys/$in")
            .and_then(JsonValue::as_array)
        else {
            bail!("unsupported criteria document: {criteria}");
        };

        let hits = self
            .records
            .iter()
            .filter(|rec| rec.get("chemsys").is_some_and(|v| wanted.contains(v)))
            .map(|rec| {
                rec.iter()
                    .filter(|(k, _)| fields.contains(&k.as_str()))
                    .map(|(k, v)| (k.clone(), v.clone()))
                    .collect()
            })
            .collect();
        Ok(hits)
    }
}

fn record(doc: JsonValue) -> Record {
    match doc {
        JsonValue::Object(map) => map,
        _ => unreachable!("records are JSON objects"),
    }
}

#[test]
fn search_systems_fetches_matching_records() {
    let db = StaticDb {
        records: vec![
            record(json!({"material_id": "mp-1", "chemsys": "Na-Si", "band_gap": 0.5})),
            record(json!({"material_id": "mp-2", "chemsys": "K-Si", "band_gap": 1.1})),
            record(json!({"material_id": "mp-3", "chemsys": "Fe-O", "band_gap": 2.0})),
        ],
    };

    let slots = [slot(json!(["Na", "K"])), slot(json!(["Si"]))];
    let hits = search_systems(&db, &slots, &["material_id"], periodic_table()).unwrap();

    let ids: Vec<&str> = hits
        .iter()
        .map(|rec| rec.get("material_id").and_then(JsonValue::as_str).unwrap())
        .collect();
    assert_eq!(ids, vec!["mp-1", "mp-2"]);
    assert!(hits.iter().all(|rec| !rec.contains_key("band_gap")));
}

#[test]
fn search_systems_skips_the_database_when_nothing_is_generated() {
    struct FailingDb;
    impl CompoundDatabase for FailingDb {
        fn search(&self, _: &JsonValue, _: &[&str]) -> anyhow::Result<Vec<Record>> {
            bail!("the database must not be queried for an empty system list")
        }
    }

    let slots = [slot(json!({"is_alkali": true, "is_noble_gas": true}))];
    let hits = search_systems(&FailingDb, &slots, &["material_id"], periodic_table()).unwrap();
    assert!(hits.is_empty());
}
