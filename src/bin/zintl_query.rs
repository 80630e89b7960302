//! Generate the Zintl-phase chemical-system list (alkali or alkaline-earth
//! elements paired with groups 13–16) and print the compound-database
//! criteria document it produces.

use anyhow::{Context, Result};
use serde_json::json;

use chemsys::{chemsys_criteria, generate_systems, periodic_table, ElementSpec};

fn main() -> Result<()> {
    env_logger::init();

    let slots = [
        ElementSpec::parse(&json!({"group": {"$in": [13, 14, 15, 16]}}))
            .context("parsing group-13..16 slot")?,
        ElementSpec::parse(&json!({"$or": [{"is_alkali": true}, {"is_alkaline": true}]}))
            .context("parsing alkali-or-alkaline slot")?,
    ];

    let systems = generate_systems(&slots, periodic_table())
        .context("generating chemical systems")?;
    let criteria = chemsys_criteria(&systems);

    println!("{}", serde_json::to_string_pretty(&criteria)?);
    eprintln!("{} chemical systems", systems.len());
    Ok(())
}
