//! Customizing JSON output with EncodeOptions.
//!
//! Run with: cargo run --example custom_options

use hookjson::{to_string_with_options, EncodeOptions, KeyPolicy, Separators};
use serde::Serialize;
use std::collections::BTreeMap;
use std::error::Error;

#[derive(Debug, Serialize)]
struct Config {
    name: String,
    version: String,
    debug: bool,
    motto: String,
}

fn main() -> Result<(), Box<dyn Error>> {
    let config = Config {
        name: "MyApp".to_string(),
        version: "1.0.0".to_string(),
        debug: true,
        motto: "déjà vu ✓".to_string(),
    };

    println!("Compact:");
    println!("{}\n", hookjson::to_string(&config)?);

    println!("Spaced separators:");
    let spaced = EncodeOptions::new().with_separators(Separators::spaced());
    println!("{}\n", to_string_with_options(&(8, "Q"), &spaced)?);

    println!("Indented by 4, keys sorted:");
    let sorted = EncodeOptions::new().with_indent(4).with_sort_keys(true);
    println!("{}\n", to_string_with_options(&config, &sorted)?);

    println!("ASCII only:");
    let ascii = EncodeOptions::new().with_ascii_only(true);
    println!("{}\n", to_string_with_options(&config.motto, &ascii)?);

    println!("Integer keys, stringified:");
    let mut ranks = BTreeMap::new();
    ranks.insert(1, "gold");
    ranks.insert(2, "silver");
    let stringify = EncodeOptions::new().with_key_policy(KeyPolicy::Stringify);
    println!("{}", to_string_with_options(&ranks, &stringify)?);

    Ok(())
}
