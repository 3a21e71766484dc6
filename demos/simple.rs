//! Basic JSON encoding and decoding of derived types.
//!
//! Run with: cargo run --example simple

use hookjson::{from_str, to_string, to_string_with_options, EncodeOptions};
use serde::{Deserialize, Serialize};
use std::error::Error;

#[derive(Debug, Serialize, Deserialize, PartialEq)]
struct User {
    name: String,
    age: u32,
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
struct Document {
    user: User,
}

fn main() -> Result<(), Box<dyn Error>> {
    let doc = Document {
        user: User {
            name: "William Williams".to_string(),
            age: 93,
        },
    };

    let compact = to_string(&doc)?;
    println!("Compact:\n{}\n", compact);

    let pretty = to_string_with_options(&doc, &EncodeOptions::new().with_indent(4))?;
    println!("Indented by 4:\n{}\n", pretty);

    let back: Document = from_str(&pretty)?;
    assert_eq!(doc, back);
    println!("✓ Round-trip successful");

    Ok(())
}
