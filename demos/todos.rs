//! Reads a list of todo records and reports the users who completed the most.
//!
//! Run with: cargo run --example todos [path/to/todos.json]
//!
//! Set `RUST_LOG=hookjson=debug` to see decode failures logged.

use hookjson::from_reader;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::error::Error;
use std::fs::File;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Deserialize)]
struct Todo {
    #[serde(rename = "userId")]
    user_id: u32,
    title: String,
    completed: bool,
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .try_init();
}

fn main() -> Result<(), Box<dyn Error>> {
    init_tracing();

    let path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "tests/fixtures/todos.json".to_string());
    let todos: Vec<Todo> = from_reader(File::open(&path)?)?;
    tracing::info!(path = path.as_str(), count = todos.len(), "loaded todos");

    let mut completed: BTreeMap<u32, Vec<&str>> = BTreeMap::new();
    for todo in todos.iter().filter(|t| t.completed) {
        completed.entry(todo.user_id).or_default().push(&todo.title);
    }

    let max = completed.values().map(Vec::len).max().unwrap_or(0);
    let top: Vec<u32> = completed
        .iter()
        .filter(|(_, titles)| titles.len() == max)
        .map(|(user, _)| *user)
        .collect();

    println!("Most completed todos ({}): users {:?}", max, top);
    for user in &top {
        println!("  user {}: {:?}", user, completed[user]);
    }

    Ok(())
}
