//! Uuid command implementation.

use serde_json::Value;
use tessera_ident::IdentifierGenerator;

use crate::error::CliError;
use crate::output::format_json;

pub fn run(count: usize, json: bool) -> Result<(), CliError> {
    let mut generator = IdentifierGenerator::new();
    let ids = generator.generate_many(count)?;

    if json {
        let list = ids
            .iter()
            .map(|id| Value::String(id.to_string()))
            .collect::<Vec<_>>();
        println!("{}", format_json(&Value::Array(list)));
    } else {
        for id in &ids {
            println!("{}", id);
        }
    }
    Ok(())
}
