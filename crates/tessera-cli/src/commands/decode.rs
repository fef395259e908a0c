//! Decode command implementation.

use serde_json::json;
use tessera_codec::{decode_str, encode, process_data, EncodeOptions, Node};

use crate::error::CliError;
use crate::input::read_input;
use crate::output::{format_error_json, format_json};

pub fn run(input: Option<String>, objects: bool, json: bool) -> Result<(), CliError> {
    let text = read_input(input.as_deref())?;

    let node = match decode_str(text.trim(), !objects) {
        Ok(node) => node,
        Err(err) if json => {
            println!("{}", format_error_json(&err));
            return Err(CliError::Reported(err.message().to_string()));
        }
        Err(err) => return Err(err.into()),
    };

    if objects {
        let record = matches!(node, Node::Object(_));
        tracing::debug!(top_level_record = record, "decoded objects as records");
    }

    if json {
        let value = process_data(&node)?;
        println!("{}", format_json(&json!({ "ok": true, "value": value })));
    } else {
        let options = EncodeOptions::default() | EncodeOptions::PRETTY_PRINT;
        println!("{}", encode(&node, options)?);
    }
    Ok(())
}
