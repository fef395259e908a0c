//! Encode command implementation.

use tessera_codec::{decode_str, encode, EncodeOptions};

use crate::error::CliError;
use crate::input::read_input;

fn select_options(html: bool, pretty: bool, raw: Option<u32>) -> EncodeOptions {
    let mut options = match (html, raw) {
        (true, _) => EncodeOptions::HTML,
        (false, Some(bits)) => EncodeOptions::from_bits(bits),
        (false, None) => EncodeOptions::default(),
    };
    if pretty {
        options |= EncodeOptions::PRETTY_PRINT;
    }
    options
}

pub fn run(
    input: Option<String>,
    html: bool,
    pretty: bool,
    raw_options: Option<u32>,
) -> Result<(), CliError> {
    let text = read_input(input.as_deref())?;
    let node = decode_str(text.trim(), true)?;
    let options = select_options(html, pretty, raw_options);
    tracing::debug!(options = ?options, "encoding input");

    println!("{}", encode(&node, options)?);
    Ok(())
}
