//! Input helpers shared by commands.

use std::io::{self, Read};

use crate::error::CliError;

/// Reads the whole input from `path`, or from stdin when no path is given.
pub fn read_input(path: Option<&str>) -> Result<String, CliError> {
    match path {
        Some(path) => std::fs::read_to_string(path).map_err(|source| CliError::Input {
            source_name: format!("file {}", path),
            source,
        }),
        None => {
            let mut buffer = String::new();
            io::stdin()
                .read_to_string(&mut buffer)
                .map_err(|source| CliError::Input {
                    source_name: "stdin".to_string(),
                    source,
                })?;
            Ok(buffer)
        }
    }
}
