//! CLI command implementations.
//!
//! Each submodule implements one command and returns its output as a string;
//! the binary only parses arguments and prints.
//!
//! # Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `tag` | Tag a syllabus read from a file or stdin |
//! | `recommend` | Recommend courses for a job posting |
//! | `index` | Rebuild the vector indexes from the catalog |
//! | `config` | Show the resolved configuration |
//! | `completions` | Generate shell completions |
//!
//! # Example Usage
//!
//! ```bash
//! # Tag a syllabus
//! coursematch tag syllabus.txt
//!
//! # Build the indexes, then ask for recommendations
//! coursematch index
//! coursematch recommend --title "Data Scientist" --description "Python, SQL and ML"
//! ```

mod config;
mod index;
mod recommend;
mod tag;

pub use config::ConfigCommand;
pub use index::IndexCommand;
pub use recommend::RecommendCommand;
pub use tag::TagCommand;

use crate::{Error, Result};
use std::io::Read;
use std::path::Path;

/// Reads command input from a file, or from stdin when no path is given.
///
/// # Errors
///
/// Returns an error if the input cannot be read.
pub fn read_input(path: Option<&Path>) -> Result<String> {
    match path {
        Some(path) => std::fs::read_to_string(path).map_err(|e| Error::OperationFailed {
            operation: "read_input".to_string(),
            cause: format!("{}: {e}", path.display()),
        }),
        None => {
            let mut buffer = String::new();
            std::io::stdin()
                .read_to_string(&mut buffer)
                .map_err(|e| Error::OperationFailed {
                    operation: "read_stdin".to_string(),
                    cause: e.to_string(),
                })?;
            Ok(buffer)
        },
    }
}
