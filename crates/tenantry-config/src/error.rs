use std::collections::BTreeSet;
use std::path::PathBuf;

use thiserror::Error;

/// Error returned when no supplier accepts a file.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolutionError {
    #[error(
        "No builder factory supplier for file {}, supported extensions: {}",
        .path.display(),
        join_extensions(.supported_extensions)
    )]
    NoSupplier {
        path: PathBuf,
        /// Union of the extensions of every supplier considered.
        supported_extensions: BTreeSet<String>,
    },
}

fn join_extensions(extensions: &BTreeSet<String>) -> String {
    if extensions.is_empty() {
        return "none".to_string();
    }
    extensions
        .iter()
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}
