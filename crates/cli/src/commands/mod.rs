//! CLI subcommands.

pub mod filters;
pub mod order;
pub mod quote;
pub mod track;

use thiserror::Error;

/// Errors shared by the subcommands.
#[derive(Debug, Error)]
pub enum CommandError {
    #[error("File not found: {0}")]
    FileNotFound(String),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("Cart line {line} rejected: {source}")]
    Cart {
        line: usize,
        source: threadline_core::CartError,
    },
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(&'static str),
    #[error("{0}")]
    Invalid(String),
}

/// Read and parse a YAML file.
pub(crate) async fn read_yaml<T: serde::de::DeserializeOwned>(
    file_path: &str,
) -> Result<T, CommandError> {
    let path = std::path::Path::new(file_path);
    if !path.exists() {
        return Err(CommandError::FileNotFound(file_path.to_string()));
    }
    let content = tokio::fs::read_to_string(path).await?;
    Ok(serde_yaml::from_str(&content)?)
}

/// Print a value as YAML on stdout.
#[allow(clippy::print_stdout)]
pub(crate) fn print_yaml<T: serde::Serialize>(value: &T) -> Result<(), CommandError> {
    print!("{}", serde_yaml::to_string(value)?);
    Ok(())
}
