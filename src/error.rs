//! Crate-wide error type
//!
//! Detector logic never fails; these errors cover the host side of the tool
//! (reading and writing files, parsing, configuration, prompts, report
//! output).

use miette::Diagnostic;
use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error, Diagnostic)]
pub enum Error {
    #[error("failed to read or write {path}")]
    #[diagnostic(code(omitparens::io))]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("syntax error in {path} at {line}:{column}")]
    #[diagnostic(
        code(omitparens::syntax),
        help("the file is skipped; fix the syntax error and run again")
    )]
    Syntax {
        path: PathBuf,
        line: usize,
        column: usize,
    },

    #[error("failed to load the JavaScript grammar")]
    #[diagnostic(code(omitparens::language))]
    Language(#[from] tree_sitter::LanguageError),

    #[error("invalid configuration in {path}: {message}")]
    #[diagnostic(
        code(omitparens::config),
        help("supported formats are .toml, .yml/.yaml and .json")
    )]
    Config { path: PathBuf, message: String },

    #[error("failed to serialize report")]
    #[diagnostic(code(omitparens::json))]
    Json(#[from] serde_json::Error),

    #[error("failed to read confirmation")]
    #[diagnostic(code(omitparens::prompt))]
    Prompt(#[from] dialoguer::Error),

    #[error("failed to walk {path}: {message}")]
    #[diagnostic(code(omitparens::discovery))]
    Discovery { path: PathBuf, message: String },
}

impl Error {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::Io {
            path: path.into(),
            source,
        }
    }
}
