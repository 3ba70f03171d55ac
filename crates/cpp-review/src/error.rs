use mcp_common::error::CommonError;

use crate::model::Category;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Common(#[from] CommonError),

    #[error("parse error at line {line}: {message}")]
    Parse { line: usize, message: String },

    #[error("config error: {0}")]
    Config(String),

    #[error("descriptor error: {0}")]
    Descriptor(String),

    #[error("unknown category: '{0}'")]
    InvalidCategory(String),

    #[error("reference document not found: {0}")]
    DocumentNotFound(String),

    #[error("category '{category}' maps to missing document '{id}'")]
    UnresolvedDocument { category: Category, id: String },

    #[error("category '{category}' lists document '{id}' more than once")]
    DuplicateDocument { category: Category, id: String },
}
