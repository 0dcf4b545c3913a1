//! Error types for the editor core

use shared::{ColorParseError, NumericError, ObjectId};

/// A scene mutation the store refused to apply
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SceneError {
    /// Deleting the ground plate or the spawn marker
    #[error("'{name}' (#{id}) is part of the scene scaffolding and cannot be deleted")]
    Protected { id: ObjectId, name: String },
}

/// Failure of the project blob store
#[derive(Debug, thiserror::Error)]
pub enum PersistenceError {
    #[error("no data directory available on this platform")]
    NoDataDir,
    #[error("invalid project key '{0}'")]
    InvalidKey(String),
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed project data: {0}")]
    Json(#[from] serde_json::Error),
}

/// Typed input rejected before it reaches the scene store
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum InputError {
    #[error(transparent)]
    Numeric(#[from] NumericError),
    #[error(transparent)]
    Color(#[from] ColorParseError),
    #[error("name must not be empty")]
    EmptyName,
}
