use thiserror::Error;

/// Application-wide result type alias.
pub type Result<T> = std::result::Result<T, AppError>;

/// Application error types.
#[derive(Debug, Error)]
pub enum AppError {
    /// I/O errors from reading version or config files.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Terminal initialization or rendering errors.
    #[error("Terminal error: {0}")]
    Terminal(String),

    /// Invalid path provided by the user.
    #[error("Invalid path: {0}")]
    InvalidPath(String),

    /// The version file is not valid JSON or does not match the entry schema.
    #[error("Invalid version file: {0}")]
    VersionParse(#[from] serde_json::Error),

    /// An entry's parent directory was not found while building the tree.
    #[error("Malformed entry {path}: parent directory {parent:?} not found")]
    MalformedEntry { path: String, parent: String },

    /// A tree operation was requested before any version was loaded.
    #[error("No version loaded")]
    NoVersionLoaded,

    /// The logging subscriber could not be set up.
    #[error("Logging error: {0}")]
    Logging(String),
}
