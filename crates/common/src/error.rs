/// Error type for the common crate
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Generic internal error
    #[error("Internal error: {0}")]
    Eyre(#[from] eyre::Report),

    /// An error that occurred while parsing input
    #[error("Parse error: {0}")]
    ParseError(String),

    /// An error that occurred while accessing the filesystem
    #[error("Filesystem error: {0}")]
    FilesystemError(#[from] std::io::Error),
}
