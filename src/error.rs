//! Error types for jellyfy.

use std::io;
use std::path::PathBuf;
use std::process::ExitStatus;

/// Filesystem failures while normalizing a season folder.
#[derive(Debug, thiserror::Error)]
pub enum RenameError {
    /// The folder is a filesystem root and has nowhere to be renamed to.
    #[error("folder has no parent directory: '{}'", .0.display())]
    NoParent(PathBuf),

    /// `Season NN` is already taken and force was not requested.
    #[error("target folder already exists: '{0}'")]
    DestinationExists(String),

    #[error("error checking target folder: {0}")]
    CheckDestination(#[source] io::Error),

    #[error("error renaming folder: {0}")]
    RenameFolder(#[source] io::Error),

    #[error("error reading directory: {0}")]
    ReadDir(#[source] io::Error),

    #[error("{0}")]
    RenameEpisode(#[source] io::Error),
}

/// A failure that stops the run before any episode is touched.
#[derive(Debug, thiserror::Error)]
pub enum RunError {
    #[error("Error renaming folder: {0}")]
    Folder(#[source] RenameError),

    #[error("Error listing episodes: {0}")]
    Listing(#[source] RenameError),
}

/// The external title editor could not do its job.
#[derive(Debug, thiserror::Error)]
pub enum TitleEditError {
    #[error("failed to run {tool}: {source}")]
    Spawn {
        tool: String,
        #[source]
        source: io::Error,
    },

    #[error("{tool} failed: {status}")]
    Failed { tool: String, status: ExitStatus },
}
