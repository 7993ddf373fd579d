//! Error types.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
/// Errors produced by opening and saving documents.
///
/// Structural edits never fail: out-of-range positions are ignored instead of reported.
pub enum KiloError {
    #[error("cannot open {}: {source}", path.display())]
    /// The file exists but could not be read. Fatal at startup.
    Open {
        /// The file being opened.
        path: PathBuf,
        /// The underlying I/O failure.
        #[source]
        source: io::Error,
    },

    #[error("{source}")]
    /// Writing the file failed. The buffer and its dirty counter are left untouched.
    Save {
        /// The file being written.
        path: PathBuf,
        /// The underlying I/O failure.
        #[source]
        source: io::Error,
    },

    #[error("no file name")]
    /// Save was requested for a buffer that was never given a file name.
    NoFileName,
}
