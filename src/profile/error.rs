use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while locating, reading or writing the persisted profile.
#[derive(Debug, Error)]
pub enum ProfileError {
    /// Neither `TAXCN_PROFILE` nor a home directory could be determined.
    #[error("unable to determine the home directory for the profile file")]
    HomeDirUnavailable,

    /// The profile file could not be read (missing, unreadable, ...).
    #[error("failed to read profile {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The file was read but does not hold a valid profile document.
    #[error("invalid profile {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to serialize profile: {0}")]
    Serialize(#[source] serde_json::Error),

    #[error("failed to write profile {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}
