//! Profile persistence
//!
//! The profile lives in a single JSON document under the user's home
//! directory. [`load_or_init`] is the entry point used at start-up: an
//! unreadable file is replaced by the starter profile, while a readable file
//! with invalid content is reported to the caller.

use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

use log::{info, warn};

use super::data::Profile;
use super::error::ProfileError;

/// File name of the profile inside the home directory
pub const PROFILE_FILE_NAME: &str = "TaxcnSrc.json";

/// Environment variable overriding the full profile path
pub const PROFILE_PATH_ENV: &str = "TAXCN_PROFILE";

/// Storage backend for a single profile snapshot
pub trait ProfileStore {
    /// Read and deserialize the stored profile
    fn load(&self) -> Result<Profile, ProfileError>;

    /// Persist the profile, replacing any previous snapshot
    fn save(&self, profile: &Profile) -> Result<(), ProfileError>;
}

/// Load the stored profile, creating it with [`Profile::default_settings`]
/// when it cannot be read.
///
/// A failed save of the starter profile is logged and otherwise ignored; the
/// starter values are still returned.
pub fn load_or_init<S: ProfileStore + ?Sized>(store: &S) -> Result<Profile, ProfileError> {
    match store.load() {
        Ok(profile) => Ok(profile),
        Err(ProfileError::Read { path, source }) => {
            info!("no readable profile at {} ({}), writing defaults", path.display(), source);
            let profile = Profile::default_settings();
            if let Err(e) = store.save(&profile) {
                warn!("default profile was not saved: {}", e);
            }
            Ok(profile)
        }
        Err(e) => Err(e),
    }
}

/// Profile stored as JSON on the local filesystem
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }

    /// Store at the default per-user location (see [`resolve_profile_path`])
    pub fn from_env() -> Result<Self, ProfileError> {
        let path = resolve_profile_path(|key| std::env::var_os(key), std::env::home_dir)?;
        Ok(Self::new(path))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ProfileStore for JsonFileStore {
    fn load(&self) -> Result<Profile, ProfileError> {
        let data = fs::read(&self.path).map_err(|source| ProfileError::Read {
            path: self.path.clone(),
            source,
        })?;

        serde_json::from_slice(&data).map_err(|source| ProfileError::Parse {
            path: self.path.clone(),
            source,
        })
    }

    fn save(&self, profile: &Profile) -> Result<(), ProfileError> {
        let data = serde_json::to_vec_pretty(profile).map_err(ProfileError::Serialize)?;

        fs::write(&self.path, data).map_err(|source| ProfileError::Write {
            path: self.path.clone(),
            source,
        })
    }
}

/// Work out where the profile lives.
///
/// `TAXCN_PROFILE` wins when set and non-empty; otherwise the file sits in
/// `$HOME` (or `%USERPROFILE%`), and failing both, in the home directory
/// recorded for the current account. Environment access goes through
/// `lookup` and the account query through `account_home`.
pub fn resolve_profile_path<F, H>(lookup: F, account_home: H) -> Result<PathBuf, ProfileError>
where
    F: Fn(&str) -> Option<OsString>,
    H: FnOnce() -> Option<PathBuf>,
{
    let non_empty = |key: &str| lookup(key).filter(|value| !value.is_empty());

    if let Some(path) = non_empty(PROFILE_PATH_ENV) {
        return Ok(PathBuf::from(path));
    }

    non_empty("HOME")
        .or_else(|| non_empty("USERPROFILE"))
        .map(PathBuf::from)
        .or_else(|| account_home().filter(|home| !home.as_os_str().is_empty()))
        .map(|home| home.join(PROFILE_FILE_NAME))
        .ok_or(ProfileError::HomeDirUnavailable)
}
