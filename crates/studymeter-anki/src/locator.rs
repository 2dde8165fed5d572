//! Collection file discovery

use std::path::PathBuf;

use crate::error::{CollectionError, Result};

/// Environment variable naming the collection file directly
pub const COLLECTION_ENV: &str = "STUDYMETER_COLLECTION";

pub const DEFAULT_PROFILE: &str = "User 1";

const COLLECTION_FILE: &str = "collection.anki2";

/// Per-platform Anki data directories, relative to the home directory
const PLATFORM_DIRS: [&str; 3] = [
    "AppData/Roaming/Anki2",
    ".local/share/Anki2",
    "Library/Application Support/Anki2",
];

/// Resolves where the collection lives.
///
/// An explicit path wins, then `STUDYMETER_COLLECTION`; otherwise the
/// Windows, Linux and macOS profile directories are searched in that order.
/// The home directory is only needed for that last step.
#[derive(Debug, Clone)]
pub struct CollectionLocator {
    home: Option<PathBuf>,
    profile: String,
    explicit: Option<PathBuf>,
}

impl CollectionLocator {
    pub fn new() -> Self {
        Self {
            home: dirs::home_dir(),
            profile: DEFAULT_PROFILE.to_string(),
            explicit: None,
        }
    }

    pub fn with_home(home: impl Into<PathBuf>) -> Self {
        Self {
            home: Some(home.into()),
            ..Self::new()
        }
    }

    pub fn profile(mut self, profile: impl Into<String>) -> Self {
        self.profile = profile.into();
        self
    }

    pub fn explicit(mut self, path: Option<PathBuf>) -> Self {
        self.explicit = path;
        self
    }

    /// Paths tried by [`locate`](Self::locate), in order
    pub fn candidates(&self) -> Result<Vec<PathBuf>> {
        let overridden = self.explicit.clone().or_else(|| {
            std::env::var_os(COLLECTION_ENV)
                .filter(|v| !v.is_empty())
                .map(PathBuf::from)
        });
        if let Some(path) = overridden {
            return Ok(vec![path]);
        }

        let home = self.home.as_ref().ok_or(CollectionError::NoHomeDir)?;
        Ok(PLATFORM_DIRS
            .iter()
            .map(|dir| home.join(dir).join(&self.profile).join(COLLECTION_FILE))
            .collect())
    }

    pub fn locate(&self) -> Result<PathBuf> {
        let candidates = self.candidates()?;
        match candidates.iter().find(|p| p.is_file()) {
            Some(found) => {
                tracing::debug!(path = %found.display(), "found collection");
                Ok(found.clone())
            }
            None => Err(CollectionError::NotFound {
                searched: candidates,
            }),
        }
    }
}

impl Default for CollectionLocator {
    fn default() -> Self {
        Self::new()
    }
}
