use std::env;
use std::ffi::OsString;
use std::fmt;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use once_cell::sync::Lazy;
use tracing::debug;

use crate::error::{Error, Result};
use crate::venue::{bundled_venue, load_venue, Venue};

/// Environment variable pointing at a venue JSON file.
pub const VENUE_ENV_VAR: &str = "VENUENAV_VENUE";

/// Filename looked up in the platform configuration directory.
const VENUE_FILENAME: &str = "venue.json";

/// Platform configuration path, resolved once per process.
static USER_VENUE_PATH: Lazy<Option<PathBuf>> = Lazy::new(|| default_venue_path().ok());

/// Where the active venue description came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VenueSource {
    /// Path passed explicitly by the caller (e.g. `--venue`).
    Explicit(PathBuf),
    /// Path taken from [`VENUE_ENV_VAR`].
    Environment(PathBuf),
    /// `venue.json` found in the platform configuration directory.
    UserConfig(PathBuf),
    /// The venue compiled into the library.
    Bundled,
}

impl VenueSource {
    pub fn path(&self) -> Option<&Path> {
        match self {
            VenueSource::Explicit(path)
            | VenueSource::Environment(path)
            | VenueSource::UserConfig(path) => Some(path),
            VenueSource::Bundled => None,
        }
    }
}

impl fmt::Display for VenueSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VenueSource::Explicit(path) => write!(f, "{}", path.display()),
            VenueSource::Environment(path) => write!(f, "{} (from {VENUE_ENV_VAR})", path.display()),
            VenueSource::UserConfig(path) => write!(f, "{} (user config)", path.display()),
            VenueSource::Bundled => f.write_str("bundled venue"),
        }
    }
}

/// Resolve the default venue override location using platform-specific project directories.
pub fn default_venue_path() -> Result<PathBuf> {
    let dirs =
        ProjectDirs::from("com", "venuenav", "venuenav").ok_or(Error::ProjectDirsUnavailable)?;
    Ok(dirs.config_dir().join(VENUE_FILENAME))
}

/// Decide which venue description to use.
///
/// Precedence: explicit path, then [`VENUE_ENV_VAR`], then `venue.json` in the
/// platform config directory when it exists, then the bundled venue.
pub fn resolve_venue_source(explicit: Option<&Path>) -> VenueSource {
    resolve_venue_source_with(
        explicit,
        env::var_os(VENUE_ENV_VAR),
        USER_VENUE_PATH.as_deref(),
    )
}

fn resolve_venue_source_with(
    explicit: Option<&Path>,
    env_value: Option<OsString>,
    user_path: Option<&Path>,
) -> VenueSource {
    if let Some(path) = explicit {
        return VenueSource::Explicit(path.to_path_buf());
    }

    if let Some(value) = env_value.filter(|value| !value.is_empty()) {
        return VenueSource::Environment(PathBuf::from(value));
    }

    if let Some(path) = user_path {
        if path.exists() {
            return VenueSource::UserConfig(path.to_path_buf());
        }
        debug!(path = %path.display(), "no user venue file; using bundled venue");
    }

    VenueSource::Bundled
}

/// Load the venue selected by [`resolve_venue_source`].
pub fn load_configured_venue(explicit: Option<&Path>) -> Result<(Venue, VenueSource)> {
    let source = resolve_venue_source(explicit);
    let venue = match source.path() {
        Some(path) => load_venue(path)?,
        None => bundled_venue()?,
    };
    Ok((venue, source))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_path_wins() {
        let source = resolve_venue_source_with(
            Some(Path::new("/tmp/a.json")),
            Some(OsString::from("/tmp/b.json")),
            None,
        );
        assert_eq!(source, VenueSource::Explicit(PathBuf::from("/tmp/a.json")));
    }

    #[test]
    fn environment_beats_user_config() {
        let source =
            resolve_venue_source_with(None, Some(OsString::from("/tmp/b.json")), None);
        assert_eq!(
            source,
            VenueSource::Environment(PathBuf::from("/tmp/b.json"))
        );
    }

    #[test]
    fn empty_environment_value_is_ignored() {
        let source = resolve_venue_source_with(None, Some(OsString::new()), None);
        assert_eq!(source, VenueSource::Bundled);
    }

    #[test]
    fn existing_user_config_is_used() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join(VENUE_FILENAME);
        std::fs::write(&path, "{}").expect("write");
        let source = resolve_venue_source_with(None, None, Some(&path));
        assert_eq!(source, VenueSource::UserConfig(path));
    }

    #[test]
    fn missing_user_config_falls_back_to_bundled() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join(VENUE_FILENAME);
        let source = resolve_venue_source_with(None, None, Some(&path));
        assert_eq!(source, VenueSource::Bundled);
        assert!(source.path().is_none());
    }

    #[test]
    fn explicit_missing_file_is_an_error() {
        let err = load_configured_venue(Some(Path::new("/no/such/venue.json")))
            .expect_err("missing file");
        assert!(matches!(err, Error::VenueNotFound { .. }));
    }
}
