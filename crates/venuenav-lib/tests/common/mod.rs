//! Common test utilities and fixture helpers.

use std::fs;
use std::path::PathBuf;

use tempfile::TempDir;
use venuenav_lib::venue::BUNDLED_VENUE_JSON;
use venuenav_lib::{bundled_venue, Venue, VenueData};

/// The bundled expo venue, validated.
pub fn expo_venue() -> Venue {
    bundled_venue().expect("bundled venue is valid")
}

/// Raw expo venue data for tests that tamper with it before building.
#[allow(dead_code)]
pub fn expo_data() -> VenueData {
    VenueData::from_json_str(BUNDLED_VENUE_JSON).expect("bundled venue parses")
}

/// Temporary directory holding a venue JSON file.
#[allow(dead_code)]
pub struct VenueFile {
    _temp_dir: TempDir,
    pub path: PathBuf,
}

#[allow(dead_code)]
impl VenueFile {
    /// Write `data` as `venue.json` in a fresh temporary directory.
    pub fn write(data: &VenueData) -> Self {
        let temp_dir = TempDir::new().expect("create temp dir");
        let path = temp_dir.path().join("venue.json");
        let json = serde_json::to_string_pretty(data).expect("serialize venue");
        fs::write(&path, json).expect("write venue file");
        Self {
            _temp_dir: temp_dir,
            path,
        }
    }

    /// Write arbitrary text as `venue.json`.
    pub fn raw(text: &str) -> Self {
        let temp_dir = TempDir::new().expect("create temp dir");
        let path = temp_dir.path().join("venue.json");
        fs::write(&path, text).expect("write venue file");
        Self {
            _temp_dir: temp_dir,
            path,
        }
    }
}
