//! Tracker configuration.

use std::path::PathBuf;

use ct_spatial::DEFAULT_BUFFER_KM;

/// Default location of the camera list.
pub const DEFAULT_DATA_FILE: &str = "cameras.json";

/// Settings shared by the tracker and its persistence.
#[derive(Clone, Debug, PartialEq)]
pub struct TrackerConfig {
    /// Cameras farther than this from every route node are left out of a
    /// route report, km.
    pub buffer_km: f64,
    /// Where the camera list is persisted.
    pub data_file: PathBuf,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            buffer_km: DEFAULT_BUFFER_KM,
            data_file: PathBuf::from(DEFAULT_DATA_FILE),
        }
    }
}

impl TrackerConfig {
    pub fn with_buffer_km(mut self, buffer_km: f64) -> Self {
        self.buffer_km = buffer_km;
        self
    }

    pub fn with_data_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.data_file = path.into();
        self
    }
}
