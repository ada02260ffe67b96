use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

use crate::constants::*;
use crate::error::SettingsError;
use crate::world::store::EvictionPolicy;

const MAGIC_HEADER: &[u8; 4] = b"TSST";
const VERSION: u32 = 1;

pub const DEFAULT_SETTINGS_FILE: &str = "stream_settings.bin";

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct StreamSettings {
    /// Noise seed. `None` picks a random one at startup.
    pub seed: Option<u32>,
    pub max_chunks: usize,
    /// Chebyshev radius of the attached neighborhood (1 = 3x3).
    pub view_radius: i32,
    pub eviction: EvictionPolicy,
}

impl Default for StreamSettings {
    fn default() -> Self {
        Self {
            seed: None,
            max_chunks: MAX_CHUNKS,
            view_radius: VIEW_RADIUS,
            eviction: EvictionPolicy::default(),
        }
    }
}

impl StreamSettings {
    pub fn resolve_seed(&self) -> u32 {
        self.seed.unwrap_or_else(|| rand::random_range(0..100))
    }
}

pub fn encode_settings(settings: &StreamSettings) -> Result<Vec<u8>, SettingsError> {
    let data = bincode::serialize(settings)?;
    let mut bytes = Vec::with_capacity(MAGIC_HEADER.len() + 4 + data.len());
    bytes.extend_from_slice(MAGIC_HEADER);
    bytes.extend_from_slice(&VERSION.to_le_bytes());
    bytes.extend_from_slice(&data);
    Ok(bytes)
}

pub fn decode_settings(bytes: &[u8]) -> Result<StreamSettings, SettingsError> {
    if bytes.len() < 8 || &bytes[..4] != MAGIC_HEADER {
        return Err(SettingsError::BadMagic);
    }
    let mut version_bytes = [0u8; 4];
    version_bytes.copy_from_slice(&bytes[4..8]);
    let version = u32::from_le_bytes(version_bytes);
    if version != VERSION {
        return Err(SettingsError::UnsupportedVersion(version));
    }
    Ok(bincode::deserialize(&bytes[8..])?)
}

pub fn save_settings<P: AsRef<Path>>(path: P, settings: &StreamSettings) -> Result<(), SettingsError> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    writer.write_all(&encode_settings(settings)?)?;
    writer.flush()?;
    Ok(())
}

pub fn load_settings<P: AsRef<Path>>(path: P) -> Result<StreamSettings, SettingsError> {
    let file = File::open(path)?;
    let mut reader = BufReader::new(file);
    let mut bytes = Vec::new();
    reader.read_to_end(&mut bytes)?;
    decode_settings(&bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = StreamSettings::default();
        assert_eq!(settings.max_chunks, 100);
        assert_eq!(settings.view_radius, 1);
        assert_eq!(settings.eviction, EvictionPolicy::LeastRecentlyUsed);
        assert!(settings.resolve_seed() < 100);
    }

    #[test]
    fn test_fixed_seed_is_kept() {
        let settings = StreamSettings {
            seed: Some(42),
            ..StreamSettings::default()
        };
        assert_eq!(settings.resolve_seed(), 42);
    }

    #[test]
    fn test_save_and_load_file() {
        let path = std::env::temp_dir().join(format!("terrastream-{}.bin", std::process::id()));
        let settings = StreamSettings {
            seed: Some(7),
            max_chunks: 64,
            view_radius: 2,
            eviction: EvictionPolicy::Reject,
        };
        save_settings(&path, &settings).unwrap();
        let loaded = load_settings(&path).unwrap();
        std::fs::remove_file(&path).ok();
        assert_eq!(loaded, settings);
    }

    #[test]
    fn test_rejects_foreign_data() {
        assert!(matches!(
            decode_settings(b"R3DW\x01\x00\x00\x00"),
            Err(SettingsError::BadMagic)
        ));
        assert!(matches!(decode_settings(b"TS"), Err(SettingsError::BadMagic)));

        let mut bytes = encode_settings(&StreamSettings::default()).unwrap();
        bytes[4] = 9;
        assert!(matches!(
            decode_settings(&bytes),
            Err(SettingsError::UnsupportedVersion(9))
        ));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let result = load_settings("/nonexistent/terrastream/settings.bin");
        assert!(matches!(result, Err(SettingsError::Io(_))));
    }
}
