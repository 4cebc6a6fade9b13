// src/settings/io.rs
use bevy::log::{debug, error, info, warn};
use directories_next::ProjectDirs;
use std::fs;
use std::io::{self, BufReader, BufWriter, ErrorKind};
use std::path::{Path, PathBuf};

use super::AppSettings;

const QUALIFIER: &str = "com";
const ORGANIZATION: &str = "LocationTable";
const APPLICATION: &str = "LocationTableViewer";
const CONFIG_FILE: &str = "app_settings.json";

fn get_config_path() -> io::Result<PathBuf> {
    let proj_dirs = ProjectDirs::from(QUALIFIER, ORGANIZATION, APPLICATION).ok_or_else(|| {
        io::Error::new(
            ErrorKind::NotFound,
            "Could not determine project directories for app settings.",
        )
    })?;
    let config_dir = proj_dirs.config_dir();
    fs::create_dir_all(config_dir)?;
    Ok(config_dir.join(CONFIG_FILE))
}

/// Reads settings from `path`. A missing file yields the defaults.
pub fn load_settings_from_path<T: for<'de> serde::de::Deserialize<'de> + Default>(
    path: &Path,
) -> io::Result<T> {
    info!("AppSettings: Attempting to load settings from {:?}", path);
    match fs::File::open(path) {
        Ok(file) => serde_json::from_reader(BufReader::new(file)).map_err(|e| {
            error!("AppSettings: Failed to parse settings file {:?}: {}", path, e);
            io::Error::new(ErrorKind::InvalidData, format!("Failed to parse settings file: {}", e))
        }),
        Err(e) if e.kind() == ErrorKind::NotFound => {
            info!("AppSettings: Settings file not found at {:?}. Returning default.", path);
            Ok(T::default())
        }
        Err(e) => {
            error!("AppSettings: Failed to open settings file {:?}: {}", path, e);
            Err(e)
        }
    }
}

pub fn save_settings_to_path<T: serde::Serialize>(settings: &T, path: &Path) -> io::Result<()> {
    debug!("AppSettings: Saving settings to {:?}", path);
    let writer = BufWriter::new(fs::File::create(path)?);
    serde_json::to_writer_pretty(writer, settings).map_err(|e| {
        error!("AppSettings: Failed to serialize settings to {:?}: {}", path, e);
        io::Error::new(ErrorKind::Other, e)
    })
}

pub fn save_settings_to_file<T: serde::Serialize>(settings: &T) -> io::Result<()> {
    let config_file = get_config_path()?;
    save_settings_to_path(settings, &config_file)?;
    info!("AppSettings: Saved settings to {:?}", config_file);
    Ok(())
}

/// Loads the settings file, falling back to defaults on any error.
pub fn load_settings_or_default() -> AppSettings {
    let loaded = get_config_path().and_then(|path| load_settings_from_path(&path));
    match loaded {
        Ok(settings) => settings,
        Err(e) => {
            warn!("AppSettings: Using default settings: {}", e);
            AppSettings::default()
        }
    }
}
