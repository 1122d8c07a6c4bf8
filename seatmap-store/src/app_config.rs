use serde::Deserialize;
use std::env;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub storage: StorageConfig,
    pub session: SessionConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct StorageConfig {
    /// Directory holding flight files
    pub data_dir: PathBuf,
    /// Appended to flight names given without an extension
    #[serde(default)]
    pub extension: Option<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SessionConfig {
    #[serde(default)]
    pub report_format: ReportFormat,
    /// Ask for another preference when a single reservation fails
    pub offer_alternate_preference: bool,
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    #[default]
    Text,
    Json,
}

impl StorageConfig {
    /// Resolve a flight name to its file
    pub fn flight_path(&self, flight: &str) -> PathBuf {
        let file = Path::new(flight);
        match &self.extension {
            Some(ext) if file.extension().is_none() && !ext.is_empty() => {
                self.data_dir.join(file.with_extension(ext.trim_start_matches('.')))
            }
            _ => self.data_dir.join(file),
        }
    }
}

impl Config {
    /// Layered: built-in defaults, `<dir>/default`, `<dir>/<RUN_MODE>`,
    /// `<dir>/local`, then `SEATMAP__*` environment variables.
    pub fn load_from(dir: &Path) -> Result<Self, config::ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());
        let layer = |name: &str| {
            config::File::with_name(&dir.join(name).to_string_lossy()).required(false)
        };

        let s = config::Config::builder()
            .set_default("storage.data_dir", ".")?
            .set_default("session.report_format", "text")?
            .set_default("session.offer_alternate_preference", true)?
            .add_source(layer("default"))
            .add_source(layer(&run_mode))
            // Local overrides, not checked in
            .add_source(layer("local"))
            .add_source(config::Environment::with_prefix("SEATMAP").separator("__"))
            .build()?;

        s.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_defaults_without_files() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_from(dir.path()).unwrap();

        assert_eq!(config.storage.data_dir, PathBuf::from("."));
        assert_eq!(config.storage.extension, None);
        assert_eq!(config.session.report_format, ReportFormat::Text);
        assert!(config.session.offer_alternate_preference);
    }

    #[test]
    fn test_default_file_overrides() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("default.toml"),
            r#"
            [storage]
            data_dir = "/var/lib/seatmap"
            extension = "txt"

            [session]
            report_format = "json"
            offer_alternate_preference = false
            "#,
        )
        .unwrap();

        let config = Config::load_from(dir.path()).unwrap();
        assert_eq!(config.storage.data_dir, PathBuf::from("/var/lib/seatmap"));
        assert_eq!(config.session.report_format, ReportFormat::Json);
        assert!(!config.session.offer_alternate_preference);
        assert_eq!(
            config.storage.flight_path("AC101"),
            PathBuf::from("/var/lib/seatmap/AC101.txt")
        );
    }

    #[test]
    fn test_flight_path_resolution() {
        let storage = StorageConfig {
            data_dir: PathBuf::from("data"),
            extension: Some(".dat".to_string()),
        };
        assert_eq!(storage.flight_path("AC101"), PathBuf::from("data/AC101.dat"));
        assert_eq!(storage.flight_path("AC101.csv"), PathBuf::from("data/AC101.csv"));

        let storage = StorageConfig {
            data_dir: PathBuf::from("."),
            extension: None,
        };
        assert_eq!(storage.flight_path("AC101"), PathBuf::from("./AC101"));
    }
}
