use anyhow::{anyhow, Context, Result};
use chrono_tz::Tz;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::calendar::{AssemblerOptions, ChainPolicy};

pub const DEFAULT_OUTPUT_FILENAME: &str = "generated_calendar.ics";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub output_filename: String,
    /// Convert resolved local times to UTC before writing
    pub use_standard_timezone: bool,
    /// IANA name of the zone resolved times are interpreted in
    pub timezone: String,
    pub chain_policy: ChainPolicy,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            output_filename: DEFAULT_OUTPUT_FILENAME.to_string(),
            use_standard_timezone: true,
            timezone: "UTC".to_string(),
            chain_policy: ChainPolicy::default(),
        }
    }
}

impl Config {
    /// Load from `path`, falling back to defaults when the file is absent
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            log::debug!("No config at {}, using defaults", path.display());
            return Ok(Config::default());
        }

        let content = fs::read_to_string(path).context("Failed to read config file")?;
        let config: Config = toml::from_str(&content).context("Failed to parse config file")?;
        config.tz()?;
        Ok(config)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        fs::write(path, content).context("Failed to write config file")?;

        Ok(())
    }

    pub fn tz(&self) -> Result<Tz> {
        self.timezone
            .parse::<Tz>()
            .map_err(|_| anyhow!("Unknown time zone '{}'", self.timezone))
    }

    pub fn assembler_options(&self) -> Result<AssemblerOptions> {
        Ok(AssemblerOptions {
            timezone: self.tz()?,
            use_standard_timezone: self.use_standard_timezone,
            chain_policy: self.chain_policy,
        })
    }
}

pub fn get_config_path() -> Result<PathBuf> {
    let proj_dirs = ProjectDirs::from("org", "textcal", "textcal")
        .context("Failed to determine config directory")?;

    Ok(proj_dirs.config_dir().join("config.toml"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.output_filename, "generated_calendar.ics");
        assert!(config.use_standard_timezone);
        assert_eq!(config.tz().unwrap(), Tz::UTC);
        assert_eq!(config.chain_policy, ChainPolicy::ChainableOnly);
    }

    #[test]
    fn test_missing_file_gives_defaults() -> Result<()> {
        let temp_dir = tempdir()?;
        let loaded = Config::load_from(&temp_dir.path().join("nope.toml"))?;
        assert_eq!(loaded, Config::default());
        Ok(())
    }

    #[test]
    fn test_config_save_load() -> Result<()> {
        let temp_dir = tempdir()?;
        let config_path = temp_dir.path().join("nested").join("config.toml");

        let config = Config {
            output_filename: "week.ics".to_string(),
            use_standard_timezone: false,
            timezone: "Europe/Paris".to_string(),
            chain_policy: ChainPolicy::EveryEvent,
        };
        config.save_to(&config_path)?;

        let loaded = Config::load_from(&config_path)?;
        assert_eq!(loaded, config);
        Ok(())
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() -> Result<()> {
        let temp_dir = tempdir()?;
        let config_path = temp_dir.path().join("config.toml");
        fs::write(&config_path, "use_standard_timezone = false\nchain_policy = \"every-event\"\n")?;

        let loaded = Config::load_from(&config_path)?;
        assert!(!loaded.use_standard_timezone);
        assert_eq!(loaded.chain_policy, ChainPolicy::EveryEvent);
        assert_eq!(loaded.output_filename, DEFAULT_OUTPUT_FILENAME);
        Ok(())
    }

    #[test]
    fn test_unknown_timezone_rejected() -> Result<()> {
        let temp_dir = tempdir()?;
        let config_path = temp_dir.path().join("config.toml");
        fs::write(&config_path, "timezone = \"Mars/Olympus_Mons\"\n")?;

        let err = Config::load_from(&config_path).unwrap_err();
        assert!(err.to_string().contains("Mars/Olympus_Mons"));
        Ok(())
    }
}
