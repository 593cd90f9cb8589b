use std::{
    env,
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::errors::{RentError, Result};

const DEFAULT_DIR_NAME: &str = ".rent_core";
const HOME_ENV: &str = "RENT_CORE_HOME";
const CONFIG_DIR: &str = "config";
const CONFIG_FILE: &str = "config.json";
const TMP_SUFFIX: &str = "tmp";

/// Defaults applied to new contracts plus logging preferences.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Config {
    pub currency: String,
    #[serde(default = "Config::default_is_vat_value")]
    pub default_is_vat: bool,
    #[serde(default = "Config::default_vat_ratio_value")]
    pub default_vat_ratio: Decimal,
    #[serde(default)]
    pub default_discount: Decimal,
    #[serde(default = "Config::default_term_years_value")]
    pub default_term_years: u32,
    #[serde(default = "Config::default_log_filter_value")]
    pub log_filter: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            currency: "EUR".into(),
            default_is_vat: Self::default_is_vat_value(),
            default_vat_ratio: Self::default_vat_ratio_value(),
            default_discount: Decimal::ZERO,
            default_term_years: Self::default_term_years_value(),
            log_filter: Self::default_log_filter_value(),
        }
    }
}

impl Config {
    pub fn default_is_vat_value() -> bool {
        true
    }

    pub fn default_vat_ratio_value() -> Decimal {
        Decimal::new(2, 1)
    }

    pub fn default_term_years_value() -> u32 {
        9
    }

    pub fn default_log_filter_value() -> String {
        "rent_core=info".into()
    }

    /// Rejects values the ledger engine cannot work with.
    pub fn validate(&self) -> Result<()> {
        if self.default_vat_ratio.is_sign_negative() {
            return Err(RentError::Config(format!(
                "default_vat_ratio must not be negative, got {}",
                self.default_vat_ratio
            )));
        }
        if self.default_term_years == 0 {
            return Err(RentError::Config(
                "default_term_years must be at least 1".into(),
            ));
        }
        Ok(())
    }
}

/// Handles persistence of [`Config`] as JSON.
#[derive(Debug, Clone)]
pub struct ConfigManager {
    path: PathBuf,
}

impl ConfigManager {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Lays out `<base>/config/config.json`, creating the directory.
    pub fn with_base_dir(base: PathBuf) -> Result<Self> {
        let config_dir = base.join(CONFIG_DIR);
        fs::create_dir_all(&config_dir)?;
        Ok(Self::new(config_dir.join(CONFIG_FILE)))
    }

    /// Uses `RENT_CORE_HOME` when set, `~/.rent_core` otherwise.
    pub fn default_location() -> Result<Self> {
        Self::with_base_dir(app_data_dir())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads the stored configuration, falling back to defaults when absent.
    pub fn load(&self) -> Result<Config> {
        if !self.path.exists() {
            tracing::debug!(path = %self.path.display(), "no config file, using defaults");
            return Ok(Config::default());
        }
        let data = fs::read_to_string(&self.path)?;
        let config: Config = serde_json::from_str(&data)?;
        config.validate()?;
        Ok(config)
    }

    pub fn save(&self, config: &Config) -> Result<()> {
        config.validate()?;
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(config)?;
        let tmp = tmp_path(&self.path);
        write_atomic(&tmp, &json)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

/// Returns the application data directory, defaulting to `~/.rent_core`.
pub fn app_data_dir() -> PathBuf {
    if let Some(custom) = env::var_os(HOME_ENV) {
        return PathBuf::from(custom);
    }
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(DEFAULT_DIR_NAME)
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.{}", existing, TMP_SUFFIX),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

fn write_atomic(path: &Path, data: &str) -> Result<()> {
    let mut file = File::create(path)?;
    file.write_all(data.as_bytes())?;
    file.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tmp_path_appends_suffix() {
        let tmp = tmp_path(Path::new("/data/config.json"));
        assert_eq!(tmp, PathBuf::from("/data/config.json.tmp"));
    }

    #[test]
    fn default_config_is_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.default_vat_ratio, Decimal::new(2, 1));
        assert_eq!(config.default_term_years, 9);
    }

    #[test]
    fn negative_vat_ratio_is_rejected() {
        let config = Config {
            default_vat_ratio: Decimal::new(-1, 1),
            ..Config::default()
        };
        assert!(matches!(config.validate(), Err(RentError::Config(_))));
    }
}
