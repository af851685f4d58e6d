//! Configuration file support for Nutri.
//!
//! Configuration is loaded from `$XDG_CONFIG_HOME/nutri/config.toml`.

use crate::{ActivityLevel, BiometricInput, Error, Result, Sex};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Application configuration
#[derive(Clone, Debug, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub catalog: CatalogConfig,

    #[serde(default)]
    pub profile: ProfileConfig,
}

/// Food catalog source
#[derive(Clone, Debug, Serialize, Deserialize, Default)]
pub struct CatalogConfig {
    /// JSON or CSV file replacing the built-in foods
    #[serde(default)]
    pub path: Option<PathBuf>,
}

/// Stored biometrics used when the energy estimate is not given them
#[derive(Clone, Debug, Serialize, Deserialize, Default, PartialEq)]
pub struct ProfileConfig {
    #[serde(default)]
    pub weight_kg: Option<f64>,

    #[serde(default)]
    pub height_cm: Option<f64>,

    #[serde(default)]
    pub age_years: Option<f64>,

    #[serde(default)]
    pub sex: Option<Sex>,

    #[serde(default)]
    pub activity_level: ActivityLevel,
}

impl ProfileConfig {
    /// Merge explicit values over the stored profile into a biometric input
    ///
    /// Weight, height and age must come from one side or the other; sex
    /// defaults to the other-sex constant like the estimate itself does.
    pub fn biometrics(
        &self,
        weight_kg: Option<f64>,
        height_cm: Option<f64>,
        age_years: Option<f64>,
        sex: Option<Sex>,
    ) -> Result<BiometricInput> {
        let require = |value: Option<f64>, name: &str| {
            value.ok_or_else(|| {
                Error::Config(format!(
                    "{} is required (pass it or set it under [profile])",
                    name
                ))
            })
        };

        Ok(BiometricInput {
            weight_kg: require(weight_kg.or(self.weight_kg), "weight_kg")?,
            height_cm: require(height_cm.or(self.height_cm), "height_cm")?,
            age_years: require(age_years.or(self.age_years), "age_years")?,
            sex: sex.or(self.sex).unwrap_or(Sex::Other),
        })
    }
}

impl Config {
    /// Load configuration from the standard config path
    pub fn load() -> Result<Self> {
        match Self::default_config_path() {
            Some(config_path) if config_path.exists() => Self::load_from(&config_path),
            config_path => {
                tracing::info!(
                    "No config file found at {:?}, using defaults",
                    config_path
                );
                Ok(Self::default())
            }
        }
    }

    /// Load configuration from a specific path
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        tracing::info!("Loaded config from {:?}", path);
        Ok(config)
    }

    /// Get the default config file path
    ///
    /// `None` when the platform has no config directory.
    pub fn default_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|base| base.join("nutri").join("config.toml"))
    }

    /// Save the current configuration to the default path
    pub fn save(&self) -> Result<()> {
        let config_path = Self::default_config_path()
            .ok_or_else(|| Error::Config("No config directory available".into()))?;
        self.save_to(&config_path)
    }

    /// Save the current configuration to a specific path
    pub fn save_to(&self, path: &Path) -> Result<()> {
        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)
            .map_err(|e| Error::Config(format!("Failed to serialize config: {}", e)))?;
        std::fs::write(path, contents)?;
        tracing::info!("Saved config to {:?}", path);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(config.catalog.path.is_none());
        assert_eq!(config.profile, ProfileConfig::default());
        assert_eq!(config.profile.activity_level, ActivityLevel::Sedentary);
    }

    #[test]
    fn test_partial_config() {
        let toml_str = r#"
[profile]
weight_kg = 70.0
sex = "male"
activity_level = "moderate"
"#;
        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.profile.weight_kg, Some(70.0));
        assert_eq!(config.profile.sex, Some(Sex::Male));
        assert_eq!(config.profile.activity_level, ActivityLevel::Moderate);
        assert!(config.profile.height_cm.is_none()); // default
        assert!(config.catalog.path.is_none()); // default
    }

    #[test]
    fn test_unknown_activity_level_in_config() {
        let toml_str = r#"
[profile]
activity_level = "marathoner"
"#;
        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.profile.activity_level, ActivityLevel::Sedentary);
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = Config::default();
        config.catalog.path = Some(PathBuf::from("/srv/foods.csv"));
        config.profile.age_years = Some(41.0);
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.catalog.path, config.catalog.path);
        assert_eq!(loaded.profile, config.profile);
    }

    #[test]
    fn test_biometrics_merge() {
        let profile = ProfileConfig {
            weight_kg: Some(80.0),
            height_cm: Some(180.0),
            age_years: Some(35.0),
            sex: Some(Sex::Male),
            activity_level: ActivityLevel::Active,
        };

        let input = profile
            .biometrics(Some(75.0), None, None, None)
            .unwrap();
        assert_eq!(input.weight_kg, 75.0);
        assert_eq!(input.height_cm, 180.0);
        assert_eq!(input.sex, Sex::Male);
    }

    #[test]
    fn test_biometrics_missing_value() {
        let profile = ProfileConfig::default();
        let err = profile
            .biometrics(Some(70.0), Some(175.0), None, None)
            .unwrap_err();
        assert!(matches!(err, Error::Config(ref msg) if msg.contains("age_years")));
    }
}
