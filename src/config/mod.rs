#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

use crate::core::DEFAULT_POPULAR_COUNT;
use crate::utils::error::Result;
use crate::utils::validation::{validate_non_empty_string, validate_path, Validate};
use toml_config::TomlConfig;

#[cfg(feature = "cli")]
pub use cli::{CliConfig, Command, KindArg};

pub const DEFAULT_DATA_PATH: &str = "platform_data.json";
pub const DEFAULT_PLATFORM_NAME: &str = "SuperLearn";
pub const DEFAULT_SEPARATOR_WIDTH: usize = 40;

/// Effective settings after merging command line flags over the TOML file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub platform_name: String,
    pub data_path: String,
    pub popular_count: usize,
    pub separator_width: usize,
    pub dry_run: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            platform_name: DEFAULT_PLATFORM_NAME.to_string(),
            data_path: DEFAULT_DATA_PATH.to_string(),
            popular_count: DEFAULT_POPULAR_COUNT,
            separator_width: DEFAULT_SEPARATOR_WIDTH,
            dry_run: false,
        }
    }
}

impl Settings {
    /// Fill unset values from `file`, then from the built-in defaults.
    pub fn merge(
        platform_name: Option<String>,
        data_path: Option<String>,
        file: Option<&TomlConfig>,
    ) -> Self {
        let defaults = Self::default();
        let file_platform = file.map(|f| &f.platform);

        Self {
            platform_name: platform_name
                .or_else(|| file_platform.and_then(|p| p.name.clone()))
                .unwrap_or(defaults.platform_name),
            data_path: data_path
                .or_else(|| file_platform.and_then(|p| p.data_path.clone()))
                .unwrap_or(defaults.data_path),
            popular_count: file
                .and_then(TomlConfig::popular_count)
                .unwrap_or(defaults.popular_count),
            separator_width: file
                .and_then(TomlConfig::separator_width)
                .unwrap_or(defaults.separator_width),
            dry_run: false,
        }
    }
}

impl Validate for Settings {
    fn validate(&self) -> Result<()> {
        validate_non_empty_string("platform_name", &self.platform_name)?;
        validate_path("data_path", &self.data_path)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merge_prefers_flags_over_file() {
        let file = TomlConfig::from_toml_str(
            "[platform]\nname = \"FileLearn\"\ndata_path = \"file.json\"\n[display]\npopular_count = 5\n",
        )
        .unwrap();

        let settings = Settings::merge(Some("FlagLearn".to_string()), None, Some(&file));
        assert_eq!(settings.platform_name, "FlagLearn");
        assert_eq!(settings.data_path, "file.json");
        assert_eq!(settings.popular_count, 5);
        assert_eq!(settings.separator_width, DEFAULT_SEPARATOR_WIDTH);
    }

    #[test]
    fn test_merge_without_file_uses_defaults() {
        let settings = Settings::merge(None, None, None);
        assert_eq!(settings, Settings::default());
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_empty_name() {
        let settings = Settings::merge(Some(" ".to_string()), None, None);
        assert!(settings.validate().is_err());
    }
}
