use crate::utils::error::{PlatformError, Result};
use crate::utils::validation::{validate_non_empty_string, validate_path, validate_range, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlConfig {
    #[serde(default)]
    pub platform: PlatformConfig,
    pub display: Option<DisplayConfig>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlatformConfig {
    pub name: Option<String>,
    pub data_path: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplayConfig {
    pub popular_count: Option<usize>,
    pub separator_width: Option<usize>,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(|e| PlatformError::ConfigError {
            message: format!("cannot read {}: {}", path.as_ref().display(), e),
        })?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| PlatformError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${DATA_DIR})，未設定的變數保持原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| PlatformError::ConfigError {
            message: format!("invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.into_owned())
    }

    pub fn popular_count(&self) -> Option<usize> {
        self.display.as_ref().and_then(|d| d.popular_count)
    }

    pub fn separator_width(&self) -> Option<usize> {
        self.display.as_ref().and_then(|d| d.separator_width)
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        if let Some(name) = &self.platform.name {
            validate_non_empty_string("platform.name", name)?;
        }

        if let Some(data_path) = &self.platform.data_path {
            validate_path("platform.data_path", data_path)?;
        }

        if let Some(width) = self.separator_width() {
            validate_range("display.separator_width", width, 1, 200)?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_basic_toml_config() {
        let toml_content = r#"
[platform]
name = "SuperLearn"
data_path = "./data/platform_data.json"

[display]
popular_count = 2
separator_width = 30
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();

        assert_eq!(config.platform.name.as_deref(), Some("SuperLearn"));
        assert_eq!(config.platform.data_path.as_deref(), Some("./data/platform_data.json"));
        assert_eq!(config.popular_count(), Some(2));
        assert_eq!(config.separator_width(), Some(30));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_sections_are_optional() {
        let config = TomlConfig::from_toml_str("").unwrap();
        assert!(config.platform.name.is_none());
        assert!(config.popular_count().is_none());
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("COURSE_PLATFORM_TEST_DIR", "/tmp/courses");

        let toml_content = r#"
[platform]
data_path = "${COURSE_PLATFORM_TEST_DIR}/platform_data.json"
name = "${COURSE_PLATFORM_UNSET_VAR}"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(
            config.platform.data_path.as_deref(),
            Some("/tmp/courses/platform_data.json")
        );
        assert_eq!(config.platform.name.as_deref(), Some("${COURSE_PLATFORM_UNSET_VAR}"));

        std::env::remove_var("COURSE_PLATFORM_TEST_DIR");
    }

    #[test]
    fn test_config_validation() {
        let config = TomlConfig::from_toml_str("[platform]\nname = \"  \"\n").unwrap();
        assert!(config.validate().is_err());

        let config = TomlConfig::from_toml_str("[display]\nseparator_width = 0\n").unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_toml_is_config_error() {
        let err = TomlConfig::from_toml_str("[platform\nname = 1").unwrap_err();
        assert!(matches!(err, PlatformError::ConfigError { .. }));
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(b"[platform]\nname = \"FileLearn\"\n")
            .unwrap();

        let config = TomlConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.platform.name.as_deref(), Some("FileLearn"));
    }
}
