use crate::domain::model::Backend;
use crate::utils::error::{GenError, Result};
use crate::utils::validation::Validate;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlConfig {
    pub generator: Option<GeneratorConfig>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GeneratorConfig {
    pub backends: Option<Vec<String>>,
    pub output_dir: Option<String>,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content =
            std::fs::read_to_string(&path).map_err(|e| GenError::ConfigError {
                message: format!(
                    "cannot read config file {}: {}",
                    path.as_ref().display(),
                    e
                ),
            })?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| GenError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${GEN_OUT})；未設定的變數保留原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| GenError::ConfigError {
            message: format!("invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn validate_config(&self) -> Result<()> {
        if let Some(generator) = &self.generator {
            if let Some(names) = &generator.backends {
                crate::utils::validation::validate_backend_names("generator.backends", names)?;
            }
            if let Some(dir) = &generator.output_dir {
                crate::utils::validation::validate_path("generator.output_dir", dir)?;
            }
        }
        Ok(())
    }

    /// 設定檔中列出的後端；未列出時為空
    pub fn backends(&self) -> Result<Vec<Backend>> {
        let names = self
            .generator
            .as_ref()
            .and_then(|g| g.backends.as_deref())
            .unwrap_or_default();

        names
            .iter()
            .map(|name| {
                name.parse::<Backend>()
                    .map_err(|reason| GenError::InvalidConfigValueError {
                        field: "generator.backends".to_string(),
                        value: name.clone(),
                        reason,
                    })
            })
            .collect()
    }

    pub fn output_dir(&self) -> Option<&str> {
        self.generator.as_ref().and_then(|g| g.output_dir.as_deref())
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
