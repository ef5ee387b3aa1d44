pub mod cli;
pub mod toml_config;

use crate::core::generator::GenerateOptions;
use crate::domain::model::{Backend, BackendSelection};
use crate::utils::error::Result;
use crate::utils::validation::{self, Validate};
use clap::Parser;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use toml_config::TomlConfig;

#[derive(Debug, Clone, Default, Serialize, Deserialize, Parser)]
#[command(name = "rpc-stubgen")]
#[command(about = "Generate RPC service stubs from interface definition files")]
pub struct CliConfig {
    /// Interface definition files, e.g. hello.proto
    pub files: Vec<PathBuf>,

    #[arg(long, help = "Generate code for C++")]
    pub cpp: bool,

    #[arg(long, help = "Generate code for Go")]
    pub go: bool,

    /// Directory for generated files (default: next to each input)
    #[arg(short, long)]
    pub output_dir: Option<String>,

    /// Path to a TOML configuration file
    #[arg(short, long)]
    pub config: Option<String>,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON")]
    pub log_json: bool,

    /// Parse and show what would be generated without writing anything
    #[arg(long)]
    pub dry_run: bool,
}

impl CliConfig {
    /// Backends requested by flags, in flag order.
    pub fn explicit_backends(&self) -> Vec<Backend> {
        let mut backends = Vec::new();
        if self.cpp {
            backends.push(Backend::Cpp);
        }
        if self.go {
            backends.push(Backend::Go);
        }
        backends
    }

    /// Loads the TOML file named by `--config`, if any.
    pub fn load_file_config(&self) -> Result<Option<TomlConfig>> {
        match &self.config {
            Some(path) => {
                tracing::debug!("loading configuration from {}", path);
                let file_config = TomlConfig::from_file(path)?;
                file_config.validate()?;
                Ok(Some(file_config))
            }
            None => Ok(None),
        }
    }

    /// Merges flags over the file configuration: flags win, then the file,
    /// then built-in defaults.
    pub fn resolve_options(&self, file_config: Option<&TomlConfig>) -> Result<GenerateOptions> {
        let configured = match file_config {
            Some(c) => c.backends()?,
            None => Vec::new(),
        };
        let selection = BackendSelection::resolve(&self.explicit_backends(), &configured);

        let output_dir = self
            .output_dir
            .as_deref()
            .or_else(|| file_config.and_then(|c| c.output_dir()))
            .map(PathBuf::from);

        Ok(GenerateOptions {
            selection,
            output_dir,
            dry_run: self.dry_run,
        })
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        if let Some(dir) = &self.output_dir {
            validation::validate_path("output_dir", dir)?;
        }
        if let Some(path) = &self.config {
            validation::validate_path("config", path)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_args() {
        let config =
            CliConfig::try_parse_from(["rpc-stubgen", "--go", "-o", "gen", "a.proto", "b.proto"])
                .unwrap();

        assert_eq!(
            config.files,
            vec![PathBuf::from("a.proto"), PathBuf::from("b.proto")]
        );
        assert_eq!(config.explicit_backends(), vec![Backend::Go]);
        assert_eq!(config.output_dir.as_deref(), Some("gen"));
    }

    #[test]
    fn test_no_files_is_accepted() {
        let config = CliConfig::try_parse_from(["rpc-stubgen"]).unwrap();
        assert!(config.files.is_empty());
    }

    #[test]
    fn test_resolve_defaults() {
        let options = CliConfig::default().resolve_options(None).unwrap();

        assert_eq!(options.selection.backends(), &[Backend::Cpp]);
        assert_eq!(options.output_dir, None);
        assert!(!options.dry_run);
    }

    #[test]
    fn test_flags_override_file_config() {
        let file_config = TomlConfig::from_toml_str(
            r#"
[generator]
backends = ["go"]
output_dir = "from-file"
"#,
        )
        .unwrap();

        let options = CliConfig::default()
            .resolve_options(Some(&file_config))
            .unwrap();
        assert_eq!(options.selection.backends(), &[Backend::Go]);
        assert_eq!(options.output_dir, Some(PathBuf::from("from-file")));

        let cli = CliConfig {
            cpp: true,
            output_dir: Some("from-flag".to_string()),
            ..CliConfig::default()
        };
        let options = cli.resolve_options(Some(&file_config)).unwrap();
        assert_eq!(options.selection.backends(), &[Backend::Cpp]);
        assert_eq!(options.output_dir, Some(PathBuf::from("from-flag")));
    }

    #[test]
    fn test_validate_rejects_empty_output_dir() {
        let cli = CliConfig {
            output_dir: Some(String::new()),
            ..CliConfig::default()
        };
        assert!(cli.validate().is_err());
    }
}
