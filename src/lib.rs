pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use crate::config::{cli::LocalStorage, toml_config::TomlConfig, CliConfig};
pub use crate::core::generator::{FileReport, GenerateOptions, Generator};
pub use crate::core::parser::parse_declaration;
pub use crate::domain::model::{Backend, BackendSelection, Declaration};
pub use crate::utils::error::{GenError, Result};
